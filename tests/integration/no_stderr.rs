// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests to ensure there is no stderr output for successful commands.

use crate::{get_cmd_output, harp_grid_args, hitec};

#[test]
fn test_calc_no_stderr() {
    let cmd = hitec()
        .args(harp_grid_args())
        .args(["--n-points", "9", "--elapsed-time", "3600"])
        .ok();
    assert!(cmd.is_ok(), "calc failed: {}", cmd.err().unwrap());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}

#[test]
fn test_receivers_no_stderr() {
    let cmd = hitec().arg("receivers").ok();
    assert!(cmd.is_ok(), "receivers failed: {}", cmd.err().unwrap());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}
