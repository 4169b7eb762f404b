// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod calc;
mod catalog;
mod no_stderr;

use std::{process::Output, str::from_utf8};

use assert_cmd::{output::OutputError, Command};

fn hitec() -> Command {
    Command::cargo_bin("hitec").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

/// The arguments of a single-pointing HARP observation.
fn harp_grid_args() -> Vec<&'static str> {
    #[rustfmt::skip]
    let args = vec![
        "calc",
        "--receiver", "HARP",
        "--freq", "345",
        "--freq-res", "0.488",
        "--tau-225", "0.1",
        "--zenith-angle", "35",
    ];
    args
}
