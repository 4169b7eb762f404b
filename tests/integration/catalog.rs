// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests of the receivers, t-sys and opacity subcommands.

use std::{fs, io::Write};

use indoc::indoc;
use tempfile::TempDir;

use crate::{get_cmd_output, hitec};

#[test]
fn test_receivers_list() {
    let cmd = hitec().arg("receivers").ok();
    assert!(cmd.is_ok(), "receivers failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    for receiver in ["RxA3", "HARP", "RxWD", "Uu", "Aweoweo"] {
        assert!(stdout.contains(receiver), "{stdout}");
    }
}

#[test]
fn test_receivers_describe() {
    let cmd = hitec().args(["receivers", "--receiver", "harp"]).ok();
    assert!(cmd.is_ok(), "receivers failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Receiver HARP"), "{stdout}");
    assert!(stdout.contains("HARP5 (25 points)"), "{stdout}");
    assert!(stdout.contains("1/2 array (58.2\")"), "{stdout}");
}

#[test]
fn test_t_sys() {
    #[rustfmt::skip]
    let cmd = hitec()
        .args([
            "t-sys",
            "--receiver", "Uu",
            "--freq", "230",
            "--tau-225", "0.1",
            "--zenith-angle", "30",
        ])
        .ok();
    assert!(cmd.is_ok(), "t-sys failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("T_sys: 342.23 K"), "{stdout}");
    assert!(stdout.contains("LSB sideband, IF 6 GHz, LO 236.000 GHz"), "{stdout}");
}

#[test]
fn test_t_sys_measured() {
    #[rustfmt::skip]
    let cmd = hitec()
        .args([
            "t-sys",
            "--receiver", "RxA3",
            "--freq", "230",
            "--tau-225", "0.1",
            "--zenith-angle", "30",
            "--measured-t-sys", "400",
        ])
        .ok();
    assert!(cmd.is_ok(), "t-sys failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Implied receiver temperature"), "{stdout}");
    assert!(stdout.contains("T_rx: "), "{stdout}");
}

#[test]
fn test_t_sys_out_of_range() {
    #[rustfmt::skip]
    let cmd = hitec()
        .args([
            "t-sys",
            "--receiver", "HARP",
            "--freq", "230",
            "--tau-225", "0.1",
            "--zenith-angle", "30",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("sky frequency"), "{stderr}");
}

#[test]
fn test_opacity() {
    let cmd = hitec()
        .args(["opacity", "--tau-225", "0.1", "--freq", "345"])
        .ok();
    assert!(cmd.is_ok(), "opacity failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Opacity at 345 GHz"), "{stdout}");

    let cmd = hitec().args(["opacity", "--tau-225", "0.1"]).ok();
    assert!(cmd.is_ok(), "opacity failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Opacity curve for tau225 = 0.1"), "{stdout}");

    let cmd = hitec().args(["opacity", "--tau-225", "0.12"]).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(
        stderr.contains("Tabulated values: 0.03, 0.05, 0.065, 0.1, 0.16, 0.2, 0.25"),
        "{stderr}"
    );
    assert!(stderr.contains("hitec opacity --help"), "{stderr}");
}

#[test]
fn test_user_receiver_info() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let receiver_info = tmp_dir.path().join("receivers.json");
    let mut f = fs::File::create(&receiver_info).unwrap();
    f.write_all(
        indoc! {r#"
        {
            "RxTest": {
                "f_min": 200.0,
                "f_max": 300.0,
                "if_min": 4.0,
                "if_max": 6.0,
                "if_default": 5.0,
                "n_mix": 2,
                "ssb_available": true,
                "dsb_available": true,
                "frsw_available": false,
                "pixel_size": 20.0,
                "eta_tel": 0.7,
                "t_rx": {"frequency": [[200.0, 80.0], [300.0, 100.0]]}
            }
        }
        "#}
        .as_bytes(),
    )
    .unwrap();
    drop(f);

    let cmd = hitec()
        .args(["receivers", "--receiver-info", &format!("{}", receiver_info.display())])
        .ok();
    assert!(cmd.is_ok(), "receivers failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("RxTest"), "{stdout}");
    assert!(!stdout.contains("HARP"), "{stdout}");

    #[rustfmt::skip]
    let cmd = hitec()
        .args([
            "calc",
            "--receiver-info", &format!("{}", receiver_info.display()),
            "--receiver", "RxTest",
            "--freq", "250",
            "--freq-res", "0.5",
            "--tau-225", "0.1",
            "--zenith-angle", "30",
            "--dual-pol",
            "--rms", "0.1",
        ])
        .ok();
    assert!(cmd.is_ok(), "calc failed: {}", cmd.err().unwrap());
}
