// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests of the calc subcommand.

use std::{fs, io::Write};

use approx::assert_abs_diff_eq;
use indoc::indoc;
use tempfile::TempDir;

use crate::{get_cmd_output, harp_grid_args, hitec};

#[test]
fn test_calc_rms_report() {
    let cmd = hitec().args(harp_grid_args()).args(["--rms", "0.05"]).ok();
    assert!(cmd.is_ok(), "calc failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("T_sys"), "{stdout}");
    assert!(stdout.contains("Integration time per point: 309.316 s"), "{stdout}");
    assert!(stdout.contains("Elapsed time: 837.8 s"), "{stdout}");
}

#[test]
fn test_calc_json_output() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("result.json");

    let cmd = hitec()
        .args(harp_grid_args())
        .args(["--rms", "0.05", "--output", &format!("{}", output.display())])
        .ok();
    assert!(cmd.is_ok(), "calc failed: {}", cmd.err().unwrap());

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["input"], "rms");
    assert_abs_diff_eq!(json["value"].as_f64().unwrap(), 837.823, epsilon = 1e-2);
    assert_abs_diff_eq!(
        json["extra"]["int_time"].as_f64().unwrap(),
        309.3157,
        epsilon = 1e-3
    );
    assert_eq!(json["extra"]["n_shared"], 1);
    assert!(json["extra"].get("passes").is_none());
}

#[test]
fn test_calc_toml_output_for_basket_weave() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output = tmp_dir.path().join("result.toml");

    #[rustfmt::skip]
    let cmd = hitec()
        .args([
            "calc",
            "--receiver", "HARP",
            "--map-mode", "raster",
            "--freq", "345",
            "--freq-res", "0.977",
            "--tau-225", "0.25",
            "--zenith-angle", "50",
            "--width", "1800",
            "--height", "900",
            "--dx", "7.27",
            "--dy", "116.4",
            "--basket-weave",
            "--rms", "0.5",
            "--output", &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "calc failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Scan direction 2"), "{stdout}");

    let contents = fs::read_to_string(&output).unwrap();
    let result: toml::Value = toml::from_str(&contents).unwrap();
    let extra = &result["extra"];
    assert_abs_diff_eq!(extra["int_time"].as_float().unwrap(), 6.842086, epsilon = 1e-5);
    assert_abs_diff_eq!(extra["elapsed_time"].as_float().unwrap(), 17653.501, epsilon = 1e-2);
    let passes = extra["passes"].as_array().unwrap();
    assert_eq!(passes.len(), 2);
    assert_eq!(passes[0]["n_points"].as_integer(), Some(264));
    assert_eq!(passes[1]["n_rows"].as_integer(), Some(16));
}

#[test]
fn test_calc_args_file_with_override() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let args_file = tmp_dir.path().join("args.toml");
    let mut f = fs::File::create(&args_file).unwrap();
    f.write_all(
        indoc! {r#"
        receiver = "HARP"
        freq = 345.0
        freq_res = 0.488
        tau_225 = 0.1
        zenith_angle = 35.0
        int_time = 1000.0
        "#}
        .as_bytes(),
    )
    .unwrap();
    drop(f);

    let output = tmp_dir.path().join("result.json");
    let cmd = hitec()
        .args([
            "calc",
            &format!("{}", args_file.display()),
            "--rms",
            "0.05",
            "--output",
            &format!("{}", output.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "calc failed: {}", cmd.err().unwrap());

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["input"], "rms");
    assert_abs_diff_eq!(
        json["extra"]["int_time"].as_f64().unwrap(),
        309.3157,
        epsilon = 1e-3
    );
}

#[test]
fn test_calc_save_toml_reproduces_run() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let saved = tmp_dir.path().join("saved.toml");

    let cmd = hitec()
        .args(harp_grid_args())
        .args(["--n-points", "4", "--rms", "0.05"])
        .args(["--save-toml", &format!("{}", saved.display())])
        .ok();
    assert!(cmd.is_ok(), "calc failed: {}", cmd.err().unwrap());
    let (first, _) = get_cmd_output(cmd);

    let contents = fs::read_to_string(&saved).unwrap();
    assert!(contents.contains("receiver = \"HARP\""), "{contents}");
    assert!(contents.contains("n_points = 4"), "{contents}");

    let cmd = hitec()
        .args(["calc", &format!("{}", saved.display())])
        .ok();
    assert!(cmd.is_ok(), "calc failed: {}", cmd.err().unwrap());
    let (second, _) = get_cmd_output(cmd);

    // Log lines carry timestamps; only compare the values.
    let elapsed = |s: &str| {
        s.lines()
            .find_map(|l| l.split_once("Elapsed time:"))
            .map(|(_, value)| value.to_string())
    };
    assert!(elapsed(&first).is_some());
    assert_eq!(elapsed(&first), elapsed(&second));
}

#[test]
fn test_calc_dry_run() {
    let cmd = hitec()
        .args(harp_grid_args())
        .args(["--rms", "0.05", "--dry-run"])
        .ok();
    assert!(cmd.is_ok(), "calc failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Dry run"), "{stdout}");
    assert!(!stdout.contains("Elapsed time:"), "{stdout}");

    // Validation still happens.
    let cmd = hitec()
        .args(harp_grid_args())
        .args(["--rms", "0.05", "--dry-run", "--dsb"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("does not support"), "{stderr}");
}

#[test]
fn test_calc_below_minimum_sample_time() {
    #[rustfmt::skip]
    let cmd = hitec()
        .args([
            "calc",
            "--receiver", "HARP",
            "--map-mode", "raster",
            "--freq", "330",
            "--freq-res", "0.977",
            "--tau-225", "0.04",
            "--zenith-angle", "75",
            "--width", "300",
            "--height", "400",
            "--dx", "7.27",
            "--scan-spacing", "1 pixel",
            "--int-time", "0.09",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(
        stderr.starts_with("Error: The requested integration time per point is less than the minimum sample time (0.1 s)."),
        "{stderr}"
    );
    assert!(stderr.contains("hitec calc --help"), "{stderr}");
}

#[test]
fn test_calc_bad_arguments() {
    let cmd = hitec().args(harp_grid_args()).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Nothing to calculate"), "{stderr}");

    let cmd = hitec()
        .args(["calc", "--receiver", "RxZ", "--rms", "0.1"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("Unknown receiver 'RxZ'"), "{stderr}");
    assert!(stderr.contains("hitec receivers --help"), "{stderr}");

    let cmd = hitec()
        .args(harp_grid_args())
        .args(["--rms", "0.05", "--sw-mode", "frsw", "--map-mode", "raster"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.starts_with("Error: "), "{stderr}");
}
