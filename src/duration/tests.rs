// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;

use super::*;

#[test]
fn test_shared_selection() {
    use MapMode::*;
    use SwitchMode::*;

    // Shared offs for many points.
    let p = duration_param(Grid, Pssw, 25, false, false).unwrap();
    assert_abs_diff_eq!(p.b, 2.65);
    // A single point can't share anything.
    let p = duration_param(Grid, Pssw, 1, false, false).unwrap();
    assert_abs_diff_eq!(p.b, 2.45);

    let p = duration_param(Jiggle, Bmsw, 9, false, false).unwrap();
    assert_abs_diff_eq!(p.b, 1.27);
    assert_abs_diff_eq!(p.c, 1.27);
    let p = duration_param(Jiggle, Bmsw, 9, true, false).unwrap();
    assert_abs_diff_eq!(p.b, 2.30);
    assert_abs_diff_eq!(p.c, 0.0);

    let p = duration_param(Jiggle, Pssw, 49, true, false).unwrap();
    assert_abs_diff_eq!(p.b, 2.45);
    let p = duration_param(Jiggle, Pssw, 49, false, false).unwrap();
    assert_abs_diff_eq!(p.b, 1.75);

    let p = duration_param(Raster, Pssw, 100, false, false).unwrap();
    assert_eq!(
        p,
        DurationParam {
            a: 317.0,
            b: 1.0,
            c: 1.05,
            d: 14.3,
            e: 1.0,
            block_minutes: 115.0,
        }
    );
}

#[test]
fn test_continuum_factor() {
    let line = duration_param(MapMode::Grid, SwitchMode::Bmsw, 49, true, false).unwrap();
    let cont = duration_param(MapMode::Grid, SwitchMode::Bmsw, 49, true, true).unwrap();
    assert_abs_diff_eq!(line.e, 1.0);
    assert_abs_diff_eq!(cont.e, 1.2);
    let t_line = line.elapsed_time(23.16, 49, 1).unwrap();
    let t_cont = cont.elapsed_time(23.16, 49, 1).unwrap();
    assert_abs_diff_eq!(t_cont, 1.2 * t_line, epsilon = 1e-9);
    assert_abs_diff_eq!(t_cont, 3347.48496, epsilon = 1e-6);
}

#[test]
fn test_invalid_combination() {
    for sw_mode in [SwitchMode::Bmsw, SwitchMode::Frsw] {
        let result = duration_param(MapMode::Raster, sw_mode, 10, false, false);
        match result {
            Err(ItcError::InvalidMode(msg)) => assert!(msg.contains("raster"), "{msg}"),
            _ => panic!("Expected InvalidMode"),
        }
    }
}

#[test]
fn test_grid_elapsed_time() {
    let p = duration_param(MapMode::Grid, SwitchMode::Pssw, 25, false, false).unwrap();
    assert_abs_diff_eq!(p.elapsed_time(77.1, 25, 1).unwrap(), 5187.875, epsilon = 1e-9);
    assert_abs_diff_eq!(p.int_time(5187.875, 25, 1).unwrap(), 77.1, epsilon = 1e-9);

    let p = duration_param(MapMode::Jiggle, SwitchMode::Bmsw, 9, false, false).unwrap();
    assert_abs_diff_eq!(p.elapsed_time(10.0, 9, 1).unwrap(), 252.4, epsilon = 1e-9);
}

#[test]
fn test_raster_block_overhead() {
    let p = duration_param(MapMode::Raster, SwitchMode::Pssw, 40, false, false).unwrap();

    // 4017.3 s of scanning fits in one 115 minute block.
    let elapsed = p.elapsed_time(4.0, 40, 20).unwrap();
    assert_abs_diff_eq!(elapsed, 4017.262647 + 317.0, epsilon = 1e-6);

    // Round trips work either side of block boundaries.
    for int_time in [1.0, 4.0, 5.0, 10.0, 30.0] {
        let elapsed = p.elapsed_time(int_time, 40, 20).unwrap();
        assert_abs_diff_eq!(p.int_time(elapsed, 40, 20).unwrap(), int_time, epsilon = 1e-9);
    }
    // 30 s per point needs several blocks.
    assert_abs_diff_eq!(
        p.elapsed_time(30.0, 40, 20).unwrap(),
        29855.469852,
        epsilon = 1e-6
    );
}

#[test]
fn test_elapsed_time_is_monotonic() {
    let p = duration_param(MapMode::Raster, SwitchMode::Pssw, 40, false, false).unwrap();
    let mut last = 0.0;
    for i in 1..200 {
        let elapsed = p.elapsed_time(i as f64 * 0.5, 40, 20).unwrap();
        assert!(elapsed > last);
        last = elapsed;
    }
}

#[test]
fn test_too_little_elapsed_time() {
    // Less than the fixed overhead gives a negative integration time, which is
    // for the caller to reject.
    let p = duration_param(MapMode::Grid, SwitchMode::Bmsw, 4, false, false).unwrap();
    assert!(p.int_time(50.0, 4, 1).unwrap() < 0.0);
}
