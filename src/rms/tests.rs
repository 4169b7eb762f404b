// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;

use super::*;

const A3_T_SYS: f64 = 403.52954686544615;

fn grid_pssw(n_points: usize) -> RmsTimeConverter {
    RmsTimeConverter {
        map_mode: MapMode::Grid,
        sw_mode: SwitchMode::Pssw,
        t_sys: A3_T_SYS,
        freq_res: 0.0192,
        dual_pol: false,
        separate_offs: false,
        n_points,
        multiscan: 1.0,
    }
}

#[test]
fn test_n_shared_grid_pssw() {
    let c = grid_pssw(25);
    assert_eq!(c.n_shared(1.0), 25);
    assert_eq!(c.n_shared(2.0), 15);
    assert_eq!(c.n_shared(4.88), 6);
    assert_eq!(c.n_shared(15.0), 2);
    assert_eq!(c.n_shared(31.0), 1);
    assert_eq!(c.n_shared(500.0), 1);
    assert_eq!(c.n_shared(0.0), 25);
}

#[test]
fn test_n_shared_other_modes() {
    let c = RmsTimeConverter {
        map_mode: MapMode::Jiggle,
        ..grid_pssw(25)
    };
    assert_eq!(c.n_shared(100.0), 25);

    let c = RmsTimeConverter {
        sw_mode: SwitchMode::Frsw,
        ..grid_pssw(25)
    };
    assert_eq!(c.n_shared(1.0), 1);

    let c = RmsTimeConverter {
        map_mode: MapMode::Jiggle,
        separate_offs: true,
        ..grid_pssw(25)
    };
    assert_eq!(c.n_shared(1.0), 1);
}

#[test]
fn test_int_time_for_rms_a3() {
    let (int_time, n_shared) = grid_pssw(25).int_time_for_rms(0.6).unwrap();
    assert_abs_diff_eq!(int_time, 77.1, epsilon = 0.01);
    assert_eq!(n_shared, 1);
}

#[test]
fn test_int_time_for_rms_converges() {
    let c = grid_pssw(25);
    for (target, expected_time, expected_shared) in [
        (2.0, 4.885911, 6),
        (3.0, 1.940140, 15),
        (5.0, 0.666143, 25),
    ] {
        let (int_time, n_shared) = c.int_time_for_rms(target).unwrap();
        assert_abs_diff_eq!(int_time, expected_time, epsilon = 1e-6);
        assert_eq!(n_shared, expected_shared);
        // The solution is self-consistent.
        assert_eq!(c.n_shared(int_time), n_shared);
        assert_abs_diff_eq!(c.rms_for_int_time(int_time).unwrap(), target, epsilon = 1e-9);
    }
}

#[test]
fn test_single_pass_modes() {
    let c = RmsTimeConverter {
        map_mode: MapMode::Jiggle,
        ..grid_pssw(25)
    };
    let (int_time, n_shared) = c.int_time_for_rms(0.6).unwrap();
    assert_abs_diff_eq!(int_time, 46.259943, epsilon = 1e-6);
    assert_eq!(n_shared, 25);
    assert_abs_diff_eq!(c.rms_for_int_time(int_time).unwrap(), 0.6, epsilon = 1e-12);
}

#[test]
fn test_dual_pol() {
    let single = grid_pssw(25);
    let dual = RmsTimeConverter {
        dual_pol: true,
        ..single
    };
    let rms_single = single.rms(77.1, 1).unwrap();
    let rms_dual = dual.rms(77.1, 1).unwrap();
    assert_abs_diff_eq!(rms_dual, rms_single / 2f64.sqrt(), epsilon = 1e-12);

    // Twice the sensitivity per unit time; half the time.
    let (t_single, _) = single.int_time_for_rms(0.6).unwrap();
    let (t_dual, _) = dual.int_time_for_rms(0.6).unwrap();
    assert_abs_diff_eq!(t_dual, t_single / 2.0, epsilon = 1e-6);
}

#[test]
fn test_monotonic() {
    let c = RmsTimeConverter {
        map_mode: MapMode::Jiggle,
        ..grid_pssw(25)
    };

    let mut last_rms = f64::INFINITY;
    for i in 1..1000 {
        let rms = c.rms_for_int_time(i as f64 * 0.1).unwrap();
        assert!(rms <= last_rms);
        last_rms = rms;
    }

    let mut last_time = f64::INFINITY;
    for i in 1..100 {
        let (int_time, _) = c.int_time_for_rms(i as f64 * 0.05).unwrap();
        assert!(int_time <= last_time);
        last_time = int_time;
    }
}

#[test]
fn test_numeric_errors() {
    let c = grid_pssw(25);
    assert!(matches!(
        c.rms(0.0, 1),
        Err(NumericError::DivisionByZero(_))
    ));
    assert!(matches!(
        c.rms(-1.0, 1),
        Err(NumericError::NegativeSqrt(_))
    ));
    assert!(matches!(
        c.int_time_for_rms(0.0),
        Err(NumericError::DivisionByZero(_))
    ));
}
