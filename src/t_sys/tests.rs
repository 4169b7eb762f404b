// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;

use super::*;
use crate::receiver::{Catalog, ChopperParams};

fn params(receiver: &str, freq: f64, tau_225: f64, zenith_angle: f64) -> TSysParams {
    TSysParams {
        receiver,
        freq,
        tau_225,
        zenith_angle,
        is_dsb: false,
        if_freq: None,
        sideband: None,
    }
}

#[test]
fn test_t_sys_a3() {
    let catalog = Catalog::builtin().unwrap();
    let result = system_temperature(&catalog, &params("RxA3", 233.0, 0.23, 25.0)).unwrap();
    assert_abs_diff_eq!(result.t_rx, 62.0, epsilon = 0.1);
    assert_abs_diff_eq!(result.t_sys, 403.5, epsilon = 0.1);
    assert_abs_diff_eq!(result.tau, 0.241914, epsilon = 1e-9);
    assert_abs_diff_eq!(result.eta_sky, 0.765732, epsilon = 1e-6);
    assert!(result.if_freq.is_none());
    assert!(result.sideband.is_none());
}

#[test]
fn test_t_sys_harp() {
    let catalog = Catalog::builtin().unwrap();
    let result = system_temperature(&catalog, &params("HARP", 345.0, 0.1, 35.0)).unwrap();
    assert_abs_diff_eq!(result.t_rx, 105.0, epsilon = 0.1);
    assert_abs_diff_eq!(result.t_sys, 339.6, epsilon = 0.1);
}

#[test]
fn test_t_sys_dsb_doubles() {
    let catalog = Catalog::builtin().unwrap();
    let ssb = system_temperature(&catalog, &params("RxA3", 233.0, 0.23, 25.0)).unwrap();
    let dsb = system_temperature(
        &catalog,
        &TSysParams {
            is_dsb: true,
            ..params("RxA3", 233.0, 0.23, 25.0)
        },
    )
    .unwrap();
    assert_abs_diff_eq!(dsb.t_sys, 2.0 * ssb.t_sys, epsilon = 1e-9);
    assert_abs_diff_eq!(dsb.t_sys, 807.059, epsilon = 1e-3);
}

#[test]
fn test_t_sys_worse_weather_is_worse() {
    let catalog = Catalog::builtin().unwrap();
    let good = system_temperature(&catalog, &params("RxA3", 233.0, 0.05, 25.0)).unwrap();
    let bad = system_temperature(&catalog, &params("RxA3", 233.0, 0.2, 25.0)).unwrap();
    let low = system_temperature(&catalog, &params("RxA3", 233.0, 0.2, 60.0)).unwrap();
    assert!(good.t_sys < bad.t_sys);
    assert!(bad.t_sys < low.t_sys);
}

#[test]
fn test_t_sys_chopper_correction() {
    let catalog = Catalog::builtin().unwrap();
    let result = system_temperature(&catalog, &params("Uu", 230.0, 0.1, 30.0)).unwrap();
    assert_abs_diff_eq!(result.t_rx, 61.2, epsilon = 1e-9);
    assert_abs_diff_eq!(result.tau, 0.10303, epsilon = 1e-9);
    assert_eq!(result.sideband, Some(Sideband::Lsb));
    assert_abs_diff_eq!(result.if_freq.unwrap(), 6.0);
    assert_abs_diff_eq!(result.lo_freq.unwrap(), 236.0);
    assert_abs_diff_eq!(result.t_sys, 342.2253, epsilon = 1e-3);
}

#[test]
fn test_chopper_factor() {
    let chopper = ChopperParams {
        t_load: 295.0,
        t_spill: 280.0,
        t_air: 280.0,
    };
    let factor =
        t_sys_correction_factor(0.62, 230e9, 0.10303, 1.0 / 30f64.to_radians().cos(), &chopper)
            .unwrap();
    assert_abs_diff_eq!(factor, 1.046670, epsilon = 1e-6);

    // A perfect telescope looking through no atmosphere needs no correction.
    let factor = t_sys_correction_factor(1.0, 230e9, 0.0, 1.0, &chopper).unwrap();
    assert_abs_diff_eq!(factor, 1.0, epsilon = 1e-12);

    assert_abs_diff_eq!(
        brightness_temperature(230e9, 295.0).unwrap(),
        289.5153,
        epsilon = 1e-4
    );
    assert!(brightness_temperature(230e9, 0.0).is_err());
}

#[test]
fn test_t_sys_fit_bypass() {
    let catalog = Catalog::builtin().unwrap();
    let dsb = |freq, tau_225, zenith_angle| TSysParams {
        is_dsb: true,
        ..params("RxWD", freq, tau_225, zenith_angle)
    };

    // Good weather; the fit is used. Each band scales the constant term
    // differently.
    let result = system_temperature(&catalog, &dsb(691.0, 0.05, 30.0)).unwrap();
    assert_abs_diff_eq!(result.t_sys, 5874.55881, epsilon = 1e-5);
    assert_abs_diff_eq!(result.t_rx, 766.0, epsilon = 1e-9);
    let result = system_temperature(&catalog, &dsb(660.0, 0.05, 30.0)).unwrap();
    assert_abs_diff_eq!(result.t_sys, 6113.68481, epsilon = 1e-5);
    let result = system_temperature(&catalog, &dsb(640.0, 0.05, 30.0)).unwrap();
    assert_abs_diff_eq!(result.t_sys, 8038.60481, epsilon = 1e-5);

    // Too much water or too low; the physical model is used.
    let result = system_temperature(&catalog, &dsb(691.0, 0.1, 30.0)).unwrap();
    assert_abs_diff_eq!(result.t_sys, 11433.5432, epsilon = 1e-3);
    let result = system_temperature(&catalog, &dsb(691.0, 0.05, 45.0)).unwrap();
    assert_abs_diff_eq!(result.t_sys, 7320.6110, epsilon = 1e-3);

    // Beyond the last band, the last scale applies.
    let fit = catalog
        .receiver_info("RxWD")
        .unwrap()
        .t_sys_fit
        .clone()
        .unwrap();
    assert_abs_diff_eq!(fit.band_scale(720.0), 1.05);
    assert_abs_diff_eq!(fit.evaluate(720.0), 6954.92481, epsilon = 1e-5);
}

#[test]
fn test_receiver_temperature_inverse() {
    let catalog = Catalog::builtin().unwrap();
    for (receiver, freq, tau_225, zenith_angle, is_dsb) in [
        ("RxA3", 233.0, 0.23, 25.0, false),
        ("RxA3", 260.0, 0.09, 30.0, true),
        ("HARP", 345.0, 0.1, 35.0, false),
    ] {
        let forward = system_temperature(
            &catalog,
            &TSysParams {
                is_dsb,
                ..params(receiver, freq, tau_225, zenith_angle)
            },
        )
        .unwrap();
        let t_rx = implied_receiver_temperature(
            &catalog,
            receiver,
            freq,
            tau_225,
            zenith_angle,
            forward.t_sys,
            is_dsb,
        )
        .unwrap();
        assert_abs_diff_eq!(t_rx, forward.t_rx, epsilon = 1e-9);
    }
}

#[test]
fn test_airmass() {
    assert_abs_diff_eq!(airmass(0.0).unwrap(), 1.0);
    assert_abs_diff_eq!(airmass(60.0).unwrap(), 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(sky_efficiency(0.0, 45.0).unwrap(), 1.0);
}

#[test]
fn test_unknown_receiver() {
    let catalog = Catalog::builtin().unwrap();
    let result = system_temperature(&catalog, &params("Nope", 233.0, 0.23, 25.0));
    assert!(matches!(result, Err(ItcError::Receiver(_))));
}
