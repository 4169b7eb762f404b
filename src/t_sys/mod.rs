// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The system temperature model.
//!
//! `T_sys = (T_rx + eta_tel T_sky + T_tel) / (eta_sky eta_tel)` for a
//! single-sideband receiver, twice that for double sideband. Some receivers
//! additionally carry a chopper-wheel correction or an empirical fit which
//! replaces the model in good weather.

mod calibration;
#[cfg(test)]
mod tests;

pub use calibration::{brightness_temperature, t_sys_correction_factor};

use log::debug;
use serde::Serialize;

use crate::{
    constants::{J_M, J_TEL},
    itc::ItcError,
    math::{checked_div, NumericError},
    modes::Sideband,
    receiver::ReceiverCatalog,
};

/// Everything needed to calculate a system temperature.
#[derive(Debug, Clone, Copy)]
pub struct TSysParams<'a> {
    pub receiver: &'a str,
    /// Sky frequency [GHz].
    pub freq: f64,
    pub tau_225: f64,
    /// [degrees]
    pub zenith_angle: f64,
    pub is_dsb: bool,
    pub if_freq: Option<f64>,
    pub sideband: Option<Sideband>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TSysResult {
    /// [K]
    pub t_sys: f64,
    /// [K]
    pub t_rx: f64,
    /// Opacity at the sky frequency.
    pub tau: f64,
    pub eta_sky: f64,
    pub if_freq: Option<f64>,
    pub lo_freq: Option<f64>,
    pub sideband: Option<Sideband>,
}

/// `1 / cos(za)`.
pub fn airmass(zenith_angle: f64) -> Result<f64, NumericError> {
    checked_div(1.0, zenith_angle.to_radians().cos(), "the airmass")
}

/// Sky transmission along the line of sight.
pub fn sky_efficiency(tau: f64, zenith_angle: f64) -> Result<f64, NumericError> {
    Ok((-tau * airmass(zenith_angle)?).exp())
}

/// The brightness temperatures of the sky and the telescope `(T_sky, T_tel)`
/// [K].
pub fn sky_and_telescope_temperatures(eta_sky: f64, eta_tel: f64) -> (f64, f64) {
    (J_M * (1.0 - eta_sky), J_TEL * (1.0 - eta_tel))
}

/// Calculate the system temperature, recording the intermediate values.
pub fn system_temperature(
    catalog: &dyn ReceiverCatalog,
    params: &TSysParams,
) -> Result<TSysResult, ItcError> {
    let info = catalog.receiver_info(params.receiver)?;
    let t_rx = catalog.interpolated_t_rx(
        params.receiver,
        params.freq,
        params.if_freq,
        params.sideband,
    )?;
    let tau = catalog.interpolated_opacity(params.tau_225, params.freq);
    let airmass = airmass(params.zenith_angle)?;
    let eta_sky = (-tau * airmass).exp();

    let mut result = TSysResult {
        t_sys: 0.0,
        t_rx: t_rx.t_rx,
        tau,
        eta_sky,
        if_freq: t_rx.if_freq,
        lo_freq: t_rx.lo_freq,
        sideband: t_rx.sideband,
    };

    if let Some(fit) = info
        .t_sys_fit
        .as_ref()
        .filter(|fit| fit.applies(params.tau_225, params.zenith_angle))
    {
        result.t_sys = fit.evaluate(params.freq);
        debug!(
            "{}: T_sys {:.1} K from the empirical fit (T_rx {:.1} K)",
            info.name, result.t_sys, result.t_rx
        );
        return Ok(result);
    }

    let eta_tel = info.eta_tel;
    let (t_sky, t_tel) = sky_and_telescope_temperatures(eta_sky, eta_tel);
    let mut t_sys = checked_div(
        t_rx.t_rx + eta_tel * t_sky + t_tel,
        eta_sky * eta_tel,
        "the system temperature",
    )?;
    if params.is_dsb {
        t_sys *= 2.0;
    }

    if let Some(chopper) = &info.chopper {
        let factor = t_sys_correction_factor(eta_tel, params.freq * 1e9, tau, airmass, chopper)?;
        debug!("{}: chopper-wheel correction factor {factor:.4}", info.name);
        t_sys *= factor;
    }

    debug!(
        "{}: T_rx {:.1} K, tau {:.4}, eta_sky {:.4}, T_sys {:.1} K",
        info.name, result.t_rx, tau, eta_sky, t_sys
    );
    result.t_sys = t_sys;
    Ok(result)
}

/// The receiver temperature implied by a system temperature [K]. This is the
/// inverse of the physical model (without any receiver-specific corrections).
pub fn receiver_temperature(t_sys: f64, eta_sky: f64, eta_tel: f64, is_dsb: bool) -> f64 {
    let (t_sky, t_tel) = sky_and_telescope_temperatures(eta_sky, eta_tel);
    let t_sys = if is_dsb { t_sys / 2.0 } else { t_sys };
    t_sys * eta_sky * eta_tel - eta_tel * t_sky - t_tel
}

/// The receiver temperature implied by a measured system temperature for a
/// receiver observing at `freq` [GHz].
pub fn implied_receiver_temperature(
    catalog: &dyn ReceiverCatalog,
    receiver: &str,
    freq: f64,
    tau_225: f64,
    zenith_angle: f64,
    t_sys: f64,
    is_dsb: bool,
) -> Result<f64, ItcError> {
    let info = catalog.receiver_info(receiver)?;
    let tau = catalog.interpolated_opacity(tau_225, freq);
    let eta_sky = sky_efficiency(tau, zenith_angle)?;
    Ok(receiver_temperature(t_sys, eta_sky, info.eta_tel, is_dsb))
}
