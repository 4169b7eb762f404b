// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The chopper-wheel correction applied by the correlator to its system
//! temperature for some receivers.

use crate::{
    constants::{ATMOSPHERE_OFFSET, BOLTZMANN, PLANCK},
    math::{checked_div, NumericError},
    receiver::ChopperParams,
};

/// Rayleigh-Jeans equivalent brightness temperature of a black body [K].
pub fn brightness_temperature(freq_hz: f64, physical: f64) -> Result<f64, NumericError> {
    let temp = PLANCK * freq_hz / BOLTZMANN;
    checked_div(
        temp,
        checked_div(temp, physical, "a brightness temperature")?.exp_m1(),
        "a brightness temperature",
    )
}

/// The factor by which the system temperature is multiplied.
pub fn t_sys_correction_factor(
    eta_tel: f64,
    freq_hz: f64,
    tau: f64,
    airmass: f64,
    chopper: &ChopperParams,
) -> Result<f64, NumericError> {
    let t_atm = chopper.t_air - ATMOSPHERE_OFFSET;

    let j_load = brightness_temperature(freq_hz, chopper.t_load)?;
    let j_spill = brightness_temperature(freq_hz, chopper.t_spill)?;
    let j_atm = brightness_temperature(freq_hz, t_atm)?;

    let extinction = (tau * airmass).exp();
    let spill = checked_div(1.0 - eta_tel, eta_tel, "the chopper correction")?
        * checked_div(j_load - j_spill, j_load, "the chopper correction")?
        * extinction;
    let atm = checked_div(j_load - j_atm, j_load, "the chopper correction")? * (extinction - 1.0);

    Ok(1.0 + spill + atm)
}
