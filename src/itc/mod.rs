// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The time calculator.
//!
//! Any one of a target RMS, an integration time per point or an elapsed time
//! is converted into the other two. Requests are fully validated before any
//! numbers are crunched.

mod error;
mod request;
mod result;

pub use error::ItcError;
pub use request::CalculationRequest;
pub use result::{CalculationResult, ExtraOutput, PassOutput};

use log::debug;

use crate::{
    constants::MIN_SAMPLE_TIME,
    duration::duration_param,
    math::combine_rms,
    modes::{allows_separate_offs, is_valid_combination, CalcInput, MapMode, SwitchMode},
    raster::{raster_passes, split_elapsed_time, RasterSpec, ScanDirection},
    receiver::{ReceiverCatalog, ReceiverInfo},
    rms::RmsTimeConverter,
    t_sys::{system_temperature, TSysParams, TSysResult},
};

/// A heterodyne instrument time calculator drawing receiver information from
/// a catalog.
#[derive(Clone, Copy)]
pub struct HeterodyneItc<'a> {
    catalog: &'a dyn ReceiverCatalog,
}

impl<'a> HeterodyneItc<'a> {
    pub fn new(catalog: &'a dyn ReceiverCatalog) -> HeterodyneItc<'a> {
        HeterodyneItc { catalog }
    }

    /// The time needed to reach a target RMS [K]. The result's value is the
    /// elapsed time [s].
    pub fn calculate_time(
        &self,
        rms: f64,
        request: &CalculationRequest,
    ) -> Result<CalculationResult, ItcError> {
        self.calculate(CalcInput::Rms, rms, request)
    }

    /// The RMS [K] reached in an elapsed time [s].
    pub fn calculate_rms_for_elapsed_time(
        &self,
        elapsed_time: f64,
        request: &CalculationRequest,
    ) -> Result<CalculationResult, ItcError> {
        self.calculate(CalcInput::ElapsedTime, elapsed_time, request)
    }

    /// The RMS [K] reached with an integration time per point [s].
    pub fn calculate_rms_for_int_time(
        &self,
        int_time: f64,
        request: &CalculationRequest,
    ) -> Result<CalculationResult, ItcError> {
        self.calculate(CalcInput::IntTime, int_time, request)
    }

    /// Run a calculation from any of the supported inputs.
    pub fn calculate(
        &self,
        input: CalcInput,
        value: f64,
        request: &CalculationRequest,
    ) -> Result<CalculationResult, ItcError> {
        let info = self.validate(input, value, request)?;

        let t_sys = system_temperature(
            self.catalog,
            &TSysParams {
                receiver: &request.receiver,
                freq: request.freq,
                tau_225: request.tau_225,
                zenith_angle: request.zenith_angle,
                is_dsb: request.is_dsb,
                if_freq: request.if_freq,
                sideband: request.sideband,
            },
        )?;

        let result = match (request.map_mode, request.raster.as_ref()) {
            (MapMode::Raster, Some(raster)) => {
                calculate_raster(input, value, request, info, &t_sys, raster)?
            }
            _ => calculate_points(input, value, request, &t_sys)?,
        };
        debug!(
            "{} {} = {}: int time {:.4} s, elapsed time {:.2} s, RMS {:.5} K",
            info.name, input, value, result.extra.int_time, result.extra.elapsed_time, result.extra.rms
        );
        Ok(result)
    }

    /// Check everything that can be checked before calculating, in order:
    /// the input value, the modes, the receiver and its options, the sky
    /// frequency and the map geometry.
    pub fn validate(
        &self,
        input: CalcInput,
        value: f64,
        request: &CalculationRequest,
    ) -> Result<&'a ReceiverInfo, ItcError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ItcError::InvalidParameter(format!(
                "The {input} must be a positive number (got {value})."
            )));
        }

        let map_mode = request.map_mode;
        let sw_mode = request.sw_mode;
        if !is_valid_combination(map_mode, sw_mode) {
            return Err(ItcError::InvalidMode(format!(
                "The {} switching mode can not be used with {map_mode} maps.",
                sw_mode.to_string().to_uppercase(),
            )));
        }
        if request.separate_offs && !allows_separate_offs(map_mode, sw_mode) {
            return Err(ItcError::InvalidMode(format!(
                "Separate offs can not be used with {map_mode} maps in {} mode.",
                sw_mode.to_string().to_uppercase(),
            )));
        }

        let info = self.catalog.receiver_info(&request.receiver)?;
        let unsupported = |option: &str| ItcError::UnsupportedReceiverOption {
            receiver: info.name.clone(),
            option: option.to_string(),
        };
        if request.dual_pol && info.n_mix < 2 {
            return Err(unsupported("dual polarization"));
        }
        if request.is_dsb && !info.dsb_available {
            return Err(unsupported("double sideband observations"));
        }
        if !request.is_dsb && !info.ssb_available {
            return Err(unsupported("single sideband observations"));
        }
        if sw_mode == SwitchMode::Frsw && !info.frsw_available {
            return Err(unsupported("frequency switching"));
        }

        info.check_sky_freq(request.freq)?;

        let positive = |name: &str, x: f64| {
            if x.is_finite() && x > 0.0 {
                Ok(())
            } else {
                Err(ItcError::InvalidParameter(format!(
                    "The {name} must be a positive number (got {x})."
                )))
            }
        };
        positive("frequency resolution", request.freq_res)?;
        if !request.tau_225.is_finite() || request.tau_225 < 0.0 {
            return Err(ItcError::InvalidParameter(format!(
                "The 225 GHz opacity must not be negative (got {}).",
                request.tau_225
            )));
        }
        if !(0.0..90.0).contains(&request.zenith_angle) {
            return Err(ItcError::InvalidParameter(format!(
                "The zenith angle must be at least 0 and less than 90 degrees (got {}).",
                request.zenith_angle
            )));
        }
        match (map_mode, request.raster.as_ref()) {
            (MapMode::Raster, None) => {
                return Err(ItcError::InvalidParameter(
                    "Raster maps need the map width, height and pixel sizes.".to_string(),
                ))
            }
            (MapMode::Raster, Some(raster)) => {
                positive("map width", raster.width)?;
                positive("map height", raster.height)?;
                positive("pixel size (dx)", raster.dx)?;
                positive("row spacing (dy)", raster.dy)?;
            }
            (MapMode::Grid | MapMode::Jiggle, _) => {
                if request.n_points == 0 {
                    return Err(ItcError::InvalidParameter(format!(
                        "A {map_mode} map needs at least one point."
                    )));
                }
            }
        }

        Ok(info)
    }
}

fn extra_output(t_sys: &TSysResult) -> ExtraOutput {
    ExtraOutput {
        t_rx: t_sys.t_rx,
        t_sys: t_sys.t_sys,
        tau: t_sys.tau,
        eta_sky: t_sys.eta_sky,
        if_freq: t_sys.if_freq,
        lo_freq: t_sys.lo_freq,
        sideband: t_sys.sideband,
        int_time: 0.0,
        elapsed_time: 0.0,
        rms: 0.0,
        n_shared: None,
        basket_weave_fraction: None,
        passes: vec![],
    }
}

fn check_min_time(int_time: f64, origin: CalcInput, basket_weave: bool) -> Result<(), ItcError> {
    let min = if basket_weave {
        2.0 * MIN_SAMPLE_TIME
    } else {
        MIN_SAMPLE_TIME
    };
    if int_time < min {
        debug!("Integration time {int_time} s is below the minimum {min} s");
        return Err(ItcError::BelowMinimumSampleTime {
            origin,
            basket_weave,
        });
    }
    Ok(())
}

/// Grid and jiggle maps.
fn calculate_points(
    input: CalcInput,
    value: f64,
    request: &CalculationRequest,
    t_sys: &TSysResult,
) -> Result<CalculationResult, ItcError> {
    let n_points = request.n_points;
    let duration = duration_param(
        request.map_mode,
        request.sw_mode,
        n_points,
        request.separate_offs,
        request.continuum,
    )?;
    let converter = RmsTimeConverter {
        map_mode: request.map_mode,
        sw_mode: request.sw_mode,
        t_sys: t_sys.t_sys,
        freq_res: request.freq_res,
        dual_pol: request.dual_pol,
        separate_offs: request.separate_offs,
        n_points,
        multiscan: 1.0,
    };

    let (int_time, n_shared, elapsed_time, rms) = match input {
        CalcInput::Rms => {
            let (int_time, n_shared) = converter.int_time_for_rms(value)?;
            check_min_time(int_time, input, false)?;
            let elapsed_time = duration.elapsed_time(int_time, n_points, 1)?;
            (int_time, n_shared, elapsed_time, value)
        }
        CalcInput::IntTime => {
            check_min_time(value, input, false)?;
            let n_shared = converter.n_shared(value);
            let rms = converter.rms(value, n_shared)?;
            let elapsed_time = duration.elapsed_time(value, n_points, 1)?;
            (value, n_shared, elapsed_time, rms)
        }
        CalcInput::ElapsedTime => {
            let int_time = duration.int_time(value, n_points, 1)?;
            check_min_time(int_time, input, false)?;
            let n_shared = converter.n_shared(int_time);
            let rms = converter.rms(int_time, n_shared)?;
            (int_time, n_shared, value, rms)
        }
    };

    Ok(CalculationResult {
        input,
        value: match input {
            CalcInput::Rms => elapsed_time,
            CalcInput::IntTime | CalcInput::ElapsedTime => rms,
        },
        extra: ExtraOutput {
            int_time,
            elapsed_time,
            rms,
            n_shared: Some(n_shared),
            ..extra_output(t_sys)
        },
    })
}

fn calculate_raster(
    input: CalcInput,
    value: f64,
    request: &CalculationRequest,
    info: &ReceiverInfo,
    t_sys: &TSysResult,
    raster: &RasterSpec,
) -> Result<CalculationResult, ItcError> {
    let basket_weave = request.is_basket_weave();
    let passes = raster_passes(raster, info.array.as_ref(), basket_weave)?;
    let directions = passes
        .iter()
        .map(|&pass| {
            Ok(ScanDirection {
                pass,
                duration: duration_param(
                    request.map_mode,
                    request.sw_mode,
                    pass.n_points,
                    request.separate_offs,
                    request.continuum,
                )?,
                converter: RmsTimeConverter {
                    map_mode: request.map_mode,
                    sw_mode: request.sw_mode,
                    t_sys: t_sys.t_sys,
                    freq_res: request.freq_res,
                    dual_pol: request.dual_pol,
                    separate_offs: request.separate_offs,
                    n_points: pass.n_points,
                    multiscan: pass.multiscan,
                },
            })
        })
        .collect::<Result<Vec<_>, ItcError>>()?;

    // Per-direction integration and elapsed times.
    let mut fraction = None;
    let times: Vec<(f64, f64)> = match input {
        CalcInput::Rms => {
            // Two equally deep passes combine to the target.
            let target = if basket_weave {
                value * std::f64::consts::SQRT_2
            } else {
                value
            };
            let int_times = directions
                .iter()
                .map(|d| Ok(d.converter.int_time_for_rms(target)?.0))
                .collect::<Result<Vec<_>, ItcError>>()?;
            check_min_time(int_times.iter().sum(), input, basket_weave)?;
            // A woven direction may need much less time than the other.
            for &int_time in &int_times {
                check_min_time(int_time, input, false)?;
            }
            directions
                .iter()
                .zip(int_times)
                .map(|(d, t)| Ok((t, d.elapsed_time(t)?)))
                .collect::<Result<_, ItcError>>()?
        }

        CalcInput::IntTime => {
            check_min_time(value, input, basket_weave)?;
            let int_time = value / directions.len() as f64;
            directions
                .iter()
                .map(|d| Ok((int_time, d.elapsed_time(int_time)?)))
                .collect::<Result<_, ItcError>>()?
        }

        CalcInput::ElapsedTime => match directions.as_slice() {
            [d1, d2] => {
                let split = split_elapsed_time(value, &[*d1, *d2])?;
                fraction = Some(split.fraction);
                vec![
                    (split.int_times[0], value * split.fraction),
                    (split.int_times[1], value * (1.0 - split.fraction)),
                ]
            }
            _ => directions
                .iter()
                .map(|d| {
                    let int_time = d.int_time(value)?;
                    check_min_time(int_time, input, false)?;
                    Ok((int_time, value))
                })
                .collect::<Result<_, ItcError>>()?,
        },
    };

    let pass_outputs = directions
        .iter()
        .zip(times)
        .map(|(d, (int_time, elapsed_time))| {
            Ok(PassOutput {
                n_points: d.pass.n_points,
                n_rows: d.pass.n_rows,
                dy: d.pass.dy,
                multiscan: d.pass.multiscan,
                int_time,
                elapsed_time,
                rms: d.rms(int_time)?,
            })
        })
        .collect::<Result<Vec<_>, ItcError>>()?;

    let int_time: f64 = pass_outputs.iter().map(|p| p.int_time).sum();
    let elapsed_time: f64 = match input {
        CalcInput::ElapsedTime => value,
        CalcInput::Rms | CalcInput::IntTime => pass_outputs.iter().map(|p| p.elapsed_time).sum(),
    };
    let rms = match input {
        CalcInput::Rms => value,
        CalcInput::IntTime | CalcInput::ElapsedTime => {
            let pass_rms: Vec<f64> = pass_outputs.iter().map(|p| p.rms).collect();
            combine_rms(&pass_rms)?
        }
    };

    Ok(CalculationResult {
        input,
        value: match input {
            CalcInput::Rms => elapsed_time,
            CalcInput::IntTime | CalcInput::ElapsedTime => rms,
        },
        extra: ExtraOutput {
            int_time,
            elapsed_time,
            rms,
            basket_weave_fraction: fraction,
            passes: pass_outputs,
            ..extra_output(t_sys)
        },
    })
}
