// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Conversion between RMS noise and integration time.
//!
//! `rms = multiscan fudge dfact sqrt(1 + 1/sqrt(n_shared)) T_sys / sqrt(df t)`,
//! divided by `sqrt(2)` for dual polarisation. For position-switched grids the
//! number of points sharing a reference depends on the integration time, so
//! the integration time for a target RMS is found iteratively.

#[cfg(test)]
mod tests;

use log::debug;

use crate::{
    constants::{DFACT, FUDGE, MAX_SOLVE_ITERATIONS, REFS_INTERVAL},
    math::{checked_div, checked_sqrt, NumericError},
    modes::{MapMode, SwitchMode},
};

/// Converts between RMS [K] and integration time per point [s] for one scan
/// direction.
#[derive(Debug, Clone, Copy)]
pub struct RmsTimeConverter {
    pub map_mode: MapMode,
    pub sw_mode: SwitchMode,
    /// [K]
    pub t_sys: f64,
    /// [MHz]
    pub freq_res: f64,
    pub dual_pol: bool,
    pub separate_offs: bool,
    pub n_points: usize,
    /// Sensitivity penalty for rasters scanned with only part of an array.
    pub multiscan: f64,
}

impl RmsTimeConverter {
    /// Does the number of points sharing a reference depend on integration
    /// time?
    fn shared_depends_on_time(&self) -> bool {
        !self.separate_offs && self.map_mode == MapMode::Grid && self.sw_mode == SwitchMode::Pssw
    }

    /// The number of points sharing each reference measurement.
    pub fn n_shared(&self, int_time: f64) -> usize {
        if self.separate_offs || self.sw_mode == SwitchMode::Frsw {
            1
        } else if self.shared_depends_on_time() {
            // A position-switched grid returns to its reference every
            // `REFS_INTERVAL` seconds.
            let per_ref = if int_time > 0.0 {
                (REFS_INTERVAL / int_time).floor()
            } else {
                f64::INFINITY
            };
            let n_points = self.n_points.max(1);
            if per_ref >= n_points as f64 {
                n_points
            } else if per_ref < 1.0 {
                1
            } else {
                per_ref as usize
            }
        } else {
            self.n_points.max(1)
        }
    }

    /// The RMS after integrating for `int_time` on each point with `n_shared`
    /// points per reference.
    pub fn rms(&self, int_time: f64, n_shared: usize) -> Result<f64, NumericError> {
        let shared_factor = checked_sqrt(
            1.0 + checked_div(1.0, (n_shared as f64).sqrt(), "the RMS")?,
            "the RMS",
        )?;
        let bandwidth_time = checked_sqrt(self.freq_res * 1e6 * int_time, "the RMS")?;
        let rms = checked_div(
            self.multiscan * FUDGE * DFACT * shared_factor * self.t_sys,
            bandwidth_time,
            "the RMS",
        )?;

        Ok(if self.dual_pol {
            rms / std::f64::consts::SQRT_2
        } else {
            rms
        })
    }

    /// The RMS after integrating for `int_time` on each point.
    pub fn rms_for_int_time(&self, int_time: f64) -> Result<f64, NumericError> {
        self.rms(int_time, self.n_shared(int_time))
    }

    /// The integration time per point needed to reach `target_rms`, with the
    /// number of points sharing each reference at that time.
    pub fn int_time_for_rms(&self, target_rms: f64) -> Result<(f64, usize), NumericError> {
        let mut int_time = 1.0;
        let mut n_shared = self.n_shared(int_time);

        for i in 0..MAX_SOLVE_ITERATIONS {
            let rms = self.rms(int_time, n_shared)?;
            int_time *= checked_div(rms, target_rms, "the integration time")?.powi(2);
            debug!("Iteration {i}: integration time {int_time} s ({n_shared} points per reference)");

            if !self.shared_depends_on_time() {
                break;
            }
            let new_n_shared = self.n_shared(int_time);
            if new_n_shared == n_shared {
                break;
            }
            n_shared = new_n_shared;
        }

        Ok((int_time, n_shared))
    }
}
