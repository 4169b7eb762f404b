// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Empirical models of how long an observation takes.
//!
//! For one scan direction,
//!
//! `elapsed = e n_rows (b n t + c sqrt(n) t + d) + e a ceil(src / block)`
//!
//! where `t` is the integration time per point, `n` the number of points and
//! `src` the time before the per-block overhead is added.

#[cfg(test)]
mod tests;

use log::trace;
use serde::Serialize;

use crate::{
    constants::CONTINUUM_FACTOR,
    itc::ItcError,
    math::{checked_div, NumericError},
    modes::{MapMode, SwitchMode},
};

/// Coefficients of the duration model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DurationParam {
    /// Overhead per observing block [s].
    pub a: f64,
    /// Per-point integration time factor.
    pub b: f64,
    /// Factor on the time spent on shared reference positions.
    pub c: f64,
    /// Fixed overhead per row [s].
    pub d: f64,
    /// Overall multiplier (continuum mode).
    pub e: f64,
    /// Length of an observing block [minutes].
    pub block_minutes: f64,
}

impl DurationParam {
    const fn new(a: f64, b: f64, c: f64, d: f64, block_minutes: f64) -> Self {
        DurationParam {
            a,
            b,
            c,
            d,
            e: 1.0,
            block_minutes,
        }
    }

    fn block_seconds(&self) -> f64 {
        self.block_minutes * 60.0
    }

    /// Elapsed time for one scan direction [s].
    pub fn elapsed_time(
        &self,
        int_time: f64,
        n_points: usize,
        n_rows: usize,
    ) -> Result<f64, NumericError> {
        let n = n_points as f64;
        let time_src =
            self.e * n_rows as f64 * (self.b * n * int_time + self.c * n.sqrt() * int_time + self.d);
        let n_blocks = checked_div(time_src, self.block_seconds(), "the number of blocks")?.ceil();
        trace!("Elapsed time {time_src} s before the overhead of {n_blocks} blocks");
        Ok(time_src + self.e * self.a * n_blocks)
    }

    /// Integration time per point for one scan direction [s]. The overhead is
    /// estimated and removed before inverting the linear relation.
    pub fn int_time(
        &self,
        elapsed_time: f64,
        n_points: usize,
        n_rows: usize,
    ) -> Result<f64, NumericError> {
        let n = n_points as f64;
        let n_blocks = checked_div(
            elapsed_time,
            self.block_seconds() + self.e * self.a,
            "the number of blocks",
        )?
        .ceil();
        let time_src = elapsed_time - self.e * self.a * n_blocks;
        let per_row = checked_div(time_src, self.e * n_rows as f64, "the time per row")?;
        checked_div(
            per_row - self.d,
            self.b * n + self.c * n.sqrt(),
            "the integration time",
        )
    }
}

/// Select the duration model for an observation. The reference position is
/// "shared" unless separate offs were requested or there is only one point.
pub fn duration_param(
    map_mode: MapMode,
    sw_mode: SwitchMode,
    n_points: usize,
    separate_offs: bool,
    continuum: bool,
) -> Result<DurationParam, ItcError> {
    use MapMode::*;
    use SwitchMode::*;

    let shared = !separate_offs && n_points > 1;

    let param = match (map_mode, sw_mode, shared) {
        (Grid, Pssw, true) => DurationParam::new(0.0, 2.65, 0.0, 80.0, 60.0),
        (Grid, Pssw, false) => DurationParam::new(0.0, 2.45, 0.0, 80.0, 60.0),
        (Grid, Bmsw, _) => DurationParam::new(0.0, 2.37, 0.0, 100.0, 60.0),
        (Grid, Frsw, _) => DurationParam::new(0.0, 1.25, 0.0, 80.0, 60.0),
        (Jiggle, Pssw, true) => DurationParam::new(0.0, 1.75, 0.0, 80.0, 60.0),
        (Jiggle, Pssw, false) => DurationParam::new(0.0, 2.45, 0.0, 80.0, 60.0),
        (Jiggle, Bmsw, true) => DurationParam::new(0.0, 1.27, 1.27, 100.0, 60.0),
        (Jiggle, Bmsw, false) => DurationParam::new(0.0, 2.30, 0.0, 100.0, 60.0),
        (Jiggle, Frsw, _) => DurationParam::new(0.0, 1.10, 0.0, 100.0, 60.0),
        (Raster, Pssw, _) => DurationParam::new(317.0, 1.0, 1.05, 14.3, 115.0),
        (Raster, Bmsw | Frsw, _) => {
            return Err(ItcError::InvalidMode(format!(
                "No duration model for {map_mode} maps with {sw_mode} switching."
            )))
        }
    };

    Ok(DurationParam {
        e: if continuum { CONTINUUM_FACTOR } else { 1.0 },
        ..param
    })
}
