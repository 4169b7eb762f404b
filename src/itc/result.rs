// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use serde::Serialize;

use crate::modes::{CalcInput, Sideband};

/// The outcome of a calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    /// The quantity supplied by the caller.
    pub input: CalcInput,

    /// The elapsed time [s] when a target RMS was supplied, otherwise the RMS
    /// [K].
    pub value: f64,

    pub extra: ExtraOutput,
}

/// Intermediate and derived quantities of a calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtraOutput {
    /// [K]
    pub t_rx: f64,
    /// [K]
    pub t_sys: f64,
    /// Opacity at the sky frequency.
    pub tau: f64,
    pub eta_sky: f64,

    /// [GHz]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub if_freq: Option<f64>,
    /// [GHz]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lo_freq: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sideband: Option<Sideband>,

    /// Integration time per point [s]. For a basket-woven raster this is the
    /// sum over both scan directions.
    pub int_time: f64,
    /// [s]
    pub elapsed_time: f64,
    /// [K]
    pub rms: f64,

    /// The number of points sharing each reference (grid and jiggle maps).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_shared: Option<usize>,

    /// The fraction of an elapsed time given to the first basket weave scan
    /// direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basket_weave_fraction: Option<f64>,

    /// Raster scan directions.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub passes: Vec<PassOutput>,
}

/// The details of one raster scan direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PassOutput {
    pub n_points: usize,
    pub n_rows: usize,
    /// Row spacing [arcsec].
    pub dy: f64,
    pub multiscan: f64,
    /// [s]
    pub int_time: f64,
    /// [s]
    pub elapsed_time: f64,
    /// [K]
    pub rms: f64,
}

impl CalculationResult {
    /// The integration time per point [s].
    pub fn int_time(&self) -> f64 {
        self.extra.int_time
    }

    /// [s]
    pub fn elapsed_time(&self) -> f64 {
        self.extra.elapsed_time
    }

    /// [K]
    pub fn rms(&self) -> f64 {
        self.extra.rms
    }
}
