// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};

use crate::{
    modes::{MapMode, Sideband, SwitchMode},
    raster::RasterSpec,
};

/// The observing parameters of a calculation.
///
/// Only the parameters common to every observation are needed by
/// [`CalculationRequest::new`]; everything else has a default and can be set
/// with the `with_*` functions, e.g.
///
/// ```
/// use heterodyne_itc::{CalculationRequest, MapMode, SwitchMode};
///
/// let request = CalculationRequest::new("RxA3", MapMode::Grid, SwitchMode::Pssw, 233.0, 0.0192, 0.23, 25.0)
///     .with_n_points(25);
/// assert_eq!(request.n_points, 25);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub receiver: String,
    pub map_mode: MapMode,
    pub sw_mode: SwitchMode,

    /// Sky frequency [GHz].
    pub freq: f64,

    /// Frequency resolution [MHz].
    pub freq_res: f64,

    /// Zenith opacity at 225 GHz.
    pub tau_225: f64,

    /// [degrees]
    pub zenith_angle: f64,

    #[serde(default)]
    pub is_dsb: bool,

    #[serde(default)]
    pub dual_pol: bool,

    /// The number of points of a grid or jiggle map.
    #[serde(default = "default_n_points")]
    pub n_points: usize,

    /// The geometry of a raster map.
    #[serde(default)]
    pub raster: Option<RasterSpec>,

    #[serde(default)]
    pub basket_weave: bool,

    #[serde(default)]
    pub separate_offs: bool,

    #[serde(default)]
    pub continuum: bool,

    /// [GHz]
    #[serde(default)]
    pub if_freq: Option<f64>,

    #[serde(default)]
    pub sideband: Option<Sideband>,
}

fn default_n_points() -> usize {
    1
}

impl CalculationRequest {
    pub fn new(
        receiver: &str,
        map_mode: MapMode,
        sw_mode: SwitchMode,
        freq: f64,
        freq_res: f64,
        tau_225: f64,
        zenith_angle: f64,
    ) -> CalculationRequest {
        CalculationRequest {
            receiver: receiver.to_string(),
            map_mode,
            sw_mode,
            freq,
            freq_res,
            tau_225,
            zenith_angle,
            is_dsb: false,
            dual_pol: false,
            n_points: default_n_points(),
            raster: None,
            basket_weave: false,
            separate_offs: false,
            continuum: false,
            if_freq: None,
            sideband: None,
        }
    }

    pub fn with_dsb(self, is_dsb: bool) -> Self {
        Self { is_dsb, ..self }
    }

    pub fn with_dual_pol(self, dual_pol: bool) -> Self {
        Self { dual_pol, ..self }
    }

    pub fn with_n_points(self, n_points: usize) -> Self {
        Self { n_points, ..self }
    }

    pub fn with_raster(self, raster: RasterSpec) -> Self {
        Self {
            raster: Some(raster),
            ..self
        }
    }

    pub fn with_basket_weave(self, basket_weave: bool) -> Self {
        Self {
            basket_weave,
            ..self
        }
    }

    pub fn with_separate_offs(self, separate_offs: bool) -> Self {
        Self {
            separate_offs,
            ..self
        }
    }

    pub fn with_continuum(self, continuum: bool) -> Self {
        Self { continuum, ..self }
    }

    /// Only used by receivers with sideband-specific receiver temperatures.
    pub fn with_if_freq(self, if_freq: f64) -> Self {
        Self {
            if_freq: Some(if_freq),
            ..self
        }
    }

    pub fn with_sideband(self, sideband: Sideband) -> Self {
        Self {
            sideband: Some(sideband),
            ..self
        }
    }

    /// Is this a basket-woven raster?
    pub(crate) fn is_basket_weave(&self) -> bool {
        self.map_mode == MapMode::Raster && self.basket_weave
    }
}
