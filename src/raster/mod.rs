// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Raster map geometry.
//!
//! A raster is scanned row by row. With basket weaving, the map is scanned a
//! second time with rows perpendicular to the first pass.

mod split;

pub use split::{split_elapsed_time, BasketWeaveSplit};

use log::debug;
use serde::{Deserialize, Serialize};
use vec1::Vec1;

use crate::{
    duration::DurationParam,
    math::{checked_div, checked_sqrt, sample_count, NumericError},
    receiver::ArrayInfo,
    rms::RmsTimeConverter,
};

/// The requested raster map [arcsec].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RasterSpec {
    pub width: f64,
    pub height: f64,
    /// Pixel size along the scan direction.
    pub dx: f64,
    /// Spacing between rows.
    pub dy: f64,
    /// Extend each row by half of the array footprint at either end.
    #[serde(default = "default_overscan")]
    pub overscan: bool,
}

fn default_overscan() -> bool {
    true
}

impl RasterSpec {
    pub fn new(width: f64, height: f64, dx: f64, dy: f64) -> RasterSpec {
        RasterSpec {
            width,
            height,
            dx,
            dy,
            overscan: true,
        }
    }

    pub fn with_overscan(self, overscan: bool) -> RasterSpec {
        RasterSpec { overscan, ..self }
    }
}

/// The geometry of one scan direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RasterPass {
    /// Points per row.
    pub n_points: usize,
    pub n_rows: usize,
    /// The row spacing actually used [arcsec].
    pub dy: f64,
    /// Sensitivity penalty for rows spaced more closely than the array.
    pub multiscan: f64,
}

/// Work out the geometry of one pass scanning rows of `width` along a map of
/// `height`.
pub fn raster_pass(
    width: f64,
    height: f64,
    spec: &RasterSpec,
    array: Option<&ArrayInfo>,
) -> Result<RasterPass, NumericError> {
    let overscan_x = match array {
        Some(array) if spec.overscan => array.footprint() / 2.0,
        _ => 0.0,
    };
    let n_points = sample_count(width + 2.0 * overscan_x, spec.dx, "the points per row")?;

    let (n_rows, dy, multiscan) = match array {
        Some(array) => {
            let footprint = array.footprint();
            let (n_rows, dy) = if height <= footprint {
                (1, footprint)
            } else {
                (
                    sample_count(height, spec.dy, "the number of rows")?,
                    spec.dy,
                )
            };
            let multiscan = checked_sqrt(
                checked_div(
                    dy,
                    footprint * array.fraction_available,
                    "the multiscan factor",
                )?,
                "the multiscan factor",
            )?;
            (n_rows, dy, multiscan)
        }
        None => (
            sample_count(height, spec.dy, "the number of rows")?,
            spec.dy,
            1.0,
        ),
    };

    debug!("Raster pass {width}\" x {height}\": {n_points} points x {n_rows} rows, dy {dy}\", multiscan {multiscan:.4}");
    Ok(RasterPass {
        n_points,
        n_rows,
        dy,
        multiscan,
    })
}

/// All of the passes needed for a raster; two (with width and height swapped)
/// when basket weaving.
pub fn raster_passes(
    spec: &RasterSpec,
    array: Option<&ArrayInfo>,
    basket_weave: bool,
) -> Result<Vec1<RasterPass>, NumericError> {
    let mut passes = Vec1::new(raster_pass(spec.width, spec.height, spec, array)?);
    if basket_weave {
        passes.push(raster_pass(spec.height, spec.width, spec, array)?);
    }
    Ok(passes)
}

/// Everything needed to convert between times and RMS for one raster pass.
#[derive(Debug, Clone, Copy)]
pub struct ScanDirection {
    pub pass: RasterPass,
    pub duration: DurationParam,
    pub converter: RmsTimeConverter,
}

impl ScanDirection {
    pub fn elapsed_time(&self, int_time: f64) -> Result<f64, NumericError> {
        self.duration
            .elapsed_time(int_time, self.pass.n_points, self.pass.n_rows)
    }

    pub fn int_time(&self, elapsed_time: f64) -> Result<f64, NumericError> {
        self.duration
            .int_time(elapsed_time, self.pass.n_points, self.pass.n_rows)
    }

    pub fn rms(&self, int_time: f64) -> Result<f64, NumericError> {
        self.converter.rms_for_int_time(int_time)
    }
}
