// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Observing modes and calculation directions.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

lazy_static::lazy_static! {
    pub static ref MAP_MODES_COMMA_SEPARATED: String = MapMode::iter().join(", ");

    pub static ref SWITCH_MODES_COMMA_SEPARATED: String = SwitchMode::iter().join(", ");

    pub static ref SIDEBANDS_COMMA_SEPARATED: String = Sideband::iter().join(", ");
}

/// The spatial observing pattern.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum MapMode {
    /// One or more discrete positions.
    #[strum(serialize = "grid")]
    Grid,

    /// A jiggle pattern around the pointing centre.
    #[strum(serialize = "jiggle")]
    Jiggle,

    /// A continuously scanned map.
    #[strum(serialize = "raster")]
    Raster,
}

/// The calibration (switching) scheme.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SwitchMode {
    /// Position switched.
    #[strum(serialize = "pssw")]
    Pssw,

    /// Beam switched.
    #[strum(serialize = "bmsw")]
    Bmsw,

    /// Frequency switched.
    #[strum(serialize = "frsw")]
    Frsw,
}

/// Which quantity the caller supplies. The other two are solved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalcInput {
    /// A target RMS [K]; integration and elapsed time are derived.
    #[strum(serialize = "target RMS")]
    Rms,

    /// An integration time per point [s].
    #[strum(serialize = "integration time")]
    IntTime,

    /// A total elapsed time [s].
    #[strum(serialize = "elapsed time")]
    ElapsedTime,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Sideband {
    #[strum(serialize = "lsb")]
    Lsb,

    #[strum(serialize = "usb")]
    Usb,
}

impl Sideband {
    /// The LO frequency required to place `sky_freq` in this sideband at the
    /// given IF [GHz].
    pub fn lo_freq(self, sky_freq: f64, if_freq: f64) -> f64 {
        match self {
            Sideband::Usb => sky_freq - if_freq,
            Sideband::Lsb => sky_freq + if_freq,
        }
    }
}

/// Can this map mode be observed with this switching mode?
pub fn is_valid_combination(map_mode: MapMode, sw_mode: SwitchMode) -> bool {
    use MapMode::*;
    use SwitchMode::*;

    matches!(
        (map_mode, sw_mode),
        (Grid, Pssw)
            | (Grid, Bmsw)
            | (Grid, Frsw)
            | (Jiggle, Pssw)
            | (Jiggle, Bmsw)
            | (Jiggle, Frsw)
            | (Raster, Pssw)
    )
}

/// Can separate offs be requested for this combination? Rasters and
/// position-switched grids always share their reference positions.
pub fn allows_separate_offs(map_mode: MapMode, sw_mode: SwitchMode) -> bool {
    !matches!(
        (map_mode, sw_mode),
        (MapMode::Raster, _) | (MapMode::Grid, SwitchMode::Pssw)
    )
}
