// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Per-receiver physical parameters and receiver temperature models.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use vec1::Vec1;

use super::ReceiverError;
use crate::{math::interpolate, modes::Sideband};

/// Everything known about a receiver. The name is taken from the key of the
/// receiver in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiverInfo {
    #[serde(skip)]
    pub name: String,

    /// Lowest sky frequency [GHz].
    pub f_min: f64,

    /// Highest sky frequency [GHz].
    pub f_max: f64,

    /// IF range and the IF used when none is requested [GHz].
    pub if_min: f64,
    pub if_max: f64,
    pub if_default: f64,

    /// Number of mixers. Dual polarisation needs at least two.
    pub n_mix: u8,

    pub ssb_available: bool,
    pub dsb_available: bool,
    pub frsw_available: bool,

    /// [arcsec]
    pub pixel_size: f64,

    /// Telescope efficiency.
    pub eta_tel: f64,

    pub t_rx: TRxData,

    /// Added to the receiver temperature, indexed by IF [GHz -> K].
    #[serde(default)]
    pub if_correction: Option<Vec1<(f64, f64)>>,

    /// Sky frequencies at which the preferred sideband changes, starting from
    /// LSB below the first breakpoint [GHz].
    #[serde(default)]
    pub sideband_preference: Vec<f64>,

    #[serde(default)]
    pub array: Option<ArrayInfo>,

    #[serde(default)]
    pub chopper: Option<ChopperParams>,

    #[serde(default)]
    pub t_sys_fit: Option<TSysFit>,
}

/// Receiver temperature data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TRxData {
    /// Indexed by sky frequency.
    Frequency(Vec1<(f64, f64)>),

    /// A parametric model of sky frequency.
    Harmonic(HarmonicModel),

    /// Indexed by LO frequency, per sideband.
    Sideband {
        #[serde(default)]
        lsb: Option<SidebandData>,
        #[serde(default)]
        usb: Option<SidebandData>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SidebandData {
    Table(Vec1<(f64, f64)>),
    Harmonic(HarmonicModel),
}

impl SidebandData {
    fn evaluate(&self, lo_freq: f64) -> f64 {
        match self {
            SidebandData::Table(table) => interpolate(table, lo_freq),
            SidebandData::Harmonic(model) => model.evaluate(lo_freq),
        }
    }
}

/// `t = c0 + sum_k [a_k sin(k x) + b_k cos(k x)]` with
/// `x = scale * (f - offset)`. The coefficients are stored as
/// `[c0, a_1, b_1, a_2, b_2, ...]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarmonicModel {
    pub offset: f64,
    pub scale: f64,
    pub coefficients: Vec1<f64>,
}

impl HarmonicModel {
    pub fn evaluate(&self, freq: f64) -> f64 {
        let x = self.scale * (freq - self.offset);
        let c0 = *self.coefficients.first();
        c0 + self.coefficients[1..]
            .chunks_exact(2)
            .enumerate()
            .map(|(i, ab)| {
                let kx = (i + 1) as f64 * x;
                ab[0] * kx.sin() + ab[1] * kx.cos()
            })
            .sum::<f64>()
    }
}

/// Array receiver geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrayInfo {
    /// Physical size of the array on the sky [arcsec].
    pub size: f64,

    /// Tilt of the array relative to the scan direction [degrees].
    pub f_angle: f64,

    /// Fraction of the array's receptors expected to be working.
    pub fraction_available: f64,

    /// Named scan spacing presets [arcsec].
    #[serde(default)]
    pub scan_spacings: IndexMap<String, f64>,

    /// Named jiggle patterns and their number of points.
    #[serde(default)]
    pub jiggle_patterns: IndexMap<String, usize>,
}

impl ArrayInfo {
    /// The extent of the array perpendicular to the scan direction [arcsec].
    pub fn footprint(&self) -> f64 {
        self.size * self.f_angle.to_radians().cos()
    }

    pub fn jiggle_points(&self, pattern: &str) -> Option<usize> {
        self.jiggle_patterns
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(pattern))
            .map(|(_, &n)| n)
    }

    pub fn scan_spacing(&self, preset: &str) -> Option<f64> {
        self.scan_spacings
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(preset))
            .map(|(_, &dy)| dy)
    }
}

/// Load temperatures for the chopper-wheel correction [K].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChopperParams {
    pub t_load: f64,
    pub t_spill: f64,
    pub t_air: f64,
}

/// An empirical quadratic fit of the system temperature in good weather,
/// which replaces the physical model when applicable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TSysFit {
    /// [GHz]
    pub reference_freq: f64,
    pub max_tau_225: f64,
    /// [degrees]
    pub max_zenith_angle: f64,
    /// `[c0, c1, c2]` in `c0 * scale + c1 d + c2 d^2`.
    pub coefficients: [f64; 3],
    /// `(upper frequency bound [GHz], scale)` pairs for the constant term.
    pub band_scales: Vec1<(f64, f64)>,
}

impl TSysFit {
    pub fn applies(&self, tau_225: f64, zenith_angle: f64) -> bool {
        tau_225 <= self.max_tau_225 && zenith_angle <= self.max_zenith_angle
    }

    pub fn band_scale(&self, freq: f64) -> f64 {
        self.band_scales
            .iter()
            .find(|(upper, _)| freq <= *upper)
            .unwrap_or_else(|| self.band_scales.last())
            .1
    }

    pub fn evaluate(&self, freq: f64) -> f64 {
        let [c0, c1, c2] = self.coefficients;
        let d = freq - self.reference_freq;
        c0 * self.band_scale(freq) + c1 * d + c2 * d * d
    }
}

/// The result of a receiver temperature lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TRxLookup {
    /// [K]
    pub t_rx: f64,

    /// Only populated for receivers with sideband-specific data [GHz].
    pub if_freq: Option<f64>,
    pub lo_freq: Option<f64>,
    pub sideband: Option<Sideband>,
}

impl ReceiverInfo {
    pub fn is_array(&self) -> bool {
        self.array.is_some()
    }

    pub fn footprint(&self) -> Option<f64> {
        self.array.as_ref().map(ArrayInfo::footprint)
    }

    /// Error if the sky frequency is outside of this receiver's range.
    pub fn check_sky_freq(&self, freq: f64) -> Result<(), ReceiverError> {
        check_range("sky frequency", freq, self.f_min, self.f_max)
    }

    /// The sideband to use at the given sky frequency, based on the sidebands
    /// for which there are data and the receiver's preferences.
    pub fn preferred_sideband(&self, sky_freq: f64) -> Sideband {
        if let TRxData::Sideband { lsb, usb } = &self.t_rx {
            match (lsb, usb) {
                (Some(_), None) => return Sideband::Lsb,
                (None, Some(_)) => return Sideband::Usb,
                _ => (),
            }
        }

        let n_passed = self
            .sideband_preference
            .iter()
            .filter(|&&b| sky_freq >= b)
            .count();
        if n_passed % 2 == 0 {
            Sideband::Lsb
        } else {
            Sideband::Usb
        }
    }

    /// Look up the receiver temperature at a sky frequency [GHz].
    pub fn t_rx(
        &self,
        sky_freq: f64,
        if_freq: Option<f64>,
        sideband: Option<Sideband>,
    ) -> Result<TRxLookup, ReceiverError> {
        let (t_rx, if_freq, lo_freq, sideband) = match &self.t_rx {
            TRxData::Frequency(table) => (interpolate(table, sky_freq), None, None, None),

            TRxData::Harmonic(model) => (model.evaluate(sky_freq), None, None, None),

            TRxData::Sideband { lsb, usb } => {
                let if_freq = match if_freq {
                    None => self.if_default,
                    Some(f) => {
                        check_range("IF frequency", f, self.if_min, self.if_max)?;
                        f
                    }
                };
                let sideband = sideband.unwrap_or_else(|| self.preferred_sideband(sky_freq));
                let data = match sideband {
                    Sideband::Lsb => lsb,
                    Sideband::Usb => usb,
                };
                let data = data.as_ref().ok_or_else(|| ReceiverError::NoSidebandData {
                    receiver: self.name.clone(),
                    sideband,
                })?;
                let lo_freq = sideband.lo_freq(sky_freq, if_freq);
                (
                    data.evaluate(lo_freq),
                    Some(if_freq),
                    Some(lo_freq),
                    Some(sideband),
                )
            }
        };

        let correction = match (&self.if_correction, if_freq) {
            (Some(table), Some(f)) => interpolate(table, f),
            (Some(table), None) => interpolate(table, self.if_default),
            (None, _) => 0.0,
        };

        Ok(TRxLookup {
            t_rx: t_rx + correction,
            if_freq,
            lo_freq,
            sideband,
        })
    }

    /// Check that the information makes physical sense.
    pub(super) fn validate(&self) -> Result<(), ReceiverError> {
        let invalid = |reason: String| ReceiverError::InvalidInfo {
            receiver: self.name.clone(),
            reason,
        };

        if !(self.f_min < self.f_max) {
            return Err(invalid(format!(
                "frequency range {} - {} GHz is empty",
                self.f_min, self.f_max
            )));
        }
        if !(self.if_min <= self.if_default && self.if_default <= self.if_max) {
            return Err(invalid(format!(
                "default IF {} GHz is outside the IF range {} - {} GHz",
                self.if_default, self.if_min, self.if_max
            )));
        }
        if !(self.eta_tel > 0.0 && self.eta_tel <= 1.0) {
            return Err(invalid(format!(
                "eta_tel ({}) must be in (0, 1]",
                self.eta_tel
            )));
        }
        if self.n_mix == 0 {
            return Err(invalid("there must be at least one mixer".to_string()));
        }

        let check_table = |table: &Vec1<(f64, f64)>, what: &str| {
            if table.windows(2).any(|w| w[1].0 <= w[0].0) {
                Err(invalid(format!("the {what} table is not sorted")))
            } else {
                Ok(())
            }
        };
        let check_harmonic = |model: &HarmonicModel| {
            if model.coefficients.len() % 2 == 0 {
                Err(invalid(format!(
                    "a harmonic model needs an odd number of coefficients, got {}",
                    model.coefficients.len()
                )))
            } else {
                Ok(())
            }
        };
        match &self.t_rx {
            TRxData::Frequency(table) => check_table(table, "receiver temperature")?,
            TRxData::Harmonic(model) => check_harmonic(model)?,
            TRxData::Sideband { lsb, usb } => {
                if lsb.is_none() && usb.is_none() {
                    return Err(invalid("no sideband has any data".to_string()));
                }
                for data in [lsb, usb].into_iter().flatten() {
                    match data {
                        SidebandData::Table(table) => check_table(table, "sideband")?,
                        SidebandData::Harmonic(model) => check_harmonic(model)?,
                    }
                }
            }
        }
        if let Some(table) = &self.if_correction {
            check_table(table, "IF correction")?;
        }
        if let Some(fit) = &self.t_sys_fit {
            check_table(&fit.band_scales, "T_sys fit band")?;
        }

        if let Some(array) = &self.array {
            if !(array.footprint() > 0.0) {
                return Err(invalid(format!(
                    "array footprint ({}) must be positive",
                    array.footprint()
                )));
            }
            if !(array.fraction_available > 0.0 && array.fraction_available <= 1.0) {
                return Err(invalid(format!(
                    "fraction_available ({}) must be in (0, 1]",
                    array.fraction_available
                )));
            }
        }

        Ok(())
    }
}

fn check_range(name: &str, value: f64, min: f64, max: f64) -> Result<(), ReceiverError> {
    if value < min || value > max {
        return Err(ReceiverError::FrequencyOutOfRange {
            name: name.to_string(),
            value,
            min,
            max,
        });
    }
    Ok(())
}
