// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Some helper mathematics.
//!
//! Everything that could divide by zero or take the square root of a negative
//! number goes through [`checked_div`] or [`checked_sqrt`], so that bad inputs
//! surface as a [`NumericError`] rather than a NaN buried in the results.

mod error;

pub use error::NumericError;

use vec1::Vec1;

/// Linearly interpolate a table of `(x, y)` pairs sorted by `x`. The first
/// node at or above `x` and its predecessor are used; outside the table, the
/// first or last `y` is returned.
pub fn interpolate(table: &Vec1<(f64, f64)>, x: f64) -> f64 {
    let mut prev: Option<(f64, f64)> = None;
    for &(x_i, y_i) in table.iter() {
        if x <= x_i {
            return match prev {
                None => y_i,
                Some((x_0, y_0)) => y_0 + (y_i - y_0) * (x - x_0) / (x_i - x_0),
            };
        }
        prev = Some((x_i, y_i));
    }

    table.last().1
}

/// Straight-line interpolation (or extrapolation) through two points.
pub(crate) fn lerp((x_0, y_0): (f64, f64), (x_1, y_1): (f64, f64), x: f64) -> f64 {
    y_0 + (x - x_0) * (y_1 - y_0) / (x_1 - x_0)
}

/// Divide, refusing a zero (or NaN) denominator. `quantity` names what is
/// being calculated for the error message.
#[inline]
pub fn checked_div(num: f64, den: f64, quantity: &'static str) -> Result<f64, NumericError> {
    if den == 0.0 || den.is_nan() {
        return Err(NumericError::DivisionByZero(quantity));
    }
    finite(num / den, quantity)
}

/// Square root, refusing negative (or NaN) arguments.
#[inline]
pub fn checked_sqrt(x: f64, quantity: &'static str) -> Result<f64, NumericError> {
    if x < 0.0 || x.is_nan() {
        return Err(NumericError::NegativeSqrt(quantity));
    }
    finite(x.sqrt(), quantity)
}

/// The number of samples `step` apart covering `extent`, counting both ends.
pub fn sample_count(
    extent: f64,
    step: f64,
    quantity: &'static str,
) -> Result<usize, NumericError> {
    let n = checked_div(extent, step, quantity)?.floor();
    if !(0.0..usize::MAX as f64).contains(&n) {
        return Err(NumericError::OutOfRange(quantity));
    }
    Ok(n as usize + 1)
}

/// Ensure a result is a usable number.
#[inline]
pub fn finite(x: f64, quantity: &'static str) -> Result<f64, NumericError> {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(NumericError::NotFinite(quantity))
    }
}

/// Combine the RMS noise of independent observations of the same sky:
/// `(sum rms_i^-2)^-1/2`.
pub fn combine_rms(rms: &[f64]) -> Result<f64, NumericError> {
    let mut inverse_variance = 0.0;
    for &r in rms {
        inverse_variance += checked_div(1.0, r * r, "the combined RMS")?;
    }
    checked_sqrt(checked_div(1.0, inverse_variance, "the combined RMS")?, "the combined RMS")
}
