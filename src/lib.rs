// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Instrument time calculator for heterodyne receivers.

Given a receiver, an observing mode and the atmospheric conditions, convert
between a target RMS noise, an integration time per point and a total elapsed
time.
 */

pub mod constants;
pub mod duration;
pub mod itc;
pub(crate) mod math;
pub mod modes;
pub mod raster;
pub mod receiver;
pub mod rms;
pub mod t_sys;

mod cli;

// Re-exports.
pub use cli::{Hitec, HitecError};
pub use itc::{
    CalculationRequest, CalculationResult, ExtraOutput, HeterodyneItc, ItcError, PassOutput,
};
pub use math::NumericError;
pub use modes::{CalcInput, MapMode, Sideband, SwitchMode};
pub use raster::RasterSpec;
pub use receiver::{Catalog, ReceiverCatalog, ReceiverError};
