// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all hitec-related errors. This should be the *only* error
//! enum that is publicly visible from the command-line interface.

use thiserror::Error;

use super::calc::CalcArgsError;
use crate::{itc::ItcError, receiver::ReceiverError};

/// The *only* publicly visible error from hitec. Each error message points to
/// the help of the relevant subcommand, unless it's "generic".
#[derive(Error, Debug)]
pub enum HitecError {
    /// An error related to calc arguments or the calculation itself.
    #[error("{0}\n\nSee for more info: hitec calc --help")]
    Calc(String),

    /// An error related to receiver information.
    #[error("{0}\n\nSee for more info: hitec receivers --help")]
    Receiver(String),

    /// An error related to opacity tables.
    #[error("{0}\n\nSee for more info: hitec opacity --help")]
    Opacity(String),

    /// An error related to argument files.
    #[error("{0}\n\nArgument files must be TOML or JSON, with the same names as the long command-line arguments (using underscores rather than hyphens).")]
    ArgFile(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<CalcArgsError> for HitecError {
    fn from(e: CalcArgsError) -> Self {
        let s = e.to_string();
        match e {
            CalcArgsError::UnknownJigglePattern { .. }
            | CalcArgsError::UnknownScanSpacing { .. }
            | CalcArgsError::NotAnArray { .. } => Self::Receiver(s),
            CalcArgsError::Receiver(e) => Self::from(e),
            CalcArgsError::Missing(_)
            | CalcArgsError::NoInput
            | CalcArgsError::MultipleInputs
            | CalcArgsError::BadMapMode(_)
            | CalcArgsError::BadSwitchMode(_)
            | CalcArgsError::BadSideband(_)
            | CalcArgsError::BadOutputType(_) => Self::Calc(s),
        }
    }
}

impl From<ItcError> for HitecError {
    fn from(e: ItcError) -> Self {
        let s = e.to_string();
        match e {
            ItcError::InvalidMode(_)
            | ItcError::FrequencyOutOfRange { .. }
            | ItcError::BelowMinimumSampleTime { .. }
            | ItcError::BasketWeaveSplitFailed
            | ItcError::InvalidParameter(_)
            | ItcError::NumericDomain(_) => Self::Calc(s),
            ItcError::UnsupportedReceiverOption { .. } => Self::Receiver(s),
            ItcError::Receiver(e) => Self::from(e),
        }
    }
}

impl From<ReceiverError> for HitecError {
    fn from(e: ReceiverError) -> Self {
        let s = e.to_string();
        match e {
            ReceiverError::UnknownReceiver { .. }
            | ReceiverError::FrequencyOutOfRange { .. }
            | ReceiverError::NoSidebandData { .. }
            | ReceiverError::InvalidInfo { .. }
            | ReceiverError::Json(_) => Self::Receiver(s),
            ReceiverError::BadOpacityLine { .. }
            | ReceiverError::EmptyOpacityTable(_)
            | ReceiverError::BadOpacityTables => Self::Opacity(s),
            ReceiverError::IO(e) => Self::from(e),
        }
    }
}

impl From<std::io::Error> for HitecError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}

impl From<toml::ser::Error> for HitecError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Generic(format!("Couldn't serialise to TOML: {e}"))
    }
}

impl From<serde_json::Error> for HitecError {
    fn from(e: serde_json::Error) -> Self {
        Self::Generic(format!("Couldn't serialise to JSON: {e}"))
    }
}

impl From<log::SetLoggerError> for HitecError {
    fn from(e: log::SetLoggerError) -> Self {
        Self::Generic(format!("Failed to initialise logging: {e}"))
    }
}
