// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors from time calculations.

use thiserror::Error;

use crate::{
    constants::MIN_SAMPLE_TIME, math::NumericError, modes::CalcInput, receiver::ReceiverError,
};

#[derive(Error, Debug)]
pub enum ItcError {
    #[error("{0}")]
    InvalidMode(String),

    #[error("The {receiver} receiver does not support {option}.")]
    UnsupportedReceiverOption { receiver: String, option: String },

    #[error("The {name} ({value:.3} GHz) is not within the available range ({min:.1} - {max:.1} GHz).")]
    FrequencyOutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{}", below_minimum_message(*origin, *basket_weave))]
    BelowMinimumSampleTime {
        /// The quantity supplied by the caller.
        origin: CalcInput,
        basket_weave: bool,
    },

    #[error("Could not divide the elapsed time between the two basket weave scan directions without an integration time per point below the minimum sample time. Please try increasing the elapsed time or disabling basket weaving.")]
    BasketWeaveSplitFailed,

    #[error("{0}")]
    NumericDomain(#[from] NumericError),

    #[error("{0}")]
    InvalidParameter(String),

    #[error("{0}")]
    Receiver(ReceiverError),
}

fn below_minimum_message(origin: CalcInput, basket_weave: bool) -> String {
    let start = match origin {
        CalcInput::IntTime => "The requested integration time per point is less than",
        CalcInput::Rms => {
            "The requested target sensitivity led to an integration time per point less than"
        }
        CalcInput::ElapsedTime => {
            "The requested elapsed time led to an integration time per point less than"
        }
    };
    if basket_weave {
        format!(
            "{start} twice the minimum sample time ({} s). Basket weaving splits the time between two scan directions, each of which needs at least {MIN_SAMPLE_TIME} s per point.",
            2.0 * MIN_SAMPLE_TIME
        )
    } else {
        format!("{start} the minimum sample time ({MIN_SAMPLE_TIME} s).")
    }
}

impl From<ReceiverError> for ItcError {
    fn from(e: ReceiverError) -> Self {
        match e {
            ReceiverError::FrequencyOutOfRange {
                name,
                value,
                min,
                max,
            } => ItcError::FrequencyOutOfRange {
                name,
                value,
                min,
                max,
            },
            ReceiverError::NoSidebandData { receiver, sideband } => {
                ItcError::UnsupportedReceiverOption {
                    receiver,
                    option: format!("the {} sideband", sideband.to_string().to_uppercase()),
                }
            }
            e => ItcError::Receiver(e),
        }
    }
}
