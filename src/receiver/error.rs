// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with receiver information and opacity tables.

use thiserror::Error;

use crate::modes::Sideband;

#[derive(Error, Debug)]
pub enum ReceiverError {
    #[error("Unknown receiver '{got}'. Available receivers: {available}")]
    UnknownReceiver { got: String, available: String },

    #[error("The {name} ({value:.3} GHz) is not within the available range ({min:.1} - {max:.1} GHz).")]
    FrequencyOutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("The {receiver} receiver has no receiver temperature data for the {sideband} sideband")]
    NoSidebandData {
        receiver: String,
        sideband: Sideband,
    },

    #[error("Invalid information for receiver {receiver}: {reason}")]
    InvalidInfo { receiver: String, reason: String },

    #[error("Couldn't parse line {line_num} of the opacity table for tau_225 = {tau_225}: '{line}'")]
    BadOpacityLine {
        tau_225: f64,
        line_num: usize,
        line: String,
    },

    #[error("The opacity table for tau_225 = {0} has no values")]
    EmptyOpacityTable(f64),

    #[error("The opacity tables must be sorted by tau_225, and at least two are needed")]
    BadOpacityTables,

    #[error("Couldn't decode receiver information: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
