// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Receiver information and atmospheric opacity.
//!
//! The calculation engine only ever talks to a [`ReceiverCatalog`]; [`Catalog`]
//! is the implementation backed by the data embedded in this crate (or a
//! user-supplied receiver information file). A catalog is built once and then
//! only read, so it can be shared freely between threads.

mod error;
mod info;
mod opacity;

pub use error::ReceiverError;
pub use info::{
    ArrayInfo, ChopperParams, HarmonicModel, ReceiverInfo, SidebandData, TRxData, TRxLookup,
    TSysFit,
};
pub use opacity::{parse_opacity_table, OpacityTables};

use std::path::Path;

use indexmap::IndexMap;
use itertools::Itertools;
use log::debug;

use crate::modes::Sideband;

const BUILTIN_RECEIVER_INFO: &str = include_str!("../../data/receiver_info.json");

/// Read-only access to receiver parameters and the interpolation tables the
/// engine needs.
pub trait ReceiverCatalog: Sync + Send {
    /// Get the information on a receiver.
    fn receiver_info(&self, receiver: &str) -> Result<&ReceiverInfo, ReceiverError>;

    /// The names of all receivers, in display order.
    fn receiver_names(&self) -> Vec<&str>;

    /// Get the receiver temperature at a sky frequency [GHz], optionally with a
    /// specific IF [GHz] and sideband.
    fn interpolated_t_rx(
        &self,
        receiver: &str,
        sky_freq: f64,
        if_freq: Option<f64>,
        sideband: Option<Sideband>,
    ) -> Result<TRxLookup, ReceiverError> {
        self.receiver_info(receiver)?
            .t_rx(sky_freq, if_freq, sideband)
    }

    /// Get the atmospheric opacity at a frequency [GHz] given the 225 GHz
    /// opacity.
    fn interpolated_opacity(&self, tau_225: f64, freq: f64) -> f64;

    /// Get the tabulated `(frequency, opacity)` pairs for a 225 GHz opacity,
    /// if that value is tabulated.
    fn opacity_data(&self, tau_225: f64) -> Option<&[(f64, f64)]>;
}

/// A catalog held in memory.
#[derive(Debug, Clone)]
pub struct Catalog {
    receivers: IndexMap<String, ReceiverInfo>,
    opacity: OpacityTables,
}

impl Catalog {
    /// Make a new catalog. Each receiver's name is set from its key, and all
    /// receivers are validated.
    pub fn new(
        receivers: IndexMap<String, ReceiverInfo>,
        opacity: OpacityTables,
    ) -> Result<Catalog, ReceiverError> {
        let mut receivers = receivers;
        for (name, info) in receivers.iter_mut() {
            info.name = name.clone();
            info.validate()?;
        }
        debug!(
            "Receiver catalog contains: {}",
            receivers.keys().join(", ")
        );

        Ok(Catalog { receivers, opacity })
    }

    /// The catalog shipped with this crate.
    pub fn builtin() -> Result<Catalog, ReceiverError> {
        Self::from_receiver_json(BUILTIN_RECEIVER_INFO)
    }

    /// Build a catalog from JSON receiver information, using the built-in
    /// opacity tables.
    pub fn from_receiver_json(json: &str) -> Result<Catalog, ReceiverError> {
        let receivers: IndexMap<String, ReceiverInfo> = serde_json::from_str(json)?;
        Self::new(receivers, OpacityTables::builtin()?)
    }

    /// Build a catalog from a JSON receiver information file, using the
    /// built-in opacity tables.
    pub fn from_receiver_file<P: AsRef<Path>>(file: P) -> Result<Catalog, ReceiverError> {
        debug!("Reading receiver information from {}", file.as_ref().display());
        let json = std::fs::read_to_string(file)?;
        Self::from_receiver_json(&json)
    }

    pub fn opacity_tables(&self) -> &OpacityTables {
        &self.opacity
    }
}

impl ReceiverCatalog for Catalog {
    fn receiver_info(&self, receiver: &str) -> Result<&ReceiverInfo, ReceiverError> {
        self.receivers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(receiver))
            .map(|(_, info)| info)
            .ok_or_else(|| ReceiverError::UnknownReceiver {
                got: receiver.to_string(),
                available: self.receivers.keys().join(", "),
            })
    }

    fn receiver_names(&self) -> Vec<&str> {
        self.receivers.keys().map(|k| k.as_str()).collect()
    }

    fn interpolated_opacity(&self, tau_225: f64, freq: f64) -> f64 {
        self.opacity.opacity(tau_225, freq)
    }

    fn opacity_data(&self, tau_225: f64) -> Option<&[(f64, f64)]> {
        self.opacity.curve(tau_225).map(|table| &table[..])
    }
}
