// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Common arguments and helpers for command-line interfaces.

mod printers;

pub(super) use printers::InfoPrinter;
pub(crate) use printers::{display_warnings, Warn};

use std::path::Path;

use itertools::Itertools;
use log::debug;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use super::HitecError;
use crate::{
    modes::{MAP_MODES_COMMA_SEPARATED, SIDEBANDS_COMMA_SEPARATED, SWITCH_MODES_COMMA_SEPARATED},
    receiver::Catalog,
};

lazy_static::lazy_static! {
    pub(super) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileTypes::iter().join(", ");

    pub(super) static ref ARG_FILE_HELP: String =
        format!("All arguments may be specified in a file. Any CLI arguments override arguments set in the file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);

    pub(super) static ref MAP_MODE_HELP: String =
        format!("The map mode. Supported modes: {}. Default: grid", *MAP_MODES_COMMA_SEPARATED);

    pub(super) static ref SW_MODE_HELP: String =
        format!("The switching mode. Supported modes: {}. Default: pssw", *SWITCH_MODES_COMMA_SEPARATED);

    pub(super) static ref SIDEBAND_HELP: String =
        format!("Force the sideband of receivers with sideband-dependent receiver temperatures. Supported sidebands: {}. Default: the receiver's preferred sideband at the sky frequency", *SIDEBANDS_COMMA_SEPARATED);

    pub(super) static ref OUTPUT_HELP: String =
        format!("Write the results to this file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);
}

/// File types used both for arguments files and for results.
#[derive(Debug, Display, EnumIter, EnumString)]
pub(super) enum ArgFileTypes {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

impl ArgFileTypes {
    /// Determine the type from a file's extension.
    pub(super) fn from_path(path: &Path) -> Option<ArgFileTypes> {
        use std::str::FromStr;

        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ArgFileTypes::from_str(&e).ok())
    }
}

macro_rules! unpack_arg_file {
    ($arg_file:expr) => ({
        use std::{fs::File, io::Read};

        use crate::cli::common::{ArgFileTypes, ARG_FILE_TYPES_COMMA_SEPARATED};

        debug!("Attempting to parse argument file {}", $arg_file.display());

        let mut contents = String::new();
        match ArgFileTypes::from_path(&$arg_file) {
            Some(ArgFileTypes::Toml) => {
                debug!("Parsing toml file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match toml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(HitecError::ArgFile(format!(
                            "Couldn't decode toml structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }
            Some(ArgFileTypes::Json) => {
                debug!("Parsing json file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match serde_json::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(HitecError::ArgFile(format!(
                            "Couldn't decode json structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }

            _ => {
                return Err(HitecError::ArgFile(format!(
                    "Argument file '{:?}' doesn't have a recognised file extension! Valid extensions are: {}", $arg_file, *ARG_FILE_TYPES_COMMA_SEPARATED)
                ))
            }
        }
    });
}

/// Get the receiver catalog, either built in or with receiver definitions from
/// a user-supplied JSON file.
pub(super) fn load_catalog(receiver_info: Option<&Path>) -> Result<Catalog, HitecError> {
    let catalog = match receiver_info {
        Some(file) => {
            debug!("Using receiver information from {}", file.display());
            Catalog::from_receiver_file(file)?
        }
        None => Catalog::builtin()?,
    };
    Ok(catalog)
}

/// Format a boolean for a report.
pub(super) fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}
