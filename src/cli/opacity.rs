// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Print atmospheric opacities.

use clap::Parser;
use itertools::Itertools;
use log::info;

use crate::{
    receiver::{Catalog, ReceiverCatalog},
    HitecError,
};

#[derive(Parser, Debug, Default)]
pub(super) struct OpacityArgs {
    /// The zenith opacity at 225 GHz.
    #[clap(short, long)]
    tau_225: f64,

    /// Print the opacity at this frequency [GHz]. If not given, the tabulated
    /// opacity curve for the 225 GHz opacity is printed, which must then be
    /// one of the tabulated values.
    #[clap(short, long)]
    freq: Option<f64>,
}

impl OpacityArgs {
    pub(super) fn run(self, catalog: &Catalog) -> Result<(), HitecError> {
        if !(self.tau_225 >= 0.0) {
            return Err(HitecError::Opacity(format!(
                "tau225 must not be negative (got {})",
                self.tau_225
            )));
        }

        match self.freq {
            Some(freq) => {
                let tau = catalog.interpolated_opacity(self.tau_225, freq);
                info!("Opacity at {freq} GHz for tau225 = {}: {tau:.5}", self.tau_225);
            }

            None => {
                let curve = catalog.opacity_data(self.tau_225).ok_or_else(|| {
                    HitecError::Opacity(format!(
                        "There is no opacity table for tau225 = {}. Tabulated values: {}",
                        self.tau_225,
                        catalog.opacity_tables().tau_values().join(", ")
                    ))
                })?;
                info!("Opacity curve for tau225 = {}", self.tau_225);
                info!("{:>10} {:>10}", "freq [GHz]", "tau");
                for (freq, tau) in curve {
                    info!("{freq:>10.3} {tau:>10.5}");
                }
            }
        }

        Ok(())
    }
}
