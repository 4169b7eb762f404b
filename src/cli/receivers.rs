// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Print neatly-formatted information on the available receivers.

use std::borrow::Cow;

use clap::Parser;
use itertools::Itertools;
use log::info;

use super::common::{yes_no, InfoPrinter};
use crate::{
    receiver::{ReceiverCatalog, ReceiverInfo, SidebandData, TRxData},
    HitecError,
};

#[derive(Parser, Debug, Default)]
pub(super) struct ReceiversArgs {
    /// Describe this receiver in detail rather than listing all receivers.
    #[clap(short, long)]
    receiver: Option<String>,
}

impl ReceiversArgs {
    pub(super) fn run(self, catalog: &dyn ReceiverCatalog) -> Result<(), HitecError> {
        match self.receiver {
            Some(receiver) => {
                let info = catalog.receiver_info(&receiver)?;
                let mut printer = InfoPrinter::new(format!("Receiver {}", info.name).into());
                for block in describe(info) {
                    printer.push_block(block);
                }
                printer.display();
            }

            None => {
                info!("Available receivers:");
                for name in catalog.receiver_names() {
                    let info = catalog.receiver_info(name)?;
                    info!(
                        "    {:<8} {:>6.1} - {:>6.1} GHz{}",
                        name,
                        info.f_min,
                        info.f_max,
                        if info.is_array() { " (array)" } else { "" }
                    );
                }
            }
        }

        Ok(())
    }
}

fn describe(info: &ReceiverInfo) -> Vec<Vec<Cow<'static, str>>> {
    let mut blocks = vec![vec![
        format!("Sky frequency range: {} - {} GHz", info.f_min, info.f_max).into(),
        format!(
            "IF range: {} - {} GHz (default {} GHz)",
            info.if_min, info.if_max, info.if_default
        )
        .into(),
        format!("Mixers: {}", info.n_mix).into(),
        format!("Telescope efficiency: {}", info.eta_tel).into(),
        format!("Pixel size: {}\"", info.pixel_size).into(),
    ]];

    blocks.push(vec![
        format!("Single sideband: {}", yes_no(info.ssb_available)).into(),
        format!("Double sideband: {}", yes_no(info.dsb_available)).into(),
        format!("Frequency switching: {}", yes_no(info.frsw_available)).into(),
        format!("Dual polarisation: {}", yes_no(info.n_mix >= 2)).into(),
    ]);

    let t_rx: Cow<'static, str> = match &info.t_rx {
        TRxData::Frequency(table) => format!(
            "Receiver temperature: tabulated at {} sky frequencies",
            table.len()
        )
        .into(),
        TRxData::Harmonic(model) => format!(
            "Receiver temperature: harmonic model of sky frequency with {} terms",
            model.coefficients.len()
        )
        .into(),
        TRxData::Sideband { lsb, usb } => {
            let kind = |data: &Option<SidebandData>| match data {
                None => "none",
                Some(SidebandData::Table(_)) => "tabulated",
                Some(SidebandData::Harmonic(_)) => "harmonic model",
            };
            format!(
                "Receiver temperature by LO frequency: LSB {}, USB {}",
                kind(lsb),
                kind(usb)
            )
            .into()
        }
    };
    let mut temperatures = vec![t_rx];
    if info.if_correction.is_some() {
        temperatures.push("IF-dependent receiver temperature correction".into());
    }
    if let Some(chopper) = &info.chopper {
        temperatures.push(
            format!(
                "Chopper-wheel correction: T_load {} K, T_spill {} K, T_air {} K",
                chopper.t_load, chopper.t_spill, chopper.t_air
            )
            .into(),
        );
    }
    if let Some(fit) = &info.t_sys_fit {
        temperatures.push(
            format!(
                "Empirical T_sys fit for tau225 <= {} and zenith angle <= {}°",
                fit.max_tau_225, fit.max_zenith_angle
            )
            .into(),
        );
    }
    blocks.push(temperatures);

    if let Some(array) = &info.array {
        blocks.push(vec![
            format!(
                "Array size {}\" at {}° (footprint {:.2}\")",
                array.size,
                array.f_angle,
                array.footprint()
            )
            .into(),
            format!(
                "Receptors expected to be available: {}%",
                array.fraction_available * 100.0
            )
            .into(),
            format!(
                "Scan spacings: {}",
                array
                    .scan_spacings
                    .iter()
                    .map(|(name, dy)| format!("{name} ({dy}\")"))
                    .join(", ")
            )
            .into(),
            format!(
                "Jiggle patterns: {}",
                array
                    .jiggle_patterns
                    .iter()
                    .map(|(name, n)| format!("{name} ({n} points)"))
                    .join(", ")
            )
            .into(),
        ]);
    }

    blocks
}
