// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Print the system temperature of a receiver in given conditions, or the
//! receiver temperature implied by a measured system temperature.

use std::str::FromStr;

use clap::Parser;
use log::debug;

use super::common::{InfoPrinter, SIDEBAND_HELP};
use crate::{
    modes::{Sideband, SIDEBANDS_COMMA_SEPARATED},
    receiver::ReceiverCatalog,
    t_sys::{implied_receiver_temperature, system_temperature, TSysParams},
    HitecError,
};

#[derive(Parser, Debug, Default)]
pub(super) struct TSysArgs {
    /// The receiver.
    #[clap(short, long)]
    receiver: String,

    /// The sky frequency [GHz].
    #[clap(short, long)]
    freq: f64,

    /// The zenith opacity at 225 GHz.
    #[clap(short, long)]
    tau_225: f64,

    /// The zenith angle [degrees].
    #[clap(short, long)]
    zenith_angle: f64,

    /// Double sideband.
    #[clap(long)]
    dsb: bool,

    /// The IF frequency [GHz].
    #[clap(long)]
    if_freq: Option<f64>,

    #[clap(long, help = SIDEBAND_HELP.as_str())]
    sideband: Option<String>,

    /// Rather than the system temperature, print the receiver temperature
    /// implied by this measured system temperature [K].
    #[clap(long)]
    measured_t_sys: Option<f64>,
}

impl TSysArgs {
    pub(super) fn run(self, catalog: &dyn ReceiverCatalog) -> Result<(), HitecError> {
        let Self {
            receiver,
            freq,
            tau_225,
            zenith_angle,
            dsb,
            if_freq,
            sideband,
            measured_t_sys,
        } = self;

        let sideband = match sideband {
            None => None,
            Some(s) => Some(Sideband::from_str(&s).map_err(|_| {
                HitecError::Receiver(format!(
                    "Unrecognised sideband '{s}'. Supported sidebands: {}",
                    *SIDEBANDS_COMMA_SEPARATED
                ))
            })?),
        };
        let info = catalog.receiver_info(&receiver)?;
        info.check_sky_freq(freq)?;
        if !(0.0..90.0).contains(&zenith_angle) {
            return Err(HitecError::Generic(format!(
                "The zenith angle must be at least 0 and less than 90 degrees (got {zenith_angle})"
            )));
        }

        if let Some(t_sys) = measured_t_sys {
            debug!("Inverting a measured T_sys of {t_sys} K");
            let t_rx = implied_receiver_temperature(
                catalog,
                &info.name,
                freq,
                tau_225,
                zenith_angle,
                t_sys,
                dsb,
            )?;
            let mut printer = InfoPrinter::new("Implied receiver temperature".into());
            printer.push_line(format!("Measured T_sys: {t_sys} K").into());
            printer.push_line(format!("T_rx: {t_rx:.2} K").into());
            printer.display();
            return Ok(());
        }

        let result = system_temperature(
            catalog,
            &TSysParams {
                receiver: &info.name,
                freq,
                tau_225,
                zenith_angle,
                is_dsb: dsb,
                if_freq,
                sideband,
            },
        )?;

        let mut printer = InfoPrinter::new(format!("System temperature ({})", info.name).into());
        printer.push_block(vec![
            format!("Sky frequency: {freq} GHz").into(),
            format!("tau225: {tau_225}, zenith angle: {zenith_angle}°").into(),
        ]);
        let mut block = vec![
            format!("T_rx: {:.2} K", result.t_rx).into(),
            format!("tau: {:.4}", result.tau).into(),
            format!("Sky transmission: {:.4}", result.eta_sky).into(),
        ];
        if let (Some(sideband), Some(if_freq), Some(lo_freq)) =
            (result.sideband, result.if_freq, result.lo_freq)
        {
            block.push(
                format!(
                    "{} sideband, IF {if_freq} GHz, LO {lo_freq:.3} GHz",
                    sideband.to_string().to_uppercase()
                )
                .into(),
            );
        }
        printer.push_block(block);
        printer.push_line(format!("T_sys: {:.2} K", result.t_sys).into());
        printer.display();

        Ok(())
    }
}
