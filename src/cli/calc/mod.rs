// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The `calc` subcommand: convert between a target RMS, an integration time
//! per point and an elapsed time.


use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
    str::FromStr,
};

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::common::{
    display_warnings, ArgFileTypes, InfoPrinter, Warn, ARG_FILE_HELP, ARG_FILE_TYPES_COMMA_SEPARATED,
    MAP_MODE_HELP, OUTPUT_HELP, SIDEBAND_HELP, SW_MODE_HELP,
};
use crate::{
    itc::{CalculationRequest, CalculationResult, HeterodyneItc},
    modes::{
        CalcInput, MapMode, Sideband, SwitchMode, MAP_MODES_COMMA_SEPARATED,
        SIDEBANDS_COMMA_SEPARATED, SWITCH_MODES_COMMA_SEPARATED,
    },
    raster::RasterSpec,
    receiver::{ReceiverCatalog, ReceiverError, TRxData},
    HitecError,
};

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct CalcArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    #[serde(skip)]
    pub(super) args_file: Option<PathBuf>,

    /// The receiver to observe with, e.g. HARP.
    #[clap(short, long, help_heading = "OBSERVATION")]
    pub(super) receiver: Option<String>,

    #[clap(short, long, help = MAP_MODE_HELP.as_str(), help_heading = "OBSERVATION")]
    pub(super) map_mode: Option<String>,

    #[clap(short, long, help = SW_MODE_HELP.as_str(), help_heading = "OBSERVATION")]
    pub(super) sw_mode: Option<String>,

    /// The sky frequency [GHz].
    #[clap(short, long, help_heading = "OBSERVATION")]
    pub(super) freq: Option<f64>,

    /// The frequency resolution [MHz].
    #[clap(long, help_heading = "OBSERVATION")]
    pub(super) freq_res: Option<f64>,

    /// The zenith opacity at 225 GHz.
    #[clap(short, long, help_heading = "OBSERVATION")]
    pub(super) tau_225: Option<f64>,

    /// The zenith angle of the source [degrees].
    #[clap(short, long, help_heading = "OBSERVATION")]
    pub(super) zenith_angle: Option<f64>,

    /// Observe in double sideband mode.
    #[clap(long, help_heading = "OBSERVATION")]
    #[serde(default)]
    pub(super) dsb: bool,

    /// Use both polarisations. Requires a receiver with at least two mixers.
    #[clap(long, help_heading = "OBSERVATION")]
    #[serde(default)]
    pub(super) dual_pol: bool,

    /// Continuum mode, which adds overhead to every observation.
    #[clap(long, help_heading = "OBSERVATION")]
    #[serde(default)]
    pub(super) continuum: bool,

    /// The IF frequency [GHz]. Only used by receivers with sideband-dependent
    /// receiver temperatures.
    #[clap(long, help_heading = "OBSERVATION")]
    pub(super) if_freq: Option<f64>,

    #[clap(long, help = SIDEBAND_HELP.as_str(), help_heading = "OBSERVATION")]
    pub(super) sideband: Option<String>,

    /// The number of points in a grid or jiggle map. Default: 1
    #[clap(short, long, help_heading = "GRID AND JIGGLE MAPS")]
    pub(super) n_points: Option<usize>,

    /// The name of an array receiver's jiggle pattern, used to set the number
    /// of points of a jiggle map.
    #[clap(short, long, help_heading = "GRID AND JIGGLE MAPS")]
    pub(super) jiggle_pattern: Option<String>,

    /// Each point of the map has its own reference position.
    #[clap(long, help_heading = "GRID AND JIGGLE MAPS")]
    #[serde(default)]
    pub(super) separate_offs: bool,

    /// The width of a raster map [arcsec].
    #[clap(long, help_heading = "RASTER MAPS")]
    pub(super) width: Option<f64>,

    /// The height of a raster map [arcsec].
    #[clap(long, help_heading = "RASTER MAPS")]
    pub(super) height: Option<f64>,

    /// The pixel size along each row of a raster map [arcsec].
    #[clap(long, help_heading = "RASTER MAPS")]
    pub(super) dx: Option<f64>,

    /// The spacing between the rows of a raster map [arcsec].
    #[clap(long, help_heading = "RASTER MAPS")]
    pub(super) dy: Option<f64>,

    /// The name of an array receiver's scan spacing, used to set the row
    /// spacing of a raster map (e.g. "1/2 array").
    #[clap(long, help_heading = "RASTER MAPS")]
    pub(super) scan_spacing: Option<String>,

    /// Don't extend raster rows by half of the array footprint at each end.
    #[clap(long, help_heading = "RASTER MAPS")]
    #[serde(default)]
    pub(super) no_overscan: bool,

    /// Scan the raster map a second time with rows perpendicular to the
    /// first.
    #[clap(long, help_heading = "RASTER MAPS")]
    #[serde(default)]
    pub(super) basket_weave: bool,

    /// Calculate the time needed to reach this RMS [K].
    #[clap(long, help_heading = "CALCULATION")]
    pub(super) rms: Option<f64>,

    /// Calculate the RMS reached with this integration time per point [s].
    #[clap(long, help_heading = "CALCULATION")]
    pub(super) int_time: Option<f64>,

    /// Calculate the RMS reached in this elapsed time [s].
    #[clap(long, help_heading = "CALCULATION")]
    pub(super) elapsed_time: Option<f64>,

    #[clap(short, long, help = OUTPUT_HELP.as_str(), help_heading = "CALCULATION")]
    pub(super) output: Option<PathBuf>,
}

/// Everything needed to run a calculation.
#[derive(Debug)]
pub(super) struct CalcParams {
    pub(super) input: CalcInput,
    pub(super) value: f64,
    pub(super) request: CalculationRequest,
    pub(super) output: Option<(PathBuf, ArgFileTypes)>,
}

impl CalcArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    ///
    /// This function should only ever merge arguments, and not try to make
    /// sense of them.
    pub(super) fn merge(self) -> Result<CalcArgs, HitecError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Read in the file arguments. Ensure all of the file args are
            // accounted for by pattern matching.
            let CalcArgs {
                args_file: _,
                receiver,
                map_mode,
                sw_mode,
                freq,
                freq_res,
                tau_225,
                zenith_angle,
                dsb,
                dual_pol,
                continuum,
                if_freq,
                sideband,
                n_points,
                jiggle_pattern,
                separate_offs,
                width,
                height,
                dx,
                dy,
                scan_spacing,
                no_overscan,
                basket_weave,
                rms,
                int_time,
                elapsed_time,
                output,
            } = unpack_arg_file!(arg_file);

            // A calculation input on the command line replaces any in the
            // file.
            let cli_has_input =
                cli_args.rms.is_some() || cli_args.int_time.is_some() || cli_args.elapsed_time.is_some();
            let (rms, int_time, elapsed_time) = if cli_has_input {
                (cli_args.rms, cli_args.int_time, cli_args.elapsed_time)
            } else {
                (rms, int_time, elapsed_time)
            };

            // Merge all the arguments, preferring the CLI args when available.
            Ok(CalcArgs {
                args_file: None,
                receiver: cli_args.receiver.or(receiver),
                map_mode: cli_args.map_mode.or(map_mode),
                sw_mode: cli_args.sw_mode.or(sw_mode),
                freq: cli_args.freq.or(freq),
                freq_res: cli_args.freq_res.or(freq_res),
                tau_225: cli_args.tau_225.or(tau_225),
                zenith_angle: cli_args.zenith_angle.or(zenith_angle),
                dsb: cli_args.dsb || dsb,
                dual_pol: cli_args.dual_pol || dual_pol,
                continuum: cli_args.continuum || continuum,
                if_freq: cli_args.if_freq.or(if_freq),
                sideband: cli_args.sideband.or(sideband),
                n_points: cli_args.n_points.or(n_points),
                jiggle_pattern: cli_args.jiggle_pattern.or(jiggle_pattern),
                separate_offs: cli_args.separate_offs || separate_offs,
                width: cli_args.width.or(width),
                height: cli_args.height.or(height),
                dx: cli_args.dx.or(dx),
                dy: cli_args.dy.or(dy),
                scan_spacing: cli_args.scan_spacing.or(scan_spacing),
                no_overscan: cli_args.no_overscan || no_overscan,
                basket_weave: cli_args.basket_weave || basket_weave,
                rms,
                int_time,
                elapsed_time,
                output: cli_args.output.or(output),
            })
        } else {
            Ok(cli_args)
        }
    }

    /// Turn the arguments into a request. Presets are resolved against the
    /// receiver's information; everything else is checked by the calculator.
    pub(super) fn parse(self, catalog: &dyn ReceiverCatalog) -> Result<CalcParams, HitecError> {
        trace!("{:#?}", self);

        let Self {
            args_file: _,
            receiver,
            map_mode,
            sw_mode,
            freq,
            freq_res,
            tau_225,
            zenith_angle,
            dsb,
            dual_pol,
            continuum,
            if_freq,
            sideband,
            n_points,
            jiggle_pattern,
            separate_offs,
            width,
            height,
            dx,
            dy,
            scan_spacing,
            no_overscan,
            basket_weave,
            rms,
            int_time,
            elapsed_time,
            output,
        } = self;

        let (input, value) = match (rms, int_time, elapsed_time) {
            (Some(v), None, None) => (CalcInput::Rms, v),
            (None, Some(v), None) => (CalcInput::IntTime, v),
            (None, None, Some(v)) => (CalcInput::ElapsedTime, v),
            (None, None, None) => return Err(CalcArgsError::NoInput.into()),
            _ => return Err(CalcArgsError::MultipleInputs.into()),
        };

        let receiver = receiver.ok_or(CalcArgsError::Missing("receiver"))?;
        let info = catalog
            .receiver_info(&receiver)
            .map_err(CalcArgsError::Receiver)?;
        let map_mode = match map_mode {
            None => MapMode::Grid,
            Some(s) => MapMode::from_str(&s).map_err(|_| CalcArgsError::BadMapMode(s))?,
        };
        let sw_mode = match sw_mode {
            None => SwitchMode::Pssw,
            Some(s) => SwitchMode::from_str(&s).map_err(|_| CalcArgsError::BadSwitchMode(s))?,
        };
        let sideband = match sideband {
            None => None,
            Some(s) => Some(Sideband::from_str(&s).map_err(|_| CalcArgsError::BadSideband(s))?),
        };
        let freq = freq.ok_or(CalcArgsError::Missing("freq"))?;
        let freq_res = freq_res.ok_or(CalcArgsError::Missing("freq-res"))?;
        let tau_225 = tau_225.ok_or(CalcArgsError::Missing("tau-225"))?;
        let zenith_angle = zenith_angle.ok_or(CalcArgsError::Missing("zenith-angle"))?;

        let mut request = CalculationRequest::new(
            &info.name,
            map_mode,
            sw_mode,
            freq,
            freq_res,
            tau_225,
            zenith_angle,
        )
        .with_dsb(dsb)
        .with_dual_pol(dual_pol)
        .with_continuum(continuum)
        .with_separate_offs(separate_offs);

        if let Some(if_freq) = if_freq {
            if !matches!(info.t_rx, TRxData::Sideband { .. }) {
                format!(
                    "The {} receiver's temperature doesn't depend on the IF; ignoring --if-freq",
                    info.name
                )
                .warn();
            }
            request = request.with_if_freq(if_freq);
        }
        if let Some(sideband) = sideband {
            request = request.with_sideband(sideband);
        }

        match map_mode {
            MapMode::Grid | MapMode::Jiggle => {
                let n_points = match jiggle_pattern {
                    Some(pattern) => {
                        if map_mode != MapMode::Jiggle {
                            "A jiggle pattern was supplied for a grid map; using its number of points anyway".warn();
                        }
                        let array = info.array.as_ref().ok_or_else(|| CalcArgsError::NotAnArray {
                            receiver: info.name.clone(),
                            option: "jiggle patterns",
                        })?;
                        let n = array.jiggle_points(&pattern).ok_or_else(|| {
                            CalcArgsError::UnknownJigglePattern {
                                pattern: pattern.clone(),
                                receiver: info.name.clone(),
                                available: array.jiggle_patterns.keys().cloned().collect::<Vec<_>>().join(", "),
                            }
                        })?;
                        if n_points.map(|p| p != n).unwrap_or(false) {
                            format!("Using {n} points from jiggle pattern '{pattern}' rather than --n-points").warn();
                        }
                        n
                    }
                    None => n_points.unwrap_or(1),
                };
                request = request.with_n_points(n_points);
            }

            MapMode::Raster => {
                let dy = match scan_spacing {
                    Some(preset) => {
                        let array = info.array.as_ref().ok_or_else(|| CalcArgsError::NotAnArray {
                            receiver: info.name.clone(),
                            option: "scan spacings",
                        })?;
                        array.scan_spacing(&preset).ok_or_else(|| {
                            CalcArgsError::UnknownScanSpacing {
                                preset: preset.clone(),
                                receiver: info.name.clone(),
                                available: array.scan_spacings.keys().cloned().collect::<Vec<_>>().join(", "),
                            }
                        })?
                    }
                    None => dy.ok_or(CalcArgsError::Missing("dy (or scan-spacing)"))?,
                };
                let raster = RasterSpec::new(
                    width.ok_or(CalcArgsError::Missing("width"))?,
                    height.ok_or(CalcArgsError::Missing("height"))?,
                    dx.ok_or(CalcArgsError::Missing("dx"))?,
                    dy,
                )
                .with_overscan(!no_overscan);
                request = request
                    .with_raster(raster)
                    .with_basket_weave(basket_weave);
            }
        }

        let output = match output {
            None => None,
            Some(path) => match ArgFileTypes::from_path(&path) {
                Some(file_type) => Some((path, file_type)),
                None => return Err(CalcArgsError::BadOutputType(path).into()),
            },
        };

        Ok(CalcParams {
            input,
            value,
            request,
            output,
        })
    }

    pub(super) fn run(self, dry_run: bool, catalog: &dyn ReceiverCatalog) -> Result<(), HitecError> {
        debug!("Converting arguments into parameters");
        let params = self.parse(catalog)?;
        display_warnings();
        params.run(dry_run, catalog)
    }
}

impl CalcParams {
    fn run(self, dry_run: bool, catalog: &dyn ReceiverCatalog) -> Result<(), HitecError> {
        let CalcParams {
            input,
            value,
            request,
            output,
        } = self;

        let itc = HeterodyneItc::new(catalog);
        print_request(input, value, &request);
        if dry_run {
            itc.validate(input, value, &request)?;
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let result = itc.calculate(input, value, &request)?;
        print_result(&result);

        if let Some((path, file_type)) = output {
            let contents = match file_type {
                ArgFileTypes::Toml => toml::to_string(&result)?,
                ArgFileTypes::Json => serde_json::to_string_pretty(&result)?,
            };
            let mut f = BufWriter::new(File::create(&path)?);
            f.write_all(contents.as_bytes())?;
            f.flush()?;
            info!("Results written to {}", path.display());
        }

        Ok(())
    }
}

fn print_request(input: CalcInput, value: f64, request: &CalculationRequest) {
    let mut printer = InfoPrinter::new("Observation".into());
    printer.push_block(vec![
        format!("Receiver: {}", request.receiver).into(),
        format!(
            "Sky frequency: {} GHz, resolution {} MHz",
            request.freq, request.freq_res
        )
        .into(),
        format!(
            "tau225: {}, zenith angle: {}°",
            request.tau_225, request.zenith_angle
        )
        .into(),
    ]);

    let mut modes = vec![format!(
        "{} map, {} switching",
        request.map_mode,
        request.sw_mode.to_string().to_uppercase()
    )
    .into()];
    match request.raster {
        Some(raster) if request.map_mode == MapMode::Raster => {
            modes.push(
                format!(
                    "{}\" x {}\", dx {}\", dy {}\"{}",
                    raster.width,
                    raster.height,
                    raster.dx,
                    raster.dy,
                    if raster.overscan { "" } else { ", no overscan" }
                )
                .into(),
            );
            if request.basket_weave {
                modes.push("Basket weave".into());
            }
        }
        _ => {
            modes.push(format!("{} point(s)", request.n_points).into());
            if request.separate_offs {
                modes.push("Separate offs".into());
            }
        }
    }
    if request.is_dsb {
        modes.push("Double sideband".into());
    }
    if request.dual_pol {
        modes.push("Dual polarisation".into());
    }
    if request.continuum {
        modes.push("Continuum mode".into());
    }
    printer.push_block(modes);

    let unit = match input {
        CalcInput::Rms => "K",
        CalcInput::IntTime | CalcInput::ElapsedTime => "s",
    };
    printer.push_line(format!("Requested {input}: {value} {unit}").into());
    printer.display();
}

fn print_result(result: &CalculationResult) {
    let extra = &result.extra;
    let mut printer = InfoPrinter::new("Results".into());

    let mut temperatures = vec![
        format!("T_rx: {:.1} K", extra.t_rx).into(),
        format!("T_sys: {:.1} K", extra.t_sys).into(),
        format!("tau: {:.4} (transmission {:.4})", extra.tau, extra.eta_sky).into(),
    ];
    if let (Some(sideband), Some(if_freq), Some(lo_freq)) =
        (extra.sideband, extra.if_freq, extra.lo_freq)
    {
        temperatures.push(
            format!(
                "{} sideband, IF {if_freq} GHz, LO {lo_freq:.3} GHz",
                sideband.to_string().to_uppercase()
            )
            .into(),
        );
    }
    printer.push_block(temperatures);

    for (i, pass) in extra.passes.iter().enumerate() {
        printer.push_block(vec![
            format!(
                "Scan direction {}: {} points x {} rows, dy {:.2}\", multiscan {:.4}",
                i + 1,
                pass.n_points,
                pass.n_rows,
                pass.dy,
                pass.multiscan
            )
            .into(),
            format!(
                "Integration time {:.3} s, elapsed time {:.1} s, RMS {:.4} K",
                pass.int_time, pass.elapsed_time, pass.rms
            )
            .into(),
        ]);
    }
    if let Some(fraction) = extra.basket_weave_fraction {
        printer.push_line(format!("Fraction of time in the first direction: {fraction:.5}").into());
    }
    if let Some(n_shared) = extra.n_shared {
        printer.push_line(format!("Points per reference: {n_shared}").into());
    }

    printer.push_block(vec![
        format!("Integration time per point: {:.3} s", extra.int_time).into(),
        format!(
            "Elapsed time: {:.1} s ({:.2} h)",
            extra.elapsed_time,
            extra.elapsed_time / 3600.0
        )
        .into(),
        format!("RMS: {:.4} K", extra.rms).into(),
    ]);
    printer.display();
}

#[derive(Error, Debug)]
pub(super) enum CalcArgsError {
    #[error("No value was supplied for --{0}")]
    Missing(&'static str),

    #[error("Nothing to calculate; supply one of --rms, --int-time or --elapsed-time")]
    NoInput,

    #[error("Only one of --rms, --int-time or --elapsed-time may be supplied")]
    MultipleInputs,

    #[error("Unrecognised map mode '{0}'. Supported modes: {}", *MAP_MODES_COMMA_SEPARATED)]
    BadMapMode(String),

    #[error("Unrecognised switching mode '{0}'. Supported modes: {}", *SWITCH_MODES_COMMA_SEPARATED)]
    BadSwitchMode(String),

    #[error("Unrecognised sideband '{0}'. Supported sidebands: {}", *SIDEBANDS_COMMA_SEPARATED)]
    BadSideband(String),

    #[error("The {receiver} receiver is not an array and has no {option}")]
    NotAnArray {
        receiver: String,
        option: &'static str,
    },

    #[error("The {receiver} receiver has no jiggle pattern '{pattern}'. Available patterns: {available}")]
    UnknownJigglePattern {
        pattern: String,
        receiver: String,
        available: String,
    },

    #[error("The {receiver} receiver has no scan spacing '{preset}'. Available scan spacings: {available}")]
    UnknownScanSpacing {
        preset: String,
        receiver: String,
        available: String,
    },

    #[error("Output file '{}' doesn't have a recognised file extension! Valid extensions are: {}", .0.display(), *ARG_FILE_TYPES_COMMA_SEPARATED)]
    BadOutputType(PathBuf),

    #[error(transparent)]
    Receiver(ReceiverError),
}
