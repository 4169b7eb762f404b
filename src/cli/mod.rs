// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line interface code. More specific options for `hitec`
//! subcommands are contained in modules.
//!
//! All booleans in arguments that can come from a file must have
//! `#[serde(default)]` annotated, and anything that isn't a boolean must be
//! optional. This allows all arguments to be optional *and* usable in an
//! arguments file.
//!
//! Only 3 things should be public in this module: `Hitec`, `Hitec::run`, and
//! `HitecError`.

#[macro_use]
mod common;
mod calc;
mod error;
mod opacity;
mod receivers;
mod t_sys;

pub use error::HitecError;

use std::path::PathBuf;

use clap::{AppSettings, Args, Parser, Subcommand};
use log::info;

// Add build-time information from the "built" crate.
include!(concat!(env!("OUT_DIR"), "/built.rs"));

#[derive(Debug, Parser)]
#[clap(
    version,
    author,
    about = "Instrument time calculator for heterodyne receivers. Converts between a target RMS noise, an integration time per point and a total elapsed time."
)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
#[clap(disable_help_subcommand = true)]
#[clap(infer_subcommands = true)]
#[clap(propagate_version = true)]
#[clap(infer_long_args = true)]
pub struct Hitec {
    #[clap(flatten)]
    global_opts: GlobalArgs,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// The verbosity of the program. Increase by specifying multiple times
    /// (e.g. -vv). The default is to print only high-level information.
    #[clap(short, long, parse(from_occurrences))]
    #[clap(global = true)]
    verbosity: u8,

    /// Only verify that arguments were correctly ingested and print out
    /// high-level information.
    #[clap(long)]
    #[clap(global = true)]
    dry_run: bool,

    /// Save the input arguments into a new TOML file that can be used to
    /// reproduce this run.
    #[clap(long)]
    #[clap(global = true)]
    save_toml: Option<PathBuf>,

    /// Use receiver definitions from this JSON file rather than the built-in
    /// ones.
    #[clap(long, parse(from_os_str))]
    #[clap(global = true)]
    receiver_info: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
#[clap(arg_required_else_help = true)]
enum Command {
    #[clap(alias = "itc")]
    #[clap(
        about = "Calculate the time needed to reach an RMS, or the RMS reached in a given time."
    )]
    Calc(calc::CalcArgs),

    #[clap(about = "List the available receivers, or describe one.")]
    Receivers(receivers::ReceiversArgs),

    #[clap(about = "Print the system temperature of a receiver, or the receiver temperature implied by a measured system temperature.")]
    TSys(t_sys::TSysArgs),

    #[clap(about = "Print the atmospheric opacity at a frequency, or a tabulated opacity curve.")]
    Opacity(opacity::OpacityArgs),
}

impl Hitec {
    pub fn run(self) -> Result<(), HitecError> {
        // Set up logging.
        let GlobalArgs {
            verbosity,
            dry_run,
            save_toml,
            receiver_info,
        } = self.global_opts;
        setup_logging(verbosity)?;

        // Print the version of hitec and its build-time information.
        let sub_command = match &self.command {
            Command::Calc(_) => "calc",
            Command::Receivers(_) => "receivers",
            Command::TSys(_) => "t-sys",
            Command::Opacity(_) => "opacity",
        };
        info!("hitec {} {}", sub_command, env!("CARGO_PKG_VERSION"));
        display_build_info();

        let catalog = common::load_catalog(receiver_info.as_deref())?;

        macro_rules! merge_save_run {
            ($args:expr) => {{
                let args = $args.merge()?;
                if let Some(toml) = save_toml {
                    use std::{
                        fs::File,
                        io::{BufWriter, Write},
                    };

                    let mut f = BufWriter::new(File::create(&toml)?);
                    let toml_str = toml::to_string(&args)?;
                    f.write_all(toml_str.as_bytes())?;
                    f.flush()?;
                    info!("Arguments saved to {}", toml.display());
                }
                args.run(dry_run, &catalog)?;
            }};
        }

        match self.command {
            Command::Calc(args) => {
                merge_save_run!(args)
            }

            // Catalog utilities.
            Command::Receivers(args) => args.run(&catalog)?,
            Command::TSys(args) => args.run(&catalog)?,
            Command::Opacity(args) => args.run(&catalog)?,
        }

        info!("hitec {} complete.", sub_command);
        Ok(())
    }
}

/// Activate a logger. All log messages are put onto `stdout`. `env_logger`
/// automatically only uses colours and fancy symbols if we're on a tty (e.g. a
/// terminal); piped output will be formatted sensibly. Source code lines are
/// displayed in log messages when verbosity >= 3.
fn setup_logging(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stdout);
    builder.format_target(false);
    match verbosity {
        0 => builder.filter_level(log::LevelFilter::Info),
        1 => builder.filter_level(log::LevelFilter::Debug),
        2 => builder.filter_level(log::LevelFilter::Trace),
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
            builder.format(|buf, record| {
                use std::io::Write;

                let timestamp = buf.timestamp();
                let level = record.level();
                let target = record.target();
                let line = record.line().unwrap_or(0);
                let message = record.args();

                writeln!(buf, "[{timestamp} {level} {target}:{line}] {message}")
            })
        }
    };
    builder.try_init()
}

/// Write many info-level log lines of how this executable was compiled.
fn display_build_info() {
    let dirty = match GIT_DIRTY {
        Some(true) => " (dirty)",
        _ => "",
    };
    match GIT_COMMIT_HASH_SHORT {
        Some(hash) => {
            info!("Compiled on git commit hash: {hash}{dirty}");
        }
        None => info!("Compiled on git commit hash: <no git info>"),
    }
    if let Some(hr) = GIT_HEAD_REF {
        info!("            git head ref: {}", hr);
    }
    info!("            {}", BUILT_TIME_UTC);
    info!("         with compiler {}", RUSTC_VERSION);
    info!("");
}
