//! Command-line front end
//!
//! Parsing and dispatch are kept apart from `main` so the whole CLI can be
//! driven against the mock backend.

use crate::backend::DiveComputerLibrary;
use crate::config::ExportOptions;
use crate::exporter::export_model;
use crate::resolver::supported_models;
use clap::{Arg, ArgAction, Command};
use log::warn;
use std::ffi::OsString;
use std::io::{self, Write};

const PROGRAM: &str = "suunto_csv";

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Print the usage text and the model list
    Usage,
    /// Export every dive of this model
    Export { model: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub invocation: Invocation,
    pub debug: bool,
}

pub fn build_command() -> Command {
    Command::new(PROGRAM)
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(concat!(
            env!("CARGO_PKG_VERSION"),
            " (",
            env!("VERGEN_GIT_SHA"),
            ")"
        ))
        .about("Dump the dives stored on a dive computer into CSV files, one file per dive.")
        .disable_help_flag(true)
        .arg(
            Arg::new("model")
                .help("Dive computer model, e.g. D4i. If given more than once, the last one is used")
                .required(false)
                .num_args(1..)
                .action(ArgAction::Append)
                .index(1),
        )
        .arg(
            Arg::new("help")
                .short('h')
                .long("help")
                .help("Print usage and the supported models")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output, including libdivecomputer's own log")
                .action(ArgAction::SetTrue),
        )
}

pub fn parse_args<I, T>(args: I) -> Result<CliArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    // Help wins over everything else on the line, malformed flags included
    let flags: Vec<&OsString> = args
        .iter()
        .skip(1)
        .take_while(|arg| *arg != "--")
        .collect();
    if flags.iter().any(|arg| *arg == "-h" || *arg == "--help") {
        return Ok(CliArgs {
            invocation: Invocation::Usage,
            debug: flags.iter().any(|arg| *arg == "--debug"),
        });
    }

    let matches = build_command().try_get_matches_from(args)?;

    let debug = matches.get_flag("debug");
    let model = matches
        .get_many::<String>("model")
        .and_then(|models| models.last().cloned());

    let invocation = match model {
        Some(model) if !matches.get_flag("help") => Invocation::Export { model },
        _ => Invocation::Usage,
    };

    Ok(CliArgs { invocation, debug })
}

/// Install the logger. `RUST_LOG` wins over `--debug`.
pub fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

pub fn write_usage<L: DiveComputerLibrary>(
    library: &L,
    vendor: &str,
    out: &mut dyn Write,
) -> io::Result<()> {
    writeln!(out, "{PROGRAM}: dump dives into csv files")?;
    writeln!(out, "\tOne file per dive labelled for the date:time")?;
    writeln!(out)?;
    writeln!(out, "\tUsage: {PROGRAM} [--debug] [model]")?;
    writeln!(out, "\t       {PROGRAM} -h | --help | -V | --version")?;
    writeln!(out)?;

    let models = match supported_models(library, vendor) {
        Ok(models) => models.join(", "),
        Err(e) => {
            warn!("Cannot list supported models: {e}");
            String::new()
        }
    };
    writeln!(out, "\tSupported Models: {models}")?;
    Ok(())
}

/// Carry out parsed arguments; returns the process exit code
pub fn execute<L: DiveComputerLibrary>(
    library: &L,
    args: &CliArgs,
    options: &ExportOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32 {
    match &args.invocation {
        Invocation::Usage => match write_usage(library, &options.vendor, out) {
            Ok(()) => 0,
            Err(e) => {
                let _ = writeln!(err, "Error: {e}");
                1
            }
        },
        Invocation::Export { model } => match export_model(library, model, options, out, err) {
            Ok(report) => {
                let _ = writeln!(
                    out,
                    "Exported {} of {} dives",
                    report.exported(),
                    report.dives_seen
                );
                0
            }
            Err(e) => {
                let _ = writeln!(err, "Error: {e}");
                1
            }
        },
    }
}

/// Parse `args` and run. Usage errors are rendered the way clap renders
/// them, with clap's exit code.
pub fn run<L, I, T>(
    library: &L,
    args: I,
    options: &ExportOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32
where
    L: DiveComputerLibrary,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match parse_args(args) {
        Ok(args) => execute(library, &args, options, out, err),
        Err(e) => {
            let rendered = e.render();
            let _ = if e.use_stderr() {
                write!(err, "{rendered}")
            } else {
                write!(out, "{rendered}")
            };
            e.exit_code()
        }
    }
}
