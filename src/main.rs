//! CLI binary for Suunto CSV
//!
//! Wires the libdivecomputer backend into the library's command-line front end.

use anyhow::{Context, Result};
use std::io;
use suunto_csv::backend::libdivecomputer::Libdivecomputer;
use suunto_csv::cli;
use suunto_csv::ExportOptions;

fn main() -> Result<()> {
    let args = match cli::parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => e.exit(),
    };

    cli::init_logging(args.debug);

    let library = Libdivecomputer::new().context("Failed to set up libdivecomputer")?;
    let options = ExportOptions::default();

    let code = cli::execute(
        &library,
        &args,
        &options,
        &mut io::stdout(),
        &mut io::stderr(),
    );
    drop(library);

    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}
