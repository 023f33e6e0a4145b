//! Dump and restore MIFARE Ultralight-family tags through libnfc.
//!
//! The selected byte range of the tag memory goes to stdout; diagnostics
//! go to stderr when `-d` is given.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;

use libmfu::cli::{self, Args, StdinConfirm};
use libmfu::driver::LibnfcDriver;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    let driver = LibnfcDriver::open(None).context("error opening NFC device")?;
    let mut stdout = io::stdout().lock();
    cli::run(&args, driver, &mut stdout, &mut StdinConfirm)?;
    Ok(())
}
