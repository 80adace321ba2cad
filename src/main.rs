/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use certsplitter::{run, Config, Error, Format, Report, DEFAULT_PREFIX};

/// Splits a bundle of trusted CA certificates into one PEM file per
/// certificate.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// PEM bundle, or JSON document with a `trusted_ca_certificates` list
    #[arg(value_name = "TRUSTED_CERTS_FILE")]
    input: Option<PathBuf>,

    /// Existing directory to write the certificates into
    #[arg(value_name = "DESTINATION_DIRECTORY")]
    destination: Option<PathBuf>,

    /// How to read the input; `auto` picks `json` for `.json` files
    #[arg(short, long, default_value = "auto")]
    format: Format,

    /// File name prefix of the written certificates
    #[arg(short, long, default_value = DEFAULT_PREFIX)]
    prefix: String,

    /// Log progress to stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn into_config(self) -> Result<Config, Error> {
        let input = self.input.ok_or(Error::MissingInput)?;
        let destination = self.destination.ok_or(Error::MissingDestination)?;
        let mut config = Config::new(input, destination);
        config.format = self.format;
        config.prefix = self.prefix;
        Ok(config)
    }

    fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_ref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_owned())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let subscriber = FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_max_level(args.log_level())
        .with_target(false)
        .finish();
    let mut report = Report::stderr();

    let result = tracing::subscriber::with_default(subscriber, || -> Result<Vec<PathBuf>, Error> {
        let config = args.into_config()?;
        run(&config)
    });

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            report.fatal(&err, &program_name());
            ExitCode::FAILURE
        }
    }
}
