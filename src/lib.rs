/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

#[macro_use]
extern crate nom;
#[macro_use]
extern crate quick_error;

pub mod output;
pub mod report;
pub mod source;
pub mod split;

pub use output::CertWriter;
pub use report::Report;
pub use source::{Format, TrustedCertificates};
pub use split::{split, Records};

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{debug, info};

quick_error! {
    #[derive(Debug)]
    pub enum Error {
        MissingInput {
            display("must provide path to trusted certificates file")
        }
        MissingDestination {
            display("must provide path to destination folder")
        }
        Read(path: PathBuf, err: io::Error) {
            display("{}: {}", path.display(), err)
            cause(err)
        }
        Json(err: serde_json::Error) {
            from()
            display("malformed trusted certificates document: {}", err)
            cause(err)
        }
        Write(path: PathBuf, err: io::Error) {
            display("{}: {}", path.display(), err)
            cause(err)
        }
    }
}

impl Error {
    /// Whether this is a complaint about how the program was invoked, as
    /// opposed to a failure while running.
    pub fn is_usage(&self) -> bool {
        match *self {
            Error::MissingInput | Error::MissingDestination => true,
            _ => false,
        }
    }
}

pub const DEFAULT_PREFIX: &'static str = "trusted_ca";

#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub destination: PathBuf,
    pub format: Format,
    pub prefix: String,
}

impl Config {
    pub fn new<I, D>(input: I, destination: D) -> Self
        where I: Into<PathBuf>,
              D: Into<PathBuf>
    {
        Config {
            input: input.into(),
            destination: destination.into(),
            format: Format::Auto,
            prefix: DEFAULT_PREFIX.to_owned(),
        }
    }
}

/// Reads the trusted certificates named by `config` and writes one file per
/// certificate into its destination directory.  Returns the files written,
/// in order.
pub fn run(config: &Config) -> Result<Vec<PathBuf>, Error> {
    let data = fs::read(&config.input).map_err(|err| Error::Read(config.input.clone(), err))?;
    let format = config.format.resolve(&config.input);
    debug!("read {} bytes from {} as {:?}", data.len(), config.input.display(), format);

    let blobs = source::blobs(&data, format)?;
    let certs = source::records(&blobs);
    info!("found {} certificates in {} blob(s)", certs.len(), blobs.len());

    CertWriter::new(&config.destination, &config.prefix[..]).write_all(&certs)
}

#[cfg(test)]
mod tests {
    use super::{run, Config, Error, Format};
    use std::fs;
    use std::io;
    use std::path::PathBuf;

    const CERT: &'static str = "-----BEGIN CERTIFICATE-----\n\
                                MIIBszCCAVmgAwIBAgIUQ2Fub25pY2FsIFJvb3QgQTAKBggqhkjOPQQDAjAaMRgw\n\
                                -----END CERTIFICATE-----\n";

    #[test]
    fn test_usage_errors() {
        assert!(Error::MissingInput.is_usage());
        assert!(Error::MissingDestination.is_usage());
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        assert!(!Error::Read(PathBuf::from("certs.pem"), io_err).is_usage());
        assert_eq!(Error::MissingInput.to_string(),
                   "must provide path to trusted certificates file");
        assert_eq!(Error::MissingDestination.to_string(),
                   "must provide path to destination folder");
    }

    #[test]
    fn test_read_error_names_path() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "No such file or directory");
        let err = Error::Read(PathBuf::from("does-not-exist"), io_err);
        assert_eq!(err.to_string(), "does-not-exist: No such file or directory");
    }

    #[test]
    fn test_run_pem() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bundle.pem");
        let out = dir.path().join("out");
        fs::create_dir(&out).unwrap();
        fs::write(&input, format!("{}{}", CERT, CERT)).unwrap();

        let written = run(&Config::new(&input, &out)).unwrap();
        assert_eq!(written, vec![out.join("trusted_ca_1.crt"), out.join("trusted_ca_2.crt")]);
        for path in &written {
            assert_eq!(fs::read_to_string(path).unwrap(), CERT);
        }
    }

    #[test]
    fn test_run_format() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bundle.txt");
        fs::write(&input, r#"{"trusted_ca_certificates": []}"#).unwrap();

        let mut config = Config::new(&input, dir.path());
        assert_eq!(run(&config).unwrap(), Vec::<PathBuf>::new());

        config.format = Format::Pem;
        assert_eq!(run(&config).unwrap(), Vec::<PathBuf>::new());

        fs::write(&input, "not json").unwrap();
        config.format = Format::Json;
        match run(&config) {
            Err(Error::Json(_)) => (),
            other => panic!("expected a JSON error, got {:?}", other),
        }
    }

    #[test]
    fn test_run_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("nope.pem");
        match run(&Config::new(&input, dir.path())) {
            Err(Error::Read(ref path, ref err)) => {
                assert_eq!(path, &input);
                assert_eq!(err.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected a read error, got {:?}", other),
        }
    }
}
