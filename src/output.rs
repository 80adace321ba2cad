/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::Error;

/// Writes certificates into a directory as `<prefix>_1.crt`,
/// `<prefix>_2.crt`, ... readable and writable by the owner only.
#[derive(Debug, Clone)]
pub struct CertWriter {
    dir: PathBuf,
    prefix: String,
}

impl CertWriter {
    pub fn new<D: Into<PathBuf>>(dir: D, prefix: &str) -> Self {
        CertWriter {
            dir: dir.into(),
            prefix: prefix.to_owned(),
        }
    }

    /// Path of the `index`th certificate, counting from 1.
    pub fn path_for(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}_{}.crt", self.prefix, index))
    }

    /// Writes `certs` in order, replacing any files already at those paths.
    /// Stops at the first failure; files written before it are left alone.
    pub fn write_all<S: AsRef<str>>(&self, certs: &[S]) -> Result<Vec<PathBuf>, Error> {
        let mut written = Vec::with_capacity(certs.len());
        for (i, cert) in certs.iter().enumerate() {
            let path = self.path_for(i + 1);
            write_cert(&path, cert.as_ref()).map_err(|err| Error::Write(path.clone(), err))?;
            debug!("wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}

fn write_cert(path: &Path, cert: &str) -> std::io::Result<()> {
    let mut file = create_private(path)?;
    file.write_all(cert.as_bytes())?;
    file.flush()
}

#[cfg(unix)]
fn create_private(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    OpenOptions::new().write(true).create(true).truncate(true).mode(0o600).open(path)
}

#[cfg(not(unix))]
fn create_private(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().write(true).create(true).truncate(true).open(path)
}
