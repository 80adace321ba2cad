/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use crate::Error;
use crate::split::split;

/// How the input file is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Decide from the input path: `.json` files are `Json`, the rest `Pem`.
    Auto,
    /// One blob of concatenated PEM certificates.
    Pem,
    /// A `TrustedCertificates` document.
    Json,
}

impl Format {
    pub fn resolve(self, path: &Path) -> Format {
        match self {
            Format::Auto => {
                let is_json = path.extension()
                    .and_then(|ext| ext.to_str())
                    .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
                if is_json { Format::Json } else { Format::Pem }
            }
            other => other,
        }
    }
}

impl FromStr for Format {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "auto" => Ok(Format::Auto),
            "pem" => Ok(Format::Pem),
            "json" => Ok(Format::Json),
            _ => Err(format!("unknown input format {:?} (expected auto, pem or json)", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrustedCertificates {
    pub trusted_ca_certificates: Vec<String>,
}

/// The PEM blobs held by `data`, in order.  `format` must already be
/// resolved; `Auto` is read as PEM.
pub fn blobs(data: &[u8], format: Format) -> Result<Vec<String>, Error> {
    match format {
        Format::Json => {
            let doc: TrustedCertificates = serde_json::from_slice(data)?;
            debug!("document lists {} blob(s)", doc.trusted_ca_certificates.len());
            Ok(doc.trusted_ca_certificates)
        }
        Format::Pem | Format::Auto => Ok(vec![String::from_utf8_lossy(data).into_owned()]),
    }
}

/// Every certificate in `blobs`: the first blob's, then the second's, and
/// so on.
pub fn records<S: AsRef<str>>(blobs: &[S]) -> Vec<String> {
    blobs.iter().flat_map(|blob| split(blob.as_ref())).collect()
}
