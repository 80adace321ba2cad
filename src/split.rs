/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use nom::{slice_to_offsets, IResult};

pub const BEGIN_CERTIFICATE: &'static str = "-----BEGIN CERTIFICATE-----";
pub const END_CERTIFICATE: &'static str = "-----END CERTIFICATE-----";

named!(until_begin, take_until!(BEGIN_CERTIFICATE));
named!(until_end, take_until!(END_CERTIFICATE));

// Byte offset of the first `marker` match in `text`, as found by one of the
// `take_until!` parsers above.  Both markers are ASCII, so the offset is
// always a char boundary of `text`.
fn marker_offset<P>(parser: P, text: &str) -> Option<usize>
    where P: for<'a> Fn(&'a [u8]) -> IResult<&'a [u8], &'a [u8]>
{
    let buf = text.as_bytes();
    match parser(buf) {
        IResult::Done(rest, _) => {
            let (seen, _) = slice_to_offsets(buf, rest);
            Some(seen)
        }
        // Error or Incomplete: the marker isn't in there.
        _ => None,
    }
}

/// Pieces of a blob cut immediately after each `END CERTIFICATE` marker.
///
/// The marker stays at the end of the chunk it terminates.  Whatever follows
/// the last marker comes out as one final chunk, which may be empty; so `""`
/// yields exactly one (empty) chunk.
pub struct Chunks<'a> {
    rest: &'a str,
    done: bool,
}

impl<'a> Chunks<'a> {
    pub fn new(raw: &'a str) -> Self {
        Chunks {
            rest: raw,
            done: false,
        }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;
    fn next(&mut self) -> Option<&'a str> {
        if self.done {
            return None;
        }
        match marker_offset(until_end, self.rest) {
            Some(at) => {
                let (chunk, rest) = self.rest.split_at(at + END_CERTIFICATE.len());
                self.rest = rest;
                Some(chunk)
            }
            None => {
                self.done = true;
                Some(self.rest)
            }
        }
    }
}

/// The certificate in one chunk: everything from its first `BEGIN
/// CERTIFICATE` marker to the end of the chunk.
///
/// Chunks not terminated by `END CERTIFICATE` (only ever the final one)
/// hold at most a dangling fragment and produce nothing.
pub fn certificate_in(chunk: &str) -> Option<&str> {
    if !chunk.ends_with(END_CERTIFICATE) {
        return None;
    }
    marker_offset(until_begin, chunk).map(|at| &chunk[at..])
}

/// Single-certificate PEM blocks of a blob, in the order they appear,
/// borrowed from the input and without a trailing newline.
pub struct Records<'a> {
    chunks: Chunks<'a>,
}

impl<'a> Records<'a> {
    pub fn new(raw: &'a str) -> Self {
        Records { chunks: Chunks::new(raw) }
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = &'a str;
    fn next(&mut self) -> Option<&'a str> {
        loop {
            let chunk = self.chunks.next()?;
            if let Some(cert) = certificate_in(chunk) {
                return Some(cert);
            }
        }
    }
}

/// Splits `raw` into individual PEM certificates, each ending in exactly one
/// newline.
///
/// Text around and between the certificates is dropped, as is any `BEGIN`
/// marker that never gets a matching `END`.  This never fails; input with
/// no complete certificate just yields nothing.
pub fn split(raw: &str) -> Vec<String> {
    Records::new(raw).map(|cert| format!("{}\n", cert)).collect()
}
