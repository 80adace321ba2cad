/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::io::{self, Write};

use crate::Error;

/// Where diagnostics go.  `main` makes one over stderr and hands it to
/// whatever has something to say.
pub struct Report<W: Write> {
    out: W,
}

impl Report<io::Stderr> {
    pub fn stderr() -> Self {
        Report::new(io::stderr())
    }
}

impl<W: Write> Report<W> {
    pub fn new(out: W) -> Self {
        Report { out: out }
    }

    // Failing to report is not itself reportable.
    fn line(&mut self, args: ::std::fmt::Arguments) {
        let _ = self.out.write_fmt(args).and_then(|()| self.out.write_all(b"\n"));
    }

    pub fn error(&mut self, err: &Error) {
        self.line(format_args!("{}", err));
    }

    pub fn usage(&mut self, program: &str) {
        self.line(format_args!(""));
        self.line(format_args!("Usage: {} TRUSTED_CERTS_FILE DESTINATION_DIRECTORY", program));
    }

    /// Reports an error that ends the run, with usage text when the error
    /// is about the invocation itself.
    pub fn fatal(&mut self, err: &Error, program: &str) {
        self.error(err);
        if err.is_usage() {
            self.usage(program);
        }
        let _ = self.out.flush();
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
