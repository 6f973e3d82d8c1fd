#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Line-oriented readers for plain and gzip-compressed text files.
//!
//! Annotation pipelines routinely ship `.gtf.gz` / `.gff3.gz` files, often
//! bgzip-compressed. Both kinds decode through [`MultiGzDecoder`], which
//! keeps reading past gzip member boundaries.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use tracing::debug;

/// Returns `true` when the path names a gzip file (`.gz`, any case).
#[must_use]
pub fn is_gzip(path: &Path) -> bool {
    path.to_string_lossy().to_ascii_lowercase().ends_with(".gz")
}

/// Open `path` and stream its decoded lines.
///
/// Open failures are returned to the caller; an unreadable file never
/// degrades into an empty line sequence.
pub fn open_lines(path: &Path) -> io::Result<LineReader> {
    let file = File::open(path)?;
    let inner: Box<dyn BufRead + Send> = if is_gzip(path) {
        debug!("Opening {} as gzip", path.display());
        Box::new(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        debug!("Opening {} as plain text", path.display());
        Box::new(BufReader::new(file))
    };
    Ok(LineReader::new(inner))
}

/// Iterator over the raw lines of a buffered reader.
///
/// Only the terminating `\n` is removed. A `\r` from CRLF files stays on the
/// line, and bytes are not required to be UTF-8.
pub struct LineReader {
    inner: Box<dyn BufRead + Send>,
    line_number: usize,
}

impl LineReader {
    #[must_use]
    pub fn new(inner: Box<dyn BufRead + Send>) -> Self {
        Self {
            inner,
            line_number: 0,
        }
    }

    /// Number of lines yielded so far.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        self.line_number
    }
}

impl Iterator for LineReader {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = Vec::new();
        match self.inner.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                }
                self.line_number += 1;
                Some(Ok(buf))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
