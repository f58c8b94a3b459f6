//! Line-oriented TSV input and output.
//!
//! Both input formats share the same line handling:
//! - every physical line is a record; blank lines are column-count errors
//!   and lines starting with '#' are parsed like any other
//! - trailing '\n' / '\r' are removed
//! - fields are split on '\t' and trimmed
//!
//! Paths ending in `.gz` are decompressed on the fly.

pub mod query;
pub mod table;
pub mod writer;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;

use crate::error::{Error, Result};

pub use query::{parse_query_line, QueryReader};
pub use table::{parse_transcript_line, TranscriptReader};
pub use writer::ResultWriter;

/// Open `path` as buffered text, gunzipping when the extension is `.gz`.
pub fn open_bufread(path: impl AsRef<Path>) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();

    let is_gz = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);

    let f = File::open(path).map_err(|e| Error::io(path, e))?;

    if is_gz {
        Ok(Box::new(BufReader::new(GzDecoder::new(f))))
    } else {
        Ok(Box::new(BufReader::new(f)))
    }
}

/// Streams every line of a reader together with its 1-based line number.
pub struct LineReader<R: BufRead> {
    reader: R,
    buf: String,
    line: usize,
    source: PathBuf,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line: 0,
            source: PathBuf::from("<reader>"),
        }
    }

    /// Name used for the input in I/O errors.
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = source.into();
        self
    }

    pub fn next_line(&mut self) -> Option<Result<(usize, &str)>> {
        self.buf.clear();
        match self.reader.read_line(&mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line += 1;
                let line = self.buf.trim_end_matches(&['\n', '\r'][..]);
                Some(Ok((self.line, line)))
            }
            Err(e) => Some(Err(Error::io(self.source.clone(), e))),
        }
    }
}

/// Split a TSV line into exactly `expected` trimmed fields.
pub fn split_fields(line: &str, line_no: usize, expected: usize) -> Result<Vec<&str>> {
    let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
    if fields.len() != expected {
        return Err(Error::Format {
            line: line_no,
            expected,
            found: fields.len(),
        });
    }
    Ok(fields)
}
