use std::path::PathBuf;

use thiserror::Error;

use crate::model::cigar::CigarError;
use crate::model::types::{GenomicCoord, TranscriptCoord};

/// Everything that can abort a mapping run.
///
/// Line numbers are 1-based and refer to the physical line in the input
/// file.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error while reading '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: expected {expected} tab-separated columns, found {found}")]
    Format {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: '{value}' is not a valid coordinate")]
    BadCoordinate { line: usize, value: String },

    #[error("line {line}: invalid CIGAR '{cigar}': {source}")]
    InvalidEncoding {
        line: usize,
        cigar: String,
        #[source]
        source: CigarError,
    },

    #[error("line {line}: transcript '{id}' is not unique (first seen on line {first_line})")]
    DuplicateKey {
        id: String,
        line: usize,
        first_line: usize,
    },

    #[error("query coordinate {coord} is outside of the transcript (length {transcript_len})")]
    Range {
        coord: TranscriptCoord,
        transcript_len: u64,
    },

    #[error("transcript '{id}' not found in transcript table")]
    Lookup { id: String },

    #[error("alignment at {start} spanning {span} bases overflows genomic coordinates")]
    GenomicOverflow { start: GenomicCoord, span: u64 },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
