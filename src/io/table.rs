use std::io::BufRead;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::io::{split_fields, LineReader};
use crate::model::cigar::Cigar;
use crate::model::resolve::alignment_end;
use crate::model::transcript::TranscriptRecord;
use crate::model::types::GenomicCoord;

const TRANSCRIPT_COLUMNS: usize = 4;

/// Streaming parser for the transcript table
/// (`transcript_id  chrom  start  cigar`).
///
/// Most callers should use [`crate::TranscriptTable::from_path`], which also
/// rejects duplicate identifiers.
///
/// # Example
/// ```
/// use std::io::Cursor;
/// use cigar_coords::io::TranscriptReader;
///
/// let data = "TR1\tCHR1\t3\t8M7D6M2I2M11D7M\nTR2\tCHR2\t10\t20M\n";
/// let recs: Vec<_> = TranscriptReader::new(Cursor::new(data))
///     .records()
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// assert_eq!(recs.len(), 2);
/// assert_eq!(recs[1].1.chrom, "CHR2");
/// ```
pub struct TranscriptReader<R: BufRead> {
    lines: LineReader<R>,
}

impl<R: BufRead> TranscriptReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: LineReader::new(reader),
        }
    }

    pub fn with_source(self, source: impl Into<PathBuf>) -> Self {
        Self {
            lines: self.lines.with_source(source),
        }
    }

    /// Parsed records paired with their 1-based line numbers.
    pub fn records(mut self) -> impl Iterator<Item = Result<(usize, TranscriptRecord)>> {
        std::iter::from_fn(move || {
            let next = self.lines.next_line()?;
            Some(next.and_then(|(line_no, line)| {
                parse_transcript_line(line, line_no).map(|rec| (line_no, rec))
            }))
        })
    }
}

/// Parse one transcript table line.
pub fn parse_transcript_line(line: &str, line_no: usize) -> Result<TranscriptRecord> {
    let fields = split_fields(line, line_no, TRANSCRIPT_COLUMNS)?;
    let (id, chrom, start_s, cigar_s) = (fields[0], fields[1], fields[2], fields[3]);

    let bad_start = || Error::BadCoordinate {
        line: line_no,
        value: start_s.to_string(),
    };
    let start: GenomicCoord = start_s.parse().map_err(|_| bad_start())?;

    let cigar: Cigar = cigar_s.parse().map_err(|source| Error::InvalidEncoding {
        line: line_no,
        cigar: cigar_s.to_string(),
        source,
    })?;

    // every position the alignment covers must fit in a GenomicCoord
    if alignment_end(start, &cigar).is_none() {
        return Err(bad_start());
    }

    Ok(TranscriptRecord::new(id, chrom, start, cigar))
}
