use std::io::BufRead;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::io::{split_fields, LineReader};
use crate::model::types::TranscriptCoord;
use crate::types::Query;

const QUERY_COLUMNS: usize = 2;

/// Streaming parser for query files (`transcript_id  coord`).
pub struct QueryReader<R: BufRead> {
    lines: LineReader<R>,
}

impl<R: BufRead> QueryReader<R> {
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

    pub fn queries(mut self) -> impl Iterator<Item = Result<Query>> {
        std::iter::from_fn(move || {
            let next = self.lines.next_line()?;
            Some(next.and_then(|(line_no, line)| parse_query_line(line, line_no)))
        })
    }
}

/// Parse one query line; the coordinate must be a non-negative integer.
pub fn parse_query_line(line: &str, line_no: usize) -> Result<Query> {
    let fields = split_fields(line, line_no, QUERY_COLUMNS)?;

    let coord: TranscriptCoord = fields[1].parse().map_err(|_| Error::BadCoordinate {
        line: line_no,
        value: fields[1].to_string(),
    })?;

    Ok(Query::new(fields[0], coord))
}
