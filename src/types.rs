use std::fmt;

use crate::model::types::{GenomicPosition, TranscriptCoord};

/// A request to map one transcript coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    pub transcript_id: String,
    /// 0-based offset into the transcript.
    pub coord: TranscriptCoord,
}

impl Query {
    pub fn new(transcript_id: impl Into<String>, coord: TranscriptCoord) -> Self {
        Self {
            transcript_id: transcript_id.into(),
            coord,
        }
    }
}

/// A resolved query; one row of the output table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    pub transcript_id: String,
    pub coord: TranscriptCoord,
    pub chrom: String,
    pub position: GenomicPosition,
}

/// Tab-separated, without a line terminator:
/// `transcript_id  coord  chrom  position|NA`
impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.transcript_id, self.coord, self.chrom, self.position
        )
    }
}
