use crate::error::Result;
use crate::model::cigar::Cigar;
use crate::model::resolve::{alignment_end, resolve};
use crate::model::types::{GenomicCoord, GenomicPosition, TranscriptCoord};

/// One row of the transcript table: where a transcript starts on the genome
/// and how it aligns there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptRecord {
    pub id: String,
    pub chrom: String,
    /// 1-based genomic position of the first aligned base.
    pub start: GenomicCoord,
    pub cigar: Cigar,
}

impl TranscriptRecord {
    pub fn new(
        id: impl Into<String>,
        chrom: impl Into<String>,
        start: GenomicCoord,
        cigar: Cigar,
    ) -> Self {
        Self {
            id: id.into(),
            chrom: chrom.into(),
            start,
            cigar,
        }
    }

    pub fn transcript_len(&self) -> u64 {
        self.cigar.transcript_len()
    }

    /// Last genomic position covered by the alignment (inclusive).
    ///
    /// Equals `start - 1` for an insertion-only alignment, `None` when the
    /// alignment runs off either end of the coordinate range.
    pub fn genomic_end(&self) -> Option<GenomicCoord> {
        alignment_end(self.start, &self.cigar)
    }

    /// Project a 0-based transcript coordinate onto this record's chromosome.
    pub fn genomic_position(&self, coord: TranscriptCoord) -> Result<GenomicPosition> {
        resolve(coord, &self.cigar, self.start)
    }
}
