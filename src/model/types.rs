use std::fmt;

/// 0-based offset into a transcript (deletions are not transcript positions).
pub type TranscriptCoord = u64;

/// 1-based position on a chromosome.
///
/// Signed because a start of 0 is accepted and the walk begins one position
/// before the start.
pub type GenomicCoord = i64;

/// Result of projecting a transcript coordinate onto the genome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenomicPosition {
    /// The transcript base aligns to this genomic base.
    Mapped(GenomicCoord),

    /// The transcript base sits inside an insertion and has no genomic counterpart.
    NotApplicable,
}

impl GenomicPosition {
    pub fn coord(self) -> Option<GenomicCoord> {
        match self {
            GenomicPosition::Mapped(pos) => Some(pos),
            GenomicPosition::NotApplicable => None,
        }
    }

    #[inline]
    pub fn is_mapped(self) -> bool {
        matches!(self, GenomicPosition::Mapped(_))
    }
}

impl fmt::Display for GenomicPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenomicPosition::Mapped(pos) => write!(f, "{pos}"),
            GenomicPosition::NotApplicable => write!(f, "NA"),
        }
    }
}

impl From<GenomicCoord> for GenomicPosition {
    fn from(pos: GenomicCoord) -> Self {
        GenomicPosition::Mapped(pos)
    }
}
