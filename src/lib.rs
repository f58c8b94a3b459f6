//! cigar_coords
//!
//! Map 0-based transcript coordinates to 1-based genomic positions through
//! M/I/D CIGAR alignments. A transcript coordinate that falls inside an
//! insertion has no genomic counterpart and maps to `NA`.

pub mod error;
pub mod types;
pub mod model;
pub mod io;
pub mod table;
pub mod driver;

pub use error::Error;

pub use table::TranscriptTable;
pub use driver::{QueryJob, RunSummary};

pub use types::{Query, QueryResult};

pub use model::transcript::TranscriptRecord;
pub use model::types::{GenomicCoord, GenomicPosition, TranscriptCoord};

// Re-export the CIGAR core at crate root.
pub use model::{
    alignment_end, expand, is_valid_cigar, resolve, resolve_expanded, Cigar, CigarError, CigarOp,
    CigarRun,
};
