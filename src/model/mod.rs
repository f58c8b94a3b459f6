pub mod types;
pub mod cigar;
pub mod resolve;
pub mod transcript;

pub use types::{GenomicCoord, GenomicPosition, TranscriptCoord};
pub use cigar::{expand, is_valid_cigar, Cigar, CigarError, CigarOp, CigarRun};
pub use resolve::{alignment_end, resolve, resolve_expanded};
pub use transcript::TranscriptRecord;
