//! Transcript -> genome coordinate projection.
//!
//! Both walks start one position before the first base on each axis
//! (`genomic_start - 1`, transcript `-1`) and stop as soon as the transcript
//! cursor reaches the queried coordinate:
//! - `M` advances both cursors
//! - `D` advances only the genomic cursor
//! - `I` advances only the transcript cursor; landing on the query inside an
//!   insertion yields [`GenomicPosition::NotApplicable`]

use crate::error::{Error, Result};
use crate::model::cigar::{expand, Cigar, CigarOp};
use crate::model::types::{GenomicCoord, GenomicPosition, TranscriptCoord};

fn check_range(coord: TranscriptCoord, cigar: &Cigar) -> Result<()> {
    if coord >= cigar.transcript_len() {
        return Err(Error::Range {
            coord,
            transcript_len: cigar.transcript_len(),
        });
    }
    Ok(())
}

/// Last genomic position covered by an alignment starting at `genomic_start`,
/// or `None` if some covered position does not fit in a [`GenomicCoord`].
pub fn alignment_end(genomic_start: GenomicCoord, cigar: &Cigar) -> Option<GenomicCoord> {
    let span = GenomicCoord::try_from(cigar.genomic_span()).ok()?;
    genomic_start.checked_sub(1)?.checked_add(span)
}

/// Genomic cursor before the first base. Every position the walks reach lies
/// between this and [`alignment_end`], so once both fit the walks cannot
/// overflow.
fn genomic_origin(genomic_start: GenomicCoord, cigar: &Cigar) -> Result<GenomicCoord> {
    match alignment_end(genomic_start, cigar) {
        Some(_) => Ok(genomic_start - 1),
        None => Err(Error::GenomicOverflow {
            start: genomic_start,
            span: cigar.genomic_span(),
        }),
    }
}

/// Genomic position of the 0-based transcript coordinate `coord`.
///
/// Walks the runs directly, advancing a whole run (or the part of it up to
/// the query) at a time. O(runs) time, no allocation.
///
/// # Example
/// ```
/// use cigar_coords::{resolve, Cigar, GenomicPosition};
///
/// let cigar: Cigar = "3M2D1I1M1I2M".parse().unwrap();
/// assert_eq!(resolve(4, &cigar, 2).unwrap(), GenomicPosition::Mapped(7));
/// assert_eq!(resolve(3, &cigar, 2).unwrap(), GenomicPosition::NotApplicable);
/// assert!(resolve(8, &cigar, 2).is_err());
/// ```
pub fn resolve(
    coord: TranscriptCoord,
    cigar: &Cigar,
    genomic_start: GenomicCoord,
) -> Result<GenomicPosition> {
    check_range(coord, cigar)?;

    let mut genomic = genomic_origin(genomic_start, cigar)?;
    // transcript positions walked so far (transcript cursor + 1)
    let mut walked: u64 = 0;

    for run in cigar.runs() {
        if walked > coord {
            break;
        }
        let len = u64::from(run.len);

        match run.op {
            CigarOp::Match => {
                let step = len.min(coord + 1 - walked);
                walked += step;
                genomic += step as GenomicCoord;
            }
            CigarOp::Deletion => {
                genomic += GenomicCoord::from(run.len);
            }
            CigarOp::Insertion => {
                if coord < walked + len {
                    return Ok(GenomicPosition::NotApplicable);
                }
                walked += len;
            }
        }
    }

    Ok(GenomicPosition::Mapped(genomic))
}

/// Same projection as [`resolve`], one expanded position at a time.
///
/// Materialises the alignment with [`expand`] first; O(alignment length)
/// time and space.
pub fn resolve_expanded(
    coord: TranscriptCoord,
    cigar: &Cigar,
    genomic_start: GenomicCoord,
) -> Result<GenomicPosition> {
    let expanded = expand(cigar);

    let transcript_len = expanded.iter().filter(|op| **op != CigarOp::Deletion).count() as u64;
    if coord >= transcript_len {
        return Err(Error::Range {
            coord,
            transcript_len,
        });
    }

    let target = coord as i64;
    let mut genomic = genomic_origin(genomic_start, cigar)?;
    let mut transcript: i64 = -1;

    for op in expanded {
        if transcript >= target {
            break;
        }
        match op {
            CigarOp::Match => {
                transcript += 1;
                genomic += 1;
            }
            CigarOp::Deletion => genomic += 1,
            CigarOp::Insertion => {
                transcript += 1;
                if transcript == target {
                    return Ok(GenomicPosition::NotApplicable);
                }
            }
        }
    }

    Ok(GenomicPosition::Mapped(genomic))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use super::GenomicPosition::{Mapped, NotApplicable};

    const TR1: &str = "8M7D6M2I2M11D7M";
    const INDELS: &str = "3M2D1I1M1I2M";

    #[rstest]
    #[case(0, "10M", 3, Mapped(3))]
    #[case(0, "10M", 0, Mapped(0))]
    #[case(4, TR1, 3, Mapped(7))]
    #[case(13, TR1, 3, Mapped(23))]
    #[case(19, TR1, 3, Mapped(38))]
    #[case(4, TR1, 0, Mapped(4))]
    #[case(8, TR1, 0, Mapped(15))]
    // first insertion, then the bases on either side of it
    #[case(3, INDELS, 2, NotApplicable)]
    #[case(2, INDELS, 2, Mapped(4))]
    #[case(4, INDELS, 2, Mapped(7))]
    #[case(5, INDELS, 2, NotApplicable)]
    #[case(6, INDELS, 2, Mapped(8))]
    #[case(7, INDELS, 2, Mapped(9))]
    #[case(0, "3I", 2, NotApplicable)]
    #[case(1, "3I", 2, NotApplicable)]
    #[case(2, "3I", 2, NotApplicable)]
    // leading deletions are skipped before the first transcript base
    #[case(0, "2D3M", 10, Mapped(12))]
    #[case(0, "2I1M", 10, NotApplicable)]
    #[case(2, "2I1M", 10, Mapped(10))]
    fn projects_transcript_coordinates(
        #[case] coord: TranscriptCoord,
        #[case] cigar: &str,
        #[case] start: GenomicCoord,
        #[case] expected: GenomicPosition,
    ) {
        let cigar: Cigar = cigar.parse().unwrap();
        assert_eq!(resolve(coord, &cigar, start).unwrap(), expected);
        assert_eq!(resolve_expanded(coord, &cigar, start).unwrap(), expected);
    }

    #[rstest]
    #[case(8, INDELS)]
    #[case(100, INDELS)]
    #[case(3, "3I")]
    #[case(25, TR1)]
    #[case(1, "1M5D")]
    fn out_of_range_coordinates_fail(#[case] coord: TranscriptCoord, #[case] cigar: &str) {
        let cigar: Cigar = cigar.parse().unwrap();

        for result in [resolve(coord, &cigar, 2), resolve_expanded(coord, &cigar, 2)] {
            match result {
                Err(Error::Range { coord: c, transcript_len }) => {
                    assert_eq!(c, coord);
                    assert_eq!(transcript_len, cigar.transcript_len());
                }
                other => panic!("expected a range error, got {other:?}"),
            }
        }
    }

    #[test]
    fn last_base_before_trailing_deletion() {
        let cigar: Cigar = "1M5D".parse().unwrap();
        assert_eq!(resolve(0, &cigar, 1).unwrap(), Mapped(1));
        assert_eq!(resolve_expanded(0, &cigar, 1).unwrap(), Mapped(1));
    }

    #[test]
    fn extreme_starts_fail_instead_of_wrapping() {
        let one: Cigar = "1M".parse().unwrap();
        let two: Cigar = "2M".parse().unwrap();

        for (cigar, start) in [(&one, i64::MIN), (&two, i64::MAX)] {
            for result in [resolve(0, cigar, start), resolve_expanded(0, cigar, start)] {
                assert!(
                    matches!(result, Err(Error::GenomicOverflow { start: s, .. }) if s == start),
                    "start {start}: {result:?}"
                );
            }
        }

        assert_eq!(resolve(0, &one, i64::MAX).unwrap(), Mapped(i64::MAX));
        assert_eq!(resolve(0, &one, i64::MIN + 1).unwrap(), Mapped(i64::MIN + 1));
        assert_eq!(resolve_expanded(0, &one, i64::MAX).unwrap(), Mapped(i64::MAX));
    }

    #[test]
    fn alignment_end_covers_the_genomic_span() {
        let tr1: Cigar = TR1.parse().unwrap();
        assert_eq!(alignment_end(3, &tr1), Some(43));
        assert_eq!(alignment_end(10, &"3I".parse().unwrap()), Some(9));
        assert_eq!(alignment_end(i64::MIN, &tr1), None);
        assert_eq!(alignment_end(i64::MAX - 40, &tr1), Some(i64::MAX));
        assert_eq!(alignment_end(i64::MAX - 39, &tr1), None);
    }

    #[test]
    fn every_coordinate_agrees_between_walks() {
        for cigar in [TR1, INDELS, "3I", "1D1I1D", "5M", "2I3D2M1I"] {
            let cigar: Cigar = cigar.parse().unwrap();
            for coord in 0..cigar.transcript_len() {
                assert_eq!(
                    resolve(coord, &cigar, 100).unwrap(),
                    resolve_expanded(coord, &cigar, 100).unwrap(),
                    "cigar {cigar}, coord {coord}"
                );
            }
        }
    }
}
