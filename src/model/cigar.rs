//! M/I/D CIGAR strings: validation, parsing and expansion.
//!
//! Grammar: one or more `<length><op>` runs, where `<length>` is a positive
//! decimal integer without leading zeros and `<op>` is one of `M`, `I`, `D`.
//! A CIGAR made only of deletions is rejected: it describes no transcript
//! bases at all.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A single alignment operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CigarOp {
    /// M: one transcript base aligned to one genomic base.
    Match,
    /// I: transcript base with no genomic counterpart.
    Insertion,
    /// D: genomic base with no transcript counterpart.
    Deletion,
}

impl CigarOp {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            b'M' => Some(CigarOp::Match),
            b'I' => Some(CigarOp::Insertion),
            b'D' => Some(CigarOp::Deletion),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            CigarOp::Match => 'M',
            CigarOp::Insertion => 'I',
            CigarOp::Deletion => 'D',
        }
    }

    #[inline]
    pub fn consumes_transcript(self) -> bool {
        matches!(self, CigarOp::Match | CigarOp::Insertion)
    }

    #[inline]
    pub fn consumes_genome(self) -> bool {
        matches!(self, CigarOp::Match | CigarOp::Deletion)
    }
}

impl fmt::Display for CigarOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// `len` consecutive positions sharing one operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CigarRun {
    pub len: u32,
    pub op: CigarOp,
}

impl CigarRun {
    pub fn new(len: u32, op: CigarOp) -> Self {
        Self { len, op }
    }
}

impl fmt::Display for CigarRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.len, self.op)
    }
}

/// Why a string is not a valid M/I/D CIGAR.
///
/// Offsets are byte offsets into the input string, except for errors raised by
/// [`Cigar::from_runs`], where they index the run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CigarError {
    #[error("CIGAR is empty")]
    Empty,

    #[error("missing run length at offset {offset}")]
    MissingLength { offset: usize },

    #[error("run length at offset {offset} has no operator")]
    MissingOp { offset: usize },

    #[error("unsupported operator '{op}' at offset {offset} (only M, I and D are allowed)")]
    UnknownOp { op: char, offset: usize },

    #[error("zero-length run at offset {offset}")]
    ZeroLength { offset: usize },

    #[error("run length at offset {offset} has a leading zero")]
    LeadingZero { offset: usize },

    #[error("run length at offset {offset} is too large")]
    LengthOverflow { offset: usize },

    #[error("CIGAR contains only deletions")]
    OnlyDeletions,
}

/// A validated run-length alignment.
///
/// Can only be built through [`Cigar::from_runs`] or parsing, so every value
/// upholds the grammar: non-empty, every run at least 1 long, at least one
/// run that consumes transcript bases.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cigar {
    runs: Vec<CigarRun>,
    transcript_len: u64,
    genomic_span: u64,
}

impl Cigar {
    pub fn from_runs(runs: Vec<CigarRun>) -> Result<Self, CigarError> {
        if runs.is_empty() {
            return Err(CigarError::Empty);
        }

        let mut transcript_len = 0u64;
        let mut genomic_span = 0u64;
        for (i, run) in runs.iter().enumerate() {
            if run.len == 0 {
                return Err(CigarError::ZeroLength { offset: i });
            }
            if run.op.consumes_transcript() {
                transcript_len += u64::from(run.len);
            }
            if run.op.consumes_genome() {
                genomic_span += u64::from(run.len);
            }
        }

        if transcript_len == 0 {
            return Err(CigarError::OnlyDeletions);
        }

        Ok(Self {
            runs,
            transcript_len,
            genomic_span,
        })
    }

    pub fn runs(&self) -> &[CigarRun] {
        &self.runs
    }

    /// Number of transcript positions (M + I).
    pub fn transcript_len(&self) -> u64 {
        self.transcript_len
    }

    /// Number of genomic positions covered (M + D).
    pub fn genomic_span(&self) -> u64 {
        self.genomic_span
    }
}

impl FromStr for Cigar {
    type Err = CigarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(CigarError::Empty);
        }

        let bytes = s.as_bytes();
        let mut runs = Vec::new();
        let mut i = 0;

        while i < bytes.len() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i == start {
                return Err(CigarError::MissingLength { offset: start });
            }
            if i == bytes.len() {
                return Err(CigarError::MissingOp { offset: start });
            }

            // digits are ASCII, so `i` is on a char boundary
            let Some(op) = CigarOp::from_code(bytes[i]) else {
                let op = s[i..].chars().next().unwrap_or('?');
                return Err(CigarError::UnknownOp { op, offset: i });
            };

            let digits = &s[start..i];
            if digits.starts_with('0') {
                return Err(if digits.len() == 1 {
                    CigarError::ZeroLength { offset: start }
                } else {
                    CigarError::LeadingZero { offset: start }
                });
            }
            let len: u32 = digits
                .parse()
                .map_err(|_| CigarError::LengthOverflow { offset: start })?;

            runs.push(CigarRun::new(len, op));
            i += 1;
        }

        Cigar::from_runs(runs)
    }
}

impl fmt::Display for Cigar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for run in &self.runs {
            write!(f, "{run}")?;
        }
        Ok(())
    }
}

/// True if `s` is a well-formed M/I/D CIGAR with at least one M or I run.
pub fn is_valid_cigar(s: &str) -> bool {
    s.parse::<Cigar>().is_ok()
}

/// One operator per position, in alignment order.
///
/// `3M1D2I` expands to `[M, M, M, D, I, I]`.
pub fn expand(cigar: &Cigar) -> Vec<CigarOp> {
    cigar
        .runs()
        .iter()
        .flat_map(|run| (0..run.len).map(move |_| run.op))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use super::CigarOp::{Deletion as D, Insertion as I, Match as M};

    #[rstest]
    #[case("8M7D6M2I2M11D7M")]
    #[case("20M")]
    #[case("3I")]
    #[case("2D1M")]
    #[case("3M2D1I1M1I2M")]
    #[case("1000000M")]
    fn accepts_valid_cigars(#[case] cigar: &str) {
        assert!(is_valid_cigar(cigar));
        assert_eq!(cigar.parse::<Cigar>().unwrap().to_string(), cigar);
    }

    #[rstest]
    #[case("", CigarError::Empty)]
    #[case("2M3", CigarError::MissingOp { offset: 2 })]
    #[case("20", CigarError::MissingOp { offset: 0 })]
    #[case("M3", CigarError::MissingLength { offset: 0 })]
    #[case("MID", CigarError::MissingLength { offset: 0 })]
    #[case("2M3N7D", CigarError::UnknownOp { op: 'N', offset: 3 })]
    #[case("5S10M", CigarError::UnknownOp { op: 'S', offset: 1 })]
    #[case("2M|3D", CigarError::MissingLength { offset: 2 })]
    #[case("3|", CigarError::UnknownOp { op: '|', offset: 1 })]
    #[case("4m", CigarError::UnknownOp { op: 'm', offset: 1 })]
    #[case("2M 3D", CigarError::MissingLength { offset: 2 })]
    #[case("0M", CigarError::ZeroLength { offset: 0 })]
    #[case("3M05D", CigarError::LeadingZero { offset: 2 })]
    #[case("4294967296M", CigarError::LengthOverflow { offset: 0 })]
    #[case("3D", CigarError::OnlyDeletions)]
    #[case("3D4D", CigarError::OnlyDeletions)]
    fn rejects_invalid_cigars(#[case] cigar: &str, #[case] expected: CigarError) {
        assert_eq!(cigar.parse::<Cigar>().unwrap_err(), expected);
        assert!(!is_valid_cigar(cigar));
    }

    #[test]
    fn non_ascii_operator_is_reported_whole() {
        let err = "3Mé".parse::<Cigar>().unwrap_err();
        assert_eq!(err, CigarError::MissingLength { offset: 2 });

        let err = "3é".parse::<Cigar>().unwrap_err();
        assert_eq!(err, CigarError::UnknownOp { op: 'é', offset: 1 });
    }

    #[test]
    fn from_runs_enforces_invariants() {
        assert_eq!(Cigar::from_runs(vec![]).unwrap_err(), CigarError::Empty);
        assert_eq!(
            Cigar::from_runs(vec![CigarRun::new(2, M), CigarRun::new(0, D)]).unwrap_err(),
            CigarError::ZeroLength { offset: 1 }
        );
        assert_eq!(
            Cigar::from_runs(vec![CigarRun::new(2, D)]).unwrap_err(),
            CigarError::OnlyDeletions
        );

        let cigar = Cigar::from_runs(vec![CigarRun::new(2, D), CigarRun::new(1, M)]).unwrap();
        assert_eq!(cigar.to_string(), "2D1M");
    }

    #[test]
    fn lengths_count_the_right_operators() {
        let cigar: Cigar = "8M7D6M2I2M11D7M".parse().unwrap();
        assert_eq!(cigar.transcript_len(), 8 + 6 + 2 + 2 + 7);
        assert_eq!(cigar.genomic_span(), 8 + 7 + 6 + 2 + 11 + 7);
        assert_eq!(cigar.runs().len(), 7);
        assert_eq!(cigar.runs()[1], CigarRun::new(7, D));
    }

    #[test]
    fn expands_one_op_per_position() {
        assert_eq!(expand(&"1M".parse().unwrap()), vec![M]);
        assert_eq!(expand(&"2D1M".parse().unwrap()), vec![D, D, M]);
        assert_eq!(expand(&"3M1D2I".parse().unwrap()), vec![M, M, M, D, I, I]);

        let expanded = expand(&"8M7D6M2I2M11D7M".parse().unwrap());
        let mut expected = Vec::new();
        expected.extend([M; 8]);
        expected.extend([D; 7]);
        expected.extend([M; 6]);
        expected.extend([I; 2]);
        expected.extend([M; 2]);
        expected.extend([D; 11]);
        expected.extend([M; 7]);
        assert_eq!(expanded, expected);
    }

    #[rstest]
    #[case("8M7D6M2I2M11D7M")]
    #[case("3M2D1I1M1I2M")]
    #[case("3I")]
    #[case("1D1I1D")]
    fn expansion_agrees_with_transcript_len(#[case] cigar: &str) {
        let cigar: Cigar = cigar.parse().unwrap();
        let expanded = expand(&cigar);
        let non_deletions = expanded.iter().filter(|op| **op != D).count() as u64;
        assert_eq!(non_deletions, cigar.transcript_len());
        let matches = expanded.iter().filter(|op| **op == M).count() as u64;
        assert_eq!(
            expanded.len() as u64,
            cigar.transcript_len() + cigar.genomic_span() - matches
        );
    }
}
