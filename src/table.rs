use std::collections::{HashMap, HashSet};
use std::fmt;
use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use crate::error::Error;
use crate::io::{open_bufread, TranscriptReader};
use crate::model::transcript::TranscriptRecord;

/// Transcript records keyed by transcript identifier.
///
/// Built once from a transcript table and read-only afterwards, so a shared
/// reference can be handed to any number of worker threads.
/// Records keep their file order.
#[derive(Debug, Clone, Default)]
pub struct TranscriptTable {
    transcripts: Vec<TranscriptRecord>,
    id_to_idx: HashMap<String, usize>,
}

/// Short summary for logs: transcript and chromosome counts.
impl fmt::Display for TranscriptTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n_chrs = self
            .transcripts
            .iter()
            .map(|tx| tx.chrom.as_str())
            .collect::<HashSet<_>>()
            .len();

        write!(
            f,
            "TranscriptTable: {} transcripts on {} chromosomes",
            self.transcripts.len(),
            n_chrs
        )
    }
}

impl TranscriptTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a transcript table from a TSV path (optionally gzipped).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("loading transcript table from {}", path.display());

        let reader = open_bufread(path)
            .with_context(|| format!("open transcript table {}", path.display()))?;

        Self::new()
            .from_reader_named(reader, path)
            .with_context(|| format!("load transcript table {}", path.display()))
    }

    /// Build a table from any `BufRead`.
    ///
    /// Fails on the first malformed line or repeated transcript identifier;
    /// nothing is kept from a failed load.
    ///
    /// # Example
    /// ```
    /// use std::io::Cursor;
    /// use cigar_coords::TranscriptTable;
    ///
    /// let tsv = "TR1\tCHR1\t3\t8M7D6M2I2M11D7M\nTR2\tCHR2\t10\t20M\n";
    /// let table = TranscriptTable::new().from_reader(Cursor::new(tsv)).unwrap();
    ///
    /// assert_eq!(table.len(), 2);
    /// assert_eq!(table.get("TR2").unwrap().start, 10);
    /// ```
    pub fn from_reader<R: BufRead>(self, reader: R) -> Result<Self, Error> {
        self.from_reader_named(reader, "<reader>")
    }

    fn from_reader_named<R: BufRead>(
        mut self,
        reader: R,
        source: impl AsRef<Path>,
    ) -> Result<Self, Error> {
        // transcript id -> line it was defined on
        let mut first_seen: HashMap<String, usize> = HashMap::new();

        let records = TranscriptReader::new(reader)
            .with_source(source.as_ref())
            .records();

        for rec in records {
            let (line_no, tx) = rec?;

            if let Some(&first_line) = first_seen.get(&tx.id) {
                return Err(Error::DuplicateKey {
                    id: tx.id,
                    line: line_no,
                    first_line,
                });
            }
            first_seen.insert(tx.id.clone(), line_no);
            self.insert(tx);
        }

        debug!("{}", self);
        Ok(self)
    }

    fn insert(&mut self, tx: TranscriptRecord) {
        let idx = self.transcripts.len();
        self.id_to_idx.insert(tx.id.clone(), idx);
        self.transcripts.push(tx);
    }

    pub fn get(&self, id: &str) -> Option<&TranscriptRecord> {
        self.id_to_idx.get(id).map(|&idx| &self.transcripts[idx])
    }

    /// Like [`get`](Self::get), but a missing identifier is an error.
    pub fn lookup(&self, id: &str) -> Result<&TranscriptRecord, Error> {
        self.get(id).ok_or_else(|| Error::Lookup { id: id.to_string() })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.id_to_idx.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.transcripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcripts.is_empty()
    }

    /// Records in file order.
    pub fn iter(&self) -> impl Iterator<Item = &TranscriptRecord> {
        self.transcripts.iter()
    }
}
