//! End-to-end run: transcript table + query file -> result table.

use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};
use rayon::prelude::*;

use crate::error::Error;
use crate::io::{open_bufread, QueryReader, ResultWriter};
use crate::table::TranscriptTable;
use crate::types::{Query, QueryResult};

/// Inputs and output of one mapping run.
#[derive(Debug, Clone)]
pub struct QueryJob {
    /// Transcript table (`id  chrom  start  cigar`).
    pub transcripts: PathBuf,
    /// Query file (`id  coord`).
    pub queries: PathBuf,
    /// Result table to create.
    pub out: PathBuf,
}

/// Counts reported after a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub transcripts: usize,
    pub queries: usize,
    pub not_applicable: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} queries against {} transcripts ({} in insertions)",
            self.queries, self.transcripts, self.not_applicable
        )
    }
}

impl QueryJob {
    pub fn new(
        transcripts: impl Into<PathBuf>,
        queries: impl Into<PathBuf>,
        out: impl Into<PathBuf>,
    ) -> Self {
        Self {
            transcripts: transcripts.into(),
            queries: queries.into(),
            out: out.into(),
        }
    }

    /// Load, resolve, write.
    ///
    /// Every query is resolved before the output file is created, so a failed
    /// run leaves no partial output behind.
    pub fn run(&self) -> Result<RunSummary> {
        let table = TranscriptTable::from_path(&self.transcripts)?;
        info!("{table}");

        let queries = read_queries(&self.queries)?;
        info!("read {} queries from {}", queries.len(), self.queries.display());

        let results = resolve_queries(&table, &queries)
            .with_context(|| format!("resolve queries from {}", self.queries.display()))?;

        write_results(&self.out, &results)?;

        let summary = RunSummary {
            transcripts: table.len(),
            queries: results.len(),
            not_applicable: results.iter().filter(|r| !r.position.is_mapped()).count(),
        };
        info!("wrote {} rows to {}", results.len(), self.out.display());
        Ok(summary)
    }
}

/// Read every query from a (possibly gzipped) query file.
pub fn read_queries(path: impl AsRef<Path>) -> Result<Vec<Query>> {
    let path = path.as_ref();
    let reader = open_bufread(path)
        .with_context(|| format!("open query file {}", path.display()))?;

    QueryReader::new(reader)
        .with_source(path)
        .queries()
        .collect::<Result<Vec<_>, Error>>()
        .with_context(|| format!("read query file {}", path.display()))
}

/// Map a single query through the table.
pub fn resolve_query(table: &TranscriptTable, query: &Query) -> Result<QueryResult, Error> {
    let tx = table.lookup(&query.transcript_id)?;
    let position = tx.genomic_position(query.coord)?;

    Ok(QueryResult {
        transcript_id: query.transcript_id.clone(),
        coord: query.coord,
        chrom: tx.chrom.clone(),
        position,
    })
}

/// Resolve all queries in parallel; results keep the input order.
///
/// If several queries fail, the error of the earliest one is returned.
pub fn resolve_queries(
    table: &TranscriptTable,
    queries: &[Query],
) -> Result<Vec<QueryResult>, Error> {
    let resolved: Vec<Result<QueryResult, Error>> = queries
        .par_iter()
        .map(|q| resolve_query(table, q))
        .collect();

    resolved.into_iter().collect()
}

/// Create `path` and write one TSV row per result.
pub fn write_results(path: impl AsRef<Path>, results: &[QueryResult]) -> Result<()> {
    let path = path.as_ref();
    let f = File::create(path).with_context(|| format!("create output {}", path.display()))?;

    let mut writer = ResultWriter::new(BufWriter::new(f));
    writer
        .write_rows(results)
        .with_context(|| format!("write output {}", path.display()))?;
    writer
        .finish()
        .with_context(|| format!("flush output {}", path.display()))?;

    debug!("flushed {}", path.display());
    Ok(())
}
