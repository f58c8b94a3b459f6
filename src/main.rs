use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;

use cigar_coords::QueryJob;

/// Map transcript coordinates to genomic positions.
///
/// Positions inside an insertion are reported as NA.
#[derive(Parser, Debug)]
#[command(name = "cigar-coords")]
#[command(author, version, about)]
struct Cli {
    /// Transcript table: id, chromosome, 1-based start, CIGAR (.tsv or .tsv.gz)
    #[arg(long, short)]
    transcripts: PathBuf,

    /// Queries: transcript id, 0-based transcript coordinate (.tsv or .tsv.gz)
    #[arg(long, short)]
    queries: PathBuf,

    /// Output TSV: id, coordinate, chromosome, genomic position
    #[arg(long, short)]
    out: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let job = QueryJob::new(cli.transcripts, cli.queries, cli.out);

    let summary = job.run()?;
    info!("mapped {summary}");

    Ok(())
}
