//! CLI subcommand for `mlst score` (one reference gene against a read set).
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use mlst_aligner::*;

use crate::ScoringArgs;

/// Options for the `score` subcommand.
#[derive(Debug, Args)]
pub struct ScoreCmd {
    /// Reads FASTA file (.fasta/.fa).
    #[arg(value_name="READS")]
    pub reads: PathBuf,
    /// Reference FASTA file (.fasta/.fa); the first record is used.
    #[arg(value_name="REFERENCE")]
    pub reference: PathBuf,
    #[command(flatten)]
    pub scoring: ScoringArgs,
    /// Optional TSV of per-position depth and scores.
    #[arg(long, value_name="FILE")]
    pub positions: Option<PathBuf>,
}

pub fn run(cmd: ScoreCmd) -> Result<()> {
    let params = cmd.scoring.params()?;
    let reads = FastaFile::open(&cmd.reads)
        .with_context(|| format!("open reads: {}", cmd.reads.display()))?;
    let reference = FastaFile::open(&cmd.reference)
        .with_context(|| format!("open reference: {}", cmd.reference.display()))?;
    let gene = reference.records().first()
        .ok_or_else(|| anyhow::anyhow!("no FASTA records in {}", cmd.reference.display()))?;
    log::info!("scoring {} reads against {} ({} bp)", reads.len(), gene.id, gene.seq.chars().count());

    let scored = GeneScorer::new(params, &gene.seq)?.score(reads.records());
    if let GeneTotal::Failed { reason } = &scored.total {
        log::warn!("scoring {} failed: {}", gene.id, reason);
    }

    if let Some(path) = &cmd.positions {
        let mut w = csv::WriterBuilder::new().delimiter(b'\t').from_path(path)
            .with_context(|| format!("create {}", path.display()))?;
        w.write_record(["position", "depth", "scores"])?;
        for (pos, scores) in scored.scores.iter() {
            let joined = scores.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(",");
            w.write_record([pos.to_string(), scored.scores.depth(pos).to_string(), joined])?;
        }
        w.flush()?;
    }

    println!("Final Score: {}", scored.total);
    Ok(())
}
