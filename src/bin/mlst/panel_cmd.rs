//! CLI subcommand for `mlst panel` (every gene of a reference panel).
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use mlst_aligner::*;

use crate::ScoringArgs;

/// Options for the `panel` subcommand.
#[derive(Debug, Args)]
pub struct PanelCmd {
    /// Reads FASTA file (.fasta/.fa).
    #[arg(value_name="READS")]
    pub reads: PathBuf,
    /// Multi-FASTA file of reference genes (.fasta/.fa).
    #[arg(value_name="PANEL")]
    pub panel: PathBuf,
    #[command(flatten)]
    pub scoring: ScoringArgs,
    /// Summary TSV file.
    #[arg(long, default_value="mlst.tsv")]
    pub outfile: PathBuf,
}

pub fn run(cmd: PanelCmd) -> Result<()> {
    let params = cmd.scoring.params()?;
    let reads = FastaFile::open(&cmd.reads)
        .with_context(|| format!("open reads: {}", cmd.reads.display()))?;
    let panel: ReferencePanel = FastaFile::open(&cmd.panel)
        .with_context(|| format!("open panel: {}", cmd.panel.display()))?
        .into();

    let entries = PanelScorer::new(params)?.score_panel(reads.records(), &panel);

    let mut w = csv::WriterBuilder::new().delimiter(b'\t').from_path(&cmd.outfile)
        .with_context(|| format!("create {}", cmd.outfile.display()))?;
    w.write_record(["gene", "score", "covered", "length", "status"])?;
    for e in &entries {
        let status = match &e.total {
            GeneTotal::Scored(_) => "ok",
            GeneTotal::Failed { .. } => "failed",
        };
        w.write_record([
            e.gene.clone(),
            e.total.to_string(),
            e.covered.to_string(),
            e.length.to_string(),
            status.to_string(),
        ])?;
        println!("{}\t{}", e.gene, e.total);
    }
    w.flush()?;
    Ok(())
}
