//! CLI subcommand for `mlst align` (one local alignment, printed as a report).
use std::io::{self, Write};
use anyhow::Result;
use clap::Args;
use mlst_aligner::*;

use crate::ScoringArgs;

/// Options for the `align` subcommand.
#[derive(Debug, Args)]
pub struct AlignCmd {
    /// Source sequence (the read).
    #[arg(long)]
    pub source: String,
    /// Target sequence (the reference).
    #[arg(long)]
    pub target: String,
    #[command(flatten)]
    pub scoring: ScoringArgs,
    /// Also print the score at every target position.
    #[arg(long, default_value_t=false)]
    pub positions: bool,
}

pub fn run(cmd: AlignCmd) -> Result<()> {
    let params = cmd.scoring.params()?;
    let source = cmd.source.to_ascii_uppercase();
    let target = cmd.target.to_ascii_uppercase();
    let aln = align(&source, &target, &params);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Score: {}", aln.score)?;
    writeln!(out, "Length: {}", aln.len())?;
    writeln!(out, "Source: {}..{}   Target: {}..{}", aln.range_source.0, aln.range_source.1, aln.range_target.0, aln.range_target.1)?;
    writeln!(out, "Identity: {:.2}%   Gaps: {:.2}%", aln.pct_identity, aln.pct_gaps)?;
    writeln!(out, "CIGAR: {}", aln.cigar)?;
    writeln!(out)?;
    // Blocked alignment printing (60 cols)
    let s_chars: Vec<char> = aln.align_source.chars().collect();
    let t_chars: Vec<char> = aln.align_target.chars().collect();
    for (s_block, t_block) in s_chars.chunks(60).zip(t_chars.chunks(60)) {
        let mid: String = s_block.iter().zip(t_block.iter()).map(|(x, y)| {
            if *x == GAP || *y == GAP { ' ' } else if x == y { '|' } else { '.' }
        }).collect();
        writeln!(out, "S {}", s_block.iter().collect::<String>())?;
        writeln!(out, "  {}", mid)?;
        writeln!(out, "T {}", t_block.iter().collect::<String>())?;
        writeln!(out)?;
    }
    if cmd.positions {
        writeln!(out, "position\tscore")?;
        for (pos, score) in aln.positions.iter() {
            writeln!(out, "{pos}\t{score}")?;
        }
    }
    Ok(())
}
