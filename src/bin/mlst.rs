//! Command-line interface for the `mlst_aligner` crate.
//!
//! Subcommands are implemented in separate files (modules) under `src/bin/mlst/`:
//! - `align_cmd.rs`
//! - `score_cmd.rs`
//! - `panel_cmd.rs`
//!
use clap::{Args, Parser, Subcommand};
use anyhow::Result;
use mlst_aligner::ScoringParams;

#[derive(Debug, Parser)]
#[command(name="mlst", version=env!("CARGO_PKG_VERSION"), about="Smith–Waterman read scoring for MLST reference genes", disable_help_subcommand=true)]
struct Cli {
    /// Log debug messages.
    #[arg(short, long, global=true, conflicts_with="quiet")]
    verbose: bool,
    /// Only log warnings and errors.
    #[arg(short, long, global=true)]
    quiet: bool,
    /// Worker threads for alignment (0 = one per core).
    #[arg(long, global=true, default_value_t=0)]
    threads: usize,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Local alignment of two sequences with position scores.
    Align(align_cmd::AlignCmd),
    /// Score a read set against one reference gene.
    Score(score_cmd::ScoreCmd),
    /// Score a read set against every gene of a reference panel.
    Panel(panel_cmd::PanelCmd),
}

/// Scoring flags shared by every subcommand (all values are magnitudes).
#[derive(Debug, Args)]
pub struct ScoringArgs {
    /// Match reward.
    #[arg(long = "match", default_value_t=2)]
    pub match_reward: i32,
    /// Mismatch penalty (subtracted).
    #[arg(long = "mismatch", default_value_t=2)]
    pub mismatch_penalty: i32,
    /// Indel penalty (subtracted per gap position).
    #[arg(long = "indel", default_value_t=1)]
    pub indel_penalty: i32,
}

impl ScoringArgs {
    pub fn params(&self) -> Result<ScoringParams> {
        Ok(ScoringParams::new(self.match_reward, self.mismatch_penalty, self.indel_penalty)?)
    }
}

#[path = "mlst/align_cmd.rs"] mod align_cmd;
#[path = "mlst/score_cmd.rs"] mod score_cmd;
#[path = "mlst/panel_cmd.rs"] mod panel_cmd;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else if cli.quiet {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();

    if cli.threads > 0 {
        if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(cli.threads).build_global() {
            log::warn!("Failed to configure thread pool: {} (may already be initialized)", e);
        } else {
            log::debug!("Using {} alignment threads", cli.threads);
        }
    }

    match cli.command {
        Command::Align(cmd) => align_cmd::run(cmd),
        Command::Score(cmd) => score_cmd::run(cmd),
        Command::Panel(cmd) => panel_cmd::run(cmd),
    }
}
