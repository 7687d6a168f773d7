//! # mlst_aligner
//!
//! Smith–Waterman scoring of short reads against MLST reference genes.
//!
//! Every read is locally aligned against a reference with a flat
//! match/mismatch/indel scheme. The last row of each alignment lattice gives
//! a score per reference position; those scores are merged across reads and
//! summed into one coverage-weighted total per gene. A reference panel is
//! scored gene by gene against the same read set.
//!
//! ## Modules
//! - [`aligner`]: the local alignment DP, traceback, and position scores.
//! - [`gene`]: merging of position scores and the per-gene total.
//! - [`panel`]: scoring of a whole reference panel.
//! - [`scoring`]: scoring parameters (non-negative magnitudes).
//! - [`common`]: errors and FASTA input.
//!
//! ### Example
//! ```
//! use mlst_aligner::{align, score_gene, parse_fasta, ScoringParams};
//! let params = ScoringParams::new(1, 1, 1).unwrap();
//! let aln = align("TAACG", "ACGTG", &params);
//! assert_eq!((aln.score, aln.align_source.as_str()), (3, "ACG"));
//!
//! let reads = parse_fasta(">r1\nTAACG\n");
//! let gene = score_gene(params, &reads, "ACGTG").unwrap();
//! assert_eq!(gene.total.value(), 7);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod aligner;
pub mod common;
pub mod gene;
pub mod panel;
pub mod scoring;

pub use aligner::{align, Alignment, PositionScores, GAP};
pub use common::{parse_fasta, FastaFile, FastaRecord, MlstError};
pub use gene::{merge_scores, score_gene, GeneScore, GeneScorer, GeneTotal, MergedScores};
pub use panel::{score_panel, PanelEntry, PanelScorer, ReferencePanel};
pub use scoring::ScoringParams;
