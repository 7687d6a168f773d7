//! Per-gene scoring: align every read against one reference and reduce the
//! per-position scores to a single coverage-weighted total.
//!
//! Reads are aligned in parallel; the resulting position maps are collected
//! in read order and merged in one reducing step, so the per-position score
//! lists always follow file order.
//!
//! ### Example
//! ```rust
//! use mlst_aligner::{parse_fasta, GeneScorer, ScoringParams};
//! let reads = parse_fasta(">r1\nCTT\n>r2\nGCA\n");
//! let scorer = GeneScorer::new(ScoringParams::new(2, 3, 1).unwrap(), "AGCATAAAGCATT").unwrap();
//! let gene = scorer.score(&reads);
//! assert_eq!(gene.scores.get(13), &[5, 4]);
//! assert!(!gene.total.is_failed());
//! ```
use std::fmt;

use rayon::prelude::*;

use crate::aligner::{align, PositionScores};
use crate::common::{FastaRecord, MlstError};
use crate::scoring::ScoringParams;

/// Reference position -> scores contributed by each read, in merge order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergedScores {
    columns: Vec<Vec<i32>>,
}

impl MergedScores {
    /// Empty structure pre-sized for a reference of `target_len` symbols.
    pub fn with_target_len(target_len: usize) -> Self {
        Self { columns: vec![Vec::new(); target_len + 1] }
    }

    /// Append every score of `scores` to the list at its position.
    pub fn merge(&mut self, scores: &PositionScores) {
        for (pos, score) in scores.iter() {
            if pos >= self.columns.len() {
                self.columns.resize_with(pos + 1, Vec::new);
            }
            self.columns[pos].push(score);
        }
    }

    /// Scores recorded at `position` (empty if none).
    pub fn get(&self, position: usize) -> &[i32] {
        self.columns.get(position).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Positions holding at least one score, ascending.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[i32])> + '_ {
        self.columns.iter().enumerate()
            .filter(|(_, v)| !v.is_empty())
            .map(|(pos, v)| (pos, v.as_slice()))
    }

    /// Number of reads that contributed a strictly positive score at `position`.
    pub fn depth(&self, position: usize) -> usize {
        self.get(position).iter().filter(|&&s| s > 0).count()
    }

    /// Number of positions with a strictly positive score from any read.
    pub fn covered_positions(&self) -> usize {
        self.columns.iter().filter(|v| v.iter().any(|&s| s > 0)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Vec::is_empty)
    }

    /// Sum of every score at every position.
    ///
    /// Only fails on `i64` overflow, which needs on the order of 2^32
    /// maximal scores.
    pub fn total(&self) -> Result<i64, MlstError> {
        self.total_from(0)
    }

    fn total_from(&self, mut acc: i64) -> Result<i64, MlstError> {
        for (pos, scores) in self.iter() {
            for &s in scores {
                acc = acc.checked_add(s as i64).ok_or(MlstError::ScoreOverflow { position: pos })?;
            }
        }
        Ok(acc)
    }
}

/// Merge position maps into lists keyed by position; duplicates accumulate.
pub fn merge_scores<'a, I>(maps: I) -> MergedScores
where
    I: IntoIterator<Item = &'a PositionScores>,
{
    let mut merged = MergedScores::default();
    for m in maps {
        merged.merge(m);
    }
    merged
}

/// Total score of one gene.
///
/// `Failed` keeps the historical "report 0" behaviour available through
/// [`GeneTotal::value`] while letting callers tell it apart from a genuine zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeneTotal {
    Scored(i64),
    Failed { reason: String },
}

impl GeneTotal {
    /// The total, or 0 if scoring failed.
    pub fn value(&self) -> i64 {
        match self {
            GeneTotal::Scored(v) => *v,
            GeneTotal::Failed { .. } => 0,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, GeneTotal::Failed { .. })
    }
}

impl fmt::Display for GeneTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Result of scoring one reference against a read set.
#[derive(Clone, Debug)]
pub struct GeneScore {
    /// Merged per-position scores.
    pub scores: MergedScores,
    /// Sum over all positions and reads.
    pub total: GeneTotal,
    /// Number of reads aligned.
    pub reads: usize,
}

/// Scores a read set against a single reference sequence.
#[derive(Clone, Debug)]
pub struct GeneScorer<'r> {
    params: ScoringParams,
    reference: &'r str,
}

impl<'r> GeneScorer<'r> {
    /// Validates `params` before any alignment runs.
    pub fn new(params: ScoringParams, reference: &'r str) -> Result<Self, MlstError> {
        params.validate()?;
        Ok(Self { params, reference })
    }

    pub(crate) fn with_validated(params: ScoringParams, reference: &'r str) -> Self {
        Self { params, reference }
    }

    pub fn reference(&self) -> &str {
        self.reference
    }

    /// Align every read, merge the position maps in read order, and sum.
    pub fn score(&self, reads: &[FastaRecord]) -> GeneScore {
        let maps: Vec<PositionScores> = reads
            .par_iter()
            .map(|r| align(&r.seq, self.reference, &self.params).positions)
            .collect();

        let mut scores = MergedScores::with_target_len(self.reference.chars().count());
        for m in &maps {
            scores.merge(m);
        }

        let total = reduce_total(&scores, 0);
        log::debug!(
            "scored {} reads against reference of length {}: total {}, {} positions covered",
            reads.len(),
            self.reference.chars().count(),
            total,
            scores.covered_positions()
        );
        GeneScore { scores, total, reads: reads.len() }
    }
}

fn reduce_total(scores: &MergedScores, start: i64) -> GeneTotal {
    match scores.total_from(start) {
        Ok(v) => GeneTotal::Scored(v),
        Err(e) => {
            log::warn!("gene total reported as 0: {e}");
            GeneTotal::Failed { reason: e.to_string() }
        }
    }
}

/// Score `reads` against `reference` with validated `params`.
pub fn score_gene(params: ScoringParams, reads: &[FastaRecord], reference: &str) -> Result<GeneScore, MlstError> {
    Ok(GeneScorer::new(params, reference)?.score(reads))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_fasta;

    fn map(pairs: &[(usize, i32)]) -> PositionScores {
        pairs.iter().copied().collect()
    }

    #[test]
    fn merge_unique_positions() {
        let maps = [map(&[(1, 10), (2, 20)]), map(&[(3, 30), (4, 40)])];
        let merged = merge_scores(&maps);
        let got: Vec<_> = merged.iter().map(|(p, v)| (p, v.to_vec())).collect();
        assert_eq!(got, vec![(1, vec![10]), (2, vec![20]), (3, vec![30]), (4, vec![40])]);
    }

    #[test]
    fn merge_overlapping_positions_keeps_order() {
        let maps = [map(&[(1, 10), (2, 20)]), map(&[(1, 15), (2, 25), (3, 35)])];
        let merged = merge_scores(&maps);
        assert_eq!(merged.get(1), &[10, 15]);
        assert_eq!(merged.get(2), &[20, 25]);
        assert_eq!(merged.get(3), &[35]);
        assert_eq!(merged.total().unwrap(), 105);
    }

    #[test]
    fn merge_nothing() {
        let merged = merge_scores(std::iter::empty());
        assert!(merged.is_empty());
        assert_eq!(merged.total().unwrap(), 0);
        assert_eq!(merged.get(1), &[] as &[i32]);
    }

    #[test]
    fn merge_single_map() {
        let maps = [map(&[(1, 10), (2, 20)])];
        let merged = merge_scores(&maps);
        assert_eq!(merged.get(1), &[10]);
        assert_eq!(merged.get(2), &[20]);
    }

    #[test]
    fn total_is_order_independent() {
        let a = map(&[(1, 3), (2, 4)]);
        let b = map(&[(2, 5), (7, 1)]);
        let c = map(&[(1, 9)]);
        let fwd = merge_scores([&a, &b, &c]);
        let rev = merge_scores([&c, &b, &a]);
        assert_eq!(fwd.total().unwrap(), rev.total().unwrap());
        assert_eq!(fwd.get(1), &[3, 9]);
        assert_eq!(rev.get(1), &[9, 3]);
    }

    #[test]
    fn gene_scorer_sums_all_reads() {
        let reads = parse_fasta(">r1\nCTT\n>r2\nCTT\n");
        let params = ScoringParams::new(2, 3, 1).unwrap();
        let gene = score_gene(params, &reads, "AGCATAAAGCATT").unwrap();
        // each read contributes 2 + 1 + 2 + 5 along the final row
        assert_eq!(gene.total, GeneTotal::Scored(20));
        assert_eq!(gene.reads, 2);
        assert_eq!(gene.scores.get(13), &[5, 5]);
        assert_eq!(gene.scores.depth(13), 2);
        assert_eq!(gene.scores.depth(1), 0);
        assert_eq!(gene.scores.covered_positions(), 4);
    }

    #[test]
    fn gene_scorer_without_reads() {
        let params = ScoringParams::default();
        let gene = score_gene(params, &[], "ACGT").unwrap();
        assert_eq!(gene.total, GeneTotal::Scored(0));
        assert!(gene.scores.is_empty());
    }

    #[test]
    fn gene_scorer_rejects_bad_parameters() {
        let params = ScoringParams { match_reward: 2, mismatch_penalty: -2, indel_penalty: 1 };
        assert!(GeneScorer::new(params, "ACGT").is_err());
    }

    #[test]
    fn overflowing_total_fails_soft() {
        let maps = [map(&[(1, 0), (4, 3)])];
        let merged = merge_scores(&maps);
        assert_eq!(reduce_total(&merged, 10), GeneTotal::Scored(13));
        assert!(matches!(
            merged.total_from(i64::MAX - 1),
            Err(MlstError::ScoreOverflow { position: 4 })
        ));
        let total = reduce_total(&merged, i64::MAX - 1);
        assert!(total.is_failed());
        assert_eq!(total.value(), 0);
    }

    #[test]
    fn failed_total_reads_as_zero() {
        let t = GeneTotal::Failed { reason: "x".into() };
        assert_eq!(t.value(), 0);
        assert!(t.is_failed());
        assert_eq!(t.to_string(), "0");
        assert!(!GeneTotal::Scored(0).is_failed());
    }
}
