//! Smith–Waterman local alignment with a flat indel penalty.
//!
//! [`align`] fills a `(|source|+1) × (|target|+1)` score lattice with a zero
//! boundary, keeps a parallel traceback table, and walks back from the first
//! cell holding the global maximum. Besides the aligned pair it reports the
//! per-target-position scores consumed by the gene scorer.
//!
//! ### Tie-break
//! Candidates are checked in the fixed order *restart (0)*, *up* (source
//! symbol against a gap), *left* (target symbol against a gap), *diagonal*
//! (match/mismatch); on equal values the earlier candidate wins. The global
//! maximum keeps its first occurrence in row-major scan order.
//!
//! ### Position scores
//! Every target position `j` receives `H[|source|][j]`, zeros included, i.e.
//! the best local score of an alignment ending exactly at `j` in the last
//! source row. An empty source or target yields an empty map.
//!
//! ### Example
//! ```rust
//! use mlst_aligner::{align, ScoringParams};
//! let params = ScoringParams::new(3, 3, 1).unwrap();
//! let aln = align("AGC", "ATC", &params);
//! assert_eq!(aln.score, 4);
//! assert_eq!(aln.align_source, "A-GC");
//! assert_eq!(aln.align_target, "AT-C");
//! assert_eq!(aln.positions.get(3), Some(4));
//! ```
use crate::scoring::ScoringParams;

/// Symbol written opposite an inserted or deleted symbol.
pub const GAP: char = '-';

/// Which candidate produced a lattice cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Move {
    Restart,
    Up,
    Left,
    Diag,
}

/// Score per target position, indexed `1..=target_len`.
///
/// Backed by a fixed array so that "no entry" (`None`) and a legitimate zero
/// score stay distinguishable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PositionScores {
    slots: Vec<Option<i32>>,
}

impl PositionScores {
    /// Empty map sized for a target of `target_len` symbols.
    pub fn new(target_len: usize) -> Self {
        Self { slots: vec![None; target_len + 1] }
    }

    /// Record `score` at `position`, growing the array if needed.
    ///
    /// Growing allocates `position + 1` slots, so positions are expected to
    /// be target coordinates.
    ///
    /// # Panics
    /// Panics if `position` is `usize::MAX`.
    pub fn set(&mut self, position: usize, score: i32) {
        if position >= self.slots.len() {
            assert!(position < usize::MAX, "position {position} cannot be stored");
            self.slots.resize(position + 1, None);
        }
        self.slots[position] = Some(score);
    }

    pub fn get(&self, position: usize) -> Option<i32> {
        self.slots.get(position).copied().flatten()
    }

    /// `(position, score)` pairs in ascending position order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, i32)> + '_ {
        self.slots.iter().enumerate().filter_map(|(pos, s)| s.map(|s| (pos, s)))
    }

    /// Number of positions holding a score.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Sum of all recorded scores.
    pub fn sum(&self) -> i64 {
        self.iter().map(|(_, s)| s as i64).sum()
    }
}

impl FromIterator<(usize, i32)> for PositionScores {
    fn from_iter<I: IntoIterator<Item = (usize, i32)>>(iter: I) -> Self {
        let mut out = PositionScores::default();
        for (pos, score) in iter {
            out.set(pos, score);
        }
        out
    }
}

/// A local alignment of one source (read) against one target (reference).
#[derive(Clone, Debug)]
pub struct Alignment {
    /// Best local score; never negative.
    pub score: i32,
    /// Aligned source with `-` for gaps.
    pub align_source: String,
    /// Aligned target with `-` for gaps.
    pub align_target: String,
    /// Final-row score for every target position.
    pub positions: PositionScores,
    /// Start (inclusive) and end (exclusive), 0-based, of the aligned source region.
    pub range_source: (usize, usize),
    /// Start (inclusive) and end (exclusive), 0-based, of the aligned target region.
    pub range_target: (usize, usize),
    /// CIGAR-like operations (`M` paired, `D` source-only, `I` target-only).
    pub cigar: String,
    /// Percent identity over aligned columns (0..=100).
    pub pct_identity: f64,
    /// Percent gap columns (0..=100).
    pub pct_gaps: f64,
}

impl Alignment {
    /// Number of aligned columns, gaps included.
    pub fn len(&self) -> usize {
        self.align_source.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.align_source.is_empty()
    }
}

/// Run Smith–Waterman local alignment of `source` against `target`.
///
/// Defined for every input, empty sequences included (score 0, empty
/// alignment). Parameters are not validated here; see
/// [`ScoringParams::validate`].
pub fn align(source: &str, target: &str, params: &ScoringParams) -> Alignment {
    let s: Vec<char> = source.chars().collect();
    let t: Vec<char> = target.chars().collect();
    let n = s.len();
    let m = t.len();
    let width = m + 1;

    // H = best local score ending at (i, j); row 0 and column 0 stay zero.
    let mut h = vec![0i32; (n + 1) * width];
    let mut tb = vec![Move::Restart; (n + 1) * width];

    let mut max_i = 0usize;
    let mut max_j = 0usize;
    let mut max_score = 0i32;

    for i in 1..=n {
        for j in 1..=m {
            let at = i * width + j;
            let (best, dir) = first_max([
                (0, Move::Restart),
                (h[at - width].saturating_sub(params.indel_penalty), Move::Up),
                (h[at - 1].saturating_sub(params.indel_penalty), Move::Left),
                (h[at - width - 1].saturating_add(params.pair(s[i - 1], t[j - 1])), Move::Diag),
            ]);
            h[at] = best;
            tb[at] = dir;
            if best > max_score {
                max_score = best;
                max_i = i;
                max_j = j;
            }
        }
    }

    let mut positions = PositionScores::new(m);
    if n > 0 {
        for j in 1..=m {
            positions.set(j, h[n * width + j]);
        }
    }

    // Traceback from max cell
    let mut i = max_i;
    let mut j = max_j;
    let mut s_aln = Vec::new();
    let mut t_aln = Vec::new();
    let mut cigar_ops: Vec<(char, usize)> = Vec::new();
    while i > 0 && j > 0 && h[i * width + j] > 0 {
        match tb[i * width + j] {
            Move::Diag => {
                s_aln.push(s[i - 1]); t_aln.push(t[j - 1]); push_cigar(&mut cigar_ops, 'M'); i -= 1; j -= 1;
            }
            Move::Up => {
                s_aln.push(s[i - 1]); t_aln.push(GAP); push_cigar(&mut cigar_ops, 'D'); i -= 1;
            }
            Move::Left => {
                s_aln.push(GAP); t_aln.push(t[j - 1]); push_cigar(&mut cigar_ops, 'I'); j -= 1;
            }
            Move::Restart => break,
        }
    }
    s_aln.reverse();
    t_aln.reverse();
    cigar_ops.reverse();
    let cigar = cigar_ops.into_iter().map(|(op, len)| format!("{len}{op}")).collect::<String>();

    let (mut ident, mut gaps) = (0usize, 0usize);
    for (&x, &y) in s_aln.iter().zip(t_aln.iter()) {
        if x == GAP || y == GAP { gaps += 1; }
        else if x == y { ident += 1; }
    }
    let cols = s_aln.len().max(1);

    Alignment {
        score: max_score,
        align_source: s_aln.into_iter().collect(),
        align_target: t_aln.into_iter().collect(),
        positions,
        range_source: (i, max_i),
        range_target: (j, max_j),
        cigar,
        pct_identity: (ident as f64) * 100.0 / (cols as f64),
        pct_gaps: (gaps as f64) * 100.0 / (cols as f64),
    }
}

/// Highest candidate, earliest one on ties.
fn first_max(candidates: [(i32, Move); 4]) -> (i32, Move) {
    let mut best = candidates[0];
    for c in &candidates[1..] {
        if c.0 > best.0 {
            best = *c;
        }
    }
    best
}

fn push_cigar(ops: &mut Vec<(char, usize)>, op: char) {
    if let Some(last) = ops.last_mut() {
        if last.0 == op { last.1 += 1; return; }
    }
    ops.push((op, 1));
}
