//! Multi-reference (MLST panel) scoring.
//!
//! Each gene of a [`ReferencePanel`] gets its own [`GeneScorer`] and is
//! scored independently against the full read set; nothing is cached across
//! genes. Genes run in parallel and results keep panel order.
//!
//! ### Example
//! ```rust
//! use mlst_aligner::{parse_fasta, PanelScorer, ReferencePanel, ScoringParams};
//! let reads = parse_fasta(">r1\nAAAA\n");
//! let panel = ReferencePanel::new(parse_fasta(">adk\nTTAAAATT\n>gyrB\nGGGG\n"));
//! let entries = PanelScorer::new(ScoringParams::default()).unwrap().score_panel(&reads, &panel);
//! assert_eq!(entries[0].gene, "adk");
//! assert_eq!(entries[1].total.value(), 0);
//! ```
use rayon::prelude::*;

use crate::common::{FastaFile, FastaRecord, MlstError};
use crate::gene::{GeneScorer, GeneTotal};
use crate::scoring::ScoringParams;

/// Ordered `(gene name, reference sequence)` pairs.
#[derive(Clone, Debug, Default)]
pub struct ReferencePanel {
    genes: Vec<FastaRecord>,
}

impl ReferencePanel {
    pub fn new(genes: Vec<FastaRecord>) -> Self {
        Self { genes }
    }

    pub fn genes(&self) -> &[FastaRecord] {
        &self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

impl From<FastaFile> for ReferencePanel {
    fn from(file: FastaFile) -> Self {
        Self::new(file.into_records())
    }
}

/// Panel result for one gene.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelEntry {
    pub gene: String,
    pub total: GeneTotal,
    /// Reference positions with a positive score from at least one read.
    pub covered: usize,
    /// Reference length in symbols.
    pub length: usize,
}

/// Scores a read set against every gene of a panel.
#[derive(Clone, Debug)]
pub struct PanelScorer {
    params: ScoringParams,
}

impl PanelScorer {
    pub fn new(params: ScoringParams) -> Result<Self, MlstError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ScoringParams {
        &self.params
    }

    /// One entry per gene, in panel order.
    pub fn score_panel(&self, reads: &[FastaRecord], panel: &ReferencePanel) -> Vec<PanelEntry> {
        let entries: Vec<PanelEntry> = panel
            .genes()
            .par_iter()
            .map(|gene| {
                let scored = GeneScorer::with_validated(self.params, &gene.seq).score(reads);
                log::debug!("gene {}: {}", gene.id, scored.total);
                PanelEntry {
                    gene: gene.id.clone(),
                    covered: scored.scores.covered_positions(),
                    length: gene.seq.chars().count(),
                    total: scored.total,
                }
            })
            .collect();
        let failed = entries.iter().filter(|e| e.total.is_failed()).count();
        log::info!(
            "scored {} reads against {} genes ({} failed)",
            reads.len(),
            entries.len(),
            failed
        );
        entries
    }
}

/// Score `reads` against every gene in `panel` with validated `params`.
pub fn score_panel(params: ScoringParams, reads: &[FastaRecord], panel: &ReferencePanel) -> Result<Vec<PanelEntry>, MlstError> {
    Ok(PanelScorer::new(params)?.score_panel(reads, panel))
}
