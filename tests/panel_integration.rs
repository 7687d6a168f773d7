// End-to-end scoring from FASTA files on disk.
use std::path::PathBuf;

use mlst_aligner::{score_gene, score_panel, FastaFile, GeneTotal, MlstError, ReferencePanel, ScoringParams};

fn write_fasta(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn gene_score_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let reads = write_fasta(&dir, "reads.fasta", ">r1\nCTT\n>r2\nctt\n");
    let reference = write_fasta(&dir, "ref.fa", ">gene\nAGCATAAAGCATT\n");

    let reads = FastaFile::open(&reads).unwrap();
    let reference = FastaFile::open(&reference).unwrap();
    let params = ScoringParams::new(2, 3, 1).unwrap();
    let seq = reference.fetch("gene").unwrap();

    let gene = score_gene(params, reads.records(), seq).unwrap();
    // lowercase read is uppercased by the parser, so both reads contribute 10
    assert_eq!(gene.total, GeneTotal::Scored(20));
    assert_eq!(gene.scores.get(5), &[2, 2]);
    assert_eq!(gene.scores.get(1), &[0, 0]);
}

#[test]
fn panel_results_follow_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let reads = write_fasta(&dir, "reads.fasta", ">r1\nACGTAC\n>r2\nGTACGA\n>r3\nTTTT\n");
    let panel = write_fasta(
        &dir,
        "panel.fasta",
        ">recA\nGGGGACGTACGAGGGG\n>adk\nCCCCCCCC\n>gyrB\nACGTACGA\n",
    );

    let reads = FastaFile::open(&reads).unwrap();
    let panel: ReferencePanel = FastaFile::open(&panel).unwrap().into();
    let params = ScoringParams::default();
    let entries = score_panel(params, reads.records(), &panel).unwrap();

    let names: Vec<_> = entries.iter().map(|e| e.gene.as_str()).collect();
    assert_eq!(names, vec!["recA", "adk", "gyrB"]);

    for (entry, gene) in entries.iter().zip(panel.genes()) {
        let alone = score_gene(params, reads.records(), &gene.seq).unwrap();
        assert_eq!(entry.total, alone.total);
        assert_eq!(entry.length, gene.seq.len());
    }
    assert!(entries[0].total.value() > entries[1].total.value());
}

#[test]
fn missing_reads_file_is_an_input_error() {
    let err = FastaFile::open("does/not/exist.fasta").unwrap_err();
    assert!(matches!(err, MlstError::FileNotFound(_)));
    assert!(err.to_string().contains("does not exist"));
}
