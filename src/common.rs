//! Common helpers shared by the scorers: the crate error type, minimal FASTA
//! parsing, and a small FASTA file reader that hands out named sequences.
//!
//! ## FASTA
//! The parser is intentionally permissive and suitable for the small read
//! sets and gene panels MLST works with. It supports multi-record inputs and
//! keeps all non-alphabetic symbols as-is (conversion to uppercase only).
//!
//! ## Examples
//! ```rust,no_run
//! use mlst_aligner::parse_fasta;
//! let recs = parse_fasta(r#">adk
//! ACGT
//! >fumC
//! GGCA
//! "#);
//! assert_eq!(recs.len(), 2);
//! assert_eq!(recs[0].seq, "ACGT");
//! ```
//!
use std::path::{Path, PathBuf};

/// Errors that can be returned by the library.
#[derive(thiserror::Error, Debug)]
pub enum MlstError {
    /// A scoring parameter is outside the range the scoring model assumes.
    #[error("invalid scoring parameter {name}={value}: {reason}")]
    InvalidParameter { name: &'static str, value: i32, reason: &'static str },
    /// The sequence file does not exist.
    #[error("the file {} does not exist", .0.display())]
    FileNotFound(PathBuf),
    /// The sequence file does not carry a `.fasta` or `.fa` extension.
    #[error("file extension must be .fasta or .fa: {}", .0.display())]
    InvalidExtension(PathBuf),
    /// Reading the sequence file failed.
    #[error("failed to read {}", path.display())]
    Io { path: PathBuf, #[source] source: std::io::Error },
    /// The input parsed but held no usable records.
    #[error("no FASTA records in {}", .0.display())]
    EmptyInput(PathBuf),
    /// Summing position scores left the range of `i64`.
    #[error("score overflow while summing position {position}")]
    ScoreOverflow { position: usize },
}

/// A simple in-memory FASTA record parsed by [`parse_fasta`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FastaRecord {
    /// Identifier from the FASTA header (first token after '>').
    pub id: String,
    /// Sequence letters, uppercased. Other symbols are kept as-is.
    pub seq: String,
}

/// Parse a minimal FASTA string into a vector of [`FastaRecord`].
///
/// *Lines starting with `>` start a new record.* All other lines are appended
/// (without surrounding whitespace) to the current sequence. Sequence lines
/// appearing before the first header are ignored.
pub fn parse_fasta(text: &str) -> Vec<FastaRecord> {
    let mut out: Vec<FastaRecord> = vec![];
    let mut id: Option<String> = None;
    let mut seq = String::new();
    for line in text.lines() {
        if let Some(rest) = line.strip_prefix('>') {
            if let Some(prev) = id.take() {
                out.push(FastaRecord { id: prev, seq: seq.to_ascii_uppercase() });
                seq.clear();
            }
            id = Some(rest.split_whitespace().next().unwrap_or("").to_string());
        } else if id.is_some() {
            seq.push_str(line.trim());
        }
    }
    if let Some(prev) = id {
        out.push(FastaRecord { id: prev, seq: seq.to_ascii_uppercase() });
    }
    out
}

/// A FASTA file loaded into memory, records kept in file order.
#[derive(Clone, Debug)]
pub struct FastaFile {
    records: Vec<FastaRecord>,
}

impl FastaFile {
    /// Open and parse a `.fasta`/`.fa` file.
    ///
    /// Fails when the path is missing, when the extension is not one of the
    /// accepted ones (case-insensitive), or when the file holds no records.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, MlstError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(MlstError::FileNotFound(path.to_path_buf()));
        }
        if !has_fasta_extension(path) {
            return Err(MlstError::InvalidExtension(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)
            .map_err(|source| MlstError::Io { path: path.to_path_buf(), source })?;
        let records = parse_fasta(&text);
        if records.is_empty() {
            return Err(MlstError::EmptyInput(path.to_path_buf()));
        }
        log::debug!("loaded {} records from {}", records.len(), path.display());
        Ok(Self { records })
    }

    /// Record identifiers in file order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.id.as_str())
    }

    /// Sequence of the first record named `name`.
    pub fn fetch(&self, name: &str) -> Option<&str> {
        self.records.iter().find(|r| r.id == name).map(|r| r.seq.as_str())
    }

    pub fn records(&self) -> &[FastaRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<FastaRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn has_fasta_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("fasta") || e.eq_ignore_ascii_case("fa"))
        .unwrap_or(false)
}
