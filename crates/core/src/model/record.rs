//! Body records.
//!
//! A [`Record`] is built column by column as tab-separated fields arrive,
//! validated at end of line, made visible to the semantic checker, handed to
//! the optional consumer, and then released. Records are working state for
//! validation, not a parsing deliverable.

use serde::Serialize;

/// Classification of one alternate allele.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AltKind {
    /// A plain base string over A, C, G, T, N.
    Bases,
    /// A symbolic allele `<ID>`; carries the inner ID.
    Symbolic(String),
    /// A paired breakend (`t[p[`, `t]p]`, `]p]t`, `[p[t`).
    Breakend,
    /// A single breakend (`.t` or `t.`).
    SingleBreakend,
    /// `*` — the allele is missing due to an upstream deletion.
    Overlap,
    /// `.` — no alternate observed.
    Missing,
}

/// One alternate allele, raw text plus classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AltAllele {
    /// The allele exactly as written.
    pub text: String,
    /// Parsed classification.
    pub kind: AltKind,
}

/// One `key[=value]` pair from the INFO column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoPair {
    /// The key before `=`.
    pub key: String,
    /// The value after `=`; `None` for flag-style keys.
    pub value: Option<String>,
}

/// A parsed body record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// 1-based source line of the record.
    pub line: u64,
    /// Chromosome name, angle brackets stripped when present.
    pub chromosome: String,
    /// Genomic position.
    pub position: u64,
    /// Record identifiers; empty when the column was `.`.
    pub ids: Vec<String>,
    /// Reference bases.
    pub reference: String,
    /// Alternate alleles; empty when the column was `.`.
    pub alternates: Vec<AltAllele>,
    /// Quality; `None` when the column was `.`.
    pub quality: Option<f64>,
    /// Filter identifiers; empty when the column was `.`.
    pub filters: Vec<String>,
    /// INFO pairs; empty when the column was `.`.
    pub info: Vec<InfoPair>,
    /// FORMAT keys; empty when no FORMAT column is present.
    pub format: Vec<String>,
    /// Raw per-sample column text, in header order.
    pub samples: Vec<String>,
}

impl Record {
    /// Number of alternate alleles that denote an actual variant (`.`
    /// placeholders excluded).
    pub fn alt_count(&self) -> usize {
        self.alternates
            .iter()
            .filter(|a| a.kind != AltKind::Missing)
            .count()
    }
}
