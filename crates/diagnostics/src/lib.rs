//! Diagnostics for the vcf-lint toolchain.
//!
//! Provides [`Diagnostic`], [`Severity`], [`Section`], and [`LineIndex`]
//! types used to report errors, warnings, and informational messages from
//! the scanner and the semantic checker. Diagnostic codes are defined in the
//! [`codes`] module.

#![warn(missing_docs)]

/// Stable diagnostic code constants.
pub mod codes;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// ── LineIndex ────────────────────────────────────────────────────────────

/// Maps byte offsets in a source string to line and column positions, and
/// 1-based (line, column) pairs back to byte offsets.
///
/// The scanner reports positions as 1-based line/column pairs because it
/// never holds the whole input; when a renderer *does* have the full source
/// (the CLI reads files into memory), this index anchors those positions
/// back onto byte offsets.
///
/// The index is built in O(n) time and each lookup is O(log n) via binary
/// search. This struct is intentionally dependency-free so it can be reused
/// by any consumer of the diagnostics.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset of the start of each line.
    /// `line_starts[0]` is always 0.
    line_starts: Vec<usize>,
    /// Total length of the indexed text in bytes.
    len: usize,
}

impl LineIndex {
    /// Build a `LineIndex` from source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0usize];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            line_starts,
            len: text.len(),
        }
    }

    /// Convert a byte offset to a 0-indexed `(line, column)` pair.
    ///
    /// If `offset` is past the end of the source, the last line is returned
    /// with the column clamped to the line length.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next.saturating_sub(1),
        };
        let col = offset.saturating_sub(self.line_starts[line]);
        (line, col)
    }

    /// Byte offset of a 1-based `(line, column)` position, clamped to the
    /// end of the text.
    ///
    /// Returns `None` when `line` is 0 or beyond the last line.
    pub fn offset(&self, line: u64, column: u64) -> Option<usize> {
        let line_idx = usize::try_from(line.checked_sub(1)?).ok()?;
        let start = *self.line_starts.get(line_idx)?;
        let col = usize::try_from(column.saturating_sub(1)).unwrap_or(0);
        Some((start + col).min(self.len))
    }

    /// Byte offset of the start of the given 0-indexed line.
    ///
    /// Returns `None` if `line` is out of bounds.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Total number of lines (at least 1, even for empty input).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

// ── Severity / Section ───────────────────────────────────────────────────

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Severity {
    /// The input deviates from the VCF grammar.
    Error,
    /// The input is grammatically valid but violates a recommendation or a
    /// cross-line consistency rule.
    Warning,
    /// Informational note (progress events, advisory output).
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Grammatical section of a VCF document a diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// The `##fileformat=` declaration on line 1.
    Fileformat,
    /// `##key=value` meta-information lines.
    Meta,
    /// The `#CHROM…` header line.
    Header,
    /// Tab-separated body records.
    Body,
}

impl Section {
    /// Lowercase section name as used in messages and serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Fileformat => "fileformat",
            Section::Meta => "meta",
            Section::Header => "header",
            Section::Body => "body",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Diagnostic ───────────────────────────────────────────────────────────

/// A diagnostic produced by the scanner or the semantic checker.
///
/// `line` and `column` are 1-based source positions. `column` is absent for
/// diagnostics that apply to a whole line (for example line-level semantic
/// warnings raised after the record is complete).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Unique diagnostic code (e.g., `"VCF0403"`).
    pub id: Cow<'static, str>,
    /// Severity level.
    pub severity: Severity,
    /// Section of the document the diagnostic belongs to.
    pub section: Section,
    /// 1-based source line.
    pub line: u64,
    /// 1-based source column, when the diagnostic is anchored to one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u64>,
    /// Human-readable diagnostic message.
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic with the given fields.
    pub fn new(
        id: impl Into<Cow<'static, str>>,
        severity: Severity,
        section: Section,
        line: u64,
        column: Option<u64>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            section,
            line,
            column,
            message: message.into(),
        }
    }

    /// Shorthand for an `Error` diagnostic.
    pub fn error(
        id: impl Into<Cow<'static, str>>,
        section: Section,
        line: u64,
        column: Option<u64>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(id, Severity::Error, section, line, column, message)
    }

    /// Shorthand for a `Warning` diagnostic.
    pub fn warning(
        id: impl Into<Cow<'static, str>>,
        section: Section,
        line: u64,
        column: Option<u64>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(id, Severity::Warning, section, line, column, message)
    }

    /// Shorthand for an `Info` diagnostic.
    pub fn info(
        id: impl Into<Cow<'static, str>>,
        section: Section,
        line: u64,
        column: Option<u64>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(id, Severity::Info, section, line, column, message)
    }

    /// Returns the human-readable explanation for this diagnostic's code,
    /// if available.
    pub fn explain(&self) -> Option<&'static str> {
        codes::explain(&self.id)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.column {
            Some(col) => write!(
                f,
                "{}[{}]: {}:{}: {}",
                self.severity, self.id, self.line, col, self.message
            ),
            None => write!(
                f,
                "{}[{}]: {}: {}",
                self.severity, self.id, self.line, self.message
            ),
        }
    }
}
