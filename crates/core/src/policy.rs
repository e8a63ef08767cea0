//! Policy traits wired into the scanner.
//!
//! The scanner is parameterized over two capability sets, injected as trait
//! objects on every `feed` call: a [`ParsePolicy`] that materializes logical
//! values from token events, and an [`ErrorPolicy`] that receives every
//! diagnostic. The error callback is the single failure path; nothing is
//! thrown across the byte loop.

use std::borrow::Cow;
use vcf_lint_diagnostics::Section;

/// A 1-based (line, column) source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// 1-based line number.
    pub line: u64,
    /// 1-based column number.
    pub column: u64,
}

/// The tab-separated column of a body record a token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyColumn {
    /// Column 1: CHROM.
    Chromosome,
    /// Column 2: POS.
    Position,
    /// Column 3: ID.
    Id,
    /// Column 4: REF.
    Reference,
    /// Column 5: ALT.
    Alternate,
    /// Column 6: QUAL.
    Quality,
    /// Column 7: FILTER.
    Filter,
    /// Column 8: INFO.
    Info,
    /// Column 9: FORMAT, when samples are present.
    Format,
    /// Columns 10+: one per sample.
    Sample,
}

impl BodyColumn {
    /// Field name as used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            BodyColumn::Chromosome => "chromosome",
            BodyColumn::Position => "position",
            BodyColumn::Id => "id",
            BodyColumn::Reference => "reference",
            BodyColumn::Alternate => "alternate",
            BodyColumn::Quality => "quality",
            BodyColumn::Filter => "filter",
            BodyColumn::Info => "info",
            BodyColumn::Format => "format",
            BodyColumn::Sample => "sample",
        }
    }
}

/// How the scanner should treat the value of the current meta line.
///
/// Almost every meta value is scanned the same way: `<` opens a structured
/// attribute list, anything else is freeform text. A few keys (`pedigreeDB`)
/// wrap a plain URL in angle brackets, so their value must not be scanned as
/// attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetaKeyHint {
    /// `<` starts a structured attribute list.
    #[default]
    Default,
    /// `<…>` is a freeform value (URL-style entries like `##pedigreeDB=<url>`).
    AngleFreeform,
}

/// Receives token events from the scanner and materializes logical values.
///
/// Token accumulation is split into `token_begin`/`token_byte` plus a typed
/// completion hook per lexeme kind, so the policy can accumulate without an
/// intermediate copy and without the scanner owning any buffers.
pub trait ParsePolicy {
    /// First byte of a lexeme of interest. `at` is the position of that byte.
    fn token_begin(&mut self, at: Cursor);

    /// One byte within the current lexeme (including the first).
    fn token_byte(&mut self, byte: u8);

    /// The fileformat version token is complete (the value after
    /// `##fileformat=`).
    fn fileformat(&mut self, errors: &mut dyn ErrorPolicy);

    /// A meta entry key is complete (the text between `##` and `=`).
    ///
    /// The returned hint drives how the scanner treats the upcoming value.
    fn meta_key(&mut self, at: Cursor) -> MetaKeyHint;

    /// A freeform meta value is complete.
    fn meta_value(&mut self);

    /// A structured attribute name is complete (the text before `=` inside
    /// `<…>`).
    fn meta_attribute_key(&mut self, errors: &mut dyn ErrorPolicy);

    /// A structured attribute value is complete. `quoted` is true when the
    /// value was double-quoted.
    fn meta_attribute_value(&mut self, quoted: bool);

    /// A meta line is complete; finalize and commit the entry.
    fn end_of_meta_line(&mut self, at: Cursor, errors: &mut dyn ErrorPolicy);

    /// A header sample name token is complete.
    fn sample_name(&mut self, errors: &mut dyn ErrorPolicy);

    /// The header line is complete; freeze the source description.
    fn end_of_header_line(&mut self, at: Cursor, errors: &mut dyn ErrorPolicy);

    /// A body column is complete. `at` is the position of the terminating
    /// tab or newline.
    fn body_field(&mut self, column: BodyColumn, at: Cursor, errors: &mut dyn ErrorPolicy);

    /// A body line is complete; validate counts, run the semantic layer,
    /// and release the record.
    fn end_of_body_line(&mut self, at: Cursor, errors: &mut dyn ErrorPolicy);

    /// The current line failed at the byte level and is being skipped;
    /// discard any partially assembled state.
    fn line_aborted(&mut self, section: Section);
}

/// Receives every diagnostic the scanner and the policies produce.
///
/// The four section handlers accept an optional message; `None` means the
/// sink supplies the default `Error in the <section> section`. Warnings and
/// informational events always apply to a whole line and carry no column.
pub trait ErrorPolicy {
    /// Grammar error in the `##fileformat=` line.
    fn fileformat_section_error(
        &mut self,
        line: u64,
        column: Option<u64>,
        code: &'static str,
        message: Option<Cow<'static, str>>,
    );

    /// Grammar error in a meta-information line.
    fn meta_section_error(
        &mut self,
        line: u64,
        column: Option<u64>,
        code: &'static str,
        message: Option<Cow<'static, str>>,
    );

    /// Grammar error in the header line.
    fn header_section_error(
        &mut self,
        line: u64,
        column: Option<u64>,
        code: &'static str,
        message: Option<Cow<'static, str>>,
    );

    /// Grammar error in a body record.
    fn body_section_error(
        &mut self,
        line: u64,
        column: Option<u64>,
        code: &'static str,
        message: Option<Cow<'static, str>>,
    );

    /// Non-fatal recommendation raised at the header boundary.
    fn header_section_warning(&mut self, line: u64, code: &'static str, message: String);

    /// Non-fatal cross-line consistency finding on a body record.
    fn body_section_warning(&mut self, line: u64, code: &'static str, message: String);

    /// Informational event (progress reporting).
    fn info_event(&mut self, line: u64, code: &'static str, message: String);

    /// When true, the scanner stops consuming input at the next line
    /// boundary. Opt-in stop-on-first-diagnostic behavior.
    fn halt(&self) -> bool {
        false
    }
}
