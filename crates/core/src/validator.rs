//! The validator facade: scanner + assembler + diagnostic sink.
//!
//! [`Validator`] wires the three layers together behind a push API:
//! construct (optionally through [`ValidatorBuilder`]), [`Validator::feed`]
//! byte chunks, then [`Validator::finish`] for the [`ValidationReport`].

use crate::assemble::{LineAssembler, RecordConsumer};
use crate::model::Source;
use crate::policy::ErrorPolicy;
use crate::scan::Scanner;
use serde::Serialize;
use std::borrow::Cow;
use std::io::Read;
use vcf_lint_diagnostics::{Diagnostic, Section, Severity};

/// Failure of a reader-driven scan. Diagnostics are not errors in this
/// sense; only the underlying I/O can fail.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Reading the input failed.
    #[error("I/O error while scanning: {0}")]
    Io(#[from] std::io::Error),
}

/// The accumulating error policy: every diagnostic is annotated with its
/// position and section and collected in source order.
#[derive(Default)]
pub struct CollectedDiagnostics {
    diagnostics: Vec<Diagnostic>,
    stop_after_first: bool,
    error_count: usize,
    warning_count: usize,
}

impl CollectedDiagnostics {
    fn error(
        &mut self,
        section: Section,
        line: u64,
        column: Option<u64>,
        code: &'static str,
        message: Option<Cow<'static, str>>,
    ) {
        let message = message
            .map(Cow::into_owned)
            .unwrap_or_else(|| format!("Error in the {section} section"));
        self.error_count += 1;
        self.diagnostics
            .push(Diagnostic::error(code, section, line, column, message));
    }

    fn warning(&mut self, section: Section, line: u64, code: &'static str, message: String) {
        self.warning_count += 1;
        self.diagnostics
            .push(Diagnostic::warning(code, section, line, None, message));
    }
}

impl ErrorPolicy for CollectedDiagnostics {
    fn fileformat_section_error(
        &mut self,
        line: u64,
        column: Option<u64>,
        code: &'static str,
        message: Option<Cow<'static, str>>,
    ) {
        self.error(Section::Fileformat, line, column, code, message);
    }

    fn meta_section_error(
        &mut self,
        line: u64,
        column: Option<u64>,
        code: &'static str,
        message: Option<Cow<'static, str>>,
    ) {
        self.error(Section::Meta, line, column, code, message);
    }

    fn header_section_error(
        &mut self,
        line: u64,
        column: Option<u64>,
        code: &'static str,
        message: Option<Cow<'static, str>>,
    ) {
        self.error(Section::Header, line, column, code, message);
    }

    fn body_section_error(
        &mut self,
        line: u64,
        column: Option<u64>,
        code: &'static str,
        message: Option<Cow<'static, str>>,
    ) {
        self.error(Section::Body, line, column, code, message);
    }

    fn header_section_warning(&mut self, line: u64, code: &'static str, message: String) {
        self.warning(Section::Header, line, code, message);
    }

    fn body_section_warning(&mut self, line: u64, code: &'static str, message: String) {
        self.warning(Section::Body, line, code, message);
    }

    fn info_event(&mut self, line: u64, code: &'static str, message: String) {
        self.diagnostics
            .push(Diagnostic::info(code, Section::Body, line, None, message));
    }

    fn halt(&self) -> bool {
        self.stop_after_first && self.error_count + self.warning_count > 0
    }
}

/// Result of validating one source.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    /// True when no error-severity diagnostics were produced.
    pub ok: bool,
    /// All diagnostics, in source order.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of accepted body records.
    pub record_count: u64,
    /// The accumulated header description.
    pub source: Source,
}

impl ValidationReport {
    /// Count of error-severity diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Count of warning-severity diagnostics.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }
}

/// Configures and constructs a [`Validator`].
#[derive(Default)]
pub struct ValidatorBuilder {
    filename: Option<String>,
    stop_after_first: bool,
    progress_every: Option<u64>,
    semantics_after_syntax_error: bool,
    on_record: Option<RecordConsumer>,
}

impl ValidatorBuilder {
    /// Identifier used in the report; defaults to `<input>`.
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Stop consuming input at the first diagnostic (errors and warnings).
    pub fn stop_after_first(mut self, stop: bool) -> Self {
        self.stop_after_first = stop;
        self
    }

    /// Emit an informational `Lines read: N` event every `every` lines.
    pub fn progress_every(mut self, every: u64) -> Self {
        self.progress_every = Some(every);
        self
    }

    /// Run the semantic checks over partially parsed body lines too.
    /// Default: a line with a grammar error reports only the grammar error.
    pub fn semantics_after_syntax_error(mut self, enabled: bool) -> Self {
        self.semantics_after_syntax_error = enabled;
        self
    }

    /// Receive every accepted record.
    pub fn on_record(mut self, consumer: RecordConsumer) -> Self {
        self.on_record = Some(consumer);
        self
    }

    /// Build the validator.
    pub fn build(self) -> Validator {
        let mut scanner = Scanner::new();
        scanner.progress_every(self.progress_every);
        let mut errors = CollectedDiagnostics::default();
        errors.stop_after_first = self.stop_after_first;
        Validator {
            scanner,
            assembler: LineAssembler::new(
                self.filename.unwrap_or_else(|| "<input>".to_string()),
                self.semantics_after_syntax_error,
                self.on_record,
            ),
            errors,
        }
    }
}

/// Streaming VCF validator for one source.
pub struct Validator {
    scanner: Scanner,
    assembler: LineAssembler,
    errors: CollectedDiagnostics,
}

impl Validator {
    /// Validator with default options.
    pub fn new() -> Self {
        ValidatorBuilder::default().build()
    }

    /// Start configuring a validator.
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::default()
    }

    /// Consume a chunk of input bytes.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.scanner
            .feed(bytes, &mut self.assembler, &mut self.errors);
    }

    /// True iff the input so far conforms to the grammar of a complete VCF
    /// and the scanner sits at a clean line boundary in the body section.
    pub fn is_accepting(&self) -> bool {
        self.scanner.is_accepting()
    }

    /// Signal end of input and produce the report.
    pub fn finish(mut self) -> ValidationReport {
        self.scanner
            .end_of_input(&mut self.assembler, &mut self.errors);
        let state = self.assembler.into_state();
        let ok = !self
            .errors
            .diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error);
        ValidationReport {
            ok,
            diagnostics: self.errors.diagnostics,
            record_count: state.record_count,
            source: state.source,
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate a complete in-memory byte buffer.
pub fn validate_bytes(bytes: &[u8]) -> ValidationReport {
    let mut validator = Validator::new();
    validator.feed(bytes);
    validator.finish()
}

/// Validate a complete in-memory string.
pub fn validate_str(input: &str) -> ValidationReport {
    validate_bytes(input.as_bytes())
}

/// Feed a reader through a validator in fixed-size chunks.
pub fn validate_reader<R: Read>(
    mut reader: R,
    filename: &str,
) -> Result<ValidationReport, ScanError> {
    let mut validator = Validator::builder().filename(filename).build();
    let mut chunk = [0u8; 64 * 1024];
    loop {
        let n = reader.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        validator.feed(&chunk[..n]);
    }
    Ok(validator.finish())
}
