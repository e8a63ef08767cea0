//! Shared helpers for `vcf_lint_core` integration tests.

#![allow(unreachable_pub)]

use vcf_lint_core::{Diagnostic, Severity, ValidationReport};

/// The minimal 8-column header line (no FORMAT, no samples).
#[allow(dead_code)]
pub const HEADER: &str = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO";

/// Header with a FORMAT column and one sample `NA001`.
#[allow(dead_code)]
pub const HEADER_ONE_SAMPLE: &str = "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tNA001";

/// Header with a FORMAT column and samples `NA001`, `NA002`.
#[allow(dead_code)]
pub const HEADER_TWO_SAMPLES: &str =
    "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tNA001\tNA002";

/// A prelude that declares everything the common fixtures use, so tests
/// exercising one rule see no unrelated warnings.
#[allow(dead_code)]
pub fn declared_prelude() -> String {
    "##fileformat=VCFv4.1\n\
     ##reference=file:///ref.fa\n\
     ##contig=<ID=1>\n\
     ##contig=<ID=2>\n"
        .to_string()
}

/// Collect diagnostic codes in order.
#[allow(dead_code)]
pub fn codes_of(report: &ValidationReport) -> Vec<String> {
    report
        .diagnostics
        .iter()
        .map(|d| d.id.to_string())
        .collect()
}

/// All error-severity diagnostics.
#[allow(dead_code)]
pub fn errors_of(report: &ValidationReport) -> Vec<&Diagnostic> {
    report
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .collect()
}

/// All warning-severity diagnostics.
#[allow(dead_code)]
pub fn warnings_of(report: &ValidationReport) -> Vec<&Diagnostic> {
    report
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .collect()
}

/// First diagnostic with the given code.
#[allow(dead_code)]
pub fn find_diag<'a>(report: &'a ValidationReport, code: &str) -> &'a Diagnostic {
    report
        .diagnostics
        .iter()
        .find(|d| d.id == code)
        .unwrap_or_else(|| panic!("no diagnostic {code} in {:?}", report.diagnostics))
}

/// Assert the report contains no error-severity diagnostics.
#[allow(dead_code)]
pub fn assert_no_errors(report: &ValidationReport) {
    let errors = errors_of(report);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}
