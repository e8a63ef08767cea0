//! Diagnostic rendering.
//!
//! Pretty output converts the validator's line/column diagnostics into
//! ariadne reports with source context; JSON output emits the structured
//! diagnostics for tooling. Pretty goes to stderr so stdout stays clean
//! for data (JSON, the header dump).

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use vcf_lint_diagnostics::{Diagnostic, LineIndex, Severity};

// ── Output format ───────────────────────────────────────────────────────

/// Output format for diagnostic rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured, source-annotated output (ariadne).
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Resolve an explicit choice, or detect from whether stdout is a TTY.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Severity mapping ────────────────────────────────────────────────────

fn report_kind(severity: &Severity) -> ReportKind<'static> {
    match severity {
        Severity::Error => ReportKind::Error,
        Severity::Warning => ReportKind::Warning,
        _ => ReportKind::Advice,
    }
}

fn severity_color(severity: &Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
        _ => Color::Blue,
    }
}

// ── Pretty rendering ────────────────────────────────────────────────────

/// Render diagnostics in pretty (ariadne) format to stderr.
///
/// Line/column positions are anchored back onto byte offsets through a
/// [`LineIndex`] over the in-memory source. Column-less diagnostics are
/// anchored at the start of their line.
pub(crate) fn render_diagnostics_pretty(source: &str, filename: &str, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }

    let index = LineIndex::new(source);
    let config = Config::default().with_compact(false);
    let mut cache = (filename, Source::from(source));

    for diag in diagnostics {
        let offset = index.offset(diag.line, diag.column.unwrap_or(1));
        match offset {
            Some(start) => {
                // A one-byte span keeps the caret on the offending column.
                let end = (start + 1).min(source.len()).max(start);
                let mut builder =
                    Report::build(report_kind(&diag.severity), (filename, start..end))
                        .with_code(diag.id.as_ref())
                        .with_message(&diag.message)
                        .with_config(config);
                builder = builder.with_label(
                    Label::new((filename, start..end))
                        .with_message(format!("in the {} section", diag.section))
                        .with_color(severity_color(&diag.severity)),
                );
                if let Some(explanation) = diag.explain() {
                    builder = builder.with_help(explanation);
                }
                builder.finish().eprint(&mut cache).ok();
            }
            None => {
                // Position past the indexed source (EOF diagnostics).
                eprintln!("{diag}");
                if let Some(explanation) = diag.explain() {
                    eprintln!("  = help: {explanation}");
                }
            }
        }
    }
}

// ── JSON rendering ──────────────────────────────────────────────────────

/// Render diagnostics as a JSON array to stdout.
pub(crate) fn render_diagnostics_json(diagnostics: &[Diagnostic]) {
    let json =
        serde_json::to_string_pretty(diagnostics).expect("Diagnostic serialization cannot fail");
    println!("{json}");
}

// ── Unified entry point ─────────────────────────────────────────────────

/// Render diagnostics in the given format.
pub(crate) fn render_diagnostics(
    source: &str,
    filename: &str,
    diagnostics: &[Diagnostic],
    format: Format,
) {
    match format {
        Format::Pretty => render_diagnostics_pretty(source, filename, diagnostics),
        Format::Json => render_diagnostics_json(diagnostics),
    }
}

// ── Summary line ────────────────────────────────────────────────────────

/// Print a coloured summary line showing error/warning counts.
///
/// Example: `2 errors, 1 warning`
pub(crate) fn print_summary(diagnostics: &[Diagnostic]) {
    use ariadne::Fmt;

    let (mut errors, mut warnings) = (0usize, 0usize);
    for d in diagnostics {
        match d.severity {
            Severity::Error => errors += 1,
            Severity::Warning => warnings += 1,
            _ => {}
        }
    }
    if errors + warnings == 0 {
        return;
    }

    let mut parts = Vec::new();
    if errors > 0 {
        let s = if errors == 1 { "" } else { "s" };
        parts.push(format!("{}", format!("{errors} error{s}").fg(Color::Red)));
    }
    if warnings > 0 {
        let s = if warnings == 1 { "" } else { "s" };
        parts.push(format!(
            "{}",
            format!("{warnings} warning{s}").fg(Color::Yellow)
        ));
    }
    eprintln!("{}", parts.join(", "));
}
