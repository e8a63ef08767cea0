//! vcf-lint CLI — validate VCF files against the v4.1–v4.3 grammar and
//! the cross-line semantic rules.

mod render;

use std::fs::File;
use std::io::Read;
use std::process;
use std::time;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use vcf_lint_core::{Severity, ValidationReport, Validator};

use crate::render::{print_summary, render_diagnostics, Format};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "vcf-lint",
    version,
    about = "Validate Variant Call Format files (VCF 4.1-4.3)"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Validate a VCF file and report every grammar error and semantic
    /// warning in source order.
    #[command(visible_aliases = ["validate", "check"])]
    Lint {
        /// VCF file to validate ('-' for stdin; .gz input is detected).
        #[arg(value_name = "FILE")]
        file: String,
        /// Treat warnings as errors (non-zero exit on warnings).
        #[arg(long)]
        strict: bool,
        /// Stop at the first diagnostic instead of accumulating.
        #[arg(long)]
        stop_after_first: bool,
        /// Emit an informational "Lines read: N" event every N lines.
        #[arg(long, value_name = "N")]
        progress_every: Option<u64>,
        /// Run the semantic checks over body lines that failed the
        /// grammar, using the fields that did parse.
        #[arg(long)]
        partial_semantics: bool,
    },

    /// Print the parsed source summary (version, meta entry counts,
    /// sample names) as JSON.
    Header {
        /// VCF file to inspect ('-' for stdin; .gz input is detected).
        #[arg(value_name = "FILE")]
        file: String,
    },

    /// Explain a diagnostic code (e.g. VCF0403).
    Explain { id: String },
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let format = Format::resolve_or_detect(cli.output.as_deref());

    match cli.cmd {
        Cmd::Lint {
            file,
            strict,
            stop_after_first,
            progress_every,
            partial_semantics,
        } => cmd_lint(LintOpts {
            file: &file,
            strict,
            stop_after_first,
            progress_every,
            partial_semantics,
            format,
        }),
        Cmd::Header { file } => cmd_header(&file),
        Cmd::Explain { id } => cmd_explain(&id, format),
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

// ── Input handling ──────────────────────────────────────────────────────

/// Read the whole input, transparently decompressing gzip. The magic bytes
/// decide; the validator core always sees uncompressed text.
fn read_input(file: &str) -> Result<Vec<u8>> {
    let raw = if file == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        let mut buf = Vec::new();
        File::open(file)
            .with_context(|| format!("failed to open '{file}'"))?
            .read_to_end(&mut buf)
            .with_context(|| format!("failed to read '{file}'"))?;
        buf
    };

    if raw.starts_with(&[0x1f, 0x8b]) {
        log::debug!("gzip input detected, decompressing");
        let mut text = Vec::new();
        flate2::read::MultiGzDecoder::new(raw.as_slice())
            .read_to_end(&mut text)
            .with_context(|| format!("failed to decompress '{file}'"))?;
        Ok(text)
    } else {
        Ok(raw)
    }
}

fn display_name(file: &str) -> &str {
    if file == "-" {
        "<stdin>"
    } else {
        file
    }
}

// ── Commands ────────────────────────────────────────────────────────────

struct LintOpts<'a> {
    file: &'a str,
    strict: bool,
    stop_after_first: bool,
    progress_every: Option<u64>,
    partial_semantics: bool,
    format: Format,
}

fn cmd_lint(opts: LintOpts<'_>) -> Result<()> {
    let start = time::Instant::now();
    let input = read_input(opts.file)?;
    let filename = display_name(opts.file);
    log::debug!("validating {filename} ({} bytes)", input.len());

    let mut builder = Validator::builder()
        .filename(filename)
        .stop_after_first(opts.stop_after_first)
        .semantics_after_syntax_error(opts.partial_semantics);
    if let Some(every) = opts.progress_every {
        builder = builder.progress_every(every);
    }
    let mut validator = builder.build();
    // Chunked feeding: the scanner is restartable, and large files never
    // need a second in-memory copy.
    for chunk in input.chunks(64 * 1024) {
        validator.feed(chunk);
    }
    let report = validator.finish();
    log::info!(
        "{filename}: {} records, {} errors, {} warnings in {:.2?}",
        report.record_count,
        report.error_count(),
        report.warning_count(),
        start.elapsed()
    );

    match opts.format {
        Format::Json => {
            let out = serde_json::json!({
                "ok": report.ok,
                "file": filename,
                "record_count": report.record_count,
                "diagnostics": report.diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            let source = String::from_utf8_lossy(&input);
            render_diagnostics(&source, filename, &report.diagnostics, opts.format);
            print_summary(&report.diagnostics);
            if report.ok {
                eprintln!("lint ok");
            }
        }
    }

    exit_for(&report, opts.strict);
    Ok(())
}

fn cmd_header(file: &str) -> Result<()> {
    let input = read_input(file)?;
    let mut validator = Validator::builder()
        .filename(display_name(file))
        .build();
    validator.feed(&input);
    let report = validator.finish();

    let out = serde_json::json!({
        "file": report.source.filename,
        "version": report.source.version,
        "meta_entries": report.source.category_counts(),
        "sample_names": report.source.sample_names,
        "header_seen": report.source.header_seen,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_explain(id: &str, format: Format) -> Result<()> {
    match vcf_lint_core::codes::explain(id) {
        Some(explanation) => match format {
            Format::Json => {
                let out = serde_json::json!({ "id": id, "explanation": explanation });
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            Format::Pretty => {
                println!("{id}: {explanation}");
            }
        },
        None => {
            anyhow::bail!("unknown diagnostic code '{id}'");
        }
    }
    Ok(())
}

/// Exit non-zero when errors were seen, or (with --strict) when warnings
/// were. A clean-with-warnings run exits zero.
fn exit_for(report: &ValidationReport, strict: bool) {
    let has_errors = report
        .diagnostics
        .iter()
        .any(|d| d.severity == Severity::Error);
    let has_warnings = report
        .diagnostics
        .iter()
        .any(|d| d.severity == Severity::Warning);
    if has_errors || (strict && has_warnings) {
        process::exit(1);
    }
}
