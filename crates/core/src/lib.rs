//! vcf-lint core library.
//!
//! A streaming validator for the Variant Call Format (v4.1–v4.3): a
//! byte-at-a-time scanner state machine, a token-assembly parse policy, a
//! cross-line semantic checker, and an accumulating diagnostic sink. The
//! main entry points are [`validate_str`]/[`validate_bytes`] for in-memory
//! input, [`validate_reader`] for streams, and [`Validator`] for
//! caller-driven chunked feeding.

#![warn(missing_docs)]

/// Token assembly: the parse policy implementation.
pub mod assemble;
/// Data model: source description and body records.
pub mod model;
/// Policy traits wired into the scanner.
pub mod policy;
/// The byte scanner state machine.
pub mod scan;
/// Cross-line semantic checks.
pub mod semantic;
/// Per-scan shared state.
pub mod state;
/// Token-level field grammars.
pub mod syntax;
/// The validator facade.
pub mod validator;

// ── Convenience re-exports ──────────────────────────────────────────────
// Flat imports for the most common entry points. The full module paths
// remain available for less common types.

// Validator
pub use validator::{
    validate_bytes, validate_reader, validate_str, ScanError, ValidationReport, Validator,
    ValidatorBuilder,
};

// Scanner
pub use scan::Scanner;

// Policies
pub use policy::{BodyColumn, Cursor, ErrorPolicy, MetaKeyHint, ParsePolicy};

// Model
pub use model::{MetaEntry, MetaValue, Record, Source, VcfVersion};

// State
pub use state::ParsingState;

// Diagnostics (re-exported from the diagnostics crate)
pub use vcf_lint_diagnostics::{codes, Diagnostic, Section, Severity};
