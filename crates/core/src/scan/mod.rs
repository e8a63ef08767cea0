//! The byte scanner state machine.
//!
//! A deterministic, non-backtracking automaton over input bytes. States
//! encode the grammatical position (inside the fileformat literal, inside a
//! structured meta attribute, inside the Nth body column, …); transitions
//! emit token events into a [`ParsePolicy`] and section errors into an
//! [`ErrorPolicy`]. On any unconsumable byte the scanner reports a tailored
//! error, swallows bytes through the next `\n` (`MetaSkip`/`BodySkip`), and
//! re-enters the correct section state, so one malformed line costs at most
//! one resynchronization.
//!
//! The scanner is restartable across `feed` calls: the in-flight state,
//! including line/column counters, lives entirely in the [`Scanner`], so
//! diagnostics are byte-identical regardless of input chunking.

mod body;
mod classes;

use crate::policy::{Cursor, ErrorPolicy, MetaKeyHint, ParsePolicy};
use classes::*;
use std::borrow::Cow;
use vcf_lint_diagnostics::{codes, Section};

const FILEFORMAT_PREFIX: &[u8] = b"##fileformat=";
const HEADER_PREFIX: &[u8] = b"#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO";
const FORMAT_LITERAL: &[u8] = b"FORMAT";

/// Grammatical position of the next input byte.
///
/// Literal states carry the index of the next byte to match; every other
/// position is encoded structurally. Body columns get one state each so the
/// per-byte dispatch stays a single `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    FileformatLiteral(usize),
    FileformatVersion,
    MetaLineStart,
    MetaHash,
    MetaKey,
    MetaValueStart,
    MetaFreeform,
    MetaAttrKey,
    MetaAttrValueStart,
    MetaAttrValueBare,
    MetaAttrValueQuoted,
    MetaAttrValueQuotedEscape,
    MetaAttrValueQuotedEnd,
    MetaEntryClose,
    HeaderLiteral(usize),
    HeaderAfterInfo,
    HeaderFormatLiteral(usize),
    HeaderAfterFormat,
    HeaderSample,
    BodyLineStart,
    BodyChromosome,
    BodyPosition,
    BodyId,
    BodyReference,
    BodyAlternate,
    BodyQuality,
    BodyFilter,
    BodyInfo,
    BodyFormat,
    BodySample,
    MetaSkip,
    BodySkip,
    Halted,
}

/// Which skip sub-automaton an error resynchronizes into.
#[derive(Debug, Clone, Copy)]
enum SkipTo {
    /// Back to the meta section (fileformat and meta errors, and `#…` lines
    /// that are neither meta nor header).
    Meta,
    /// Into the body section (header and body errors).
    Body,
}

/// The streaming VCF scanner.
///
/// Construct once per source, call [`Scanner::feed`] any number of times,
/// then [`Scanner::end_of_input`] exactly once. [`Scanner::is_accepting`]
/// is true iff the input so far conforms to the grammar of a complete VCF
/// and the scanner sits at a clean line boundary in the body section.
#[derive(Debug)]
pub struct Scanner {
    state: State,
    /// 1-based line of the byte being processed.
    line: u64,
    /// 1-based column of the byte being processed; 0 between lines.
    column: u64,
    /// True while inside a lexeme (token_begin emitted, token_end pending).
    in_token: bool,
    /// False once any section error has been reported.
    clean: bool,
    /// Set by the error helpers during one `step`; lets end-of-input
    /// handling see whether the synthesized line end itself failed.
    errored_in_step: bool,
    eof: bool,
    /// Hint for the current meta line's value shape, set by the policy.
    meta_hint: MetaKeyHint,
    /// Emit an informational progress event every N lines.
    progress_every: Option<u64>,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    /// Create a scanner positioned at the start of the fileformat line.
    pub fn new() -> Self {
        Self {
            state: State::FileformatLiteral(0),
            line: 1,
            column: 0,
            in_token: false,
            clean: true,
            errored_in_step: false,
            eof: false,
            meta_hint: MetaKeyHint::Default,
            progress_every: None,
        }
    }

    /// Route a `Lines read: N` info event through the sink every `every`
    /// lines. `None` disables progress reporting.
    pub fn progress_every(&mut self, every: Option<u64>) {
        self.progress_every = match every {
            Some(0) => None,
            other => other,
        };
    }

    /// Consume a chunk of input. May be called any number of times; chunk
    /// boundaries are invisible to the grammar.
    pub fn feed(
        &mut self,
        bytes: &[u8],
        policy: &mut dyn ParsePolicy,
        errors: &mut dyn ErrorPolicy,
    ) {
        for &b in bytes {
            if self.state == State::Halted {
                return;
            }
            self.column += 1;
            self.step(b, policy, errors);
            if b == b'\n' {
                self.line += 1;
                self.column = 0;
                if let Some(every) = self.progress_every {
                    let read = self.line - 1;
                    if read % every == 0 {
                        errors.info_event(read, codes::PROGRESS, format!("Lines read: {read}"));
                    }
                }
                if errors.halt() && self.state != State::Halted {
                    self.state = State::Halted;
                }
            }
        }
    }

    /// Signal end of input. A pending line end is synthesized where one is
    /// legal (a complete final record, meta entry, or header line without a
    /// trailing newline); an incomplete construct reports its section error.
    pub fn end_of_input(&mut self, policy: &mut dyn ParsePolicy, errors: &mut dyn ErrorPolicy) {
        if self.eof {
            return;
        }
        self.eof = true;
        match self.state {
            State::Halted | State::MetaSkip | State::BodySkip | State::BodyLineStart => {}
            State::MetaLineStart => self.missing_header(errors),
            _ => {
                self.column += 1;
                self.errored_in_step = false;
                self.step(b'\n', policy, errors);
                if self.state == State::MetaLineStart && !self.errored_in_step {
                    self.missing_header(errors);
                }
            }
        }
    }

    /// True iff the whole input so far conforms to the grammar of a
    /// complete VCF (fileformat + meta + header + zero or more records).
    pub fn is_accepting(&self) -> bool {
        self.clean && self.state == State::BodyLineStart
    }

    /// 1-based number of the line currently being scanned.
    pub fn line(&self) -> u64 {
        self.line
    }

    // ── Dispatch ────────────────────────────────────────────────────────

    fn step(&mut self, b: u8, policy: &mut dyn ParsePolicy, errors: &mut dyn ErrorPolicy) {
        match self.state {
            State::FileformatLiteral(i) => {
                if b == FILEFORMAT_PREFIX[i] {
                    self.state = if i + 1 == FILEFORMAT_PREFIX.len() {
                        State::FileformatVersion
                    } else {
                        State::FileformatLiteral(i + 1)
                    };
                } else {
                    self.fileformat_error(
                        b,
                        policy,
                        errors,
                        codes::FILEFORMAT,
                        Some("The file must begin with a '##fileformat=VCFvX.Y' declaration".into()),
                    );
                }
            }
            State::FileformatVersion => {
                if b == b'\n' {
                    if self.in_token {
                        self.tok_end();
                        policy.fileformat(errors);
                        self.state = State::MetaLineStart;
                    } else {
                        self.fileformat_error(
                            b,
                            policy,
                            errors,
                            codes::FILEFORMAT_CHARSET,
                            Some(FILEFORMAT_CHARSET_MSG.into()),
                        );
                    }
                } else if is_graphic(b) {
                    self.tok(b, policy);
                } else {
                    self.fileformat_error(
                        b,
                        policy,
                        errors,
                        codes::FILEFORMAT_CHARSET,
                        Some(FILEFORMAT_CHARSET_MSG.into()),
                    );
                }
            }

            // ── Meta section ───────────────────────────────────────────
            State::MetaLineStart => match b {
                b'#' => self.state = State::MetaHash,
                b'\n' => self.meta_error(
                    b,
                    policy,
                    errors,
                    codes::META,
                    Some("Empty line in the meta section".into()),
                ),
                _ => self.meta_error(
                    b,
                    policy,
                    errors,
                    codes::META,
                    Some("Expected a '##' meta line or the '#CHROM' header line".into()),
                ),
            },
            State::MetaHash => match b {
                b'#' => self.state = State::MetaKey,
                b'C' => self.state = State::HeaderLiteral(2),
                _ => {
                    // A '#…' line that is neither meta nor header. Report it
                    // against the header grammar but stay in the meta
                    // section: the header has not been consumed yet.
                    self.clean = false;
                    self.errored_in_step = true;
                    errors.header_section_error(
                        self.line,
                        Some(self.column),
                        codes::HEADER,
                        Some("Header line must start with '#CHROM' followed by the mandatory columns".into()),
                    );
                    self.abort_line(b, policy, Section::Header, SkipTo::Meta, errors);
                }
            },
            State::MetaKey => match b {
                b'=' => {
                    if self.in_token {
                        self.tok_end();
                        self.meta_hint = policy.meta_key(self.cur());
                        self.state = State::MetaValueStart;
                    } else {
                        self.meta_error(
                            b,
                            policy,
                            errors,
                            codes::META_KEY,
                            Some("Meta entry key must not be empty".into()),
                        );
                    }
                }
                b'\n' => self.meta_error(
                    b,
                    policy,
                    errors,
                    codes::META_KEY,
                    Some("Meta entry must be a key=value pair".into()),
                ),
                _ if is_meta_key_byte(b) => self.tok(b, policy),
                _ => self.meta_error(
                    b,
                    policy,
                    errors,
                    codes::META_KEY,
                    Some("Meta entry key contains an invalid character".into()),
                ),
            },
            State::MetaValueStart => match b {
                b'<' if self.meta_hint == MetaKeyHint::Default => {
                    self.state = State::MetaAttrKey;
                }
                b'\n' => self.meta_error(
                    b,
                    policy,
                    errors,
                    codes::META,
                    Some("Meta entry value must not be empty".into()),
                ),
                _ if is_printable(b) => {
                    self.tok(b, policy);
                    self.state = State::MetaFreeform;
                }
                _ => self.meta_error(
                    b,
                    policy,
                    errors,
                    codes::META,
                    Some("Meta entry value contains an invalid character".into()),
                ),
            },
            State::MetaFreeform => match b {
                b'\n' => {
                    self.tok_end();
                    policy.meta_value();
                    policy.end_of_meta_line(self.cur(), errors);
                    self.state = State::MetaLineStart;
                }
                _ if is_printable(b) => self.tok(b, policy),
                _ => self.meta_error(
                    b,
                    policy,
                    errors,
                    codes::META,
                    Some("Meta entry value contains an invalid character".into()),
                ),
            },
            State::MetaAttrKey => match b {
                b'=' => {
                    if self.in_token {
                        self.tok_end();
                        policy.meta_attribute_key(errors);
                        self.state = State::MetaAttrValueStart;
                    } else {
                        self.meta_error(
                            b,
                            policy,
                            errors,
                            codes::META_ATTRIBUTE,
                            Some("Attribute name must not be empty".into()),
                        );
                    }
                }
                b'\n' => self.meta_error(
                    b,
                    policy,
                    errors,
                    codes::META_ATTRIBUTE,
                    Some(META_UNCLOSED_MSG.into()),
                ),
                b'>' | b',' => self.meta_error(
                    b,
                    policy,
                    errors,
                    codes::META_ATTRIBUTE,
                    Some("Attribute must be a name=value pair".into()),
                ),
                _ if is_attr_key_byte(b) => self.tok(b, policy),
                _ => self.meta_error(
                    b,
                    policy,
                    errors,
                    codes::META_ATTRIBUTE,
                    Some("Attribute name contains an invalid character".into()),
                ),
            },
            State::MetaAttrValueStart => match b {
                b'"' => self.state = State::MetaAttrValueQuoted,
                b',' | b'>' | b'\n' => self.meta_error(
                    b,
                    policy,
                    errors,
                    codes::META_ATTRIBUTE,
                    Some("Attribute value must not be empty".into()),
                ),
                _ if is_attr_bare_byte(b) => {
                    self.tok(b, policy);
                    self.state = State::MetaAttrValueBare;
                }
                _ => self.meta_error(
                    b,
                    policy,
                    errors,
                    codes::META_ATTRIBUTE,
                    Some("Attribute value contains an invalid character".into()),
                ),
            },
            State::MetaAttrValueBare => match b {
                b',' => {
                    self.tok_end();
                    policy.meta_attribute_value(false);
                    self.state = State::MetaAttrKey;
                }
                b'>' => {
                    self.tok_end();
                    policy.meta_attribute_value(false);
                    self.state = State::MetaEntryClose;
                }
                b'\n' => self.meta_error(
                    b,
                    policy,
                    errors,
                    codes::META_ATTRIBUTE,
                    Some(META_UNCLOSED_MSG.into()),
                ),
                _ if is_attr_bare_byte(b) => self.tok(b, policy),
                _ => self.meta_error(
                    b,
                    policy,
                    errors,
                    codes::META_ATTRIBUTE,
                    Some("Attribute value contains an invalid character".into()),
                ),
            },
            State::MetaAttrValueQuoted => match b {
                b'"' => {
                    self.tok_end();
                    policy.meta_attribute_value(true);
                    self.state = State::MetaAttrValueQuotedEnd;
                }
                b'\\' => self.state = State::MetaAttrValueQuotedEscape,
                b'\n' => self.meta_error(
                    b,
                    policy,
                    errors,
                    codes::META_ATTRIBUTE,
                    Some("Quoted attribute value is not terminated".into()),
                ),
                _ if is_printable(b) => self.tok(b, policy),
                _ => self.meta_error(
                    b,
                    policy,
                    errors,
                    codes::META_ATTRIBUTE,
                    Some("Attribute value contains an invalid character".into()),
                ),
            },
            State::MetaAttrValueQuotedEscape => match b {
                b'"' | b'\\' => {
                    self.tok(b, policy);
                    self.state = State::MetaAttrValueQuoted;
                }
                _ => self.meta_error(
                    b,
                    policy,
                    errors,
                    codes::META_ATTRIBUTE,
                    Some("Unsupported escape sequence in quoted value".into()),
                ),
            },
            State::MetaAttrValueQuotedEnd => match b {
                b',' => self.state = State::MetaAttrKey,
                b'>' => self.state = State::MetaEntryClose,
                b'\n' => self.meta_error(
                    b,
                    policy,
                    errors,
                    codes::META_ATTRIBUTE,
                    Some(META_UNCLOSED_MSG.into()),
                ),
                _ => self.meta_error(
                    b,
                    policy,
                    errors,
                    codes::META_ATTRIBUTE,
                    Some("Expected ',' or '>' after a quoted attribute value".into()),
                ),
            },
            State::MetaEntryClose => match b {
                b'\n' => {
                    policy.end_of_meta_line(self.cur(), errors);
                    self.state = State::MetaLineStart;
                }
                _ => self.meta_error(
                    b,
                    policy,
                    errors,
                    codes::META,
                    Some("Unexpected characters after the closing '>'".into()),
                ),
            },

            // ── Header line ────────────────────────────────────────────
            State::HeaderLiteral(i) => {
                if b == HEADER_PREFIX[i] {
                    self.state = if i + 1 == HEADER_PREFIX.len() {
                        State::HeaderAfterInfo
                    } else {
                        State::HeaderLiteral(i + 1)
                    };
                } else {
                    self.header_error(
                        b,
                        policy,
                        errors,
                        codes::HEADER,
                        Some(
                            "Header line must contain the mandatory columns 'CHROM POS ID REF \
                             ALT QUAL FILTER INFO', tab-separated and in that order"
                                .into(),
                        ),
                    );
                }
            }
            State::HeaderAfterInfo => match b {
                b'\n' => {
                    policy.end_of_header_line(self.cur(), errors);
                    self.state = State::BodyLineStart;
                }
                b'\t' => self.state = State::HeaderFormatLiteral(0),
                _ => self.header_error(
                    b,
                    policy,
                    errors,
                    codes::HEADER,
                    Some("Expected a tab or end of line after the INFO column".into()),
                ),
            },
            State::HeaderFormatLiteral(i) => {
                if b == FORMAT_LITERAL[i] {
                    self.state = if i + 1 == FORMAT_LITERAL.len() {
                        State::HeaderAfterFormat
                    } else {
                        State::HeaderFormatLiteral(i + 1)
                    };
                } else {
                    self.header_error(
                        b,
                        policy,
                        errors,
                        codes::HEADER,
                        Some("Only a FORMAT column and sample names may follow INFO".into()),
                    );
                }
            }
            State::HeaderAfterFormat => match b {
                b'\t' => self.state = State::HeaderSample,
                b'\n' => self.header_error(
                    b,
                    policy,
                    errors,
                    codes::HEADER_SAMPLE,
                    Some("Header declares FORMAT but no sample columns".into()),
                ),
                _ => self.header_error(
                    b,
                    policy,
                    errors,
                    codes::HEADER,
                    Some("Expected a tab after the FORMAT column".into()),
                ),
            },
            State::HeaderSample => match b {
                b'\t' => {
                    if self.in_token {
                        self.tok_end();
                        policy.sample_name(errors);
                    } else {
                        self.header_error(
                            b,
                            policy,
                            errors,
                            codes::HEADER_SAMPLE,
                            Some("Sample name must not be empty".into()),
                        );
                    }
                }
                b'\n' => {
                    if self.in_token {
                        self.tok_end();
                        policy.sample_name(errors);
                        policy.end_of_header_line(self.cur(), errors);
                        self.state = State::BodyLineStart;
                    } else {
                        self.header_error(
                            b,
                            policy,
                            errors,
                            codes::HEADER_SAMPLE,
                            Some("Sample name must not be empty".into()),
                        );
                    }
                }
                _ if is_graphic(b) => self.tok(b, policy),
                _ => self.header_error(
                    b,
                    policy,
                    errors,
                    codes::HEADER_SAMPLE,
                    Some("Sample name contains whitespace or an invalid character".into()),
                ),
            },

            // ── Body section ───────────────────────────────────────────
            State::BodyLineStart
            | State::BodyChromosome
            | State::BodyPosition
            | State::BodyId
            | State::BodyReference
            | State::BodyAlternate
            | State::BodyQuality
            | State::BodyFilter
            | State::BodyInfo
            | State::BodyFormat
            | State::BodySample => self.step_body(b, policy, errors),

            // ── Recovery ───────────────────────────────────────────────
            State::MetaSkip => {
                if b == b'\n' {
                    self.state = State::MetaLineStart;
                }
            }
            State::BodySkip => {
                if b == b'\n' {
                    self.state = State::BodyLineStart;
                }
            }
            State::Halted => {}
        }
    }

    // ── Token plumbing ──────────────────────────────────────────────────

    pub(crate) fn cur(&self) -> Cursor {
        Cursor {
            line: self.line,
            column: self.column,
        }
    }

    pub(crate) fn tok(&mut self, b: u8, policy: &mut dyn ParsePolicy) {
        if !self.in_token {
            self.in_token = true;
            policy.token_begin(self.cur());
        }
        policy.token_byte(b);
    }

    pub(crate) fn tok_end(&mut self) {
        self.in_token = false;
    }

    // ── Error + resynchronization helpers ───────────────────────────────

    fn fileformat_error(
        &mut self,
        b: u8,
        policy: &mut dyn ParsePolicy,
        errors: &mut dyn ErrorPolicy,
        code: &'static str,
        message: Option<Cow<'static, str>>,
    ) {
        self.clean = false;
        self.errored_in_step = true;
        errors.fileformat_section_error(self.line, Some(self.column), code, message);
        self.abort_line(b, policy, Section::Fileformat, SkipTo::Meta, errors);
    }

    fn meta_error(
        &mut self,
        b: u8,
        policy: &mut dyn ParsePolicy,
        errors: &mut dyn ErrorPolicy,
        code: &'static str,
        message: Option<Cow<'static, str>>,
    ) {
        self.clean = false;
        self.errored_in_step = true;
        errors.meta_section_error(self.line, Some(self.column), code, message);
        self.abort_line(b, policy, Section::Meta, SkipTo::Meta, errors);
    }

    fn header_error(
        &mut self,
        b: u8,
        policy: &mut dyn ParsePolicy,
        errors: &mut dyn ErrorPolicy,
        code: &'static str,
        message: Option<Cow<'static, str>>,
    ) {
        self.clean = false;
        self.errored_in_step = true;
        errors.header_section_error(self.line, Some(self.column), code, message);
        self.abort_line(b, policy, Section::Header, SkipTo::Body, errors);
    }

    pub(crate) fn body_error(
        &mut self,
        b: u8,
        policy: &mut dyn ParsePolicy,
        errors: &mut dyn ErrorPolicy,
        code: &'static str,
        message: Option<Cow<'static, str>>,
    ) {
        self.clean = false;
        self.errored_in_step = true;
        errors.body_section_error(self.line, Some(self.column), code, message);
        self.abort_line(b, policy, Section::Body, SkipTo::Body, errors);
    }

    /// Abandon the current line: drop the in-flight token, tell the policy
    /// to discard its partial state, and resynchronize. When the offending
    /// byte is itself the newline, the skip state is already complete.
    fn abort_line(
        &mut self,
        b: u8,
        policy: &mut dyn ParsePolicy,
        section: Section,
        to: SkipTo,
        errors: &mut dyn ErrorPolicy,
    ) {
        self.in_token = false;
        policy.line_aborted(section);
        self.state = match (to, b == b'\n') {
            (SkipTo::Meta, false) => State::MetaSkip,
            (SkipTo::Meta, true) => State::MetaLineStart,
            (SkipTo::Body, false) => State::BodySkip,
            (SkipTo::Body, true) => State::BodyLineStart,
        };
        if errors.halt() {
            self.state = State::Halted;
        }
    }

    fn missing_header(&mut self, errors: &mut dyn ErrorPolicy) {
        self.clean = false;
        self.errored_in_step = true;
        errors.header_section_error(
            self.line,
            None,
            codes::HEADER_MISSING,
            Some("Header line not found".into()),
        );
    }
}

const FILEFORMAT_CHARSET_MSG: &str =
    "Fileformat must be a sequence of alphanumeric and/or punctuation characters";
const META_UNCLOSED_MSG: &str = "Structured meta entry is not closed with '>'";
