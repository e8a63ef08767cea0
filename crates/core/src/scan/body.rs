//! Body-section column framing.
//!
//! Each tab-separated column of a record has its own state with its own
//! byte class, so an unconsumable byte is reported against the field being
//! parsed, with the field name in the message. Tabs advance the column
//! chain; a newline is legal once the eight mandatory columns are in.

use super::classes::*;
use super::{Scanner, State};
use crate::policy::{BodyColumn, ErrorPolicy, ParsePolicy};
use vcf_lint_diagnostics::codes;

impl Scanner {
    pub(super) fn step_body(
        &mut self,
        b: u8,
        policy: &mut dyn ParsePolicy,
        errors: &mut dyn ErrorPolicy,
    ) {
        if self.state == State::BodyLineStart {
            match b {
                b'\n' => self.body_error(
                    b,
                    policy,
                    errors,
                    codes::BODY,
                    Some("Empty line in the body section".into()),
                ),
                _ if is_chromosome_byte(b) => {
                    self.tok(b, policy);
                    self.state = State::BodyChromosome;
                }
                _ => self.body_error(
                    b,
                    policy,
                    errors,
                    codes::BODY_CHROMOSOME,
                    Some(CHROMOSOME_MSG.into()),
                ),
            }
            return;
        }

        match b {
            b'\t' => {
                let (column, next) = match self.state {
                    State::BodyChromosome => (BodyColumn::Chromosome, State::BodyPosition),
                    State::BodyPosition => (BodyColumn::Position, State::BodyId),
                    State::BodyId => (BodyColumn::Id, State::BodyReference),
                    State::BodyReference => (BodyColumn::Reference, State::BodyAlternate),
                    State::BodyAlternate => (BodyColumn::Alternate, State::BodyQuality),
                    State::BodyQuality => (BodyColumn::Quality, State::BodyFilter),
                    State::BodyFilter => (BodyColumn::Filter, State::BodyInfo),
                    State::BodyInfo => (BodyColumn::Info, State::BodyFormat),
                    State::BodyFormat => (BodyColumn::Format, State::BodySample),
                    State::BodySample => (BodyColumn::Sample, State::BodySample),
                    _ => unreachable!("step_body outside body states"),
                };
                self.tok_end();
                policy.body_field(column, self.cur(), errors);
                self.state = next;
            }
            b'\n' => match self.state {
                // Line end is legal once the INFO column is reached.
                State::BodyInfo | State::BodyFormat | State::BodySample => {
                    let column = match self.state {
                        State::BodyInfo => BodyColumn::Info,
                        State::BodyFormat => BodyColumn::Format,
                        _ => BodyColumn::Sample,
                    };
                    self.tok_end();
                    policy.body_field(column, self.cur(), errors);
                    policy.end_of_body_line(self.cur(), errors);
                    self.state = State::BodyLineStart;
                }
                short => {
                    let have = match short {
                        State::BodyChromosome => 1,
                        State::BodyPosition => 2,
                        State::BodyId => 3,
                        State::BodyReference => 4,
                        State::BodyAlternate => 5,
                        State::BodyQuality => 6,
                        _ => 7,
                    };
                    self.body_error(
                        b,
                        policy,
                        errors,
                        codes::BODY_COLUMN_COUNT,
                        Some(
                            format!(
                                "Record has only {have} of the 8 mandatory tab-separated columns"
                            )
                            .into(),
                        ),
                    );
                }
            },
            _ => {
                let ok = match self.state {
                    State::BodyChromosome => is_chromosome_byte(b),
                    State::BodyPosition => b.is_ascii_digit(),
                    State::BodyId => is_graphic(b),
                    State::BodyReference => is_base(b),
                    State::BodyAlternate => is_graphic(b),
                    State::BodyQuality => is_quality_byte(b),
                    State::BodyFilter => is_graphic(b),
                    State::BodyInfo => is_graphic(b),
                    State::BodyFormat => is_format_byte(b),
                    State::BodySample => is_graphic(b),
                    _ => unreachable!("step_body outside body states"),
                };
                if ok {
                    self.tok(b, policy);
                } else {
                    let (code, message) = self.field_byte_error();
                    self.body_error(b, policy, errors, code, Some(message.into()));
                }
            }
        }
    }

    /// Tailored diagnostic for a byte the current field cannot consume.
    fn field_byte_error(&self) -> (&'static str, &'static str) {
        match self.state {
            State::BodyChromosome => (codes::BODY_CHROMOSOME, CHROMOSOME_MSG),
            State::BodyPosition => (codes::BODY_POSITION, "Position must be a positive number"),
            State::BodyId => (
                codes::BODY_ID,
                "ID must be a dot or a semicolon-separated list of strings without whitespace",
            ),
            State::BodyReference => (
                codes::BODY_REFERENCE,
                "Reference must be a non-empty string of bases (A, C, G, T or N)",
            ),
            State::BodyAlternate => (
                codes::BODY_ALTERNATE,
                "Alternate must be a comma-separated list of alleles without whitespace",
            ),
            State::BodyQuality => (
                codes::BODY_QUALITY,
                "Quality must be a dot or a non-negative decimal number",
            ),
            State::BodyFilter => (
                codes::BODY_FILTER,
                "Filter must be a dot or a semicolon-separated list of identifiers",
            ),
            State::BodyInfo => (
                codes::BODY_INFO,
                "Info must be a dot or a semicolon-separated list of key=value pairs",
            ),
            State::BodyFormat => (
                codes::BODY_FORMAT,
                "Format must be a colon-separated list of alphanumeric keys",
            ),
            _ => (
                codes::BODY_SAMPLE,
                "Sample fields must be colon-separated values without whitespace",
            ),
        }
    }
}

const CHROMOSOME_MSG: &str =
    "Chromosome must be a string without colons or whitespace, optionally wrapped in angle \
     brackets";
