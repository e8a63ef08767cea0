//! Token assembly: the [`ParsePolicy`] implementation.
//!
//! [`LineAssembler`] owns the reusable token accumulator and the per-line
//! accumulators (partial meta entry, header samples, partial record). Line
//! completion events drain them: field syntax validators run against the
//! finished tokens, completed constructs are committed to the
//! [`ParsingState`], and records are handed to the semantic checker and the
//! optional consumer callback before being released.

use crate::model::{AltAllele, InfoPair, MetaAttr, MetaEntry, MetaValue, Record, VcfVersion};
use crate::policy::{BodyColumn, Cursor, ErrorPolicy, MetaKeyHint, ParsePolicy};
use crate::semantic;
use crate::state::ParsingState;
use crate::syntax::{alternate, fields, info, meta};
use std::collections::HashSet;
use vcf_lint_diagnostics::{codes, Section};

/// Callback invoked for every accepted record.
pub type RecordConsumer = Box<dyn FnMut(&Record)>;

/// A partially assembled meta line.
struct PartialMeta {
    line: u64,
    category: String,
    attrs: Vec<MetaAttr>,
    attr_keys_seen: HashSet<String>,
    pending_attr: Option<String>,
    flat: Option<String>,
}

/// A partially assembled body record.
#[derive(Default)]
struct PartialRecord {
    started: bool,
    line: u64,
    column_count: usize,
    syntax_error: bool,
    chromosome: Option<String>,
    position: Option<u64>,
    ids: Vec<String>,
    reference: Option<String>,
    alternates: Vec<AltAllele>,
    quality: Option<f64>,
    filters: Vec<String>,
    info: Vec<InfoPair>,
    format: Vec<String>,
    samples: Vec<String>,
}

/// The parse policy: materializes logical values from token events.
pub struct LineAssembler {
    state: ParsingState,
    buf: Vec<u8>,
    tok_start: Option<Cursor>,
    meta: Option<PartialMeta>,
    header_samples: Vec<String>,
    record: PartialRecord,
    /// Open-question policy switch: when true, a body line with grammar
    /// errors still runs the semantic checks over the fields that parsed.
    semantics_after_syntax_error: bool,
    on_record: Option<RecordConsumer>,
}

impl LineAssembler {
    /// Fresh assembler for one source.
    pub fn new(
        filename: impl Into<String>,
        semantics_after_syntax_error: bool,
        on_record: Option<RecordConsumer>,
    ) -> Self {
        Self {
            state: ParsingState::new(filename),
            buf: Vec::with_capacity(256),
            tok_start: None,
            meta: None,
            header_samples: Vec::new(),
            record: PartialRecord::default(),
            semantics_after_syntax_error,
            on_record,
        }
    }

    /// The accumulated parsing state.
    pub fn state(&self) -> &ParsingState {
        &self.state
    }

    /// Consume the assembler, yielding the final parsing state.
    pub fn into_state(self) -> ParsingState {
        self.state
    }

    /// Drain the token buffer. Returns the text and where it began; the
    /// position falls back to `at` for empty tokens.
    fn take_token(&mut self, at: Cursor) -> (String, Cursor) {
        let text = String::from_utf8_lossy(&self.buf).into_owned();
        self.buf.clear();
        (text, self.tok_start.take().unwrap_or(at))
    }
}

impl ParsePolicy for LineAssembler {
    fn token_begin(&mut self, at: Cursor) {
        self.tok_start = Some(at);
    }

    fn token_byte(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    fn fileformat(&mut self, errors: &mut dyn ErrorPolicy) {
        let (text, at) = self.take_token(Cursor { line: 1, column: 1 });
        match VcfVersion::parse(&text) {
            Some(version) => self.state.source.version = Some(version),
            None => errors.fileformat_section_error(
                at.line,
                Some(at.column),
                codes::FILEFORMAT_VERSION,
                Some(
                    format!(
                        "Fileformat declaration '{text}' is not one of VCFv4.1, VCFv4.2 or \
                         VCFv4.3"
                    )
                    .into(),
                ),
            ),
        }
    }

    fn meta_key(&mut self, at: Cursor) -> MetaKeyHint {
        let (category, _) = self.take_token(at);
        let hint = if category == "pedigreeDB" {
            MetaKeyHint::AngleFreeform
        } else {
            MetaKeyHint::Default
        };
        self.meta = Some(PartialMeta {
            line: at.line,
            category,
            attrs: Vec::new(),
            attr_keys_seen: HashSet::new(),
            pending_attr: None,
            flat: None,
        });
        hint
    }

    fn meta_value(&mut self) {
        let text = String::from_utf8_lossy(&self.buf).into_owned();
        self.buf.clear();
        self.tok_start = None;
        if let Some(meta) = &mut self.meta {
            meta.flat = Some(text);
        }
    }

    fn meta_attribute_key(&mut self, errors: &mut dyn ErrorPolicy) {
        let at = self.tok_start.unwrap_or(Cursor { line: 0, column: 0 });
        let (key, _) = self.take_token(at);
        if let Some(meta) = &mut self.meta {
            if !meta.attr_keys_seen.insert(key.clone()) {
                errors.meta_section_error(
                    meta.line,
                    Some(at.column),
                    codes::META_DUPLICATE_ATTRIBUTE,
                    Some(format!("Attribute '{key}' appears more than once").into()),
                );
            }
            meta.pending_attr = Some(key);
        }
    }

    fn meta_attribute_value(&mut self, quoted: bool) {
        let value = String::from_utf8_lossy(&self.buf).into_owned();
        self.buf.clear();
        self.tok_start = None;
        if let Some(meta) = &mut self.meta {
            if let Some(key) = meta.pending_attr.take() {
                meta.attrs.push(MetaAttr { key, value, quoted });
            }
        }
    }

    fn end_of_meta_line(&mut self, _at: Cursor, errors: &mut dyn ErrorPolicy) {
        let Some(partial) = self.meta.take() else {
            return;
        };
        let value = match partial.flat {
            Some(flat) => MetaValue::Flat(flat),
            None => MetaValue::Structured(partial.attrs),
        };
        let id = value.attribute("ID").map(str::to_string);
        let entry = MetaEntry {
            line: partial.line,
            category: partial.category,
            id,
            value,
        };
        for (code, message) in meta::validate_entry(&entry) {
            errors.meta_section_error(entry.line, None, code, Some(message.into()));
        }
        semantic::check_meta_entry(&self.state, &entry, errors);
        self.state.source.push_entry(entry);
    }

    fn sample_name(&mut self, errors: &mut dyn ErrorPolicy) {
        let at = self.tok_start.unwrap_or(Cursor { line: 0, column: 0 });
        let (name, _) = self.take_token(at);
        if self.header_samples.contains(&name) {
            errors.header_section_error(
                at.line,
                Some(at.column),
                codes::HEADER_DUPLICATE_SAMPLE,
                Some(format!("Duplicate sample name '{name}'").into()),
            );
        }
        self.header_samples.push(name);
    }

    fn end_of_header_line(&mut self, at: Cursor, errors: &mut dyn ErrorPolicy) {
        self.state.source.sample_names = std::mem::take(&mut self.header_samples);
        self.state.source.header_seen = true;
        semantic::check_header(&self.state, at.line, errors);
    }

    fn body_field(&mut self, column: BodyColumn, at: Cursor, errors: &mut dyn ErrorPolicy) {
        let (text, start) = self.take_token(at);
        if !self.record.started {
            self.record.started = true;
            self.record.line = start.line;
        }
        self.record.column_count += 1;

        // One error per independently validated sub-field; the record is
        // still assembled as far as it parses.
        let fail = |code: &'static str, message: String, errors: &mut dyn ErrorPolicy| {
            errors.body_section_error(start.line, Some(start.column), code, Some(message.into()));
        };
        match column {
            BodyColumn::Chromosome => match fields::chromosome(&text) {
                Ok(chromosome) => self.record.chromosome = Some(chromosome),
                Err(message) => {
                    self.record.syntax_error = true;
                    fail(codes::BODY_CHROMOSOME, message, errors);
                }
            },
            BodyColumn::Position => match fields::position(&text) {
                Ok(position) => self.record.position = Some(position),
                Err(message) => {
                    self.record.syntax_error = true;
                    fail(codes::BODY_POSITION, message, errors);
                }
            },
            BodyColumn::Id => match fields::ids_list(&text) {
                Ok(ids) => self.record.ids = ids,
                Err(message) => {
                    self.record.syntax_error = true;
                    fail(codes::BODY_ID, message, errors);
                }
            },
            BodyColumn::Reference => match fields::reference(&text) {
                Ok(reference) => self.record.reference = Some(reference),
                Err(message) => {
                    self.record.syntax_error = true;
                    fail(codes::BODY_REFERENCE, message, errors);
                }
            },
            BodyColumn::Alternate => {
                let (alleles, issues) = alternate::alternate_list(&text);
                self.record.alternates = alleles;
                for message in issues {
                    self.record.syntax_error = true;
                    fail(codes::BODY_ALTERNATE, message, errors);
                }
            }
            BodyColumn::Quality => match fields::quality(&text) {
                Ok(quality) => self.record.quality = quality,
                Err(message) => {
                    self.record.syntax_error = true;
                    fail(codes::BODY_QUALITY, message, errors);
                }
            },
            BodyColumn::Filter => match fields::filter_list(&text) {
                Ok(filters) => self.record.filters = filters,
                Err(message) => {
                    self.record.syntax_error = true;
                    fail(codes::BODY_FILTER, message, errors);
                }
            },
            BodyColumn::Info => {
                let (pairs, issues) = info::info_pairs(&text);
                self.record.info = pairs;
                for message in issues {
                    self.record.syntax_error = true;
                    fail(codes::BODY_INFO, message, errors);
                }
            }
            BodyColumn::Format => match fields::format_keys(&text) {
                Ok(keys) => self.record.format = keys,
                Err(message) => {
                    self.record.syntax_error = true;
                    fail(codes::BODY_FORMAT, message, errors);
                }
            },
            BodyColumn::Sample => self.record.samples.push(text),
        }
    }

    fn end_of_body_line(&mut self, _at: Cursor, errors: &mut dyn ErrorPolicy) {
        let partial = std::mem::take(&mut self.record);
        if !partial.started {
            return;
        }
        let mut syntax_error = partial.syntax_error;
        if self.state.source.header_seen {
            let expected = self.state.source.expected_columns();
            if partial.column_count != expected {
                syntax_error = true;
                errors.body_section_error(
                    partial.line,
                    None,
                    codes::BODY_COLUMN_COUNT,
                    Some(
                        format!(
                            "Record has {} columns but the header declares {}",
                            partial.column_count, expected
                        )
                        .into(),
                    ),
                );
            }
        }
        if syntax_error && !self.semantics_after_syntax_error {
            return;
        }

        let chromosome = partial.chromosome.unwrap_or_default();
        // A missing position (possible only on partially parsed lines)
        // must not disturb the per-chromosome ordering state: substitute
        // the current high-water mark, which compares as equal.
        let position = partial.position.unwrap_or_else(|| {
            self.state
                .max_position_seen
                .get(&chromosome)
                .copied()
                .unwrap_or(0)
        });
        let record = Record {
            line: partial.line,
            chromosome,
            position,
            ids: partial.ids,
            reference: partial.reference.unwrap_or_default(),
            alternates: partial.alternates,
            quality: partial.quality,
            filters: partial.filters,
            info: partial.info,
            format: partial.format,
            samples: partial.samples,
        };
        semantic::check_record(&mut self.state, &record, errors);
        if !syntax_error {
            self.state.record_count += 1;
            if let Some(consumer) = &mut self.on_record {
                consumer(&record);
            }
        }
    }

    fn line_aborted(&mut self, _section: Section) {
        self.buf.clear();
        self.tok_start = None;
        self.meta = None;
        self.header_samples.clear();
        self.record = PartialRecord::default();
    }
}
