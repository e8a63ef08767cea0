//! Cross-line semantic checks.
//!
//! These rules cannot be expressed at the byte level: they consult the
//! [`ParsingState`] built up from earlier lines. They run after each
//! completed meta line, after the header line, and after each body record.
//! Grammar-level findings (duplicate IDs, invalid genotypes) are errors;
//! declaration-consistency findings are warnings and never alter parsing
//! state beyond their own suppression bookkeeping.

use crate::model::{AltKind, MetaEntry, MetaNumber, MetaType, Record, TypedMeta};
use crate::policy::ErrorPolicy;
use crate::state::ParsingState;
use crate::syntax::info::reserved;
use crate::syntax::{is_integer, is_number};
use vcf_lint_diagnostics::codes;

/// After each meta line: ID uniqueness within the structured category.
/// Runs before the entry is committed to the source.
pub fn check_meta_entry(
    state: &ParsingState,
    entry: &MetaEntry,
    errors: &mut dyn ErrorPolicy,
) {
    let unique_category = crate::model::source::ID_UNIQUE_CATEGORIES
        .contains(&entry.category.as_str());
    if !unique_category {
        return;
    }
    if let Some(id) = &entry.id {
        if state.source.has_id(&entry.category, id) {
            errors.meta_section_error(
                entry.line,
                None,
                codes::META_DUPLICATE_ID,
                Some(format!("Duplicate {} ID '{}'", entry.category, id).into()),
            );
        }
    }
}

/// After the header line: the `reference` meta entry is recommended.
pub fn check_header(state: &ParsingState, line: u64, errors: &mut dyn ErrorPolicy) {
    if !state.source.has_category("reference") {
        errors.header_section_warning(
            line,
            codes::REFERENCE_RECOMMENDED,
            "A reference meta entry ('##reference=...') is recommended but was not found"
                .to_string(),
        );
    }
}

/// After each body record: declaration consistency, ordering, and
/// per-sample genotype checks. Updates the suppression set and the
/// per-chromosome position high-water marks.
pub fn check_record(state: &mut ParsingState, record: &Record, errors: &mut dyn ErrorPolicy) {
    check_contig(state, record, errors);
    check_position_order(state, record, errors);
    check_filters(state, record, errors);
    check_info(state, record, errors);
    check_symbolic_alts(state, record, errors);
    check_samples(record, errors);
}

fn check_contig(state: &mut ParsingState, record: &Record, errors: &mut dyn ErrorPolicy) {
    if record.chromosome.is_empty() || state.source.contig_declared(&record.chromosome) {
        return;
    }
    if state.bad_defined_contigs.insert(record.chromosome.clone()) {
        errors.body_section_warning(
            record.line,
            codes::UNDECLARED_CONTIG,
            format!(
                "Chromosome '{}' is not declared in a contig meta entry",
                record.chromosome
            ),
        );
    }
}

fn check_position_order(state: &mut ParsingState, record: &Record, errors: &mut dyn ErrorPolicy) {
    if record.chromosome.is_empty() {
        return;
    }
    let max = state
        .max_position_seen
        .entry(record.chromosome.clone())
        .or_insert(record.position);
    if record.position < *max {
        errors.body_section_warning(
            record.line,
            codes::POSITION_ORDER,
            format!(
                "Genomic position {}:{} is listed after {}:{}",
                record.chromosome, record.position, record.chromosome, max
            ),
        );
    } else {
        *max = record.position;
    }
}

fn check_filters(state: &ParsingState, record: &Record, errors: &mut dyn ErrorPolicy) {
    for filter in &record.filters {
        if filter != "PASS" && !state.source.filter_declared(filter) {
            errors.body_section_warning(
                record.line,
                codes::UNDECLARED_FILTER,
                format!("Filter '{filter}' is not declared in a FILTER meta entry"),
            );
        }
    }
}

fn check_info(state: &ParsingState, record: &Record, errors: &mut dyn ErrorPolicy) {
    let alt_count = record.alt_count();
    for pair in &record.info {
        if let Some(typed) = state.source.info_typed(&pair.key) {
            check_declared_info(record.line, &pair.key, pair.value.as_deref(), typed, alt_count, errors);
        } else if let Some(typed) = reserved(&pair.key) {
            // The fixed value grammar was already enforced as an error by
            // the syntax layer; only cardinality remains.
            check_info_cardinality(record.line, &pair.key, pair.value.as_deref(), &typed, alt_count, errors);
        } else {
            errors.body_section_warning(
                record.line,
                codes::UNDECLARED_INFO,
                format!(
                    "Info key '{}' is neither a reserved key nor declared in an INFO meta entry",
                    pair.key
                ),
            );
        }
    }
}

fn check_declared_info(
    line: u64,
    key: &str,
    value: Option<&str>,
    typed: &TypedMeta,
    alt_count: usize,
    errors: &mut dyn ErrorPolicy,
) {
    if typed.ty == MetaType::Flag {
        if value.is_some() {
            errors.body_section_warning(
                line,
                codes::INFO_TYPE_MISMATCH,
                format!("Info '{key}' is declared as Flag and must not have a value"),
            );
        }
        return;
    }
    let Some(value) = value else {
        errors.body_section_warning(
            line,
            codes::INFO_TYPE_MISMATCH,
            format!("Info '{key}' is declared with a value type but none was given"),
        );
        return;
    };
    let type_ok = match typed.ty {
        MetaType::Integer => value.split(',').all(is_integer),
        MetaType::Float => value.split(',').all(is_number),
        MetaType::Character => value.split(',').all(|v| v.chars().count() == 1),
        MetaType::String => value.split(',').all(|v| !v.is_empty()),
        MetaType::Flag => true,
    };
    if !type_ok {
        errors.body_section_warning(
            line,
            codes::INFO_TYPE_MISMATCH,
            format!(
                "Info '{key}' values do not match the declared Type {:?}",
                typed.ty
            ),
        );
    }
    check_info_cardinality(line, key, Some(value), typed, alt_count, errors);
}

fn check_info_cardinality(
    line: u64,
    key: &str,
    value: Option<&str>,
    typed: &TypedMeta,
    alt_count: usize,
    errors: &mut dyn ErrorPolicy,
) {
    let Some(value) = value else {
        return;
    };
    let found = value.split(',').count();
    let expected = match typed.number {
        MetaNumber::Count(n) => Some(n as usize),
        MetaNumber::PerAltAllele => (alt_count > 0).then_some(alt_count),
        MetaNumber::PerAllele => (alt_count > 0).then_some(alt_count + 1),
        // Genotype cardinality depends on ploidy and allele count per
        // sample; not checked.
        MetaNumber::PerGenotype | MetaNumber::Unknown => None,
    };
    if let Some(expected) = expected {
        if found != expected {
            errors.body_section_warning(
                line,
                codes::INFO_CARDINALITY,
                format!("Info '{key}' has {found} values but {expected} were expected"),
            );
        }
    }
}

fn check_symbolic_alts(state: &ParsingState, record: &Record, errors: &mut dyn ErrorPolicy) {
    for alt in &record.alternates {
        if let AltKind::Symbolic(id) = &alt.kind {
            if !state.source.alt_declared(id) {
                errors.body_section_warning(
                    record.line,
                    codes::UNDECLARED_ALT,
                    format!(
                        "Symbolic alternate allele '{id}' is not declared in an ALT meta entry"
                    ),
                );
            }
        }
    }
}

/// Per-sample field counts, genotype validity, and ploidy. Ploidy is
/// intra-record only: the first sample of each record fixes the expected
/// allele count, and nothing carries over between records.
fn check_samples(record: &Record, errors: &mut dyn ErrorPolicy) {
    if record.format.is_empty() {
        return;
    }
    // Trailing sample fields may be dropped, but extra ones are invalid.
    for (index, sample) in record.samples.iter().enumerate() {
        if sample.split(':').count() > record.format.len() {
            errors.body_section_error(
                record.line,
                None,
                codes::BODY_SAMPLE,
                Some(format!("Sample #{} has more fields than FORMAT declares", index + 1).into()),
            );
        }
    }
    if record.format.first().map(String::as_str) != Some("GT") {
        return;
    }
    let mut expected_ploidy: Option<usize> = None;
    for (index, sample) in record.samples.iter().enumerate() {
        let number = index + 1;
        let genotype = sample.split(':').next().unwrap_or("");
        match ploidy_of(genotype) {
            None => errors.body_section_error(
                record.line,
                None,
                codes::BODY_GENOTYPE,
                Some(format!("Sample #{number} does not start with a valid genotype").into()),
            ),
            Some(ploidy) => match expected_ploidy {
                None => expected_ploidy = Some(ploidy),
                Some(expected) if expected != ploidy => errors.body_section_warning(
                    record.line,
                    codes::PLOIDY_MISMATCH,
                    format!(
                        "Sample #{number} has {ploidy} genotype alleles when {expected} were \
                         expected"
                    ),
                ),
                Some(_) => {}
            },
        }
    }
}

/// Number of alleles in a genotype, or `None` when the genotype is
/// malformed. Alleles are digit runs or `.`, joined by `/` or `|`.
fn ploidy_of(genotype: &str) -> Option<usize> {
    if genotype.is_empty() {
        return None;
    }
    let mut count = 0usize;
    for allele in genotype.split(['/', '|']) {
        let ok = allele == "."
            || (!allele.is_empty() && allele.bytes().all(|b| b.is_ascii_digit()));
        if !ok {
            return None;
        }
        count += 1;
    }
    Some(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ploidy_parsing() {
        assert_eq!(ploidy_of("0"), Some(1));
        assert_eq!(ploidy_of("0/1"), Some(2));
        assert_eq!(ploidy_of("0|1"), Some(2));
        assert_eq!(ploidy_of("0/0/1"), Some(3));
        assert_eq!(ploidy_of("./."), Some(2));
        assert_eq!(ploidy_of("12|4"), Some(2));
        assert_eq!(ploidy_of(""), None);
        assert_eq!(ploidy_of("0/"), None);
        assert_eq!(ploidy_of("a/b"), None);
        assert_eq!(ploidy_of("0 1"), None);
    }
}
