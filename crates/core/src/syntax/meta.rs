//! Per-entry rules for meta-information lines.
//!
//! These are the checks that apply to one entry in isolation: required
//! attributes per category, the `Number`/`Type` enumerations, ID character
//! sets, the ALT prefix rule, SAMPLE list shapes, and URL fields.
//! Cross-entry rules (ID uniqueness) live in the semantic layer.

use crate::model::{MetaEntry, MetaNumber, MetaType, MetaValue};
use vcf_lint_diagnostics::codes;

/// One violation found in a meta entry: diagnostic code plus message.
pub type MetaIssue = (&'static str, String);

/// Categories that must be structured and their required attributes.
const REQUIRED_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("INFO", &["ID", "Number", "Type", "Description"]),
    ("FORMAT", &["ID", "Number", "Type", "Description"]),
    ("FILTER", &["ID", "Description"]),
    ("ALT", &["ID", "Description"]),
    ("contig", &["ID"]),
    ("SAMPLE", &["ID"]),
];

/// Prefixes an ALT ID must start with.
const ALT_PREFIXES: &[&str] = &["DEL", "INS", "DUP", "INV", "CNV"];

/// Validate one accepted meta entry. Returns every violation found;
/// multiple independently checkable attributes may each contribute one.
pub fn validate_entry(entry: &MetaEntry) -> Vec<MetaIssue> {
    let mut issues = Vec::new();
    let category = entry.category.as_str();

    if let Some((_, required)) = REQUIRED_ATTRIBUTES.iter().find(|(c, _)| *c == category) {
        let MetaValue::Structured(_) = &entry.value else {
            issues.push((
                codes::META,
                format!("{category} meta entries must be structured ('##{category}=<ID=...>')"),
            ));
            return issues;
        };
        for attr in *required {
            if entry.value.attribute(attr).is_none() {
                issues.push((
                    codes::META_REQUIRED_ATTRIBUTE,
                    format!("{category} meta entry is missing the required attribute '{attr}'"),
                ));
            }
        }
    }

    match category {
        "INFO" | "FORMAT" => check_typed(entry, category, &mut issues),
        "FILTER" => check_id_charset(entry, category, &mut issues),
        "ALT" => check_alt(entry, &mut issues),
        "contig" => check_contig(entry, &mut issues),
        "SAMPLE" => check_sample(entry, &mut issues),
        "pedigreeDB" | "assembly" => check_url_value(entry, category, &mut issues),
        _ => {}
    }
    issues
}

fn check_typed(entry: &MetaEntry, category: &str, issues: &mut Vec<MetaIssue>) {
    check_id_charset(entry, category, issues);
    let number = entry.value.attribute("Number").and_then(MetaNumber::parse);
    let ty = entry.value.attribute("Type").and_then(MetaType::parse);

    if let Some(value) = entry.value.attribute("Number") {
        if number.is_none() {
            issues.push((
                codes::META_NUMBER,
                format!("Number '{value}' is not a non-negative integer, 'A', 'R', 'G' or '.'"),
            ));
        }
    }
    if let Some(value) = entry.value.attribute("Type") {
        if ty.is_none() {
            issues.push((
                codes::META_TYPE,
                format!("Type '{value}' is not one of Integer, Float, Flag, Character, String"),
            ));
        }
    }
    if ty == Some(MetaType::Flag) {
        if category == "FORMAT" {
            issues.push((
                codes::META_TYPE,
                "Type Flag is not allowed in FORMAT meta entries".to_string(),
            ));
        } else if number.is_some() && number != Some(MetaNumber::Count(0)) {
            issues.push((
                codes::META_NUMBER,
                "Flag-typed INFO entries must declare Number=0".to_string(),
            ));
        }
    }
    if let Some(description) = entry.value.attribute_full("Description") {
        if !description.quoted {
            issues.push((
                codes::META_ATTRIBUTE,
                "Description must be a double-quoted string".to_string(),
            ));
        }
    }
}

fn check_id_charset(entry: &MetaEntry, category: &str, issues: &mut Vec<MetaIssue>) {
    if let Some(id) = &entry.id {
        let ok = !id.is_empty()
            && id
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'+' | b'-'));
        if !ok {
            issues.push((
                codes::META_ID_CHARSET,
                format!("{category} ID '{id}' contains disallowed characters"),
            ));
        }
    }
}

fn check_alt(entry: &MetaEntry, issues: &mut Vec<MetaIssue>) {
    let Some(id) = &entry.id else {
        return;
    };
    // ALT IDs are colon-separated subtype paths; every segment keeps the
    // plain ID charset.
    let segments: Vec<&str> = id.split(':').collect();
    let charset_ok = segments.iter().all(|s| {
        !s.is_empty()
            && s.bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'-'))
    });
    if !charset_ok {
        issues.push((
            codes::META_ID_CHARSET,
            format!("ALT ID '{id}' contains disallowed characters"),
        ));
        return;
    }
    if !ALT_PREFIXES.contains(&segments[0]) {
        issues.push((
            codes::META_ALT_PREFIX,
            format!("ALT ID '{id}' must begin with DEL, INS, DUP, INV or CNV"),
        ));
    }
}

fn check_contig(entry: &MetaEntry, issues: &mut Vec<MetaIssue>) {
    if let Some(id) = &entry.id {
        // Contig names in the wild are permissive; reject only structural
        // characters that would collide with record grammar.
        let ok = !id.is_empty() && !id.contains([':', '<', '>', ',', '=', '[', ']']);
        if !ok {
            issues.push((
                codes::META_ID_CHARSET,
                format!("contig ID '{id}' contains disallowed characters"),
            ));
        }
    }
    if let Some(url) = entry.value.attribute("URL") {
        if url.is_empty() || url.contains(char::is_whitespace) {
            issues.push((codes::META_URL, format!("contig URL '{url}' is malformed")));
        }
    }
}

fn check_sample(entry: &MetaEntry, issues: &mut Vec<MetaIssue>) {
    check_id_charset(entry, "SAMPLE", issues);
    for attr in ["Genomes", "Mixture"] {
        if let Some(value) = entry.value.attribute(attr) {
            let ok = !value.is_empty() && value.split(';').all(|part| !part.is_empty());
            if !ok {
                issues.push((
                    codes::META_SAMPLE_LIST,
                    format!(
                        "SAMPLE {attr} must be a semicolon-separated list of non-empty names"
                    ),
                ));
            }
        }
    }
}

fn check_url_value(entry: &MetaEntry, category: &str, issues: &mut Vec<MetaIssue>) {
    let url = match &entry.value {
        MetaValue::Flat(value) => value
            .strip_prefix('<')
            .and_then(|v| v.strip_suffix('>'))
            .unwrap_or(value),
        MetaValue::Structured(_) => return,
    };
    if url.is_empty() || url.contains(char::is_whitespace) {
        issues.push((
            codes::META_URL,
            format!("{category} URL '{url}' is malformed"),
        ));
    }
}
