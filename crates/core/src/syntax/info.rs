//! The INFO column grammar and the reserved-key value grammars.
//!
//! The column splits into semicolon-separated `key[=value]` pairs. Keys
//! from the reserved VCF set carry fixed value grammars that are part of
//! the format itself, so violations are body-section errors; consistency
//! with *declared* `##INFO` entries is checked later by the semantic layer.

use super::{is_integer, is_number};
use crate::model::{InfoPair, MetaNumber, MetaType, TypedMeta};

/// Reserved INFO keys of VCF 4.x with their fixed Number/Type.
pub const RESERVED_INFO: &[(&str, MetaNumber, MetaType)] = &[
    ("AA", MetaNumber::Count(1), MetaType::String),
    ("AC", MetaNumber::PerAltAllele, MetaType::Integer),
    ("AF", MetaNumber::PerAltAllele, MetaType::Float),
    ("AN", MetaNumber::Count(1), MetaType::Integer),
    ("BQ", MetaNumber::Count(1), MetaType::Float),
    ("CIGAR", MetaNumber::PerAltAllele, MetaType::String),
    ("DB", MetaNumber::Count(0), MetaType::Flag),
    ("DP", MetaNumber::Count(1), MetaType::Integer),
    ("END", MetaNumber::Count(1), MetaType::Integer),
    ("H2", MetaNumber::Count(0), MetaType::Flag),
    ("H3", MetaNumber::Count(0), MetaType::Flag),
    ("MQ", MetaNumber::Count(1), MetaType::Float),
    ("MQ0", MetaNumber::Count(1), MetaType::Integer),
    ("NS", MetaNumber::Count(1), MetaType::Integer),
    ("SB", MetaNumber::Count(1), MetaType::Float),
    ("SOMATIC", MetaNumber::Count(0), MetaType::Flag),
    ("VALIDATED", MetaNumber::Count(0), MetaType::Flag),
    ("1000G", MetaNumber::Count(0), MetaType::Flag),
];

/// The fixed Number/Type of a reserved INFO key, if `key` is reserved.
pub fn reserved(key: &str) -> Option<TypedMeta> {
    RESERVED_INFO
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, number, ty)| TypedMeta {
            number: *number,
            ty: *ty,
        })
}

/// Split and validate the INFO column. Returns the pairs that parsed plus
/// one message per violation (malformed pair, bad key, reserved-key value
/// grammar), so independently bad pairs are reported independently.
pub fn info_pairs(text: &str) -> (Vec<InfoPair>, Vec<String>) {
    let mut pairs = Vec::new();
    let mut issues = Vec::new();
    if text == "." {
        return (pairs, issues);
    }
    if text.is_empty() {
        issues.push(
            "Info must be a dot or a semicolon-separated list of key=value pairs".to_string(),
        );
        return (pairs, issues);
    }
    for raw in text.split(';') {
        if raw.is_empty() {
            issues.push(
                "Info must be a dot or a semicolon-separated list of key=value pairs".to_string(),
            );
            continue;
        }
        let (key, value) = match raw.split_once('=') {
            Some((key, value)) => (key, Some(value)),
            None => (raw, None),
        };
        if !is_info_key(key) {
            issues.push(format!("Info key '{key}' is malformed"));
            continue;
        }
        if value == Some("") {
            issues.push(format!("Info {key} value must not be empty"));
            continue;
        }
        if let Some(typed) = reserved(key) {
            if let Some(message) = check_reserved(key, typed, value) {
                issues.push(message);
                continue;
            }
        }
        pairs.push(InfoPair {
            key: key.to_string(),
            value: value.map(str::to_string),
        });
    }
    (pairs, issues)
}

/// Keys are alphanumeric with `_` and `.`; `1000G` forces a digit start to
/// be legal.
fn is_info_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.')
}

/// Apply a reserved key's fixed value grammar. Returns the tailored error
/// message on violation.
fn check_reserved(key: &str, typed: TypedMeta, value: Option<&str>) -> Option<String> {
    if typed.ty == MetaType::Flag {
        return if value.is_some() {
            Some(format!("Info {key} is not a flag"))
        } else {
            None
        };
    }
    let Some(value) = value else {
        return Some(format!("Info {key} requires a value"));
    };
    let list = typed.number != MetaNumber::Count(1);
    let ok = match (typed.ty, key) {
        (MetaType::String, "CIGAR") => value.split(',').all(is_cigar),
        (MetaType::String, _) => value.split(',').all(|v| !v.is_empty()),
        (MetaType::Integer, _) => value.split(',').all(is_integer),
        (MetaType::Float, _) => value.split(',').all(is_number),
        _ => true,
    };
    if ok {
        return None;
    }
    Some(match (typed.ty, key, list) {
        (_, "CIGAR", _) => format!("Info {key} value is not a comma-separated list of CIGAR strings"),
        (MetaType::Integer, _, true) => {
            format!("Info {key} value is not a comma-separated list of integers")
        }
        (MetaType::Integer, _, false) => format!("Info {key} value is not an integer"),
        (MetaType::Float, _, true) => {
            format!("Info {key} value is not a comma-separated list of numbers")
        }
        (MetaType::Float, _, false) => format!("Info {key} value is not a number"),
        _ => format!("Info {key} value is not a single string"),
    })
}

/// One CIGAR string: one or more `<count><op>` groups.
fn is_cigar(text: &str) -> bool {
    let mut rest = text.as_bytes();
    if rest.is_empty() {
        return false;
    }
    while !rest.is_empty() {
        let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 || digits == rest.len() {
            return false;
        }
        if !matches!(
            rest[digits],
            b'M' | b'I' | b'D' | b'N' | b'S' | b'H' | b'P' | b'X' | b'='
        ) {
            return false;
        }
        rest = &rest[digits + 1..];
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(text: &str) -> Vec<InfoPair> {
        let (pairs, issues) = info_pairs(text);
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
        pairs
    }

    fn bad(text: &str) -> Vec<String> {
        let (_, issues) = info_pairs(text);
        assert!(!issues.is_empty(), "expected issues for {text:?}");
        issues
    }

    #[test]
    fn dot_is_empty() {
        assert!(ok(".").is_empty());
    }

    #[test]
    fn simple_pairs_and_flags() {
        let pairs = ok("NS=3;DP=14;AF=0.5;DB;H2");
        assert_eq!(pairs.len(), 5);
        assert_eq!(pairs[0].key, "NS");
        assert_eq!(pairs[0].value.as_deref(), Some("3"));
        assert_eq!(pairs[3].value, None);
    }

    #[test]
    fn reserved_flag_with_value() {
        let issues = bad("H2=1");
        assert_eq!(issues[0], "Info H2 is not a flag");
    }

    #[test]
    fn reserved_float_list() {
        assert_eq!(ok("AF=0.5,0.25").len(), 1);
        let issues = bad("AF=0.5,x");
        assert_eq!(
            issues[0],
            "Info AF value is not a comma-separated list of numbers"
        );
    }

    #[test]
    fn reserved_integer_scalar_and_list() {
        assert_eq!(ok("DP=14").len(), 1);
        let issues = bad("DP=high");
        assert_eq!(issues[0], "Info DP value is not an integer");
        let issues = bad("AC=1,two");
        assert_eq!(
            issues[0],
            "Info AC value is not a comma-separated list of integers"
        );
    }

    #[test]
    fn reserved_requires_value() {
        let issues = bad("DP");
        assert_eq!(issues[0], "Info DP requires a value");
    }

    #[test]
    fn cigar_grammar() {
        assert_eq!(ok("CIGAR=3M1I2M").len(), 1);
        let issues = bad("CIGAR=M3");
        assert_eq!(
            issues[0],
            "Info CIGAR value is not a comma-separated list of CIGAR strings"
        );
    }

    #[test]
    fn thousand_genomes_flag_key() {
        assert_eq!(ok("1000G").len(), 1);
        let issues = bad("1000G=yes");
        assert_eq!(issues[0], "Info 1000G is not a flag");
    }

    #[test]
    fn malformed_pairs_reported_independently() {
        let (pairs, issues) = info_pairs("NS=3;;DP=bad;AA=x");
        assert_eq!(pairs.len(), 2, "{pairs:?}");
        assert_eq!(issues.len(), 2, "{issues:?}");
    }

    #[test]
    fn empty_value_rejected() {
        let issues = bad("DP=");
        assert_eq!(issues[0], "Info DP value must not be empty");
    }

    #[test]
    fn unreserved_keys_pass_through() {
        let pairs = ok("MYANN=a|b|c");
        assert_eq!(pairs[0].key, "MYANN");
    }
}
