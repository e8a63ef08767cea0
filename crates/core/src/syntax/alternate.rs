//! The ALT column grammar.
//!
//! An alternate column is `.` or a comma-separated list. Each element is a
//! base string, a symbolic allele `<ID>`, a paired breakend (`t[p[`,
//! `t]p]`, `]p]t`, `[p[t`), a single breakend (`.t`, `t.`), or `*`. The
//! breakend mate locus `p` is `chrom:pos`, where the chromosome may itself
//! be wrapped in angle brackets.

use crate::model::{AltAllele, AltKind};

/// Validate the whole ALT column. Returns the classified alleles plus one
/// message per invalid element, so independently malformed elements are
/// reported independently.
pub fn alternate_list(text: &str) -> (Vec<AltAllele>, Vec<String>) {
    if text == "." {
        return (
            vec![AltAllele {
                text: ".".to_string(),
                kind: AltKind::Missing,
            }],
            Vec::new(),
        );
    }
    let mut alleles = Vec::new();
    let mut issues = Vec::new();
    if text.is_empty() {
        issues.push("Alternate must not be empty".to_string());
        return (alleles, issues);
    }
    for element in text.split(',') {
        match classify(element) {
            Some(kind) => alleles.push(AltAllele {
                text: element.to_string(),
                kind,
            }),
            None => issues.push(format!(
                "Alternate '{element}' is not a base string, symbolic allele, breakend or dot"
            )),
        }
    }
    (alleles, issues)
}

fn classify(element: &str) -> Option<AltKind> {
    if element == "." {
        return Some(AltKind::Missing);
    }
    if element == "*" {
        return Some(AltKind::Overlap);
    }
    if is_bases(element) {
        return Some(AltKind::Bases);
    }
    if let Some(inner) = element.strip_prefix('<').and_then(|e| e.strip_suffix('>')) {
        return if is_symbolic_id(inner) {
            Some(AltKind::Symbolic(inner.to_string()))
        } else {
            None
        };
    }
    if element.contains(['[', ']']) {
        return if is_paired_breakend(element) {
            Some(AltKind::Breakend)
        } else {
            None
        };
    }
    if let Some(bases) = element.strip_prefix('.') {
        if is_bases(bases) {
            return Some(AltKind::SingleBreakend);
        }
    }
    if let Some(bases) = element.strip_suffix('.') {
        if is_bases(bases) {
            return Some(AltKind::SingleBreakend);
        }
    }
    None
}

fn is_bases(text: &str) -> bool {
    !text.is_empty()
        && text.bytes().all(|b| {
            matches!(
                b,
                b'A' | b'C' | b'G' | b'T' | b'N' | b'a' | b'c' | b'g' | b't' | b'n'
            )
        })
}

fn is_symbolic_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'-' | b':'))
}

/// Paired breakend forms, all with identical bracket characters:
/// `t[p[`, `t]p]`, `]p]t`, `[p[t`.
fn is_paired_breakend(element: &str) -> bool {
    let bytes = element.as_bytes();
    let first = bytes[0];
    if first == b'[' || first == b']' {
        // `[p[t` / `]p]t` — locus first, replacement bases last.
        let bracket = first as char;
        let rest = &element[1..];
        let Some(close) = rest.find(bracket) else {
            return false;
        };
        let locus = &rest[..close];
        let bases = &rest[close + 1..];
        is_mate_locus(locus) && is_bases(bases)
    } else {
        // `t[p[` / `t]p]` — replacement bases first, locus last.
        let Some(open) = element.find(['[', ']']) else {
            return false;
        };
        let bracket = element.as_bytes()[open] as char;
        if !element.ends_with(bracket) {
            return false;
        }
        let bases = &element[..open];
        let locus = &element[open + 1..element.len() - 1];
        is_bases(bases) && is_mate_locus(locus)
    }
}

/// `chrom:pos` where chrom has no colon/whitespace and may be `<…>`-wrapped.
fn is_mate_locus(locus: &str) -> bool {
    let Some((chrom, pos)) = locus.split_once(':') else {
        return false;
    };
    let chrom = match chrom.strip_prefix('<') {
        Some(stripped) => match stripped.strip_suffix('>') {
            Some(inner) => inner,
            None => return false,
        },
        None => chrom,
    };
    !chrom.is_empty()
        && !chrom.contains(['<', '>', ':'])
        && !pos.is_empty()
        && pos.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<AltKind> {
        let (alleles, issues) = alternate_list(text);
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
        alleles.into_iter().map(|a| a.kind).collect()
    }

    #[test]
    fn dot_is_missing() {
        assert_eq!(kinds("."), vec![AltKind::Missing]);
    }

    #[test]
    fn base_strings() {
        assert_eq!(kinds("G"), vec![AltKind::Bases]);
        assert_eq!(kinds("ACGT,tca"), vec![AltKind::Bases, AltKind::Bases]);
    }

    #[test]
    fn overlap_and_mixed_list() {
        assert_eq!(
            kinds("G,*,."),
            vec![AltKind::Bases, AltKind::Overlap, AltKind::Missing]
        );
    }

    #[test]
    fn symbolic_alleles() {
        assert_eq!(
            kinds("<DEL>"),
            vec![AltKind::Symbolic("DEL".to_string())]
        );
        assert_eq!(
            kinds("<DUP:TANDEM>"),
            vec![AltKind::Symbolic("DUP:TANDEM".to_string())]
        );
    }

    #[test]
    fn paired_breakends() {
        assert_eq!(kinds("G[17:198983["), vec![AltKind::Breakend]);
        assert_eq!(kinds("G]17:198983]"), vec![AltKind::Breakend]);
        assert_eq!(kinds("]13:123456]T"), vec![AltKind::Breakend]);
        assert_eq!(kinds("[13:123456[T"), vec![AltKind::Breakend]);
        assert_eq!(kinds("A[<ctg1>:7["), vec![AltKind::Breakend]);
    }

    #[test]
    fn single_breakends() {
        assert_eq!(kinds(".A"), vec![AltKind::SingleBreakend]);
        assert_eq!(kinds("G."), vec![AltKind::SingleBreakend]);
    }

    #[test]
    fn invalid_elements_are_reported_individually() {
        let (alleles, issues) = alternate_list("G,XYZ,<DEL>");
        assert_eq!(alleles.len(), 2);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("'XYZ'"), "{issues:?}");
    }

    #[test]
    fn malformed_breakends_rejected() {
        let (_, issues) = alternate_list("G[17:198983]");
        assert_eq!(issues.len(), 1, "mismatched brackets must fail");
        let (_, issues) = alternate_list("G[17[");
        assert_eq!(issues.len(), 1, "locus without position must fail");
        let (_, issues) = alternate_list("[17:12[");
        assert_eq!(issues.len(), 1, "breakend without bases must fail");
    }

    #[test]
    fn empty_and_bad_symbolics() {
        let (_, issues) = alternate_list("<>");
        assert_eq!(issues.len(), 1);
        let (_, issues) = alternate_list("");
        assert_eq!(issues.len(), 1);
        let (_, issues) = alternate_list("G,");
        assert_eq!(issues.len(), 1);
    }
}
