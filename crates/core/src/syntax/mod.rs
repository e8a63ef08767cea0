/// Alternate allele grammar, including breakends.
pub mod alternate;
/// Scalar body column grammars.
pub mod fields;
/// INFO pair splitting and reserved-key value grammars.
pub mod info;
/// Structured meta entry rules.
pub mod meta;

/// True when `text` is a VCF integer: optional sign, then digits.
pub(crate) fn is_integer(text: &str) -> bool {
    let digits = text
        .strip_prefix(['-', '+'])
        .unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// True when `text` is a VCF number: optional sign, digits, optional
/// fraction, optional exponent. `Infinity`/`NaN` spellings are rejected.
pub(crate) fn is_number(text: &str) -> bool {
    let rest = text.strip_prefix(['-', '+']).unwrap_or(text);
    let (mantissa, exponent) = match rest.split_once(['e', 'E']) {
        Some((m, e)) => (m, Some(e)),
        None => (rest, None),
    };
    let mantissa_ok = match mantissa.split_once('.') {
        Some((int, frac)) => {
            !(int.is_empty() && frac.is_empty())
                && int.bytes().all(|b| b.is_ascii_digit())
                && frac.bytes().all(|b| b.is_ascii_digit())
        }
        None => !mantissa.is_empty() && mantissa.bytes().all(|b| b.is_ascii_digit()),
    };
    let exponent_ok = match exponent {
        Some(e) => {
            let digits = e.strip_prefix(['-', '+']).unwrap_or(e);
            !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
        }
        None => true,
    };
    mantissa_ok && exponent_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_grammar() {
        assert!(is_integer("0"));
        assert!(is_integer("42"));
        assert!(is_integer("-7"));
        assert!(is_integer("+7"));
        assert!(!is_integer(""));
        assert!(!is_integer("-"));
        assert!(!is_integer("1.5"));
        assert!(!is_integer("1e3"));
    }

    #[test]
    fn number_grammar() {
        assert!(is_number("0"));
        assert!(is_number("0.5"));
        assert!(is_number(".5"));
        assert!(is_number("5."));
        assert!(is_number("-1.25"));
        assert!(is_number("3e10"));
        assert!(is_number("2.5E-3"));
        assert!(!is_number(""));
        assert!(!is_number("."));
        assert!(!is_number("1e"));
        assert!(!is_number("NaN"));
        assert!(!is_number("1.2.3"));
    }
}
