//! Token-level grammars for the scalar body columns.
//!
//! The scanner's byte classes keep obviously foreign bytes out of each
//! column; these validators apply the full per-field grammar to the
//! completed token and produce the tailored message for the diagnostic.

use super::is_number;

/// CHROM: non-empty, no colon or whitespace, optionally `<…>`-wrapped.
/// Returns the name with wrapping brackets stripped.
pub fn chromosome(text: &str) -> Result<String, String> {
    const MSG: &str = "Chromosome must be a string without colons or whitespace, optionally \
                       wrapped in angle brackets";
    let inner = if let Some(stripped) = text.strip_prefix('<') {
        match stripped.strip_suffix('>') {
            Some(inner) => inner,
            None => return Err(MSG.to_string()),
        }
    } else {
        text
    };
    if inner.is_empty() || inner.contains(['<', '>', ':']) {
        return Err(MSG.to_string());
    }
    Ok(inner.to_string())
}

/// POS: a plain non-negative integer.
pub fn position(text: &str) -> Result<u64, String> {
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(pos) = text.parse::<u64>() {
            return Ok(pos);
        }
    }
    Err("Position must be a positive number".to_string())
}

/// ID: `.` or a semicolon-separated list of non-empty strings.
/// Returns the identifiers; empty for `.`.
pub fn ids_list(text: &str) -> Result<Vec<String>, String> {
    if text == "." {
        return Ok(Vec::new());
    }
    let ids: Vec<&str> = text.split(';').collect();
    if text.is_empty() || ids.iter().any(|id| id.is_empty() || *id == ".") {
        return Err(
            "ID must be a dot or a semicolon-separated list of strings without whitespace"
                .to_string(),
        );
    }
    Ok(ids.into_iter().map(str::to_string).collect())
}

/// REF: non-empty string over the base alphabet. The scanner already gates
/// the alphabet byte-wise, so only emptiness can remain.
pub fn reference(text: &str) -> Result<String, String> {
    if text.is_empty() {
        return Err("Reference must be a non-empty string of bases (A, C, G, T or N)".to_string());
    }
    Ok(text.to_string())
}

/// QUAL: `.` or a non-negative decimal number, scientific notation allowed.
pub fn quality(text: &str) -> Result<Option<f64>, String> {
    if text == "." {
        return Ok(None);
    }
    if !text.starts_with('-') && is_number(text) {
        if let Ok(value) = text.parse::<f64>() {
            return Ok(Some(value));
        }
    }
    Err("Quality must be a dot or a non-negative decimal number".to_string())
}

/// FILTER: `.` or a semicolon-separated list of non-empty identifiers.
/// Returns the identifiers; empty for `.`.
pub fn filter_list(text: &str) -> Result<Vec<String>, String> {
    if text == "." {
        return Ok(Vec::new());
    }
    let filters: Vec<&str> = text.split(';').collect();
    if text.is_empty() || filters.iter().any(|f| f.is_empty() || *f == ".") {
        return Err(
            "Filter must be a dot or a semicolon-separated list of identifiers".to_string(),
        );
    }
    Ok(filters.into_iter().map(str::to_string).collect())
}

/// FORMAT: a colon-separated list of alphanumeric keys; when `GT` is
/// present it must be the first key.
pub fn format_keys(text: &str) -> Result<Vec<String>, String> {
    let keys: Vec<&str> = text.split(':').collect();
    let well_formed = !text.is_empty()
        && keys
            .iter()
            .all(|k| !k.is_empty() && k.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_'));
    if !well_formed {
        return Err("Format must be a colon-separated list of alphanumeric keys".to_string());
    }
    if keys.iter().skip(1).any(|k| *k == "GT") {
        return Err("Format must list GT as its first key when GT is present".to_string());
    }
    Ok(keys.into_iter().map(str::to_string).collect())
}
