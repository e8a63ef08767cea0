//! Byte character classes used by the scanner's inner loop.
//!
//! All tests operate on single bytes. UTF-8 continuation bytes fall in
//! 0x80..=0xBF and never match the ASCII-only classes, so no decoding is
//! needed in the hot path. The printable class deliberately admits bytes
//! >= 0x80 so UTF-8 text survives in descriptions and freeform values.

/// ASCII graphic characters: `!` through `~`. No whitespace, no controls.
#[inline]
pub(crate) fn is_graphic(b: u8) -> bool {
    (0x21..=0x7e).contains(&b)
}

/// Printable text: anything that is not an ASCII control character.
/// Space and bytes >= 0x80 (UTF-8 sequences) are included.
#[inline]
pub(crate) fn is_printable(b: u8) -> bool {
    b >= 0x20 && b != 0x7f
}

/// Nucleotide bases accepted in REF and base-string ALT alleles.
#[inline]
pub(crate) fn is_base(b: u8) -> bool {
    matches!(
        b,
        b'A' | b'C' | b'G' | b'T' | b'N' | b'a' | b'c' | b'g' | b't' | b'n'
    )
}

/// Bytes allowed in a meta entry key (between `##` and `=`).
#[inline]
pub(crate) fn is_meta_key_byte(b: u8) -> bool {
    is_graphic(b) && b != b'='
}

/// Bytes allowed in a structured attribute name.
#[inline]
pub(crate) fn is_attr_key_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'.'
}

/// Bytes allowed in an unquoted attribute value.
#[inline]
pub(crate) fn is_attr_bare_byte(b: u8) -> bool {
    is_graphic(b) && !matches!(b, b',' | b'>' | b'<' | b'"')
}

/// Bytes allowed in a chromosome name (colon is rejected at byte level).
#[inline]
pub(crate) fn is_chromosome_byte(b: u8) -> bool {
    is_graphic(b) && b != b':'
}

/// Bytes allowed in the QUAL column.
#[inline]
pub(crate) fn is_quality_byte(b: u8) -> bool {
    b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-')
}

/// Bytes allowed in the FORMAT column.
#[inline]
pub(crate) fn is_format_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b':'
}
