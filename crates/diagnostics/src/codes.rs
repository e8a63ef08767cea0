//! Diagnostic code constants.
//!
//! Codes are grouped by section: `VCF01xx` fileformat, `VCF02xx` meta,
//! `VCF03xx` header, `VCF04xx` body grammar, `VCF05xx` semantic warnings,
//! `VCF06xx` informational. Use these instead of string literals to get
//! compile-time typo detection and IDE autocomplete.

// ── Fileformat section ──────────────────────────────────────────────────

/// The `##fileformat=` declaration is missing or malformed.
pub const FILEFORMAT: &str = "VCF0101";

/// The fileformat value contains characters outside the printable range.
pub const FILEFORMAT_CHARSET: &str = "VCF0102";

/// The declared fileformat version is not a supported VCF version.
pub const FILEFORMAT_VERSION: &str = "VCF0103";

// ── Meta section ────────────────────────────────────────────────────────

/// Generic meta-section grammar error.
pub const META: &str = "VCF0201";

/// A meta line is not a well-formed `##key=value` pair.
pub const META_KEY: &str = "VCF0202";

/// A structured meta entry attribute is malformed.
pub const META_ATTRIBUTE: &str = "VCF0203";

/// An attribute name is repeated within one structured meta entry.
pub const META_DUPLICATE_ATTRIBUTE: &str = "VCF0204";

/// Two entries of the same structured category share an `ID`.
pub const META_DUPLICATE_ID: &str = "VCF0205";

/// A required attribute is missing from a structured meta entry.
pub const META_REQUIRED_ATTRIBUTE: &str = "VCF0206";

/// A `Number` attribute is outside {non-negative integer, A, R, G, .}.
pub const META_NUMBER: &str = "VCF0207";

/// A `Type` attribute is outside {Integer, Float, Flag, Character, String}.
pub const META_TYPE: &str = "VCF0208";

/// A meta entry `ID` contains disallowed characters.
pub const META_ID_CHARSET: &str = "VCF0209";

/// An `ALT` meta entry ID does not start with DEL, INS, DUP, INV, or CNV.
pub const META_ALT_PREFIX: &str = "VCF0210";

/// A `SAMPLE` entry `Genomes`/`Mixture` list is malformed.
pub const META_SAMPLE_LIST: &str = "VCF0211";

/// A URL-valued meta field is malformed.
pub const META_URL: &str = "VCF0212";

// ── Header section ──────────────────────────────────────────────────────

/// Mandatory header columns are missing, misspelled, or out of order.
pub const HEADER: &str = "VCF0301";

/// A header sample column is malformed (empty name, FORMAT with no samples).
pub const HEADER_SAMPLE: &str = "VCF0302";

/// Two header sample columns share a name.
pub const HEADER_DUPLICATE_SAMPLE: &str = "VCF0303";

/// The input ended before a header line was seen.
pub const HEADER_MISSING: &str = "VCF0304";

// ── Body section (grammar) ──────────────────────────────────────────────

/// Generic body-section grammar error.
pub const BODY: &str = "VCF0401";

/// The chromosome field is malformed.
pub const BODY_CHROMOSOME: &str = "VCF0402";

/// The position field is not a positive number.
pub const BODY_POSITION: &str = "VCF0403";

/// The id field is malformed.
pub const BODY_ID: &str = "VCF0404";

/// The reference field is not a string of bases.
pub const BODY_REFERENCE: &str = "VCF0405";

/// The alternate field contains an invalid allele.
pub const BODY_ALTERNATE: &str = "VCF0406";

/// The quality field is not a dot or a non-negative number.
pub const BODY_QUALITY: &str = "VCF0407";

/// The filter field is malformed.
pub const BODY_FILTER: &str = "VCF0408";

/// The info field is malformed, or a reserved key has an invalid value.
pub const BODY_INFO: &str = "VCF0409";

/// The format field is malformed.
pub const BODY_FORMAT: &str = "VCF0410";

/// A sample field is malformed.
pub const BODY_SAMPLE: &str = "VCF0411";

/// A sample does not start with a valid genotype.
pub const BODY_GENOTYPE: &str = "VCF0412";

/// The record's column count disagrees with the header line.
pub const BODY_COLUMN_COUNT: &str = "VCF0413";

// ── Semantic warnings ───────────────────────────────────────────────────

/// A `reference` meta entry is recommended but absent.
pub const REFERENCE_RECOMMENDED: &str = "VCF0501";

/// A body chromosome has no matching `contig` meta entry.
pub const UNDECLARED_CONTIG: &str = "VCF0502";

/// Positions within a chromosome are not monotonically non-decreasing.
pub const POSITION_ORDER: &str = "VCF0503";

/// Samples within one record disagree on genotype ploidy.
pub const PLOIDY_MISMATCH: &str = "VCF0504";

/// A FILTER identifier is neither `PASS` nor a declared FILTER ID.
pub const UNDECLARED_FILTER: &str = "VCF0505";

/// An INFO key is neither reserved nor declared in an INFO meta entry.
pub const UNDECLARED_INFO: &str = "VCF0506";

/// A symbolic alternate allele has no declared ALT meta entry.
pub const UNDECLARED_ALT: &str = "VCF0507";

/// An INFO value does not match the declared `Type`.
pub const INFO_TYPE_MISMATCH: &str = "VCF0508";

/// An INFO value count does not match the declared `Number`.
pub const INFO_CARDINALITY: &str = "VCF0509";

// ── Informational ───────────────────────────────────────────────────────

/// Periodic progress event (lines read so far).
pub const PROGRESS: &str = "VCF0601";

/// Returns the human-readable explanation for a diagnostic code, if known.
pub fn explain(id: &str) -> Option<&'static str> {
    match id {
        FILEFORMAT => Some(
            "every VCF file must start with a '##fileformat=VCFvX.Y' line; without it \
             the version-specific grammar cannot be selected",
        ),
        FILEFORMAT_CHARSET => Some(
            "the fileformat value may only contain alphanumeric and punctuation \
             characters",
        ),
        FILEFORMAT_VERSION => Some(
            "the validator understands VCFv4.1, VCFv4.2 and VCFv4.3; other version \
             strings cannot be validated",
        ),
        META => Some("a meta-information line deviates from the '##key=value' grammar"),
        META_KEY => Some(
            "meta lines must be '##key=value' or '##key=<attr=value,...>'; the key may \
             not be empty and must be followed by '='",
        ),
        META_ATTRIBUTE => Some(
            "attributes inside '<...>' are comma-separated 'name=value' pairs; values \
             containing commas or quotes must be double-quoted",
        ),
        META_DUPLICATE_ATTRIBUTE => Some(
            "an attribute name may appear at most once within a structured meta entry",
        ),
        META_DUPLICATE_ID => Some(
            "within one structured category (INFO, FORMAT, FILTER, ALT, contig, SAMPLE, \
             PEDIGREE) every ID must be unique",
        ),
        META_REQUIRED_ATTRIBUTE => Some(
            "INFO and FORMAT entries require ID, Number, Type and Description; FILTER \
             and ALT require ID and Description; contig and SAMPLE require ID",
        ),
        META_NUMBER => Some(
            "Number must be a non-negative integer, 'A' (one per alternate allele), 'R' \
             (one per allele), 'G' (one per genotype), or '.' (unknown)",
        ),
        META_TYPE => Some("Type must be Integer, Float, Flag, Character, or String"),
        META_ID_CHARSET => Some("meta entry IDs are restricted to a conservative character set"),
        META_ALT_PREFIX => Some(
            "ALT IDs must begin with DEL, INS, DUP, INV or CNV, optionally followed by \
             colon-separated subtypes (e.g. 'DUP:TANDEM')",
        ),
        META_SAMPLE_LIST => Some(
            "SAMPLE entries describe mixtures as semicolon-separated non-empty lists in \
             Genomes and Mixture",
        ),
        META_URL => Some("URL-valued meta fields must be non-empty and free of whitespace"),
        HEADER => Some(
            "the header line must start with the mandatory columns CHROM, POS, ID, REF, \
             ALT, QUAL, FILTER, INFO in exactly that order, tab-separated",
        ),
        HEADER_SAMPLE => Some(
            "when a FORMAT column is declared at least one non-empty sample name must \
             follow it",
        ),
        HEADER_DUPLICATE_SAMPLE => Some("sample names index columns and must be unique"),
        HEADER_MISSING => Some("the input ended before the mandatory '#CHROM...' header line"),
        BODY => Some("a body record deviates from the tab-separated record grammar"),
        BODY_CHROMOSOME => Some(
            "chromosome names may not contain colons or whitespace; they may be wrapped \
             in angle brackets",
        ),
        BODY_POSITION => Some("the position column must be a plain non-negative integer"),
        BODY_ID => Some(
            "the id column is '.' or a semicolon-separated list of non-empty strings \
             without whitespace",
        ),
        BODY_REFERENCE => Some("the reference column is a non-empty string over A, C, G, T, N"),
        BODY_ALTERNATE => Some(
            "each alternate allele is a base string, a symbolic allele '<ID>', a \
             breakend expression, '*', or '.'",
        ),
        BODY_QUALITY => Some(
            "the quality column is '.' or a non-negative decimal number (scientific \
             notation allowed)",
        ),
        BODY_FILTER => Some(
            "the filter column is '.' or a semicolon-separated list of non-empty \
             identifiers",
        ),
        BODY_INFO => Some(
            "the info column is '.' or semicolon-separated 'key[=value]' pairs; \
             reserved keys have fixed value grammars",
        ),
        BODY_FORMAT => Some("the format column is a colon-separated list of alphanumeric keys"),
        BODY_SAMPLE => Some("sample columns are colon-separated sub-values"),
        BODY_GENOTYPE => Some(
            "when FORMAT starts with GT, the first sub-value of every sample must be a \
             genotype: alleles (digits or '.') joined by '/' or '|'",
        ),
        BODY_COLUMN_COUNT => Some(
            "every record must have exactly the columns the header declares: the 8 \
             mandatory ones, plus FORMAT and one column per sample when present",
        ),
        REFERENCE_RECOMMENDED => Some(
            "a '##reference=...' meta entry is recommended so that coordinates can be \
             interpreted against a known assembly",
        ),
        UNDECLARED_CONTIG => Some(
            "chromosomes used in the body should be declared with '##contig=<ID=...>'; \
             reported once per distinct chromosome",
        ),
        POSITION_ORDER => Some(
            "records within one chromosome should appear in non-decreasing position \
             order",
        ),
        PLOIDY_MISMATCH => Some(
            "within one record every sample should carry the same number of genotype \
             alleles as the first sample",
        ),
        UNDECLARED_FILTER => Some(
            "FILTER values other than PASS should match the ID of a '##FILTER' meta \
             entry",
        ),
        UNDECLARED_INFO => Some(
            "INFO keys should be reserved keys or match the ID of an '##INFO' meta \
             entry",
        ),
        UNDECLARED_ALT => Some(
            "symbolic alternate alleles '<ID>' should match the ID of an '##ALT' meta \
             entry",
        ),
        INFO_TYPE_MISMATCH => Some(
            "values of a declared INFO key should parse according to the declared Type",
        ),
        INFO_CARDINALITY => Some(
            "the number of values of a declared INFO key should match the declared \
             Number ('A': one per alternate allele, 'R': one per allele, or a literal \
             count)",
        ),
        PROGRESS => Some("periodic progress report; enabled with a progress cadence"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_codes_have_explanations() {
        let all = [
            FILEFORMAT,
            FILEFORMAT_CHARSET,
            FILEFORMAT_VERSION,
            META,
            META_KEY,
            META_ATTRIBUTE,
            META_DUPLICATE_ATTRIBUTE,
            META_DUPLICATE_ID,
            META_REQUIRED_ATTRIBUTE,
            META_NUMBER,
            META_TYPE,
            META_ID_CHARSET,
            META_ALT_PREFIX,
            META_SAMPLE_LIST,
            META_URL,
            HEADER,
            HEADER_SAMPLE,
            HEADER_DUPLICATE_SAMPLE,
            HEADER_MISSING,
            BODY,
            BODY_CHROMOSOME,
            BODY_POSITION,
            BODY_ID,
            BODY_REFERENCE,
            BODY_ALTERNATE,
            BODY_QUALITY,
            BODY_FILTER,
            BODY_INFO,
            BODY_FORMAT,
            BODY_SAMPLE,
            BODY_GENOTYPE,
            BODY_COLUMN_COUNT,
            REFERENCE_RECOMMENDED,
            UNDECLARED_CONTIG,
            POSITION_ORDER,
            PLOIDY_MISMATCH,
            UNDECLARED_FILTER,
            UNDECLARED_INFO,
            UNDECLARED_ALT,
            INFO_TYPE_MISMATCH,
            INFO_CARDINALITY,
            PROGRESS,
        ];
        for code in &all {
            assert!(
                explain(code).is_some(),
                "diagnostic code {code} has no explain() entry"
            );
        }
    }

    #[test]
    fn codes_are_unique() {
        let all = [
            FILEFORMAT,
            FILEFORMAT_CHARSET,
            FILEFORMAT_VERSION,
            META,
            META_KEY,
            META_ATTRIBUTE,
            META_DUPLICATE_ATTRIBUTE,
            META_DUPLICATE_ID,
            META_REQUIRED_ATTRIBUTE,
            META_NUMBER,
            META_TYPE,
            META_ID_CHARSET,
            META_ALT_PREFIX,
            META_SAMPLE_LIST,
            META_URL,
            HEADER,
            HEADER_SAMPLE,
            HEADER_DUPLICATE_SAMPLE,
            HEADER_MISSING,
            BODY,
            BODY_CHROMOSOME,
            BODY_POSITION,
            BODY_ID,
            BODY_REFERENCE,
            BODY_ALTERNATE,
            BODY_QUALITY,
            BODY_FILTER,
            BODY_INFO,
            BODY_FORMAT,
            BODY_SAMPLE,
            BODY_GENOTYPE,
            BODY_COLUMN_COUNT,
            REFERENCE_RECOMMENDED,
            UNDECLARED_CONTIG,
            POSITION_ORDER,
            PLOIDY_MISMATCH,
            UNDECLARED_FILTER,
            UNDECLARED_INFO,
            UNDECLARED_ALT,
            INFO_TYPE_MISMATCH,
            INFO_CARDINALITY,
            PROGRESS,
        ];
        let unique: std::collections::HashSet<_> = all.iter().collect();
        assert_eq!(unique.len(), all.len(), "duplicate diagnostic code");
    }
}
