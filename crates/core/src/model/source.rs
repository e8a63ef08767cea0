//! The accumulated header description of one VCF source.
//!
//! A [`Source`] is created once at scan start and mutated only by the parse
//! policy as meta lines are accepted. It is conceptually frozen at the
//! header-line boundary but remains readable afterwards: once the first body
//! record is accepted, no new meta entries or sample names are added.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// VCF version declared by the fileformat line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VcfVersion {
    /// `VCFv4.1`
    #[serde(rename = "VCFv4.1")]
    V4_1,
    /// `VCFv4.2`
    #[serde(rename = "VCFv4.2")]
    V4_2,
    /// `VCFv4.3`
    #[serde(rename = "VCFv4.3")]
    V4_3,
}

impl VcfVersion {
    /// Parse a fileformat value (`VCFv4.1` …) into a version.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "VCFv4.1" => Some(VcfVersion::V4_1),
            "VCFv4.2" => Some(VcfVersion::V4_2),
            "VCFv4.3" => Some(VcfVersion::V4_3),
            _ => None,
        }
    }

    /// The declaration string for this version.
    pub fn as_str(&self) -> &'static str {
        match self {
            VcfVersion::V4_1 => "VCFv4.1",
            VcfVersion::V4_2 => "VCFv4.2",
            VcfVersion::V4_3 => "VCFv4.3",
        }
    }
}

/// The `Number=` attribute of an INFO/FORMAT meta entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MetaNumber {
    /// A literal non-negative count of values.
    Count(u32),
    /// `A` — one value per alternate allele.
    PerAltAllele,
    /// `R` — one value per allele, reference included.
    PerAllele,
    /// `G` — one value per possible genotype.
    PerGenotype,
    /// `.` — the number of values varies or is unknown.
    Unknown,
}

impl MetaNumber {
    /// Parse a `Number=` attribute value.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "A" => Some(MetaNumber::PerAltAllele),
            "R" => Some(MetaNumber::PerAllele),
            "G" => Some(MetaNumber::PerGenotype),
            "." => Some(MetaNumber::Unknown),
            _ => text.parse::<u32>().ok().map(MetaNumber::Count),
        }
    }
}

/// The `Type=` attribute of an INFO/FORMAT meta entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MetaType {
    /// Signed integer values.
    Integer,
    /// Floating point values.
    Float,
    /// Present-or-absent, no value.
    Flag,
    /// Single-character values.
    Character,
    /// Free text values.
    String,
}

impl MetaType {
    /// Parse a `Type=` attribute value.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "Integer" => Some(MetaType::Integer),
            "Float" => Some(MetaType::Float),
            "Flag" => Some(MetaType::Flag),
            "Character" => Some(MetaType::Character),
            "String" => Some(MetaType::String),
            _ => None,
        }
    }
}

/// Resolved Number/Type of a declared INFO or FORMAT entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TypedMeta {
    /// Declared value cardinality.
    pub number: MetaNumber,
    /// Declared value type.
    pub ty: MetaType,
}

/// One `name=value` attribute of a structured meta entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaAttr {
    /// Attribute name (`ID`, `Number`, `Description`, …).
    pub key: String,
    /// Attribute value with quotes and escapes resolved.
    pub value: String,
    /// True when the value was double-quoted in the source.
    pub quoted: bool,
}

/// The value of a meta entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    /// Freeform `##key=value`.
    Flat(String),
    /// Structured `##key=<attr=value,…>`.
    Structured(Vec<MetaAttr>),
}

impl MetaValue {
    /// Look up an attribute value by name. Returns the first occurrence.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            MetaValue::Flat(_) => None,
            MetaValue::Structured(attrs) => attrs
                .iter()
                .find(|a| a.key == name)
                .map(|a| a.value.as_str()),
        }
    }

    /// The full attribute (including quoting information) by name.
    pub fn attribute_full(&self, name: &str) -> Option<&MetaAttr> {
        match self {
            MetaValue::Flat(_) => None,
            MetaValue::Structured(attrs) => attrs.iter().find(|a| a.key == name),
        }
    }
}

/// One accepted meta-information line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaEntry {
    /// 1-based source line of the entry.
    pub line: u64,
    /// Meta category: the key between `##` and `=` (`INFO`, `contig`,
    /// `reference`, …).
    pub category: String,
    /// The entry's `ID` attribute, when the category carries one.
    pub id: Option<String>,
    /// Freeform or structured value.
    pub value: MetaValue,
}

/// Structured categories whose `ID`s must be unique within the category.
pub const ID_UNIQUE_CATEGORIES: &[&str] = &[
    "ALT", "FILTER", "FORMAT", "INFO", "SAMPLE", "PEDIGREE", "contig",
];

/// The accumulated header description of one source.
#[derive(Debug, Clone, Serialize)]
pub struct Source {
    /// Opaque identifier used in diagnostics and reports.
    pub filename: String,
    /// Version resolved from the fileformat line, when recognized.
    pub version: Option<VcfVersion>,
    /// Accepted meta entries, in source order.
    pub entries: Vec<MetaEntry>,
    /// Sample names from the header line, in column order.
    pub sample_names: Vec<String>,
    /// True once the header line has been accepted.
    pub header_seen: bool,

    // Lookup caches, maintained as entries are pushed. Not serialized:
    // they are derivable from `entries`.
    #[serde(skip)]
    ids: HashSet<(String, String)>,
    #[serde(skip)]
    contigs: HashSet<String>,
    #[serde(skip)]
    filter_ids: HashSet<String>,
    #[serde(skip)]
    alt_ids: HashSet<String>,
    #[serde(skip)]
    info_types: HashMap<String, TypedMeta>,
    #[serde(skip)]
    format_types: HashMap<String, TypedMeta>,
    #[serde(skip)]
    categories_seen: HashSet<String>,
}

impl Source {
    /// Create an empty source description for the given filename.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            version: None,
            entries: Vec::new(),
            sample_names: Vec::new(),
            header_seen: false,
            ids: HashSet::new(),
            contigs: HashSet::new(),
            filter_ids: HashSet::new(),
            alt_ids: HashSet::new(),
            info_types: HashMap::new(),
            format_types: HashMap::new(),
            categories_seen: HashSet::new(),
        }
    }

    /// Append an accepted entry and update the lookup caches.
    ///
    /// Uniqueness within the category is checked *before* this call by the
    /// semantic layer; duplicates are still stored so the entry list mirrors
    /// the file.
    pub fn push_entry(&mut self, entry: MetaEntry) {
        self.categories_seen.insert(entry.category.clone());
        if let Some(id) = &entry.id {
            self.ids
                .insert((entry.category.clone(), id.clone()));
            match entry.category.as_str() {
                "contig" => {
                    self.contigs.insert(id.clone());
                }
                "FILTER" => {
                    self.filter_ids.insert(id.clone());
                }
                "ALT" => {
                    self.alt_ids.insert(id.clone());
                }
                "INFO" | "FORMAT" => {
                    if let Some(typed) = typed_of(&entry) {
                        let map = if entry.category == "INFO" {
                            &mut self.info_types
                        } else {
                            &mut self.format_types
                        };
                        map.insert(id.clone(), typed);
                    }
                }
                _ => {}
            }
        }
        self.entries.push(entry);
    }

    /// True when `(category, id)` has already been declared.
    pub fn has_id(&self, category: &str, id: &str) -> bool {
        self.ids
            .contains(&(category.to_string(), id.to_string()))
    }

    /// True when any entry of the category exists.
    pub fn has_category(&self, category: &str) -> bool {
        self.categories_seen.contains(category)
    }

    /// True when the chromosome is declared by a `contig` entry.
    pub fn contig_declared(&self, chromosome: &str) -> bool {
        self.contigs.contains(chromosome)
    }

    /// True when the identifier is a declared FILTER ID.
    pub fn filter_declared(&self, id: &str) -> bool {
        self.filter_ids.contains(id)
    }

    /// True when the identifier is a declared ALT ID.
    pub fn alt_declared(&self, id: &str) -> bool {
        self.alt_ids.contains(id)
    }

    /// The declared Number/Type of an INFO key, when both parsed.
    pub fn info_typed(&self, key: &str) -> Option<&TypedMeta> {
        self.info_types.get(key)
    }

    /// The declared Number/Type of a FORMAT key, when both parsed.
    pub fn format_typed(&self, key: &str) -> Option<&TypedMeta> {
        self.format_types.get(key)
    }

    /// True when the header declared a FORMAT column (equivalently, at least
    /// one sample).
    pub fn has_samples(&self) -> bool {
        !self.sample_names.is_empty()
    }

    /// Total columns every body record must have, once the header is known:
    /// the 8 mandatory columns, plus FORMAT and one column per sample.
    pub fn expected_columns(&self) -> usize {
        if self.has_samples() {
            9 + self.sample_names.len()
        } else {
            8
        }
    }

    /// Entry counts per category, for report summaries.
    pub fn category_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.category.clone()).or_insert(0) += 1;
        }
        counts
    }
}

/// Resolve Number/Type of an INFO/FORMAT entry when both attributes parse.
fn typed_of(entry: &MetaEntry) -> Option<TypedMeta> {
    let number = MetaNumber::parse(entry.value.attribute("Number")?)?;
    let ty = MetaType::parse(entry.value.attribute("Type")?)?;
    Some(TypedMeta { number, ty })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structured(category: &str, attrs: &[(&str, &str)]) -> MetaEntry {
        let attrs: Vec<MetaAttr> = attrs
            .iter()
            .map(|(k, v)| MetaAttr {
                key: k.to_string(),
                value: v.to_string(),
                quoted: *k == "Description",
            })
            .collect();
        let id = attrs
            .iter()
            .find(|a| a.key == "ID")
            .map(|a| a.value.clone());
        MetaEntry {
            line: 2,
            category: category.to_string(),
            id,
            value: MetaValue::Structured(attrs),
        }
    }

    #[test]
    fn version_parse() {
        assert_eq!(VcfVersion::parse("VCFv4.1"), Some(VcfVersion::V4_1));
        assert_eq!(VcfVersion::parse("VCFv4.3"), Some(VcfVersion::V4_3));
        assert_eq!(VcfVersion::parse("VCFv4.0"), None);
        assert_eq!(VcfVersion::parse("vcfv4.1"), None);
    }

    #[test]
    fn number_parse() {
        assert_eq!(MetaNumber::parse("0"), Some(MetaNumber::Count(0)));
        assert_eq!(MetaNumber::parse("12"), Some(MetaNumber::Count(12)));
        assert_eq!(MetaNumber::parse("A"), Some(MetaNumber::PerAltAllele));
        assert_eq!(MetaNumber::parse("R"), Some(MetaNumber::PerAllele));
        assert_eq!(MetaNumber::parse("G"), Some(MetaNumber::PerGenotype));
        assert_eq!(MetaNumber::parse("."), Some(MetaNumber::Unknown));
        assert_eq!(MetaNumber::parse("-1"), None);
        assert_eq!(MetaNumber::parse("B"), None);
    }

    #[test]
    fn type_parse() {
        assert_eq!(MetaType::parse("Integer"), Some(MetaType::Integer));
        assert_eq!(MetaType::parse("Flag"), Some(MetaType::Flag));
        assert_eq!(MetaType::parse("flag"), None);
    }

    #[test]
    fn source_caches_track_entries() {
        let mut src = Source::new("test.vcf");
        src.push_entry(structured("contig", &[("ID", "1"), ("length", "249250621")]));
        src.push_entry(structured(
            "INFO",
            &[
                ("ID", "DP"),
                ("Number", "1"),
                ("Type", "Integer"),
                ("Description", "depth"),
            ],
        ));
        src.push_entry(structured("FILTER", &[("ID", "q10"), ("Description", "low")]));

        assert!(src.contig_declared("1"));
        assert!(!src.contig_declared("2"));
        assert!(src.filter_declared("q10"));
        assert!(src.has_id("INFO", "DP"));
        assert!(!src.has_id("FORMAT", "DP"));
        let typed = src.info_typed("DP").unwrap();
        assert_eq!(typed.number, MetaNumber::Count(1));
        assert_eq!(typed.ty, MetaType::Integer);
    }

    #[test]
    fn source_unparseable_number_yields_no_typed_meta() {
        let mut src = Source::new("test.vcf");
        src.push_entry(structured(
            "INFO",
            &[
                ("ID", "X"),
                ("Number", "NaN"),
                ("Type", "Integer"),
                ("Description", "d"),
            ],
        ));
        assert!(src.info_typed("X").is_none());
        // The entry itself is still recorded.
        assert!(src.has_id("INFO", "X"));
    }

    #[test]
    fn expected_columns() {
        let mut src = Source::new("t.vcf");
        assert_eq!(src.expected_columns(), 8);
        src.sample_names.push("NA001".into());
        src.sample_names.push("NA002".into());
        assert_eq!(src.expected_columns(), 11);
    }

    #[test]
    fn category_counts() {
        let mut src = Source::new("t.vcf");
        src.push_entry(structured("contig", &[("ID", "1")]));
        src.push_entry(structured("contig", &[("ID", "2")]));
        src.push_entry(MetaEntry {
            line: 4,
            category: "reference".into(),
            id: None,
            value: MetaValue::Flat("file:///ref.fa".into()),
        });
        let counts = src.category_counts();
        assert_eq!(counts.get("contig"), Some(&2));
        assert_eq!(counts.get("reference"), Some(&1));
    }
}
