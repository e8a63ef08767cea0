/// Header description: version, meta entries, sample names.
pub mod source;

/// Body records and alternate allele classification.
pub mod record;

pub use record::{AltAllele, AltKind, InfoPair, Record};
pub use source::{MetaAttr, MetaEntry, MetaNumber, MetaType, MetaValue, Source, TypedMeta, VcfVersion};
