//! Per-scan shared state.
//!
//! One [`ParsingState`] is owned by each scan and referenced by the parse
//! policy and the semantic checker. Reusing a state across sources is not
//! supported; construct a fresh one.

use crate::model::Source;
use std::collections::{HashMap, HashSet};

/// State accumulated while scanning one source.
#[derive(Debug)]
pub struct ParsingState {
    /// The growing header description.
    pub source: Source,
    /// Number of accepted body records.
    pub record_count: u64,
    /// Chromosomes already reported as missing a contig declaration, so
    /// the warning fires at most once per chromosome.
    pub bad_defined_contigs: HashSet<String>,
    /// Highest position accepted so far, per chromosome.
    pub max_position_seen: HashMap<String, u64>,
}

impl ParsingState {
    /// Fresh state for one source.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            source: Source::new(filename),
            record_count: 0,
            bad_defined_contigs: HashSet::new(),
            max_position_seen: HashMap::new(),
        }
    }
}
