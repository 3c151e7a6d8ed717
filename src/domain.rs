//! Core domain types: ASNs, records and the deduplicating registry accumulator.

use crate::error::LookupError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Autonomous System Number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Asn(pub u32);

impl Asn {
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Asn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Asn {
    type Err = std::num::ParseIntError;

    /// Surrounding whitespace is ignored. The rest must be an unsigned decimal
    /// that fits in `u32`; an optional leading `+` and the value 0 are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(Asn)
    }
}

/// One entry of the bad-ASN list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "ASN")]
    pub asn: Asn,
    #[serde(rename = "Entity")]
    pub entity: String,
}

impl Record {
    pub fn new(asn: Asn, entity: impl Into<String>) -> Self {
        Self { asn, entity: entity.into() }
    }
}

/// Outcome of resolving an ASN against the lookup service.
#[derive(Debug)]
pub enum Resolution {
    /// The service returned a usable name.
    Named(String),
    /// The service answered but the body carried no name.
    Unnamed,
    /// Transport, status, timeout or decoding failure.
    Failed(LookupError),
}

impl Resolution {
    /// Entity string written to the output files.
    ///
    /// `Unnamed` and `Failed` map to the `ASN <n>` and `ASN <n> - Lookup Failed`
    /// placeholders consumers of the published list already rely on.
    pub fn entity(&self, asn: Asn) -> String {
        match self {
            Resolution::Named(name) => name.clone(),
            Resolution::Unnamed => format!("ASN {asn}"),
            Resolution::Failed(_) => format!("ASN {asn} - Lookup Failed"),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Resolution::Failed(_))
    }
}

/// Deduplicated record accumulator threaded through load, enrich and write.
///
/// The first record seen for an ASN wins; later ones are discarded.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    seen: HashSet<Asn>,
    records: Vec<Record>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` (and drops `record`) when its ASN is already present.
    pub fn insert(&mut self, record: Record) -> bool {
        if !self.seen.insert(record.asn) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn contains(&self, asn: Asn) -> bool {
        self.seen.contains(&asn)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Consume the registry, returning records in ascending ASN order.
    pub fn into_sorted(self) -> Vec<Record> {
        let mut records = self.records;
        records.sort_by_key(|r| r.asn);
        records
    }
}
