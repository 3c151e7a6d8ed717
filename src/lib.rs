//! bad-asn-registry: maintain the curated list of abusive Autonomous System Numbers
//!
//! Existing `ASN,Entity` CSV files are merged with newly flagged ASNs, whose
//! names are resolved through an external lookup API. The merged list is
//! published as CSV, JSON and a plain number list.

pub mod cli;
pub mod config;
pub mod domain;
pub mod enrich;
pub mod error;
pub mod pipeline;
pub mod registry;
pub mod render;

pub use config::Config;
pub use domain::{Asn, Record, Registry, Resolution};
pub use pipeline::{run_update, UpdateSummary};
