//! Enrichment of the registry with newly flagged ASNs

use crate::domain::{Asn, Record, Registry};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

pub mod lookup;

pub use lookup::{AsnResolver, HttpResolver};

/// Counts produced by [`enrich_from_file`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EnrichReport {
    /// Records appended, including ones whose lookup failed.
    pub added: usize,
    pub skipped_existing: usize,
    pub invalid: usize,
}

/// Read candidate ASNs from `path` (one per line) and add every unknown one
/// to `registry`, resolving its name through `resolver`.
///
/// A missing file is a no-op. Unparseable lines and ASNs already present are
/// reported and skipped. `delay` is slept after every lookup actually issued,
/// whatever its outcome.
pub fn enrich_from_file(
    path: &Path,
    registry: &mut Registry,
    resolver: &dyn AsnResolver,
    delay: Duration,
) -> Result<EnrichReport> {
    if !path.exists() {
        println!("No {} file found, skipping...", display_name(path));
        return Ok(EnrichReport::default());
    }

    println!("Processing new naughty ASNs from {}...", display_name(path));
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed reading new ASN list: {}", path.display()))?;

    let mut report = EnrichReport::default();
    for candidate in content.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let asn: Asn = match candidate.parse() {
            Ok(asn) => asn,
            Err(_) => {
                println!("Invalid ASN number: {candidate}");
                report.invalid += 1;
                continue;
            }
        };

        if registry.contains(asn) {
            println!("ASN {asn} already exists, skipping...");
            report.skipped_existing += 1;
            continue;
        }

        println!("Looking up ASN {asn}...");
        let resolution = resolver.resolve(asn);
        let entity = resolution.entity(asn);
        registry.insert(Record::new(asn, entity.clone()));
        println!("Added ASN {asn}: {entity}");
        report.added += 1;

        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }

    println!("Added {} new ASNs", report.added);
    Ok(report)
}

fn display_name(path: &Path) -> String {
    path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_else(|| {
        path.display().to_string()
    })
}
