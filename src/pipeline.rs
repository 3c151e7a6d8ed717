//! The update run: load the existing list, enrich it, merge the secondary
//! file, then rewrite every output.

use crate::config::Config;
use crate::domain::Registry;
use crate::enrich::{enrich_from_file, AsnResolver};
use crate::registry::{load_csv, load_csv_if_exists};
use crate::render::write_outputs;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Counts reported at the end of an update.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UpdateSummary {
    /// Data lines in the primary file before the run (header excluded).
    pub original_count: usize,
    pub added: usize,
    pub skipped_existing: usize,
    pub invalid: usize,
    /// Records contributed by the secondary merge file.
    pub merged_secondary: usize,
    pub final_count: usize,
}

pub fn run_update(config: &Config, resolver: &dyn AsnResolver) -> Result<UpdateSummary> {
    let mut registry = Registry::new();
    let mut summary = UpdateSummary::default();

    let primary = config.primary_path();
    if primary.exists() {
        summary.original_count = count_data_lines(&primary)?;
        load_csv(&primary, &mut registry)
            .with_context(|| format!("Failed loading {}", primary.display()))?;
    }

    let enriched =
        enrich_from_file(&config.new_asns_path(), &mut registry, resolver, config.lookup.delay())?;
    summary.added = enriched.added;
    summary.skipped_existing = enriched.skipped_existing;
    summary.invalid = enriched.invalid;

    let secondary = config.secondary_path();
    summary.merged_secondary = load_csv_if_exists(&secondary, &mut registry)
        .with_context(|| format!("Failed merging {}", secondary.display()))?;

    let records = registry.into_sorted();
    summary.final_count = records.len();

    println!("Original CSV Length: {}", summary.original_count);
    println!("New CSV Length: {}", summary.final_count);

    write_outputs(&config.output_paths(), &records)?;
    println!("Wrote new CSV, JSON, and numbers file");

    Ok(summary)
}

/// Line count minus the header row.
fn count_data_lines(path: &Path) -> Result<usize> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed reading {}", path.display()))?;
    Ok(content.lines().count().saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Asn, Record, Resolution};
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct NamedResolver;

    impl AsnResolver for NamedResolver {
        fn resolve(&self, asn: Asn) -> Resolution {
            Resolution::Named(format!("Org {asn}"))
        }
    }

    fn config_in(dir: &Path) -> Config {
        let mut config = Config { dir: dir.to_path_buf(), ..Config::default() };
        config.lookup.delay_ms = 0;
        config
    }

    fn read(dir: &Path, name: &str) -> String {
        fs::read_to_string(dir.join(name)).expect("read output")
    }

    fn reload(path: PathBuf) -> Vec<Record> {
        let mut registry = Registry::new();
        load_csv(&path, &mut registry).expect("reload");
        registry.into_sorted()
    }

    #[test]
    fn primary_wins_over_secondary() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("bad-asn-list.csv"), "ASN,Entity\n1,A\n").unwrap();
        fs::write(tmp.path().join("bad-asn-list.csv.1"), "ASN,Entity\n1,B\n2,C\n").unwrap();
        let config = config_in(tmp.path());

        let summary = run_update(&config, &NamedResolver).expect("update");

        assert_eq!(summary.original_count, 1);
        assert_eq!(summary.merged_secondary, 1);
        assert_eq!(summary.final_count, 2);
        assert_eq!(
            reload(config.primary_path()),
            vec![Record::new(Asn(1), "A"), Record::new(Asn(2), "C")]
        );
        assert_eq!(read(tmp.path(), "only number.txt"), "1\n2\n");
    }

    #[test]
    fn new_asns_are_resolved_and_sorted_in() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("bad-asn-list.csv"), "ASN,Entity\n70000,Big\n5,Small\n").unwrap();
        fs::write(tmp.path().join("newNaughtyAsns.txt"), "64512\nabc\n5\n").unwrap();
        let config = config_in(tmp.path());

        let summary = run_update(&config, &NamedResolver).expect("update");

        assert_eq!(
            summary,
            UpdateSummary {
                original_count: 2,
                added: 1,
                skipped_existing: 1,
                invalid: 1,
                merged_secondary: 0,
                final_count: 3,
            }
        );
        assert_eq!(read(tmp.path(), "only number.txt"), "5\n64512\n70000\n");
        assert!(read(tmp.path(), "bad-asn-list.json").contains("\"Entity\": \"Org 64512\""));
    }

    #[test]
    fn enrichment_runs_before_secondary_merge() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("newNaughtyAsns.txt"), "9\n").unwrap();
        fs::write(tmp.path().join("bad-asn-list.csv.1"), "ASN,Entity\n9,From secondary\n").unwrap();
        let config = config_in(tmp.path());

        run_update(&config, &NamedResolver).expect("update");

        assert_eq!(reload(config.primary_path()), vec![Record::new(Asn(9), "Org 9")]);
    }

    #[test]
    fn starts_empty_without_any_input() {
        let tmp = TempDir::new().expect("tmp");
        let summary = run_update(&config_in(tmp.path()), &NamedResolver).expect("update");

        assert_eq!(summary, UpdateSummary::default());
        assert_eq!(read(tmp.path(), "bad-asn-list.csv"), "ASN,Entity\r\n");
        assert_eq!(read(tmp.path(), "bad-asn-list.json"), "[]");
    }

    #[test]
    fn rerun_is_byte_identical() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join("bad-asn-list.csv"),
            "ASN,Entity\n30,\"Thirty, LLC\"\n10,Ten\n20,Zwanzig GmbH\n",
        )
        .unwrap();
        let config = config_in(tmp.path());

        run_update(&config, &NamedResolver).expect("first run");
        let first: Vec<String> = ["bad-asn-list.csv", "bad-asn-list.json", "only number.txt"]
            .iter()
            .map(|name| read(tmp.path(), name))
            .collect();
        run_update(&config, &NamedResolver).expect("second run");
        let second: Vec<String> = ["bad-asn-list.csv", "bad-asn-list.json", "only number.txt"]
            .iter()
            .map(|name| read(tmp.path(), name))
            .collect();

        similar_asserts::assert_eq!(first, second);
    }

    #[test]
    fn malformed_primary_is_fatal_and_writes_nothing() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("bad-asn-list.csv"), "ASN,Entity\nnope,A\n").unwrap();

        let err = run_update(&config_in(tmp.path()), &NamedResolver).unwrap_err();

        assert!(format!("{err:#}").contains("invalid ASN 'nope'"));
        assert!(!tmp.path().join("bad-asn-list.json").exists());
    }
}
