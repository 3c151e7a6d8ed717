//! Configuration loading and merging
//!
//! Handles loading from config files, environment variables, and CLI arguments
//! with proper precedence (CLI > Env > File > Defaults).

pub mod loader;
pub mod merge;

pub use loader::load_config;
pub use merge::{merge_cli_with_config, CliOverrides};

use crate::enrich::lookup::DEFAULT_LOOKUP_URL;
use crate::render::OutputPaths;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory every file name below is resolved against.
    #[serde(skip)]
    pub dir: PathBuf,
    pub files: FileNames,
    pub lookup: LookupSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            files: FileNames::default(),
            lookup: LookupSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileNames {
    pub primary: String,
    pub json: String,
    pub secondary: String,
    pub numbers: String,
    pub new_asns: String,
}

impl Default for FileNames {
    fn default() -> Self {
        Self {
            primary: "bad-asn-list.csv".to_string(),
            json: "bad-asn-list.json".to_string(),
            secondary: "bad-asn-list.csv.1".to_string(),
            numbers: "only number.txt".to_string(),
            new_asns: "newNaughtyAsns.txt".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LookupSettings {
    /// Endpoint template; `{asn}` is replaced with the number.
    pub url: String,
    pub timeout_secs: u64,
    /// Courtesy pause after each lookup.
    pub delay_ms: u64,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self { url: DEFAULT_LOOKUP_URL.to_string(), timeout_secs: 10, delay_ms: 1000 }
    }
}

impl LookupSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Config {
    fn resolve(&self, name: &str) -> PathBuf {
        let path = Path::new(name);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.dir.join(path)
        }
    }

    pub fn primary_path(&self) -> PathBuf {
        self.resolve(&self.files.primary)
    }

    pub fn secondary_path(&self) -> PathBuf {
        self.resolve(&self.files.secondary)
    }

    pub fn new_asns_path(&self) -> PathBuf {
        self.resolve(&self.files.new_asns)
    }

    pub fn output_paths(&self) -> OutputPaths {
        OutputPaths {
            json: self.resolve(&self.files.json),
            csv: self.primary_path(),
            numbers: self.resolve(&self.files.numbers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_published_file_names() {
        let cfg = Config::default();
        assert_eq!(cfg.primary_path(), PathBuf::from("./bad-asn-list.csv"));
        assert_eq!(cfg.output_paths().numbers, PathBuf::from("./only number.txt"));
        assert_eq!(cfg.lookup.timeout(), Duration::from_secs(10));
        assert_eq!(cfg.lookup.delay(), Duration::from_secs(1));
    }

    #[test]
    fn absolute_file_names_ignore_dir() {
        let mut cfg = Config { dir: PathBuf::from("/data"), ..Config::default() };
        cfg.files.new_asns = "/tmp/new.txt".to_string();
        assert_eq!(cfg.new_asns_path(), PathBuf::from("/tmp/new.txt"));
        assert_eq!(cfg.secondary_path(), PathBuf::from("/data/bad-asn-list.csv.1"));
    }
}
