//! Apply command-line overrides on top of file configuration

use super::Config;

/// Values given on the command line (or their environment fallbacks).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub lookup_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub delay_ms: Option<u64>,
}

pub fn merge_cli_with_config(mut config: Config, cli: &CliOverrides) -> Config {
    if let Some(url) = &cli.lookup_url {
        config.lookup.url = url.clone();
    }
    if let Some(timeout) = cli.timeout_secs {
        config.lookup.timeout_secs = timeout;
    }
    if let Some(delay) = cli.delay_ms {
        config.lookup.delay_ms = delay;
    }
    config
}
