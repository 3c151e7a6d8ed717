//! Command-line interface for bad-asn-registry
//!
//! Running without a subcommand performs `update` in the current directory.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{load_config, merge_cli_with_config, CliOverrides, Config};

mod lookup;
mod update;

/// Merge, enrich and publish the bad-ASN list
#[derive(Parser)]
#[command(name = "bad-asn-registry")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    global: GlobalArgs,
}

#[derive(Args)]
struct GlobalArgs {
    /// Directory holding the list files
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".", global = true)]
    dir: PathBuf,

    /// Path to config file (bad-asn.toml or bad-asn.yml)
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Lookup endpoint; `{asn}` is replaced by the number
    #[arg(long, value_name = "TEMPLATE", env = "BAD_ASN_LOOKUP_URL", global = true)]
    lookup_url: Option<String>,

    /// Per-request lookup timeout
    #[arg(long, value_name = "SECS", global = true)]
    timeout_secs: Option<u64>,

    /// Pause after each lookup
    #[arg(long, value_name = "MS", global = true)]
    delay_ms: Option<u64>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load, enrich and rewrite the list (default)
    Update,

    /// Resolve ASNs to entity names without touching any file
    Lookup(lookup::LookupArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.global.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let config = resolve_config(&cli.global)?;

    match cli.command.unwrap_or(Commands::Update) {
        Commands::Update => update::run(&config),
        Commands::Lookup(args) => lookup::run(&config, args),
    }
}

fn resolve_config(global: &GlobalArgs) -> Result<Config> {
    let file_config = load_config(&global.dir, global.config.as_deref())?;
    let overrides = CliOverrides {
        lookup_url: global.lookup_url.clone(),
        timeout_secs: global.timeout_secs,
        delay_ms: global.delay_ms,
    };
    Ok(merge_cli_with_config(file_config, &overrides))
}
