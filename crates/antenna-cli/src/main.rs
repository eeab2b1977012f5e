//! Antenna CLI - Command line interface for the antenna network

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use antenna_core::{load_map_file, Error, InterlinkMode, Network};
use commands::{completions, network, query};
use config::Config;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "antenna")]
#[command(author, version, about = "Antenna network graph engine")]
pub struct Cli {
    /// Map file to load
    #[arg(short, long, env = "ANTENNA_MAP", global = true)]
    pub map: Option<PathBuf>,

    /// Output format: table, json, csv
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// Link antennas that share a frequency (default)
    #[arg(long, global = true, overrides_with = "no_same")]
    pub same: bool,

    /// Do not link antennas that share a frequency
    #[arg(long, global = true, overrides_with = "same")]
    pub no_same: bool,

    /// Link antennas with different frequencies
    #[arg(long, global = true)]
    pub different: bool,

    /// Refuse to add an edge that already exists
    #[arg(long, global = true)]
    pub check_duplicates: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Interlink mode selected by the linking flags
    ///
    /// `--same` and `--no-same` override each other; the last one wins.
    pub fn interlink_mode(&self) -> InterlinkMode {
        InterlinkMode::default()
            .with_same(self.same || !self.no_same)
            .with_different(self.different)
            .checked(self.check_duplicates)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List antennas in store order
    Vertices,
    /// List the edges of an antenna
    Edges(network::PositionArgs),
    /// Insert an antenna and show the resulting map
    Insert(network::InsertArgs),
    /// Remove an antenna and show the resulting map
    Remove(network::PositionArgs),
    /// Add an edge between two antennas
    Link(network::LinkArgs),
    /// Remove an edge between two antennas
    Unlink(network::LinkArgs),
    /// Depth-first traversal from an antenna
    Dfs(network::PositionArgs),
    /// Breadth-first traversal from an antenna
    Bfs(query::BfsArgs),
    /// Enumerate every simple path between two antennas
    Paths(query::PathsArgs),
    /// Midpoints between antennas of two frequencies
    Intersections(query::IntersectionsArgs),
    /// Locations of harmful effects
    Effects(query::EffectsArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context resolved from flags and the config file
pub struct AppContext {
    pub config: Config,
    pub format: OutputFormat,
    pub map: Option<PathBuf>,
    pub mode: InterlinkMode,
}

impl AppContext {
    pub fn new(cli: &Cli) -> Self {
        let config = Config::load();
        let format: OutputFormat = cli
            .format
            .as_deref()
            .or(config.format.as_deref())
            .unwrap_or("table")
            .into();
        let map = cli.map.clone().or_else(|| config.map.clone());

        Self {
            config,
            format,
            map,
            mode: cli.interlink_mode(),
        }
    }

    /// Load the configured map and interlink it
    pub fn load_network(&self) -> anyhow::Result<Network> {
        let path = self
            .map
            .as_ref()
            .ok_or(Error::NetworkInvalid)
            .context("No map given: pass --map or set the `map` config key")?;
        tracing::debug!("Using map at: {:?}", path);

        let mut network = load_map_file(path, self.config.network_config())
            .with_context(|| format!("Failed to load map {}", path.display()))?;
        network.interlink(self.mode)?;
        Ok(network)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting antenna CLI");

    let ctx = AppContext::new(&cli);

    match &cli.command {
        Commands::Vertices => network::run_vertices(&ctx)?,
        Commands::Edges(args) => network::run_edges(args, &ctx)?,
        Commands::Insert(args) => network::run_insert(args, &ctx)?,
        Commands::Remove(args) => network::run_remove(args, &ctx)?,
        Commands::Link(args) => network::run_link(args, &ctx)?,
        Commands::Unlink(args) => network::run_unlink(args, &ctx)?,
        Commands::Dfs(args) => query::run_dfs(args, &ctx)?,
        Commands::Bfs(args) => query::run_bfs(args, &ctx)?,
        Commands::Paths(args) => query::run_paths(args, &ctx)?,
        Commands::Intersections(args) => query::run_intersections(args, &ctx)?,
        Commands::Effects(args) => query::run_effects(args, &ctx)?,
        Commands::Config(args) => commands::config::run(args)?,
        Commands::Completions(args) => completions::run(args)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode(args: &[&str]) -> InterlinkMode {
        let argv = ["antenna"].iter().chain(args).chain(&["vertices"]);
        Cli::try_parse_from(argv).unwrap().interlink_mode()
    }

    #[test]
    fn test_interlink_flags() {
        assert_eq!(mode(&[]), InterlinkMode::same());
        assert_eq!(mode(&["--same"]), InterlinkMode::same());
        assert!(!mode(&["--no-same"]).same_frequency);
        assert!(mode(&["--no-same", "--same"]).same_frequency);
        assert!(!mode(&["--same", "--no-same"]).same_frequency);

        let both = mode(&["--different", "--check-duplicates"]);
        assert_eq!(both, InterlinkMode::same().with_different(true).checked(true));
    }
}
