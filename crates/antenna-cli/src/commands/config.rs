//! Config command for managing CLI configuration

use clap::{Args, Subcommand};

use crate::config::{config_file_path, Config};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print a config value
    Get {
        /// One of: map, max_x, accept_lowercase, format
        key: String,
    },
    /// Set a config value
    Set {
        /// One of: map, max_x, accept_lowercase, format
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: &ConfigArgs) -> anyhow::Result<()> {
    match &args.command {
        ConfigCommands::Get { key } => {
            if !Config::keys().contains(&key.as_str()) {
                anyhow::bail!(
                    "Unknown config key: {} (available: {})",
                    key,
                    Config::keys().join(", ")
                );
            }
            match Config::load().get(key) {
                Some(value) => println!("{}", value),
                None => println!("(not set)"),
            }
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load();
            config.set(key, value)?;
            config.save()?;
            tracing::info!("Config {} set to {}", key, value);
            println!("Set {} = {}", key, value);
        }
        ConfigCommands::List => {
            let config = Config::load();
            println!("# {}", config_file_path().display());
            for key in Config::keys() {
                let value = config.get(key).unwrap_or_else(|| "(not set)".to_string());
                println!("{} = {}", key, value);
            }
        }
        ConfigCommands::Path => println!("{}", config_file_path().display()),
        ConfigCommands::Init { force } => {
            let path = config_file_path();
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Config::default().save()?;
            println!("Created config file at {}", path.display());
        }
    }
    Ok(())
}
