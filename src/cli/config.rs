use clap::{Args, Subcommand};

use crate::config::env::EnvParser;
use crate::config::Config as AppConfig;
use crate::error::Result;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write the effective configuration to the config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// List SONGSCREEN_* environment variables currently set
    Env,
}

pub async fn execute(args: ConfigArgs, config: &AppConfig) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            println!("Current configuration:");
            println!("  bind_address: {}", config.bind_address);
            println!("  port: {}", config.port);
            println!("  workers: {:?}", config.workers);
            println!("  genius_base_url: {}", config.genius_base_url);
            println!("  tmdb_base_url: {}", config.tmdb_base_url);
            println!("  tmdb_image_base_url: {}", config.tmdb_image_base_url);
            println!(
                "  tmdb_api_key: {}",
                if config.tmdb_api_key.is_some() { "(set)" } else { "(not set)" }
            );
            println!("  request_timeout_seconds: {}", config.request_timeout_seconds);
            println!("  cache_max_entries: {}", config.cache_max_entries);
            println!("  cache_ttl_seconds: {}", config.cache_ttl_seconds);
        }

        ConfigCommands::Path => {
            println!("{}", AppConfig::config_path()?.display());
        }

        ConfigCommands::Init { force } => {
            let path = AppConfig::config_path()?;
            if path.exists() && !force {
                println!("Config file already exists: {} (use --force to overwrite)", path.display());
                return Ok(());
            }
            config.save(&path)?;
            println!("Configuration written to {}", path.display());
        }

        ConfigCommands::Env => {
            let vars = EnvParser::get_all_songscreen_vars();
            if vars.is_empty() {
                println!("No SONGSCREEN_* environment variables set");
            }
            for (key, value) in vars {
                println!("  {}={}", key, value);
            }
        }
    }

    Ok(())
}
