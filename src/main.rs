use clap::{Parser, Subcommand};

mod cli;
mod config;
mod core;
mod error;
mod http;
mod services;
mod utils;

use config::Config;
use error::Result;

#[derive(Parser)]
#[command(name = "songscreen")]
#[command(about = "HTTP facade for lyrics search and movie metadata lookup")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Config file path (optional)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve(cli::serve::ServeArgs),

    /// Look up cleaned lyrics for a song
    Lyrics(cli::lyrics::LyricsArgs),

    /// Clean raw scraped lyrics text from a file or stdin
    Clean(cli::clean::CleanArgs),

    /// Search movies or show movie details
    Movie(cli::movie::MovieArgs),

    /// Show or initialize configuration
    Config(cli::config::ConfigArgs),
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    utils::logging::init_logging(cli.verbose)?;

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve(args) => cli::serve::execute(args, config).await,
        Commands::Lyrics(args) => cli::lyrics::execute(args, config).await,
        Commands::Clean(args) => cli::clean::execute(args).await,
        Commands::Movie(args) => cli::movie::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args, &config).await,
    }
}
