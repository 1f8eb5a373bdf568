use clap::Args;
use tracing::info;

use crate::config::Config;
use crate::core::services::ProviderOutcome;
use crate::error::{Result, SongscreenError};
use crate::services::{AppServices, LyricsService};

#[derive(Args)]
pub struct LyricsArgs {
    /// Free-text query, e.g. "Beyoncé Halo"
    #[arg(value_name = "QUERY")]
    query: Vec<String>,

    /// Artist name (used with --title when no query is given)
    #[arg(short, long)]
    artist: Option<String>,

    /// Song title
    #[arg(short, long)]
    title: Option<String>,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

pub async fn execute(args: LyricsArgs, config: Config) -> Result<()> {
    let joined = args.query.join(" ");
    let search = LyricsService::compose_query(
        Some(joined.as_str()),
        args.artist.as_deref(),
        args.title.as_deref(),
    )
    .ok_or_else(|| SongscreenError::Validation("Provide a query or --artist/--title".to_string()))?;

    let services = AppServices::new(config)?;
    info!("Looking up lyrics for '{}'", search);

    match services.lyrics().lookup(&search).await {
        ProviderOutcome::Found(result) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result).map_err(anyhow::Error::from)?);
            } else {
                println!("{} - {}\n", result.artist, result.title);
                println!("{}", result.lyrics);
            }
            Ok(())
        }
        ProviderOutcome::NotFound => {
            println!("No lyrics found for '{}'", search);
            Ok(())
        }
        ProviderOutcome::ProviderError(message) => Err(SongscreenError::Provider(message)),
    }
}
