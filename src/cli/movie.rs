use clap::{Args, Subcommand};

use crate::config::Config;
use crate::core::services::tmdb::{MovieSummary, MAX_PAGE};
use crate::config::validation::ConfigValidator;
use crate::error::{ConfigError, Result, SongscreenError};
use crate::services::AppServices;

#[derive(Args)]
pub struct MovieArgs {
    #[command(subcommand)]
    command: MovieCommands,
}

#[derive(Subcommand)]
enum MovieCommands {
    /// Search movies by title
    Search {
        /// Title to search for
        #[arg(value_name = "QUERY", required = true)]
        query: Vec<String>,

        /// Result page
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show details for a TMDB movie id
    Show {
        /// TMDB movie id
        id: u64,
    },
}

fn format_summary(movie: &MovieSummary) -> String {
    let year = movie
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "----".to_string());
    let rating = movie
        .rating
        .map(|r| format!("{:.1}", r))
        .unwrap_or_else(|| "-".to_string());
    format!("{:>8}  {}  {:>4}  {}", movie.id, year, rating, movie.title)
}

pub async fn execute(args: MovieArgs, config: Config) -> Result<()> {
    let services = AppServices::new(config)?;
    let movies = services.movies().ok_or_else(|| {
        SongscreenError::Config(ConfigError::MissingField {
            field: "tmdb_api_key".to_string(),
        })
    })?;

    match args.command {
        MovieCommands::Search { query, page, json } => {
            ConfigValidator::validate_range(page, 1, MAX_PAGE, "page")?;
            let query = query.join(" ");
            let results = movies.search(&query, page).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&results).map_err(anyhow::Error::from)?);
                return Ok(());
            }

            if results.results.is_empty() {
                println!("No movies found for '{}'", query);
                return Ok(());
            }

            println!(
                "Page {}/{} ({} results)",
                results.page, results.total_pages, results.total_results
            );
            for movie in &results.results {
                println!("{}", format_summary(movie));
            }
        }

        MovieCommands::Show { id } => match movies.details(id).await? {
            Some(details) => {
                println!("{}", serde_json::to_string_pretty(&details).map_err(anyhow::Error::from)?);
            }
            None => println!("No movie with id {}", id),
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock::movie;

    #[test]
    fn test_format_summary() {
        let mut summary = movie(603, "The Matrix", 1999).summary;
        assert_eq!(format_summary(&summary), "     603  1999   7.5  The Matrix");

        summary.year = None;
        summary.rating = None;
        assert_eq!(format_summary(&summary), "     603  ----     -  The Matrix");
    }
}
