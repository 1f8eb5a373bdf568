//! External provider clients
//!
//! - `genius`: lyrics search and song page scraping
//! - `tmdb`: movie search and details with field remapping
//!
//! Both clients go through [`get_with_retry`] so transient failures are
//! retried the same way everywhere.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::error::NetworkError;

pub mod genius;
pub mod tmdb;

#[cfg(test)]
mod test_server;

pub use genius::GeniusClient;
pub use tmdb::TmdbClient;

const MAX_ATTEMPTS: u32 = 3;
const BACKOFF_BASE_MS: u64 = 300;

/// Result of a provider-backed lookup.
///
/// Keeps "nothing matched" apart from "the provider could not be reached".
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome<T> {
    Found(T),
    NotFound,
    ProviderError(String),
}

#[cfg(test)]
impl<T> ProviderOutcome<T> {
    pub fn found(self) -> Option<T> {
        match self {
            ProviderOutcome::Found(value) => Some(value),
            _ => None,
        }
    }
}

/// One ranked hit from a lyrics search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongMatch {
    pub id: u64,
    pub title: String,
    pub artist: String,
    pub url: String,
}

#[async_trait]
pub trait LyricsProvider: Send + Sync {
    /// Identifier reported as the `source` of lyrics results.
    fn name(&self) -> &'static str;

    /// Ranked song matches for a search string, best first.
    async fn search(&self, query: &str) -> Result<Vec<SongMatch>, NetworkError>;

    /// Raw page text for a match, `None` if the page carries no lyrics.
    async fn fetch_lyrics(&self, song: &SongMatch) -> Result<Option<String>, NetworkError>;
}

#[async_trait]
pub trait MovieProvider: Send + Sync {
    async fn search(&self, query: &str, page: u32) -> Result<tmdb::MoviePage, NetworkError>;

    async fn details(&self, id: u64) -> Result<Option<tmdb::MovieDetails>, NetworkError>;
}

/// GET with retries on transport errors, 429 and 5xx.
///
/// Any other status is handed back to the caller, which decides what 404 and
/// friends mean for its endpoint.
pub(crate) async fn get_with_retry(
    client: &reqwest::Client,
    url: &str,
    params: &[(&str, &str)],
) -> Result<reqwest::Response, NetworkError> {
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        let backoff = Duration::from_millis(2u64.pow(attempt - 1) * BACKOFF_BASE_MS);

        match client.get(url).query(params).send().await {
            Ok(response) => {
                let status = response.status();
                if status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                    if attempt < MAX_ATTEMPTS {
                        debug!("Retrying {} after status {} (attempt {})", url, status, attempt);
                        tokio::time::sleep(backoff).await;
                        continue;
                    }
                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        return Err(NetworkError::RateLimit);
                    }
                    if status == reqwest::StatusCode::SERVICE_UNAVAILABLE {
                        return Err(NetworkError::ServiceUnavailable);
                    }
                    return Err(NetworkError::Status {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }
                return Ok(response);
            }
            Err(e) => {
                if attempt < MAX_ATTEMPTS {
                    debug!("Retrying {} after request error: {} (attempt {})", url, e, attempt);
                    tokio::time::sleep(backoff).await;
                    continue;
                }
                return Err(NetworkError::Http(e));
            }
        }
    }
}

/// Build the shared reqwest client for provider calls.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, NetworkError> {
    let version = env!("CARGO_PKG_VERSION");
    let user_agent = format!("songscreen/{}", version);

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()?;

    Ok(client)
}
