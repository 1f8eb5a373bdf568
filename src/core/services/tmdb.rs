use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use super::{build_http_client, get_with_retry, MovieProvider};
use crate::error::NetworkError;

/// TMDB caps `page` at 500.
pub const MAX_PAGE: u32 = 500;

#[derive(Deserialize, Debug)]
struct TmdbSearchResponse {
    page: u32,
    #[serde(default)]
    results: Vec<TmdbMovie>,
    #[serde(default)]
    total_pages: u32,
    #[serde(default)]
    total_results: u32,
}

#[derive(Deserialize, Debug)]
struct TmdbMovie {
    id: u64,
    title: String,
    original_title: Option<String>,
    release_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    vote_average: Option<f64>,
    vote_count: Option<u32>,
    original_language: Option<String>,
}

#[derive(Deserialize, Debug)]
struct TmdbMovieDetails {
    #[serde(flatten)]
    movie: TmdbMovie,
    tagline: Option<String>,
    runtime: Option<u32>,
    #[serde(default)]
    genres: Vec<TmdbGenre>,
    imdb_id: Option<String>,
    homepage: Option<String>,
    backdrop_path: Option<String>,
    status: Option<String>,
}

#[derive(Deserialize, Debug)]
struct TmdbGenre {
    name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    pub original_title: Option<String>,
    pub year: Option<i32>,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    pub poster_url: Option<String>,
    pub rating: Option<f64>,
    pub vote_count: Option<u32>,
    pub language: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub summary: MovieSummary,
    pub tagline: Option<String>,
    pub runtime_minutes: Option<u32>,
    pub genres: Vec<String>,
    pub imdb_id: Option<String>,
    pub homepage: Option<String>,
    pub backdrop_url: Option<String>,
    pub status: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MoviePage {
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u32,
    pub results: Vec<MovieSummary>,
}

#[derive(Clone)]
pub struct TmdbClient {
    client: reqwest::Client,
    base_url: String,
    image_base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(
        base_url: &str,
        image_base_url: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, NetworkError> {
        Ok(Self {
            client: build_http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            image_base_url: image_base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl MovieProvider for TmdbClient {
    async fn search(&self, query: &str, page: u32) -> Result<MoviePage, NetworkError> {
        let url = format!("{}/search/movie", self.base_url);
        let page_str = page.to_string();
        info!("Searching TMDB for '{}' (page {})", query, page);

        let params = [
            ("api_key", self.api_key.as_str()),
            ("query", query),
            ("page", page_str.as_str()),
        ];
        let response = get_with_retry(&self.client, &url, &params).await?;
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(NetworkError::InvalidResponse {
                reason: "TMDB rejected the API key".to_string(),
            });
        }
        if !status.is_success() {
            return Err(NetworkError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let raw: TmdbSearchResponse = response.json().await?;
        debug!("TMDB returned {} of {} results", raw.results.len(), raw.total_results);
        Ok(remap_page(raw, &self.image_base_url))
    }

    async fn details(&self, id: u64) -> Result<Option<MovieDetails>, NetworkError> {
        let url = format!("{}/movie/{}", self.base_url, id);
        debug!("Fetching TMDB movie {}", id);

        let response = get_with_retry(&self.client, &url, &[("api_key", self.api_key.as_str())]).await?;
        match response.status() {
            reqwest::StatusCode::OK => {
                let raw: TmdbMovieDetails = response.json().await?;
                Ok(Some(remap_details(raw, &self.image_base_url)))
            }
            reqwest::StatusCode::NOT_FOUND => {
                info!("No TMDB movie with id {}", id);
                Ok(None)
            }
            reqwest::StatusCode::UNAUTHORIZED => Err(NetworkError::InvalidResponse {
                reason: "TMDB rejected the API key".to_string(),
            }),
            status => Err(NetworkError::Status {
                status: status.as_u16(),
                url,
            }),
        }
    }
}

fn release_year(release_date: Option<&str>) -> Option<i32> {
    release_date
        .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
        .map(|date| date.year())
}

fn image_url(image_base_url: &str, path: Option<String>) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{}/{}", image_base_url, p.trim_start_matches('/')))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn remap_movie(movie: TmdbMovie, image_base_url: &str) -> MovieSummary {
    let release_date = non_empty(movie.release_date);
    MovieSummary {
        id: movie.id,
        title: movie.title,
        original_title: movie.original_title,
        year: release_year(release_date.as_deref()),
        release_date,
        overview: non_empty(movie.overview),
        poster_url: image_url(image_base_url, movie.poster_path),
        rating: movie.vote_average,
        vote_count: movie.vote_count,
        language: movie.original_language,
    }
}

fn remap_details(details: TmdbMovieDetails, image_base_url: &str) -> MovieDetails {
    MovieDetails {
        summary: remap_movie(details.movie, image_base_url),
        tagline: non_empty(details.tagline),
        runtime_minutes: details.runtime.filter(|minutes| *minutes > 0),
        genres: details.genres.into_iter().map(|g| g.name).collect(),
        imdb_id: non_empty(details.imdb_id),
        homepage: non_empty(details.homepage),
        backdrop_url: image_url(image_base_url, details.backdrop_path),
        status: details.status,
    }
}

fn remap_page(raw: TmdbSearchResponse, image_base_url: &str) -> MoviePage {
    MoviePage {
        page: raw.page,
        total_pages: raw.total_pages,
        total_results: raw.total_results,
        results: raw
            .results
            .into_iter()
            .map(|movie| remap_movie(movie, image_base_url))
            .collect(),
    }
}
