//! Request handlers for the REST facade.

use actix_web::http::StatusCode;
use actix_web::{delete, get, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::lyrics::normalize;
use crate::core::services::tmdb::MAX_PAGE;
use crate::core::services::ProviderOutcome;
use crate::services::{AppServices, LyricsService};

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Deserialize, Debug)]
pub struct LyricsQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct MovieSearchQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorBody {
        error: message.into(),
    })
}

fn movies_disabled() -> HttpResponse {
    error_response(
        StatusCode::SERVICE_UNAVAILABLE,
        "Movie database is not configured (set SONGSCREEN_TMDB_API_KEY)",
    )
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Look up cleaned lyrics by free text or artist/title.
#[get("/api/lyrics")]
pub async fn lyrics_lookup(
    state: web::Data<AppServices>,
    query: web::Query<LyricsQuery>,
) -> impl Responder {
    let Some(search) = LyricsService::compose_query(
        query.q.as_deref(),
        query.artist.as_deref(),
        query.title.as_deref(),
    ) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Provide either 'q' or 'artist'/'title' query parameters",
        );
    };

    if normalize(&search).is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Query must contain at least one letter or digit",
        );
    }

    match state.lyrics().lookup(&search).await {
        ProviderOutcome::Found(result) => HttpResponse::Ok().json(result),
        ProviderOutcome::NotFound => {
            error_response(StatusCode::NOT_FOUND, format!("No lyrics found for '{}'", search))
        }
        ProviderOutcome::ProviderError(message) => error_response(
            StatusCode::BAD_GATEWAY,
            format!("Lyrics provider error: {}", message),
        ),
    }
}

/// Search movies, remapped to the facade's record shape.
#[get("/api/movies/search")]
pub async fn movies_search(
    state: web::Data<AppServices>,
    query: web::Query<MovieSearchQuery>,
) -> impl Responder {
    let Some(search) = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "Missing 'q' query parameter");
    };

    let page = query.page.unwrap_or(1);
    if page == 0 || page > MAX_PAGE {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("'page' must be between 1 and {}", MAX_PAGE),
        );
    }

    let Some(movies) = state.movies() else {
        return movies_disabled();
    };

    match movies.search(search, page).await {
        Ok(results) => HttpResponse::Ok().json(results),
        Err(e) => {
            warn!("Movie search failed for '{}': {}", search, e);
            error_response(StatusCode::BAD_GATEWAY, format!("Movie provider error: {}", e))
        }
    }
}

/// Movie details by TMDB id.
#[get("/api/movies/{id}")]
pub async fn movie_details(state: web::Data<AppServices>, path: web::Path<u64>) -> impl Responder {
    let id = path.into_inner();
    let Some(movies) = state.movies() else {
        return movies_disabled();
    };

    match movies.details(id).await {
        Ok(Some(details)) => HttpResponse::Ok().json(details),
        Ok(None) => error_response(StatusCode::NOT_FOUND, format!("No movie with id {}", id)),
        Err(e) => {
            warn!("Movie details failed for {}: {}", id, e);
            error_response(StatusCode::BAD_GATEWAY, format!("Movie provider error: {}", e))
        }
    }
}

#[get("/api/cache/stats")]
pub async fn cache_stats(state: web::Data<AppServices>) -> impl Responder {
    HttpResponse::Ok().json(state.lyrics().cache_stats())
}

#[delete("/api/cache")]
pub async fn cache_clear(state: web::Data<AppServices>) -> impl Responder {
    state.lyrics().clear_cache();
    HttpResponse::NoContent().finish()
}
