//! In-process providers for tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::core::services::tmdb::{MovieDetails, MoviePage, MovieSummary};
use crate::core::services::{LyricsProvider, MovieProvider, SongMatch};
use crate::error::NetworkError;

pub struct MockLyricsProvider {
    songs: Vec<SongMatch>,
    lyrics: Option<String>,
    fail: bool,
    fail_fetch: bool,
    search_calls: AtomicUsize,
    last_query: Mutex<Option<String>>,
}

impl MockLyricsProvider {
    fn new(songs: Vec<SongMatch>, lyrics: Option<String>, fail: bool) -> Self {
        Self {
            songs,
            lyrics,
            fail,
            fail_fetch: false,
            search_calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }

    pub fn with_song(title: &str, artist: &str, raw_lyrics: &str) -> Self {
        Self::new(vec![song(title, artist)], Some(raw_lyrics.to_string()), false)
    }

    pub fn without_lyrics(title: &str, artist: &str) -> Self {
        Self::new(vec![song(title, artist)], None, false)
    }

    /// Search finds the song but the page fetch errors.
    pub fn fetch_failing(title: &str, artist: &str) -> Self {
        Self {
            fail_fetch: true,
            ..Self::new(vec![song(title, artist)], None, false)
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), None, false)
    }

    pub fn failing() -> Self {
        Self::new(Vec::new(), None, true)
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<String> {
        self.last_query.lock().ok().and_then(|query| query.clone())
    }
}

fn song(title: &str, artist: &str) -> SongMatch {
    SongMatch {
        id: 1,
        title: title.to_string(),
        artist: artist.to_string(),
        url: format!("https://genius.example/{}", title.to_lowercase()),
    }
}

#[async_trait]
impl LyricsProvider for MockLyricsProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn search(&self, query: &str) -> Result<Vec<SongMatch>, NetworkError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_query.lock() {
            *last = Some(query.to_string());
        }
        if self.fail {
            return Err(NetworkError::ServiceUnavailable);
        }
        Ok(self.songs.clone())
    }

    async fn fetch_lyrics(&self, _song: &SongMatch) -> Result<Option<String>, NetworkError> {
        if self.fail_fetch {
            return Err(NetworkError::ServiceUnavailable);
        }
        Ok(self.lyrics.clone())
    }
}

pub struct MockMovieProvider {
    movies: Vec<MovieDetails>,
    fail: bool,
}

impl MockMovieProvider {
    pub fn with_movies(movies: Vec<MovieDetails>) -> Self {
        Self { movies, fail: false }
    }

    pub fn failing() -> Self {
        Self { movies: Vec::new(), fail: true }
    }
}

pub fn movie(id: u64, title: &str, year: i32) -> MovieDetails {
    MovieDetails {
        summary: MovieSummary {
            id,
            title: title.to_string(),
            original_title: Some(title.to_string()),
            year: Some(year),
            release_date: Some(format!("{}-01-01", year)),
            overview: None,
            poster_url: None,
            rating: Some(7.5),
            vote_count: Some(100),
            language: Some("en".to_string()),
        },
        tagline: None,
        runtime_minutes: Some(120),
        genres: vec!["Drama".to_string()],
        imdb_id: None,
        homepage: None,
        backdrop_url: None,
        status: Some("Released".to_string()),
    }
}

#[async_trait]
impl MovieProvider for MockMovieProvider {
    async fn search(&self, query: &str, page: u32) -> Result<MoviePage, NetworkError> {
        if self.fail {
            return Err(NetworkError::ServiceUnavailable);
        }
        let needle = query.to_lowercase();
        let results: Vec<MovieSummary> = self
            .movies
            .iter()
            .filter(|m| m.summary.title.to_lowercase().contains(&needle))
            .map(|m| m.summary.clone())
            .collect();

        Ok(MoviePage {
            page,
            total_pages: 1,
            total_results: results.len() as u32,
            results,
        })
    }

    async fn details(&self, id: u64) -> Result<Option<MovieDetails>, NetworkError> {
        if self.fail {
            return Err(NetworkError::ServiceUnavailable);
        }
        Ok(self.movies.iter().find(|m| m.summary.id == id).cloned())
    }
}
