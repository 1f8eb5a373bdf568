use async_trait::async_trait;
use scraper::{Html, Node, Selector};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{build_http_client, get_with_retry, LyricsProvider, SongMatch};
use crate::error::NetworkError;

pub const SOURCE_NAME: &str = "genius";

const LYRICS_CONTAINER_SELECTOR: &str = r#"div[data-lyrics-container="true"]"#;

#[derive(Deserialize, Debug)]
struct SearchEnvelope {
    response: SearchResponse,
}

#[derive(Deserialize, Debug)]
struct SearchResponse {
    #[serde(default)]
    sections: Vec<SearchSection>,
}

#[derive(Deserialize, Debug)]
struct SearchSection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    hits: Vec<SearchHit>,
}

#[derive(Deserialize, Debug)]
struct SearchHit {
    // Hits in non-song sections carry artist/album/lyric shapes.
    result: serde_json::Value,
}

#[derive(Deserialize, Debug)]
struct SongHit {
    id: u64,
    title: String,
    url: String,
    primary_artist: ArtistRef,
}

#[derive(Deserialize, Debug)]
struct ArtistRef {
    name: String,
}

#[derive(Clone)]
pub struct GeniusClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeniusClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, NetworkError> {
        Ok(Self {
            client: build_http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl LyricsProvider for GeniusClient {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn search(&self, query: &str) -> Result<Vec<SongMatch>, NetworkError> {
        let url = format!("{}/api/search/multi", self.base_url);
        info!("Searching Genius for '{}'", query);

        let response = get_with_retry(&self.client, &url, &[("q", query)]).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let songs = parse_search_response(&body)?;
        debug!("Genius returned {} song matches for '{}'", songs.len(), query);
        Ok(songs)
    }

    async fn fetch_lyrics(&self, song: &SongMatch) -> Result<Option<String>, NetworkError> {
        debug!("Fetching lyrics page for {} - {}", song.artist, song.title);

        let response = get_with_retry(&self.client, &song.url, &[]).await?;
        match response.status() {
            reqwest::StatusCode::OK => {}
            reqwest::StatusCode::NOT_FOUND => {
                info!("Lyrics page not found: {}", song.url);
                return Ok(None);
            }
            status => {
                return Err(NetworkError::Status {
                    status: status.as_u16(),
                    url: song.url.clone(),
                });
            }
        }

        let page = response.text().await?;
        let lyrics = extract_lyrics_text(&page);
        if lyrics.is_none() {
            warn!("No lyrics containers found on {}", song.url);
        }
        Ok(lyrics)
    }
}

/// Ranked song matches from a `search/multi` response body.
fn parse_search_response(body: &str) -> Result<Vec<SongMatch>, NetworkError> {
    let envelope: SearchEnvelope =
        serde_json::from_str(body).map_err(|e| NetworkError::InvalidResponse {
            reason: format!("Genius search payload: {}", e),
        })?;

    let songs = envelope
        .response
        .sections
        .into_iter()
        .filter(|section| section.kind == "song")
        .flat_map(|section| section.hits)
        .filter_map(|hit| match serde_json::from_value::<SongHit>(hit.result) {
            Ok(song) => Some(SongMatch {
                id: song.id,
                title: song.title,
                artist: song.primary_artist.name,
                url: song.url,
            }),
            Err(e) => {
                debug!("Skipping malformed song hit: {}", e);
                None
            }
        })
        .collect();

    Ok(songs)
}

/// Raw text of every lyrics container on a song page, `<br>` rendered as a
/// line break. Containers are joined with a line break.
fn extract_lyrics_text(page: &str) -> Option<String> {
    let document = Html::parse_document(page);
    let selector = Selector::parse(LYRICS_CONTAINER_SELECTOR).ok()?;

    let blocks: Vec<String> = document
        .select(&selector)
        .map(|container| {
            let mut text = String::new();
            for node in container.descendants() {
                match node.value() {
                    Node::Text(fragment) => text.push_str(fragment),
                    Node::Element(element) if element.name() == "br" => text.push('\n'),
                    _ => {}
                }
            }
            text
        })
        .collect();

    if blocks.is_empty() {
        return None;
    }

    let joined = blocks.join("\n");
    if joined.trim().is_empty() {
        None
    } else {
        Some(joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::test_server::ScriptedServer;

    const SEARCH_BODY: &str = r#"{
        "meta": {"status": 200},
        "response": {
            "sections": [
                {"type": "top_hit", "hits": [{"type": "artist", "result": {"id": 9, "name": "Beyoncé"}}]},
                {"type": "song", "hits": [
                    {"type": "song", "result": {
                        "id": 51, "title": "Halo",
                        "url": "https://genius.com/Beyonce-halo-lyrics",
                        "primary_artist": {"id": 9, "name": "Beyoncé"}
                    }},
                    {"type": "song", "result": {
                        "id": 52, "title": "Halo (Live)",
                        "url": "https://genius.com/Beyonce-halo-live-lyrics",
                        "primary_artist": {"id": 9, "name": "Beyoncé"}
                    }}
                ]},
                {"type": "artist", "hits": [{"type": "artist", "result": {"id": 9, "name": "Beyoncé"}}]}
            ]
        }
    }"#;

    #[test]
    fn test_parse_search_response_keeps_song_order() {
        let songs = parse_search_response(SEARCH_BODY).unwrap();

        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].id, 51);
        assert_eq!(songs[0].title, "Halo");
        assert_eq!(songs[0].artist, "Beyoncé");
        assert_eq!(songs[0].url, "https://genius.com/Beyonce-halo-lyrics");
        assert_eq!(songs[1].title, "Halo (Live)");
    }

    #[test]
    fn test_parse_search_response_without_songs() {
        let body = r#"{"response": {"sections": [{"type": "artist", "hits": []}]}}"#;
        assert!(parse_search_response(body).unwrap().is_empty());
    }

    #[test]
    fn test_parse_search_response_rejects_garbage() {
        let err = parse_search_response("<html>").unwrap_err();
        assert!(matches!(err, NetworkError::InvalidResponse { .. }));
    }

    #[test]
    fn test_extract_lyrics_text_renders_breaks() {
        let page = r#"<html><body>
            <div class="header">12 Contributors</div>
            <div data-lyrics-container="true">[Verse 1]<br>First <i>line</i><br/>Second line</div>
            <div data-lyrics-container="true">[Chorus]<br>Halo, halo</div>
        </body></html>"#;

        let text = extract_lyrics_text(page).unwrap();
        assert_eq!(text, "[Verse 1]\nFirst line\nSecond line\n[Chorus]\nHalo, halo");
    }

    #[test]
    fn test_extract_lyrics_text_without_containers() {
        let page = "<html><body><p>This song is an instrumental</p></body></html>";
        assert!(extract_lyrics_text(page).is_none());
    }

    fn client(server: &ScriptedServer) -> GeniusClient {
        GeniusClient::new(&server.base_url, Duration::from_secs(5)).unwrap()
    }

    fn song_at(server: &ScriptedServer) -> SongMatch {
        SongMatch {
            id: 51,
            title: "Halo".to_string(),
            artist: "Beyoncé".to_string(),
            url: format!("{}/Beyonce-halo-lyrics", server.base_url),
        }
    }

    #[tokio::test]
    async fn test_search_over_http() {
        let server = ScriptedServer::start(vec![(200, SEARCH_BODY)]).await;

        let songs = client(&server).search("Beyoncé Halo").await.unwrap();

        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].title, "Halo");
        assert_eq!(server.requests(), 1);
    }

    #[tokio::test]
    async fn test_search_rejected_status_is_an_error() {
        let server = ScriptedServer::start(vec![(403, "")]).await;

        let err = client(&server).search("halo").await.unwrap_err();
        assert!(matches!(err, NetworkError::Status { status: 403, .. }));
    }

    #[tokio::test]
    async fn test_fetch_lyrics_page() {
        let page = r#"<html><body><div data-lyrics-container="true">[Chorus]<br>Halo, halo</div></body></html>"#;
        let server = ScriptedServer::start(vec![(200, page)]).await;
        let client = client(&server);

        let lyrics = client.fetch_lyrics(&song_at(&server)).await.unwrap();
        assert_eq!(lyrics.as_deref(), Some("[Chorus]\nHalo, halo"));
    }

    #[tokio::test]
    async fn test_fetch_lyrics_missing_page_is_none() {
        let server = ScriptedServer::start(vec![(404, "")]).await;
        let client = client(&server);

        assert_eq!(client.fetch_lyrics(&song_at(&server)).await.unwrap(), None);
        assert_eq!(server.requests(), 1);
    }

    #[tokio::test]
    async fn test_fetch_lyrics_retries_then_fails() {
        let server = ScriptedServer::start(vec![(503, "")]).await;
        let client = client(&server);

        let err = client.fetch_lyrics(&song_at(&server)).await.unwrap_err();
        assert!(matches!(err, NetworkError::ServiceUnavailable));
        assert_eq!(server.requests(), 3);
    }
}
