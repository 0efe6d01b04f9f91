use std::sync::Mutex;
use std::time::{Duration, Instant};

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use trackgraph_core::string_normalization::names_match;
use trackgraph_core::{Artist, ArtistCatalog, CatalogTrack, CollaboratorError};

pub const SPOTIFY_API_ROOT: &str = "https://api.spotify.com/v1";
pub const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Search hits inspected when looking for an exact name match.
const SEARCH_CANDIDATES: &str = "5";

/// Tokens are refreshed this long before Spotify would reject them.
const EXPIRY_MARGIN: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum SpotifyError {
    #[error("Spotify request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Unexpected Spotify response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Spotify returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Spotify rejected the client credentials: {0}")]
    Auth(String),
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Clone)]
struct AccessToken {
    token: String,
    expires_at: Instant,
}

impl AccessToken {
    fn is_expired(&self) -> bool {
        Instant::now() + EXPIRY_MARGIN >= self.expires_at
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpotifyArtist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub popularity: Option<u32>,
}

impl From<SpotifyArtist> for Artist {
    fn from(artist: SpotifyArtist) -> Self {
        Artist {
            id: artist.id,
            name: artist.name,
            genres: artist.genres,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpotifyArtistSearchResponse {
    pub artists: SpotifyPage<SpotifyArtist>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpotifyPage<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpotifyTopTracksResponse {
    #[serde(default)]
    pub tracks: Vec<SpotifyTrack>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpotifyTrack {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub popularity: Option<u32>,
}

impl From<SpotifyTrack> for CatalogTrack {
    fn from(track: SpotifyTrack) -> Self {
        CatalogTrack {
            id: track.id,
            name: track.name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SpotifyErrorResponse {
    error: SpotifyErrorBody,
}

#[derive(Debug, Deserialize)]
struct SpotifyErrorBody {
    message: String,
}

/// Exact (case and accent insensitive) name match first, otherwise Spotify's top hit.
pub fn pick_best_artist(query: &str, mut candidates: Vec<SpotifyArtist>) -> Option<SpotifyArtist> {
    match candidates.iter().position(|artist| names_match(&artist.name, query)) {
        Some(index) => Some(candidates.swap_remove(index)),
        None => candidates.into_iter().next(),
    }
}

pub struct SpotifyClient {
    client: Client,
    client_id: String,
    client_secret: String,
    api_root: String,
    token_url: String,
    token: Mutex<Option<AccessToken>>,
}

impl SpotifyClient {
    pub fn new(client_id: String, client_secret: String) -> Result<Self, SpotifyError> {
        Self::with_endpoints(
            client_id,
            client_secret,
            SPOTIFY_API_ROOT.to_string(),
            SPOTIFY_TOKEN_URL.to_string(),
        )
    }

    pub fn with_endpoints(
        client_id: String,
        client_secret: String,
        api_root: String,
        token_url: String,
    ) -> Result<Self, SpotifyError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            client_id,
            client_secret,
            api_root,
            token_url,
            token: Mutex::new(None),
        })
    }

    fn access_token(&self) -> Result<String, SpotifyError> {
        let mut cached = self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(token) = cached.as_ref().filter(|token| !token.is_expired()) {
            return Ok(token.token.clone());
        }

        debug!("requesting Spotify access token");
        let response = self
            .client
            .post(&self.token_url)
            .form(&[("grant_type", "client_credentials")])
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .send()?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            return Err(SpotifyError::Auth(format!("HTTP {}: {}", status, body.trim())));
        }

        let granted: TokenResponse = response.json()?;
        let token = AccessToken {
            token: granted.access_token,
            expires_at: Instant::now() + Duration::from_secs(granted.expires_in),
        };
        let value = token.token.clone();
        *cached = Some(token);
        Ok(value)
    }

    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, SpotifyError> {
        let token = self.access_token()?;
        let request: RequestBuilder = self
            .client
            .get(format!("{}{}", self.api_root, path))
            .query(query)
            .bearer_auth(token);

        debug!(path, "Spotify request");
        let response = request.send()?;
        decode_response(response)
    }

    pub fn search_artist(&self, name: &str) -> Result<Option<SpotifyArtist>, SpotifyError> {
        let response: SpotifyArtistSearchResponse = self.get(
            "/search",
            &[("q", name), ("type", "artist"), ("limit", SEARCH_CANDIDATES)],
        )?;
        Ok(pick_best_artist(name, response.artists.items))
    }

    pub fn get_artist(&self, artist_id: &str) -> Result<SpotifyArtist, SpotifyError> {
        self.get(&format!("/artists/{}", urlencoding::encode(artist_id)), &[])
    }

    pub fn get_artist_top_tracks(
        &self,
        artist_id: &str,
        market: &str,
        limit: usize,
    ) -> Result<Vec<SpotifyTrack>, SpotifyError> {
        let response: SpotifyTopTracksResponse = self.get(
            &format!("/artists/{}/top-tracks", urlencoding::encode(artist_id)),
            &[("market", market)],
        )?;
        // The endpoint has no limit parameter
        Ok(response.tracks.into_iter().take(limit).collect())
    }
}

fn decode_response<T: DeserializeOwned>(response: Response) -> Result<T, SpotifyError> {
    let status = response.status();
    let body = response.text()?;

    if !status.is_success() {
        let message = serde_json::from_str::<SpotifyErrorResponse>(&body)
            .map(|error| error.error.message)
            .unwrap_or_else(|_| body.trim().to_string());
        return Err(SpotifyError::Status {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_str(&body)?)
}

impl ArtistCatalog for SpotifyClient {
    fn search_artist(&self, name: &str) -> Result<Option<Artist>, CollaboratorError> {
        Ok(SpotifyClient::search_artist(self, name)?.map(Artist::from))
    }

    fn artist_genres(&self, artist_id: &str) -> Result<Vec<String>, CollaboratorError> {
        Ok(self.get_artist(artist_id)?.genres)
    }

    fn top_tracks(&self, artist_id: &str, market: &str, limit: usize) -> Result<Vec<CatalogTrack>, CollaboratorError> {
        Ok(self
            .get_artist_top_tracks(artist_id, market, limit)?
            .into_iter()
            .map(CatalogTrack::from)
            .collect())
    }
}
