use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use trackgraph_core::{CollaboratorError, SimilarArtist, SimilarArtistFinder};

pub const LASTFM_API_ROOT: &str = "https://ws.audioscrobbler.com/2.0/";

/// Last.fm error code for an unknown artist.
const ARTIST_NOT_FOUND: u32 = 6;

#[derive(Debug, Error)]
pub enum LastFmError {
    #[error("Last.fm request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Unexpected Last.fm response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Last.fm returned HTTP {0}")]
    Status(u16),
    #[error("Last.fm API error {code}: {message}")]
    Api { code: u32, message: String },
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LastFmSimilarResponse {
    pub similarartists: LastFmSimilarArtists,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LastFmSimilarArtists {
    #[serde(default)]
    pub artist: OneOrMany<LastFmSimilarArtist>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LastFmSimilarArtist {
    pub name: String,
    #[serde(rename = "match", default)]
    pub match_score: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub mbid: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LastFmErrorResponse {
    pub error: u32,
    pub message: String,
}

/// Last.fm collapses one-element lists into a bare object.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

impl From<LastFmSimilarArtist> for SimilarArtist {
    fn from(artist: LastFmSimilarArtist) -> Self {
        let match_score = artist
            .match_score
            .as_deref()
            .and_then(|score| score.trim().parse::<f32>().ok())
            .filter(|score| score.is_finite())
            .map(|score| score.clamp(0.0, 1.0))
            .unwrap_or(0.0);

        SimilarArtist {
            name: artist.name,
            match_score,
            url: artist.url.filter(|url| !url.is_empty()),
        }
    }
}

/// Parses an `artist.getsimilar` body. Unknown artists yield an empty list.
pub fn parse_similar_artists(body: &str) -> Result<Vec<SimilarArtist>, LastFmError> {
    if let Ok(error) = serde_json::from_str::<LastFmErrorResponse>(body) {
        if error.error == ARTIST_NOT_FOUND {
            debug!(message = %error.message, "Last.fm does not know this artist");
            return Ok(Vec::new());
        }
        return Err(LastFmError::Api {
            code: error.error,
            message: error.message,
        });
    }

    let response: LastFmSimilarResponse = serde_json::from_str(body)?;
    Ok(response
        .similarartists
        .artist
        .into_vec()
        .into_iter()
        .map(SimilarArtist::from)
        .collect())
}

pub struct LastFmClient {
    client: Client,
    api_key: String,
    api_root: String,
}

impl LastFmClient {
    pub fn new(api_key: String) -> Result<Self, LastFmError> {
        Self::with_api_root(api_key, LASTFM_API_ROOT.to_string())
    }

    pub fn with_api_root(api_key: String, api_root: String) -> Result<Self, LastFmError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            api_key,
            api_root,
        })
    }

    pub fn get_similar_artists(&self, artist_name: &str, limit: usize) -> Result<Vec<SimilarArtist>, LastFmError> {
        let url = format!(
            "{}?method=artist.getsimilar&artist={}&api_key={}&format=json&limit={}",
            self.api_root,
            urlencoding::encode(artist_name),
            self.api_key,
            limit
        );
        debug!(artist = artist_name, limit, "requesting similar artists");

        let response = self.client.get(&url).send()?;
        let status = response.status();
        let body = response.text()?;

        // Last.fm reports API errors as JSON, sometimes with a non-2xx status
        match parse_similar_artists(&body) {
            Ok(mut artists) => {
                artists.truncate(limit);
                Ok(artists)
            }
            Err(LastFmError::Decode(_)) if !status.is_success() => Err(LastFmError::Status(status.as_u16())),
            Err(err) => {
                warn!(artist = artist_name, error = %err, "similar artist lookup failed");
                Err(err)
            }
        }
    }
}

impl SimilarArtistFinder for LastFmClient {
    fn similar_artists(&self, artist_name: &str, limit: usize) -> Result<Vec<SimilarArtist>, CollaboratorError> {
        Ok(self.get_similar_artists(artist_name, limit)?)
    }
}
