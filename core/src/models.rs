use serde::{Deserialize, Serialize};

/// Catalog artist as returned by an artist search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Artist related to a seed, as reported by the similarity service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarArtist {
    pub name: String,
    /// Similarity to the seed (0.0-1.0)
    pub match_score: f32,
    pub url: Option<String>,
}

/// Top-track record from the catalog, before it is tied to an artist snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogTrack {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artist_id: String,
    pub artist_name: String,
    /// Genres of the owning artist at build time
    pub artist_genres: Vec<String>,
}

impl Track {
    pub fn from_catalog(track: CatalogTrack, artist: &Artist, genres: &[String]) -> Self {
        Self {
            id: track.id,
            name: track.name,
            artist_id: artist.id.clone(),
            artist_name: artist.name.clone(),
            artist_genres: genres.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackEdge {
    pub track1: String,
    pub artist1: String,
    pub track1_id: String,
    pub track2: String,
    pub artist2: String,
    pub track2_id: String,
    /// Sorted, never empty, never contains a stoplisted genre
    pub shared_genres: Vec<String>,
}

impl TrackEdge {
    pub fn between(first: &Track, second: &Track, shared_genres: Vec<String>) -> Self {
        Self {
            track1: first.name.clone(),
            artist1: first.artist_name.clone(),
            track1_id: first.id.clone(),
            track2: second.name.clone(),
            artist2: second.artist_name.clone(),
            track2_id: second.id.clone(),
            shared_genres,
        }
    }
}

/// How a similar-artist candidate fared against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    /// Resolved to a new artist, whose tracks are in the graph
    Added,
    /// Resolved to an artist already in the working set
    AlreadyMatched,
    NotFound,
}

/// Catalog resolution of one similar-artist candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistMatch {
    pub candidate: String,
    /// Catalog name the candidate resolved to, if any
    pub resolved: Option<String>,
    pub outcome: MatchOutcome,
}

impl ArtistMatch {
    pub fn found(candidate: &str, artist: &Artist, outcome: MatchOutcome) -> Self {
        Self {
            candidate: candidate.to_string(),
            resolved: Some(artist.name.clone()),
            outcome,
        }
    }

    pub fn not_found(candidate: &str) -> Self {
        Self {
            candidate: candidate.to_string(),
            resolved: None,
            outcome: MatchOutcome::NotFound,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackGraph {
    pub seed_artist: String,
    pub similar_artists: Vec<String>,
    pub matched_artists: Vec<String>,
    /// One entry per similar artist, in similarity order
    #[serde(default)]
    pub artist_matches: Vec<ArtistMatch>,
    pub tracks: Vec<Track>,
    pub edges: Vec<TrackEdge>,
}

impl TrackGraph {
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Similar artists the catalog had no match for.
    pub fn unmatched_candidates(&self) -> impl Iterator<Item = &str> {
        self.artist_matches
            .iter()
            .filter(|entry| entry.outcome == MatchOutcome::NotFound)
            .map(|entry| entry.candidate.as_str())
    }
}
