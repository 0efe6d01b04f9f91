use std::cell::RefCell;

use rustc_hash::FxHashMap;
use trackgraph_core::{
    Artist, ArtistCatalog, CatalogTrack, CollaboratorError, SimilarArtist, SimilarArtistFinder,
};

/// In-memory catalog that records how often each call is made.
#[derive(Default)]
pub struct StubCatalog {
    artists: FxHashMap<String, Artist>,
    genres: FxHashMap<String, Vec<String>>,
    top_tracks: FxHashMap<String, Vec<CatalogTrack>>,
    pub search_calls: RefCell<Vec<String>>,
    pub genre_calls: RefCell<Vec<String>>,
    pub top_track_calls: RefCell<Vec<(String, String, usize)>>,
    pub fail_genres: bool,
}

impl StubCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an artist under its lowercase name with `track_count` tracks.
    pub fn with_artist(mut self, id: &str, name: &str, genres: &[&str], track_count: usize) -> Self {
        let genres: Vec<String> = genres.iter().map(|genre| genre.to_string()).collect();
        self.artists.insert(
            name.to_lowercase(),
            Artist {
                id: id.to_string(),
                name: name.to_string(),
                genres: genres.clone(),
            },
        );
        self.genres.insert(id.to_string(), genres);
        self.top_tracks.insert(
            id.to_string(),
            (1..=track_count)
                .map(|n| CatalogTrack {
                    id: format!("{}-t{}", id, n),
                    name: format!("{} Track {}", name, n),
                })
                .collect(),
        );
        self
    }

    /// Makes `alias` resolve to the artist registered as `name`.
    pub fn with_alias(mut self, alias: &str, name: &str) -> Self {
        let artist = self.artists[&name.to_lowercase()].clone();
        self.artists.insert(alias.to_lowercase(), artist);
        self
    }

    pub fn with_tracks(mut self, artist_id: &str, tracks: &[(&str, &str)]) -> Self {
        self.top_tracks.insert(
            artist_id.to_string(),
            tracks
                .iter()
                .map(|(id, name)| CatalogTrack {
                    id: id.to_string(),
                    name: name.to_string(),
                })
                .collect(),
        );
        self
    }

    pub fn genre_calls_for(&self, artist_id: &str) -> usize {
        self.genre_calls
            .borrow()
            .iter()
            .filter(|id| id.as_str() == artist_id)
            .count()
    }
}

impl ArtistCatalog for StubCatalog {
    fn search_artist(&self, name: &str) -> Result<Option<Artist>, CollaboratorError> {
        self.search_calls.borrow_mut().push(name.to_string());
        Ok(self.artists.get(&name.to_lowercase()).cloned())
    }

    fn artist_genres(&self, artist_id: &str) -> Result<Vec<String>, CollaboratorError> {
        self.genre_calls.borrow_mut().push(artist_id.to_string());
        if self.fail_genres {
            return Err("catalog unavailable".into());
        }
        Ok(self.genres.get(artist_id).cloned().unwrap_or_default())
    }

    fn top_tracks(
        &self,
        artist_id: &str,
        market: &str,
        limit: usize,
    ) -> Result<Vec<CatalogTrack>, CollaboratorError> {
        self.top_track_calls
            .borrow_mut()
            .push((artist_id.to_string(), market.to_string(), limit));
        Ok(self
            .top_tracks
            .get(artist_id)
            .map(|tracks| tracks.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

#[derive(Default)]
pub struct StubFinder {
    similar: Vec<SimilarArtist>,
    pub calls: RefCell<Vec<(String, usize)>>,
    pub fail: bool,
}

impl StubFinder {
    pub fn new(names: &[&str]) -> Self {
        Self {
            similar: names
                .iter()
                .enumerate()
                .map(|(rank, name)| SimilarArtist {
                    name: name.to_string(),
                    match_score: 1.0 - rank as f32 * 0.1,
                    url: Some(format!("https://www.last.fm/music/{}", name.replace(' ', "+"))),
                })
                .collect(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl SimilarArtistFinder for StubFinder {
    fn similar_artists(
        &self,
        artist_name: &str,
        limit: usize,
    ) -> Result<Vec<SimilarArtist>, CollaboratorError> {
        self.calls.borrow_mut().push((artist_name.to_string(), limit));
        if self.fail {
            return Err("similarity service unavailable".into());
        }
        Ok(self.similar.iter().take(limit).cloned().collect())
    }
}

/// Seed with two resolvable similar artists and one unknown to the catalog.
pub fn electronic_catalog() -> (StubCatalog, StubFinder) {
    let catalog = StubCatalog::new()
        .with_artist("dp", "Daft Punk", &["french house", "electro", "filter house", "rock"], 3)
        .with_artist("jus", "Justice", &["french house", "electro", "nu disco"], 2)
        .with_artist("cas", "Cassius", &["french house", "filter house"], 2);
    let finder = StubFinder::new(&["Justice", "Cassius", "Some Unknown Band"]);
    (catalog, finder)
}
