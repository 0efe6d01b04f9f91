use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info};

use crate::catalog::{ArtistCatalog, SimilarArtistFinder};
use crate::error::GraphError;
use crate::genres::link_tracks_by_genre;
use crate::graph_config::GraphConfig;
use crate::models::{Artist, ArtistMatch, MatchOutcome, SimilarArtist, Track, TrackGraph};

/// Builds track graphs from a catalog and a similarity service.
///
/// The builder keeps no state between builds; each call to [`GraphBuilder::build`]
/// works off fresh collaborator responses.
pub struct GraphBuilder<C, F> {
    catalog: C,
    finder: F,
}

impl<C: ArtistCatalog, F: SimilarArtistFinder> GraphBuilder<C, F> {
    pub fn new(catalog: C, finder: F) -> Self {
        Self { catalog, finder }
    }

    pub fn build(&self, seed_artist_name: &str, config: &GraphConfig) -> Result<TrackGraph, GraphError> {
        build_track_graph(seed_artist_name, &self.catalog, &self.finder, config)
    }
}

pub fn build_track_graph(
    seed_artist_name: &str,
    catalog: &dyn ArtistCatalog,
    finder: &dyn SimilarArtistFinder,
    config: &GraphConfig,
) -> Result<TrackGraph, GraphError> {
    let mut session = BuildSession::new(catalog, config);

    let seed = session.resolve_seed(seed_artist_name)?;
    let similar = fetch_similar_artists(finder, seed_artist_name, config.similar_limit)?;
    let (artists, artist_matches) = session.match_artists(seed, &similar)?;
    session.cache_genres(&artists)?;
    let tracks = session.collect_tracks(&artists)?;
    let edges = link_tracks_by_genre(&tracks, config.min_genre_overlap, &config.stoplist);

    info!(
        seed = %artists[0].name,
        similar = similar.len(),
        matched = artists.len(),
        tracks = tracks.len(),
        edges = edges.len(),
        "built track graph"
    );

    Ok(TrackGraph {
        seed_artist: artists[0].name.clone(),
        similar_artists: similar.into_iter().map(|artist| artist.name).collect(),
        matched_artists: artists.into_iter().map(|artist| artist.name).collect(),
        artist_matches,
        tracks,
        edges,
    })
}

fn fetch_similar_artists(
    finder: &dyn SimilarArtistFinder,
    artist_name: &str,
    limit: usize,
) -> Result<Vec<SimilarArtist>, GraphError> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let mut similar = finder
        .similar_artists(artist_name, limit)
        .map_err(GraphError::Similarity)?;
    similar.truncate(limit);
    Ok(similar)
}

/// State of a single build. The genre cache lives only as long as the build.
struct BuildSession<'a> {
    catalog: &'a dyn ArtistCatalog,
    config: &'a GraphConfig,
    genre_cache: FxHashMap<String, Vec<String>>,
}

impl<'a> BuildSession<'a> {
    fn new(catalog: &'a dyn ArtistCatalog, config: &'a GraphConfig) -> Self {
        Self {
            catalog,
            config,
            genre_cache: FxHashMap::default(),
        }
    }

    fn resolve_seed(&self, name: &str) -> Result<Artist, GraphError> {
        self.catalog
            .search_artist(name)
            .map_err(GraphError::Catalog)?
            .ok_or_else(|| GraphError::ArtistNotFound(name.to_string()))
    }

    /// Seed first, then every similar artist found in the catalog, in discovery order.
    /// Also records what each candidate resolved to.
    fn match_artists(
        &self,
        seed: Artist,
        similar: &[SimilarArtist],
    ) -> Result<(Vec<Artist>, Vec<ArtistMatch>), GraphError> {
        let mut seen: FxHashSet<String> = FxHashSet::default();
        seen.insert(seed.id.clone());
        let mut artists = vec![seed];
        let mut matches = Vec::with_capacity(similar.len());

        for candidate in similar {
            match self.catalog.search_artist(&candidate.name).map_err(GraphError::Catalog)? {
                Some(artist) if seen.insert(artist.id.clone()) => {
                    matches.push(ArtistMatch::found(&candidate.name, &artist, MatchOutcome::Added));
                    artists.push(artist);
                }
                Some(artist) => {
                    debug!(candidate = %candidate.name, id = %artist.id, "similar artist already matched, skipping");
                    matches.push(ArtistMatch::found(&candidate.name, &artist, MatchOutcome::AlreadyMatched));
                }
                None => {
                    debug!(candidate = %candidate.name, "similar artist not in catalog, skipping");
                    matches.push(ArtistMatch::not_found(&candidate.name));
                }
            }
        }

        Ok((artists, matches))
    }

    fn cache_genres(&mut self, artists: &[Artist]) -> Result<(), GraphError> {
        for artist in artists {
            if self.genre_cache.contains_key(&artist.id) {
                continue;
            }
            let genres = self
                .catalog
                .artist_genres(&artist.id)
                .map_err(GraphError::Catalog)?;
            self.genre_cache.insert(artist.id.clone(), genres);
        }
        Ok(())
    }

    fn collect_tracks(&self, artists: &[Artist]) -> Result<Vec<Track>, GraphError> {
        let limit = self.config.tracks_per_artist;
        let mut tracks = Vec::new();
        if limit == 0 {
            return Ok(tracks);
        }

        // A track credited to several matched artists is kept under the first one
        let mut seen_tracks: FxHashSet<String> = FxHashSet::default();

        for artist in artists {
            let genres = self
                .genre_cache
                .get(&artist.id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let top_tracks = self
                .catalog
                .top_tracks(&artist.id, &self.config.market, limit)
                .map_err(GraphError::Catalog)?;

            tracks.extend(
                top_tracks
                    .into_iter()
                    .take(limit)
                    .filter(|track| seen_tracks.insert(track.id.clone()))
                    .map(|track| Track::from_catalog(track, artist, genres)),
            );
        }

        Ok(tracks)
    }
}
