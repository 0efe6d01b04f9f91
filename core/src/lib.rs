pub mod builder;
pub mod catalog;
pub mod error;
pub mod genres;
pub mod graph_config;
pub mod models;
pub mod string_normalization;

// Re-export commonly used items
pub use builder::{GraphBuilder, build_track_graph};
pub use catalog::{ArtistCatalog, CollaboratorError, SimilarArtistFinder};
pub use error::GraphError;
pub use genres::{DEFAULT_IGNORED_GENRES, GenreStoplist, link_tracks_by_genre, shared_genres};
pub use graph_config::{DEFAULT_MARKET, GraphConfig};
pub use models::{Artist, ArtistMatch, CatalogTrack, MatchOutcome, SimilarArtist, Track, TrackEdge, TrackGraph};
