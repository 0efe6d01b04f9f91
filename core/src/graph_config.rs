use crate::genres::GenreStoplist;

pub const DEFAULT_MARKET: &str = "US";

/// Configuration for track graph construction
#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// Maximum number of similar artists requested for the seed
    pub similar_limit: usize,
    /// Maximum number of top tracks fetched per matched artist
    pub tracks_per_artist: usize,
    /// Minimum number of shared (non-ignored) genres for two tracks to be linked
    pub min_genre_overlap: usize,
    /// Catalog market used for top tracks (ISO 3166-1 alpha-2)
    pub market: String,
    /// Genres that never count as shared
    pub stoplist: GenreStoplist,
}

impl GraphConfig {
    pub fn new(similar_limit: usize, tracks_per_artist: usize, min_genre_overlap: usize) -> Self {
        Self {
            similar_limit,
            tracks_per_artist,
            min_genre_overlap,
            ..Self::default()
        }
    }

    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.market = market.into();
        self
    }

    pub fn with_stoplist(mut self, stoplist: GenreStoplist) -> Self {
        self.stoplist = stoplist;
        self
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            similar_limit: 5,
            tracks_per_artist: 10,
            min_genre_overlap: 1,
            market: DEFAULT_MARKET.to_string(),
            stoplist: GenreStoplist::default(),
        }
    }
}
