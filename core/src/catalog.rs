use crate::models::{Artist, CatalogTrack, SimilarArtist};

/// Error type returned by collaborator services. The builder never inspects it,
/// it is handed back to the caller unchanged.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// Music catalog holding artists, their genres and their top tracks.
pub trait ArtistCatalog {
    /// Best match for a free-text artist name, `None` when nothing matches.
    fn search_artist(&self, name: &str) -> Result<Option<Artist>, CollaboratorError>;

    /// Genre tags of an artist as currently listed in the catalog.
    fn artist_genres(&self, artist_id: &str) -> Result<Vec<String>, CollaboratorError>;

    /// Up to `limit` most popular tracks of an artist in `market`.
    fn top_tracks(
        &self,
        artist_id: &str,
        market: &str,
        limit: usize,
    ) -> Result<Vec<CatalogTrack>, CollaboratorError>;
}

/// Service ranking artists by similarity to a given one.
pub trait SimilarArtistFinder {
    fn similar_artists(
        &self,
        artist_name: &str,
        limit: usize,
    ) -> Result<Vec<SimilarArtist>, CollaboratorError>;
}

impl<T: ArtistCatalog + ?Sized> ArtistCatalog for &T {
    fn search_artist(&self, name: &str) -> Result<Option<Artist>, CollaboratorError> {
        (**self).search_artist(name)
    }

    fn artist_genres(&self, artist_id: &str) -> Result<Vec<String>, CollaboratorError> {
        (**self).artist_genres(artist_id)
    }

    fn top_tracks(
        &self,
        artist_id: &str,
        market: &str,
        limit: usize,
    ) -> Result<Vec<CatalogTrack>, CollaboratorError> {
        (**self).top_tracks(artist_id, market, limit)
    }
}

impl<T: SimilarArtistFinder + ?Sized> SimilarArtistFinder for &T {
    fn similar_artists(
        &self,
        artist_name: &str,
        limit: usize,
    ) -> Result<Vec<SimilarArtist>, CollaboratorError> {
        (**self).similar_artists(artist_name, limit)
    }
}
