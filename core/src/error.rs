use thiserror::Error;

use crate::catalog::CollaboratorError;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Artist '{0}' not found in catalog")]
    ArtistNotFound(String),
    #[error("Catalog request failed: {0}")]
    Catalog(#[source] CollaboratorError),
    #[error("Similar artist lookup failed: {0}")]
    Similarity(#[source] CollaboratorError),
}

impl GraphError {
    pub fn is_artist_not_found(&self) -> bool {
        matches!(self, GraphError::ArtistNotFound(_))
    }
}
