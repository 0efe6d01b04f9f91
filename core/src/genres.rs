use std::collections::BTreeSet;

use crate::models::{Track, TrackEdge};

/// Genre terms too generic to count as a meaningful overlap.
pub const DEFAULT_IGNORED_GENRES: [&str; 3] = ["punk", "rock", "classic"];

/// Set of genre tags excluded from overlap computation.
///
/// The default covers the generic terms above. Callers exploring classical
/// music, for example, will want to drop `"classic"` from it, while callers
/// after finer-grained links may add more.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreStoplist {
    ignored: BTreeSet<String>,
}

impl GenreStoplist {
    pub fn new<I, S>(genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ignored: genres.into_iter().map(Into::into).collect(),
        }
    }

    pub fn empty() -> Self {
        Self {
            ignored: BTreeSet::new(),
        }
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.ignored.insert(genre.into());
        self
    }

    pub fn is_ignored(&self, genre: &str) -> bool {
        self.ignored.contains(genre)
    }

    pub fn ignored(&self) -> impl Iterator<Item = &str> {
        self.ignored.iter().map(String::as_str)
    }

    /// Deduplicated genres with ignored terms removed.
    pub fn filter(&self, genres: &[String]) -> BTreeSet<String> {
        genres
            .iter()
            .filter(|genre| !self.is_ignored(genre))
            .cloned()
            .collect()
    }
}

impl Default for GenreStoplist {
    fn default() -> Self {
        Self::new(DEFAULT_IGNORED_GENRES)
    }
}

/// Genres both artists carry, ignoring stoplisted terms.
pub fn shared_genres(
    first: &[String],
    second: &[String],
    stoplist: &GenreStoplist,
) -> BTreeSet<String> {
    let first = stoplist.filter(first);
    let second = stoplist.filter(second);
    first.intersection(&second).cloned().collect()
}

/// Links every pair of tracks from different artists whose artists share at
/// least `min_overlap` non-ignored genres.
///
/// Pairs are visited in track order (`i < j`), so the result is stable for a
/// given track list. A `min_overlap` of zero behaves like one: edges always
/// carry at least one shared genre.
pub fn link_tracks_by_genre(
    tracks: &[Track],
    min_overlap: usize,
    stoplist: &GenreStoplist,
) -> Vec<TrackEdge> {
    let min_overlap = min_overlap.max(1);

    let mut edges = Vec::new();
    for (i, first) in tracks.iter().enumerate() {
        for second in &tracks[i + 1..] {
            if first.artist_id == second.artist_id {
                continue;
            }

            let overlap = shared_genres(&first.artist_genres, &second.artist_genres, stoplist);
            if overlap.len() >= min_overlap {
                edges.push(TrackEdge::between(first, second, overlap.into_iter().collect()));
            }
        }
    }

    edges
}
