use serde::{Deserialize, Serialize};

use super::{FilmId, ReviewId, UserId};

/// A user's review of a film.
///
/// The usefulness score is not stored here; it is derived on demand from the
/// review's vote map in the graph store, so it can never drift out of sync.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: ReviewId,
    pub author: UserId,
    pub film: FilmId,
    pub content: String,
    /// Whether the review recommends the film
    pub positive: bool,
}

/// A reader's verdict on a review.
///
/// A voter holds at most one `Vote` per review; casting the opposite vote
/// replaces the current one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Vote {
    Like,
    Dislike,
}

impl Vote {
    /// The other verdict
    pub fn opposite(self) -> Self {
        match self {
            Vote::Like => Vote::Dislike,
            Vote::Dislike => Vote::Like,
        }
    }
}
