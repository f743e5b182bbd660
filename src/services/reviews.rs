use serde::Serialize;

use crate::error::AppResult;
use crate::models::{EventKind, EventOperation, FilmId, ReviewId, UserId, Vote};
use crate::store::{ReviewEntry, Store};

/// A review paired with its current usefulness score, the shape all review
/// reads return
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoredReview {
    #[serde(flatten)]
    pub review: crate::models::Review,
    pub usefulness: i64,
}

impl From<&ReviewEntry> for ScoredReview {
    fn from(entry: &ReviewEntry) -> Self {
        Self {
            review: entry.review.clone(),
            usefulness: entry.usefulness(),
        }
    }
}

/// Creates a review (one per author/film pair) and records the mutation
pub fn add_review(
    store: &mut Store,
    author: UserId,
    film: FilmId,
    content: String,
    positive: bool,
) -> AppResult<ScoredReview> {
    store.catalog.resolve_user(author)?;
    store.catalog.resolve_film(film)?;

    let review = store.graph.add_review(author, film, content, positive)?;
    store
        .events
        .append(author, EventKind::Review, EventOperation::Add, review.id.0);

    tracing::info!(review = review.id.0, author = author.0, film = film.0, "review added");
    Ok(ScoredReview {
        review,
        usefulness: 0,
    })
}

/// Applies partial updates to a review's content and polarity
pub fn update_review(
    store: &mut Store,
    id: ReviewId,
    content: Option<String>,
    positive: Option<bool>,
) -> AppResult<ScoredReview> {
    let review = store.graph.update_review(id, content, positive)?;
    store.events.append(
        review.author,
        EventKind::Review,
        EventOperation::Update,
        review.id.0,
    );

    tracing::info!(review = review.id.0, "review updated");
    Ok(ScoredReview::from(store.graph.review(id)?))
}

/// Removes a review together with its vote map
pub fn remove_review(store: &mut Store, id: ReviewId) -> AppResult<()> {
    let review = store.graph.remove_review(id)?;
    store.events.append(
        review.author,
        EventKind::Review,
        EventOperation::Remove,
        review.id.0,
    );

    tracing::info!(review = review.id.0, "review removed");
    Ok(())
}

pub fn get_review(store: &Store, id: ReviewId) -> AppResult<ScoredReview> {
    Ok(ScoredReview::from(store.graph.review(id)?))
}

/// Casts `voter`'s verdict; any standing opposite verdict is revoked.
/// Votes do not show up in activity feeds.
pub fn vote_review(store: &mut Store, id: ReviewId, voter: UserId, vote: Vote) -> AppResult<()> {
    store.catalog.resolve_user(voter)?;
    store.graph.vote_review(id, voter, vote)
}

/// Withdraws `voter`'s verdict, which must currently be `vote`
pub fn unvote_review(store: &mut Store, id: ReviewId, voter: UserId, vote: Vote) -> AppResult<()> {
    store.catalog.resolve_user(voter)?;
    store.graph.unvote_review(id, voter, vote)
}

/// Reviews for one film, or all reviews when `film` is `None`.
///
/// Ordered by descending usefulness; equally useful reviews keep insertion
/// order (ascending review id). Truncated to `count`.
pub fn list_reviews(
    store: &Store,
    film: Option<FilmId>,
    count: usize,
) -> AppResult<Vec<ScoredReview>> {
    if let Some(film) = film {
        store.catalog.resolve_film(film)?;
    }

    let mut reviews: Vec<ScoredReview> = store
        .graph
        .reviews()
        .filter(|entry| film.map(|f| entry.review.film == f).unwrap_or(true))
        .map(ScoredReview::from)
        .collect();
    // Stable sort over id-ordered input realizes the insertion-order tie-break.
    reviews.sort_by(|a, b| b.usefulness.cmp(&a.usefulness));
    reviews.truncate(count);
    Ok(reviews)
}
