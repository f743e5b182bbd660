use std::collections::BTreeMap;

use crate::error::AppResult;
use crate::models::{Film, UserId};
use crate::store::Store;

use super::film_records;

/// Recommends films for `user` based on the most similar other user.
///
/// Similarity is like-set overlap: for every user sharing at least one liked
/// film with `user`, count the shared films, take the single user with the
/// largest count, and propose the films they liked that `user` has not. When
/// several candidates tie on overlap the lowest user id wins, so repeated
/// calls against an unchanged store return the same answer.
///
/// Pure read: only the like relation is consulted and nothing is mutated.
/// The inverted film→likers index keeps the scan to users who actually share
/// a film instead of the whole user set.
pub fn recommend(store: &Store, user: UserId) -> AppResult<Vec<Film>> {
    store.catalog.resolve_user(user)?;

    let own_likes = store.graph.likes_of(user);

    let mut overlap: BTreeMap<UserId, usize> = BTreeMap::new();
    for film in &own_likes {
        for other in store.graph.likers_of(*film) {
            if other != user {
                *overlap.entry(other).or_default() += 1;
            }
        }
    }

    // Ascending iteration plus a strictly-greater comparison picks the lowest
    // id among maximal candidates.
    let mut neighbor: Option<(UserId, usize)> = None;
    for (candidate, shared) in overlap {
        if neighbor.map(|(_, best)| shared > best).unwrap_or(true) {
            neighbor = Some((candidate, shared));
        }
    }

    let Some((neighbor, shared)) = neighbor else {
        tracing::debug!(user = user.0, "no user shares a like, nothing to recommend");
        return Ok(Vec::new());
    };

    let suggested: Vec<_> = store
        .graph
        .likes_of(neighbor)
        .difference(&own_likes)
        .copied()
        .collect();

    tracing::debug!(
        user = user.0,
        neighbor = neighbor.0,
        shared,
        suggested = suggested.len(),
        "recommendations computed"
    );
    film_records(store, suggested)
}
