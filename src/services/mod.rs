pub mod feed;
pub mod recommendations;
pub mod reviews;
pub mod social;

use crate::error::{AppError, AppResult};
use crate::models::{Film, FilmId, User, UserId};
use crate::store::Store;

/// Resolves graph-held user ids back to catalog records.
///
/// The graph only ever stores ids it resolved at mutation time, so a miss
/// here means the two structures diverged, not that the caller passed a bad
/// id.
pub(crate) fn user_records(
    store: &Store,
    ids: impl IntoIterator<Item = UserId>,
) -> AppResult<Vec<User>> {
    ids.into_iter()
        .map(|id| {
            store.catalog.resolve_user(id).cloned().map_err(|_| {
                AppError::Consistency(format!(
                    "User {} referenced by the graph is missing from the catalog",
                    id
                ))
            })
        })
        .collect()
}

/// Same as [`user_records`], for films
pub(crate) fn film_records(
    store: &Store,
    ids: impl IntoIterator<Item = FilmId>,
) -> AppResult<Vec<Film>> {
    ids.into_iter()
        .map(|id| {
            store.catalog.resolve_film(id).cloned().map_err(|_| {
                AppError::Consistency(format!(
                    "Film {} referenced by the graph is missing from the catalog",
                    id
                ))
            })
        })
        .collect()
}
