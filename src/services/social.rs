use std::cmp::Reverse;

use crate::error::{AppError, AppResult};
use crate::models::{EventKind, EventOperation, Film, FilmId, User, UserId};
use crate::store::Store;

use super::{film_records, user_records};

/// Adds the directed friend edge `user → friend` and records the mutation.
///
/// Friendship is asymmetric: this gives `user` a friend, it does not give
/// `friend` one.
pub fn add_friend(store: &mut Store, user: UserId, friend: UserId) -> AppResult<()> {
    store.catalog.resolve_user(user)?;
    store.catalog.resolve_user(friend)?;

    store.graph.add_friend(user, friend)?;
    store
        .events
        .append(user, EventKind::Friend, EventOperation::Add, friend.0);

    tracing::info!(user = user.0, friend = friend.0, "friend added");
    Ok(())
}

/// Removes the friend edge `user → friend`; the edge must exist.
pub fn remove_friend(store: &mut Store, user: UserId, friend: UserId) -> AppResult<()> {
    store.catalog.resolve_user(user)?;
    store.catalog.resolve_user(friend)?;

    store.graph.remove_friend(user, friend)?;
    store
        .events
        .append(user, EventKind::Friend, EventOperation::Remove, friend.0);

    tracing::info!(user = user.0, friend = friend.0, "friend removed");
    Ok(())
}

/// Users that `user` has added as friends
pub fn friends_of(store: &Store, user: UserId) -> AppResult<Vec<User>> {
    store.catalog.resolve_user(user)?;
    user_records(store, store.graph.friends_of(user))
}

/// Intersection of the two users' friend sets
pub fn common_friends(store: &Store, a: UserId, b: UserId) -> AppResult<Vec<User>> {
    store.catalog.resolve_user(a)?;
    store.catalog.resolve_user(b)?;

    let friends_a = store.graph.friends_of(a);
    let friends_b = store.graph.friends_of(b);
    user_records(store, friends_a.intersection(&friends_b).copied())
}

/// Records that `user` liked `film`
pub fn add_like(store: &mut Store, user: UserId, film: FilmId) -> AppResult<()> {
    store.catalog.resolve_user(user)?;
    store.catalog.resolve_film(film)?;

    store.graph.add_like(user, film)?;
    store
        .events
        .append(user, EventKind::Like, EventOperation::Add, film.0);

    tracing::info!(user = user.0, film = film.0, "like added");
    Ok(())
}

/// Removes `user`'s like of `film`; the like must exist.
pub fn remove_like(store: &mut Store, user: UserId, film: FilmId) -> AppResult<()> {
    store.catalog.resolve_user(user)?;
    store.catalog.resolve_film(film)?;

    store.graph.remove_like(user, film)?;
    store
        .events
        .append(user, EventKind::Like, EventOperation::Remove, film.0);

    tracing::info!(user = user.0, film = film.0, "like removed");
    Ok(())
}

/// Films liked by both users, most-liked first.
///
/// Ordering is by total like count across all users, descending, then by
/// ascending film id so equally popular films come out deterministically.
/// The same rule in both argument orders makes the result symmetric.
pub fn common_films(store: &Store, a: UserId, b: UserId) -> AppResult<Vec<Film>> {
    store.catalog.resolve_user(a)?;
    store.catalog.resolve_user(b)?;

    let likes_a = store.graph.likes_of(a);
    let likes_b = store.graph.likes_of(b);
    let mut common: Vec<FilmId> = likes_a.intersection(&likes_b).copied().collect();
    common.sort_by_key(|film| (Reverse(store.graph.like_count(*film)), *film));

    film_records(store, common)
}

/// The `count` most-liked films, same ordering rule as [`common_films`]
pub fn popular_films(store: &Store, count: usize) -> AppResult<Vec<Film>> {
    if count == 0 {
        return Err(AppError::Validation(
            "Parameter count must be a positive number".to_string(),
        ));
    }

    let mut films: Vec<FilmId> = store.catalog.films().map(|film| film.id).collect();
    films.sort_by_key(|film| (Reverse(store.graph.like_count(*film)), *film));
    films.truncate(count);

    film_records(store, films)
}

/// Deletes a user and everything attached to them, in order: incoming friend
/// edges, outgoing friend edges, like edges, then the record itself.
///
/// The whole cascade runs under one write guard, so nothing can reinsert an
/// edge partway through. A step failure propagates immediately; steps already
/// applied stay applied and the error tells the caller the cascade is
/// incomplete.
pub fn delete_user(store: &mut Store, user: UserId) -> AppResult<()> {
    store.catalog.resolve_user(user)?;

    store.graph.purge_user(user)?;
    store.catalog.remove_user(user)?;

    tracing::info!(user = user.0, "user deleted");
    Ok(())
}

/// Deletes a film and its like edges. Existing reviews of the film survive.
pub fn delete_film(store: &mut Store, film: FilmId) -> AppResult<()> {
    store.catalog.resolve_film(film)?;

    store.graph.purge_film(film)?;
    store.catalog.remove_film(film)?;

    tracing::info!(film = film.0, "film deleted");
    Ok(())
}
