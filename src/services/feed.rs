use crate::error::AppResult;
use crate::models::{Event, UserId};
use crate::store::Store;

/// The activity feed of one user: every friend, like and review mutation they
/// performed, oldest first.
pub fn get_feed(store: &Store, user: UserId) -> AppResult<Vec<Event>> {
    store.catalog.resolve_user(user)?;
    Ok(store.events.events_for(user))
}
