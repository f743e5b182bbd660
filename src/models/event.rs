use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EventId, UserId};

/// Which relation a mutation touched
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Friend,
    Like,
    Review,
}

/// What the mutation did
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventOperation {
    Add,
    Remove,
    Update,
}

/// One entry in a user's activity feed.
///
/// Events are immutable once appended. Feed order is the ascending `id`
/// sequence assigned at append time; the timestamp is informational and may
/// collide between events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub actor: UserId,
    pub kind: EventKind,
    pub operation: EventOperation,
    /// Id of the entity acted on: the friend for `Friend` events, the film
    /// for `Like` events, the review for `Review` events.
    pub subject_id: u64,
    pub timestamp: DateTime<Utc>,
}
