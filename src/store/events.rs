use chrono::Utc;

use crate::models::{Event, EventId, EventKind, EventOperation, UserId};

/// Append-only log of graph mutations.
///
/// Ids are assigned from a monotonic counter at append time and define feed
/// order; timestamps are recorded for display but never used for ordering,
/// since they may collide.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<Event>,
    next_id: u64,
}

impl EventLog {
    /// Records a mutation. Never fails; id validation happened in the
    /// operation that is being recorded.
    pub fn append(
        &mut self,
        actor: UserId,
        kind: EventKind,
        operation: EventOperation,
        subject_id: u64,
    ) -> Event {
        self.next_id += 1;
        let event = Event {
            id: EventId(self.next_id),
            actor,
            kind,
            operation,
            subject_id,
            timestamp: Utc::now(),
        };
        tracing::debug!(event_id = event.id.0, actor = actor.0, "event appended");
        self.events.push(event.clone());
        event
    }

    /// Every event whose actor is `user`, in ascending id order
    pub fn events_for(&self, user: UserId) -> Vec<Event> {
        self.events
            .iter()
            .filter(|event| event.actor == user)
            .cloned()
            .collect()
    }
}
