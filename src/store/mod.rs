mod catalog;
mod events;
mod graph;

pub use catalog::Catalog;
pub use events::EventLog;
pub use graph::{GraphStore, ReviewEntry};

/// The full backend state: entity catalog, relation graph and activity log.
///
/// One `Store` lives behind the shared application state's lock. Mutating
/// operations take the write guard for their whole duration, which serializes
/// them; read operations compute their entire result from a single read
/// guard, so each call sees one consistent snapshot.
#[derive(Debug, Default)]
pub struct Store {
    pub catalog: Catalog,
    pub graph: GraphStore,
    pub events: EventLog,
}

impl Store {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}
