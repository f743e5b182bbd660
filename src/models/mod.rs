use std::fmt::Display;

use serde::{Deserialize, Serialize};

mod event;
mod review;

pub use event::{Event, EventKind, EventOperation};
pub use review::{Review, Vote};

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }
    };
}

id_type!(
    /// Identifier of a user in the catalog
    UserId
);
id_type!(
    /// Identifier of a film in the catalog
    FilmId
);
id_type!(
    /// Identifier of a review
    ReviewId
);
id_type!(
    /// Sequence number of an event; assignment order defines feed order
    EventId
);

/// A registered user. Profile fields are catalog data only; the graph
/// references users by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// A film in the catalog, referenced as the target of like edges.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Film {
    pub id: FilmId,
    pub name: String,
    pub description: Option<String>,
}
