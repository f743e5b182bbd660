use std::collections::BTreeMap;

use crate::error::{AppError, AppResult};
use crate::models::{Film, FilmId, User, UserId};

/// Catalog of users and films.
///
/// The graph never stores entities, only ids; every graph operation resolves
/// its ids here first and treats an unresolvable id as `NotFound` rather than
/// assuming referential integrity holds.
#[derive(Debug, Default)]
pub struct Catalog {
    users: BTreeMap<UserId, User>,
    films: BTreeMap<FilmId, Film>,
    next_user_id: u64,
    next_film_id: u64,
}

impl Catalog {
    /// Registers a new user under the next free id
    pub fn create_user(&mut self, name: String, email: String) -> User {
        self.next_user_id += 1;
        let user = User {
            id: UserId(self.next_user_id),
            name,
            email,
        };
        self.users.insert(user.id, user.clone());
        user
    }

    /// Registers a new film under the next free id
    pub fn create_film(&mut self, name: String, description: Option<String>) -> Film {
        self.next_film_id += 1;
        let film = Film {
            id: FilmId(self.next_film_id),
            name,
            description,
        };
        self.films.insert(film.id, film.clone());
        film
    }

    pub fn resolve_user(&self, id: UserId) -> AppResult<&User> {
        self.users
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    pub fn resolve_film(&self, id: FilmId) -> AppResult<&Film> {
        self.films
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("Film with id {} not found", id)))
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn films(&self) -> impl Iterator<Item = &Film> {
        self.films.values()
    }

    /// Drops the user record. The caller is responsible for having scrubbed
    /// the user's edges from the graph first.
    pub fn remove_user(&mut self, id: UserId) -> AppResult<User> {
        self.users
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Drops the film record, same contract as [`Catalog::remove_user`]
    pub fn remove_film(&mut self, id: FilmId) -> AppResult<Film> {
        self.films
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(format!("Film with id {} not found", id)))
    }
}
