use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::{AppError, AppResult};
use crate::models::{FilmId, Review, ReviewId, UserId, Vote};

/// A review together with its vote map.
///
/// Votes are a single map from voter to verdict, so a voter can never hold a
/// like and a dislike on the same review at once.
#[derive(Debug, Clone)]
pub struct ReviewEntry {
    pub review: Review,
    votes: HashMap<UserId, Vote>,
}

impl ReviewEntry {
    /// Net score: likes minus dislikes, computed from the vote map on every
    /// call rather than cached.
    pub fn usefulness(&self) -> i64 {
        self.votes.values().fold(0, |score, vote| match vote {
            Vote::Like => score + 1,
            Vote::Dislike => score - 1,
        })
    }

    pub fn vote_of(&self, voter: UserId) -> Option<Vote> {
        self.votes.get(&voter).copied()
    }
}

/// The two graph relations plus review records.
///
/// Friendship is a directed user→user edge set: A having B as a friend says
/// nothing about B. Likes are kept in both directions (user→films and
/// film→users) so recommendation and popularity queries don't scan the whole
/// relation; the two maps are updated together and divergence between them is
/// reported as a consistency failure.
#[derive(Debug, Default)]
pub struct GraphStore {
    friends: HashMap<UserId, BTreeSet<UserId>>,
    likes_by_user: HashMap<UserId, BTreeSet<FilmId>>,
    likes_by_film: HashMap<FilmId, BTreeSet<UserId>>,
    reviews: BTreeMap<ReviewId, ReviewEntry>,
    next_review_id: u64,
}

impl GraphStore {
    // ------------------------------------------------------------------
    // Friend edges
    // ------------------------------------------------------------------

    /// Adds the directed edge `from → to`.
    ///
    /// Duplicate edges and self-loops are rejected; both are caller mistakes
    /// the caller must see, not silent no-ops.
    pub fn add_friend(&mut self, from: UserId, to: UserId) -> AppResult<()> {
        if from == to {
            return Err(AppError::Validation(
                "Cannot add yourself as a friend".to_string(),
            ));
        }
        let inserted = self.friends.entry(from).or_default().insert(to);
        if !inserted {
            return Err(AppError::Validation(format!(
                "User {} is already a friend of user {}",
                to, from
            )));
        }
        Ok(())
    }

    /// Removes the directed edge `from → to`; the edge must exist.
    pub fn remove_friend(&mut self, from: UserId, to: UserId) -> AppResult<()> {
        let removed = self
            .friends
            .get_mut(&from)
            .map(|set| set.remove(&to))
            .unwrap_or(false);
        if !removed {
            return Err(AppError::NotFound(format!(
                "User {} is not a friend of user {}",
                to, from
            )));
        }
        Ok(())
    }

    /// Outgoing friend edges of `user`
    pub fn friends_of(&self, user: UserId) -> BTreeSet<UserId> {
        self.friends.get(&user).cloned().unwrap_or_default()
    }

    /// Users holding an edge towards `user` (reverse scan; only the deletion
    /// cascade needs this direction)
    pub fn followers_of(&self, user: UserId) -> Vec<UserId> {
        self.friends
            .iter()
            .filter(|(_, set)| set.contains(&user))
            .map(|(from, _)| *from)
            .collect()
    }

    // ------------------------------------------------------------------
    // Like edges
    // ------------------------------------------------------------------

    /// Records that `user` liked `film`; a repeated like is an error.
    pub fn add_like(&mut self, user: UserId, film: FilmId) -> AppResult<()> {
        let inserted = self.likes_by_user.entry(user).or_default().insert(film);
        if !inserted {
            return Err(AppError::Validation(format!(
                "User {} already liked film {}",
                user, film
            )));
        }
        self.likes_by_film.entry(film).or_default().insert(user);
        Ok(())
    }

    /// Removes `user`'s like of `film`; the like must exist.
    pub fn remove_like(&mut self, user: UserId, film: FilmId) -> AppResult<()> {
        let removed = self
            .likes_by_user
            .get_mut(&user)
            .map(|set| set.remove(&film))
            .unwrap_or(false);
        if !removed {
            return Err(AppError::Validation(format!(
                "User {} did not like film {}",
                user, film
            )));
        }
        self.unindex_like(user, film)
    }

    /// Films liked by `user`
    pub fn likes_of(&self, user: UserId) -> BTreeSet<FilmId> {
        self.likes_by_user.get(&user).cloned().unwrap_or_default()
    }

    /// Users who liked `film`
    pub fn likers_of(&self, film: FilmId) -> BTreeSet<UserId> {
        self.likes_by_film.get(&film).cloned().unwrap_or_default()
    }

    /// Total like count of `film` across all users
    pub fn like_count(&self, film: FilmId) -> usize {
        self.likes_by_film.get(&film).map(BTreeSet::len).unwrap_or(0)
    }

    // ------------------------------------------------------------------
    // Reviews
    // ------------------------------------------------------------------

    /// Creates a review and its empty vote map together.
    ///
    /// One review per (author, film) pair; a second submission is rejected.
    pub fn add_review(
        &mut self,
        author: UserId,
        film: FilmId,
        content: String,
        positive: bool,
    ) -> AppResult<Review> {
        let duplicate = self
            .reviews
            .values()
            .any(|entry| entry.review.author == author && entry.review.film == film);
        if duplicate {
            return Err(AppError::Validation(format!(
                "User {} already reviewed film {}",
                author, film
            )));
        }

        self.next_review_id += 1;
        let review = Review {
            id: ReviewId(self.next_review_id),
            author,
            film,
            content,
            positive,
        };
        self.reviews.insert(
            review.id,
            ReviewEntry {
                review: review.clone(),
                votes: HashMap::new(),
            },
        );
        Ok(review)
    }

    pub fn review(&self, id: ReviewId) -> AppResult<&ReviewEntry> {
        self.reviews
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("Review with id {} not found", id)))
    }

    /// Applies partial updates to a review's content and polarity
    pub fn update_review(
        &mut self,
        id: ReviewId,
        content: Option<String>,
        positive: Option<bool>,
    ) -> AppResult<Review> {
        let entry = self
            .reviews
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Review with id {} not found", id)))?;

        if let Some(content) = content {
            entry.review.content = content;
        }
        if let Some(positive) = positive {
            entry.review.positive = positive;
        }
        Ok(entry.review.clone())
    }

    /// Removes a review and its vote map together
    pub fn remove_review(&mut self, id: ReviewId) -> AppResult<Review> {
        self.reviews
            .remove(&id)
            .map(|entry| entry.review)
            .ok_or_else(|| AppError::NotFound(format!("Review with id {} not found", id)))
    }

    /// Casts `voter`'s verdict on a review.
    ///
    /// Inserting into the vote map replaces any opposite verdict, which is
    /// exactly the exclusivity rule: a like silently revokes a standing
    /// dislike and vice versa.
    pub fn vote_review(&mut self, id: ReviewId, voter: UserId, vote: Vote) -> AppResult<()> {
        let entry = self
            .reviews
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Review with id {} not found", id)))?;
        entry.votes.insert(voter, vote);
        Ok(())
    }

    /// Withdraws `voter`'s verdict, which must currently be `vote`.
    ///
    /// Not idempotent: withdrawing a vote that was never cast (or was already
    /// replaced by the opposite one) is an error the caller must see.
    pub fn unvote_review(&mut self, id: ReviewId, voter: UserId, vote: Vote) -> AppResult<()> {
        let entry = self
            .reviews
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Review with id {} not found", id)))?;

        if entry.votes.get(&voter) != Some(&vote) {
            let verdict = match vote {
                Vote::Like => "like",
                Vote::Dislike => "dislike",
            };
            return Err(AppError::Validation(format!(
                "User {} did not {} review {}",
                voter, verdict, id
            )));
        }
        entry.votes.remove(&voter);
        Ok(())
    }

    /// All reviews in insertion (id) order
    pub fn reviews(&self) -> impl Iterator<Item = &ReviewEntry> {
        self.reviews.values()
    }

    // ------------------------------------------------------------------
    // Cascades
    // ------------------------------------------------------------------

    /// Scrubs every edge touching `user`: incoming friend edges, outgoing
    /// friend edges, and all of the user's likes (both directions of the like
    /// index). Called under the same write guard as the catalog removal, so
    /// no concurrent mutation can reintroduce an edge mid-cascade.
    pub fn purge_user(&mut self, user: UserId) -> AppResult<()> {
        for follower in self.followers_of(user) {
            let removed = self
                .friends
                .get_mut(&follower)
                .map(|set| set.remove(&user))
                .unwrap_or(false);
            if !removed {
                return Err(AppError::Consistency(format!(
                    "Friend edge {} -> {} vanished mid-cascade",
                    follower, user
                )));
            }
        }
        self.friends.remove(&user);

        if let Some(films) = self.likes_by_user.remove(&user) {
            for film in films {
                self.unindex_like(user, film)?;
            }
        }
        Ok(())
    }

    /// Scrubs every like edge targeting `film`. Reviews of the film are kept.
    pub fn purge_film(&mut self, film: FilmId) -> AppResult<()> {
        if let Some(users) = self.likes_by_film.remove(&film) {
            for user in users {
                let removed = self
                    .likes_by_user
                    .get_mut(&user)
                    .map(|set| set.remove(&film))
                    .unwrap_or(false);
                if !removed {
                    return Err(AppError::Consistency(format!(
                        "Like edge {} -> {} missing from the forward index",
                        user, film
                    )));
                }
            }
        }
        Ok(())
    }

    /// Drops `user` from `film`'s liker set; absence means the two like maps
    /// diverged, which is a store bug surfaced to the caller.
    fn unindex_like(&mut self, user: UserId, film: FilmId) -> AppResult<()> {
        let removed = self
            .likes_by_film
            .get_mut(&film)
            .map(|set| set.remove(&user))
            .unwrap_or(false);
        if !removed {
            return Err(AppError::Consistency(format!(
                "Like edge {} -> {} missing from the inverted index",
                user, film
            )));
        }
        Ok(())
    }
}
