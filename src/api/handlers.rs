use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::models::{Event, Film, FilmId, ReviewId, User, UserId, Vote};
use crate::services::{feed, recommendations, reviews, reviews::ScoredReview, social};

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateFilmRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub author: UserId,
    pub film: FilmId,
    pub content: String,
    pub positive: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateReviewRequest {
    pub review_id: ReviewId,
    pub content: Option<String>,
    pub positive: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CountQuery {
    pub count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct CommonFilmsQuery {
    pub user_id: UserId,
    pub friend_id: UserId,
}

#[derive(Debug, Deserialize)]
pub struct ReviewListQuery {
    pub film_id: Option<FilmId>,
    pub count: Option<usize>,
}

const DEFAULT_LIST_COUNT: usize = 10;

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> (StatusCode, Json<User>) {
    let mut store = state.store.write().await;
    let user = store.catalog.create_user(request.name, request.email);
    (StatusCode::CREATED, Json(user))
}

pub async fn get_users(State(state): State<AppState>) -> Json<Vec<User>> {
    let store = state.store.read().await;
    Json(store.catalog.users().cloned().collect())
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> AppResult<Json<User>> {
    let store = state.store.read().await;
    Ok(Json(store.catalog.resolve_user(user_id)?.clone()))
}

/// Deletes a user and cascades through the user's edges
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> AppResult<StatusCode> {
    let mut store = state.store.write().await;
    social::delete_user(&mut store, user_id)?;
    Ok(StatusCode::OK)
}

pub async fn create_film(
    State(state): State<AppState>,
    Json(request): Json<CreateFilmRequest>,
) -> (StatusCode, Json<Film>) {
    let mut store = state.store.write().await;
    let film = store.catalog.create_film(request.name, request.description);
    (StatusCode::CREATED, Json(film))
}

pub async fn get_films(State(state): State<AppState>) -> Json<Vec<Film>> {
    let store = state.store.read().await;
    Json(store.catalog.films().cloned().collect())
}

pub async fn get_film(
    State(state): State<AppState>,
    Path(film_id): Path<FilmId>,
) -> AppResult<Json<Film>> {
    let store = state.store.read().await;
    Ok(Json(store.catalog.resolve_film(film_id)?.clone()))
}

pub async fn delete_film(
    State(state): State<AppState>,
    Path(film_id): Path<FilmId>,
) -> AppResult<StatusCode> {
    let mut store = state.store.write().await;
    social::delete_film(&mut store, film_id)?;
    Ok(StatusCode::OK)
}

pub async fn add_friend(
    State(state): State<AppState>,
    Path((user_id, friend_id)): Path<(UserId, UserId)>,
) -> AppResult<StatusCode> {
    let mut store = state.store.write().await;
    social::add_friend(&mut store, user_id, friend_id)?;
    Ok(StatusCode::OK)
}

pub async fn remove_friend(
    State(state): State<AppState>,
    Path((user_id, friend_id)): Path<(UserId, UserId)>,
) -> AppResult<StatusCode> {
    let mut store = state.store.write().await;
    social::remove_friend(&mut store, user_id, friend_id)?;
    Ok(StatusCode::OK)
}

pub async fn get_friends(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> AppResult<Json<Vec<User>>> {
    let store = state.store.read().await;
    Ok(Json(social::friends_of(&store, user_id)?))
}

pub async fn get_common_friends(
    State(state): State<AppState>,
    Path((user_id, other_id)): Path<(UserId, UserId)>,
) -> AppResult<Json<Vec<User>>> {
    let store = state.store.read().await;
    Ok(Json(social::common_friends(&store, user_id, other_id)?))
}

pub async fn add_like(
    State(state): State<AppState>,
    Path((film_id, user_id)): Path<(FilmId, UserId)>,
) -> AppResult<StatusCode> {
    let mut store = state.store.write().await;
    social::add_like(&mut store, user_id, film_id)?;
    Ok(StatusCode::OK)
}

pub async fn remove_like(
    State(state): State<AppState>,
    Path((film_id, user_id)): Path<(FilmId, UserId)>,
) -> AppResult<StatusCode> {
    let mut store = state.store.write().await;
    social::remove_like(&mut store, user_id, film_id)?;
    Ok(StatusCode::OK)
}

pub async fn get_popular_films(
    State(state): State<AppState>,
    Query(query): Query<CountQuery>,
) -> AppResult<Json<Vec<Film>>> {
    let store = state.store.read().await;
    let films = social::popular_films(&store, query.count.unwrap_or(DEFAULT_LIST_COUNT))?;
    Ok(Json(films))
}

pub async fn get_common_films(
    State(state): State<AppState>,
    Query(query): Query<CommonFilmsQuery>,
) -> AppResult<Json<Vec<Film>>> {
    let store = state.store.read().await;
    Ok(Json(social::common_films(
        &store,
        query.user_id,
        query.friend_id,
    )?))
}

pub async fn get_recommendations(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> AppResult<Json<Vec<Film>>> {
    let store = state.store.read().await;
    Ok(Json(recommendations::recommend(&store, user_id)?))
}

pub async fn get_feed(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> AppResult<Json<Vec<Event>>> {
    let store = state.store.read().await;
    Ok(Json(feed::get_feed(&store, user_id)?))
}

pub async fn create_review(
    State(state): State<AppState>,
    Json(request): Json<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<ScoredReview>)> {
    let mut store = state.store.write().await;
    let review = reviews::add_review(
        &mut store,
        request.author,
        request.film,
        request.content,
        request.positive,
    )?;
    Ok((StatusCode::CREATED, Json(review)))
}

pub async fn update_review(
    State(state): State<AppState>,
    Json(request): Json<UpdateReviewRequest>,
) -> AppResult<Json<ScoredReview>> {
    let mut store = state.store.write().await;
    let review = reviews::update_review(
        &mut store,
        request.review_id,
        request.content,
        request.positive,
    )?;
    Ok(Json(review))
}

pub async fn delete_review(
    State(state): State<AppState>,
    Path(review_id): Path<ReviewId>,
) -> AppResult<StatusCode> {
    let mut store = state.store.write().await;
    reviews::remove_review(&mut store, review_id)?;
    Ok(StatusCode::OK)
}

pub async fn get_review(
    State(state): State<AppState>,
    Path(review_id): Path<ReviewId>,
) -> AppResult<Json<ScoredReview>> {
    let store = state.store.read().await;
    Ok(Json(reviews::get_review(&store, review_id)?))
}

pub async fn list_reviews(
    State(state): State<AppState>,
    Query(query): Query<ReviewListQuery>,
) -> AppResult<Json<Vec<ScoredReview>>> {
    let store = state.store.read().await;
    let listed = reviews::list_reviews(
        &store,
        query.film_id,
        query.count.unwrap_or(DEFAULT_LIST_COUNT),
    )?;
    Ok(Json(listed))
}

pub async fn like_review(
    State(state): State<AppState>,
    Path((review_id, user_id)): Path<(ReviewId, UserId)>,
) -> AppResult<StatusCode> {
    let mut store = state.store.write().await;
    reviews::vote_review(&mut store, review_id, user_id, Vote::Like)?;
    Ok(StatusCode::OK)
}

pub async fn dislike_review(
    State(state): State<AppState>,
    Path((review_id, user_id)): Path<(ReviewId, UserId)>,
) -> AppResult<StatusCode> {
    let mut store = state.store.write().await;
    reviews::vote_review(&mut store, review_id, user_id, Vote::Dislike)?;
    Ok(StatusCode::OK)
}

pub async fn unlike_review(
    State(state): State<AppState>,
    Path((review_id, user_id)): Path<(ReviewId, UserId)>,
) -> AppResult<StatusCode> {
    let mut store = state.store.write().await;
    reviews::unvote_review(&mut store, review_id, user_id, Vote::Like)?;
    Ok(StatusCode::OK)
}

pub async fn undislike_review(
    State(state): State<AppState>,
    Path((review_id, user_id)): Path<(ReviewId, UserId)>,
) -> AppResult<StatusCode> {
    let mut store = state.store.write().await;
    reviews::unvote_review(&mut store, review_id, user_id, Vote::Dislike)?;
    Ok(StatusCode::OK)
}
