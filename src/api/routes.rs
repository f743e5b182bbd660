use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Users
        .route("/users", get(handlers::get_users))
        .route("/users", post(handlers::create_user))
        .route("/users/:id", get(handlers::get_user))
        .route("/users/:id", delete(handlers::delete_user))
        // Friends
        .route("/users/:id/friends/:friend_id", put(handlers::add_friend))
        .route(
            "/users/:id/friends/:friend_id",
            delete(handlers::remove_friend),
        )
        .route("/users/:id/friends", get(handlers::get_friends))
        .route(
            "/users/:id/friends/common/:other_id",
            get(handlers::get_common_friends),
        )
        // Recommendations and activity feed
        .route(
            "/users/:id/recommendations",
            get(handlers::get_recommendations),
        )
        .route("/users/:id/feed", get(handlers::get_feed))
        // Films
        .route("/films", get(handlers::get_films))
        .route("/films", post(handlers::create_film))
        .route("/films/popular", get(handlers::get_popular_films))
        .route("/films/common", get(handlers::get_common_films))
        .route("/films/:id", get(handlers::get_film))
        .route("/films/:id", delete(handlers::delete_film))
        // Likes
        .route("/films/:id/like/:user_id", put(handlers::add_like))
        .route("/films/:id/like/:user_id", delete(handlers::remove_like))
        // Reviews
        .route("/reviews", get(handlers::list_reviews))
        .route("/reviews", post(handlers::create_review))
        .route("/reviews", put(handlers::update_review))
        .route("/reviews/:id", get(handlers::get_review))
        .route("/reviews/:id", delete(handlers::delete_review))
        .route("/reviews/:id/like/:user_id", put(handlers::like_review))
        .route(
            "/reviews/:id/dislike/:user_id",
            put(handlers::dislike_review),
        )
        .route(
            "/reviews/:id/like/:user_id",
            delete(handlers::unlike_review),
        )
        .route(
            "/reviews/:id/dislike/:user_id",
            delete(handlers::undislike_review),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
