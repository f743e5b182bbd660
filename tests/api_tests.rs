use axum_test::TestServer;
use serde_json::json;

use cinegraph::api::{create_router, AppState};

fn create_test_server() -> TestServer {
    let state = AppState::new();
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

async fn create_user(server: &TestServer, name: &str) -> u64 {
    let response = server
        .post("/users")
        .json(&json!({
            "name": name,
            "email": format!("{}@example.com", name)
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    let user: serde_json::Value = response.json();
    user["id"].as_u64().unwrap()
}

async fn create_film(server: &TestServer, name: &str) -> u64 {
    let response = server
        .post("/films")
        .json(&json!({ "name": name }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    let film: serde_json::Value = response.json();
    film["id"].as_u64().unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_create_and_get_user() {
    let server = create_test_server();

    let id = create_user(&server, "ada").await;

    let response = server.get(&format!("/users/{}", id)).await;
    response.assert_status_ok();
    let user: serde_json::Value = response.json();
    assert_eq!(user["name"], "ada");
    assert_eq!(user["email"], "ada@example.com");

    let response = server.get("/users").await;
    response.assert_status_ok();
    let users: Vec<serde_json::Value> = response.json();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn test_get_unknown_user_is_404() {
    let server = create_test_server();
    let response = server.get("/users/99").await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_friendship_is_asymmetric() {
    let server = create_test_server();
    let a = create_user(&server, "a").await;
    let b = create_user(&server, "b").await;

    let response = server.put(&format!("/users/{}/friends/{}", a, b)).await;
    response.assert_status_ok();

    let friends_of_a: Vec<serde_json::Value> =
        server.get(&format!("/users/{}/friends", a)).await.json();
    assert_eq!(friends_of_a.len(), 1);
    assert_eq!(friends_of_a[0]["id"].as_u64().unwrap(), b);

    let friends_of_b: Vec<serde_json::Value> =
        server.get(&format!("/users/{}/friends", b)).await.json();
    assert!(friends_of_b.is_empty());
}

#[tokio::test]
async fn test_duplicate_friend_is_rejected() {
    let server = create_test_server();
    let a = create_user(&server, "a").await;
    let b = create_user(&server, "b").await;

    server
        .put(&format!("/users/{}/friends/{}", a, b))
        .await
        .assert_status_ok();
    let response = server.put(&format!("/users/{}/friends/{}", a, b)).await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_self_friend_is_rejected() {
    let server = create_test_server();
    let a = create_user(&server, "a").await;

    let response = server.put(&format!("/users/{}/friends/{}", a, a)).await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_common_friends() {
    let server = create_test_server();
    let a = create_user(&server, "a").await;
    let b = create_user(&server, "b").await;
    let c = create_user(&server, "c").await;

    server
        .put(&format!("/users/{}/friends/{}", a, c))
        .await
        .assert_status_ok();
    server
        .put(&format!("/users/{}/friends/{}", b, c))
        .await
        .assert_status_ok();

    let common: Vec<serde_json::Value> = server
        .get(&format!("/users/{}/friends/common/{}", a, b))
        .await
        .json();
    assert_eq!(common.len(), 1);
    assert_eq!(common[0]["id"].as_u64().unwrap(), c);
}

#[tokio::test]
async fn test_like_is_strict_about_duplicates_and_absences() {
    let server = create_test_server();
    let user = create_user(&server, "a").await;
    let film = create_film(&server, "film").await;

    server
        .put(&format!("/films/{}/like/{}", film, user))
        .await
        .assert_status_ok();

    let duplicate = server.put(&format!("/films/{}/like/{}", film, user)).await;
    duplicate.assert_status(axum::http::StatusCode::BAD_REQUEST);

    server
        .delete(&format!("/films/{}/like/{}", film, user))
        .await
        .assert_status_ok();

    let absent = server
        .delete(&format!("/films/{}/like/{}", film, user))
        .await;
    absent.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommendations_follow_the_best_overlap() {
    let server = create_test_server();
    let user1 = create_user(&server, "u1").await;
    let user2 = create_user(&server, "u2").await;
    let user3 = create_user(&server, "u3").await;
    let film1 = create_film(&server, "f1").await;
    let film2 = create_film(&server, "f2").await;
    let film3 = create_film(&server, "f3").await;

    // user1 likes {1,2,3}, user2 likes {1,3}, user3 likes {2}
    for film in [film1, film2, film3] {
        server
            .put(&format!("/films/{}/like/{}", film, user1))
            .await
            .assert_status_ok();
    }
    for film in [film1, film3] {
        server
            .put(&format!("/films/{}/like/{}", film, user2))
            .await
            .assert_status_ok();
    }
    server
        .put(&format!("/films/{}/like/{}", film2, user3))
        .await
        .assert_status_ok();

    // user2's closest neighbor is user1 (overlap 2 beats user3's 1), so the
    // only recommendation is film2.
    let response = server
        .get(&format!("/users/{}/recommendations", user2))
        .await;
    response.assert_status_ok();
    let recommended: Vec<serde_json::Value> = response.json();
    let ids: Vec<u64> = recommended
        .iter()
        .map(|f| f["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![film2]);
}

#[tokio::test]
async fn test_common_films_ordered_by_popularity() {
    let server = create_test_server();
    let a = create_user(&server, "a").await;
    let b = create_user(&server, "b").await;
    let c = create_user(&server, "c").await;
    let niche = create_film(&server, "niche").await;
    let hit = create_film(&server, "hit").await;

    for film in [niche, hit] {
        server
            .put(&format!("/films/{}/like/{}", film, a))
            .await
            .assert_status_ok();
        server
            .put(&format!("/films/{}/like/{}", film, b))
            .await
            .assert_status_ok();
    }
    server
        .put(&format!("/films/{}/like/{}", hit, c))
        .await
        .assert_status_ok();

    let common: Vec<serde_json::Value> = server
        .get(&format!("/films/common?user_id={}&friend_id={}", a, b))
        .await
        .json();
    let ids: Vec<u64> = common.iter().map(|f| f["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![hit, niche]);
}

#[tokio::test]
async fn test_review_flow_with_vote_exclusivity() {
    let server = create_test_server();
    let author = create_user(&server, "author").await;
    let voter = create_user(&server, "voter").await;
    let film = create_film(&server, "film").await;

    let response = server
        .post("/reviews")
        .json(&json!({
            "author": author,
            "film": film,
            "content": "Worth watching",
            "positive": true
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    let review: serde_json::Value = response.json();
    let review_id = review["id"].as_u64().unwrap();
    assert_eq!(review["usefulness"], 0);

    // A like then a dislike from the same voter must end as one dislike.
    server
        .put(&format!("/reviews/{}/like/{}", review_id, voter))
        .await
        .assert_status_ok();
    server
        .put(&format!("/reviews/{}/dislike/{}", review_id, voter))
        .await
        .assert_status_ok();

    let scored: serde_json::Value = server.get(&format!("/reviews/{}", review_id)).await.json();
    assert_eq!(scored["usefulness"], -1);

    // The like was revoked by the dislike, so withdrawing it is an error.
    let response = server
        .delete(&format!("/reviews/{}/like/{}", review_id, voter))
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);

    server
        .delete(&format!("/reviews/{}/dislike/{}", review_id, voter))
        .await
        .assert_status_ok();
    let scored: serde_json::Value = server.get(&format!("/reviews/{}", review_id)).await.json();
    assert_eq!(scored["usefulness"], 0);
}

#[tokio::test]
async fn test_duplicate_review_is_rejected() {
    let server = create_test_server();
    let author = create_user(&server, "author").await;
    let film = create_film(&server, "film").await;

    let body = json!({
        "author": author,
        "film": film,
        "content": "Once",
        "positive": true
    });
    server
        .post("/reviews")
        .json(&body)
        .await
        .assert_status(axum::http::StatusCode::CREATED);
    let response = server.post("/reviews").json(&body).await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_review() {
    let server = create_test_server();
    let author = create_user(&server, "author").await;
    let film = create_film(&server, "film").await;

    let review: serde_json::Value = server
        .post("/reviews")
        .json(&json!({
            "author": author,
            "film": film,
            "content": "Fine",
            "positive": true
        }))
        .await
        .json();
    let review_id = review["id"].as_u64().unwrap();

    let response = server
        .put("/reviews")
        .json(&json!({
            "review_id": review_id,
            "content": "Changed my mind",
            "positive": false
        }))
        .await;
    response.assert_status_ok();
    let updated: serde_json::Value = response.json();
    assert_eq!(updated["content"], "Changed my mind");
    assert_eq!(updated["positive"], false);
}

#[tokio::test]
async fn test_reviews_listed_by_usefulness() {
    let server = create_test_server();
    let a = create_user(&server, "a").await;
    let b = create_user(&server, "b").await;
    let c = create_user(&server, "c").await;
    let film = create_film(&server, "film").await;

    let mut review_ids = Vec::new();
    for author in [a, b] {
        let response = server
            .post("/reviews")
            .json(&json!({
                "author": author,
                "film": film,
                "content": "review",
                "positive": true
            }))
            .await;
        let review: serde_json::Value = response.json();
        review_ids.push(review["id"].as_u64().unwrap());
    }

    // Upvote the second review so it overtakes the first.
    server
        .put(&format!("/reviews/{}/like/{}", review_ids[1], c))
        .await
        .assert_status_ok();

    let listed: Vec<serde_json::Value> = server
        .get(&format!("/reviews?film_id={}", film))
        .await
        .json();
    let ids: Vec<u64> = listed.iter().map(|r| r["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![review_ids[1], review_ids[0]]);
}

#[tokio::test]
async fn test_feed_records_mutations_in_order() {
    let server = create_test_server();
    let user = create_user(&server, "actor").await;
    let friend = create_user(&server, "friend").await;
    let film = create_film(&server, "film").await;

    server
        .put(&format!("/users/{}/friends/{}", user, friend))
        .await
        .assert_status_ok();
    server
        .put(&format!("/films/{}/like/{}", film, user))
        .await
        .assert_status_ok();
    let review: serde_json::Value = server
        .post("/reviews")
        .json(&json!({
            "author": user,
            "film": film,
            "content": "review",
            "positive": true
        }))
        .await
        .json();
    let review_id = review["id"].as_u64().unwrap();
    server
        .delete(&format!("/users/{}/friends/{}", user, friend))
        .await
        .assert_status_ok();
    server
        .delete(&format!("/films/{}/like/{}", film, user))
        .await
        .assert_status_ok();
    server
        .delete(&format!("/reviews/{}", review_id))
        .await
        .assert_status_ok();

    let feed: Vec<serde_json::Value> = server.get(&format!("/users/{}/feed", user)).await.json();
    let shape: Vec<(String, String)> = feed
        .iter()
        .map(|e| {
            (
                e["kind"].as_str().unwrap().to_string(),
                e["operation"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        shape,
        vec![
            ("friend".to_string(), "add".to_string()),
            ("like".to_string(), "add".to_string()),
            ("review".to_string(), "add".to_string()),
            ("friend".to_string(), "remove".to_string()),
            ("like".to_string(), "remove".to_string()),
            ("review".to_string(), "remove".to_string()),
        ]
    );
    let ids: Vec<u64> = feed.iter().map(|e| e["id"].as_u64().unwrap()).collect();
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
}

#[tokio::test]
async fn test_delete_user_cascades() {
    let server = create_test_server();
    let doomed = create_user(&server, "doomed").await;
    let survivor = create_user(&server, "survivor").await;
    let film = create_film(&server, "film").await;

    server
        .put(&format!("/users/{}/friends/{}", survivor, doomed))
        .await
        .assert_status_ok();
    server
        .put(&format!("/films/{}/like/{}", film, doomed))
        .await
        .assert_status_ok();

    server
        .delete(&format!("/users/{}", doomed))
        .await
        .assert_status_ok();

    // The survivor's friend list no longer contains the deleted user, the
    // film lost its like, and the record itself is gone.
    let friends: Vec<serde_json::Value> = server
        .get(&format!("/users/{}/friends", survivor))
        .await
        .json();
    assert!(friends.is_empty());

    let popular: Vec<serde_json::Value> = server.get("/films/popular?count=1").await.json();
    assert_eq!(popular[0]["id"].as_u64().unwrap(), film);

    server
        .get(&format!("/users/{}", doomed))
        .await
        .assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_popular_films_rejects_non_positive_count() {
    let server = create_test_server();
    let response = server.get("/films/popular?count=0").await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_request_id_header_is_echoed() {
    let server = create_test_server();
    let response = server.get("/health").await;
    assert!(response.headers().contains_key("x-request-id"));
}
