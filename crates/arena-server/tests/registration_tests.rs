mod common;

use axum::http::{Method, StatusCode};
use common::{solo_registration, spawn_app, squad_registration};
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let app = spawn_app().await;
    let (status, body) = app.get("/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "up");
}

#[tokio::test]
async fn test_tournaments_are_seeded() {
    let app = spawn_app().await;
    let (status, body) = app.get("/api/tournaments", None).await;

    assert_eq!(status, StatusCode::OK);
    let tournaments = body.as_array().unwrap();
    assert_eq!(tournaments.len(), 6);
    assert_eq!(tournaments[0]["gameType"], "bgmi");
    assert_eq!(tournaments[0]["tournamentType"], "solo");
    assert_eq!(tournaments[0]["maxSlots"], 100);
    assert_eq!(tournaments[0]["registeredCount"], 0);
}

#[tokio::test]
async fn test_get_single_tournament() {
    let app = spawn_app().await;

    let (status, body) = app.get("/api/tournaments/freefire/duo", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Free Fire Duo Blitz");

    let (status, body) = app.get("/api/tournaments/valorant/solo", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Tournament not found");
}

#[tokio::test]
async fn test_submit_squad() {
    let app = spawn_app().await;
    let (status, body) = app
        .post("/api/registrations", None, squad_registration(1))
        .await;

    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["status"], "pending");
    assert_eq!(body["phone"], "9812345678");
    assert_eq!(body["teammates"].as_array().unwrap().len(), 3);

    let (_, tournament) = app.get("/api/tournaments/freefire/squad", None).await;
    assert_eq!(tournament["registeredCount"], 1);
}

#[tokio::test]
async fn test_validation_errors_are_400() {
    let app = spawn_app().await;

    let mut missing_team = squad_registration(1);
    missing_team["teamName"] = json!(null);
    let (status, body) = app.post("/api/registrations", None, missing_team).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("teamName"));

    let mut bad_phone = solo_registration(1);
    bad_phone["phone"] = json!("555");
    let (status, _) = app.post("/api/registrations", None, bad_phone).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .post("/api/registrations", None, json!({ "gameType": "bgmi" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    // Nothing reached storage
    let (_, tournaments) = app.get("/api/tournaments", None).await;
    assert!(tournaments
        .as_array()
        .unwrap()
        .iter()
        .all(|t| t["registeredCount"] == 0));
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = spawn_app().await;
    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/registrations")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();

    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_transaction_rejected() {
    let app = spawn_app().await;
    let (status, _) = app.register_solo(1).await;
    assert_eq!(status, StatusCode::CREATED);

    let mut reused = solo_registration(2);
    reused["transactionId"] = solo_registration(1)["transactionId"].clone();
    let (status, body) = app.post("/api/registrations", None, reused).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "This transaction ID has already been used");
}

#[tokio::test]
async fn test_capacity_and_reset() {
    let app = spawn_app().await;

    for n in 1..=100 {
        let (status, body) = app.register_solo(n).await;
        assert_eq!(status, StatusCode::CREATED, "registration {} failed: {}", n, body);
    }

    let (status, body) = app.register_solo(101).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Tournament is full");

    let (_, tournament) = app.get("/api/tournaments/bgmi/solo", None).await;
    assert_eq!(tournament["registeredCount"], 100);

    let token = app.login().await;
    let (status, body) = app
        .post(
            "/api/tournaments/reset",
            Some(&token),
            json!({ "gameType": "bgmi", "tournamentType": "solo" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], 100);
    assert_eq!(body["tournament"]["registeredCount"], 0);

    let (_, tournament) = app.get("/api/tournaments/bgmi/solo", None).await;
    assert_eq!(tournament["registeredCount"], 0);

    let (status, list) = app
        .get(
            "/api/registrations?gameType=bgmi&tournamentType=solo",
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(list.as_array().unwrap().is_empty());

    // Slots are available again
    let (status, _) = app.register_solo(101).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_closed_tournament_rejects_submissions() {
    let app = spawn_app().await;
    let token = app.login().await;

    let (status, body) = app
        .patch(
            "/api/tournaments/bgmi/solo/settings",
            Some(&token),
            json!({ "isActive": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isActive"], false);

    let (status, body) = app.register_solo(1).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Registrations are closed for this tournament");
}

#[tokio::test]
async fn test_count_tracks_creates_and_deletes() {
    let app = spawn_app().await;
    let token = app.login().await;

    let mut ids = Vec::new();
    for n in 1..=6 {
        let (_, body) = app.register_solo(n).await;
        ids.push(body["id"].as_str().unwrap().to_string());
    }
    for id in &ids[..2] {
        let (status, _) = app
            .send(Method::DELETE, &format!("/api/registrations/{}", id), Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
    let (status, _) = app
        .patch(
            &format!("/api/registrations/{}", ids[2]),
            Some(&token),
            json!({ "status": "rejected" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, holding) = app
        .get("/api/registrations?status=pending", Some(&token))
        .await;
    let (_, tournaments) = app.get("/api/tournaments", None).await;
    assert_eq!(holding.as_array().unwrap().len(), 3);
    assert_eq!(tournaments[0]["registeredCount"], 3);
}
