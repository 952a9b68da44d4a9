use arena_server::config::ServerConfig;
use arena_server::storage::Database;
use arena_server::{router, AppState};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "test-password-1";

pub struct TestApp {
    pub router: Router,
    #[allow(dead_code)]
    pub state: AppState,
}

/// Fresh app over a private in-memory database, catalog and admin seeded
pub async fn spawn_app() -> TestApp {
    let config = ServerConfig {
        database_path: ":memory:".to_string(),
        jwt_secret: "integration-secret".to_string(),
        admin_username: ADMIN_USERNAME.to_string(),
        admin_password: ADMIN_PASSWORD.to_string(),
        ..Default::default()
    };

    let db = Database::new(&config.database_path)
        .await
        .expect("Failed to open test database");
    let state = AppState::initialize(&config, db)
        .await
        .expect("Failed to create AppState");

    TestApp {
        router: router(state.clone()),
        state,
    }
}

impl TestApp {
    /// Send a request and decode the JSON body (`Null` for empty bodies)
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response is not JSON")
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    #[allow(dead_code)]
    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, uri, token, Some(body)).await
    }

    /// Log in as the seeded admin and return the bearer token
    pub async fn login(&self) -> String {
        let (status, body) = self
            .post(
                "/api/admin/login",
                None,
                json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["token"].as_str().expect("token missing").to_string()
    }

    /// Submit the `n`th distinct BGMI solo registration
    pub async fn register_solo(&self, n: u32) -> (StatusCode, Value) {
        self.post("/api/registrations", None, solo_registration(n)).await
    }
}

pub fn solo_registration(n: u32) -> Value {
    json!({
        "gameType": "bgmi",
        "tournamentType": "solo",
        "playerName": format!("Player {}", n),
        "gameId": format!("{}", 5_200_000_000u64 + n as u64),
        "phone": "9812345678",
        "transactionId": format!("UTR{:08}", n),
    })
}

#[allow(dead_code)]
pub fn squad_registration(n: u32) -> Value {
    let base = 6_300_000_000u64 + (n as u64) * 10;
    json!({
        "gameType": "freefire",
        "tournamentType": "squad",
        "teamName": format!("Squad {}", n),
        "playerName": "Captain",
        "gameId": format!("{}", base),
        "phone": "+91 9812345678",
        "email": "captain@example.com",
        "teammates": [
            { "name": "Second", "gameId": format!("{}", base + 1) },
            { "name": "Third", "gameId": format!("{}", base + 2) },
            { "name": "Fourth", "gameId": format!("{}", base + 3) },
        ],
        "transactionId": format!("SQD{:08}", n),
        "paymentScreenshotUrl": "https://cdn.example.com/pay.png",
    })
}
