//! Common test utilities for integration tests
//!
//! - A router over a freshly seeded database
//! - Bearer tokens for each seeded role
//! - Request and response helpers

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value as JsonValue;
use tower::ServiceExt;
use wastewise_api::app::{build_router, AppState};
use wastewise_api::config::{ApiConfig, Config, JwtConfig};
use wastewise_shared::auth::jwt::{create_token, Claims};
use wastewise_shared::db::MemoryDb;
use wastewise_shared::models::Role;

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-bytes-long";

pub const RESIDENT_ID: &str = "usr-001";
pub const COLLECTOR_ID: &str = "usr-002";
pub const ADMIN_ID: &str = "usr-003";

pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
        },
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
        },
    }
}

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: MemoryDb,
    pub app: Router,
}

impl TestContext {
    pub fn new() -> Self {
        let db = MemoryDb::seeded();
        let app = build_router(AppState::new(db.clone(), test_config()));
        Self { db, app }
    }

    pub fn token_for(&self, user_id: &str, role: Role) -> String {
        create_token(&Claims::new(user_id, role), TEST_SECRET).unwrap()
    }

    pub fn resident_token(&self) -> String {
        self.token_for(RESIDENT_ID, Role::Resident)
    }

    pub fn collector_token(&self) -> String {
        self.token_for(COLLECTOR_ID, Role::Collector)
    }

    pub fn admin_token(&self) -> String {
        self.token_for(ADMIN_ID, Role::Admin)
    }

    /// Sends a request and returns status plus JSON body (`Null` if empty)
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<JsonValue>,
    ) -> (StatusCode, JsonValue) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let json = if bytes.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                JsonValue::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, json)
    }
}
