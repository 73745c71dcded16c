/// Integration tests for the WasteWise API
///
/// These tests drive the full router in-process:
/// - Authentication (login, registration, bearer checks)
/// - Role enforcement on users, schedule and invoices
/// - Error body shape and status codes

mod common;

use axum::http::StatusCode;
use common::{TestContext, ADMIN_ID, RESIDENT_ID};
use serde_json::json;
use wastewise_shared::auth::jwt::{create_token, validate_token, Claims};
use wastewise_shared::models::Role;

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new();

    let (status, body) = ctx.send("GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_login_issues_valid_token() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "alice@example.com", "passwordHash": "password" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], RESIDENT_ID);

    let token = body["token"].as_str().unwrap();
    let claims = validate_token(token, common::TEST_SECRET).unwrap();
    assert_eq!(claims.sub, RESIDENT_ID);
    assert_eq!(claims.role, Role::Resident);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "alice@example.com", "passwordHash": "wrong" })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn test_register_and_duplicate() {
    let ctx = TestContext::new();
    let payload = json!({
        "firstName": "Dana",
        "lastName": "Lee",
        "email": "dana@example.com",
        "password": "secret1"
    });

    let (status, body) = ctx
        .send("POST", "/api/auth/register", None, Some(payload.clone()))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "resident");

    let (status, body) = ctx.send("POST", "/api/auth/register", None, Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn test_register_rejects_privileged_role() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .send(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "firstName": "Eve",
                "lastName": "Mallory",
                "email": "eve@example.com",
                "password": "secret1",
                "role": "admin"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");
    assert!(body["token"].is_null());
    assert_eq!(ctx.db.list_users().await.len(), 3);

    // Admins still create privileged accounts through /users
    let (status, created) = ctx
        .send(
            "POST",
            "/api/users",
            Some(&ctx.admin_token()),
            Some(json!({
                "firstName": "Eve",
                "lastName": "Mallory",
                "email": "eve@example.com",
                "role": "collector",
                "passwordHash": "secret1"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["role"], "collector");
}

#[tokio::test]
async fn test_login_requires_exact_email() {
    let ctx = TestContext::new();

    let (status, _) = ctx
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "ALICE@EXAMPLE.COM", "passwordHash": "password" })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_validation_details() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .send(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "firstName": "Dana",
                "lastName": "Lee",
                "email": "nope",
                "password": "123"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "email");
    assert_eq!(body["details"][1]["field"], "password");
}

#[tokio::test]
async fn test_protected_routes_need_token() {
    let ctx = TestContext::new();

    let (status, _) = ctx.send("GET", "/api/schedule", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = ctx.send("GET", "/api/schedule", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let expired = create_token(
        &Claims::with_expiration(RESIDENT_ID, Role::Resident, chrono::Duration::hours(-1)),
        common::TEST_SECRET,
    )
    .unwrap();
    let (status, _) = ctx.send("GET", "/api/schedule", Some(&expired), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_user() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .send("GET", "/api/auth/user", Some(&ctx.admin_token()), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], ADMIN_ID);
    assert_eq!(body["role"], "admin");
}

#[tokio::test]
async fn test_deleted_user_token_is_rejected() {
    let ctx = TestContext::new();
    let token = ctx.collector_token();

    let (status, body) = ctx
        .send("DELETE", "/api/users/usr-002", Some(&ctx.admin_token()), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, _) = ctx.send("GET", "/api/schedule", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_users_are_admin_only() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .send("GET", "/api/users", Some(&ctx.resident_token()), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");

    let (status, body) = ctx
        .send("GET", "/api/users", Some(&ctx.admin_token()), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, _) = ctx
        .send("GET", "/api/users/usr-999", Some(&ctx.admin_token()), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_schedule_update_roles() {
    let ctx = TestContext::new();
    let body = json!({ "status": "collected" });

    let (status, _) = ctx
        .send("PUT", "/api/schedule/sch-001", Some(&ctx.resident_token()), Some(body.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, entry) = ctx
        .send("PUT", "/api/schedule/sch-001", Some(&ctx.collector_token()), Some(body))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entry["status"], "collected");

    let stored = ctx.db.find_schedule("sch-001").await.unwrap();
    assert_eq!(stored.status.as_str(), "collected");
}

#[tokio::test]
async fn test_resident_only_sees_own_invoices() {
    let ctx = TestContext::new();

    let (status, created) = ctx
        .send(
            "POST",
            "/api/invoices",
            Some(&ctx.admin_token()),
            Some(json!({
                "userId": "usr-002",
                "dueDate": "2023-12-01",
                "amount": 12.5,
                "services": ["Bulk Pickup"]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["status"], "pending");
    let other_id = created["id"].as_str().unwrap().to_string();

    let (status, list) = ctx
        .send("GET", "/api/invoices", Some(&ctx.resident_token()), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 2);

    let (status, _) = ctx
        .send("GET", "/api/invoices?userId=usr-002", Some(&ctx.resident_token()), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = ctx
        .send("GET", &format!("/api/invoices/{}", other_id), Some(&ctx.resident_token()), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, single) = ctx
        .send("GET", "/api/invoices?id=inv-002", Some(&ctx.resident_token()), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(single["id"], "inv-002");

    let (status, all) = ctx
        .send("GET", "/api/invoices", Some(&ctx.collector_token()), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_resident_pays_own_invoice() {
    let ctx = TestContext::new();

    let (status, _) = ctx
        .send(
            "PUT",
            "/api/invoices/inv-001",
            Some(&ctx.resident_token()),
            Some(json!({ "status": "overdue" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, paid) = ctx
        .send(
            "PUT",
            "/api/invoices/inv-001",
            Some(&ctx.resident_token()),
            Some(json!({ "status": "paid", "paymentDate": "2023-10-01" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paid["status"], "paid");
    assert_eq!(paid["paymentDate"], "2023-10-01");
}

#[tokio::test]
async fn test_invalid_transition_code() {
    let ctx = TestContext::new();

    let (status, body) = ctx
        .send(
            "PUT",
            "/api/invoices/inv-002",
            Some(&ctx.admin_token()),
            Some(json!({ "status": "pending" })),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "invalid_transition");
}
