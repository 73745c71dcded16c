/// User administration endpoints (admin only)
///
/// - `GET /api/users` - List users
/// - `POST /api/users` - Create a user
/// - `GET /api/users/:id` - Get a user
/// - `PUT /api/users/:id` - Update a user (role is immutable)
/// - `DELETE /api/users/:id` - Delete a user, answers `{"success": true}`

use crate::{app::AppState, error::ApiResult, middleware::auth::AuthUser};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::{json, Value as JsonValue};
use wastewise_shared::models::{CreateUser, UpdateUser, User};

pub async fn list_users(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Json<Vec<User>>> {
    auth.require_admin("list users")?;
    Ok(Json(state.db.list_users().await))
}

pub async fn create_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateUser>,
) -> ApiResult<Json<User>> {
    auth.require_admin("create users")?;
    let user = state.db.create_user(req).await?;

    tracing::info!(admin_id = %auth.user_id, user_id = %user.id, "User created");
    Ok(Json(user))
}

pub async fn get_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<User>> {
    auth.require_admin("view users")?;
    Ok(Json(state.db.find_user(&id).await?))
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateUser>,
) -> ApiResult<Json<User>> {
    auth.require_admin("update users")?;
    Ok(Json(state.db.update_user(&id, req).await?))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<JsonValue>> {
    auth.require_admin("delete users")?;
    state.db.delete_user(&id).await?;

    tracing::info!(admin_id = %auth.user_id, user_id = %id, "User deleted");
    Ok(Json(json!({ "success": true })))
}
