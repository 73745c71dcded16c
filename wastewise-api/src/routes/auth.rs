/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /api/auth/login` - Login and get a token
/// - `POST /api/auth/register` - Register a new account and get a token
/// - `GET /api/auth/user` - The user named by the bearer token
///
/// Login and registration answer with the same body:
///
/// ```json
/// {
///   "user": { "id": "usr-001", "firstName": "Alice", ... },
///   "token": "eyJ..."
/// }
/// ```

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    middleware::auth::AuthUser,
};
use axum::{extract::State, Extension, Json};
use wastewise_shared::{
    auth::jwt,
    models::{AuthResponse, LoginPayload, RegisterUser, Role, User},
};

fn issue(state: &AppState, user: User) -> ApiResult<Json<AuthResponse>> {
    let claims = jwt::Claims::new(user.id.clone(), user.role);
    let token = jwt::create_token(&claims, state.jwt_secret())?;
    Ok(Json(AuthResponse { user, token }))
}

/// Login endpoint
///
/// ```text
/// POST /api/auth/login
/// Content-Type: application/json
///
/// {
///   "email": "alice@example.com",
///   "passwordHash": "password"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown email or wrong password
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginPayload>,
) -> ApiResult<Json<AuthResponse>> {
    let user = state.db.authenticate(&req).await.map_err(|e| {
        tracing::debug!(email = %req.email, "Login rejected");
        e
    })?;

    tracing::info!(user_id = %user.id, "User logged in");
    issue(&state, user)
}

/// Register a new account
///
/// ```text
/// POST /api/auth/register
/// Content-Type: application/json
///
/// {
///   "firstName": "Dana",
///   "lastName": "Lee",
///   "email": "dana@example.com",
///   "password": "secret1"
/// }
/// ```
///
/// # Errors
///
/// - `409 Conflict`: Email already exists
/// - `403 Forbidden`: A role other than `resident` was requested; privileged
///   accounts are created by an admin through `POST /api/users`
/// - `422 Unprocessable Entity`: Validation failed
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterUser>,
) -> ApiResult<Json<AuthResponse>> {
    if req.role != Role::Resident {
        tracing::warn!(email = %req.email, role = %req.role, "Self-registration with privileged role rejected");
        return Err(ApiError::Forbidden(
            "Self-registration is limited to residents".to_string(),
        ));
    }

    let user = state.db.register(req).await?;

    tracing::info!(user_id = %user.id, role = %user.role, "User registered");
    issue(&state, user)
}

/// Returns the authenticated user
pub async fn current_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.db.find_user(&auth.user_id).await?))
}
