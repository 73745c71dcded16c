/// Bearer token authentication
///
/// [`jwt_auth_layer`] validates the `Authorization: Bearer <token>` header,
/// checks that the user still exists and injects an [`AuthUser`] into the
/// request extensions. Handlers pick it up with `Extension<AuthUser>`.
///
/// # Example
///
/// ```text
/// GET /api/schedule
/// Authorization: Bearer eyJ...
/// ```

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use wastewise_shared::auth::jwt;
use wastewise_shared::db::DbError;
use wastewise_shared::models::Role;

/// The authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
    pub role: Role,
}

impl AuthUser {
    /// Fails with 403 unless `allowed` holds for the caller's role
    pub fn require(&self, allowed: impl Fn(&Role) -> bool, action: &str) -> ApiResult<()> {
        if allowed(&self.role) {
            Ok(())
        } else {
            tracing::debug!(user_id = %self.user_id, role = %self.role, action, "Permission denied");
            Err(ApiError::Forbidden(format!("Role {} may not {}", self.role, action)))
        }
    }

    pub fn require_admin(&self, action: &str) -> ApiResult<()> {
        self.require(|role| role.is_admin(), action)
    }
}

/// JWT authentication middleware layer
pub async fn jwt_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Expected Bearer token".to_string()))?;

    let claims = jwt::validate_token(token, state.jwt_secret())?;

    // Tokens of deleted users stop working immediately
    let user = state.db.find_user(&claims.sub).await.map_err(|e| match e {
        DbError::NotFound { .. } => ApiError::Unauthorized("User no longer exists".to_string()),
        other => other.into(),
    })?;

    req.extensions_mut().insert(AuthUser {
        user_id: user.id,
        role: user.role,
    });

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> AuthUser {
        AuthUser {
            user_id: "usr-001".to_string(),
            role,
        }
    }

    #[test]
    fn test_require_admin() {
        assert!(user(Role::Admin).require_admin("list users").is_ok());
        assert!(matches!(
            user(Role::Collector).require_admin("list users"),
            Err(ApiError::Forbidden(_))
        ));
    }

    #[test]
    fn test_require_schedule_editor() {
        let editor = |role: &Role| role.can_edit_schedule();
        assert!(user(Role::Collector).require(editor, "update the schedule").is_ok());
        assert!(user(Role::Resident).require(editor, "update the schedule").is_err());
    }
}
