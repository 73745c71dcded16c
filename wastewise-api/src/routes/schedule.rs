/// Collection schedule endpoints
///
/// Any authenticated user may read the schedule. Changing an entry's status
/// requires the collector or admin role.

use crate::{app::AppState, error::ApiResult, middleware::auth::AuthUser};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use wastewise_shared::models::{ScheduleEntry, UpdateScheduleStatus};

pub async fn list_schedule(State(state): State<AppState>) -> Json<Vec<ScheduleEntry>> {
    Json(state.db.list_schedule().await)
}

pub async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ScheduleEntry>> {
    Ok(Json(state.db.find_schedule(&id).await?))
}

/// Sets an entry's status
///
/// ```text
/// PUT /api/schedule/sch-001
/// { "status": "collected" }
/// ```
pub async fn update_schedule(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateScheduleStatus>,
) -> ApiResult<Json<ScheduleEntry>> {
    auth.require(|role| role.can_edit_schedule(), "update the schedule")?;

    let entry = state.db.update_schedule_status(&id, req.status).await?;
    tracing::info!(user_id = %auth.user_id, entry_id = %entry.id, status = %entry.status, "Schedule updated");
    Ok(Json(entry))
}
