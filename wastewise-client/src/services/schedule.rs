/// Collection schedule service

use crate::backend::DataAccessExt;
use crate::error::ClientResult;
use crate::services::require_role;
use crate::session::SessionStore;
use std::sync::Arc;
use wastewise_shared::models::{ScheduleEntry, ScheduleStatus, UpdateScheduleStatus};

#[derive(Debug, Clone)]
pub struct ScheduleService {
    session: Arc<SessionStore>,
}

impl ScheduleService {
    pub fn new(session: Arc<SessionStore>) -> Self {
        ScheduleService { session }
    }

    pub async fn list(&self) -> ClientResult<Vec<ScheduleEntry>> {
        self.session.require_user()?;
        self.session.backend().get_as("/schedule", None).await
    }

    pub async fn get(&self, id: &str) -> ClientResult<ScheduleEntry> {
        self.session.require_user()?;
        self.session
            .backend()
            .get_as(&format!("/schedule/{}", id), None)
            .await
    }

    /// Changes the status of one entry
    ///
    /// Only collectors and admins may do this.
    pub async fn update_status(&self, id: &str, status: ScheduleStatus) -> ClientResult<ScheduleEntry> {
        let user = require_role(&self.session, |role| role.can_edit_schedule(), "update the schedule")?;

        let entry: ScheduleEntry = self
            .session
            .backend()
            .put_as(&format!("/schedule/{}", id), &UpdateScheduleStatus { status })
            .await?;

        tracing::info!(user_id = %user.id, entry_id = %entry.id, %status, "Schedule entry updated");
        Ok(entry)
    }
}
