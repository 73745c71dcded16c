//! User administration service
//!
//! Every operation requires an admin session.

use crate::backend::{DataAccessExt, SuccessResponse};
use crate::error::ClientResult;
use crate::services::require_role;
use crate::session::SessionStore;
use std::sync::Arc;
use wastewise_shared::models::{CreateUser, UpdateUser, User};

#[derive(Debug, Clone)]
pub struct UserService {
    session: Arc<SessionStore>,
}

impl UserService {
    pub fn new(session: Arc<SessionStore>) -> Self {
        UserService { session }
    }

    fn require_admin(&self, action: &str) -> ClientResult<User> {
        require_role(&self.session, |role| role.is_admin(), action)
    }

    pub async fn list(&self) -> ClientResult<Vec<User>> {
        self.require_admin("list users")?;
        self.session.backend().get_as("/users", None).await
    }

    pub async fn get(&self, id: &str) -> ClientResult<User> {
        self.require_admin("view users")?;
        self.session
            .backend()
            .get_as(&format!("/users/{}", id), None)
            .await
    }

    pub async fn create(&self, data: &CreateUser) -> ClientResult<User> {
        self.require_admin("create users")?;
        let user: User = self.session.backend().post_as("/users", data).await?;
        tracing::info!(user_id = %user.id, role = %user.role, "User created");
        Ok(user)
    }

    /// Applies a partial update; the role cannot be changed
    pub async fn update(&self, id: &str, data: &UpdateUser) -> ClientResult<User> {
        self.require_admin("update users")?;
        self.session
            .backend()
            .put_as(&format!("/users/{}", id), data)
            .await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        let admin = self.require_admin("delete users")?;
        let _: SuccessResponse = self
            .session
            .backend()
            .delete_as(&format!("/users/{}", id), None)
            .await?;

        tracing::info!(admin_id = %admin.id, user_id = id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{LatencyConfig, MockBackend};
    use crate::error::ClientError;
    use crate::session::{LoggingNavigator, MemoryStorage};
    use wastewise_shared::models::Role;

    fn service() -> (UserService, Arc<SessionStore>) {
        let backend = MockBackend::seeded().with_latency(LatencyConfig::none());
        let session = Arc::new(SessionStore::new(
            Arc::new(backend),
            Arc::new(MemoryStorage::new()),
            Arc::new(LoggingNavigator),
        ));
        (UserService::new(session.clone()), session)
    }

    #[tokio::test]
    async fn test_collector_is_forbidden() {
        let (service, session) = service();
        session.login("bob@example.com", "password").await.unwrap();

        assert!(matches!(service.list().await, Err(ClientError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_admin_manages_users() {
        let (service, session) = service();
        session.login("admin@example.com", "password").await.unwrap();

        let created = service
            .create(&CreateUser {
                first_name: "Dana".to_string(),
                last_name: "Lee".to_string(),
                email: "dana@example.com".to_string(),
                role: Role::Collector,
                password_hash: "secret1".to_string(),
                address: None,
                household_id: None,
            })
            .await
            .unwrap();
        assert!(created.id.starts_with("usr-"));

        let update = UpdateUser {
            last_name: Some("Park".to_string()),
            ..UpdateUser::default()
        };
        let updated = service.update(&created.id, &update).await.unwrap();
        assert_eq!(updated.full_name(), "Dana Park");
        assert_eq!(updated.role, Role::Collector);

        service.delete(&created.id).await.unwrap();
        assert!(matches!(service.get(&created.id).await, Err(ClientError::NotFound(_))));
        assert!(matches!(service.delete(&created.id).await, Err(ClientError::NotFound(_))));
    }
}
