/// Session store
///
/// Single source of truth for who is logged in. The store is built
/// explicitly from its collaborators and owned by the application context;
/// there is no global session.
///
/// # Lifecycle
///
/// 1. [`SessionStore::restore`] once at startup reads the persisted pair
/// 2. [`SessionStore::login`] / [`SessionStore::register`] start a session
/// 3. [`SessionStore::logout`] ends it (safe to call repeatedly)
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use wastewise_client::backend::MockBackend;
/// use wastewise_client::session::{LoggingNavigator, MemoryStorage, SessionStore};
///
/// # async fn example() -> Result<(), wastewise_client::error::ClientError> {
/// let store = SessionStore::new(
///     Arc::new(MockBackend::seeded()),
///     Arc::new(MemoryStorage::new()),
///     Arc::new(LoggingNavigator),
/// );
/// store.restore();
///
/// let auth = store.login("alice@example.com", "password").await?;
/// assert!(store.is_logged_in());
/// println!("Welcome {}", auth.user.full_name());
///
/// store.logout()?;
/// # Ok(())
/// # }
/// ```

use crate::backend::{DataAccess, DataAccessExt};
use crate::error::{ClientError, ClientResult};
use crate::session::navigator::{Destination, Navigator};
use crate::session::storage::{self, DurableStorage};
use std::sync::Arc;
use tokio::sync::watch;
use wastewise_shared::models::{AuthResponse, LoginPayload, RegisterUser, User};

/// Client-side session state
pub struct SessionStore {
    backend: Arc<dyn DataAccess>,
    storage: Arc<dyn DurableStorage>,
    navigator: Arc<dyn Navigator>,
    current: watch::Sender<Option<User>>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("backend", &self.backend.name())
            .field("current_user", &*self.current.borrow())
            .finish()
    }
}

impl SessionStore {
    /// Creates a logged-out store
    ///
    /// Call [`restore`](Self::restore) to pick up a persisted session.
    pub fn new(
        backend: Arc<dyn DataAccess>,
        storage: Arc<dyn DurableStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (current, _) = watch::channel(None);
        SessionStore {
            backend,
            storage,
            navigator,
            current,
        }
    }

    /// Backend used for session calls
    pub fn backend(&self) -> &Arc<dyn DataAccess> {
        &self.backend
    }

    /// Restores the persisted session, if any
    ///
    /// Does not navigate on success. Incomplete or unreadable data is logged
    /// and cleared with a full logout; nothing is returned to the caller.
    pub fn restore(&self) {
        match storage::read_session(self.storage.as_ref()) {
            Ok(Some((user, _token))) => {
                tracing::info!(user_id = %user.id, "Session restored");
                self.current.send_replace(Some(user));
            }
            Ok(None) => {
                self.current.send_replace(None);
            }
            Err(ClientError::CorruptedSession(reason)) => {
                tracing::warn!(%reason, "Stored session is corrupted, logging out");
                if let Err(e) = self.logout() {
                    tracing::error!(error = %e, "Failed to clear corrupted session");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not read stored session");
                self.current.send_replace(None);
            }
        }
    }

    /// The logged-in user
    pub fn current_user(&self) -> Option<User> {
        self.current.borrow().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.borrow().is_some()
    }

    /// Receives every change of the current user
    pub fn subscribe(&self) -> watch::Receiver<Option<User>> {
        self.current.subscribe()
    }

    /// Logs in with email and password hash
    ///
    /// On failure the session is left exactly as it was.
    pub async fn login(&self, email: &str, password_hash: &str) -> ClientResult<AuthResponse> {
        let payload = LoginPayload {
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        };

        let response: AuthResponse = self.backend.post_as("/auth/login", &payload).await?;
        self.start(&response)?;

        tracing::info!(user_id = %response.user.id, role = %response.user.role, "Logged in");
        Ok(response)
    }

    /// Registers a new account and logs it in
    ///
    /// Fails with `Conflict` when the email is taken.
    pub async fn register(&self, data: &RegisterUser) -> ClientResult<AuthResponse> {
        let response: AuthResponse = self.backend.post_as("/auth/register", data).await?;
        self.start(&response)?;

        tracing::info!(user_id = %response.user.id, "Registered");
        Ok(response)
    }

    fn start(&self, response: &AuthResponse) -> ClientResult<()> {
        storage::write_session(self.storage.as_ref(), &response.user, &response.token)?;
        self.current.send_replace(Some(response.user.clone()));
        self.navigator.navigate(Destination::Dashboard);
        Ok(())
    }

    /// Ends the session
    ///
    /// Clears the user, the stored pair and navigates to the login page,
    /// whether or not anyone was logged in. A storage failure is returned
    /// after the in-memory state has already been cleared.
    pub fn logout(&self) -> ClientResult<()> {
        let previous = self.current.send_replace(None);
        let cleared = storage::clear_session(self.storage.as_ref());
        self.navigator.navigate(Destination::Login);

        if let Some(user) = previous {
            tracing::info!(user_id = %user.id, "Logged out");
        }
        cleared
    }

    /// Persisted token, read straight from storage
    pub fn get_token(&self) -> ClientResult<Option<String>> {
        storage::read_token(self.storage.as_ref())
    }

    /// The logged-in user, or `Unauthorized`
    pub fn require_user(&self) -> ClientResult<User> {
        self.current_user()
            .ok_or_else(|| ClientError::Unauthorized("Not logged in".to_string()))
    }
}
