/// Client composition
///
/// Builds everything the client needs from a [`ClientConfig`]. The backend
/// is chosen here, once, and never switched afterwards.

use crate::backend::{DataAccess, HttpBackend, MockBackend};
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::services::{InvoiceService, ScheduleService, UserService};
use crate::session::{DurableStorage, FileStorage, LoggingNavigator, Navigator, SessionStore};
use std::sync::Arc;

/// Everything a front end talks to
#[derive(Debug, Clone)]
pub struct ClientContext {
    pub session: Arc<SessionStore>,
    pub schedule: ScheduleService,
    pub invoices: InvoiceService,
    pub users: UserService,
}

/// Selects the backend for `config`
pub fn build_backend(
    config: &ClientConfig,
    storage: Arc<dyn DurableStorage>,
) -> ClientResult<Arc<dyn DataAccess>> {
    if config.use_mock_api {
        tracing::info!(
            min_delay_ms = config.latency.min_delay_ms,
            max_delay_ms = config.latency.max_delay_ms,
            "Using mock backend"
        );
        Ok(Arc::new(MockBackend::seeded().with_latency(config.latency.clone())))
    } else {
        tracing::info!(api_url = %config.api_url, "Using HTTP backend");
        Ok(Arc::new(HttpBackend::new(config.api_url.clone(), storage)?))
    }
}

impl ClientContext {
    /// Composes the client with file storage and a logging navigator
    ///
    /// The persisted session is restored before returning.
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let storage: Arc<dyn DurableStorage> = Arc::new(FileStorage::new(&config.session_file));
        Self::with_parts(config, storage, Arc::new(LoggingNavigator))
    }

    /// Composes the client over caller-provided storage and navigator
    pub fn with_parts(
        config: &ClientConfig,
        storage: Arc<dyn DurableStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> ClientResult<Self> {
        let backend = build_backend(config, storage.clone())?;
        Ok(Self::from_backend(backend, storage, navigator))
    }

    /// Composes the client over an already built backend
    pub fn from_backend(
        backend: Arc<dyn DataAccess>,
        storage: Arc<dyn DurableStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let session = Arc::new(SessionStore::new(backend, storage, navigator));
        session.restore();

        ClientContext {
            schedule: ScheduleService::new(session.clone()),
            invoices: InvoiceService::new(session.clone()),
            users: UserService::new(session.clone()),
            session,
        }
    }
}
