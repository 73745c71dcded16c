/// Mock backend for development and tests
///
/// Emulates the REST API entirely in memory. Every call waits an artificial
/// delay, then resolves the path against the route table and runs the
/// matching operation on the shared [`MemoryDb`].
///
/// # Behavior
///
/// - Latency: uniform in `[min_delay_ms, max_delay_ms]` (default 500-1000 ms)
/// - Login: known email + the sentinel password, token `mock-jwt-token`
/// - Mutations are visible to later calls in the same process only
/// - Unknown `(method, path)` pairs fail with `UnhandledRoute`
///
/// # Configuration
///
/// Latency (JSON):
/// ```json
/// {
///   "min_delay_ms": 500,
///   "max_delay_ms": 1000
/// }
/// ```
///
/// # Example
///
/// ```no_run
/// use wastewise_client::backend::{DataAccessExt, MockBackend};
/// use wastewise_shared::models::{AuthResponse, LoginPayload};
///
/// # async fn example() -> Result<(), wastewise_client::error::ClientError> {
/// let backend = MockBackend::seeded();
/// let payload = LoginPayload {
///     email: "alice@example.com".to_string(),
///     password_hash: "password".to_string(),
/// };
///
/// let response: AuthResponse = backend.post_as("/auth/login", &payload).await?;
/// assert_eq!(response.token, "mock-jwt-token");
/// # Ok(())
/// # }
/// ```

use crate::backend::data_access::{DataAccess, QueryParams, SuccessResponse};
use crate::backend::routes::{self, Method, Route, RouteKind};
use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use rand::Rng;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tokio::time::{sleep, Duration};
use wastewise_shared::auth::credentials::MOCK_TOKEN;
use wastewise_shared::db::MemoryDb;
use wastewise_shared::models::{
    AuthResponse, CreateInvoice, CreateUser, LoginPayload, RegisterUser, UpdateInvoice,
    UpdateScheduleStatus, UpdateUser,
};

/// Simulated network latency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyConfig {
    /// Shortest delay in milliseconds
    #[serde(default = "default_min_delay")]
    pub min_delay_ms: u64,

    /// Longest delay in milliseconds
    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,
}

fn default_min_delay() -> u64 {
    500
}

fn default_max_delay() -> u64 {
    1000
}

impl Default for LatencyConfig {
    fn default() -> Self {
        LatencyConfig {
            min_delay_ms: default_min_delay(),
            max_delay_ms: default_max_delay(),
        }
    }
}

impl LatencyConfig {
    pub fn new(min_delay_ms: u64, max_delay_ms: u64) -> Self {
        LatencyConfig {
            min_delay_ms,
            max_delay_ms,
        }
    }

    /// No artificial delay
    pub fn none() -> Self {
        Self::new(0, 0)
    }

    /// Picks a delay for one request
    pub fn sample(&self) -> Duration {
        let millis = if self.max_delay_ms <= self.min_delay_ms {
            self.min_delay_ms
        } else {
            rand::thread_rng().gen_range(self.min_delay_ms..=self.max_delay_ms)
        };
        Duration::from_millis(millis)
    }
}

/// Mock backend implementation
#[derive(Debug, Clone)]
pub struct MockBackend {
    db: MemoryDb,
    latency: LatencyConfig,
}

impl MockBackend {
    /// Creates a mock backend over `db` with default latency
    pub fn new(db: MemoryDb) -> Self {
        MockBackend {
            db,
            latency: LatencyConfig::default(),
        }
    }

    /// Creates a mock backend over the development fixtures
    pub fn seeded() -> Self {
        Self::new(MemoryDb::seeded())
    }

    pub fn with_latency(mut self, latency: LatencyConfig) -> Self {
        self.latency = latency;
        self
    }

    /// The collections behind this backend
    pub fn db(&self) -> &MemoryDb {
        &self.db
    }

    async fn handle(
        &self,
        method: Method,
        path: &str,
        params: Option<&QueryParams>,
        body: Option<JsonValue>,
    ) -> ClientResult<JsonValue> {
        tracing::debug!(backend = "mock", %method, path, "Handling request");

        let delay = self.latency.sample();
        if !delay.is_zero() {
            sleep(delay).await;
        }

        let route = routes::resolve(method, path).ok_or_else(|| {
            tracing::warn!(%method, path, "Mock backend has no route");
            ClientError::UnhandledRoute {
                method,
                path: path.to_string(),
            }
        })?;

        self.dispatch(route, params, body.unwrap_or(JsonValue::Null))
            .await
    }

    async fn dispatch(
        &self,
        route: Route,
        params: Option<&QueryParams>,
        body: JsonValue,
    ) -> ClientResult<JsonValue> {
        let id = route.id();

        match route.kind {
            RouteKind::Login => {
                let payload: LoginPayload = parse_body(body)?;
                let user = self.db.authenticate(&payload).await?;
                tracing::info!(user_id = %user.id, "Mock login succeeded");
                to_json(AuthResponse {
                    user,
                    token: MOCK_TOKEN.to_string(),
                })
            }
            RouteKind::Register => {
                let payload: RegisterUser = parse_body(body)?;
                let user = self.db.register(payload).await?;
                to_json(AuthResponse {
                    user,
                    token: MOCK_TOKEN.to_string(),
                })
            }

            RouteKind::ListUsers => to_json(self.db.list_users().await),
            RouteKind::CreateUser => {
                let payload: CreateUser = parse_body(body)?;
                to_json(self.db.create_user(payload).await?)
            }
            RouteKind::GetUser => to_json(self.db.find_user(id).await?),
            RouteKind::UpdateUser => {
                let payload: UpdateUser = parse_body(body)?;
                to_json(self.db.update_user(id, payload).await?)
            }
            RouteKind::DeleteUser => {
                self.db.delete_user(id).await?;
                to_json(SuccessResponse::ok())
            }

            RouteKind::ListSchedule => to_json(self.db.list_schedule().await),
            RouteKind::GetSchedule => to_json(self.db.find_schedule(id).await?),
            RouteKind::UpdateSchedule => {
                let payload: UpdateScheduleStatus = parse_body(body)?;
                to_json(self.db.update_schedule_status(id, payload.status).await?)
            }

            RouteKind::ListInvoices => {
                let invoice_id = params.and_then(|p| p.get("id"));
                let user_id = params.and_then(|p| p.get("userId"));

                match invoice_id {
                    Some(invoice_id) => to_json(self.db.find_invoice(invoice_id).await?),
                    None => to_json(self.db.list_invoices(user_id.map(String::as_str)).await),
                }
            }
            RouteKind::CreateInvoice => {
                let payload: CreateInvoice = parse_body(body)?;
                to_json(self.db.create_invoice(payload).await?)
            }
            RouteKind::GetInvoice => to_json(self.db.find_invoice(id).await?),
            RouteKind::UpdateInvoice => {
                let payload: UpdateInvoice = parse_body(body)?;
                to_json(self.db.update_invoice(id, payload).await?)
            }
        }
    }
}

fn parse_body<T: DeserializeOwned>(body: JsonValue) -> ClientResult<T> {
    serde_json::from_value(body)
        .map_err(|e| ClientError::bad_request(format!("Invalid request body: {}", e)))
}

fn to_json<T: Serialize>(value: T) -> ClientResult<JsonValue> {
    Ok(serde_json::to_value(value)?)
}

#[async_trait]
impl DataAccess for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn get(&self, path: &str, params: Option<&QueryParams>) -> ClientResult<JsonValue> {
        self.handle(Method::Get, path, params, None).await
    }

    async fn post(&self, path: &str, body: JsonValue) -> ClientResult<JsonValue> {
        self.handle(Method::Post, path, None, Some(body)).await
    }

    async fn put(&self, path: &str, body: JsonValue) -> ClientResult<JsonValue> {
        self.handle(Method::Put, path, None, Some(body)).await
    }

    async fn delete(&self, path: &str, params: Option<&QueryParams>) -> ClientResult<JsonValue> {
        self.handle(Method::Delete, path, params, None).await
    }
}
