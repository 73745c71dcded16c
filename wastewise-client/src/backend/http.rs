/// HTTP backend
///
/// Talks to the real REST API. Paths are appended to the configured base
/// URL and the stored session token, when present, is sent as a bearer
/// token. Error responses are mapped onto the same [`ClientError`] variants
/// the mock backend produces:
///
/// | Status | Error |
/// |---|---|
/// | 401 on `/auth/login` | `InvalidCredentials` |
/// | 401 | `Unauthorized` |
/// | 403 | `Forbidden` |
/// | 404 | `NotFound` |
/// | 409 | `Conflict`, or `InvalidTransition` for code `invalid_transition` |
/// | 400, 422 | `BadRequest` |
/// | other | `Server` |
///
/// Connection failures become `Transport`.

use crate::backend::data_access::{DataAccess, QueryParams};
use crate::backend::routes::Method;
use crate::error::{ClientError, ClientResult};
use crate::session::storage::{read_token, DurableStorage};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use std::time::Duration;
use wastewise_shared::validation::FieldError;

const LOGIN_PATH: &str = "/auth/login";
const INVALID_TRANSITION_CODE: &str = "invalid_transition";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Error body produced by the API server
#[derive(Debug, Deserialize)]
struct ErrorBody {
    /// Machine-readable code, e.g. `not_found`
    #[serde(default)]
    error: String,

    #[serde(default)]
    message: String,

    #[serde(default)]
    details: Option<Vec<FieldError>>,
}

/// REST API backend
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    storage: Arc<dyn DurableStorage>,
}

impl std::fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBackend")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HttpBackend {
    /// Creates a backend for `base_url`, e.g. `http://localhost:8080/api`
    pub fn new(base_url: impl Into<String>, storage: Arc<dyn DurableStorage>) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(HttpBackend {
            client,
            base_url,
            storage,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        params: Option<&QueryParams>,
        body: Option<JsonValue>,
    ) -> ClientResult<JsonValue> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(backend = "http", %method, %url, "Sending request");

        let mut request = self.client.request(method.into(), &url);
        if let Some(params) = params {
            request = request.query(params);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }
        if let Some(token) = read_token(self.storage.as_ref())? {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            if bytes.is_empty() {
                return Ok(JsonValue::Null);
            }
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let error = serde_json::from_slice::<ErrorBody>(&bytes).unwrap_or(ErrorBody {
            error: String::new(),
            message: String::from_utf8_lossy(&bytes).into_owned(),
            details: None,
        });
        tracing::debug!(status = status.as_u16(), message = %error.message, "Request failed");

        Err(map_status(status, path, error))
    }
}

fn map_status(status: StatusCode, path: &str, error: ErrorBody) -> ClientError {
    let ErrorBody {
        error: code,
        message,
        details,
    } = error;

    match status {
        StatusCode::UNAUTHORIZED if path == LOGIN_PATH => ClientError::InvalidCredentials,
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
        StatusCode::FORBIDDEN => ClientError::Forbidden(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::CONFLICT if code == INVALID_TRANSITION_CODE => {
            ClientError::InvalidTransition(message)
        }
        StatusCode::CONFLICT => ClientError::Conflict(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ClientError::BadRequest {
            message,
            details: details.unwrap_or_default(),
        },
        other => ClientError::Server {
            status: other.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl DataAccess for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn get(&self, path: &str, params: Option<&QueryParams>) -> ClientResult<JsonValue> {
        self.send(Method::Get, path, params, None).await
    }

    async fn post(&self, path: &str, body: JsonValue) -> ClientResult<JsonValue> {
        self.send(Method::Post, path, None, Some(body)).await
    }

    async fn put(&self, path: &str, body: JsonValue) -> ClientResult<JsonValue> {
        self.send(Method::Put, path, None, Some(body)).await
    }

    async fn delete(&self, path: &str, params: Option<&QueryParams>) -> ClientResult<JsonValue> {
        self.send(Method::Delete, path, params, None).await
    }
}
