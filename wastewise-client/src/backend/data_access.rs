/// Core data-access trait
///
/// This module defines the contract shared by every backend: four
/// operations over JSON values, each producing exactly one result.
///
/// # Contract
///
/// | Operation | Input | Output |
/// |---|---|---|
/// | `get` | path, optional query params | value of the requested shape |
/// | `post` | path, body | created or affected entity |
/// | `put` | path, body | updated entity |
/// | `delete` | path, optional query params | `{"success": true}` |
///
/// Implementations must map failures onto the shared [`ClientError`]
/// variants (`InvalidCredentials`, `Conflict`, `NotFound`, ...) so callers
/// behave identically whichever backend was composed in.
///
/// # Example
///
/// ```no_run
/// use wastewise_client::backend::{DataAccess, DataAccessExt, MockBackend};
/// use wastewise_shared::models::ScheduleEntry;
///
/// # async fn example() -> Result<(), wastewise_client::error::ClientError> {
/// let backend = MockBackend::seeded();
/// let entries: Vec<ScheduleEntry> = backend.get_as("/schedule", None).await?;
/// println!("{} entries", entries.len());
/// # Ok(())
/// # }
/// ```

use crate::error::ClientResult;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Query parameters for `get` and `delete`
pub type QueryParams = BTreeMap<String, String>;

/// Core data-access trait
///
/// Object safe, so backends are held as `Arc<dyn DataAccess>` and chosen
/// once at composition time.
#[async_trait]
pub trait DataAccess: Send + Sync {
    /// Returns the backend name
    ///
    /// Used for logging.
    fn name(&self) -> &str;

    /// Reads a resource
    async fn get(&self, path: &str, params: Option<&QueryParams>) -> ClientResult<JsonValue>;

    /// Creates a resource or performs an action
    async fn post(&self, path: &str, body: JsonValue) -> ClientResult<JsonValue>;

    /// Updates a resource
    async fn put(&self, path: &str, body: JsonValue) -> ClientResult<JsonValue>;

    /// Removes a resource
    async fn delete(&self, path: &str, params: Option<&QueryParams>) -> ClientResult<JsonValue>;
}

/// Typed helpers over [`DataAccess`]
///
/// Serializes request bodies and deserializes results. Implemented for every
/// `DataAccess`, including `dyn DataAccess`.
#[async_trait]
pub trait DataAccessExt: DataAccess {
    async fn get_as<T>(&self, path: &str, params: Option<&QueryParams>) -> ClientResult<T>
    where
        T: DeserializeOwned + Send,
    {
        let value = self.get(path, params).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn post_as<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Send,
    {
        let body = serde_json::to_value(body)?;
        let value = self.post(path, body).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn put_as<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Send,
    {
        let body = serde_json::to_value(body)?;
        let value = self.put(path, body).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn delete_as<T>(&self, path: &str, params: Option<&QueryParams>) -> ClientResult<T>
    where
        T: DeserializeOwned + Send,
    {
        let value = self.delete(path, params).await?;
        Ok(serde_json::from_value(value)?)
    }
}

impl<D: DataAccess + ?Sized> DataAccessExt for D {}

/// Body returned by deletes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
