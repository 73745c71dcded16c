/// Data-access backends
///
/// Two interchangeable implementations of [`DataAccess`]:
/// - [`MockBackend`]: in-memory simulation with artificial latency
/// - [`HttpBackend`]: real REST API over HTTP
///
/// The backend is chosen once when the client is composed (see
/// [`crate::app::build_backend`]) and shared as `Arc<dyn DataAccess>`.

pub mod data_access;
pub mod http;
pub mod mock;
pub mod routes;

pub use data_access::{DataAccess, DataAccessExt, QueryParams, SuccessResponse};
pub use http::HttpBackend;
pub use mock::{LatencyConfig, MockBackend};
