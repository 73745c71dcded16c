/// Middleware modules for the API server
///
/// - `auth`: bearer token authentication and role checks

pub mod auth;
