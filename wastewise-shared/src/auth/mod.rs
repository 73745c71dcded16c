/// Authentication utilities
///
/// # Modules
///
/// - [`credentials`]: Development sentinel password and mock token
/// - [`ids`]: Prefixed random id generation
/// - [`jwt`]: JWT token generation and validation for the API server

pub mod credentials;
pub mod ids;
pub mod jwt;
