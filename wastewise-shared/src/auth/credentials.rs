/// Development credentials
///
/// Every account accepts the same sentinel password and the mock backend
/// always returns the same token. These are stand-ins for real credential
/// verification and must not be used outside development and tests.

/// Password accepted for every known account
pub const MOCK_PASSWORD: &str = "password";

/// Token returned by the mock backend on login and registration
pub const MOCK_TOKEN: &str = "mock-jwt-token";

/// Checks a submitted password hash against the sentinel
pub fn verify_mock_password(password_hash: &str) -> bool {
    password_hash == MOCK_PASSWORD
}
