/// Client error type
///
/// Every data-access call, session operation and service call returns
/// `ClientResult<T>`. Both backends produce the same variants for the same
/// situations, so callers never need to know which backend is active.
///
/// None of these errors is fatal. Callers show [`ClientError::user_message`]
/// and keep going; nothing is retried automatically.
///
/// # Example
///
/// ```
/// use wastewise_client::error::ClientError;
///
/// let err = ClientError::InvalidCredentials;
/// assert_eq!(err.user_message(), "Invalid credentials. Please try again.");
/// ```

use crate::backend::routes::Method;
use crate::session::storage::StorageError;
use wastewise_shared::db::DbError;
use wastewise_shared::validation::FieldError;

/// Client result type alias
pub type ClientResult<T> = Result<T, ClientError>;

/// Unified client error type
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Unknown email or wrong password on login
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Duplicate record, e.g. registering an email that already exists
    #[error("Conflict: {0}")]
    Conflict(String),

    /// No entity with the requested id
    #[error("Not found: {0}")]
    NotFound(String),

    /// The mock backend has no route for this method and path
    #[error("Unhandled route: {method} {path}")]
    UnhandledRoute { method: Method, path: String },

    /// Request body or parameters failed validation
    #[error("Bad request: {message}")]
    BadRequest {
        message: String,
        details: Vec<FieldError>,
    },

    /// Forbidden invoice status change
    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),

    /// Attempted to pay an invoice that is already paid
    #[error("Invoice {0} has already been paid")]
    AlreadyPaid(String),

    /// No session, or the backend rejected the token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Logged-in user lacks the required role
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Network or connection failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response or payload could not be (de)serialized
    #[error("Failed to decode payload: {0}")]
    Decode(String),

    /// Unexpected server response
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Durable storage failure
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Stored session data could not be read back
    ///
    /// Handled inside the session store by logging out; never shown.
    #[error("Corrupted session: {0}")]
    CorruptedSession(String),
}

impl ClientError {
    /// Builds a `BadRequest` without field details
    pub fn bad_request(message: impl Into<String>) -> Self {
        ClientError::BadRequest {
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Generic, human-readable text for display next to the failed action
    pub fn user_message(&self) -> &'static str {
        match self {
            ClientError::InvalidCredentials => "Invalid credentials. Please try again.",
            ClientError::Conflict(_) => "User with this email already exists.",
            ClientError::NotFound(_) => "The requested item could not be found.",
            ClientError::BadRequest { .. } => "Please fill in all required fields correctly.",
            ClientError::InvalidTransition(_) => "This change is not allowed for the current status.",
            ClientError::AlreadyPaid(_) => "This invoice has already been paid.",
            ClientError::Unauthorized(_) => "Please log in to continue.",
            ClientError::Forbidden(_) => "You do not have permission to perform this action.",
            ClientError::UnhandledRoute { .. }
            | ClientError::Transport(_)
            | ClientError::Decode(_)
            | ClientError::Server { .. }
            | ClientError::Storage(_)
            | ClientError::CorruptedSession(_) => {
                "An unexpected error occurred. Please try again later."
            }
        }
    }
}

impl From<DbError> for ClientError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::InvalidCredentials => ClientError::InvalidCredentials,
            DbError::Conflict(msg) => ClientError::Conflict(msg),
            DbError::NotFound { .. } => ClientError::NotFound(err.to_string()),
            DbError::InvalidTransition(t) => ClientError::InvalidTransition(t.to_string()),
            DbError::Validation(details) => ClientError::BadRequest {
                message: "Request validation failed".to_string(),
                details,
            },
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClientError::UnhandledRoute {
            method: Method::Get,
            path: "/reports".to_string(),
        };
        assert_eq!(err.to_string(), "Unhandled route: GET /reports");

        let err = ClientError::AlreadyPaid("inv-002".to_string());
        assert_eq!(err.to_string(), "Invoice inv-002 has already been paid");
    }

    #[test]
    fn test_from_db_error() {
        assert!(matches!(
            ClientError::from(DbError::InvalidCredentials),
            ClientError::InvalidCredentials
        ));

        let err = ClientError::from(DbError::NotFound {
            kind: "Invoice",
            id: "inv-999".to_string(),
        });
        assert!(matches!(&err, ClientError::NotFound(msg) if msg == "Invoice not found: inv-999"));
    }

    #[test]
    fn test_internal_errors_share_generic_message() {
        let transport = ClientError::Transport("connection refused".to_string());
        let server = ClientError::Server {
            status: 500,
            message: "boom".to_string(),
        };

        assert_eq!(transport.user_message(), server.user_message());
        assert_ne!(ClientError::InvalidCredentials.user_message(), transport.user_message());
    }
}
