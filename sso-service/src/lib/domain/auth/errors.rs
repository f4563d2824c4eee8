use thiserror::Error;

/// Error for UserId validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("User ID must be positive, got {0}")]
    NotPositive(i64),
}

/// Error for AppId validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppIdError {
    #[error("app_id is required")]
    Missing,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("email is required")]
    Empty,

    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Failures reported by the persistence gateway.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("user not found")]
    UserNotFound,

    #[error("application not found")]
    AppNotFound,

    #[error("user already exists")]
    UserExists,

    #[error("Database error: {0}")]
    Database(String),
}

/// Domain error returned by the authentication service.
///
/// The message of `Internal` never includes its cause; the cause is only
/// reachable through `source()`.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid application")]
    InvalidApplication,

    #[error("invalid user")]
    InvalidUser,

    #[error("user already exists")]
    UserAlreadyExists,

    #[error("internal error")]
    Internal(#[source] anyhow::Error),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::Internal(err)
    }
}
