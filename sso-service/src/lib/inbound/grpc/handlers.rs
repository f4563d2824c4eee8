use std::time::Duration;

use tonic::metadata::MetadataMap;
use tonic::Status;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::Deadline;

pub mod is_admin;
pub mod login;
pub mod register;


const GRPC_TIMEOUT_HEADER: &str = "grpc-timeout";

impl From<AuthError> for Status {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Status::invalid_argument("invalid email or password"),
            AuthError::InvalidApplication => Status::invalid_argument("invalid app_id"),
            AuthError::InvalidUser => Status::not_found("user not found"),
            AuthError::UserAlreadyExists => Status::already_exists("user already exists"),
            AuthError::Internal(_) => Status::internal("internal error"),
        }
    }
}

/// Deadline requested by the caller, or `default_timeout` from now.
pub fn request_deadline(metadata: &MetadataMap, default_timeout: Duration) -> Deadline {
    let timeout = metadata
        .get(GRPC_TIMEOUT_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_grpc_timeout)
        .unwrap_or(default_timeout);

    Deadline::after(timeout)
}

/// Parse a `grpc-timeout` header value: up to 8 digits and a unit suffix.
fn parse_grpc_timeout(value: &str) -> Option<Duration> {
    if value.len() < 2 || value.len() > 9 {
        return None;
    }

    let (digits, unit) = value.split_at(value.len() - 1);
    let amount: u64 = digits.parse().ok()?;

    match unit {
        "H" => Some(Duration::from_secs(amount * 60 * 60)),
        "M" => Some(Duration::from_secs(amount * 60)),
        "S" => Some(Duration::from_secs(amount)),
        "m" => Some(Duration::from_millis(amount)),
        "u" => Some(Duration::from_micros(amount)),
        "n" => Some(Duration::from_nanos(amount)),
        _ => None,
    }
}
