use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Session token claims.
///
/// The field names are part of the token format shared with downstream
/// verifiers and must not change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Email of the authenticated user, as stored
    pub email: String,

    /// Numeric user identifier
    pub uid: i64,

    /// Application the token is scoped to
    pub app_id: i32,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

impl Claims {
    /// Create claims expiring `ttl` from now.
    ///
    /// # Arguments
    /// * `email` - User email
    /// * `uid` - User identifier
    /// * `app_id` - Identifier of the calling application
    /// * `ttl` - Time until the token expires
    ///
    /// # Errors
    /// * `InvalidExpiry` - `now + ttl` is not a representable instant
    pub fn new(
        email: impl Into<String>,
        uid: i64,
        app_id: i32,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        Self::issued_at(email, uid, app_id, Utc::now(), ttl)
    }

    /// Create claims for an explicit issuance instant.
    pub fn issued_at(
        email: impl Into<String>,
        uid: i64,
        app_id: i32,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or(JwtError::InvalidExpiry)?;

        Ok(Self {
            email: email.into(),
            uid,
            app_id,
            exp: expires_at.timestamp(),
        })
    }

    /// Expiration as a point in time, if representable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
