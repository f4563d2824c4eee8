use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Issues signed session tokens with a fixed time-to-live.
///
/// Each token binds a user to one application and is signed with that
/// application's secret. Verification is left to the consumers of the token.
#[derive(Debug, Clone, Copy)]
pub struct TokenIssuer {
    ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer producing tokens valid for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    /// Build and sign a token for a user of an application.
    ///
    /// # Arguments
    /// * `email` - User email carried in the `email` claim
    /// * `uid` - User identifier carried in the `uid` claim
    /// * `app_id` - Application identifier carried in the `app_id` claim
    /// * `secret` - Signing secret of that application
    ///
    /// # Errors
    /// * `EmptySecret` - The application has no signing secret
    /// * `InvalidExpiry` - The TTL is not positive or the expiry is not representable
    /// * `EncodingFailed` - Signing failed
    pub fn issue(
        &self,
        email: &str,
        uid: i64,
        app_id: i32,
        secret: &[u8],
    ) -> Result<String, JwtError> {
        if self.ttl <= Duration::zero() {
            return Err(JwtError::InvalidExpiry);
        }

        let handler = JwtHandler::new(secret)?;
        let claims = Claims::new(email, uid, app_id, self.ttl)?;

        handler.encode(&claims)
    }
}
