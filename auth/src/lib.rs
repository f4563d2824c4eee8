//! Authentication utilities library
//!
//! Provides the cryptographic building blocks of the sign-on service:
//! - Password hashing (Argon2id)
//! - Session token claims and HS512 JWT signing/verification
//! - Token issuance with a fixed time-to-live
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", hash.as_bytes()));
//! ```
//!
//! ## Issuing and Verifying Tokens
//! ```
//! use auth::{Claims, JwtHandler, TokenIssuer};
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new(Duration::hours(1));
//! let token = issuer.issue("alice@example.com", 1, 2, b"app-secret").unwrap();
//!
//! // A downstream verifier holding the same application secret
//! let claims: Claims = JwtHandler::new(b"app-secret").unwrap().decode(&token).unwrap();
//! assert_eq!(claims.uid, 1);
//! assert_eq!(claims.app_id, 2);
//! ```

pub mod issuer;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use issuer::TokenIssuer;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
