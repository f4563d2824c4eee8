use async_trait::async_trait;

use crate::auth::errors::AuthError;
use crate::auth::errors::StorageError;
use crate::auth::models::App;
use crate::auth::models::AppId;
use crate::auth::models::Deadline;
use crate::auth::models::LoginCommand;
use crate::auth::models::RegisterCommand;
use crate::auth::models::User;
use crate::auth::models::UserId;

/// Port for authentication domain service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Exchange credentials for a session token scoped to an application.
    ///
    /// # Arguments
    /// * `command` - Validated email, plaintext password and application ID
    /// * `deadline` - Point after which the caller stops waiting
    ///
    /// # Returns
    /// Signed session token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `InvalidApplication` - Application does not exist
    /// * `Internal` - Storage, signing or deadline failure
    async fn login(&self, command: LoginCommand, deadline: Deadline) -> Result<String, AuthError>;

    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated email and plaintext password
    /// * `deadline` - Point after which the caller stops waiting
    ///
    /// # Returns
    /// Identifier of the created user
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Email is already registered
    /// * `Internal` - Hashing, storage or deadline failure
    async fn register(
        &self,
        command: RegisterCommand,
        deadline: Deadline,
    ) -> Result<UserId, AuthError>;

    /// Check whether a user holds administrative privileges.
    ///
    /// # Errors
    /// * `InvalidUser` - User does not exist
    /// * `InvalidApplication` - Gateway reported a missing application
    /// * `Internal` - Storage or deadline failure
    async fn is_admin(&self, user_id: UserId, deadline: Deadline) -> Result<bool, AuthError>;
}

/// Persists new users.
#[async_trait]
pub trait UserSaver: Send + Sync + 'static {
    /// Store a user and return the assigned identifier.
    ///
    /// # Errors
    /// * `UserExists` - Email is already taken
    /// * `Database` - Database operation failed
    async fn save_user(&self, email: &str, password_hash: &[u8]) -> Result<UserId, StorageError>;
}

/// Reads users and their privileges.
#[async_trait]
pub trait UserProvider: Send + Sync + 'static {
    /// Retrieve user by email address (exact match).
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this email
    /// * `Database` - Database operation failed
    async fn find_user_by_email(&self, email: &str) -> Result<User, StorageError>;

    /// Whether the user is listed as an administrator.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `Database` - Database operation failed
    async fn is_admin(&self, user_id: UserId) -> Result<bool, StorageError>;
}

/// Reads registered applications.
#[async_trait]
pub trait AppProvider: Send + Sync + 'static {
    /// Retrieve application by identifier.
    ///
    /// # Errors
    /// * `AppNotFound` - Application does not exist
    /// * `Database` - Database operation failed
    async fn find_app_by_id(&self, app_id: AppId) -> Result<App, StorageError>;
}
