use std::future::Future;
use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;

use crate::auth::errors::AuthError;
use crate::auth::errors::StorageError;
use crate::auth::models::Deadline;
use crate::auth::models::LoginCommand;
use crate::auth::models::RegisterCommand;
use crate::auth::models::UserId;
use crate::auth::ports::AppProvider;
use crate::auth::ports::AuthServicePort;
use crate::auth::ports::UserProvider;
use crate::auth::ports::UserSaver;

const OP_LOGIN: &str = "auth.login";
const OP_REGISTER: &str = "auth.register";
const OP_IS_ADMIN: &str = "auth.is_admin";

/// Domain service implementation for authentication.
///
/// Stateless; a single instance is shared by all requests.
pub struct AuthService<US, UP, AP>
where
    US: UserSaver,
    UP: UserProvider,
    AP: AppProvider,
{
    user_saver: Arc<US>,
    user_provider: Arc<UP>,
    app_provider: Arc<AP>,
    password_hasher: auth::PasswordHasher,
    token_issuer: auth::TokenIssuer,
}

impl<US, UP, AP> AuthService<US, UP, AP>
where
    US: UserSaver,
    UP: UserProvider,
    AP: AppProvider,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `user_saver` - Persists new users
    /// * `user_provider` - Reads users and admin flags
    /// * `app_provider` - Reads registered applications
    /// * `token_ttl` - Lifetime of issued session tokens
    pub fn new(
        user_saver: Arc<US>,
        user_provider: Arc<UP>,
        app_provider: Arc<AP>,
        token_ttl: chrono::Duration,
    ) -> Self {
        Self {
            user_saver,
            user_provider,
            app_provider,
            password_hasher: auth::PasswordHasher::new(),
            token_issuer: auth::TokenIssuer::new(token_ttl),
        }
    }
}

/// Start `operation` and drive it to completion unless `deadline` passes first.
///
/// Nothing is started once the deadline has already expired.
async fn within<T, F, Fut>(
    op: &'static str,
    deadline: Deadline,
    operation: F,
) -> Result<T, AuthError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    let elapsed = || {
        tracing::error!(op, "deadline exceeded");
        AuthError::Internal(anyhow!("deadline exceeded").context(op))
    };

    if deadline.is_expired() {
        return Err(elapsed());
    }

    match deadline.instant() {
        Some(at) => tokio::time::timeout_at(at, operation())
            .await
            .map_err(|_| elapsed()),
        None => Ok(operation().await),
    }
}

fn internal<E>(op: &'static str, err: E) -> AuthError
where
    E: std::error::Error + Send + Sync + 'static,
{
    AuthError::Internal(anyhow::Error::new(err).context(op))
}

#[async_trait]
impl<US, UP, AP> AuthServicePort for AuthService<US, UP, AP>
where
    US: UserSaver,
    UP: UserProvider,
    AP: AppProvider,
{
    async fn login(&self, command: LoginCommand, deadline: Deadline) -> Result<String, AuthError> {
        let LoginCommand {
            email,
            password,
            app_id,
        } = command;

        let user = match within(
            OP_LOGIN,
            deadline,
            || self.user_provider.find_user_by_email(email.as_str()),
        )
        .await?
        {
            Ok(user) => user,
            Err(StorageError::UserNotFound) => {
                tracing::warn!(op = OP_LOGIN, %email, "user not found");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => {
                tracing::error!(op = OP_LOGIN, error = %e, "failed to get user");
                return Err(internal(OP_LOGIN, e));
            }
        };

        let hasher = self.password_hasher;
        let stored_hash = user.password_hash.clone();
        let matches = within(
            OP_LOGIN,
            deadline,
            move || tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash)),
        )
        .await?
        .map_err(|e| {
            tracing::error!(op = OP_LOGIN, error = %e, "password verification task failed");
            internal(OP_LOGIN, e)
        })?;

        if !matches {
            tracing::info!(op = OP_LOGIN, user_id = %user.id, "invalid credentials");
            return Err(AuthError::InvalidCredentials);
        }

        let app = match within(OP_LOGIN, deadline, || self.app_provider.find_app_by_id(app_id))
            .await?
        {
            Ok(app) => app,
            Err(StorageError::AppNotFound) => {
                tracing::warn!(op = OP_LOGIN, %app_id, "app not found");
                return Err(AuthError::InvalidApplication);
            }
            Err(e) => {
                tracing::error!(op = OP_LOGIN, error = %e, "failed to get app");
                return Err(internal(OP_LOGIN, e));
            }
        };

        let token = self
            .token_issuer
            .issue(&user.email, user.id.0, app.id.0, app.secret.as_bytes())
            .map_err(|e| {
                tracing::error!(op = OP_LOGIN, %app_id, error = %e, "failed to generate token");
                internal(OP_LOGIN, e)
            })?;

        tracing::info!(op = OP_LOGIN, user_id = %user.id, %app_id, "user logged in");

        Ok(token)
    }

    async fn register(
        &self,
        command: RegisterCommand,
        deadline: Deadline,
    ) -> Result<UserId, AuthError> {
        let RegisterCommand { email, password } = command;

        let hasher = self.password_hasher;
        let password_hash = within(
            OP_REGISTER,
            deadline,
            move || tokio::task::spawn_blocking(move || hasher.hash(&password)),
        )
        .await?
        .map_err(|e| {
            tracing::error!(op = OP_REGISTER, error = %e, "password hashing task failed");
            internal(OP_REGISTER, e)
        })?
        .map_err(|e| {
            tracing::error!(op = OP_REGISTER, error = %e, "failed to generate password hash");
            internal(OP_REGISTER, e)
        })?;

        let user_id = match within(
            OP_REGISTER,
            deadline,
            || {
                self.user_saver
                    .save_user(email.as_str(), password_hash.as_bytes())
            },
        )
        .await?
        {
            Ok(user_id) => user_id,
            Err(StorageError::UserExists) => {
                tracing::warn!(op = OP_REGISTER, %email, "user already exists");
                return Err(AuthError::UserAlreadyExists);
            }
            Err(e) => {
                tracing::error!(op = OP_REGISTER, error = %e, "failed to save user");
                return Err(internal(OP_REGISTER, e));
            }
        };

        tracing::info!(op = OP_REGISTER, %user_id, "user registered");

        Ok(user_id)
    }

    async fn is_admin(&self, user_id: UserId, deadline: Deadline) -> Result<bool, AuthError> {
        match within(OP_IS_ADMIN, deadline, || self.user_provider.is_admin(user_id)).await? {
            Ok(is_admin) => {
                tracing::debug!(op = OP_IS_ADMIN, %user_id, is_admin, "checked admin flag");
                Ok(is_admin)
            }
            Err(StorageError::UserNotFound) => {
                tracing::warn!(op = OP_IS_ADMIN, %user_id, "user not found");
                Err(AuthError::InvalidUser)
            }
            Err(StorageError::AppNotFound) => {
                tracing::warn!(op = OP_IS_ADMIN, %user_id, "app not found");
                Err(AuthError::InvalidApplication)
            }
            Err(e) => {
                tracing::error!(op = OP_IS_ADMIN, error = %e, "failed to check admin flag");
                Err(internal(OP_IS_ADMIN, e))
            }
        }
    }
}
