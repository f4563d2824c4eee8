use std::sync::Arc;
use std::time::Duration;

use tonic::Request;
use tonic::Response;
use tonic::Status;

use super::handlers::is_admin;
use super::handlers::login;
use super::handlers::register;
use super::handlers::request_deadline;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::auth_server::Auth as AuthProto;
use crate::proto::auth_server::AuthServer;
use crate::proto::IsAdminRequest;
use crate::proto::IsAdminResponse;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;

/// gRPC adapter exposing an [`AuthServicePort`] as the `auth.Auth` service.
pub struct AuthGrpcService<S>
where
    S: AuthServicePort,
{
    service: Arc<S>,
    default_timeout: Duration,
}

impl<S> AuthGrpcService<S>
where
    S: AuthServicePort,
{
    /// # Arguments
    /// * `service` - Domain service handling the calls
    /// * `default_timeout` - Deadline for requests without a `grpc-timeout` header
    pub fn new(service: Arc<S>, default_timeout: Duration) -> Self {
        Self {
            service,
            default_timeout,
        }
    }

    /// Wrap into the generated tonic server.
    pub fn into_server(self) -> AuthServer<Self> {
        AuthServer::new(self)
    }
}

#[tonic::async_trait]
impl<S> AuthProto for AuthGrpcService<S>
where
    S: AuthServicePort,
{
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let deadline = request_deadline(request.metadata(), self.default_timeout);
        let response =
            register::register(self.service.as_ref(), request.into_inner(), deadline).await?;
        Ok(Response::new(response))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let deadline = request_deadline(request.metadata(), self.default_timeout);
        let response = login::login(self.service.as_ref(), request.into_inner(), deadline).await?;
        Ok(Response::new(response))
    }

    async fn is_admin(
        &self,
        request: Request<IsAdminRequest>,
    ) -> Result<Response<IsAdminResponse>, Status> {
        let deadline = request_deadline(request.metadata(), self.default_timeout);
        let response =
            is_admin::is_admin(self.service.as_ref(), request.into_inner(), deadline).await?;
        Ok(Response::new(response))
    }
}
