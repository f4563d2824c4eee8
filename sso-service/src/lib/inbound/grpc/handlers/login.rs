use tonic::Status;

use crate::domain::auth::models::AppId;
use crate::domain::auth::models::Deadline;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;

pub async fn login<S: AuthServicePort>(
    service: &S,
    request: LoginRequest,
    deadline: Deadline,
) -> Result<LoginResponse, Status> {
    let email =
        EmailAddress::new(request.email).map_err(|e| Status::invalid_argument(e.to_string()))?;

    if request.password.is_empty() {
        return Err(Status::invalid_argument("password is required"));
    }

    let app_id = AppId::new(request.app_id).map_err(|e| Status::invalid_argument(e.to_string()))?;

    let command = LoginCommand {
        email,
        password: request.password,
        app_id,
    };

    let token = service.login(command, deadline).await?;

    Ok(LoginResponse { token })
}
