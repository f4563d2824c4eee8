use tonic::Status;

use crate::domain::auth::models::Deadline;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;

pub async fn register<S: AuthServicePort>(
    service: &S,
    request: RegisterRequest,
    deadline: Deadline,
) -> Result<RegisterResponse, Status> {
    let email =
        EmailAddress::new(request.email).map_err(|e| Status::invalid_argument(e.to_string()))?;

    if request.password.is_empty() {
        return Err(Status::invalid_argument("password is required"));
    }

    let command = RegisterCommand {
        email,
        password: request.password,
    };

    let user_id = service.register(command, deadline).await?;

    Ok(RegisterResponse { user_id: user_id.0 })
}
