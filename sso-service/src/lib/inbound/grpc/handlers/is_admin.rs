use tonic::Status;

use crate::domain::auth::models::Deadline;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::IsAdminRequest;
use crate::proto::IsAdminResponse;

pub async fn is_admin<S: AuthServicePort>(
    service: &S,
    request: IsAdminRequest,
    deadline: Deadline,
) -> Result<IsAdminResponse, Status> {
    let user_id = UserId::new(request.user_id)
        .map_err(|_| Status::invalid_argument("invalid user id"))?;

    let is_admin = service.is_admin(user_id, deadline).await?;

    Ok(IsAdminResponse { is_admin })
}
