use actix_web::{web, HttpResponse};

use super::parse_user_id;
use crate::{
    database::UserStore,
    models::{AcknowledgedResponse, ErrorResponse, LocationUpdateRequest},
    services::user_service,
    utils::AppError,
};

/// PATCH /api/users/{user_id}/location
///
/// A body with `status` toggles the journey (`start` and `end` required when
/// `true`); a body with only `current` moves the current position.
#[utoipa::path(
    patch,
    path = "/api/users/{user_id}/location",
    tag = "Location",
    params(("user_id" = i64, Path, description = "User id")),
    request_body = LocationUpdateRequest,
    responses(
        (status = 201, description = "Location written", body = AcknowledgedResponse),
        (status = 400, description = "status=true without start/end, or empty body", body = ErrorResponse),
        (status = 404, description = "User id is not a number", body = ErrorResponse)
    )
)]
pub async fn update_location(
    store: web::Data<dyn UserStore>,
    path: web::Path<String>,
    request: web::Json<LocationUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = parse_user_id(&path)?;
    let request = request.into_inner();

    let acknowledged = match (request.status, request.current) {
        (Some(status), _) => {
            log::info!("📍 PATCH /users/{}/location - status: {}", user_id, status);
            user_service::update_location(store.get_ref(), status, request.start, request.end, user_id)
                .await?
        }
        (None, Some(current)) => {
            log::info!("📍 PATCH /users/{}/location - current", user_id);
            user_service::update_current_location(store.get_ref(), user_id, current).await?
        }
        (None, None) => return Err(AppError::bad_request()),
    };

    Ok(HttpResponse::Created().json(AcknowledgedResponse { acknowledged }))
}
