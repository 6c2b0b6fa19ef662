use actix_web::{web, HttpResponse};

use super::parse_user_id;
use crate::{
    database::UserStore,
    models::{CreateUserRequest, ErrorResponse, UserResponse},
    services::user_service,
    utils::AppError,
};

#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    tag = "Users",
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    store: web::Data<dyn UserStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("👤 GET /users/{}", path);

    let user_id = parse_user_id(&path)?;
    let user = user_service::find_by_id(store.get_ref(), user_id).await?;

    Ok(HttpResponse::Ok().json(UserResponse { user }))
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Missing name or phoneNumber", body = ErrorResponse),
        (status = 409, description = "Phone number already registered", body = ErrorResponse)
    )
)]
pub async fn create_user(
    store: web::Data<dyn UserStore>,
    request: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /users - name: {:?}", request.name);

    let user = user_service::create(store.get_ref(), request.into_inner()).await?;

    Ok(HttpResponse::Created().json(UserResponse { user }))
}
