use actix_web::{web, HttpResponse};

use crate::{
    database::UserStore,
    models::{ErrorResponse, UserResponse},
    services::user_service,
    utils::AppError,
};

/// GET /api/login/{phone_number} - Login sem credenciais, só pelo telefone
#[utoipa::path(
    get,
    path = "/api/login/{phone_number}",
    tag = "Login",
    params(("phone_number" = String, Path, description = "Registered phone number")),
    responses(
        (status = 200, description = "User with this phone number", body = UserResponse),
        (status = 404, description = "Invalid phone number", body = ErrorResponse)
    )
)]
pub async fn login(
    store: web::Data<dyn UserStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🔐 GET /login/{}", path);

    let user = user_service::find_by_phone(store.get_ref(), &path).await?;

    log::info!("✅ Login successful: user {}", user.user_id);

    Ok(HttpResponse::Ok().json(UserResponse { user }))
}

#[cfg(test)]
mod tests {
    use crate::api::{app, test_support::seeded_store};
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_login_known_phone() {
        let app = test::init_service(app(seeded_store())).await;

        let req = test::TestRequest::get().uri("/api/login/07900000001").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["user"]["user_id"], 1);
        assert_eq!(body["user"]["name"], "Gemma");
    }

    #[actix_web::test]
    async fn test_login_unknown_phone() {
        let app = test::init_service(app(seeded_store())).await;

        let req = test::TestRequest::get().uri("/api/login/07900000099").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "msg": "Invalid phone number" }));
    }
}
