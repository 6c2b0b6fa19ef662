pub mod friends;
pub mod health;
pub mod location;
pub mod login;
pub mod swagger;
pub mod users;

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, HttpRequest, HttpResponse,
};

use crate::{database::UserStore, middleware::SecurityHeaders, models::ErrorResponse, utils::AppError};

/// Path ids that are not integers name no user
pub(crate) fn parse_user_id(raw: &str) -> Result<i64, AppError> {
    raw.trim().parse::<i64>().map_err(|_| AppError::user_not_found())
}

/// Fallback for any unmatched path or method
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    log::warn!("⚠️  {} {} - no route", req.method(), req.path());
    HttpResponse::NotFound().json(ErrorResponse {
        msg: "Not found".to_string(),
    })
}

/// Malformed JSON bodies answer 400 `{msg: "Bad request"}`
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        log::warn!("⚠️  {} {} - invalid JSON body: {}", req.method(), req.path(), err);
        AppError::bad_request().into()
    })
}

/// Known path, unsupported method: same 404 as an unknown path
fn resource(path: &str) -> actix_web::Resource {
    web::resource(path).default_service(web::to(not_found))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(resource("/users").route(web::post().to(users::create_user)))
            .service(resource("/users/{user_id}").route(web::get().to(users::get_user)))
            .service(
                resource("/users/{user_id}/friends")
                    .route(web::get().to(friends::get_friends))
                    .route(web::patch().to(friends::add_friend)),
            )
            .service(
                resource("/users/{user_id}/location")
                    .route(web::patch().to(location::update_location)),
            )
            .service(resource("/login/{phone_number}").route(web::get().to(login::login))),
    );
}

/// Application with every route bound to `store`; CORS, access logs and
/// Swagger UI are added by `main`.
pub fn app(
    store: Arc<dyn UserStore>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::from(store))
        .app_data(json_config())
        .wrap(SecurityHeaders)
        .route("/health", web::get().to(health::health_check))
        .configure(configure)
        .default_service(web::to(not_found))
}
