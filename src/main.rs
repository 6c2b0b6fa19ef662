mod api;
mod config;
mod database;
mod middleware;
mod models;
mod seeds;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, HttpServer};
use dotenv::dotenv;
use std::io;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Settings;
use crate::database::{InMemoryUserStore, MongoDB, UserStore};

fn build_cors(origins: &[String]) -> Cors {
    let cors = if origins.is_empty() || origins.iter().any(|o| o == "*") {
        Cors::default().allow_any_origin()
    } else {
        origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(vec!["GET", "POST", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::ACCEPT,
        ])
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let settings = Settings::from_env().map_err(|e| {
        log::error!("❌ Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    log::info!("🚀 Starting Friend Tracker...");

    let store: Arc<dyn UserStore> = match &settings.database_url {
        Some(database_url) => {
            log::info!("📊 Database: {}", database_url);
            let db = MongoDB::new(database_url).await.map_err(|e| {
                log::error!("❌ Failed to connect to MongoDB: {}", e);
                io::Error::other(e.to_string())
            })?;
            log::info!("✅ MongoDB connected successfully");
            Arc::new(db)
        }
        None => {
            log::warn!("⚠️  DATABASE_URL not set - using in-memory store, data is lost on restart");
            Arc::new(InMemoryUserStore::new())
        }
    };

    if settings.seed_demo_users {
        seeds::users_seed::seed_demo_users(store.as_ref()).await;
    }

    log::info!("🌐 Server starting on {}:{}", settings.host, settings.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", settings.host, settings.port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", settings.host, settings.port);

    let cors_origins = settings.cors_origins.clone();

    // Start HTTP server
    HttpServer::new(move || {
        let openapi = api::swagger::ApiDoc::openapi();

        api::app(store.clone())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi),
            )
            .wrap(build_cors(&cors_origins))
            .wrap(Logger::default())
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    async fn init_with(origins: &[&str]) -> StatusCode {
        let origins: Vec<String> = origins.iter().map(|o| o.to_string()).collect();
        let app = test::init_service(
            App::new()
                .wrap(build_cors(&origins))
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header(("Origin", "http://localhost:19006"))
            .to_request();
        test::call_service(&app, req).await.status()
    }

    #[actix_web::test]
    async fn test_cors_wildcard_starts() {
        assert_eq!(init_with(&["*"]).await, StatusCode::OK);
        assert_eq!(init_with(&[]).await, StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_cors_from_settings_starts() {
        let settings = Settings::from_lookup(|key| match key {
            "CORS_ORIGINS" => Some("http://localhost:19006, http://localhost:8081".to_string()),
            _ => None,
        })
        .unwrap();
        let origins: Vec<&str> = settings.cors_origins.iter().map(String::as_str).collect();
        assert_eq!(init_with(&origins).await, StatusCode::OK);
    }
}
