//! Router Assembly

use account::AccountServices;
use account::domain::repository::AccountDirectory;
use axum::{
    Json, Router,
    http::{HeaderName, HeaderValue, Method, header},
    routing::get,
};
use kernel::error::app_error::AppError;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{AppConfig, CorsOrigins};

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    environment: Arc<str>,
}

/// Full application router over any directory implementation
pub fn build_app<R>(directory: R, services: AccountServices, config: &AppConfig) -> Router
where
    R: AccountDirectory + Clone + Send + Sync + 'static,
{
    let environment: Arc<str> = Arc::from(config.environment.as_str());

    Router::new()
        .route(
            "/health",
            get(move || {
                let environment = environment.clone();
                async move {
                    Json(HealthResponse {
                        status: "OK",
                        environment,
                    })
                }
            }),
        )
        .nest("/api", account::account_router(directory, services))
        .fallback(|| async { AppError::not_found("Route not found") })
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins))
}

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let allow_origin = match origins {
        CorsOrigins::Any => AllowOrigin::any(),
        CorsOrigins::List(list) => {
            let values: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match origin.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(origin = %origin, "Ignoring unparsable CORS origin");
                        None
                    }
                })
                .collect();
            AllowOrigin::list(values)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::CONTENT_LENGTH,
            header::ACCEPT,
            header::ACCEPT_ENCODING,
            header::AUTHORIZATION,
            HeaderName::from_static("x-csrf-token"),
        ]))
}
