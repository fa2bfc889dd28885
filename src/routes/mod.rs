/// Application routes configuration
use crate::config::CorsSettings;
use crate::errors::ApiError;
use crate::handlers::{get_forecast, get_weather, health, not_found, AppState};
use axum::{
    http::{HeaderName, HeaderValue, Method},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::any::Any;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

/// Build the application router with all routes
pub fn build_router(state: AppState, cors: &CorsSettings) -> Router {
    let api = Router::new()
        .route("/weather", get(get_weather))
        .route("/forecast", get(get_forecast));

    Router::new()
        // Health check
        .route("/health", get(health))
        .nest("/api/v1", api)
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors))
        .layer(CatchPanicLayer::custom(panic_response))
}

/// Translate configured CORS lists into a layer; empty lists mean "any"
pub fn cors_layer(settings: &CorsSettings) -> CorsLayer {
    let origin = if settings.origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(parse_all::<HeaderValue>("origin", &settings.origins))
    };

    let headers = if settings.headers.is_empty() {
        AllowHeaders::any()
    } else {
        AllowHeaders::list(parse_all::<HeaderName>("header", &settings.headers))
    };

    let methods: Vec<String> = settings
        .methods
        .iter()
        .map(|m| m.to_ascii_uppercase())
        .collect();

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(parse_all::<Method>("method", &methods))
        .allow_headers(headers)
}

fn parse_all<T: std::str::FromStr>(kind: &str, raw: &[String]) -> Vec<T> {
    raw.iter()
        .filter_map(|item| match item.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS {} {}", kind, item);
                None
            }
        })
        .collect()
}

fn panic_response(_: Box<dyn Any + Send + 'static>) -> Response {
    ApiError::Internal("handler panicked".to_string()).into_response()
}
