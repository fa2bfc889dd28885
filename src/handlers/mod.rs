/// HTTP request handlers
use crate::domain::{CurrentWeather, ForecastWeather, Health};
use crate::errors::{ApiError, ApiResult};
use crate::services::{resolve_query, WeatherService};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub weather_service: Arc<WeatherService>,
}

/// Successful response wrapper
#[derive(Serialize)]
pub struct Envelope<T: Serialize> {
    pub status: u16,
    pub message: &'static str,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: 200,
            message: "success",
            data,
        }
    }
}

/// Raw location parameters; coordinates stay text until resolved
#[derive(Debug, Deserialize)]
pub struct LocationParams {
    pub city: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
}

impl LocationParams {
    fn from_query(params: Result<Query<LocationParams>, QueryRejection>) -> ApiResult<Self> {
        params
            .map(|Query(p)| p)
            .map_err(|e| ApiError::InvalidInput(e.body_text()))
    }
}

/// Health check handler
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        now: Utc::now(),
    })
}

/// Current weather by city or coordinates
pub async fn get_weather(
    State(state): State<AppState>,
    params: Result<Query<LocationParams>, QueryRejection>,
) -> Result<Json<Envelope<CurrentWeather>>, ApiError> {
    let p = LocationParams::from_query(params)?;
    let query = resolve_query(p.city.as_deref(), p.lat.as_deref(), p.lon.as_deref())?;

    let current = state.weather_service.current(&query).await?;
    Ok(Json(Envelope::success(current)))
}

/// Forecast by city or coordinates
pub async fn get_forecast(
    State(state): State<AppState>,
    params: Result<Query<LocationParams>, QueryRejection>,
) -> Result<Json<Envelope<ForecastWeather>>, ApiError> {
    let p = LocationParams::from_query(params)?;
    let query = resolve_query(p.city.as_deref(), p.lat.as_deref(), p.lon.as_deref())?;

    let forecast = state.weather_service.forecast(&query).await?;
    Ok(Json(Envelope::success(forecast)))
}

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}
