/// Domain models for the application
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the provider should be queried for a location
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    ByCity(String),
    ByCoordinates { lat: f64, lon: f64 },
}

/// Geocoder output, only used to feed the forecast call
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    pub city: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    /// ISO 3166 alpha-2 code as reported by the provider
    pub country: String,
}

/// Observation time. Forecast entries also carry the provider's text form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    EpochWithText { dt: i64, dt_txt: String },
    EpochOnly { dt: i64 },
}

impl Timestamp {
    pub fn epoch(&self) -> i64 {
        match self {
            Timestamp::EpochWithText { dt, .. } | Timestamp::EpochOnly { dt } => *dt,
        }
    }
}

/// A single normalized weather reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub weather: String,
    pub description: String,
    pub weather_icon: String,
    #[serde(flatten)]
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub location: Location,
    pub weather: WeatherSample,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastWeather {
    pub location: Location,
    /// Chronological, in provider order
    pub weather: Vec<WeatherSample>,
}

/// Health check response
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub now: DateTime<Utc>,
}
