/// External API clients module
use crate::config::ProviderSettings;
use crate::domain::WeatherQuery;
use crate::errors::{ApiError, ApiResult, UNAVAILABLE_MESSAGE};
use crate::utils::upstream_message;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client wrapper with common configuration
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("weather-api/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}

// Provider payloads. Only the fields we map are declared; a missing one fails
// deserialization and surfaces as an internal error.

#[derive(Debug, Deserialize)]
pub struct CurrentPayload {
    pub name: String,
    pub sys: SysPayload,
    pub main: MainPayload,
    pub wind: WindPayload,
    pub weather: Vec<ConditionPayload>,
    pub dt: i64,
}

#[derive(Debug, Deserialize)]
pub struct SysPayload {
    /// Absent for points with no country (open sea)
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Deserialize)]
pub struct MainPayload {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
}

#[derive(Debug, Deserialize)]
pub struct WindPayload {
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub struct ConditionPayload {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub struct ForecastPayload {
    pub city: CityPayload,
    pub list: Vec<ForecastEntryPayload>,
}

#[derive(Debug, Deserialize)]
pub struct CityPayload {
    pub name: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Deserialize)]
pub struct ForecastEntryPayload {
    pub dt: i64,
    pub dt_txt: String,
    pub main: MainPayload,
    pub wind: WindPayload,
    pub weather: Vec<ConditionPayload>,
}

#[derive(Debug, Deserialize)]
pub struct GeoMatch {
    pub name: String,
    #[serde(default)]
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

/// OpenWeatherMap client (current weather, 5 day forecast, direct geocoding)
pub struct OpenWeatherClient {
    http_client: HttpClient,
    api_key: String,
    base_url: String,
    geocoding_url: String,
}

impl OpenWeatherClient {
    pub fn new(settings: &ProviderSettings) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new(settings.timeout)?,
            api_key: settings.api_key.clone(),
            base_url: settings.base_url.clone(),
            geocoding_url: settings.geocoding_url.clone(),
        })
    }

    /// Fetch current conditions by name or coordinates
    pub async fn fetch_current(&self, query: &WeatherQuery) -> ApiResult<CurrentPayload> {
        let url = format!("{}/weather", self.base_url);
        self.get_json(&url, self.weather_params(query)).await
    }

    /// Fetch the 3-hourly forecast for a coordinate pair
    pub async fn fetch_forecast(&self, lat: f64, lon: f64) -> ApiResult<ForecastPayload> {
        let url = format!("{}/forecast", self.base_url);
        let query = WeatherQuery::ByCoordinates { lat, lon };
        self.get_json(&url, self.weather_params(&query)).await
    }

    /// Look a city up, asking for at most one match
    pub async fn geocode(&self, city: &str) -> ApiResult<Vec<GeoMatch>> {
        let params = vec![
            ("q", city.to_string()),
            ("limit", "1".to_string()),
            ("appid", self.api_key.clone()),
        ];
        self.get_json(&self.geocoding_url, params).await
    }

    fn weather_params(&self, query: &WeatherQuery) -> Vec<(&'static str, String)> {
        let mut params = match query {
            WeatherQuery::ByCoordinates { lat, lon } => {
                vec![("lat", lat.to_string()), ("lon", lon.to_string())]
            }
            WeatherQuery::ByCity(city) => vec![("q", city.clone())],
        };
        params.push(("appid", self.api_key.clone()));
        params.push(("units", "metric".to_string()));
        params
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: Vec<(&'static str, String)>,
    ) -> ApiResult<T> {
        debug!(url, "Calling weather provider");

        let resp = self
            .http_client
            .get_client()
            .get(url)
            .query(&params)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            warn!("Weather provider returned {}", status);
            let message =
                upstream_message(&body).unwrap_or_else(|| UNAVAILABLE_MESSAGE.to_string());
            return Err(ApiError::UpstreamUnavailable(message));
        }

        Ok(serde_json::from_str(&body)?)
    }
}
