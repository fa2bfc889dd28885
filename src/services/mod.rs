/// Business logic services layer
use crate::clients::{
    ConditionPayload, CurrentPayload, ForecastEntryPayload, ForecastPayload, MainPayload,
    OpenWeatherClient, WindPayload,
};
use crate::domain::{
    Coordinates, CurrentWeather, ForecastWeather, Location, Timestamp, WeatherQuery,
    WeatherSample,
};
use crate::errors::{ApiError, ApiResult};
use crate::utils::{coordinate, present};
use tracing::{debug, info};

pub const MISSING_LOCATION: &str = "Either city or both latitude and longitude must be provided";

/// Decide how to query the provider from raw request parameters.
///
/// A complete coordinate pair wins over a city name; `0,0` counts as complete.
pub fn resolve_query(
    city: Option<&str>,
    lat: Option<&str>,
    lon: Option<&str>,
) -> ApiResult<WeatherQuery> {
    let lat = coordinate("lat", lat, 90.0)?;
    let lon = coordinate("lon", lon, 180.0)?;

    match (lat, lon, present(city)) {
        (Some(lat), Some(lon), _) => Ok(WeatherQuery::ByCoordinates { lat, lon }),
        (_, _, Some(city)) => Ok(WeatherQuery::ByCity(city.to_string())),
        _ => Err(ApiError::InvalidInput(MISSING_LOCATION.to_string())),
    }
}

/// Current weather and forecast lookups against the provider
pub struct WeatherService {
    client: OpenWeatherClient,
}

impl WeatherService {
    pub fn new(client: OpenWeatherClient) -> Self {
        Self { client }
    }

    /// Fetch and normalize current conditions
    pub async fn current(&self, query: &WeatherQuery) -> ApiResult<CurrentWeather> {
        let payload = self.client.fetch_current(query).await?;
        let current = normalize_current(payload)?;
        debug!(
            city = %current.location.city,
            dt = current.weather.timestamp.epoch(),
            "Current weather normalized"
        );
        Ok(current)
    }

    /// Fetch and normalize the forecast, geocoding first when given a city
    pub async fn forecast(&self, query: &WeatherQuery) -> ApiResult<ForecastWeather> {
        let (lat, lon) = match query {
            WeatherQuery::ByCoordinates { lat, lon } => (*lat, *lon),
            WeatherQuery::ByCity(city) => {
                let coords = self.geocode(city).await?;
                (coords.lat, coords.lon)
            }
        };

        let payload = self.client.fetch_forecast(lat, lon).await?;
        let forecast = normalize_forecast(payload)?;
        debug!(
            city = %forecast.location.city,
            entries = forecast.weather.len(),
            "Forecast normalized"
        );
        Ok(forecast)
    }

    /// Resolve a city name to coordinates using the first provider match
    pub async fn geocode(&self, city: &str) -> ApiResult<Coordinates> {
        let first = self
            .client
            .geocode(city)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound(format!("Location not found: {}", city)))?;

        let coords = Coordinates {
            city: first.name,
            country: first.country,
            lat: first.lat,
            lon: first.lon,
        };
        info!(
            "Geocoded {} to {}, {} ({}, {})",
            city, coords.city, coords.country, coords.lat, coords.lon
        );

        Ok(coords)
    }
}

/// Map a current-weather payload onto the stable schema
pub fn normalize_current(payload: CurrentPayload) -> ApiResult<CurrentWeather> {
    let weather = sample(
        payload.main,
        payload.wind,
        payload.weather,
        Timestamp::EpochOnly { dt: payload.dt },
    )?;

    Ok(CurrentWeather {
        location: Location {
            city: payload.name,
            country: payload.sys.country,
        },
        weather,
    })
}

/// Map a forecast payload; entry order is preserved
pub fn normalize_forecast(payload: ForecastPayload) -> ApiResult<ForecastWeather> {
    let weather = payload
        .list
        .into_iter()
        .map(|entry: ForecastEntryPayload| {
            sample(
                entry.main,
                entry.wind,
                entry.weather,
                Timestamp::EpochWithText {
                    dt: entry.dt,
                    dt_txt: entry.dt_txt,
                },
            )
        })
        .collect::<ApiResult<Vec<_>>>()?;

    Ok(ForecastWeather {
        location: Location {
            city: payload.city.name,
            country: payload.city.country,
        },
        weather,
    })
}

fn sample(
    main: MainPayload,
    wind: WindPayload,
    conditions: Vec<ConditionPayload>,
    timestamp: Timestamp,
) -> ApiResult<WeatherSample> {
    let condition = conditions
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::Internal("provider sent no weather conditions".to_string()))?;

    Ok(WeatherSample {
        temp: main.temp,
        feels_like: main.feels_like,
        humidity: main.humidity,
        wind_speed: wind.speed,
        weather: condition.main,
        description: condition.description,
        weather_icon: condition.icon,
        timestamp,
    })
}
