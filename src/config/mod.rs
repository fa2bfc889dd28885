/// Application configuration module
use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_addr: String,
    pub provider: ProviderSettings,
    pub cors: CorsSettings,
}

/// Weather provider endpoints and credentials
#[derive(Clone, Debug)]
pub struct ProviderSettings {
    pub api_key: String,
    pub base_url: String,
    pub geocoding_url: String,
    pub timeout: Duration,
}

/// Cross-origin settings; an empty list means "any"
#[derive(Clone, Debug, Default)]
pub struct CorsSettings {
    pub origins: Vec<String>,
    pub methods: Vec<String>,
    pub headers: Vec<String>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_vars<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = var("WEATHER_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("WEATHER_API_KEY is required"))?;

        let base_url = var("WEATHER_BASE_URL")
            .unwrap_or_else(|| "https://api.openweathermap.org/data/2.5".to_string());

        let geocoding_url = var("GEOCODING_URL")
            .unwrap_or_else(|| "https://api.openweathermap.org/geo/1.0/direct".to_string());

        let timeout_secs = var("WEATHER_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        let bind_addr = var("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8000".to_string());

        let mut methods = split_list(var("CORS_METHODS"));
        if methods.is_empty() {
            methods.push("GET".to_string());
        }

        let cors = CorsSettings {
            origins: split_list(var("CORS_ORIGIN")),
            methods,
            headers: split_list(var("CORS_HEADERS")),
        };

        Ok(Self {
            bind_addr,
            provider: ProviderSettings {
                api_key,
                base_url: base_url.trim_end_matches('/').to_string(),
                geocoding_url,
                timeout: Duration::from_secs(timeout_secs),
            },
            cors,
        })
    }
}

/// Split a comma separated variable, dropping blanks and "*"
fn split_list(raw: Option<String>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty() && *item != "*")
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_vars(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_applied() {
        let config = load(&[("WEATHER_API_KEY", "secret")]).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
        assert_eq!(config.provider.api_key, "secret");
        assert_eq!(
            config.provider.base_url,
            "https://api.openweathermap.org/data/2.5"
        );
        assert_eq!(
            config.provider.geocoding_url,
            "https://api.openweathermap.org/geo/1.0/direct"
        );
        assert_eq!(config.provider.timeout, Duration::from_secs(5));
        assert!(config.cors.origins.is_empty());
        assert_eq!(config.cors.methods, vec!["GET".to_string()]);
        assert!(config.cors.headers.is_empty());
    }

    #[test]
    fn test_missing_api_key_is_error() {
        assert!(load(&[]).is_err());
        assert!(load(&[("WEATHER_API_KEY", "  ")]).is_err());
    }

    #[test]
    fn test_cors_lists_split() {
        let config = load(&[
            ("WEATHER_API_KEY", "secret"),
            ("CORS_ORIGIN", "http://localhost:5173, https://example.com,"),
            ("CORS_METHODS", "GET,OPTIONS"),
            ("CORS_HEADERS", "*"),
        ])
        .unwrap();
        assert_eq!(
            config.cors.origins,
            vec![
                "http://localhost:5173".to_string(),
                "https://example.com".to_string()
            ]
        );
        assert_eq!(
            config.cors.methods,
            vec!["GET".to_string(), "OPTIONS".to_string()]
        );
        assert!(config.cors.headers.is_empty());
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        let config = load(&[
            ("WEATHER_API_KEY", "secret"),
            ("WEATHER_TIMEOUT_SECS", "soon"),
            ("WEATHER_BASE_URL", "http://localhost:9000/data/2.5/"),
        ])
        .unwrap();
        assert_eq!(config.provider.timeout, Duration::from_secs(5));
        assert_eq!(config.provider.base_url, "http://localhost:9000/data/2.5");
    }
}
