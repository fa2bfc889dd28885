/// Unified error handling module
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

pub const UNAVAILABLE_MESSAGE: &str = "Weather service unavailable";
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// Error envelope; failures never carry a `data` field
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Weather service timeout")]
    UpstreamTimeout,

    #[error("{0}")]
    UpstreamUnavailable(String),

    /// Detail is logged, never sent to the caller
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            ApiError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text placed in the envelope's `message` field
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Internal(_) => INTERNAL_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest includes the request URL (and with it the api key) in Display
        let err = err.without_url();
        if err.is_timeout() {
            warn!("Weather provider timed out: {}", err);
            ApiError::UpstreamTimeout
        } else if err.is_decode() {
            ApiError::Internal(format!("undecodable provider payload: {}", err))
        } else {
            warn!("Weather provider unreachable: {}", err);
            ApiError::UpstreamUnavailable(UNAVAILABLE_MESSAGE.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(format!("unexpected provider payload: {}", err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let ApiError::Internal(detail) = &self {
            error!("Request failed: {}", detail);
        }

        let body = ErrorResponse {
            status: status.as_u16(),
            message: self.public_message(),
        };

        // HTTP status always mirrors the envelope status
        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_status_matches_envelope() {
        let cases = [
            (ApiError::InvalidInput("bad".into()), 400),
            (ApiError::NotFound("gone".into()), 404),
            (ApiError::UpstreamTimeout, 504),
            (ApiError::UpstreamUnavailable("down".into()), 503),
            (ApiError::Internal("boom".into()), 500),
        ];
        for (err, expected) in cases {
            let (status, body) = render(err).await;
            assert_eq!(status.as_u16(), expected);
            assert_eq!(body["status"], expected);
            assert!(body.get("data").is_none());
        }
    }

    #[tokio::test]
    async fn test_timeout_message() {
        let (_, body) = render(ApiError::UpstreamTimeout).await;
        assert_eq!(body["message"], "Weather service timeout");
    }

    #[tokio::test]
    async fn test_internal_detail_hidden() {
        let (_, body) = render(ApiError::Internal("missing field `sys`".into())).await;
        assert_eq!(body["message"], "Internal server error");
    }

    #[test]
    fn test_json_error_is_internal() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::Internal(_)));
    }
}
