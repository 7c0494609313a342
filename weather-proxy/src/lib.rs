//! HTTP surface of the weather proxy.
//!
//! Exposes `GET /api/weather?city=<name>` and an informational `GET /`.
//! The upstream credential never leaves this process.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use weather_core::{
    OpenWeatherProvider, ProxyConfig, WeatherError, WeatherReading, WeatherService,
};

pub const INFO_TEXT: &str =
    "Smart Weather Monitoring Dashboard Backend is Running... Use /api/weather?city=Delhi";

pub const UNAVAILABLE_MESSAGE: &str =
    "OpenWeather API key not yet active or invalid. Please wait a few minutes.";

pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to fetch weather data";

#[derive(Clone, Debug)]
pub struct AppState {
    pub service: WeatherService,
}

impl AppState {
    pub fn new(service: WeatherService) -> Self {
        Self { service }
    }

    pub fn from_config(config: &ProxyConfig) -> Self {
        let provider =
            OpenWeatherProvider::with_base_url(config.api_key.clone(), &config.upstream_url);
        Self::new(WeatherService::new(Arc::new(provider)))
    }
}

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    city: Option<String>,
}

/// Maps every failure onto one status/body pair and logs it once.
pub enum ApiError {
    Weather(WeatherError),
    /// The query string itself could not be decoded.
    BadQuery(QueryRejection),
}

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        Self::Weather(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadQuery(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = match self {
            ApiError::Weather(err) => err,
            ApiError::BadQuery(rejection) => {
                let message = rejection.body_text();
                tracing::warn!(%message, "rejected weather query");
                return (StatusCode::BAD_REQUEST, Json(serde_json::json!({ "error": message })))
                    .into_response();
            }
        };

        let (status, message) = match &err {
            WeatherError::InvalidCity(_) => (StatusCode::BAD_REQUEST, err.to_string()),
            WeatherError::UpstreamUnavailable { status } => {
                tracing::warn!(upstream_status = *status, "OpenWeather API key inactive or invalid");
                (StatusCode::SERVICE_UNAVAILABLE, UNAVAILABLE_MESSAGE.to_string())
            }
            WeatherError::Upstream(reason) => {
                tracing::error!(%reason, "error fetching weather data");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE_MESSAGE.to_string())
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

async fn info() -> &'static str {
    INFO_TEXT
}

async fn weather(
    State(state): State<AppState>,
    query: Result<Query<WeatherQuery>, QueryRejection>,
) -> Result<Json<WeatherReading>, ApiError> {
    let Query(query) = query?;
    let city = query.city.unwrap_or_default();
    let reading = state.service.get_weather(&city).await?;
    Ok(Json(reading))
}

/// Routes without middleware.
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(info))
        .route("/api/weather", get(weather))
        .with_state(state)
}

/// Full application: routes plus CORS and request tracing.
pub fn router(state: AppState, allowed_origins: &[String]) -> Router {
    routes(state)
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}

pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET])
}
