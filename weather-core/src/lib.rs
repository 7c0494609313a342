//! Core library for the weather dashboard.
//!
//! This crate defines:
//! - The closed table of supported cities
//! - Shared domain models (observations, readings)
//! - Abstraction over the upstream weather provider
//! - The `get_weather` service used by the proxy
//! - Proxy configuration & credentials handling
//!
//! It is used by `weather-proxy` and `weather-dashboard`.

pub mod city;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;

pub use city::{DEFAULT_CITY, SUPPORTED_CITIES, SupportedCity};
pub use config::{FileConfig, ProxyConfig};
pub use error::WeatherError;
pub use model::{Observation, WeatherReading};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
pub use service::WeatherService;
