use crate::{SupportedCity, WeatherError, model::Observation};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current conditions for a supported city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, city: &SupportedCity) -> Result<Observation, WeatherError>;
}
