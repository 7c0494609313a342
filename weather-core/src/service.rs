use std::sync::Arc;

use chrono::Local;

use crate::{WeatherError, WeatherProvider, city, model::WeatherReading};

/// Display format of the `time` field stamped on each reading.
pub const OBSERVED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Resolves city names and normalizes upstream conditions into readings.
#[derive(Debug, Clone)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    pub async fn get_weather(&self, city_name: &str) -> Result<WeatherReading, WeatherError> {
        let requested = city_name.trim();
        let Some(city) = city::lookup(requested) else {
            tracing::warn!(city = requested, "unknown city requested");
            return Err(WeatherError::InvalidCity(requested.to_string()));
        };

        let observation = self.provider.current(city).await?;
        let observed_at = Local::now().format(OBSERVED_AT_FORMAT).to_string();
        let reading = WeatherReading::from_observation(city.name, observation, observed_at);

        tracing::info!(
            city = %reading.city,
            temp_c = reading.temperature_c,
            humidity_pct = reading.humidity_pct,
            pressure_hpa = reading.pressure_hpa,
            wind_mps = reading.wind_speed_mps,
            description = %reading.description,
            time = %reading.observed_at,
            "weather reading served"
        );

        Ok(reading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SUPPORTED_CITIES, SupportedCity, model::Observation};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct StubProvider {
        calls: Mutex<Vec<&'static str>>,
        fail_with: Option<u16>,
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn current(&self, city: &SupportedCity) -> Result<Observation, WeatherError> {
            self.calls.lock().unwrap().push(city.name);
            if let Some(status) = self.fail_with {
                return Err(WeatherError::from_upstream_status(status, ""));
            }
            Ok(Observation {
                temperature_c: 25.0,
                humidity_pct: 60.0,
                pressure_hpa: 1010.0,
                wind_speed_mps: 3.0,
                description: "clear sky".into(),
            })
        }
    }

    #[tokio::test]
    async fn reading_echoes_every_supported_city() {
        let provider = Arc::new(StubProvider::default());
        let service = WeatherService::new(provider.clone());

        for city in &SUPPORTED_CITIES {
            let reading = service.get_weather(city.name).await.unwrap();
            assert_eq!(reading.city, city.name);
            assert!(!reading.observed_at.is_empty());
        }

        assert_eq!(provider.calls.lock().unwrap().len(), SUPPORTED_CITIES.len());
    }

    #[tokio::test]
    async fn unknown_city_never_reaches_provider() {
        let provider = Arc::new(StubProvider::default());
        let service = WeatherService::new(provider.clone());

        let err = service.get_weather("  Atlantis ").await.unwrap_err();

        assert!(matches!(&err, WeatherError::InvalidCity(name) if name == "Atlantis"));
        assert!(provider.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn padded_name_resolves_to_table_name() {
        let service = WeatherService::new(Arc::new(StubProvider::default()));
        let reading = service.get_weather(" Ongole ").await.unwrap();
        assert_eq!(reading.city, "Ongole");
    }

    #[tokio::test]
    async fn provider_failures_propagate() {
        let provider = Arc::new(StubProvider { fail_with: Some(404), ..Default::default() });
        let service = WeatherService::new(provider);

        let err = service.get_weather("Chennai").await.unwrap_err();
        assert!(matches!(err, WeatherError::UpstreamUnavailable { status: 404 }));
    }
}
