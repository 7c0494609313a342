use thiserror::Error;

/// Failures of a single `get_weather` call.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The requested name is not in the supported city table.
    #[error("City '{0}' not found in list")]
    InvalidCity(String),

    /// Upstream rejected the credential or the lookup; worth retrying later.
    #[error("upstream weather service unavailable (status {status})")]
    UpstreamUnavailable { status: u16 },

    #[error("upstream weather request failed: {0}")]
    Upstream(String),
}

impl WeatherError {
    /// Map an upstream HTTP status to the matching variant.
    pub fn from_upstream_status(status: u16, body: &str) -> Self {
        match status {
            401 | 404 => WeatherError::UpstreamUnavailable { status },
            _ => WeatherError::Upstream(format!("status {status}: {body}")),
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::Upstream(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_city_message_names_the_city() {
        let err = WeatherError::InvalidCity("Atlantis".into());
        assert_eq!(err.to_string(), "City 'Atlantis' not found in list");
    }

    #[test]
    fn auth_and_not_found_are_unavailable() {
        assert!(matches!(
            WeatherError::from_upstream_status(401, ""),
            WeatherError::UpstreamUnavailable { status: 401 }
        ));
        assert!(matches!(
            WeatherError::from_upstream_status(404, ""),
            WeatherError::UpstreamUnavailable { status: 404 }
        ));
    }

    #[test]
    fn other_statuses_are_generic_failures() {
        for status in [400, 429, 500, 502] {
            let err = WeatherError::from_upstream_status(status, "boom");
            assert!(matches!(err, WeatherError::Upstream(_)), "status {status}");
        }
    }
}
