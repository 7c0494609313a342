use serde::{Deserialize, Serialize};

/// Provider-neutral current conditions, before the proxy stamps city and time.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub pressure_hpa: f64,
    pub wind_speed_mps: f64,
    pub description: String,
}

/// Flat reading returned by `GET /api/weather`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub city: String,
    #[serde(rename = "temp")]
    pub temperature_c: f64,
    #[serde(rename = "humidity")]
    pub humidity_pct: f64,
    #[serde(rename = "pressure")]
    pub pressure_hpa: f64,
    #[serde(rename = "wind")]
    pub wind_speed_mps: f64,
    pub description: String,
    /// Proxy-local time the reading was produced, already formatted for display.
    #[serde(rename = "time")]
    pub observed_at: String,
}

impl WeatherReading {
    pub fn from_observation(city: &str, observation: Observation, observed_at: String) -> Self {
        Self {
            city: city.to_string(),
            temperature_c: observation.temperature_c,
            humidity_pct: observation.humidity_pct,
            pressure_hpa: observation.pressure_hpa,
            wind_speed_mps: observation.wind_speed_mps,
            description: observation.description,
            observed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_uses_wire_field_names() {
        let reading = WeatherReading {
            city: "Delhi".into(),
            temperature_c: 25.0,
            humidity_pct: 60.0,
            pressure_hpa: 1010.0,
            wind_speed_mps: 3.0,
            description: "clear sky".into(),
            observed_at: "2026-10-17 12:00:00".into(),
        };

        let value = serde_json::to_value(&reading).unwrap();
        let obj = value.as_object().unwrap();

        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["city", "description", "humidity", "pressure", "temp", "time", "wind"]
        );
        assert_eq!(obj["humidity"].as_f64(), Some(60.0));
        assert_eq!(obj["temp"].as_f64(), Some(25.0));
    }
}
