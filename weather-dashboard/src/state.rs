use chrono::{DateTime, Local};
use weather_core::WeatherReading;

use crate::trend::TrendBuffer;

/// Where the current refresh cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Fetching,
    Rendered,
    Failed,
}

/// Everything the dashboard shows, owned by the controller.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub selected_city: String,
    pub phase: Phase,
    pub status: String,
    /// Numeric panel; wiped on failure.
    pub values: Option<WeatherReading>,
    /// Last successful reading backing the bar chart. Survives failures.
    pub chart: Option<WeatherReading>,
    pub trend: TrendBuffer,
    pub last_updated: Option<DateTime<Local>>,
}

impl DashboardState {
    pub fn new(selected_city: impl Into<String>) -> Self {
        Self { selected_city: selected_city.into(), ..Default::default() }
    }
}
