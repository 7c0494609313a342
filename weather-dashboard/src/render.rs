//! Turns dashboard state into a description of what to draw.
//!
//! [`frame`] is pure; the terminal only ever sees the `Display` output of a
//! [`Frame`].

use std::fmt;

use weather_core::WeatherReading;

use crate::state::DashboardState;

const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub label: &'static str,
    pub value: Option<f64>,
    pub unit: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub bars: Vec<Metric>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub label: String,
    pub temperature_c: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendChart {
    pub title: String,
    pub points: Vec<TrendPoint>,
}

/// One full redraw of the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub status: String,
    pub values: Option<Vec<Metric>>,
    pub bar_chart: Option<BarChart>,
    pub trend_chart: Option<TrendChart>,
}

/// Format a value with one decimal, or `N/A`.
pub fn fmt_value(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v:.1} {unit}"),
        None => "N/A".to_string(),
    }
}

fn metrics(reading: &WeatherReading) -> Vec<Metric> {
    vec![
        Metric { label: "Temperature", value: Some(reading.temperature_c), unit: "°C" },
        Metric { label: "Humidity", value: Some(reading.humidity_pct), unit: "%" },
        Metric { label: "Wind", value: Some(reading.wind_speed_mps), unit: "m/s" },
        Metric { label: "Pressure", value: Some(reading.pressure_hpa), unit: "hPa" },
    ]
}

pub fn frame(state: &DashboardState) -> Frame {
    let bar_chart = state.chart.as_ref().map(|reading| BarChart {
        title: format!("Weather Data in {}", reading.city),
        bars: metrics(reading),
    });

    let trend_chart = (!state.trend.is_empty()).then(|| TrendChart {
        title: format!("Temperature Trend in {}", state.selected_city),
        points: state
            .trend
            .iter()
            .map(|s| TrendPoint {
                label: s.at.format("%H:%M:%S").to_string(),
                temperature_c: s.temperature_c,
            })
            .collect(),
    });

    Frame {
        status: state.status.clone(),
        values: state.values.as_ref().map(metrics),
        bar_chart,
        trend_chart,
    }
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(len.clamp(1, BAR_WIDTH))
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.status)?;

        if let Some(values) = &self.values {
            let line: Vec<String> = values
                .iter()
                .map(|m| format!("{} {}", m.label, fmt_value(m.value, m.unit)))
                .collect();
            writeln!(f, "{}", line.join(" | "))?;
        }

        if let Some(chart) = &self.bar_chart {
            writeln!(f, "\n{}", chart.title)?;
            let max = chart.bars.iter().filter_map(|m| m.value).fold(0.0, f64::max);
            for m in &chart.bars {
                writeln!(
                    f,
                    "  {:<12} {:>12}  {}",
                    m.label,
                    fmt_value(m.value, m.unit),
                    bar(m.value.unwrap_or_default(), max)
                )?;
            }
        }

        if let Some(chart) = &self.trend_chart {
            writeln!(f, "\n{}", chart.title)?;
            let min = chart.points.iter().map(|p| p.temperature_c).fold(f64::INFINITY, f64::min);
            let max = chart.points.iter().map(|p| p.temperature_c).fold(f64::NEG_INFINITY, f64::max);
            // Shift so the coldest sample still gets a visible bar.
            let floor = min - 1.0;
            for p in &chart.points {
                writeln!(
                    f,
                    "  {}  {:>8}  {}",
                    p.label,
                    fmt_value(Some(p.temperature_c), "°C"),
                    bar(p.temperature_c - floor, max - floor)
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{state::Phase, trend::TrendSample};
    use chrono::{Local, TimeZone};

    fn reading(city: &str, temp: f64) -> WeatherReading {
        WeatherReading {
            city: city.into(),
            temperature_c: temp,
            humidity_pct: 60.0,
            pressure_hpa: 1010.0,
            wind_speed_mps: 3.0,
            description: "clear sky".into(),
            observed_at: "2026-10-17 12:00:00".into(),
        }
    }

    #[test]
    fn fmt_value_uses_one_decimal() {
        assert_eq!(fmt_value(Some(25.0), "°C"), "25.0 °C");
        assert_eq!(fmt_value(Some(3.14159), "m/s"), "3.1 m/s");
        assert_eq!(fmt_value(None, "%"), "N/A");
    }

    #[test]
    fn idle_state_draws_only_status() {
        let state = DashboardState::new("Delhi");
        let frame = frame(&state);
        assert_eq!(frame.values, None);
        assert_eq!(frame.bar_chart, None);
        assert_eq!(frame.trend_chart, None);
    }

    #[test]
    fn rendered_state_describes_both_charts() {
        let mut state = DashboardState::new("Delhi");
        state.phase = Phase::Rendered;
        state.values = Some(reading("Delhi", 25.0));
        state.chart = Some(reading("Delhi", 25.0));
        let at = Local.with_ymd_and_hms(2026, 10, 17, 9, 5, 7).unwrap();
        state.trend.push(TrendSample { at, temperature_c: 25.0 });

        let frame = frame(&state);

        let bars = frame.bar_chart.expect("bar chart");
        assert_eq!(bars.title, "Weather Data in Delhi");
        let labels: Vec<_> = bars.bars.iter().map(|m| m.label).collect();
        assert_eq!(labels, ["Temperature", "Humidity", "Wind", "Pressure"]);

        let trend = frame.trend_chart.expect("trend chart");
        assert_eq!(trend.title, "Temperature Trend in Delhi");
        assert_eq!(trend.points, [TrendPoint { label: "09:05:07".into(), temperature_c: 25.0 }]);
    }

    #[test]
    fn failed_state_keeps_charts_but_not_values() {
        let mut state = DashboardState::new("Delhi");
        state.phase = Phase::Failed;
        state.status = "Error: HTTP 500".into();
        state.chart = Some(reading("Delhi", 25.0));

        let frame = frame(&state);
        assert!(frame.values.is_none());
        assert!(frame.bar_chart.is_some());

        let text = frame.to_string();
        assert!(text.starts_with("Error: HTTP 500\n"));
        assert!(text.contains("Weather Data in Delhi"));
    }

    #[test]
    fn display_lists_numeric_panel() {
        let mut state = DashboardState::new("Mumbai");
        state.values = Some(reading("Mumbai", 31.5));

        let text = frame(&state).to_string();
        assert!(text.contains(
            "Temperature 31.5 °C | Humidity 60.0 % | Wind 3.0 m/s | Pressure 1010.0 hPa"
        ));
    }

    #[test]
    fn bars_scale_to_largest_value() {
        assert_eq!(bar(10.0, 10.0).chars().count(), BAR_WIDTH);
        assert_eq!(bar(5.0, 10.0).chars().count(), BAR_WIDTH / 2);
        assert_eq!(bar(0.0, 10.0), "");
        assert_eq!(bar(-3.0, 10.0), "");
    }
}
