//! Refresh state machine of the dashboard.
//!
//! The controller is the only owner of [`DashboardState`] and of the refresh
//! timer. Fetches run as spawned tasks and report back through the event
//! channel, tagged with a sequence number so that a slow response can never
//! overwrite a newer one.

use std::{ops::ControlFlow, sync::Arc};

use chrono::Local;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use weather_core::WeatherReading;

use crate::{
    client::{FetchError, WeatherSource},
    schedule::RefreshSchedule,
    state::{DashboardState, Phase},
    trend::TrendSample,
};

/// Display format of the "last updated" status.
pub const STATUS_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug)]
pub enum DashboardEvent {
    SelectCity(String),
    Refresh,
    Tick,
    Fetched(FetchOutcome),
    Quit,
}

/// Completion of one fetch.
#[derive(Debug)]
pub struct FetchOutcome {
    pub seq: u64,
    pub city: String,
    pub manual: bool,
    pub result: Result<WeatherReading, FetchError>,
}

#[derive(Debug)]
pub struct Controller {
    state: DashboardState,
    source: Arc<dyn WeatherSource>,
    schedule: RefreshSchedule,
    tx: UnboundedSender<DashboardEvent>,
    next_seq: u64,
    last_applied: u64,
    /// First sequence number issued for the current selection.
    selection_start: u64,
}

impl Controller {
    pub fn new(
        source: Arc<dyn WeatherSource>,
        initial_city: impl Into<String>,
    ) -> (Self, UnboundedReceiver<DashboardEvent>) {
        Self::with_schedule(source, initial_city, RefreshSchedule::default())
    }

    pub fn with_schedule(
        source: Arc<dyn WeatherSource>,
        initial_city: impl Into<String>,
        schedule: RefreshSchedule,
    ) -> (Self, UnboundedReceiver<DashboardEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = Self {
            state: DashboardState::new(initial_city),
            source,
            schedule,
            tx,
            next_seq: 1,
            last_applied: 0,
            selection_start: 1,
        };
        (controller, rx)
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn schedule(&self) -> &RefreshSchedule {
        &self.schedule
    }

    /// Handle for feeding user input into the event loop.
    pub fn sender(&self) -> UnboundedSender<DashboardEvent> {
        self.tx.clone()
    }

    /// Initial load of the selected city, then start auto-refresh.
    pub fn start(&mut self) {
        let city = self.state.selected_city.clone();
        self.load_city(&city, false);
        self.reset_auto_refresh();
    }

    /// Issue a fetch for `city` and return its sequence number.
    ///
    /// Never fails: the outcome arrives later as [`DashboardEvent::Fetched`].
    pub fn load_city(&mut self, city: &str, manual: bool) -> u64 {
        self.state.phase = Phase::Fetching;
        self.state.status = if manual {
            format!("Refreshing data for {city}...")
        } else {
            format!(
                "Fetching data for {city}... (auto refresh every {}s)",
                self.schedule.period().as_secs()
            )
        };

        let seq = self.next_seq;
        self.next_seq += 1;

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let city = city.to_string();
        tokio::spawn(async move {
            let result = source.fetch(&city).await;
            // The receiver is gone once the dashboard quits.
            let _ = tx.send(DashboardEvent::Fetched(FetchOutcome { seq, city, manual, result }));
        });

        seq
    }

    pub fn on_city_changed(&mut self, city: String) {
        tracing::debug!(%city, "city changed");
        self.state.selected_city = city;
        self.state.trend.clear();
        self.selection_start = self.next_seq;

        let city = self.state.selected_city.clone();
        self.load_city(&city, false);
        self.reset_auto_refresh();
    }

    pub fn on_manual_refresh(&mut self) {
        let city = self.state.selected_city.clone();
        self.load_city(&city, true);
    }

    pub fn reset_auto_refresh(&mut self) {
        self.schedule.reset(self.tx.clone(), || DashboardEvent::Tick);
    }

    /// Apply a fetch outcome unless something newer was already applied.
    /// Returns whether the state changed.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.seq <= self.last_applied || outcome.seq < self.selection_start {
            tracing::debug!(
                seq = outcome.seq,
                last_applied = self.last_applied,
                city = %outcome.city,
                "dropping stale response"
            );
            return false;
        }
        self.last_applied = outcome.seq;

        match outcome.result {
            Ok(reading) => {
                let now = Local::now();
                self.state.trend.push(TrendSample { at: now, temperature_c: reading.temperature_c });
                self.state.values = Some(reading.clone());
                self.state.chart = Some(reading);
                self.state.last_updated = Some(now);
                self.state.phase = Phase::Rendered;
                self.state.status = format!(
                    "Last updated: {} | Auto-refresh every {}s",
                    now.format(STATUS_TIME_FORMAT),
                    self.schedule.period().as_secs()
                );
            }
            Err(err) => {
                tracing::error!(city = %outcome.city, manual = outcome.manual, error = %err, "fetch error");
                self.state.values = None;
                self.state.phase = Phase::Failed;
                self.state.status = format!("Error: {err}");
            }
        }
        true
    }

    pub fn handle(&mut self, event: DashboardEvent) -> ControlFlow<()> {
        match event {
            DashboardEvent::SelectCity(city) => self.on_city_changed(city),
            DashboardEvent::Refresh => self.on_manual_refresh(),
            DashboardEvent::Tick => {
                let city = self.state.selected_city.clone();
                self.load_city(&city, false);
            }
            DashboardEvent::Fetched(outcome) => {
                self.apply(outcome);
            }
            DashboardEvent::Quit => {
                self.schedule.cancel();
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }
}
