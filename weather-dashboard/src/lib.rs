//! Dashboard client for the weather proxy.
//!
//! This crate defines:
//! - The refresh state machine ([`controller`]) and the state it owns
//! - The bounded temperature trend and the auto-refresh timer
//! - The HTTP client for the proxy
//! - A renderer producing terminal frames from state

pub mod client;
pub mod controller;
pub mod input;
pub mod render;
pub mod schedule;
pub mod state;
pub mod trend;

pub use client::{FetchError, ProxyClient, WeatherSource};
pub use controller::{Controller, DashboardEvent, FetchOutcome};
pub use state::{DashboardState, Phase};
pub use trend::{TREND_CAPACITY, TrendBuffer, TrendSample};
