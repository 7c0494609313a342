use std::{ops::ControlFlow, sync::Arc};

use anyhow::bail;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use weather_core::{DEFAULT_CITY, SUPPORTED_CITIES, city};
use weather_dashboard::{
    Controller, DashboardEvent, DashboardState, ProxyClient, WeatherSource,
    client::DEFAULT_PROXY_URL,
    input::{self, Command as InputCommand},
    render,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dashboard", version, about = "Weather dashboard")]
pub struct Cli {
    /// Base URL of the weather proxy.
    #[arg(long, global = true, env = "WEATHER_PROXY_URL", default_value = DEFAULT_PROXY_URL)]
    pub proxy_url: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Live dashboard with auto-refresh; reads commands from stdin.
    Watch {
        /// City shown first.
        #[arg(long, default_value = DEFAULT_CITY)]
        city: String,
    },

    /// Fetch one reading and print it.
    Show {
        /// City name, e.g. "Delhi".
        city: String,
    },

    /// List supported cities.
    Cities,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let client = ProxyClient::new(&self.proxy_url);

        match self.command {
            Command::Watch { city } => watch(Arc::new(client), &city).await,
            Command::Show { city } => show(&client, &city).await,
            Command::Cities => {
                for city in &SUPPORTED_CITIES {
                    println!("{city}");
                }
                Ok(())
            }
        }
    }
}

async fn show(client: &ProxyClient, city: &str) -> anyhow::Result<()> {
    let reading = client.fetch(city).await?;

    let mut state = DashboardState::new(reading.city.clone());
    state.status = format!("{} | {} | {}", reading.city, reading.description, reading.observed_at);
    state.values = Some(reading.clone());
    state.chart = Some(reading);

    print!("{}", render::frame(&state));
    Ok(())
}

async fn watch(source: Arc<dyn WeatherSource>, initial: &str) -> anyhow::Result<()> {
    let Some(initial) = city::lookup(initial) else {
        bail!(
            "Unknown city '{initial}'. Supported: {}",
            city::names().collect::<Vec<_>>().join(", ")
        );
    };

    let (mut controller, mut events) = Controller::new(source, initial.name);
    spawn_stdin_reader(controller.sender());

    println!("{}", input::HELP);
    controller.start();
    draw(&controller);

    while let Some(event) = events.recv().await {
        if controller.handle(event).is_break() {
            break;
        }
        draw(&controller);
    }

    Ok(())
}

fn draw(controller: &Controller) {
    println!("\n{}", render::frame(controller.state()));
}

fn spawn_stdin_reader(tx: tokio::sync::mpsc::UnboundedSender<DashboardEvent>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(err) => {
                    tracing::warn!(error = %err, "stopped reading stdin");
                    break;
                }
            };

            let flow = match input::parse_command(&line) {
                InputCommand::Event(event) => {
                    let quit = matches!(event, DashboardEvent::Quit);
                    if tx.send(event).is_err() || quit {
                        ControlFlow::Break(())
                    } else {
                        ControlFlow::Continue(())
                    }
                }
                InputCommand::Help => {
                    println!("{}", input::HELP);
                    ControlFlow::Continue(())
                }
                InputCommand::Invalid(msg) => {
                    println!("{msg}");
                    ControlFlow::Continue(())
                }
            };

            if flow.is_break() {
                break;
            }
        }
    });
}
