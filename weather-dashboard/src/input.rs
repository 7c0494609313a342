use weather_core::city;

use crate::controller::DashboardEvent;

pub const HELP: &str = "commands: r | refresh, city <name> (or just <name>), q | quit";

/// Outcome of parsing one line typed into `watch`.
#[derive(Debug)]
pub enum Command {
    Event(DashboardEvent),
    Help,
    Invalid(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    match line {
        "" => Command::Help,
        "r" | "refresh" => Command::Event(DashboardEvent::Refresh),
        "q" | "quit" | "exit" => Command::Event(DashboardEvent::Quit),
        "h" | "help" | "?" => Command::Help,
        _ => {
            let name = line.strip_prefix("city ").unwrap_or(line);
            match city::lookup(name) {
                Some(c) => Command::Event(DashboardEvent::SelectCity(c.name.to_string())),
                None => Command::Invalid(format!(
                    "unknown city '{}'; choose one of: {}",
                    name.trim(),
                    city::names().collect::<Vec<_>>().join(", ")
                )),
            }
        }
    }
}
