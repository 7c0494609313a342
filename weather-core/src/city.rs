use std::fmt;

/// A city the dashboard knows how to resolve to coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupportedCity {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

impl fmt::Display for SupportedCity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.4}, {:.4})", self.name, self.latitude, self.longitude)
    }
}

/// City shown when nothing else was selected.
pub const DEFAULT_CITY: &str = "Delhi";

pub const SUPPORTED_CITIES: [SupportedCity; 8] = [
    SupportedCity { name: "Delhi", latitude: 28.6139, longitude: 77.209 },
    SupportedCity { name: "Mumbai", latitude: 19.076, longitude: 72.8777 },
    SupportedCity { name: "Chennai", latitude: 13.0827, longitude: 80.2707 },
    SupportedCity { name: "Kolkata", latitude: 22.5726, longitude: 88.3639 },
    SupportedCity { name: "Hyderabad", latitude: 17.385, longitude: 78.4867 },
    SupportedCity { name: "Bengaluru", latitude: 12.9716, longitude: 77.5946 },
    SupportedCity { name: "Dharmavaram", latitude: 14.4140, longitude: 77.7124 },
    SupportedCity { name: "Ongole", latitude: 15.5057, longitude: 80.0499 },
];

/// Resolve a user-supplied name against the table.
///
/// Surrounding whitespace is ignored; the comparison itself is exact and
/// case-sensitive.
pub fn lookup(name: &str) -> Option<&'static SupportedCity> {
    let name = name.trim();
    SUPPORTED_CITIES.iter().find(|c| c.name == name)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    SUPPORTED_CITIES.iter().map(|c| c.name)
}
