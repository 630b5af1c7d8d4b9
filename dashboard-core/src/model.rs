use chrono::NaiveDate;
use std::fmt;

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Location specifier for a search: either a free-text name or coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Name(String),
    Coordinates(Coordinates),
}

impl Query {
    pub fn name(name: impl Into<String>) -> Self {
        Query::Name(name.into())
    }

    pub fn coordinates(lat: f64, lon: f64) -> Self {
        Query::Coordinates(Coordinates { lat, lon })
    }

    /// A name query with nothing but whitespace is empty. Coordinates never are.
    pub fn is_empty(&self) -> bool {
        matches!(self, Query::Name(name) if name.trim().is_empty())
    }

    /// Strip surrounding whitespace from a name query.
    pub fn normalized(self) -> Self {
        match self {
            Query::Name(name) => Query::Name(name.trim().to_string()),
            coords => coords,
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Name(name) => f.write_str(name),
            Query::Coordinates(Coordinates { lat, lon }) => write!(f, "{lat:.4}, {lon:.4}"),
        }
    }
}

/// Coarse weather classification reported by the provider (`weather[0].main`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConditionCategory {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Snow,
    Thunderstorm,
    Mist,
    Fog,
    Haze,
    Other(String),
}

impl ConditionCategory {
    pub fn as_str(&self) -> &str {
        match self {
            ConditionCategory::Clear => "Clear",
            ConditionCategory::Clouds => "Clouds",
            ConditionCategory::Rain => "Rain",
            ConditionCategory::Drizzle => "Drizzle",
            ConditionCategory::Snow => "Snow",
            ConditionCategory::Thunderstorm => "Thunderstorm",
            ConditionCategory::Mist => "Mist",
            ConditionCategory::Fog => "Fog",
            ConditionCategory::Haze => "Haze",
            ConditionCategory::Other(raw) => raw,
        }
    }
}

impl From<&str> for ConditionCategory {
    fn from(value: &str) -> Self {
        match value {
            "Clear" => ConditionCategory::Clear,
            "Clouds" => ConditionCategory::Clouds,
            "Rain" => ConditionCategory::Rain,
            "Drizzle" => ConditionCategory::Drizzle,
            "Snow" => ConditionCategory::Snow,
            "Thunderstorm" => ConditionCategory::Thunderstorm,
            "Mist" => ConditionCategory::Mist,
            "Fog" => ConditionCategory::Fog,
            "Haze" => ConditionCategory::Haze,
            other => ConditionCategory::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ConditionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current conditions for a location.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub location_name: String,
    /// ISO country code; empty when the provider omits it.
    pub country: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub condition: ConditionCategory,
    pub description: String,
}

impl WeatherSnapshot {
    /// Temperature as shown to the user, rounded to whole degrees.
    pub fn display_temperature(&self) -> i64 {
        self.temperature_c.round() as i64
    }

    /// "Paris, FR", or just the name when no country is known.
    pub fn display_location(&self) -> String {
        if self.country.is_empty() {
            self.location_name.clone()
        } else {
            format!("{}, {}", self.location_name, self.country)
        }
    }
}

/// One 3-hour reading from the forecast feed, timestamp kept as the provider sent it.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastReading {
    pub timestamp: String,
    pub temperature_c: f64,
    pub condition: ConditionCategory,
    pub description: String,
}

/// One daily sample derived from the forecast feed.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub temperature_c: f64,
    pub condition: ConditionCategory,
    pub description: String,
}

impl ForecastDay {
    pub fn display_temperature(&self) -> i64 {
        self.temperature_c.round() as i64
    }

    /// Short weekday name, e.g. "Mon".
    pub fn weekday_label(&self) -> String {
        self.date.format("%a").to_string()
    }
}

/// Capitalise the first letter of a provider description ("broken clouds" -> "Broken clouds").
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
