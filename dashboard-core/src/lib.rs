//! Core library for the `weather-dashboard` terminal app.
//!
//! This crate defines:
//! - The search workflow and the observable UI state it drives
//! - The OpenWeather client behind the `WeatherProvider` seam
//! - Location resolution with a fallback city
//! - Configuration & credentials handling
//! - Condition theming used by renderers
//!
//! It is used by `dashboard-cli`, but can also be driven by other front ends.

pub mod config;
pub mod dashboard;
pub mod forecast;
pub mod history;
pub mod location;
pub mod model;
pub mod provider;
pub mod state;
pub mod theme;

pub use config::Config;
pub use dashboard::{Dashboard, GENERIC_ERROR};
pub use history::{HISTORY_CAPACITY, SearchHistory};
pub use location::{FALLBACK_CITY, FixedGeolocator, Geolocator, IpGeolocator, LocationError, NoGeolocator};
pub use model::{ConditionCategory, Coordinates, ForecastDay, ForecastReading, Query, WeatherSnapshot};
pub use provider::{FetchError, WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use state::UiState;
pub use theme::{Appearance, Backdrop, Icon, appearance};
