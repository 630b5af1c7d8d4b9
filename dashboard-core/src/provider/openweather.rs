use anyhow::{Context, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use crate::model::{ConditionCategory, ForecastReading, Query, WeatherSnapshot};

use super::{FetchError, FetchResult, WeatherProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Status the provider reports in the body's `cod` field when a lookup succeeded.
const SUCCESS_CODE: i64 = 200;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, endpoint: &str, query: &Query) -> FetchResult<T> {
        let url = format!("{}/data/2.5/{endpoint}", self.base_url);

        let mut params = location_params(query);
        params.push(("appid", self.api_key.clone()));
        params.push(("units", "metric".to_string()));

        tracing::debug!(endpoint, %query, "requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather ({endpoint})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read OpenWeather {endpoint} response body"))?;

        tracing::debug!(endpoint, %status, "OpenWeather responded");

        interpret(endpoint, &body)
    }
}

/// Query parameters selecting the location: `q` for names, `lat`/`lon` for coordinates.
fn location_params(query: &Query) -> Vec<(&'static str, String)> {
    match query {
        Query::Name(name) => vec![("q", name.clone())],
        Query::Coordinates(coords) => {
            vec![("lat", coords.lat.to_string()), ("lon", coords.lon.to_string())]
        }
    }
}

/// Decide success from the body's `cod` field rather than the HTTP status.
fn interpret<T: DeserializeOwned>(endpoint: &str, body: &str) -> FetchResult<T> {
    let value: Value = serde_json::from_str(body).with_context(|| {
        format!("OpenWeather {endpoint} response is not JSON: {}", truncate_body(body))
    })?;

    match status_code(&value) {
        Some(SUCCESS_CODE) => {
            let parsed = serde_json::from_value(value)
                .with_context(|| format!("Failed to parse OpenWeather {endpoint} JSON"))?;
            Ok(parsed)
        }
        Some(code) => {
            let message = value
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or("unknown provider error");
            tracing::debug!(endpoint, code, message, "OpenWeather reported an error");
            Err(FetchError::domain(message))
        }
        None => Err(anyhow!(
            "OpenWeather {endpoint} response carried no status code: {}",
            truncate_body(body)
        )
        .into()),
    }
}

/// `cod` is a number on `/weather` and a string on `/forecast`.
fn status_code(value: &Value) -> Option<i64> {
    match value.get("cod")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    sys: OwSys,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt_txt: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn condition_of(weather: &[OwWeather]) -> (ConditionCategory, String) {
    weather
        .first()
        .map(|w| (ConditionCategory::from(w.main.as_str()), w.description.clone()))
        .unwrap_or_else(|| (ConditionCategory::Other("Unknown".to_string()), String::new()))
}

impl From<OwCurrentResponse> for WeatherSnapshot {
    fn from(parsed: OwCurrentResponse) -> Self {
        let (condition, description) = condition_of(&parsed.weather);

        WeatherSnapshot {
            location_name: parsed.name,
            country: parsed.sys.country.unwrap_or_default(),
            temperature_c: parsed.main.temp,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            condition,
            description,
        }
    }
}

impl From<OwForecastEntry> for ForecastReading {
    fn from(entry: OwForecastEntry) -> Self {
        let (condition, description) = condition_of(&entry.weather);

        ForecastReading {
            timestamp: entry.dt_txt,
            temperature_c: entry.main.temp,
            condition,
            description,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, query: &Query) -> FetchResult<WeatherSnapshot> {
        let parsed: OwCurrentResponse = self.fetch("weather", query).await?;
        Ok(parsed.into())
    }

    async fn forecast(&self, query: &Query) -> FetchResult<Vec<ForecastReading>> {
        let parsed: OwForecastResponse = self.fetch("forecast", query).await?;
        Ok(parsed.list.into_iter().map(ForecastReading::from).collect())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
