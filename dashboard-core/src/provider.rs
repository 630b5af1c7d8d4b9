use crate::{
    Config,
    model::{ForecastReading, Query, WeatherSnapshot},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Why a provider call produced no payload.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The provider understood the request but had no result (e.g. unknown city).
    #[error("{message}")]
    Domain { message: String },

    /// Network failure or a response that could not be interpreted.
    #[error("transport error: {0:#}")]
    Transport(#[from] anyhow::Error),
}

impl FetchError {
    pub fn domain(message: impl Into<String>) -> Self {
        FetchError::Domain { message: message.into() }
    }
}

pub type FetchResult<T> = Result<T, FetchError>;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for the query's location.
    async fn current(&self, query: &Query) -> FetchResult<WeatherSnapshot>;

    /// 3-hour forecast readings, oldest first.
    async fn forecast(&self, query: &Query) -> FetchResult<Vec<ForecastReading>>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key()?;
    let provider = OpenWeatherProvider::with_base_url(api_key.to_owned(), config.base_url());
    Ok(Box::new(provider))
}
