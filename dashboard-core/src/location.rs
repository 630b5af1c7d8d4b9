//! Location resolution: device position if available, otherwise a fallback city.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;

use crate::model::{Coordinates, Query};

/// City searched when no position can be obtained.
pub const FALLBACK_CITY: &str = "London";

const IP_API_URL: &str = "http://ip-api.com/json";

#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location lookup denied")]
    Denied,
    #[error("Location lookup failed: {0}")]
    Lookup(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Source of the device's current position.
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, LocationError>;
}

/// Approximates the device position from its public IP address.
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    endpoint: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    city: Option<String>,
}

impl IpGeolocator {
    pub fn new() -> Self {
        Self::with_endpoint(IP_API_URL)
    }

    pub fn with_endpoint(endpoint: &str) -> Self {
        Self { endpoint: endpoint.to_string(), http: Client::new() }
    }
}

impl Default for IpGeolocator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        let response = self.http.get(&self.endpoint).send().await?;
        let body: IpApiResponse = response
            .json()
            .await
            .map_err(|err| LocationError::Lookup(format!("malformed response: {err}")))?;

        if body.status != "success" {
            let reason = body.message.unwrap_or_else(|| format!("status {}", body.status));
            return Err(LocationError::Lookup(reason));
        }

        match (body.lat, body.lon) {
            (Some(lat), Some(lon)) => {
                tracing::info!(lat, lon, city = body.city.as_deref().unwrap_or("?"), "located device by IP");
                Ok(Coordinates { lat, lon })
            }
            _ => Err(LocationError::Lookup("response carried no coordinates".to_string())),
        }
    }
}

/// Position supplied up front, e.g. on the command line.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator(pub Coordinates);

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// No location capability; every lookup is denied.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocator;

#[async_trait]
impl Geolocator for NoGeolocator {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Denied)
    }
}

/// The query a session starts with: the device position, or `fallback_city` on any failure.
pub async fn resolve_initial_query(geo: &dyn Geolocator, fallback_city: &str) -> Query {
    match geo.locate().await {
        Ok(coords) => Query::Coordinates(coords),
        Err(err) => {
            tracing::info!(%err, fallback_city, "geolocation unavailable, using fallback city");
            Query::name(fallback_city)
        }
    }
}
