//! The search-and-render workflow.
//!
//! [`Dashboard`] owns the [`UiState`] and publishes every change through a
//! `tokio::sync::watch` channel so a renderer can follow along. A search runs
//! two sequential provider calls (current conditions, then forecast) and never
//! lets an error escape: every outcome ends up in the state.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tokio::sync::watch;

use crate::{
    forecast::midday_samples,
    location::{FALLBACK_CITY, Geolocator, resolve_initial_query},
    model::Query,
    provider::{FetchError, WeatherProvider},
    state::UiState,
};

/// Shown for transport failures and anything that goes wrong after the current-conditions call.
pub const GENERIC_ERROR: &str = "Something went wrong.";

#[derive(Debug)]
pub struct Dashboard {
    provider: Box<dyn WeatherProvider>,
    state: watch::Sender<UiState>,
    /// Incremented by every search; only the newest one may touch the state.
    generation: AtomicU64,
    started: AtomicBool,
    fallback_city: String,
}

impl Dashboard {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        let (state, _) = watch::channel(UiState::default());
        Self {
            provider,
            state,
            generation: AtomicU64::new(0),
            started: AtomicBool::new(false),
            fallback_city: FALLBACK_CITY.to_string(),
        }
    }

    pub fn with_fallback_city(mut self, city: impl Into<String>) -> Self {
        self.fallback_city = city.into();
        self
    }

    pub fn with_dark_mode(self, dark_mode: bool) -> Self {
        self.state.send_modify(|state| state.dark_mode = dark_mode);
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state.subscribe()
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> UiState {
        self.state.borrow().clone()
    }

    pub fn set_query_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_if_modified(|state| {
            if state.query_text == text {
                return false;
            }
            state.query_text = text;
            true
        });
    }

    /// Flip the theme, returning the new dark-mode flag.
    pub fn toggle_theme(&self) -> bool {
        let mut dark_mode = false;
        self.state.send_modify(|state| {
            state.dark_mode = !state.dark_mode;
            dark_mode = state.dark_mode;
        });
        dark_mode
    }

    /// Resolve the initial location and search it. Runs once per dashboard; later calls
    /// return `false` without doing anything.
    pub async fn start(&self, geo: &dyn Geolocator) -> bool {
        if self.started.swap(true, Ordering::SeqCst) {
            tracing::debug!("dashboard already started");
            return false;
        }

        let query = resolve_initial_query(geo, &self.fallback_city).await;
        self.search(query).await;
        true
    }

    /// Search whatever is in the text box (the "Enter" action).
    pub async fn submit(&self) {
        let text = self.state.borrow().query_text.clone();
        self.search(Query::Name(text)).await;
    }

    /// Re-run the history entry at `index`. Returns `false` when there is no such entry.
    pub async fn search_history(&self, index: usize) -> bool {
        let name = self.state.borrow().history.get(index).map(str::to_string);
        match name {
            Some(name) => {
                self.search(Query::Name(name)).await;
                true
            }
            None => false,
        }
    }

    /// Look up current conditions and the daily forecast for `query`.
    ///
    /// An empty name is ignored. Otherwise `loading` is set and the previous result
    /// cleared before any request goes out, and `loading` is cleared again on every
    /// exit path.
    pub async fn search(&self, query: Query) {
        if query.is_empty() {
            tracing::debug!("ignoring empty query");
            return;
        }
        let query = query.normalized();

        let generation = self.begin_search();
        tracing::debug!(generation, %query, "search started");

        let outcome = self.run(&query, generation).await;

        self.apply(generation, |state| {
            state.loading = false;
            if let Err(message) = outcome {
                state.error = Some(message);
            }
        });
    }

    /// Claim the next generation and reset the state in one watch update.
    ///
    /// The claim happens under the channel's write lock, so resets are published in
    /// generation order and an older search can never clear a newer one's result.
    fn begin_search(&self) -> u64 {
        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            state.begin_request();
        });
        generation
    }

    async fn run(&self, query: &Query, generation: u64) -> Result<(), String> {
        let snapshot = self.provider.current(query).await.map_err(|err| match err {
            FetchError::Domain { message } => {
                tracing::info!(%query, %message, "provider rejected query");
                message
            }
            FetchError::Transport(err) => {
                tracing::warn!(%query, error = ?err, "current conditions request failed");
                GENERIC_ERROR.to_string()
            }
        })?;

        let resolved_name = match query {
            Query::Name(name) => name.clone(),
            Query::Coordinates(_) => snapshot.location_name.clone(),
        };
        let from_coordinates = matches!(query, Query::Coordinates(_));

        self.apply(generation, |state| {
            if from_coordinates {
                state.query_text = resolved_name.clone();
            }
            state.weather = Some(snapshot);
        });

        let readings = self.provider.forecast(query).await.map_err(|err| {
            tracing::warn!(%query, %err, "forecast request failed");
            GENERIC_ERROR.to_string()
        })?;

        let days = midday_samples(&readings);
        tracing::debug!(%query, readings = readings.len(), days = days.len(), "forecast sampled");

        self.apply(generation, |state| {
            state.forecast = days;
            state.history.record(&resolved_name);
        });

        Ok(())
    }

    /// Mutate the state on behalf of search `generation`, unless a newer search has started.
    fn apply<F>(&self, generation: u64, update: F)
    where
        F: FnOnce(&mut UiState),
    {
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                tracing::debug!(generation, "discarding result of superseded search");
                return false;
            }
            update(state);
            true
        });
    }
}
