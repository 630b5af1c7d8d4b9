use crate::{
    history::SearchHistory,
    model::{ForecastDay, WeatherSnapshot},
};

/// Everything the rendering layer observes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    /// Text in the search box.
    pub query_text: String,
    pub weather: Option<WeatherSnapshot>,
    pub forecast: Vec<ForecastDay>,
    pub error: Option<String>,
    pub loading: bool,
    pub dark_mode: bool,
    pub history: SearchHistory,
}

impl UiState {
    /// Enter the loading state, dropping any result or error of a previous request.
    pub fn begin_request(&mut self) {
        self.loading = true;
        self.weather = None;
        self.forecast.clear();
        self.error = None;
    }
}
