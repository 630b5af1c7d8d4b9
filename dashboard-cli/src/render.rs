//! Plain-text rendering of [`UiState`].

use dashboard_core::{
    UiState, appearance,
    model::capitalize,
    theme::backdrop_for,
};

pub const LOADING: &str = "Loading weather...";

const WIDTH: usize = 48;

pub fn render(state: &UiState) -> String {
    let rule = if state.dark_mode { "━" } else { "─" }.repeat(WIDTH);
    let backdrop = backdrop_for(state.weather.as_ref().map(|w| &w.condition));
    let theme = if state.dark_mode { "dark" } else { "light" };

    let mut lines = vec![
        rule.clone(),
        format!(" Weather Dashboard · {theme} · {} sky", backdrop.label()),
        rule.clone(),
    ];

    if !state.history.is_empty() {
        let shortcuts: Vec<String> = state
            .history
            .iter()
            .enumerate()
            .map(|(i, name)| format!("[{}] {name}", i + 1))
            .collect();
        lines.push(format!(" Recent: {}", shortcuts.join("  ")));
    }

    if state.loading {
        lines.push(format!(" {LOADING}"));
    }

    if let Some(error) = &state.error {
        lines.push(format!(" ! {error}"));
    }

    if let Some(weather) = &state.weather {
        let look = appearance(&weather.condition);
        lines.push(String::new());
        lines.push(format!(" {}", weather.display_location()));
        lines.push(format!(
            " {} {}°C  {}",
            look.icon.glyph(),
            weather.display_temperature(),
            capitalize(&weather.description)
        ));
        lines.push(format!(
            " Humidity {}%   Wind {} m/s",
            weather.humidity_pct, weather.wind_speed_mps
        ));
    }

    if !state.forecast.is_empty() {
        let cards: Vec<String> = state
            .forecast
            .iter()
            .map(|day| {
                format!(
                    "{} {} {}°C",
                    day.weekday_label(),
                    appearance(&day.condition).icon.glyph(),
                    day.display_temperature()
                )
            })
            .collect();
        lines.push(String::new());
        lines.push(format!(" {}", cards.join(" | ")));
    }

    if !state.loading && state.weather.is_none() && state.error.is_none() {
        lines.push(" Type a city name and press Enter.".to_string());
    }

    lines.push(rule);

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
