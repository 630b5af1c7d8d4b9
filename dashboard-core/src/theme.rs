//! Mapping from condition category to display theming.

use crate::model::ConditionCategory;

/// Weather glyph shown next to a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Sun,
    Cloud,
    Rain,
    Snow,
    Storm,
    Fog,
}

impl Icon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Sun => "☀",
            Icon::Cloud => "☁",
            Icon::Rain => "☂",
            Icon::Snow => "❄",
            Icon::Storm => "⚡",
            Icon::Fog => "≋",
        }
    }
}

/// Background theme of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    /// No weather loaded yet.
    Default,
    Sunny,
    Overcast,
    Rainy,
    Frosty,
    Stormy,
}

impl Backdrop {
    pub fn label(&self) -> &'static str {
        match self {
            Backdrop::Default => "twilight",
            Backdrop::Sunny => "golden",
            Backdrop::Overcast => "grey",
            Backdrop::Rainy => "blue",
            Backdrop::Frosty => "ice",
            Backdrop::Stormy => "storm",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Appearance {
    pub icon: Icon,
    pub backdrop: Backdrop,
}

const CLOUDY: Appearance = Appearance { icon: Icon::Cloud, backdrop: Backdrop::Overcast };

/// Total and deterministic; unrecognised categories look like "Clouds".
pub fn appearance(condition: &ConditionCategory) -> Appearance {
    match condition {
        ConditionCategory::Clear => Appearance { icon: Icon::Sun, backdrop: Backdrop::Sunny },
        ConditionCategory::Clouds => CLOUDY,
        ConditionCategory::Rain | ConditionCategory::Drizzle => {
            Appearance { icon: Icon::Rain, backdrop: Backdrop::Rainy }
        }
        ConditionCategory::Snow => Appearance { icon: Icon::Snow, backdrop: Backdrop::Frosty },
        ConditionCategory::Thunderstorm => {
            Appearance { icon: Icon::Storm, backdrop: Backdrop::Stormy }
        }
        ConditionCategory::Mist | ConditionCategory::Fog | ConditionCategory::Haze => {
            Appearance { icon: Icon::Fog, backdrop: Backdrop::Overcast }
        }
        ConditionCategory::Other(_) => CLOUDY,
    }
}

/// Backdrop for the whole view: the current condition's, or the default before any result.
pub fn backdrop_for(condition: Option<&ConditionCategory>) -> Backdrop {
    condition.map_or(Backdrop::Default, |c| appearance(c).backdrop)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clouds_map_to_cloud_and_overcast() {
        let look = appearance(&ConditionCategory::Clouds);
        assert_eq!(look.icon, Icon::Cloud);
        assert_eq!(look.backdrop, Backdrop::Overcast);
    }

    #[test]
    fn unknown_category_falls_back_to_cloudy() {
        let unknown = ConditionCategory::from("Volcanic ash");
        assert_eq!(appearance(&unknown), appearance(&ConditionCategory::Clouds));
        assert_eq!(appearance(&ConditionCategory::from("")), CLOUDY);
    }

    #[test]
    fn fog_family_shares_an_icon() {
        for raw in ["Mist", "Fog", "Haze"] {
            assert_eq!(appearance(&ConditionCategory::from(raw)).icon, Icon::Fog);
        }
    }

    #[test]
    fn each_known_category_is_stable() {
        let cases = [
            ("Clear", Icon::Sun, Backdrop::Sunny),
            ("Rain", Icon::Rain, Backdrop::Rainy),
            ("Drizzle", Icon::Rain, Backdrop::Rainy),
            ("Snow", Icon::Snow, Backdrop::Frosty),
            ("Thunderstorm", Icon::Storm, Backdrop::Stormy),
        ];

        for (raw, icon, backdrop) in cases {
            let look = appearance(&ConditionCategory::from(raw));
            assert_eq!(look, Appearance { icon, backdrop }, "category {raw}");
            assert_eq!(appearance(&ConditionCategory::from(raw)), look);
        }
    }

    #[test]
    fn default_backdrop_before_any_result() {
        assert_eq!(backdrop_for(None), Backdrop::Default);
        assert_eq!(backdrop_for(Some(&ConditionCategory::Clear)), Backdrop::Sunny);
    }
}
