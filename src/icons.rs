//! Condition code → icon mapping
//!
//! OpenWeatherMap groups its condition codes by hundreds (2xx thunderstorm,
//! 3xx drizzle, ...). Codes outside every known group fall back to `Clear`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Icon families used by the results panel and forecast cards
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WeatherIcon {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Atmosphere,
    Clear,
    Clouds,
}

impl WeatherIcon {
    pub const ALL: [WeatherIcon; 7] = [
        WeatherIcon::Thunderstorm,
        WeatherIcon::Drizzle,
        WeatherIcon::Rain,
        WeatherIcon::Snow,
        WeatherIcon::Atmosphere,
        WeatherIcon::Clear,
        WeatherIcon::Clouds,
    ];

    /// Resolve a provider condition code. Total: unknown codes map to `Clear`.
    pub fn from_code(code: i64) -> Self {
        match code {
            200..=232 => WeatherIcon::Thunderstorm,
            300..=321 => WeatherIcon::Drizzle,
            500..=531 => WeatherIcon::Rain,
            600..=622 => WeatherIcon::Snow,
            701..=781 => WeatherIcon::Atmosphere,
            800 => WeatherIcon::Clear,
            801..=804 => WeatherIcon::Clouds,
            _ => WeatherIcon::Clear,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            WeatherIcon::Thunderstorm => "thunderstorm",
            WeatherIcon::Drizzle => "drizzle",
            WeatherIcon::Rain => "rain",
            WeatherIcon::Snow => "snow",
            WeatherIcon::Atmosphere => "atmosphere",
            WeatherIcon::Clear => "clear",
            WeatherIcon::Clouds => "clouds",
        }
    }

    /// Single-glyph fallback for cells too small for a sprite
    pub fn emoji(self) -> &'static str {
        match self {
            WeatherIcon::Thunderstorm => "\u{26c8}\u{fe0f}",
            WeatherIcon::Drizzle => "\u{1f326}\u{fe0f}",
            WeatherIcon::Rain => "\u{1f327}\u{fe0f}",
            WeatherIcon::Snow => "\u{2744}\u{fe0f}",
            WeatherIcon::Atmosphere => "\u{1f32b}\u{fe0f}",
            WeatherIcon::Clear => "\u{2600}\u{fe0f}",
            WeatherIcon::Clouds => "\u{2601}\u{fe0f}",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thunderstorm_range() {
        for code in 200..=232 {
            assert_eq!(WeatherIcon::from_code(code), WeatherIcon::Thunderstorm);
        }
    }

    #[test]
    fn test_documented_ranges() {
        let cases = [
            (300, WeatherIcon::Drizzle),
            (321, WeatherIcon::Drizzle),
            (500, WeatherIcon::Rain),
            (531, WeatherIcon::Rain),
            (600, WeatherIcon::Snow),
            (622, WeatherIcon::Snow),
            (701, WeatherIcon::Atmosphere),
            (781, WeatherIcon::Atmosphere),
            (800, WeatherIcon::Clear),
            (801, WeatherIcon::Clouds),
            (804, WeatherIcon::Clouds),
        ];
        for (code, icon) in cases {
            assert_eq!(WeatherIcon::from_code(code), icon, "code {code}");
        }
    }

    #[test]
    fn test_unknown_codes_fall_back_to_clear() {
        for code in [-1, 0, 199, 233, 322, 450, 532, 623, 700, 782, 805, 900] {
            assert_eq!(WeatherIcon::from_code(code), WeatherIcon::Clear, "code {code}");
        }
    }

    #[test]
    fn test_ids_and_emoji() {
        assert_eq!(WeatherIcon::Thunderstorm.id(), "thunderstorm");
        assert_eq!(WeatherIcon::Clouds.id(), "clouds");
        for icon in WeatherIcon::ALL {
            assert!(!icon.emoji().is_empty());
        }
    }
}
