//! Multi-colour ASCII icons for the results panel
//!
//! Each icon is one or more layers of equal-sized art. Spaces are
//! transparent; later layers draw over earlier ones.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};

use crate::icons::WeatherIcon;

/// Rows every sprite occupies
pub const SPRITE_HEIGHT: u16 = 5;

// ============================================================================
// Sprite data
// ============================================================================

mod art {
    pub const SUN: [&str; 5] = [
        r"    \   /    ",
        r"     .-.     ",
        r"  - (   ) -  ",
        r"     `-'     ",
        r"    /   \    ",
    ];

    pub const CLOUD_BACK: [&str; 5] = [
        r"       .--.  ",
        r"    .-(    ).",
        r"             ",
        r"             ",
        r"             ",
    ];

    pub const CLOUD_FRONT: [&str; 5] = [
        r"             ",
        r"     .--.    ",
        r"  .-(    ).  ",
        r" (___.__)__) ",
        r"             ",
    ];

    pub const SHOWER_CLOUD: [&str; 5] = [
        r"     .-.     ",
        r"    (   ).   ",
        r"   (___(__)  ",
        r"             ",
        r"             ",
    ];

    pub const RAIN: [&str; 5] = [
        r"             ",
        r"             ",
        r"             ",
        r"    ' ' ' '  ",
        r"   ' ' ' '   ",
    ];

    pub const DRIZZLE: [&str; 5] = [
        r"             ",
        r"             ",
        r"             ",
        r"     ,   ,   ",
        r"   ,   ,     ",
    ];

    pub const SNOW: [&str; 5] = [
        r"             ",
        r"             ",
        r"             ",
        r"    *  *  *  ",
        r"   *  *  *   ",
    ];

    pub const LIGHTNING: [&str; 5] = [
        r"             ",
        r"             ",
        r"             ",
        r"     /_  /_  ",
        r"      /   /  ",
    ];

    pub const MIST_BACK: [&str; 5] = [
        r"             ",
        r" _ - _ - _ - ",
        r"             ",
        r" _ - _ - _ - ",
        r"             ",
    ];

    pub const MIST_FRONT: [&str; 5] = [
        r"             ",
        r"             ",
        r"  _ - _ - _  ",
        r"             ",
        r"  _ - _ - _  ",
    ];
}

// ============================================================================
// Layer compositing
// ============================================================================

/// A single sprite layer with its content and color
struct SpriteLayer {
    lines: &'static [&'static str],
    color: Color,
}

/// Composite multiple layers into Text, treating spaces as transparent
fn composite_layers(layers: &[SpriteLayer]) -> Text<'static> {
    let rows = layers.iter().map(|l| l.lines.len()).max().unwrap_or(0);
    let width = layers
        .iter()
        .flat_map(|l| l.lines.iter())
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);

    let mut result = Vec::with_capacity(rows);
    for row in 0..rows {
        let mut spans = Vec::with_capacity(width);
        for col in 0..width {
            // Topmost non-space character wins
            let cell = layers.iter().rev().find_map(|layer| {
                let ch = layer.lines.get(row)?.chars().nth(col)?;
                (ch != ' ').then_some((ch, layer.color))
            });
            let (ch, color) = cell.unwrap_or((' ', Color::Reset));
            spans.push(Span::styled(ch.to_string(), Style::default().fg(color)));
        }
        result.push(Line::from(spans));
    }

    Text::from(result)
}

// ============================================================================
// Public API
// ============================================================================

/// Sprite for the icon if `available_height` rows fit it
pub fn icon_sprite(icon: WeatherIcon, available_height: u16) -> Option<Text<'static>> {
    (available_height >= SPRITE_HEIGHT).then(|| get_sprite(icon))
}

pub fn get_sprite(icon: WeatherIcon) -> Text<'static> {
    let cloud = Color::Rgb(160, 160, 175);
    let layers = match icon {
        WeatherIcon::Clear => vec![SpriteLayer {
            lines: &art::SUN,
            color: Color::Yellow,
        }],
        WeatherIcon::Clouds => vec![
            SpriteLayer {
                lines: &art::CLOUD_BACK,
                color: Color::Rgb(120, 120, 140),
            },
            SpriteLayer {
                lines: &art::CLOUD_FRONT,
                color: Color::Rgb(170, 170, 185),
            },
        ],
        WeatherIcon::Atmosphere => vec![
            SpriteLayer {
                lines: &art::MIST_BACK,
                color: Color::Rgb(140, 140, 155),
            },
            SpriteLayer {
                lines: &art::MIST_FRONT,
                color: Color::Rgb(180, 180, 190),
            },
        ],
        WeatherIcon::Drizzle => vec![
            SpriteLayer {
                lines: &art::SHOWER_CLOUD,
                color: cloud,
            },
            SpriteLayer {
                lines: &art::DRIZZLE,
                color: Color::Rgb(130, 170, 200),
            },
        ],
        WeatherIcon::Rain => vec![
            SpriteLayer {
                lines: &art::SHOWER_CLOUD,
                color: cloud,
            },
            SpriteLayer {
                lines: &art::RAIN,
                color: Color::Rgb(80, 140, 200),
            },
        ],
        WeatherIcon::Snow => vec![
            SpriteLayer {
                lines: &art::SHOWER_CLOUD,
                color: cloud,
            },
            SpriteLayer {
                lines: &art::SNOW,
                color: Color::Rgb(200, 220, 255),
            },
        ],
        WeatherIcon::Thunderstorm => vec![
            SpriteLayer {
                lines: &art::SHOWER_CLOUD,
                color: Color::Rgb(120, 120, 140),
            },
            SpriteLayer {
                lines: &art::LIGHTNING,
                color: Color::Yellow,
            },
        ],
    };

    composite_layers(&layers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_icon_has_full_height_sprite() {
        for icon in WeatherIcon::ALL {
            let text = get_sprite(icon);
            assert_eq!(text.lines.len(), SPRITE_HEIGHT as usize, "{icon:?}");
        }
    }

    #[test]
    fn test_icon_sprite_needs_room() {
        assert!(icon_sprite(WeatherIcon::Rain, 4).is_none());
        assert!(icon_sprite(WeatherIcon::Rain, 5).is_some());
    }

    #[test]
    fn test_top_layer_wins() {
        let text = get_sprite(WeatherIcon::Rain);
        let row: String = text.lines[3].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(row.contains('\''));
    }
}
