//! WMO weather code to glyph lookup

use std::collections::HashMap;
use std::sync::OnceLock;

/// Returned for codes outside the WMO table
pub const NOT_FOUND_ICON: &str = "NOT FOUND";

const ICON_GROUPS: &[(&[i32], &str)] = &[
    (&[0], "☀️"),
    (&[1], "⛅"),
    (&[2], "⛅️"),
    (&[3], "☁️"),
    (&[45, 48], "🌫️"),
    (&[51, 56, 61, 66, 80], "🌦️"),
    (&[53, 55, 63, 65, 57, 67, 81, 82], "🌧️"),
    (&[71, 73, 75, 77, 85, 86], "🌨️"),
    (&[95], "🌩️"),
    (&[96, 99], "⛈️"),
];

fn icon_table() -> &'static HashMap<i32, &'static str> {
    static ICONS: OnceLock<HashMap<i32, &'static str>> = OnceLock::new();
    ICONS.get_or_init(|| {
        ICON_GROUPS
            .iter()
            .flat_map(|(codes, icon)| codes.iter().map(move |code| (*code, *icon)))
            .collect()
    })
}

/// Glyph for a WMO weather code, or [`NOT_FOUND_ICON`]
pub fn weather_icon(code: i32) -> &'static str {
    icon_table().get(&code).copied().unwrap_or(NOT_FOUND_ICON)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN: [i32; 28] = [
        0, 1, 2, 3, 45, 48, 51, 53, 55, 56, 57, 61, 63, 65, 66, 67, 71, 73, 75, 77, 80, 81, 82,
        85, 86, 95, 96, 99,
    ];

    #[test]
    fn test_known_codes_have_glyphs() {
        for code in KNOWN {
            assert_ne!(weather_icon(code), NOT_FOUND_ICON, "code {code}");
        }
    }

    #[test]
    fn test_unknown_codes_are_not_found() {
        for code in (-5..120).filter(|c| !KNOWN.contains(c)) {
            assert_eq!(weather_icon(code), NOT_FOUND_ICON, "code {code}");
        }
        assert_eq!(weather_icon(42), NOT_FOUND_ICON);
        assert_eq!(weather_icon(i32::MAX), NOT_FOUND_ICON);
    }

    #[test]
    fn test_groups_share_glyphs() {
        assert_eq!(weather_icon(0), "☀️");
        assert_eq!(weather_icon(45), weather_icon(48));
        assert_eq!(weather_icon(51), weather_icon(80));
        assert_eq!(weather_icon(57), "🌧️");
        assert_eq!(weather_icon(86), "🌨️");
        assert_eq!(weather_icon(99), "⛈️");
        assert_ne!(weather_icon(95), weather_icon(96));
    }
}
