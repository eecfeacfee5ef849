//! # Map Theme
//!
//! Style rules keyed by map feature type and element type, each mapping to a
//! color override. The dark theme below is the one the map starts with.

use crossterm::style::Color;

/// A single color override
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    /// Feature the rule targets (`road.highway`, `water`, ...); `None` targets every feature
    pub feature_type: Option<String>,
    /// Element of the feature (`geometry`, `labels.text.fill`, ...)
    pub element_type: String,
    /// `#rrggbb`
    pub color: String,
}

impl StyleRule {
    pub fn new(feature_type: Option<&str>, element_type: &str, color: &str) -> Self {
        Self {
            feature_type: feature_type.map(str::to_string),
            element_type: element_type.to_string(),
            color: color.to_string(),
        }
    }
}

const DARK_RULES: &[(Option<&str>, &str, &str)] = &[
    (None, "geometry", "#242f3e"),
    (None, "labels.text.stroke", "#242f3e"),
    (None, "labels.text.fill", "#746855"),
    (Some("administrative.locality"), "labels.text.fill", "#d59563"),
    (Some("poi"), "labels.text.fill", "#d59563"),
    (Some("poi.park"), "geometry", "#263c3f"),
    (Some("poi.park"), "labels.text.fill", "#6b9a76"),
    (Some("road"), "geometry", "#38414e"),
    (Some("road"), "geometry.stroke", "#212a37"),
    (Some("road"), "labels.text.fill", "#9ca5b3"),
    (Some("road.highway"), "geometry", "#746855"),
    (Some("road.highway"), "geometry.stroke", "#1f2835"),
    (Some("road.highway"), "labels.text.fill", "#f3d19c"),
    (Some("transit"), "geometry", "#2f3948"),
    (Some("transit.station"), "labels.text.fill", "#d59563"),
    (Some("water"), "geometry", "#17263c"),
    (Some("water"), "labels.text.fill", "#515c6d"),
    (Some("water"), "labels.text.stroke", "#17263c"),
];

/// The dark night-mode theme
pub fn dark_theme() -> Vec<StyleRule> {
    DARK_RULES
        .iter()
        .map(|(feature, element, color)| StyleRule::new(*feature, element, color))
        .collect()
}

/// Resolve the color for a feature/element pair.
///
/// A rule naming the feature wins over a feature-less rule for the same element.
pub fn lookup<'a>(rules: &'a [StyleRule], feature: Option<&str>, element: &str) -> Option<&'a str> {
    let for_element = |wanted: Option<&str>| {
        rules
            .iter()
            .rev()
            .find(|rule| rule.element_type == element && rule.feature_type.as_deref() == wanted)
            .map(|rule| rule.color.as_str())
    };

    feature.and_then(|f| for_element(Some(f))).or_else(|| for_element(None))
}

/// Parse `#rrggbb` into a terminal color
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
    Some(Color::Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

/// Lookup plus parse, falling back to `fallback` when no usable rule exists
pub fn color_for(rules: &[StyleRule], feature: Option<&str>, element: &str, fallback: Color) -> Color {
    lookup(rules, feature, element)
        .and_then(parse_hex_color)
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_theme_should_carry_every_rule() {
        let rules = dark_theme();
        assert_eq!(rules.len(), DARK_RULES.len());
        assert_eq!(rules[0], StyleRule::new(None, "geometry", "#242f3e"));
    }

    #[test]
    fn lookup_should_prefer_feature_specific_rule() {
        let rules = dark_theme();
        assert_eq!(lookup(&rules, Some("water"), "geometry"), Some("#17263c"));
        assert_eq!(lookup(&rules, Some("road.highway"), "labels.text.fill"), Some("#f3d19c"));
    }

    #[test]
    fn lookup_should_fall_back_to_generic_rule() {
        let rules = dark_theme();
        assert_eq!(lookup(&rules, Some("landscape"), "geometry"), Some("#242f3e"));
        assert_eq!(lookup(&rules, None, "labels.text.fill"), Some("#746855"));
        assert_eq!(lookup(&rules, Some("water"), "geometry.fill"), None);
    }

    #[test]
    fn parse_hex_color_should_decode_channels() {
        assert_eq!(
            parse_hex_color("#d59563"),
            Some(Color::Rgb {
                r: 0xd5,
                g: 0x95,
                b: 0x63
            })
        );
        assert_eq!(parse_hex_color("d59563"), None);
        assert_eq!(parse_hex_color("#d5956"), None);
        assert_eq!(parse_hex_color("#zz9563"), None);
    }

    #[test]
    fn color_for_should_use_fallback_when_missing() {
        let rules = Vec::new();
        assert_eq!(color_for(&rules, None, "geometry", Color::Black), Color::Black);
    }
}
