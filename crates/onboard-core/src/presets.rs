//! Preset registry
//!
//! Ready-made indicator configurations matching the stock onboarding looks.

use crate::color::Color;
use crate::config::{AnimationStyle, IndicatorConfig};

/// Names accepted by [`load_preset`]
pub const PRESET_NAMES: [&str; 4] = ["default", "minimal", "modern", "dark"];

/// Load a preset by name (case-insensitive)
///
/// Unknown names fall back to the default configuration.
pub fn load_preset(name: &str) -> IndicatorConfig {
    let mut config = match name.trim().to_lowercase().as_str() {
        "default" => IndicatorConfig::default(),
        "minimal" => minimal(),
        "modern" => modern(),
        "dark" | "dark-theme" | "dark_theme" => dark(),
        other => {
            tracing::warn!(preset = other, "unknown preset, using default");
            IndicatorConfig::default()
        }
    };
    config.preset = Some(name.to_string());
    config
}

/// Fading dots in system blue
pub fn minimal() -> IndicatorConfig {
    IndicatorConfig {
        animation_style: AnimationStyle::Fade,
        active_color: Color(0xFF007AFF),
        inactive_color: Color(0x4D9E9E9E),
        ..Default::default()
    }
}

/// Small sliding pills on a light background
pub fn modern() -> IndicatorConfig {
    IndicatorConfig {
        active_color: Color(0xFF007AFF),
        inactive_color: Color(0xFFE5E5EA),
        animation_style: AnimationStyle::Slide,
        size: 18.0,
        spacing: 24.0,
        ..Default::default()
    }
}

/// Morphing indicators for dark backgrounds
pub fn dark() -> IndicatorConfig {
    IndicatorConfig {
        active_color: Color(0xFF0A84FF),
        inactive_color: Color(0xFF3A3A3C),
        animation_style: AnimationStyle::Morph,
        ..Default::default()
    }
}

/// Sliding indicators derived from a single brand color
///
/// Inactive indicators use the primary color's RGB at 30% opacity.
pub fn custom_theme(primary: Color) -> IndicatorConfig {
    IndicatorConfig {
        active_color: primary,
        inactive_color: primary.with_alpha(0x4D),
        animation_style: AnimationStyle::Slide,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_names_resolve() {
        for name in PRESET_NAMES {
            let config = load_preset(name);
            assert_eq!(config.preset.as_deref(), Some(name));
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(load_preset("MODERN").size, 18.0);
        assert_eq!(load_preset("Dark").animation_style, AnimationStyle::Morph);
    }

    #[test]
    fn test_unknown_falls_back_to_default() {
        let config = load_preset("neon");
        assert_eq!(config.animation_style, AnimationStyle::Slide);
        assert_eq!(config.size, 24.0);
    }

    #[test]
    fn test_custom_theme_inactive_alpha() {
        let config = custom_theme(Color(0xFFE91E63));
        assert_eq!(config.active_color, Color(0xFFE91E63));
        assert_eq!(config.inactive_color, Color(0x4DE91E63));
    }
}
