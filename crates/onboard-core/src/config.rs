use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::presets;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub indicator: IndicatorConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Animation played by the page indicator when the active page changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationStyle {
    /// Active indicator grows with an overshoot, then settles
    Scale,
    /// Active indicator fades in from half opacity
    Fade,
    /// Active indicator is drawn wide; the width follows the drag
    #[default]
    Slide,
    /// Like `Slide`, with corners rounding into a pill while expanded
    #[serde(alias = "morphing")]
    Morph,
    /// Active indicator bounces past its size and back
    Bounce,
    /// Active indicator pulses a fixed number of times
    Pulse,
    /// Active indicator turns by a quarter revolution
    Rotate,
    /// No animation
    None,
}

impl AnimationStyle {
    pub const ALL: [AnimationStyle; 8] = [
        AnimationStyle::Scale,
        AnimationStyle::Fade,
        AnimationStyle::Slide,
        AnimationStyle::Morph,
        AnimationStyle::Bounce,
        AnimationStyle::Pulse,
        AnimationStyle::Rotate,
        AnimationStyle::None,
    ];

    /// Styles where the active indicator is wider than the others
    #[inline]
    pub fn expands_width(self) -> bool {
        matches!(self, AnimationStyle::Slide | AnimationStyle::Morph)
    }

    /// Styles that multiply the active indicator's size by the animated scale
    #[inline]
    pub fn drives_scale(self) -> bool {
        matches!(
            self,
            AnimationStyle::Scale | AnimationStyle::Bounce | AnimationStyle::Pulse
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            AnimationStyle::Scale => "scale",
            AnimationStyle::Fade => "fade",
            AnimationStyle::Slide => "slide",
            AnimationStyle::Morph => "morph",
            AnimationStyle::Bounce => "bounce",
            AnimationStyle::Pulse => "pulse",
            AnimationStyle::Rotate => "rotate",
            AnimationStyle::None => "none",
        }
    }
}

impl fmt::Display for AnimationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnimationStyle {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scale" => Ok(AnimationStyle::Scale),
            "fade" => Ok(AnimationStyle::Fade),
            "slide" => Ok(AnimationStyle::Slide),
            "morph" | "morphing" => Ok(AnimationStyle::Morph),
            "bounce" => Ok(AnimationStyle::Bounce),
            "pulse" => Ok(AnimationStyle::Pulse),
            "rotate" => Ok(AnimationStyle::Rotate),
            "none" => Ok(AnimationStyle::None),
            other => Err(crate::Error::Config(format!("unknown animation style '{other}'"))),
        }
    }
}

/// Geometry of a single indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorShape {
    #[default]
    Circle,
    #[serde(alias = "rounded_rectangle")]
    RoundedRect,
    #[serde(alias = "rectangle")]
    Rect,
    Diamond,
}

impl IndicatorShape {
    pub fn name(self) -> &'static str {
        match self {
            IndicatorShape::Circle => "circle",
            IndicatorShape::RoundedRect => "rounded_rect",
            IndicatorShape::Rect => "rect",
            IndicatorShape::Diamond => "diamond",
        }
    }
}

impl fmt::Display for IndicatorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IndicatorShape {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "circle" => Ok(IndicatorShape::Circle),
            "rounded_rect" | "rounded_rectangle" => Ok(IndicatorShape::RoundedRect),
            "rect" | "rectangle" => Ok(IndicatorShape::Rect),
            "diamond" => Ok(IndicatorShape::Diamond),
            other => Err(crate::Error::Config(format!("unknown indicator shape '{other}'"))),
        }
    }
}

/// Where the host places the indicator relative to the page content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorPlacement {
    #[default]
    CenterBelowDescription,
    BottomCenter,
    TopCenter,
}

/// Page indicator configuration
///
/// Supplied by the host and never mutated by the indicator. Sizes are in
/// pixels of whatever surface the host draws onto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// Preset this configuration was based on (informational)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    #[serde(default = "default_true")]
    pub is_visible: bool,
    #[serde(default = "default_active_color")]
    pub active_color: Color,
    #[serde(default = "default_inactive_color")]
    pub inactive_color: Color,
    /// Base indicator size
    #[serde(default = "default_size")]
    pub size: f32,
    /// Gap between neighbouring indicators
    #[serde(default = "default_spacing")]
    pub spacing: f32,
    #[serde(default)]
    pub placement: IndicatorPlacement,
    #[serde(default)]
    pub animation_style: AnimationStyle,
    /// Base animation duration in milliseconds; negative values fall back to the default
    #[serde(default = "default_animation_duration_ms")]
    pub animation_duration_ms: i64,
    /// Outline width, 0 disables the outline
    #[serde(default)]
    pub stroke_width: f32,
    #[serde(default = "default_stroke_color")]
    pub stroke_color: Color,
    #[serde(default)]
    pub enable_glow: bool,
    #[serde(default = "default_glow_color")]
    pub glow_color: Color,
    #[serde(default = "default_glow_radius")]
    pub glow_radius: f32,
    #[serde(default)]
    pub shape: IndicatorShape,
    /// Corner radius for `rounded_rect`
    #[serde(default = "default_corner_radius")]
    pub corner_radius: f32,
    /// Size indicators by their distance from the active page
    #[serde(default)]
    pub progressive_sizing: bool,
    #[serde(default = "default_max_size")]
    pub max_size: f32,
    #[serde(default = "default_min_size")]
    pub min_size: f32,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            preset: None,
            is_visible: default_true(),
            active_color: default_active_color(),
            inactive_color: default_inactive_color(),
            size: default_size(),
            spacing: default_spacing(),
            placement: IndicatorPlacement::default(),
            animation_style: AnimationStyle::default(),
            animation_duration_ms: default_animation_duration_ms(),
            stroke_width: 0.0,
            stroke_color: default_stroke_color(),
            enable_glow: false,
            glow_color: default_glow_color(),
            glow_radius: default_glow_radius(),
            shape: IndicatorShape::default(),
            corner_radius: default_corner_radius(),
            progressive_sizing: false,
            max_size: default_max_size(),
            min_size: default_min_size(),
        }
    }
}

impl IndicatorConfig {
    /// Copy with every numeric field forced into its valid range
    ///
    /// Negative lengths clamp to 0, non-finite lengths take their default,
    /// an inverted `min_size`/`max_size` pair is swapped, and a negative
    /// duration takes the default duration.
    pub fn sanitized(&self) -> Self {
        let mut config = self.clone();

        config.size = sanitize_length(config.size, default_size());
        config.spacing = sanitize_length(config.spacing, default_spacing());
        config.stroke_width = sanitize_length(config.stroke_width, 0.0);
        config.glow_radius = sanitize_length(config.glow_radius, default_glow_radius());
        config.corner_radius = sanitize_length(config.corner_radius, default_corner_radius());
        config.max_size = sanitize_length(config.max_size, default_max_size());
        config.min_size = sanitize_length(config.min_size, default_min_size());
        if config.min_size > config.max_size {
            std::mem::swap(&mut config.min_size, &mut config.max_size);
        }
        if config.animation_duration_ms < 0 {
            tracing::warn!(
                duration_ms = config.animation_duration_ms,
                "negative animation duration, using default"
            );
            config.animation_duration_ms = default_animation_duration_ms();
        }

        config
    }

    /// Base animation duration
    #[inline]
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms.max(0) as u64)
    }

    /// Height the indicator row occupies
    #[inline]
    pub fn rendered_height(&self) -> f32 {
        if self.progressive_sizing {
            self.max_size
        } else {
            self.size
        }
    }
}

fn sanitize_length(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        fallback
    }
}

/// Content of one welcome page shown by the preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl PageContent {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Preview frame rate
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Fraction of a page one drag key press moves
    #[serde(default = "default_drag_step")]
    pub drag_step: f32,
    /// Fraction of a page that must be crossed to snap forward
    #[serde(default = "default_snap_threshold")]
    pub snap_threshold: f32,
    /// Milliseconds without drag input before the pager treats the finger as lifted
    #[serde(default = "default_release_after_ms")]
    pub release_after_ms: u64,
    #[serde(default = "default_pages")]
    pub pages: Vec<PageContent>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            drag_step: default_drag_step(),
            snap_threshold: default_snap_threshold(),
            release_after_ms: default_release_after_ms(),
            pages: default_pages(),
        }
    }
}

impl PreviewConfig {
    /// Time between preview frames
    #[inline]
    pub fn frame_interval(&self) -> Duration {
        if self.fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / self.fps as u64)
        }
    }

    #[inline]
    pub fn release_after(&self) -> Duration {
        Duration::from_millis(self.release_after_ms)
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_active_color() -> Color {
    Color(0xFF2196F3)
}

fn default_inactive_color() -> Color {
    Color(0x4D9E9E9E)
}

fn default_size() -> f32 {
    24.0
}

fn default_spacing() -> f32 {
    36.0
}

fn default_animation_duration_ms() -> i64 {
    300
}

fn default_stroke_color() -> Color {
    Color::TRANSPARENT
}

fn default_glow_color() -> Color {
    Color::WHITE
}

fn default_glow_radius() -> f32 {
    12.0
}

fn default_corner_radius() -> f32 {
    12.0
}

fn default_max_size() -> f32 {
    36.0
}

fn default_min_size() -> f32 {
    18.0
}

fn default_fps() -> u32 {
    60
}

fn default_drag_step() -> f32 {
    0.1
}

fn default_snap_threshold() -> f32 {
    0.5
}

fn default_release_after_ms() -> u64 {
    250
}

fn default_pages() -> Vec<PageContent> {
    vec![
        PageContent::new(
            "Material Design 3",
            "Experience the latest Material Design principles with dynamic colors and expressive interfaces.",
        ),
        PageContent::new(
            "Dynamic Theming",
            "Colors that adapt to your preferences and content that responds to your interactions.",
        ),
        PageContent::new(
            "Personal Expression",
            "Make it yours with customizable themes and personalized experiences.",
        ),
        PageContent::new(
            "Focus on Content",
            "No distractions, no clutter. Just you and what matters most.",
        ),
    ]
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, falling back to defaults when it does not exist
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse a TOML document
    ///
    /// When `[indicator]` names a `preset`, the preset supplies every field
    /// the document leaves out.
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let mut document: toml::Table = toml::from_str(content)?;

        if let Some(toml::Value::Table(indicator)) = document.get_mut("indicator") {
            if let Some(name) = indicator.get("preset").and_then(|v| v.as_str()) {
                let base = presets::load_preset(name);
                let mut merged = match toml::Value::try_from(&base) {
                    Ok(toml::Value::Table(table)) => table,
                    Ok(_) => return Err(crate::Error::Config("preset is not a table".to_string())),
                    Err(e) => return Err(crate::Error::Config(e.to_string())),
                };
                for (key, value) in std::mem::take(indicator) {
                    merged.insert(key, value);
                }
                *indicator = merged;
            }
        }

        toml::Value::Table(document)
            .try_into()
            .map_err(|e: toml::de::Error| crate::Error::Config(e.to_string()))
    }

    /// Render the configuration as pretty TOML
    pub fn to_toml_string(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to the default path
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml_string()?)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/onboard/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("onboard")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IndicatorConfig::default();
        assert!(config.is_visible);
        assert_eq!(config.active_color, Color(0xFF2196F3));
        assert_eq!(config.inactive_color, Color(0x4D9E9E9E));
        assert_eq!(config.size, 24.0);
        assert_eq!(config.spacing, 36.0);
        assert_eq!(config.animation_style, AnimationStyle::Slide);
        assert_eq!(config.animation_duration_ms, 300);
        assert_eq!(config.shape, IndicatorShape::Circle);
        assert!(!config.progressive_sizing);
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.indicator, IndicatorConfig::default());
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.preview.pages.len(), 4);
    }

    #[test]
    fn test_partial_indicator_section() {
        let config = AppConfig::from_toml_str(
            r##"
            [indicator]
            animation_style = "bounce"
            shape = "rounded_rectangle"
            active_color = "#FF0000"
            size = 12
            "##,
        )
        .unwrap();
        assert_eq!(config.indicator.animation_style, AnimationStyle::Bounce);
        assert_eq!(config.indicator.shape, IndicatorShape::RoundedRect);
        assert_eq!(config.indicator.active_color, Color(0xFFFF0000));
        assert_eq!(config.indicator.size, 12.0);
        assert_eq!(config.indicator.spacing, 36.0);
    }

    #[test]
    fn test_morphing_alias() {
        let config = AppConfig::from_toml_str("[indicator]\nanimation_style = \"morphing\"\n").unwrap();
        assert_eq!(config.indicator.animation_style, AnimationStyle::Morph);
    }

    #[test]
    fn test_invalid_color_is_error() {
        let result = AppConfig::from_toml_str("[indicator]\nactive_color = \"#12\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_preset_fills_unwritten_fields() {
        let config = AppConfig::from_toml_str(
            r##"
            [indicator]
            preset = "modern"
            spacing = 10
            "##,
        )
        .unwrap();
        // From the preset
        assert_eq!(config.indicator.size, 18.0);
        assert_eq!(config.indicator.inactive_color, Color(0xFFE5E5EA));
        // Written explicitly
        assert_eq!(config.indicator.spacing, 10.0);
        assert_eq!(config.indicator.preset.as_deref(), Some("modern"));
    }

    #[test]
    fn test_sanitized_clamps() {
        let config = IndicatorConfig {
            size: -4.0,
            spacing: f32::NAN,
            animation_duration_ms: -20,
            progressive_sizing: true,
            max_size: 10.0,
            min_size: 30.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.size, 0.0);
        assert_eq!(config.spacing, 36.0);
        assert_eq!(config.animation_duration_ms, 300);
        assert_eq!(config.max_size, 30.0);
        assert_eq!(config.min_size, 10.0);
    }

    #[test]
    fn test_rendered_height() {
        let mut config = IndicatorConfig::default();
        assert_eq!(config.rendered_height(), 24.0);
        config.progressive_sizing = true;
        assert_eq!(config.rendered_height(), 36.0);
    }

    #[test]
    fn test_style_from_str() {
        for style in AnimationStyle::ALL {
            assert_eq!(style.name().parse::<AnimationStyle>().unwrap(), style);
        }
        assert!("wobble".parse::<AnimationStyle>().is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join(format!("onboard-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        let mut config = AppConfig::default();
        config.indicator.animation_style = AnimationStyle::Pulse;
        config.indicator.glow_color = Color(0x80FFFFFF);
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.indicator, config.indicator);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_frame_interval() {
        let mut preview = PreviewConfig::default();
        assert_eq!(preview.frame_interval(), Duration::from_millis(16));
        preview.fps = 0;
        assert_eq!(preview.frame_interval(), Duration::from_millis(16));
        preview.fps = 30;
        assert_eq!(preview.frame_interval(), Duration::from_millis(33));
    }
}
