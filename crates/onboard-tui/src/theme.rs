use ratatui::style::Color;

/// Runtime theme for the preview screen
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey: Color,

    // Semantic colors
    pub accent: Color,
    pub warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        dark()
    }
}

/// Near-black surface matching the `dark` indicator preset
pub fn dark() -> Theme {
    Theme {
        bg0: Color::Rgb(0x1c, 0x1c, 0x1e),
        bg1: Color::Rgb(0x2c, 0x2c, 0x2e),
        bg2: Color::Rgb(0x3a, 0x3a, 0x3c),
        fg0: Color::Rgb(0xf2, 0xf2, 0xf7),
        fg1: Color::Rgb(0xd1, 0xd1, 0xd6),
        grey: Color::Rgb(0x8e, 0x8e, 0x93),
        accent: Color::Rgb(0x0a, 0x84, 0xff),
        warning: Color::Rgb(0xff, 0x9f, 0x0a),
    }
}

/// White surface for the light presets
pub fn light() -> Theme {
    Theme {
        bg0: Color::Rgb(0xff, 0xff, 0xff),
        bg1: Color::Rgb(0xf2, 0xf2, 0xf7),
        bg2: Color::Rgb(0xe5, 0xe5, 0xea),
        fg0: Color::Rgb(0x1c, 0x1c, 0x1e),
        fg1: Color::Rgb(0x3a, 0x3a, 0x3c),
        grey: Color::Rgb(0x8e, 0x8e, 0x93),
        accent: Color::Rgb(0x00, 0x7a, 0xff),
        warning: Color::Rgb(0xff, 0x95, 0x00),
    }
}

/// Pick the surface an indicator preset was designed for
pub fn for_preset(preset: Option<&str>) -> Theme {
    match preset.map(|name| name.trim().to_lowercase()).as_deref() {
        Some("minimal") | Some("modern") => light(),
        _ => dark(),
    }
}

impl Theme {
    /// Background as RGB, for blending translucent indicator colors
    pub fn background_rgb(&self) -> (u8, u8, u8) {
        match self.bg0 {
            Color::Rgb(r, g, b) => (r, g, b),
            Color::White => (0xff, 0xff, 0xff),
            _ => (0, 0, 0),
        }
    }
}
