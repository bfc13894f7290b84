//! Packed ARGB colors as used by indicator configuration and draw commands.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A 32-bit color packed as `0xAARRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(pub u32);

impl Color {
    pub const TRANSPARENT: Color = Color(0x0000_0000);
    pub const WHITE: Color = Color(0xFFFF_FFFF);
    pub const BLACK: Color = Color(0xFF00_0000);

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    #[inline]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Replace the alpha channel, keeping RGB
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Color((self.0 & 0x00FF_FFFF) | (alpha as u32) << 24)
    }

    /// Multiply the alpha channel by `factor` (clamped to [0, 1])
    pub fn scale_alpha(self, factor: f32) -> Self {
        let factor = if factor.is_finite() { factor.clamp(0.0, 1.0) } else { 1.0 };
        let alpha = (self.alpha() as f32 * factor).round() as u8;
        self.with_alpha(alpha)
    }

    /// Parse a hex color string
    ///
    /// Accepts `#AARRGGBB`, `#RRGGBB` and `#RGB`; the leading `#` is optional.
    /// Forms without an alpha channel are fully opaque.
    pub fn parse(hex: &str) -> crate::Result<Self> {
        let trimmed = hex.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let invalid = || crate::Error::InvalidColor(hex.to_string());

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match digits.len() {
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).map_err(|_| invalid());
                Ok(Color::from_argb(0xFF, nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17))
            }
            6 => {
                let rgb = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
                Ok(Color(0xFF00_0000 | rgb))
            }
            8 => {
                let argb = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
                Ok(Color(argb))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl From<u32> for Color {
    fn from(argb: u32) -> Self {
        Color(argb)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

// Accept either a hex string or a raw ARGB integer
impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ColorVisitor;

        impl<'de> Visitor<'de> for ColorVisitor {
            type Value = Color;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a hex color string (\"#AARRGGBB\", \"#RRGGBB\", \"#RGB\") or an ARGB integer")
            }

            fn visit_str<E>(self, value: &str) -> Result<Color, E>
            where
                E: de::Error,
            {
                Color::parse(value).map_err(E::custom)
            }

            fn visit_u64<E>(self, value: u64) -> Result<Color, E>
            where
                E: de::Error,
            {
                u32::try_from(value)
                    .map(Color)
                    .map_err(|_| E::custom(format!("color value {value} exceeds 32 bits")))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Color, E>
            where
                E: de::Error,
            {
                u32::try_from(value)
                    .map(Color)
                    .map_err(|_| E::custom(format!("color value {value} is not a 32-bit ARGB value")))
            }
        }

        deserializer.deserialize_any(ColorVisitor)
    }
}
