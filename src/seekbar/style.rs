use derive_more::{Deref, From, Into};
use palette::Srgba;
use serde::Deserialize;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An sRGB color with alpha, written as `#RRGGBB` or `#RRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Deref, From, Into, SerializeDisplay, DeserializeFromStr)]
pub struct Color(Srgba<u8>);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Color must start with '#': {0}")]
    MissingHash(String),
    #[error("Color must have 6 or 8 hex digits: {0}")]
    BadLength(String),
    #[error("Invalid hex digits in color: {0}")]
    BadDigits(String),
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(Srgba::new(r, g, b, a))
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub fn alpha(&self) -> u8 {
        self.0.alpha
    }

    pub fn with_alpha(self, alpha: u8) -> Self {
        Self(Srgba::new(self.0.red, self.0.green, self.0.blue, alpha))
    }

    /// Float components, for renderers that want them.
    pub fn to_f64(self) -> Srgba<f64> {
        self.0.into_format()
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;
        if hex.len() != 6 && hex.len() != 8 {
            return Err(ColorParseError::BadLength(s.to_string()));
        }
        let value =
            u32::from_str_radix(hex, 16).map_err(|_| ColorParseError::BadDigits(s.to_string()))?;
        let value = if hex.len() == 6 {
            (value << 8) | 0xff
        } else {
            value
        };
        let [r, g, b, a] = value.to_be_bytes();
        Ok(Self::rgba(r, g, b, a))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.0;
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            c.red, c.green, c.blue, c.alpha
        )
    }
}

pub const DEFAULT_CIRCLE_COLOR: Color = Color::rgb(0x44, 0x44, 0x44);
pub const DEFAULT_CIRCLE_FILL_COLOR: Color = Color::rgba(0, 0, 0, 0);
pub const DEFAULT_PROGRESS_COLOR: Color = Color::rgba(74, 138, 255, 235);
pub const DEFAULT_POINTER_COLOR: Color = Color::rgba(74, 138, 255, 235);
pub const DEFAULT_POINTER_HALO_COLOR: Color = Color::rgba(74, 138, 255, 135);
pub const DEFAULT_POINTER_HALO_COLOR_ON_TOUCH: Color = Color::rgba(74, 138, 255, 135);
pub const DEFAULT_POINTER_ALPHA_ON_TOUCH: u8 = 100;

/// Colors shared by every pointer that has no override of its own.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SeekBarStyle {
    pub circle_color: Color,
    pub circle_fill_color: Color,
    pub progress_color: Color,
    pub pointer_color: Color,
    pub pointer_halo_color: Color,
    pub pointer_halo_color_on_touch: Color,
    /// Defaults to the alpha of `pointer_halo_color` when absent.
    pub pointer_alpha: Option<u8>,
    pub pointer_alpha_on_touch: u8,
}

impl Default for SeekBarStyle {
    fn default() -> Self {
        Self {
            circle_color: DEFAULT_CIRCLE_COLOR,
            circle_fill_color: DEFAULT_CIRCLE_FILL_COLOR,
            progress_color: DEFAULT_PROGRESS_COLOR,
            pointer_color: DEFAULT_POINTER_COLOR,
            pointer_halo_color: DEFAULT_POINTER_HALO_COLOR,
            pointer_halo_color_on_touch: DEFAULT_POINTER_HALO_COLOR_ON_TOUCH,
            pointer_alpha: None,
            pointer_alpha_on_touch: DEFAULT_POINTER_ALPHA_ON_TOUCH,
        }
    }
}

impl SeekBarStyle {
    pub fn pointer_alpha(&self) -> u8 {
        self.pointer_alpha
            .unwrap_or_else(|| self.pointer_halo_color.alpha())
    }

    /// The style every pointer without an override draws with.
    pub fn shared_pointer_style(&self) -> PointerStyle {
        PointerStyle {
            pointer_color: self.pointer_color,
            progress_color: self.progress_color,
            halo_color: self.pointer_halo_color,
        }
    }

    /// Picks the pointer's own style when it has one, otherwise the shared default.
    pub fn resolve(&self, custom: Option<&PointerStyle>) -> PointerStyle {
        custom.copied().unwrap_or_else(|| self.shared_pointer_style())
    }

    /// Final halo color, which depends on whether the pointer is being dragged.
    pub fn halo_for(&self, style: &PointerStyle, pressed: bool) -> Color {
        if pressed {
            self.pointer_halo_color_on_touch
                .with_alpha(self.pointer_alpha_on_touch)
        } else {
            style.halo_color.with_alpha(self.pointer_alpha())
        }
    }
}

/// Per-pointer colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerStyle {
    pub pointer_color: Color,
    pub progress_color: Color,
    pub halo_color: Color,
}

impl PointerStyle {
    /// One color for handle, halo and progress arc.
    pub fn uniform(color: Color) -> Self {
        Self {
            pointer_color: color,
            progress_color: color,
            halo_color: color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parsing() {
        assert_eq!("#4a8aff".parse::<Color>(), Ok(Color::rgb(74, 138, 255)));
        assert_eq!(
            "#4A8AFFEB".parse::<Color>(),
            Ok(Color::rgba(74, 138, 255, 235))
        );
        assert!(matches!(
            "4a8aff".parse::<Color>(),
            Err(ColorParseError::MissingHash(_))
        ));
        assert!(matches!(
            "#4a8".parse::<Color>(),
            Err(ColorParseError::BadLength(_))
        ));
        assert!(matches!(
            "#zz8aff".parse::<Color>(),
            Err(ColorParseError::BadDigits(_))
        ));
    }

    #[test]
    fn test_color_display() {
        assert_eq!(DEFAULT_POINTER_HALO_COLOR.to_string(), "#4a8aff87");
    }

    #[test]
    fn test_color_to_f64() {
        let rgba = Color::rgba(255, 0, 51, 0).to_f64();
        assert_eq!((rgba.red, rgba.green, rgba.alpha), (1.0, 0.0, 0.0));
        assert!((rgba.blue - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_color_serde() {
        let color: Color = serde_json::from_str("\"#ff000080\"").unwrap();
        assert_eq!(color, Color::rgba(255, 0, 0, 128));
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#ff000080\"");
    }

    #[test]
    fn test_resolve_prefers_custom_style() {
        let style = SeekBarStyle::default();
        let custom = PointerStyle::uniform(Color::rgb(255, 0, 0));
        assert_eq!(style.resolve(Some(&custom)), custom);
        assert_eq!(style.resolve(None), style.shared_pointer_style());
    }

    #[test]
    fn test_halo_alpha_follows_touch_state() {
        let style = SeekBarStyle::default();
        let shared = style.shared_pointer_style();
        assert_eq!(style.halo_for(&shared, false).alpha(), 135);
        assert_eq!(style.halo_for(&shared, true).alpha(), 100);

        let style = SeekBarStyle {
            pointer_alpha: Some(20),
            ..SeekBarStyle::default()
        };
        assert_eq!(style.halo_for(&shared, false).alpha(), 20);
    }
}
