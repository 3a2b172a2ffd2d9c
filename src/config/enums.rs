//! Configuration enum types.

use crate::draw::{Color, color::*};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - a named color, a picker value, or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// default_color = "black"
///
/// # Color picker value
/// default_color = "#1e90ff"
///
/// # Custom RGB color (0-255 per component)
/// default_color = [255, 128, 0]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color (red, green, blue, yellow, white, black) or `#rrggbb`
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Resolves the specification, or `None` if the name is not recognized.
    pub fn resolve(&self) -> Option<Color> {
        match self {
            ColorSpec::Name(name) if name.trim_start().starts_with('#') => Color::from_hex(name),
            ColorSpec::Name(name) => crate::util::name_to_color(name),
            ColorSpec::Rgb([r, g, b]) => Some(Color::from_rgb8(*r, *g, *b)),
        }
    }

    /// Converts the color specification to a [`Color`], using `fallback` for
    /// unknown names.
    pub fn to_color_or(&self, fallback: Color) -> Color {
        self.resolve().unwrap_or_else(|| {
            warn!("Unknown color {:?}, using {}", self, fallback.to_hex());
            fallback
        })
    }

    /// Converts the color specification to a [`Color`], defaulting to black.
    pub fn to_color(&self) -> Color {
        self.to_color_or(BLACK)
    }
}
