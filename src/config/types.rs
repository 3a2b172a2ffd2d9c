//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canvas element settings.
///
/// The default size is only used when the host page has no element with the
/// configured id and the widget has to create one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Width in pixels of a newly created canvas element (valid range: 1 - 16384)
    #[serde(default = "default_width")]
    pub default_width: u32,

    /// Height in pixels of a newly created canvas element (valid range: 1 - 16384)
    #[serde(default = "default_height")]
    pub default_height: u32,

    /// Color the surface starts with and the eraser paints
    #[serde(default = "default_background")]
    pub background: ColorSpec,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            default_width: default_width(),
            default_height: default_height(),
            background: default_background(),
        }
    }
}

/// Brush defaults applied when a widget is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BrushConfig {
    /// Initial brush color - a named color, `#rrggbb`, or `[r, g, b]`
    #[serde(default = "default_brush_color")]
    pub default_color: ColorSpec,

    /// Initial stroke width in pixels (valid range: 1 - 50)
    #[serde(default = "default_brush_size")]
    pub default_size: f64,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            default_color: default_brush_color(),
            default_size: default_brush_size(),
        }
    }
}

/// Undo history settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HistoryConfig {
    /// Maximum number of undoable steps kept in memory. 0 keeps everything.
    #[serde(default)]
    pub max_depth: usize,
}

/// Export settings for the Save action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Directory exported drawings are written to (`~` is expanded)
    #[serde(default = "default_export_directory")]
    pub directory: String,

    /// Filename without extension; chrono format specifiers such as
    /// `%Y-%m-%d` are expanded at save time
    #[serde(default = "default_filename_template")]
    pub filename_template: String,

    /// Image format; only `png` is supported
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
            filename_template: default_filename_template(),
            format: default_format(),
        }
    }
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_brush_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_brush_size() -> f64 {
    5.0
}

fn default_export_directory() -> String {
    "~/Pictures/drawpad".to_string()
}

fn default_filename_template() -> String {
    "my-drawing".to_string()
}

fn default_format() -> String {
    "png".to_string()
}
