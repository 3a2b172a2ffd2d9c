//! Configuration file support for drawpad.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/drawpad/config.toml`. Settings include the canvas defaults,
//! the initial brush, the history depth, export naming and keyboard shortcuts.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

pub use enums::ColorSpec;
pub use keybindings::{Action, KeyBinding, KeybindingError, KeybindingsConfig};
pub use types::{BrushConfig, CanvasConfig, ExportConfig, HistoryConfig};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Largest canvas side accepted from the config file.
pub const MAX_CANVAS_SIDE: u32 = 16384;

/// Valid brush widths in pixels.
pub const BRUSH_SIZE_RANGE: std::ops::RangeInclusive<f64> = 1.0..=50.0;

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// default_width = 1024
/// default_height = 768
///
/// [brush]
/// default_color = "#1e90ff"
/// default_size = 8
///
/// [history]
/// max_depth = 100
///
/// [export]
/// directory = "~/Pictures/sketches"
/// filename_template = "sketch_%Y-%m-%d_%H%M%S"
///
/// [keybindings]
/// undo = ["Ctrl+Shift+Z", "Ctrl+Alt+Z"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// Canvas element defaults
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Initial brush color and size
    #[serde(default)]
    pub brush: BrushConfig,

    /// Undo history limits
    #[serde(default)]
    pub history: HistoryConfig,

    /// Save action output
    #[serde(default)]
    pub export: ExportConfig,

    /// Keyboard shortcuts
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or replaced by
    /// the default) and a warning is logged.
    pub fn validate_and_clamp(&mut self) {
        let defaults = Config::default();

        for (name, side) in [
            ("default_width", &mut self.canvas.default_width),
            ("default_height", &mut self.canvas.default_height),
        ] {
            if !(1..=MAX_CANVAS_SIDE).contains(&*side) {
                warn!(
                    "Invalid canvas {} {}, clamping to 1-{} range",
                    name, side, MAX_CANVAS_SIDE
                );
                *side = (*side).clamp(1, MAX_CANVAS_SIDE);
            }
        }

        if self.canvas.background.resolve().is_none() {
            warn!(
                "Invalid canvas background {:?}, falling back to white",
                self.canvas.background
            );
            self.canvas.background = defaults.canvas.background.clone();
        }

        if !self.brush.default_size.is_finite() {
            warn!("Invalid brush default_size, falling back to 5");
            self.brush.default_size = defaults.brush.default_size;
        } else if !BRUSH_SIZE_RANGE.contains(&self.brush.default_size) {
            warn!(
                "Invalid brush default_size {:.1}, clamping to 1-50 range",
                self.brush.default_size
            );
            self.brush.default_size = self
                .brush
                .default_size
                .clamp(*BRUSH_SIZE_RANGE.start(), *BRUSH_SIZE_RANGE.end());
        }

        if self.brush.default_color.resolve().is_none() {
            warn!(
                "Invalid brush default_color {:?}, falling back to black",
                self.brush.default_color
            );
            self.brush.default_color = defaults.brush.default_color.clone();
        }

        if self.history.max_depth == 1 {
            // A depth of one would make every undo a no-op
            warn!("history max_depth 1 leaves nothing to undo, raising to 2");
            self.history.max_depth = 2;
        }

        if self.export.filename_template.trim().is_empty() {
            warn!("Empty export filename_template, falling back to 'my-drawing'");
            self.export.filename_template = defaults.export.filename_template.clone();
        }

        if !self.export.format.eq_ignore_ascii_case("png") {
            warn!(
                "Unsupported export format '{}', falling back to 'png'",
                self.export.format
            );
            self.export.format = defaults.export.format;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/drawpad/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("drawpad");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates the configuration file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
