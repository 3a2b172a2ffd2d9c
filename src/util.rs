//! Utility functions for color names and integer rectangles.
//!
//! This module provides:
//! - Color name mapping for configuration values
//! - The [`Rect`] type used for damage tracking

use crate::draw::{Color, color::*};

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system to parse color names from the config file.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "white", "black"
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        _ => None,
    }
}

// ============================================================================
// Geometry Utilities
// ============================================================================

/// Float bounds beyond this magnitude are clamped before conversion, so
/// widths and heights always fit in an `i32`.
const COORD_LIMIT: f64 = (1 << 29) as f64;

/// Axis-aligned rectangle helper used for dirty region tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        let width = max_x.checked_sub(min_x)?;
        let height = max_y.checked_sub(min_y)?;
        Self::new(min_x, min_y, width, height)
    }

    /// Builds the smallest integer rectangle covering the given float bounds.
    pub fn covering(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Option<Self> {
        let to_int = |value: f64| value.clamp(-COORD_LIMIT, COORD_LIMIT) as i32;
        let min_x = to_int(min_x.floor());
        let min_y = to_int(min_y.floor());
        let max_x = to_int(max_x.ceil());
        let max_y = to_int(max_y.ceil());
        Self::from_min_max(min_x, min_y, max_x.max(min_x + 1), max_y.max(min_y + 1))
    }

    /// Clips the rectangle to `0..width` × `0..height`.
    ///
    /// Returns `None` when nothing of the rectangle remains on the surface.
    pub fn clipped_to(&self, width: i32, height: i32) -> Option<Self> {
        let min_x = self.x.clamp(0, width);
        let min_y = self.y.clamp(0, height);
        let max_x = self.x.saturating_add(self.width).clamp(0, width);
        let max_y = self.y.saturating_add(self.height).clamp(0, height);
        Self::from_min_max(min_x, min_y, max_x, max_y)
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}
