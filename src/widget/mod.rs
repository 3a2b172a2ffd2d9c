//! The drawing widget: tool state machine, history and surface in one owner.
//!
//! A [`Widget`] is created with [`Widget::mount`] and then driven entirely by
//! host events: pointer input, key presses, toolbar clicks, input-change
//! events and container resizes. Restores from the history are deferred; the
//! host calls [`Widget::run_pending`] from its loop to apply them.

mod actions;
mod core;
mod pointer;
#[cfg(test)]
mod tests;

pub use self::core::Widget;

use crate::config::{BRUSH_SIZE_RANGE, Config, KeybindingError};
use crate::draw::{Color, Point, Snapshot, SnapshotError, SurfaceError, color::BLACK};
use crate::input::Tool;
use crate::util::Rect;
use thiserror::Error;

/// Errors that prevent a widget from being created.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("Canvas id must not be empty")]
    EmptyCanvasId,

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error("Failed to record the initial snapshot: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Invalid keybinding configuration: {0}")]
    Keybindings(#[from] KeybindingError),
}

/// Construction parameters for a widget.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Id of the canvas element to draw on; created if the page lacks it
    pub canvas_id: String,
    pub settings: Config,
}

impl WidgetConfig {
    pub fn new(canvas_id: impl Into<String>) -> Self {
        Self {
            canvas_id: canvas_id.into(),
            settings: Config::default(),
        }
    }

    pub fn with_settings(mut self, settings: Config) -> Self {
        self.settings = settings;
        self
    }
}

/// Color and stroke width used by the next stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushSettings {
    pub color: Color,
    size: f64,
}

impl BrushSettings {
    pub const DEFAULT_SIZE: f64 = 5.0;

    /// Creates settings with `size` clamped to the valid range.
    pub fn new(color: Color, size: f64) -> Self {
        Self {
            color,
            size: Self::clamp_size(size),
        }
    }

    /// Stroke width in pixels, always within 1..=50.
    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn set_size(&mut self, size: f64) {
        self.size = Self::clamp_size(size);
    }

    fn clamp_size(size: f64) -> f64 {
        if size.is_nan() {
            return Self::DEFAULT_SIZE;
        }
        size.clamp(*BRUSH_SIZE_RANGE.start(), *BRUSH_SIZE_RANGE.end())
    }
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self::new(BLACK, Self::DEFAULT_SIZE)
    }
}

/// Pointer-drag state.
#[derive(Debug)]
pub enum DrawingState {
    /// No button held over the surface
    Idle,
    /// A drag is in progress
    Drawing(StrokeSession),
}

/// Everything a drag needs between pointer-down and pointer-up.
#[derive(Debug)]
pub struct StrokeSession {
    pub tool: Tool,
    /// Where the pointer went down
    pub anchor: Point,
    /// Most recent pointer position
    pub last: Point,
    /// Brush in force for the whole drag
    pub brush: BrushSettings,
    /// Surface content before the drag started; shape previews restore it
    pub(crate) pre_snapshot: Snapshot,
    /// Damage of the shape preview currently on screen
    pub(crate) preview_bounds: Option<Rect>,
}
