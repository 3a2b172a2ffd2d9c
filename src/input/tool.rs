//! Drawing tool selection.

use crate::draw::ShapeKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Drawing tool selection.
///
/// The active tool determines what a pointer drag renders. Tools are
/// identified by a stable id (`"brush"`, `"eraser"`, ...) shared by the
/// toolbar, the keybinding config and the replay scripts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// Freehand stroke following the pointer (default)
    #[default]
    Brush,
    /// Paints the background color under the pointer
    Eraser,
    /// Straight line from the press point to the pointer
    Line,
    /// Rectangle outline from corner to corner
    Rectangle,
    /// Circle outline centered on the press point
    Circle,
}

impl Tool {
    /// Every tool, in toolbar order.
    pub const ALL: [Tool; 5] = [
        Tool::Brush,
        Tool::Eraser,
        Tool::Line,
        Tool::Rectangle,
        Tool::Circle,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Tool::Brush => "brush",
            Tool::Eraser => "eraser",
            Tool::Line => "line",
            Tool::Rectangle => "rectangle",
            Tool::Circle => "circle",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tool::Brush => "Brush",
            Tool::Eraser => "Eraser",
            Tool::Line => "Line",
            Tool::Rectangle => "Rectangle",
            Tool::Circle => "Circle",
        }
    }

    /// Shape drawn by shape tools; `None` for freehand tools.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Tool::Line => Some(ShapeKind::Line),
            Tool::Rectangle => Some(ShapeKind::Rectangle),
            Tool::Circle => Some(ShapeKind::Circle),
            Tool::Brush | Tool::Eraser => None,
        }
    }

    /// Pointer cursor the host should show over the surface.
    pub fn cursor(self) -> Cursor {
        match self {
            Tool::Brush => Cursor::Pencil,
            Tool::Eraser => Cursor::Disc,
            Tool::Line | Tool::Rectangle | Tool::Circle => Cursor::Crosshair,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_lowercase();
        Tool::ALL
            .into_iter()
            .find(|tool| tool.id() == id)
            .ok_or_else(|| format!("Unknown tool '{}'", s))
    }
}

/// Cursor affordance for the active tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Pencil hotspot at the tip
    Pencil,
    /// Outline of the eraser footprint
    Disc,
    Crosshair,
}
