//! Input vocabulary: tools, keys and modifiers.
//!
//! This module defines what hosts feed into a [`crate::widget::Widget`]. The
//! state machine that consumes these events lives in the widget itself.

pub mod events;
pub mod modifiers;
pub mod tool;

pub use events::{Focus, Key};
pub use modifiers::Modifiers;
pub use tool::{Cursor, Tool};
