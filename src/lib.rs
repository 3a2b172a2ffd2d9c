//! Embeddable drawing canvas: tools, undo/redo history and PNG export.
//!
//! A host creates a [`Widget`] on a canvas element of its [`Page`], forwards
//! pointer, keyboard, toolbar and resize events to it, blits the damaged parts
//! of [`Widget::surface`] and stores the PNGs that the Save action produces.

pub mod config;
pub mod draw;
pub mod export;
pub mod history;
pub mod input;
pub mod page;
pub mod script;
pub mod toolbar;
pub mod util;
pub mod widget;

pub use config::Config;
pub use page::{ElementSize, Page};
pub use widget::{BrushSettings, Widget, WidgetConfig, WidgetError};
