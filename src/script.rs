//! Replayable event scripts.
//!
//! A script is a TOML file listing host events in order. The `drawpad`
//! binary feeds them to a widget, which makes headless renders and
//! regression checks possible without a windowing system.
//!
//! ```toml
//! width = 200
//! height = 120
//!
//! [[events]]
//! type = "select_tool"
//! tool = "rectangle"
//!
//! [[events]]
//! type = "pointer_down"
//! x = 20
//! y = 20
//!
//! [[events]]
//! type = "pointer_move"
//! x = 180
//! y = 100
//!
//! [[events]]
//! type = "pointer_up"
//!
//! [[events]]
//! type = "key"
//! chord = "Ctrl+Shift+S"
//! ```

use crate::config::{Action, ColorSpec, KeyBinding};
use crate::draw::Point;
use crate::export::ExportRequest;
use crate::input::{Focus, Key, Tool};
use crate::widget::Widget;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A parsed event script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Canvas width; overrides the configured default
    pub width: Option<u32>,
    /// Canvas height; overrides the configured default
    pub height: Option<u32>,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

/// One host event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    SelectTool { tool: Tool },
    BrushColor { color: ColorSpec },
    BrushSize { size: f64 },
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    PointerLeave,
    /// A shortcut chord such as `Ctrl+Shift+Z`
    Key { chord: String },
    /// A toolbar click by element id
    Click { id: String },
    /// Moves keyboard focus into (or out of) a toolbar text field
    Focus { text_field: bool },
    Resize { width: u32, height: u32 },
    /// Applies queued restores, like one turn of a host event loop
    RunPending,
}

/// What a replay produced besides the final surface.
#[derive(Debug, Default)]
pub struct ReplayReport {
    pub events: usize,
    /// PNGs from Save actions, in order
    pub exports: Vec<ExportRequest>,
    /// Restores requested by toolbar clicks that failed to paint
    pub failed_restores: usize,
}

impl Script {
    /// Loads a script from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Failed to parse script {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Feeds every event to `widget`, then settles pending restores.
    ///
    /// Invalid key chords are errors; everything else the widget ignores
    /// (e.g. a pointer move while idle) is replayed faithfully.
    pub fn replay(&self, widget: &mut Widget) -> Result<ReplayReport> {
        let mut report = ReplayReport::default();
        let mut handles = Vec::new();

        for (index, event) in self.events.iter().enumerate() {
            log::debug!("Replaying event {}: {:?}", index, event);
            match event {
                ScriptEvent::SelectTool { tool } => {
                    widget.select_tool(*tool);
                }
                ScriptEvent::BrushColor { color } => {
                    let color = color
                        .resolve()
                        .with_context(|| format!("Event {}: unknown color {:?}", index, color))?;
                    widget.set_brush_color(color);
                }
                ScriptEvent::BrushSize { size } => widget.set_brush_size(*size),
                ScriptEvent::PointerDown { x, y } => widget.pointer_down(Point::new(*x, *y)),
                ScriptEvent::PointerMove { x, y } => widget.pointer_move(Point::new(*x, *y)),
                ScriptEvent::PointerUp => widget.pointer_up(),
                ScriptEvent::PointerLeave => widget.pointer_leave(),
                ScriptEvent::Key { chord } => {
                    let binding = KeyBinding::parse(chord)
                        .with_context(|| format!("Event {}: invalid chord '{}'", index, chord))?;
                    press_binding(widget, &binding);
                }
                ScriptEvent::Click { id } => {
                    match Action::from_id(id) {
                        Some(action) => handles.extend(widget.activate(action)),
                        None => log::warn!("Event {}: no toolbar item '{}'", index, id),
                    }
                }
                ScriptEvent::Focus { text_field } => widget.set_focus(if *text_field {
                    Focus::TextField
                } else {
                    Focus::Canvas
                }),
                ScriptEvent::Resize { width, height } => widget.on_container_resize(*width, *height),
                ScriptEvent::RunPending => {
                    widget.run_pending();
                }
            }

            report.exports.extend(widget.take_pending_export());
            report.events += 1;
        }

        widget.run_pending();
        for mut handle in handles {
            if let Some(Err(err)) = handle.try_outcome() {
                log::warn!("Restore failed during replay: {}", err);
                report.failed_restores += 1;
            }
        }

        Ok(report)
    }
}

/// Presses the modifiers of `binding`, then its key, then releases them.
fn press_binding(widget: &mut Widget, binding: &KeyBinding) {
    let modifiers: Vec<Key> = [
        (binding.command, Key::Ctrl),
        (binding.shift, Key::Shift),
        (binding.alt, Key::Alt),
    ]
    .into_iter()
    .filter_map(|(held, key)| held.then_some(key))
    .collect();

    for key in &modifiers {
        widget.on_key_press(*key);
    }
    widget.on_key_press(Key::Char(binding.key));
    for key in modifiers.iter().rev() {
        widget.on_key_release(*key);
    }
}
