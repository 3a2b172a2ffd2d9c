//! Widget construction, accessors, brush settings and history commands.

use super::{BrushSettings, DrawingState, WidgetConfig, WidgetError};
use crate::config::{Action, KeyBinding};
use crate::draw::{Color, DirtyTracker, Surface, color::WHITE};
use crate::export::{ExportRequest, FileSaveConfig};
use crate::history::{History, PaintHandle, PaintQueue};
use crate::input::{Cursor, Focus, Key, Modifiers, Tool};
use crate::page::{ElementSize, Page};
use crate::toolbar::{ToolbarItem, toolbar_items};
use crate::util::Rect;
use log::{debug, info, warn};
use std::collections::HashMap;

/// An embeddable drawing canvas.
///
/// Owns its surface, history, paint queue and settings exclusively; two
/// widgets never share state.
pub struct Widget {
    canvas_id: String,
    pub(super) surface: Surface,
    pub(super) history: History,
    pub(super) queue: PaintQueue,
    pub(super) dirty: DirtyTracker,
    pub(super) tool: Tool,
    pub(super) brush: BrushSettings,
    pub(super) state: DrawingState,
    pub(super) modifiers: Modifiers,
    pub(super) focus: Focus,
    action_map: HashMap<KeyBinding, Action>,
    toolbar: Vec<ToolbarItem>,
    export: FileSaveConfig,
    pending_export: Option<ExportRequest>,
}

impl Widget {
    /// Attaches a widget to the canvas `config.canvas_id` on `page`.
    ///
    /// When the page has no such element it is created at the configured
    /// default size. The surface starts cleared to the background color and
    /// that blank state seeds the history.
    pub fn mount(page: &mut Page, config: WidgetConfig) -> Result<Self, WidgetError> {
        if config.canvas_id.trim().is_empty() {
            return Err(WidgetError::EmptyCanvasId);
        }
        let default_size = ElementSize::new(
            config.settings.canvas.default_width,
            config.settings.canvas.default_height,
        );
        let size = page.get_or_create_canvas(&config.canvas_id, default_size);
        Self::new(config, size)
    }

    /// Creates a widget for an element of `size` without consulting a page.
    pub fn new(config: WidgetConfig, size: ElementSize) -> Result<Self, WidgetError> {
        if config.canvas_id.trim().is_empty() {
            return Err(WidgetError::EmptyCanvasId);
        }
        let WidgetConfig {
            canvas_id,
            mut settings,
        } = config;
        settings.validate_and_clamp();

        let action_map = settings.keybindings.build_action_map()?;
        let background = settings.canvas.background.to_color_or(WHITE);
        let surface = Surface::new(size.width, size.height, background)?;
        let history = History::new(surface.encode()?, settings.history.max_depth);

        let brush = BrushSettings::new(
            settings.brush.default_color.to_color(),
            settings.brush.default_size,
        );

        info!(
            "Mounted drawing widget on '{}' ({}x{})",
            canvas_id, size.width, size.height
        );

        let mut dirty = DirtyTracker::new();
        dirty.mark_full();

        Ok(Self {
            canvas_id,
            surface,
            history,
            queue: PaintQueue::new(),
            dirty,
            tool: Tool::default(),
            brush,
            state: DrawingState::Idle,
            modifiers: Modifiers::new(),
            focus: Focus::default(),
            action_map,
            toolbar: toolbar_items(&settings.keybindings),
            export: FileSaveConfig::from_config(&settings.export),
            pending_export: None,
        })
    }

    pub fn canvas_id(&self) -> &str {
        &self.canvas_id
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn active_tool(&self) -> Tool {
        self.tool
    }

    pub fn brush(&self) -> BrushSettings {
        self.brush
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawingState::Drawing(_))
    }

    /// Cursor the host should show over the surface.
    pub fn cursor(&self) -> Cursor {
        self.tool.cursor()
    }

    pub fn toolbar(&self) -> &[ToolbarItem] {
        &self.toolbar
    }

    pub fn export_settings(&self) -> &FileSaveConfig {
        &self.export
    }

    /// Number of restores waiting for [`Widget::run_pending`].
    pub fn pending_paints(&self) -> usize {
        self.queue.len()
    }

    /// Drains pending dirty rectangles for the current surface size.
    pub fn take_dirty_regions(&mut self) -> Vec<Rect> {
        let width = i32::try_from(self.surface.width()).unwrap_or(i32::MAX);
        let height = i32::try_from(self.surface.height()).unwrap_or(i32::MAX);
        self.dirty.take_regions(width, height)
    }

    /// Takes the PNG produced by the last Save, if the host has not yet.
    pub fn take_pending_export(&mut self) -> Option<ExportRequest> {
        self.pending_export.take()
    }

    /// Switches the active tool. Ignored while a stroke is in progress.
    ///
    /// Returns true when the tool changed or was already active.
    pub fn select_tool(&mut self, tool: Tool) -> bool {
        if self.is_drawing() {
            debug!("Ignoring tool change to {} during a stroke", tool);
            return false;
        }
        if self.tool != tool {
            debug!("Tool changed: {} -> {}", self.tool, tool);
            self.tool = tool;
        }
        true
    }

    /// Updates the color used by the next stroke.
    pub fn set_brush_color(&mut self, color: Color) {
        self.brush.color = color;
        debug!("Brush color set to {}", color.to_hex());
    }

    /// Updates the brush color from a color-picker value such as `#1e90ff`.
    ///
    /// Returns false (and keeps the current color) when the value is invalid.
    pub fn set_brush_color_hex(&mut self, value: &str) -> bool {
        match Color::from_hex(value) {
            Some(color) => {
                self.set_brush_color(color);
                true
            }
            None => {
                warn!("Ignoring invalid brush color '{}'", value);
                false
            }
        }
    }

    /// Updates the width used by the next stroke, clamped to 1..=50.
    pub fn set_brush_size(&mut self, size: f64) {
        self.brush.set_size(size);
        debug!("Brush size set to {:.1}px", self.brush.size());
    }

    /// Applies every queued restore in order and reports each outcome to its
    /// handle. Returns the number of jobs run.
    ///
    /// A snapshot that fails to decode leaves the surface unchanged.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Some(job) = self.queue.pop() {
            let outcome = self.surface.paint_encoded(job.snapshot());
            match &outcome {
                Ok(()) => self.dirty.mark_full(),
                Err(err) => warn!("Failed to restore history snapshot: {}", err),
            }
            job.complete(outcome);
            ran += 1;
        }
        if ran > 0 {
            debug!("Ran {} pending paint(s)", ran);
        }
        ran
    }

    /// Steps back one history entry.
    ///
    /// The restore is queued; the returned handle resolves once
    /// [`Widget::run_pending`] has painted it. Returns `None` when there is
    /// nothing to undo or a stroke is in progress.
    pub fn undo(&mut self) -> Option<PaintHandle> {
        if self.is_drawing() {
            debug!("Ignoring undo during a stroke");
            return None;
        }
        let snapshot = self.history.undo()?.clone();
        debug!(
            "Undo: {} past, {} future",
            self.history.past_len(),
            self.history.future_len()
        );
        Some(self.queue.enqueue(snapshot))
    }

    /// Re-applies the most recently undone entry. See [`Widget::undo`].
    pub fn redo(&mut self) -> Option<PaintHandle> {
        if self.is_drawing() {
            debug!("Ignoring redo during a stroke");
            return None;
        }
        let snapshot = self.history.redo()?.clone();
        debug!(
            "Redo: {} past, {} future",
            self.history.past_len(),
            self.history.future_len()
        );
        Some(self.queue.enqueue(snapshot))
    }

    /// Fills the surface with the background color and records the result.
    ///
    /// Returns false when ignored mid-stroke or when the surface failed.
    pub fn clear(&mut self) -> bool {
        if self.is_drawing() {
            debug!("Ignoring clear during a stroke");
            return false;
        }
        self.run_pending();

        if let Err(err) = self.surface.clear(self.surface.background()) {
            warn!("Failed to clear surface: {}", err);
            return false;
        }
        self.dirty.mark_full();
        self.commit_snapshot();
        true
    }

    /// Exports the current pixels as a PNG for the host to store.
    ///
    /// Allowed mid-stroke; the export then includes the stroke so far.
    pub fn save(&mut self) -> bool {
        self.run_pending();

        match self.surface.export_png() {
            Ok(bytes) => {
                let request = ExportRequest {
                    filename: self.export.filename(),
                    bytes,
                };
                info!(
                    "Exported {} ({} bytes)",
                    request.filename,
                    request.bytes.len()
                );
                if self.pending_export.replace(request).is_some() {
                    debug!("Replaced an export the host never collected");
                }
                true
            }
            Err(err) => {
                warn!("Failed to export drawing: {}", err);
                false
            }
        }
    }

    /// Resizes the surface to a new container size, keeping what fits.
    pub fn on_container_resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.surface.width(), self.surface.height()) {
            return;
        }
        match self.surface.resize(width, height, true) {
            Ok(()) => {
                debug!("Surface resized to {}x{}", width, height);
                self.dirty.mark_full();
            }
            Err(err) => warn!("Failed to resize surface to {}x{}: {}", width, height, err),
        }
    }

    /// Records the current surface as a new history entry.
    pub(super) fn commit_snapshot(&mut self) {
        match self.surface.encode() {
            Ok(snapshot) => {
                self.history.commit(snapshot);
                debug!("Committed history entry ({} past)", self.history.past_len());
            }
            Err(err) => warn!("Failed to record history snapshot: {}", err),
        }
    }

    /// Look up an action for a key press under the current modifiers.
    ///
    /// An exact binding wins; otherwise a binding that leaves Alt out still
    /// fires while Alt is held.
    pub(super) fn find_action(&self, key: Key) -> Option<Action> {
        let press = KeyBinding::from_press(key, &self.modifiers)?;
        if let Some(action) = self.action_map.get(&press) {
            return Some(*action);
        }
        self.action_map
            .iter()
            .find(|(binding, _)| binding.matches(press.key, &self.modifiers))
            .map(|(_, action)| *action)
    }
}
