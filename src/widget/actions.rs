use crate::config::Action;
use crate::history::PaintHandle;
use crate::input::{Focus, Key};
use log::debug;

use super::Widget;

impl Widget {
    /// Processes a key press event.
    ///
    /// Modifier keys only update the tracked modifier state. Character keys
    /// are matched against the configured shortcuts unless focus is in a text
    /// field. Returns true when the press triggered an action, so the host
    /// can suppress its default handling.
    pub fn on_key_press(&mut self, key: Key) -> bool {
        match key {
            Key::Shift => {
                self.modifiers.shift = true;
                false
            }
            Key::Ctrl => {
                self.modifiers.ctrl = true;
                false
            }
            Key::Meta => {
                self.modifiers.meta = true;
                false
            }
            Key::Alt => {
                self.modifiers.alt = true;
                false
            }
            Key::Char(_) => {
                if self.focus == Focus::TextField {
                    return false;
                }
                match self.find_action(key) {
                    Some(action) => {
                        debug!("Shortcut {:?} triggered {:?}", key, action);
                        // Keyboard undo/redo has nobody to hand the handle to;
                        // failures still show up in the run_pending log.
                        let _ = self.activate(action);
                        true
                    }
                    None => false,
                }
            }
            Key::Unknown => false,
        }
    }

    /// Processes a key release event.
    pub fn on_key_release(&mut self, key: Key) {
        match key {
            Key::Shift => self.modifiers.shift = false,
            Key::Ctrl => self.modifiers.ctrl = false,
            Key::Meta => self.modifiers.meta = false,
            Key::Alt => self.modifiers.alt = false,
            _ => {}
        }
    }

    /// Tells the widget where keyboard focus is.
    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    /// Releases all tracked modifiers, e.g. when the window loses focus and
    /// release events will not arrive.
    pub fn reset_modifiers(&mut self) {
        self.modifiers.reset();
    }

    /// Runs a toolbar action.
    ///
    /// Returns the paint handle for undo and redo; `None` for every other
    /// action or when the action was a no-op.
    pub fn activate(&mut self, action: Action) -> Option<PaintHandle> {
        if let Some(tool) = action.tool() {
            self.select_tool(tool);
            return None;
        }

        // Save may snapshot a stroke in progress; other commands wait for it
        if action.is_command() && action != Action::Save && self.is_drawing() {
            debug!("Ignoring {:?} while a stroke is in progress", action);
            return None;
        }

        match action {
            Action::Undo => self.undo(),
            Action::Redo => self.redo(),
            Action::ClearCanvas => {
                self.clear();
                None
            }
            Action::Save => {
                self.save();
                None
            }
            _ => None,
        }
    }

    /// Runs the toolbar action whose button has element id `id`.
    ///
    /// Returns false for unknown ids.
    pub fn activate_by_id(&mut self, id: &str) -> bool {
        match Action::from_id(id) {
            Some(action) => {
                let _ = self.activate(action);
                true
            }
            None => {
                debug!("Unknown toolbar id '{}'", id);
                false
            }
        }
    }
}
