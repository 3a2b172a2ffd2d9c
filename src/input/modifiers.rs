//! Keyboard modifier state tracking.

/// Keyboard modifier state.
///
/// Tracks which modifier keys are currently pressed so shortcuts can be
/// matched against configured keybindings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key pressed
    pub shift: bool,
    /// Ctrl key pressed
    pub ctrl: bool,
    /// Platform command key pressed (Cmd on macOS)
    pub meta: bool,
    /// Alt key pressed
    pub alt: bool,
}

impl Modifiers {
    /// Creates a new Modifiers instance with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the platform command modifier is held.
    ///
    /// Ctrl and Meta are interchangeable so `Ctrl+Shift+Z` also fires for
    /// `Cmd+Shift+Z`.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }

    /// Releases every modifier, e.g. after focus leaves the widget.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
