//! Generic input event types for host integration.

/// Generic key representation.
///
/// Hosts map their native key codes to these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Shift modifier
    Shift,
    /// Ctrl modifier
    Ctrl,
    /// Platform command modifier (Cmd / Super)
    Meta,
    /// Alt modifier
    Alt,
    /// Unmapped or unrecognized key
    Unknown,
}

/// Where keyboard focus currently is.
///
/// Shortcuts are suppressed while the user is typing in a toolbar field such
/// as the brush-size input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Canvas,
    TextField,
}
