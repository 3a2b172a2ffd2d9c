//! Keybinding configuration types and parsing.
//!
//! Every toolbar action can be bound to one or more key chords. Ctrl and the
//! platform command key are treated as the same modifier, so a binding written
//! as `Ctrl+Shift+Z` also fires for `Cmd+Shift+Z`.

use crate::input::{Key, Modifiers, Tool};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// All possible actions that can be bound to keys or toolbar buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Tool selection
    SelectBrush,
    SelectEraser,
    SelectLine,
    SelectRectangle,
    SelectCircle,

    // Commands
    Undo,
    Redo,
    ClearCanvas,
    Save,
}

impl Action {
    /// Every action, in toolbar order.
    pub const ALL: [Action; 9] = [
        Action::SelectBrush,
        Action::SelectEraser,
        Action::SelectLine,
        Action::SelectRectangle,
        Action::SelectCircle,
        Action::Undo,
        Action::Redo,
        Action::ClearCanvas,
        Action::Save,
    ];

    /// Action that selects `tool`.
    pub fn select(tool: Tool) -> Self {
        match tool {
            Tool::Brush => Action::SelectBrush,
            Tool::Eraser => Action::SelectEraser,
            Tool::Line => Action::SelectLine,
            Tool::Rectangle => Action::SelectRectangle,
            Tool::Circle => Action::SelectCircle,
        }
    }

    /// Tool this action selects, if it is a tool selection.
    pub fn tool(self) -> Option<Tool> {
        match self {
            Action::SelectBrush => Some(Tool::Brush),
            Action::SelectEraser => Some(Tool::Eraser),
            Action::SelectLine => Some(Tool::Line),
            Action::SelectRectangle => Some(Tool::Rectangle),
            Action::SelectCircle => Some(Tool::Circle),
            Action::Undo | Action::Redo | Action::ClearCanvas | Action::Save => None,
        }
    }

    /// Looks up the action whose toolbar element id is `id`.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.id() == id)
    }

    /// Stable identifier, shared with the toolbar element ids.
    pub fn id(self) -> &'static str {
        match self {
            Action::Undo => "undo",
            Action::Redo => "redo",
            Action::ClearCanvas => "clear",
            Action::Save => "save",
            tool_action => tool_action.tool().map(Tool::id).unwrap_or_default(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::Undo => "Undo",
            Action::Redo => "Redo",
            Action::ClearCanvas => "Clear",
            Action::Save => "Save",
            tool_action => tool_action.tool().map(Tool::label).unwrap_or_default(),
        }
    }

    /// True for everything that is not a tool selection: history steps,
    /// clearing and saving.
    pub fn is_command(self) -> bool {
        self.tool().is_none()
    }
}

/// Errors produced while parsing keybinding strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeybindingError {
    #[error("Empty keybinding string")]
    Empty,

    #[error("No key specified in: {0}")]
    MissingKey(String),

    #[error("Keybinding '{0}' has more than one key")]
    MultipleKeys(String),

    #[error("Duplicate keybinding '{binding}' assigned to both {first:?} and {second:?}")]
    Duplicate {
        binding: String,
        first: Action,
        second: Action,
    },
}

/// A single keybinding: a key character with optional modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: char,
    /// Ctrl or the platform command key
    pub command: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+Shift+B" or "Cmd + Shift + z".
    /// Modifiers can appear in any order and case.
    pub fn parse(s: &str) -> Result<Self, KeybindingError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(KeybindingError::Empty);
        }

        let mut command = false;
        let mut shift = false;
        let mut alt = false;
        let mut key = None;

        for part in s.split('+').map(str::trim) {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" | "cmd" | "command" | "meta" | "super" => command = true,
                "shift" => shift = true,
                "alt" | "option" => alt = true,
                // "Ctrl++" splits into an empty trailing pair; the key is '+'
                "" => continue,
                other => {
                    let mut chars = other.chars();
                    match (chars.next(), chars.next(), key) {
                        (Some(c), None, None) => key = Some(c),
                        _ => return Err(KeybindingError::MultipleKeys(s.to_string())),
                    }
                }
            }
        }

        let key = match key {
            Some(key) => key,
            None if s.ends_with("++") || s == "+" => '+',
            None => return Err(KeybindingError::MissingKey(s.to_string())),
        };

        Ok(Self {
            key,
            command,
            shift,
            alt,
        })
    }

    /// Builds the binding a key press corresponds to, if the key is a
    /// character key.
    pub fn from_press(key: Key, modifiers: &Modifiers) -> Option<Self> {
        match key {
            Key::Char(c) => Some(Self {
                key: c.to_ascii_lowercase(),
                command: modifiers.command(),
                shift: modifiers.shift,
                alt: modifiers.alt,
            }),
            _ => None,
        }
    }

    /// Check if this keybinding matches the current input state.
    ///
    /// Command and Shift must match exactly. Alt only matters when the
    /// binding asks for it; a held Alt does not block other bindings.
    pub fn matches(&self, key: char, modifiers: &Modifiers) -> bool {
        self.key.eq_ignore_ascii_case(&key)
            && self.command == modifiers.command()
            && self.shift == modifiers.shift
            && (!self.alt || modifiers.alt)
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.command {
            f.write_str("Ctrl+")?;
        }
        if self.shift {
            f.write_str("Shift+")?;
        }
        if self.alt {
            f.write_str("Alt+")?;
        }
        write!(f, "{}", self.key.to_ascii_uppercase())
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings. Users specify them in config.toml as:
/// ```toml
/// [keybindings]
/// undo = ["Ctrl+Shift+Z", "Ctrl+Z"]
/// select_brush = ["Ctrl+Shift+B"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_select_brush")]
    pub select_brush: Vec<String>,

    #[serde(default = "default_select_eraser")]
    pub select_eraser: Vec<String>,

    #[serde(default = "default_select_line")]
    pub select_line: Vec<String>,

    #[serde(default = "default_select_rectangle")]
    pub select_rectangle: Vec<String>,

    #[serde(default = "default_select_circle")]
    pub select_circle: Vec<String>,

    #[serde(default = "default_undo")]
    pub undo: Vec<String>,

    #[serde(default = "default_redo")]
    pub redo: Vec<String>,

    #[serde(default = "default_clear_canvas")]
    pub clear_canvas: Vec<String>,

    #[serde(default = "default_save")]
    pub save: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            select_brush: default_select_brush(),
            select_eraser: default_select_eraser(),
            select_line: default_select_line(),
            select_rectangle: default_select_rectangle(),
            select_circle: default_select_circle(),
            undo: default_undo(),
            redo: default_redo(),
            clear_canvas: default_clear_canvas(),
            save: default_save(),
        }
    }
}

impl KeybindingsConfig {
    /// Binding strings configured for `action`.
    pub fn bindings_for(&self, action: Action) -> &[String] {
        match action {
            Action::SelectBrush => &self.select_brush,
            Action::SelectEraser => &self.select_eraser,
            Action::SelectLine => &self.select_line,
            Action::SelectRectangle => &self.select_rectangle,
            Action::SelectCircle => &self.select_circle,
            Action::Undo => &self.undo,
            Action::Redo => &self.redo,
            Action::ClearCanvas => &self.clear_canvas,
            Action::Save => &self.save,
        }
    }

    /// First valid binding for `action`, used for tooltip text.
    pub fn primary_binding(&self, action: Action) -> Option<KeyBinding> {
        self.bindings_for(action)
            .iter()
            .find_map(|s| KeyBinding::parse(s).ok())
    }

    /// Build a lookup map from keybindings to actions for efficient matching.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, KeybindingError> {
        let mut map = HashMap::new();

        for action in Action::ALL {
            for binding_str in self.bindings_for(action) {
                let binding = KeyBinding::parse(binding_str)?;
                if let Some(existing) = map.insert(binding, action) {
                    return Err(KeybindingError::Duplicate {
                        binding: binding_str.clone(),
                        first: existing,
                        second: action,
                    });
                }
            }
        }

        Ok(map)
    }
}

fn default_select_brush() -> Vec<String> {
    vec!["Ctrl+Shift+B".to_string()]
}

fn default_select_eraser() -> Vec<String> {
    vec!["Ctrl+Shift+E".to_string()]
}

fn default_select_line() -> Vec<String> {
    vec!["Ctrl+Shift+L".to_string()]
}

fn default_select_rectangle() -> Vec<String> {
    vec!["Ctrl+Shift+R".to_string()]
}

fn default_select_circle() -> Vec<String> {
    vec!["Ctrl+Shift+C".to_string()]
}

fn default_undo() -> Vec<String> {
    vec!["Ctrl+Shift+Z".to_string()]
}

fn default_redo() -> Vec<String> {
    vec!["Ctrl+Shift+Y".to_string()]
}

fn default_clear_canvas() -> Vec<String> {
    vec!["Ctrl+Shift+X".to_string()]
}

fn default_save() -> Vec<String> {
    vec!["Ctrl+Shift+S".to_string()]
}
