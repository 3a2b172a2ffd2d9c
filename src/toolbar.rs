//! Toolbar descriptors for hosts that render the widget's controls.
//!
//! The widget does not draw its toolbar. It hands the host an ordered list of
//! buttons plus the ids of the color and size inputs, and the host reports
//! clicks and input changes back through [`crate::widget::Widget::activate`]
//! and the brush setters.

use crate::config::{Action, KeybindingsConfig};
use crate::input::Tool;

/// Element id of the color picker input.
pub const COLOR_INPUT_ID: &str = "colorPicker";

/// Element id of the brush size number input.
pub const SIZE_INPUT_ID: &str = "brushSize";

/// One toolbar button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarItem {
    pub action: Action,
    pub id: &'static str,
    pub label: &'static str,
    /// Tooltip text, e.g. `Brush (Ctrl+Shift+B)`
    pub title: String,
}

impl ToolbarItem {
    pub fn new(action: Action, keybindings: &KeybindingsConfig) -> Self {
        let title = match keybindings.primary_binding(action) {
            Some(binding) => format!("{} ({})", action.label(), binding),
            None => action.label().to_string(),
        };
        Self {
            action,
            id: action.id(),
            label: action.label(),
            title,
        }
    }

    /// Whether the button should be highlighted while `tool` is active.
    pub fn is_active(&self, tool: Tool) -> bool {
        self.action == Action::select(tool)
    }
}

/// Builds every toolbar button in display order.
pub fn toolbar_items(keybindings: &KeybindingsConfig) -> Vec<ToolbarItem> {
    Action::ALL
        .into_iter()
        .map(|action| ToolbarItem::new(action, keybindings))
        .collect()
}
