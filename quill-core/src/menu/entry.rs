//! Static menu tree model
//!
//! Entries are either submenus holding further entries, or adjustable
//! values carrying a pair of capabilities: one that applies Left/Right
//! input to the underlying setting, and one that formats the live value
//! for display. Building the tree is the job of configuration; this
//! module only defines its shape.

use heapless::String;

use super::input::MenuInput;
use crate::runtime::{RuntimeControls, RuntimeState};

/// Maximum characters in a formatted value
pub const VALUE_TEXT_LEN: usize = 31;

/// Buffer a value formatter writes into
pub type ValueText = String<VALUE_TEXT_LEN>;

/// Applies a Left/Right input to the setting behind a value entry.
///
/// Returns `true` if the input was consumed by the setting.
pub type InputHandler = fn(&mut dyn RuntimeControls, MenuInput) -> bool;

/// Formats the live value of a setting for on-screen display.
pub type ValueFormatter = fn(&dyn RuntimeState, &mut ValueText);

/// A node in the static settings tree
///
/// The root entry is always a [`MenuEntry::Parent`].
pub enum MenuEntry {
    /// Submenu holding an ordered list of child entries
    Parent {
        label: &'static str,
        children: &'static [MenuEntry],
    },
    /// Adjustable setting
    Value {
        label: &'static str,
        on_input: InputHandler,
        format: ValueFormatter,
    },
}

impl MenuEntry {
    /// Display label of this entry
    pub fn label(&self) -> &'static str {
        match self {
            MenuEntry::Parent { label, .. } => label,
            MenuEntry::Value { label, .. } => label,
        }
    }

    /// Check if this entry is a submenu
    pub fn is_parent(&self) -> bool {
        matches!(self, MenuEntry::Parent { .. })
    }

    /// Check if this entry is an adjustable value
    pub fn is_value(&self) -> bool {
        matches!(self, MenuEntry::Value { .. })
    }

    /// Children of this entry; empty for value entries
    pub fn children(&self) -> &'static [MenuEntry] {
        match self {
            MenuEntry::Parent { children, .. } => children,
            MenuEntry::Value { .. } => &[],
        }
    }

    /// Format the live value of a value entry, or `None` for submenus
    pub fn value_text(&self, state: &dyn RuntimeState) -> Option<ValueText> {
        match self {
            MenuEntry::Value { format, .. } => {
                let mut text = ValueText::new();
                format(state, &mut text);
                Some(text)
            }
            MenuEntry::Parent { .. } => None,
        }
    }

    /// Forward an input to a value entry's handler
    ///
    /// Returns `false` for submenus (no handler to invoke).
    pub fn apply_input(&self, controls: &mut dyn RuntimeControls, input: MenuInput) -> bool {
        match self {
            MenuEntry::Value { on_input, .. } => on_input(controls, input),
            MenuEntry::Parent { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::testing::TestRuntime;

    fn toggle(controls: &mut dyn RuntimeControls, input: MenuInput) -> bool {
        match input {
            MenuInput::Left | MenuInput::Right => {
                controls.rgb_toggle();
                true
            }
            _ => false,
        }
    }

    fn show(state: &dyn RuntimeState, out: &mut ValueText) {
        let _ = out.push_str(if state.rgb_enabled() { "on" } else { "off" });
    }

    static LEAF: MenuEntry = MenuEntry::Value {
        label: "RGB enabled",
        on_input: toggle,
        format: show,
    };

    static BRANCH: MenuEntry = MenuEntry::Parent {
        label: "RGB Settings",
        children: core::slice::from_ref(&LEAF),
    };

    #[test]
    fn test_entry_kinds() {
        assert!(BRANCH.is_parent());
        assert!(!BRANCH.is_value());
        assert!(LEAF.is_value());
        assert_eq!(BRANCH.label(), "RGB Settings");
        assert_eq!(BRANCH.children().len(), 1);
        assert!(LEAF.children().is_empty());
    }

    #[test]
    fn test_value_text() {
        let state = TestRuntime::default();
        let text = LEAF.value_text(&state).unwrap();
        assert_eq!(text.as_str(), "off");
        assert!(BRANCH.value_text(&state).is_none());
    }

    #[test]
    fn test_apply_input() {
        let mut state = TestRuntime::default();
        assert!(LEAF.apply_input(&mut state, MenuInput::Right));
        assert!(state.rgb_enabled());
        // Non-adjustment inputs fall through
        assert!(!LEAF.apply_input(&mut state, MenuInput::Up));
        // Submenus have no handler
        assert!(!BRANCH.apply_input(&mut state, MenuInput::Right));
    }
}
