//! Menu navigation state machine
//!
//! Consumes abstract inputs and mutates the cursor position within the
//! static settings tree. All index arithmetic is modular, so every
//! operation is total; descending past the depth limit saturates instead
//! of failing.

use heapless::Vec;

use super::entry::MenuEntry;
use super::input::{KeyCode, MenuInput};
use crate::runtime::RuntimeControls;

/// Maximum nesting depth of the settings tree
pub const MENU_DEPTH: usize = 8;

/// Live cursor position within the menu tree
///
/// Single-writer: only [`Menu::process_key`]/[`Menu::handle_input`] mutate
/// this, from the keyboard's task-processing point. The renderer keeps its
/// own copy and compares structurally to gate overlay redraws.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NavState {
    /// Whether the menu overlay is active
    pub in_menu: bool,
    /// Child indices walked from the root, deepest last
    pub path: Vec<u8, MENU_DEPTH>,
    /// Selected child of the current menu, `None` while inactive
    pub selected: Option<u8>,
    /// Set when a value entry was adjusted since the last render
    pub dirty: bool,
}

/// Navigation state machine over a static settings tree
pub struct Menu {
    root: &'static MenuEntry,
    nav: NavState,
}

impl Menu {
    /// Create an inactive menu over `root`, which must be a parent entry
    pub fn new(root: &'static MenuEntry) -> Self {
        debug_assert!(root.is_parent());
        Self {
            root,
            nav: NavState::default(),
        }
    }

    /// Current navigation state
    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    /// Whether the menu overlay is active
    pub fn is_active(&self) -> bool {
        self.nav.in_menu
    }

    /// Clear the value-adjusted flag after a render
    pub fn clear_dirty(&mut self) {
        self.nav.dirty = false;
    }

    /// Entry reached by walking the stored path from the root
    ///
    /// Always a parent entry: `Enter` only ever pushes parent indices.
    pub fn current_menu(&self) -> &'static MenuEntry {
        let mut entry = self.root;
        for &idx in self.nav.path.iter() {
            match entry.children().get(idx as usize) {
                Some(child) if child.is_parent() => entry = child,
                _ => break,
            }
        }
        entry
    }

    /// Child of the current menu at the selected index
    pub fn selected_item(&self) -> Option<&'static MenuEntry> {
        let idx = self.nav.selected?;
        self.current_menu().children().get(idx as usize)
    }

    /// Process one abstract input
    ///
    /// Returns `true` if the event was consumed by the menu. While the
    /// menu is up every navigation input is consumed; a value handler may
    /// decline an input it has no use for, in which case the event falls
    /// through to normal key processing.
    pub fn handle_input(&mut self, input: MenuInput, controls: &mut dyn RuntimeControls) -> bool {
        match input {
            MenuInput::Exit => {
                self.nav.in_menu = false;
                self.nav.path.clear();
                self.nav.selected = None;
                true
            }
            MenuInput::Back => {
                // Pop the deepest level; backing out of the root exits
                match self.nav.path.pop() {
                    Some(idx) => self.nav.selected = Some(idx),
                    None => {
                        self.nav.in_menu = false;
                        self.nav.selected = None;
                    }
                }
                true
            }
            MenuInput::Enter => {
                if let (Some(idx), Some(item)) = (self.nav.selected, self.selected_item()) {
                    // Descend only into submenus; at depth 8 the push is
                    // dropped and selection stays on the current level
                    if item.is_parent() && self.nav.path.push(idx).is_ok() {
                        self.nav.selected = Some(0);
                    }
                }
                true
            }
            MenuInput::Up => {
                let count = self.current_menu().children().len() as u8;
                if count > 0 {
                    let sel = self.nav.selected.unwrap_or(0);
                    self.nav.selected = Some((sel + count - 1) % count);
                }
                true
            }
            MenuInput::Down => {
                let count = self.current_menu().children().len() as u8;
                if count > 0 {
                    let sel = self.nav.selected.unwrap_or(0);
                    self.nav.selected = Some((sel + 1) % count);
                }
                true
            }
            MenuInput::Left | MenuInput::Right => match self.selected_item() {
                Some(item) if item.is_value() => {
                    self.nav.dirty = true;
                    item.apply_input(controls, input)
                }
                _ => true,
            },
        }
    }

    /// Outer key-capture contract toward the input layer
    ///
    /// The designated activation key opens the menu at the root when it is
    /// not already open. While the menu is up, navigation keys dispatch
    /// through [`Menu::handle_input`] and every other key (and every
    /// release) is swallowed. Returns `true` if the event was consumed and
    /// must not reach normal key processing.
    pub fn process_key(
        &mut self,
        code: KeyCode,
        pressed: bool,
        controls: &mut dyn RuntimeControls,
    ) -> bool {
        if code == KeyCode::DisplayMenu && pressed && !self.nav.in_menu {
            self.nav.in_menu = true;
            self.nav.selected = Some(0);
            return true;
        }

        if !self.nav.in_menu {
            return false;
        }

        if pressed {
            if let Some(input) = code.to_menu_input() {
                return self.handle_input(input, controls);
            }
        }

        true
    }
}
