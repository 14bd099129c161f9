//! Input events and key-to-navigation mapping

/// Abstract navigation input consumed by the menu state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuInput {
    /// Leave the menu entirely
    Exit,
    /// Pop one level; at the root this exits
    Back,
    /// Descend into the selected submenu
    Enter,
    /// Move selection up, wrapping
    Up,
    /// Move selection down, wrapping
    Down,
    /// Adjust the selected value downward
    Left,
    /// Adjust the selected value upward
    Right,
}

/// Key codes delivered by the external key decoder
///
/// Only keys the menu layer cares about are named; everything else
/// arrives as `Other` and is swallowed while the menu is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyCode {
    /// Designated menu activation/exit key
    DisplayMenu,
    Escape,
    Space,
    Enter,
    Up,
    W,
    Down,
    S,
    Left,
    A,
    Right,
    D,
    /// Any other key on the board
    Other(u16),
}

impl KeyCode {
    /// Map a key onto a menu input while the menu is active
    ///
    /// Each navigation action has at least one alias alongside the
    /// arrow cluster (WASD, Space for confirm).
    pub fn to_menu_input(self) -> Option<MenuInput> {
        match self {
            KeyCode::DisplayMenu => Some(MenuInput::Exit),
            KeyCode::Escape => Some(MenuInput::Back),
            KeyCode::Space | KeyCode::Enter => Some(MenuInput::Enter),
            KeyCode::Up | KeyCode::W => Some(MenuInput::Up),
            KeyCode::Down | KeyCode::S => Some(MenuInput::Down),
            KeyCode::Left | KeyCode::A => Some(MenuInput::Left),
            KeyCode::Right | KeyCode::D => Some(MenuInput::Right),
            KeyCode::Other(_) => None,
        }
    }
}

/// A key press or release from the external matrix decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    pub code: KeyCode,
    pub pressed: bool,
}

impl KeyEvent {
    pub const fn press(code: KeyCode) -> Self {
        Self {
            code,
            pressed: true,
        }
    }

    pub const fn release(code: KeyCode) -> Self {
        Self {
            code,
            pressed: false,
        }
    }
}
