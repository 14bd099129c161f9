//! Settings menu model and navigation
//!
//! The menu is a static tree of entries navigated with ordinary key
//! presses. The tree itself never changes after startup; only the
//! navigation position into it does.

pub mod entry;
pub mod input;
pub mod nav;

pub use entry::{InputHandler, MenuEntry, ValueFormatter, ValueText};
pub use input::{KeyCode, KeyEvent, MenuInput};
pub use nav::{Menu, NavState, MENU_DEPTH};
