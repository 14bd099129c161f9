//! Embassy tasks
//!
//! `keys_task` scans the navigation keys and feeds the event channel;
//! `ui_task` is the single polling point that drives menu navigation and
//! rendering.

pub mod keys;
pub mod ui;
