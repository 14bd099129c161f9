//! Display engine for the Quill status panel
//!
//! This crate turns runtime-state snapshots and menu navigation state into
//! a minimal set of draw calls against an external frame driver:
//!
//! - `FrameDriver` trait: the contract the physical panel driver fulfills
//! - Dirty-field tracker: per-field redraw decisions between frames
//! - Incremental renderer: field redraws with stale-pixel erasure bounded
//!   by each field's widest-ever extent
//! - Menu overlay: full-region redraw gated on navigation-state equality
//!
//! The panel driver, font/image assets, and the keyboard's runtime state
//! all live outside this crate; everything here is hardware-agnostic and
//! unit-testable with a recording driver.

#![no_std]

pub mod driver;
pub mod renderer;
pub mod tracker;

mod overlay;

#[cfg(test)]
mod testing;

pub use driver::{FontHandle, FrameDriver, Hsv, ImageHandle};
pub use renderer::{Assets, MaxExtent, StatusRenderer};
pub use tracker::{DirtyFields, DirtyTracker, COUNTER_SAMPLE_MS};
