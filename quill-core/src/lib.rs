//! Board-agnostic UI core for the Quill keyboard display firmware
//!
//! This crate contains all menu and status-display logic that does not
//! depend on a specific panel or board:
//!
//! - Static settings-tree model (parent/value entries)
//! - Menu navigation state machine and key-capture policy
//! - Runtime-state accessor traits (the keyboard side of the boundary)
//! - Per-frame runtime snapshot used by the dirty-field tracker

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod menu;
pub mod runtime;
