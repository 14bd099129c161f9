//! Inter-task communication
//!
//! Key events flow from the input scanner to the UI task over a bounded
//! channel, preserving press/release order. The scan-cycle counter feeds
//! the SCANS readout on the status display.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use portable_atomic::AtomicU32;

use quill_core::menu::KeyEvent;

/// Channel capacity for key events from the scanner
const KEY_CHANNEL_SIZE: usize = 8;

/// Key events from the input scanner
pub static KEY_EVENTS: Channel<CriticalSectionRawMutex, KeyEvent, KEY_CHANNEL_SIZE> =
    Channel::new();

/// Scan cycles completed by the input task
pub static SCAN_CYCLES: AtomicU32 = AtomicU32::new(0);
