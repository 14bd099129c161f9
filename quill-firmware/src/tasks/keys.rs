//! Key input scanning task
//!
//! Direct-pin stand-in for the keyboard's matrix decoder: debounces a
//! handful of navigation keys and forwards press/release events in order.
//! On a full keyboard build the matrix scan feeds the same channel.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};
use portable_atomic::Ordering;

use quill_core::menu::{KeyCode, KeyEvent};

use crate::channels::{KEY_EVENTS, SCAN_CYCLES};

/// Poll interval of the scanner
const SCAN_INTERVAL_MS: u64 = 1;

/// Consecutive samples a changed level must hold to register
const DEBOUNCE_SAMPLES: u8 = 5;

/// Number of directly wired navigation keys
pub const KEY_COUNT: usize = 7;

/// One debounced, active-low key input
pub struct KeyPin {
    input: Input<'static>,
    code: KeyCode,
    stable: bool,
    counter: u8,
}

impl KeyPin {
    pub fn new(input: Input<'static>, code: KeyCode) -> Self {
        Self {
            input,
            code,
            stable: false,
            counter: 0,
        }
    }

    /// Sample the pin once; returns an event when the debounced level flips
    fn sample(&mut self) -> Option<KeyEvent> {
        let pressed = self.input.is_low();
        if pressed == self.stable {
            self.counter = 0;
            return None;
        }

        self.counter += 1;
        if self.counter < DEBOUNCE_SAMPLES {
            return None;
        }

        self.counter = 0;
        self.stable = pressed;
        Some(KeyEvent {
            code: self.code,
            pressed,
        })
    }
}

#[embassy_executor::task]
pub async fn keys_task(mut keys: [KeyPin; KEY_COUNT]) {
    info!("Key scan task started");

    let mut ticker = Ticker::every(Duration::from_millis(SCAN_INTERVAL_MS));
    loop {
        for key in keys.iter_mut() {
            if let Some(event) = key.sample() {
                if KEY_EVENTS.try_send(event).is_err() {
                    warn!("Key event dropped: channel full");
                }
            }
        }
        SCAN_CYCLES.fetch_add(1, Ordering::Relaxed);
        ticker.next().await;
    }
}
