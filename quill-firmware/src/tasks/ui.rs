//! UI task
//!
//! The single polling point of the display subsystem: drains the key
//! channel through the menu's capture policy, rolls the runtime counters,
//! and renders one frame per tick. Menu, runtime state, renderer and the
//! panel handle all live here for the program lifetime.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use quill_core::menu::Menu;
use quill_display::StatusRenderer;

use crate::channels::KEY_EVENTS;
use crate::menu::MENU_ROOT;
use crate::panel::{assets, IliPanel};
use crate::state::KeyboardState;

/// Render interval
const FRAME_INTERVAL_MS: u64 = 25;

#[embassy_executor::task]
pub async fn ui_task(mut panel: IliPanel) {
    info!("UI task started");

    let mut menu = Menu::new(&MENU_ROOT);
    let mut state = KeyboardState::new();
    let mut renderer = StatusRenderer::new(assets());
    let mut ticker = Ticker::every(Duration::from_millis(FRAME_INTERVAL_MS));

    loop {
        while let Ok(event) = KEY_EVENTS.try_receive() {
            if event.pressed {
                state.note_keypress();
            }
            let consumed = menu.process_key(event.code, event.pressed, &mut state);
            if !consumed {
                // On a full keyboard this is where the event continues
                // into normal key processing
                trace!("key passed through: {}", event.code);
            }
        }

        let now_ms = Instant::now().as_millis() as u32;
        state.tick(now_ms);
        renderer.render(&mut panel, &state, &mut menu, now_ms);
        ticker.next().await;
    }
}
