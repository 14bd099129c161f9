//! Menu overlay drawing
//!
//! The overlay owns a dedicated band of the panel and is rebuilt wholesale
//! on every navigation change; the renderer's equality gate decides when
//! that happens. Layout: divider rule, current menu title, divider rule,
//! then one row per child with a thin rule after each.

use quill_core::menu::Menu;
use quill_core::runtime::RuntimeState;

use crate::driver::{FrameDriver, Hsv};
use crate::renderer::Assets;

/// Top of the overlay band
const OVERLAY_TOP: u16 = 80;
/// Left margin for title and entry rows
const TEXT_X: u16 = 8;

const SELECTED_FG: Hsv = Hsv::GREEN;
const SELECTED_BG: Hsv = Hsv::new(85, 255, 0);
const ENTRY_FG: Hsv = Hsv::RED;
const ENTRY_BG: Hsv = Hsv::new(0, 255, 0);

pub(crate) fn draw<D: FrameDriver>(
    display: &mut D,
    assets: &Assets,
    menu: &Menu,
    state: &dyn RuntimeState,
) {
    let (width, height) = display.dimensions();
    let rule = Hsv::hue(state.rgb_hue());
    let font = assets.font_ui;
    let line_h = display.line_height(font);

    display.fill_rect(0, 0, width - 1, height - 1, Hsv::BLACK);

    let current = menu.current_menu();
    let selected = menu.nav().selected;

    let mut y = OVERLAY_TOP;
    display.fill_rect(0, y, width, y + 3, rule);
    y += 8;
    display.draw_text(TEXT_X, y, font, current.label(), Hsv::WHITE, Hsv::BLACK);
    y += line_h + 4;
    display.fill_rect(0, y, width, y + 3, rule);
    y += 8;

    for (i, child) in current.children().iter().enumerate() {
        let (fg, bg) = if selected == Some(i as u8) {
            (SELECTED_FG, SELECTED_BG)
        } else {
            (ENTRY_FG, ENTRY_BG)
        };
        let x = display.draw_text(TEXT_X, y, font, child.label(), fg, bg);
        if child.is_parent() {
            display.draw_text(TEXT_X + x, y, font, "  >", Hsv::WHITE, Hsv::BLACK);
        } else if let Some(value) = child.value_text(state) {
            display.draw_text(TEXT_X + x, y, font, &value, Hsv::WHITE, Hsv::BLACK);
        }
        y += line_h + 4;
        display.fill_rect(0, y, width - 1, y, rule);
        y += 5;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{menu_over_test_tree, test_assets, DrawOp, RecordingDriver};
    use quill_core::menu::KeyCode;

    #[test]
    fn test_overlay_layout() {
        let mut display = RecordingDriver::new();
        let (mut menu, mut state) = menu_over_test_tree();
        menu.process_key(KeyCode::DisplayMenu, true, &mut state);

        draw(&mut display, &test_assets(), &menu, &state);

        // Band starts with a full wipe and the title between two rules
        let (w, h) = display.dimensions();
        assert_eq!(
            display.ops.first(),
            Some(&DrawOp::Rect {
                x0: 0,
                y0: 0,
                x1: w - 1,
                y1: h - 1,
                color: Hsv::BLACK,
            })
        );
        assert!(display.has_text("Configuration"));

        // Both children are present, with a submenu marker on the parent
        assert!(display.has_text("RGB enabled"));
        assert!(display.has_text("RGB Settings"));
        assert!(display.has_text("  >"));

        // The value entry shows its live formatted value
        assert!(display.has_text("off"));
    }

    #[test]
    fn test_selection_recolor() {
        let mut display = RecordingDriver::new();
        let (mut menu, mut state) = menu_over_test_tree();
        menu.process_key(KeyCode::DisplayMenu, true, &mut state);
        menu.process_key(KeyCode::Down, true, &mut state);

        draw(&mut display, &test_assets(), &menu, &state);

        assert_eq!(display.text_color("RGB Settings"), Some(SELECTED_FG));
        assert_eq!(display.text_color("RGB enabled"), Some(ENTRY_FG));
    }

    #[test]
    fn test_live_value_tracks_state() {
        let mut display = RecordingDriver::new();
        let (mut menu, mut state) = menu_over_test_tree();
        menu.process_key(KeyCode::DisplayMenu, true, &mut state);

        // Adjust the selected value entry, then redraw
        menu.process_key(KeyCode::Right, true, &mut state);
        draw(&mut display, &test_assets(), &menu, &state);
        assert!(display.has_text("on"));
    }
}
