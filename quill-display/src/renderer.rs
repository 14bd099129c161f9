//! Incremental status renderer
//!
//! Redraws only the fields whose state changed since the last frame. Each
//! field has a fixed anchor position and a recorded maximum extent, the
//! widest its content has ever been on screen. When new content comes out
//! narrower, a filled rectangle erases just the gap between the new and
//! the recorded extent, so a field never needs a full-region clear.
//!
//! The menu overlay is the exception: it occupies a dedicated band and is
//! rebuilt wholesale, gated on a structural comparison of the navigation
//! state against the copy from the previous frame.

use core::fmt::Write;

use heapless::String;
use quill_core::menu::{Menu, NavState};
use quill_core::runtime::{RuntimeSnapshot, RuntimeState};

use crate::driver::{FontHandle, FrameDriver, Hsv, ImageHandle};
use crate::overlay;
use crate::tracker::{DirtyFields, DirtyTracker};

/// Left edge of the status column
const LEFT_X: u16 = 5;
/// Anchor of the matrix scan-rate counter
const SCANS_X: u16 = 50;
/// Anchor of the pointer CPI readout
const CPI_X: u16 = 110;
/// Anchors of the pointer flag row
const DRAGSCROLL_X: u16 = 5;
const AUTO_MOUSE_X: u16 = 90;
const SNIPING_X: u16 = 170;
/// Top of the status area, below the title bar
const TOP_Y: u16 = 16;
/// Vertical padding between rows
const ROW_PAD: u16 = 4;
/// Minimum column width for a feature flag label
const FLAG_COL_MIN: u16 = 30;
/// Hue for enabled feature labels; disabled labels use 255
const ENABLED_HUE: u8 = 153;
/// Hue for the auto-mouse-layer label when enabled
const AUTO_MOUSE_HUE: u8 = 34;

/// Widest pixel extent a field has occupied so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MaxExtent(u16);

impl MaxExtent {
    /// Record the new right edge of a field's content
    ///
    /// Returns the span of stale pixels to erase when the new content is
    /// narrower than the widest previously drawn. The stored extent is the
    /// running maximum either way.
    pub fn advance(&mut self, end: u16) -> Option<(u16, u16)> {
        if end < self.0 {
            Some((end, self.0))
        } else {
            self.0 = end;
            None
        }
    }
}

/// Asset handles obtained from the frame driver at startup
#[derive(Debug, Clone, Copy)]
pub struct Assets {
    pub font_title: FontHandle,
    pub font_mono: FontHandle,
    pub font_ui: FontHandle,
    pub lock_caps_on: ImageHandle,
    pub lock_caps_off: ImageHandle,
    pub lock_num_on: ImageHandle,
    pub lock_num_off: ImageHandle,
    pub lock_scrl_on: ImageHandle,
    pub lock_scrl_off: ImageHandle,
    pub cg_on: ImageHandle,
    pub cg_off: ImageHandle,
}

#[derive(Default)]
struct FieldExtents {
    wpm: MaxExtent,
    scans: MaxExtent,
    cpi: MaxExtent,
    dragscroll: MaxExtent,
    auto_mouse: MaxExtent,
    sniping: MaxExtent,
    keymap: MaxExtent,
    user: MaxExtent,
    rgb_effect: MaxExtent,
    default_layer: MaxExtent,
    layer: MaxExtent,
    autocorrected: MaxExtent,
    autocorrect_original: MaxExtent,
}

/// Incremental renderer owning the previous frame's render snapshot
///
/// Single-owner: lives on the keyboard's UI task alongside the menu and is
/// only ever invoked from its polling point.
pub struct StatusRenderer {
    assets: Assets,
    tracker: DirtyTracker,
    last_nav: NavState,
    extents: FieldExtents,
}

impl StatusRenderer {
    pub fn new(assets: Assets) -> Self {
        Self {
            assets,
            tracker: DirtyTracker::new(),
            last_nav: NavState::default(),
            extents: FieldExtents::default(),
        }
    }

    /// Render one frame
    ///
    /// Returns `true` while the menu overlay owns the screen.
    pub fn render<D: FrameDriver>(
        &mut self,
        display: &mut D,
        state: &dyn RuntimeState,
        menu: &mut Menu,
        now_ms: u32,
    ) -> bool {
        if *menu.nav() != self.last_nav {
            menu.clear_dirty();
            self.last_nav = menu.nav().clone();

            if menu.is_active() {
                overlay::draw(display, &self.assets, menu, state);
                display.flush();
                return true;
            }

            // Menu just closed: wipe the overlay and repaint every field
            let (width, height) = display.dimensions();
            display.fill_rect(0, 0, width - 1, height - 1, Hsv::BLACK);
            self.tracker.invalidate();
            self.extents = FieldExtents::default();
        } else if menu.is_active() {
            // Navigation state identical to the last rendered frame
            return true;
        }

        let snapshot = RuntimeSnapshot::capture(state);
        let dirty = self.tracker.diff(&snapshot, now_ms);
        if dirty.any() {
            self.draw_status(display, &snapshot, &dirty);
            display.flush();
        }
        false
    }

    fn draw_status<D: FrameDriver>(
        &mut self,
        display: &mut D,
        snap: &RuntimeSnapshot,
        dirty: &DirtyFields,
    ) {
        let font = self.assets.font_ui;
        let fg = Hsv::hue(snap.hue);
        let bg = Hsv::new(snap.hue, 255, 0);
        let line_h = display.line_height(font);
        let mut buf: String<50> = String::new();
        let mut y = TOP_Y;

        // Lock indicator row: dimmed icon when the lock is off
        if dirty.locks {
            let mut x = LEFT_X;
            for (on, icon_on, icon_off) in [
                (snap.locks.caps, self.assets.lock_caps_on, self.assets.lock_caps_off),
                (snap.locks.num, self.assets.lock_num_on, self.assets.lock_num_off),
                (snap.locks.scroll, self.assets.lock_scrl_on, self.assets.lock_scrl_off),
            ] {
                let icon = if on { icon_on } else { icon_off };
                let value = if on { 255 } else { 32 };
                display.draw_image(x, y, icon, Hsv::new(snap.hue, 255, value), bg);
                x += display.image_size(icon).0 + 4;
            }
        }
        y += display.image_size(self.assets.lock_caps_on).1 + ROW_PAD;

        // High-frequency counters
        if dirty.wpm {
            buf.clear();
            let _ = write!(buf, "WPM: {}", snap.wpm);
            Self::draw_field(display, font, LEFT_X, y, &buf, fg, bg, &mut self.extents.wpm);
        }
        if dirty.scan_rate {
            buf.clear();
            let _ = write!(buf, "SCANS: {}", snap.scan_rate);
            Self::draw_field(display, font, SCANS_X, y, &buf, fg, bg, &mut self.extents.scans);
        }
        if dirty.cpi {
            buf.clear();
            let _ = write!(buf, "CPI: {}", snap.cpi);
            Self::draw_field(display, font, CPI_X, y, &buf, fg, bg, &mut self.extents.cpi);
        }
        y += line_h + ROW_PAD;

        // Pointer flags
        if dirty.dragscroll {
            let hue = if snap.dragscroll { ENABLED_HUE } else { 255 };
            Self::draw_field(
                display,
                font,
                DRAGSCROLL_X,
                y,
                "DRAG SCROLL",
                Hsv::hue(hue),
                Hsv::new(hue, 255, 0),
                &mut self.extents.dragscroll,
            );
        }
        if dirty.auto_mouse {
            let hue = if snap.auto_mouse { AUTO_MOUSE_HUE } else { 255 };
            Self::draw_field(
                display,
                font,
                AUTO_MOUSE_X,
                y,
                "Auto Layer",
                Hsv::hue(hue),
                Hsv::new(hue, 255, 0),
                &mut self.extents.auto_mouse,
            );
        }
        if dirty.sniping {
            let hue = if snap.sniping { ENABLED_HUE } else { 255 };
            Self::draw_field(
                display,
                font,
                SNIPING_X,
                y,
                "Sniping",
                Hsv::hue(hue),
                Hsv::new(hue, 255, 0),
                &mut self.extents.sniping,
            );
        }
        y += line_h + ROW_PAD;

        // Keymap flag row
        if dirty.keymap {
            let cg = if snap.keymap.swap_ctl_gui {
                self.assets.cg_on
            } else {
                self.assets.cg_off
            };
            display.draw_image(LEFT_X, y, cg, fg, bg);
            let mut x = LEFT_X + display.image_size(cg).0 + 5;
            x += flag_label(display, font, x, y, "NKRO ", snap.keymap.nkro);
            x += flag_label(display, font, x, y, "CRCT ", snap.keymap.autocorrect);
            x += flag_label(display, font, x, y, "1SHOT", snap.keymap.oneshot);
            if let Some((from, to)) = self.extents.keymap.advance(x) {
                display.fill_rect(from, y, to, y + line_h, Hsv::BLACK);
            }
        }
        y += line_h + 2;

        // User flag row, indented past the swap icon
        if dirty.user {
            let mut x = LEFT_X + display.image_size(self.assets.cg_off).0 + 5;
            x += flag_label(display, font, x, y, "AUDIO", snap.user.audio);
            x += flag_label(display, font, x, y, "CLCK ", snap.user.clicky);
            x += flag_label(display, font, x, y, "HOST ", snap.user.host_driver_disabled);
            x += flag_label(display, font, x, y, "SWAP ", snap.user.swap_hands);
            if let Some((from, to)) = self.extents.user.advance(x) {
                display.fill_rect(from, y, to, y + line_h, Hsv::BLACK);
            }
        }
        y += line_h + ROW_PAD;

        // RGB effect line
        if dirty.rgb_effect {
            buf.clear();
            let _ = buf.push_str("RGB Matrix: ");
            if snap.rgb_enabled {
                write_effect_name(&mut buf, snap.rgb_effect_name);
            } else {
                let _ = buf.push_str("off");
            }
            Self::draw_field(
                display,
                font,
                LEFT_X,
                y,
                &buf,
                fg,
                bg,
                &mut self.extents.rgb_effect,
            );
        }
        y += line_h + ROW_PAD;

        // Layout / layer line
        if dirty.default_layer || dirty.layer {
            buf.clear();
            let _ = write!(buf, "LAYOUT: {}", snap.default_layer_name);
            Self::draw_field(
                display,
                font,
                LEFT_X,
                y,
                &buf,
                fg,
                bg,
                &mut self.extents.default_layer,
            );
        }
        if dirty.layer {
            let x = LEFT_X + display.text_width(font, "LAYOUT: COLEMAK_DH");
            buf.clear();
            let _ = write!(buf, "LAYER: {}", snap.layer_name);
            Self::draw_field(display, font, x, y, &buf, fg, bg, &mut self.extents.layer);
        }
        y += line_h + ROW_PAD;

        // Autocorrect banner
        if dirty.autocorrect {
            buf.clear();
            let _ = write!(buf, "Autocorrected: {}", snap.autocorrected);
            Self::draw_field(
                display,
                font,
                LEFT_X,
                y,
                &buf,
                fg,
                bg,
                &mut self.extents.autocorrected,
            );
            buf.clear();
            let _ = write!(buf, "Original Text: {}", snap.autocorrect_original);
            Self::draw_field(
                display,
                font,
                LEFT_X,
                y + line_h + ROW_PAD,
                &buf,
                fg,
                bg,
                &mut self.extents.autocorrect_original,
            );
        }
        y += (line_h + ROW_PAD) * 2;

        // Font previews only need repainting on a recolor
        if dirty.hue {
            for preview in [self.assets.font_title, self.assets.font_mono, self.assets.font_ui] {
                y = draw_character_set(display, preview, y, fg, bg);
            }
        }
    }

    /// Draw one text field and erase whatever its widest rendering left behind
    #[allow(clippy::too_many_arguments)]
    fn draw_field<D: FrameDriver>(
        display: &mut D,
        font: FontHandle,
        x: u16,
        y: u16,
        text: &str,
        fg: Hsv,
        bg: Hsv,
        extent: &mut MaxExtent,
    ) {
        let end = x + display.draw_text(x, y, font, text, fg, bg);
        if let Some((from, to)) = extent.advance(end) {
            let line_h = display.line_height(font);
            display.fill_rect(from, y, to, y + line_h, Hsv::BLACK);
        }
    }
}

/// Draw one feature label, recolored by enablement; returns the column advance
fn flag_label<D: FrameDriver>(
    display: &mut D,
    font: FontHandle,
    x: u16,
    y: u16,
    text: &str,
    enabled: bool,
) -> u16 {
    let hue = if enabled { ENABLED_HUE } else { 255 };
    let width = display.draw_text(x, y, font, text, Hsv::hue(hue), Hsv::new(hue, 255, 0));
    width.max(FLAG_COL_MIN)
}

/// Title-case an effect name stored as UPPER_SNAKE
///
/// "CYCLE_LEFT_RIGHT" becomes "Cycle Left Right".
fn write_effect_name(out: &mut String<50>, name: &str) {
    let mut word_start = true;
    for c in name.chars() {
        let mapped = if c == '_' {
            word_start = true;
            ' '
        } else if word_start {
            word_start = false;
            c.to_ascii_uppercase()
        } else {
            c.to_ascii_lowercase()
        };
        let _ = out.push(mapped);
    }
}

/// Draw a font's printable ASCII set wrapped into fixed-width rows
///
/// Returns the y position below the preview.
fn draw_character_set<D: FrameDriver>(
    display: &mut D,
    font: FontHandle,
    mut y: u16,
    fg: Hsv,
    bg: Hsv,
) -> u16 {
    const CHARS_PER_ROW: usize = 32;
    let line_h = display.line_height(font);
    let mut row: String<CHARS_PER_ROW> = String::new();
    for code in 0x20u8..0x7F {
        let _ = row.push(code as char);
        if row.len() == CHARS_PER_ROW {
            display.draw_text(LEFT_X, y, font, &row, fg, bg);
            row.clear();
            y += line_h + 1;
        }
    }
    if !row.is_empty() {
        display.draw_text(LEFT_X, y, font, &row, fg, bg);
        y += line_h + 1;
    }
    y + 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{menu_over_test_tree, test_assets, DrawOp, RecordingDriver, CHAR_W, LINE_H};
    use quill_core::menu::KeyCode;

    // Row position of the WPM/SCANS/CPI counters: status top + icon row
    const COUNTER_Y: u16 = TOP_Y + 16 + ROW_PAD;

    #[test]
    fn test_max_extent_erase_span() {
        let mut extent = MaxExtent::default();
        assert_eq!(extent.advance(50), None);
        assert_eq!(extent.advance(50), None);
        // Narrower content erases exactly the delta
        assert_eq!(extent.advance(30), Some((30, 50)));
        // The recorded maximum does not shrink
        assert_eq!(extent.advance(40), Some((40, 50)));
        // Wider content grows the maximum with no erase
        assert_eq!(extent.advance(60), None);
        assert_eq!(extent.advance(59), Some((59, 60)));
    }

    #[test]
    fn test_first_frame_draws_all_fields_and_flushes() {
        let mut display = RecordingDriver::new();
        let mut renderer = StatusRenderer::new(test_assets());
        let (mut menu, mut state) = menu_over_test_tree();
        state.wpm = 42;

        let in_menu = renderer.render(&mut display, &state, &mut menu, 0);
        assert!(!in_menu);
        assert!(display.has_text("WPM: 42"));
        assert!(display.has_text("SCANS: 0"));
        assert!(display.has_text("DRAG SCROLL"));
        assert!(display.has_text("LAYOUT: QWERTY"));
        assert_eq!(display.flushes(), 1);
    }

    #[test]
    fn test_clean_frame_draws_nothing() {
        let mut display = RecordingDriver::new();
        let mut renderer = StatusRenderer::new(test_assets());
        let (mut menu, state) = menu_over_test_tree();

        renderer.render(&mut display, &state, &mut menu, 0);
        display.ops.clear();

        renderer.render(&mut display, &state, &mut menu, 10);
        assert!(display.ops.is_empty());
    }

    #[test]
    fn test_shrinking_field_emits_exact_erase_rect() {
        let mut display = RecordingDriver::new();
        let mut renderer = StatusRenderer::new(test_assets());
        let (mut menu, mut state) = menu_over_test_tree();
        state.wpm = 100;

        renderer.render(&mut display, &state, &mut menu, 0);
        display.ops.clear();

        state.wpm = 5;
        renderer.render(&mut display, &state, &mut menu, 200);

        // "WPM: 100" reached x = 5 + 8*CHAR_W; "WPM: 5" ends at 5 + 6*CHAR_W
        let old_end = LEFT_X + 8 * CHAR_W;
        let new_end = LEFT_X + 6 * CHAR_W;
        let erase = DrawOp::Rect {
            x0: new_end,
            y0: COUNTER_Y,
            x1: old_end,
            y1: COUNTER_Y + LINE_H,
            color: Hsv::BLACK,
        };
        assert!(display.ops.contains(&erase));
    }

    #[test]
    fn test_growing_field_emits_no_erase_rect() {
        let mut display = RecordingDriver::new();
        let mut renderer = StatusRenderer::new(test_assets());
        let (mut menu, mut state) = menu_over_test_tree();
        state.wpm = 5;

        renderer.render(&mut display, &state, &mut menu, 0);
        display.ops.clear();

        state.wpm = 100;
        renderer.render(&mut display, &state, &mut menu, 200);

        assert!(display.has_text("WPM: 100"));
        assert!(!display
            .ops
            .iter()
            .any(|op| matches!(op, DrawOp::Rect { .. })));
    }

    #[test]
    fn test_effect_name_title_cased() {
        let mut display = RecordingDriver::new();
        let mut renderer = StatusRenderer::new(test_assets());
        let (mut menu, mut state) = menu_over_test_tree();
        state.rgb_on = true;

        renderer.render(&mut display, &state, &mut menu, 0);
        assert!(display.has_text("RGB Matrix: Cycle Left Right"));
    }

    #[test]
    fn test_overlay_gate_skips_identical_nav_state() {
        let mut display = RecordingDriver::new();
        let mut renderer = StatusRenderer::new(test_assets());
        let (mut menu, mut state) = menu_over_test_tree();

        renderer.render(&mut display, &state, &mut menu, 0);
        menu.process_key(KeyCode::DisplayMenu, true, &mut state);

        display.ops.clear();
        assert!(renderer.render(&mut display, &state, &mut menu, 10));
        assert!(display.has_text("Configuration"));
        assert_eq!(display.flushes(), 1);

        // Bit-identical navigation state: the overlay is not redrawn
        display.ops.clear();
        assert!(renderer.render(&mut display, &state, &mut menu, 20));
        assert!(display.ops.is_empty());
    }

    #[test]
    fn test_value_adjustment_redraws_overlay_and_clears_dirty() {
        let mut display = RecordingDriver::new();
        let mut renderer = StatusRenderer::new(test_assets());
        let (mut menu, mut state) = menu_over_test_tree();

        menu.process_key(KeyCode::DisplayMenu, true, &mut state);
        renderer.render(&mut display, &state, &mut menu, 0);

        menu.process_key(KeyCode::Right, true, &mut state);
        assert!(menu.nav().dirty);

        display.ops.clear();
        assert!(renderer.render(&mut display, &state, &mut menu, 10));
        assert!(!display.ops.is_empty());
        assert!(!menu.nav().dirty);
    }

    #[test]
    fn test_menu_exit_repaints_whole_screen() {
        let mut display = RecordingDriver::new();
        let mut renderer = StatusRenderer::new(test_assets());
        let (mut menu, mut state) = menu_over_test_tree();

        renderer.render(&mut display, &state, &mut menu, 0);
        menu.process_key(KeyCode::DisplayMenu, true, &mut state);
        renderer.render(&mut display, &state, &mut menu, 10);

        menu.process_key(KeyCode::DisplayMenu, true, &mut state);
        display.ops.clear();
        let in_menu = renderer.render(&mut display, &state, &mut menu, 20);
        assert!(!in_menu);

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
        // Every field repaints after the wipe
        assert!(display.has_text("LAYOUT: QWERTY"));
    }
}
