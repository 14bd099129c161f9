//! Test doubles shared by this crate's unit tests
//!
//! `RecordingDriver` captures every draw call so tests can assert on the
//! exact primitives a render pass produced.

use heapless::{String, Vec};
use quill_core::menu::{Menu, MenuEntry, MenuInput, ValueText};
use quill_core::runtime::{KeymapFlags, LedLocks, RuntimeControls, RuntimeState, UserFlags};

use crate::driver::{FontHandle, FrameDriver, Hsv, ImageHandle};
use crate::renderer::Assets;

/// Fixed glyph advance of the recording driver's fonts
pub const CHAR_W: u16 = 6;
/// Fixed line height of the recording driver's fonts
pub const LINE_H: u16 = 10;
/// Fixed icon size
pub const ICON_SIZE: (u16, u16) = (16, 16);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Clear,
    Rect {
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        color: Hsv,
    },
    Text {
        x: u16,
        y: u16,
        font: FontHandle,
        text: String<64>,
        fg: Hsv,
        bg: Hsv,
    },
    Image {
        x: u16,
        y: u16,
        image: ImageHandle,
        fg: Hsv,
        bg: Hsv,
    },
    Flush,
}

pub struct RecordingDriver {
    pub ops: Vec<DrawOp, 256>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    fn push(&mut self, op: DrawOp) {
        self.ops.push(op).expect("recording buffer full");
    }

    pub fn has_text(&self, wanted: &str) -> bool {
        self.ops.iter().any(|op| match op {
            DrawOp::Text { text, .. } => text.as_str() == wanted,
            _ => false,
        })
    }

    pub fn text_color(&self, wanted: &str) -> Option<Hsv> {
        self.ops.iter().find_map(|op| match op {
            DrawOp::Text { text, fg, .. } if text.as_str() == wanted => Some(*fg),
            _ => None,
        })
    }

    pub fn flushes(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Flush))
            .count()
    }
}

impl FrameDriver for RecordingDriver {
    fn dimensions(&self) -> (u16, u16) {
        (240, 320)
    }

    fn clear(&mut self) {
        self.push(DrawOp::Clear);
    }

    fn fill_rect(&mut self, x0: u16, y0: u16, x1: u16, y1: u16, color: Hsv) {
        self.push(DrawOp::Rect {
            x0,
            y0,
            x1,
            y1,
            color,
        });
    }

    fn draw_text(&mut self, x: u16, y: u16, font: FontHandle, text: &str, fg: Hsv, bg: Hsv) -> u16 {
        let width = self.text_width(font, text);
        let mut copy = String::new();
        let _ = copy.push_str(text);
        self.push(DrawOp::Text {
            x,
            y,
            font,
            text: copy,
            fg,
            bg,
        });
        width
    }

    fn draw_image(&mut self, x: u16, y: u16, image: ImageHandle, fg: Hsv, bg: Hsv) {
        self.push(DrawOp::Image { x, y, image, fg, bg });
    }

    fn text_width(&self, _font: FontHandle, text: &str) -> u16 {
        text.chars().count() as u16 * CHAR_W
    }

    fn line_height(&self, _font: FontHandle) -> u16 {
        LINE_H
    }

    fn image_size(&self, _image: ImageHandle) -> (u16, u16) {
        ICON_SIZE
    }

    fn flush(&mut self) {
        self.push(DrawOp::Flush);
    }
}

pub fn test_assets() -> Assets {
    Assets {
        font_title: FontHandle(0),
        font_mono: FontHandle(1),
        font_ui: FontHandle(2),
        lock_caps_on: ImageHandle(0),
        lock_caps_off: ImageHandle(1),
        lock_num_on: ImageHandle(2),
        lock_num_off: ImageHandle(3),
        lock_scrl_on: ImageHandle(4),
        lock_scrl_off: ImageHandle(5),
        cg_on: ImageHandle(6),
        cg_off: ImageHandle(7),
    }
}

/// Minimal runtime double; only the accessors the display reads matter
#[derive(Default)]
pub struct TestState {
    pub rgb_on: bool,
    pub hue: u8,
    pub wpm: u8,
    pub scan_rate: u16,
    pub cpi: u16,
    pub locks: LedLocks,
    pub keymap: KeymapFlags,
    pub user: UserFlags,
    pub dragscroll: bool,
    pub sniping: bool,
    pub auto_mouse: bool,
}

impl RuntimeState for TestState {
    fn rgb_enabled(&self) -> bool {
        self.rgb_on
    }
    fn rgb_effect(&self) -> u8 {
        0
    }
    fn rgb_effect_name(&self) -> &'static str {
        "CYCLE_LEFT_RIGHT"
    }
    fn rgb_hue(&self) -> u8 {
        self.hue
    }
    fn rgb_sat(&self) -> u8 {
        255
    }
    fn rgb_val(&self) -> u8 {
        255
    }
    fn rgb_speed(&self) -> u8 {
        64
    }
    fn pointer_cpi(&self) -> u16 {
        self.cpi
    }
    fn dragscroll_enabled(&self) -> bool {
        self.dragscroll
    }
    fn sniping_enabled(&self) -> bool {
        self.sniping
    }
    fn auto_mouse_enabled(&self) -> bool {
        self.auto_mouse
    }
    fn wpm(&self) -> u8 {
        self.wpm
    }
    fn scan_rate(&self) -> u16 {
        self.scan_rate
    }
    fn led_locks(&self) -> LedLocks {
        self.locks
    }
    fn keymap_flags(&self) -> KeymapFlags {
        self.keymap
    }
    fn user_flags(&self) -> UserFlags {
        self.user
    }
    fn active_layer_name(&self) -> &'static str {
        "default"
    }
    fn default_layer_name(&self) -> &'static str {
        "QWERTY"
    }
    fn autocorrected_text(&self) -> &str {
        ""
    }
    fn autocorrect_original(&self) -> &str {
        ""
    }
}

impl RuntimeControls for TestState {
    fn rgb_toggle(&mut self) {
        self.rgb_on = !self.rgb_on;
    }
    fn rgb_effect_next(&mut self) {}
    fn rgb_effect_prev(&mut self) {}
    fn rgb_hue_up(&mut self) {
        self.hue = self.hue.wrapping_add(8);
    }
    fn rgb_hue_down(&mut self) {
        self.hue = self.hue.wrapping_sub(8);
    }
    fn rgb_sat_up(&mut self) {}
    fn rgb_sat_down(&mut self) {}
    fn rgb_val_up(&mut self) {}
    fn rgb_val_down(&mut self) {}
    fn rgb_speed_up(&mut self) {}
    fn rgb_speed_down(&mut self) {}
    fn pointer_cpi_up(&mut self) {
        self.cpi = self.cpi.saturating_add(100);
    }
    fn pointer_cpi_down(&mut self) {
        self.cpi = self.cpi.saturating_sub(100);
    }
    fn dragscroll_toggle(&mut self) {
        self.dragscroll = !self.dragscroll;
    }
    fn sniping_toggle(&mut self) {
        self.sniping = !self.sniping;
    }
    fn auto_mouse_toggle(&mut self) {
        self.auto_mouse = !self.auto_mouse;
    }
    fn nkro_toggle(&mut self) {
        self.keymap.nkro = !self.keymap.nkro;
    }
    fn autocorrect_toggle(&mut self) {
        self.keymap.autocorrect = !self.keymap.autocorrect;
    }
    fn oneshot_toggle(&mut self) {
        self.keymap.oneshot = !self.keymap.oneshot;
    }
    fn audio_toggle(&mut self) {
        self.user.audio = !self.user.audio;
    }
    fn clicky_toggle(&mut self) {
        self.user.clicky = !self.user.clicky;
    }
    fn swap_hands_toggle(&mut self) {
        self.user.swap_hands = !self.user.swap_hands;
    }
    fn default_layout_next(&mut self) {}
    fn default_layout_prev(&mut self) {}
}

fn toggle_handler(controls: &mut dyn RuntimeControls, input: MenuInput) -> bool {
    match input {
        MenuInput::Left | MenuInput::Right => {
            controls.rgb_toggle();
            true
        }
        _ => false,
    }
}

fn toggle_value(state: &dyn RuntimeState, out: &mut ValueText) {
    let _ = out.push_str(if state.rgb_enabled() { "on" } else { "off" });
}

fn hue_handler(controls: &mut dyn RuntimeControls, input: MenuInput) -> bool {
    match input {
        MenuInput::Left => {
            controls.rgb_hue_down();
            true
        }
        MenuInput::Right => {
            controls.rgb_hue_up();
            true
        }
        _ => false,
    }
}

fn hue_value(state: &dyn RuntimeState, out: &mut ValueText) {
    use core::fmt::Write;
    let _ = write!(out, "{}", state.rgb_hue());
}

static RGB_ENTRIES: [MenuEntry; 1] = [MenuEntry::Value {
    label: "RGB hue",
    on_input: hue_handler,
    format: hue_value,
}];

static TEST_ENTRIES: [MenuEntry; 2] = [
    MenuEntry::Value {
        label: "RGB enabled",
        on_input: toggle_handler,
        format: toggle_value,
    },
    MenuEntry::Parent {
        label: "RGB Settings",
        children: &RGB_ENTRIES,
    },
];

static TEST_ROOT: MenuEntry = MenuEntry::Parent {
    label: "Configuration",
    children: &TEST_ENTRIES,
};

/// Fresh inactive menu over the shared test tree plus a default state
pub fn menu_over_test_tree() -> (Menu, TestState) {
    (Menu::new(&TEST_ROOT), TestState::default())
}
