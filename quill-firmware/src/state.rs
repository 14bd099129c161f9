//! Runtime-state providers
//!
//! On a full keyboard build most of these values come from the matrix
//! scanner, the RGB driver, the pointing device and the host LED report;
//! this board owns them directly and exposes them through the core's
//! accessor traits. WPM and scan rate are derived here from keypress
//! timing and the scanner's cycle counter.

use heapless::String;
use portable_atomic::Ordering;

use quill_core::runtime::{
    KeymapFlags, LedLocks, RuntimeControls, RuntimeState, UserFlags, BANNER_LEN,
};

use crate::channels::SCAN_CYCLES;

/// Effect table mirrored from the RGB matrix driver
pub const RGB_EFFECTS: [&str; 6] = [
    "SOLID_COLOR",
    "BREATHING",
    "BAND_SAT",
    "CYCLE_ALL",
    "CYCLE_LEFT_RIGHT",
    "TYPING_HEATMAP",
];

/// Selectable default layouts
pub const DEFAULT_LAYOUTS: [&str; 3] = ["QWERTY", "COLEMAK_DH", "DVORAK"];

/// Momentary layer names, indexed by layer id
pub const LAYER_NAMES: [&str; 5] = ["default", "lower", "raise", "adjust", "mouse"];

const HSV_STEP: u8 = 8;
const CPI_STEP: u16 = 100;
const CPI_MIN: u16 = 100;
const CPI_MAX: u16 = 3200;
const SNIPING_CPI: u16 = 400;

/// Milliseconds between WPM/scan-rate window rollovers
const SAMPLE_WINDOW_MS: u32 = 1000;

/// Keyboard-side runtime state behind the display's accessor traits
pub struct KeyboardState {
    rgb_on: bool,
    effect: u8,
    hue: u8,
    sat: u8,
    val: u8,
    speed: u8,

    cpi: u16,
    dragscroll: bool,
    sniping: bool,
    auto_mouse: bool,

    keymap: KeymapFlags,
    user: UserFlags,
    locks: LedLocks,

    layout: u8,
    active_layer: u8,

    autocorrected: String<BANNER_LEN>,
    autocorrect_original: String<BANNER_LEN>,

    // Derived counters
    wpm: u8,
    scan_rate: u16,
    presses_in_window: u16,
    cycles_at_window: u32,
    window_start_ms: u32,
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardState {
    pub fn new() -> Self {
        Self {
            rgb_on: true,
            effect: 0,
            hue: 128,
            sat: 255,
            val: 255,
            speed: 64,
            cpi: 800,
            dragscroll: false,
            sniping: false,
            auto_mouse: false,
            keymap: KeymapFlags {
                nkro: true,
                ..KeymapFlags::default()
            },
            user: UserFlags::default(),
            locks: LedLocks::default(),
            layout: 0,
            active_layer: 0,
            autocorrected: String::new(),
            autocorrect_original: String::new(),
            wpm: 0,
            scan_rate: 0,
            presses_in_window: 0,
            cycles_at_window: 0,
            window_start_ms: 0,
        }
    }

    /// Record one key press for the WPM estimate
    pub fn note_keypress(&mut self) {
        self.presses_in_window = self.presses_in_window.saturating_add(1);
    }

    /// Host LED report changed
    pub fn set_locks(&mut self, locks: LedLocks) {
        self.locks = locks;
    }

    /// Momentary layer changed
    pub fn set_active_layer(&mut self, layer: u8) {
        self.active_layer = layer;
    }

    /// A correction fired; keep the most recent pair for the banner
    pub fn note_autocorrect(&mut self, corrected: &str, original: &str) {
        self.autocorrected.clear();
        let _ = self.autocorrected.push_str(corrected);
        self.autocorrect_original.clear();
        let _ = self.autocorrect_original.push_str(original);
    }

    /// Roll the sampling window; call once per frame
    ///
    /// WPM uses the usual 5-characters-per-word convention and smooths
    /// across windows to keep the readout from flickering.
    pub fn tick(&mut self, now_ms: u32) {
        let elapsed = now_ms.wrapping_sub(self.window_start_ms);
        if elapsed < SAMPLE_WINDOW_MS {
            return;
        }

        let cycles = SCAN_CYCLES.load(Ordering::Relaxed);
        let cycle_delta = cycles.wrapping_sub(self.cycles_at_window);
        self.scan_rate = (cycle_delta.saturating_mul(1000) / elapsed.max(1)).min(u16::MAX as u32) as u16;
        self.cycles_at_window = cycles;

        let instant_wpm = (self.presses_in_window as u32 * 12).min(255) as u8;
        self.wpm = ((self.wpm as u16 * 3 + instant_wpm as u16) / 4) as u8;
        self.presses_in_window = 0;
        self.window_start_ms = now_ms;
    }
}

impl RuntimeState for KeyboardState {
    fn rgb_enabled(&self) -> bool {
        self.rgb_on
    }
    fn rgb_effect(&self) -> u8 {
        self.effect
    }
    fn rgb_effect_name(&self) -> &'static str {
        RGB_EFFECTS[self.effect as usize % RGB_EFFECTS.len()]
    }
    fn rgb_hue(&self) -> u8 {
        self.hue
    }
    fn rgb_sat(&self) -> u8 {
        self.sat
    }
    fn rgb_val(&self) -> u8 {
        self.val
    }
    fn rgb_speed(&self) -> u8 {
        self.speed
    }

    fn pointer_cpi(&self) -> u16 {
        if self.sniping {
            SNIPING_CPI
        } else {
            self.cpi
        }
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
        LAYER_NAMES[self.active_layer as usize % LAYER_NAMES.len()]
    }
    fn default_layer_name(&self) -> &'static str {
        DEFAULT_LAYOUTS[self.layout as usize % DEFAULT_LAYOUTS.len()]
    }

    fn autocorrected_text(&self) -> &str {
        &self.autocorrected
    }
    fn autocorrect_original(&self) -> &str {
        &self.autocorrect_original
    }
}

impl RuntimeControls for KeyboardState {
    fn rgb_toggle(&mut self) {
        self.rgb_on = !self.rgb_on;
    }
    fn rgb_effect_next(&mut self) {
        self.effect = (self.effect + 1) % RGB_EFFECTS.len() as u8;
    }
    fn rgb_effect_prev(&mut self) {
        let n = RGB_EFFECTS.len() as u8;
        self.effect = (self.effect + n - 1) % n;
    }
    fn rgb_hue_up(&mut self) {
        self.hue = self.hue.wrapping_add(HSV_STEP);
    }
    fn rgb_hue_down(&mut self) {
        self.hue = self.hue.wrapping_sub(HSV_STEP);
    }
    fn rgb_sat_up(&mut self) {
        self.sat = self.sat.saturating_add(HSV_STEP);
    }
    fn rgb_sat_down(&mut self) {
        self.sat = self.sat.saturating_sub(HSV_STEP);
    }
    fn rgb_val_up(&mut self) {
        self.val = self.val.saturating_add(HSV_STEP);
    }
    fn rgb_val_down(&mut self) {
        self.val = self.val.saturating_sub(HSV_STEP);
    }
    fn rgb_speed_up(&mut self) {
        self.speed = self.speed.saturating_add(HSV_STEP);
    }
    fn rgb_speed_down(&mut self) {
        self.speed = self.speed.saturating_sub(HSV_STEP);
    }

    fn pointer_cpi_up(&mut self) {
        self.cpi = (self.cpi + CPI_STEP).min(CPI_MAX);
    }
    fn pointer_cpi_down(&mut self) {
        self.cpi = self.cpi.saturating_sub(CPI_STEP).max(CPI_MIN);
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

    fn default_layout_next(&mut self) {
        self.layout = (self.layout + 1) % DEFAULT_LAYOUTS.len() as u8;
    }
    fn default_layout_prev(&mut self) {
        let n = DEFAULT_LAYOUTS.len() as u8;
        self.layout = (self.layout + n - 1) % n;
    }
}
