//! Runtime-state boundary
//!
//! The keyboard owns layer state, RGB settings, pointer configuration and
//! the other values the display shows. The display core reads them through
//! [`RuntimeState`], and menu value entries adjust them through
//! [`RuntimeControls`]. Nothing behind these traits is owned or mutated by
//! the core outside of handler dispatch.

use heapless::String;

/// Maximum characters kept from an autocorrect banner line
pub const BANNER_LEN: usize = 20;

/// Host lock-key indicator state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedLocks {
    pub caps: bool,
    pub num: bool,
    pub scroll: bool,
}

/// Keymap-level feature flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeymapFlags {
    pub nkro: bool,
    pub autocorrect: bool,
    pub oneshot: bool,
    /// Ctrl and GUI swapped (for macOS-style layouts)
    pub swap_ctl_gui: bool,
}

/// User-level feature flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UserFlags {
    pub audio: bool,
    pub clicky: bool,
    pub host_driver_disabled: bool,
    pub swap_hands: bool,
}

/// Read accessors for everything the status display renders
pub trait RuntimeState {
    fn rgb_enabled(&self) -> bool;
    fn rgb_effect(&self) -> u8;
    /// Effect name as stored (upper-case, underscore-separated)
    fn rgb_effect_name(&self) -> &'static str;
    fn rgb_hue(&self) -> u8;
    fn rgb_sat(&self) -> u8;
    fn rgb_val(&self) -> u8;
    fn rgb_speed(&self) -> u8;

    /// Effective pointer CPI (sniping CPI while sniping is active)
    fn pointer_cpi(&self) -> u16;
    fn dragscroll_enabled(&self) -> bool;
    fn sniping_enabled(&self) -> bool;
    fn auto_mouse_enabled(&self) -> bool;

    fn wpm(&self) -> u8;
    fn scan_rate(&self) -> u16;

    fn led_locks(&self) -> LedLocks;
    fn keymap_flags(&self) -> KeymapFlags;
    fn user_flags(&self) -> UserFlags;

    fn active_layer_name(&self) -> &'static str;
    fn default_layer_name(&self) -> &'static str;

    /// Most recent autocorrect replacement, empty if none yet
    fn autocorrected_text(&self) -> &str;
    /// Text the replacement was applied to, empty if none yet
    fn autocorrect_original(&self) -> &str;
}

/// Mutators exposed to menu value-entry handlers
pub trait RuntimeControls: RuntimeState {
    fn rgb_toggle(&mut self);
    fn rgb_effect_next(&mut self);
    fn rgb_effect_prev(&mut self);
    fn rgb_hue_up(&mut self);
    fn rgb_hue_down(&mut self);
    fn rgb_sat_up(&mut self);
    fn rgb_sat_down(&mut self);
    fn rgb_val_up(&mut self);
    fn rgb_val_down(&mut self);
    fn rgb_speed_up(&mut self);
    fn rgb_speed_down(&mut self);

    fn pointer_cpi_up(&mut self);
    fn pointer_cpi_down(&mut self);
    fn dragscroll_toggle(&mut self);
    fn sniping_toggle(&mut self);
    fn auto_mouse_toggle(&mut self);

    fn nkro_toggle(&mut self);
    fn autocorrect_toggle(&mut self);
    fn oneshot_toggle(&mut self);
    fn audio_toggle(&mut self);
    fn clicky_toggle(&mut self);
    fn swap_hands_toggle(&mut self);

    fn default_layout_next(&mut self);
    fn default_layout_prev(&mut self);
}

/// One frame's copy of every displayable field
///
/// Captured at the top of each render pass and diffed against the previous
/// frame's copy by the dirty-field tracker.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuntimeSnapshot {
    pub hue: u8,
    pub rgb_enabled: bool,
    pub rgb_effect: u8,
    pub rgb_effect_name: &'static str,
    pub cpi: u16,
    pub dragscroll: bool,
    pub sniping: bool,
    pub auto_mouse: bool,
    pub wpm: u8,
    pub scan_rate: u16,
    pub locks: LedLocks,
    pub keymap: KeymapFlags,
    pub user: UserFlags,
    pub layer_name: &'static str,
    pub default_layer_name: &'static str,
    pub autocorrected: String<BANNER_LEN>,
    pub autocorrect_original: String<BANNER_LEN>,
}

impl RuntimeSnapshot {
    /// Capture the current value of every accessor
    pub fn capture(state: &dyn RuntimeState) -> Self {
        Self {
            hue: state.rgb_hue(),
            rgb_enabled: state.rgb_enabled(),
            rgb_effect: state.rgb_effect(),
            rgb_effect_name: state.rgb_effect_name(),
            cpi: state.pointer_cpi(),
            dragscroll: state.dragscroll_enabled(),
            sniping: state.sniping_enabled(),
            auto_mouse: state.auto_mouse_enabled(),
            wpm: state.wpm(),
            scan_rate: state.scan_rate(),
            locks: state.led_locks(),
            keymap: state.keymap_flags(),
            user: state.user_flags(),
            layer_name: state.active_layer_name(),
            default_layer_name: state.default_layer_name(),
            autocorrected: banner_copy(state.autocorrected_text()),
            autocorrect_original: banner_copy(state.autocorrect_original()),
        }
    }
}

/// Copy a banner line, truncating past capacity
fn banner_copy(src: &str) -> String<BANNER_LEN> {
    let mut out = String::new();
    for c in src.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
