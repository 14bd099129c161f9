//! Dirty-field tracking
//!
//! Decides, per status field, whether a redraw is needed this frame by
//! comparing the current runtime snapshot against the last rendered one.
//! A hue change forces every field dirty: recoloring repaints every glyph
//! even when the text itself is unchanged. The high-frequency counters
//! (WPM, matrix scan rate) are sampled on a fixed interval instead of
//! value-compared, bounding their redraw cost.

use quill_core::runtime::RuntimeSnapshot;

/// Minimum interval between redraws of the high-frequency counters
pub const COUNTER_SAMPLE_MS: u32 = 125;

/// Per-field redraw decisions for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DirtyFields {
    pub hue: bool,
    pub locks: bool,
    pub wpm: bool,
    pub scan_rate: bool,
    pub cpi: bool,
    pub dragscroll: bool,
    pub sniping: bool,
    pub auto_mouse: bool,
    pub keymap: bool,
    pub user: bool,
    pub rgb_effect: bool,
    pub layer: bool,
    pub default_layer: bool,
    pub autocorrect: bool,
}

impl DirtyFields {
    /// Every field dirty (first frame, or hue recolor)
    pub const fn all() -> Self {
        Self {
            hue: true,
            locks: true,
            wpm: true,
            scan_rate: true,
            cpi: true,
            dragscroll: true,
            sniping: true,
            auto_mouse: true,
            keymap: true,
            user: true,
            rgb_effect: true,
            layer: true,
            default_layer: true,
            autocorrect: true,
        }
    }

    /// Whether anything needs drawing this frame
    pub fn any(&self) -> bool {
        *self != Self::default()
    }
}

/// Compares runtime snapshots between frames
pub struct DirtyTracker {
    last: Option<RuntimeSnapshot>,
    counter_sampled_ms: u32,
}

impl Default for DirtyTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self {
            last: None,
            counter_sampled_ms: 0,
        }
    }

    /// Drop the stored snapshot so the next frame redraws everything
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Compare against the previous frame and store `current` in its place
    pub fn diff(&mut self, current: &RuntimeSnapshot, now_ms: u32) -> DirtyFields {
        let fields = match &self.last {
            None => {
                self.counter_sampled_ms = now_ms;
                DirtyFields::all()
            }
            Some(last) => {
                let mut d = DirtyFields::default();

                if now_ms.wrapping_sub(self.counter_sampled_ms) >= COUNTER_SAMPLE_MS {
                    self.counter_sampled_ms = now_ms;
                    d.wpm = true;
                    d.scan_rate = true;
                }

                d.locks = last.locks != current.locks;
                d.cpi = last.cpi != current.cpi;
                d.dragscroll = last.dragscroll != current.dragscroll;
                d.sniping = last.sniping != current.sniping;
                d.auto_mouse = last.auto_mouse != current.auto_mouse;
                d.keymap = last.keymap != current.keymap;
                d.user = last.user != current.user;
                d.rgb_effect = last.rgb_effect != current.rgb_effect
                    || last.rgb_enabled != current.rgb_enabled;
                d.layer = last.layer_name != current.layer_name;
                d.default_layer = last.default_layer_name != current.default_layer_name;
                d.autocorrect = last.autocorrected != current.autocorrected
                    || last.autocorrect_original != current.autocorrect_original;

                if last.hue != current.hue {
                    d = DirtyFields::all();
                }
                d
            }
        };

        self.last = Some(current.clone());
        fields
    }
}
