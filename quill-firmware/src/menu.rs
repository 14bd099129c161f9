//! Settings tree configuration
//!
//! Mirrors the layout of the physical settings menu: a root with a quick
//! layout selector plus RGB, pointing, and feature submenus. Handlers
//! adjust the runtime state through `RuntimeControls`; formatters read it
//! back for the overlay's live values.

use core::fmt::Write;

use quill_core::menu::{MenuEntry, MenuInput, ValueText};
use quill_core::runtime::{RuntimeControls, RuntimeState};

fn layout_handler(controls: &mut dyn RuntimeControls, input: MenuInput) -> bool {
    match input {
        MenuInput::Left => {
            controls.default_layout_prev();
            true
        }
        MenuInput::Right => {
            controls.default_layout_next();
            true
        }
        _ => false,
    }
}

fn layout_value(state: &dyn RuntimeState, out: &mut ValueText) {
    let _ = out.push_str(state.default_layer_name());
}

fn rgb_enabled_handler(controls: &mut dyn RuntimeControls, input: MenuInput) -> bool {
    match input {
        MenuInput::Left | MenuInput::Right => {
            controls.rgb_toggle();
            true
        }
        _ => false,
    }
}

fn rgb_enabled_value(state: &dyn RuntimeState, out: &mut ValueText) {
    let _ = out.push_str(if state.rgb_enabled() { "on" } else { "off" });
}

fn rgb_mode_handler(controls: &mut dyn RuntimeControls, input: MenuInput) -> bool {
    match input {
        MenuInput::Left => {
            controls.rgb_effect_prev();
            true
        }
        MenuInput::Right => {
            controls.rgb_effect_next();
            true
        }
        _ => false,
    }
}

fn rgb_mode_value(state: &dyn RuntimeState, out: &mut ValueText) {
    let _ = write!(out, "{}", state.rgb_effect());
}

fn rgb_hue_handler(controls: &mut dyn RuntimeControls, input: MenuInput) -> bool {
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

fn rgb_hue_value(state: &dyn RuntimeState, out: &mut ValueText) {
    let _ = write!(out, "{}", state.rgb_hue());
}

fn rgb_sat_handler(controls: &mut dyn RuntimeControls, input: MenuInput) -> bool {
    match input {
        MenuInput::Left => {
            controls.rgb_sat_down();
            true
        }
        MenuInput::Right => {
            controls.rgb_sat_up();
            true
        }
        _ => false,
    }
}

fn rgb_sat_value(state: &dyn RuntimeState, out: &mut ValueText) {
    let _ = write!(out, "{}", state.rgb_sat());
}

fn rgb_val_handler(controls: &mut dyn RuntimeControls, input: MenuInput) -> bool {
    match input {
        MenuInput::Left => {
            controls.rgb_val_down();
            true
        }
        MenuInput::Right => {
            controls.rgb_val_up();
            true
        }
        _ => false,
    }
}

fn rgb_val_value(state: &dyn RuntimeState, out: &mut ValueText) {
    let _ = write!(out, "{}", state.rgb_val());
}

fn rgb_speed_handler(controls: &mut dyn RuntimeControls, input: MenuInput) -> bool {
    match input {
        MenuInput::Left => {
            controls.rgb_speed_down();
            true
        }
        MenuInput::Right => {
            controls.rgb_speed_up();
            true
        }
        _ => false,
    }
}

fn rgb_speed_value(state: &dyn RuntimeState, out: &mut ValueText) {
    let _ = write!(out, "{}", state.rgb_speed());
}

fn cpi_handler(controls: &mut dyn RuntimeControls, input: MenuInput) -> bool {
    match input {
        MenuInput::Left => {
            controls.pointer_cpi_down();
            true
        }
        MenuInput::Right => {
            controls.pointer_cpi_up();
            true
        }
        _ => false,
    }
}

fn cpi_value(state: &dyn RuntimeState, out: &mut ValueText) {
    let _ = write!(out, "{}", state.pointer_cpi());
}

fn on_off(out: &mut ValueText, enabled: bool) {
    let _ = out.push_str(if enabled { "on" } else { "off" });
}

fn dragscroll_handler(controls: &mut dyn RuntimeControls, input: MenuInput) -> bool {
    match input {
        MenuInput::Left | MenuInput::Right => {
            controls.dragscroll_toggle();
            true
        }
        _ => false,
    }
}

fn dragscroll_value(state: &dyn RuntimeState, out: &mut ValueText) {
    on_off(out, state.dragscroll_enabled());
}

fn sniping_handler(controls: &mut dyn RuntimeControls, input: MenuInput) -> bool {
    match input {
        MenuInput::Left | MenuInput::Right => {
            controls.sniping_toggle();
            true
        }
        _ => false,
    }
}

fn sniping_value(state: &dyn RuntimeState, out: &mut ValueText) {
    on_off(out, state.sniping_enabled());
}

fn auto_mouse_handler(controls: &mut dyn RuntimeControls, input: MenuInput) -> bool {
    match input {
        MenuInput::Left | MenuInput::Right => {
            controls.auto_mouse_toggle();
            true
        }
        _ => false,
    }
}

fn auto_mouse_value(state: &dyn RuntimeState, out: &mut ValueText) {
    on_off(out, state.auto_mouse_enabled());
}

fn nkro_handler(controls: &mut dyn RuntimeControls, input: MenuInput) -> bool {
    match input {
        MenuInput::Left | MenuInput::Right => {
            controls.nkro_toggle();
            true
        }
        _ => false,
    }
}

fn nkro_value(state: &dyn RuntimeState, out: &mut ValueText) {
    on_off(out, state.keymap_flags().nkro);
}

fn autocorrect_handler(controls: &mut dyn RuntimeControls, input: MenuInput) -> bool {
    match input {
        MenuInput::Left | MenuInput::Right => {
            controls.autocorrect_toggle();
            true
        }
        _ => false,
    }
}

fn autocorrect_value(state: &dyn RuntimeState, out: &mut ValueText) {
    on_off(out, state.keymap_flags().autocorrect);
}

fn oneshot_handler(controls: &mut dyn RuntimeControls, input: MenuInput) -> bool {
    match input {
        MenuInput::Left | MenuInput::Right => {
            controls.oneshot_toggle();
            true
        }
        _ => false,
    }
}

fn oneshot_value(state: &dyn RuntimeState, out: &mut ValueText) {
    on_off(out, state.keymap_flags().oneshot);
}

fn audio_handler(controls: &mut dyn RuntimeControls, input: MenuInput) -> bool {
    match input {
        MenuInput::Left | MenuInput::Right => {
            controls.audio_toggle();
            true
        }
        _ => false,
    }
}

fn audio_value(state: &dyn RuntimeState, out: &mut ValueText) {
    on_off(out, state.user_flags().audio);
}

fn clicky_handler(controls: &mut dyn RuntimeControls, input: MenuInput) -> bool {
    match input {
        MenuInput::Left | MenuInput::Right => {
            controls.clicky_toggle();
            true
        }
        _ => false,
    }
}

fn clicky_value(state: &dyn RuntimeState, out: &mut ValueText) {
    on_off(out, state.user_flags().clicky);
}

fn swap_hands_handler(controls: &mut dyn RuntimeControls, input: MenuInput) -> bool {
    match input {
        MenuInput::Left | MenuInput::Right => {
            controls.swap_hands_toggle();
            true
        }
        _ => false,
    }
}

fn swap_hands_value(state: &dyn RuntimeState, out: &mut ValueText) {
    on_off(out, state.user_flags().swap_hands);
}

static RGB_ENTRIES: [MenuEntry; 6] = [
    MenuEntry::Value {
        label: "RGB enabled",
        on_input: rgb_enabled_handler,
        format: rgb_enabled_value,
    },
    MenuEntry::Value {
        label: "RGB mode",
        on_input: rgb_mode_handler,
        format: rgb_mode_value,
    },
    MenuEntry::Value {
        label: "RGB hue",
        on_input: rgb_hue_handler,
        format: rgb_hue_value,
    },
    MenuEntry::Value {
        label: "RGB saturation",
        on_input: rgb_sat_handler,
        format: rgb_sat_value,
    },
    MenuEntry::Value {
        label: "RGB value",
        on_input: rgb_val_handler,
        format: rgb_val_value,
    },
    MenuEntry::Value {
        label: "RGB speed",
        on_input: rgb_speed_handler,
        format: rgb_speed_value,
    },
];

static POINTER_ENTRIES: [MenuEntry; 4] = [
    MenuEntry::Value {
        label: "Pointer CPI",
        on_input: cpi_handler,
        format: cpi_value,
    },
    MenuEntry::Value {
        label: "Drag scroll",
        on_input: dragscroll_handler,
        format: dragscroll_value,
    },
    MenuEntry::Value {
        label: "Sniping",
        on_input: sniping_handler,
        format: sniping_value,
    },
    MenuEntry::Value {
        label: "Auto mouse layer",
        on_input: auto_mouse_handler,
        format: auto_mouse_value,
    },
];

static FEATURE_ENTRIES: [MenuEntry; 6] = [
    MenuEntry::Value {
        label: "NKRO",
        on_input: nkro_handler,
        format: nkro_value,
    },
    MenuEntry::Value {
        label: "Autocorrect",
        on_input: autocorrect_handler,
        format: autocorrect_value,
    },
    MenuEntry::Value {
        label: "One-shot keys",
        on_input: oneshot_handler,
        format: oneshot_value,
    },
    MenuEntry::Value {
        label: "Audio",
        on_input: audio_handler,
        format: audio_value,
    },
    MenuEntry::Value {
        label: "Audio clicky",
        on_input: clicky_handler,
        format: clicky_value,
    },
    MenuEntry::Value {
        label: "Swap hands",
        on_input: swap_hands_handler,
        format: swap_hands_value,
    },
];

static ROOT_ENTRIES: [MenuEntry; 4] = [
    MenuEntry::Value {
        label: "Default layout",
        on_input: layout_handler,
        format: layout_value,
    },
    MenuEntry::Parent {
        label: "RGB Matrix Settings",
        children: &RGB_ENTRIES,
    },
    MenuEntry::Parent {
        label: "Pointing Settings",
        children: &POINTER_ENTRIES,
    },
    MenuEntry::Parent {
        label: "Feature Toggles",
        children: &FEATURE_ENTRIES,
    },
];

/// Root of the settings tree
pub static MENU_ROOT: MenuEntry = MenuEntry::Parent {
    label: "Configuration",
    children: &ROOT_ENTRIES,
};
