//! Thermostat state handlers and table builder.
//!
//! Each state is defined by plain `fn` pointers, so the table needs no heap.
//!
//! ```text
//!              [left]                      [inside > set]
//!   OFF ───────────────▶ VENTILATING ─────────────────────▶ COOLING
//!    ▲  ◀─────────────── │   ▲    ▲ ◀──────[inside <= set]──── │
//!    │       [left]      │   │    │                            │
//!    │                   │   │    └─────[inside >= set]───┐    │
//!    │     [inside < set]▼   │                            │    │
//!    │                 HEATING ───────────────────────────┘    │
//!    │                   │                                     │
//!    └──────[left]───────┴─────────────────[left]──────────────┘
//! ```
//!
//! The left button is checked before the temperature comparison in every
//! state, so a manual switch-off always wins.

use super::context::ClimaContext;
use super::{StateDescriptor, StateKind, ThermalState};
use log::{debug, info};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor<ThermalState, ClimaContext>; ThermalState::COUNT] {
    [
        // Index 0: Off
        StateDescriptor {
            id: ThermalState::Off,
            name: "Off",
            on_enter: Some(off_enter),
            on_exit: None,
            on_update: off_update,
        },
        // Index 1: Ventilating
        StateDescriptor {
            id: ThermalState::Ventilating,
            name: "Ventilating",
            on_enter: Some(ventilating_enter),
            on_exit: None,
            on_update: ventilating_update,
        },
        // Index 2: Cooling
        StateDescriptor {
            id: ThermalState::Cooling,
            name: "Cooling",
            on_enter: Some(cooling_enter),
            on_exit: None,
            on_update: cooling_update,
        },
        // Index 3: Heating
        StateDescriptor {
            id: ThermalState::Heating,
            name: "Heating",
            on_enter: Some(heating_enter),
            on_exit: None,
            on_update: heating_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  OFF state
// ═══════════════════════════════════════════════════════════════════════════

fn off_enter(ctx: &mut ClimaContext) {
    ctx.outputs.cool_element = false;
    ctx.outputs.heat_element = false;
    ctx.outputs.set_fan_speed(0);
    ctx.outputs.set_heat_level(0);
    ctx.outputs.standby = true;
    ctx.outputs.backlight = false;
    ctx.request_redraw();
    info!("OFF: all elements off, standby");
}

fn off_update(ctx: &mut ClimaContext) -> Option<ThermalState> {
    if ctx.buttons.left {
        return Some(ThermalState::Ventilating);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  VENTILATING state
// ═══════════════════════════════════════════════════════════════════════════

/// Shared by every running state: indicators for "unit on".
fn running_indicators(ctx: &mut ClimaContext) {
    ctx.outputs.standby = false;
    ctx.outputs.backlight = true;
    ctx.outputs.set_fan_speed(ctx.config.vent_fan_speed);
}

fn ventilating_enter(ctx: &mut ClimaContext) {
    running_indicators(ctx);
    ctx.outputs.cool_element = false;
    ctx.outputs.heat_element = false;
    ctx.outputs.set_heat_level(0);
    ctx.request_redraw();
    info!(
        "VENTILATING: fan duty {}, set-point {}C",
        ctx.outputs.fan_duty, ctx.sensors.set_point
    );
}

fn ventilating_update(ctx: &mut ClimaContext) -> Option<ThermalState> {
    if ctx.buttons.left {
        return Some(ThermalState::Off);
    }

    let deviation = ctx.sensors.deviation();
    if deviation > 0 {
        debug!("VENTILATING: {}C above set-point", deviation);
        return Some(ThermalState::Cooling);
    }
    if deviation < 0 {
        debug!("VENTILATING: {}C below set-point", -deviation);
        return Some(ThermalState::Heating);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  COOLING state
// ═══════════════════════════════════════════════════════════════════════════

fn cooling_enter(ctx: &mut ClimaContext) {
    running_indicators(ctx);
    ctx.outputs.cool_element = true;
    ctx.outputs.heat_element = false;
    ctx.outputs.set_heat_level(0);
    ctx.request_redraw();
    info!(
        "COOLING: inside {}C, target {}C",
        ctx.sensors.inside_temp, ctx.sensors.set_point
    );
}

fn cooling_update(ctx: &mut ClimaContext) -> Option<ThermalState> {
    if ctx.buttons.left {
        return Some(ThermalState::Off);
    }
    if ctx.sensors.deviation() <= 0 {
        info!("COOLING: target reached after {} cycles", ctx.ticks_in_state);
        return Some(ThermalState::Ventilating);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  HEATING state
// ═══════════════════════════════════════════════════════════════════════════

fn heating_enter(ctx: &mut ClimaContext) {
    running_indicators(ctx);
    ctx.outputs.heat_element = true;
    ctx.outputs.cool_element = false;
    ctx.outputs.set_heat_level(ctx.config.heat_level);
    ctx.request_redraw();
    info!(
        "HEATING: inside {}C, target {}C, heat duty {}",
        ctx.sensors.inside_temp, ctx.sensors.set_point, ctx.outputs.heat_duty
    );
}

fn heating_update(ctx: &mut ClimaContext) -> Option<ThermalState> {
    if ctx.buttons.left {
        return Some(ThermalState::Off);
    }
    if ctx.sensors.deviation() >= 0 {
        info!("HEATING: target reached after {} cycles", ctx.ticks_in_state);
        return Some(ThermalState::Ventilating);
    }
    None
}
