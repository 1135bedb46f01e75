//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern ported to Rust:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  StateTable                                                │
//! │  ┌─────────────┬───────────┬──────────┬─────────────────┐  │
//! │  │ State       │ on_enter  │ on_exit  │ on_update       │  │
//! │  ├─────────────┼───────────┼──────────┼─────────────────┤  │
//! │  │ Off         │ fn(ctx)   │ -        │ fn(ctx)->Option │  │
//! │  │ Ventilating │ fn(ctx)   │ -        │ fn(ctx)->Option │  │
//! │  │ Cooling     │ fn(ctx)   │ -        │ fn(ctx)->Option │  │
//! │  │ Heating     │ fn(ctx)   │ -        │ fn(ctx)->Option │  │
//! │  └─────────────┴───────────┴──────────┴─────────────────┘  │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each cycle the engine calls `on_update` for the **current** state.
//! If it returns `Some(next)`, the engine runs `on_exit` for the current
//! state, then `on_enter` for the next, and updates the current pointer.
//! Entry actions therefore run exactly once per transition.
//!
//! The engine is generic over the state enum and the context so the
//! thermostat ([`states`]) and the sequencer demo ([`sequencer`]) share it.

pub mod context;
pub mod sequencer;
pub mod states;

use core::fmt;

use log::info;

// ---------------------------------------------------------------------------
// Traits binding a state enum and a context to the engine
// ---------------------------------------------------------------------------

/// A state enumeration usable as a table index.
pub trait StateKind: Copy + Eq + fmt::Debug {
    /// Number of states; the table must have exactly this many rows.
    const COUNT: usize;

    fn index(self) -> usize;

    fn from_index(idx: usize) -> Self;
}

/// Context types receive the engine's cycle counters before each update.
pub trait StateContext {
    fn set_timing(&mut self, ticks_in_state: u64, total_ticks: u64);
}

// ---------------------------------------------------------------------------
// Thermostat state identity
// ---------------------------------------------------------------------------

/// Operating states of the thermostat.
/// Must stay in sync with the table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ThermalState {
    Off = 0,
    Ventilating = 1,
    Cooling = 2,
    Heating = 3,
}

impl ThermalState {
    /// Upper-case tag used in the debug UART transition trace.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::Ventilating => "VENT",
            Self::Cooling => "COOL",
            Self::Heating => "HEAT",
        }
    }
}

impl StateKind for ThermalState {
    const COUNT: usize = 4;

    fn index(self) -> usize {
        self as usize
    }

    /// Panics on out-of-range in debug builds; returns `Off` in release.
    fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Off,
            1 => Self::Ventilating,
            2 => Self::Cooling,
            3 => Self::Heating,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Off
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
pub type StateActionFn<C> = fn(&mut C);

/// Signature for the per-cycle update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn<S, C> = fn(&mut C) -> Option<S>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single state.
/// Stored in a fixed-size array without `dyn`.
pub struct StateDescriptor<S, C> {
    pub id: S,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn<C>>,
    pub on_exit: Option<StateActionFn<C>>,
    pub on_update: StateUpdateFn<S, C>,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
///
/// `N` must equal `S::COUNT`, and row `i` must describe the state whose
/// index is `i`; both are checked in debug builds.
pub struct Fsm<S, C, const N: usize> {
    table: [StateDescriptor<S, C>; N],
    current: usize,
    tick_count: u64,
    state_entry_tick: u64,
}

impl<S: StateKind, C: StateContext, const N: usize> Fsm<S, C, N> {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor<S, C>; N], initial: S) -> Self {
        debug_assert_eq!(N, S::COUNT, "state table size mismatch");
        debug_assert!(
            table.iter().enumerate().all(|(i, d)| d.id.index() == i),
            "state table rows out of order"
        );
        Self {
            table,
            current: initial.index(),
            tick_count: 0,
            state_entry_tick: 0,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut C) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one control cycle.
    ///
    /// 1. Publish timing into the context.
    /// 2. Call `on_update` for the current state.
    /// 3. If it returns `Some(next)`, run `on_exit(current)` →
    ///    update pointer → `on_enter(next)`.
    pub fn tick(&mut self, ctx: &mut C) {
        self.tick_count += 1;
        ctx.set_timing(self.tick_count - self.state_entry_tick, self.tick_count);

        if let Some(next) = (self.table[self.current].on_update)(ctx) {
            self.transition(next, ctx);
        }
    }

    /// The current state's identity.
    pub fn current_state(&self) -> S {
        S::from_index(self.current)
    }

    /// How many cycles the FSM has been in the current state.
    pub fn ticks_in_current_state(&self) -> u64 {
        self.tick_count - self.state_entry_tick
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next: S, ctx: &mut C) {
        let next_idx = next.index();

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;
        self.state_entry_tick = self.tick_count;
        ctx.set_timing(0, self.tick_count);

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}

/// The thermostat machine.
pub type ClimaFsm = Fsm<ThermalState, context::ClimaContext, { ThermalState::COUNT }>;

#[cfg(test)]
mod tests {
    use super::context::ClimaContext;
    use super::*;
    use crate::config::ClimaConfig;

    fn make_ctx() -> ClimaContext {
        ClimaContext::new(ClimaConfig::default())
    }

    fn make_fsm() -> ClimaFsm {
        Fsm::new(states::build_state_table(), ThermalState::Off)
    }

    fn started() -> (ClimaFsm, ClimaContext) {
        let mut fsm = make_fsm();
        let mut ctx = make_ctx();
        fsm.start(&mut ctx);
        (fsm, ctx)
    }

    fn press_left(fsm: &mut ClimaFsm, ctx: &mut ClimaContext) {
        ctx.buttons.left = true;
        fsm.tick(ctx);
        ctx.buttons.clear();
    }

    fn set_temps(ctx: &mut ClimaContext, inside: i16, set_point: u8) {
        ctx.sensors.inside_temp = inside;
        ctx.sensors.set_point = set_point;
    }

    /// Switch on and walk the machine into a running `state`.
    fn drive_to(fsm: &mut ClimaFsm, ctx: &mut ClimaContext, state: ThermalState) {
        set_temps(ctx, 20, 20);
        press_left(fsm, ctx);
        match state {
            ThermalState::Cooling => set_temps(ctx, 26, 20),
            ThermalState::Heating => set_temps(ctx, 14, 20),
            _ => {}
        }
        if state != ThermalState::Ventilating {
            fsm.tick(ctx);
        }
        assert_eq!(fsm.current_state(), state);
    }

    #[test]
    fn starts_in_off_with_standby_lit() {
        let (fsm, ctx) = started();
        assert_eq!(fsm.current_state(), ThermalState::Off);
        assert!(ctx.outputs.standby);
        assert!(ctx.redraw_requested);
    }

    #[test]
    fn off_ignores_temperature() {
        let (mut fsm, mut ctx) = started();
        set_temps(&mut ctx, 30, 18);
        for _ in 0..10 {
            fsm.tick(&mut ctx);
        }
        assert_eq!(fsm.current_state(), ThermalState::Off);
    }

    #[test]
    fn left_button_turns_unit_on() {
        let (mut fsm, mut ctx) = started();
        set_temps(&mut ctx, 18, 18);
        press_left(&mut fsm, &mut ctx);
        assert_eq!(fsm.current_state(), ThermalState::Ventilating);
        assert!(!ctx.outputs.standby);
        assert!(ctx.outputs.backlight);
        assert_eq!(ctx.outputs.fan_duty, 7);
    }

    #[test]
    fn ventilating_too_warm_goes_cooling() {
        let (mut fsm, mut ctx) = started();
        drive_to(&mut fsm, &mut ctx, ThermalState::Ventilating);
        set_temps(&mut ctx, 20, 18);
        fsm.tick(&mut ctx);
        assert_eq!(fsm.current_state(), ThermalState::Cooling);
        assert!(ctx.outputs.cool_element);
        assert!(!ctx.outputs.heat_element);
    }

    #[test]
    fn ventilating_too_cold_goes_heating() {
        let (mut fsm, mut ctx) = started();
        drive_to(&mut fsm, &mut ctx, ThermalState::Ventilating);
        set_temps(&mut ctx, 15, 22);
        fsm.tick(&mut ctx);
        assert_eq!(fsm.current_state(), ThermalState::Heating);
        assert!(ctx.outputs.heat_element);
        assert_eq!(ctx.outputs.heat_duty, 8);
    }

    #[test]
    fn ventilating_at_set_point_stays() {
        let (mut fsm, mut ctx) = started();
        drive_to(&mut fsm, &mut ctx, ThermalState::Ventilating);
        set_temps(&mut ctx, 21, 21);
        fsm.tick(&mut ctx);
        assert_eq!(fsm.current_state(), ThermalState::Ventilating);
    }

    #[test]
    fn cooling_reaching_set_point_goes_ventilating() {
        let (mut fsm, mut ctx) = started();
        drive_to(&mut fsm, &mut ctx, ThermalState::Cooling);
        set_temps(&mut ctx, 24, 24);
        fsm.tick(&mut ctx);
        assert_eq!(fsm.current_state(), ThermalState::Ventilating);
        assert!(!ctx.outputs.cool_element);
    }

    #[test]
    fn cooling_overshoot_goes_ventilating() {
        let (mut fsm, mut ctx) = started();
        drive_to(&mut fsm, &mut ctx, ThermalState::Cooling);
        set_temps(&mut ctx, 17, 20);
        fsm.tick(&mut ctx);
        assert_eq!(fsm.current_state(), ThermalState::Ventilating);
    }

    #[test]
    fn cooling_stays_while_too_warm() {
        let (mut fsm, mut ctx) = started();
        drive_to(&mut fsm, &mut ctx, ThermalState::Cooling);
        set_temps(&mut ctx, 26, 20);
        for _ in 0..5 {
            fsm.tick(&mut ctx);
        }
        assert_eq!(fsm.current_state(), ThermalState::Cooling);
    }

    #[test]
    fn heating_reaching_set_point_goes_ventilating() {
        let (mut fsm, mut ctx) = started();
        drive_to(&mut fsm, &mut ctx, ThermalState::Heating);
        set_temps(&mut ctx, 22, 22);
        fsm.tick(&mut ctx);
        assert_eq!(fsm.current_state(), ThermalState::Ventilating);
        assert_eq!(ctx.outputs.heat_duty, 0);
        assert!(!ctx.outputs.heat_element);
    }

    #[test]
    fn heating_stays_while_too_cold() {
        let (mut fsm, mut ctx) = started();
        drive_to(&mut fsm, &mut ctx, ThermalState::Heating);
        set_temps(&mut ctx, 16, 20);
        fsm.tick(&mut ctx);
        assert_eq!(fsm.current_state(), ThermalState::Heating);
    }

    #[test]
    fn left_button_overrides_temperature_in_every_on_state() {
        for state in [
            ThermalState::Ventilating,
            ThermalState::Cooling,
            ThermalState::Heating,
        ] {
            let (mut fsm, mut ctx) = started();
            drive_to(&mut fsm, &mut ctx, state);
            // Temperature alone would move every one of these states.
            set_temps(&mut ctx, 30, 18);
            press_left(&mut fsm, &mut ctx);
            assert_eq!(
                fsm.current_state(),
                ThermalState::Off,
                "expected Off from {:?}",
                state
            );
            assert_eq!(ctx.outputs, super::context::ControlOutputs::standby());
        }
    }

    #[test]
    fn entry_actions_run_once_per_transition() {
        let (mut fsm, mut ctx) = started();
        assert!(ctx.take_redraw());
        drive_to(&mut fsm, &mut ctx, ThermalState::Ventilating);
        assert!(ctx.take_redraw());
        set_temps(&mut ctx, 20, 20);
        fsm.tick(&mut ctx);
        assert!(!ctx.take_redraw());
    }

    #[test]
    fn tick_counts_cycles_in_state() {
        let (mut fsm, mut ctx) = started();
        fsm.tick(&mut ctx);
        fsm.tick(&mut ctx);
        assert_eq!(fsm.ticks_in_current_state(), 2);
        assert_eq!(ctx.ticks_in_state, 2);
        press_left(&mut fsm, &mut ctx);
        assert_eq!(fsm.ticks_in_current_state(), 0);
        assert_eq!(ctx.total_ticks, 3);
    }

    #[test]
    fn state_index_roundtrip() {
        for i in 0..ThermalState::COUNT {
            assert_eq!(ThermalState::from_index(i).index(), i);
        }
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn invalid_index_falls_back_to_off() {
        assert_eq!(ThermalState::from_index(99), ThermalState::Off);
    }
}
