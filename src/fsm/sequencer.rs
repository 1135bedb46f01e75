//! Three-step button sequencer on the same FSM engine.
//!
//! ```text
//!   ONE ──[left]──▶ TWO ──[hold elapsed]──▶ THREE ──[left]──▶ ONE
//! ```
//!
//! Used by the `sequencer` firmware binary to exercise the LCD, the
//! buttons and the two sequence LEDs without the thermostat logic.

use super::{Fsm, StateContext, StateDescriptor, StateKind};
use crate::app::ports::OutputLine;
use log::info;

/// Cycles spent in `Two` before moving on (100 × 100 ms = 10 s).
pub const DEFAULT_HOLD_CYCLES: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SequencerState {
    One = 0,
    Two = 1,
    Three = 2,
}

impl StateKind for SequencerState {
    const COUNT: usize = 3;

    fn index(self) -> usize {
        self as usize
    }

    fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::One,
            1 => Self::Two,
            2 => Self::Three,
            _ => {
                debug_assert!(false, "invalid sequencer index: {idx}");
                Self::One
            }
        }
    }
}

/// LCD text per sequencer state.
pub const SEQUENCER_SCREENS: [[&str; 2]; SequencerState::COUNT] = [
    ["     STATE 1    ", "  PRESS BUTTON  "],
    ["     STATE 2    ", "     WAIT 10s   "],
    ["     STATE 3    ", "  PRESS BUTTON  "],
];

pub fn screen_for(state: SequencerState) -> &'static [&'static str; 2] {
    &SEQUENCER_SCREENS[state.index()]
}

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

pub struct SequencerContext {
    pub ticks_in_state: u64,
    pub total_ticks: u64,
    /// Left-button press edge for this cycle.
    pub advance: bool,
    pub led_a: bool,
    pub led_b: bool,
    pub hold_cycles: u64,
    pub redraw_requested: bool,
}

impl SequencerContext {
    pub fn new(hold_cycles: u64) -> Self {
        Self {
            ticks_in_state: 0,
            total_ticks: 0,
            advance: false,
            led_a: false,
            led_b: false,
            hold_cycles,
            redraw_requested: false,
        }
    }

    pub fn take_redraw(&mut self) -> bool {
        core::mem::take(&mut self.redraw_requested)
    }

    pub fn lines(&self) -> [(OutputLine, bool); 2] {
        [
            (OutputLine::SequenceLedA, self.led_a),
            (OutputLine::SequenceLedB, self.led_b),
        ]
    }
}

impl StateContext for SequencerContext {
    fn set_timing(&mut self, ticks_in_state: u64, total_ticks: u64) {
        self.ticks_in_state = ticks_in_state;
        self.total_ticks = total_ticks;
    }
}

pub type SequencerFsm = Fsm<SequencerState, SequencerContext, { SequencerState::COUNT }>;

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

pub fn build_sequencer_table()
-> [StateDescriptor<SequencerState, SequencerContext>; SequencerState::COUNT] {
    [
        StateDescriptor {
            id: SequencerState::One,
            name: "One",
            on_enter: Some(one_enter),
            on_exit: None,
            on_update: one_update,
        },
        StateDescriptor {
            id: SequencerState::Two,
            name: "Two",
            on_enter: Some(two_enter),
            on_exit: None,
            on_update: two_update,
        },
        StateDescriptor {
            id: SequencerState::Three,
            name: "Three",
            on_enter: Some(three_enter),
            on_exit: None,
            on_update: three_update,
        },
    ]
}

fn one_enter(ctx: &mut SequencerContext) {
    ctx.led_a = false;
    ctx.led_b = false;
    ctx.redraw_requested = true;
}

fn one_update(ctx: &mut SequencerContext) -> Option<SequencerState> {
    ctx.advance.then_some(SequencerState::Two)
}

fn two_enter(ctx: &mut SequencerContext) {
    ctx.led_a = true;
    ctx.led_b = false;
    ctx.redraw_requested = true;
    info!("sequencer: holding for {} cycles", ctx.hold_cycles);
}

fn two_update(ctx: &mut SequencerContext) -> Option<SequencerState> {
    (ctx.ticks_in_state >= ctx.hold_cycles).then_some(SequencerState::Three)
}

fn three_enter(ctx: &mut SequencerContext) {
    ctx.led_a = true;
    ctx.led_b = true;
    ctx.redraw_requested = true;
}

fn three_update(ctx: &mut SequencerContext) -> Option<SequencerState> {
    ctx.advance.then_some(SequencerState::One)
}
