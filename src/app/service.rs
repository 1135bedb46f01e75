//! Application service: the hexagonal core.
//!
//! [`ClimaService`] owns the FSM, its context, the input sampler and the
//! output committer.  All I/O flows through port traits injected at call
//! sites, making the whole control cycle testable with mock adapters.
//!
//! ```text
//!   InputPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │      ClimaService      │ ──▶ DebugPort
//!  OutputPort ◀── │  Sampler · FSM · LCD   │ ──▶ DisplayPort
//!                 └────────────────────────┘ ──▶ TickShared (PWM duty)
//! ```

use core::fmt::Write;

use heapless::String;
use log::{info, warn};

use crate::config::ClimaConfig;
use crate::fsm::context::{ClimaContext, ControlOutputs, SensorSample};
use crate::fsm::states::build_state_table;
use crate::fsm::{ClimaFsm, Fsm, ThermalState};
use crate::sensors::InputSampler;
use crate::tick::TickShared;

use super::events::AppEvent;
use super::outputs::OutputCommitter;
use super::ports::{DebugPort, DisplayPort, EventSink, InputPort, OutputPort};
use super::screen;

/// Longest debug line: `"-> Temperature out:-32768 \n\r"`.
type DebugLine = String<32>;

// ───────────────────────────────────────────────────────────────
// ClimaService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates one thermostat.
pub struct ClimaService<'a> {
    fsm: ClimaFsm,
    ctx: ClimaContext,
    sampler: InputSampler,
    committer: OutputCommitter,
    /// Duty levels rendered by the 1 ms timer callback.
    shared: &'a TickShared,
    cycle_count: u64,
}

impl<'a> ClimaService<'a> {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM; call [`start`](Self::start) next.
    pub fn new(config: ClimaConfig, shared: &'a TickShared) -> Self {
        let sampler = InputSampler::new(&config);
        let ctx = ClimaContext::new(config);
        let fsm = Fsm::new(build_state_table(), ThermalState::Off);

        Self {
            fsm,
            ctx,
            sampler,
            committer: OutputCommitter::new(),
            shared,
            cycle_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Enter the initial state (Off) and bring every output to match it.
    pub fn start(
        &mut self,
        hw: &mut (impl OutputPort + DebugPort),
        lcd: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) {
        self.fsm.start(&mut self.ctx);
        self.report_transition(hw, self.fsm.current_state());
        self.apply_outputs(hw, lcd);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("ClimaService started in {:?}", self.fsm.current_state());
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one control cycle: sample → FSM → PWM duty → LCD → outputs.
    ///
    /// The `hw` parameter satisfies [`InputPort`], [`OutputPort`] and
    /// [`DebugPort`] at once; this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn run_cycle(
        &mut self,
        hw: &mut (impl InputPort + OutputPort + DebugPort),
        lcd: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) {
        self.cycle_count += 1;

        // 1. Sample inputs
        let report = self.sampler.sample(hw);
        self.ctx.sensors = report.sample;
        self.ctx.buttons.latch(report.buttons);

        if report.temps_refreshed {
            if self.ctx.config.debug_uart {
                send_temperature(hw, "out", report.sample.outside_temp);
                send_temperature(hw, "in", report.sample.inside_temp);
            }
            sink.emit(&AppEvent::TemperaturesSampled(report.sample));
        }

        // 2. Reserved button: reported, no state effect
        if self.ctx.buttons.right {
            sink.emit(&AppEvent::RightButtonPressed);
        }

        // 3. FSM tick (pure state logic)
        let prev_state = self.fsm.current_state();
        self.fsm.tick(&mut self.ctx);
        let new_state = self.fsm.current_state();
        if new_state != prev_state {
            self.report_transition(hw, new_state);
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: new_state,
            });
        }

        // 4. Publish PWM duty, refresh the LCD, commit binary lines
        self.apply_outputs(hw, lcd);

        // 5. Edges are consumed
        self.ctx.buttons.clear();
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current FSM state.
    pub fn state(&self) -> ThermalState {
        self.fsm.current_state()
    }

    pub fn outputs(&self) -> ControlOutputs {
        self.ctx.outputs
    }

    pub fn sample(&self) -> SensorSample {
        self.ctx.sensors
    }

    /// Control cycles executed since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn config(&self) -> &ClimaConfig {
        &self.ctx.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply_outputs(&mut self, hw: &mut impl OutputPort, lcd: &mut impl DisplayPort) {
        let outputs = self.ctx.outputs;
        self.shared
            .set_duty_levels(outputs.fan_duty, outputs.heat_duty);

        if let Err(e) = self.refresh_display(lcd) {
            warn!("LCD update failed: {}", e);
        }

        self.committer.commit(hw, &outputs.lines());
    }

    fn refresh_display(&mut self, lcd: &mut impl DisplayPort) -> Result<(), crate::error::DisplayError> {
        let state = self.fsm.current_state();
        if self.ctx.take_redraw() {
            screen::draw_static(lcd, state)?;
        }
        if state != ThermalState::Off {
            screen::draw_dynamic(
                lcd,
                &self.ctx.sensors,
                &self.ctx.outputs,
                self.ctx.config.temp_min,
            )?;
        }
        Ok(())
    }

    fn report_transition(&self, hw: &mut impl DebugPort, to: ThermalState) {
        if !self.ctx.config.debug_uart {
            return;
        }
        let mut line = DebugLine::new();
        if write!(line, "-> T to {}\n\r", to.tag()).is_ok() {
            hw.send(&line);
        }
    }
}

fn send_temperature(hw: &mut impl DebugPort, which: &str, celsius: i16) {
    let mut line = DebugLine::new();
    if write!(line, "-> Temperature {}:{} \n\r", which, celsius).is_ok() {
        hw.send(&line);
    }
}
