//! Service wrapper for the three-step sequencer demo.

use log::{info, warn};

use crate::drivers::button::EdgeDetector;
use crate::fsm::sequencer::{
    SequencerContext, SequencerFsm, SequencerState, build_sequencer_table, screen_for,
};
use crate::fsm::Fsm;

use super::outputs::OutputCommitter;
use super::ports::{Button, DisplayPort, InputPort, OutputPort};
use super::screen;

pub struct SequencerService {
    fsm: SequencerFsm,
    ctx: SequencerContext,
    left: EdgeDetector,
    committer: OutputCommitter,
}

impl SequencerService {
    pub fn new(hold_cycles: u64) -> Self {
        Self {
            fsm: Fsm::new(build_sequencer_table(), SequencerState::One),
            ctx: SequencerContext::new(hold_cycles),
            left: EdgeDetector::new(),
            committer: OutputCommitter::new(),
        }
    }

    pub fn start(&mut self, hw: &mut impl OutputPort, lcd: &mut impl DisplayPort) {
        self.fsm.start(&mut self.ctx);
        self.apply_outputs(hw, lcd);
        info!("SequencerService started in {:?}", self.fsm.current_state());
    }

    pub fn run_cycle(
        &mut self,
        hw: &mut (impl InputPort + OutputPort),
        lcd: &mut impl DisplayPort,
    ) {
        self.ctx.advance = self.left.update(hw.read_button(Button::Left));
        self.fsm.tick(&mut self.ctx);
        self.ctx.advance = false;
        self.apply_outputs(hw, lcd);
    }

    pub fn state(&self) -> SequencerState {
        self.fsm.current_state()
    }

    fn apply_outputs(&mut self, hw: &mut impl OutputPort, lcd: &mut impl DisplayPort) {
        if self.ctx.take_redraw() {
            if let Err(e) = screen::draw_lines(lcd, screen_for(self.fsm.current_state())) {
                warn!("LCD update failed: {}", e);
            }
        }
        self.committer.commit(hw, &self.ctx.lines());
    }
}
