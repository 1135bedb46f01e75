//! Integration tests for the three-step sequencer demo.

use clima::app::ports::OutputLine;
use clima::app::sequencer::SequencerService;
use clima::fsm::sequencer::SequencerState;

use super::mock_hw::{MockBoard, MockLcd};

fn started(hold: u64) -> (SequencerService, MockBoard, MockLcd) {
    let mut svc = SequencerService::new(hold);
    let mut hw = MockBoard::new();
    let mut lcd = MockLcd::new();
    svc.start(&mut hw, &mut lcd);
    // Let the button edge detector see the released level once.
    svc.run_cycle(&mut hw, &mut lcd);
    (svc, hw, lcd)
}

fn press(svc: &mut SequencerService, hw: &mut MockBoard, lcd: &mut MockLcd) {
    hw.left_high = false;
    svc.run_cycle(hw, lcd);
    hw.left_high = true;
}

#[test]
fn shows_first_screen_with_leds_off() {
    let (svc, hw, lcd) = started(5);
    assert_eq!(svc.state(), SequencerState::One);
    assert_eq!(lcd.line(0), "     STATE 1    ");
    assert_eq!(lcd.line(1), "  PRESS BUTTON  ");
    assert_eq!(hw.level(OutputLine::SequenceLedA), Some(false));
    assert_eq!(hw.level(OutputLine::SequenceLedB), Some(false));
}

#[test]
fn walks_through_all_three_steps() {
    let (mut svc, mut hw, mut lcd) = started(5);

    press(&mut svc, &mut hw, &mut lcd);
    assert_eq!(svc.state(), SequencerState::Two);
    assert_eq!(lcd.line(1), "     WAIT 10s   ");
    assert_eq!(hw.level(OutputLine::SequenceLedA), Some(true));

    for _ in 0..5 {
        svc.run_cycle(&mut hw, &mut lcd);
    }
    assert_eq!(svc.state(), SequencerState::Three);
    assert_eq!(lcd.line(0), "     STATE 3    ");
    assert_eq!(hw.level(OutputLine::SequenceLedB), Some(true));

    press(&mut svc, &mut hw, &mut lcd);
    assert_eq!(svc.state(), SequencerState::One);
    assert_eq!(hw.level(OutputLine::SequenceLedA), Some(false));
    assert_eq!(hw.level(OutputLine::SequenceLedB), Some(false));
}

#[test]
fn screen_redrawn_only_on_entry() {
    let (mut svc, mut hw, mut lcd) = started(50);
    let clears = lcd.clears;
    for _ in 0..10 {
        svc.run_cycle(&mut hw, &mut lcd);
    }
    assert_eq!(lcd.clears, clears);
    press(&mut svc, &mut hw, &mut lcd);
    assert_eq!(lcd.clears, clears + 1);
}
