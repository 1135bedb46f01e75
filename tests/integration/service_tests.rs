//! Integration tests for the ClimaService → FSM → outputs pipeline.
//!
//! These run on the host and drive complete control cycles through mock
//! ports, checking pins, PWM duty, LCD text, debug lines and events.

use clima::app::events::AppEvent;
use clima::app::ports::OutputLine;
use clima::app::service::ClimaService;
use clima::config::ClimaConfig;
use clima::fsm::ThermalState;
use clima::pins;
use clima::tick::TickShared;

use super::mock_hw::{MockBoard, MockLcd, RecordingSink};

struct Rig<'a> {
    svc: ClimaService<'a>,
    hw: MockBoard,
    lcd: MockLcd,
    sink: RecordingSink,
}

impl<'a> Rig<'a> {
    /// Started service, inside == set-point == 22 °C, buttons released.
    fn new(shared: &'a TickShared) -> Self {
        Self::with_config(shared, ClimaConfig::default())
    }

    fn with_config(shared: &'a TickShared, config: ClimaConfig) -> Self {
        let mut hw = MockBoard::new();
        hw.set_inside(22);
        hw.set_set_point(22);
        hw.set_outside_code(156); // 20 °C
        let mut rig = Self {
            svc: ClimaService::new(config, shared),
            hw,
            lcd: MockLcd::new(),
            sink: RecordingSink::new(),
        };
        rig.svc.start(&mut rig.hw, &mut rig.lcd, &mut rig.sink);
        rig
    }

    fn cycle(&mut self) {
        self.svc.run_cycle(&mut self.hw, &mut self.lcd, &mut self.sink);
    }

    fn cycles(&mut self, n: usize) {
        for _ in 0..n {
            self.cycle();
        }
    }

    /// One cycle with the left button held low, then release it.
    fn press_left(&mut self) {
        self.hw.left_high = false;
        self.cycle();
        self.hw.left_high = true;
    }

    /// Settle one cycle (first temperature sample) and switch on.
    fn power_on(&mut self) {
        self.cycle();
        self.press_left();
    }
}

// ── Power-up ─────────────────────────────────────────────────

#[test]
fn starts_off_with_standby_screen() {
    let shared = TickShared::new();
    let rig = Rig::new(&shared);

    assert_eq!(rig.svc.state(), ThermalState::Off);
    assert_eq!(rig.hw.level(OutputLine::Standby), Some(true));
    assert_eq!(rig.hw.level(OutputLine::Backlight), Some(false));
    assert_eq!(rig.hw.level(OutputLine::CoolElement), Some(false));
    assert_eq!(rig.hw.level(OutputLine::HeatElement), Some(false));
    assert_eq!(rig.lcd.line(0), "  Clima is OFF  ");
    assert_eq!(rig.lcd.line(1), "----------------");
    assert_eq!(rig.hw.debug, vec!["-> T to OFF\n\r"]);
    assert_eq!(rig.sink.events, vec![AppEvent::Started(ThermalState::Off)]);
    assert_eq!(shared.duty_levels(), (0, 0));
}

#[test]
fn button_held_through_power_up_does_not_switch_on() {
    let shared = TickShared::new();
    let mut rig = Rig::new(&shared);
    rig.hw.left_high = false;
    rig.cycles(5);
    assert_eq!(rig.svc.state(), ThermalState::Off);
}

// ── On / off ─────────────────────────────────────────────────

#[test]
fn left_press_switches_on_to_ventilating() {
    let shared = TickShared::new();
    let mut rig = Rig::new(&shared);
    rig.power_on();

    assert_eq!(rig.svc.state(), ThermalState::Ventilating);
    assert_eq!(rig.hw.level(OutputLine::Standby), Some(false));
    assert_eq!(rig.hw.level(OutputLine::Backlight), Some(true));
    assert!(rig.hw.debug.iter().any(|l| l == "-> T to VENT\n\r"));
    assert_eq!(shared.duty_levels(), (7, 0));
    assert_eq!(rig.lcd.line(0), "Te:+20C Ti:+22C ");
    assert_eq!(rig.lcd.line(1), "Vent ||||. <22C>");
    assert_eq!(
        rig.sink.count(|e| matches!(
            e,
            AppEvent::StateChanged { from: ThermalState::Off, to: ThermalState::Ventilating }
        )),
        1
    );
}

#[test]
fn left_press_switches_off_from_any_running_state() {
    let shared = TickShared::new();
    let mut rig = Rig::new(&shared);
    rig.hw.set_inside(26);
    rig.power_on();
    rig.cycle();
    assert_eq!(rig.svc.state(), ThermalState::Cooling);

    rig.press_left();
    assert_eq!(rig.svc.state(), ThermalState::Off);
    assert_eq!(rig.hw.level(OutputLine::CoolElement), Some(false));
    assert_eq!(rig.hw.level(OutputLine::Standby), Some(true));
    assert_eq!(shared.duty_levels(), (0, 0));
    assert_eq!(rig.lcd.line(0), "  Clima is OFF  ");
    assert_eq!(rig.hw.debug.last().map(String::as_str), Some("-> T to OFF\n\r"));
}

// ── Temperature-driven transitions ───────────────────────────

#[test]
fn too_warm_cools_until_set_point_reached() {
    let shared = TickShared::new();
    let mut rig = Rig::new(&shared);
    rig.hw.set_inside(25);
    rig.power_on();
    rig.cycle();

    assert_eq!(rig.svc.state(), ThermalState::Cooling);
    assert_eq!(rig.hw.level(OutputLine::CoolElement), Some(true));
    assert_eq!(rig.hw.level(OutputLine::HeatElement), Some(false));
    assert!(rig.lcd.line(1).starts_with("Cool "));

    // The room cools, but the new reading only lands on the next
    // temperature sample (cycle 31).
    rig.hw.set_inside(22);
    rig.cycles(27);
    assert_eq!(rig.svc.state(), ThermalState::Cooling);
    rig.cycles(1);
    assert_eq!(rig.svc.cycle_count(), 31);
    assert_eq!(rig.svc.state(), ThermalState::Ventilating);
    assert_eq!(rig.hw.level(OutputLine::CoolElement), Some(false));
}

#[test]
fn too_cold_heats_at_configured_level() {
    let shared = TickShared::new();
    let mut rig = Rig::new(&shared);
    rig.hw.set_inside(15);
    rig.hw.set_set_point(25);
    rig.power_on();
    rig.cycle();

    assert_eq!(rig.svc.state(), ThermalState::Heating);
    assert_eq!(rig.hw.level(OutputLine::HeatElement), Some(true));
    assert_eq!(shared.duty_levels(), (7, 8));
    assert!(rig.hw.debug.iter().any(|l| l == "-> T to HEAT\n\r"));
    assert_eq!(rig.lcd.line(1), "Heat ||||. <25C>");
}

#[test]
fn lower_heat_level_from_config() {
    let shared = TickShared::new();
    let config = ClimaConfig {
        heat_level: 1,
        vent_fan_speed: 3,
        ..ClimaConfig::default()
    };
    let mut rig = Rig::with_config(&shared, config);
    rig.hw.set_inside(10);
    rig.power_on();
    rig.cycle();
    assert_eq!(rig.svc.state(), ThermalState::Heating);
    assert_eq!(shared.duty_levels(), (6, 4));
    assert!(rig.lcd.line(1).starts_with("Heat |||.."));
}

#[test]
fn turning_the_pot_retargets_without_waiting_for_sample() {
    let shared = TickShared::new();
    let mut rig = Rig::new(&shared);
    rig.power_on();
    assert_eq!(rig.svc.state(), ThermalState::Ventilating);

    rig.hw.set_set_point(20);
    rig.cycle();
    assert_eq!(rig.svc.sample().set_point, 20);
    assert_eq!(rig.svc.state(), ThermalState::Cooling);
}

// ── Sampling cadence ─────────────────────────────────────────

#[test]
fn temperatures_sampled_every_thirty_cycles() {
    let shared = TickShared::new();
    let mut rig = Rig::new(&shared);
    rig.cycles(61);

    assert_eq!(rig.hw.reads_of(pins::ADC_CH_SET_POINT), 61);
    assert_eq!(rig.hw.reads_of(pins::ADC_CH_INSIDE_TEMP), 3);
    assert_eq!(rig.hw.reads_of(pins::ADC_CH_OUTSIDE_TEMP), 3);
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::TemperaturesSampled(_))),
        3
    );
    let in_lines = rig
        .hw
        .debug
        .iter()
        .filter(|l| *l == "-> Temperature in:22 \n\r")
        .count();
    assert_eq!(in_lines, 3);
    assert!(rig.hw.debug.contains(&"-> Temperature out:20 \n\r".to_owned()));
}

#[test]
fn negative_outside_temperature_on_lcd() {
    let shared = TickShared::new();
    let mut rig = Rig::new(&shared);
    rig.hw.set_outside_code(42); // -10 °C
    rig.power_on();
    assert_eq!(rig.svc.sample().outside_temp, -10);
    assert_eq!(rig.lcd.line(0), "Te:-10C Ti:+22C ");
    assert!(rig.hw.debug.iter().any(|l| l == "-> Temperature out:-10 \n\r"));
}

// ── Output commit ────────────────────────────────────────────

#[test]
fn steady_state_writes_no_pins() {
    let shared = TickShared::new();
    let mut rig = Rig::new(&shared);
    rig.power_on();
    let writes = rig.hw.writes.len();
    rig.cycles(10);
    assert_eq!(rig.hw.writes.len(), writes);
}

// ── Reserved button / failures ───────────────────────────────

#[test]
fn right_button_is_reported_but_ignored() {
    let shared = TickShared::new();
    let mut rig = Rig::new(&shared);
    rig.cycle();
    rig.hw.right_high = false;
    rig.cycle();
    assert_eq!(rig.svc.state(), ThermalState::Off);
    assert_eq!(
        rig.sink.count(|e| *e == AppEvent::RightButtonPressed),
        1
    );
}

#[test]
fn lcd_failure_does_not_stop_control() {
    let shared = TickShared::new();
    let mut rig = Rig::new(&shared);
    rig.lcd.fail = true;
    rig.hw.set_inside(28);
    rig.power_on();
    rig.cycle();
    assert_eq!(rig.svc.state(), ThermalState::Cooling);
    assert_eq!(rig.hw.level(OutputLine::CoolElement), Some(true));
}

#[test]
fn transitions_are_announced_in_order() {
    let shared = TickShared::new();
    let mut rig = Rig::new(&shared);
    rig.hw.set_inside(30);
    rig.power_on();
    rig.cycle();
    rig.press_left();

    let transitions: Vec<&str> = rig
        .hw
        .debug
        .iter()
        .filter(|l| l.starts_with("-> T to "))
        .map(String::as_str)
        .collect();
    assert_eq!(
        transitions,
        vec![
            "-> T to OFF\n\r",
            "-> T to VENT\n\r",
            "-> T to COOL\n\r",
            "-> T to OFF\n\r",
        ]
    );
}
