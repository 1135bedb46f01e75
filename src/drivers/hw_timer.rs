//! 1 ms periodic timer using ESP-IDF's esp_timer API.
//!
//! The callback is the only writer of the tick counter, the 100 ms control
//! flag and the two software-PWM pins.  It runs in the esp_timer task (not
//! an ISR) and touches nothing but [`TICK`] atomics and two GPIO registers.
//!
//! On host builds there is no timer; tests drive
//! [`TickShared::on_timer_tick`](crate::tick::TickShared::on_timer_tick)
//! directly.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use super::hw_init::HwInitError;

/// Timer period in microseconds.
pub const TICK_PERIOD_US: u64 = 1_000;

#[cfg(target_os = "espidf")]
static mut TICK_TIMER: esp_timer_handle_t = core::ptr::null_mut();

/// SAFETY: TICK_TIMER is written once in `start_tick_timer()` before any
/// callback fires.  Only called from the single main task.
#[cfg(target_os = "espidf")]
unsafe fn tick_timer() -> esp_timer_handle_t { unsafe { TICK_TIMER } }

#[cfg(target_os = "espidf")]
unsafe extern "C" fn tick_cb(_arg: *mut core::ffi::c_void) {
    use crate::drivers::hw_init::gpio_write;
    use crate::pins;
    use crate::tick::TICK;

    let pwm = TICK.on_timer_tick();
    gpio_write(pins::FAN_PWM_GPIO, pwm.fan);
    gpio_write(pins::HEAT_PWM_GPIO, pwm.heat);
}

/// Start the 1 kHz tick timer.
#[cfg(target_os = "espidf")]
pub fn start_tick_timer() -> Result<(), HwInitError> {
    // SAFETY: TICK_TIMER is written here once at boot from the single
    // main-task context before the callback can fire.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(tick_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: b"tick\0".as_ptr() as *const _,
            skip_unhandled_events: true,
        };
        let ret = esp_timer_create(&args, &raw mut TICK_TIMER);
        if ret != ESP_OK as i32 {
            log::error!("hw_timer: tick timer create failed (rc={})", ret);
            return Err(HwInitError::TimerFailed(ret));
        }
        let ret = esp_timer_start_periodic(tick_timer(), TICK_PERIOD_US);
        if ret != ESP_OK as i32 {
            log::error!("hw_timer: tick timer start failed (rc={})", ret);
            return Err(HwInitError::TimerFailed(ret));
        }
    }
    log::info!("hw_timer: tick@1kHz started");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn start_tick_timer() -> Result<(), HwInitError> {
    log::info!("hw_timer(sim): tick timer not started");
    Ok(())
}
