//! Blocking-wait primitive for actuator timing.
//!
//! Pulse rates here are low (hundreds of microseconds and up), so a
//! blocking wait is acceptable; drivers take it as an injected
//! [`DelayNs`](embedded_hal::delay::DelayNs) so a timer-based pulse
//! generator can be swapped in without touching the sequencer.
//!
//! - **`target_os = "espidf"`** — busy-waits via `Ets` from esp-idf-hal.
//! - **`not(target_os = "espidf")`** — `std::thread::sleep` for host runs.

use embedded_hal::delay::DelayNs;

/// Default blocking delay for the PetFeeder actuators.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockingDelay;

impl BlockingDelay {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_os = "espidf")]
impl DelayNs for BlockingDelay {
    fn delay_ns(&mut self, ns: u32) {
        esp_idf_hal::delay::Ets.delay_ns(ns);
    }

    fn delay_us(&mut self, us: u32) {
        esp_idf_hal::delay::Ets.delay_us(us);
    }
}

#[cfg(not(target_os = "espidf"))]
impl DelayNs for BlockingDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }

    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(std::time::Duration::from_micros(u64::from(us)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
