//! Electromagnetic relay actuator for the feeder door.
//!
//! Translates a logical on/off into the coil pin level, plus a time-boxed
//! [`pulse`](RelayActuator::pulse) used for "hold the door open N seconds"
//! actions. No internal state machine beyond the two logical levels.

use std::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::error::{Error, Result};

/// Logical state of the relay coil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelayState {
    #[default]
    Off,
    On,
}

/// One relay coil behind an output pin and a blocking delay.
pub struct RelayActuator<Pin, D> {
    coil: Pin,
    delay: D,
    state: RelayState,
}

impl<Pin, D> RelayActuator<Pin, D>
where
    Pin: OutputPin<Error = Error>,
    D: DelayNs,
{
    pub fn new(coil: Pin, delay: D) -> Self {
        Self {
            coil,
            delay,
            state: RelayState::Off,
        }
    }

    /// Energise the coil. Idempotent — a second `on()` does not re-drive
    /// the pin.
    pub fn on(&mut self) -> Result<()> {
        if self.state == RelayState::On {
            return Ok(());
        }
        self.coil.set_high()?;
        self.state = RelayState::On;
        Ok(())
    }

    /// De-energise the coil. Idempotent.
    pub fn off(&mut self) -> Result<()> {
        if self.state == RelayState::Off {
            return Ok(());
        }
        self.coil.set_low()?;
        self.state = RelayState::Off;
        Ok(())
    }

    /// Hold the coil energised for `hold`, then release it.
    ///
    /// Blocking for the whole duration; there is no cancellation hook once
    /// the hold begins. A zero hold is rejected before the pin is driven.
    pub fn pulse(&mut self, hold: Duration) -> Result<()> {
        if hold.is_zero() {
            return Err(Error::InvalidArgument("hold duration must be positive"));
        }
        self.on()?;
        self.delay.delay_ms(hold.as_millis() as u32);
        self.off()
    }

    /// Current logical state; the pin level mirrors it.
    pub fn state(&self) -> RelayState {
        self.state
    }
}
