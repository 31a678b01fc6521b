//! Canned command parameters for the feeder.
//!
//! The actuator drivers carry no policy: which pins a command touches, how
//! many steps a treat is, and how long a door relay holds all live here.
//! Defaults mirror the shipped wiring in [`pins`](crate::pins). Values are
//! validated before use, never silently clamped.

use serde::{Deserialize, Serialize};

use crate::drivers::stepper::Direction;
use crate::error::{Error, Result};
use crate::pins;

/// Parameter set the dispatcher fixes per command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeederConfig {
    // --- Treat auger ---
    /// Stepper STEP line.
    pub treat_step_pin: u8,
    /// Stepper DIR line.
    pub treat_dir_pin: u8,
    /// Pulses per dispense.
    pub treat_steps: i32,
    /// Hold time of each pulse phase, microseconds.
    pub treat_step_interval_us: u32,
    /// Motor resolution (informational).
    pub treat_steps_per_rev: u32,
    /// Auger rotation for a dispense.
    pub treat_direction: Direction,

    // --- Door relays ---
    /// Coil that opens the door.
    pub door_open_pin: u8,
    /// Coil that closes the door.
    pub door_close_pin: u8,
    /// Relay hold per open/close, milliseconds.
    pub door_hold_ms: u64,
}

impl Default for FeederConfig {
    fn default() -> Self {
        Self {
            treat_step_pin: pins::TREAT_STEP_GPIO,
            treat_dir_pin: pins::TREAT_DIR_GPIO,
            treat_steps: pins::TREAT_STEPS,
            treat_step_interval_us: pins::TREAT_STEP_INTERVAL_US,
            treat_steps_per_rev: pins::TREAT_STEPS_PER_REV,
            treat_direction: Direction::Clockwise,
            door_open_pin: pins::DOOR_OPEN_GPIO,
            door_close_pin: pins::DOOR_CLOSE_GPIO,
            door_hold_ms: pins::DOOR_HOLD_MS,
        }
    }
}

impl FeederConfig {
    /// Reject parameter sets the actuator core would refuse at run time.
    pub fn validate(&self) -> Result<()> {
        for pin in [
            self.treat_step_pin,
            self.treat_dir_pin,
            self.door_open_pin,
            self.door_close_pin,
        ] {
            if pin > pins::MAX_GPIO {
                return Err(Error::InvalidArgument("pin number outside package range"));
            }
        }
        if self.treat_step_pin == self.treat_dir_pin {
            return Err(Error::InvalidArgument("STEP and DIR must be distinct pins"));
        }
        if self.treat_steps < 0 {
            return Err(Error::InvalidArgument("treat_steps must be non-negative"));
        }
        if self.treat_step_interval_us == 0 {
            return Err(Error::InvalidArgument("treat_step_interval_us must be positive"));
        }
        if self.door_hold_ms == 0 {
            return Err(Error::InvalidArgument("door_hold_ms must be positive"));
        }
        Ok(())
    }
}
