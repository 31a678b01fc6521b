//! GPIO pin assignments for the PetFeeder main board.
//!
//! Single source of truth — the default [`FeederConfig`](crate::config::FeederConfig)
//! references this module rather than hard-coding pin numbers. Note that
//! GPIO 4 is shared: it is the stepper direction line *and* the door-open
//! relay coil, which is why actuators are claimed per command and never
//! held across commands.

/// Stepper STEP line for the treat auger (pulse input on the driver).
pub const TREAT_STEP_GPIO: u8 = 5;
/// Stepper DIR line. HIGH = clockwise, LOW = counter-clockwise.
pub const TREAT_DIR_GPIO: u8 = 4;

/// Relay coil that opens the door (active HIGH).
pub const DOOR_OPEN_GPIO: u8 = 4;
/// Relay coil that closes the door (active HIGH).
pub const DOOR_CLOSE_GPIO: u8 = 5;

/// Highest GPIO number the pin controller will accept (ESP32-S3 package).
pub const MAX_GPIO: u8 = 48;

// ---------------------------------------------------------------------------
// Timing defaults
// ---------------------------------------------------------------------------

/// Inter-phase delay for treat-auger step pulses, in microseconds (2.5 ms).
pub const TREAT_STEP_INTERVAL_US: u32 = 2_500;
/// Step pulses per treat dispense.
pub const TREAT_STEPS: i32 = 100;
/// Full-step resolution of the auger motor (informational, not enforced).
pub const TREAT_STEPS_PER_REV: u32 = 25;
/// How long a door relay stays energised per open/close command.
pub const DOOR_HOLD_MS: u64 = 5_000;
