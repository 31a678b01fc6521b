//! Actuator drivers: treat-auger stepper and door relays.

pub mod relay;
pub mod stepper;
