//! Inbound commands to the feeder service.
//!
//! These name the actions the outside world (HTTP dispatch, serial, a
//! future schedule) can request. They carry no payload — every command
//! maps 1:1 to a canned parameter set in
//! [`FeederConfig`](crate::config::FeederConfig).

use serde::{Deserialize, Serialize};

/// Actions external dispatchers can send into the actuator core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeederCommand {
    /// Spin the treat auger one dispense worth of steps.
    DispenseTreat,
    /// Energise the door-open relay for the configured hold time.
    OpenDoor,
    /// Energise the door-close relay for the configured hold time.
    CloseDoor,
}
