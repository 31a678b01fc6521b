//! Treat-auger stepper sequencer.
//!
//! Converts a step count plus rotation direction into a timed pulse train
//! on two output pins (STEP and DIR). No acceleration ramp, no
//! microstepping, no stall detection — each phase is a fixed blocking
//! wait, and a `spin` occupies its caller for the whole physical move
//! (`steps * 2 * step_interval`).

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Rotation direction of the auger. Encoded on the DIR pin as
/// `Clockwise = High`, `CounterClockwise = Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

/// Step sequencer over a STEP pin, a DIR pin, and a blocking delay.
///
/// The direction pin level always reflects [`direction()`](Self::direction)
/// before any step pulse is issued; the cumulative step counter is
/// monotonic and never reset.
pub struct StepperSequencer<Step, Dir, D> {
    step: Step,
    dir: Dir,
    delay: D,
    step_interval_us: u32,
    steps_per_rev: u32,
    current_direction: Direction,
    step_count: u64,
}

impl<Step, Dir, D> StepperSequencer<Step, Dir, D>
where
    Step: OutputPin<Error = Error>,
    Dir: OutputPin<Error = Error>,
    D: DelayNs,
{
    /// `step_interval_us` is the hold time of *each* phase, so one full
    /// step takes `2 * step_interval_us`. `steps_per_rev` is informational
    /// only and not enforced.
    pub fn new(step: Step, dir: Dir, delay: D, step_interval_us: u32, steps_per_rev: u32) -> Self {
        Self {
            step,
            dir,
            delay,
            step_interval_us,
            steps_per_rev,
            current_direction: Direction::Clockwise,
            step_count: 0,
        }
    }

    /// Issue `steps_to_take` pulses in `direction`, blocking until done.
    ///
    /// The DIR pin is driven exactly once, before the first pulse;
    /// `spin(0, d)` sets the direction only and returns immediately.
    /// Negative step counts are a caller contract violation and are
    /// rejected before any pin is driven.
    pub fn spin(&mut self, steps_to_take: i32, direction: Direction) -> Result<()> {
        if steps_to_take < 0 {
            return Err(Error::InvalidArgument("steps_to_take must be non-negative"));
        }

        match direction {
            Direction::Clockwise => self.dir.set_high()?,
            Direction::CounterClockwise => self.dir.set_low()?,
        }
        self.current_direction = direction;

        for _ in 0..steps_to_take {
            self.step.set_high()?;
            self.delay.delay_us(self.step_interval_us);
            self.step_count += 1;
            self.step.set_low()?;
            self.delay.delay_us(self.step_interval_us);
        }
        Ok(())
    }

    /// Total step pulses issued over this sequencer's lifetime.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Direction most recently latched onto the DIR pin.
    pub fn direction(&self) -> Direction {
        self.current_direction
    }

    /// Full-step resolution of the attached motor.
    pub fn steps_per_rev(&self) -> u32 {
        self.steps_per_rev
    }
}
