//! Mock hardware for integration tests.
//!
//! Records every pin drive and blocking wait into one shared trace so
//! tests can assert on the full, ordered actuator history without real
//! GPIO. The trace is shared between pins and the delay, which is what
//! lets tests check that each pulse phase is held for its delay.

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use petfeeder::app::events::FeederEvent;
use petfeeder::app::ports::EventSink;
use petfeeder::error::{Error, Result};
use petfeeder::gpio::Level;

// ── Shared trace ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent {
    Drive { pin: u8, level: Level },
    Wait { us: u64 },
}

#[derive(Clone, Default)]
pub struct Trace {
    events: Rc<RefCell<Vec<TraceEvent>>>,
}

#[allow(dead_code)]
impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TraceEvent> {
        self.events.borrow().clone()
    }

    pub fn push(&self, event: TraceEvent) {
        self.events.borrow_mut().push(event);
    }

    /// Drives of `pin`, in order.
    pub fn drives_of(&self, pin: u8) -> Vec<Level> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                TraceEvent::Drive { pin: p, level } if *p == pin => Some(*level),
                _ => None,
            })
            .collect()
    }

    /// Total blocking wait recorded, in microseconds.
    pub fn total_wait_us(&self) -> u64 {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                TraceEvent::Wait { us } => Some(*us),
                _ => None,
            })
            .sum()
    }
}

// ── Mock pin ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockPin {
    pin: u8,
    trace: Trace,
}

impl MockPin {
    pub fn new(pin: u8, trace: &Trace) -> Self {
        Self {
            pin,
            trace: trace.clone(),
        }
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = Error;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<()> {
        self.trace.push(TraceEvent::Drive {
            pin: self.pin,
            level: Level::Low,
        });
        Ok(())
    }

    fn set_high(&mut self) -> Result<()> {
        self.trace.push(TraceEvent::Drive {
            pin: self.pin,
            level: Level::High,
        });
        Ok(())
    }
}

// ── Mock delay ────────────────────────────────────────────────

/// Records waits into the trace instead of sleeping.
#[derive(Clone)]
pub struct MockDelay {
    trace: Trace,
}

impl MockDelay {
    pub fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
        }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.trace.push(TraceEvent::Wait {
            us: u64::from(ns) / 1_000,
        });
    }

    fn delay_us(&mut self, us: u32) {
        self.trace.push(TraceEvent::Wait { us: u64::from(us) });
    }

    fn delay_ms(&mut self, ms: u32) {
        self.trace.push(TraceEvent::Wait {
            us: u64::from(ms) * 1_000,
        });
    }
}

// ── Recording event sink ──────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<FeederEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, event: &FeederEvent) -> bool {
        self.events.contains(event)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &FeederEvent) {
        self.events.push(*event);
    }
}
