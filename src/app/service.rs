//! Feeder service — the synchronous command boundary.
//!
//! [`FeederService`] owns the pin controller, the canned command
//! parameters, and one serialization mutex per configured pin. The
//! dispatcher calls [`handle_command`](FeederService::handle_command) once
//! per request; the call blocks for the actuator's full physical duration
//! and errors surface synchronously to the caller.
//!
//! Actuators are constructed per command and their pins released on every
//! exit path. They cannot be held across commands: GPIO 4 is both the
//! stepper direction line and the door-open relay coil, so the three
//! commands share physical pins just like the shipped wiring.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::info;

use crate::adapters::delay::BlockingDelay;
use crate::app::commands::FeederCommand;
use crate::app::events::FeederEvent;
use crate::app::ports::EventSink;
use crate::config::FeederConfig;
use crate::drivers::relay::RelayActuator;
use crate::drivers::stepper::StepperSequencer;
use crate::error::Result;
use crate::gpio::PinController;

/// Synchronous command executor over the feeder's actuators.
#[derive(Debug)]
pub struct FeederService {
    controller: PinController,
    config: FeederConfig,
    /// One guard per distinct pin. Held for the duration of a command so
    /// overlapping commands on shared hardware serialize instead of
    /// racing; the command's own timing is unchanged.
    guards: HashMap<u8, Mutex<()>>,
    commands_handled: AtomicU64,
    lifetime_steps: AtomicU64,
}

impl FeederService {
    /// Validates `config` and builds the per-pin guard table.
    pub fn new(controller: PinController, config: FeederConfig) -> Result<Self> {
        config.validate()?;
        let guards = [
            config.treat_step_pin,
            config.treat_dir_pin,
            config.door_open_pin,
            config.door_close_pin,
        ]
        .into_iter()
        .map(|pin| (pin, Mutex::new(())))
        .collect();

        Ok(Self {
            controller,
            config,
            guards,
            commands_handled: AtomicU64::new(0),
            lifetime_steps: AtomicU64::new(0),
        })
    }

    /// Execute one command, blocking until the physical motion completes.
    pub fn handle_command(&self, cmd: FeederCommand, sink: &mut impl EventSink) -> Result<()> {
        self.commands_handled.fetch_add(1, Ordering::Relaxed);
        sink.emit(&FeederEvent::CommandStarted(cmd));

        let result = match cmd {
            FeederCommand::DispenseTreat => self.dispense_treat(sink),
            FeederCommand::OpenDoor => self.drive_door(self.config.door_open_pin, cmd, sink),
            FeederCommand::CloseDoor => self.drive_door(self.config.door_close_pin, cmd, sink),
        };

        if let Err(error) = result {
            sink.emit(&FeederEvent::CommandFailed {
                command: cmd,
                error,
            });
            return Err(error);
        }
        Ok(())
    }

    // ── Commands ──────────────────────────────────────────────

    fn dispense_treat(&self, sink: &mut impl EventSink) -> Result<()> {
        let cfg = &self.config;
        let _held = self.lock_pins(&[cfg.treat_step_pin, cfg.treat_dir_pin]);

        let step = self.controller.claim(cfg.treat_step_pin)?;
        let dir = self.controller.claim(cfg.treat_dir_pin)?;
        let mut auger = StepperSequencer::new(
            step,
            dir,
            BlockingDelay::new(),
            cfg.treat_step_interval_us,
            cfg.treat_steps_per_rev,
        );

        auger.spin(cfg.treat_steps, cfg.treat_direction)?;

        let steps = auger.step_count();
        let lifetime_steps = self.lifetime_steps.fetch_add(steps, Ordering::Relaxed) + steps;
        info!("dispensed treat: {steps} steps ({lifetime_steps} lifetime)");
        sink.emit(&FeederEvent::TreatDispensed {
            steps,
            lifetime_steps,
        });
        Ok(())
    }

    fn drive_door(&self, pin: u8, cmd: FeederCommand, sink: &mut impl EventSink) -> Result<()> {
        let held_ms = self.config.door_hold_ms;
        let _held = self.lock_pins(&[pin]);

        let coil = self.controller.claim(pin)?;
        let mut relay = RelayActuator::new(coil, BlockingDelay::new());
        relay.pulse(Duration::from_millis(held_ms))?;

        info!("door relay on pin {pin} held {held_ms} ms");
        let event = match cmd {
            FeederCommand::OpenDoor => FeederEvent::DoorOpened { held_ms },
            _ => FeederEvent::DoorClosed { held_ms },
        };
        sink.emit(&event);
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    /// Commands accepted since the service started.
    pub fn commands_handled(&self) -> u64 {
        self.commands_handled.load(Ordering::Relaxed)
    }

    /// Auger pulses issued since the service started.
    pub fn lifetime_steps(&self) -> u64 {
        self.lifetime_steps.load(Ordering::Relaxed)
    }

    /// The live parameter set.
    pub fn config(&self) -> &FeederConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    /// Lock the guards for `pins` in ascending order. Ordering keeps the
    /// treat command (pins 4 and 5) from deadlocking against the two door
    /// commands, which take one of those pins each.
    fn lock_pins(&self, pins: &[u8]) -> Vec<MutexGuard<'_, ()>> {
        let mut sorted: Vec<u8> = pins.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        sorted
            .into_iter()
            .filter_map(|pin| self.guards.get(&pin))
            .map(|guard| guard.lock().unwrap_or_else(PoisonError::into_inner))
            .collect()
    }
}
