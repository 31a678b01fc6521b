//! Digital output port ownership and drive.
//!
//! [`PinController`] replaces the process-wide implicit pin-mode table of
//! older firmware revisions: it is an explicit object, injected into the
//! service layer, that tracks which pins are claimed. Claiming a pin that
//! is already owned by a live [`OutputPort`] is an error rather than a
//! silent re-initialisation.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: configures and drives real GPIO via raw sys calls.
//! On host/test: tracks claim state and last-driven levels in-memory only.

use std::sync::{Arc, Mutex, PoisonError};

use heapless::FnvIndexSet;
use log::debug;

use crate::error::{Error, InitError, Result, WriteError};
use crate::pins;

/// Logical level of a digital output pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Level {
    #[default]
    Low,
    High,
}

#[cfg(not(target_os = "espidf"))]
const PIN_COUNT: usize = pins::MAX_GPIO as usize + 1;

#[derive(Debug)]
struct ClaimTable {
    claimed: FnvIndexSet<u8, 64>,
    #[cfg(not(target_os = "espidf"))]
    levels: [Level; PIN_COUNT],
}

/// Process-owned controller for digital output pins.
///
/// Cheap to clone; all clones share one claim table.
#[derive(Debug, Clone)]
pub struct PinController {
    table: Arc<Mutex<ClaimTable>>,
}

impl Default for PinController {
    fn default() -> Self {
        Self::new()
    }
}

impl PinController {
    pub fn new() -> Self {
        Self {
            table: Arc::new(Mutex::new(ClaimTable {
                claimed: FnvIndexSet::new(),
                #[cfg(not(target_os = "espidf"))]
                levels: [Level::Low; PIN_COUNT],
            })),
        }
    }

    /// Claim `pin`, configure it for output, and drive it Low.
    ///
    /// Errors with [`InitError::InvalidPin`] for pins outside the package,
    /// [`InitError::PinBusy`] if another live port owns the pin, and
    /// [`InitError::ControllerUnavailable`] if the platform pin facility
    /// rejects the configuration.
    pub fn claim(&self, pin: u8) -> Result<OutputPort> {
        if pin > pins::MAX_GPIO {
            return Err(InitError::InvalidPin(pin).into());
        }

        let mut table = lock(&self.table);
        if table.claimed.contains(&pin) {
            return Err(InitError::PinBusy(pin).into());
        }

        configure_output(pin)?;
        #[cfg(not(target_os = "espidf"))]
        {
            table.levels[pin as usize] = Level::Low;
        }

        // Capacity 64 > MAX_GPIO, so the insert cannot be rejected for space.
        let _ = table.claimed.insert(pin);
        debug!("gpio: claimed pin {pin}");

        Ok(OutputPort {
            pin,
            table: Arc::clone(&self.table),
            released: false,
        })
    }

    /// Whether `pin` is currently owned by a live port.
    pub fn is_claimed(&self, pin: u8) -> bool {
        lock(&self.table).claimed.contains(&pin)
    }

    /// Last level driven on `pin` (host simulation only).
    #[cfg(not(target_os = "espidf"))]
    pub fn level(&self, pin: u8) -> Level {
        lock(&self.table).levels[pin as usize]
    }
}

/// Exclusive handle to one configured digital output pin.
///
/// Lifecycle: claim → drive → release. Release is idempotent and also runs
/// on drop, driving the pin Low and freeing it for reclaim.
#[derive(Debug)]
pub struct OutputPort {
    pin: u8,
    table: Arc<Mutex<ClaimTable>>,
    released: bool,
}

impl OutputPort {
    /// The physical pin number this port owns.
    pub fn pin(&self) -> u8 {
        self.pin
    }

    /// Drive the pin to `level`.
    ///
    /// Errors with [`WriteError::Released`] if the port was released.
    pub fn set_level(&mut self, level: Level) -> Result<()> {
        if self.released {
            return Err(WriteError::Released(self.pin).into());
        }
        drive(&self.table, self.pin, level);
        Ok(())
    }

    /// Drive the pin Low and free it for reclaim. Safe to call repeatedly.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        drive(&self.table, self.pin, Level::Low);
        lock(&self.table).claimed.remove(&self.pin);
        self.released = true;
        debug!("gpio: released pin {}", self.pin);
    }
}

impl Drop for OutputPort {
    fn drop(&mut self) {
        self.release();
    }
}

impl embedded_hal::digital::ErrorType for OutputPort {
    type Error = Error;
}

impl embedded_hal::digital::OutputPin for OutputPort {
    fn set_low(&mut self) -> Result<()> {
        self.set_level(Level::Low)
    }

    fn set_high(&mut self) -> Result<()> {
        self.set_level(Level::High)
    }
}

// ── Shared helpers ────────────────────────────────────────────

fn lock(table: &Mutex<ClaimTable>) -> std::sync::MutexGuard<'_, ClaimTable> {
    table.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(target_os = "espidf")]
fn drive(_table: &Mutex<ClaimTable>, pin: u8, level: Level) {
    // SAFETY: gpio_set_level writes to a pin already configured for output
    // by configure_output(); the port holding the claim is exclusive.
    unsafe {
        esp_idf_svc::sys::gpio_set_level(pin as i32, matches!(level, Level::High) as u32);
    }
}

#[cfg(not(target_os = "espidf"))]
fn drive(table: &Mutex<ClaimTable>, pin: u8, level: Level) {
    lock(table).levels[pin as usize] = level;
}

// ── Hardware configuration ────────────────────────────────────

#[cfg(target_os = "espidf")]
fn configure_output(pin: u8) -> Result<()> {
    use esp_idf_svc::sys::*;

    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pin,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    // SAFETY: single pin bitmask, output mode; called while the claim table
    // lock is held so no other port can configure the same pin.
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(InitError::ControllerUnavailable.into());
    }
    // SAFETY: pin was just configured for output.
    unsafe { gpio_set_level(pin as i32, 0) };
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
fn configure_output(_pin: u8) -> Result<()> {
    Ok(())
}
