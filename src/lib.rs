//! PetFeeder firmware library.
//!
//! Exposes the actuator core for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module; on the host the
//! GPIO layer simulates pin state in-memory.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod gpio;
pub mod pins;
