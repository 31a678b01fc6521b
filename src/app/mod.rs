//! Application core — command dispatch over the actuator drivers.
//!
//! The outside world (the HTTP adapter, or a test) sends a
//! [`FeederCommand`](commands::FeederCommand) into
//! [`FeederService`](service::FeederService) and receives the result
//! synchronously; structured [`FeederEvent`](events::FeederEvent)s flow
//! out through the [`EventSink`](ports::EventSink) port.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
