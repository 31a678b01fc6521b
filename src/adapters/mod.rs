//! Outer-ring adapters: timing primitive and event sinks.

pub mod delay;
pub mod log_sink;
