//! Structured logging setup for applications embedding the client.
//!
//! The library itself only emits `tracing` events and spans; nothing is
//! printed unless the host installs a subscriber, for example with
//! [`LoggingConfig::init`].

mod logging;

pub use logging::{LogFormat, LogLevel, LoggingConfig, LoggingInitError};
