//! Shared utilities for Splitz binaries.

pub mod logging;

pub use logging::{init_logging, LogFormat, ParseLogFormatError};
