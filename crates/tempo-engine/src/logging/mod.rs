//! Logging utilities.
//!
//! Centralizes logger initialization for hosts embedding the clock. Library
//! code only depends on the `log` facade.

mod init;

pub use init::{init_logging, LoggingConfig};
