//! Logging utilities.
//!
//! This module centralizes logger initialization. Library code only uses the
//! `log` facade; `env_logger` is installed here for binaries.

mod init;

pub use init::{DEFAULT_FILTER, LoggingConfig, init_logging};
