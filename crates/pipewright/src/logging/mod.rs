//! Logger setup for binaries and tools embedding pipewright.
//!
//! The library itself only emits through the `log` facade:
//! - `info` for pipeline builds and batch outcomes
//! - `debug` for binds and skipped inputs
//! - `trace` for every executed command

mod init;

pub use init::{LoggingConfig, init_logging};
