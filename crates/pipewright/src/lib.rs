//! Pipewright: declarative pipeline states and ordered command passes over an
//! immediate-mode graphics device.
//!
//! The crate is split by stage:
//! - `pipeline`: compile, link and reflect pipeline states from descriptions
//! - `binding`: resolve root signatures and input layouts at bind time
//! - `pass`: the command set and drawable nodes
//! - `interpreter`: execute passes against a `GraphicsDevice`
//!
//! `device::RecordingDevice` is a deterministic in-memory device for tests and
//! tooling; real backends implement `device::GraphicsDevice`.

pub mod binding;
pub mod device;
pub mod error;
pub mod interpreter;
pub mod logging;
pub mod pass;
pub mod pipeline;

#[cfg(test)]
mod testing;

pub use error::{Error, Result, StateError};
