//! Bind-time resolution of a pipeline state's declarative tables.
//!
//! Both tables are rebuilt from scratch on every pipeline bind:
//! - root signature slots → reflected uniform / sampler descriptors
//! - input-layout semantics → attribute locations grouped by input slot

mod input_layout;
mod root_signature;

pub use input_layout::{AttributeRouting, resolve_input_layout};
pub use root_signature::{RootBindings, resolve_root_signature};
