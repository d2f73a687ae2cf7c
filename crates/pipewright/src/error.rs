use thiserror::Error;

use crate::device::{ShaderStage, UniformType};
use crate::pass::Opcode;
use crate::pipeline::RootParameterKind;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure raised while building pipeline states or executing a pass.
///
/// None of these are transient: each one means malformed input or a
/// mismatch between shaders and the data driving them.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to compile {stage} shader: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("failed to link program: {log}")]
    ProgramLink { log: String },

    #[error("root parameter {slot} names `{semantic_name}`, which is not an active {kind} of the pipeline state")]
    UnresolvedRootParameter {
        slot: u32,
        semantic_name: String,
        kind: RootParameterKind,
    },

    #[error("uniform type {ty:?} cannot be assigned through a root signature")]
    UnsupportedUniformType { ty: UniformType },

    #[error(transparent)]
    InterpreterState(#[from] StateError),

    #[error("pipeline state `{name}`: {source}")]
    Pipeline {
        name: String,
        #[source]
        source: Box<Error>,
    },

    #[error("{} pipeline state(s) failed to build", .errors.len())]
    Batch { errors: Vec<Error> },
}

/// Command issued against interpreter or node state that cannot accept it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("`{opcode}` requires a bound pipeline state")]
    NotBound { opcode: Opcode },

    #[error("indexed draw without an index buffer view")]
    MissingIndexBuffer,

    #[error("root parameter slot {slot} has no {kind} routed for the bound pipeline state")]
    UnmappedRootSlot { slot: u32, kind: RootParameterKind },

    #[error("root parameter slot {slot} expects a {expected:?} value, got {found:?}")]
    UniformValueMismatch {
        slot: u32,
        expected: UniformType,
        found: UniformType,
    },

    #[error("invalid node: {reason}")]
    InvalidDrawArgs { reason: &'static str },
}
