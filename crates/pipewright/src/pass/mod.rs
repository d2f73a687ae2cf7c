//! Pass (command list) types.
//!
//! Responsibilities:
//! - the closed command set and its opcodes
//! - drawable nodes and their draw variants
//! - ordered passes handed to the interpreter
//!
//! Extending the command set:
//! - add a variant to `Command` and `Opcode`
//! - handle it in `Interpreter::execute` (the match is exhaustive)

mod cmd;
mod list;
mod node;

pub use cmd::{Command, Opcode, SamplerState, TextureBinding, UniformValue};
pub use list::Pass;
pub use node::{DrawArgs, DrawCall, DrawIndexedArgs, IndexBufferView, Node, VertexBufferView};
