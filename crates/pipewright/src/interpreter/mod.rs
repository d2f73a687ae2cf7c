//! Pass execution.
//!
//! The interpreter walks passes in order and turns each command into device
//! calls. It is a two-state machine:
//! - unbound: framebuffer, clear and pipeline commands only
//! - bound: a session holds the current pipeline state and its resolved routing
//!
//! Binding a pipeline state replaces the whole session.

mod draw;
mod exec;
mod session;

pub use exec::Interpreter;
pub use session::InterpreterSession;
