use std::fmt;

use crate::device::GraphicsDevice;

use super::Command;

/// Ordered command list.
///
/// Order is significant and preserved verbatim: the interpreter applies
/// commands one by one, never reordering or batching them.
pub struct Pass<'p, D: GraphicsDevice> {
    commands: Vec<Command<'p, D>>,
}

impl<'p, D: GraphicsDevice> Pass<'p, D> {
    #[inline]
    pub fn new() -> Self {
        Self { commands: Vec::new() }
    }

    /// Appends `cmd` after every command already recorded.
    #[inline]
    pub fn push(&mut self, cmd: Command<'p, D>) {
        self.commands.push(cmd);
    }

    #[inline]
    pub fn with(mut self, cmd: Command<'p, D>) -> Self {
        self.push(cmd);
        self
    }

    #[inline]
    pub fn commands(&self) -> &[Command<'p, D>] {
        &self.commands
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<D: GraphicsDevice> Default for Pass<'_, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'p, D: GraphicsDevice> From<Vec<Command<'p, D>>> for Pass<'p, D> {
    fn from(commands: Vec<Command<'p, D>>) -> Self {
        Self { commands }
    }
}

impl<D: GraphicsDevice> fmt::Debug for Pass<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.commands).finish()
    }
}
