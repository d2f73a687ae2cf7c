use std::fmt;

use crate::binding::{AttributeRouting, RootBindings, resolve_input_layout, resolve_root_signature};
use crate::device::GraphicsDevice;
use crate::error::Result;
use crate::pipeline::PipelineState;

/// State carried between commands while a pipeline state is bound.
///
/// A session is created whole by [`bind`](Self::bind) and replaced whole on the
/// next bind; routing from an earlier pipeline state never survives a rebind.
pub struct InterpreterSession<'p, D: GraphicsDevice> {
    pipeline: &'p PipelineState<D>,
    attributes: AttributeRouting<'p>,
    roots: RootBindings<'p, D::UniformLocation>,
}

impl<'p, D: GraphicsDevice> InterpreterSession<'p, D> {
    /// Resolves `pipeline`'s input layout and root signature.
    ///
    /// A pipeline state without an input layout or root signature gets empty
    /// routing for that table.
    pub fn bind(device: &D, pipeline: &'p PipelineState<D>) -> Result<Self> {
        let attributes = match pipeline.input_layout() {
            Some(layout) => resolve_input_layout(device, pipeline.program(), layout),
            None => AttributeRouting::empty(),
        };

        let roots = match pipeline.root_signature() {
            Some(signature) => resolve_root_signature(pipeline, signature)?,
            None => RootBindings::empty(),
        };

        Ok(Self { pipeline, attributes, roots })
    }

    #[inline]
    pub fn pipeline(&self) -> &'p PipelineState<D> {
        self.pipeline
    }

    #[inline]
    pub fn attributes(&self) -> &AttributeRouting<'p> {
        &self.attributes
    }

    #[inline]
    pub fn roots(&self) -> &RootBindings<'p, D::UniformLocation> {
        &self.roots
    }
}

impl<D: GraphicsDevice> fmt::Debug for InterpreterSession<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterpreterSession")
            .field("pipeline", &self.pipeline.name())
            .field("attributes", &self.attributes)
            .field("roots", &self.roots)
            .finish()
    }
}
