use std::fmt;

use crate::device::GraphicsDevice;

use super::{DepthStencilState, DescriptorSet, InputLayout, RootSignature};

/// A linked program plus its reflected uniform and sampler sets.
///
/// Immutable once built. Slot routing is not stored here: it is resolved each
/// time the state is bound and lives in the interpreter session.
///
/// Invariant: no name appears in both `uniforms` and `samplers`.
pub struct PipelineState<D: GraphicsDevice> {
    pub(crate) name: String,
    pub(crate) program: D::Program,
    pub(crate) uniforms: DescriptorSet<D::UniformLocation>,
    pub(crate) samplers: DescriptorSet<D::UniformLocation>,
    pub(crate) input_layout: Option<InputLayout>,
    pub(crate) root_signature: Option<RootSignature>,
    pub(crate) depth_stencil_state: Option<DepthStencilState>,
}

impl<D: GraphicsDevice> PipelineState<D> {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn program(&self) -> D::Program {
        self.program
    }

    /// Non-sampler active uniforms, in reflection order.
    #[inline]
    pub fn uniforms(&self) -> &DescriptorSet<D::UniformLocation> {
        &self.uniforms
    }

    /// 2D and cube sampler uniforms, in reflection order.
    #[inline]
    pub fn samplers(&self) -> &DescriptorSet<D::UniformLocation> {
        &self.samplers
    }

    #[inline]
    pub fn input_layout(&self) -> Option<&InputLayout> {
        self.input_layout.as_ref()
    }

    #[inline]
    pub fn root_signature(&self) -> Option<&RootSignature> {
        self.root_signature.as_ref()
    }

    #[inline]
    pub fn depth_stencil_state(&self) -> Option<&DepthStencilState> {
        self.depth_stencil_state.as_ref()
    }

    /// Deletes the program on `device`.
    pub fn destroy(self, device: &mut D) {
        log::debug!("deleting program of pipeline state `{}`", self.name);
        device.delete_program(self.program);
    }
}

impl<D: GraphicsDevice> fmt::Debug for PipelineState<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineState")
            .field("name", &self.name)
            .field("program", &self.program)
            .field("uniforms", &self.uniforms)
            .field("samplers", &self.samplers)
            .field("input_layout", &self.input_layout)
            .field("root_signature", &self.root_signature)
            .field("depth_stencil_state", &self.depth_stencil_state)
            .finish()
    }
}
