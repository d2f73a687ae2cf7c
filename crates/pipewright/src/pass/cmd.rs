use std::collections::BTreeMap;
use std::fmt;

use crate::device::{GraphicsDevice, TextureFilter, TextureTarget, TextureWrap, UniformType};
use crate::pipeline::PipelineState;

use super::Node;

/// Value written through a uniform root parameter.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformValue {
    Vec4([f32; 4]),
    /// Four columns; uploaded column-major, never transposed.
    Mat4([[f32; 4]; 4]),
}

impl UniformValue {
    /// Builds a matrix value from 16 floats already in column-major order.
    #[inline]
    pub fn mat4_column_major(m: [f32; 16]) -> Self {
        UniformValue::Mat4(bytemuck::cast(m))
    }

    /// The uniform type this value can be assigned to.
    #[inline]
    pub fn ty(&self) -> UniformType {
        match self {
            UniformValue::Vec4(_) => UniformType::FloatVec4,
            UniformValue::Mat4(_) => UniformType::FloatMat4,
        }
    }
}

/// Filter and wrap parameters applied when a texture is made active.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SamplerState {
    pub min_filter: TextureFilter,
    pub mag_filter: TextureFilter,
    pub wrap_s: TextureWrap,
    pub wrap_t: TextureWrap,
}

impl Default for SamplerState {
    fn default() -> Self {
        Self {
            min_filter: TextureFilter::Linear,
            mag_filter: TextureFilter::Linear,
            wrap_s: TextureWrap::ClampToEdge,
            wrap_t: TextureWrap::ClampToEdge,
        }
    }
}

/// A texture to bind on one texture image unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TextureBinding<T> {
    pub target: TextureTarget,
    pub texture: T,
    pub sampler: SamplerState,
}

/// Closed set of operations a pass can contain.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Opcode {
    SetFramebuffer,
    ClearColor,
    ClearDepth,
    SetPipelineState,
    SetRootUniforms,
    SetActiveTextures,
    SetRootSamplers,
    DrawNodes,
}

impl Opcode {
    /// Whether the opcode needs a bound pipeline state.
    #[inline]
    pub fn requires_pipeline(self) -> bool {
        matches!(
            self,
            Opcode::SetRootUniforms
                | Opcode::SetActiveTextures
                | Opcode::SetRootSamplers
                | Opcode::DrawNodes
        )
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Opcode::SetFramebuffer => "setFramebuffer",
            Opcode::ClearColor => "clearColor",
            Opcode::ClearDepth => "clearDepth",
            Opcode::SetPipelineState => "setPipelineState",
            Opcode::SetRootUniforms => "setRootUniforms",
            Opcode::SetActiveTextures => "setActiveTextures",
            Opcode::SetRootSamplers => "setRootSamplers",
            Opcode::DrawNodes => "drawNodes",
        };
        f.write_str(name)
    }
}

/// One step of a pass.
///
/// `'p` is the borrow of the pipeline states and nodes the pass refers to;
/// they must outlive every pass that uses them.
pub enum Command<'p, D: GraphicsDevice> {
    /// `None` selects the default render target.
    SetFramebuffer(Option<D::Framebuffer>),
    ClearColor([f32; 4]),
    ClearDepth(f32),
    SetPipelineState(&'p PipelineState<D>),
    /// Root-parameter slot → value.
    SetRootUniforms(BTreeMap<u32, UniformValue>),
    /// Texture image unit → texture.
    SetActiveTextures(BTreeMap<u32, TextureBinding<D::Texture>>),
    /// Root-parameter slot → texture image unit.
    SetRootSamplers(BTreeMap<u32, i32>),
    DrawNodes(&'p [Node<D::Buffer>]),
}

impl<D: GraphicsDevice> Command<'_, D> {
    pub fn opcode(&self) -> Opcode {
        match self {
            Command::SetFramebuffer(_) => Opcode::SetFramebuffer,
            Command::ClearColor(_) => Opcode::ClearColor,
            Command::ClearDepth(_) => Opcode::ClearDepth,
            Command::SetPipelineState(_) => Opcode::SetPipelineState,
            Command::SetRootUniforms(_) => Opcode::SetRootUniforms,
            Command::SetActiveTextures(_) => Opcode::SetActiveTextures,
            Command::SetRootSamplers(_) => Opcode::SetRootSamplers,
            Command::DrawNodes(_) => Opcode::DrawNodes,
        }
    }
}

impl<D: GraphicsDevice> fmt::Debug for Command<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::SetFramebuffer(fbo) => f.debug_tuple("SetFramebuffer").field(fbo).finish(),
            Command::ClearColor(rgba) => f.debug_tuple("ClearColor").field(rgba).finish(),
            Command::ClearDepth(depth) => f.debug_tuple("ClearDepth").field(depth).finish(),
            Command::SetPipelineState(state) => {
                f.debug_tuple("SetPipelineState").field(&state.name()).finish()
            }
            Command::SetRootUniforms(map) => f.debug_tuple("SetRootUniforms").field(map).finish(),
            Command::SetActiveTextures(map) => f.debug_tuple("SetActiveTextures").field(map).finish(),
            Command::SetRootSamplers(map) => f.debug_tuple("SetRootSamplers").field(map).finish(),
            Command::DrawNodes(nodes) => f.debug_tuple("DrawNodes").field(&nodes.len()).finish(),
        }
    }
}
