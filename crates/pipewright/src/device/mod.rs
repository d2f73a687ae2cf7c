//! Graphics device contract.
//!
//! This module is responsible for:
//! - defining the minimal immediate-mode surface the core drives (`GraphicsDevice`)
//! - the closed enums used to describe state to a backend
//! - a deterministic recording backend used for tests and dry runs
//!
//! Backends own their context. The core never creates buffers, textures or
//! framebuffers; it only binds handles the caller supplies.

mod recording;
mod types;

pub use recording::{
    BufferId, Call, ClearRecord, FramebufferId, ProgramId, ProgramInterface, RecordedLocation,
    RecordingDevice, ShaderId, TextureId,
};
pub use types::{
    ActiveUniform, Capability, ClearPlane, CompareFunc, ComponentType, IndexType, ShaderStage,
    TextureFilter, TextureParameter, TextureTarget, TextureWrap, Topology, UniformType,
};

use std::fmt::Debug;

use crate::pipeline::InputElement;

/// Immediate-mode graphics context driven by the builder and the interpreter.
///
/// Calls are applied in the order they are made; implementations are expected
/// to serialize them against a single context.
pub trait GraphicsDevice {
    type Shader: Copy + Debug;
    type Program: Copy + Debug;
    type UniformLocation: Clone + Debug;
    type Buffer: Copy + Debug;
    type Texture: Copy + Debug;
    type Framebuffer: Copy + Debug;

    // ── shaders & programs ────────────────────────────────────────────────

    /// Compiles one stage. On failure returns the backend's compiler log.
    fn compile_shader(&mut self, stage: ShaderStage, source: &str)
    -> Result<Self::Shader, String>;

    /// Links a vertex and a fragment unit. On failure returns the linker log.
    fn link_program(
        &mut self,
        vertex: Self::Shader,
        fragment: Self::Shader,
    ) -> Result<Self::Program, String>;

    fn delete_shader(&mut self, shader: Self::Shader);

    fn delete_program(&mut self, program: Self::Program);

    // ── reflection ────────────────────────────────────────────────────────

    fn active_uniform_count(&self, program: Self::Program) -> u32;

    /// Returns the active uniform at `index` (`0..active_uniform_count`).
    fn active_uniform(&self, program: Self::Program, index: u32) -> Option<ActiveUniform>;

    fn uniform_location(&self, program: Self::Program, name: &str)
    -> Option<Self::UniformLocation>;

    /// Returns `None` when the attribute is not an active input of the program.
    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;

    // ── fixed-function state ──────────────────────────────────────────────

    fn use_program(&mut self, program: Self::Program);

    /// Binds `framebuffer` as the draw target; `None` selects the default target.
    fn bind_framebuffer(&mut self, framebuffer: Option<Self::Framebuffer>);

    fn clear_color(&mut self, rgba: [f32; 4]);

    fn clear_depth(&mut self, depth: f32);

    fn clear(&mut self, plane: ClearPlane);

    fn set_capability(&mut self, capability: Capability, enabled: bool);

    fn depth_func(&mut self, func: CompareFunc);

    // ── uniforms ──────────────────────────────────────────────────────────

    fn uniform_vec4(&mut self, location: Option<&Self::UniformLocation>, value: &[f32; 4]);

    /// `columns` is column-major and is uploaded without transposition.
    fn uniform_mat4(&mut self, location: Option<&Self::UniformLocation>, columns: &[f32; 16]);

    fn uniform_i32(&mut self, location: Option<&Self::UniformLocation>, value: i32);

    // ── textures ──────────────────────────────────────────────────────────

    fn active_texture(&mut self, unit: u32);

    fn bind_texture(&mut self, target: TextureTarget, texture: Self::Texture);

    fn tex_parameter(&mut self, target: TextureTarget, parameter: TextureParameter);

    // ── vertex input & draws ──────────────────────────────────────────────

    fn bind_vertex_buffer(&mut self, buffer: Self::Buffer);

    fn bind_index_buffer(&mut self, buffer: Self::Buffer);

    fn vertex_attrib_pointer(&mut self, location: u32, element: &InputElement);

    fn enable_vertex_attrib(&mut self, location: u32);

    fn draw_arrays(&mut self, topology: Topology, first: i32, count: i32);

    fn draw_elements(&mut self, topology: Topology, count: i32, index_type: IndexType, offset: i32);
}
