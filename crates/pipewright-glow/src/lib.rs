//! OpenGL / WebGL backend for pipewright.
//!
//! [`GlowDevice`] wraps any [`glow::HasContext`] and forwards each device call
//! to the matching GL entry point. The embedding application creates the
//! context and makes it current before handing it over.

mod map;

use glow::HasContext;
use pipewright::device::{
    ActiveUniform, Capability, ClearPlane, CompareFunc, GraphicsDevice, IndexType, ShaderStage,
    TextureParameter, TextureTarget, Topology,
};
use pipewright::pipeline::InputElement;

/// [`GraphicsDevice`] backed by a glow context.
///
/// Every call is issued on the wrapped context; the caller must keep it
/// current on this thread for the device's lifetime.
pub struct GlowDevice<C: HasContext> {
    gl: C,
}

impl<C: HasContext> GlowDevice<C> {
    pub fn new(gl: C) -> Self {
        Self { gl }
    }

    #[inline]
    pub fn context(&self) -> &C {
        &self.gl
    }

    pub fn into_context(self) -> C {
        self.gl
    }
}

impl<C: HasContext> std::fmt::Debug for GlowDevice<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlowDevice").finish_non_exhaustive()
    }
}

// SAFETY (applies to every `unsafe` block below): glow's entry points are
// unsafe because they require a current context and valid object names. The
// context is current per the `GlowDevice` contract, and every handle passed in
// was produced by this context through the same trait.
impl<C: HasContext> GraphicsDevice for GlowDevice<C> {
    type Shader = C::Shader;
    type Program = C::Program;
    type UniformLocation = C::UniformLocation;
    type Buffer = C::Buffer;
    type Texture = C::Texture;
    type Framebuffer = C::Framebuffer;

    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<C::Shader, String> {
        unsafe {
            let shader = self.gl.create_shader(map::shader_stage(stage))?;
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);

            if self.gl.get_shader_compile_status(shader) {
                Ok(shader)
            } else {
                let log = self.gl.get_shader_info_log(shader);
                self.gl.delete_shader(shader);
                Err(log)
            }
        }
    }

    fn link_program(&mut self, vertex: C::Shader, fragment: C::Shader) -> Result<C::Program, String> {
        unsafe {
            let program = self.gl.create_program()?;
            self.gl.attach_shader(program, vertex);
            self.gl.attach_shader(program, fragment);
            self.gl.link_program(program);

            let linked = self.gl.get_program_link_status(program);
            self.gl.detach_shader(program, vertex);
            self.gl.detach_shader(program, fragment);

            if linked {
                Ok(program)
            } else {
                let log = self.gl.get_program_info_log(program);
                self.gl.delete_program(program);
                Err(log)
            }
        }
    }

    fn delete_shader(&mut self, shader: C::Shader) {
        unsafe { self.gl.delete_shader(shader) }
    }

    fn delete_program(&mut self, program: C::Program) {
        unsafe { self.gl.delete_program(program) }
    }

    fn active_uniform_count(&self, program: C::Program) -> u32 {
        unsafe { self.gl.get_active_uniforms(program) }
    }

    fn active_uniform(&self, program: C::Program, index: u32) -> Option<ActiveUniform> {
        let uniform = unsafe { self.gl.get_active_uniform(program, index) }?;
        Some(ActiveUniform {
            name: uniform.name,
            size: uniform.size,
            ty: map::uniform_type(uniform.utype),
        })
    }

    fn uniform_location(&self, program: C::Program, name: &str) -> Option<C::UniformLocation> {
        unsafe { self.gl.get_uniform_location(program, name) }
    }

    fn attrib_location(&self, program: C::Program, name: &str) -> Option<u32> {
        unsafe { self.gl.get_attrib_location(program, name) }
    }

    fn use_program(&mut self, program: C::Program) {
        unsafe { self.gl.use_program(Some(program)) }
    }

    fn bind_framebuffer(&mut self, framebuffer: Option<C::Framebuffer>) {
        unsafe { self.gl.bind_framebuffer(glow::FRAMEBUFFER, framebuffer) }
    }

    fn clear_color(&mut self, [r, g, b, a]: [f32; 4]) {
        unsafe { self.gl.clear_color(r, g, b, a) }
    }

    fn clear_depth(&mut self, depth: f32) {
        unsafe { self.gl.clear_depth_f32(depth) }
    }

    fn clear(&mut self, plane: ClearPlane) {
        unsafe { self.gl.clear(map::clear_mask(plane)) }
    }

    fn set_capability(&mut self, capability: Capability, enabled: bool) {
        let cap = map::capability(capability);
        unsafe {
            if enabled {
                self.gl.enable(cap);
            } else {
                self.gl.disable(cap);
            }
        }
    }

    fn depth_func(&mut self, func: CompareFunc) {
        unsafe { self.gl.depth_func(map::compare_func(func)) }
    }

    fn uniform_vec4(&mut self, location: Option<&C::UniformLocation>, value: &[f32; 4]) {
        unsafe { self.gl.uniform_4_f32_slice(location, value) }
    }

    fn uniform_mat4(&mut self, location: Option<&C::UniformLocation>, columns: &[f32; 16]) {
        unsafe { self.gl.uniform_matrix_4_f32_slice(location, false, columns) }
    }

    fn uniform_i32(&mut self, location: Option<&C::UniformLocation>, value: i32) {
        unsafe { self.gl.uniform_1_i32(location, value) }
    }

    fn active_texture(&mut self, unit: u32) {
        unsafe { self.gl.active_texture(glow::TEXTURE0 + unit) }
    }

    fn bind_texture(&mut self, target: TextureTarget, texture: C::Texture) {
        unsafe { self.gl.bind_texture(map::texture_target(target), Some(texture)) }
    }

    fn tex_parameter(&mut self, target: TextureTarget, parameter: TextureParameter) {
        let (pname, value) = map::texture_parameter(parameter);
        unsafe { self.gl.tex_parameter_i32(map::texture_target(target), pname, value) }
    }

    fn bind_vertex_buffer(&mut self, buffer: C::Buffer) {
        unsafe { self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer)) }
    }

    fn bind_index_buffer(&mut self, buffer: C::Buffer) {
        unsafe { self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(buffer)) }
    }

    fn vertex_attrib_pointer(&mut self, location: u32, element: &InputElement) {
        unsafe {
            self.gl.vertex_attrib_pointer_f32(
                location,
                element.component_count,
                map::component_type(element.component_type),
                element.normalized,
                element.stride,
                element.byte_offset,
            );
        }
    }

    fn enable_vertex_attrib(&mut self, location: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(location) }
    }

    fn draw_arrays(&mut self, topology: Topology, first: i32, count: i32) {
        unsafe { self.gl.draw_arrays(map::topology(topology), first, count) }
    }

    fn draw_elements(&mut self, topology: Topology, count: i32, index_type: IndexType, offset: i32) {
        log::trace!("draw_elements {count} x {index_type:?} at byte {offset}");
        unsafe {
            self.gl
                .draw_elements(map::topology(topology), count, map::index_type(index_type), offset)
        }
    }
}
