use std::collections::HashMap;

use crate::pipeline::InputElement;

use super::{
    ActiveUniform, Capability, ClearPlane, CompareFunc, GraphicsDevice, IndexType, ShaderStage,
    TextureParameter, TextureTarget, Topology, UniformType,
};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ShaderId(pub u32);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ProgramId(pub u32);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct BufferId(pub u32);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TextureId(pub u32);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct FramebufferId(pub u32);

/// Uniform location handed out by [`RecordingDevice`]: the uniform's index in its program.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RecordedLocation {
    pub program: ProgramId,
    pub index: u32,
}

/// Active uniforms and vertex inputs a scripted program reports after linking.
///
/// Uniform indices follow declaration order; attribute locations are assigned
/// in declaration order starting at 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramInterface {
    uniforms: Vec<ActiveUniform>,
    attributes: Vec<String>,
}

impl ProgramInterface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uniform(self, name: &str, ty: UniformType) -> Self {
        self.uniform_array(name, 1, ty)
    }

    pub fn uniform_array(mut self, name: &str, size: i32, ty: UniformType) -> Self {
        self.uniforms.push(ActiveUniform { name: name.to_string(), size, ty });
        self
    }

    pub fn attribute(mut self, name: &str) -> Self {
        self.attributes.push(name.to_string());
        self
    }
}

/// One device call, as recorded by [`RecordingDevice`].
///
/// Reflection queries are not recorded; everything that changes device state is.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CompileShader { stage: ShaderStage, shader: ShaderId },
    LinkProgram { program: ProgramId, vertex: ShaderId, fragment: ShaderId },
    DeleteShader(ShaderId),
    DeleteProgram(ProgramId),
    UseProgram(ProgramId),
    BindFramebuffer(Option<FramebufferId>),
    ClearColor([f32; 4]),
    ClearDepth(f32),
    Clear(ClearPlane),
    SetCapability { capability: Capability, enabled: bool },
    DepthFunc(CompareFunc),
    UniformVec4 { location: Option<RecordedLocation>, value: [f32; 4] },
    UniformMat4 { location: Option<RecordedLocation>, columns: [f32; 16] },
    UniformI32 { location: Option<RecordedLocation>, value: i32 },
    ActiveTexture(u32),
    BindTexture { target: TextureTarget, texture: TextureId },
    TexParameter { target: TextureTarget, parameter: TextureParameter },
    BindVertexBuffer(BufferId),
    BindIndexBuffer(BufferId),
    VertexAttribPointer { location: u32, element: InputElement },
    EnableVertexAttrib(u32),
    DrawArrays { topology: Topology, first: i32, count: i32 },
    DrawElements { topology: Topology, count: i32, index_type: IndexType, offset: i32 },
}

/// A plane clear resolved against the framebuffer bound when it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum ClearRecord {
    Color { target: Option<FramebufferId>, rgba: [f32; 4] },
    Depth { target: Option<FramebufferId>, depth: f32 },
}

/// Deterministic in-memory device.
///
/// Shader sources compile unless rejected with [`reject_source`](Self::reject_source).
/// A vertex/fragment pair links only if an interface was scripted for it with
/// [`define_program`](Self::define_program); the linked program then reports
/// exactly that interface.
#[derive(Debug, Default)]
pub struct RecordingDevice {
    interfaces: HashMap<(String, String), ProgramInterface>,
    rejected_sources: HashMap<String, String>,
    rejected_links: HashMap<(String, String), String>,

    shaders: Vec<(ShaderStage, String)>,
    programs: Vec<ProgramInterface>,

    calls: Vec<Call>,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the interface reported by the program linked from this source pair.
    pub fn define_program(&mut self, vertex: &str, fragment: &str, interface: ProgramInterface) {
        self.interfaces
            .insert((vertex.to_string(), fragment.to_string()), interface);
    }

    /// Makes every compile of `source` fail with `log`.
    pub fn reject_source(&mut self, source: &str, log: &str) {
        self.rejected_sources.insert(source.to_string(), log.to_string());
    }

    /// Makes linking this source pair fail with `log`.
    pub fn reject_link(&mut self, vertex: &str, fragment: &str, log: &str) {
        self.rejected_links
            .insert((vertex.to_string(), fragment.to_string()), log.to_string());
    }

    /// Recorded calls in issue order.
    #[inline]
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Drains the recorded calls, keeping scripted programs and live objects.
    pub fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }

    /// Replays the call log and returns every plane clear with the target it hit.
    pub fn cleared_targets(&self) -> Vec<ClearRecord> {
        let mut target = None;
        let mut rgba = [0.0; 4];
        let mut depth = 1.0;
        let mut out = Vec::new();

        for call in &self.calls {
            match call {
                Call::BindFramebuffer(fbo) => target = *fbo,
                Call::ClearColor(c) => rgba = *c,
                Call::ClearDepth(d) => depth = *d,
                Call::Clear(ClearPlane::Color) => out.push(ClearRecord::Color { target, rgba }),
                Call::Clear(ClearPlane::Depth) => out.push(ClearRecord::Depth { target, depth }),
                _ => {}
            }
        }
        out
    }

    fn interface(&self, program: ProgramId) -> Option<&ProgramInterface> {
        self.programs.get(program.0 as usize)
    }

    fn source_pair(&self, vertex: ShaderId, fragment: ShaderId) -> Option<(String, String)> {
        let (_, vs) = self.shaders.get(vertex.0 as usize)?;
        let (_, fs) = self.shaders.get(fragment.0 as usize)?;
        Some((vs.clone(), fs.clone()))
    }
}

impl GraphicsDevice for RecordingDevice {
    type Shader = ShaderId;
    type Program = ProgramId;
    type UniformLocation = RecordedLocation;
    type Buffer = BufferId;
    type Texture = TextureId;
    type Framebuffer = FramebufferId;

    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderId, String> {
        let shader = ShaderId(self.shaders.len() as u32);
        self.shaders.push((stage, source.to_string()));
        self.calls.push(Call::CompileShader { stage, shader });

        match self.rejected_sources.get(source) {
            Some(log) => Err(log.clone()),
            None => Ok(shader),
        }
    }

    fn link_program(&mut self, vertex: ShaderId, fragment: ShaderId) -> Result<ProgramId, String> {
        let program = ProgramId(self.programs.len() as u32);
        self.calls.push(Call::LinkProgram { program, vertex, fragment });

        let Some(pair) = self.source_pair(vertex, fragment) else {
            return Err(format!("unknown shader object {vertex:?} / {fragment:?}"));
        };
        if let Some(log) = self.rejected_links.get(&pair) {
            return Err(log.clone());
        }
        let Some(interface) = self.interfaces.get(&pair) else {
            return Err("no program interface defined for this shader pair".to_string());
        };

        self.programs.push(interface.clone());
        Ok(program)
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        self.calls.push(Call::DeleteShader(shader));
    }

    fn delete_program(&mut self, program: ProgramId) {
        self.calls.push(Call::DeleteProgram(program));
    }

    fn active_uniform_count(&self, program: ProgramId) -> u32 {
        self.interface(program).map_or(0, |i| i.uniforms.len() as u32)
    }

    fn active_uniform(&self, program: ProgramId, index: u32) -> Option<ActiveUniform> {
        self.interface(program)?.uniforms.get(index as usize).cloned()
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<RecordedLocation> {
        let index = self
            .interface(program)?
            .uniforms
            .iter()
            .position(|u| u.name == name)?;
        Some(RecordedLocation { program, index: index as u32 })
    }

    fn attrib_location(&self, program: ProgramId, name: &str) -> Option<u32> {
        self.interface(program)?
            .attributes
            .iter()
            .position(|a| a == name)
            .map(|i| i as u32)
    }

    fn use_program(&mut self, program: ProgramId) {
        self.calls.push(Call::UseProgram(program));
    }

    fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferId>) {
        self.calls.push(Call::BindFramebuffer(framebuffer));
    }

    fn clear_color(&mut self, rgba: [f32; 4]) {
        self.calls.push(Call::ClearColor(rgba));
    }

    fn clear_depth(&mut self, depth: f32) {
        self.calls.push(Call::ClearDepth(depth));
    }

    fn clear(&mut self, plane: ClearPlane) {
        self.calls.push(Call::Clear(plane));
    }

    fn set_capability(&mut self, capability: Capability, enabled: bool) {
        self.calls.push(Call::SetCapability { capability, enabled });
    }

    fn depth_func(&mut self, func: CompareFunc) {
        self.calls.push(Call::DepthFunc(func));
    }

    fn uniform_vec4(&mut self, location: Option<&RecordedLocation>, value: &[f32; 4]) {
        self.calls.push(Call::UniformVec4 { location: location.copied(), value: *value });
    }

    fn uniform_mat4(&mut self, location: Option<&RecordedLocation>, columns: &[f32; 16]) {
        self.calls.push(Call::UniformMat4 { location: location.copied(), columns: *columns });
    }

    fn uniform_i32(&mut self, location: Option<&RecordedLocation>, value: i32) {
        self.calls.push(Call::UniformI32 { location: location.copied(), value });
    }

    fn active_texture(&mut self, unit: u32) {
        self.calls.push(Call::ActiveTexture(unit));
    }

    fn bind_texture(&mut self, target: TextureTarget, texture: TextureId) {
        self.calls.push(Call::BindTexture { target, texture });
    }

    fn tex_parameter(&mut self, target: TextureTarget, parameter: TextureParameter) {
        self.calls.push(Call::TexParameter { target, parameter });
    }

    fn bind_vertex_buffer(&mut self, buffer: BufferId) {
        self.calls.push(Call::BindVertexBuffer(buffer));
    }

    fn bind_index_buffer(&mut self, buffer: BufferId) {
        self.calls.push(Call::BindIndexBuffer(buffer));
    }

    fn vertex_attrib_pointer(&mut self, location: u32, element: &InputElement) {
        self.calls.push(Call::VertexAttribPointer { location, element: element.clone() });
    }

    fn enable_vertex_attrib(&mut self, location: u32) {
        self.calls.push(Call::EnableVertexAttrib(location));
    }

    fn draw_arrays(&mut self, topology: Topology, first: i32, count: i32) {
        self.calls.push(Call::DrawArrays { topology, first, count });
    }

    fn draw_elements(&mut self, topology: Topology, count: i32, index_type: IndexType, offset: i32) {
        self.calls.push(Call::DrawElements { topology, count, index_type, offset });
    }
}
