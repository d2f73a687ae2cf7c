use std::collections::BTreeMap;

use crate::device::{Capability, ClearPlane, GraphicsDevice, TextureParameter, UniformType};
use crate::error::{Error, Result, StateError};
use crate::pass::{Command, Node, Opcode, Pass, TextureBinding, UniformValue};
use crate::pipeline::{DepthStencilState, PipelineState, RootParameterKind};

use super::InterpreterSession;
use super::draw::draw_node;

/// Executes passes against one device, in order.
///
/// States:
/// - unbound (initial): only framebuffer, clear and pipeline commands are accepted
/// - bound: a [`InterpreterSession`] holds the current pipeline and its routing
///
/// Each command is applied as one step; nothing is reordered, batched or cached.
/// A failing command leaves the commands before it applied.
pub struct Interpreter<'p, D: GraphicsDevice> {
    device: D,
    session: Option<InterpreterSession<'p, D>>,
}

impl<'p, D: GraphicsDevice> Interpreter<'p, D> {
    pub fn new(device: D) -> Self {
        Self { device, session: None }
    }

    #[inline]
    pub fn device(&self) -> &D {
        &self.device
    }

    #[inline]
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn into_device(self) -> D {
        self.device
    }

    #[inline]
    pub fn is_bound(&self) -> bool {
        self.session.is_some()
    }

    #[inline]
    pub fn session(&self) -> Option<&InterpreterSession<'p, D>> {
        self.session.as_ref()
    }

    /// Runs `passes` in order. Session state carries over from one pass to the next.
    pub fn run_passes(&mut self, passes: &[Pass<'p, D>]) -> Result<()> {
        for pass in passes {
            self.run(pass)?;
        }
        Ok(())
    }

    /// Runs every command of `pass` in list order, stopping at the first error.
    pub fn run(&mut self, pass: &Pass<'p, D>) -> Result<()> {
        for cmd in pass.commands() {
            self.execute(cmd)?;
        }
        Ok(())
    }

    pub fn execute(&mut self, cmd: &Command<'p, D>) -> Result<()> {
        log::trace!("execute {}", cmd.opcode());

        match cmd {
            Command::SetFramebuffer(framebuffer) => {
                self.device.bind_framebuffer(*framebuffer);
            }
            Command::ClearColor(rgba) => {
                self.device.clear_color(*rgba);
                self.device.clear(ClearPlane::Color);
            }
            Command::ClearDepth(depth) => {
                self.device.clear_depth(*depth);
                self.device.clear(ClearPlane::Depth);
            }
            Command::SetPipelineState(pipeline) => {
                self.set_pipeline_state(*pipeline)?;
            }
            Command::SetRootUniforms(values) => {
                let session = bound(&self.session, Opcode::SetRootUniforms)?;
                set_root_uniforms(&mut self.device, session, values)?;
            }
            Command::SetActiveTextures(textures) => {
                bound(&self.session, Opcode::SetActiveTextures)?;
                set_active_textures(&mut self.device, textures);
            }
            Command::SetRootSamplers(units) => {
                let session = bound(&self.session, Opcode::SetRootSamplers)?;
                set_root_samplers(&mut self.device, session, units)?;
            }
            Command::DrawNodes(nodes) => {
                let session = bound(&self.session, Opcode::DrawNodes)?;
                draw_nodes(&mut self.device, session, nodes)?;
            }
        }

        Ok(())
    }

    /// Binds `pipeline` and replaces the session with freshly resolved routing.
    ///
    /// Resolution happens before any device call; if it fails the previous
    /// session and device state are left as they were.
    fn set_pipeline_state(&mut self, pipeline: &'p PipelineState<D>) -> Result<()> {
        let session = InterpreterSession::bind(&self.device, pipeline)?;

        self.device.use_program(pipeline.program());
        apply_depth_stencil(&mut self.device, pipeline.depth_stencil_state());

        log::debug!("bound pipeline state `{}`", pipeline.name());
        self.session = Some(session);
        Ok(())
    }
}

fn bound<'s, 'p, D: GraphicsDevice>(
    session: &'s Option<InterpreterSession<'p, D>>,
    opcode: Opcode,
) -> Result<&'s InterpreterSession<'p, D>, StateError> {
    session.as_ref().ok_or(StateError::NotBound { opcode })
}

/// Absent state disables both depth and stencil testing.
fn apply_depth_stencil<D: GraphicsDevice>(device: &mut D, state: Option<&DepthStencilState>) {
    match state {
        Some(state) if state.depth_enable => {
            device.set_capability(Capability::DepthTest, true);
            device.depth_func(state.depth_func);
        }
        Some(_) => device.set_capability(Capability::DepthTest, false),
        None => {
            device.set_capability(Capability::DepthTest, false);
            device.set_capability(Capability::StencilTest, false);
        }
    }
}

fn set_root_uniforms<D: GraphicsDevice>(
    device: &mut D,
    session: &InterpreterSession<'_, D>,
    values: &BTreeMap<u32, UniformValue>,
) -> Result<()> {
    for (&slot, value) in values {
        let descriptor = session.roots().uniform(slot).ok_or(StateError::UnmappedRootSlot {
            slot,
            kind: RootParameterKind::Uniform,
        })?;
        let location = descriptor.location.as_ref();

        match (descriptor.ty, value) {
            (UniformType::FloatVec4, UniformValue::Vec4(v)) => device.uniform_vec4(location, v),
            (UniformType::FloatMat4, UniformValue::Mat4(columns)) => {
                let flat: [f32; 16] = bytemuck::cast(*columns);
                device.uniform_mat4(location, &flat);
            }
            (expected @ (UniformType::FloatVec4 | UniformType::FloatMat4), value) => {
                return Err(StateError::UniformValueMismatch { slot, expected, found: value.ty() }.into());
            }
            (ty, _) => return Err(Error::UnsupportedUniformType { ty }),
        }
    }
    Ok(())
}

fn set_active_textures<D: GraphicsDevice>(
    device: &mut D,
    textures: &BTreeMap<u32, TextureBinding<D::Texture>>,
) {
    for (&unit, binding) in textures {
        device.active_texture(unit);
        device.bind_texture(binding.target, binding.texture);

        let sampler = &binding.sampler;
        for parameter in [
            TextureParameter::MinFilter(sampler.min_filter),
            TextureParameter::MagFilter(sampler.mag_filter),
            TextureParameter::WrapS(sampler.wrap_s),
            TextureParameter::WrapT(sampler.wrap_t),
        ] {
            device.tex_parameter(binding.target, parameter);
        }
    }
}

fn set_root_samplers<D: GraphicsDevice>(
    device: &mut D,
    session: &InterpreterSession<'_, D>,
    units: &BTreeMap<u32, i32>,
) -> Result<()> {
    for (&slot, &unit) in units {
        let descriptor = session.roots().sampler(slot).ok_or(StateError::UnmappedRootSlot {
            slot,
            kind: RootParameterKind::Sampler,
        })?;
        device.uniform_i32(descriptor.location.as_ref(), unit);
    }
    Ok(())
}

fn draw_nodes<D: GraphicsDevice>(
    device: &mut D,
    session: &InterpreterSession<'_, D>,
    nodes: &[Node<D::Buffer>],
) -> Result<()> {
    for node in nodes {
        draw_node(device, session.attributes(), node)?;
    }
    Ok(())
}
