use crate::device::{GraphicsDevice, ShaderStage};
use crate::error::{Error, Result};

use super::{DescriptorSet, PipelineState, PipelineStateDesc, UniformDescriptor};

/// Compiles, links and reflects one pipeline state.
///
/// Shader objects are deleted once the program is linked, or as soon as a
/// later step fails. Compiler and linker logs are carried verbatim in the error.
pub fn build_pipeline_state<D: GraphicsDevice>(
    device: &mut D,
    name: &str,
    desc: &PipelineStateDesc,
) -> Result<PipelineState<D>> {
    let vertex = compile(device, ShaderStage::Vertex, &desc.vertex_source)?;
    let fragment = match compile(device, ShaderStage::Fragment, &desc.fragment_source) {
        Ok(shader) => shader,
        Err(err) => {
            device.delete_shader(vertex);
            return Err(err);
        }
    };

    let linked = device.link_program(vertex, fragment);
    device.delete_shader(vertex);
    device.delete_shader(fragment);
    let program = linked.map_err(|log| Error::ProgramLink { log })?;

    let (uniforms, samplers) = reflect(device, program);

    log::info!(
        "built pipeline state `{}` ({} uniforms, {} samplers)",
        name,
        uniforms.len(),
        samplers.len()
    );

    Ok(PipelineState {
        name: name.to_string(),
        program,
        uniforms,
        samplers,
        input_layout: desc.input_layout.clone(),
        root_signature: desc.root_signature.clone(),
        depth_stencil_state: desc.depth_stencil_state,
    })
}

fn compile<D: GraphicsDevice>(device: &mut D, stage: ShaderStage, source: &str) -> Result<D::Shader> {
    device
        .compile_shader(stage, source)
        .map_err(|log| Error::ShaderCompile { stage, log })
}

/// Walks active uniforms in ascending index order and splits them by type tag.
fn reflect<D: GraphicsDevice>(
    device: &D,
    program: D::Program,
) -> (DescriptorSet<D::UniformLocation>, DescriptorSet<D::UniformLocation>) {
    let mut uniforms = DescriptorSet::new();
    let mut samplers = DescriptorSet::new();

    for index in 0..device.active_uniform_count(program) {
        let Some(active) = device.active_uniform(program, index) else {
            log::debug!("active uniform {index} not reported by the device; skipped");
            continue;
        };

        if uniforms.contains(&active.name) || samplers.contains(&active.name) {
            log::warn!("active uniform `{}` reported twice; keeping the first", active.name);
            continue;
        }

        let location = device.uniform_location(program, &active.name);
        let descriptor = UniformDescriptor {
            name: active.name,
            size: active.size,
            ty: active.ty,
            location,
        };

        if descriptor.ty.is_sampler() {
            samplers.insert(descriptor);
        } else {
            uniforms.insert(descriptor);
        }
    }

    (uniforms, samplers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{Call, CompareFunc, ProgramInterface, RecordingDevice, UniformType};
    use crate::pipeline::{DepthStencilState, RootSignature};

    const VS: &str = "attribute vec3 aPosition; uniform mat4 uMvp; void main() {}";
    const FS: &str = "uniform sampler2D uDiffuse; uniform vec4 uTint; void main() {}";

    fn device_with(interface: ProgramInterface) -> RecordingDevice {
        let mut dev = RecordingDevice::new();
        dev.define_program(VS, FS, interface);
        dev
    }

    // ── reflection ────────────────────────────────────────────────────────

    #[test]
    fn partitions_samplers_from_uniforms() {
        let mut dev = device_with(
            ProgramInterface::new()
                .uniform("uMvp", UniformType::FloatMat4)
                .uniform("uDiffuse", UniformType::Sampler2d)
                .uniform("uTint", UniformType::FloatVec4)
                .uniform("uSky", UniformType::SamplerCube)
                .uniform_array("uWeights", 8, UniformType::Float),
        );

        let pso = build_pipeline_state(&mut dev, "lit", &PipelineStateDesc::new(VS, FS)).unwrap();

        assert_eq!(pso.uniforms().names().collect::<Vec<_>>(), ["uMvp", "uTint", "uWeights"]);
        assert_eq!(pso.samplers().names().collect::<Vec<_>>(), ["uDiffuse", "uSky"]);
        assert_eq!(pso.uniforms().get("uWeights").unwrap().size, 8);

        for name in pso.uniforms().names() {
            assert!(!pso.samplers().contains(name));
        }
        assert_eq!(pso.uniforms().len() + pso.samplers().len(), 5);
    }

    #[test]
    fn reflection_is_ascending_index_order() {
        let mut dev = device_with(
            ProgramInterface::new()
                .uniform("u0", UniformType::FloatVec4)
                .uniform("u1", UniformType::FloatVec4)
                .uniform("u2", UniformType::FloatVec4),
        );

        let pso = build_pipeline_state(&mut dev, "p", &PipelineStateDesc::new(VS, FS)).unwrap();

        let indices: Vec<u32> = pso
            .uniforms()
            .iter()
            .map(|d| d.location.unwrap().index)
            .collect();
        assert_eq!(indices, [0, 1, 2]);
    }

    #[test]
    fn carries_optional_descriptors() {
        let mut dev = device_with(ProgramInterface::new());
        let desc = PipelineStateDesc::new(VS, FS)
            .with_root_signature(RootSignature::new().uniform(0, "uMvp"))
            .with_depth_stencil(DepthStencilState::enabled(CompareFunc::Less));

        let pso = build_pipeline_state(&mut dev, "p", &desc).unwrap();

        assert!(pso.input_layout().is_none());
        assert_eq!(pso.root_signature(), desc.root_signature.as_ref());
        assert_eq!(pso.depth_stencil_state(), desc.depth_stencil_state.as_ref());
        assert_eq!(pso.name(), "p");
    }

    // ── failures ──────────────────────────────────────────────────────────

    #[test]
    fn vertex_compile_failure_reports_stage_and_log() {
        let mut dev = device_with(ProgramInterface::new());
        dev.reject_source(VS, "0:1: 'attribute' : syntax error");

        let err = build_pipeline_state(&mut dev, "p", &PipelineStateDesc::new(VS, FS)).unwrap_err();

        match err {
            Error::ShaderCompile { stage, log } => {
                assert_eq!(stage, ShaderStage::Vertex);
                assert_eq!(log, "0:1: 'attribute' : syntax error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn fragment_compile_failure_deletes_vertex_shader() {
        let mut dev = device_with(ProgramInterface::new());
        dev.reject_source(FS, "bad fragment");

        let err = build_pipeline_state(&mut dev, "p", &PipelineStateDesc::new(VS, FS)).unwrap_err();

        assert!(matches!(err, Error::ShaderCompile { stage: ShaderStage::Fragment, .. }));
        assert!(dev.calls().iter().any(|c| matches!(c, Call::DeleteShader(_))));
        assert!(!dev.calls().iter().any(|c| matches!(c, Call::LinkProgram { .. })));
    }

    #[test]
    fn link_failure_reports_log_and_deletes_shaders() {
        let mut dev = RecordingDevice::new();
        dev.reject_link(VS, FS, "varying vColor not written");

        let err = build_pipeline_state(&mut dev, "p", &PipelineStateDesc::new(VS, FS)).unwrap_err();

        assert!(matches!(err, Error::ProgramLink { ref log } if log == "varying vColor not written"));
        let deleted = dev
            .calls()
            .iter()
            .filter(|c| matches!(c, Call::DeleteShader(_)))
            .count();
        assert_eq!(deleted, 2);
    }
}
