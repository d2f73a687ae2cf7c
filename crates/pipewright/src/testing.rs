//! Shared fixtures for unit tests.

use crate::device::{CompareFunc, ComponentType, ProgramInterface, RecordingDevice, UniformType};
use crate::pipeline::{DepthStencilState, InputElement, InputLayout, PipelineStateDesc, RootSignature};

pub(crate) const LIT_VS: &str = "lit.vert";
pub(crate) const LIT_FS: &str = "lit.frag";
pub(crate) const FLAT_VS: &str = "flat.vert";
pub(crate) const FLAT_FS: &str = "flat.frag";

/// A device that links the "lit" and "flat" programs.
///
/// lit: uMvp mat4 (0), uTint vec4 (1), uDiffuse sampler2D (2), uLightDir vec3 (3);
///      attributes aPosition (0), aNormal (1), aColor (2). `aUv` is not active.
/// flat: uColor vec4 (0); attribute aPosition (0).
pub(crate) fn device() -> RecordingDevice {
    let mut dev = RecordingDevice::new();
    dev.define_program(
        LIT_VS,
        LIT_FS,
        ProgramInterface::new()
            .uniform("uMvp", UniformType::FloatMat4)
            .uniform("uTint", UniformType::FloatVec4)
            .uniform("uDiffuse", UniformType::Sampler2d)
            .uniform("uLightDir", UniformType::FloatVec3)
            .attribute("aPosition")
            .attribute("aNormal")
            .attribute("aColor"),
    );
    dev.define_program(
        FLAT_VS,
        FLAT_FS,
        ProgramInterface::new()
            .uniform("uColor", UniformType::FloatVec4)
            .attribute("aPosition"),
    );
    dev
}

/// Slot 0 interleaves position + normal; slot 1 carries color + uv.
/// Root slots: 0 uMvp, 1 uTint, 3 uLightDir (uniforms); 2 uDiffuse (sampler).
pub(crate) fn lit_desc() -> PipelineStateDesc {
    PipelineStateDesc::new(LIT_VS, LIT_FS)
        .with_input_layout(
            InputLayout::new()
                .element("aPosition", InputElement::new(0, 3, ComponentType::Float, 24, 0))
                .element("aNormal", InputElement::new(0, 3, ComponentType::Float, 24, 12))
                .element(
                    "aColor",
                    InputElement::new(1, 4, ComponentType::UnsignedByte, 12, 0).normalized(),
                )
                .element("aUv", InputElement::new(1, 2, ComponentType::Float, 12, 4)),
        )
        .with_root_signature(
            RootSignature::new()
                .uniform(0, "uMvp")
                .uniform(1, "uTint")
                .sampler(2, "uDiffuse")
                .uniform(3, "uLightDir"),
        )
        .with_depth_stencil(DepthStencilState::enabled(CompareFunc::LessEqual))
}

/// Root slot 0 is uColor. No input layout or depth state.
pub(crate) fn flat_desc() -> PipelineStateDesc {
    PipelineStateDesc::new(FLAT_VS, FLAT_FS)
        .with_root_signature(RootSignature::new().uniform(0, "uColor"))
}
