//! Translation between pipewright's device enums and GL constants.

use pipewright::device::{
    Capability, ClearPlane, CompareFunc, ComponentType, IndexType, ShaderStage, TextureFilter,
    TextureParameter, TextureTarget, TextureWrap, Topology, UniformType,
};

pub(crate) fn shader_stage(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

/// Reflected uniform type. Types the core never assigns through are kept as `Other`.
pub(crate) fn uniform_type(gl_type: u32) -> UniformType {
    match gl_type {
        glow::FLOAT => UniformType::Float,
        glow::FLOAT_VEC2 => UniformType::FloatVec2,
        glow::FLOAT_VEC3 => UniformType::FloatVec3,
        glow::FLOAT_VEC4 => UniformType::FloatVec4,
        glow::INT => UniformType::Int,
        glow::BOOL => UniformType::Bool,
        glow::FLOAT_MAT2 => UniformType::FloatMat2,
        glow::FLOAT_MAT3 => UniformType::FloatMat3,
        glow::FLOAT_MAT4 => UniformType::FloatMat4,
        glow::SAMPLER_2D => UniformType::Sampler2d,
        glow::SAMPLER_CUBE => UniformType::SamplerCube,
        other => UniformType::Other(other),
    }
}

pub(crate) fn component_type(ty: ComponentType) -> u32 {
    match ty {
        ComponentType::Byte => glow::BYTE,
        ComponentType::UnsignedByte => glow::UNSIGNED_BYTE,
        ComponentType::Short => glow::SHORT,
        ComponentType::UnsignedShort => glow::UNSIGNED_SHORT,
        ComponentType::Int => glow::INT,
        ComponentType::UnsignedInt => glow::UNSIGNED_INT,
        ComponentType::Float => glow::FLOAT,
    }
}

pub(crate) fn compare_func(func: CompareFunc) -> u32 {
    match func {
        CompareFunc::Never => glow::NEVER,
        CompareFunc::Less => glow::LESS,
        CompareFunc::Equal => glow::EQUAL,
        CompareFunc::LessEqual => glow::LEQUAL,
        CompareFunc::Greater => glow::GREATER,
        CompareFunc::NotEqual => glow::NOTEQUAL,
        CompareFunc::GreaterEqual => glow::GEQUAL,
        CompareFunc::Always => glow::ALWAYS,
    }
}

pub(crate) fn capability(capability: Capability) -> u32 {
    match capability {
        Capability::DepthTest => glow::DEPTH_TEST,
        Capability::StencilTest => glow::STENCIL_TEST,
    }
}

pub(crate) fn clear_mask(plane: ClearPlane) -> u32 {
    match plane {
        ClearPlane::Color => glow::COLOR_BUFFER_BIT,
        ClearPlane::Depth => glow::DEPTH_BUFFER_BIT,
    }
}

pub(crate) fn topology(topology: Topology) -> u32 {
    match topology {
        Topology::Points => glow::POINTS,
        Topology::Lines => glow::LINES,
        Topology::LineLoop => glow::LINE_LOOP,
        Topology::LineStrip => glow::LINE_STRIP,
        Topology::Triangles => glow::TRIANGLES,
        Topology::TriangleStrip => glow::TRIANGLE_STRIP,
        Topology::TriangleFan => glow::TRIANGLE_FAN,
    }
}

pub(crate) fn index_type(ty: IndexType) -> u32 {
    match ty {
        IndexType::U8 => glow::UNSIGNED_BYTE,
        IndexType::U16 => glow::UNSIGNED_SHORT,
        IndexType::U32 => glow::UNSIGNED_INT,
    }
}

pub(crate) fn texture_target(target: TextureTarget) -> u32 {
    match target {
        TextureTarget::Texture2d => glow::TEXTURE_2D,
        TextureTarget::CubeMap => glow::TEXTURE_CUBE_MAP,
    }
}

fn texture_filter(filter: TextureFilter) -> u32 {
    match filter {
        TextureFilter::Nearest => glow::NEAREST,
        TextureFilter::Linear => glow::LINEAR,
        TextureFilter::NearestMipmapNearest => glow::NEAREST_MIPMAP_NEAREST,
        TextureFilter::LinearMipmapNearest => glow::LINEAR_MIPMAP_NEAREST,
        TextureFilter::NearestMipmapLinear => glow::NEAREST_MIPMAP_LINEAR,
        TextureFilter::LinearMipmapLinear => glow::LINEAR_MIPMAP_LINEAR,
    }
}

fn texture_wrap(wrap: TextureWrap) -> u32 {
    match wrap {
        TextureWrap::Repeat => glow::REPEAT,
        TextureWrap::ClampToEdge => glow::CLAMP_TO_EDGE,
        TextureWrap::MirroredRepeat => glow::MIRRORED_REPEAT,
    }
}

/// `(pname, value)` for `glTexParameteri`.
pub(crate) fn texture_parameter(parameter: TextureParameter) -> (u32, i32) {
    let (pname, value) = match parameter {
        TextureParameter::MinFilter(f) => (glow::TEXTURE_MIN_FILTER, texture_filter(f)),
        TextureParameter::MagFilter(f) => (glow::TEXTURE_MAG_FILTER, texture_filter(f)),
        TextureParameter::WrapS(w) => (glow::TEXTURE_WRAP_S, texture_wrap(w)),
        TextureParameter::WrapT(w) => (glow::TEXTURE_WRAP_T, texture_wrap(w)),
    };
    (pname, value as i32)
}
