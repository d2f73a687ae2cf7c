use std::fmt;

use serde::Deserialize;

/// Programmable stage a shader unit is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Type tag reported for an active uniform.
///
/// Only the two sampler tags change routing; `FloatVec4` and `FloatMat4` are
/// the only types the interpreter can assign through a root signature.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum UniformType {
    Float,
    FloatVec2,
    FloatVec3,
    FloatVec4,
    Int,
    Bool,
    FloatMat2,
    FloatMat3,
    FloatMat4,
    Sampler2d,
    SamplerCube,
    /// Backend type code with no named variant.
    Other(u32),
}

impl UniformType {
    /// Returns `true` for the sampler types that route to a pipeline's sampler set.
    #[inline]
    pub fn is_sampler(self) -> bool {
        matches!(self, UniformType::Sampler2d | UniformType::SamplerCube)
    }
}

/// One entry of a program's active-uniform list, as reported by the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveUniform {
    pub name: String,
    /// Declared array size (1 for non-arrays).
    pub size: i32,
    pub ty: UniformType,
}

/// Memory type of one vertex-attribute component.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    Float,
}

/// Depth comparison function.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompareFunc {
    Never,
    Less,
    Equal,
    LessEqual,
    Greater,
    NotEqual,
    GreaterEqual,
    Always,
}

/// Fixed-function toggles the interpreter drives.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Capability {
    DepthTest,
    StencilTest,
}

/// Plane of the current render target affected by a clear.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ClearPlane {
    Color,
    Depth,
}

/// Primitive assembly mode for a draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Topology {
    Points,
    Lines,
    LineLoop,
    LineStrip,
    Triangles,
    TriangleStrip,
    TriangleFan,
}

/// Element type of an index buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum IndexType {
    U8,
    U16,
    U32,
}

impl IndexType {
    /// Size of one index in bytes.
    #[inline]
    pub fn byte_size(self) -> u32 {
        match self {
            IndexType::U8 => 1,
            IndexType::U16 => 2,
            IndexType::U32 => 4,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TextureTarget {
    Texture2d,
    CubeMap,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TextureFilter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapLinear,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TextureWrap {
    Repeat,
    ClampToEdge,
    MirroredRepeat,
}

/// A single texture parameter write.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TextureParameter {
    MinFilter(TextureFilter),
    MagFilter(TextureFilter),
    WrapS(TextureWrap),
    WrapT(TextureWrap),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_sampler_tags_are_samplers() {
        assert!(UniformType::Sampler2d.is_sampler());
        assert!(UniformType::SamplerCube.is_sampler());
        for ty in [
            UniformType::Float,
            UniformType::FloatVec4,
            UniformType::FloatMat4,
            UniformType::Int,
            UniformType::Other(0x8B5F),
        ] {
            assert!(!ty.is_sampler(), "{ty:?} must route to uniforms");
        }
    }

    #[test]
    fn index_sizes() {
        assert_eq!(IndexType::U8.byte_size(), 1);
        assert_eq!(IndexType::U16.byte_size(), 2);
        assert_eq!(IndexType::U32.byte_size(), 4);
    }

    #[test]
    fn compare_func_parses_camel_case() {
        let f: CompareFunc = serde_json::from_str("\"lessEqual\"").unwrap();
        assert_eq!(f, CompareFunc::LessEqual);
    }
}
