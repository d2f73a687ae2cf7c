use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::device::{CompareFunc, ComponentType};

/// Source text and optional fixed descriptors for one pipeline state.
///
/// Field names deserialize in camelCase: `vertexSource`, `fragmentSource`,
/// `inputLayout`, `rootSignature`, `depthStencilState`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PipelineStateDesc {
    pub vertex_source: String,
    pub fragment_source: String,
    #[serde(default)]
    pub input_layout: Option<InputLayout>,
    #[serde(default)]
    pub root_signature: Option<RootSignature>,
    #[serde(default)]
    pub depth_stencil_state: Option<DepthStencilState>,
}

impl PipelineStateDesc {
    pub fn new(vertex_source: impl Into<String>, fragment_source: impl Into<String>) -> Self {
        Self {
            vertex_source: vertex_source.into(),
            fragment_source: fragment_source.into(),
            input_layout: None,
            root_signature: None,
            depth_stencil_state: None,
        }
    }

    pub fn with_input_layout(mut self, layout: InputLayout) -> Self {
        self.input_layout = Some(layout);
        self
    }

    pub fn with_root_signature(mut self, signature: RootSignature) -> Self {
        self.root_signature = Some(signature);
        self
    }

    pub fn with_depth_stencil(mut self, state: DepthStencilState) -> Self {
        self.depth_stencil_state = Some(state);
        self
    }
}

// ── input layout ──────────────────────────────────────────────────────────

/// Memory layout of one vertex input, read from the buffer bound to `input_slot`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InputElement {
    pub input_slot: u32,
    /// Components per vertex (1 to 4).
    pub component_count: i32,
    pub component_type: ComponentType,
    #[serde(default)]
    pub normalized: bool,
    /// Byte distance between consecutive vertices; 0 means tightly packed.
    pub stride: i32,
    pub byte_offset: i32,
}

impl InputElement {
    pub fn new(
        input_slot: u32,
        component_count: i32,
        component_type: ComponentType,
        stride: i32,
        byte_offset: i32,
    ) -> Self {
        Self {
            input_slot,
            component_count,
            component_type,
            normalized: false,
            stride,
            byte_offset,
        }
    }

    pub fn normalized(mut self) -> Self {
        self.normalized = true;
        self
    }
}

/// Vertex-shader input name → element layout, iterated in ascending name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct InputLayout {
    elements: BTreeMap<String, InputElement>,
}

impl InputLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element(mut self, semantic_name: &str, element: InputElement) -> Self {
        self.elements.insert(semantic_name.to_string(), element);
        self
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &InputElement)> {
        self.elements.iter().map(|(name, e)| (name.as_str(), e))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

// ── root signature ────────────────────────────────────────────────────────

/// Which reflected set a root parameter resolves against.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RootParameterKind {
    Uniform,
    Sampler,
}

impl fmt::Display for RootParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootParameterKind::Uniform => f.write_str("uniform"),
            RootParameterKind::Sampler => f.write_str("sampler"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RootParameter {
    pub semantic_name: String,
    #[serde(alias = "type")]
    pub kind: RootParameterKind,
}

/// Slot → (semantic name, kind) table that decouples draw-time binding from
/// shader-internal names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RootSignature {
    pub root_parameters: BTreeMap<u32, RootParameter>,
}

impl RootSignature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uniform(self, slot: u32, semantic_name: &str) -> Self {
        self.parameter(slot, semantic_name, RootParameterKind::Uniform)
    }

    pub fn sampler(self, slot: u32, semantic_name: &str) -> Self {
        self.parameter(slot, semantic_name, RootParameterKind::Sampler)
    }

    fn parameter(mut self, slot: u32, semantic_name: &str, kind: RootParameterKind) -> Self {
        self.root_parameters.insert(
            slot,
            RootParameter { semantic_name: semantic_name.to_string(), kind },
        );
        self
    }
}

// ── depth/stencil ─────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DepthStencilState {
    pub depth_enable: bool,
    #[serde(default = "default_depth_func")]
    pub depth_func: CompareFunc,
}

impl DepthStencilState {
    pub fn enabled(depth_func: CompareFunc) -> Self {
        Self { depth_enable: true, depth_func }
    }

    pub fn disabled() -> Self {
        Self { depth_enable: false, depth_func: default_depth_func() }
    }
}

fn default_depth_func() -> CompareFunc {
    CompareFunc::Less
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desc_parses_full_schema() {
        let json = r#"{
            "vertexSource": "vs",
            "fragmentSource": "fs",
            "inputLayout": {
                "aPosition": { "inputSlot": 0, "componentCount": 3, "componentType": "float", "stride": 12, "byteOffset": 0 },
                "aColor": { "inputSlot": 1, "componentCount": 4, "componentType": "unsignedByte", "normalized": true, "stride": 4, "byteOffset": 0 }
            },
            "rootSignature": { "rootParameters": {
                "0": { "semanticName": "uModelViewProjection", "kind": "uniform" },
                "1": { "semanticName": "uDiffuse", "type": "sampler" }
            } },
            "depthStencilState": { "depthEnable": true, "depthFunc": "lessEqual" }
        }"#;

        let desc: PipelineStateDesc = serde_json::from_str(json).unwrap();

        let layout = desc.input_layout.unwrap();
        let names: Vec<&str> = layout.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["aColor", "aPosition"]);
        let (_, color) = layout.iter().next().unwrap();
        assert!(color.normalized);
        assert_eq!(color.component_type, ComponentType::UnsignedByte);

        let sig = desc.root_signature.unwrap();
        assert_eq!(sig.root_parameters[&1].kind, RootParameterKind::Sampler);
        assert_eq!(sig.root_parameters[&0].semantic_name, "uModelViewProjection");

        assert_eq!(
            desc.depth_stencil_state,
            Some(DepthStencilState::enabled(CompareFunc::LessEqual))
        );
    }

    #[test]
    fn optional_descriptors_default_to_none() {
        let desc: PipelineStateDesc =
            serde_json::from_str(r#"{ "vertexSource": "vs", "fragmentSource": "fs" }"#).unwrap();
        assert_eq!(desc, PipelineStateDesc::new("vs", "fs"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let res: Result<PipelineStateDesc, _> = serde_json::from_str(
            r#"{ "vertexSource": "vs", "fragmentSource": "fs", "blendState": {} }"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn disabled_depth_needs_no_func() {
        let state: DepthStencilState = serde_json::from_str(r#"{ "depthEnable": false }"#).unwrap();
        assert_eq!(state, DepthStencilState::disabled());
    }
}
