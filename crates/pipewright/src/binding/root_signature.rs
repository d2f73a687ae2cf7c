use std::collections::BTreeMap;

use crate::device::GraphicsDevice;
use crate::error::{Error, Result};
use crate::pipeline::{PipelineState, RootParameterKind, RootSignature, UniformDescriptor};

/// Slot → descriptor routing produced by resolving a root signature.
///
/// Descriptors are borrowed from the pipeline state they were resolved
/// against, so a table can never outlive or mix pipeline states.
#[derive(Debug)]
pub struct RootBindings<'p, L> {
    uniforms: BTreeMap<u32, &'p UniformDescriptor<L>>,
    samplers: BTreeMap<u32, &'p UniformDescriptor<L>>,
}

impl<'p, L> RootBindings<'p, L> {
    /// An empty table: every slot is unmapped.
    pub fn empty() -> Self {
        Self { uniforms: BTreeMap::new(), samplers: BTreeMap::new() }
    }

    #[inline]
    pub fn uniform(&self, slot: u32) -> Option<&'p UniformDescriptor<L>> {
        self.uniforms.get(&slot).copied()
    }

    #[inline]
    pub fn sampler(&self, slot: u32) -> Option<&'p UniformDescriptor<L>> {
        self.samplers.get(&slot).copied()
    }

    pub fn uniform_slots(&self) -> impl Iterator<Item = u32> + '_ {
        self.uniforms.keys().copied()
    }

    pub fn sampler_slots(&self) -> impl Iterator<Item = u32> + '_ {
        self.samplers.keys().copied()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.uniforms.is_empty() && self.samplers.is_empty()
    }
}

/// Resolves every slot of `signature` against the reflected sets of `state`.
///
/// A `uniform` slot must name one of `state.uniforms()`, a `sampler` slot one
/// of `state.samplers()`. Slots are resolved in ascending order and the first
/// name that is missing from its expected set fails the whole resolution.
pub fn resolve_root_signature<'p, D: GraphicsDevice>(
    state: &'p PipelineState<D>,
    signature: &RootSignature,
) -> Result<RootBindings<'p, D::UniformLocation>> {
    let mut bindings = RootBindings::empty();

    for (&slot, parameter) in &signature.root_parameters {
        let (set, table) = match parameter.kind {
            RootParameterKind::Uniform => (state.uniforms(), &mut bindings.uniforms),
            RootParameterKind::Sampler => (state.samplers(), &mut bindings.samplers),
        };

        let Some(descriptor) = set.get(&parameter.semantic_name) else {
            return Err(Error::UnresolvedRootParameter {
                slot,
                semantic_name: parameter.semantic_name.clone(),
                kind: parameter.kind,
            });
        };
        table.insert(slot, descriptor);
    }

    Ok(bindings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{ProgramInterface, RecordingDevice, UniformType};
    use crate::pipeline::{PipelineStateDesc, build_pipeline_state};

    fn pso(dev: &mut RecordingDevice) -> PipelineState<RecordingDevice> {
        dev.define_program(
            "vs",
            "fs",
            ProgramInterface::new()
                .uniform("uMvp", UniformType::FloatMat4)
                .uniform("uTint", UniformType::FloatVec4)
                .uniform("uDiffuse", UniformType::Sampler2d),
        );
        build_pipeline_state(dev, "p", &PipelineStateDesc::new("vs", "fs")).unwrap()
    }

    #[test]
    fn routes_each_slot_to_its_named_descriptor() {
        let mut dev = RecordingDevice::new();
        let state = pso(&mut dev);
        let sig = RootSignature::new()
            .uniform(0, "uMvp")
            .uniform(3, "uTint")
            .sampler(1, "uDiffuse");

        let bindings = resolve_root_signature(&state, &sig).unwrap();

        for (&slot, param) in &sig.root_parameters {
            let descriptor = match param.kind {
                RootParameterKind::Uniform => bindings.uniform(slot).unwrap(),
                RootParameterKind::Sampler => bindings.sampler(slot).unwrap(),
            };
            assert_eq!(descriptor.name, param.semantic_name);
            assert_eq!(descriptor.ty.is_sampler(), param.kind == RootParameterKind::Sampler);
        }
        assert_eq!(bindings.uniform_slots().collect::<Vec<_>>(), [0, 3]);
        assert_eq!(bindings.sampler_slots().collect::<Vec<_>>(), [1]);
    }

    #[test]
    fn tables_are_disjoint_by_kind() {
        let mut dev = RecordingDevice::new();
        let state = pso(&mut dev);
        let sig = RootSignature::new().uniform(0, "uMvp").sampler(1, "uDiffuse");

        let bindings = resolve_root_signature(&state, &sig).unwrap();

        assert!(bindings.sampler(0).is_none());
        assert!(bindings.uniform(1).is_none());
    }

    #[test]
    fn missing_name_is_an_error() {
        let mut dev = RecordingDevice::new();
        let state = pso(&mut dev);
        let sig = RootSignature::new().uniform(2, "uNormalMatrix");

        let err = resolve_root_signature(&state, &sig).unwrap_err();

        assert!(matches!(
            err,
            Error::UnresolvedRootParameter { slot: 2, ref semantic_name, kind: RootParameterKind::Uniform }
                if semantic_name == "uNormalMatrix"
        ));
    }

    #[test]
    fn kind_must_match_the_reflected_set() {
        let mut dev = RecordingDevice::new();
        let state = pso(&mut dev);

        // `uDiffuse` exists, but as a sampler.
        let err = resolve_root_signature(&state, &RootSignature::new().uniform(0, "uDiffuse"))
            .unwrap_err();
        assert!(matches!(err, Error::UnresolvedRootParameter { slot: 0, .. }));

        let err = resolve_root_signature(&state, &RootSignature::new().sampler(0, "uTint"))
            .unwrap_err();
        assert!(matches!(err, Error::UnresolvedRootParameter { kind: RootParameterKind::Sampler, .. }));
    }
}
