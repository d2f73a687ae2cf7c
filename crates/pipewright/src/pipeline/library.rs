use std::collections::BTreeMap;
use std::fmt;

use crate::device::GraphicsDevice;
use crate::error::{Error, Result};

use super::{PipelineManifest, PipelineState, build_pipeline_state};

/// How a batch build reacts to a failing pipeline state.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum BatchPolicy {
    /// Stop at the first failure.
    #[default]
    FailFast,
    /// Attempt every pipeline state, then report all failures together.
    CollectAll,
}

/// Batch build parameters.
#[derive(Debug, Clone, Default)]
pub struct BuildConfig {
    pub policy: BatchPolicy,
}

/// Pipeline states built from one manifest, addressed by name.
pub struct PipelineLibrary<D: GraphicsDevice> {
    states: BTreeMap<String, PipelineState<D>>,
}

impl<D: GraphicsDevice> PipelineLibrary<D> {
    /// Builds every descriptor of `manifest` in ascending name order.
    ///
    /// On failure, programs already built by this call are deleted before the
    /// error is returned. Each per-pipeline error is wrapped in
    /// [`Error::Pipeline`]; under [`BatchPolicy::CollectAll`] they are gathered
    /// into [`Error::Batch`].
    pub fn build(device: &mut D, manifest: &PipelineManifest, config: &BuildConfig) -> Result<Self> {
        let mut library = Self { states: BTreeMap::new() };
        let mut errors = Vec::new();

        for (name, desc) in manifest.iter() {
            match build_pipeline_state(device, name, desc) {
                Ok(state) => {
                    library.states.insert(name.to_string(), state);
                }
                Err(err) => {
                    let err = Error::Pipeline { name: name.to_string(), source: Box::new(err) };
                    if config.policy == BatchPolicy::FailFast {
                        log::warn!("aborting pipeline batch: {err}");
                        library.destroy(device);
                        return Err(err);
                    }
                    log::warn!("{err}");
                    errors.push(err);
                }
            }
        }

        if !errors.is_empty() {
            library.destroy(device);
            return Err(Error::Batch { errors });
        }

        Ok(library)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&PipelineState<D>> {
        self.states.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PipelineState<D>)> {
        self.states.iter().map(|(name, state)| (name.as_str(), state))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Deletes every program owned by the library.
    pub fn destroy(self, device: &mut D) {
        for (_, state) in self.states {
            state.destroy(device);
        }
    }
}

impl<D: GraphicsDevice> fmt::Debug for PipelineLibrary<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.states.iter()).finish()
    }
}
