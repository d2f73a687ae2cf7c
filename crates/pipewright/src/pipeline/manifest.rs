use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use super::PipelineStateDesc;

/// Named set of pipeline-state descriptors, iterated in ascending name order.
///
/// JSON form: an object mapping each pipeline name to a [`PipelineStateDesc`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct PipelineManifest {
    pipelines: BTreeMap<String, PipelineStateDesc>,
}

impl PipelineManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, desc: PipelineStateDesc) -> Self {
        self.insert(name, desc);
        self
    }

    /// Inserts or replaces the descriptor for `name`.
    pub fn insert(&mut self, name: &str, desc: PipelineStateDesc) {
        self.pipelines.insert(name.to_string(), desc);
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&PipelineStateDesc> {
        self.pipelines.get(name)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PipelineStateDesc)> {
        self.pipelines.iter().map(|(name, desc)| (name.as_str(), desc))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Reads and parses a JSON manifest from disk.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read pipeline manifest {}", path.display()))?;
        let manifest = Self::from_json(&text)
            .with_context(|| format!("invalid pipeline manifest {}", path.display()))?;

        log::debug!("loaded {} pipeline descriptors from {}", manifest.len(), path.display());
        Ok(manifest)
    }
}
