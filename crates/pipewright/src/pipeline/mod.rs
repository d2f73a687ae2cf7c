//! Pipeline-state construction.
//!
//! Responsibilities:
//! - describe pipeline states declaratively (sources, input layout, root signature, depth state)
//! - compile, link and reflect programs into immutable `PipelineState`s
//! - build named batches from a manifest under a configurable failure policy
//!
//! Root signatures are only stored here; they are resolved at bind time.

mod builder;
mod desc;
mod descriptor;
mod library;
mod manifest;
mod state;

pub use builder::build_pipeline_state;
pub use desc::{
    DepthStencilState, InputElement, InputLayout, PipelineStateDesc, RootParameter,
    RootParameterKind, RootSignature,
};
pub use descriptor::{DescriptorSet, UniformDescriptor};
pub use library::{BatchPolicy, BuildConfig, PipelineLibrary};
pub use manifest::PipelineManifest;
pub use state::PipelineState;
