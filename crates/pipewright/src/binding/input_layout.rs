use std::collections::BTreeMap;

use crate::device::GraphicsDevice;
use crate::pipeline::{InputElement, InputLayout};

/// Input slot → (attribute location, element layout) pairs for the bound program.
#[derive(Debug, Clone, Default)]
pub struct AttributeRouting<'p> {
    slots: BTreeMap<u32, Vec<(u32, &'p InputElement)>>,
}

impl<'p> AttributeRouting<'p> {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Attributes fed by `slot`, in ascending semantic-name order. Empty if none.
    #[inline]
    pub fn attributes(&self, slot: u32) -> &[(u32, &'p InputElement)] {
        self.slots.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn slots(&self) -> impl Iterator<Item = u32> + '_ {
        self.slots.keys().copied()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Looks up every input of `layout` in `program` and groups the active ones by slot.
///
/// Inputs the program does not expose (optimized out or never declared) are
/// skipped and contribute no entry.
pub fn resolve_input_layout<'p, D: GraphicsDevice>(
    device: &D,
    program: D::Program,
    layout: &'p InputLayout,
) -> AttributeRouting<'p> {
    let mut routing = AttributeRouting::empty();

    for (semantic_name, element) in layout.iter() {
        let Some(location) = device.attrib_location(program, semantic_name) else {
            log::debug!("input `{semantic_name}` is not active in the program; skipped");
            continue;
        };
        routing
            .slots
            .entry(element.input_slot)
            .or_default()
            .push((location, element));
    }

    routing
}
