use std::collections::BTreeMap;

use crate::device::{IndexType, Topology};
use crate::error::StateError;

/// Vertex source for one input slot. Element layout comes from the bound
/// pipeline's input layout.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VertexBufferView<B> {
    pub buffer: B,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct IndexBufferView<B> {
    pub buffer: B,
    pub index_type: IndexType,
    pub byte_offset: i32,
}

/// Non-indexed draw parameters.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DrawArgs {
    pub topology: Topology,
    pub start_vertex: i32,
    pub vertex_count: i32,
}

/// Indexed draw parameters; element type and offset come from the node's index buffer view.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DrawIndexedArgs {
    pub topology: Topology,
    pub index_count: i32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DrawCall {
    Arrays(DrawArgs),
    Indexed(DrawIndexedArgs),
}

/// A drawable unit: per-slot vertex buffers, an optional index buffer and one draw.
///
/// `B` is the device's buffer handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<B> {
    pub vertex_buffer_views: BTreeMap<u32, VertexBufferView<B>>,
    pub index_buffer_view: Option<IndexBufferView<B>>,
    pub draw: DrawCall,
}

impl<B> Node<B> {
    pub fn arrays(topology: Topology, start_vertex: i32, vertex_count: i32) -> Self {
        Self {
            vertex_buffer_views: BTreeMap::new(),
            index_buffer_view: None,
            draw: DrawCall::Arrays(DrawArgs { topology, start_vertex, vertex_count }),
        }
    }

    pub fn indexed(topology: Topology, index_count: i32, index_buffer_view: IndexBufferView<B>) -> Self {
        Self {
            vertex_buffer_views: BTreeMap::new(),
            index_buffer_view: Some(index_buffer_view),
            draw: DrawCall::Indexed(DrawIndexedArgs { topology, index_count }),
        }
    }

    /// Feeds input slot `slot` from `buffer`.
    pub fn with_vertex_buffer(mut self, slot: u32, buffer: B) -> Self {
        self.vertex_buffer_views.insert(slot, VertexBufferView { buffer });
        self
    }

    /// Assembles a node from optional parts as they appear in a node record.
    ///
    /// Exactly one of `draw_args` / `draw_indexed_args` must be present.
    pub fn from_parts(
        vertex_buffer_views: BTreeMap<u32, VertexBufferView<B>>,
        index_buffer_view: Option<IndexBufferView<B>>,
        draw_args: Option<DrawArgs>,
        draw_indexed_args: Option<DrawIndexedArgs>,
    ) -> Result<Self, StateError> {
        let draw = match (draw_args, draw_indexed_args) {
            (Some(args), None) => DrawCall::Arrays(args),
            (None, Some(args)) => DrawCall::Indexed(args),
            (Some(_), Some(_)) => {
                return Err(StateError::InvalidDrawArgs { reason: "both drawArgs and drawIndexedArgs are set" });
            }
            (None, None) => {
                return Err(StateError::InvalidDrawArgs { reason: "neither drawArgs nor drawIndexedArgs is set" });
            }
        };

        Ok(Self { vertex_buffer_views, index_buffer_view, draw })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARGS: DrawArgs = DrawArgs { topology: Topology::Triangles, start_vertex: 0, vertex_count: 3 };
    const INDEXED: DrawIndexedArgs = DrawIndexedArgs { topology: Topology::Triangles, index_count: 6 };

    #[test]
    fn from_parts_accepts_exactly_one_draw() {
        let node = Node::<u32>::from_parts(BTreeMap::new(), None, Some(ARGS), None).unwrap();
        assert_eq!(node.draw, DrawCall::Arrays(ARGS));

        let node = Node::<u32>::from_parts(BTreeMap::new(), None, None, Some(INDEXED)).unwrap();
        assert_eq!(node.draw, DrawCall::Indexed(INDEXED));
    }

    #[test]
    fn from_parts_rejects_both() {
        let err = Node::<u32>::from_parts(BTreeMap::new(), None, Some(ARGS), Some(INDEXED)).unwrap_err();
        assert!(matches!(err, StateError::InvalidDrawArgs { .. }));
    }

    #[test]
    fn from_parts_rejects_neither() {
        let err = Node::<u32>::from_parts(BTreeMap::new(), None, None, None).unwrap_err();
        assert!(matches!(err, StateError::InvalidDrawArgs { .. }));
    }

    #[test]
    fn builder_sets_vertex_slots() {
        let node = Node::arrays(Topology::Lines, 2, 4).with_vertex_buffer(1, 10u32).with_vertex_buffer(0, 11);
        assert_eq!(node.vertex_buffer_views.keys().copied().collect::<Vec<_>>(), [0, 1]);
        assert_eq!(node.vertex_buffer_views[&1].buffer, 10);
    }
}
