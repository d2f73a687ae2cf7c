use crate::binding::AttributeRouting;
use crate::device::GraphicsDevice;
use crate::error::StateError;
use crate::pass::{DrawCall, Node};

/// Binds one node's vertex/index sources and issues its draw.
///
/// Only the slots present in the node are (re)configured. Attribute state for
/// slots the node omits is left as the previous draw set it.
pub(crate) fn draw_node<D: GraphicsDevice>(
    device: &mut D,
    attributes: &AttributeRouting<'_>,
    node: &Node<D::Buffer>,
) -> Result<(), StateError> {
    // Validate before touching the device so a rejected node leaves no partial state.
    if matches!(node.draw, DrawCall::Indexed(_)) && node.index_buffer_view.is_none() {
        return Err(StateError::MissingIndexBuffer);
    }

    for (&slot, view) in &node.vertex_buffer_views {
        device.bind_vertex_buffer(view.buffer);

        let routed = attributes.attributes(slot);
        if routed.is_empty() {
            log::trace!("vertex slot {slot} feeds no active attribute");
        }
        for &(location, element) in routed {
            device.vertex_attrib_pointer(location, element);
            device.enable_vertex_attrib(location);
        }
    }

    if let Some(view) = &node.index_buffer_view {
        device.bind_index_buffer(view.buffer);
    }

    match (node.draw, &node.index_buffer_view) {
        (DrawCall::Arrays(args), _) => {
            device.draw_arrays(args.topology, args.start_vertex, args.vertex_count);
        }
        (DrawCall::Indexed(args), Some(view)) => {
            device.draw_elements(args.topology, args.index_count, view.index_type, view.byte_offset);
        }
        (DrawCall::Indexed(_), None) => return Err(StateError::MissingIndexBuffer),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::resolve_input_layout;
    use crate::device::{BufferId, Call, IndexType, RecordingDevice, Topology};
    use crate::pass::IndexBufferView;
    use crate::pipeline::build_pipeline_state;
    use crate::testing;

    fn draws(dev: &RecordingDevice) -> Vec<&Call> {
        dev.calls()
            .iter()
            .filter(|c| matches!(c, Call::DrawArrays { .. } | Call::DrawElements { .. }))
            .collect()
    }

    #[test]
    fn arrays_node_binds_slots_then_draws_once() {
        let mut dev = testing::device();
        let lit = build_pipeline_state(&mut dev, "lit", &testing::lit_desc()).unwrap();
        let layout = lit.input_layout().unwrap();
        let routing = resolve_input_layout(&dev, lit.program(), layout);
        dev.take_calls();

        let node = Node::arrays(Topology::Triangles, 3, 36)
            .with_vertex_buffer(0, BufferId(1))
            .with_vertex_buffer(1, BufferId(2));
        draw_node(&mut dev, &routing, &node).unwrap();

        let calls = dev.take_calls();
        let expected_head = [
            Call::BindVertexBuffer(BufferId(1)),
            Call::VertexAttribPointer { location: 1, element: layout.iter().nth(1).unwrap().1.clone() },
            Call::EnableVertexAttrib(1),
            Call::VertexAttribPointer { location: 0, element: layout.iter().nth(2).unwrap().1.clone() },
            Call::EnableVertexAttrib(0),
            Call::BindVertexBuffer(BufferId(2)),
            Call::VertexAttribPointer { location: 2, element: layout.iter().next().unwrap().1.clone() },
            Call::EnableVertexAttrib(2),
        ];
        assert_eq!(&calls[..expected_head.len()], &expected_head);
        assert_eq!(
            calls.last(),
            Some(&Call::DrawArrays { topology: Topology::Triangles, first: 3, count: 36 })
        );
        assert_eq!(calls.len(), expected_head.len() + 1);
    }

    #[test]
    fn indexed_node_uses_its_index_view() {
        let mut dev = RecordingDevice::new();
        let routing = AttributeRouting::empty();
        let node = Node::indexed(
            Topology::TriangleStrip,
            12,
            IndexBufferView { buffer: BufferId(9), index_type: IndexType::U16, byte_offset: 64 },
        );

        draw_node(&mut dev, &routing, &node).unwrap();

        assert_eq!(
            dev.calls(),
            [
                Call::BindIndexBuffer(BufferId(9)),
                Call::DrawElements {
                    topology: Topology::TriangleStrip,
                    count: 12,
                    index_type: IndexType::U16,
                    offset: 64,
                },
            ]
        );
        assert_eq!(draws(&dev).len(), 1);
    }

    #[test]
    fn indexed_node_without_index_view_is_rejected_untouched() {
        let mut dev = RecordingDevice::new();
        let mut node = Node::indexed(
            Topology::Triangles,
            3,
            IndexBufferView { buffer: BufferId(9), index_type: IndexType::U32, byte_offset: 0 },
        )
        .with_vertex_buffer(0, BufferId(1));
        node.index_buffer_view = None;

        let err = draw_node(&mut dev, &AttributeRouting::empty(), &node).unwrap_err();

        assert_eq!(err, StateError::MissingIndexBuffer);
        assert!(dev.calls().is_empty());
    }

    #[test]
    fn omitted_slots_are_not_touched() {
        let mut dev = testing::device();
        let lit = build_pipeline_state(&mut dev, "lit", &testing::lit_desc()).unwrap();
        let routing = resolve_input_layout(&dev, lit.program(), lit.input_layout().unwrap());
        dev.take_calls();

        let node = Node::arrays(Topology::Points, 0, 1).with_vertex_buffer(1, BufferId(5));
        draw_node(&mut dev, &routing, &node).unwrap();

        let configured: Vec<u32> = dev
            .calls()
            .iter()
            .filter_map(|c| match c {
                Call::EnableVertexAttrib(loc) => Some(*loc),
                _ => None,
            })
            .collect();
        assert_eq!(configured, [2]);
    }

    #[test]
    fn slot_without_active_attributes_still_binds() {
        let mut dev = RecordingDevice::new();
        let node = Node::arrays(Topology::Lines, 0, 2).with_vertex_buffer(4, BufferId(3));

        draw_node(&mut dev, &AttributeRouting::empty(), &node).unwrap();

        assert_eq!(dev.calls()[0], Call::BindVertexBuffer(BufferId(3)));
        assert_eq!(draws(&dev).len(), 1);
    }
}
