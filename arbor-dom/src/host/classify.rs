use super::node::{HostNode, NodeKind};

/// Whether `node` can own a render.
///
/// A container must be an element, carry a style bag and still belong to a
/// live document. Text nodes, documents and detached elements are rejected.
pub fn is_container(node: &HostNode) -> bool {
    node.kind() == NodeKind::Element && node.has_style_bag() && node.owner_document().is_some()
}
