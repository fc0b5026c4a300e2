use super::{queue_hook, HostReconciler};
use crate::host::{HostNode, NodeKind};
use crate::lifecycle::Lifecycle;
use crate::vnode::{VNode, VNodeKind};

impl HostReconciler {
    /// Adopt the markup under `container` for `tree`.
    ///
    /// The first child must have the same shape as `tree`: same node kinds,
    /// same tags, same child counts. Text and attributes are corrected in
    /// place. On a shape mismatch the markup is discarded and false is
    /// returned so the caller mounts from scratch.
    pub(super) fn hydrate_into(
        &self,
        tree: &VNode,
        container: &HostNode,
        lifecycle: &mut Lifecycle,
    ) -> bool {
        let Some(first) = container.first_child() else {
            return false;
        };
        if !same_shape(tree, &first) {
            tracing::debug!("hydration mismatch under {:?}, discarding markup", container);
            container.clear_children();
            return false;
        }

        for surplus in container.children().into_iter().skip(1) {
            container.remove_child(&surplus);
        }
        self.adopt(tree, &first, lifecycle);
        true
    }

    fn adopt(&self, tree: &VNode, node: &HostNode, lifecycle: &mut Lifecycle) {
        match tree.kind() {
            VNodeKind::Text(text) => {
                if node.text() != *text {
                    node.set_text(text);
                }
            }
            VNodeKind::Element {
                attrs, children, ..
            } => {
                for (name, _) in node.attrs() {
                    if !attrs.iter().any(|(n, _)| *n == name) {
                        node.remove_attr(&name);
                    }
                }
                for (name, value) in attrs {
                    node.set_attr(name, value);
                }
                for (child, child_node) in children.iter().zip(node.children()) {
                    self.adopt(child, &child_node, lifecycle);
                }
            }
        }

        tree.bind(node.clone());
        self.track(tree, node);
        queue_hook(lifecycle, tree.hooks().on_mount.as_ref(), node);
    }
}

fn same_shape(tree: &VNode, node: &HostNode) -> bool {
    match tree.kind() {
        VNodeKind::Text(_) => node.kind() == NodeKind::Text,
        VNodeKind::Element { tag, children, .. } => {
            node.kind() == NodeKind::Element
                && node.tag() == *tag
                && node.child_count() == children.len()
                && children
                    .iter()
                    .zip(node.children())
                    .all(|(child, child_node)| same_shape(child, &child_node))
        }
    }
}
