use super::{queue_hook, HostReconciler};
use crate::host::{Document, HostNode};
use crate::lifecycle::Lifecycle;
use crate::vnode::{VNode, VNodeKind};

impl HostReconciler {
    /// Build host nodes for `tree`, binding every level.
    ///
    /// Mount hooks are queued children first, so a parent's hook sees a
    /// fully built subtree.
    pub(super) fn create(
        &self,
        tree: &VNode,
        document: &Document,
        lifecycle: &mut Lifecycle,
    ) -> HostNode {
        let node = match tree.kind() {
            VNodeKind::Text(text) => document.create_text_node(text),
            VNodeKind::Element {
                tag,
                attrs,
                children,
            } => {
                let element = document.create_element(tag);
                for (name, value) in attrs {
                    element.set_attr(name, value);
                }
                for child in children {
                    let child_node = self.create(child, document, lifecycle);
                    element.append_child(&child_node);
                }
                element
            }
        };

        tree.bind(node.clone());
        self.track(tree, &node);
        queue_hook(lifecycle, tree.hooks().on_mount.as_ref(), &node);
        node
    }

    pub(super) fn mount_into(
        &self,
        tree: &VNode,
        container: &HostNode,
        document: &Document,
        lifecycle: &mut Lifecycle,
    ) {
        let node = self.create(tree, document, lifecycle);
        container.append_child(&node);
    }
}
