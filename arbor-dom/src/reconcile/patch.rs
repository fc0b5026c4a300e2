use super::{queue_hook, HostReconciler};
use crate::host::{Document, HostNode};
use crate::lifecycle::Lifecycle;
use crate::vnode::{VNode, VNodeKind};
use anyhow::anyhow;

impl HostReconciler {
    /// Reconcile `last` into `next`. `parent` is the host node holding
    /// `last`'s host node.
    ///
    /// On success `next` is bound to the host node `last` was using, or to a
    /// fresh one when the node had to be replaced. `last` keeps its binding.
    ///
    /// When `last` and `next` are the same instance the subtree is left
    /// alone and no `on_update` hook is queued for it.
    pub(super) fn patch_node(
        &self,
        last: &VNode,
        next: &VNode,
        parent: &HostNode,
        document: &Document,
        lifecycle: &mut Lifecycle,
    ) -> anyhow::Result<()> {
        if last.ptr_eq(next) {
            return Ok(());
        }
        let node = last
            .host()
            .ok_or_else(|| anyhow!("cannot patch from a tree that is not mounted"))?;

        match (last.kind(), next.kind()) {
            (VNodeKind::Text(old), VNodeKind::Text(new)) => {
                if old != new {
                    node.set_text(new);
                }
            }
            (VNodeKind::Element { tag: old_tag, .. }, VNodeKind::Element { tag: new_tag, .. })
                if old_tag == new_tag =>
            {
                patch_attrs(next, &node);
                self.patch_children(last, next, &node, document, lifecycle)?;
            }
            _ => return self.replace(last, next, &node, parent, document, lifecycle),
        }

        if let Some(key) = last.component_key() {
            if next.component_key() != Some(key) {
                self.ownership.release(key, &node);
            }
        }
        next.bind(node.clone());
        self.track(next, &node);
        queue_hook(lifecycle, next.hooks().on_update.as_ref(), &node);
        Ok(())
    }

    fn patch_children(
        &self,
        last: &VNode,
        next: &VNode,
        node: &HostNode,
        document: &Document,
        lifecycle: &mut Lifecycle,
    ) -> anyhow::Result<()> {
        let last_children = last.child_nodes();
        let next_children = next.child_nodes();
        let common = last_children.len().min(next_children.len());

        for (old, new) in last_children.iter().zip(next_children) {
            self.patch_node(old, new, node, document, lifecycle)?;
        }
        for new in &next_children[common..] {
            let child = self.create(new, document, lifecycle);
            node.append_child(&child);
        }
        for old in &last_children[common..] {
            if let Some(child) = old.host() {
                self.release(old)?;
                node.remove_child(&child);
            }
        }
        Ok(())
    }

    fn replace(
        &self,
        last: &VNode,
        next: &VNode,
        node: &HostNode,
        parent: &HostNode,
        document: &Document,
        lifecycle: &mut Lifecycle,
    ) -> anyhow::Result<()> {
        let fresh = self.create(next, document, lifecycle);
        self.release(last)?;
        if !parent.replace_child(&fresh, node) {
            return Err(anyhow!("{:?} is not a child of {:?}", node, parent));
        }
        Ok(())
    }
}

fn patch_attrs(next: &VNode, node: &HostNode) {
    let wanted = next.attrs();
    for (name, _) in node.attrs() {
        if !wanted.iter().any(|(n, _)| *n == name) {
            node.remove_attr(&name);
        }
    }
    for (name, value) in wanted {
        if node.attr(name).as_deref() != Some(value.as_str()) {
            node.set_attr(name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vnode::ComponentId;
    use std::cell::Cell;
    use std::rc::Rc;

    fn mounted(tree: &VNode) -> (Document, HostNode, HostReconciler) {
        let doc = Document::new();
        let container = doc.create_element("div");
        let reconciler = HostReconciler::default();
        let mut lifecycle = Lifecycle::new();
        reconciler.mount_into(tree, &container, &doc, &mut lifecycle);
        (doc, container, reconciler)
    }

    #[test]
    fn test_patch_text_in_place() {
        let last = VNode::element("p").child(VNode::text("old"));
        let (doc, container, reconciler) = mounted(&last);
        let host = last.host().unwrap();
        let next = VNode::element("p").child(VNode::text("new"));
        let mut lifecycle = Lifecycle::new();

        reconciler
            .patch_node(&last, &next, &container, &doc, &mut lifecycle)
            .unwrap();

        assert_eq!(next.host(), Some(host));
        assert_eq!(container.outer_html(), "<div><p>new</p></div>");
    }

    #[test]
    fn test_patch_attrs() {
        let last = VNode::element("a").attr("href", "/a").attr("title", "t");
        let (doc, container, reconciler) = mounted(&last);
        let next = VNode::element("a").attr("href", "/b");
        let mut lifecycle = Lifecycle::new();

        reconciler
            .patch_node(&last, &next, &container, &doc, &mut lifecycle)
            .unwrap();

        assert_eq!(container.outer_html(), "<div><a href=\"/b\"></a></div>");
    }

    #[test]
    fn test_patch_grows_and_shrinks_children() {
        let last = VNode::element("ul")
            .child(VNode::element("li").child(VNode::text("a")))
            .child(VNode::element("li").child(VNode::text("b")));
        let (doc, container, reconciler) = mounted(&last);

        let grown = VNode::element("ul").children(
            ["a", "b", "c"].map(|t| VNode::element("li").child(VNode::text(t))),
        );
        let mut lifecycle = Lifecycle::new();
        reconciler
            .patch_node(&last, &grown, &container, &doc, &mut lifecycle)
            .unwrap();
        assert_eq!(container.text_content(), "abc");

        let shrunk = VNode::element("ul").child(VNode::element("li").child(VNode::text("z")));
        reconciler
            .patch_node(&grown, &shrunk, &container, &doc, &mut lifecycle)
            .unwrap();
        assert_eq!(container.outer_html(), "<div><ul><li>z</li></ul></div>");
        assert!(!grown.child_nodes()[2].is_bound());
    }

    #[test]
    fn test_patch_replaces_on_tag_change() {
        let unmounted = Rc::new(Cell::new(false));
        let flag = unmounted.clone();
        let last = VNode::element("span").on_unmount(move |_| {
            flag.set(true);
            Ok(())
        });
        let (doc, container, reconciler) = mounted(&last);
        let old_host = last.host().unwrap();
        let next = VNode::element("em");
        let mut lifecycle = Lifecycle::new();

        reconciler
            .patch_node(&last, &next, &container, &doc, &mut lifecycle)
            .unwrap();

        assert_ne!(next.host(), Some(old_host));
        assert_eq!(container.outer_html(), "<div><em></em></div>");
        assert!(unmounted.get());
    }

    #[test]
    fn test_patch_moves_ownership_between_keys() {
        let first = ComponentId::new(1);
        let second = ComponentId::new(2);
        let last = VNode::element("div").key(first);
        let (doc, container, reconciler) = mounted(&last);
        let next = VNode::element("div").key(second);
        let mut lifecycle = Lifecycle::new();

        reconciler
            .patch_node(&last, &next, &container, &doc, &mut lifecycle)
            .unwrap();

        assert!(reconciler.ownership().get(first).is_none());
        assert_eq!(reconciler.ownership().get(second), next.host());
    }

    #[test]
    fn test_patch_queues_update_hook() {
        let last = VNode::element("div");
        let (doc, container, reconciler) = mounted(&last);
        let updated = Rc::new(Cell::new(0));
        let count = updated.clone();
        let next = VNode::element("div").on_update(move |_| {
            count.set(count.get() + 1);
            Ok(())
        });
        let mut lifecycle = Lifecycle::new();

        reconciler
            .patch_node(&last, &next, &container, &doc, &mut lifecycle)
            .unwrap();
        assert_eq!(updated.get(), 0);

        lifecycle.trigger().unwrap();
        assert_eq!(updated.get(), 1);
    }

    #[test]
    fn test_patch_same_instance_queues_nothing() {
        let updated = Rc::new(Cell::new(0));
        let count = updated.clone();
        let tree = VNode::element("div").on_update(move |_| {
            count.set(count.get() + 1);
            Ok(())
        });
        let (doc, container, reconciler) = mounted(&tree);
        let mut lifecycle = Lifecycle::new();

        reconciler
            .patch_node(&tree, &tree, &container, &doc, &mut lifecycle)
            .unwrap();

        assert!(lifecycle.is_empty());
        assert_eq!(updated.get(), 0);
    }

    #[test]
    fn test_patch_from_unmounted_tree_fails() {
        let doc = Document::new();
        let container = doc.create_element("div");
        let reconciler = HostReconciler::default();
        let mut lifecycle = Lifecycle::new();

        let result = reconciler.patch_node(
            &VNode::text("a"),
            &VNode::text("b"),
            &container,
            &doc,
            &mut lifecycle,
        );
        assert!(result.is_err());
    }
}
