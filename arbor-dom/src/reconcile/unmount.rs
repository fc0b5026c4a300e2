use super::HostReconciler;
use crate::host::HostNode;
use crate::vnode::VNode;
use anyhow::anyhow;

impl HostReconciler {
    /// Unbind `tree` and its descendants, running unmount hooks children
    /// first and dropping their ownership entries. Host nodes stay where
    /// they are.
    pub(super) fn release(&self, tree: &VNode) -> anyhow::Result<()> {
        for child in tree.child_nodes() {
            self.release(child)?;
        }
        let Some(node) = tree.unbind() else {
            return Ok(());
        };
        if let Some(key) = tree.component_key() {
            self.ownership.release(key, &node);
        }
        if let Some(hook) = &tree.hooks().on_unmount {
            hook(&node)?;
        }
        Ok(())
    }

    pub(super) fn unmount_from(&self, tree: &VNode, container: &HostNode) -> anyhow::Result<()> {
        let node = tree
            .host()
            .ok_or_else(|| anyhow!("cannot unmount a tree that is not mounted"))?;
        self.release(tree)?;
        if !container.remove_child(&node) {
            tracing::warn!("{:?} was no longer attached to {:?}", node, container);
        }
        Ok(())
    }
}
