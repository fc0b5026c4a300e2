//! Reference implementation of the tree algorithms over the in-memory host
//! document.
//!
//! Children are diffed by position only: a patch updates the common prefix
//! in place, mounts extra trailing children and removes leftover ones.
//! Keyed moves are not detected.

mod hydrate;
mod mount;
mod patch;
mod unmount;

use crate::host::{Document, HostNode, NodeKind};
use crate::lifecycle::Lifecycle;
use crate::ownership::NodeOwnership;
use crate::render::{Reconciler, RenderContext};
use crate::vnode::{Hook, VNode};
use anyhow::anyhow;

/// Reconciler writing straight into the host document
#[derive(Debug, Clone, Default)]
pub struct HostReconciler {
    ownership: NodeOwnership,
}

impl HostReconciler {
    pub fn new(ownership: NodeOwnership) -> Self {
        Self { ownership }
    }

    pub fn ownership(&self) -> &NodeOwnership {
        &self.ownership
    }

    fn track(&self, tree: &VNode, node: &HostNode) {
        if let Some(key) = tree.component_key() {
            self.ownership.insert(key, node.clone());
        }
    }
}

impl Reconciler for HostReconciler {
    fn mount(
        &self,
        tree: &VNode,
        container: &HostNode,
        lifecycle: &mut Lifecycle,
        _context: &RenderContext,
        _is_svg: bool,
    ) -> anyhow::Result<()> {
        let document = document_of(container)?;
        self.mount_into(tree, container, &document, lifecycle);
        Ok(())
    }

    fn patch(
        &self,
        last: &VNode,
        next: &VNode,
        container: &HostNode,
        lifecycle: &mut Lifecycle,
        _context: &RenderContext,
        _is_svg: bool,
        _is_recycling: bool,
    ) -> anyhow::Result<()> {
        let document = document_of(container)?;
        self.patch_node(last, next, container, &document, lifecycle)
    }

    fn unmount(
        &self,
        tree: &VNode,
        container: &HostNode,
        _lifecycle: &mut Lifecycle,
        _can_recycle: bool,
        _is_svg: bool,
        _is_root: bool,
    ) -> anyhow::Result<()> {
        self.unmount_from(tree, container)
    }

    fn hydrate_root(
        &self,
        tree: &VNode,
        container: &HostNode,
        lifecycle: &mut Lifecycle,
    ) -> anyhow::Result<bool> {
        Ok(self.hydrate_into(tree, container, lifecycle))
    }
}

fn document_of(container: &HostNode) -> anyhow::Result<Document> {
    if container.kind() != NodeKind::Element {
        return Err(anyhow!("cannot render into {:?}: not an element", container));
    }
    container
        .owner_document()
        .ok_or_else(|| anyhow!("cannot render into {:?}: it belongs to no document", container))
}

fn queue_hook(lifecycle: &mut Lifecycle, hook: Option<&Hook>, node: &HostNode) {
    if let Some(hook) = hook {
        let hook = hook.clone();
        let node = node.clone();
        lifecycle.add_listener(move || hook(&node));
    }
}
