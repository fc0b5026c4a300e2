use crate::host::HostNode;
use crate::vnode::VNode;

use super::snapshot::{ContainerSnapshot, RootSnapshot, TreeSnapshot};

/// One active binding between a container and its committed tree
#[derive(Debug, Clone)]
pub struct Root {
    container: HostNode,
    tree: VNode,
}

impl Root {
    pub fn container(&self) -> &HostNode {
        &self.container
    }

    pub fn tree(&self) -> &VNode {
        &self.tree
    }

    pub fn snapshot(&self) -> RootSnapshot {
        RootSnapshot {
            container: ContainerSnapshot::of(&self.container),
            tree: TreeSnapshot::of(&self.tree),
        }
    }
}

/// Ordered list of active roots, keyed by container identity
///
/// Pages hold few roots, so lookups scan a `Vec` instead of hashing.
/// Uniqueness per container is the caller's job: check [`RootRegistry::find`]
/// before [`RootRegistry::insert`].
#[derive(Debug, Default)]
pub struct RootRegistry {
    roots: Vec<Root>,
}

impl RootRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, container: &HostNode) -> Option<&Root> {
        self.roots.iter().find(|root| root.container.ptr_eq(container))
    }

    pub fn insert(&mut self, container: HostNode, tree: VNode) {
        self.roots.push(Root { container, tree });
    }

    /// Swap in a newly committed tree. Returns the previous tree.
    pub fn replace_tree(&mut self, container: &HostNode, tree: VNode) -> Option<VNode> {
        let root = self
            .roots
            .iter_mut()
            .find(|root| root.container.ptr_eq(container))?;
        Some(std::mem::replace(&mut root.tree, tree))
    }

    /// Remove the root owning `container`; a miss is a no-op
    pub fn remove(&mut self, container: &HostNode) -> Option<Root> {
        let index = self
            .roots
            .iter()
            .position(|root| root.container.ptr_eq(container))?;
        Some(self.roots.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Root> {
        self.roots.iter()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn snapshot(&self) -> Vec<RootSnapshot> {
        self.roots.iter().map(Root::snapshot).collect()
    }
}
