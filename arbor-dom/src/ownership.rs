use crate::host::HostNode;
use crate::vnode::ComponentId;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared map from component identity to the host node it rendered to
///
/// Cloning the handle shares the map. The reconciler writes to it as trees
/// are mounted and torn down; the controller reads it for host lookups.
#[derive(Debug, Clone, Default)]
pub struct NodeOwnership {
    nodes: Rc<RefCell<HashMap<ComponentId, HostNode>>>,
}

impl NodeOwnership {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, id: ComponentId, node: HostNode) -> Option<HostNode> {
        self.nodes.borrow_mut().insert(id, node)
    }

    pub fn get(&self, id: ComponentId) -> Option<HostNode> {
        self.nodes.borrow().get(&id).cloned()
    }

    /// Remove `id` only if it still maps to `node`
    pub fn release(&self, id: ComponentId, node: &HostNode) -> bool {
        let mut nodes = self.nodes.borrow_mut();
        if nodes.get(&id) == Some(node) {
            nodes.remove(&id);
            true
        } else {
            false
        }
    }

    pub fn remove(&self, id: ComponentId) -> Option<HostNode> {
        self.nodes.borrow_mut().remove(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Document;

    #[test]
    fn test_handles_share_map() {
        let doc = Document::new();
        let ownership = NodeOwnership::new();
        let alias = ownership.clone();

        alias.insert(ComponentId::new(1), doc.create_element("div"));
        assert_eq!(ownership.len(), 1);
    }

    #[test]
    fn test_release_ignores_stale_node() {
        let doc = Document::new();
        let ownership = NodeOwnership::new();
        let old = doc.create_element("div");
        let new = doc.create_element("div");
        let id = ComponentId::new(7);

        ownership.insert(id, old.clone());
        ownership.insert(id, new.clone());

        assert!(!ownership.release(id, &old));
        assert_eq!(ownership.get(id), Some(new.clone()));
        assert!(ownership.release(id, &new));
        assert!(ownership.is_empty());
    }
}
