use crate::host::HostNode;
use crate::lifecycle::Lifecycle;
use crate::vnode::VNode;
use std::collections::HashMap;

/// Values passed down to every node during mount and patch
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    values: HashMap<String, serde_json::Value>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.values.insert(key.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Tree algorithms the render controller delegates to
///
/// Implementations create, diff and remove host nodes. They may queue
/// callbacks on the lifecycle they are given; the controller flushes it once
/// the call returns. Errors are passed to the render caller untouched.
///
/// Trees handed to `mount`, `patch` (as `next`) and `hydrate_root` never
/// contain a bound node or the same instance twice; the controller copies
/// them first.
///
/// Methods take `&self` so a lifecycle callback can re-enter the controller
/// while nothing is borrowed.
pub trait Reconciler {
    /// Create host nodes for `tree` under `container`
    fn mount(
        &self,
        tree: &VNode,
        container: &HostNode,
        lifecycle: &mut Lifecycle,
        context: &RenderContext,
        is_svg: bool,
    ) -> anyhow::Result<()>;

    /// Bring the host nodes of `last` in line with `next`, in place
    #[allow(clippy::too_many_arguments)]
    fn patch(
        &self,
        last: &VNode,
        next: &VNode,
        container: &HostNode,
        lifecycle: &mut Lifecycle,
        context: &RenderContext,
        is_svg: bool,
        is_recycling: bool,
    ) -> anyhow::Result<()>;

    /// Tear down the host nodes of `tree`
    fn unmount(
        &self,
        tree: &VNode,
        container: &HostNode,
        lifecycle: &mut Lifecycle,
        can_recycle: bool,
        is_svg: bool,
        is_root: bool,
    ) -> anyhow::Result<()>;

    /// Adopt markup already under `container`. Returns false when there is
    /// nothing to adopt, in which case the controller mounts instead.
    fn hydrate_root(
        &self,
        tree: &VNode,
        container: &HostNode,
        lifecycle: &mut Lifecycle,
    ) -> anyhow::Result<bool>;

    /// Unbound copy of a tree that is already mounted somewhere
    fn clone_tree(&self, tree: &VNode) -> VNode {
        tree.clone_unbound()
    }
}
