use crate::host::HostNode;
use crate::lifecycle::Lifecycle;
use crate::render::{Reconciler, RenderContext};
use crate::vnode::VNode;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilerCall {
    Hydrate,
    Mount,
    Patch,
    Unmount,
}

type AfterMount = Rc<dyn Fn() -> anyhow::Result<()>>;

/// Test reconciler that records the calls it receives instead of touching
/// host nodes
#[derive(Default)]
pub struct RecordingReconciler {
    calls: RefCell<Vec<ReconcilerCall>>,
    trees: RefCell<Vec<VNode>>,
    log: Rc<RefCell<Vec<String>>>,
    hydrates: Cell<bool>,
    listeners_per_call: Cell<usize>,
    failing: Cell<Option<ReconcilerCall>>,
    failing_listener: Cell<bool>,
    after_mount: RefCell<Option<AfterMount>>,
}

impl RecordingReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<ReconcilerCall> {
        self.calls.borrow().clone()
    }

    /// Trees handed to hydrate, mount and patch, in call order
    pub fn trees(&self) -> Vec<VNode> {
        self.trees.borrow().clone()
    }

    /// Calls and lifecycle listeners in the order they ran
    pub fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    pub fn set_hydrates(&self, hydrates: bool) {
        self.hydrates.set(hydrates);
    }

    pub fn set_listeners_per_call(&self, count: usize) {
        self.listeners_per_call.set(count);
    }

    pub fn fail_on(&self, call: ReconcilerCall) {
        self.failing.set(Some(call));
    }

    pub fn set_failing_listener(&self, fail: bool) {
        self.failing_listener.set(fail);
    }

    /// Queue `callback` as a lifecycle listener after every mount
    pub fn set_after_mount(&self, callback: impl Fn() -> anyhow::Result<()> + 'static) {
        *self.after_mount.borrow_mut() = Some(Rc::new(callback));
    }

    fn record(&self, call: ReconcilerCall, tree: Option<&VNode>) -> anyhow::Result<()> {
        self.calls.borrow_mut().push(call);
        if let Some(tree) = tree {
            self.trees.borrow_mut().push(tree.clone());
        }
        if self.failing.get() == Some(call) {
            anyhow::bail!("{:?} failed", call);
        }
        self.log
            .borrow_mut()
            .push(format!("{:?}", call).to_ascii_lowercase());
        Ok(())
    }

    fn queue_listeners(&self, name: &str, lifecycle: &mut Lifecycle) {
        for i in 0..self.listeners_per_call.get() {
            let log = self.log.clone();
            let entry = format!("{} listener {}", name, i);
            lifecycle.add_listener(move || {
                log.borrow_mut().push(entry);
                Ok(())
            });
        }
        if self.failing_listener.get() {
            lifecycle.add_listener(|| anyhow::bail!("listener failed"));
        }
    }
}

impl Reconciler for RecordingReconciler {
    fn mount(
        &self,
        tree: &VNode,
        _container: &HostNode,
        lifecycle: &mut Lifecycle,
        _context: &RenderContext,
        _is_svg: bool,
    ) -> anyhow::Result<()> {
        self.record(ReconcilerCall::Mount, Some(tree))?;
        tree.bind(HostNode::detached_element("recorded"));
        self.queue_listeners("mount", lifecycle);
        if let Some(callback) = self.after_mount.borrow().clone() {
            lifecycle.add_listener(move || callback());
        }
        Ok(())
    }

    fn patch(
        &self,
        last: &VNode,
        next: &VNode,
        _container: &HostNode,
        lifecycle: &mut Lifecycle,
        _context: &RenderContext,
        _is_svg: bool,
        _is_recycling: bool,
    ) -> anyhow::Result<()> {
        self.record(ReconcilerCall::Patch, Some(next))?;
        next.bind(
            last.host()
                .unwrap_or_else(|| HostNode::detached_element("recorded")),
        );
        self.queue_listeners("patch", lifecycle);
        Ok(())
    }

    fn unmount(
        &self,
        tree: &VNode,
        _container: &HostNode,
        _lifecycle: &mut Lifecycle,
        _can_recycle: bool,
        _is_svg: bool,
        _is_root: bool,
    ) -> anyhow::Result<()> {
        self.record(ReconcilerCall::Unmount, None)?;
        tree.unbind();
        Ok(())
    }

    fn hydrate_root(
        &self,
        tree: &VNode,
        _container: &HostNode,
        _lifecycle: &mut Lifecycle,
    ) -> anyhow::Result<bool> {
        self.record(ReconcilerCall::Hydrate, Some(tree))?;
        if self.hydrates.get() {
            tree.bind(HostNode::detached_element("recorded"));
        }
        Ok(self.hydrates.get())
    }
}
