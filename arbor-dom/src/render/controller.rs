use super::factory::BoundRenderer;
use super::reconciler::{Reconciler, RenderContext};
use crate::config::RenderConfig;
use crate::error::{ConfigurationError, ConfigurationErrorKind, Result};
use crate::host::{is_container, Document, HostNode};
use crate::lifecycle::Lifecycle;
use crate::observer::RootObserver;
use crate::ownership::NodeOwnership;
use crate::reconcile::HostReconciler;
use crate::root::RootRegistry;
use crate::vnode::{ComponentId, RenderInput, VNode};
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use tracing::{trace, warn};

/// Key accepted by [`RenderController::find_host_node`]
#[derive(Debug, Clone, Copy)]
pub enum HostLookup<'a> {
    Component(ComponentId),
    Node(&'a HostNode),
}

impl From<ComponentId> for HostLookup<'_> {
    fn from(id: ComponentId) -> Self {
        HostLookup::Component(id)
    }
}

impl<'a> From<&'a HostNode> for HostLookup<'a> {
    fn from(node: &'a HostNode) -> Self {
        HostLookup::Node(node)
    }
}

/// Commits trees into containers and tracks one root per container
///
/// Every call to [`RenderController::render`] runs to completion, lifecycle
/// callbacks included, before it returns. The registry is committed before
/// the lifecycle queue is flushed, so a callback that renders into the same
/// container sees the tree that was just committed.
///
/// No registry borrow is held while the reconciler or a callback runs, which
/// makes nested renders from callbacks safe.
pub struct RenderController<R: Reconciler> {
    reconciler: R,
    roots: RefCell<RootRegistry>,
    ownership: NodeOwnership,
    document: Option<Document>,
    observer: Option<Box<dyn RootObserver>>,
    config: RenderConfig,
    context: RenderContext,
}

impl RenderController<HostReconciler> {
    /// Controller rendering into `document` with the built-in reconciler,
    /// sharing one ownership map between the two.
    pub fn for_document(document: Document) -> Self {
        let ownership = NodeOwnership::new();
        Self::new(HostReconciler::new(ownership.clone()))
            .with_ownership(ownership)
            .with_document(document)
    }
}

impl<R: Reconciler> RenderController<R> {
    pub fn new(reconciler: R) -> Self {
        Self {
            reconciler,
            roots: RefCell::new(RootRegistry::new()),
            ownership: NodeOwnership::new(),
            document: None,
            observer: None,
            config: RenderConfig::default(),
            context: RenderContext::new(),
        }
    }

    /// Attach the host document; its body becomes a forbidden container
    pub fn with_document(mut self, document: Document) -> Self {
        self.document = Some(document);
        self
    }

    pub fn with_observer(mut self, observer: impl RootObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Use `ownership` for host lookups. It should be the map the reconciler
    /// writes to.
    pub fn with_ownership(mut self, ownership: NodeOwnership) -> Self {
        self.ownership = ownership;
        self
    }

    pub fn with_context(mut self, context: RenderContext) -> Self {
        self.context = context;
        self
    }

    /// Render `input` into `container`.
    ///
    /// - `NoOp` leaves everything untouched.
    /// - A tree is mounted (or hydrated) on the first render into a
    ///   container and patched against the previous tree afterwards.
    /// - `Empty` unmounts the previous tree and drops the root; without a
    ///   root it does nothing.
    ///
    /// Rendering into the document body always fails. Reconciler and
    /// callback errors are returned as they are.
    pub fn render(&self, input: impl Into<RenderInput>, container: &HostNode) -> Result<()> {
        if self.is_document_body(container) {
            let kind = ConfigurationErrorKind::BodyContainer;
            return Err(ConfigurationError::new(kind, self.config.mode).into());
        }

        let input = match input.into() {
            RenderInput::NoOp => return Ok(()),
            RenderInput::Empty => None,
            RenderInput::Tree(tree) => Some(tree),
        };

        if self.config.warn_on_non_container && !is_container(container) {
            warn!("rendering into {:?}, which is not a valid container", container);
        }

        let previous = self
            .roots
            .borrow()
            .find(container)
            .map(|root| root.tree().clone());

        match (previous, input) {
            (None, Some(tree)) => self.mount_root(tree, container)?,
            (None, None) => trace!("nothing to render into {:?}", container),
            (Some(previous), Some(tree)) => self.update_root(&previous, tree, container)?,
            (Some(previous), None) => self.teardown_root(&previous, container)?,
        }

        self.notify_observer();
        Ok(())
    }

    fn mount_root(&self, tree: VNode, container: &HostNode) -> Result<()> {
        let tree = self.unbound(tree);
        let mut lifecycle = Lifecycle::new();

        if self.reconciler.hydrate_root(&tree, container, &mut lifecycle)? {
            trace!("hydrated existing markup under {:?}", container);
        } else {
            self.reconciler
                .mount(&tree, container, &mut lifecycle, &self.context, false)?;
            trace!("mounted new root under {:?}", container);
        }

        self.commit(container, tree);
        lifecycle.trigger()?;
        Ok(())
    }

    fn update_root(&self, previous: &VNode, tree: VNode, container: &HostNode) -> Result<()> {
        let tree = self.unbound(tree);
        let mut lifecycle = Lifecycle::new();

        self.reconciler.patch(
            previous,
            &tree,
            container,
            &mut lifecycle,
            &self.context,
            false,
            false,
        )?;
        trace!("patched root under {:?}", container);

        self.commit(container, tree);
        lifecycle.trigger()?;
        Ok(())
    }

    fn teardown_root(&self, previous: &VNode, container: &HostNode) -> Result<()> {
        let mut lifecycle = Lifecycle::new();

        self.reconciler
            .unmount(previous, container, &mut lifecycle, false, false, false)?;
        self.roots.borrow_mut().remove(container);
        trace!("removed root under {:?}", container);

        lifecycle.trigger()?;
        Ok(())
    }

    /// Store `tree` as the root of `container`. A root created by a nested
    /// render in the meantime is updated instead of duplicated.
    fn commit(&self, container: &HostNode, tree: VNode) {
        let mut roots = self.roots.borrow_mut();
        if roots.find(container).is_some() {
            roots.replace_tree(container, tree);
        } else {
            roots.insert(container.clone(), tree);
        }
    }

    /// `tree` itself, or a fresh copy when any of its nodes is already bound
    /// or repeated. Reconcilers only ever see trees they can bind freely.
    fn unbound(&self, tree: VNode) -> VNode {
        if tree.reuses_instances() {
            trace!("tree reuses mounted nodes, rendering a copy");
            self.reconciler.clone_tree(&tree)
        } else {
            tree
        }
    }

    fn notify_observer(&self) {
        let Some(observer) = self.observer.as_ref() else {
            return;
        };
        if !observer.is_connected() {
            return;
        }
        let snapshot = self.roots.borrow().snapshot();
        if let Err(e) = observer.roots_changed(&snapshot, self.document.as_ref()) {
            warn!("root observer failed: {:#}", e);
        }
    }

    fn is_document_body(&self, container: &HostNode) -> bool {
        self.document
            .as_ref()
            .and_then(Document::body)
            .is_some_and(|body| body == *container)
    }

    /// Host node for a component key, or the node itself when it is a valid
    /// container
    pub fn find_host_node<'a>(&self, key: impl Into<HostLookup<'a>>) -> Option<HostNode> {
        match key.into() {
            HostLookup::Component(id) => self.ownership.get(id),
            HostLookup::Node(node) => is_container(node).then(|| node.clone()),
        }
    }

    /// Renderer pinned to the first container it is called with
    pub fn create_renderer(self: &Rc<Self>) -> BoundRenderer<R> {
        BoundRenderer::new(Rc::clone(self))
    }

    pub fn registry(&self) -> Ref<'_, RootRegistry> {
        self.roots.borrow()
    }

    pub fn root_count(&self) -> usize {
        self.roots.borrow().len()
    }

    pub fn has_root(&self, container: &HostNode) -> bool {
        self.roots.borrow().find(container).is_some()
    }

    /// Tree currently committed to `container`
    pub fn root_tree(&self, container: &HostNode) -> Option<VNode> {
        self.roots
            .borrow()
            .find(container)
            .map(|root| root.tree().clone())
    }

    pub fn reconciler(&self) -> &R {
        &self.reconciler
    }

    pub fn ownership(&self) -> &NodeOwnership {
        &self.ownership
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }
}
