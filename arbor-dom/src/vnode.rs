use crate::host::{HostNode, Name};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

/// Identity of a component whose output is tracked in the ownership map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub(crate) u32);

impl ComponentId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

/// Callback invoked with the host node a tree is bound to
pub type Hook = Rc<dyn Fn(&HostNode) -> anyhow::Result<()>>;

#[derive(Clone, Default)]
pub struct Hooks {
    pub on_mount: Option<Hook>,
    pub on_update: Option<Hook>,
    pub on_unmount: Option<Hook>,
}

impl Hooks {
    fn is_empty(&self) -> bool {
        self.on_mount.is_none() && self.on_update.is_none() && self.on_unmount.is_none()
    }
}

pub type Attrs = SmallVec<[(Name, String); 4]>;

#[derive(Clone)]
pub enum VNodeKind {
    Element {
        tag: Name,
        attrs: Attrs,
        children: Vec<VNode>,
    },
    Text(String),
}

#[derive(Clone)]
struct VNodeData {
    kind: VNodeKind,
    key: Option<ComponentId>,
    hooks: Hooks,
    host: RefCell<Option<HostNode>>,
}

/// Logical UI tree handed to the render controller
///
/// A `VNode` is a shared handle: cloning it yields the same instance, and
/// [`VNode::ptr_eq`] tells instances apart. The description is immutable
/// once built; the only state that changes is the host binding written by
/// the reconciler when the tree is mounted, patched or unmounted.
#[derive(Clone)]
pub struct VNode(Rc<VNodeData>);

impl VNode {
    fn from_kind(kind: VNodeKind) -> Self {
        Self(Rc::new(VNodeData {
            kind,
            key: None,
            hooks: Hooks::default(),
            host: RefCell::new(None),
        }))
    }

    pub fn element(tag: &str) -> Self {
        Self::from_kind(VNodeKind::Element {
            tag: Name::from(tag),
            attrs: Attrs::new(),
            children: Vec::new(),
        })
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::from_kind(VNodeKind::Text(text.into()))
    }

    /// Builder: set an attribute (no effect on text nodes)
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        if let VNodeKind::Element { attrs, .. } = &mut Rc::make_mut(&mut self.0).kind {
            let value = value.into();
            match attrs.iter_mut().find(|(n, _)| n.as_str() == name) {
                Some(slot) => slot.1 = value,
                None => attrs.push((Name::from(name), value)),
            }
        }
        self
    }

    /// Builder: append a child (no effect on text nodes)
    pub fn child(mut self, child: VNode) -> Self {
        if let VNodeKind::Element { children, .. } = &mut Rc::make_mut(&mut self.0).kind {
            children.push(child);
        }
        self
    }

    pub fn children(mut self, iter: impl IntoIterator<Item = VNode>) -> Self {
        if let VNodeKind::Element { children, .. } = &mut Rc::make_mut(&mut self.0).kind {
            children.extend(iter);
        }
        self
    }

    /// Builder: record this node's host in the ownership map under `key`
    pub fn key(mut self, key: ComponentId) -> Self {
        Rc::make_mut(&mut self.0).key = Some(key);
        self
    }

    pub fn on_mount(mut self, hook: impl Fn(&HostNode) -> anyhow::Result<()> + 'static) -> Self {
        Rc::make_mut(&mut self.0).hooks.on_mount = Some(Rc::new(hook));
        self
    }

    pub fn on_update(mut self, hook: impl Fn(&HostNode) -> anyhow::Result<()> + 'static) -> Self {
        Rc::make_mut(&mut self.0).hooks.on_update = Some(Rc::new(hook));
        self
    }

    pub fn on_unmount(mut self, hook: impl Fn(&HostNode) -> anyhow::Result<()> + 'static) -> Self {
        Rc::make_mut(&mut self.0).hooks.on_unmount = Some(Rc::new(hook));
        self
    }

    pub fn kind(&self) -> &VNodeKind {
        &self.0.kind
    }

    pub fn tag(&self) -> Option<&str> {
        match &self.0.kind {
            VNodeKind::Element { tag, .. } => Some(tag.as_str()),
            VNodeKind::Text(_) => None,
        }
    }

    pub fn child_nodes(&self) -> &[VNode] {
        match &self.0.kind {
            VNodeKind::Element { children, .. } => children,
            VNodeKind::Text(_) => &[],
        }
    }

    pub fn attrs(&self) -> &[(Name, String)] {
        match &self.0.kind {
            VNodeKind::Element { attrs, .. } => attrs,
            VNodeKind::Text(_) => &[],
        }
    }

    pub fn component_key(&self) -> Option<ComponentId> {
        self.0.key
    }

    pub fn hooks(&self) -> &Hooks {
        &self.0.hooks
    }

    /// The host node this tree is currently bound to
    pub fn host(&self) -> Option<HostNode> {
        self.0.host.borrow().clone()
    }

    pub fn is_bound(&self) -> bool {
        self.0.host.borrow().is_some()
    }

    /// Whether mounting this tree as is would alias host bindings: some node
    /// in it is already bound, or one instance appears at two positions.
    pub fn reuses_instances(&self) -> bool {
        let mut seen = HashSet::new();
        self.find_reuse(&mut seen)
    }

    fn find_reuse(&self, seen: &mut HashSet<*const VNodeData>) -> bool {
        if self.is_bound() || !seen.insert(Rc::as_ptr(&self.0)) {
            return true;
        }
        self.child_nodes().iter().any(|child| child.find_reuse(seen))
    }

    pub fn bind(&self, node: HostNode) {
        *self.0.host.borrow_mut() = Some(node);
    }

    pub fn unbind(&self) -> Option<HostNode> {
        self.0.host.borrow_mut().take()
    }

    /// Deep copy of the description with every level unbound.
    ///
    /// The copy shares no host binding with `self`, so it can be mounted
    /// somewhere else without aliasing the original's host nodes.
    pub fn clone_unbound(&self) -> VNode {
        let kind = match &self.0.kind {
            VNodeKind::Element {
                tag,
                attrs,
                children,
            } => VNodeKind::Element {
                tag: tag.clone(),
                attrs: attrs.clone(),
                children: children.iter().map(VNode::clone_unbound).collect(),
            },
            VNodeKind::Text(text) => VNodeKind::Text(text.clone()),
        };
        VNode(Rc::new(VNodeData {
            kind,
            key: self.0.key,
            hooks: self.0.hooks.clone(),
            host: RefCell::new(None),
        }))
    }

    /// Whether `self` and `other` are the same instance
    pub fn ptr_eq(&self, other: &VNode) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for VNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.kind {
            VNodeKind::Text(text) => write!(f, "VText({:?})", text),
            VNodeKind::Element {
                tag,
                attrs,
                children,
            } => {
                let mut s = f.debug_struct("VElement");
                s.field("tag", &tag.as_str())
                    .field("attrs", attrs)
                    .field("children", children);
                if let Some(key) = self.0.key {
                    s.field("key", &key);
                }
                if !self.0.hooks.is_empty() {
                    s.field("hooks", &"..");
                }
                s.field("bound", &self.is_bound()).finish()
            }
        }
    }
}

/// What a caller asks the controller to render
#[derive(Debug, Clone)]
pub enum RenderInput {
    /// Sentinel: leave the container untouched
    NoOp,
    /// No tree. Tears down an existing root, otherwise does nothing.
    Empty,
    Tree(VNode),
}

impl From<VNode> for RenderInput {
    fn from(tree: VNode) -> Self {
        RenderInput::Tree(tree)
    }
}

impl From<Option<VNode>> for RenderInput {
    fn from(tree: Option<VNode>) -> Self {
        tree.map_or(RenderInput::Empty, RenderInput::Tree)
    }
}
