use smartstring::{LazyCompact, SmartString};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

/// Short inline string used for tags, attribute names and style properties
pub type Name = SmartString<LazyCompact>;

/// Style property bag carried by elements that live in a document
pub type StyleMap = BTreeMap<Name, Name>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    Document,
}

struct NodeData {
    kind: NodeKind,
    tag: Name,
    text: String,
    attrs: BTreeMap<Name, String>,
    style: Option<StyleMap>,
    owner: Weak<RefCell<NodeData>>,
    parent: Weak<RefCell<NodeData>>,
    children: Vec<HostNode>,
}

impl NodeData {
    fn new(
        kind: NodeKind,
        tag: &str,
        owner: Weak<RefCell<NodeData>>,
        style: Option<StyleMap>,
    ) -> Self {
        Self {
            kind,
            tag: Name::from(tag),
            text: String::new(),
            attrs: BTreeMap::new(),
            style,
            owner,
            parent: Weak::new(),
            children: Vec::new(),
        }
    }
}

/// Handle to a node of the host document
///
/// Cloning the handle does not copy the node. Equality and hashing are by
/// identity, so two handles compare equal only when they point at the same
/// node.
#[derive(Clone)]
pub struct HostNode(Rc<RefCell<NodeData>>);

impl HostNode {
    fn from_data(data: NodeData) -> Self {
        Self(Rc::new(RefCell::new(data)))
    }

    /// Create an element that belongs to no document.
    ///
    /// Detached elements have neither a style bag nor an owning document and
    /// are therefore never valid render containers.
    pub fn detached_element(tag: &str) -> Self {
        Self::from_data(NodeData::new(NodeKind::Element, tag, Weak::new(), None))
    }

    pub fn kind(&self) -> NodeKind {
        self.0.borrow().kind
    }

    pub fn tag(&self) -> Name {
        self.0.borrow().tag.clone()
    }

    /// Character data of a text node (empty for other kinds)
    pub fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    pub fn set_text(&self, text: &str) {
        let mut data = self.0.borrow_mut();
        data.text.clear();
        data.text.push_str(text);
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.0.borrow().attrs.get(name).cloned()
    }

    pub fn set_attr(&self, name: &str, value: &str) {
        self.0
            .borrow_mut()
            .attrs
            .insert(Name::from(name), value.to_string());
    }

    pub fn remove_attr(&self, name: &str) -> Option<String> {
        self.0.borrow_mut().attrs.remove(name)
    }

    pub fn attrs(&self) -> Vec<(Name, String)> {
        self.0
            .borrow()
            .attrs
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn has_style_bag(&self) -> bool {
        self.0.borrow().style.is_some()
    }

    pub fn style(&self, property: &str) -> Option<Name> {
        self.0.borrow().style.as_ref()?.get(property).cloned()
    }

    /// Set a style property. Returns false when the node has no style bag.
    pub fn set_style(&self, property: &str, value: &str) -> bool {
        match self.0.borrow_mut().style.as_mut() {
            Some(style) => {
                style.insert(Name::from(property), Name::from(value));
                true
            }
            None => false,
        }
    }

    /// The document this node was created by, if it is still alive
    pub fn owner_document(&self) -> Option<Document> {
        let owner = self.0.borrow().owner.upgrade()?;
        Some(Document {
            node: HostNode(owner),
        })
    }

    pub fn parent(&self) -> Option<HostNode> {
        self.0.borrow().parent.upgrade().map(HostNode)
    }

    pub fn children(&self) -> Vec<HostNode> {
        self.0.borrow().children.clone()
    }

    pub fn child_count(&self) -> usize {
        self.0.borrow().children.len()
    }

    pub fn first_child(&self) -> Option<HostNode> {
        self.0.borrow().children.first().cloned()
    }

    pub fn child_at(&self, index: usize) -> Option<HostNode> {
        self.0.borrow().children.get(index).cloned()
    }

    /// Append `child`, moving it out of its current parent first
    pub fn append_child(&self, child: &HostNode) {
        child.detach();
        self.0.borrow_mut().children.push(child.clone());
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
    }

    /// Remove `child` from this node. Returns false if it was not a child.
    pub fn remove_child(&self, child: &HostNode) -> bool {
        let removed = {
            let mut data = self.0.borrow_mut();
            let before = data.children.len();
            data.children.retain(|c| !c.ptr_eq(child));
            data.children.len() != before
        };
        if removed {
            child.0.borrow_mut().parent = Weak::new();
        }
        removed
    }

    /// Put `new_child` where `old_child` currently is
    pub fn replace_child(&self, new_child: &HostNode, old_child: &HostNode) -> bool {
        new_child.detach();
        let replaced = {
            let mut data = self.0.borrow_mut();
            match data.children.iter().position(|c| c.ptr_eq(old_child)) {
                Some(index) => {
                    data.children[index] = new_child.clone();
                    true
                }
                None => false,
            }
        };
        if replaced {
            old_child.0.borrow_mut().parent = Weak::new();
            new_child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        }
        replaced
    }

    pub fn clear_children(&self) {
        let children = std::mem::take(&mut self.0.borrow_mut().children);
        for child in children {
            child.0.borrow_mut().parent = Weak::new();
        }
    }

    /// Concatenated text of this node and all of its descendants
    pub fn text_content(&self) -> String {
        let data = self.0.borrow();
        match data.kind {
            NodeKind::Text => data.text.clone(),
            _ => data.children.iter().map(HostNode::text_content).collect(),
        }
    }

    /// Serialize the subtree as markup
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let data = self.0.borrow();
        match data.kind {
            NodeKind::Text => out.push_str(&data.text),
            NodeKind::Document => {
                for child in &data.children {
                    child.write_html(out);
                }
            }
            NodeKind::Element => {
                out.push('<');
                out.push_str(&data.tag);
                for (name, value) in &data.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(value);
                    out.push('"');
                }
                out.push('>');
                for child in &data.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(&data.tag);
                out.push('>');
            }
        }
    }

    pub fn ptr_eq(&self, other: &HostNode) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn detach(&self) {
        if let Some(parent) = self.parent() {
            parent.0.borrow_mut().children.retain(|c| !c.ptr_eq(self));
        }
        self.0.borrow_mut().parent = Weak::new();
    }
}

impl PartialEq for HostNode {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for HostNode {}

impl Hash for HostNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Rc::as_ptr(&self.0).hash(state);
    }
}

impl fmt::Debug for HostNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        match data.kind {
            NodeKind::Text => write!(f, "Text({:?})", data.text),
            NodeKind::Document => write!(f, "Document@{:p}", Rc::as_ptr(&self.0)),
            NodeKind::Element => write!(f, "<{}>@{:p}", data.tag, Rc::as_ptr(&self.0)),
        }
    }
}

/// In-memory host document with an `<html><body>` skeleton
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    node: HostNode,
}

impl Document {
    pub fn new() -> Self {
        let document = Self {
            node: HostNode::from_data(NodeData::new(
                NodeKind::Document,
                "#document",
                Weak::new(),
                None,
            )),
        };
        let html = document.create_element("html");
        html.append_child(&document.create_element("body"));
        document.node.append_child(&html);
        document
    }

    /// The document node itself
    pub fn node(&self) -> &HostNode {
        &self.node
    }

    pub fn body(&self) -> Option<HostNode> {
        let html = self.node.first_child()?;
        html.children()
            .into_iter()
            .find(|child| child.kind() == NodeKind::Element && child.tag().as_str() == "body")
    }

    pub fn create_element(&self, tag: &str) -> HostNode {
        HostNode::from_data(NodeData::new(
            NodeKind::Element,
            tag,
            Rc::downgrade(&self.node.0),
            Some(StyleMap::new()),
        ))
    }

    pub fn create_text_node(&self, text: &str) -> HostNode {
        let node = HostNode::from_data(NodeData::new(
            NodeKind::Text,
            "#text",
            Rc::downgrade(&self.node.0),
            None,
        ));
        node.set_text(text);
        node
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
