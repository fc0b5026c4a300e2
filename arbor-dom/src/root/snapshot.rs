use crate::host::{HostNode, NodeKind};
use crate::vnode::{VNode, VNodeKind};
use serde::Serialize;
use std::collections::BTreeMap;

/// Serializable view of one root, handed to observers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RootSnapshot {
    pub container: ContainerSnapshot,
    pub tree: TreeSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerSnapshot {
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub child_count: usize,
}

impl ContainerSnapshot {
    pub fn of(node: &HostNode) -> Self {
        let tag = match node.kind() {
            NodeKind::Element => node.tag().to_string(),
            NodeKind::Text => "#text".to_string(),
            NodeKind::Document => "#document".to_string(),
        };
        Self {
            tag,
            id: node.attr("id"),
            child_count: node.child_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeSnapshot {
    Element {
        tag: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        key: Option<u32>,
        attrs: BTreeMap<String, String>,
        children: Vec<TreeSnapshot>,
        bound: bool,
    },
    Text {
        text: String,
        bound: bool,
    },
}

impl TreeSnapshot {
    pub fn of(tree: &VNode) -> Self {
        match tree.kind() {
            VNodeKind::Element {
                tag,
                attrs,
                children,
            } => TreeSnapshot::Element {
                tag: tag.to_string(),
                key: tree.component_key().map(|k| k.get()),
                attrs: attrs
                    .iter()
                    .map(|(name, value)| (name.to_string(), value.clone()))
                    .collect(),
                children: children.iter().map(TreeSnapshot::of).collect(),
                bound: tree.is_bound(),
            },
            VNodeKind::Text(text) => TreeSnapshot::Text {
                text: text.clone(),
                bound: tree.is_bound(),
            },
        }
    }
}

/// Serialized form of the whole registry
#[derive(Debug, Serialize)]
pub struct RegistrySnapshot<'a> {
    pub roots: &'a [RootSnapshot],
}
