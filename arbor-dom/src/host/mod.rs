//! In-memory host document the controller renders into.

mod classify;
mod node;

pub use classify::is_container;
pub use node::{Document, HostNode, Name, NodeKind, StyleMap};
