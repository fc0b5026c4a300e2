//! Root render controller for a virtual-DOM UI layer.
//!
//! [`RenderController`] keeps one root per container and decides, for every
//! render, whether to mount, hydrate, patch or tear down. The tree work
//! itself sits behind the [`Reconciler`] trait; [`HostReconciler`] is the
//! built-in implementation over the in-memory [`host`] document.

pub mod config;
pub mod error;
pub mod host;
pub mod lifecycle;
mod logging;
pub mod observer;
pub mod ownership;
pub mod reconcile;
pub mod render;
pub mod root;
pub mod vnode;

#[cfg(test)]
mod test_utils;

pub use config::{BuildMode, RenderConfig};
pub use error::{ConfigurationError, ConfigurationErrorKind, RenderError, Result};
pub use host::{is_container, Document, HostNode};
pub use lifecycle::Lifecycle;
pub use logging::init_logging;
pub use observer::{RootObserver, TracingObserver};
pub use ownership::NodeOwnership;
pub use reconcile::HostReconciler;
pub use render::{BoundRenderer, HostLookup, Reconciler, RenderContext, RenderController};
pub use vnode::{ComponentId, RenderInput, VNode};
