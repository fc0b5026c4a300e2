mod controller;
mod factory;
mod reconciler;

pub use controller::{HostLookup, RenderController};
pub use factory::BoundRenderer;
pub use reconciler::{Reconciler, RenderContext};
