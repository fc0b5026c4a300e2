use super::controller::RenderController;
use super::reconciler::Reconciler;
use crate::error::{ConfigurationError, ConfigurationErrorKind, Result};
use crate::host::HostNode;
use crate::vnode::RenderInput;
use std::cell::RefCell;
use std::rc::Rc;

/// Render function bound to one container
///
/// The first container passed to [`BoundRenderer::render`] is pinned; every
/// later call renders into it whatever container argument it receives.
pub struct BoundRenderer<R: Reconciler> {
    controller: Rc<RenderController<R>>,
    container: RefCell<Option<HostNode>>,
}

impl<R: Reconciler> BoundRenderer<R> {
    pub(crate) fn new(controller: Rc<RenderController<R>>) -> Self {
        Self {
            controller,
            container: RefCell::new(None),
        }
    }

    pub fn render(&self, first: Option<&HostNode>, next: impl Into<RenderInput>) -> Result<()> {
        let container = {
            let mut pinned = self.container.borrow_mut();
            if pinned.is_none() {
                *pinned = first.cloned();
            }
            pinned.clone()
        };
        let container = container.ok_or_else(|| {
            ConfigurationError::new(
                ConfigurationErrorKind::MissingContainer,
                self.controller.config().mode,
            )
        })?;
        self.controller.render(next, &container)
    }

    /// The pinned container, if any call has provided one yet
    pub fn container(&self) -> Option<HostNode> {
        self.container.borrow().clone()
    }

    pub fn controller(&self) -> &Rc<RenderController<R>> {
        &self.controller
    }
}
