use smallvec::SmallVec;
use std::fmt;

/// Post-commit callback queued during mount or patch
pub type Listener = Box<dyn FnOnce() -> anyhow::Result<()>>;

/// FIFO queue of post-commit callbacks for one render pass
///
/// A queue is created for every render call, lent to the reconciler while
/// the tree is committed, then consumed by [`Lifecycle::trigger`]. It cannot
/// be triggered twice.
pub struct Lifecycle {
    listeners: SmallVec<[Listener; 4]>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            listeners: SmallVec::new(),
        }
    }

    /// Push a callback to the back of the queue
    pub fn add_listener(&mut self, listener: impl FnOnce() -> anyhow::Result<()> + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Run every callback once, in registration order.
    ///
    /// Stops at the first failing callback and returns its error; callbacks
    /// queued after it are dropped without running.
    pub fn trigger(self) -> anyhow::Result<()> {
        for listener in self.listeners {
            listener()?;
        }
        Ok(())
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lifecycle")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
