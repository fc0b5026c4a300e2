use crate::host::Document;
use crate::root::{RegistrySnapshot, RootSnapshot};

/// Inspector notified with the full set of roots after every render
///
/// Notification is best effort: an error returned here is logged by the
/// controller and never fails the render that triggered it.
pub trait RootObserver {
    /// Whether the observer currently wants notifications
    fn is_connected(&self) -> bool {
        true
    }

    fn roots_changed(
        &self,
        roots: &[RootSnapshot],
        document: Option<&Document>,
    ) -> anyhow::Result<()>;
}

/// Emits every registry snapshot as JSON at debug level
#[derive(Debug, Default)]
pub struct TracingObserver;

impl RootObserver for TracingObserver {
    fn roots_changed(
        &self,
        roots: &[RootSnapshot],
        _document: Option<&Document>,
    ) -> anyhow::Result<()> {
        if tracing::event_enabled!(tracing::Level::DEBUG) {
            let payload = serde_json::to_string(&RegistrySnapshot { roots })?;
            tracing::debug!(roots = roots.len(), "{}", payload);
        }
        Ok(())
    }
}
