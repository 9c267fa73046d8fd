//! Readiness resolved from outside the loader.
//!
//! `deferred()` splits readiness into a loader half, which the bootstrapper
//! awaits, and a handle half, which whoever performs the real work settles.
//! The handle settles once (it is consumed), and the loader waits as long as
//! it takes.

use super::{ModuleLoader, ReadyModule};
use crate::errors::{ModbootError, ModbootResult};
use async_trait::async_trait;
use tokio::sync::oneshot;

const DEFAULT_NAME: &str = "deferred";

/// Create a connected loader/handle pair.
pub fn deferred<M>() -> (DeferredLoader<M>, ReadinessHandle<M>)
where
    M: ReadyModule + 'static,
{
    let (tx, rx) = oneshot::channel();
    (
        DeferredLoader {
            name: DEFAULT_NAME.to_string(),
            rx,
        },
        ReadinessHandle { tx },
    )
}

/// Loader half of [`deferred`].
pub struct DeferredLoader<M> {
    name: String,
    rx: oneshot::Receiver<ModbootResult<M>>,
}

impl<M> DeferredLoader<M> {
    /// Set the name reported in progress markers.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

#[async_trait]
impl<M> ModuleLoader for DeferredLoader<M>
where
    M: ReadyModule + 'static,
{
    type Module = M;

    async fn ready(self) -> ModbootResult<M> {
        match self.rx.await {
            Ok(outcome) => outcome,
            Err(_) => Err(ModbootError::Load(format!(
                "readiness handle for '{}' dropped before settling",
                self.name
            ))),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Handle half of [`deferred`]. Settles the paired loader exactly once.
pub struct ReadinessHandle<M> {
    tx: oneshot::Sender<ModbootResult<M>>,
}

impl<M> ReadinessHandle<M> {
    /// Report the module as ready.
    pub fn resolve(self, module: M) {
        self.settle(Ok(module));
    }

    /// Report that the module failed to load. The error reaches the waiter unchanged.
    pub fn reject(self, error: ModbootError) {
        self.settle(Err(error));
    }

    fn settle(self, outcome: ModbootResult<M>) {
        // The waiter may already be gone; nothing is owed to it then.
        if self.tx.send(outcome).is_err() {
            tracing::debug!("Readiness settled after the loader was dropped");
        }
    }
}
