//! Module activation.
//!
//! ## Sequence
//!
//! ```text
//! run()  ── marker: Requested ──→ loader.ready()     (synchronous)
//!   .await                                          (single suspension point)
//!        ── marker: Ready ──────→ module.start()     (exactly once)
//! ```
//!
//! Failures from either collaborator are returned unchanged. Nothing is
//! retried, nothing is rolled back, and no state survives the run.

mod observer;
mod sequence;

pub use observer::{MarkerLog, ProgressMarker, ProgressObserver, TracingObserver};
pub use sequence::{InitSequence, Milestone};

use crate::errors::ModbootResult;
use crate::module::{ModuleLoader, ReadyModule};
use futures::FutureExt;
use futures::future::BoxFuture;

/// Drives one module from requested to started.
///
/// # Example
///
/// ```ignore
/// let loader = DylibLoader::from_options(&BootOptions::for_executable()?)?;
/// Bootstrapper::new(loader).run().await?;
/// ```
pub struct Bootstrapper<L, O = TracingObserver> {
    loader: L,
    observer: O,
}

impl<L> Bootstrapper<L, TracingObserver>
where
    L: ModuleLoader + 'static,
{
    pub fn new(loader: L) -> Self {
        Self::with_observer(loader, TracingObserver)
    }
}

impl<L, O> Bootstrapper<L, O>
where
    L: ModuleLoader + 'static,
    O: ProgressObserver + 'static,
{
    pub fn with_observer(loader: L, observer: O) -> Self {
        Self { loader, observer }
    }

    /// Start the initialization sequence.
    ///
    /// The `Requested` marker is emitted and readiness is requested before this
    /// returns. The returned future waits for readiness with no timeout, then
    /// emits `Ready` and invokes the entry point once.
    pub fn run(self) -> BoxFuture<'static, ModbootResult<()>> {
        let Bootstrapper { loader, observer } = self;
        let module_name = loader.name().to_string();
        let mut sequence = InitSequence::new();

        // A fresh sequence always accepts `Requested`.
        if let Err(e) = sequence.advance(Milestone::Requested) {
            debug_assert!(false, "fresh sequence rejected Requested: {e}");
            return futures::future::ready(Err(e)).boxed();
        }
        observer.marker(ProgressMarker::Requested, &module_name);
        let readiness = loader.ready();

        async move {
            let module = readiness.await?;

            sequence.advance(Milestone::Ready)?;
            observer.marker(ProgressMarker::Ready, &module_name);

            sequence.advance(Milestone::Started)?;
            module.start()
        }
        .boxed()
    }
}
