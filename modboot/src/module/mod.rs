//! Loadable unit abstraction.
//!
//! A binary module is seen by the bootstrapper as two capabilities:
//!
//! ```text
//! ModuleLoader::ready()  ──→  ReadyModule::start()
//!   (async, once)              (sync, once)
//! ```
//!
//! - `dylib`: native shared library linked at runtime
//! - `deferred`: readiness handle resolved by the caller (hosts and tests)

pub mod deferred;
pub mod dylib;

pub use deferred::{DeferredLoader, ReadinessHandle, deferred};
pub use dylib::{DylibLoader, DylibModule};

use crate::errors::ModbootResult;
use async_trait::async_trait;

/// Provider of a module that becomes callable asynchronously.
///
/// `ready` consumes the loader, so readiness is requested at most once.
#[async_trait]
pub trait ModuleLoader: Send {
    /// Module handed back once instantiation and linking complete.
    type Module: ReadyModule;

    /// Instantiate and link the module.
    ///
    /// Completes exactly once, without further input. A failure leaves
    /// nothing behind that the caller must undo.
    async fn ready(self) -> ModbootResult<Self::Module>;

    /// Get human-readable module name for logging.
    fn name(&self) -> &str;
}

/// A linked module whose entry point can be invoked.
pub trait ReadyModule: Send {
    /// Invoke the entry point. Takes no arguments; any value it produces is dropped.
    fn start(self) -> ModbootResult<()>;
}
