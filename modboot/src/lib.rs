//! modboot: brings a runtime-linked binary module to a ready state and
//! invokes its entry point exactly once.
//!
//! ## Architecture
//!
//! ```text
//! Bootstrapper ──→ ModuleLoader::ready()   (await)
//!              ──→ ReadyModule::start()    (once)
//! ```
//!
//! - `bootstrap`: the startup sequence and its progress markers
//! - `module`: loader/module capabilities and their providers
//! - `host`: keeps the process alive for the module after its start
//! - `options`: where the module lives and what it exports

pub mod bootstrap;
pub mod errors;
pub mod host;
pub mod logging;
pub mod module;
pub mod options;

pub use bootstrap::{
    Bootstrapper, InitSequence, MarkerLog, Milestone, ProgressMarker, ProgressObserver,
    TracingObserver,
};
pub use errors::{ModbootError, ModbootResult};
pub use logging::{init_logging, install_panic_hook};
pub use module::{
    DeferredLoader, DylibLoader, DylibModule, ModuleLoader, ReadinessHandle, ReadyModule, deferred,
};
pub use options::BootOptions;
