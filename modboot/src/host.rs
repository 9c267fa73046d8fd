//! Host side of the handoff.
//!
//! Once the entry point returns, whatever the module registered (threads,
//! tasks, callbacks) keeps running inside this process. The host never ends
//! the process on its own after a successful start.

use crate::bootstrap::Bootstrapper;
use crate::errors::ModbootResult;
use crate::module::ModuleLoader;
use std::convert::Infallible;

/// Activate the module, then stay alive for it.
///
/// Only returns on load or invocation failure, with the error unchanged.
pub async fn serve<L>(loader: L) -> ModbootResult<Infallible>
where
    L: ModuleLoader + 'static,
{
    Bootstrapper::new(loader).run().await?;

    tracing::debug!("Entry point returned, control belongs to the module");
    std::future::pending().await
}
