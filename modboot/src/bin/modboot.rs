//! Host entry: link the bundled module and hand control to it.

use modboot::{BootOptions, DylibLoader, init_logging, install_panic_hook};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging();
    install_panic_hook();

    let options = BootOptions::for_executable()?;
    let loader = DylibLoader::from_options(&options)?;

    // Only comes back on failure; otherwise the module decides when the process ends.
    match modboot::host::serve(loader).await? {}
}
