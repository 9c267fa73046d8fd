//! Native shared-library module provider.
//!
//! The module is a platform shared library (`.so` / `.dylib` / `.dll`)
//! exporting a zero-argument `extern "C"` entry point. Opening the library
//! and resolving the symbol block, so both run on tokio's blocking pool.

use super::{ModuleLoader, ReadyModule};
use crate::errors::{ModbootError, ModbootResult};
use crate::options::BootOptions;
use async_trait::async_trait;
use libloading::Library;
use std::path::{Path, PathBuf};

/// Signature every entry point must export.
type EntryFn = unsafe extern "C" fn();

/// Loads a shared library and resolves its entry point.
#[derive(Debug, Clone)]
pub struct DylibLoader {
    name: String,
    path: PathBuf,
    entry_symbol: String,
}

impl DylibLoader {
    pub fn new(path: impl Into<PathBuf>, entry_symbol: impl Into<String>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self {
            name,
            path,
            entry_symbol: entry_symbol.into(),
        }
    }

    pub fn from_options(options: &BootOptions) -> ModbootResult<Self> {
        options.sanitize()?;
        Ok(Self::new(
            options.module_path.clone(),
            options.entry_symbol.clone(),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entry_symbol(&self) -> &str {
        &self.entry_symbol
    }

    /// Open the library and resolve the entry point (blocking).
    fn link(self) -> ModbootResult<DylibModule> {
        tracing::debug!(
            path = %self.path.display(),
            symbol = %self.entry_symbol,
            "Linking module"
        );

        // SAFETY: loading runs the library's initializers. The module is
        // trusted the same way the host executable is.
        let library = unsafe { Library::new(&self.path) }.map_err(|e| {
            ModbootError::Load(format!(
                "failed to open module at {}: {}",
                self.path.display(),
                e
            ))
        })?;

        // SAFETY: the exported symbol is required to have the `EntryFn` signature.
        // The pointer is only used while `library` stays loaded.
        let entry: EntryFn = unsafe {
            let symbol = library
                .get::<EntryFn>(self.entry_symbol.as_bytes())
                .map_err(|e| {
                    ModbootError::Load(format!(
                        "module at {} does not export '{}': {}",
                        self.path.display(),
                        self.entry_symbol,
                        e
                    ))
                })?;
            *symbol
        };

        Ok(DylibModule {
            name: self.name,
            library,
            entry,
        })
    }
}

#[async_trait]
impl ModuleLoader for DylibLoader {
    type Module = DylibModule;

    async fn ready(self) -> ModbootResult<DylibModule> {
        let name = self.name.clone();
        tokio::task::spawn_blocking(move || self.link())
            .await
            .map_err(|e| {
                ModbootError::Internal(format!("link job for '{}' did not complete: {}", name, e))
            })?
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A linked shared library with a resolved entry point.
pub struct DylibModule {
    name: String,
    library: Library,
    entry: EntryFn,
}

impl std::fmt::Debug for DylibModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DylibModule")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl ReadyModule for DylibModule {
    fn start(self) -> ModbootResult<()> {
        let DylibModule {
            name,
            library,
            entry,
        } = self;

        tracing::debug!(module = %name, "Invoking module entry point");

        // SAFETY: `entry` was resolved from `library`, which is still loaded.
        unsafe { entry() };

        // Whatever the module registered keeps running after its entry point
        // returns, so the library must stay mapped for the rest of the process.
        std::mem::forget(library);
        Ok(())
    }
}
