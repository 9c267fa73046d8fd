//! Boot options.

use crate::errors::{ModbootError, ModbootResult};
use serde::{Deserialize, Serialize};
use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};
use std::path::PathBuf;

/// File stem of the module shipped next to the host binary.
pub const DEFAULT_MODULE_STEM: &str = "module";

/// Entry point exported by the module.
pub const DEFAULT_ENTRY_SYMBOL: &str = "start";

/// Where to find the module and which export to invoke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootOptions {
    /// Shared library to link. Relative paths are resolved by [`BootOptions::for_executable`].
    pub module_path: PathBuf,
    /// Name of the zero-argument entry point.
    pub entry_symbol: String,
}

impl Default for BootOptions {
    fn default() -> Self {
        Self {
            module_path: PathBuf::from(format!("{DLL_PREFIX}{DEFAULT_MODULE_STEM}{DLL_SUFFIX}")),
            entry_symbol: DEFAULT_ENTRY_SYMBOL.to_string(),
        }
    }
}

impl BootOptions {
    /// Default options with the module path anchored at the running executable's directory.
    pub fn for_executable() -> ModbootResult<Self> {
        let exe = std::env::current_exe()?;
        let dir = exe.parent().ok_or_else(|| {
            ModbootError::Config(format!(
                "executable path has no parent directory: {}",
                exe.display()
            ))
        })?;

        Ok(Self::default().anchored_at(dir))
    }

    /// Resolve a relative module path against `dir`. Absolute paths are kept.
    pub fn anchored_at(mut self, dir: impl Into<PathBuf>) -> Self {
        if self.module_path.is_relative() {
            self.module_path = dir.into().join(&self.module_path);
        }
        self
    }

    pub fn sanitize(&self) -> ModbootResult<()> {
        if self.module_path.as_os_str().is_empty() {
            return Err(ModbootError::Config("module_path must not be empty".into()));
        }
        if self.entry_symbol.is_empty() {
            return Err(ModbootError::Config("entry_symbol must not be empty".into()));
        }
        if self.entry_symbol.contains('\0') {
            return Err(ModbootError::Config(format!(
                "entry_symbol contains a NUL byte: {:?}",
                self.entry_symbol
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_default_uses_platform_library_name() {
        let options = BootOptions::default();
        let expected = format!("{DLL_PREFIX}module{DLL_SUFFIX}");

        assert_eq!(options.module_path, PathBuf::from(expected));
        assert_eq!(options.entry_symbol, "start");
        assert!(options.sanitize().is_ok());
    }

    #[test]
    fn test_anchored_at_resolves_relative_path() {
        let options = BootOptions::default().anchored_at("/opt/host");

        assert!(options.module_path.starts_with("/opt/host"));
        assert_eq!(
            options.module_path.file_name(),
            BootOptions::default().module_path.file_name()
        );
    }

    #[test]
    fn test_anchored_at_keeps_absolute_path() {
        let options = BootOptions {
            module_path: PathBuf::from("/usr/lib/libsearch.so"),
            ..Default::default()
        }
        .anchored_at("/opt/host");

        assert_eq!(options.module_path, Path::new("/usr/lib/libsearch.so"));
    }

    #[test]
    fn test_for_executable_is_absolute() {
        let options = BootOptions::for_executable().unwrap();
        assert!(options.module_path.is_absolute());
    }

    #[test]
    fn test_sanitize_rejects_invalid() {
        let empty_path = BootOptions {
            module_path: PathBuf::new(),
            ..Default::default()
        };
        assert!(matches!(empty_path.sanitize(), Err(ModbootError::Config(_))));

        let nul_symbol = BootOptions {
            entry_symbol: "st\0art".into(),
            ..Default::default()
        };
        let err = nul_symbol.sanitize().unwrap_err();
        assert!(err.to_string().contains("NUL"));
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let options: BootOptions =
            serde_json::from_str(r#"{"entry_symbol": "run_search"}"#).unwrap();

        assert_eq!(options.entry_symbol, "run_search");
        assert_eq!(options.module_path, BootOptions::default().module_path);
    }
}
