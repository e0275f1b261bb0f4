//! Installer configuration

use crate::constants::DEFAULT_SCRIPT_EXTENSION;
use std::path::PathBuf;

/// Fully resolved configuration for one install run
///
/// Everything the engine needs is carried here explicitly; there is no
/// ambient path or logging state.
#[derive(Clone, Debug)]
pub struct InstallConfig {
    /// Root of the live install tree
    pub install_root: PathBuf,
    /// Name of the game data directory under the install root
    /// (ignored on Mac, where the bundle fixes the location)
    pub data_dir_name: String,
    /// Identifier the staging directory names are derived from
    pub identifier: String,
    /// Extension of stale compiled-script files to purge
    pub script_extension: String,
    /// Where the staging directories are created; defaults to the
    /// install root itself
    pub staging_root: Option<PathBuf>,
}

impl InstallConfig {
    /// Create a config for the given install root, data directory name, and
    /// staging identifier
    pub fn new(
        install_root: impl Into<PathBuf>,
        data_dir_name: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            install_root: install_root.into(),
            data_dir_name: data_dir_name.into(),
            identifier: identifier.into(),
            script_extension: DEFAULT_SCRIPT_EXTENSION.to_string(),
            staging_root: None,
        }
    }

    /// Override the compiled-script extension
    #[must_use]
    pub fn with_script_extension(mut self, extension: impl Into<String>) -> Self {
        self.script_extension = extension.into();
        self
    }

    /// Override where staging directories are created
    #[must_use]
    pub fn with_staging_root(mut self, staging_root: impl Into<PathBuf>) -> Self {
        self.staging_root = Some(staging_root.into());
        self
    }
}
