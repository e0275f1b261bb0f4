//! Platform profiles and their staging behavior

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A single auxiliary file that is relocated outside the bulk merge.
///
/// Both paths are relative: `staged` to the extraction root, `installed` to
/// the install root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxFile {
    pub staged: PathBuf,
    pub installed: PathBuf,
}

/// Closed set of platform variants, fixed at process start.
///
/// The profile decides where the data directory lives, whether extraction
/// goes straight into the live tree, and which auxiliary file (executable
/// stub or icon) rides along after the bulk merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformProfile {
    Windows,
    Mac,
    Other,
}

impl PlatformProfile {
    /// Profile for the platform this process is running on.
    #[must_use]
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::Mac
        } else {
            Self::Other
        }
    }

    /// Whether extraction should target the live directory directly.
    ///
    /// Windows-class targets extract in place to dodge path-length limits
    /// and skip the separate move step.
    #[must_use]
    pub fn prefers_direct_staging(self) -> bool {
        matches!(self, Self::Windows)
    }

    /// Data directory location relative to the install root.
    #[must_use]
    pub fn data_dir(self, data_dir_name: &str) -> PathBuf {
        match self {
            Self::Mac => PathBuf::from("Contents/Resources/Data"),
            Self::Windows | Self::Other => PathBuf::from(data_dir_name),
        }
    }

    /// The auxiliary file this profile relocates after the bulk merge, if any.
    ///
    /// Windows relocates the executable stub named after the data directory
    /// (`Foo_Data` leads to `Foo.exe`); Mac relocates the player icon inside
    /// the application bundle.
    #[must_use]
    pub fn aux_file(self, data_dir_name: &str) -> Option<AuxFile> {
        match self {
            Self::Windows => {
                let stem = data_dir_name
                    .strip_suffix("_Data")
                    .unwrap_or(data_dir_name);
                let exe = PathBuf::from(format!("{stem}.exe"));
                Some(AuxFile {
                    staged: exe.clone(),
                    installed: exe,
                })
            }
            Self::Mac => {
                let icon = Path::new("Contents/Resources/PlayerIcon.icns").to_path_buf();
                Some(AuxFile {
                    staged: icon.clone(),
                    installed: icon,
                })
            }
            Self::Other => None,
        }
    }
}
