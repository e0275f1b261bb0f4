//! Pre-flight resolution of the install tree layout

use crate::constants::{DOWNLOAD_DIR_SUFFIX, EXTRACTION_DIR_SUFFIX, STREAMING_ASSETS_DIR};
use crate::InstallConfig;
use stagehand_types::PlatformProfile;
use std::path::{Path, PathBuf};

/// Resolved absolute paths for one install run
///
/// Computed once at orchestrator construction and immutable afterwards.
#[derive(Debug, Clone)]
pub struct InstallLayout {
    /// Root of the live install tree
    pub install_root: PathBuf,
    /// Game data directory (platform-dependent location)
    pub data_dir: PathBuf,
    /// `StreamingAssets` directory under the data directory
    pub assets_dir: PathBuf,
    /// Staging directory archives are downloaded into
    pub download_dir: PathBuf,
    /// Staging directory archives are extracted into; equals `install_root`
    /// on the direct-staging variant
    pub extract_dir: PathBuf,
    /// Whether the install is a storefront (Steam) variant
    pub is_steam: bool,
}

impl InstallLayout {
    /// Resolve the layout from configuration, platform, and staging choice
    #[must_use]
    pub fn resolve(
        config: &InstallConfig,
        platform: PlatformProfile,
        direct_staging: bool,
    ) -> Self {
        let install_root = config.install_root.clone();
        let data_dir = install_root.join(platform.data_dir(&config.data_dir_name));
        let assets_dir = data_dir.join(STREAMING_ASSETS_DIR);

        let staging_root = config
            .staging_root
            .clone()
            .unwrap_or_else(|| install_root.clone());
        let download_dir = staging_root.join(format!("{}{DOWNLOAD_DIR_SUFFIX}", config.identifier));
        let extract_dir = if direct_staging {
            install_root.clone()
        } else {
            staging_root.join(format!("{}{EXTRACTION_DIR_SUFFIX}", config.identifier))
        };

        let is_steam = detect_steam(&install_root);

        Self {
            install_root,
            data_dir,
            assets_dir,
            download_dir,
            extract_dir,
            is_steam,
        }
    }
}

/// Probe the install root for storefront runtime artifacts.
fn detect_steam(install_root: &Path) -> bool {
    [
        "steam_api.dll",
        "Contents/Plugins/CSteamworks.bundle",
        "libsteam_api.so",
    ]
    .iter()
    .any(|candidate| install_root.join(candidate).exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_staging_layout_uses_separate_extraction_dir() {
        let config = InstallConfig::new("/games/higu", "Higurashi_Data", "Onikakushi");
        let layout = InstallLayout::resolve(&config, PlatformProfile::Other, false);

        assert_eq!(layout.data_dir, PathBuf::from("/games/higu/Higurashi_Data"));
        assert_eq!(
            layout.assets_dir,
            PathBuf::from("/games/higu/Higurashi_Data/StreamingAssets")
        );
        assert_eq!(
            layout.download_dir,
            PathBuf::from("/games/higu/Onikakushi Downloads")
        );
        assert_eq!(
            layout.extract_dir,
            PathBuf::from("/games/higu/Onikakushi Extraction")
        );
    }

    #[test]
    fn direct_staging_extracts_into_the_install_root() {
        let config = InstallConfig::new("/games/higu", "Higurashi_Data", "Onikakushi");
        let layout = InstallLayout::resolve(&config, PlatformProfile::Windows, true);
        assert_eq!(layout.extract_dir, layout.install_root);
    }

    #[test]
    fn mac_layout_points_into_the_bundle() {
        let config = InstallConfig::new("/Applications/Higu.app", "Higurashi_Data", "Onikakushi");
        let layout = InstallLayout::resolve(&config, PlatformProfile::Mac, false);
        assert_eq!(
            layout.data_dir,
            PathBuf::from("/Applications/Higu.app/Contents/Resources/Data")
        );
    }

    #[test]
    fn staging_root_override_is_honored() {
        let config = InstallConfig::new("/games/higu", "Higurashi_Data", "Onikakushi")
            .with_staging_root("/tmp/work");
        let layout = InstallLayout::resolve(&config, PlatformProfile::Other, false);
        assert_eq!(
            layout.download_dir,
            PathBuf::from("/tmp/work/Onikakushi Downloads")
        );
        assert_eq!(
            layout.extract_dir,
            PathBuf::from("/tmp/work/Onikakushi Extraction")
        );
    }
}
