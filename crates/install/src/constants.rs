//! Fixed names inside the managed install tree
//!
//! These are properties of the game data layout, not configuration: every
//! supported install carries them under the configured data directory.

/// Directory under the data directory holding streamed assets.
pub const STREAMING_ASSETS_DIR: &str = "StreamingAssets";

/// Mutable shared asset that is backed up before the first update touches it.
pub const SHARED_ASSET_NAME: &str = "sharedassets0.assets";

/// Suffix appended to the shared asset's name for its backup copy.
pub const BACKUP_SUFFIX: &str = ".backup";

/// Legacy image-cache directories purged only on a full update.
pub const LEGACY_IMAGE_CACHE_DIRS: [&str; 2] = ["CG", "CGAlt"];

/// Directory of stale compiled scripts, purged best-effort on every update.
pub const COMPILED_SCRIPTS_DIR: &str = "CompiledUpdateScripts";

/// Default extension of compiled script files.
pub const DEFAULT_SCRIPT_EXTENSION: &str = "mg";

/// Suffix of the download staging directory name.
pub const DOWNLOAD_DIR_SUFFIX: &str = " Downloads";

/// Suffix of the extraction staging directory name.
pub const EXTRACTION_DIR_SUFFIX: &str = " Extraction";
