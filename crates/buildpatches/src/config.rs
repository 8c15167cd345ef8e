//! Run configuration.
//!
//! All three roots are required and validated up front; configuration
//! problems are the only fatal error class, raised before any file is
//! touched. The config is immutable and threaded through the pipeline
//! explicitly.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("working directory for mod MUST be specified and exist: {0}")]
    WorkingDirMissing(PathBuf),
    #[error("destination for patch files MUST be specified: {0}")]
    DestUnusable(PathBuf),
    #[error("location of unpacked Starbound asset files MUST be specified and exist: {0}")]
    AssetDirMissing(PathBuf),
}

/// Immutable run configuration: the three directory roots.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Root of the mod's edited asset tree.
    pub working_dir: PathBuf,
    /// Root under which patch files and copied files are written,
    /// mirroring `working_dir`'s relative structure.
    pub dest: PathBuf,
    /// Root of the unmodified Starbound asset tree.
    pub assets: PathBuf,
}

impl BuildConfig {
    /// Validate the three roots. `working_dir` and `assets` must be
    /// existing directories; `dest` is created on demand later but must
    /// not name an existing non-directory.
    pub fn new(
        working_dir: impl Into<PathBuf>,
        dest: impl Into<PathBuf>,
        assets: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let working_dir = working_dir.into();
        let dest = dest.into();
        let assets = assets.into();
        if !working_dir.is_dir() {
            return Err(ConfigError::WorkingDirMissing(working_dir));
        }
        if !assets.is_dir() {
            return Err(ConfigError::AssetDirMissing(assets));
        }
        if dest.as_os_str().is_empty() || (dest.exists() && !dest.is_dir()) {
            return Err(ConfigError::DestUnusable(dest));
        }
        Ok(Self { working_dir, dest, assets })
    }

    /// The baseline counterpart of a working-tree file.
    pub fn asset_path(&self, relative: &Path) -> PathBuf {
        self.assets.join(relative)
    }

    /// The destination for a verbatim copy.
    pub fn dest_path(&self, relative: &Path) -> PathBuf {
        self.dest.join(relative)
    }

    /// The destination for an emitted patch file.
    pub fn patch_path(&self, relative: &Path) -> PathBuf {
        let mut name = relative.as_os_str().to_os_string();
        name.push(".patch");
        self.dest.join(name)
    }
}
