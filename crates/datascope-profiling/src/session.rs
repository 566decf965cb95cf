//! Session-scoped output directory handling.
//!
//! Every profiling run owns one [`OutputSession`]: an explicit context object
//! the orchestrator creates and threads into every visualization call. The
//! timestamped directory underneath it is created lazily on the first
//! artifact-save request and shared by all artifacts of the run. External
//! cleanup tooling matches these directories by the `profile_` prefix.

use crate::error::Result;
use chrono::Local;
use once_cell::sync::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of every session directory name.
pub const SESSION_DIR_PREFIX: &str = "profile_";

/// Context object owning the lazily created session output directory.
///
/// The directory is created at most once per session regardless of how many
/// artifacts are saved into it; concurrent writers to one session are not
/// supported.
pub struct OutputSession {
    root: PathBuf,
    directory: OnceCell<PathBuf>,
}

impl OutputSession {
    /// Create a session rooted at the given output directory.
    ///
    /// Nothing is created on disk until the first call to [`directory`].
    ///
    /// [`directory`]: OutputSession::directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            directory: OnceCell::new(),
        }
    }

    /// The configured root under which the session directory is created.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The session directory, created on first access.
    ///
    /// Named `profile_` + creation timestamp; never reused across runs.
    pub fn directory(&self) -> Result<&Path> {
        let path = self.directory.get_or_try_init(|| {
            let name = format!(
                "{}{}",
                SESSION_DIR_PREFIX,
                Local::now().format("%Y-%m-%d_%H-%M-%S")
            );
            let path = self.root.join(name);
            ensure_directory(&path)?;
            Ok::<_, crate::error::ProfilingError>(path)
        })?;
        Ok(path)
    }

    /// Whether the session directory has been created yet.
    pub fn is_initialized(&self) -> bool {
        self.directory.get().is_some()
    }
}

/// Idempotent create-if-absent with existence logging.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if path.exists() {
        info!("Directory '{}' already exists", path.display());
    } else {
        fs::create_dir_all(path)?;
        info!("Directory '{}' created", path.display());
    }
    Ok(())
}
