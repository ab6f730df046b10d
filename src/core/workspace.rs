use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ProberConfig;
use crate::utils::error::{ProberError, Result};

#[derive(Debug, Clone)]
pub struct WorkspacePaths {
    pub root: PathBuf,
    pub csv_file: PathBuf,
    pub log_file: PathBuf,
}

/// The disposable on-disk directory a run writes into. Creating it is
/// idempotent; removing it leaves nothing behind.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    csv_file: PathBuf,
    log_file: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let csv_file = root.join(crate::config::CSV_FILENAME);
        let log_file = root.join(crate::config::LOG_FILENAME);
        Self {
            root,
            csv_file,
            log_file,
        }
    }

    pub fn from_config(config: &ProberConfig) -> Self {
        Self {
            root: config.workspace.clone(),
            csv_file: config.csv_path(),
            log_file: config.log_path(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// Creates the workspace if absent. An existing workspace is left
    /// untouched, contents included.
    pub fn ensure(&self) -> Result<WorkspacePaths> {
        if self.root.exists() && !self.root.is_dir() {
            return Err(ProberError::WorkspaceError {
                path: self.root.display().to_string(),
                message: "path exists but is not a directory".to_string(),
            });
        }

        fs::create_dir_all(&self.root)?;

        // CSV/日誌檔可被設定到 workspace 之外，其上層目錄也要存在
        for file in [&self.csv_file, &self.log_file] {
            if let Some(parent) = file.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
        }

        Ok(WorkspacePaths {
            root: self.root.clone(),
            csv_file: self.csv_file.clone(),
            log_file: self.log_file.clone(),
        })
    }

    /// Removes the workspace recursively. Removing an absent workspace
    /// succeeds.
    pub fn clean(&self) -> Result<()> {
        match fs::remove_dir_all(&self.root) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ProberError::WorkspaceError {
                path: self.root.display().to_string(),
                message: e.to_string(),
            }),
        }
    }
}
