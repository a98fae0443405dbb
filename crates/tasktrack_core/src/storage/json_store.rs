use crate::error::AppError;
use crate::model::Task;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const STORE_FILE_NAME: &str = "tasks.json";
const BACKUP_EXTENSION: &str = "bak.json";

/// Handle on the JSON file that holds every task.
///
/// Nothing is cached: each call reads or rewrites the whole file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling the file is moved to when it cannot be parsed.
    pub fn backup_path(&self) -> PathBuf {
        self.path.with_extension(BACKUP_EXTENSION)
    }

    /// Reads every stored task.
    ///
    /// A missing file is an empty list. A file that cannot be read or parsed is
    /// renamed to [`TaskStore::backup_path`] and also treated as empty; only a
    /// failure to move it aside is reported.
    pub fn load(&self) -> Result<Vec<Task>, AppError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "store missing, starting empty");
            return Ok(Vec::new());
        }

        let parsed = std::fs::read_to_string(&self.path)
            .map_err(|err| err.to_string())
            .and_then(|content| {
                serde_json::from_str::<Vec<Task>>(&content).map_err(|err| err.to_string())
            });

        match parsed {
            Ok(tasks) => {
                debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
                Ok(tasks)
            }
            Err(reason) => {
                let backup = self.backup_path();
                warn!(
                    path = %self.path.display(),
                    backup = %backup.display(),
                    %reason,
                    "store unreadable, moving it aside"
                );
                std::fs::rename(&self.path, &backup)
                    .map_err(|err| AppError::io(format!("{}: {}", backup.display(), err)))?;
                Ok(Vec::new())
            }
        }
    }

    /// Replaces the file contents with `tasks` as pretty-printed JSON.
    pub fn save(&self, tasks: &[Task]) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|err| AppError::io(err.to_string()))?;
        }

        let content = serde_json::to_string_pretty(tasks)
            .map_err(|err| AppError::invalid_data(err.to_string()))?;
        std::fs::write(&self.path, content)
            .map_err(|err| AppError::io(format!("{}: {}", self.path.display(), err)))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.path, permissions)
                .map_err(|err| AppError::io(err.to_string()))?;
        }

        debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }

    /// Writes an empty list if the file does not exist yet.
    pub fn ensure_exists(&self) -> Result<(), AppError> {
        if self.path.exists() {
            return Ok(());
        }
        self.save(&[])
    }
}
