//! Path management
//!
//! Resolves the data directory holding the SQLite database, the scraped
//! cover art and the server settings file.

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;

static PATHS: OnceCell<Arc<Paths>> = OnceCell::new();

/// Manages all filesystem paths for the application
#[derive(Debug, Clone)]
pub struct Paths {
    data_dir: PathBuf,
}

impl Paths {
    /// Initialize the paths singleton
    pub fn init(data_dir: Option<PathBuf>) -> Result<Arc<Paths>> {
        let paths = PATHS.get_or_try_init(|| {
            let paths = Self::new(data_dir)?;
            Ok::<_, anyhow::Error>(Arc::new(paths))
        })?;
        Ok(Arc::clone(paths))
    }

    /// Get the global paths instance
    pub fn get() -> Result<Arc<Paths>> {
        PATHS.get().map(Arc::clone).context("Paths not initialized")
    }

    fn new(data_dir_override: Option<PathBuf>) -> Result<Self> {
        let data_dir = if let Some(path) = data_dir_override {
            path
        } else if let Ok(exe) = std::env::current_exe() {
            exe.parent().unwrap_or(Path::new(".")).join("serendipity")
        } else {
            PathBuf::from("serendipity")
        };

        let paths = Self { data_dir };
        paths.create_directories()?;

        Ok(paths)
    }

    fn create_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(self.covers_dir())?;
        Ok(())
    }

    /// Get the data directory
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get the main database path
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("serendipity.db")
    }

    /// Get the cover art directory served under /covers
    pub fn covers_dir(&self) -> PathBuf {
        self.data_dir.join("covers")
    }

    /// Get the settings file path
    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join("settings.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_creation() {
        let temp_dir = TempDir::new().unwrap();
        let data = Some(temp_dir.path().join("data"));

        // Note: Can't use init() in tests due to OnceCell
        let paths = Paths::new(data).unwrap();

        assert!(paths.data_dir().exists());
        assert!(paths.covers_dir().exists());
        assert!(paths.db_path().starts_with(paths.data_dir()));
    }
}
