/// Test utilities for the CSV storage backend.
///
/// Provides RAII-based cleanup that guarantees test data is removed
/// even if tests panic or fail.
use super::connection::CsvConnection;
use anyhow::Result;
use tempfile::TempDir;

/// Test environment with a temporary data directory that is removed
/// when the environment is dropped.
pub struct TestEnvironment {
    pub connection: CsvConnection,
    /// Base directory path for manual inspection if needed
    pub base_path: std::path::PathBuf,
    _temp_dir: TempDir, // Keep alive to prevent cleanup
}

impl TestEnvironment {
    /// Create a new test environment with a temporary directory.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = CsvConnection::new(temp_dir.path())?;
        Ok(Self {
            connection,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }
}
