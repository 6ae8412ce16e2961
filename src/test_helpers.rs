//! Test helpers for creating hermetic filesystem test environments
//!
//! ```rust,ignore
//! let workspace = TestWorkspace::with_template("USE %;")?;
//! generate(&workspace.template_path(), &["A_b"], &options)?;
//! assert_eq!(workspace.read("out/A_b.sql")?, "USE A_b;");
//! ```

use crate::{FillError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Name of the template file created by [`TestWorkspace::with_template`]
pub const TEMPLATE_FILE: &str = "iterative_create_database.sql";

/// Temporary directory holding a template and generated output
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Create an empty workspace in a temporary directory
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().map_err(|e| FillError::io(std::env::temp_dir(), e))?;
        Ok(Self { temp_dir })
    }

    /// Create a workspace whose template file holds `template`
    pub fn with_template(template: &str) -> Result<Self> {
        let workspace = Self::new()?;
        workspace.write(TEMPLATE_FILE, template)?;
        Ok(workspace)
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn template_path(&self) -> PathBuf {
        self.root().join(TEMPLATE_FILE)
    }

    /// Write a file relative to the workspace root, creating parent directories
    pub fn write(&self, relative_path: &str, content: &str) -> Result<PathBuf> {
        let path = self.root().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| FillError::io(parent, e))?;
        }
        fs::write(&path, content).map_err(|e| FillError::io(&path, e))?;
        Ok(path)
    }

    pub fn create_dir(&self, relative_path: &str) -> Result<PathBuf> {
        let path = self.root().join(relative_path);
        fs::create_dir_all(&path).map_err(|e| FillError::io(&path, e))?;
        Ok(path)
    }

    pub fn read(&self, relative_path: &str) -> Result<String> {
        let path = self.root().join(relative_path);
        fs::read_to_string(&path).map_err(|e| FillError::io(&path, e))
    }
}
