//! Storage specification models and top-level error types.

use std::path::PathBuf;

use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////
// #region StructsAndErrors

/// Storage layout for uploaded inputs and generated outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecStorageOptions {
    /// Directory uploaded workbooks are saved into.
    pub dir_upload: PathBuf,
    /// Directory generated workbooks are written into.
    pub dir_output: PathBuf,
    /// Optional glob patterns (file basename) limiting what cleanup removes.
    pub patterns_include_files: Option<Vec<String>>,
}

impl SpecStorageOptions {
    /// Layout with explicit upload/output directories.
    pub fn new(dir_upload: impl Into<PathBuf>, dir_output: impl Into<PathBuf>) -> Self {
        Self {
            dir_upload: dir_upload.into(),
            dir_output: dir_output.into(),
            patterns_include_files: None,
        }
    }

    /// Layout with both directories under the system temp directory.
    pub fn under_temp_dir() -> Self {
        let dir_base = std::env::temp_dir().join("examseat");
        Self::new(dir_base.join("uploads"), dir_base.join("outputs"))
    }
}

impl Default for SpecStorageOptions {
    fn default() -> Self {
        Self::new("uploads", "outputs")
    }
}

/// One cleanup failure item with path + error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecCleanupError {
    /// File that could not be removed.
    pub path: PathBuf,
    /// User-facing error text.
    pub exception: String,
}

/// Errors raised by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// File name is empty or contains path components.
    #[error("Invalid file name: {0:?}")]
    InvalidFileName(String),

    /// Uploaded file is not an `.xlsx` workbook.
    #[error("Please upload an Excel file (.xlsx), got {0:?}")]
    UnsupportedExtension(String),

    /// Requested output does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Invalid cleanup include pattern.
    #[error("Invalid cleanup pattern: {0}")]
    InvalidPattern(String),

    /// Filesystem failure on a specific path.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

// #endregion
////////////////////////////////////////////////////////////////////////////////
