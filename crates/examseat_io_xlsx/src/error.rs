//! Workbook I/O error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for workbook read/write operations.
pub type XlsxResult<T> = std::result::Result<T, XlsxIoError>;

/// Errors raised while reading input sheets or rendering sheet plans.
#[derive(Debug, Error)]
pub enum XlsxIoError {
    /// Underlying `rust_xlsxwriter` failure.
    #[error("xlsx write error: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    /// Underlying `calamine` failure.
    #[error("xlsx read error: {0}")]
    Read(#[from] calamine::Error),

    /// DataFrame construction or access failure.
    #[error("dataframe error: {0}")]
    Frame(#[from] polars::prelude::PolarsError),

    /// Requested sheet position does not exist in the workbook.
    #[error("Workbook {} has no sheet at position {index}", path.display())]
    MissingSheet {
        /// Input workbook path.
        path: PathBuf,
        /// Zero-based sheet position.
        index: usize,
    },

    /// Sheet plan is structurally invalid (bad merge, over Excel limits).
    #[error("Invalid sheet plan: {0}")]
    InvalidPlan(String),

    /// Row index does not fit the Excel row type.
    #[error("row index overflow: {0}")]
    RowOverflow(usize),

    /// Column index does not fit the Excel column type.
    #[error("column index overflow: {0}")]
    ColumnOverflow(usize),

    /// Writer was used after [`crate::XlsxWriter::close`].
    #[error("Cannot write after close().")]
    Closed,
}
