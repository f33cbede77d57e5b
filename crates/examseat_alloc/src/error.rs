//! Seating generation error types.

use std::path::PathBuf;

use examseat_io_xlsx::XlsxIoError;
use thiserror::Error;

/// Result type for parse/allocate/generate operations.
pub type SeatingResult<T> = std::result::Result<T, SeatingError>;

/// Errors raised while turning an input workbook into seating outputs.
#[derive(Debug, Error)]
pub enum SeatingError {
    /// A cell holds a value the allocator cannot use.
    #[error("{sheet} sheet, row {row}: {message}")]
    InputFormat {
        /// Logical sheet (`roster` or `rooms`).
        sheet: &'static str,
        /// 1-based sheet row, header being row 1.
        row: usize,
        /// What is wrong with the value.
        message: String,
    },

    /// A required column is absent from a non-empty sheet.
    #[error("{sheet} sheet is missing required column {column:?}")]
    MissingColumn {
        /// Logical sheet (`roster` or `rooms`).
        sheet: &'static str,
        /// Header name or 1-based position.
        column: String,
    },

    /// Config file could not be parsed.
    #[error("Invalid config file {}: {source}", path.display())]
    Config {
        /// Config file path.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Filesystem failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Workbook read/write failure.
    #[error(transparent)]
    Xlsx(#[from] XlsxIoError),

    /// Built-in pattern failed to compile.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Table access failure.
    #[error(transparent)]
    Frame(#[from] polars::prelude::PolarsError),

    /// A generation step failed; no output was produced for it.
    #[error("Error creating {step}: {source}")]
    Generation {
        /// Step name (`seating plan`, `seating arrangement`, `signature list`).
        step: &'static str,
        /// Root cause.
        #[source]
        source: Box<SeatingError>,
    },
}

impl SeatingError {
    pub(crate) fn input_format(sheet: &'static str, row: usize, message: impl Into<String>) -> Self {
        Self::InputFormat {
            sheet,
            row,
            message: message.into(),
        }
    }

    /// Wrap `self` with the failing generation step.
    pub fn in_step(self, step: &'static str) -> Self {
        Self::Generation {
            step,
            source: Box::new(self),
        }
    }
}
