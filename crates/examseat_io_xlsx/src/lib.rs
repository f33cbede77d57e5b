//! `examseat_io_xlsx` v1:
//! Workbook I/O kernel for the exam seating generator.
//!
//! Modules:
//! - `conf`   : constants and default presets
//! - `spec`   : sheet-plan models (styled-row descriptors) and reports
//! - `util`   : pure helper functions
//! - `reader` : worksheet -> DataFrame loader
//! - `writer` : sheet plan -> workbook renderer
//! - `error`  : error type
pub mod conf;
pub mod error;
pub mod reader;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    N_BORDER_THIN, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX,
    TUP_EXCEL_ILLEGAL, derive_default_cell_format,
};
pub use error::{XlsxIoError, XlsxResult};
pub use reader::{derive_text_from_any_value, read_sheet_dataframe};
pub use spec::{
    EnumCellValue, SpecCellFormat, SpecCellPlan, SpecRowPlan, SpecSheetHorizontalMerge,
    SpecSheetPlan, SpecSheetPlanBuilder, SpecSheetReport, SpecXlsxReport,
};
pub use util::{sanitize_sheet_name, validate_sheet_plan};
pub use writer::XlsxWriter;
