//! Shared sheet-plan specification models.
//!
//! A [`SpecSheetPlan`] is a library-agnostic description of one worksheet:
//! rows of styled cells plus merges, row heights and column widths. Callers
//! build plans with [`SpecSheetPlanBuilder`]; only [`crate::XlsxWriter`]
//! turns them into real workbook calls.

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell format specification (style intent, not a writer object).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,
    /// Italic style.
    pub italic: Option<bool>,

    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,
    /// Border style for all sides.
    pub border: Option<i64>,
    /// Text wrap.
    pub text_wrap: Option<bool>,

    /// Number format code.
    pub num_format: Option<String>,
    /// Background fill color (`#RRGGBB`).
    pub bg_color: Option<String>,
    /// Font color (`#RRGGBB`).
    pub font_color: Option<String>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            italic: other.italic.or(self.italic),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            border: other.border.or(self.border),
            text_wrap: other.text_wrap.or(self.text_wrap),
            num_format: other.num_format.clone().or_else(|| self.num_format.clone()),
            bg_color: other.bg_color.clone().or_else(|| self.bg_color.clone()),
            font_color: other.font_color.clone().or_else(|| self.font_color.clone()),
        }
    }
}

/// Normalized cell value during plan/write pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Missing/blank value.
    None,
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
}

impl EnumCellValue {
    /// Text shown for this value (used for merged anchors).
    pub fn to_text(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::String(val) => val.clone(),
            Self::Number(val) => crate::util::convert_number_to_text(*val),
        }
    }
}

impl From<&str> for EnumCellValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for EnumCellValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<usize> for EnumCellValue {
    fn from(value: usize) -> Self {
        Self::Number(value as f64)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetPlanSpecification

/// One styled cell descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecCellPlan {
    /// Cell value.
    pub value: EnumCellValue,
    /// Style intent.
    pub fmt: SpecCellFormat,
}

impl SpecCellPlan {
    /// Create a cell descriptor.
    pub fn new(value: impl Into<EnumCellValue>, fmt: &SpecCellFormat) -> Self {
        Self {
            value: value.into(),
            fmt: fmt.clone(),
        }
    }

    /// Create a blank cell that still carries a format (e.g. borders).
    pub fn blank(fmt: &SpecCellFormat) -> Self {
        Self {
            value: EnumCellValue::None,
            fmt: fmt.clone(),
        }
    }
}

/// One styled row descriptor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecRowPlan {
    /// Cells from column 0 onward.
    pub cells: Vec<SpecCellPlan>,
    /// Optional row height in points.
    pub height: Option<f64>,
}

/// Horizontal merge plan item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetHorizontalMerge {
    /// Row index where merge is applied.
    pub row_idx: usize,
    /// Start column index (inclusive).
    pub col_idx_start: usize,
    /// End column index (inclusive).
    pub col_idx_end: usize,
}

/// Complete worksheet descriptor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecSheetPlan {
    /// Requested sheet name (sanitized and deduplicated by the writer).
    pub sheet_name: String,
    /// Rows from row 0 onward.
    pub rows: Vec<SpecRowPlan>,
    /// Horizontal merges; anchor is the leftmost cell.
    pub merges: Vec<SpecSheetHorizontalMerge>,
    /// Column widths from column 0 onward.
    pub widths_by_col: Vec<f64>,
}

impl SpecSheetPlan {
    /// Widest row in cells.
    pub fn width(&self) -> usize {
        self.rows.iter().map(|row| row.cells.len()).max().unwrap_or(0)
    }

    /// Row values rendered as text, blank for empty cells.
    pub fn derive_text_grid(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.cells.iter().map(|cell| cell.value.to_text()).collect())
            .collect()
    }
}

/// Row-by-row builder for [`SpecSheetPlan`].
#[derive(Debug, Clone, Default)]
pub struct SpecSheetPlanBuilder {
    plan: SpecSheetPlan,
}

impl SpecSheetPlanBuilder {
    /// Start a plan for `sheet_name`.
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            plan: SpecSheetPlan {
                sheet_name: sheet_name.into(),
                ..Default::default()
            },
        }
    }

    /// Set column widths from column 0 onward.
    pub fn widths(&mut self, widths_by_col: &[f64]) -> &mut Self {
        self.plan.widths_by_col = widths_by_col.to_vec();
        self
    }

    /// Append a row of cells; returns its index.
    pub fn push_row(&mut self, cells: Vec<SpecCellPlan>, height: Option<f64>) -> usize {
        self.plan.rows.push(SpecRowPlan { cells, height });
        self.plan.rows.len() - 1
    }

    /// Append an empty spacer row; returns its index.
    pub fn push_blank_row(&mut self, height: Option<f64>) -> usize {
        self.push_row(vec![], height)
    }

    /// Append one cell of text merged across `width` columns.
    pub fn push_merged_row(
        &mut self,
        text: impl Into<EnumCellValue>,
        fmt: &SpecCellFormat,
        width: usize,
        height: Option<f64>,
    ) -> usize {
        let n_row_idx = self.push_row(vec![SpecCellPlan::new(text, fmt)], height);
        self.merge(n_row_idx, 0, width.saturating_sub(1));
        n_row_idx
    }

    /// Merge `[col_idx_start, col_idx_end]` on `row_idx`; single cells are left as-is.
    pub fn merge(&mut self, row_idx: usize, col_idx_start: usize, col_idx_end: usize) -> &mut Self {
        if col_idx_end > col_idx_start {
            self.plan.merges.push(SpecSheetHorizontalMerge {
                row_idx,
                col_idx_start,
                col_idx_end,
            });
        }
        self
    }

    /// Finalize builder into immutable plan.
    pub fn build(self) -> SpecSheetPlan {
        self.plan
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Sheet actually emitted to a workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetReport {
    /// Actual unique sheet name in workbook.
    pub sheet_name: String,
    /// Rows written.
    pub n_rows: usize,
    /// Widest row written.
    pub n_cols: usize,
}

/// Per-workbook write report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Sheets produced by the writer, in write order.
    pub sheets: Vec<SpecSheetReport>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
