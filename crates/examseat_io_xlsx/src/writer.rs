//! XLSX writer kernel that renders sheet plans into workbook output.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use crate::conf::N_LEN_EXCEL_SHEET_NAME_MAX;
use crate::error::{XlsxIoError, XlsxResult};
use crate::spec::{EnumCellValue, SpecCellFormat, SpecSheetPlan, SpecSheetReport, SpecXlsxReport};
use crate::util::{
    create_sheet_identifier, derive_horizontal_merge_tracker, sanitize_sheet_name,
    validate_sheet_plan,
};

/// Stateful workbook writer.
pub struct XlsxWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    set_sheet_names_existing: BTreeSet<String>,
    report: SpecXlsxReport,
    if_closed: bool,
}

impl XlsxWriter {
    /// Create writer bound to output path.
    ///
    /// The workbook is buffered in memory until [`Self::close`] is called.
    pub fn new(path_file_out: impl AsRef<Path>) -> Self {
        Self {
            path_file_out: path_file_out.as_ref().to_path_buf(),
            workbook: Workbook::new(),
            set_sheet_names_existing: BTreeSet::new(),
            report: SpecXlsxReport::default(),
            if_closed: false,
        }
    }

    /// Return output file path.
    pub fn file_out(&self) -> &Path {
        &self.path_file_out
    }

    /// Return snapshot of the write report.
    pub fn report(&self) -> SpecXlsxReport {
        self.report.clone()
    }

    /// Flush workbook to disk. Idempotent.
    pub fn close(&mut self) -> XlsxResult<()> {
        if self.if_closed {
            return Ok(());
        }
        if self.report.sheets.is_empty() {
            // Excel refuses to open a workbook with zero worksheets.
            self.workbook.add_worksheet();
        }
        self.workbook.save(&self.path_file_out)?;
        self.if_closed = true;
        tracing::debug!(
            path = %self.path_file_out.display(),
            n_sheets = self.report.sheets.len(),
            "workbook saved"
        );
        Ok(())
    }

    /// Render one sheet plan as a new worksheet.
    pub fn write_sheet_plan(&mut self, plan: &SpecSheetPlan) -> XlsxResult<()> {
        if self.if_closed {
            return Err(XlsxIoError::Closed);
        }
        validate_sheet_plan(plan).map_err(XlsxIoError::InvalidPlan)?;

        let c_sheet_name_requested = sanitize_sheet_name(&plan.sheet_name, "_");
        let sheet_name_unique = self.derive_unique_sheet_name(&c_sheet_name_requested);
        if sheet_name_unique != c_sheet_name_requested {
            self.report.warn(format!(
                "Sheet name {c_sheet_name_requested:?} already used; wrote {sheet_name_unique:?}."
            ));
        }

        let dict_formats = derive_format_cache(plan);
        let set_merged_cells = derive_horizontal_merge_tracker(&plan.merges);

        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(&sheet_name_unique)?;

        for (n_idx_col, n_width) in plan.widths_by_col.iter().enumerate() {
            worksheet.set_column_width(cast_col_num(n_idx_col)?, *n_width)?;
        }

        for (n_idx_row, row) in plan.rows.iter().enumerate() {
            if let Some(n_height) = row.height {
                worksheet.set_row_height(cast_row_num(n_idx_row)?, n_height)?;
            }
            for (n_idx_col, cell) in row.cells.iter().enumerate() {
                if set_merged_cells.contains(&(n_idx_row, n_idx_col)) {
                    continue;
                }
                write_cell_with_format(
                    worksheet,
                    n_idx_row,
                    n_idx_col,
                    &cell.value,
                    &dict_formats[&cell.fmt],
                )?;
            }
        }

        let fmt_default = Format::new();
        for merge in &plan.merges {
            let (c_text, format) = match plan.rows[merge.row_idx].cells.get(merge.col_idx_start) {
                Some(cell) => (cell.value.to_text(), &dict_formats[&cell.fmt]),
                None => (String::new(), &fmt_default),
            };
            worksheet.merge_range(
                cast_row_num(merge.row_idx)?,
                cast_col_num(merge.col_idx_start)?,
                cast_row_num(merge.row_idx)?,
                cast_col_num(merge.col_idx_end)?,
                &c_text,
                format,
            )?;
        }

        self.report.sheets.push(SpecSheetReport {
            sheet_name: sheet_name_unique,
            n_rows: plan.rows.len(),
            n_cols: plan.width(),
        });
        Ok(())
    }

    fn derive_unique_sheet_name(&mut self, name: &str) -> String {
        let c_key = name.to_lowercase();
        if !self.set_sheet_names_existing.contains(&c_key) {
            self.set_sheet_names_existing.insert(c_key);
            return name.to_string();
        }

        let base_name: String = name
            .chars()
            .take(usize::max(1, N_LEN_EXCEL_SHEET_NAME_MAX - 3))
            .collect();

        let mut n_idx = 2usize;
        loop {
            let candidate = create_sheet_identifier(&base_name, n_idx);
            let c_key_candidate = candidate.to_lowercase();
            if !self.set_sheet_names_existing.contains(&c_key_candidate) {
                self.set_sheet_names_existing.insert(c_key_candidate);
                return candidate;
            }
            n_idx += 1;
        }
    }
}

fn derive_format_cache(plan: &SpecSheetPlan) -> HashMap<SpecCellFormat, Format> {
    let mut dict_formats = HashMap::new();
    for row in &plan.rows {
        for cell in &row.cells {
            if !dict_formats.contains_key(&cell.fmt) {
                dict_formats.insert(cell.fmt.clone(), derive_rust_xlsx_format(&cell.fmt));
            }
        }
    }
    dict_formats
}

fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
    format: &Format,
) -> XlsxResult<()> {
    match value {
        EnumCellValue::None => {
            worksheet.write_blank(cast_row_num(row_idx)?, cast_col_num(col_idx)?, format)?;
        }
        EnumCellValue::String(val) => {
            worksheet.write_string_with_format(
                cast_row_num(row_idx)?,
                cast_col_num(col_idx)?,
                val,
                format,
            )?;
        }
        EnumCellValue::Number(val) => {
            worksheet.write_number_with_format(
                cast_row_num(row_idx)?,
                cast_col_num(col_idx)?,
                *val,
                format,
            )?;
        }
    }
    Ok(())
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.clone());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }
    if spec.italic.unwrap_or(false) {
        format = format.set_italic();
    }

    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.valign
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }

    if let Some(val) = &spec.num_format {
        format = format.set_num_format(val.clone());
    }
    if let Some(val) = &spec.bg_color {
        format = format.set_background_color(val.as_str());
    }
    if let Some(val) = &spec.font_color {
        format = format.set_font_color(val.as_str());
    }

    if let Some(val) = spec.border {
        format = format.set_border(derive_format_border(val));
    }

    if spec.text_wrap.unwrap_or(false) {
        format = format.set_text_wrap();
    }

    format
}

fn derive_format_border(border: i64) -> FormatBorder {
    match border {
        0 => FormatBorder::None,
        1 => FormatBorder::Thin,
        2 => FormatBorder::Medium,
        3 => FormatBorder::Dashed,
        4 => FormatBorder::Dotted,
        5 => FormatBorder::Thick,
        6 => FormatBorder::Double,
        7 => FormatBorder::Hair,
        _ => FormatBorder::None,
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        _ => None,
    }
}

fn cast_row_num(value: usize) -> XlsxResult<u32> {
    u32::try_from(value).map_err(|_| XlsxIoError::RowOverflow(value))
}

fn cast_col_num(value: usize) -> XlsxResult<u16> {
    u16::try_from(value).map_err(|_| XlsxIoError::ColumnOverflow(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{SpecCellPlan, SpecSheetPlanBuilder};

    #[test]
    fn derive_unique_sheet_name_is_case_insensitive() {
        let mut writer = XlsxWriter::new("unused.xlsx");
        assert_eq!(writer.derive_unique_sheet_name("Room"), "Room");
        assert_eq!(writer.derive_unique_sheet_name("ROOM"), "ROOM__2");
        assert_eq!(writer.derive_unique_sheet_name("room"), "room__3");
    }

    #[test]
    fn derive_format_cache_dedupes_equal_formats() {
        let fmt_a = SpecCellFormat {
            bold: Some(true),
            ..Default::default()
        };
        let fmt_b = SpecCellFormat::default();
        let mut builder = SpecSheetPlanBuilder::new("S");
        builder.push_row(
            vec![
                SpecCellPlan::new("a", &fmt_a),
                SpecCellPlan::new("b", &fmt_a),
                SpecCellPlan::new("c", &fmt_b),
            ],
            None,
        );
        assert_eq!(derive_format_cache(&builder.build()).len(), 2);
    }

    #[test]
    fn write_after_close_is_rejected() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mut writer = XlsxWriter::new(tmp.path().join("out.xlsx"));
        writer.close().expect("close");
        writer.close().expect("close twice");

        let err = writer
            .write_sheet_plan(&SpecSheetPlanBuilder::new("S").build())
            .unwrap_err();
        assert!(matches!(err, XlsxIoError::Closed));
        assert!(tmp.path().join("out.xlsx").exists());
    }
}
