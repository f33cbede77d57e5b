//! Sheet reader that loads one worksheet into a string-typed DataFrame.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use polars::prelude::{AnyValue, Column, DataFrame};

use crate::error::{XlsxIoError, XlsxResult};
use crate::util::{convert_blank_to_none, convert_number_to_text, derive_unique_column_names};

/// Read the sheet at `sheet_idx` into a DataFrame of nullable string columns.
///
/// The first non-empty row is the header. Column positions are absolute:
/// column `A` is always index 0, even when it holds no data. Rows where
/// every cell is blank are dropped.
pub fn read_sheet_dataframe(path_file_in: impl AsRef<Path>, sheet_idx: usize) -> XlsxResult<DataFrame> {
    let path_file_in = path_file_in.as_ref();
    let mut workbook = open_workbook_auto(path_file_in)?;
    let range = workbook
        .worksheet_range_at(sheet_idx)
        .ok_or_else(|| XlsxIoError::MissingSheet {
            path: path_file_in.to_path_buf(),
            index: sheet_idx,
        })??;

    let Some((_, n_col_start)) = range.start() else {
        return Ok(DataFrame::empty());
    };
    let n_col_start = n_col_start as usize;
    let n_width = n_col_start + range.width();

    let mut l_grid: Vec<Vec<Option<String>>> = Vec::with_capacity(range.height());
    for row in range.rows() {
        let mut l_row = vec![None; n_col_start];
        l_row.extend(row.iter().map(convert_data_to_text));
        if l_row.iter().all(Option::is_none) {
            continue;
        }
        l_grid.push(l_row);
    }

    let Some((l_header, l_body)) = l_grid.split_first() else {
        return Ok(DataFrame::empty());
    };
    let l_colnames = derive_unique_column_names(l_header);

    let mut l_columns = Vec::with_capacity(n_width);
    for (n_idx_col, c_name) in l_colnames.iter().enumerate() {
        let l_values: Vec<Option<String>> = l_body
            .iter()
            .map(|row| row.get(n_idx_col).cloned().flatten())
            .collect();
        l_columns.push(Column::new(c_name.as_str().into(), l_values));
    }

    let df = DataFrame::new(l_columns)?;
    tracing::debug!(
        path = %path_file_in.display(),
        sheet_idx,
        height = df.height(),
        width = df.width(),
        "sheet loaded"
    );
    Ok(df)
}

/// Convert one DataFrame cell into owned text; nulls stay `None`.
pub fn derive_text_from_any_value(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(val) => convert_blank_to_none(val),
        AnyValue::StringOwned(val) => convert_blank_to_none(val.as_str()),
        AnyValue::Float64(val) => Some(convert_number_to_text(val)),
        AnyValue::Float32(val) => Some(convert_number_to_text(val as f64)),
        _ => convert_blank_to_none(&value.to_string()),
    }
}

fn convert_data_to_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(val) => convert_blank_to_none(val),
        Data::Float(val) => Some(convert_number_to_text(*val)),
        Data::Int(val) => Some(val.to_string()),
        Data::Bool(val) => Some(if *val { "TRUE" } else { "FALSE" }.to_string()),
        Data::Error(err) => Some(format!("#{err:?}")),
        Data::DateTime(dt) => Some(convert_number_to_text(dt.as_f64())),
        Data::DateTimeIso(val) => convert_blank_to_none(val),
        Data::DurationIso(val) => convert_blank_to_none(val),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_data_to_text_trims_and_formats() {
        assert_eq!(convert_data_to_text(&Data::Empty), None);
        assert_eq!(convert_data_to_text(&Data::String("  ".to_string())), None);
        assert_eq!(
            convert_data_to_text(&Data::Float(101.0)).as_deref(),
            Some("101")
        );
        assert_eq!(convert_data_to_text(&Data::Int(7)).as_deref(), Some("7"));
        assert_eq!(
            convert_data_to_text(&Data::Bool(true)).as_deref(),
            Some("TRUE")
        );
    }

    #[test]
    fn derive_text_from_any_value_trims_and_formats() {
        assert_eq!(derive_text_from_any_value(AnyValue::Null), None);
        assert_eq!(
            derive_text_from_any_value(AnyValue::String(" 23A01 ")).as_deref(),
            Some("23A01")
        );
        assert_eq!(
            derive_text_from_any_value(AnyValue::Float64(30.0)).as_deref(),
            Some("30")
        );
        assert_eq!(
            derive_text_from_any_value(AnyValue::Int64(12)).as_deref(),
            Some("12")
        );
    }
}
