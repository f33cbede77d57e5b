use calamine::{Data, Reader, open_workbook_auto};
use examseat_io_xlsx::{
    SpecCellFormat, SpecCellPlan, SpecSheetPlanBuilder, XlsxIoError, XlsxWriter,
    read_sheet_dataframe,
};
use pretty_assertions::assert_eq;
use rust_xlsxwriter::Workbook;

fn read_text_grid(path: &std::path::Path, sheet_name: &str) -> Vec<Vec<String>> {
    let mut workbook = open_workbook_auto(path).expect("open output");
    let range = workbook.worksheet_range(sheet_name).expect("sheet");
    range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Data::Empty => String::new(),
                    Data::Float(val) => format!("{}", *val as i64),
                    other => other.to_string(),
                })
                .collect()
        })
        .collect()
}

#[test]
fn writer_renders_merged_rows_and_dedupes_sheet_names() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path_out = tmp.path().join("out.xlsx");

    let fmt = SpecCellFormat {
        bold: Some(true),
        border: Some(1),
        ..Default::default()
    };
    let mut builder = SpecSheetPlanBuilder::new("R/1");
    builder.widths(&[10.0, 10.0, 10.0]);
    builder.push_merged_row("TITLE", &fmt, 3, Some(20.0));
    builder.push_row(
        vec![
            SpecCellPlan::new(1usize, &fmt),
            SpecCellPlan::new("A1", &fmt),
            SpecCellPlan::blank(&fmt),
        ],
        None,
    );
    let plan = builder.build();

    let mut writer = XlsxWriter::new(&path_out);
    writer.write_sheet_plan(&plan).expect("first sheet");
    writer.write_sheet_plan(&plan).expect("second sheet");
    writer.close().expect("close");

    let report = writer.report();
    let l_names: Vec<&str> = report.sheets.iter().map(|s| s.sheet_name.as_str()).collect();
    assert_eq!(l_names, vec!["R_1", "R_1__2"]);
    assert_eq!(report.warnings.len(), 1);

    let grid = read_text_grid(&path_out, "R_1");
    assert_eq!(grid[0][0], "TITLE");
    assert_eq!(grid[1][..2], ["1".to_string(), "A1".to_string()]);
}

#[test]
fn reader_keeps_absolute_column_positions_and_drops_blank_rows() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path_in = tmp.path().join("in.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    // Column A left empty on purpose.
    sheet.write_string(0, 1, "Roll").expect("write");
    sheet.write_string(0, 2, "Name").expect("write");
    sheet.write_string(1, 1, "23A01").expect("write");
    sheet.write_string(1, 2, "Asha").expect("write");
    sheet.write_string(3, 1, "23A02").expect("write");
    sheet.write_number(3, 2, 42.0).expect("write");
    workbook.save(&path_in).expect("save");

    let df = read_sheet_dataframe(&path_in, 0).expect("read");
    assert_eq!(df.width(), 3);
    assert_eq!(df.height(), 2);

    let col = &df.get_columns()[1];
    assert_eq!(col.name().as_str(), "Roll");
    assert_eq!(
        examseat_io_xlsx::derive_text_from_any_value(col.get(1).expect("cell")).as_deref(),
        Some("23A02")
    );
    let col_name = &df.get_columns()[2];
    assert_eq!(
        examseat_io_xlsx::derive_text_from_any_value(col_name.get(1).expect("cell")).as_deref(),
        Some("42")
    );
}

#[test]
fn reader_reports_missing_sheet() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path_in = tmp.path().join("one.xlsx");

    let mut workbook = Workbook::new();
    workbook.add_worksheet();
    workbook.save(&path_in).expect("save");

    let err = read_sheet_dataframe(&path_in, 1).unwrap_err();
    assert!(matches!(err, XlsxIoError::MissingSheet { index: 1, .. }));
}
