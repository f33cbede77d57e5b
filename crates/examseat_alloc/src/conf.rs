//! Output constants and document format presets.

use examseat_io_xlsx::{N_BORDER_THIN, SpecCellFormat, derive_default_cell_format};

/// Room-summary workbook name.
pub const C_FILE_PLAN: &str = "plan_updated.xlsx";
/// Per-room grid workbook name.
pub const C_FILE_ARRANGEMENT: &str = "seating_arrangement.xlsx";
/// Signature workbook name.
pub const C_FILE_SIGNATURE: &str = "signature_list.xlsx";

pub const C_SHEET_PLAN: &str = "Seating Plan";
pub const C_SHEET_SIGNATURE: &str = "Signature List";

pub const C_STEP_PLAN: &str = "seating plan";
pub const C_STEP_ARRANGEMENT: &str = "seating arrangement";
pub const C_STEP_SIGNATURE: &str = "signature list";

/// Zero-based sheet positions in the input workbook.
pub const N_IDX_SHEET_ROSTER: usize = 0;
pub const N_IDX_SHEET_ROOMS: usize = 1;

pub const TUP_PLAN_HEADERS: [&str; 4] = ["S.No", "ROOM NO", "ROLL NO", "NUMBER OF STUDENTS"];
pub const TUP_PLAN_WIDTHS: [f64; 4] = [12.0, 15.0, 20.0, 18.0];

pub const TUP_SIGNATURE_HEADERS: [&str; 5] =
    ["S.NO", "HTNO", "Name", "Answer Booklet No", "Signature"];
pub const TUP_SIGNATURE_WIDTHS: [f64; 5] = [8.0, 15.0, 30.0, 20.0, 18.0];

/// Width of every arrangement column.
pub const N_WIDTH_GRID_COL: f64 = 15.0;
pub const C_GRID_SERIAL_LABEL: &str = "S.NO";

/// Named formats used by the three document builders.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecSeatingFormats {
    pub plan_header: SpecCellFormat,
    pub plan_cell: SpecCellFormat,

    pub title_12: SpecCellFormat,
    pub title_11: SpecCellFormat,
    pub title_10: SpecCellFormat,
    pub info_left: SpecCellFormat,
    pub grid_row_header: SpecCellFormat,
    pub grid_sub_header: SpecCellFormat,
    pub grid_cell: SpecCellFormat,

    pub signature_title: SpecCellFormat,
    pub signature_room: SpecCellFormat,
    pub signature_header: SpecCellFormat,
    pub signature_cell: SpecCellFormat,
    pub signature_cell_left: SpecCellFormat,
}

fn derive_bold_centered(font_size: i64) -> SpecCellFormat {
    derive_default_cell_format().with_(SpecCellFormat {
        font_size: Some(font_size),
        bold: Some(true),
        align: Some("center".to_string()),
        ..Default::default()
    })
}

/// Build the format presets for all seating documents.
pub fn derive_seating_formats() -> SpecSeatingFormats {
    let cfg_base_fmt_spec = derive_default_cell_format();
    let fmt_bordered_center = cfg_base_fmt_spec.with_(SpecCellFormat {
        align: Some("center".to_string()),
        border: Some(N_BORDER_THIN),
        ..Default::default()
    });

    let fmt_title_10 = derive_bold_centered(10);
    let fmt_grid_row_header = derive_bold_centered(9);
    let fmt_signature_title = derive_bold_centered(12).with_(SpecCellFormat {
        text_wrap: Some(true),
        ..Default::default()
    });

    SpecSeatingFormats {
        plan_header: fmt_bordered_center.with_(SpecCellFormat {
            font_size: Some(12),
            bold: Some(true),
            font_color: Some("#FFFFFF".to_string()),
            bg_color: Some("#004AAD".to_string()),
            ..Default::default()
        }),
        plan_cell: fmt_bordered_center.clone(),

        title_12: derive_bold_centered(12),
        title_11: derive_bold_centered(11),
        info_left: fmt_title_10.with_(SpecCellFormat {
            align: Some("left".to_string()),
            ..Default::default()
        }),
        title_10: fmt_title_10,
        grid_sub_header: fmt_grid_row_header.with_(SpecCellFormat {
            border: Some(N_BORDER_THIN),
            ..Default::default()
        }),
        grid_row_header: fmt_grid_row_header,
        grid_cell: fmt_bordered_center.with_(SpecCellFormat {
            font_size: Some(9),
            ..Default::default()
        }),

        signature_title: fmt_signature_title,
        signature_room: cfg_base_fmt_spec.with_(SpecCellFormat {
            bold: Some(true),
            align: Some("left".to_string()),
            ..Default::default()
        }),
        signature_header: fmt_bordered_center.with_(SpecCellFormat {
            bold: Some(true),
            text_wrap: Some(true),
            ..Default::default()
        }),
        signature_cell: fmt_bordered_center.with_(SpecCellFormat {
            text_wrap: Some(true),
            ..Default::default()
        }),
        signature_cell_left: cfg_base_fmt_spec.with_(SpecCellFormat {
            align: Some("left".to_string()),
            border: Some(N_BORDER_THIN),
            ..Default::default()
        }),
    }
}
