//! Styled sheet plans for the three seating workbooks.
//!
//! Builders here only emit [`SpecSheetPlan`] descriptors; rendering is left
//! to [`examseat_io_xlsx::XlsxWriter`].

use examseat_io_xlsx::{SpecCellPlan, SpecSheetPlan, SpecSheetPlanBuilder};

use crate::conf::{
    C_GRID_SERIAL_LABEL, C_SHEET_PLAN, C_SHEET_SIGNATURE, N_WIDTH_GRID_COL, SpecSeatingFormats,
    TUP_PLAN_HEADERS, TUP_PLAN_WIDTHS, TUP_SIGNATURE_HEADERS, TUP_SIGNATURE_WIDTHS,
    derive_seating_formats,
};
use crate::layout::SpecRoomGrid;
use crate::project::{SpecSignatureBlock, SpecSummaryRow};
use crate::spec::SpecSeatingConfig;

/// Builds sheet plans from projections using one config and format set.
#[derive(Debug, Clone)]
pub struct SeatingDocumentBuilder<'a> {
    cfg: &'a SpecSeatingConfig,
    formats: SpecSeatingFormats,
}

impl<'a> SeatingDocumentBuilder<'a> {
    pub fn new(cfg: &'a SpecSeatingConfig) -> Self {
        Self {
            cfg,
            formats: derive_seating_formats(),
        }
    }

    ////////////////////////////////////////////////////////////////////////////
    // #region PlanSheet

    /// Room-summary sheet: styled header plus one row per summary entry.
    pub fn build_plan_sheet(&self, l_rows: &[SpecSummaryRow]) -> SpecSheetPlan {
        let fmts = &self.formats;
        let mut builder = SpecSheetPlanBuilder::new(C_SHEET_PLAN);
        builder.widths(&TUP_PLAN_WIDTHS);

        builder.push_row(
            TUP_PLAN_HEADERS
                .iter()
                .map(|header| SpecCellPlan::new(*header, &fmts.plan_header))
                .collect(),
            Some(20.0),
        );
        for row in l_rows {
            builder.push_row(
                vec![
                    SpecCellPlan::new(row.n_serial, &fmts.plan_cell),
                    SpecCellPlan::new(row.room_number.as_str(), &fmts.plan_cell),
                    SpecCellPlan::new(row.roll_range.as_str(), &fmts.plan_cell),
                    SpecCellPlan::new(row.n_students, &fmts.plan_cell),
                ],
                Some(18.0),
            );
        }
        builder.build()
    }

    // #endregion
    ////////////////////////////////////////////////////////////////////////////
    // #region ArrangementSheet

    /// One room's seating chart: title block, bench grid and total line.
    pub fn build_arrangement_sheet(&self, grid: &SpecRoomGrid) -> SpecSheetPlan {
        let fmts = &self.formats;
        let cfg = self.cfg;
        let n_width = grid.n_cols * 2;

        let mut builder = SpecSheetPlanBuilder::new(grid.room_number.as_str());
        builder.widths(&vec![N_WIDTH_GRID_COL; n_width]);

        builder.push_merged_row(cfg.institution.as_str(), &fmts.title_12, n_width, Some(20.0));
        builder.push_merged_row(cfg.autonomy.as_str(), &fmts.title_11, n_width, Some(18.0));
        builder.push_merged_row(cfg.exam_title.as_str(), &fmts.title_10, n_width, Some(18.0));
        builder.push_merged_row(
            cfg.arrangement_title.as_str(),
            &fmts.title_10,
            n_width,
            Some(18.0),
        );
        builder.push_blank_row(Some(10.0));

        self.push_room_info_row(&mut builder, &grid.room_number, n_width);
        builder.push_merged_row(cfg.exam_time.as_str(), &fmts.info_left, n_width, Some(16.0));
        builder.push_blank_row(Some(10.0));

        let mut l_row_headers = Vec::with_capacity(n_width);
        let mut l_sub_headers = Vec::with_capacity(n_width);
        for n_idx_col in 0..grid.n_cols {
            l_row_headers.push(SpecCellPlan::new(
                format!("ROW-{}", n_idx_col + 1),
                &fmts.grid_row_header,
            ));
            l_row_headers.push(SpecCellPlan::blank(&fmts.grid_row_header));
            l_sub_headers.push(SpecCellPlan::new(C_GRID_SERIAL_LABEL, &fmts.grid_sub_header));
            l_sub_headers.push(SpecCellPlan::new(
                cfg.seat_column_label.as_str(),
                &fmts.grid_sub_header,
            ));
        }
        let n_idx_row_headers = builder.push_row(l_row_headers, Some(16.0));
        for n_idx_col in 0..grid.n_cols {
            builder.merge(n_idx_row_headers, 2 * n_idx_col, 2 * n_idx_col + 1);
        }
        builder.push_row(l_sub_headers, Some(16.0));

        for row in &grid.rows {
            let mut l_cells = Vec::with_capacity(n_width);
            for seat in row {
                match seat {
                    Some(seat) => {
                        l_cells.push(SpecCellPlan::new(seat.n_seq, &fmts.grid_cell));
                        l_cells.push(SpecCellPlan::new(seat.roll_number.as_str(), &fmts.grid_cell));
                    }
                    None => {
                        l_cells.push(SpecCellPlan::blank(&fmts.grid_cell));
                        l_cells.push(SpecCellPlan::blank(&fmts.grid_cell));
                    }
                }
            }
            builder.push_row(l_cells, Some(20.0));
        }

        builder.push_blank_row(None);
        builder.push_merged_row(
            format!("TOTAL : {}", grid.n_filled()),
            &fmts.title_10,
            n_width,
            Some(18.0),
        );
        builder.build()
    }

    /// Room / date / session line, split into three merged sections.
    fn push_room_info_row(&self, builder: &mut SpecSheetPlanBuilder, room_number: &str, n_width: usize) {
        let fmt = &self.formats.title_10;
        let l_texts = [
            format!("ROOM NO: {room_number}"),
            self.cfg.exam_date.clone(),
            self.cfg.exam_session.clone(),
        ];

        let n_section = n_width / 3;
        if n_section == 0 {
            builder.push_merged_row(l_texts.join("  "), fmt, n_width, Some(18.0));
            return;
        }

        let l_bounds = [
            (0, n_section - 1),
            (n_section, 2 * n_section - 1),
            (2 * n_section, n_width - 1),
        ];
        let mut l_cells: Vec<SpecCellPlan> =
            (0..n_width).map(|_| SpecCellPlan::blank(fmt)).collect();
        for ((n_start, _), text) in l_bounds.iter().zip(l_texts) {
            l_cells[*n_start] = SpecCellPlan::new(text, fmt);
        }
        let n_idx_row = builder.push_row(l_cells, Some(18.0));
        for (n_start, n_end) in l_bounds {
            builder.merge(n_idx_row, n_start, n_end);
        }
    }

    // #endregion
    ////////////////////////////////////////////////////////////////////////////
    // #region SignatureSheet

    /// Single signature sheet with one header block per room.
    pub fn build_signature_sheet(&self, l_blocks: &[SpecSignatureBlock]) -> SpecSheetPlan {
        let fmts = &self.formats;
        let cfg = self.cfg;
        let n_width = TUP_SIGNATURE_HEADERS.len();

        let mut builder = SpecSheetPlanBuilder::new(C_SHEET_SIGNATURE);
        builder.widths(&TUP_SIGNATURE_WIDTHS);

        for block in l_blocks {
            builder.push_merged_row(
                cfg.signature_institution.as_str(),
                &fmts.signature_title,
                n_width,
                Some(20.0),
            );
            builder.push_merged_row(
                cfg.signature_exam_line.as_str(),
                &fmts.signature_title,
                n_width,
                Some(18.0),
            );
            builder.push_merged_row(
                format!("Room No: {}", block.room_number),
                &fmts.signature_room,
                n_width,
                Some(16.0),
            );
            builder.push_blank_row(Some(8.0));
            builder.push_row(
                TUP_SIGNATURE_HEADERS
                    .iter()
                    .map(|header| SpecCellPlan::new(*header, &fmts.signature_header))
                    .collect(),
                Some(18.0),
            );

            for row in &block.rows {
                builder.push_row(
                    vec![
                        SpecCellPlan::new(row.n_seq, &fmts.signature_cell),
                        SpecCellPlan::new(row.roll_number.as_str(), &fmts.signature_cell),
                        SpecCellPlan::new(row.name.as_str(), &fmts.signature_cell_left),
                        SpecCellPlan::blank(&fmts.signature_cell),
                        SpecCellPlan::blank(&fmts.signature_cell),
                    ],
                    Some(20.0),
                );
            }

            builder.push_blank_row(Some(12.0));
            builder.push_blank_row(Some(12.0));
        }
        builder.build()
    }

    // #endregion
    ////////////////////////////////////////////////////////////////////////////
}
