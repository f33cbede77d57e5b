//! Parse and validate the roster and room tables.

use examseat_io_xlsx::derive_text_from_any_value;
use polars::prelude::{BooleanChunked, Column, DataFrame};
use regex::Regex;

use crate::error::{SeatingError, SeatingResult};
use crate::spec::{EnumShapeRule, SpecGridShape, SpecRoom, SpecSeatingConfig, SpecStudent};

const C_SHEET_ROSTER: &str = "roster";
const C_SHEET_ROOMS: &str = "rooms";
/// Data row `i` sits on sheet row `i + 2` (header is row 1).
const N_ROW_OFFSET_SHEET: usize = 2;

const C_PATTERN_GRID_SHAPE: &str = r"^\s*(\d+)\s*[xX]\s*(\d+)\s*$";

////////////////////////////////////////////////////////////////////////////////
// #region ScalarParsing

/// Compiled matcher for `RxC` room sizes.
#[derive(Debug, Clone)]
pub struct SpecGridShapePattern {
    regex: Regex,
}

impl SpecGridShapePattern {
    pub fn new() -> SeatingResult<Self> {
        let regex = Regex::new(C_PATTERN_GRID_SHAPE)?;
        Ok(Self { regex })
    }

    /// Parse a size such as `10X6`; zero rows or columns are rejected.
    pub fn parse_grid_shape(&self, text: &str) -> Option<SpecGridShape> {
        let caps = self.regex.captures(text)?;
        let rows = caps.get(1)?.as_str().parse::<usize>().ok()?;
        let cols = caps.get(2)?.as_str().parse::<usize>().ok()?;
        if rows == 0 || cols == 0 {
            return None;
        }
        Some(SpecGridShape { rows, cols })
    }
}

/// Parse a bench count written as an integer or an integral float (`30.0`).
pub fn parse_capacity(text: &str) -> Option<usize> {
    let text = text.trim();
    if let Ok(val) = text.parse::<usize>() {
        return Some(val);
    }
    let val = text.parse::<f64>().ok()?;
    if !val.is_finite() || val < 0.0 || val.fract() != 0.0 || val > usize::MAX as f64 {
        return None;
    }
    Some(val as usize)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RosterParsing

/// Read the roster; rows without a roll number are dropped.
///
/// Name, section and branch are read when their columns exist.
pub fn parse_roster(df: &DataFrame, cfg: &SpecSeatingConfig) -> SeatingResult<Vec<SpecStudent>> {
    if df.height() == 0 {
        return Ok(Vec::new());
    }
    let col_roll = select_column_at(df, cfg.idx_col_roll)?;
    let df_kept = df.filter(&col_roll.is_not_null())?;
    log_dropped_rows(df.height(), df_kept.height(), "missing roll number");

    collect_students(&df_kept, cfg)
}

/// Read the roster for the signature list.
///
/// Rows missing any of roll number, name, section or branch are dropped.
pub fn parse_signature_roster(
    df: &DataFrame,
    cfg: &SpecSeatingConfig,
) -> SeatingResult<Vec<SpecStudent>> {
    if df.height() == 0 {
        return Ok(Vec::new());
    }
    let l_idx_required = [
        cfg.idx_col_roll,
        cfg.idx_col_name,
        cfg.idx_col_section,
        cfg.idx_col_branch,
    ];
    let mut mask: Option<BooleanChunked> = None;
    for n_idx_col in l_idx_required {
        let mask_col = select_column_at(df, n_idx_col)?.is_not_null();
        mask = Some(match mask {
            None => mask_col,
            Some(mask_prev) => &mask_prev & &mask_col,
        });
    }
    let df_kept = match mask {
        Some(mask) => df.filter(&mask)?,
        None => df.clone(),
    };
    log_dropped_rows(df.height(), df_kept.height(), "incomplete student record");

    collect_students(&df_kept, cfg)
}

fn collect_students(df: &DataFrame, cfg: &SpecSeatingConfig) -> SeatingResult<Vec<SpecStudent>> {
    let col_roll = select_column_at(df, cfg.idx_col_roll)?;
    let col_name = df.get_columns().get(cfg.idx_col_name);
    let col_section = df.get_columns().get(cfg.idx_col_section);
    let col_branch = df.get_columns().get(cfg.idx_col_branch);

    let mut l_students = Vec::with_capacity(df.height());
    for n_idx_row in 0..df.height() {
        let Some(roll_number) = read_text_at(col_roll, n_idx_row)? else {
            continue;
        };
        l_students.push(SpecStudent {
            roll_number,
            name: read_optional_text_at(col_name, n_idx_row)?,
            section: read_optional_text_at(col_section, n_idx_row)?,
            branch: read_optional_text_at(col_branch, n_idx_row)?,
        });
    }
    Ok(l_students)
}

fn log_dropped_rows(n_before: usize, n_after: usize, reason: &str) {
    let n_dropped = n_before.saturating_sub(n_after);
    if n_dropped > 0 {
        tracing::warn!(n_dropped, reason, "dropped roster rows");
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RoomParsing

/// Read the room list in sheet order.
///
/// Every row must carry a room number and a numeric capacity. The `Size`
/// column is validated according to `shape_rule`.
pub fn parse_rooms(
    df: &DataFrame,
    cfg: &SpecSeatingConfig,
    shape_rule: EnumShapeRule,
) -> SeatingResult<Vec<SpecRoom>> {
    if df.height() == 0 {
        return Ok(Vec::new());
    }
    let col_room = select_column_named(df, &cfg.header_room_number)?;
    let col_capacity = select_column_named(df, &cfg.header_capacity)?;
    let col_size = match shape_rule {
        EnumShapeRule::Required => Some(select_column_named(df, &cfg.header_size)?),
        EnumShapeRule::Optional => df.column(&cfg.header_size).ok(),
    };

    let pattern_shape = SpecGridShapePattern::new()?;

    let mut l_rooms = Vec::with_capacity(df.height());
    for n_idx_row in 0..df.height() {
        let n_row_sheet = n_idx_row + N_ROW_OFFSET_SHEET;

        let room_number = read_text_at(col_room, n_idx_row)?.ok_or_else(|| {
            SeatingError::input_format(C_SHEET_ROOMS, n_row_sheet, "missing room number")
        })?;

        let c_capacity = read_text_at(col_capacity, n_idx_row)?.unwrap_or_default();
        let capacity = parse_capacity(&c_capacity).ok_or_else(|| {
            SeatingError::input_format(
                C_SHEET_ROOMS,
                n_row_sheet,
                format!("capacity {c_capacity:?} of room {room_number} is not a whole number"),
            )
        })?;

        let c_size = read_optional_text_at(col_size, n_idx_row)?;
        let grid_shape = c_size
            .as_deref()
            .and_then(|text| pattern_shape.parse_grid_shape(text));
        if shape_rule == EnumShapeRule::Required && grid_shape.is_none() {
            return Err(SeatingError::input_format(
                C_SHEET_ROOMS,
                n_row_sheet,
                format!(
                    "size {:?} of room {room_number} is not of the form RxC",
                    c_size.unwrap_or_default()
                ),
            ));
        }

        l_rooms.push(SpecRoom {
            room_number,
            capacity,
            grid_shape,
            row_idx_source: n_row_sheet,
        });
    }
    Ok(l_rooms)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ColumnAccess

fn select_column_at(df: &DataFrame, n_idx_col: usize) -> SeatingResult<&Column> {
    df.get_columns()
        .get(n_idx_col)
        .ok_or_else(|| SeatingError::MissingColumn {
            sheet: C_SHEET_ROSTER,
            column: format!("#{}", n_idx_col + 1),
        })
}

fn select_column_named<'a>(df: &'a DataFrame, name: &str) -> SeatingResult<&'a Column> {
    df.column(name).map_err(|_| SeatingError::MissingColumn {
        sheet: C_SHEET_ROOMS,
        column: name.to_string(),
    })
}

fn read_text_at(col: &Column, n_idx_row: usize) -> SeatingResult<Option<String>> {
    Ok(derive_text_from_any_value(col.get(n_idx_row)?))
}

fn read_optional_text_at(col: Option<&Column>, n_idx_row: usize) -> SeatingResult<Option<String>> {
    match col {
        Some(col) => read_text_at(col, n_idx_row),
        None => Ok(None),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
