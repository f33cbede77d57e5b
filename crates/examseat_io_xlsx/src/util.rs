//! Stateless helper utilities used by the reader and writer kernels.

use std::collections::{BTreeMap, BTreeSet};

use crate::conf::{
    C_COLUMN_NAME_FALLBACK, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX,
    TUP_EXCEL_ILLEGAL,
};
use crate::spec::{SpecSheetHorizontalMerge, SpecSheetPlan};

////////////////////////////////////////////////////////////////////////////////
// #region CellValueConversion

/// Render a number the way a spreadsheet shows it: integers without decimals.
pub fn convert_number_to_text(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e15 {
        format!("{}", x as i64)
    } else {
        format!("{x}")
    }
}

/// Trim text; whitespace-only becomes missing.
pub fn convert_blank_to_none(text: &str) -> Option<String> {
    let c_text = text.trim();
    if c_text.is_empty() {
        None
    } else {
        Some(c_text.to_string())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region HeaderUtils

/// Derive unique, non-empty column names from a raw header row.
///
/// Blank headers become `column_<idx>`; repeats get `_<n>` suffixes.
pub fn derive_unique_column_names(header: &[Option<String>]) -> Vec<String> {
    let mut set_names_used = BTreeSet::new();
    let mut l_names = Vec::with_capacity(header.len());

    for (n_idx, c_raw) in header.iter().enumerate() {
        let c_base = match c_raw {
            Some(c_name) => c_name.clone(),
            None => format!("{C_COLUMN_NAME_FALLBACK}_{n_idx}"),
        };

        let mut c_name = c_base.clone();
        let mut n_suffix = 1usize;
        while set_names_used.contains(&c_name) {
            c_name = format!("{c_base}_{n_suffix}");
            n_suffix += 1;
        }
        set_names_used.insert(c_name.clone());
        l_names.push(c_name);
    }

    l_names
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().trim_matches('\'').to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

/// Create suffixed sheet name (`base__2`, `base__3`, ...), respecting length cap.
pub fn create_sheet_identifier(base_name: &str, part_idx_1based: usize) -> String {
    let c_sheet_name_suffix = format!("__{part_idx_1based}");
    let n_len_base_name_max = N_LEN_EXCEL_SHEET_NAME_MAX.saturating_sub(c_sheet_name_suffix.len());

    let c_sheet_name_base: String = base_name
        .chars()
        .take(usize::max(1, n_len_base_name_max))
        .collect();

    format!("{c_sheet_name_base}{c_sheet_name_suffix}")
}

/// Check a plan against Excel limits and merge consistency.
pub fn validate_sheet_plan(plan: &SpecSheetPlan) -> Result<(), String> {
    if plan.rows.len() > N_NROWS_EXCEL_MAX {
        return Err(format!(
            "Sheet {:?} has {} rows; Excel allows {N_NROWS_EXCEL_MAX}.",
            plan.sheet_name,
            plan.rows.len()
        ));
    }
    let n_width = usize::max(plan.width(), plan.widths_by_col.len());
    if n_width > N_NCOLS_EXCEL_MAX {
        return Err(format!(
            "Sheet {:?} has {n_width} columns; Excel allows {N_NCOLS_EXCEL_MAX}.",
            plan.sheet_name
        ));
    }

    let mut dict_merges_by_row: BTreeMap<usize, Vec<&SpecSheetHorizontalMerge>> = BTreeMap::new();
    for merge in &plan.merges {
        if merge.row_idx >= plan.rows.len() {
            return Err(format!(
                "Merge on row {} is outside sheet {:?} ({} rows).",
                merge.row_idx,
                plan.sheet_name,
                plan.rows.len()
            ));
        }
        if merge.col_idx_end <= merge.col_idx_start {
            return Err(format!(
                "Merge on row {} must span >= 2 columns (got {}..={}).",
                merge.row_idx, merge.col_idx_start, merge.col_idx_end
            ));
        }
        if merge.col_idx_end >= N_NCOLS_EXCEL_MAX {
            return Err(format!(
                "Merge on row {} ends past Excel column limit.",
                merge.row_idx
            ));
        }
        dict_merges_by_row.entry(merge.row_idx).or_default().push(merge);
    }

    for (row_idx, l_merges) in dict_merges_by_row.iter_mut() {
        l_merges.sort_by_key(|merge| merge.col_idx_start);
        for pair in l_merges.windows(2) {
            if pair[1].col_idx_start <= pair[0].col_idx_end {
                return Err(format!(
                    "Overlapping merges on row {row_idx}: {}..={} and {}..={}.",
                    pair[0].col_idx_start,
                    pair[0].col_idx_end,
                    pair[1].col_idx_start,
                    pair[1].col_idx_end
                ));
            }
        }
    }

    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region MergeUtils

/// Build lookup set for cells covered by a horizontal merge (excluding anchor).
pub fn derive_horizontal_merge_tracker(
    merges: &[SpecSheetHorizontalMerge],
) -> BTreeSet<(usize, usize)> {
    let mut set_merged_cells = BTreeSet::new();

    for merge in merges {
        for col_idx in (merge.col_idx_start + 1)..=merge.col_idx_end {
            set_merged_cells.insert((merge.row_idx, col_idx));
        }
    }

    set_merged_cells
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{SpecCellFormat, SpecSheetPlanBuilder};

    #[test]
    fn sanitize_sheet_name_replaces_illegal_and_truncates() {
        assert_eq!(sanitize_sheet_name("A/B:C", "_"), "A_B_C");
        assert_eq!(sanitize_sheet_name("   ", "_"), "Sheet");
        assert_eq!(sanitize_sheet_name(&"x".repeat(40), "_").len(), 31);
    }

    #[test]
    fn create_sheet_identifier_respects_length_cap() {
        assert_eq!(create_sheet_identifier("101", 2), "101__2");
        let c_name = create_sheet_identifier(&"r".repeat(31), 12);
        assert_eq!(c_name.chars().count(), 31);
        assert!(c_name.ends_with("__12"));
    }

    #[test]
    fn derive_unique_column_names_fills_blanks_and_dedupes() {
        let header = vec![
            Some("S.No".to_string()),
            None,
            Some("Name".to_string()),
            Some("Name".to_string()),
        ];
        assert_eq!(
            derive_unique_column_names(&header),
            vec!["S.No", "column_1", "Name", "Name_1"]
        );
    }

    #[test]
    fn convert_number_to_text_drops_integral_fraction() {
        assert_eq!(convert_number_to_text(101.0), "101");
        assert_eq!(convert_number_to_text(2.5), "2.5");
        assert_eq!(convert_blank_to_none("  "), None);
        assert_eq!(convert_blank_to_none(" A1 ").as_deref(), Some("A1"));
    }

    #[test]
    fn validate_sheet_plan_rejects_overlapping_merges() {
        let fmt = SpecCellFormat::default();
        let mut builder = SpecSheetPlanBuilder::new("S");
        builder.push_merged_row("title", &fmt, 4, None);
        builder.merge(0, 2, 5);

        let err = validate_sheet_plan(&builder.build()).unwrap_err();
        assert!(err.contains("Overlapping merges on row 0"), "{err}");
    }

    #[test]
    fn validate_sheet_plan_rejects_merge_outside_rows() {
        let mut builder = SpecSheetPlanBuilder::new("S");
        builder.merge(3, 0, 1);

        assert!(validate_sheet_plan(&builder.build()).is_err());
    }

    #[test]
    fn horizontal_merge_tracker_excludes_anchor() {
        let merges = vec![SpecSheetHorizontalMerge {
            row_idx: 2,
            col_idx_start: 1,
            col_idx_end: 3,
        }];
        let set_cells = derive_horizontal_merge_tracker(&merges);
        assert!(!set_cells.contains(&(2, 1)));
        assert!(set_cells.contains(&(2, 2)));
        assert!(set_cells.contains(&(2, 3)));
        assert_eq!(set_cells.len(), 2);
    }
}
