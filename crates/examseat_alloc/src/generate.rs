//! Workbook generation entry points.
//!
//! Each entry point reads the input workbook, parses both sheets, runs the
//! shared partitioner, projects the allocation, and writes one workbook with
//! a fixed name into the storage output directory.

use std::fs;
use std::path::{Path, PathBuf};

use examseat_io_fs::SeatingStorage;
use examseat_io_xlsx::{SpecSheetPlan, XlsxWriter, read_sheet_dataframe};
use polars::prelude::DataFrame;

use crate::conf::{
    C_FILE_ARRANGEMENT, C_FILE_PLAN, C_FILE_SIGNATURE, C_STEP_ARRANGEMENT, C_STEP_PLAN,
    C_STEP_SIGNATURE, N_IDX_SHEET_ROOMS, N_IDX_SHEET_ROSTER,
};
use crate::document::SeatingDocumentBuilder;
use crate::error::{SeatingError, SeatingResult};
use crate::layout::layout_room_grid;
use crate::parse::{parse_roster, parse_rooms, parse_signature_roster};
use crate::partition::partition_students;
use crate::project::{project_signature_blocks, project_summary};
use crate::spec::{
    EnumShapeRule, SpecGenerationReport, SpecRoom, SpecSeatingConfig, SpecStudent,
};

type FnParseRoster = fn(&DataFrame, &SpecSeatingConfig) -> SeatingResult<Vec<SpecStudent>>;

////////////////////////////////////////////////////////////////////////////////
// #region EntryPoints

/// Write the room-summary workbook (`plan_updated.xlsx`).
pub fn create_seating_plan(
    path_input: impl AsRef<Path>,
    storage: &SeatingStorage,
    cfg: &SpecSeatingConfig,
) -> SeatingResult<PathBuf> {
    let path_input = path_input.as_ref();
    let path_out = storage.path_output(C_FILE_PLAN);
    run_generation_step(C_STEP_PLAN, &path_out, || {
        let (l_students, l_rooms) =
            load_input(path_input, cfg, parse_roster, EnumShapeRule::Optional)?;
        let allocation = partition_students(l_students.len(), &l_rooms);

        let l_rows = project_summary(&allocation, &l_rooms, &l_students);
        let plan = SeatingDocumentBuilder::new(cfg).build_plan_sheet(&l_rows);
        write_workbook(&path_out, &[plan])
    })
}

/// Write the per-room grid workbook (`seating_arrangement.xlsx`).
///
/// Every room row must have a valid `RxC` size, even rooms that end up
/// without students.
pub fn generate_seating_arrangement(
    path_input: impl AsRef<Path>,
    storage: &SeatingStorage,
    cfg: &SpecSeatingConfig,
) -> SeatingResult<PathBuf> {
    let path_input = path_input.as_ref();
    let path_out = storage.path_output(C_FILE_ARRANGEMENT);
    run_generation_step(C_STEP_ARRANGEMENT, &path_out, || {
        let (l_students, l_rooms) =
            load_input(path_input, cfg, parse_roster, EnumShapeRule::Required)?;
        let allocation = partition_students(l_students.len(), &l_rooms);

        let builder = SeatingDocumentBuilder::new(cfg);
        let mut l_plans = Vec::with_capacity(allocation.segments.len());
        for seg in &allocation.segments {
            let Some(room) = l_rooms.get(seg.room_idx) else {
                continue;
            };
            let shape = room.grid_shape.ok_or_else(|| {
                SeatingError::input_format(
                    "rooms",
                    room.row_idx_source,
                    format!("room {} has no size", room.room_number),
                )
            })?;
            let grid = layout_room_grid(&room.room_number, shape, seg, &l_students);
            l_plans.push(builder.build_arrangement_sheet(&grid));
        }
        write_workbook(&path_out, &l_plans)
    })
}

/// Write the signature workbook (`signature_list.xlsx`).
///
/// Uses the stricter roster parse: students missing name, section or branch
/// are left out before partitioning.
pub fn generate_signature_list(
    path_input: impl AsRef<Path>,
    storage: &SeatingStorage,
    cfg: &SpecSeatingConfig,
) -> SeatingResult<PathBuf> {
    let path_input = path_input.as_ref();
    let path_out = storage.path_output(C_FILE_SIGNATURE);
    run_generation_step(C_STEP_SIGNATURE, &path_out, || {
        let (l_students, l_rooms) = load_input(
            path_input,
            cfg,
            parse_signature_roster,
            EnumShapeRule::Optional,
        )?;
        let allocation = partition_students(l_students.len(), &l_rooms);

        let l_blocks = project_signature_blocks(&allocation, &l_rooms, &l_students);
        let plan = SeatingDocumentBuilder::new(cfg).build_signature_sheet(&l_blocks);
        write_workbook(&path_out, &[plan])
    })
}

/// Run all three generators against the same input, in order.
pub fn generate_all(
    path_input: impl AsRef<Path>,
    storage: &SeatingStorage,
    cfg: &SpecSeatingConfig,
) -> SeatingResult<SpecGenerationReport> {
    let path_input = path_input.as_ref();
    Ok(SpecGenerationReport {
        path_plan: create_seating_plan(path_input, storage, cfg)?,
        path_arrangement: generate_seating_arrangement(path_input, storage, cfg)?,
        path_signature: generate_signature_list(path_input, storage, cfg)?,
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Helpers

fn load_input(
    path_input: &Path,
    cfg: &SpecSeatingConfig,
    fn_parse_roster: FnParseRoster,
    shape_rule: EnumShapeRule,
) -> SeatingResult<(Vec<SpecStudent>, Vec<SpecRoom>)> {
    let df_roster = read_sheet_dataframe(path_input, N_IDX_SHEET_ROSTER)?;
    let df_rooms = read_sheet_dataframe(path_input, N_IDX_SHEET_ROOMS)?;
    let l_students = fn_parse_roster(&df_roster, cfg)?;
    let l_rooms = parse_rooms(&df_rooms, cfg, shape_rule)?;
    tracing::debug!(
        path = %path_input.display(),
        n_students = l_students.len(),
        n_rooms = l_rooms.len(),
        "loaded input"
    );
    Ok((l_students, l_rooms))
}

fn write_workbook(path_out: &Path, l_plans: &[SpecSheetPlan]) -> SeatingResult<()> {
    let mut writer = XlsxWriter::new(path_out);
    for plan in l_plans {
        writer.write_sheet_plan(plan)?;
    }
    writer.close()?;

    for msg in writer.report().warnings {
        tracing::warn!(path = %path_out.display(), "{msg}");
    }
    Ok(())
}

/// Run one step; on failure remove its output and tag the error with `step`.
fn run_generation_step(
    step: &'static str,
    path_out: &Path,
    fn_step: impl FnOnce() -> SeatingResult<()>,
) -> SeatingResult<PathBuf> {
    match fn_step() {
        Ok(()) => {
            tracing::info!(step, path = %path_out.display(), "generated workbook");
            Ok(path_out.to_path_buf())
        }
        Err(err) => {
            if path_out.exists()
                && let Err(e) = fs::remove_file(path_out)
            {
                tracing::warn!(path = %path_out.display(), error = %e, "could not remove partial output");
            }
            Err(err.in_step(step))
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use examseat_io_fs::SpecStorageOptions;

    #[test]
    fn failed_step_removes_stale_output_and_names_step() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let storage = SeatingStorage::new(SpecStorageOptions::new(
            tmp.path().join("uploads"),
            tmp.path().join("outputs"),
        ))
        .expect("storage");
        let path_out = storage.path_output(C_FILE_PLAN);
        fs::write(&path_out, b"stale").expect("write");

        let err = run_generation_step(C_STEP_PLAN, &path_out, || {
            Err(SeatingError::input_format("rooms", 2, "bad"))
        })
        .unwrap_err();

        assert!(!path_out.exists());
        assert!(err.to_string().starts_with("Error creating seating plan:"), "{err}");
        assert!(matches!(
            err,
            SeatingError::Generation {
                step: "seating plan",
                ..
            }
        ));
    }

    #[test]
    fn missing_input_is_wrapped() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let storage = SeatingStorage::new(SpecStorageOptions::new(
            tmp.path().join("uploads"),
            tmp.path().join("outputs"),
        ))
        .expect("storage");

        let err = generate_signature_list(
            tmp.path().join("absent.xlsx"),
            &storage,
            &SpecSeatingConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SeatingError::Generation {
                step: "signature list",
                ..
            }
        ));
        assert!(!storage.path_output(C_FILE_SIGNATURE).exists());
    }
}
