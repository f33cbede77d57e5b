//! Allocation data model and document configuration.

use std::ops::Range;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{SeatingError, SeatingResult};

////////////////////////////////////////////////////////////////////////////////
// #region InputModels

/// One roster entry. Source order is seating order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecStudent {
    /// Hall-ticket / roll number; identity of the student.
    pub roll_number: String,
    pub name: Option<String>,
    pub section: Option<String>,
    pub branch: Option<String>,
}

impl SpecStudent {
    /// Student known only by roll number.
    pub fn new(roll_number: impl Into<String>) -> Self {
        Self {
            roll_number: roll_number.into(),
            name: None,
            section: None,
            branch: None,
        }
    }
}

/// Bench layout of a room, `rows` x `cols`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecGridShape {
    pub rows: usize,
    pub cols: usize,
}

/// One room row of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecRoom {
    pub room_number: String,
    /// Number of benches; caps how many students the room takes.
    pub capacity: usize,
    /// Parsed `RxC` size, absent when not required and not well-formed.
    pub grid_shape: Option<SpecGridShape>,
    /// 1-based sheet row the room came from.
    pub row_idx_source: usize,
}

/// Whether the room sheet must carry a valid `Size` for every room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumShapeRule {
    /// Missing column or malformed value is an input error.
    Required,
    /// Parsed when well-formed, otherwise left absent.
    Optional,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region AllocationModels

/// Contiguous student range `[idx_start, idx_end)` assigned to one room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecSegment {
    /// Position of the room in the room list.
    pub room_idx: usize,
    pub idx_start: usize,
    pub idx_end: usize,
}

impl SpecSegment {
    pub fn len(&self) -> usize {
        self.idx_end - self.idx_start
    }

    pub fn is_empty(&self) -> bool {
        self.idx_end == self.idx_start
    }

    pub fn range(&self) -> Range<usize> {
        self.idx_start..self.idx_end
    }

    /// Students of this segment; empty if `students` is not the partitioned list.
    pub fn students<'a>(&self, students: &'a [SpecStudent]) -> &'a [SpecStudent] {
        students.get(self.range()).unwrap_or(&[])
    }
}

/// Result of one partitioner pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecAllocation {
    /// Non-empty segments in room order.
    pub segments: Vec<SpecSegment>,
    /// Length of the partitioned student list.
    pub n_students: usize,
}

impl SpecAllocation {
    /// Students that received a seat.
    pub fn n_assigned(&self) -> usize {
        self.segments.iter().map(SpecSegment::len).sum()
    }

    /// Students left over once every room is full.
    pub fn n_unassigned(&self) -> usize {
        self.n_students - self.n_assigned()
    }
}

/// Output paths of a full run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecGenerationReport {
    pub path_plan: PathBuf,
    pub path_arrangement: PathBuf,
    pub path_signature: PathBuf,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SeatingConfig

/// Document texts and input layout.
///
/// Every field has a default, so a JSON config only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecSeatingConfig {
    pub institution: String,
    pub autonomy: String,
    pub exam_title: String,
    pub arrangement_title: String,
    /// Date text of the room info row, e.g. `DATE: 10/11/2025 to 14/11/2025`.
    pub exam_date: String,
    pub exam_session: String,
    pub exam_time: String,
    /// Header above each roll-number column of the grid.
    pub seat_column_label: String,
    pub signature_institution: String,
    pub signature_exam_line: String,

    /// Zero-based roster column of the roll number.
    pub idx_col_roll: usize,
    pub idx_col_name: usize,
    pub idx_col_section: usize,
    pub idx_col_branch: usize,

    pub header_room_number: String,
    pub header_capacity: String,
    pub header_size: String,
}

impl Default for SpecSeatingConfig {
    fn default() -> Self {
        Self {
            institution: "NARASARAOPETA ENGINEERING COLLEGE:: NARASARAOPET".to_string(),
            autonomy: "AUTONOMOUS".to_string(),
            exam_title: "MID-I EXAMINATIONS OF I B.TECH I- SEMESTER".to_string(),
            arrangement_title: "SEATING ARRANGEMENT PLAN".to_string(),
            exam_date: "DATE: 10/11/2025 to 14/11/2025".to_string(),
            exam_session: "MID-I SESSION: AN".to_string(),
            exam_time: "TIME: 02.10 PM to 04.00 PM".to_string(),
            seat_column_label: "I YEAR".to_string(),
            signature_institution:
                "NARASARAOPETA ENGINEERING COLLEGE : NARASARAOPET (AUTONOMOUS)".to_string(),
            signature_exam_line:
                "(R23) 2025 BATCH I B.TECH I SEM I MID SIGNATURE LIST NOV - 2025".to_string(),
            idx_col_roll: 1,
            idx_col_name: 2,
            idx_col_section: 3,
            idx_col_branch: 4,
            header_room_number: "Room Number".to_string(),
            header_capacity: "Number of Benches".to_string(),
            header_size: "Size".to_string(),
        }
    }
}

impl SpecSeatingConfig {
    /// Parse a JSON config; absent keys keep their defaults.
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Load a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> SeatingResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text).map_err(|source| SeatingError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
