//! Grid layout projector for the per-room seating chart.

use crate::spec::{SpecGridShape, SpecSegment, SpecStudent};

/// One occupied bench.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSeat {
    /// Local serial number, restarting at 1 in every room.
    pub n_seq: usize,
    pub roll_number: String,
}

/// A room's segment laid out on its bench grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecRoomGrid {
    pub room_number: String,
    /// Number of bench columns; the sheet is twice as wide.
    pub n_cols: usize,
    /// `rows[r][c]`, `None` for an empty bench.
    pub rows: Vec<Vec<Option<SpecSeat>>>,
}

impl SpecRoomGrid {
    /// Occupied benches in row-major order.
    pub fn iter_seats(&self) -> impl Iterator<Item = &SpecSeat> {
        self.rows.iter().flatten().flatten()
    }

    pub fn n_filled(&self) -> usize {
        self.iter_seats().count()
    }
}

/// Lay `segment` onto `shape`, row by row and left to right within a row.
///
/// When the grid has fewer benches than the segment, extra rows are added
/// so every student of the segment still gets a bench.
pub fn layout_room_grid(
    room_number: &str,
    shape: SpecGridShape,
    segment: &SpecSegment,
    students: &[SpecStudent],
) -> SpecRoomGrid {
    let l_students = segment.students(students);
    let n_cols = shape.cols.max(1);
    let n_rows_needed = l_students.len().div_ceil(n_cols);
    let n_rows = shape.rows.max(n_rows_needed);
    if n_rows > shape.rows {
        tracing::warn!(
            room = room_number,
            rows = shape.rows,
            cols = shape.cols,
            n_students = l_students.len(),
            n_rows,
            "grid smaller than room allocation; added rows"
        );
    }

    let mut iter_students = l_students.iter().enumerate();
    let rows = (0..n_rows)
        .map(|_| {
            (0..n_cols)
                .map(|_| {
                    iter_students.next().map(|(idx, student)| SpecSeat {
                        n_seq: idx + 1,
                        roll_number: student.roll_number.clone(),
                    })
                })
                .collect()
        })
        .collect();

    SpecRoomGrid {
        room_number: room_number.to_string(),
        n_cols,
        rows,
    }
}
