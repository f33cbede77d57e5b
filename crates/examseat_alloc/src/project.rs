//! Summary and signature projections of an allocation.

use crate::spec::{SpecAllocation, SpecRoom, SpecStudent};

/// One row of the room-summary plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSummaryRow {
    /// 1-based, counting only rooms that received students.
    pub n_serial: usize,
    pub room_number: String,
    /// `first-last` roll numbers in source order.
    pub roll_range: String,
    pub n_students: usize,
}

/// One student line of a signature block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSignatureRow {
    /// 1-based within the room.
    pub n_seq: usize,
    pub roll_number: String,
    pub name: String,
}

/// Per-room block of the signature list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSignatureBlock {
    pub room_number: String,
    pub rows: Vec<SpecSignatureRow>,
}

/// Room number of a segment's room; empty if `rooms` is not the partitioned list.
fn derive_room_number(rooms: &[SpecRoom], room_idx: usize) -> String {
    rooms
        .get(room_idx)
        .map(|room| room.room_number.clone())
        .unwrap_or_default()
}

/// One summary row per non-empty segment.
pub fn project_summary(
    allocation: &SpecAllocation,
    rooms: &[SpecRoom],
    students: &[SpecStudent],
) -> Vec<SpecSummaryRow> {
    allocation
        .segments
        .iter()
        .filter_map(|seg| {
            let l_students = seg.students(students);
            let (first, last) = (l_students.first()?, l_students.last()?);
            Some((seg, first, last, l_students.len()))
        })
        .enumerate()
        .map(|(idx, (seg, first, last, n_students))| SpecSummaryRow {
            n_serial: idx + 1,
            room_number: derive_room_number(rooms, seg.room_idx),
            roll_range: format!("{}-{}", first.roll_number, last.roll_number),
            n_students,
        })
        .collect()
}

/// One signature block per non-empty segment.
pub fn project_signature_blocks(
    allocation: &SpecAllocation,
    rooms: &[SpecRoom],
    students: &[SpecStudent],
) -> Vec<SpecSignatureBlock> {
    allocation
        .segments
        .iter()
        .filter(|seg| !seg.students(students).is_empty())
        .map(|seg| SpecSignatureBlock {
            room_number: derive_room_number(rooms, seg.room_idx),
            rows: seg
                .students(students)
                .iter()
                .enumerate()
                .map(|(idx, student)| SpecSignatureRow {
                    n_seq: idx + 1,
                    roll_number: student.roll_number.clone(),
                    name: student.name.clone().unwrap_or_default(),
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::partition_students;
    use pretty_assertions::assert_eq;

    fn create_rooms(l_capacity: &[usize]) -> Vec<SpecRoom> {
        l_capacity
            .iter()
            .enumerate()
            .map(|(idx, &capacity)| SpecRoom {
                room_number: format!("{}", 101 + idx),
                capacity,
                grid_shape: None,
                row_idx_source: idx + 2,
            })
            .collect()
    }

    fn create_students(l_rolls: &[&str]) -> Vec<SpecStudent> {
        l_rolls
            .iter()
            .map(|roll| SpecStudent {
                name: Some(format!("Name {roll}")),
                ..SpecStudent::new(*roll)
            })
            .collect()
    }

    #[test]
    fn summary_renumbers_after_skipped_room() {
        let rooms = create_rooms(&[2, 0, 2]);
        let l_students = create_students(&["A", "B", "C"]);
        let allocation = partition_students(l_students.len(), &rooms);

        assert_eq!(
            project_summary(&allocation, &rooms, &l_students),
            vec![
                SpecSummaryRow {
                    n_serial: 1,
                    room_number: "101".to_string(),
                    roll_range: "A-B".to_string(),
                    n_students: 2,
                },
                SpecSummaryRow {
                    n_serial: 2,
                    room_number: "103".to_string(),
                    roll_range: "C-C".to_string(),
                    n_students: 1,
                },
            ]
        );
    }

    #[test]
    fn summary_range_follows_source_order() {
        let rooms = create_rooms(&[3]);
        let l_students = create_students(&["Z9", "A1", "M5"]);
        let allocation = partition_students(l_students.len(), &rooms);

        let l_rows = project_summary(&allocation, &rooms, &l_students);
        assert_eq!(l_rows[0].roll_range, "Z9-M5");
    }

    #[test]
    fn signature_blocks_number_locally() {
        let rooms = create_rooms(&[2, 2, 2]);
        let l_students = create_students(&["A", "B", "C", "D", "E"]);
        let allocation = partition_students(l_students.len(), &rooms);

        let l_blocks = project_signature_blocks(&allocation, &rooms, &l_students);
        assert_eq!(l_blocks.len(), 3);
        let l_seq: Vec<usize> = l_blocks[1].rows.iter().map(|r| r.n_seq).collect();
        assert_eq!(l_seq, vec![1, 2]);
        assert_eq!(l_blocks[1].rows[0].roll_number, "C");
        assert_eq!(l_blocks[2].rows[0].name, "Name E");
    }
}
