//! Sequential bucket partitioner.

use crate::spec::{SpecAllocation, SpecRoom, SpecSegment};

/// Split `n_students` ordered students across `rooms` in room order.
///
/// One cursor walks the student list. Each room takes
/// `min(capacity, remaining)` students. Rooms with capacity 0 are skipped
/// without moving the cursor, and once the cursor reaches the end no further
/// room gets a segment.
///
/// Every output document partitions through this function, so the plan,
/// the grids and the signature blocks agree room by room.
pub fn partition_students(n_students: usize, rooms: &[SpecRoom]) -> SpecAllocation {
    let mut l_segments = Vec::new();
    let mut n_cursor = 0usize;

    for (room_idx, room) in rooms.iter().enumerate() {
        if n_cursor >= n_students {
            break;
        }
        if room.capacity == 0 {
            tracing::warn!(room = %room.room_number, "skipped room with zero capacity");
            continue;
        }

        let n_len = room.capacity.min(n_students - n_cursor);
        let segment = SpecSegment {
            room_idx,
            idx_start: n_cursor,
            idx_end: n_cursor + n_len,
        };
        tracing::debug!(
            room = %room.room_number,
            idx_start = segment.idx_start,
            idx_end = segment.idx_end,
            "allocated room"
        );
        l_segments.push(segment);
        n_cursor += n_len;
    }

    let allocation = SpecAllocation {
        segments: l_segments,
        n_students,
    };
    if allocation.n_unassigned() > 0 {
        tracing::warn!(
            n_unassigned = allocation.n_unassigned(),
            "room capacity exhausted before roster"
        );
    }
    allocation
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_rooms(l_capacity: &[usize]) -> Vec<SpecRoom> {
        l_capacity
            .iter()
            .enumerate()
            .map(|(idx, &capacity)| SpecRoom {
                room_number: format!("R{}", idx + 1),
                capacity,
                grid_shape: None,
                row_idx_source: idx + 2,
            })
            .collect()
    }

    fn derive_bounds(allocation: &SpecAllocation) -> Vec<(usize, usize, usize)> {
        allocation
            .segments
            .iter()
            .map(|seg| (seg.room_idx, seg.idx_start, seg.idx_end))
            .collect()
    }

    #[test]
    fn five_students_across_three_pairs() {
        let allocation = partition_students(5, &create_rooms(&[2, 2, 2]));
        assert_eq!(derive_bounds(&allocation), vec![(0, 0, 2), (1, 2, 4), (2, 4, 5)]);
        assert_eq!(allocation.n_assigned(), 5);
    }

    #[test]
    fn zero_capacity_room_is_skipped_without_halting() {
        let allocation = partition_students(3, &create_rooms(&[2, 0, 2]));
        assert_eq!(derive_bounds(&allocation), vec![(0, 0, 2), (2, 2, 3)]);
    }

    #[test]
    fn capacity_beyond_roster_yields_one_partial_segment() {
        let allocation = partition_students(2, &create_rooms(&[5]));
        assert_eq!(derive_bounds(&allocation), vec![(0, 0, 2)]);
        assert_eq!(allocation.segments[0].len(), 2);
    }

    #[test]
    fn trailing_rooms_get_no_segment() {
        let allocation = partition_students(2, &create_rooms(&[2, 3, 4]));
        assert_eq!(allocation.segments.len(), 1);
    }

    #[test]
    fn empty_inputs_give_empty_allocation() {
        assert!(partition_students(0, &create_rooms(&[2, 2])).segments.is_empty());
        let allocation = partition_students(4, &[]);
        assert!(allocation.segments.is_empty());
        assert_eq!(allocation.n_unassigned(), 4);
    }

    #[test]
    fn assigned_equals_min_of_students_and_capacity() {
        let l_capacity_sets: [&[usize]; 4] = [&[1, 2, 3], &[4, 4, 4, 4], &[0, 0, 7], &[3]];
        for l_capacity in l_capacity_sets {
            let n_capacity: usize = l_capacity.iter().sum();
            for n_students in 0..=n_capacity + 3 {
                let allocation = partition_students(n_students, &create_rooms(l_capacity));
                assert_eq!(allocation.n_assigned(), n_students.min(n_capacity));

                let mut n_expected_start = 0;
                for seg in &allocation.segments {
                    assert_eq!(seg.idx_start, n_expected_start);
                    assert!(!seg.is_empty());
                    n_expected_start = seg.idx_end;
                }
            }
        }
    }

    #[test]
    fn partition_is_deterministic() {
        let rooms = create_rooms(&[3, 1, 4, 1, 5]);
        assert_eq!(partition_students(11, &rooms), partition_students(11, &rooms));
    }
}
