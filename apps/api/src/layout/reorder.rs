//! Section reorder primitives.
//!
//! Drag-and-drop in the editor UI boils down to two list operations: a rotation
//! inside one list and a transfer between two lists. Target indices past the end
//! append; an out-of-range source index leaves both lists untouched.

use serde::{Deserialize, Serialize};

use crate::models::{Column, ColumnLayout, SectionKind};

/// A position in the column layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSlot {
    pub column: Column,
    pub index: usize,
}

impl SectionSlot {
    pub fn new(column: Column, index: usize) -> Self {
        SectionSlot { column, index }
    }
}

/// Removes the item at `from` and re-inserts it at `to` (clamped to the end).
/// Returns `false` when `from` is out of bounds.
pub fn reorder_within_list<T>(list: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= list.len() {
        return false;
    }
    let item = list.remove(from);
    let to = to.min(list.len());
    list.insert(to, item);
    true
}

/// Moves the item at `from` in `source` to `to` in `dest` (clamped to the end).
/// Returns `false` when `from` is out of bounds, in which case neither list changes.
pub fn move_between_lists<T>(
    source: &mut Vec<T>,
    dest: &mut Vec<T>,
    from: usize,
    to: usize,
) -> bool {
    if from >= source.len() {
        return false;
    }
    let item = source.remove(from);
    let to = to.min(dest.len());
    dest.insert(to, item);
    true
}

impl ColumnLayout {
    /// Moves whatever section sits at `from` to `to`, within or across columns.
    pub fn move_section(&mut self, from: SectionSlot, to: SectionSlot) -> bool {
        if from.column == to.column {
            return reorder_within_list(self.column_mut(from.column), from.index, to.index);
        }
        let (source, dest) = match from.column {
            Column::Left => (&mut self.left, &mut self.right),
            Column::Right => (&mut self.right, &mut self.left),
        };
        move_between_lists(source, dest, from.index, to.index)
    }

    /// Moves `kind` to `to`, wherever it currently sits.
    pub fn drag_section(&mut self, kind: SectionKind, to: SectionSlot) -> bool {
        match self.position_of(kind) {
            Some((column, index)) => self.move_section(SectionSlot::new(column, index), to),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::plan::is_valid_layout;
    use SectionKind::*;

    #[test]
    fn test_reorder_rotates() {
        let mut v = vec!['a', 'b', 'c', 'd'];
        assert!(reorder_within_list(&mut v, 0, 2));
        assert_eq!(v, vec!['b', 'c', 'a', 'd']);
        assert!(reorder_within_list(&mut v, 3, 0));
        assert_eq!(v, vec!['d', 'b', 'c', 'a']);
    }

    #[test]
    fn test_reorder_past_end_appends() {
        let mut v = vec![1, 2, 3];
        assert!(reorder_within_list(&mut v, 0, 99));
        assert_eq!(v, vec![2, 3, 1]);
    }

    #[test]
    fn test_reorder_out_of_range_source_is_noop() {
        let mut v = vec![1, 2, 3];
        assert!(!reorder_within_list(&mut v, 3, 0));
        assert_eq!(v, vec![1, 2, 3]);
    }

    #[test]
    fn test_move_between_lists_into_empty() {
        let mut src = vec![1, 2];
        let mut dst: Vec<i32> = vec![];
        assert!(move_between_lists(&mut src, &mut dst, 1, 5));
        assert_eq!(src, vec![1]);
        assert_eq!(dst, vec![2]);
    }

    #[test]
    fn test_move_section_across_columns() {
        let mut layout = ColumnLayout::default();
        assert!(layout.move_section(
            SectionSlot::new(Column::Right, 0),
            SectionSlot::new(Column::Left, 1)
        ));
        assert_eq!(layout.left, vec![Experience, Skills, Education]);
        assert_eq!(layout.right, vec![Courses, Languages, Interests]);
        assert!(is_valid_layout(&layout));
    }

    #[test]
    fn test_drag_section_onto_emptied_column() {
        let mut layout = ColumnLayout::default();
        layout.drag_section(Experience, SectionSlot::new(Column::Right, 0));
        layout.drag_section(Education, SectionSlot::new(Column::Right, 0));
        assert!(layout.left.is_empty());

        assert!(layout.drag_section(Interests, SectionSlot::new(Column::Left, 4)));
        assert_eq!(layout.left, vec![Interests]);
        assert!(is_valid_layout(&layout));
    }

    #[test]
    fn test_long_move_sequence_keeps_partition() {
        let mut layout = ColumnLayout::default();
        let moves = [
            (Column::Left, 0, Column::Right, 2),
            (Column::Right, 5, Column::Left, 0),
            (Column::Right, 1, Column::Right, 0),
            (Column::Left, 9, Column::Right, 0),
            (Column::Right, 0, Column::Left, 9),
            (Column::Left, 1, Column::Left, 0),
        ];
        for (fc, fi, tc, ti) in moves {
            layout.move_section(SectionSlot::new(fc, fi), SectionSlot::new(tc, ti));
            assert!(is_valid_layout(&layout), "broken after {fc:?}{fi}->{tc:?}{ti}");
        }
    }
}
