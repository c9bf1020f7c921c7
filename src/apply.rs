//! Applying reconciliation changes
//!
//! Two consumers of a change list:
//!
//! - [`apply_changes`] drives a list view through the [`ChangeSink`] trait:
//!   one animated group for inserts/deletes/moves, in-place updates after it,
//!   then a scroll to the last inserted row.
//! - [`reconcile`] applies the changes to a plain `Vec`, which is what a
//!   consumer keeping a local copy of the rows needs (and what the tests use
//!   to check that a change list really reproduces the new list).

use crate::algo::Change;

// =============================================================================
// ChangeSink
// =============================================================================

/// A list surface that can be mutated row by row.
///
/// Inside a `begin_updates`/`end_updates` group, `old_idx` positions refer
/// to the list before the group and `new_idx` positions to the list after.
pub trait ChangeSink<I> {
    fn begin_updates(&mut self);
    fn end_updates(&mut self);
    fn insert_row(&mut self, at: I);
    fn delete_row(&mut self, at: I);
    fn move_row(&mut self, from: I, to: I);
    fn scroll_to_row(&mut self, at: I);
}

/// Apply `changes` to `sink`.
///
/// `update_row` is called with the new index of every updated row, after
/// all order-changing operations have been applied.
pub fn apply_changes<I, S, U>(sink: &mut S, changes: &[Change<I>], mut update_row: U)
where
    I: Copy + Ord,
    S: ChangeSink<I> + ?Sized,
    U: FnMut(I),
{
    if changes.is_empty() {
        return;
    }

    // Only open an update group when something actually reorders
    if changes.iter().any(Change::alters_order) {
        sink.begin_updates();
        for change in changes {
            match *change {
                Change::Insert { new_idx } => sink.insert_row(new_idx),
                Change::Delete { old_idx } => sink.delete_row(old_idx),
                Change::Move { old_idx, new_idx } => sink.move_row(old_idx, new_idx),
                Change::Update { .. } => {}
            }
        }
        sink.end_updates();
    }

    for change in changes {
        if let Change::Update { new_idx, .. } = *change {
            update_row(new_idx);
        }
    }

    let last_inserted = changes
        .iter()
        .filter_map(|change| match *change {
            Change::Insert { new_idx } => Some(new_idx),
            _ => None,
        })
        .max();
    if let Some(at) = last_inserted {
        sink.scroll_to_row(at);
    }
}

// =============================================================================
// reconcile
// =============================================================================

/// Apply `changes` (computed from `old` to `new`) to a copy of `old`.
///
/// Deletes and move sources are removed by descending old index, inserts and
/// move targets placed by ascending new index, then updates take the new
/// value. Out-of-range indices are clamped or skipped rather than panicking.
pub fn reconcile<T: Clone>(old: &[T], new: &[T], changes: &[Change<usize>]) -> Vec<T> {
    let mut removed: Vec<usize> = changes
        .iter()
        .filter_map(|change| match *change {
            Change::Delete { old_idx } | Change::Move { old_idx, .. } => Some(old_idx),
            _ => None,
        })
        .collect();
    removed.sort_unstable();
    removed.dedup();

    let mut placed: Vec<(usize, &T)> = changes
        .iter()
        .filter_map(|change| match *change {
            Change::Insert { new_idx } => new.get(new_idx).map(|item| (new_idx, item)),
            Change::Move { old_idx, new_idx } => old.get(old_idx).map(|item| (new_idx, item)),
            _ => None,
        })
        .collect();
    placed.sort_by_key(|&(at, _)| at);

    let mut rows = old.to_vec();
    for &at in removed.iter().rev() {
        if at < rows.len() {
            rows.remove(at);
        }
    }
    for (at, item) in placed {
        let at = at.min(rows.len());
        rows.insert(at, item.clone());
    }
    for change in changes {
        if let Change::Update { new_idx, .. } = *change {
            if let (Some(slot), Some(value)) = (rows.get_mut(new_idx), new.get(new_idx)) {
                *slot = value.clone();
            }
        }
    }
    rows
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::{changes_in_sections, Identifiable, IndexPath};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TableCall {
        BeginUpdates,
        EndUpdates,
        Insert(IndexPath),
        Remove(IndexPath),
        Reload(IndexPath),
        Move(IndexPath, IndexPath),
        Scroll(IndexPath),
    }

    #[derive(Default)]
    struct MockTable {
        calls: Vec<TableCall>,
    }

    impl ChangeSink<IndexPath> for MockTable {
        fn begin_updates(&mut self) {
            self.calls.push(TableCall::BeginUpdates);
        }
        fn end_updates(&mut self) {
            self.calls.push(TableCall::EndUpdates);
        }
        fn insert_row(&mut self, at: IndexPath) {
            self.calls.push(TableCall::Insert(at));
        }
        fn delete_row(&mut self, at: IndexPath) {
            self.calls.push(TableCall::Remove(at));
        }
        fn move_row(&mut self, from: IndexPath, to: IndexPath) {
            self.calls.push(TableCall::Move(from, to));
        }
        fn scroll_to_row(&mut self, at: IndexPath) {
            self.calls.push(TableCall::Scroll(at));
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Title(&'static str);

    impl Identifiable for Title {
        fn has_same_identity(&self, other: &Self) -> bool {
            self.0.trim_end_matches('!') == other.0.trim_end_matches('!')
        }
    }

    fn path(section: usize, row: usize) -> IndexPath {
        IndexPath::new(section, row)
    }

    fn apply(table: &mut MockTable, changes: &[Change<IndexPath>]) {
        let mut reloads = Vec::new();
        apply_changes(table, changes, |at| reloads.push(at));
        table.calls.extend(reloads.into_iter().map(TableCall::Reload));
    }

    #[test]
    fn test_no_changes_touch_nothing() {
        let mut table = MockTable::default();
        apply(&mut table, &[]);
        assert!(table.calls.is_empty());
    }

    #[test]
    fn test_insert() {
        let mut table = MockTable::default();
        apply(&mut table, &[Change::Insert { new_idx: path(0, 0) }]);
        assert_eq!(
            table.calls,
            vec![
                TableCall::BeginUpdates,
                TableCall::Insert(path(0, 0)),
                TableCall::EndUpdates,
                TableCall::Scroll(path(0, 0)),
            ]
        );
    }

    #[test]
    fn test_delete() {
        let mut table = MockTable::default();
        apply(&mut table, &[Change::Delete { old_idx: path(0, 0) }]);
        assert_eq!(
            table.calls,
            vec![
                TableCall::BeginUpdates,
                TableCall::Remove(path(0, 0)),
                TableCall::EndUpdates,
            ]
        );
    }

    #[test]
    fn test_update_needs_no_group() {
        let mut table = MockTable::default();
        apply(
            &mut table,
            &[Change::Update { old_idx: path(0, 0), new_idx: path(0, 0) }],
        );
        assert_eq!(table.calls, vec![TableCall::Reload(path(0, 0))]);
    }

    #[test]
    fn test_many_changes() {
        let old = vec![vec![Title("A"), Title("B")], vec![Title("C")]];
        let new = vec![vec![Title("A!"), Title("D"), Title("E")], vec![Title("B"), Title("C")]];
        let changes = changes_in_sections(&old, &new);

        let mut table = MockTable::default();
        apply(&mut table, &changes);
        assert_eq!(
            table.calls,
            vec![
                TableCall::BeginUpdates,
                TableCall::Remove(path(0, 1)),
                TableCall::Insert(path(0, 1)),
                TableCall::Insert(path(0, 2)),
                TableCall::Insert(path(1, 0)),
                TableCall::EndUpdates,
                TableCall::Scroll(path(1, 0)),
                TableCall::Reload(path(0, 0)),
            ]
        );
    }

    #[test]
    fn test_move_inside_group() {
        let mut table = MockTable::default();
        apply(
            &mut table,
            &[Change::Move { old_idx: path(0, 2), new_idx: path(0, 0) }],
        );
        assert_eq!(
            table.calls,
            vec![
                TableCall::BeginUpdates,
                TableCall::Move(path(0, 2), path(0, 0)),
                TableCall::EndUpdates,
            ]
        );
    }

    #[test]
    fn test_reconcile_delete_insert_update() {
        let old = vec!["a", "b", "c"];
        let new = vec!["a", "x", "C"];
        let changes = [
            Change::Delete { old_idx: 1 },
            Change::Insert { new_idx: 1 },
            Change::Update { old_idx: 2, new_idx: 2 },
        ];
        assert_eq!(reconcile(&old, &new, &changes), new);
    }

    #[test]
    fn test_reconcile_tolerates_bad_indices() {
        let old = vec![1, 2];
        let new = vec![1];
        let changes = [Change::Delete { old_idx: 9 }, Change::Insert { new_idx: 7 }];
        assert_eq!(reconcile(&old, &new, &changes), vec![1, 2]);
    }
}
