//! List reconciliation
//!
//! Computes the changes that turn an old ordered list of rows into a new one.
//! This is a **pure algorithm module**: it never touches a list view. The
//! consumer side lives in [`crate::apply`].
//!
//! # Two predicates
//!
//! - `same_identity`: "is this the same logical row across both versions"
//!   (for token rows: same `PersistentId`).
//! - `equal`: value equality, only asked of identity-matched pairs. A matched
//!   pair that is not equal yields an `Update`.
//!
//! # Output order
//!
//! Deletes by descending old index, then inserts by ascending new index, then
//! moves, then updates. Applying deletes first keeps every later index valid.

use crate::algo::myers::identity_lcs;

// =============================================================================
// Public Types
// =============================================================================

/// A single reconciliation step over some index type `I`.
///
/// `old_idx` addresses the old list, `new_idx` the new list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Change<I> {
    /// Row present only in the new list
    Insert { new_idx: I },
    /// Row present only in the old list
    Delete { old_idx: I },
    /// Same row in both lists whose value changed
    Update { old_idx: I, new_idx: I },
    /// Same row at a different position (only with [`DiffConfig::detect_moves`])
    Move { old_idx: I, new_idx: I },
}

impl<I> Change<I> {
    pub fn is_insert(&self) -> bool {
        matches!(self, Change::Insert { .. })
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Change::Delete { .. })
    }

    pub fn is_update(&self) -> bool {
        matches!(self, Change::Update { .. })
    }

    pub fn is_move(&self) -> bool {
        matches!(self, Change::Move { .. })
    }

    /// Whether applying this change reorders the list (needs an animated update group)
    pub fn alters_order(&self) -> bool {
        !self.is_update()
    }

    /// Convert the index type, e.g. row numbers into [`IndexPath`]s.
    pub fn map_index<J>(self, mut f: impl FnMut(I) -> J) -> Change<J> {
        match self {
            Change::Insert { new_idx } => Change::Insert { new_idx: f(new_idx) },
            Change::Delete { old_idx } => Change::Delete { old_idx: f(old_idx) },
            Change::Update { old_idx, new_idx } => Change::Update {
                old_idx: f(old_idx),
                new_idx: f(new_idx),
            },
            Change::Move { old_idx, new_idx } => Change::Move {
                old_idx: f(old_idx),
                new_idx: f(new_idx),
            },
        }
    }
}

/// Row address in a sectioned table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexPath {
    pub section: usize,
    pub row: usize,
}

impl IndexPath {
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }
}

/// Rows that know whether they represent the same logical entity as another row.
pub trait Identifiable {
    fn has_same_identity(&self, other: &Self) -> bool;
}

/// Configuration for reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffConfig {
    /// Consolidate a Delete + Insert of the same row into a `Move`.
    /// Default: true. With it off, a reordered row shows up as a Delete
    /// plus an Insert, and the delete/insert counts no longer equal the
    /// number of rows missing from the other side.
    pub detect_moves: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self { detect_moves: true }
    }
}

impl DiffConfig {
    pub fn new(detect_moves: bool) -> Self {
        Self { detect_moves }
    }

    /// Config that reports reordered rows as `Move`s.
    pub fn with_moves() -> Self {
        Self { detect_moves: true }
    }

    /// Config that reports reordered rows as separate Delete + Insert.
    pub fn without_moves() -> Self {
        Self { detect_moves: false }
    }
}

/// Statistics from a reconciliation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct DiffStats {
    /// Identity-matched pairs left in place (updated or not)
    pub kept: usize,
    pub inserted: usize,
    pub deleted: usize,
    pub updated: usize,
    pub moved: usize,
}

impl DiffStats {
    /// Number of emitted changes
    pub fn change_count(&self) -> usize {
        self.inserted + self.deleted + self.updated + self.moved
    }
}

/// Result of [`diff_with_config`]
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct DiffResult<I> {
    pub changes: Vec<Change<I>>,
    pub stats: DiffStats,
}

// =============================================================================
// Main API
// =============================================================================

/// Compute the changes turning `old` into `new`.
///
/// Never fails. `same_identity` must match each row with at most one row of
/// the other list; otherwise the result is unspecified (but still returned).
pub fn diff<T, S, E>(old: &[T], new: &[T], same_identity: S, equal: E) -> Vec<Change<usize>>
where
    S: Fn(&T, &T) -> bool,
    E: Fn(&T, &T) -> bool,
{
    diff_with_config(old, new, same_identity, equal, &DiffConfig::default()).changes
}

/// [`diff`] with explicit configuration and statistics.
pub fn diff_with_config<T, S, E>(
    old: &[T],
    new: &[T],
    same_identity: S,
    equal: E,
    config: &DiffConfig,
) -> DiffResult<usize>
where
    S: Fn(&T, &T) -> bool,
    E: Fn(&T, &T) -> bool,
{
    let mut stats = DiffStats::default();

    // Quick paths
    if old.is_empty() && new.is_empty() {
        return DiffResult::default();
    }
    if old.is_empty() {
        stats.inserted = new.len();
        return DiffResult {
            changes: (0..new.len()).map(|new_idx| Change::Insert { new_idx }).collect(),
            stats,
        };
    }
    if new.is_empty() {
        stats.deleted = old.len();
        return DiffResult {
            changes: (0..old.len()).rev().map(|old_idx| Change::Delete { old_idx }).collect(),
            stats,
        };
    }

    let pairs = identity_lcs(old, new, &same_identity);
    stats.kept = pairs.len();

    let mut old_matched = vec![false; old.len()];
    let mut new_matched = vec![false; new.len()];
    let mut updates: Vec<(usize, usize)> = Vec::new();
    for &(o, n) in &pairs {
        old_matched[o] = true;
        new_matched[n] = true;
        if !equal(&old[o], &new[n]) {
            updates.push((o, n));
        }
    }

    let mut deletes: Vec<usize> = (0..old.len()).filter(|&i| !old_matched[i]).collect();
    let mut inserts: Vec<usize> = (0..new.len()).filter(|&j| !new_matched[j]).collect();
    let mut moves: Vec<(usize, usize)> = Vec::new();

    if config.detect_moves {
        consolidate_moves(old, new, &same_identity, &mut deletes, &mut inserts, &mut moves);
        for &(o, n) in &moves {
            if !equal(&old[o], &new[n]) {
                updates.push((o, n));
            }
        }
    }

    stats.deleted = deletes.len();
    stats.inserted = inserts.len();
    stats.moved = moves.len();
    stats.updated = updates.len();

    moves.sort_by_key(|&(_, n)| n);
    updates.sort_by_key(|&(_, n)| n);

    let mut changes = Vec::with_capacity(stats.change_count());
    changes.extend(deletes.into_iter().rev().map(|old_idx| Change::Delete { old_idx }));
    changes.extend(inserts.into_iter().map(|new_idx| Change::Insert { new_idx }));
    changes.extend(moves.into_iter().map(|(old_idx, new_idx)| Change::Move { old_idx, new_idx }));
    changes.extend(updates.into_iter().map(|(old_idx, new_idx)| Change::Update { old_idx, new_idx }));

    DiffResult { changes, stats }
}

/// Changes between two lists of [`Identifiable`] rows, using `PartialEq` for value equality.
pub fn changes_from<T>(old: &[T], new: &[T]) -> Vec<Change<usize>>
where
    T: Identifiable + PartialEq,
{
    diff(old, new, T::has_same_identity, T::eq)
}

/// Per-section changes, addressed by [`IndexPath`].
///
/// Sections are matched by position. A section present only in `old`
/// contributes deletes of all its rows, one present only in `new` inserts.
pub fn changes_in_sections<T, O, N>(old: &[O], new: &[N]) -> Vec<Change<IndexPath>>
where
    T: Identifiable + PartialEq,
    O: AsRef<[T]>,
    N: AsRef<[T]>,
{
    let sections = old.len().max(new.len());
    let mut changes = Vec::new();
    for section in 0..sections {
        let old_rows: &[T] = old.get(section).map(|s| s.as_ref()).unwrap_or_default();
        let new_rows: &[T] = new.get(section).map(|s| s.as_ref()).unwrap_or_default();
        changes.extend(
            changes_from(old_rows, new_rows)
                .into_iter()
                .map(|c| c.map_index(|row| IndexPath::new(section, row))),
        );
    }
    changes
}

/// Pair each deleted row with an inserted row of the same identity.
fn consolidate_moves<T, S>(
    old: &[T],
    new: &[T],
    same_identity: &S,
    deletes: &mut Vec<usize>,
    inserts: &mut Vec<usize>,
    moves: &mut Vec<(usize, usize)>,
) where
    S: Fn(&T, &T) -> bool,
{
    let mut remaining_deletes = Vec::with_capacity(deletes.len());
    for &o in deletes.iter() {
        match inserts.iter().position(|&n| same_identity(&old[o], &new[n])) {
            Some(pos) => moves.push((o, inserts.remove(pos))),
            None => remaining_deletes.push(o),
        }
    }
    *deletes = remaining_deletes;
}

// =============================================================================
// Tests
// =============================================================================
