//! Myers shortest-edit-script over an identity predicate
//!
//! Finds the longest run-preserving matching between two sequences where
//! "match" means *same identity*, not value equality. The caller (see
//! `diff.rs`) turns the matching into Insert/Delete/Update changes.
//!
//! # Algorithm
//!
//! Explore the edit graph by edit distance `d`, tracking on each diagonal
//! `k = x - y` the furthest x reached by a d-path. Each d-path extends a
//! (d-1)-path on diagonal `k + 1` (insertion, y advances) or `k - 1`
//! (deletion, x advances), taking whichever lands further; then it follows
//! the snake of identity-matched pairs.
//!
//! Moves that would leave the `n x m` grid are never taken, so every point
//! recorded in the table is a real position and the sweep ends exactly at
//! `(n, m)` within `d <= n + m`.
//!
//! # Complexity
//!
//! - Time: O((n + m) * d)
//! - Space: O((n + m) * d) for the backtracking trace, quadratic in the worst case.
//!   Sized for UI lists (dozens to low hundreds of rows).
//!
//! # References
//!
//! - Myers, E.W. "An O(ND) Difference Algorithm and Its Variations" (1986)

/// Diagonal slot never reached by any path of the current length
const UNREACHED: isize = -1;

// =============================================================================
// Main API
// =============================================================================

/// Compute identity-matched index pairs `(old_idx, new_idx)` in ascending order.
///
/// The pairs form a longest common subsequence under `same_identity`.
/// Returns an empty matching when no edit script is found within `n + m`
/// steps, which makes the caller fall back to deleting everything old and
/// inserting everything new.
///
/// `same_identity` should match each item against at most one item of the
/// other sequence. Violating that cannot panic or loop, but the matching is
/// then unspecified.
pub fn identity_lcs<T, F>(old: &[T], new: &[T], same_identity: F) -> Vec<(usize, usize)>
where
    F: Fn(&T, &T) -> bool,
{
    let n = old.len();
    let m = new.len();

    // Strip common prefix
    let mut prefix_len = 0;
    while prefix_len < n && prefix_len < m && same_identity(&old[prefix_len], &new[prefix_len]) {
        prefix_len += 1;
    }

    // Strip common suffix
    let mut suffix_len = 0;
    while suffix_len < n - prefix_len
        && suffix_len < m - prefix_len
        && same_identity(&old[n - 1 - suffix_len], &new[m - 1 - suffix_len])
    {
        suffix_len += 1;
    }

    let mut pairs: Vec<(usize, usize)> = (0..prefix_len).map(|i| (i, i)).collect();

    let old_mid = &old[prefix_len..n - suffix_len];
    let new_mid = &new[prefix_len..m - suffix_len];

    if !old_mid.is_empty() && !new_mid.is_empty() {
        match myers_core(old_mid, new_mid, &same_identity) {
            Some(mid) => {
                pairs.extend(mid.into_iter().map(|(o, n)| (o + prefix_len, n + prefix_len)));
            }
            None => {
                log::warn!(
                    "no edit script within {} steps, replacing all rows",
                    old_mid.len() + new_mid.len()
                );
                return Vec::new();
            }
        }
    }

    pairs.extend((0..suffix_len).map(|i| (n - suffix_len + i, m - suffix_len + i)));
    pairs
}

// =============================================================================
// Myers Algorithm Core
// =============================================================================

/// Edit-graph dimensions shared by the sweep and the backtrack
#[derive(Clone, Copy)]
struct Grid {
    n: isize,
    m: isize,
    offset: isize,
}

impl Grid {
    #[inline]
    fn slot(&self, k: isize) -> usize {
        (k + self.offset) as usize
    }

    /// Pick the (d-1)-path that the furthest d-path on diagonal `k` extends.
    ///
    /// Returns `(prev_k, x)`: the predecessor diagonal and the x coordinate
    /// right after the single insertion or deletion. Insertion wins only when
    /// its predecessor is strictly further along, so ties go to deletion; at
    /// `k == -d` only insertion exists, at `k == d` only deletion.
    fn advance(&self, v: &[isize], d: isize, k: isize) -> Option<(isize, isize)> {
        let insert = if k != d {
            let px = v[self.slot(k + 1)];
            (px != UNREACHED && px - (k + 1) < self.m).then_some(px)
        } else {
            None
        };

        let delete = if k != -d {
            let px = v[self.slot(k - 1)];
            (px != UNREACHED && px < self.n).then_some(px + 1)
        } else {
            None
        };

        match (insert, delete) {
            (Some(ix), Some(dx)) if ix >= dx => Some((k + 1, ix)),
            (_, Some(dx)) => Some((k - 1, dx)),
            (Some(ix), None) => Some((k + 1, ix)),
            (None, None) => None,
        }
    }
}

fn myers_core<T, F>(old: &[T], new: &[T], same_identity: &F) -> Option<Vec<(usize, usize)>>
where
    F: Fn(&T, &T) -> bool,
{
    let max_d = old.len() + new.len();
    let grid = Grid {
        n: old.len() as isize,
        m: new.len() as isize,
        offset: max_d as isize + 1,
    };

    // v[k + offset] = furthest x on diagonal k
    let mut v = vec![UNREACHED; 2 * max_d + 3];
    // trace[d] = v after the sweep for edit distance d
    let mut trace: Vec<Vec<isize>> = Vec::new();

    let mut found = None;
    'outer: for d in 0..=max_d as isize {
        for k in (-d..=d).step_by(2) {
            let start = if d == 0 { Some((0, 0)) } else { grid.advance(&v, d, k) };

            let Some((_, mut x)) = start else {
                v[grid.slot(k)] = UNREACHED;
                continue;
            };
            let mut y = x - k;

            while x < grid.n && y < grid.m && same_identity(&old[x as usize], &new[y as usize]) {
                x += 1;
                y += 1;
            }

            v[grid.slot(k)] = x;

            if x == grid.n && y == grid.m {
                trace.push(v.clone());
                found = Some(d);
                break 'outer;
            }
        }
        trace.push(v.clone());
    }

    backtrack(&trace, grid, found?)
}

/// Walk the trace from `(n, m)` back to `(0, 0)`, collecting snake pairs.
fn backtrack(trace: &[Vec<isize>], grid: Grid, d_end: isize) -> Option<Vec<(usize, usize)>> {
    let mut x = grid.n;
    let mut y = grid.m;
    let mut pairs = Vec::new();

    let mut d = d_end;
    loop {
        let k = x - y;

        let (start_x, prev) = if d == 0 {
            (0, None)
        } else {
            let prev_v = &trace[(d - 1) as usize];
            let (prev_k, start_x) = grid.advance(prev_v, d, k)?;
            (start_x, Some((prev_k, prev_v[grid.slot(prev_k)])))
        };
        let start_y = start_x - k;

        // Diagonal moves of the snake
        while x > start_x && y > start_y {
            x -= 1;
            y -= 1;
            pairs.push((x as usize, y as usize));
        }

        match prev {
            None => break,
            Some((prev_k, prev_x)) => {
                x = prev_x;
                y = prev_x - prev_k;
                d -= 1;
            }
        }
    }

    pairs.reverse();
    Some(pairs)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn lcs(old: &[u32], new: &[u32]) -> Vec<(usize, usize)> {
        identity_lcs(old, new, |a, b| a == b)
    }

    #[test]
    fn test_empty_sequences() {
        assert!(lcs(&[], &[]).is_empty());
        assert!(lcs(&[], &[1, 2]).is_empty());
        assert!(lcs(&[1, 2], &[]).is_empty());
    }

    #[test]
    fn test_identical_sequences() {
        assert_eq!(lcs(&[1, 2, 3], &[1, 2, 3]), vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn test_disjoint_sequences() {
        assert!(lcs(&[1, 2], &[3, 4]).is_empty());
    }

    #[test]
    fn test_single_insert() {
        assert_eq!(lcs(&[1, 3], &[1, 2, 3]), vec![(0, 0), (1, 2)]);
    }

    #[test]
    fn test_single_delete() {
        assert_eq!(lcs(&[1, 2, 3], &[1, 3]), vec![(0, 0), (2, 1)]);
    }

    #[test]
    fn test_swap_keeps_one() {
        // Delete 1, keep 2, insert 1
        assert_eq!(lcs(&[1, 2], &[2, 1]), vec![(1, 0)]);
    }

    #[test]
    fn test_classic_myers_example() {
        // ABCABBA -> CBABAC has an LCS of length 4
        let old: Vec<char> = "ABCABBA".chars().collect();
        let new: Vec<char> = "CBABAC".chars().collect();
        let pairs = identity_lcs(&old, &new, |a, b| a == b);
        assert_eq!(pairs.len(), 4);
        for &(o, n) in &pairs {
            assert_eq!(old[o], new[n]);
        }
        assert!(pairs.windows(2).all(|w| w[0].0 < w[1].0 && w[0].1 < w[1].1));
    }

    #[test]
    fn test_middle_section_after_prefix_and_suffix() {
        let pairs = lcs(&[1, 2, 9, 8, 7, 5, 6], &[1, 2, 7, 8, 9, 5, 6]);
        // prefix (1, 2), suffix (5, 6), one of 9/8/7 in the middle
        assert_eq!(pairs.len(), 5);
        assert_eq!(&pairs[..2], &[(0, 0), (1, 1)]);
        assert_eq!(&pairs[3..], &[(5, 5), (6, 6)]);
    }

    #[test]
    fn test_non_injective_identity_terminates() {
        // Every item claims the same identity: unspecified matching, but no panic.
        let pairs = identity_lcs(&[1, 2, 3], &[4, 5], |_, _| true);
        assert!(pairs.len() <= 2);
    }
}
