//! Algorithm implementations for list reconciliation.
//!
//! - `diff`: change-list diff over identity and equality predicates
//! - `myers`: Myers algorithm computing the identity matching
//! - `hash`: Stable hashing utilities

mod diff;
mod hash;
mod myers;

pub use diff::{
    changes_from, changes_in_sections, diff, diff_with_config, Change, DiffConfig, DiffResult,
    DiffStats, Identifiable, IndexPath,
};
pub use hash::StableHasher;
pub use myers::identity_lcs;
