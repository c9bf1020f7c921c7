//! Persistent token identity
//!
//! Every stored token carries a `PersistentId`. It is the identity used by
//! the diff engine when the token list is reconciled: a token whose name,
//! issuer, or counter changed is still the *same row*, so it yields an
//! `Update` rather than a `Delete` + `Insert`.
//!
//! Identifiers are minted by hashing a per-store seed with a monotonically
//! increasing sequence number, so two stores seeded differently never hand
//! out colliding identifiers and a store restored with the same seed and
//! sequence reproduces them.

use std::fmt;

use crate::algo::StableHasher;

// =============================================================================
// StoreSeed
// =============================================================================

/// Seed distinguishing the identifier space of one token store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StoreSeed(pub u64);

impl StoreSeed {
    /// Create a seed from a store name (e.g. a keychain service name)
    pub fn from_name(name: &str) -> Self {
        Self(StableHasher::new().update_str("__store__").update_str(name).finish())
    }

    /// Create a zero seed (tests and demo data)
    pub const fn zero() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

// =============================================================================
// PersistentId
// =============================================================================

/// Stable identifier of a stored token
///
/// - 8 bytes, `Copy`
/// - equality is the row identity used when diffing the token list
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[must_use]
pub struct PersistentId(pub(crate) u64);

impl PersistentId {
    /// Create an identifier from a raw u64 value, e.g. one read back from a saved order.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(&self) -> u64 {
        self.0
    }

    /// Mint the identifier for the `sequence`-th token added to a store.
    pub fn mint(seed: StoreSeed, sequence: u64) -> Self {
        Self(
            StableHasher::new()
                .update_u64(seed.as_u64())
                .update_str("__token__")
                .update_u64(sequence)
                .finish(),
        )
    }
}

impl fmt::Debug for PersistentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PersistentId({:016x})", self.0)
    }
}

impl fmt::Display for PersistentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_deterministic() {
        let seed = StoreSeed::from_name("authenticator.tokens");
        assert_eq!(PersistentId::mint(seed, 3), PersistentId::mint(seed, 3));
    }

    #[test]
    fn test_mint_differs_by_sequence_and_seed() {
        let a = StoreSeed::from_name("a");
        let b = StoreSeed::from_name("b");
        assert_ne!(PersistentId::mint(a, 0), PersistentId::mint(a, 1));
        assert_ne!(PersistentId::mint(a, 0), PersistentId::mint(b, 0));
    }

    #[test]
    fn test_display_format() {
        let id = PersistentId::from_raw(0x123456789abcdef0);
        assert_eq!(format!("{}", id), "#123456789abcdef0");
        assert_eq!(format!("{:?}", id), "PersistentId(123456789abcdef0)");
    }
}
