//! Deterministic hashing for persistent token identifiers
//!
//! Uses blake3 so the same seed and sequence number mint the same
//! identifier in every process.

/// A deterministic hasher using blake3
///
/// Unlike `std::hash::Hasher`, the output is stable across process restarts,
/// which matters for identifiers that get persisted with a saved token order.
pub struct StableHasher {
    inner: blake3::Hasher,
}

impl StableHasher {
    #[inline]
    pub fn new() -> Self {
        Self {
            inner: blake3::Hasher::new(),
        }
    }

    /// Update with raw bytes
    #[inline]
    pub fn update(mut self, data: &[u8]) -> Self {
        self.inner.update(data);
        self
    }

    /// Update with a string, length-prefixed so `"ab" + "c"` differs from `"a" + "bc"`
    #[inline]
    pub fn update_str(self, s: &str) -> Self {
        self.update_u64(s.len() as u64).update(s.as_bytes())
    }

    /// Update with a u64 value (little-endian)
    #[inline]
    pub fn update_u64(self, v: u64) -> Self {
        self.update(&v.to_le_bytes())
    }

    /// Finish and return the first 8 bytes of the digest as a little-endian u64.
    #[inline]
    pub fn finish(self) -> u64 {
        let hash = self.inner.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(bytes)
    }
}

impl Default for StableHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let a = StableHasher::new().update_str("token").update_u64(7).finish();
        let b = StableHasher::new().update_str("token").update_u64(7).finish();
        assert_eq!(a, b);
    }

    #[test]
    fn test_string_boundaries_matter() {
        let a = StableHasher::new().update_str("ab").update_str("c").finish();
        let b = StableHasher::new().update_str("a").update_str("bc").finish();
        assert_ne!(a, b);
    }
}
