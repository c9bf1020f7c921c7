//! One-time password tokens
//!
//! - `generator`: HOTP/TOTP password computation
//! - `url`: `otpauth://` URL parsing and serialization, base32 secrets
//!
//! A [`Token`] is a value: name, issuer, and a [`Generator`]. Once stored it
//! becomes a [`PersistentToken`], which adds the [`PersistentId`] used as the
//! row identity of the token list.

mod generator;
mod url;

use compact_str::CompactString;

use crate::display::DisplayTime;
use crate::id::PersistentId;

pub use generator::{Algorithm, Factor, Generator};
pub use url::decode_secret;

// =============================================================================
// Token
// =============================================================================

/// A named password generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub name: CompactString,
    pub issuer: CompactString,
    pub generator: Generator,
}

impl Token {
    pub fn new(
        name: impl Into<CompactString>,
        issuer: impl Into<CompactString>,
        generator: Generator,
    ) -> Self {
        Self {
            name: name.into(),
            issuer: issuer.into(),
            generator,
        }
    }

    /// The token after one use: counter-based tokens advance their counter.
    #[must_use]
    pub fn updated(&self) -> Self {
        Self {
            generator: self.generator.successor(),
            ..self.clone()
        }
    }

    /// Password shown at `time`, or `None` if it cannot be computed
    /// (e.g. a time before the epoch).
    pub fn current_password(&self, time: DisplayTime) -> Option<String> {
        self.generator.password_at(time.as_secs_f64()).ok()
    }

    /// Parse an `otpauth://` URL.
    pub fn from_url(text: &str) -> crate::AuthResult<Self> {
        url::parse(text)
    }

    /// Serialize as an `otpauth://` URL.
    pub fn to_url(&self) -> String {
        url::serialize(self)
    }
}

// =============================================================================
// PersistentToken
// =============================================================================

/// A token as held by a token store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistentToken {
    pub token: Token,
    pub identifier: PersistentId,
}

impl PersistentToken {
    pub fn new(token: Token, identifier: PersistentId) -> Self {
        Self { token, identifier }
    }

    /// Whether both refer to the same stored token, whatever its contents.
    pub fn has_same_identity(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter_token() -> Token {
        let generator = Generator::new(Factor::Counter(4), b"12345678901234567890".to_vec(), Algorithm::Sha1, 6)
            .expect("valid generator");
        Token::new("alice@example.com", "Example", generator)
    }

    #[test]
    fn test_updated_advances_counter() {
        let token = counter_token();
        let updated = token.updated();
        assert_eq!(updated.generator.factor(), Factor::Counter(5));
        assert_eq!(updated.name, token.name);
        assert_eq!(updated.issuer, token.issuer);
    }

    #[test]
    fn test_current_password_counter() {
        let token = counter_token();
        // RFC 4226 test value for count 4
        assert_eq!(token.current_password(DisplayTime::new(0.0)).as_deref(), Some("338314"));
    }

    #[test]
    fn test_persistent_identity_ignores_contents() {
        let id = PersistentId::from_raw(9);
        let a = PersistentToken::new(counter_token(), id);
        let b = PersistentToken::new(counter_token().updated(), id);
        assert!(a.has_same_identity(&b));
        assert_ne!(a, b);
    }
}
