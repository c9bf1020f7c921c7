//! Token persistence
//!
//! [`TokenStore`] is the seam between the reducers and whatever keeps the
//! tokens (a keychain on a device). [`MemoryTokenStore`] is the in-process
//! implementation; [`SharedTokenStore`] wraps any store for use from several
//! threads.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::error::{AuthResult, AuthenticatorError};
use crate::id::{PersistentId, StoreSeed};
use crate::token::{PersistentToken, Token};

// =============================================================================
// TokenStore
// =============================================================================

/// Ordered collection of stored tokens.
pub trait TokenStore {
    /// All stored tokens, in display order.
    fn persistent_tokens(&self) -> Vec<PersistentToken>;

    /// Store a new token at the end of the list.
    fn add_token(&mut self, token: Token) -> AuthResult<PersistentToken>;

    /// Replace the contents of a stored token, keeping its identifier and position.
    fn save_token(&mut self, token: Token, persistent: &PersistentToken) -> AuthResult<PersistentToken>;

    /// Store the token's successor (advance a counter-based token).
    fn update_persistent_token(&mut self, persistent: &PersistentToken) -> AuthResult<PersistentToken> {
        self.save_token(persistent.token.updated(), persistent)
    }

    /// Move the token at `from` so that it ends up at `to`.
    fn move_token(&mut self, from: usize, to: usize) -> AuthResult<()>;

    fn delete_persistent_token(&mut self, persistent: &PersistentToken) -> AuthResult<()>;
}

// =============================================================================
// MemoryTokenStore
// =============================================================================

/// In-memory token store.
///
/// Identifiers are minted from the store seed and a sequence number, so a
/// store rebuilt with the same seed hands out the same identifiers in the
/// same order.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    seed: StoreSeed,
    next_sequence: u64,
    tokens: Vec<PersistentToken>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    pub fn new(seed: StoreSeed) -> Self {
        Self {
            seed,
            next_sequence: 0,
            tokens: Vec::new(),
        }
    }

    /// Restore previously stored tokens in a saved identifier order.
    ///
    /// Tokens missing from `order` are appended after the ordered ones,
    /// keeping their relative order.
    pub fn with_saved_order(seed: StoreSeed, mut tokens: Vec<PersistentToken>, order: &[PersistentId]) -> Self {
        let rank: FxHashMap<PersistentId, usize> = order
            .iter()
            .enumerate()
            .map(|(position, id)| (*id, position))
            .collect();
        tokens.sort_by_key(|persistent| rank.get(&persistent.identifier).copied().unwrap_or(usize::MAX));

        let lost = tokens
            .iter()
            .filter(|persistent| !rank.contains_key(&persistent.identifier))
            .count();
        if lost > 0 {
            log::debug!("restored {lost} token(s) missing from the saved order");
        }

        Self {
            seed,
            next_sequence: tokens.len() as u64,
            tokens,
        }
    }

    /// Identifier order to persist alongside the tokens.
    pub fn saved_order(&self) -> Vec<PersistentId> {
        self.tokens.iter().map(|persistent| persistent.identifier).collect()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    fn position(&self, identifier: PersistentId) -> AuthResult<usize> {
        self.tokens
            .iter()
            .position(|persistent| persistent.identifier == identifier)
            .ok_or(AuthenticatorError::TokenNotFound(identifier))
    }

    fn mint_identifier(&mut self) -> PersistentId {
        loop {
            let id = PersistentId::mint(self.seed, self.next_sequence);
            self.next_sequence += 1;
            if !self.tokens.iter().any(|persistent| persistent.identifier == id) {
                return id;
            }
        }
    }

    fn check_index(&self, index: usize) -> AuthResult<()> {
        if index < self.tokens.len() {
            Ok(())
        } else {
            Err(AuthenticatorError::IndexOutOfBounds {
                index,
                len: self.tokens.len(),
            })
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn persistent_tokens(&self) -> Vec<PersistentToken> {
        self.tokens.clone()
    }

    fn add_token(&mut self, token: Token) -> AuthResult<PersistentToken> {
        let persistent = PersistentToken::new(token, self.mint_identifier());
        log::debug!("add token {}", persistent.identifier);
        self.tokens.push(persistent.clone());
        Ok(persistent)
    }

    fn save_token(&mut self, token: Token, persistent: &PersistentToken) -> AuthResult<PersistentToken> {
        let position = self.position(persistent.identifier)?;
        let saved = PersistentToken::new(token, persistent.identifier);
        log::debug!("save token {}", saved.identifier);
        self.tokens[position] = saved.clone();
        Ok(saved)
    }

    fn move_token(&mut self, from: usize, to: usize) -> AuthResult<()> {
        self.check_index(from)?;
        self.check_index(to)?;
        log::debug!("move token {from} -> {to}");
        let persistent = self.tokens.remove(from);
        self.tokens.insert(to, persistent);
        Ok(())
    }

    fn delete_persistent_token(&mut self, persistent: &PersistentToken) -> AuthResult<()> {
        let position = self.position(persistent.identifier)?;
        log::debug!("delete token {}", persistent.identifier);
        self.tokens.remove(position);
        Ok(())
    }
}

// =============================================================================
// SharedTokenStore
// =============================================================================

/// Thread-safe shared token store.
///
/// Uses `parking_lot::RwLock`; clones share the same underlying store.
#[derive(Debug)]
pub struct SharedTokenStore<S> {
    inner: Arc<RwLock<S>>,
}

impl<S> Clone for SharedTokenStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Default> Default for SharedTokenStore<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S> SharedTokenStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Execute a closure with read access to the store.
    pub fn with_read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        let guard = self.inner.read();
        f(&guard)
    }

    /// Execute a closure with write access to the store.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut guard)
    }
}

impl<S: TokenStore> TokenStore for SharedTokenStore<S> {
    fn persistent_tokens(&self) -> Vec<PersistentToken> {
        self.with_read(|store| store.persistent_tokens())
    }

    fn add_token(&mut self, token: Token) -> AuthResult<PersistentToken> {
        self.with_write(|store| store.add_token(token))
    }

    fn save_token(&mut self, token: Token, persistent: &PersistentToken) -> AuthResult<PersistentToken> {
        self.with_write(|store| store.save_token(token, persistent))
    }

    fn update_persistent_token(&mut self, persistent: &PersistentToken) -> AuthResult<PersistentToken> {
        self.with_write(|store| store.update_persistent_token(persistent))
    }

    fn move_token(&mut self, from: usize, to: usize) -> AuthResult<()> {
        self.with_write(|store| store.move_token(from, to))
    }

    fn delete_persistent_token(&mut self, persistent: &PersistentToken) -> AuthResult<()> {
        self.with_write(|store| store.delete_persistent_token(persistent))
    }
}
