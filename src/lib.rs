//! authenticator-core - Token list diffing and state for a one-time password app
//!
//! ## Core Concepts
//!
//! **Identity-aware list diff**: a Myers diff over rows that know whether they
//! represent the same entity, reporting inserts, deletes, moves and in-place
//! updates so a table view can animate exactly what changed.
//!
//! **Reducers**: the app state is a tree of plain values. User actions go in,
//! effects come out, and the results of performed effects come back as events.
//!
//! ## Modules
//! - `algo`: diff engine
//! - `apply`: replaying changes onto a table
//! - `token`: HOTP/TOTP tokens and `otpauth://` URLs
//! - `store`: token persistence
//! - `component`: reducers
//! - `view`: view models
//! - `app`: effect interpreter
//!
//! ## Usage
//!
//! ```ignore
//! use authenticator_core::prelude::*;
//!
//! let store = MemoryTokenStore::new(StoreSeed::from_name("tokens"));
//! let mut app = AppController::new(store, platform, AppConfig::default(), DisplayTime::now());
//!
//! let token = Token::from_url("otpauth://totp/ACME:john?secret=JBSWY3DPEHPK3PXP")?;
//! app.dispatch(root::Action::AddTokenFromUrl(token))?;
//! ```

#[macro_use]
mod macros;

// =============================================================================
// Core modules
// =============================================================================

/// Algorithms: list diff, myers, stable hashing
pub mod algo;

/// Applying changes to a table
pub mod apply;

/// Stable identity for stored tokens
pub mod id;

/// Error types
pub mod error;

/// Tokens and password generation
pub mod token;

/// Display time and password formatting
pub mod display;

/// Token persistence
pub mod store;

// =============================================================================
// App state
// =============================================================================

/// View models
pub mod view;

/// Reducers
pub mod component;

/// Application configuration
pub mod config;

/// Effect interpreter
pub mod app;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Algorithms
pub use algo::{diff, diff_with_config, Change, DiffConfig, Identifiable, IndexPath, StableHasher};

// Tokens
pub use token::{PersistentToken, Token};

// Identity
pub use id::{PersistentId, StoreSeed};

// Error types
pub use error::{AuthResult, AuthenticatorError};

// App
pub use app::{AppController, Platform};
pub use config::AppConfig;
