//! Prelude module for common imports.
//!
//! ```ignore
//! use authenticator_core::prelude::*;
//! ```

// Diff engine
pub use crate::algo::{
    changes_from, changes_in_sections, diff, diff_with_config, Change, DiffConfig, DiffResult,
    DiffStats, Identifiable, IndexPath,
};

// Applying changes
pub use crate::apply::{apply_changes, reconcile, ChangeSink};

// Tokens
pub use crate::token::{Algorithm, Factor, Generator, PersistentToken, Token};

// Identity
pub use crate::id::{PersistentId, StoreSeed};

// Storage
pub use crate::store::{MemoryTokenStore, SharedTokenStore, TokenStore};

// Components
pub use crate::component::{Modal, Root};

// App
pub use crate::app::{AppController, Platform};
pub use crate::config::AppConfig;
pub use crate::display::DisplayTime;

// Error
pub use crate::error::{AuthResult, AuthenticatorError};
