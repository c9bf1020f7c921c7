//! Reducers
//!
//! Every component is a plain state value with the same shape:
//!
//! - `update(action)` applies a user action and may return an effect
//! - `handle_event(event)` applies the outcome of a performed effect
//! - `view_model()` describes what to show
//!
//! Components never perform effects themselves. [`Root`] composes the
//! children and translates their effects; [`crate::app::AppController`]
//! performs what is left.

pub mod auth;
pub mod info;
pub mod menu;
pub mod root;
pub mod token_edit_form;
pub mod token_entry_form;
pub mod token_list;
pub mod token_scanner;

pub use auth::Auth;
pub use info::{DisplayOptions, Info, InfoList};
pub use menu::Menu;
pub use root::{Modal, Root};
pub use token_edit_form::TokenEditForm;
pub use token_entry_form::TokenEntryForm;
pub use token_list::TokenList;
pub use token_scanner::TokenScanner;
