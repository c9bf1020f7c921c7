//! View models
//!
//! Plain values describing what a presentation layer should show. They are
//! rebuilt from reducer state on every cycle and diffed against the previous
//! version (see [`TableViewModel::changes_since`]).

mod form;
mod table;
mod token_row;

pub use form::{
    ButtonHeaderModel, Capitalization, FormHeader, FormRow, FormViewModel, KeyboardKind, ReturnKey,
    SegmentOption, SegmentedControlRowModel, TextFieldRowModel, TokenType,
};
pub use table::{BarButtonStyle, BarButtonViewModel, Section, TableViewModel};
pub use token_row::TokenRowModel;
