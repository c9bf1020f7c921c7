//! Form rows and headers
//!
//! Forms are tables whose rows are either text fields or segmented controls.
//! Every row carries a stable identity string; two rows are the same row
//! when they are the same kind with the same identity, whatever their
//! current value.

use std::fmt;

use smallvec::SmallVec;

use super::table::TableViewModel;
use crate::algo::Identifiable;
use crate::display::DIGIT_GROUP_SIZES;
use crate::token::Algorithm;

/// View model of a form screen
pub type FormViewModel<A> = TableViewModel<FormHeader<A>, FormRow<A>, A>;

/// Kind of token created by the entry form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenType {
    #[default]
    Timer,
    Counter,
}

// =============================================================================
// Text fields
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capitalization {
    None,
    Words,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardKind {
    Default,
    Email,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnKey {
    Next,
    Done,
}

/// Labeled text field; `change_action` turns the edited text into an action.
#[derive(Clone)]
pub struct TextFieldRowModel<A> {
    pub identity: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub capitalization: Capitalization,
    pub autocorrection: bool,
    pub keyboard: KeyboardKind,
    pub return_key: ReturnKey,
    pub value: String,
    pub change_action: fn(String) -> A,
}

impl<A> TextFieldRowModel<A> {
    pub fn issuer(value: impl Into<String>, change_action: fn(String) -> A) -> Self {
        Self {
            identity: "token.issuer",
            label: "Issuer",
            placeholder: "Some Website",
            capitalization: Capitalization::Words,
            autocorrection: true,
            keyboard: KeyboardKind::Default,
            return_key: ReturnKey::Next,
            value: value.into(),
            change_action,
        }
    }

    pub fn name(value: impl Into<String>, return_key: ReturnKey, change_action: fn(String) -> A) -> Self {
        Self {
            identity: "token.name",
            label: "Account Name",
            placeholder: "user@example.com",
            capitalization: Capitalization::None,
            autocorrection: false,
            keyboard: KeyboardKind::Email,
            return_key,
            value: value.into(),
            change_action,
        }
    }

    pub fn secret(value: impl Into<String>, change_action: fn(String) -> A) -> Self {
        Self {
            identity: "token.secret",
            label: "Secret Key",
            placeholder: "•••• •••• •••• ••••",
            capitalization: Capitalization::None,
            autocorrection: false,
            keyboard: KeyboardKind::Default,
            return_key: ReturnKey::Done,
            value: value.into(),
            change_action,
        }
    }

    /// The action for the field now containing `text`.
    pub fn change(&self, text: impl Into<String>) -> A {
        (self.change_action)(text.into())
    }
}

// The change action is a constructor, not state; it takes no part in equality.
impl<A> PartialEq for TextFieldRowModel<A> {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
            && self.label == other.label
            && self.placeholder == other.placeholder
            && self.capitalization == other.capitalization
            && self.autocorrection == other.autocorrection
            && self.keyboard == other.keyboard
            && self.return_key == other.return_key
            && self.value == other.value
    }
}

impl<A> fmt::Debug for TextFieldRowModel<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextFieldRowModel")
            .field("identity", &self.identity)
            .field("value", &self.value)
            .field("return_key", &self.return_key)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Segmented controls
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentOption<A> {
    pub title: &'static str,
    pub action: A,
}

/// Row of mutually exclusive options; each option carries the action it dispatches.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentedControlRowModel<A> {
    pub identity: &'static str,
    pub options: SmallVec<[SegmentOption<A>; 3]>,
    /// Index of the option matching the current value
    pub selected: Option<usize>,
}

impl<A> SegmentedControlRowModel<A> {
    fn from_options<V: Copy + PartialEq>(
        identity: &'static str,
        options: &[(&'static str, V)],
        value: V,
        change_action: impl Fn(V) -> A,
    ) -> Self {
        Self {
            identity,
            options: options
                .iter()
                .map(|&(title, option)| SegmentOption {
                    title,
                    action: change_action(option),
                })
                .collect(),
            selected: options.iter().position(|&(_, option)| option == value),
        }
    }

    pub fn token_type(value: TokenType, change_action: fn(TokenType) -> A) -> Self {
        Self::from_options(
            "token.type",
            &[("Time Based", TokenType::Timer), ("Counter Based", TokenType::Counter)],
            value,
            change_action,
        )
    }

    pub fn digit_count(value: u8, change_action: fn(u8) -> A) -> Self {
        Self::from_options(
            "token.digitCount",
            &[("6 Digits", 6), ("7 Digits", 7), ("8 Digits", 8)],
            value,
            change_action,
        )
    }

    pub fn algorithm(value: Algorithm, change_action: fn(Algorithm) -> A) -> Self {
        Self::from_options(
            "token.algorithm",
            &[
                ("SHA-1", Algorithm::Sha1),
                ("SHA-256", Algorithm::Sha256),
                ("SHA-512", Algorithm::Sha512),
            ],
            value,
            change_action,
        )
    }

    pub fn digit_group_size(value: usize, change_action: fn(usize) -> A) -> Self {
        let titles = ["•• •• ••", "••• •••"];
        let options: SmallVec<[(&'static str, usize); 2]> =
            titles.into_iter().zip(DIGIT_GROUP_SIZES).collect();
        Self::from_options("password.digitGroupSize", &options, value, change_action)
    }

    /// Action of the option at `index`.
    pub fn select(&self, index: usize) -> Option<&A> {
        self.options.get(index).map(|option| &option.action)
    }
}

// =============================================================================
// Rows and headers
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum FormRow<A> {
    TextField(TextFieldRowModel<A>),
    SegmentedControl(SegmentedControlRowModel<A>),
}

impl<A> FormRow<A> {
    crate::impl_enum_accessors!(
        text_field: TextFieldRowModel<A>,
        segmented_control: SegmentedControlRowModel<A>,
    );
    crate::impl_variant_field_get!(identity, identity, &'static str, TextField, SegmentedControl);
}

impl<A> Identifiable for FormRow<A> {
    fn has_same_identity(&self, other: &Self) -> bool {
        match (self, other) {
            (FormRow::TextField(a), FormRow::TextField(b)) => a.identity == b.identity,
            (FormRow::SegmentedControl(a), FormRow::SegmentedControl(b)) => a.identity == b.identity,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonHeaderModel<A> {
    pub identity: &'static str,
    pub title: &'static str,
    pub action: A,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormHeader<A> {
    Button(ButtonHeaderModel<A>),
}
