//! The token list
//!
//! Holds the stored tokens as last reported by the store, the display time
//! the passwords are computed for, and an optional search filter. Mutations
//! of the store are requested through effects; the results come back as
//! [`Event`]s.

use crate::display::DisplayTime;
use crate::token::{Factor, PersistentToken};
use crate::view::TokenRowModel;

#[derive(Debug, Clone, PartialEq)]
pub struct TokenList {
    persistent_tokens: Vec<PersistentToken>,
    display_time: DisplayTime,
    filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub rows: Vec<TokenRowModel>,
    /// Smallest timer period among the shown tokens, drives the countdown ring
    pub ring_period: Option<u64>,
    /// Elapsed fraction of the current ring period, in `0.0..1.0`
    pub ring_progress: Option<f64>,
    pub total_tokens: usize,
    pub is_filtering: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    BeginAddToken,
    EditPersistentToken(PersistentToken),
    UpdatePersistentToken(PersistentToken),
    MoveToken { from: usize, to: usize },
    DeletePersistentToken(PersistentToken),
    CopyPassword(String),
    Filter(String),
    ClearFilter,
    ShowBackupInfo,
    ShowLicenseInfo,
    ShowInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    BeginTokenEntry,
    BeginTokenEdit(PersistentToken),
    UpdateToken(PersistentToken),
    MoveToken { from: usize, to: usize },
    DeletePersistentToken(PersistentToken),
    CopyPassword(String),
    ShowErrorMessage(String),
    ShowBackupInfo,
    ShowLicenseInfo,
    ShowInfo,
}

/// Outcome of a store mutation requested by an [`Effect`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    TokenChangeSucceeded(Vec<PersistentToken>),
    UpdateTokenFailed(String),
    MoveTokenFailed(String),
    DeleteTokenFailed(String),
}

impl TokenList {
    pub fn new(persistent_tokens: Vec<PersistentToken>, display_time: DisplayTime) -> Self {
        Self {
            persistent_tokens,
            display_time,
            filter: None,
        }
    }

    pub fn persistent_tokens(&self) -> &[PersistentToken] {
        &self.persistent_tokens
    }

    pub fn is_filtering(&self) -> bool {
        self.filter.as_deref().is_some_and(|filter| !filter.is_empty())
    }

    pub fn view_model(&self, digit_group_size: usize) -> ViewModel {
        let is_filtering = self.is_filtering();
        let shown: Vec<&PersistentToken> = self
            .persistent_tokens
            .iter()
            .filter(|persistent| self.matches_filter(persistent))
            .collect();

        let ring_period = shown
            .iter()
            .filter_map(|persistent| match persistent.token.generator.factor() {
                Factor::Timer { period } => Some(period),
                Factor::Counter(_) => None,
            })
            .min();
        let ring_progress = ring_period.map(|period| {
            let period = period as f64;
            self.display_time.as_secs_f64().rem_euclid(period) / period
        });

        ViewModel {
            rows: shown
                .into_iter()
                .map(|persistent| TokenRowModel::new(persistent, self.display_time, digit_group_size, !is_filtering))
                .collect(),
            ring_period,
            ring_progress,
            total_tokens: self.persistent_tokens.len(),
            is_filtering,
        }
    }

    pub fn update(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::BeginAddToken => Some(Effect::BeginTokenEntry),
            Action::EditPersistentToken(persistent) => Some(Effect::BeginTokenEdit(persistent)),
            Action::UpdatePersistentToken(persistent) => Some(Effect::UpdateToken(persistent)),
            Action::MoveToken { from, to } => {
                // Filtered rows are not reorderable; their indices would not address the store
                if self.is_filtering() {
                    log::warn!("ignoring move {from} -> {to} while filtering");
                    return None;
                }
                Some(Effect::MoveToken { from, to })
            }
            Action::DeletePersistentToken(persistent) => Some(Effect::DeletePersistentToken(persistent)),
            Action::CopyPassword(password) => Some(Effect::CopyPassword(password)),
            Action::Filter(filter) => {
                self.filter = Some(filter);
                None
            }
            Action::ClearFilter => {
                self.filter = None;
                None
            }
            Action::ShowBackupInfo => Some(Effect::ShowBackupInfo),
            Action::ShowLicenseInfo => Some(Effect::ShowLicenseInfo),
            Action::ShowInfo => Some(Effect::ShowInfo),
        }
    }

    pub fn handle_event(&mut self, event: Event) -> Option<Effect> {
        match event {
            Event::TokenChangeSucceeded(persistent_tokens) => {
                self.persistent_tokens = persistent_tokens;
                None
            }
            Event::UpdateTokenFailed(message) => failed("Failed to update token.", &message),
            Event::MoveTokenFailed(message) => failed("Failed to move token.", &message),
            Event::DeleteTokenFailed(message) => failed("Failed to delete token.", &message),
        }
    }

    pub fn update_with_persistent_tokens(&mut self, persistent_tokens: Vec<PersistentToken>) {
        self.persistent_tokens = persistent_tokens;
    }

    pub fn update_display_time(&mut self, display_time: DisplayTime) {
        self.display_time = display_time;
    }

    fn matches_filter(&self, persistent: &PersistentToken) -> bool {
        let Some(filter) = self.filter.as_deref().filter(|filter| !filter.is_empty()) else {
            return true;
        };
        let needle = filter.to_lowercase();
        let token = &persistent.token;
        token.issuer.to_lowercase().contains(&needle) || token.name.to_lowercase().contains(&needle)
    }
}

fn failed(message: &str, cause: &str) -> Option<Effect> {
    log::warn!("{message} {cause}");
    Some(Effect::ShowErrorMessage(message.to_owned()))
}
