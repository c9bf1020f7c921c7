//! Application root
//!
//! Owns the token list, the screen lock, and at most one modal screen.
//! Child effects are translated here: some only change which modal is shown,
//! the rest surface as root [`Effect`]s for the app controller to perform.
//! Results of performed effects come back as [`Event`]s.

use super::auth::{self, Auth};
use super::info::Info;
use super::menu::{self, Menu};
use super::token_edit_form::{self, TokenEditForm};
use super::token_entry_form::{self, TokenEntryForm};
use super::token_list::{self, TokenList};
use super::token_scanner::{self, TokenScanner};
use crate::config::AppConfig;
use crate::display::DisplayTime;
use crate::error::{AuthResult, AuthenticatorError};
use crate::token::{PersistentToken, Token};

// =============================================================================
// State
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    None,
    Scanner(TokenScanner),
    EntryForm(TokenEntryForm),
    EditForm(TokenEditForm),
    Menu(Menu),
}

impl Modal {
    crate::impl_enum_accessors!(
        scanner: TokenScanner,
        entry_form: TokenEntryForm,
        edit_form: TokenEditForm,
        menu: Menu,
    );

    pub fn is_none(&self) -> bool {
        matches!(self, Modal::None)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Root {
    token_list: TokenList,
    modal: Modal,
    auth: Auth,
    device_can_scan: bool,
    digit_group_size: usize,
}

// =============================================================================
// View model
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub token_list: token_list::ViewModel,
    pub modal: ModalViewModel,
    pub auth: auth::ViewModel,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalViewModel {
    None,
    Scanner(token_scanner::ViewModel),
    EntryForm(token_entry_form::ViewModel),
    EditForm(token_edit_form::ViewModel),
    Menu(menu::ViewModel),
}

// =============================================================================
// Actions, effects, events
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    TokenListAction(token_list::Action),
    TokenEntryFormAction(token_entry_form::Action),
    TokenEditFormAction(token_edit_form::Action),
    TokenScannerAction(token_scanner::Action),
    MenuAction(menu::Action),
    AuthAction(auth::Action),
    /// A token arrived from outside the app, e.g. an opened `otpauth://` link
    AddTokenFromUrl(Token),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    AddToken(Token),
    SaveToken(Token, PersistentToken),
    UpdatePersistentToken(PersistentToken),
    MoveToken { from: usize, to: usize },
    DeletePersistentToken(PersistentToken),
    ShowErrorMessage(String),
    ShowSuccessMessage(String),
    CopyToPasteboard(String),
    OpenUrl(String),
    SetDigitGroupSize(usize),
    AuthenticateUser,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    AddTokenSucceeded(Vec<PersistentToken>),
    AddTokenFailed(String),
    SaveTokenSucceeded(Vec<PersistentToken>),
    SaveTokenFailed(String),
    TokenList(token_list::Event),
    UpdateDisplayTime(DisplayTime),
    Auth(auth::Event),
}

// =============================================================================
// Root
// =============================================================================

impl Root {
    pub fn new(persistent_tokens: Vec<PersistentToken>, display_time: DisplayTime, config: &AppConfig) -> Self {
        Self {
            token_list: TokenList::new(persistent_tokens, display_time),
            modal: Modal::None,
            auth: Auth::new(config.screen_lock_enabled),
            device_can_scan: config.device_can_scan,
            digit_group_size: config.digit_group_size(),
        }
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    pub fn digit_group_size(&self) -> usize {
        self.digit_group_size
    }

    pub fn view_model(&self) -> ViewModel {
        let modal = match &self.modal {
            Modal::None => ModalViewModel::None,
            Modal::Scanner(scanner) => ModalViewModel::Scanner(scanner.view_model()),
            Modal::EntryForm(form) => ModalViewModel::EntryForm(form.view_model()),
            Modal::EditForm(form) => ModalViewModel::EditForm(form.view_model()),
            Modal::Menu(menu) => ModalViewModel::Menu(menu.view_model(self.digit_group_size)),
        };
        ViewModel {
            token_list: self.token_list.view_model(self.digit_group_size),
            modal,
            auth: self.auth.view_model(),
        }
    }

    /// Apply a user action.
    ///
    /// Fails with [`AuthenticatorError::BadChildState`] when the action targets
    /// a modal screen that is not shown.
    pub fn update(&mut self, action: Action) -> AuthResult<Option<Effect>> {
        match action {
            Action::TokenListAction(action) => {
                let effect = self.token_list.update(action);
                Ok(effect.and_then(|effect| self.handle_token_list_effect(effect)))
            }
            Action::TokenEntryFormAction(action) => {
                let form = self
                    .modal
                    .as_entry_form_mut()
                    .ok_or(AuthenticatorError::BadChildState("no token entry form"))?;
                let effect = form.update(action);
                Ok(effect.and_then(|effect| self.handle_token_entry_effect(effect)))
            }
            Action::TokenEditFormAction(action) => {
                let form = self
                    .modal
                    .as_edit_form_mut()
                    .ok_or(AuthenticatorError::BadChildState("no token edit form"))?;
                let effect = form.update(action);
                Ok(effect.and_then(|effect| self.handle_token_edit_effect(effect)))
            }
            Action::TokenScannerAction(action) => {
                let scanner = self
                    .modal
                    .as_scanner_mut()
                    .ok_or(AuthenticatorError::BadChildState("no token scanner"))?;
                let effect = scanner.update(action);
                Ok(effect.and_then(|effect| self.handle_token_scanner_effect(effect)))
            }
            Action::MenuAction(action) => {
                let menu = self
                    .modal
                    .as_menu_mut()
                    .ok_or(AuthenticatorError::BadChildState("no menu"))?;
                let effect = menu.update(action)?;
                Ok(effect.and_then(|effect| self.handle_menu_effect(effect)))
            }
            Action::AuthAction(action) => Ok(self.auth.update(action).map(Self::auth_effect)),
            Action::AddTokenFromUrl(token) => Ok(Some(Effect::AddToken(token))),
        }
    }

    /// Apply the outcome of a performed effect.
    pub fn handle_event(&mut self, event: Event) -> Option<Effect> {
        match event {
            Event::AddTokenSucceeded(persistent_tokens) | Event::SaveTokenSucceeded(persistent_tokens) => {
                self.token_list.update_with_persistent_tokens(persistent_tokens);
                None
            }
            Event::AddTokenFailed(message) => {
                log::warn!("add token failed: {message}");
                Some(Effect::ShowErrorMessage("Failed to add token.".into()))
            }
            Event::SaveTokenFailed(message) => {
                log::warn!("save token failed: {message}");
                Some(Effect::ShowErrorMessage("Failed to save token.".into()))
            }
            Event::TokenList(event) => self
                .token_list
                .handle_event(event)
                .and_then(|effect| self.handle_token_list_effect(effect)),
            Event::UpdateDisplayTime(display_time) => {
                self.token_list.update_display_time(display_time);
                None
            }
            Event::Auth(event) => self.auth.handle_event(event).map(Self::auth_effect),
        }
    }

    // -------------------------------------------------------------------------
    // Child effects
    // -------------------------------------------------------------------------

    fn handle_token_list_effect(&mut self, effect: token_list::Effect) -> Option<Effect> {
        match effect {
            token_list::Effect::BeginTokenEntry => {
                self.modal = if self.device_can_scan {
                    Modal::Scanner(TokenScanner::new())
                } else {
                    Modal::EntryForm(TokenEntryForm::new())
                };
                None
            }
            token_list::Effect::BeginTokenEdit(persistent) => {
                self.modal = Modal::EditForm(TokenEditForm::new(persistent));
                None
            }
            token_list::Effect::UpdateToken(persistent) => Some(Effect::UpdatePersistentToken(persistent)),
            token_list::Effect::MoveToken { from, to } => Some(Effect::MoveToken { from, to }),
            token_list::Effect::DeletePersistentToken(persistent) => Some(Effect::DeletePersistentToken(persistent)),
            token_list::Effect::CopyPassword(password) => Some(Effect::CopyToPasteboard(password)),
            token_list::Effect::ShowErrorMessage(message) => Some(Effect::ShowErrorMessage(message)),
            token_list::Effect::ShowBackupInfo => {
                self.modal = Modal::Menu(Menu::with_info(Info::backup_info()));
                None
            }
            token_list::Effect::ShowLicenseInfo => {
                self.modal = Modal::Menu(Menu::with_info(Info::license_info()));
                None
            }
            token_list::Effect::ShowInfo => {
                self.modal = Modal::Menu(Menu::new());
                None
            }
        }
    }

    fn handle_token_entry_effect(&mut self, effect: token_entry_form::Effect) -> Option<Effect> {
        match effect {
            token_entry_form::Effect::Cancel => {
                self.modal = Modal::None;
                None
            }
            token_entry_form::Effect::SaveNewToken(token) => {
                self.modal = Modal::None;
                Some(Effect::AddToken(token))
            }
            token_entry_form::Effect::ShowErrorMessage(message) => Some(Effect::ShowErrorMessage(message)),
        }
    }

    fn handle_token_edit_effect(&mut self, effect: token_edit_form::Effect) -> Option<Effect> {
        match effect {
            token_edit_form::Effect::Cancel => {
                self.modal = Modal::None;
                None
            }
            token_edit_form::Effect::SaveChanges(token, persistent) => {
                self.modal = Modal::None;
                Some(Effect::SaveToken(token, persistent))
            }
            token_edit_form::Effect::ShowErrorMessage(message) => Some(Effect::ShowErrorMessage(message)),
        }
    }

    fn handle_token_scanner_effect(&mut self, effect: token_scanner::Effect) -> Option<Effect> {
        match effect {
            token_scanner::Effect::Cancel => {
                self.modal = Modal::None;
                None
            }
            token_scanner::Effect::BeginManualTokenEntry => {
                self.modal = Modal::EntryForm(TokenEntryForm::new());
                None
            }
            token_scanner::Effect::SaveNewToken(token) => {
                self.modal = Modal::None;
                Some(Effect::AddToken(token))
            }
            token_scanner::Effect::ShowErrorMessage(message) => Some(Effect::ShowErrorMessage(message)),
        }
    }

    fn handle_menu_effect(&mut self, effect: menu::Effect) -> Option<Effect> {
        match effect {
            menu::Effect::Done => {
                self.modal = Modal::None;
                None
            }
            menu::Effect::OpenUrl(url) => Some(Effect::OpenUrl(url)),
            menu::Effect::SetDigitGroupSize(size) => {
                self.digit_group_size = size;
                Some(Effect::SetDigitGroupSize(size))
            }
        }
    }

    fn auth_effect(effect: auth::Effect) -> Effect {
        match effect {
            auth::Effect::AuthenticateUser => Effect::AuthenticateUser,
        }
    }
}
