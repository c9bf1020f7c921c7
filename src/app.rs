//! Effect interpreter
//!
//! [`AppController`] is the only place that touches the outside world. It
//! feeds actions to [`Root`], performs the resulting effects against a
//! [`TokenStore`] and a [`Platform`], turns their outcomes back into events,
//! and presents the new view model together with the token row changes.

use crate::algo::{diff_with_config, Change, Identifiable, IndexPath};
use crate::component::auth;
use crate::component::root::{Action, Effect, Event, Root, ViewModel};
use crate::component::token_list;
use crate::config::AppConfig;
use crate::display::DisplayTime;
use crate::error::AuthResult;
use crate::store::TokenStore;
use crate::view::TokenRowModel;

/// Services supplied by the host platform.
pub trait Platform {
    fn copy_to_pasteboard(&mut self, text: &str);

    fn show_error_message(&mut self, message: &str);

    fn show_success_message(&mut self, message: &str);

    fn open_url(&mut self, url: &str);

    /// Persist the user's digit group preference.
    fn save_digit_group_size(&mut self, digit_group_size: usize);

    /// Ask the user to authenticate. Errors carry a user-facing reason.
    fn authenticate_user(&mut self) -> Result<(), String>;

    /// Display a view model. `row_changes` address token rows in section 0,
    /// relative to the previously presented view model.
    fn present(&mut self, view_model: &ViewModel, row_changes: &[Change<IndexPath>]);
}

pub struct AppController<S, P> {
    root: Root,
    store: S,
    platform: P,
    config: AppConfig,
    presented_rows: Vec<TokenRowModel>,
}

impl<S: TokenStore, P: Platform> AppController<S, P> {
    /// Load the stored tokens and present the first view model.
    pub fn new(store: S, platform: P, config: AppConfig, display_time: DisplayTime) -> Self {
        let root = Root::new(store.persistent_tokens(), display_time, &config);
        let mut controller = Self {
            root,
            store,
            platform,
            config,
            presented_rows: Vec::new(),
        };
        controller.present();
        controller
    }

    pub fn root(&self) -> &Root {
        &self.root
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn into_parts(self) -> (S, P) {
        (self.store, self.platform)
    }

    /// Run a user action to completion.
    ///
    /// Rejected actions leave the state untouched and present nothing.
    pub fn dispatch(&mut self, action: Action) -> AuthResult<()> {
        let effect = self.root.update(action)?;
        self.run(effect);
        self.present();
        Ok(())
    }

    /// Deliver an event from the platform, e.g. an app lifecycle change.
    pub fn handle_event(&mut self, event: Event) {
        let effect = self.root.handle_event(event);
        self.run(effect);
        self.present();
    }

    /// Advance the display clock.
    pub fn tick(&mut self, display_time: DisplayTime) {
        self.handle_event(Event::UpdateDisplayTime(display_time));
    }

    fn run(&mut self, mut effect: Option<Effect>) {
        while let Some(next) = effect.take() {
            effect = self.perform(next);
        }
    }

    fn perform(&mut self, effect: Effect) -> Option<Effect> {
        log::debug!("performing {effect:?}");
        match effect {
            Effect::AddToken(token) => {
                let event = match self.store.add_token(token) {
                    Ok(_) => Event::AddTokenSucceeded(self.store.persistent_tokens()),
                    Err(e) => Event::AddTokenFailed(e.to_string()),
                };
                self.root.handle_event(event)
            }
            Effect::SaveToken(token, persistent) => {
                let event = match self.store.save_token(token, &persistent) {
                    Ok(_) => Event::SaveTokenSucceeded(self.store.persistent_tokens()),
                    Err(e) => Event::SaveTokenFailed(e.to_string()),
                };
                self.root.handle_event(event)
            }
            Effect::UpdatePersistentToken(persistent) => {
                let event = match self.store.update_persistent_token(&persistent) {
                    Ok(_) => token_list::Event::TokenChangeSucceeded(self.store.persistent_tokens()),
                    Err(e) => token_list::Event::UpdateTokenFailed(e.to_string()),
                };
                self.root.handle_event(Event::TokenList(event))
            }
            Effect::MoveToken { from, to } => {
                let event = match self.store.move_token(from, to) {
                    Ok(()) => token_list::Event::TokenChangeSucceeded(self.store.persistent_tokens()),
                    Err(e) => token_list::Event::MoveTokenFailed(e.to_string()),
                };
                self.root.handle_event(Event::TokenList(event))
            }
            Effect::DeletePersistentToken(persistent) => {
                let event = match self.store.delete_persistent_token(&persistent) {
                    Ok(()) => token_list::Event::TokenChangeSucceeded(self.store.persistent_tokens()),
                    Err(e) => token_list::Event::DeleteTokenFailed(e.to_string()),
                };
                self.root.handle_event(Event::TokenList(event))
            }
            Effect::ShowErrorMessage(message) => {
                self.platform.show_error_message(&message);
                None
            }
            Effect::ShowSuccessMessage(message) => {
                self.platform.show_success_message(&message);
                None
            }
            Effect::CopyToPasteboard(text) => {
                self.platform.copy_to_pasteboard(&text);
                Some(Effect::ShowSuccessMessage("Copied".into()))
            }
            Effect::OpenUrl(url) => {
                self.platform.open_url(&url);
                None
            }
            Effect::SetDigitGroupSize(size) => {
                self.platform.save_digit_group_size(size);
                None
            }
            Effect::AuthenticateUser => {
                let event = match self.platform.authenticate_user() {
                    Ok(()) => auth::Event::AuthenticationSucceeded,
                    Err(reason) => auth::Event::AuthenticationFailed(reason),
                };
                self.root.handle_event(Event::Auth(event))
            }
        }
    }

    fn present(&mut self) {
        let view_model = self.root.view_model();
        let rows = &view_model.token_list.rows;
        let changes: Vec<Change<IndexPath>> = diff_with_config(
            &self.presented_rows,
            rows,
            |a, b| a.has_same_identity(b),
            |a, b| a == b,
            &self.config.diff,
        )
        .changes
        .into_iter()
        .map(|change| change.map_index(|row| IndexPath::new(0, row)))
        .collect();
        self.platform.present(&view_model, &changes);
        self.presented_rows = view_model.token_list.rows;
    }
}
