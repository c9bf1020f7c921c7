//! Manual token entry

use crate::token::{decode_secret, Algorithm, Factor, Generator, Token};
use crate::view::{
    BarButtonStyle, BarButtonViewModel, ButtonHeaderModel, FormHeader, FormRow, FormViewModel,
    ReturnKey, Section, SegmentedControlRowModel, TextFieldRowModel, TokenType,
};

const DEFAULT_TIMER_FACTOR: Factor = Factor::Timer { period: 30 };
const DEFAULT_COUNTER_FACTOR: Factor = Factor::Counter(0);
const DEFAULT_DIGITS: u8 = 6;
const INVALID_TOKEN: &str = "Invalid Token";

/// Form state for entering a token by hand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenEntryForm {
    issuer: String,
    name: String,
    secret: String,
    token_type: TokenType,
    digit_count: u8,
    algorithm: Algorithm,
    shows_advanced_options: bool,
    /// Set by a submit whose secret could not be used, cleared by the next action
    submit_failed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Issuer(String),
    Name(String),
    Secret(String),
    TokenType(TokenType),
    DigitCount(u8),
    Algorithm(Algorithm),
    ShowAdvancedOptions,
    Cancel,
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Cancel,
    SaveNewToken(Token),
    ShowErrorMessage(String),
}

pub type ViewModel = FormViewModel<Action>;

impl Default for TokenEntryForm {
    fn default() -> Self {
        Self {
            issuer: String::new(),
            name: String::new(),
            secret: String::new(),
            token_type: TokenType::Timer,
            digit_count: DEFAULT_DIGITS,
            algorithm: Algorithm::Sha1,
            shows_advanced_options: false,
            submit_failed: false,
        }
    }
}

impl TokenEntryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// A secret plus an issuer or a name
    pub fn is_valid(&self) -> bool {
        !self.secret.is_empty() && !(self.issuer.is_empty() && self.name.is_empty())
    }

    pub fn view_model(&self) -> ViewModel {
        let advanced_rows = if self.shows_advanced_options {
            vec![
                FormRow::SegmentedControl(SegmentedControlRowModel::token_type(self.token_type, Action::TokenType)),
                FormRow::SegmentedControl(SegmentedControlRowModel::digit_count(self.digit_count, Action::DigitCount)),
                FormRow::SegmentedControl(SegmentedControlRowModel::algorithm(self.algorithm, Action::Algorithm)),
            ]
        } else {
            Vec::new()
        };
        let advanced_header = FormHeader::Button(ButtonHeaderModel {
            identity: "advanced",
            title: "Advanced Options",
            action: Action::ShowAdvancedOptions,
        });

        FormViewModel::new(
            "Add Token",
            vec![
                Section::new(vec![
                    FormRow::TextField(TextFieldRowModel::issuer(self.issuer.as_str(), Action::Issuer)),
                    FormRow::TextField(TextFieldRowModel::name(self.name.as_str(), ReturnKey::Next, Action::Name)),
                    FormRow::TextField(TextFieldRowModel::secret(self.secret.as_str(), Action::Secret)),
                ]),
                Section::with_header(advanced_header, advanced_rows),
            ],
            Action::Submit,
        )
        .with_left_bar_button(BarButtonViewModel::new(BarButtonStyle::Cancel, Action::Cancel))
        .with_right_bar_button(
            BarButtonViewModel::new(BarButtonStyle::Done, Action::Submit).enabled(self.is_valid()),
        )
        .with_error_message(self.submit_failed.then(|| INVALID_TOKEN.to_owned()))
    }

    pub fn update(&mut self, action: Action) -> Option<Effect> {
        self.submit_failed = false;
        match action {
            Action::Issuer(value) => self.issuer = value,
            Action::Name(value) => self.name = value,
            Action::Secret(value) => self.secret = value,
            Action::TokenType(value) => self.token_type = value,
            Action::DigitCount(value) => self.digit_count = value,
            Action::Algorithm(value) => self.algorithm = value,
            Action::ShowAdvancedOptions => self.shows_advanced_options = true,
            Action::Cancel => return Some(Effect::Cancel),
            Action::Submit => return Some(self.submit()),
        }
        None
    }

    fn submit(&mut self) -> Effect {
        if !self.is_valid() {
            return Effect::ShowErrorMessage("A secret and some identifier are required.".into());
        }
        match self.build_token() {
            Some(token) => Effect::SaveNewToken(token),
            None => {
                self.submit_failed = true;
                Effect::ShowErrorMessage(INVALID_TOKEN.into())
            }
        }
    }

    fn build_token(&self) -> Option<Token> {
        let secret = decode_secret(&self.secret).ok().filter(|secret| !secret.is_empty())?;
        let factor = match self.token_type {
            TokenType::Timer => DEFAULT_TIMER_FACTOR,
            TokenType::Counter => DEFAULT_COUNTER_FACTOR,
        };
        let generator = Generator::new(factor, secret, self.algorithm, self.digit_count).ok()?;
        Some(Token::new(self.name.as_str(), self.issuer.as_str(), generator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> TokenEntryForm {
        let mut form = TokenEntryForm::new();
        for action in [
            Action::Issuer("Example".into()),
            Action::Name("alice".into()),
            Action::Secret("JBSW Y3DP EHPK 3PXP".into()),
        ] {
            assert_eq!(form.update(action), None);
        }
        form
    }

    #[test]
    fn test_cancel() {
        assert_eq!(TokenEntryForm::new().update(Action::Cancel), Some(Effect::Cancel));
    }

    #[test]
    fn test_submit_invalid_form() {
        let mut form = TokenEntryForm::new();
        form.update(Action::Secret("JBSWY3DPEHPK3PXP".into()));
        assert!(!form.is_valid());
        assert!(matches!(form.update(Action::Submit), Some(Effect::ShowErrorMessage(_))));
    }

    #[test]
    fn test_submit_bad_secret() {
        let mut form = filled_form();
        form.update(Action::Secret("not base32!".into()));
        assert_eq!(
            form.update(Action::Submit),
            Some(Effect::ShowErrorMessage("Invalid Token".into()))
        );
    }

    #[test]
    fn test_submit_creates_timer_token() {
        let mut form = filled_form();
        let Some(Effect::SaveNewToken(token)) = form.update(Action::Submit) else {
            panic!("expected a new token");
        };
        assert_eq!(token.issuer, "Example");
        assert_eq!(token.name, "alice");
        assert_eq!(token.generator.factor(), Factor::Timer { period: 30 });
        assert_eq!(token.generator.digits(), 6);
        assert_eq!(token.generator.secret(), b"Hello!\xde\xad\xbe\xef");
    }

    #[test]
    fn test_advanced_options() {
        let mut form = filled_form();
        assert!(form.view_model().sections[1].rows.is_empty());

        form.update(Action::ShowAdvancedOptions);
        form.update(Action::TokenType(TokenType::Counter));
        form.update(Action::DigitCount(8));
        form.update(Action::Algorithm(Algorithm::Sha256));
        assert_eq!(form.view_model().sections[1].rows.len(), 3);

        let Some(Effect::SaveNewToken(token)) = form.update(Action::Submit) else {
            panic!("expected a new token");
        };
        assert_eq!(token.generator.factor(), Factor::Counter(0));
        assert_eq!(token.generator.digits(), 8);
        assert_eq!(token.generator.algorithm(), Algorithm::Sha256);
    }

    #[test]
    fn test_view_model() {
        let form = TokenEntryForm::new();
        let vm = form.view_model();
        assert_eq!(vm.title, "Add Token");
        assert_eq!(vm.number_of_rows_in_section(0), 3);
        assert_eq!(vm.done_key_action, Action::Submit);
        assert_eq!(vm.right_bar_button.as_ref().map(|b| b.enabled), Some(false));
        assert!(matches!(vm.model_for_header(1), Some(FormHeader::Button(_))));

        let filled = filled_form().view_model();
        assert_eq!(filled.right_bar_button.map(|b| b.enabled), Some(true));
    }

    #[test]
    fn test_failed_submit_shows_error_until_next_action() {
        let mut form = filled_form();
        assert_eq!(form.view_model().error_message, None);

        form.update(Action::Secret("not base32!".into()));
        form.update(Action::Submit);
        assert_eq!(form.view_model().error_message.as_deref(), Some("Invalid Token"));

        form.update(Action::Secret("JBSWY3DPEHPK3PXP".into()));
        assert_eq!(form.view_model().error_message, None);
    }

    #[test]
    fn test_invalid_form_submit_sets_no_error_message() {
        let mut form = TokenEntryForm::new();
        form.update(Action::Submit);
        assert_eq!(form.view_model().error_message, None);
    }

    #[test]
    fn test_row_change_action_round_trip() {
        let mut form = TokenEntryForm::new();
        let vm = form.view_model();
        let issuer_row = vm.sections[0].rows[0].as_text_field().unwrap();
        form.update(issuer_row.change("Acme"));
        assert_eq!(form.issuer, "Acme");
    }
}
