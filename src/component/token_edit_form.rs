//! Editing an existing token's issuer and name

use crate::token::{PersistentToken, Token};
use crate::view::{
    BarButtonStyle, BarButtonViewModel, FormRow, FormViewModel, ReturnKey, Section, TextFieldRowModel,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenEditForm {
    persistent_token: PersistentToken,
    issuer: String,
    name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Issuer(String),
    Name(String),
    Cancel,
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Cancel,
    SaveChanges(Token, PersistentToken),
    ShowErrorMessage(String),
}

pub type ViewModel = FormViewModel<Action>;

impl TokenEditForm {
    pub fn new(persistent_token: PersistentToken) -> Self {
        Self {
            issuer: persistent_token.token.issuer.to_string(),
            name: persistent_token.token.name.to_string(),
            persistent_token,
        }
    }

    pub fn is_valid(&self) -> bool {
        !(self.issuer.is_empty() && self.name.is_empty())
    }

    pub fn view_model(&self) -> ViewModel {
        FormViewModel::new(
            "Edit Token",
            vec![Section::new(vec![
                FormRow::TextField(TextFieldRowModel::issuer(self.issuer.as_str(), Action::Issuer)),
                FormRow::TextField(TextFieldRowModel::name(self.name.as_str(), ReturnKey::Done, Action::Name)),
            ])],
            Action::Submit,
        )
        .with_left_bar_button(BarButtonViewModel::new(BarButtonStyle::Cancel, Action::Cancel))
        .with_right_bar_button(
            BarButtonViewModel::new(BarButtonStyle::Done, Action::Submit).enabled(self.is_valid()),
        )
    }

    pub fn update(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::Issuer(value) => {
                self.issuer = value;
                None
            }
            Action::Name(value) => {
                self.name = value;
                None
            }
            Action::Cancel => Some(Effect::Cancel),
            Action::Submit => Some(self.submit()),
        }
    }

    fn submit(&self) -> Effect {
        if !self.is_valid() {
            return Effect::ShowErrorMessage("An issuer or name is required.".into());
        }
        let token = Token::new(
            self.name.as_str(),
            self.issuer.as_str(),
            self.persistent_token.token.generator.clone(),
        );
        Effect::SaveChanges(token, self.persistent_token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::PersistentId;
    use crate::token::{Algorithm, Factor, Generator};

    fn persistent() -> PersistentToken {
        let generator =
            Generator::new(Factor::Timer { period: 30 }, b"secret".to_vec(), Algorithm::Sha1, 6).unwrap();
        PersistentToken::new(Token::new("alice", "Example", generator), PersistentId::from_raw(4))
    }

    #[test]
    fn test_starts_with_token_values() {
        let form = TokenEditForm::new(persistent());
        let vm = form.view_model();
        assert_eq!(vm.title, "Edit Token");
        let values: Vec<&str> = vm.sections[0]
            .rows
            .iter()
            .filter_map(|row| row.as_text_field().map(|field| field.value.as_str()))
            .collect();
        assert_eq!(values, ["Example", "alice"]);
    }

    #[test]
    fn test_submit_saves_changes_keeping_generator() {
        let original = persistent();
        let mut form = TokenEditForm::new(original.clone());
        form.update(Action::Name("bob".into()));
        let Some(Effect::SaveChanges(token, target)) = form.update(Action::Submit) else {
            panic!("expected saved changes");
        };
        assert_eq!(token.name, "bob");
        assert_eq!(token.issuer, "Example");
        assert_eq!(token.generator, original.token.generator);
        assert_eq!(target, original);
    }

    #[test]
    fn test_submit_requires_identifier() {
        let mut form = TokenEditForm::new(persistent());
        form.update(Action::Issuer(String::new()));
        form.update(Action::Name(String::new()));
        assert!(!form.view_model().right_bar_button.is_some_and(|b| b.enabled));
        assert!(matches!(form.update(Action::Submit), Some(Effect::ShowErrorMessage(_))));
    }

    #[test]
    fn test_cancel() {
        let mut form = TokenEditForm::new(persistent());
        assert_eq!(form.update(Action::Cancel), Some(Effect::Cancel));
    }
}
