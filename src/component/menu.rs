//! Info menu: the info list plus at most one child page

use super::info::{
    DisplayOptions, DisplayOptionsEffect, DisplayOptionsViewModel, Info, InfoEffect, InfoList,
    InfoListEffect, InfoListViewModel, InfoViewModel,
};
use crate::error::{AuthResult, AuthenticatorError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    None,
    Info(Info),
    DisplayOptions(DisplayOptions),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    info_list: InfoList,
    child: Child,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub info_list: InfoListViewModel,
    pub child: ChildViewModel,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChildViewModel {
    None,
    Info(InfoViewModel),
    DisplayOptions(DisplayOptionsViewModel),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    DismissInfo,
    DismissDisplayOptions,
    InfoListEffect(InfoListEffect),
    InfoEffect(InfoEffect),
    DisplayOptionsEffect(DisplayOptionsEffect),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Done,
    OpenUrl(String),
    SetDigitGroupSize(usize),
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

impl Menu {
    pub fn new() -> Self {
        Self {
            info_list: InfoList,
            child: Child::None,
        }
    }

    /// Menu opened directly on an info page
    pub fn with_info(info: Info) -> Self {
        Self {
            info_list: InfoList,
            child: Child::Info(info),
        }
    }

    pub fn child(&self) -> &Child {
        &self.child
    }

    pub fn view_model(&self, digit_group_size: usize) -> ViewModel {
        let child = match &self.child {
            Child::None => ChildViewModel::None,
            Child::Info(info) => ChildViewModel::Info(info.view_model()),
            Child::DisplayOptions(options) => ChildViewModel::DisplayOptions(options.view_model(digit_group_size)),
        };
        ViewModel {
            info_list: self.info_list.view_model(),
            child,
        }
    }

    pub fn update(&mut self, action: Action) -> AuthResult<Option<Effect>> {
        match action {
            Action::DismissInfo => {
                self.dismiss_info()?;
                Ok(None)
            }
            Action::DismissDisplayOptions => {
                self.dismiss_display_options()?;
                Ok(None)
            }
            Action::InfoListEffect(effect) => self.handle_info_list_effect(effect),
            Action::InfoEffect(effect) => Ok(Some(match effect {
                InfoEffect::Done => Effect::Done,
                InfoEffect::OpenUrl(url) => Effect::OpenUrl(url),
            })),
            Action::DisplayOptionsEffect(effect) => Ok(Some(match effect {
                DisplayOptionsEffect::Done => Effect::Done,
                DisplayOptionsEffect::SetDigitGroupSize(size) => Effect::SetDigitGroupSize(size),
            })),
        }
    }

    fn handle_info_list_effect(&mut self, effect: InfoListEffect) -> AuthResult<Option<Effect>> {
        match effect {
            InfoListEffect::ShowDisplayOptions => self.show_child(Child::DisplayOptions(DisplayOptions))?,
            InfoListEffect::ShowBackupInfo => self.show_child(Child::Info(Info::backup_info()))?,
            InfoListEffect::ShowLicenseInfo => self.show_child(Child::Info(Info::license_info()))?,
            InfoListEffect::Done => return Ok(Some(Effect::Done)),
        }
        Ok(None)
    }

    fn show_child(&mut self, child: Child) -> AuthResult<()> {
        if self.child != Child::None {
            return Err(AuthenticatorError::BadChildState("menu already shows a page"));
        }
        self.child = child;
        Ok(())
    }

    fn dismiss_info(&mut self) -> AuthResult<()> {
        if !matches!(self.child, Child::Info(_)) {
            return Err(AuthenticatorError::BadChildState("menu shows no info page"));
        }
        self.child = Child::None;
        Ok(())
    }

    fn dismiss_display_options(&mut self) -> AuthResult<()> {
        if !matches!(self.child, Child::DisplayOptions(_)) {
            return Err(AuthenticatorError::BadChildState("menu shows no display options"));
        }
        self.child = Child::None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_and_dismiss_info() {
        let mut menu = Menu::new();
        assert_eq!(menu.update(Action::InfoListEffect(InfoListEffect::ShowBackupInfo)), Ok(None));
        assert_eq!(menu.child(), &Child::Info(Info::backup_info()));
        assert_eq!(menu.update(Action::DismissInfo), Ok(None));
        assert_eq!(menu.child(), &Child::None);
    }

    #[test]
    fn test_bad_child_state() {
        let mut menu = Menu::with_info(Info::license_info());
        assert!(matches!(
            menu.update(Action::InfoListEffect(InfoListEffect::ShowDisplayOptions)),
            Err(AuthenticatorError::BadChildState(_))
        ));
        assert!(matches!(
            menu.update(Action::DismissDisplayOptions),
            Err(AuthenticatorError::BadChildState(_))
        ));
        // A failed transition leaves the menu untouched
        assert_eq!(menu.child(), &Child::Info(Info::license_info()));
    }

    #[test]
    fn test_display_options() {
        let mut menu = Menu::new();
        menu.update(Action::InfoListEffect(InfoListEffect::ShowDisplayOptions)).unwrap();
        let ChildViewModel::DisplayOptions(vm) = menu.view_model(2).child else {
            panic!("expected display options");
        };
        assert_eq!(vm.title, "Display Options");
        assert_eq!(
            menu.update(Action::DisplayOptionsEffect(DisplayOptionsEffect::SetDigitGroupSize(3))),
            Ok(Some(Effect::SetDigitGroupSize(3)))
        );
        assert_eq!(menu.update(Action::DismissDisplayOptions), Ok(None));
    }

    #[test]
    fn test_child_effects_pass_through() {
        let mut menu = Menu::with_info(Info::backup_info());
        assert_eq!(
            menu.update(Action::InfoEffect(InfoEffect::OpenUrl("https://example.com".into()))),
            Ok(Some(Effect::OpenUrl("https://example.com".into())))
        );
        assert_eq!(menu.update(Action::InfoEffect(InfoEffect::Done)), Ok(Some(Effect::Done)));
        assert_eq!(menu.update(Action::InfoListEffect(InfoListEffect::Done)), Ok(Some(Effect::Done)));
    }
}
