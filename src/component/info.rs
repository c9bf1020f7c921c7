//! Info pages, the info list, and display options

use std::convert::Infallible;

use crate::view::{
    BarButtonStyle, BarButtonViewModel, FormRow, Section, SegmentedControlRowModel, TableViewModel,
};

// =============================================================================
// Info
// =============================================================================

/// A static HTML page bundled with the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
    title: &'static str,
    resource: &'static str,
}

impl Info {
    pub fn backup_info() -> Self {
        Self {
            title: "Backups",
            resource: "BackupInfo.html",
        }
    }

    pub fn license_info() -> Self {
        Self {
            title: "Acknowledgements",
            resource: "Acknowledgements.html",
        }
    }

    pub fn view_model(&self) -> InfoViewModel {
        InfoViewModel {
            title: self.title,
            resource: self.resource,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoViewModel {
    pub title: &'static str,
    /// Bundled page to display, resolved by the platform
    pub resource: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoEffect {
    Done,
    /// A link in the page was followed
    OpenUrl(String),
}

// =============================================================================
// InfoList
// =============================================================================

/// Menu root: one row per info page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InfoList;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoListViewModel {
    pub title: &'static str,
    pub rows: Vec<InfoListRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoListRow {
    pub title: &'static str,
    pub description: &'static str,
    pub call_to_action: String,
    pub action: InfoListEffect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoListEffect {
    ShowDisplayOptions,
    ShowBackupInfo,
    ShowLicenseInfo,
    Done,
}

impl InfoList {
    pub fn view_model(&self) -> InfoListViewModel {
        InfoListViewModel {
            title: "Info",
            rows: vec![
                InfoListRow {
                    title: "Display Options",
                    description: "Change how passwords are shown in the token list.",
                    call_to_action: non_breaking("Change Options →"),
                    action: InfoListEffect::ShowDisplayOptions,
                },
                InfoListRow {
                    title: "Backups",
                    description: "For security reasons, tokens will be stored only on this device, \
                                  and will not be included in iCloud or unencrypted backups.",
                    call_to_action: non_breaking("Learn More →"),
                    action: InfoListEffect::ShowBackupInfo,
                },
                InfoListRow {
                    title: "Open Source",
                    description: "Authenticator makes use of several third party libraries.",
                    call_to_action: non_breaking("View Acknowledgements →"),
                    action: InfoListEffect::ShowLicenseInfo,
                },
            ],
        }
    }
}

/// Keep a call to action on one line
fn non_breaking(text: &str) -> String {
    text.replace(' ', "\u{00A0}")
}

// =============================================================================
// DisplayOptions
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayOptionsEffect {
    SetDigitGroupSize(usize),
    Done,
}

/// Display options have no headers
pub type DisplayOptionsViewModel = TableViewModel<Infallible, FormRow<DisplayOptionsEffect>, DisplayOptionsEffect>;

impl DisplayOptions {
    pub fn view_model(&self, digit_group_size: usize) -> DisplayOptionsViewModel {
        let row = SegmentedControlRowModel::digit_group_size(digit_group_size, DisplayOptionsEffect::SetDigitGroupSize);
        TableViewModel::new(
            "Display Options",
            vec![Section::new(vec![FormRow::SegmentedControl(row)])],
            DisplayOptionsEffect::Done,
        )
        .with_right_bar_button(BarButtonViewModel::new(BarButtonStyle::Done, DisplayOptionsEffect::Done))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_pages() {
        assert_eq!(Info::backup_info().view_model().title, "Backups");
        assert_eq!(Info::license_info().view_model().resource, "Acknowledgements.html");
    }

    #[test]
    fn test_info_list_rows() {
        let vm = InfoList.view_model();
        let actions: Vec<_> = vm.rows.iter().map(|row| row.action).collect();
        assert_eq!(
            actions,
            [
                InfoListEffect::ShowDisplayOptions,
                InfoListEffect::ShowBackupInfo,
                InfoListEffect::ShowLicenseInfo
            ]
        );
        assert!(vm.rows.iter().all(|row| !row.call_to_action.contains(' ')));
    }

    #[test]
    fn test_display_options_selection() {
        let vm = DisplayOptions.view_model(3);
        let row = vm.sections[0].rows[0].as_segmented_control().unwrap();
        assert_eq!(row.selected, Some(1));
        assert_eq!(row.select(0), Some(&DisplayOptionsEffect::SetDigitGroupSize(2)));
        assert_eq!(vm.done_key_action, DisplayOptionsEffect::Done);
    }
}
