//! Sectioned table view models

use crate::algo::{changes_in_sections, Change, Identifiable, IndexPath};

/// Bar button role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarButtonStyle {
    Done,
    Cancel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarButtonViewModel<A> {
    pub style: BarButtonStyle,
    pub action: A,
    pub enabled: bool,
}

impl<A> BarButtonViewModel<A> {
    pub fn new(style: BarButtonStyle, action: A) -> Self {
        Self {
            style,
            action,
            enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Rows under an optional header
#[derive(Debug, Clone, PartialEq)]
pub struct Section<H, R> {
    pub header: Option<H>,
    pub rows: Vec<R>,
}

impl<H, R> Section<H, R> {
    pub fn new(rows: Vec<R>) -> Self {
        Self { header: None, rows }
    }

    pub fn with_header(header: H, rows: Vec<R>) -> Self {
        Self {
            header: Some(header),
            rows,
        }
    }
}

impl<H, R> From<Vec<R>> for Section<H, R> {
    fn from(rows: Vec<R>) -> Self {
        Self::new(rows)
    }
}

impl<H, R> AsRef<[R]> for Section<H, R> {
    fn as_ref(&self) -> &[R] {
        &self.rows
    }
}

/// A screen rendered as a sectioned table
///
/// - `H`: header model
/// - `R`: row model
/// - `A`: action dispatched by bar buttons, the done key, and rows
#[derive(Debug, Clone, PartialEq)]
pub struct TableViewModel<H, R, A> {
    pub title: String,
    pub left_bar_button: Option<BarButtonViewModel<A>>,
    pub right_bar_button: Option<BarButtonViewModel<A>>,
    pub sections: Vec<Section<H, R>>,
    pub done_key_action: A,
    pub error_message: Option<String>,
}

impl<H, R, A> TableViewModel<H, R, A> {
    pub fn new(title: impl Into<String>, sections: Vec<Section<H, R>>, done_key_action: A) -> Self {
        Self {
            title: title.into(),
            left_bar_button: None,
            right_bar_button: None,
            sections,
            done_key_action,
            error_message: None,
        }
    }

    pub fn with_left_bar_button(mut self, button: BarButtonViewModel<A>) -> Self {
        self.left_bar_button = Some(button);
        self
    }

    pub fn with_right_bar_button(mut self, button: BarButtonViewModel<A>) -> Self {
        self.right_bar_button = Some(button);
        self
    }

    pub fn with_error_message(mut self, message: Option<String>) -> Self {
        self.error_message = message;
        self
    }

    pub fn number_of_sections(&self) -> usize {
        self.sections.len()
    }

    /// Row count of `section`, zero when it does not exist.
    pub fn number_of_rows_in_section(&self, section: usize) -> usize {
        self.sections.get(section).map_or(0, |s| s.rows.len())
    }

    pub fn model_for_row(&self, at: IndexPath) -> Option<&R> {
        self.sections.get(at.section)?.rows.get(at.row)
    }

    pub fn model_for_header(&self, section: usize) -> Option<&H> {
        self.sections.get(section)?.header.as_ref()
    }

    /// Row changes turning `previous` into `self`, sections matched by position.
    pub fn changes_since(&self, previous: &Self) -> Vec<Change<IndexPath>>
    where
        R: Identifiable + PartialEq,
    {
        changes_in_sections::<R, _, _>(&previous.sections, &self.sections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(u32, &'static str);

    impl Identifiable for Row {
        fn has_same_identity(&self, other: &Self) -> bool {
            self.0 == other.0
        }
    }

    type Model = TableViewModel<&'static str, Row, ()>;

    fn model(sections: Vec<Section<&'static str, Row>>) -> Model {
        TableViewModel::new("Test", sections, ())
    }

    #[test]
    fn test_lookups_out_of_range() {
        let vm = model(vec![Section::with_header("head", vec![Row(1, "a")])]);
        assert_eq!(vm.number_of_sections(), 1);
        assert_eq!(vm.number_of_rows_in_section(0), 1);
        assert_eq!(vm.number_of_rows_in_section(5), 0);
        assert_eq!(vm.model_for_row(IndexPath::new(0, 0)), Some(&Row(1, "a")));
        assert_eq!(vm.model_for_row(IndexPath::new(0, 1)), None);
        assert_eq!(vm.model_for_row(IndexPath::new(3, 0)), None);
        assert_eq!(vm.model_for_header(0), Some(&"head"));
        assert_eq!(vm.model_for_header(1), None);
    }

    #[test]
    fn test_changes_since() {
        let before = model(vec![vec![Row(1, "a"), Row(2, "b")].into()]);
        let after = model(vec![vec![Row(1, "A"), Row(3, "c")].into(), vec![Row(4, "d")].into()]);
        assert_eq!(
            after.changes_since(&before),
            vec![
                Change::Delete { old_idx: IndexPath::new(0, 1) },
                Change::Insert { new_idx: IndexPath::new(0, 1) },
                Change::Update { old_idx: IndexPath::new(0, 0), new_idx: IndexPath::new(0, 0) },
                Change::Insert { new_idx: IndexPath::new(1, 0) },
            ]
        );
    }

    #[test]
    fn test_bar_button_enabled() {
        let button = BarButtonViewModel::new(BarButtonStyle::Done, 1).enabled(false);
        assert!(!button.enabled);
        assert_eq!(button.action, 1);
    }
}
