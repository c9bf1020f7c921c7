//! Token list rows

use compact_str::CompactString;

use crate::algo::Identifiable;
use crate::component::token_list::Action;
use crate::display::{group_digits, DisplayTime};
use crate::id::PersistentId;
use crate::token::{Factor, PersistentToken};

/// One row of the token list
///
/// Identity is the token's [`PersistentId`]; equality compares every
/// displayed field, so a new password or a renamed token reloads the row.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenRowModel {
    pub name: CompactString,
    pub issuer: CompactString,
    /// Password as displayed, split into digit groups
    pub password: String,
    /// Counter tokens show a button that advances the counter
    pub shows_button: bool,
    pub can_reorder: bool,
    pub button_action: Action,
    pub select_action: Action,
    pub edit_action: Action,
    pub delete_action: Action,
    identifier: PersistentId,
}

impl TokenRowModel {
    pub fn new(
        persistent: &PersistentToken,
        time: DisplayTime,
        digit_group_size: usize,
        can_reorder: bool,
    ) -> Self {
        let token = &persistent.token;
        let password = token.current_password(time).unwrap_or_default();
        Self {
            name: token.name.clone(),
            issuer: token.issuer.clone(),
            password: group_digits(&password, digit_group_size),
            shows_button: matches!(token.generator.factor(), Factor::Counter(_)),
            can_reorder,
            button_action: Action::UpdatePersistentToken(persistent.clone()),
            select_action: Action::CopyPassword(password),
            edit_action: Action::EditPersistentToken(persistent.clone()),
            delete_action: Action::DeletePersistentToken(persistent.clone()),
            identifier: persistent.identifier,
        }
    }

    pub fn identifier(&self) -> PersistentId {
        self.identifier
    }
}

impl Identifiable for TokenRowModel {
    fn has_same_identity(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Algorithm, Generator, Token};

    fn persistent(factor: Factor, raw_id: u64) -> PersistentToken {
        let generator = Generator::new(factor, b"12345678901234567890".to_vec(), Algorithm::Sha1, 6).unwrap();
        PersistentToken::new(Token::new("name", "issuer", generator), PersistentId::from_raw(raw_id))
    }

    #[test]
    fn test_counter_row() {
        let token = persistent(Factor::Counter(0), 1);
        let row = TokenRowModel::new(&token, DisplayTime::new(0.0), 3, true);
        assert_eq!(row.password, "755 224");
        assert!(row.shows_button);
        assert_eq!(row.select_action, Action::CopyPassword("755224".into()));
        assert_eq!(row.button_action, Action::UpdatePersistentToken(token.clone()));
        assert_eq!(row.identifier(), PersistentId::from_raw(1));
    }

    #[test]
    fn test_timer_row_has_no_button() {
        let row = TokenRowModel::new(&persistent(Factor::Timer { period: 30 }, 1), DisplayTime::new(59.0), 2, true);
        assert!(!row.shows_button);
        assert_eq!(row.password.len(), 8);
    }

    #[test]
    fn test_identity_and_equality() {
        let time = DisplayTime::new(0.0);
        let a = TokenRowModel::new(&persistent(Factor::Counter(0), 1), time, 2, true);
        let b = TokenRowModel::new(&persistent(Factor::Counter(1), 1), time, 2, true);
        let c = TokenRowModel::new(&persistent(Factor::Counter(0), 2), time, 2, true);
        assert!(a.has_same_identity(&b));
        assert_ne!(a, b);
        assert!(!a.has_same_identity(&c));
    }
}
