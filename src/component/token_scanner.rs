//! QR code scanning

use crate::token::Token;

/// Scanner state: scanning until the first token is captured
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenScanner {
    token_found: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewModel {
    pub is_scanning: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Cancel,
    BeginManualTokenEntry,
    ScannerDecodedText(String),
    ScannerError(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Cancel,
    BeginManualTokenEntry,
    SaveNewToken(Token),
    ShowErrorMessage(String),
}

impl TokenScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view_model(&self) -> ViewModel {
        ViewModel {
            is_scanning: !self.token_found,
        }
    }

    pub fn update(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::Cancel => Some(Effect::Cancel),
            Action::BeginManualTokenEntry => Some(Effect::BeginManualTokenEntry),
            Action::ScannerDecodedText(text) => match Token::from_url(&text) {
                Ok(token) => {
                    self.token_found = true;
                    Some(Effect::SaveNewToken(token))
                }
                Err(e) => {
                    log::debug!("scanned text is not a token: {e}");
                    Some(Effect::ShowErrorMessage("Invalid Token".into()))
                }
            },
            Action::ScannerError(message) => {
                log::warn!("capture failed: {message}");
                Some(Effect::ShowErrorMessage("Capture Failed".into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel() {
        let mut scanner = TokenScanner::new();
        assert!(scanner.view_model().is_scanning);
        assert_eq!(scanner.update(Action::Cancel), Some(Effect::Cancel));
        assert!(scanner.view_model().is_scanning);
    }

    #[test]
    fn test_begin_manual_entry() {
        let mut scanner = TokenScanner::new();
        assert_eq!(
            scanner.update(Action::BeginManualTokenEntry),
            Some(Effect::BeginManualTokenEntry)
        );
        assert!(scanner.view_model().is_scanning);
    }

    #[test]
    fn test_decoded_bad_text() {
        let mut scanner = TokenScanner::new();
        for text in ["something...", "http://example.com"] {
            assert_eq!(
                scanner.update(Action::ScannerDecodedText(text.into())),
                Some(Effect::ShowErrorMessage("Invalid Token".into()))
            );
        }
        assert!(scanner.view_model().is_scanning);
    }

    #[test]
    fn test_decoded_good_url_stops_scanning() {
        let mut scanner = TokenScanner::new();
        let url = "otpauth://totp/Authenticator?secret=ABCDEFGHIJKLMNOP";
        let expected = Token::from_url(url).unwrap();
        assert_eq!(
            scanner.update(Action::ScannerDecodedText(url.into())),
            Some(Effect::SaveNewToken(expected))
        );
        assert!(!scanner.view_model().is_scanning);
    }

    #[test]
    fn test_scanner_error() {
        let mut scanner = TokenScanner::new();
        assert_eq!(
            scanner.update(Action::ScannerError("camera unavailable".into())),
            Some(Effect::ShowErrorMessage("Capture Failed".into()))
        );
        assert!(scanner.view_model().is_scanning);
    }
}
