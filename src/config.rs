//! Application configuration

use crate::algo::DiffConfig;
use crate::display::{DEFAULT_DIGIT_GROUP_SIZE, DIGIT_GROUP_SIZES};

/// Device capabilities and stored preferences the app starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppConfig {
    /// A camera is available for scanning QR codes.
    /// Default: false, so adding a token opens the manual entry form.
    pub device_can_scan: bool,
    /// Lock the token list until the user authenticates.
    /// Default: false
    pub screen_lock_enabled: bool,
    digit_group_size: usize,
    /// How token list changes are reported to the platform
    pub diff: DiffConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            device_can_scan: false,
            screen_lock_enabled: false,
            digit_group_size: DEFAULT_DIGIT_GROUP_SIZE,
            diff: DiffConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device_can_scan(mut self, device_can_scan: bool) -> Self {
        self.device_can_scan = device_can_scan;
        self
    }

    pub fn with_screen_lock_enabled(mut self, screen_lock_enabled: bool) -> Self {
        self.screen_lock_enabled = screen_lock_enabled;
        self
    }

    /// Sizes other than those in [`DIGIT_GROUP_SIZES`] fall back to the default.
    pub fn with_digit_group_size(mut self, digit_group_size: usize) -> Self {
        self.digit_group_size = if DIGIT_GROUP_SIZES.contains(&digit_group_size) {
            digit_group_size
        } else {
            log::warn!("unsupported digit group size {digit_group_size}, using {DEFAULT_DIGIT_GROUP_SIZE}");
            DEFAULT_DIGIT_GROUP_SIZE
        };
        self
    }

    pub fn with_diff(mut self, diff: DiffConfig) -> Self {
        self.diff = diff;
        self
    }

    #[inline]
    pub fn digit_group_size(&self) -> usize {
        self.digit_group_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(!config.device_can_scan);
        assert!(!config.screen_lock_enabled);
        assert_eq!(config.digit_group_size(), 2);
        assert!(config.diff.detect_moves);
    }

    #[test]
    fn test_builder() {
        let config = AppConfig::new()
            .with_device_can_scan(true)
            .with_screen_lock_enabled(true)
            .with_digit_group_size(3)
            .with_diff(DiffConfig::without_moves());
        assert!(config.device_can_scan);
        assert!(config.screen_lock_enabled);
        assert_eq!(config.digit_group_size(), 3);
        assert!(!config.diff.detect_moves);
    }

    #[test]
    fn test_unsupported_group_size_falls_back() {
        assert_eq!(AppConfig::new().with_digit_group_size(7).digit_group_size(), 2);
        assert_eq!(AppConfig::new().with_digit_group_size(0).digit_group_size(), 2);
    }
}
