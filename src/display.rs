//! Display time and password formatting

use std::time::{SystemTime, UNIX_EPOCH};

/// Digit group sizes offered by the display options
pub const DIGIT_GROUP_SIZES: [usize; 2] = [2, 3];

/// Default digit group size
pub const DEFAULT_DIGIT_GROUP_SIZE: usize = 2;

/// The instant the token list is rendered for, in seconds since the epoch
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct DisplayTime {
    seconds: f64,
}

impl DisplayTime {
    pub const fn new(seconds_since_epoch: f64) -> Self {
        Self {
            seconds: seconds_since_epoch,
        }
    }

    pub fn now() -> Self {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0.0, |elapsed| elapsed.as_secs_f64());
        Self::new(seconds)
    }

    #[inline]
    pub const fn as_secs_f64(&self) -> f64 {
        self.seconds
    }
}

/// Split a password into space-separated groups of `group_size` digits.
///
/// A group size of zero leaves the password unchanged.
pub fn group_digits(password: &str, group_size: usize) -> String {
    if group_size == 0 {
        return password.to_owned();
    }
    let chars: Vec<char> = password.chars().collect();
    chars
        .chunks(group_size)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("123456", 2), "12 34 56");
        assert_eq!(group_digits("123456", 3), "123 456");
        assert_eq!(group_digits("1234567", 3), "123 456 7");
        assert_eq!(group_digits("123456", 0), "123456");
        assert_eq!(group_digits("", 2), "");
    }

    #[test]
    fn test_now_is_after_epoch() {
        assert!(DisplayTime::now().as_secs_f64() > 0.0);
    }
}
