//! HOTP (RFC 4226) and TOTP (RFC 6238) password generation

use std::fmt;

use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use crate::error::{AuthResult, AuthenticatorError};

/// Accepted password lengths
const DIGIT_RANGE: std::ops::RangeInclusive<u8> = 6..=8;

/// HMAC hash function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    #[default]
    Sha1,
    Sha256,
    Sha512,
}

impl Algorithm {
    /// Name as written in `otpauth://` URLs
    pub const fn url_name(self) -> &'static str {
        match self {
            Algorithm::Sha1 => "SHA1",
            Algorithm::Sha256 => "SHA256",
            Algorithm::Sha512 => "SHA512",
        }
    }

    pub fn from_url_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "SHA1" => Some(Algorithm::Sha1),
            "SHA256" => Some(Algorithm::Sha256),
            "SHA512" => Some(Algorithm::Sha512),
            _ => None,
        }
    }
}

/// Moving factor of a generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Factor {
    /// HOTP: explicit counter, advanced on each use
    Counter(u64),
    /// TOTP: counter derived from the time, `period` seconds per password
    Timer { period: u64 },
}

impl Factor {
    pub fn is_counter(&self) -> bool {
        matches!(self, Factor::Counter(_))
    }

    /// HOTP counter value at `time` (seconds since the epoch)
    pub fn counter_at(&self, time: f64) -> AuthResult<u64> {
        match *self {
            Factor::Counter(counter) => Ok(counter),
            Factor::Timer { period } => {
                if !time.is_finite() || time < 0.0 {
                    return Err(AuthenticatorError::invalid_generator(format!(
                        "time {time} is before the epoch"
                    )));
                }
                Ok((time / period as f64).floor() as u64)
            }
        }
    }
}

/// Password generator: factor, shared secret, hash, and length
#[derive(Clone, PartialEq, Eq)]
pub struct Generator {
    factor: Factor,
    secret: Vec<u8>,
    algorithm: Algorithm,
    digits: u8,
}

impl Generator {
    /// Create a generator. `digits` must be 6, 7, or 8 and a timer period non-zero.
    pub fn new(
        factor: Factor,
        secret: impl Into<Vec<u8>>,
        algorithm: Algorithm,
        digits: u8,
    ) -> AuthResult<Self> {
        if !DIGIT_RANGE.contains(&digits) {
            return Err(AuthenticatorError::invalid_generator(format!(
                "{digits} digits (expected 6 to 8)"
            )));
        }
        if let Factor::Timer { period: 0 } = factor {
            return Err(AuthenticatorError::invalid_generator("zero period"));
        }
        Ok(Self {
            factor,
            secret: secret.into(),
            algorithm,
            digits,
        })
    }

    pub fn factor(&self) -> Factor {
        self.factor
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn digits(&self) -> u8 {
        self.digits
    }

    /// The generator after one use: counter + 1 for HOTP, unchanged for TOTP.
    #[must_use]
    pub fn successor(&self) -> Self {
        let factor = match self.factor {
            Factor::Counter(counter) => Factor::Counter(counter.wrapping_add(1)),
            timer @ Factor::Timer { .. } => timer,
        };
        Self { factor, ..self.clone() }
    }

    /// Zero-padded password at `time` (seconds since the epoch; ignored for counters).
    pub fn password_at(&self, time: f64) -> AuthResult<String> {
        let counter = self.factor.counter_at(time)?;
        let code = self.hotp(counter)?;
        Ok(format!("{:0width$}", code, width = self.digits as usize))
    }

    fn hotp(&self, counter: u64) -> AuthResult<u32> {
        let message = counter.to_be_bytes();
        let digest = match self.algorithm {
            Algorithm::Sha1 => Hmac::<Sha1>::new_from_slice(&self.secret)
                .map(|mac| mac.chain_update(message).finalize().into_bytes().to_vec()),
            Algorithm::Sha256 => Hmac::<Sha256>::new_from_slice(&self.secret)
                .map(|mac| mac.chain_update(message).finalize().into_bytes().to_vec()),
            Algorithm::Sha512 => Hmac::<Sha512>::new_from_slice(&self.secret)
                .map(|mac| mac.chain_update(message).finalize().into_bytes().to_vec()),
        }
        .map_err(|e| AuthenticatorError::invalid_generator(e.to_string()))?;

        // Dynamic truncation
        let offset = (digest[digest.len() - 1] & 0x0f) as usize;
        let binary = u32::from_be_bytes([
            digest[offset] & 0x7f,
            digest[offset + 1],
            digest[offset + 2],
            digest[offset + 3],
        ]);
        Ok(binary % 10u32.pow(self.digits as u32))
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("factor", &self.factor)
            .field("secret", &format_args!("<{} bytes>", self.secret.len()))
            .field("algorithm", &self.algorithm)
            .field("digits", &self.digits)
            .finish()
    }
}
