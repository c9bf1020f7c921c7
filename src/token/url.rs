//! `otpauth://` URLs and base32 secrets
//!
//! ```text
//! otpauth://totp/Issuer:name?secret=BASE32&algorithm=SHA1&digits=6&period=30&issuer=Issuer
//! otpauth://hotp/name?secret=BASE32&counter=0
//! ```

use std::sync::LazyLock;

use data_encoding::{Encoding, Specification, SpecificationError, BASE32_NOPAD};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::{Algorithm, Factor, Generator, Token};
use crate::error::{AuthResult, AuthenticatorError};

const SCHEME: &str = "otpauth";
const DEFAULT_DIGITS: u8 = 6;
const DEFAULT_PERIOD: u64 = 30;

/// Characters escaped in labels and query values
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'@');

/// Base32 accepting lowercase letters and unclean trailing bits
static LENIENT_BASE32: LazyLock<Result<Encoding, SpecificationError>> = LazyLock::new(|| {
    let mut spec = Specification::new();
    spec.symbols.push_str("ABCDEFGHIJKLMNOPQRSTUVWXYZ234567");
    spec.translate.from.push_str("abcdefghijklmnopqrstuvwxyz");
    spec.translate.to.push_str("ABCDEFGHIJKLMNOPQRSTUVWXYZ");
    spec.check_trailing_bits = false;
    spec.encoding()
});

/// Decode a user-entered base32 secret.
///
/// Case-insensitive; spaces, dashes, and `=` padding are ignored.
pub fn decode_secret(text: &str) -> AuthResult<Vec<u8>> {
    let encoding = LENIENT_BASE32
        .as_ref()
        .map_err(|e| AuthenticatorError::InvalidSecret(e.to_string()))?;
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '='))
        .collect();
    Ok(encoding.decode(cleaned.as_bytes())?)
}

// =============================================================================
// Parsing
// =============================================================================

pub(super) fn parse(text: &str) -> AuthResult<Token> {
    let (scheme, rest) = text
        .split_once("://")
        .ok_or_else(|| AuthenticatorError::invalid_url("missing scheme"))?;
    if !scheme.eq_ignore_ascii_case(SCHEME) {
        return Err(AuthenticatorError::invalid_url(format!("unsupported scheme `{scheme}`")));
    }

    let (location, query) = rest.split_once('?').unwrap_or((rest, ""));
    let (kind, label) = location.split_once('/').unwrap_or((location, ""));

    let mut params = QueryParams::default();
    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params.set(key, decode_component(value)?);
    }

    let secret_text = params
        .secret
        .ok_or_else(|| AuthenticatorError::invalid_url("missing secret"))?;
    let secret = decode_secret(&secret_text)
        .map_err(|e| AuthenticatorError::invalid_url(e.to_string()))?;

    let algorithm = match params.algorithm.as_deref() {
        None => Algorithm::default(),
        Some(name) => Algorithm::from_url_name(name)
            .ok_or_else(|| AuthenticatorError::invalid_url(format!("unknown algorithm `{name}`")))?,
    };
    let digits = parse_number(params.digits.as_deref(), "digits", DEFAULT_DIGITS)?;

    let factor = if kind.eq_ignore_ascii_case("totp") {
        Factor::Timer {
            period: parse_number(params.period.as_deref(), "period", DEFAULT_PERIOD)?,
        }
    } else if kind.eq_ignore_ascii_case("hotp") {
        Factor::Counter(parse_number(params.counter.as_deref(), "counter", 0)?)
    } else {
        return Err(AuthenticatorError::invalid_url(format!("unknown token type `{kind}`")));
    };

    let generator = Generator::new(factor, secret, algorithm, digits)
        .map_err(|e| AuthenticatorError::invalid_url(e.to_string()))?;

    // "Issuer:name" label, split on the literal separator before decoding so an
    // escaped `%3A` stays inside its half. An explicit issuer parameter wins.
    let (label_issuer, name) = match label.split_once(':') {
        Some((issuer, name)) => (Some(decode_component(issuer)?), decode_component(name)?),
        None => (None, decode_component(label)?),
    };
    let issuer = params
        .issuer
        .as_deref()
        .or(label_issuer.as_deref().map(str::trim))
        .unwrap_or_default();

    Ok(Token::new(name.trim_start(), issuer, generator))
}

#[derive(Default)]
struct QueryParams {
    secret: Option<String>,
    algorithm: Option<String>,
    digits: Option<String>,
    period: Option<String>,
    counter: Option<String>,
    issuer: Option<String>,
}

impl QueryParams {
    /// Record a parameter; unknown keys are ignored.
    fn set(&mut self, key: &str, value: String) {
        let slot = match key.to_ascii_lowercase().as_str() {
            "secret" => &mut self.secret,
            "algorithm" => &mut self.algorithm,
            "digits" => &mut self.digits,
            "period" => &mut self.period,
            "counter" => &mut self.counter,
            "issuer" => &mut self.issuer,
            _ => return,
        };
        *slot = Some(value);
    }
}

fn decode_component(text: &str) -> AuthResult<String> {
    percent_decode_str(text)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| AuthenticatorError::invalid_url(e.to_string()))
}

fn parse_number<N: std::str::FromStr>(value: Option<&str>, key: &str, default: N) -> AuthResult<N> {
    match value {
        None => Ok(default),
        Some(text) => text
            .trim()
            .parse()
            .map_err(|_| AuthenticatorError::invalid_url(format!("bad {key} `{text}`"))),
    }
}

// =============================================================================
// Serialization
// =============================================================================

pub(super) fn serialize(token: &Token) -> String {
    let generator = &token.generator;
    let (kind, factor_param) = match generator.factor() {
        Factor::Timer { period } => ("totp", format!("period={period}")),
        Factor::Counter(counter) => ("hotp", format!("counter={counter}")),
    };

    let name = utf8_percent_encode(&token.name, COMPONENT);
    let mut url = if token.issuer.is_empty() {
        format!("{SCHEME}://{kind}/{name}")
    } else {
        let issuer = utf8_percent_encode(&token.issuer, COMPONENT);
        format!("{SCHEME}://{kind}/{issuer}:{name}")
    };

    url.push_str(&format!(
        "?secret={}&algorithm={}&digits={}&{factor_param}",
        BASE32_NOPAD.encode(generator.secret()),
        generator.algorithm().url_name(),
        generator.digits(),
    ));
    if !token.issuer.is_empty() {
        url.push_str(&format!("&issuer={}", utf8_percent_encode(&token.issuer, COMPONENT)));
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_totp() {
        let token = Token::from_url("otpauth://totp/Authenticator?secret=ABCDEFGHIJKLMNOP").unwrap();
        assert_eq!(token.name, "Authenticator");
        assert_eq!(token.issuer, "");
        assert_eq!(token.generator.factor(), Factor::Timer { period: 30 });
        assert_eq!(token.generator.algorithm(), Algorithm::Sha1);
        assert_eq!(token.generator.digits(), 6);
        assert_eq!(token.generator.secret().len(), 10);
    }

    #[test]
    fn test_parse_label_issuer_and_parameters() {
        let token = Token::from_url(
            "otpauth://hotp/ACME%20Co:john%40example.com?secret=JBSWY3DPEHPK3PXP&algorithm=sha256&digits=8&counter=7",
        )
        .unwrap();
        assert_eq!(token.issuer, "ACME Co");
        assert_eq!(token.name, "john@example.com");
        assert_eq!(token.generator.factor(), Factor::Counter(7));
        assert_eq!(token.generator.algorithm(), Algorithm::Sha256);
        assert_eq!(token.generator.digits(), 8);
        assert_eq!(token.generator.secret(), b"Hello!\xde\xad\xbe\xef");
    }

    #[test]
    fn test_issuer_parameter_overrides_label() {
        let token =
            Token::from_url("otpauth://totp/Old:alice?secret=JBSWY3DPEHPK3PXP&issuer=New").unwrap();
        assert_eq!(token.issuer, "New");
        assert_eq!(token.name, "alice");
    }

    #[test]
    fn test_parse_rejects_bad_urls() {
        for text in [
            "Invalid Token",
            "http://totp/a?secret=JBSWY3DPEHPK3PXP",
            "otpauth://xotp/a?secret=JBSWY3DPEHPK3PXP",
            "otpauth://totp/a",
            "otpauth://totp/a?secret=1",
            "otpauth://totp/a?secret=JBSWY3DPEHPK3PXP&digits=12",
            "otpauth://totp/a?secret=JBSWY3DPEHPK3PXP&period=0",
            "otpauth://totp/a?secret=JBSWY3DPEHPK3PXP&algorithm=MD5",
        ] {
            let err = Token::from_url(text).unwrap_err();
            assert!(matches!(err, AuthenticatorError::InvalidUrl(_)), "{text}: {err}");
        }
    }

    #[test]
    fn test_url_survives_serialization() {
        let generator = Generator::new(
            Factor::Timer { period: 60 },
            b"secret bytes".to_vec(),
            Algorithm::Sha512,
            7,
        )
        .unwrap();
        let token = Token::new("bob smith", "Big & Co", generator);
        let url = token.to_url();
        assert!(url.starts_with("otpauth://totp/Big%20%26%20Co:bob%20smith?"));
        assert_eq!(Token::from_url(&url).unwrap(), token);
    }

    #[test]
    fn test_colons_inside_name_and_issuer_survive_serialization() {
        let generator = Generator::new(Factor::Counter(3), b"key".to_vec(), Algorithm::Sha1, 6).unwrap();
        for token in [
            Token::new("x:y", "", generator.clone()),
            Token::new("c", "a:b", generator.clone()),
            Token::new("d:e", "f:g", generator),
        ] {
            let url = token.to_url();
            assert_eq!(Token::from_url(&url).unwrap(), token, "{url}");
        }
    }

    #[test]
    fn test_escaped_colon_is_not_a_separator() {
        let token = Token::from_url("otpauth://totp/x%3Ay?secret=JBSWY3DPEHPK3PXP").unwrap();
        assert_eq!(token.name, "x:y");
        assert_eq!(token.issuer, "");
    }

    #[test]
    fn test_decode_secret_is_lenient() {
        let strict = decode_secret("JBSWY3DPEHPK3PXP").unwrap();
        assert_eq!(decode_secret("jbsw y3dp-ehpk 3pxp").unwrap(), strict);
        assert_eq!(decode_secret("JBSWY3DPEHPK3PXP====").unwrap(), strict);
        assert!(decode_secret("").unwrap().is_empty());
        assert!(matches!(decode_secret("ABC!"), Err(AuthenticatorError::InvalidSecret(_))));
    }
}
