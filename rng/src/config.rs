//! Retry configuration.
//!
//! The ceiling used by the global accessors is fixed when the crate is
//! compiled: set `TRUERND_MAX_RETRIES` in the build environment to override
//! the default of 10. A value that is empty, non-numeric, zero or larger than
//! `u32::MAX` fails the build.

use serde::{Deserialize, Serialize};

use crate::error::{HwRngError, HwRngResult};

pub const DEFAULT_MAX_RETRIES: u32 = 10;

/// Maximum consecutive attempts per fetch for this build.
pub const MAX_RETRIES: u32 = match option_env!("TRUERND_MAX_RETRIES") {
    Some(value) => parse_retries(value),
    None => DEFAULT_MAX_RETRIES,
};

const fn parse_retries(value: &str) -> u32 {
    let bytes = value.as_bytes();
    assert!(!bytes.is_empty(), "TRUERND_MAX_RETRIES must not be empty");

    let mut parsed: u32 = 0;
    let mut i = 0;
    while i < bytes.len() {
        let digit = bytes[i];
        assert!(
            digit.is_ascii_digit(),
            "TRUERND_MAX_RETRIES must be a decimal integer"
        );
        parsed = match parsed.checked_mul(10) {
            Some(v) => v,
            None => panic!("TRUERND_MAX_RETRIES does not fit in u32"),
        };
        parsed = match parsed.checked_add((digit - b'0') as u32) {
            Some(v) => v,
            None => panic!("TRUERND_MAX_RETRIES does not fit in u32"),
        };
        i += 1;
    }

    assert!(parsed > 0, "TRUERND_MAX_RETRIES must be at least 1");
    parsed
}

/// How persistently a single fetch retries the hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts before a fetch reports exhaustion, including the first.
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_RETRIES,
        }
    }
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// Validate that the policy can make progress.
    pub fn validate(&self) -> HwRngResult<()> {
        if self.max_attempts == 0 {
            return Err(HwRngError::InvalidPolicy(
                "max_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_build_constant() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, MAX_RETRIES);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn zero_attempts_is_invalid() {
        let err = RetryPolicy::new(0).validate().unwrap_err();
        assert!(matches!(err, HwRngError::InvalidPolicy(_)));
    }

    #[test]
    fn parses_decimal() {
        assert_eq!(parse_retries("10"), 10);
        assert_eq!(parse_retries("1"), 1);
        assert_eq!(parse_retries("4294967295"), u32::MAX);
    }

    #[test]
    #[should_panic(expected = "decimal integer")]
    fn rejects_non_digits() {
        parse_retries("1O");
    }

    #[test]
    #[should_panic(expected = "at least 1")]
    fn rejects_zero() {
        parse_retries("0");
    }

    #[test]
    #[should_panic(expected = "does not fit")]
    fn rejects_overflow() {
        parse_retries("4294967296");
    }
}
