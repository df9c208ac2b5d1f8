use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform-wide error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Generic
    InvalidArgument,

    // Hardware
    UnsupportedHardware,
    TransientExhausted,
}

impl ErrorCode {
    /// Returns a short string code suitable for reports and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::UnsupportedHardware => "UNSUPPORTED_HARDWARE",
            ErrorCode::TransientExhausted => "TRANSIENT_EXHAUSTED",
        }
    }

    /// Whether a caller could reasonably try the same operation again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCode::TransientExhausted)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_display() {
        assert_eq!(ErrorCode::InvalidArgument.to_string(), "INVALID_ARGUMENT");
        assert_eq!(
            ErrorCode::UnsupportedHardware.to_string(),
            "UNSUPPORTED_HARDWARE"
        );
    }

    #[test]
    fn error_code_as_str() {
        assert_eq!(ErrorCode::TransientExhausted.as_str(), "TRANSIENT_EXHAUSTED");
    }

    #[test]
    fn only_exhaustion_is_retryable() {
        assert!(ErrorCode::TransientExhausted.is_retryable());
        assert!(!ErrorCode::UnsupportedHardware.is_retryable());
        assert!(!ErrorCode::InvalidArgument.is_retryable());
    }
}
