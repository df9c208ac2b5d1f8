use thiserror::Error;
use truernd_types::{Arch, ErrorCode};

/// Errors produced by hardware random number generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HwRngError {
    #[error("hardware random instruction not available on {arch}")]
    Unsupported { arch: Arch },

    #[error("hardware RNG failed {attempts} consecutive attempts")]
    Exhausted { attempts: u32 },

    #[error("output buffer is empty")]
    EmptyBuffer,

    #[error("invalid retry policy: {0}")]
    InvalidPolicy(String),
}

impl HwRngError {
    /// Map to a platform error code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            HwRngError::Unsupported { .. } => ErrorCode::UnsupportedHardware,
            HwRngError::Exhausted { .. } => ErrorCode::TransientExhausted,
            HwRngError::EmptyBuffer => ErrorCode::InvalidArgument,
            HwRngError::InvalidPolicy(_) => ErrorCode::InvalidArgument,
        }
    }
}

impl From<HwRngError> for rand_core::Error {
    fn from(err: HwRngError) -> Self {
        rand_core::Error::new(err)
    }
}

pub type HwRngResult<T> = Result<T, HwRngError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes() {
        let unsupported = HwRngError::Unsupported { arch: Arch::Arm };
        assert_eq!(unsupported.error_code(), ErrorCode::UnsupportedHardware);
        assert_eq!(
            HwRngError::Exhausted { attempts: 10 }.error_code(),
            ErrorCode::TransientExhausted
        );
        assert_eq!(HwRngError::EmptyBuffer.error_code(), ErrorCode::InvalidArgument);
    }

    #[test]
    fn messages() {
        assert_eq!(
            HwRngError::Unsupported { arch: Arch::Arm }.to_string(),
            "hardware random instruction not available on arm"
        );
        assert_eq!(
            HwRngError::Exhausted { attempts: 3 }.to_string(),
            "hardware RNG failed 3 consecutive attempts"
        );
    }
}
