use thiserror::Error;
use truernd::HwRngError;

/// Errors surfaced by the `truernd` binary.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Rng(#[from] HwRngError),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("config parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Process exit status for this error. Transient hardware exhaustion
    /// maps to `EX_TEMPFAIL` (75).
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 2,
            CliError::Rng(err) if err.error_code().is_retryable() => 75,
            _ => 1,
        }
    }
}
