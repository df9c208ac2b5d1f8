//! Bounded-retry scalar accessors.
//!
//! The hardware instructions are documented to fail only transiently, so a
//! short fixed retry loop turns them into an effectively reliable source while
//! still guaranteeing termination. Retrying happens here and nowhere else.

use tracing::{trace, warn};
use truernd_types::Arch;

use crate::config::RetryPolicy;
use crate::error::{HwRngError, HwRngResult};
use crate::source::{Hardware, Source};

/// One 32-bit value from the hardware, retried up to [`crate::MAX_RETRIES`]
/// times.
pub fn get32() -> HwRngResult<u32> {
    get32_with(&mut Hardware, RetryPolicy::default())
}

/// One 64-bit value from the hardware, retried up to [`crate::MAX_RETRIES`]
/// times.
pub fn get64() -> HwRngResult<u64> {
    get64_with(&mut Hardware, RetryPolicy::default())
}

pub fn get32_with<S: Source + ?Sized>(source: &mut S, policy: RetryPolicy) -> HwRngResult<u32> {
    let value = retry(policy, || source.try_u32());
    value.map_err(|attempts| exhausted(source, attempts))
}

/// Calls `source` until it yields or `policy.max_attempts` calls have failed.
/// A policy of zero attempts behaves as one.
pub fn get64_with<S: Source + ?Sized>(source: &mut S, policy: RetryPolicy) -> HwRngResult<u64> {
    let value = retry(policy, || source.try_u64());
    value.map_err(|attempts| exhausted(source, attempts))
}

fn retry<T>(policy: RetryPolicy, mut attempt: impl FnMut() -> Option<T>) -> Result<T, u32> {
    let mut failures: u32 = 0;
    loop {
        if let Some(value) = attempt() {
            return Ok(value);
        }
        failures += 1;
        trace!(
            attempt = failures,
            max_attempts = policy.max_attempts,
            "hardware RNG attempt failed"
        );
        if failures >= policy.max_attempts {
            return Err(failures);
        }
    }
}

fn exhausted<S: Source + ?Sized>(source: &S, attempts: u32) -> HwRngError {
    if !source.is_available() {
        return HwRngError::Unsupported {
            arch: Arch::current(),
        };
    }
    warn!(attempts, "hardware RNG retry budget exhausted");
    HwRngError::Exhausted { attempts }
}
