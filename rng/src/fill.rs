//! Buffer filling from successive 64-bit hardware words.

use tracing::debug;

use crate::config::RetryPolicy;
use crate::error::{HwRngError, HwRngResult};
use crate::retry::get64_with;
use crate::source::{Hardware, Source};

const WORD: usize = core::mem::size_of::<u64>();

/// Fill `buf` with hardware random bytes using the build's retry ceiling.
///
/// See [`fill_with`] for the partial-failure contract.
pub fn fill(buf: &mut [u8]) -> HwRngResult<()> {
    fill_with(&mut Hardware, RetryPolicy::default(), buf)
}

/// Fill `buf` from `source`, one 64-bit word per 8 bytes.
///
/// Byte `i` of each word is `(word >> (8 * i)) as u8`. A trailing run of 1 to
/// 7 bytes consumes one more word and takes only its low bytes; the rest of
/// that word is discarded, never kept for a later call.
///
/// # Errors
///
/// An empty `buf` fails before anything is fetched. If a word cannot be
/// fetched within `policy`, filling stops at once: chunks already written
/// keep their new bytes and everything after keeps whatever it held before.
/// Callers must treat the whole buffer as unusable on error.
pub fn fill_with<S: Source + ?Sized>(
    source: &mut S,
    policy: RetryPolicy,
    buf: &mut [u8],
) -> HwRngResult<()> {
    if buf.is_empty() {
        return Err(HwRngError::EmptyBuffer);
    }

    let total = buf.len();
    let mut chunks = buf.chunks_exact_mut(WORD);
    for (index, chunk) in chunks.by_ref().enumerate() {
        let word = get64_with(source, policy).map_err(|err| aborted(err, index * WORD, total))?;
        chunk.copy_from_slice(&word.to_le_bytes());
    }

    let tail = chunks.into_remainder();
    if !tail.is_empty() {
        let written = total - tail.len();
        let word = get64_with(source, policy).map_err(|err| aborted(err, written, total))?;
        let len = tail.len();
        tail.copy_from_slice(&word.to_le_bytes()[..len]);
    }

    Ok(())
}

fn aborted(err: HwRngError, written: usize, total: usize) -> HwRngError {
    debug!(written, total, error = %err, "buffer fill aborted");
    err
}
