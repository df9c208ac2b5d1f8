//! Capability probe and single-attempt generators.
//!
//! Nothing here retries. Each `try_*` call is one hardware request; callers
//! that want persistence go through [`crate::retry`] or [`crate::fill`].

use crate::arch;

/// Whether the executing CPU implements the hardware random instruction.
///
/// Reads the processor's feature register on every call; the answer is not
/// cached. Always `false` on 32-bit ARM and unrecognised architectures.
pub fn is_supported() -> bool {
    arch::is_supported()
}

/// One 32-bit hardware draw, or `None` if the CPU reported failure.
///
/// On AArch64 this is the low half of a 64-bit RNDR read.
#[inline]
pub fn try_generate32() -> Option<u32> {
    arch::try_rand32()
}

/// One 64-bit hardware draw, or `None` if the CPU reported failure.
///
/// On 32-bit x86 the value is assembled from two 32-bit draws, low word first.
#[inline]
pub fn try_generate64() -> Option<u64> {
    arch::try_rand64()
}

/// Register-return style: the drawn value, or 0 on failure.
///
/// A genuine 0 and a failure are indistinguishable; use [`try_generate32`]
/// when that matters.
#[inline]
pub fn generate32() -> u32 {
    try_generate32().unwrap_or(0)
}

/// Register-return style: the drawn value, or 0 on failure.
#[inline]
pub fn generate64() -> u64 {
    try_generate64().unwrap_or(0)
}
