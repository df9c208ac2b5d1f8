//! Per-architecture instruction bindings.
//!
//! Exactly one backend is compiled in. Each exposes the same three functions:
//! `is_supported`, `try_rand32` and `try_rand64`. Every `try_*` call issues a
//! single hardware request and never retries, except that 32-bit x86 has no
//! 64-bit RDRAND and issues two 32-bit requests through [`compose64`].

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod x86;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) use x86::{is_supported, try_rand32, try_rand64};

#[cfg(target_arch = "aarch64")]
mod aarch64;
#[cfg(target_arch = "aarch64")]
pub(crate) use aarch64::{is_supported, try_rand32, try_rand64};

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
mod unsupported;
#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
pub(crate) use unsupported::{is_supported, try_rand32, try_rand64};

/// Builds a 64-bit value from two 32-bit draws, low word first. A failed
/// half fails the whole value and nothing is retried.
#[cfg_attr(not(target_arch = "x86"), allow(dead_code))]
#[inline]
pub(crate) fn compose64(mut half: impl FnMut() -> Option<u32>) -> Option<u64> {
    let low = half()?;
    let high = half()?;
    Some((u64::from(high) << 32) | u64::from(low))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scripted(halves: &[Option<u32>]) -> (Option<u64>, usize) {
        let mut calls = 0;
        let value = compose64(|| {
            let half = halves.get(calls).copied().flatten();
            calls += 1;
            half
        });
        (value, calls)
    }

    #[test]
    fn first_draw_is_low_word() {
        let (value, calls) = scripted(&[Some(0x1111_2222), Some(0xAAAA_BBBB)]);
        assert_eq!(value, Some(0xAAAA_BBBB_1111_2222));
        assert_eq!(calls, 2);
    }

    #[test]
    fn failed_low_half_skips_high_draw() {
        let (value, calls) = scripted(&[None, Some(7)]);
        assert_eq!(value, None);
        assert_eq!(calls, 1);
    }

    #[test]
    fn failed_high_half_does_not_retry_low() {
        let (value, calls) = scripted(&[Some(7), None, Some(9)]);
        assert_eq!(value, None);
        assert_eq!(calls, 2);
    }
}
