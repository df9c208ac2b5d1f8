//! RDRAND on x86 and x86_64.

#[cfg(target_arch = "x86")]
use core::arch::x86::{__cpuid, __get_cpuid_max, _rdrand32_step};
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::{__cpuid, __get_cpuid_max, _rdrand32_step, _rdrand64_step};

/// CPUID.01H:ECX.RDRAND[bit 30]
const RDRAND_BIT: u32 = 1 << 30;

/// Executes CPUID on every call.
#[allow(unused_unsafe)]
pub(crate) fn is_supported() -> bool {
    // SAFETY: every Rust x86 and x86_64 target assumes CPUID. A CPU without
    // leaf 1 reports a max leaf of 0.
    let (max_leaf, _) = unsafe { __get_cpuid_max(0) };
    if max_leaf < 1 {
        return false;
    }
    let leaf1 = unsafe { __cpuid(1) };
    leaf1.ecx & RDRAND_BIT != 0
}

// std caches the detection result, so this guard is a single atomic load.
#[inline]
fn available() -> bool {
    std::arch::is_x86_feature_detected!("rdrand")
}

pub(crate) fn try_rand32() -> Option<u32> {
    if !available() {
        return None;
    }
    // SAFETY: RDRAND support was confirmed above.
    unsafe { rdrand32() }
}

pub(crate) fn try_rand64() -> Option<u64> {
    if !available() {
        return None;
    }
    // SAFETY: RDRAND support was confirmed above.
    unsafe { rdrand64() }
}

#[inline]
#[target_feature(enable = "rdrand")]
unsafe fn rdrand32() -> Option<u32> {
    let mut value = 0u32;
    if _rdrand32_step(&mut value) == 1 {
        Some(value)
    } else {
        None
    }
}

#[cfg(target_arch = "x86_64")]
#[inline]
#[target_feature(enable = "rdrand")]
unsafe fn rdrand64() -> Option<u64> {
    let mut value = 0u64;
    if _rdrand64_step(&mut value) == 1 {
        Some(value)
    } else {
        None
    }
}

#[cfg(target_arch = "x86")]
#[inline]
#[target_feature(enable = "rdrand")]
unsafe fn rdrand64() -> Option<u64> {
    super::compose64(|| rdrand32())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_detection_implies_probe() {
        if available() {
            assert!(is_supported());
        }
    }

    #[test]
    fn unsupported_cpu_never_yields() {
        if available() {
            return;
        }
        assert_eq!(try_rand32(), None);
        assert_eq!(try_rand64(), None);
    }

    #[test]
    fn single_attempts_mostly_succeed() {
        if !available() {
            return;
        }
        let hits = (0..64).filter(|_| try_rand64().is_some()).count();
        assert!(hits > 32, "only {hits}/64 single RDRAND attempts succeeded");
    }
}
