//! RNDR on AArch64 (FEAT_RNG, Armv8.5-A).

use core::arch::asm;

/// ID_AA64ISAR0_EL1.RNDR, bits [63:60].
const RNDR_SHIFT: u32 = 60;
const RNDR_MASK: u64 = 0xF;

/// Reads ID_AA64ISAR0_EL1 on every call.
///
/// EL0 reads of the ID registers trap to the kernel, which Linux and Android
/// emulate. Other systems go through std's feature detection instead.
#[cfg(any(target_os = "linux", target_os = "android"))]
pub(crate) fn is_supported() -> bool {
    let isar0: u64;
    // SAFETY: the kernel emulates the MRS and returns the sanitised register.
    unsafe {
        asm!(
            "mrs {isar0}, ID_AA64ISAR0_EL1",
            isar0 = out(reg) isar0,
            options(nomem, nostack, preserves_flags),
        );
    }
    (isar0 >> RNDR_SHIFT) & RNDR_MASK != 0
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
pub(crate) fn is_supported() -> bool {
    available()
}

#[inline]
fn available() -> bool {
    std::arch::is_aarch64_feature_detected!("rand")
}

/// The low 32 bits of one RNDR read.
pub(crate) fn try_rand32() -> Option<u32> {
    try_rand64().map(|value| value as u32)
}

pub(crate) fn try_rand64() -> Option<u64> {
    if !available() {
        return None;
    }
    // SAFETY: FEAT_RNG was confirmed above.
    unsafe { rndr() }
}

/// RNDR sets NZCV to 0b0100 on failure, so Z clear means success.
#[inline]
unsafe fn rndr() -> Option<u64> {
    let value: u64;
    let ok: u64;
    // s3_3_c2_c4_0 is RNDR; the encoded name needs no assembler extension.
    asm!(
        "mrs {value}, s3_3_c2_c4_0",
        "cset {ok}, ne",
        value = out(reg) value,
        ok = out(reg) ok,
        options(nomem, nostack),
    );
    (ok != 0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

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
        assert!(hits > 32, "only {hits}/64 single RNDR attempts succeeded");
    }
}
