//! Targets without a usable hardware random instruction, including 32-bit
//! ARM. Every operation reports failure.

pub(crate) fn is_supported() -> bool {
    false
}

pub(crate) fn try_rand32() -> Option<u32> {
    None
}

pub(crate) fn try_rand64() -> Option<u64> {
    None
}
