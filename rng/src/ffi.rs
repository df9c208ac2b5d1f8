//! C ABI for linking into C and C++ programs.
//!
//! Status-returning functions give `0` on success and `-1` on any failure.
//! Null pointers and zero lengths fail before the hardware is touched and
//! are not distinguished from other failures.

use core::ffi::{c_int, c_void};
use core::slice;

use crate::config::MAX_RETRIES;
use crate::fill::fill;
use crate::hw::{generate32, generate64, is_supported};
use crate::retry::{get32, get64};

const OK: c_int = 0;
const ERR: c_int = -1;

/// `1` if the hardware instruction is available, `0` otherwise.
#[no_mangle]
pub extern "C" fn truernd_is_supported() -> c_int {
    c_int::from(is_supported())
}

/// One 32-bit draw, no retry. Returns 0 on failure.
#[no_mangle]
pub extern "C" fn truernd_gen32() -> u32 {
    generate32()
}

/// One 64-bit draw, no retry. Returns 0 on failure.
#[no_mangle]
pub extern "C" fn truernd_gen64() -> u64 {
    generate64()
}

/// Retry ceiling compiled into this library.
#[no_mangle]
pub extern "C" fn truernd_max_retries() -> u32 {
    MAX_RETRIES
}

/// # Safety
///
/// `out` must be null or valid for a write of one `uint32_t`.
#[no_mangle]
pub unsafe extern "C" fn truernd_get32(out: *mut u32) -> c_int {
    let Some(out) = (unsafe { out.as_mut() }) else {
        return ERR;
    };
    match get32() {
        Ok(value) => {
            *out = value;
            OK
        }
        Err(_) => ERR,
    }
}

/// # Safety
///
/// `out` must be null or valid for a write of one `uint64_t`.
#[no_mangle]
pub unsafe extern "C" fn truernd_get64(out: *mut u64) -> c_int {
    let Some(out) = (unsafe { out.as_mut() }) else {
        return ERR;
    };
    match get64() {
        Ok(value) => {
            *out = value;
            OK
        }
        Err(_) => ERR,
    }
}

/// # Safety
///
/// `buf` must be null or valid for writes of `len` bytes.
#[no_mangle]
pub unsafe extern "C" fn truernd_fill(buf: *mut c_void, len: usize) -> c_int {
    if buf.is_null() || len == 0 {
        return ERR;
    }
    let bytes = unsafe { slice::from_raw_parts_mut(buf.cast::<u8>(), len) };
    match fill(bytes) {
        Ok(()) => OK,
        Err(_) => ERR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::ptr;

    #[test]
    fn null_and_empty_arguments_fail() {
        assert_eq!(unsafe { truernd_get32(ptr::null_mut()) }, ERR);
        assert_eq!(unsafe { truernd_get64(ptr::null_mut()) }, ERR);
        assert_eq!(unsafe { truernd_fill(ptr::null_mut(), 100) }, ERR);

        let mut buf = [0x5Au8; 10];
        let status = unsafe { truernd_fill(buf.as_mut_ptr().cast(), 0) };
        assert_eq!(status, ERR);
        assert_eq!(buf, [0x5A; 10]);
    }

    #[test]
    fn support_flag_is_boolean() {
        let flag = truernd_is_supported();
        assert!(flag == 0 || flag == 1);
        assert_eq!(flag == 1, is_supported());
    }

    #[test]
    fn reports_build_ceiling() {
        assert_eq!(truernd_max_retries(), MAX_RETRIES);
    }

    #[test]
    fn status_follows_hardware() {
        let mut word = 0u64;
        let mut half = 0u32;
        let mut buf = [0u8; 13];
        let expected = if is_supported() { OK } else { ERR };
        assert_eq!(unsafe { truernd_get64(&mut word) }, expected);
        assert_eq!(unsafe { truernd_get32(&mut half) }, expected);
        assert_eq!(unsafe { truernd_fill(buf.as_mut_ptr().cast(), buf.len()) }, expected);
    }

    #[test]
    fn unsupported_gen_returns_zero() {
        if is_supported() {
            return;
        }
        assert_eq!(truernd_gen32(), 0);
        assert_eq!(truernd_gen64(), 0);
    }
}
