//! Hardware random numbers from the CPU: RDRAND on x86 and x86_64, RNDR on
//! AArch64.
//!
//! Layers, each built only on the one before it:
//!
//! 1. [`is_supported`] probes the CPU.
//! 2. [`try_generate32`] / [`try_generate64`] issue one instruction and report
//!    the status flag. [`generate32`] / [`generate64`] return 0 on failure.
//! 3. [`get32`] / [`get64`] retry up to [`MAX_RETRIES`] times.
//! 4. [`fill`] writes successive 64-bit words into a byte buffer.
//!
//! Nothing here mixes, pools or post-processes the hardware output, and no
//! state is shared between calls.

pub mod config;
pub mod error;
pub mod ffi;
pub mod fill;
pub mod hw;
pub mod retry;
pub mod rng;
pub mod source;

mod arch;
#[cfg(test)]
mod testing;

pub use config::{RetryPolicy, DEFAULT_MAX_RETRIES, MAX_RETRIES};
pub use error::{HwRngError, HwRngResult};
pub use fill::{fill, fill_with};
pub use hw::{generate32, generate64, is_supported, try_generate32, try_generate64};
pub use retry::{get32, get32_with, get64, get64_with};
pub use rng::HwRng;
pub use source::{Hardware, Source};
pub use truernd_types::{Arch, ErrorCode, Instruction};
