//! `rand_core` adapter over the hardware source.
//!
//! `HwRng` lets the hardware instruction be handed to APIs that take a
//! `rand_core::RngCore`, typically to seed a software generator. It relays the
//! raw instruction output and is deliberately not marked `CryptoRng`.

use rand_core::RngCore;
use tracing::debug;
use truernd_types::Arch;

use crate::config::RetryPolicy;
use crate::error::{HwRngError, HwRngResult};
use crate::fill::fill_with;
use crate::hw;
use crate::retry::{get32_with, get64_with};
use crate::source::{Hardware, Source};

/// A retry-hardened handle on a [`Source`], the CPU instruction by default.
#[derive(Debug, Clone)]
pub struct HwRng<S: Source = Hardware> {
    source: S,
    policy: RetryPolicy,
}

impl HwRng<Hardware> {
    /// Probe the CPU once and return a handle if the instruction exists.
    pub fn new() -> HwRngResult<Self> {
        Self::with_policy(RetryPolicy::default())
    }

    /// Like [`HwRng::new`] with a custom retry ceiling.
    pub fn with_policy(policy: RetryPolicy) -> HwRngResult<Self> {
        policy.validate()?;
        let arch = Arch::current();
        if !hw::is_supported() {
            debug!(%arch, "hardware RNG not available");
            return Err(HwRngError::Unsupported { arch });
        }
        debug!(%arch, max_attempts = policy.max_attempts, "hardware RNG available");
        Ok(Self {
            source: Hardware,
            policy,
        })
    }
}

impl<S: Source> HwRng<S> {
    /// Wrap an arbitrary source without probing.
    pub fn from_source(source: S, policy: RetryPolicy) -> HwRngResult<Self> {
        policy.validate()?;
        Ok(Self { source, policy })
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn get32(&mut self) -> HwRngResult<u32> {
        get32_with(&mut self.source, self.policy)
    }

    pub fn get64(&mut self) -> HwRngResult<u64> {
        get64_with(&mut self.source, self.policy)
    }

    pub fn fill(&mut self, buf: &mut [u8]) -> HwRngResult<()> {
        fill_with(&mut self.source, self.policy, buf)
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

/// # Panics
///
/// `next_u32`, `next_u64` and `fill_bytes` panic if the hardware exhausts its
/// retry budget; an RNG that silently returned zeros would be worse. Use
/// `try_fill_bytes` to handle the failure instead.
impl<S: Source> RngCore for HwRng<S> {
    fn next_u32(&mut self) -> u32 {
        match self.get32() {
            Ok(value) => value,
            Err(err) => panic!("hardware RNG unavailable: {err}"),
        }
    }

    fn next_u64(&mut self) -> u64 {
        match self.get64() {
            Ok(value) => value,
            Err(err) => panic!("hardware RNG unavailable: {err}"),
        }
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(err) = self.try_fill_bytes(dest) {
            panic!("hardware RNG unavailable: {err}");
        }
    }

    /// An empty `dest` is a no-op here, matching the `RngCore` contract.
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        if dest.is_empty() {
            return Ok(());
        }
        self.fill(dest).map_err(rand_core::Error::from)
    }
}
