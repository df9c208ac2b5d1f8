use crate::hw;

/// A single-attempt random word generator.
///
/// This is the seam between the instruction bindings and the retry and fill
/// layers. Implementations must not retry internally: one call, one request.
pub trait Source {
    fn try_u32(&mut self) -> Option<u32>;

    fn try_u64(&mut self) -> Option<u64>;

    /// Whether failures mean "absent" rather than "transiently busy".
    /// Consulted only after a fetch has already exhausted its attempts.
    fn is_available(&self) -> bool {
        true
    }
}

/// The CPU's own RDRAND/RNDR instruction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hardware;

impl Source for Hardware {
    #[inline]
    fn try_u32(&mut self) -> Option<u32> {
        hw::try_generate32()
    }

    #[inline]
    fn try_u64(&mut self) -> Option<u64> {
        hw::try_generate64()
    }

    fn is_available(&self) -> bool {
        hw::is_supported()
    }
}
