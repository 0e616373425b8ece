//! Register read capability.
//!
//! The engine never touches hardware itself. Whoever drives a dump pass hands the
//! assembler a `RegisterReader`: an MMIO accessor on target, a register model in a
//! simulator, or a closure over a map in tests.

use crate::common::{AccessFault, RegAddr};

/// Reads one 32-bit register at an absolute address.
pub trait RegisterReader {
    /// Performs a single 32-bit read of `address`.
    ///
    /// # Errors
    ///
    /// An [`AccessFault`] describing why the interconnect did not return a value. The
    /// caller does not retry.
    fn read32(&mut self, address: RegAddr) -> Result<u32, AccessFault>;
}

impl<F> RegisterReader for F
where
    F: FnMut(RegAddr) -> Result<u32, AccessFault>,
{
    #[inline]
    fn read32(&mut self, address: RegAddr) -> Result<u32, AccessFault> {
        self(address)
    }
}
