//! Register address type.
//!
//! This module defines the strong type used for every absolute register address the
//! engine produces. It provides the following:
//! 1. **Type Safety:** Keeps computed register addresses apart from byte offsets and counts.
//! 2. **Checked Arithmetic:** Offsetting an address reports overflow instead of wrapping.
//! 3. **Formatting:** Addresses print as zero-padded hex, matching SoC register maps.

use std::fmt;

use serde::Deserialize;

/// An absolute physical register address on the SoC interconnect.
///
/// Addresses are 64-bit so that every module family (32-bit MAIN/MCU domain blocks as
/// well as 48-bit NAVSS windows) fits the same type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct RegAddr(pub u64);

impl RegAddr {
    /// Creates a register address from a raw 64-bit value.
    ///
    /// # Arguments
    ///
    /// * `addr` - The raw 64-bit address value.
    ///
    /// # Returns
    ///
    /// A new `RegAddr` wrapping the provided address.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(&self) -> u64 {
        self.0
    }

    /// Adds a byte offset to this address.
    ///
    /// # Arguments
    ///
    /// * `bytes` - Byte offset from this address.
    ///
    /// # Returns
    ///
    /// `Some(address)` on success, or `None` if the result does not fit in 64 bits.
    #[inline]
    pub const fn checked_offset(self, bytes: u64) -> Option<Self> {
        match self.0.checked_add(bytes) {
            Some(addr) => Some(Self(addr)),
            None => None,
        }
    }

    /// Returns `true` if the address is aligned to `align` bytes (`align` must be a power of two).
    #[inline]
    pub const fn is_aligned(&self, align: u64) -> bool {
        self.0 & (align - 1) == 0
    }
}

impl From<u64> for RegAddr {
    fn from(addr: u64) -> Self {
        Self(addr)
    }
}

impl fmt::Display for RegAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl fmt::LowerHex for RegAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}
