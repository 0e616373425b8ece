//! Register snapshots.
//!
//! This module turns a verified module family into values. It provides:
//! 1. **Capability:** The [`RegisterReader`] trait through which every register is read.
//! 2. **Assembly:** The [`SnapshotAssembler`] that runs one ordered dump pass.
//! 3. **Serialization:** The [`DumpGuard`] that keeps passes from interleaving.
//! 4. **Result:** The immutable [`Snapshot`] handed to the external validator.

/// Dump pass driver.
pub mod assembler;

/// Process-wide dump pass lock.
pub mod guard;

/// Register read capability.
pub mod traits;

use std::sync::Arc;

use crate::common::RegAddr;
use crate::enumerator::EnumeratedRegister;
use crate::family::ModuleFamily;

pub use assembler::SnapshotAssembler;
pub use guard::DumpGuard;
pub use traits::RegisterReader;

/// Values of every register of one family, captured in one pass.
///
/// Position `i` holds the register the family's enumerator yields at position `i`; the
/// snapshot keeps the family alive so positions can always be mapped back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    family: Arc<ModuleFamily>,
    values: Box<[u32]>,
}

/// One register of a snapshot with its location and value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterReading<'a> {
    /// Location of the register in the dump.
    pub register: EnumeratedRegister,
    /// Label of the descriptor the register belongs to.
    pub descriptor_name: &'a str,
    /// Captured value.
    pub value: u32,
}

impl Snapshot {
    pub(crate) const fn new(family: Arc<ModuleFamily>, values: Box<[u32]>) -> Self {
        Self { family, values }
    }

    /// Family this snapshot was captured from.
    pub const fn family(&self) -> &Arc<ModuleFamily> {
        &self.family
    }

    /// Number of registers, always the family's dump size.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the snapshot holds no registers.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw values in enumeration order.
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Value at `position`.
    pub fn get(&self, position: usize) -> Option<u32> {
        self.values.get(position).copied()
    }

    /// Value of the register at `address`, if the family reads that address.
    pub fn value_at(&self, address: RegAddr) -> Option<u32> {
        self.family
            .addresses()
            .position(|candidate| candidate == address)
            .and_then(|position| self.get(position))
    }

    /// Location and value of the register at `position`.
    pub fn locate(&self, position: usize) -> Option<RegisterReading<'_>> {
        let register = self.family.locate(position)?;
        Some(self.reading(register))
    }

    /// Every register with its location, in enumeration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = RegisterReading<'_>> + '_ {
        self.family.enumerate().map(|register| self.reading(register))
    }

    /// Releases the raw buffer.
    pub fn into_values(self) -> Box<[u32]> {
        self.values
    }

    fn reading(&self, register: EnumeratedRegister) -> RegisterReading<'_> {
        RegisterReading {
            register,
            descriptor_name: self.family.descriptors()[register.descriptor].name(),
            value: self.values[register.position],
        }
    }
}
