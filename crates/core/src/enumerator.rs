//! Address enumeration.
//!
//! The enumerator walks descriptors in declaration order, then sub-modules, then registers
//! within a sub-module. That order is the snapshot layout: position `i` always names the same
//! logical register, pass after pass.

use std::iter::FusedIterator;

use crate::common::RegAddr;
use crate::descriptor::RegisterGroupDescriptor;

/// One register produced by the enumerator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EnumeratedRegister {
    /// Position in the snapshot.
    pub position: usize,
    /// Index of the descriptor within its collection.
    pub descriptor: usize,
    /// Sub-module within the descriptor.
    pub sub_module: usize,
    /// Register index within the sub-module.
    pub index: usize,
    /// Absolute address.
    pub address: RegAddr,
}

/// Lazy, finite, restartable sequence of the registers of a verified module family.
///
/// Obtained from [`ModuleFamily::enumerate`](crate::family::ModuleFamily::enumerate), so
/// every descriptor it walks has been validated and no address can wrap. Cloning an
/// enumerator restarts nothing; it forks the walk at the current position. Call
/// `enumerate` again to start over.
#[derive(Clone, Debug)]
pub struct AddressEnumerator<'a> {
    descriptors: &'a [RegisterGroupDescriptor],
    descriptor: usize,
    sub_module: usize,
    index: usize,
    position: usize,
    remaining: usize,
}

impl<'a> AddressEnumerator<'a> {
    /// Creates an enumerator positioned before the first register of `descriptors`, which
    /// hold `dump_size` registers in total.
    pub(crate) const fn new(descriptors: &'a [RegisterGroupDescriptor], dump_size: usize) -> Self {
        Self {
            descriptors,
            descriptor: 0,
            sub_module: 0,
            index: 0,
            position: 0,
            remaining: dump_size,
        }
    }

    /// Position the next register will occupy.
    pub const fn position(&self) -> usize {
        self.position
    }
}

impl Iterator for AddressEnumerator<'_> {
    type Item = EnumeratedRegister;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(desc) = self.descriptors.get(self.descriptor) {
            let (sub_modules, per_sub_module) = desc.shape();
            if self.sub_module < sub_modules && self.index < per_sub_module {
                let item = EnumeratedRegister {
                    position: self.position,
                    descriptor: self.descriptor,
                    sub_module: self.sub_module,
                    index: self.index,
                    address: desc.address_at(self.sub_module, self.index),
                };
                self.index += 1;
                if self.index == per_sub_module {
                    self.index = 0;
                    self.sub_module += 1;
                }
                self.position += 1;
                self.remaining = self.remaining.saturating_sub(1);
                return Some(item);
            }
            self.descriptor += 1;
            self.sub_module = 0;
            self.index = 0;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for AddressEnumerator<'_> {}

impl FusedIterator for AddressEnumerator<'_> {}
