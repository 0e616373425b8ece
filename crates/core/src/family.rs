//! Module families.
//!
//! A module family is the ordered set of descriptors dumped together into one snapshot,
//! with its published total size (e.g. "PM PLL", 269 registers). A `ModuleFamily` value
//! only exists once every descriptor has been validated and the dump size verified, so
//! holding one is proof the table may be dumped.

use crate::common::{DumpError, FaultSite, RegAddr, Result};
use crate::descriptor::RegisterGroupDescriptor;
use crate::enumerator::{AddressEnumerator, EnumeratedRegister};
use crate::sizing::verify_dump_size;

/// A verified, immutable collection of register group descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleFamily {
    name: &'static str,
    dump_size: usize,
    descriptors: Vec<RegisterGroupDescriptor>,
    /// Snapshot position of each descriptor's first register.
    starts: Vec<usize>,
}

impl ModuleFamily {
    /// Builds and verifies a family.
    ///
    /// # Arguments
    ///
    /// * `name` - Family name used in diagnostics.
    /// * `declared_dump_size` - Published total number of registers.
    /// * `descriptors` - Descriptors in enumeration order.
    ///
    /// # Errors
    ///
    /// [`DumpError::ConfigurationIntegrity`] if any descriptor is invalid or the descriptors
    /// do not add up to `declared_dump_size`.
    pub fn new(
        name: &'static str,
        declared_dump_size: usize,
        descriptors: Vec<RegisterGroupDescriptor>,
    ) -> Result<Self> {
        for desc in &descriptors {
            desc.validate().map_err(|violation| {
                tracing::error!(family = name, %violation, "invalid register group descriptor");
                DumpError::ConfigurationIntegrity {
                    family: name,
                    violation,
                }
            })?;
        }
        let dump_size = verify_dump_size(name, &descriptors, declared_dump_size)?;

        let starts = descriptors
            .iter()
            .scan(0usize, |next, desc| {
                let start = *next;
                *next += desc.register_count();
                Some(start)
            })
            .collect();

        tracing::info!(
            family = name,
            descriptors = descriptors.len(),
            registers = dump_size,
            "module family verified"
        );
        Ok(Self {
            name,
            dump_size,
            descriptors,
            starts,
        })
    }

    /// Family name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Verified number of registers in one snapshot of this family.
    pub const fn dump_size(&self) -> usize {
        self.dump_size
    }

    /// Descriptors in enumeration order.
    pub fn descriptors(&self) -> &[RegisterGroupDescriptor] {
        &self.descriptors
    }

    /// Looks up a descriptor by label.
    pub fn descriptor_named(&self, name: &str) -> Option<(usize, &RegisterGroupDescriptor)> {
        self.descriptors
            .iter()
            .enumerate()
            .find(|(_, desc)| desc.name() == name)
    }

    /// Snapshot position range covered by descriptor `index`.
    pub fn positions_of(&self, index: usize) -> Option<std::ops::Range<usize>> {
        let start = *self.starts.get(index)?;
        let desc = self.descriptors.get(index)?;
        Some(start..start + desc.register_count())
    }

    /// Enumerates every register of the family in snapshot order.
    pub fn enumerate(&self) -> AddressEnumerator<'_> {
        AddressEnumerator::new(&self.descriptors, self.dump_size)
    }

    /// Enumerates only the addresses, in snapshot order.
    pub fn addresses(&self) -> impl ExactSizeIterator<Item = RegAddr> + '_ {
        self.enumerate().map(|reg| reg.address)
    }

    /// Maps a snapshot position back to its register without walking the sequence.
    pub fn locate(&self, position: usize) -> Option<EnumeratedRegister> {
        if position >= self.dump_size {
            return None;
        }
        let descriptor = self.starts.partition_point(|&start| start <= position) - 1;
        let desc = &self.descriptors[descriptor];
        let within = position - self.starts[descriptor];
        let per_sub_module = desc.registers_per_sub_module();
        let (sub_module, index) = (within / per_sub_module, within % per_sub_module);
        Some(EnumeratedRegister {
            position,
            descriptor,
            sub_module,
            index,
            address: desc.address_at(sub_module, index),
        })
    }

    /// Builds the diagnostic location of an enumerated register.
    pub(crate) fn fault_site(&self, reg: &EnumeratedRegister) -> FaultSite {
        FaultSite {
            family: self.name,
            descriptor: reg.descriptor,
            descriptor_name: self.descriptors[reg.descriptor].name().to_owned(),
            sub_module: reg.sub_module,
            index: reg.index,
            position: reg.position,
            address: reg.address,
        }
    }
}
