//! Address formulas.
//!
//! Every descriptor is addressed through the same interface, whichever formula it uses:
//! 1. **Shape:** `(sub_modules, registers_per_sub_module)`, the index ranges the formula is total over.
//! 2. **Count:** the number of registers the formula enumerates, `sub_modules * registers_per_sub_module`,
//!    checked against `usize` overflow.
//! 3. **Address:** the absolute address of `(sub_module, index)`.
//!
//! | Formula       | Shape                         | Address                                  |
//! |---------------|-------------------------------|------------------------------------------|
//! | `FlatOffsets` | `1 x len(offsets)`            | `base + offsets[i]`                      |
//! | `FixedStride` | `1 x register_count`          | `base + i * width`                       |
//! | `MultiStride` | `sub_modules x len(offsets)`  | `base + s * sub_module_size + offsets[j]`|

use crate::common::{DumpError, IntegrityViolation, RegAddr, Result};
use crate::descriptor::{FormulaKind, RegisterGroupDescriptor};

impl RegisterGroupDescriptor {
    /// Number of sub-modules the formula iterates.
    #[inline]
    pub const fn sub_modules(&self) -> usize {
        match self.formula {
            FormulaKind::FlatOffsets | FormulaKind::FixedStride { .. } => 1,
            FormulaKind::MultiStride { .. } => self.sub_module_count,
        }
    }

    /// Number of registers per sub-module.
    #[inline]
    pub const fn registers_per_sub_module(&self) -> usize {
        match self.formula {
            FormulaKind::FlatOffsets | FormulaKind::MultiStride { .. } => self.stride_offsets.len(),
            FormulaKind::FixedStride { .. } => self.register_count,
        }
    }

    /// Index ranges the formula is total over: `(sub_modules, registers_per_sub_module)`.
    #[inline]
    pub const fn shape(&self) -> (usize, usize) {
        (self.sub_modules(), self.registers_per_sub_module())
    }

    /// Number of registers this descriptor's formula enumerates, or `None` if it does not
    /// fit in `usize`.
    #[inline]
    pub const fn formula_register_count(&self) -> Option<usize> {
        self.sub_modules().checked_mul(self.registers_per_sub_module())
    }

    /// Absolute address of register `index` in sub-module `sub_module`.
    ///
    /// # Errors
    ///
    /// [`DumpError::FormulaBounds`] if either index is outside [`shape`](Self::shape);
    /// [`DumpError::AddressOverflow`] if the address does not fit in 64 bits.
    pub fn address(&self, sub_module: usize, index: usize) -> Result<RegAddr> {
        let (sub_modules, per_sub_module) = self.shape();
        if sub_module >= sub_modules || index >= per_sub_module {
            return Err(DumpError::FormulaBounds {
                descriptor: self.name.clone(),
                sub_module,
                index,
                sub_modules,
                per_sub_module,
            });
        }
        self.checked_address(sub_module, index)
            .ok_or_else(|| DumpError::AddressOverflow {
                descriptor: self.name.clone(),
                sub_module,
                index,
            })
    }

    /// Highest address the formula produces, or `None` if it overflows or the shape is empty.
    pub fn last_address(&self) -> Option<RegAddr> {
        let (sub_modules, per_sub_module) = self.shape();
        if sub_modules == 0 || per_sub_module == 0 {
            return None;
        }
        let last_sub = sub_modules - 1;
        match self.formula {
            FormulaKind::FixedStride { .. } => self.checked_address(0, per_sub_module - 1),
            FormulaKind::FlatOffsets | FormulaKind::MultiStride { .. } => {
                let (max_index, _) = self
                    .stride_offsets
                    .iter()
                    .enumerate()
                    .max_by_key(|&(_, offset)| *offset)?;
                self.checked_address(last_sub, max_index)
            }
        }
    }

    /// Checks the descriptor invariants a module family relies on.
    ///
    /// # Errors
    ///
    /// The first [`IntegrityViolation`] found: zero sub-modules, a formula count beyond
    /// `usize`, a formula that enumerates nothing, a declared count that differs from the
    /// formula count, or a highest address beyond 64 bits.
    pub fn validate(&self) -> std::result::Result<(), IntegrityViolation> {
        if self.sub_module_count == 0 {
            return Err(IntegrityViolation::ZeroSubModules {
                descriptor: self.name.clone(),
            });
        }
        let Some(computed) = self.formula_register_count() else {
            return Err(IntegrityViolation::CountOverflow {
                descriptor: self.name.clone(),
            });
        };
        if computed == 0 {
            return Err(IntegrityViolation::EmptyLayout {
                descriptor: self.name.clone(),
            });
        }
        if computed != self.register_count {
            return Err(IntegrityViolation::DeclaredCountMismatch {
                descriptor: self.name.clone(),
                declared: self.register_count,
                computed,
            });
        }
        if self.last_address().is_none() {
            return Err(IntegrityViolation::AddressOverflow {
                descriptor: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Address of an in-range `(sub_module, index)`.
    ///
    /// Only reached through the enumerator of a verified family: callers stay within
    /// [`shape`](Self::shape) of a validated descriptor, whose highest address is known to
    /// fit in 64 bits.
    #[inline]
    pub(crate) fn address_at(&self, sub_module: usize, index: usize) -> RegAddr {
        let offset = match self.formula {
            FormulaKind::FlatOffsets => self.stride_offsets[index],
            FormulaKind::FixedStride { width } => (index as u64).wrapping_mul(width.bytes()),
            FormulaKind::MultiStride { sub_module_size } => (sub_module as u64)
                .wrapping_mul(sub_module_size)
                .wrapping_add(self.stride_offsets[index]),
        };
        RegAddr(self.base.val().wrapping_add(offset))
    }

    fn checked_address(&self, sub_module: usize, index: usize) -> Option<RegAddr> {
        let offset = match self.formula {
            FormulaKind::FlatOffsets => *self.stride_offsets.get(index)?,
            FormulaKind::FixedStride { width } => (index as u64).checked_mul(width.bytes())?,
            FormulaKind::MultiStride { sub_module_size } => (sub_module as u64)
                .checked_mul(sub_module_size)?
                .checked_add(*self.stride_offsets.get(index)?)?,
        };
        self.base.checked_offset(offset)
    }
}
