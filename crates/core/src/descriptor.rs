//! Register group descriptors.
//!
//! A descriptor is pure data: where one register block instance lives and which
//! addressing formula lays out its registers. The formulas themselves are in
//! [`crate::formula`]; verification of whole families is in [`crate::family`].

use serde::Deserialize;

use crate::common::RegAddr;

/// Width of one element in a fixed-stride register array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum WordWidth {
    /// 32-bit elements, 4-byte stride.
    #[default]
    Word,
    /// 64-bit elements, 8-byte stride (e.g. interrupt aggregator map entries).
    DoubleWord,
}

impl WordWidth {
    /// Byte stride between consecutive elements.
    #[inline]
    pub const fn bytes(self) -> u64 {
        match self {
            Self::Word => 4,
            Self::DoubleWord => 8,
        }
    }
}

/// Addressing formula of a descriptor, with the data only that formula needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaKind {
    /// `base + offsets[i]`: a short irregular list of named registers.
    FlatOffsets,
    /// `base + i * width`: a large homogeneous array.
    FixedStride {
        /// Element width.
        width: WordWidth,
    },
    /// `base + s * sub_module_size + offsets[j]`: repeated sub-blocks sharing one layout.
    MultiStride {
        /// Byte distance between consecutive sub-modules.
        sub_module_size: u64,
    },
}

/// One physical register block instance.
///
/// Built once from static tables and never mutated. `register_count` is the count the
/// table author declared; [`validate`](Self::validate) checks it against the formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterGroupDescriptor {
    pub(crate) name: String,
    pub(crate) base: RegAddr,
    pub(crate) formula: FormulaKind,
    pub(crate) sub_module_count: usize,
    pub(crate) register_count: usize,
    pub(crate) stride_offsets: &'static [u64],
}

impl RegisterGroupDescriptor {
    /// Creates a flat-offset descriptor reading `base + offset` for every offset, in order.
    pub fn flat(name: impl Into<String>, base: RegAddr, offsets: &'static [u64]) -> Self {
        Self {
            name: name.into(),
            base,
            formula: FormulaKind::FlatOffsets,
            sub_module_count: 1,
            register_count: offsets.len(),
            stride_offsets: offsets,
        }
    }

    /// Creates a fixed-stride descriptor of `register_count` consecutive elements.
    pub fn fixed_stride(
        name: impl Into<String>,
        base: RegAddr,
        register_count: usize,
        width: WordWidth,
    ) -> Self {
        Self {
            name: name.into(),
            base,
            formula: FormulaKind::FixedStride { width },
            sub_module_count: 1,
            register_count,
            stride_offsets: &[],
        }
    }

    /// Creates a multi-stride descriptor: `sub_module_count` copies of `offsets`,
    /// `sub_module_size` bytes apart.
    ///
    /// A count that does not fit in `usize` is kept saturated here and rejected by
    /// [`validate`](Self::validate).
    pub fn multi_stride(
        name: impl Into<String>,
        base: RegAddr,
        sub_module_count: usize,
        sub_module_size: u64,
        offsets: &'static [u64],
    ) -> Self {
        Self {
            name: name.into(),
            base,
            formula: FormulaKind::MultiStride { sub_module_size },
            sub_module_count,
            register_count: sub_module_count.saturating_mul(offsets.len()),
            stride_offsets: offsets,
        }
    }

    /// Replaces the register count with an independently authored value.
    ///
    /// Used by tables that publish their own per-block counts; a disagreement with the
    /// formula is reported by [`validate`](Self::validate), never silently corrected.
    #[must_use]
    pub fn with_declared_count(mut self, register_count: usize) -> Self {
        self.register_count = register_count;
        self
    }

    /// Diagnostic label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute base address of the block.
    pub const fn base(&self) -> RegAddr {
        self.base
    }

    /// Addressing formula.
    pub const fn formula(&self) -> FormulaKind {
        self.formula
    }

    /// Number of repeated sub-blocks.
    pub const fn sub_module_count(&self) -> usize {
        self.sub_module_count
    }

    /// Declared register count.
    pub const fn register_count(&self) -> usize {
        self.register_count
    }

    /// Byte offsets of the flat list, or of one sub-module's registers.
    pub const fn stride_offsets(&self) -> &'static [u64] {
        self.stride_offsets
    }
}
