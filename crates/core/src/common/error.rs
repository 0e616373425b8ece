//! Dump errors and access faults.
//!
//! This module defines every failure the engine can report. It provides:
//! 1. **Configuration errors:** Integrity violations found while a module family is verified.
//! 2. **Formula errors:** Index computations outside a descriptor's declared layout.
//! 3. **Access faults:** Failures of the external read primitive, located by family,
//!    descriptor, sub-module and index so the physical register can be identified.

use std::fmt;

use thiserror::Error;

use super::addr::RegAddr;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, DumpError>;

/// Cause reported by the register read primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaultKind {
    /// The interconnect returned an error response.
    BusError,
    /// The interconnect did not respond within its bus-level timeout.
    Timeout,
    /// No target claims the address.
    Unmapped,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BusError => write!(f, "bus error"),
            Self::Timeout => write!(f, "bus timeout"),
            Self::Unmapped => write!(f, "unmapped address"),
        }
    }
}

/// A failed register read.
///
/// Returned by [`RegisterReader::read32`](crate::snapshot::RegisterReader::read32). Faults are
/// architectural: reading the same register again does not clear them, so the engine never
/// retries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("{kind} at {address}")]
pub struct AccessFault {
    /// Address whose read failed.
    pub address: RegAddr,
    /// What the interconnect reported.
    pub kind: FaultKind,
}

impl AccessFault {
    /// Creates a fault for `address`.
    pub const fn new(address: RegAddr, kind: FaultKind) -> Self {
        Self { address, kind }
    }
}

/// Logical location of a register inside a dump pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaultSite {
    /// Module family name (e.g. `"RM"`).
    pub family: &'static str,
    /// Index of the descriptor within its family.
    pub descriptor: usize,
    /// Descriptor label (e.g. `"UDMA_TX1"`).
    pub descriptor_name: String,
    /// Sub-module within the descriptor.
    pub sub_module: usize,
    /// Register index within the sub-module.
    pub index: usize,
    /// Position of the register in the snapshot.
    pub position: usize,
    /// Computed absolute address.
    pub address: RegAddr,
}

impl fmt::Display for FaultSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} (descriptor {}, sub-module {}, index {}, position {}) at {}",
            self.family,
            self.descriptor_name,
            self.descriptor,
            self.sub_module,
            self.index,
            self.position,
            self.address
        )
    }
}

/// The specific inconsistency found while verifying a module family.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IntegrityViolation {
    /// The descriptors enumerate a different number of registers than the published total.
    #[error("descriptors enumerate {computed} registers, published dump size is {declared}")]
    SizeMismatch {
        /// Sum of formula register counts.
        computed: usize,
        /// Published family total.
        declared: usize,
    },
    /// The descriptors' register counts add up to more than `usize` holds.
    #[error("descriptors enumerate more registers than fit in usize, published dump size is {declared}")]
    SizeOverflow {
        /// Published family total.
        declared: usize,
    },
    /// A descriptor's formula count does not fit in `usize`.
    #[error("descriptor `{descriptor}` register count overflows usize")]
    CountOverflow {
        /// Descriptor label.
        descriptor: String,
    },
    /// A descriptor's declared count disagrees with its formula.
    #[error("descriptor `{descriptor}` declares {declared} registers, its formula enumerates {computed}")]
    DeclaredCountMismatch {
        /// Descriptor label.
        descriptor: String,
        /// Count stored in the descriptor.
        declared: usize,
        /// Count the formula enumerates.
        computed: usize,
    },
    /// An offset-driven formula was given an empty offset table.
    #[error("descriptor `{descriptor}` has an empty stride offset table")]
    EmptyLayout {
        /// Descriptor label.
        descriptor: String,
    },
    /// A descriptor repeats zero sub-modules.
    #[error("descriptor `{descriptor}` has no sub-modules")]
    ZeroSubModules {
        /// Descriptor label.
        descriptor: String,
    },
    /// The last register of a descriptor does not fit in the address space.
    #[error("descriptor `{descriptor}` addresses overflow the 64-bit address space")]
    AddressOverflow {
        /// Descriptor label.
        descriptor: String,
    },
    /// A table row refers to a base address the configuration does not provide.
    #[error("descriptor `{descriptor}` has no configured base address")]
    MissingBaseAddress {
        /// Descriptor label.
        descriptor: String,
    },
}

/// Errors raised while building register tables or capturing a snapshot.
#[derive(Debug, Error)]
pub enum DumpError {
    /// A module family failed verification; no dump pass may run against it.
    #[error("configuration integrity error in family `{family}`: {violation}")]
    ConfigurationIntegrity {
        /// Family name.
        family: &'static str,
        /// What was inconsistent.
        violation: IntegrityViolation,
    },

    /// An address computation would index outside a descriptor's declared layout.
    #[error(
        "formula bounds error in `{descriptor}`: sub-module {sub_module}, index {index} outside {sub_modules} x {per_sub_module}"
    )]
    FormulaBounds {
        /// Descriptor label.
        descriptor: String,
        /// Requested sub-module.
        sub_module: usize,
        /// Requested register index.
        index: usize,
        /// Declared number of sub-modules.
        sub_modules: usize,
        /// Declared registers per sub-module.
        per_sub_module: usize,
    },

    /// An address computation does not fit in 64 bits.
    #[error("address of `{descriptor}` sub-module {sub_module}, index {index} overflows 64 bits")]
    AddressOverflow {
        /// Descriptor label.
        descriptor: String,
        /// Requested sub-module.
        sub_module: usize,
        /// Requested register index.
        index: usize,
    },

    /// The read primitive failed; the pass was aborted and its partial buffer dropped.
    #[error("access fault ({fault}) reading {site}")]
    Access {
        /// Fault returned by the read primitive.
        fault: AccessFault,
        /// Where the failing register sits in the dump.
        site: FaultSite,
    },

    /// Every read fault of a surveyed pass; the partial buffer was dropped.
    #[error("{} access faults during dump pass", .0.len())]
    AccessFaults(Vec<(AccessFault, FaultSite)>),

    /// Configuration text could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

impl DumpError {
    /// Returns `true` for errors that must stop initialization.
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ConfigurationIntegrity { .. }
                | Self::FormulaBounds { .. }
                | Self::AddressOverflow { .. }
                | Self::InvalidConfig(_)
        )
    }

    /// Addresses of the failed reads carried by this error, in enumeration order.
    pub fn fault_addresses(&self) -> Vec<RegAddr> {
        match self {
            Self::Access { site, .. } => vec![site.address],
            Self::AccessFaults(faults) => faults.iter().map(|(_, site)| site.address).collect(),
            _ => Vec::new(),
        }
    }
}
