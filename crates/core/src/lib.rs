//! Table-driven register enumeration and snapshot engine.
//!
//! This crate computes, reads and assembles register dumps for the safety checkers of a
//! multi-domain SoC:
//! 1. **Descriptors:** Declarative register groups addressed by one of three formulas.
//! 2. **Families:** Ordered descriptor collections verified against their published dump size.
//! 3. **Enumeration:** A deterministic, restartable address sequence per family.
//! 4. **Snapshots:** Serialized dump passes through an external register read capability.
//! 5. **SoC tables:** The J784S4 power-management and resource-management families.
//!
//! ```
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! use regsnap_core::common::{AccessFault, RegAddr};
//! use regsnap_core::config::FaultPolicy;
//! use regsnap_core::descriptor::RegisterGroupDescriptor;
//! use regsnap_core::family::ModuleFamily;
//! use regsnap_core::snapshot::SnapshotAssembler;
//!
//! static OFFSETS: [u64; 2] = [0x0, 0x4];
//! let family = ModuleFamily::new(
//!     "DEMO",
//!     2,
//!     vec![RegisterGroupDescriptor::flat("BLOCK", RegAddr::new(0x1000), &OFFSETS)],
//! )
//! .unwrap();
//!
//! let regs = HashMap::from([(0x1000, 7), (0x1004, 9)]);
//! let reader = |addr: RegAddr| -> Result<u32, AccessFault> { Ok(regs[&addr.val()]) };
//! let mut assembler = SnapshotAssembler::new(reader, FaultPolicy::Abort);
//! let snapshot = assembler.capture(&Arc::new(family)).unwrap();
//! assert_eq!(snapshot.values(), &[7, 9]);
//! ```

/// Common types (addresses, errors, access faults).
pub mod common;
/// Engine configuration (base addresses, fault policy).
pub mod config;
/// Register group descriptors.
pub mod descriptor;
/// Address enumeration in snapshot order.
pub mod enumerator;
/// Verified module families.
pub mod family;
/// Address formulas.
pub mod formula;
/// Dump size calculation.
pub mod sizing;
/// Dump passes and snapshots.
pub mod snapshot;
/// SoC register tables.
pub mod soc;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Verified descriptor collection; build with `ModuleFamily::new`.
pub use crate::family::ModuleFamily;
/// Dump pass driver.
pub use crate::snapshot::{Snapshot, SnapshotAssembler};
/// Verified families of one SoC.
pub use crate::soc::RegisterMap;
