//! Common types shared by every part of the engine.
//!
//! This module provides the fundamental building blocks used by the descriptor tables,
//! the enumerator and the snapshot assembler:
//! 1. **Address Type:** A strong type for absolute register addresses.
//! 2. **Error Handling:** Configuration, formula and access-fault errors.

/// Register address type.
pub mod addr;

/// Error types and access faults.
pub mod error;

pub use addr::RegAddr;
pub use error::{AccessFault, DumpError, FaultKind, FaultSite, IntegrityViolation, Result};
