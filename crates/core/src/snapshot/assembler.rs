//! Snapshot assembly.
//!
//! The assembler drives one dump pass over a module family:
//! 1. **Serialize:** Takes the process-wide [`DumpGuard`] for the whole pass.
//! 2. **Allocate:** Reserves the buffer once, at the family's verified dump size.
//! 3. **Read:** Walks the enumerator and reads every address exactly once, in order.
//! 4. **Publish:** Hands back a complete [`Snapshot`], or an error and no snapshot.
//!
//! A faulted pass never yields a partial or zero-filled buffer. Under
//! [`FaultPolicy::Abort`] it stops at the first fault; under [`FaultPolicy::Survey`] it
//! finishes the walk so every faulting register is reported at once.

use std::sync::Arc;

use super::Snapshot;
use super::guard::DumpGuard;
use super::traits::RegisterReader;
use crate::common::{DumpError, Result};
use crate::config::FaultPolicy;
use crate::family::ModuleFamily;

/// Captures snapshots through a [`RegisterReader`].
#[derive(Debug)]
pub struct SnapshotAssembler<R> {
    reader: R,
    policy: FaultPolicy,
}

impl<R: RegisterReader> SnapshotAssembler<R> {
    /// Creates an assembler reading through `reader`.
    pub const fn new(reader: R, policy: FaultPolicy) -> Self {
        Self { reader, policy }
    }

    /// Fault policy in effect.
    pub const fn policy(&self) -> FaultPolicy {
        self.policy
    }

    /// Runs one dump pass over `family`.
    ///
    /// Blocks while another pass holds the dump guard.
    ///
    /// # Errors
    ///
    /// [`DumpError::Access`] for the first faulting register under [`FaultPolicy::Abort`];
    /// [`DumpError::AccessFaults`] listing every faulting register under
    /// [`FaultPolicy::Survey`]. The partially filled buffer is dropped in both cases.
    pub fn capture(&mut self, family: &Arc<ModuleFamily>) -> Result<Snapshot> {
        let _guard = DumpGuard::acquire();
        let size = family.dump_size();
        tracing::debug!(family = family.name(), registers = size, "dump pass started");

        let mut values = Vec::with_capacity(size);
        let mut faults = Vec::new();
        for reg in family.enumerate() {
            match self.reader.read32(reg.address) {
                Ok(value) => values.push(value),
                Err(fault) => {
                    let site = family.fault_site(&reg);
                    tracing::warn!(%fault, %site, "register read faulted");
                    match self.policy {
                        FaultPolicy::Abort => return Err(DumpError::Access { fault, site }),
                        FaultPolicy::Survey => faults.push((fault, site)),
                    }
                }
            }
        }

        if !faults.is_empty() {
            tracing::warn!(
                family = family.name(),
                faults = faults.len(),
                "dump pass discarded"
            );
            return Err(DumpError::AccessFaults(faults));
        }

        debug_assert_eq!(values.len(), size);
        tracing::debug!(family = family.name(), registers = size, "dump pass finished");
        Ok(Snapshot::new(Arc::clone(family), values.into_boxed_slice()))
    }

    /// Consumes the assembler and returns its reader.
    pub fn into_reader(self) -> R {
        self.reader
    }
}
