//! Register map.
//!
//! The verified module families of one SoC, built once at initialization and shared
//! read-only between every dump pass.

use std::sync::Arc;

use crate::family::ModuleFamily;

/// Every module family of a SoC.
#[derive(Debug, Clone)]
pub struct RegisterMap {
    families: Vec<Arc<ModuleFamily>>,
}

impl RegisterMap {
    /// Wraps verified families for sharing.
    pub fn new(families: Vec<ModuleFamily>) -> Self {
        Self {
            families: families.into_iter().map(Arc::new).collect(),
        }
    }

    /// Family called `name`.
    pub fn family(&self, name: &str) -> Option<&Arc<ModuleFamily>> {
        self.families.iter().find(|family| family.name() == name)
    }

    /// All families in build order.
    pub fn families(&self) -> &[Arc<ModuleFamily>] {
        &self.families
    }

    /// Registers across every family.
    pub fn total_registers(&self) -> usize {
        self.families.iter().map(|family| family.dump_size()).sum()
    }
}
