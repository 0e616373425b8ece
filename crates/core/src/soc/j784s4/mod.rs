//! TI J784S4 register tables.
//!
//! This module holds the static dump tables of the J784S4 safety checkers. It provides:
//! 1. **Power management:** The "PM PLL" and "PM PSC" families.
//! 2. **Resource management:** The "RM" family (interrupt routers, aggregators, rings and DMA).
//! 3. **Published sizes:** Dump sizes usable to size static buffers, checked at compile time
//!    against the tables and again at runtime when the families are built.

/// PLL and PSC tables.
pub mod pm;

/// Interrupt and DMA tables.
pub mod rm;

use crate::common::Result;
use crate::config::SocConfig;

use super::map::RegisterMap;

/// Name of the PLL family.
pub const PM_PLL_FAMILY: &str = "PM PLL";
/// Name of the PSC family.
pub const PM_PSC_FAMILY: &str = "PM PSC";
/// Name of the resource-management family.
pub const RM_FAMILY: &str = "RM";

/// Registers in one PLL snapshot.
pub const PM_PLL_REGDUMP_SIZE: usize = 269;

/// Registers in one PSC snapshot: every `PDSTAT` and `MDSTAT` of the three PSCs.
pub const PM_PSC_REGDUMP_SIZE: usize = pm::WKUP_PSC_PD_COUNT
    + pm::WKUP_PSC_MD_COUNT
    + pm::PSC_PD_COUNT
    + pm::PSC_MD_COUNT
    + pm::BOLTON_PSC_PD_COUNT
    + pm::BOLTON_PSC_MD_COUNT;

/// Registers in one RM snapshot.
pub const RM_REGDUMP_SIZE: usize = 24230;

/// Builds and verifies all J784S4 families, in the order PM PLL, PM PSC, RM.
///
/// # Errors
///
/// The first configuration or formula error found; no map is returned in that case.
pub fn register_map(config: &SocConfig) -> Result<RegisterMap> {
    let families = vec![
        pm::pll_family(&config.pm)?,
        pm::psc_family(&config.pm)?,
        rm::rm_family(&config.rm)?,
    ];
    Ok(RegisterMap::new(families))
}
