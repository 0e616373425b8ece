//! Power-management register tables.
//!
//! Two families are dumped for power management:
//! 1. **PM PLL:** Every main and MCU domain PLL. All PLLs share one of two register offset
//!    lists; each instance reads the list up to and including its own last offset.
//! 2. **PM PSC:** For each power/sleep controller, the `PDSTAT` array of every power domain
//!    followed by the `MDSTAT` array of every module.

use crate::common::{DumpError, IntegrityViolation, RegAddr, Result};
use crate::config::PmConfig;
use crate::descriptor::{RegisterGroupDescriptor, WordWidth};
use crate::family::ModuleFamily;

use super::{PM_PLL_FAMILY, PM_PLL_REGDUMP_SIZE, PM_PSC_FAMILY, PM_PSC_REGDUMP_SIZE};

/// PLL registers read on every instance: `PID`, `CFG`, `LOCKKEY0`/`1`, `CTRL`, `STAT`,
/// `FREQ_CTRL0`/`1`, `DIV_CTRL`, then the `HSDIV_CTRL0..15` array.
pub const PLL_OFFSETS: [u64; 24] = [
    0x00, 0x08, 0x20, 0x24, 0x30, 0x34, 0x38, 0x60, 0x80, 0x84, 0x88, 0x8C, 0x90, 0x94, 0x98,
    0x9C, 0xA0, 0xA4, 0xA8, 0xAC, 0xB0, 0xB4, 0xB8, 0xBC,
];

/// [`PLL_OFFSETS`] plus `SS_CTRL`, for PLLs with spread-spectrum modulation.
pub const PLL_OFFSETS_SSMOD: [u64; 25] = [
    0x00, 0x08, 0x20, 0x24, 0x30, 0x34, 0x38, 0x40, 0x60, 0x80, 0x84, 0x88, 0x8C, 0x90, 0x94,
    0x98, 0x9C, 0xA0, 0xA4, 0xA8, 0xAC, 0xB0, 0xB4, 0xB8, 0xBC,
];

/// Offset of the power domain status array within a PSC.
pub const PSC_PDSTAT_OFFSET: u64 = 0x200;

/// Offset of the module status array within a PSC.
pub const PSC_MDSTAT_OFFSET: u64 = 0x800;

/// Power domains of the wakeup PSC.
pub const WKUP_PSC_PD_COUNT: usize = 0x02;
/// Modules of the wakeup PSC.
pub const WKUP_PSC_MD_COUNT: usize = 0x16;
/// Power domains of the main PSC.
pub const PSC_PD_COUNT: usize = 0x2B;
/// Modules of the main PSC.
pub const PSC_MD_COUNT: usize = 0x80;
/// Power domains of the Bolton PSC.
pub const BOLTON_PSC_PD_COUNT: usize = 0x08;
/// Modules of the Bolton PSC.
pub const BOLTON_PSC_MD_COUNT: usize = 0x1B;

/// Clock domain a PLL sits in; selects which CFG base its instance number is relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PllDomain {
    /// Main domain, relative to [`PmConfig::pll_cfg_base`].
    Main,
    /// MCU domain, relative to [`PmConfig::mcu_pll_cfg_base`].
    Mcu,
}

/// One PLL of the dump table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PllRow {
    /// Diagnostic label.
    pub name: &'static str,
    /// Domain of the instance.
    pub domain: PllDomain,
    /// Instance number within the domain.
    pub instance: u64,
    /// Shared offset list.
    pub offsets: &'static [u64],
    /// Last offset read; the list is cut here, inclusive.
    pub length: u64,
}

impl PllRow {
    const fn main(name: &'static str, instance: u64, offsets: &'static [u64], length: u64) -> Self {
        Self {
            name,
            domain: PllDomain::Main,
            instance,
            offsets,
            length,
        }
    }

    const fn mcu(name: &'static str, instance: u64, length: u64) -> Self {
        Self {
            name,
            domain: PllDomain::Mcu,
            instance,
            offsets: &PLL_OFFSETS,
            length,
        }
    }

    /// Number of offsets read, or `None` if `length` is not in the offset list.
    pub const fn register_count(&self) -> Option<usize> {
        let mut i = 0;
        while i < self.offsets.len() {
            if self.offsets[i] == self.length {
                return Some(i + 1);
            }
            i += 1;
        }
        None
    }
}

/// PLLs dumped on J784S4, in dump order.
pub const PLL_ROWS: [PllRow; 22] = [
    PllRow::main("PLL0", 0, &PLL_OFFSETS, 0xA4),
    PllRow::main("PLL1", 1, &PLL_OFFSETS, 0xA4),
    PllRow::main("PLL2", 2, &PLL_OFFSETS, 0xA0),
    PllRow::main("PLL3", 3, &PLL_OFFSETS, 0x94),
    PllRow::main("PLL4", 4, &PLL_OFFSETS, 0x8C),
    PllRow::main("PLL5", 5, &PLL_OFFSETS, 0x88),
    PllRow::main("PLL6", 6, &PLL_OFFSETS, 0x84),
    PllRow::main("PLL7", 7, &PLL_OFFSETS, 0x84),
    PllRow::main("PLL8", 8, &PLL_OFFSETS, 0x84),
    PllRow::main("PLL9", 9, &PLL_OFFSETS, 0x84),
    PllRow::main("PLL12", 12, &PLL_OFFSETS_SSMOD, 0x84),
    PllRow::main("PLL14", 14, &PLL_OFFSETS, 0x8C),
    PllRow::main("PLL16", 16, &PLL_OFFSETS, 0x88),
    PllRow::main("PLL17", 17, &PLL_OFFSETS, 0x88),
    PllRow::main("PLL19", 19, &PLL_OFFSETS, 0x88),
    PllRow::main("PLL25", 25, &PLL_OFFSETS, 0x88),
    PllRow::main("PLL26", 26, &PLL_OFFSETS_SSMOD, 0x84),
    PllRow::main("PLL27", 27, &PLL_OFFSETS_SSMOD, 0x84),
    PllRow::main("PLL28", 28, &PLL_OFFSETS_SSMOD, 0x84),
    PllRow::mcu("MCU_PLL0", 0, 0x88),
    PllRow::mcu("MCU_PLL1", 1, 0x94),
    PllRow::mcu("MCU_PLL2", 2, 0x94),
];

/// Sum of the PLL rows' register counts; a row whose length is not in its list counts zero.
pub const fn pll_register_count(rows: &[PllRow]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < rows.len() {
        if let Some(count) = rows[i].register_count() {
            total += count;
        }
        i += 1;
    }
    total
}

const _: () = assert!(pll_register_count(&PLL_ROWS) == PM_PLL_REGDUMP_SIZE);

/// Builds the "PM PLL" family from the J784S4 table.
///
/// # Errors
///
/// See [`build_pll_family`].
pub fn pll_family(config: &PmConfig) -> Result<ModuleFamily> {
    build_pll_family(config, &PLL_ROWS, PM_PLL_REGDUMP_SIZE)
}

/// Builds a PLL family from `rows`, verified against `declared` registers.
///
/// # Errors
///
/// [`DumpError::FormulaBounds`] if a row's length is not one of its offsets;
/// [`DumpError::ConfigurationIntegrity`] if an instance base overflows or the rows do not
/// add up to `declared`.
pub fn build_pll_family(
    config: &PmConfig,
    rows: &[PllRow],
    declared: usize,
) -> Result<ModuleFamily> {
    let descriptors = rows
        .iter()
        .map(|row| pll_descriptor(config, row))
        .collect::<Result<Vec<_>>>()?;
    ModuleFamily::new(PM_PLL_FAMILY, declared, descriptors)
}

fn pll_descriptor(config: &PmConfig, row: &PllRow) -> Result<RegisterGroupDescriptor> {
    let offsets: &'static [u64] = row.offsets;
    let Some(count) = row.register_count() else {
        tracing::error!(pll = row.name, length = row.length, "PLL length is not a register offset");
        return Err(DumpError::FormulaBounds {
            descriptor: row.name.to_owned(),
            sub_module: 0,
            index: offsets.len(),
            sub_modules: 1,
            per_sub_module: offsets.len(),
        });
    };

    let cfg_base = match row.domain {
        PllDomain::Main => config.pll_cfg_base,
        PllDomain::Mcu => config.mcu_pll_cfg_base,
    };
    let base = row
        .instance
        .checked_mul(config.pll_instance_stride)
        .and_then(|offset| RegAddr::new(cfg_base).checked_offset(offset))
        .ok_or_else(|| DumpError::ConfigurationIntegrity {
            family: PM_PLL_FAMILY,
            violation: IntegrityViolation::AddressOverflow {
                descriptor: row.name.to_owned(),
            },
        })?;

    Ok(RegisterGroupDescriptor::flat(
        row.name,
        base,
        offsets.get(..count).unwrap_or(offsets),
    ))
}

/// One power/sleep controller of the dump table.
#[derive(Debug, Clone, Copy)]
struct PscRow {
    name: &'static str,
    base: fn(&PmConfig) -> u64,
    pd_count: usize,
    md_count: usize,
}

const PSC_ROWS: [PscRow; 3] = [
    PscRow {
        name: "WKUP_PSC0",
        base: |config| config.wkup_psc_base,
        pd_count: WKUP_PSC_PD_COUNT,
        md_count: WKUP_PSC_MD_COUNT,
    },
    PscRow {
        name: "PSC0",
        base: |config| config.psc_base,
        pd_count: PSC_PD_COUNT,
        md_count: PSC_MD_COUNT,
    },
    PscRow {
        name: "BOLTON_PSC0",
        base: |config| config.bolton_psc_base,
        pd_count: BOLTON_PSC_PD_COUNT,
        md_count: BOLTON_PSC_MD_COUNT,
    },
];

const _: () = assert!(
    WKUP_PSC_PD_COUNT
        + WKUP_PSC_MD_COUNT
        + PSC_PD_COUNT
        + PSC_MD_COUNT
        + BOLTON_PSC_PD_COUNT
        + BOLTON_PSC_MD_COUNT
        == PM_PSC_REGDUMP_SIZE
);

/// Builds the "PM PSC" family: `PDSTAT` then `MDSTAT` of the wakeup, main and Bolton PSCs.
///
/// # Errors
///
/// [`DumpError::ConfigurationIntegrity`] if a status array base overflows.
pub fn psc_family(config: &PmConfig) -> Result<ModuleFamily> {
    let mut descriptors = Vec::with_capacity(PSC_ROWS.len() * 2);
    for row in &PSC_ROWS {
        let base = RegAddr::new((row.base)(config));
        for (suffix, offset, count) in [
            ("PDSTAT", PSC_PDSTAT_OFFSET, row.pd_count),
            ("MDSTAT", PSC_MDSTAT_OFFSET, row.md_count),
        ] {
            let name = format!("{}_{suffix}", row.name);
            let Some(array_base) = base.checked_offset(offset) else {
                return Err(DumpError::ConfigurationIntegrity {
                    family: PM_PSC_FAMILY,
                    violation: IntegrityViolation::AddressOverflow { descriptor: name },
                });
            };
            descriptors.push(RegisterGroupDescriptor::fixed_stride(
                name,
                array_base,
                count,
                WordWidth::Word,
            ));
        }
    }
    ModuleFamily::new(PM_PSC_FAMILY, PM_PSC_REGDUMP_SIZE, descriptors)
}
