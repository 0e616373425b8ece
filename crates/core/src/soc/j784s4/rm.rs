//! Resource-management register table.
//!
//! The "RM" family covers interrupt routing and the DMA subsystem. Each table row is one
//! block instance and carries two counts:
//! 1. **`reg_num`:** registers read per group, taken from the front of the row's offset list.
//! 2. **`reg_array_len`:** number of groups (routers' mux rows, rings, channels, flows).
//!
//! A row contributes `reg_num * reg_array_len` registers. Map tables (aggregator `IMAP`
//! and `OES`) are homogeneous 64-bit arrays with `reg_num == 1`.

use crate::common::{DumpError, IntegrityViolation, RegAddr, Result};
use crate::config::RmConfig;
use crate::descriptor::{RegisterGroupDescriptor, WordWidth};
use crate::family::ModuleFamily;

use super::{RM_FAMILY, RM_REGDUMP_SIZE};

/// Interrupt router: `MUXCNTL` pair per output.
pub const IR_OFFSETS: [u64; 2] = [0x00, 0x04];

/// Ring accelerator ring configuration registers.
pub const RA_OFFSETS: [u64; 5] = [0x40, 0x44, 0x48, 0x4C, 0x50];

/// BCDMA transmit channel configuration.
pub const UDMA_TX_BCDMA_OFFSETS: [u64; 6] = [0x00, 0x64, 0x68, 0x6C, 0x70, 0x80];

/// UDMAP transmit channel configuration.
pub const UDMA_TX_OFFSETS: [u64; 9] = [0x00, 0x04, 0x14, 0x20, 0x60, 0x64, 0x68, 0x70, 0x80];

/// BCDMA receive channel configuration.
pub const UDMA_RX_BCDMA_OFFSETS: [u64; 5] = [0x00, 0x64, 0x68, 0x6C, 0x80];

/// UDMAP receive channel configuration.
pub const UDMA_RX_OFFSETS: [u64; 8] = [0x00, 0x14, 0x20, 0x60, 0x64, 0x68, 0x80, 0xF0];

/// UDMAP receive flow configuration.
pub const UDMA_FLOW_OFFSETS: [u64; 8] = [0x00, 0x04, 0x08, 0x0C, 0x10, 0x14, 0x18, 0x1C];

/// BCDMA global configuration, repeated per channel class.
pub const UDMA_GCFG_BCDMA_OFFSETS: [u64; 13] = [
    0x00, 0x04, 0x08, 0x10, 0x20, 0x24, 0x28, 0x2C, 0x30, 0x60, 0x64, 0x78, 0x7C,
];

/// UDMAP global configuration.
pub const UDMA_GCFG_OFFSETS: [u64; 19] = [
    0x00, 0x04, 0x08, 0x10, 0x1C, 0x20, 0x24, 0x28, 0x2C, 0x40, 0x44, 0x48, 0x4C, 0x60, 0x64,
    0x78, 0x7C, 0x80, 0x88,
];

/// Interrupt router mux row stride.
///
/// Not a silicon register-map value: the published table steps 0x4 over the `{0x0, 0x4}`
/// pair, which reads each register twice. 0x8 is the smallest stride that does not alias,
/// so high rows reach further into the router (IR6 up to base + 0xFFC).
pub const IR_GROUP_STRIDE: u64 = 0x8;
/// Ring and channel stride.
pub const CHANNEL_STRIDE: u64 = 0x100;
/// Receive flow stride.
pub const FLOW_STRIDE: u64 = 0x40;
/// BCDMA global configuration class stride.
///
/// Not a silicon register-map value: the published table repeats the block with stride 0,
/// reading the same 13 registers for every class. 0x80 is the smallest stride clear of the
/// block, so the row reads base + 0x80 through base + 0x67C, beyond the published layout.
pub const GCFG_CLASS_STRIDE: u64 = 0x80;

/// Block type of a table row; selects the base address array in [`RmConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RmBlock {
    /// Interrupt router.
    Ir,
    /// Interrupt aggregator map.
    IaImap,
    /// Interrupt aggregator output event steering.
    IaOes,
    /// Ring accelerator.
    Ra,
    /// DMA transmit channels.
    UdmaTx,
    /// DMA receive channels.
    UdmaRx,
    /// DMA receive flows.
    UdmaFlow,
    /// DMA global configuration.
    UdmaGcfg,
}

impl RmBlock {
    /// Label prefix of descriptors of this block type.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ir => "IR",
            Self::IaImap => "IA_IMAP",
            Self::IaOes => "IA_OES",
            Self::Ra => "RA",
            Self::UdmaTx => "UDMA_TX",
            Self::UdmaRx => "UDMA_RX",
            Self::UdmaFlow => "UDMA_FLOW",
            Self::UdmaGcfg => "UDMA_GCFG",
        }
    }

    /// Configured base addresses of every instance of this block type.
    pub const fn bases(self, config: &RmConfig) -> &[u64] {
        match self {
            Self::Ir => &config.ir,
            Self::IaImap => &config.ia_imap,
            Self::IaOes => &config.ia_oes,
            Self::Ra => &config.ra,
            Self::UdmaTx => &config.udma_tx,
            Self::UdmaRx => &config.udma_rx,
            Self::UdmaFlow => &config.udma_flow,
            Self::UdmaGcfg => &config.udma_gcfg,
        }
    }
}

/// Register layout of a table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RmLayout {
    /// Homogeneous array of `reg_array_len` elements.
    Map {
        /// Element width.
        width: WordWidth,
    },
    /// One group of named registers.
    Block {
        /// Offsets of the group, of which the first `reg_num` are read.
        offsets: &'static [u64],
    },
    /// `reg_array_len` groups of named registers, `stride` bytes apart.
    Repeated {
        /// Distance between groups.
        stride: u64,
        /// Offsets within a group, of which the first `reg_num` are read.
        offsets: &'static [u64],
    },
}

/// One block instance of the RM table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RmRow {
    /// Block type.
    pub block: RmBlock,
    /// Instance index into the block type's base array.
    pub instance: usize,
    /// Registers per group.
    pub reg_num: usize,
    /// Number of groups.
    pub reg_array_len: usize,
    /// Register layout.
    pub layout: RmLayout,
}

impl RmRow {
    const fn map(block: RmBlock, instance: usize, len: usize) -> Self {
        Self {
            block,
            instance,
            reg_num: 1,
            reg_array_len: len,
            layout: RmLayout::Map {
                width: WordWidth::DoubleWord,
            },
        }
    }

    const fn repeated(
        block: RmBlock,
        instance: usize,
        groups: usize,
        stride: u64,
        offsets: &'static [u64],
    ) -> Self {
        Self {
            block,
            instance,
            reg_num: offsets.len(),
            reg_array_len: groups,
            layout: RmLayout::Repeated { stride, offsets },
        }
    }

    const fn block(block: RmBlock, instance: usize, reg_num: usize, offsets: &'static [u64]) -> Self {
        Self {
            block,
            instance,
            reg_num,
            reg_array_len: 1,
            layout: RmLayout::Block { offsets },
        }
    }

    /// Number of registers the row contributes.
    pub const fn register_count(&self) -> usize {
        self.reg_num * self.reg_array_len
    }

    /// Descriptor label, e.g. `"UDMA_TX1"`.
    pub fn name(&self) -> String {
        format!("{}{}", self.block.label(), self.instance)
    }
}

/// RM block instances dumped on J784S4, in dump order.
pub const RM_ROWS: [RmRow; 32] = [
    RmRow::repeated(RmBlock::Ir, 0, 64, IR_GROUP_STRIDE, &IR_OFFSETS),
    RmRow::repeated(RmBlock::Ir, 1, 48, IR_GROUP_STRIDE, &IR_OFFSETS),
    RmRow::repeated(RmBlock::Ir, 2, 48, IR_GROUP_STRIDE, &IR_OFFSETS),
    RmRow::repeated(RmBlock::Ir, 3, 32, IR_GROUP_STRIDE, &IR_OFFSETS),
    RmRow::repeated(RmBlock::Ir, 4, 64, IR_GROUP_STRIDE, &IR_OFFSETS),
    RmRow::repeated(RmBlock::Ir, 5, 16, IR_GROUP_STRIDE, &IR_OFFSETS),
    RmRow::repeated(RmBlock::Ir, 6, 512, IR_GROUP_STRIDE, &IR_OFFSETS),
    RmRow::repeated(RmBlock::Ir, 7, 64, IR_GROUP_STRIDE, &IR_OFFSETS),
    RmRow::map(RmBlock::IaImap, 0, 1024),
    RmRow::map(RmBlock::IaImap, 1, 1024),
    RmRow::map(RmBlock::IaImap, 2, 4608),
    RmRow::map(RmBlock::IaImap, 3, 1536),
    RmRow::map(RmBlock::IaOes, 0, 16),
    RmRow::map(RmBlock::IaOes, 1, 16),
    RmRow::map(RmBlock::IaOes, 2, 16),
    RmRow::map(RmBlock::IaOes, 3, 32),
    RmRow::map(RmBlock::IaOes, 4, 32),
    RmRow::map(RmBlock::IaOes, 5, 32),
    RmRow::repeated(RmBlock::Ra, 0, 48, CHANNEL_STRIDE, &RA_OFFSETS),
    RmRow::repeated(RmBlock::Ra, 1, 1024, CHANNEL_STRIDE, &RA_OFFSETS),
    RmRow::repeated(RmBlock::Ra, 2, 256, CHANNEL_STRIDE, &RA_OFFSETS),
    RmRow::repeated(RmBlock::UdmaTx, 0, 16, CHANNEL_STRIDE, &UDMA_TX_BCDMA_OFFSETS),
    RmRow::repeated(RmBlock::UdmaTx, 1, 341, CHANNEL_STRIDE, &UDMA_TX_OFFSETS),
    RmRow::repeated(RmBlock::UdmaTx, 2, 48, CHANNEL_STRIDE, &UDMA_TX_OFFSETS),
    RmRow::repeated(RmBlock::UdmaRx, 0, 32, CHANNEL_STRIDE, &UDMA_RX_BCDMA_OFFSETS),
    RmRow::repeated(RmBlock::UdmaRx, 1, 82, CHANNEL_STRIDE, &UDMA_RX_OFFSETS),
    RmRow::repeated(RmBlock::UdmaRx, 2, 48, CHANNEL_STRIDE, &UDMA_RX_OFFSETS),
    RmRow::repeated(RmBlock::UdmaFlow, 0, 224, FLOW_STRIDE, &UDMA_FLOW_OFFSETS),
    RmRow::repeated(RmBlock::UdmaFlow, 1, 96, FLOW_STRIDE, &UDMA_FLOW_OFFSETS),
    RmRow::repeated(RmBlock::UdmaGcfg, 0, 13, GCFG_CLASS_STRIDE, &UDMA_GCFG_BCDMA_OFFSETS),
    RmRow::block(RmBlock::UdmaGcfg, 1, 19, &UDMA_GCFG_OFFSETS),
    RmRow::block(RmBlock::UdmaGcfg, 2, 13, &UDMA_GCFG_OFFSETS),
];

/// Sum of the rows' register counts.
pub const fn rm_register_count(rows: &[RmRow]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < rows.len() {
        total += rows[i].register_count();
        i += 1;
    }
    total
}

const _: () = assert!(rm_register_count(&RM_ROWS) == RM_REGDUMP_SIZE);

/// Builds the "RM" family from the J784S4 table.
///
/// # Errors
///
/// See [`build_rm_family`].
pub fn rm_family(config: &RmConfig) -> Result<ModuleFamily> {
    build_rm_family(config, &RM_ROWS, RM_REGDUMP_SIZE)
}

/// Builds an RM family from `rows`, verified against `declared` registers.
///
/// # Errors
///
/// [`DumpError::FormulaBounds`] if a row reads more registers per group than its offset
/// list holds; [`DumpError::ConfigurationIntegrity`] if a row names an instance with no
/// configured base, a descriptor is invalid, or the rows do not add up to `declared`.
pub fn build_rm_family(config: &RmConfig, rows: &[RmRow], declared: usize) -> Result<ModuleFamily> {
    let descriptors = rows
        .iter()
        .map(|row| rm_descriptor(config, row))
        .collect::<Result<Vec<_>>>()?;
    ModuleFamily::new(RM_FAMILY, declared, descriptors)
}

fn rm_descriptor(config: &RmConfig, row: &RmRow) -> Result<RegisterGroupDescriptor> {
    let name = row.name();
    let Some(&base) = row.block.bases(config).get(row.instance) else {
        tracing::error!(descriptor = %name, "no base address configured");
        return Err(DumpError::ConfigurationIntegrity {
            family: RM_FAMILY,
            violation: IntegrityViolation::MissingBaseAddress { descriptor: name },
        });
    };
    let base = RegAddr::new(base);

    let desc = match row.layout {
        RmLayout::Map { width } => {
            RegisterGroupDescriptor::fixed_stride(name, base, row.reg_array_len, width)
        }
        RmLayout::Block { offsets } => {
            let offsets = leading_offsets(&name, row, offsets)?;
            RegisterGroupDescriptor::flat(name, base, offsets)
        }
        RmLayout::Repeated { stride, offsets } => {
            let offsets = leading_offsets(&name, row, offsets)?;
            RegisterGroupDescriptor::multi_stride(name, base, row.reg_array_len, stride, offsets)
        }
    };
    Ok(desc.with_declared_count(row.register_count()))
}

/// First `reg_num` offsets of a row's list.
fn leading_offsets(name: &str, row: &RmRow, offsets: &'static [u64]) -> Result<&'static [u64]> {
    offsets.get(..row.reg_num).ok_or_else(|| {
        tracing::error!(
            descriptor = name,
            reg_num = row.reg_num,
            offsets = offsets.len(),
            "register count exceeds offset list"
        );
        DumpError::FormulaBounds {
            descriptor: name.to_owned(),
            sub_module: 0,
            index: row.reg_num.saturating_sub(1),
            sub_modules: row.reg_array_len,
            per_sub_module: offsets.len(),
        }
    })
}
