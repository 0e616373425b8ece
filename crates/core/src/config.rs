//! Configuration for the register dump engine.
//!
//! This module defines the configuration structures that parameterize the engine. It provides:
//! 1. **Defaults:** CSL base addresses of the J784S4 register groups.
//! 2. **Structures:** Power-management and resource-management base tables plus dump-pass options.
//! 3. **Enums:** The access-fault policy of the snapshot assembler.
//!
//! Base addresses are build-time constants of the SoC; the configuration exists so that a
//! board or CSL layer can supply them, and so tests can move blocks around. Use
//! `Config::default()` for the J784S4 values or deserialize from JSON.

use serde::Deserialize;

use crate::common::Result;

/// Default CSL base addresses (J784S4).
mod defaults {
    /// Main domain PLL0 configuration base; PLL `n` sits `n * PLL_INSTANCE_STRIDE` above it.
    pub const PLL_CFG_BASE: u64 = 0x0068_0000;

    /// MCU domain PLL0 configuration base.
    pub const MCU_PLL_CFG_BASE: u64 = 0x40D0_0000;

    /// Distance between consecutive PLL instances.
    pub const PLL_INSTANCE_STRIDE: u64 = 0x1000;

    /// Wakeup domain PSC.
    pub const WKUP_PSC_BASE: u64 = 0x4200_0000;

    /// Main domain PSC0.
    pub const PSC_BASE: u64 = 0x0040_0000;

    /// Bolton PSC wrapper.
    pub const BOLTON_PSC_BASE: u64 = 0x0044_0000;

    /// Interrupt routers: MAIN2MCU level, MAIN2MCU pulse, timesync, wakeup GPIO mux,
    /// GPIO mux, compare event, NAVSS0, MCU NAVSS0.
    pub const IR_BASES: [u64; 8] = [
        0x00A1_0000,
        0x00A2_0000,
        0x00A4_0000,
        0x4220_0000,
        0x00A0_0000,
        0x00A3_0000,
        0x310E_0000,
        0x2854_0000,
    ];

    /// Interrupt aggregator map tables: NAVSS0 MODSS INTA0/INTA1, NAVSS0 UDMASS INTA0,
    /// MCU NAVSS0 UDMASS INTA0.
    pub const IA_IMAP_BASES: [u64; 4] = [0x3090_0000, 0x3090_8000, 0x3094_0000, 0x2856_0000];

    /// Interrupt aggregator output event steering blocks.
    pub const IA_OES_BASES: [u64; 6] = [
        0x3088_3000,
        0x3088_4000,
        0x3088_5000,
        0x3088_6000,
        0x3088_7000,
        0x3088_8000,
    ];

    /// Ring accelerators: BCDMA0 rings, NAVSS0 RINGACC0, MCU NAVSS0 RINGACC0.
    pub const RA_BASES: [u64; 3] = [0x3101_0000, 0x3108_0000, 0x2844_0000];

    /// DMA transmit channels: BCDMA0, NAVSS0 UDMAP0, MCU NAVSS0 UDMAP0.
    pub const UDMA_TX_BASES: [u64; 3] = [0x3104_0000, 0x3540_0000, 0x2848_0000];

    /// DMA receive channels: BCDMA0, NAVSS0 UDMAP0, MCU NAVSS0 UDMAP0.
    pub const UDMA_RX_BASES: [u64; 3] = [0x3106_0000, 0x3550_0000, 0x284A_0000];

    /// DMA receive flows: NAVSS0 UDMAP0, MCU NAVSS0 UDMAP0.
    pub const UDMA_FLOW_BASES: [u64; 2] = [0x3520_0000, 0x2840_0000];

    /// DMA global configuration: BCDMA0, NAVSS0 UDMAP0, MCU NAVSS0 UDMAP0.
    pub const UDMA_GCFG_BASES: [u64; 3] = [0x3100_0000, 0x3115_0000, 0x2857_0000];
}

/// What the snapshot assembler does when a register read faults.
///
/// Neither policy ever returns a partial snapshot or zero-fills a failed register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum FaultPolicy {
    /// Stop at the first fault and report it.
    #[default]
    Abort,
    /// Finish the pass so that every faulting register is reported, then fail.
    Survey,
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use regsnap_core::config::{Config, FaultPolicy};
///
/// let config = Config::default();
/// assert_eq!(config.dump.fault_policy, FaultPolicy::Abort);
/// assert_eq!(config.soc.pm.pll_instance_stride, 0x1000);
/// ```
///
/// Overriding a subset from JSON; everything else keeps its default:
///
/// ```
/// use regsnap_core::config::{Config, FaultPolicy};
///
/// let json = r#"{
///     "soc": { "pm": { "psc_base": 4456448 } },
///     "dump": { "fault_policy": "Survey" }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.soc.pm.psc_base, 0x0044_0000);
/// assert_eq!(config.soc.pm.wkup_psc_base, 0x4200_0000);
/// assert_eq!(config.dump.fault_policy, FaultPolicy::Survey);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// SoC base addresses
    #[serde(default)]
    pub soc: SocConfig,
    /// Dump pass options
    #[serde(default)]
    pub dump: DumpConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// [`DumpError::InvalidConfig`](crate::common::DumpError::InvalidConfig) if the text is not
    /// valid JSON or names an unknown field.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Base addresses of every register group the engine dumps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocConfig {
    /// Power-management (PLL and PSC) bases
    #[serde(default)]
    pub pm: PmConfig,
    /// Resource-management (interrupt and DMA) bases
    #[serde(default)]
    pub rm: RmConfig,
}

/// Power-management base addresses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PmConfig {
    /// Main domain PLL0 CFG base
    #[serde(default = "PmConfig::default_pll_cfg_base")]
    pub pll_cfg_base: u64,

    /// MCU domain PLL0 CFG base
    #[serde(default = "PmConfig::default_mcu_pll_cfg_base")]
    pub mcu_pll_cfg_base: u64,

    /// Distance between PLL instances in both domains
    #[serde(default = "PmConfig::default_pll_instance_stride")]
    pub pll_instance_stride: u64,

    /// Wakeup domain PSC base
    #[serde(default = "PmConfig::default_wkup_psc_base")]
    pub wkup_psc_base: u64,

    /// Main domain PSC base
    #[serde(default = "PmConfig::default_psc_base")]
    pub psc_base: u64,

    /// Bolton PSC base
    #[serde(default = "PmConfig::default_bolton_psc_base")]
    pub bolton_psc_base: u64,
}

impl PmConfig {
    const fn default_pll_cfg_base() -> u64 {
        defaults::PLL_CFG_BASE
    }

    const fn default_mcu_pll_cfg_base() -> u64 {
        defaults::MCU_PLL_CFG_BASE
    }

    const fn default_pll_instance_stride() -> u64 {
        defaults::PLL_INSTANCE_STRIDE
    }

    const fn default_wkup_psc_base() -> u64 {
        defaults::WKUP_PSC_BASE
    }

    const fn default_psc_base() -> u64 {
        defaults::PSC_BASE
    }

    const fn default_bolton_psc_base() -> u64 {
        defaults::BOLTON_PSC_BASE
    }
}

impl Default for PmConfig {
    fn default() -> Self {
        Self {
            pll_cfg_base: defaults::PLL_CFG_BASE,
            mcu_pll_cfg_base: defaults::MCU_PLL_CFG_BASE,
            pll_instance_stride: defaults::PLL_INSTANCE_STRIDE,
            wkup_psc_base: defaults::WKUP_PSC_BASE,
            psc_base: defaults::PSC_BASE,
            bolton_psc_base: defaults::BOLTON_PSC_BASE,
        }
    }
}

/// Resource-management base addresses, one array per block type, indexed by instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RmConfig {
    /// Interrupt router CFG bases
    #[serde(default = "RmConfig::default_ir")]
    pub ir: [u64; 8],

    /// Interrupt aggregator IMAP bases
    #[serde(default = "RmConfig::default_ia_imap")]
    pub ia_imap: [u64; 4],

    /// Interrupt aggregator OES bases
    #[serde(default = "RmConfig::default_ia_oes")]
    pub ia_oes: [u64; 6],

    /// Ring accelerator CFG bases
    #[serde(default = "RmConfig::default_ra")]
    pub ra: [u64; 3],

    /// DMA TX channel bases
    #[serde(default = "RmConfig::default_udma_tx")]
    pub udma_tx: [u64; 3],

    /// DMA RX channel bases
    #[serde(default = "RmConfig::default_udma_rx")]
    pub udma_rx: [u64; 3],

    /// DMA RX flow bases
    #[serde(default = "RmConfig::default_udma_flow")]
    pub udma_flow: [u64; 2],

    /// DMA global configuration bases
    #[serde(default = "RmConfig::default_udma_gcfg")]
    pub udma_gcfg: [u64; 3],
}

impl RmConfig {
    const fn default_ir() -> [u64; 8] {
        defaults::IR_BASES
    }

    const fn default_ia_imap() -> [u64; 4] {
        defaults::IA_IMAP_BASES
    }

    const fn default_ia_oes() -> [u64; 6] {
        defaults::IA_OES_BASES
    }

    const fn default_ra() -> [u64; 3] {
        defaults::RA_BASES
    }

    const fn default_udma_tx() -> [u64; 3] {
        defaults::UDMA_TX_BASES
    }

    const fn default_udma_rx() -> [u64; 3] {
        defaults::UDMA_RX_BASES
    }

    const fn default_udma_flow() -> [u64; 2] {
        defaults::UDMA_FLOW_BASES
    }

    const fn default_udma_gcfg() -> [u64; 3] {
        defaults::UDMA_GCFG_BASES
    }
}

impl Default for RmConfig {
    fn default() -> Self {
        Self {
            ir: defaults::IR_BASES,
            ia_imap: defaults::IA_IMAP_BASES,
            ia_oes: defaults::IA_OES_BASES,
            ra: defaults::RA_BASES,
            udma_tx: defaults::UDMA_TX_BASES,
            udma_rx: defaults::UDMA_RX_BASES,
            udma_flow: defaults::UDMA_FLOW_BASES,
            udma_gcfg: defaults::UDMA_GCFG_BASES,
        }
    }
}

/// Options of a dump pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DumpConfig {
    /// Reaction to a faulting register read
    #[serde(default)]
    pub fault_policy: FaultPolicy,
}
