//! # Power-Management Table Tests
//!
//! Verifies the PLL and PSC families: published totals, per-instance register counts,
//! base address computation, and rejection of inconsistent rows.

use regsnap_core::common::{DumpError, IntegrityViolation, RegAddr};
use regsnap_core::config::PmConfig;
use regsnap_core::descriptor::FormulaKind;
use regsnap_core::soc::j784s4::pm::*;
use regsnap_core::soc::j784s4::{
    PM_PLL_FAMILY, PM_PLL_REGDUMP_SIZE, PM_PSC_FAMILY, PM_PSC_REGDUMP_SIZE,
};
use rstest::rstest;

#[test]
fn pll_family_total() {
    let family = pll_family(&PmConfig::default()).unwrap();
    assert_eq!(family.name(), PM_PLL_FAMILY);
    assert_eq!(family.dump_size(), 269);
    assert_eq!(PM_PLL_REGDUMP_SIZE, 269);
    assert_eq!(family.enumerate().count(), 269);
    assert_eq!(family.descriptors().len(), PLL_ROWS.len());
}

#[rstest]
#[case("PLL0", 18)]
#[case("PLL2", 17)]
#[case("PLL3", 14)]
#[case("PLL5", 11)]
#[case("PLL9", 10)]
#[case("PLL12", 11)]
#[case("PLL14", 12)]
#[case("PLL28", 11)]
#[case("MCU_PLL0", 11)]
#[case("MCU_PLL2", 14)]
fn pll_register_counts(#[case] name: &str, #[case] count: usize) {
    let family = pll_family(&PmConfig::default()).unwrap();
    let (_, desc) = family.descriptor_named(name).unwrap();
    assert_eq!(desc.register_count(), count);
    assert_eq!(desc.formula(), FormulaKind::FlatOffsets);
}

/// Every PLL reads its offset list up to and including its length.
#[test]
fn pll_list_cut_at_length() {
    let family = pll_family(&PmConfig::default()).unwrap();
    for (row, desc) in PLL_ROWS.iter().zip(family.descriptors()) {
        assert_eq!(desc.name(), row.name);
        assert_eq!(desc.stride_offsets().last(), Some(&row.length));
        assert_eq!(desc.stride_offsets(), &row.offsets[..desc.register_count()]);
    }
}

#[test]
fn spread_spectrum_plls_read_ss_ctrl() {
    let family = pll_family(&PmConfig::default()).unwrap();
    for name in ["PLL12", "PLL26", "PLL27", "PLL28"] {
        let (_, desc) = family.descriptor_named(name).unwrap();
        assert!(desc.stride_offsets().contains(&0x40), "{name}");
    }
    let (_, pll0) = family.descriptor_named("PLL0").unwrap();
    assert!(!pll0.stride_offsets().contains(&0x40));
}

#[test]
fn pll_bases_follow_instance_number() {
    let config = PmConfig::default();
    let family = pll_family(&config).unwrap();
    let (_, pll19) = family.descriptor_named("PLL19").unwrap();
    assert_eq!(pll19.base(), RegAddr::new(0x0068_0000 + 19 * 0x1000));
    let (_, mcu1) = family.descriptor_named("MCU_PLL1").unwrap();
    assert_eq!(mcu1.base(), RegAddr::new(0x40D0_1000));
}

#[test]
fn pll_bases_follow_config() {
    let config = PmConfig {
        pll_cfg_base: 0x1000_0000,
        pll_instance_stride: 0x2000,
        ..PmConfig::default()
    };
    let family = pll_family(&config).unwrap();
    let (_, pll3) = family.descriptor_named("PLL3").unwrap();
    assert_eq!(pll3.base(), RegAddr::new(0x1000_6000));
}

#[test]
fn pll_row_counts_match_const_total() {
    assert_eq!(pll_register_count(&PLL_ROWS), PM_PLL_REGDUMP_SIZE);
    let total: usize = PLL_ROWS.iter().filter_map(PllRow::register_count).sum();
    assert_eq!(total, PM_PLL_REGDUMP_SIZE);
}

#[test]
fn pll_length_not_in_list_is_formula_bounds() {
    let row = PllRow {
        name: "PLL3",
        domain: PllDomain::Main,
        instance: 3,
        offsets: &PLL_OFFSETS,
        length: 0x44,
    };
    assert_eq!(row.register_count(), None);
    let err = build_pll_family(&PmConfig::default(), &[row], 0).unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(
        err,
        DumpError::FormulaBounds { ref descriptor, index: 24, per_sub_module: 24, .. }
            if descriptor == "PLL3"
    ));
}

#[test]
fn pll_declared_total_mismatch() {
    let err = build_pll_family(&PmConfig::default(), &PLL_ROWS[..2], 35).unwrap_err();
    assert!(matches!(
        err,
        DumpError::ConfigurationIntegrity {
            family: PM_PLL_FAMILY,
            violation: IntegrityViolation::SizeMismatch {
                computed: 36,
                declared: 35
            },
        }
    ));
}

#[test]
fn pll_base_overflow() {
    let config = PmConfig {
        pll_cfg_base: u64::MAX - 0x1000,
        ..PmConfig::default()
    };
    let err = pll_family(&config).unwrap_err();
    assert!(matches!(
        err,
        DumpError::ConfigurationIntegrity {
            violation: IntegrityViolation::AddressOverflow { .. },
            ..
        }
    ));
}

#[test]
fn psc_family_total() {
    let family = psc_family(&PmConfig::default()).unwrap();
    assert_eq!(family.name(), PM_PSC_FAMILY);
    assert_eq!(family.dump_size(), 230);
    assert_eq!(PM_PSC_REGDUMP_SIZE, 230);
    assert_eq!(family.addresses().len(), 230);
}

#[test]
fn psc_descriptor_order() {
    let family = psc_family(&PmConfig::default()).unwrap();
    let layout: Vec<(&str, usize)> = family
        .descriptors()
        .iter()
        .map(|desc| (desc.name(), desc.register_count()))
        .collect();
    assert_eq!(
        layout,
        vec![
            ("WKUP_PSC0_PDSTAT", WKUP_PSC_PD_COUNT),
            ("WKUP_PSC0_MDSTAT", WKUP_PSC_MD_COUNT),
            ("PSC0_PDSTAT", PSC_PD_COUNT),
            ("PSC0_MDSTAT", PSC_MD_COUNT),
            ("BOLTON_PSC0_PDSTAT", BOLTON_PSC_PD_COUNT),
            ("BOLTON_PSC0_MDSTAT", BOLTON_PSC_MD_COUNT),
        ]
    );
}

#[test]
fn psc_status_array_addresses() {
    let family = psc_family(&PmConfig::default()).unwrap();
    let (index, mdstat) = family.descriptor_named("PSC0_MDSTAT").unwrap();
    assert_eq!(mdstat.base(), RegAddr::new(0x0040_0800));
    assert_eq!(mdstat.address(0, 0x7F).unwrap(), RegAddr::new(0x0040_09FC));

    // The main PSC's MDSTAT array follows its PDSTAT array in the snapshot.
    let start = family.positions_of(index).unwrap().start;
    assert_eq!(start, WKUP_PSC_PD_COUNT + WKUP_PSC_MD_COUNT + PSC_PD_COUNT);
    assert_eq!(family.locate(start).unwrap().address, RegAddr::new(0x0040_0800));
}
