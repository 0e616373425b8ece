//! # Address Enumerator Tests
//!
//! Verifies enumeration order, exact length, restartability and the position lookup
//! that maps snapshot positions back to registers.

use pretty_assertions::assert_eq;
use regsnap_core::common::{DumpError, IntegrityViolation, RegAddr};
use regsnap_core::descriptor::{RegisterGroupDescriptor, WordWidth};
use regsnap_core::enumerator::EnumeratedRegister;
use regsnap_core::family::ModuleFamily;

use crate::common::fixtures::{
    EXAMPLE_ADDRESSES, EXAMPLE_DUMP_SIZE, example_family, fixed_example, flat_example,
};

#[test]
fn enumerates_descriptor_then_sub_module_then_index() {
    let family = example_family();
    let addrs: Vec<u64> = family.addresses().map(|addr| addr.val()).collect();
    assert_eq!(addrs, EXAMPLE_ADDRESSES.to_vec());
}

#[test]
fn enumerated_fields() {
    let family = example_family();
    let regs: Vec<EnumeratedRegister> = family.enumerate().collect();
    assert_eq!(
        regs[5],
        EnumeratedRegister {
            position: 5,
            descriptor: 1,
            sub_module: 2,
            index: 1,
            address: RegAddr::new(0x2204),
        }
    );
    assert_eq!(
        regs[8],
        EnumeratedRegister {
            position: 8,
            descriptor: 2,
            sub_module: 0,
            index: 0,
            address: RegAddr::new(0x3000),
        }
    );
    for (position, reg) in regs.iter().enumerate() {
        assert_eq!(reg.position, position);
    }
}

#[test]
fn length_is_exact_and_shrinks() {
    let family = example_family();
    let mut walk = family.enumerate();
    assert_eq!(walk.len(), EXAMPLE_DUMP_SIZE);
    let _ = walk.nth(4);
    assert_eq!(walk.len(), EXAMPLE_DUMP_SIZE - 5);
    assert_eq!(walk.position(), 5);
    assert_eq!(walk.by_ref().count(), EXAMPLE_DUMP_SIZE - 5);
    assert_eq!(walk.len(), 0);
}

#[test]
fn exhausted_enumerator_stays_exhausted() {
    let family = example_family();
    let mut walk = family.enumerate();
    for _ in walk.by_ref() {}
    assert_eq!(walk.next(), None);
    assert_eq!(walk.next(), None);
}

/// Two passes over the same family yield the identical sequence.
#[test]
fn enumeration_is_deterministic() {
    let family = example_family();
    let first: Vec<_> = family.enumerate().collect();
    let second: Vec<_> = family.enumerate().collect();
    assert_eq!(first, second);
}

#[test]
fn clone_forks_at_current_position() {
    let family = example_family();
    let mut walk = family.enumerate();
    let _ = walk.nth(2);
    let fork = walk.clone();
    assert_eq!(walk.collect::<Vec<_>>(), fork.collect::<Vec<_>>());
}

#[test]
fn enumerator_over_partial_family() {
    let family = ModuleFamily::new("SMALL", 6, vec![flat_example(), fixed_example()]).unwrap();
    let addrs: Vec<u64> = family.addresses().map(|addr| addr.val()).collect();
    assert_eq!(addrs, vec![0x1000, 0x1004, 0x3000, 0x3004, 0x3008, 0x300C]);
}

#[test]
fn empty_family_enumerates_nothing() {
    let family = ModuleFamily::new("EMPTY", 0, Vec::new()).unwrap();
    let mut walk = family.enumerate();
    assert_eq!(walk.len(), 0);
    assert_eq!(walk.next(), None);
}

/// A block running off the top of the address space is refused before it can be walked,
/// in agreement with `address`.
#[test]
fn wrapping_descriptor_is_never_enumerated() {
    let high = RegisterGroupDescriptor::fixed_stride(
        "HIGH",
        RegAddr::new(u64::MAX - 3),
        3,
        WordWidth::Word,
    );
    assert_eq!(high.address(0, 0).unwrap(), RegAddr::new(u64::MAX - 3));
    assert!(matches!(
        high.address(0, 1),
        Err(DumpError::AddressOverflow { index: 1, .. })
    ));

    let err = ModuleFamily::new("HIGH", 3, vec![high]).unwrap_err();
    assert!(matches!(
        err,
        DumpError::ConfigurationIntegrity {
            family: "HIGH",
            violation: IntegrityViolation::AddressOverflow { .. },
        }
    ));
}

/// The last word below the top of the address space is enumerated as is.
#[test]
fn top_of_address_space_enumerates_without_wrapping() {
    let top = RegisterGroupDescriptor::fixed_stride(
        "TOP",
        RegAddr::new(u64::MAX - 7),
        2,
        WordWidth::Word,
    );
    let family = ModuleFamily::new("TOP", 2, vec![top]).unwrap();
    let addrs: Vec<u64> = family.addresses().map(|addr| addr.val()).collect();
    assert_eq!(addrs, vec![u64::MAX - 7, u64::MAX - 3]);
}

#[test]
fn locate_matches_enumeration() {
    let family = example_family();
    for reg in family.enumerate() {
        assert_eq!(family.locate(reg.position), Some(reg));
    }
}

#[test]
fn locate_past_end() {
    let family = example_family();
    assert_eq!(family.locate(EXAMPLE_DUMP_SIZE), None);
    assert_eq!(family.locate(usize::MAX), None);
}

#[test]
fn per_descriptor_counts() {
    let family = example_family();
    let mut counts = vec![0usize; family.descriptors().len()];
    for reg in family.enumerate() {
        counts[reg.descriptor] += 1;
    }
    let expected: Vec<usize> = family
        .descriptors()
        .iter()
        .map(|desc| desc.register_count())
        .collect();
    assert_eq!(counts, expected);
}
