//! # Snapshot Assembler Tests
//!
//! Verifies that a dump pass reads every address exactly once in enumeration order,
//! that a fault never produces a snapshot, and that snapshot positions map back to
//! their registers.

use std::sync::Arc;

use mockall::predicate;
use pretty_assertions::assert_eq;
use regsnap_core::common::{AccessFault, DumpError, FaultKind, RegAddr};
use regsnap_core::config::FaultPolicy;
use regsnap_core::snapshot::SnapshotAssembler;

use crate::common::fixtures::{
    EXAMPLE_ADDRESSES, EXAMPLE_DUMP_SIZE, FakeRegisters, example_family, value_of,
};
use crate::common::logging;
use crate::common::mocks::reader::MockReader;

#[test]
fn capture_reads_every_address_in_order() {
    logging::init();
    let family = example_family();
    let mut assembler = SnapshotAssembler::new(FakeRegisters::new(), FaultPolicy::Abort);

    let snapshot = assembler.capture(&family).unwrap();
    let expected: Vec<u32> = EXAMPLE_ADDRESSES
        .iter()
        .map(|&addr| value_of(RegAddr::new(addr)))
        .collect();
    assert_eq!(snapshot.values(), expected.as_slice());
    assert_eq!(snapshot.len(), EXAMPLE_DUMP_SIZE);
    assert!(!snapshot.is_empty());
    assert!(Arc::ptr_eq(snapshot.family(), &family));

    let reader = assembler.into_reader();
    let reads: Vec<u64> = reader.reads().iter().map(|addr| addr.val()).collect();
    assert_eq!(reads, EXAMPLE_ADDRESSES.to_vec());
}

#[test]
fn each_address_read_exactly_once() {
    let family = example_family();
    let mut reader = MockReader::new();
    for &addr in &EXAMPLE_ADDRESSES {
        let _ = reader
            .expect_read32()
            .with(predicate::eq(RegAddr::new(addr)))
            .times(1)
            .returning(|addr| Ok(value_of(addr)));
    }
    let mut assembler = SnapshotAssembler::new(reader, FaultPolicy::Abort);
    let snapshot = assembler.capture(&family).unwrap();
    assert_eq!(snapshot.len(), EXAMPLE_DUMP_SIZE);
}

/// A fault on the third address aborts the pass, reports that address, and reads
/// nothing after it.
#[test]
fn fault_on_third_address_aborts() {
    logging::init();
    let family = example_family();
    let faulting = RegAddr::new(EXAMPLE_ADDRESSES[2]);

    let mut reader = MockReader::new();
    let _ = reader
        .expect_read32()
        .with(predicate::ne(faulting))
        .times(2)
        .returning(|addr| Ok(value_of(addr)));
    let _ = reader
        .expect_read32()
        .with(predicate::eq(faulting))
        .times(1)
        .returning(|addr| Err(AccessFault::new(addr, FaultKind::BusError)));

    let mut assembler = SnapshotAssembler::new(reader, FaultPolicy::Abort);
    let err = assembler.capture(&family).unwrap_err();

    assert_eq!(err.fault_addresses(), vec![faulting]);
    match err {
        DumpError::Access { fault, site } => {
            assert_eq!(fault, AccessFault::new(faulting, FaultKind::BusError));
            assert_eq!(site.family, "EXAMPLE");
            assert_eq!(site.descriptor_name, "MULTI");
            assert_eq!((site.descriptor, site.sub_module, site.index), (1, 0, 0));
            assert_eq!(site.position, 2);
        }
        other => panic!("expected Access, got {other:?}"),
    }
}

#[test]
fn survey_reports_every_fault() {
    let family = example_family();
    let reader = FakeRegisters::new()
        .with_fault(0x2104, FaultKind::Timeout)
        .with_fault(0x3008, FaultKind::Unmapped);
    let mut assembler = SnapshotAssembler::new(reader, FaultPolicy::Survey);
    assert_eq!(assembler.policy(), FaultPolicy::Survey);

    let err = assembler.capture(&family).unwrap_err();
    assert!(!err.is_fatal());
    assert_eq!(
        err.fault_addresses(),
        vec![RegAddr::new(0x2104), RegAddr::new(0x3008)]
    );
    match &err {
        DumpError::AccessFaults(faults) => {
            assert_eq!(faults.len(), 2);
            assert_eq!(faults[0].0.kind, FaultKind::Timeout);
            assert_eq!(faults[0].1.position, 5);
            assert_eq!(faults[1].0.kind, FaultKind::Unmapped);
            assert_eq!(faults[1].1.descriptor_name, "FIXED");
        }
        other => panic!("expected AccessFaults, got {other:?}"),
    }

    // The whole family was still walked.
    assert_eq!(assembler.into_reader().reads().len(), EXAMPLE_DUMP_SIZE);
}

#[test]
fn abort_stops_at_first_of_several_faults() {
    let family = example_family();
    let reader = FakeRegisters::new()
        .with_fault(0x1004, FaultKind::BusError)
        .with_fault(0x3000, FaultKind::BusError);
    let mut assembler = SnapshotAssembler::new(reader, FaultPolicy::default());

    let err = assembler.capture(&family).unwrap_err();
    assert_eq!(err.fault_addresses(), vec![RegAddr::new(0x1004)]);
    assert_eq!(assembler.into_reader().reads().len(), 2);
}

#[test]
fn closure_reader() {
    let family = example_family();
    let mut reads = 0usize;
    let reader = |addr: RegAddr| -> Result<u32, AccessFault> {
        reads += 1;
        Ok(addr.val() as u32)
    };
    let snapshot = {
        let mut assembler = SnapshotAssembler::new(reader, FaultPolicy::Abort);
        assembler.capture(&family).unwrap()
    };

    assert_eq!(reads, EXAMPLE_DUMP_SIZE);
    assert_eq!(snapshot.get(0), Some(0x1000));
    assert_eq!(snapshot.get(11), Some(0x300C));
    assert_eq!(snapshot.get(12), None);
}

#[test]
fn repeated_passes_are_independent() {
    let family = example_family();
    let mut assembler = SnapshotAssembler::new(FakeRegisters::new(), FaultPolicy::Abort);
    let first = assembler.capture(&family).unwrap();
    let second = assembler.capture(&family).unwrap();
    assert_eq!(first, second);
    assert_eq!(assembler.into_reader().reads().len(), 2 * EXAMPLE_DUMP_SIZE);
}

#[test]
fn snapshot_locates_registers() {
    let family = example_family();
    let mut assembler = SnapshotAssembler::new(FakeRegisters::new(), FaultPolicy::Abort);
    let snapshot = assembler.capture(&family).unwrap();

    let reading = snapshot.locate(6).unwrap();
    assert_eq!(reading.descriptor_name, "MULTI");
    assert_eq!(reading.register.sub_module, 2);
    assert_eq!(reading.register.index, 0);
    assert_eq!(reading.register.address, RegAddr::new(0x2200));
    assert_eq!(reading.value, value_of(RegAddr::new(0x2200)));
    assert!(snapshot.locate(EXAMPLE_DUMP_SIZE).is_none());

    assert_eq!(
        snapshot.value_at(RegAddr::new(0x3004)),
        Some(value_of(RegAddr::new(0x3004)))
    );
    assert_eq!(snapshot.value_at(RegAddr::new(0x3010)), None);
}

#[test]
fn snapshot_iter_pairs_values_with_locations() {
    let family = example_family();
    let mut assembler = SnapshotAssembler::new(FakeRegisters::new(), FaultPolicy::Abort);
    let snapshot = assembler.capture(&family).unwrap();

    let readings: Vec<_> = snapshot.iter().collect();
    assert_eq!(readings.len(), EXAMPLE_DUMP_SIZE);
    for (position, reading) in readings.iter().enumerate() {
        assert_eq!(reading.register.position, position);
        assert_eq!(reading.value, value_of(reading.register.address));
    }
    let names: Vec<&str> = readings.iter().map(|r| r.descriptor_name).collect();
    assert_eq!(&names[..3], &["FLAT", "FLAT", "MULTI"]);

    let values = snapshot.into_values();
    assert_eq!(values.len(), EXAMPLE_DUMP_SIZE);
}
