//! Mock register reader.
//!
//! Expectations on `read32` pin down exactly which addresses a dump pass reads, how
//! often, and what each read returns.

use mockall::mock;
use regsnap_core::common::{AccessFault, RegAddr};
use regsnap_core::snapshot::RegisterReader;

mock! {
    pub Reader {}
    impl RegisterReader for Reader {
        fn read32(&mut self, address: RegAddr) -> Result<u32, AccessFault>;
    }
}
