//! Dump size calculation.
//!
//! The size of a family's snapshot is the sum of its descriptors' formula counts. It is
//! computed once, when the family is built, and checked against the family's published
//! total: a mismatch would mean an undersized (or oversized) static buffer, so it is fatal.

use crate::common::{DumpError, IntegrityViolation, Result};
use crate::descriptor::RegisterGroupDescriptor;

/// Total number of registers the descriptors enumerate, in any order, or `None` if a count
/// or the sum does not fit in `usize`.
pub fn total_register_count(descriptors: &[RegisterGroupDescriptor]) -> Option<usize> {
    descriptors.iter().try_fold(0usize, |total, desc| {
        total.checked_add(desc.formula_register_count()?)
    })
}

/// Checks the computed dump size of `descriptors` against the published `declared` total.
///
/// # Arguments
///
/// * `family` - Family name, for diagnostics.
/// * `descriptors` - Descriptors in enumeration order.
/// * `declared` - Published total dump size of the family.
///
/// # Returns
///
/// The verified dump size.
///
/// # Errors
///
/// [`DumpError::ConfigurationIntegrity`] with [`IntegrityViolation::SizeMismatch`] if the
/// totals differ, or [`IntegrityViolation::SizeOverflow`] if the computed total does not fit
/// in `usize`.
pub fn verify_dump_size(
    family: &'static str,
    descriptors: &[RegisterGroupDescriptor],
    declared: usize,
) -> Result<usize> {
    let Some(computed) = total_register_count(descriptors) else {
        tracing::error!(family, declared, "dump size overflows usize");
        return Err(DumpError::ConfigurationIntegrity {
            family,
            violation: IntegrityViolation::SizeOverflow { declared },
        });
    };
    if computed != declared {
        tracing::error!(
            family,
            computed,
            declared,
            "dump size does not match published total"
        );
        return Err(DumpError::ConfigurationIntegrity {
            family,
            violation: IntegrityViolation::SizeMismatch { computed, declared },
        });
    }
    Ok(computed)
}
