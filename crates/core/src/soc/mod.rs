//! SoC register tables.
//!
//! This module organizes the per-SoC dump tables and the map that holds their
//! verified families.

/// TI J784S4 tables.
pub mod j784s4;

/// Verified family collection.
pub mod map;

pub use map::RegisterMap;
