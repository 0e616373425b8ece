//! Mock implementations of the engine's capability traits.

/// Mock register reader.
pub mod reader;
