//! Error types for sonar-core.

use thiserror::Error;

/// Core error type.
#[derive(Error, Debug)]
pub enum Error {
    /// A function range that covers no bytes.
    #[error("function {name} at {entry:#x} has an empty address range")]
    EmptyFunction { name: String, entry: u64 },

    /// A function range that intersects one already in the table.
    #[error("function {name} overlaps {other}")]
    OverlappingFunction { name: String, other: String },
}
