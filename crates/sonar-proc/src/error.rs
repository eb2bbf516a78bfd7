//! Error types for register access.

use thiserror::Error;

/// Failure of the OS register read/write primitive.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The register set does not exist on this kernel or target.
    #[error("register set not available")]
    NotAvailable,

    #[error("register transport: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type for register snapshot operations.
#[derive(Error, Debug)]
pub enum RegisterError {
    /// Register index out of range.
    #[error("unknown register {0}")]
    UnknownRegister(usize),

    /// The architecture has no such mutable register.
    #[error("unsupported register operation: {0}")]
    Unsupported(&'static str),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A register block of the wrong size came back from the transport.
    #[error("malformed register block: expected {expected} bytes, got {actual}")]
    MalformedBlock { expected: usize, actual: usize },
}
