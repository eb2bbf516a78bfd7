//! The register read/write primitive a thread's registers go through.

use crate::error::TransportError;

/// Raw register block access for a thread.
///
/// Implementations wrap the process-control interface (for example
/// `PTRACE_GETREGSET`); blocks are passed as raw bytes in the target's
/// layout. Implementations that are thread-affine must serialize calls onto
/// the right context themselves.
pub trait RegisterTransport: Send + Sync {
    /// Reads the general-purpose register block.
    fn read_gregs(&self, tid: u32) -> Result<Vec<u8>, TransportError>;

    /// Writes the general-purpose register block back.
    fn write_gregs(&self, tid: u32, block: &[u8]) -> Result<(), TransportError>;

    /// Reads the floating-point register block.
    ///
    /// Returns [`TransportError::NotAvailable`] when the target has no
    /// floating-point state.
    fn read_fpregs(&self, tid: u32) -> Result<Vec<u8>, TransportError>;
}
