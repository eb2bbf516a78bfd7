//! # sonar-disasm
//!
//! Instruction decoding for the sonar debugger core.
//!
//! This crate provides:
//! - A table-driven MIPS64 decoder (release 2 and release 6 encodings)
//! - GNU and Go assembly rendering
//! - The [`Disassembler`] trait the decoder implements

pub mod error;
pub mod traits;

#[cfg(feature = "mips64")]
pub mod mips64;

pub use error::{DecodeError, TableError};
pub use traits::{DecodedInstruction, Disassembler};

#[cfg(feature = "mips64")]
pub use mips64::Mips64Disassembler;
