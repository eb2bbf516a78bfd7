//! # sonar-core
//!
//! Core abstractions for the sonar debugger. This crate defines the
//! architecture vocabulary, register identifiers, functions and resolved
//! code locations shared by the decoder and the process layer.

pub mod arch;
pub mod error;
pub mod location;
pub mod register;
pub mod symbol;

pub use arch::{Architecture, Bitness, Endianness};
pub use error::Error;
pub use location::{LineEntry, LineResolver, Location};
pub use register::{Register, RegisterClass, RegisterNaming};
pub use symbol::{Function, FunctionTable};
