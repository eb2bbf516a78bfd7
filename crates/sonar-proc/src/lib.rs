//! # sonar-proc
//!
//! The process-facing half of the sonar debugger core: register snapshots of
//! a stopped thread, the transport they are read through, and control-flow
//! classification of decoded instructions.
//!
//! # Example
//!
//! ```
//! use sonar_core::FunctionTable;
//! use sonar_disasm::Mips64Disassembler;
//! use sonar_proc::{decode_one, InstructionKind};
//!
//! let decoder = Mips64Disassembler::new();
//! let table = FunctionTable::new();
//! // j 0x2000
//! let inst = decode_one(&[0x00, 0x08, 0x00, 0x08], 0x1000, None, false, &table, &decoder).unwrap();
//! assert_eq!(inst.kind, InstructionKind::UnconditionalJump);
//! assert_eq!(inst.dest_loc.map(|loc| loc.pc), Some(0x2000));
//! ```

pub mod disasm;
pub mod error;
pub mod mips64;
pub mod prologue;
pub mod registers;
pub mod transport;

pub use disasm::{classify, decode_one, disassemble, resolve_target, AsmInstruction, InstructionKind};
pub use error::{RegisterError, TransportError};
pub use mips64::{FpState, Mips64FpRegs, Mips64PtraceRegs, Mips64Registers, NativeThread};
pub use prologue::{first_pc_after_prologue, matches_prologue, mips64_prologues};
pub use registers::{NamedRegister, Registers};
pub use transport::RegisterTransport;
