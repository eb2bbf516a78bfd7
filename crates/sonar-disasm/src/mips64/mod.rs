//! MIPS64 instruction decoder.
//!
//! Supports the standard 32-bit encodings of:
//! - MIPS64 release 2: integer, branch-likely, HI/LO multiply/divide, COP0,
//!   COP1 and COP1X
//! - MIPS64 release 6: compact branches, PC-relative loads, the three-operand
//!   multiply/divide forms
//!
//! Decoding is table driven. Each row of [`FORMATS`] is a mask, fixed bits and
//! up to five [`OperandDescriptor`]s; see [`table`] for ordering rules.

mod decoder;
pub mod inst;
pub mod opcode;
pub mod operand;
mod options;
pub mod syntax;
pub mod table;

#[cfg(any(test, feature = "coverage"))]
pub use decoder::Coverage;
pub use decoder::Mips64Disassembler;
pub use inst::{Arg, Imm, Inst, PcRel, INSN_SIZE};
pub use opcode::Op;
pub use operand::OperandDescriptor;
pub use options::{AssemblyFlavour, IsaLevel, Mips64Options};
pub use syntax::{gnu_syntax, go_syntax, SymbolLookup};
pub use table::{validate_table, InstructionFormat, FORMATS};
