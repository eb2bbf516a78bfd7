//! Decoded MIPS64 instructions.

use sonar_core::Register;

use super::opcode::Op;

/// Size of every MIPS64 instruction in bytes.
pub const INSN_SIZE: usize = 4;

/// An immediate operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Imm {
    pub value: i64,
    /// Print in hexadecimal.
    pub hex: bool,
}

/// A PC-relative operand, kept unresolved until the instruction address is
/// known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PcRel {
    /// Sign-extended, already-shifted offset.
    pub offset: i64,
    pub align_log2: u8,
    pub include_isa: bool,
    pub flip_isa: bool,
}

impl PcRel {
    /// Applies the offset to `base_pc`.
    pub fn resolve(&self, base_pc: u64) -> u64 {
        let mut addr = base_pc & u64::MAX.checked_shl(u32::from(self.align_log2)).unwrap_or(0);
        addr = addr.wrapping_add(self.offset as u64);
        if self.include_isa {
            addr |= base_pc & 1;
        }
        if self.flip_isa {
            addr ^= 1;
        }
        addr
    }

    /// Target of this operand in an instruction at `insn_address`.
    ///
    /// Branches and jumps are relative to the delay slot; PC-relative data
    /// references are relative to the instruction itself.
    pub fn target(&self, insn_address: u64) -> u64 {
        let base = if self.include_isa {
            insn_address.wrapping_add(INSN_SIZE as u64)
        } else {
            insn_address
        };
        self.resolve(base)
    }
}

/// A decoded operand value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Arg {
    Reg(Register),
    RegPair(Register, Register),
    Imm(Imm),
    PcRel(PcRel),
}

impl Arg {
    pub fn as_reg(&self) -> Option<Register> {
        match self {
            Self::Reg(reg) => Some(*reg),
            _ => None,
        }
    }

    pub fn as_imm(&self) -> Option<i64> {
        match self {
            Self::Imm(imm) => Some(imm.value),
            _ => None,
        }
    }
}

/// Maximum number of operand slots.
pub const MAX_ARGS: usize = 5;

/// A decoded instruction.
///
/// Only the decoder builds these; a word that fails to decode yields an
/// error instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inst {
    op: Op,
    args: [Option<Arg>; MAX_ARGS],
    /// Bit `i` set: slot `i` may be dropped from rendering when it repeats
    /// slot `i - 1`.
    elidable: u8,
    word: u32,
}

impl Inst {
    pub(crate) fn new(op: Op, args: [Option<Arg>; MAX_ARGS], elidable: u8, word: u32) -> Self {
        Self {
            op,
            args,
            elidable,
            word,
        }
    }

    pub fn op(&self) -> Op {
        self.op
    }

    /// The raw encoding.
    pub fn word(&self) -> u32 {
        self.word
    }

    /// Size in bytes (always 4).
    pub fn len(&self) -> usize {
        INSN_SIZE
    }

    /// Always false; present for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// All decoded operands, in slot order.
    pub fn args(&self) -> impl Iterator<Item = &Arg> {
        self.args.iter().map_while(Option::as_ref)
    }

    /// Operand in slot `idx`.
    pub fn arg(&self, idx: usize) -> Option<&Arg> {
        self.args.get(idx)?.as_ref()
    }

    /// Operands as they are rendered: slots that repeat the register before
    /// them are dropped when their descriptor allows it.
    pub fn visible_args(&self) -> Vec<Arg> {
        let mut out: Vec<Arg> = Vec::with_capacity(MAX_ARGS);
        for (idx, arg) in self.args().enumerate() {
            let repeats = idx > 0 && self.elidable & (1 << idx) != 0 && self.args[idx - 1] == Some(*arg);
            if !repeats {
                out.push(*arg);
            }
        }
        out
    }

    /// The first PC-relative operand, if any.
    pub fn pc_rel(&self) -> Option<PcRel> {
        self.args().find_map(|arg| match arg {
            Arg::PcRel(rel) => Some(*rel),
            _ => None,
        })
    }
}
