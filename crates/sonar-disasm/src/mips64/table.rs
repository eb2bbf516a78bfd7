//! The MIPS64 format table.
//!
//! Rows are tried in order and the first one whose mask, predicate and
//! operands all match wins, so aliases (`nop`, `move`, `b`, `li`, ...) are
//! listed before the base instruction they specialise. Release 6 reuses
//! several release 2 opcodes; those rows are separated by their [`Isa`] tag
//! and, for the compact branches sharing an opcode, by register checks.

use sonar_core::RegisterClass::{
    ConditionCode as CC, Coprocessor0 as Cop0, FloatingPoint as Fp, FpControl, General, Hardware,
};

use super::opcode::Op;
use super::operand::*;
use super::options::IsaLevel;
use super::inst::MAX_ARGS;
use crate::TableError;

/// Architecture releases a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Isa {
    Any,
    R2,
    R6,
}

impl Isa {
    pub fn admits(self, level: IsaLevel) -> bool {
        match self {
            Self::Any => true,
            Self::R2 => level == IsaLevel::R2,
            Self::R6 => level == IsaLevel::R6,
        }
    }
}

/// One row of the format table.
#[derive(Debug, Clone, Copy)]
pub struct InstructionFormat {
    pub op: Op,
    /// Required bits, under `mask`.
    pub value: u32,
    pub mask: u32,
    /// Operand slots, filled from the left.
    pub operands: [Option<OperandDescriptor>; MAX_ARGS],
    pub isa: Isa,
    /// Extra condition on the word the mask cannot express.
    pub predicate: Option<fn(u32) -> bool>,
}

impl InstructionFormat {
    const fn new(op: Op, value: u32, mask: u32, operands: &[OperandDescriptor]) -> Self {
        Self {
            op,
            value,
            mask,
            operands: slots(operands),
            isa: Isa::Any,
            predicate: None,
        }
    }

    const fn r2(mut self) -> Self {
        self.isa = Isa::R2;
        self
    }

    const fn r6(mut self) -> Self {
        self.isa = Isa::R6;
        self
    }

    const fn when(mut self, predicate: fn(u32) -> bool) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Returns true if the fixed bits and the predicate accept `word`.
    pub fn matches(&self, word: u32) -> bool {
        word & self.mask == self.value && self.predicate.map_or(true, |pred| pred(word))
    }

    /// Operand slots in use.
    pub fn operands(&self) -> impl Iterator<Item = &OperandDescriptor> {
        self.operands.iter().map_while(Option::as_ref)
    }
}

const fn slots(ops: &[OperandDescriptor]) -> [Option<OperandDescriptor>; MAX_ARGS] {
    let mut out = [None; MAX_ARGS];
    let mut i = 0;
    while i < ops.len() {
        out[i] = Some(ops[i]);
        i += 1;
    }
    out
}

fn rt_nonzero(word: u32) -> bool {
    (word >> 16) & 0x1f != 0
}

fn rs_nonzero(word: u32) -> bool {
    (word >> 21) & 0x1f != 0
}

// General purpose register fields.
const RS: OperandDescriptor = reg(5, 21, General);
const RT: OperandDescriptor = reg(5, 16, General);
const RD: OperandDescriptor = reg(5, 11, General);
const BASE: OperandDescriptor = RS;
const OPT_RS: OperandDescriptor = opt_reg(5, 21, General);
const OPT_RT: OperandDescriptor = opt_reg(5, 16, General);
/// `$zero`, implied by the opcode.
const ZERO: OperandDescriptor = mapped_reg(0, 0, General, &[0]);

const SHAMT: OperandDescriptor = bit(5, 6, 0);
const SHAMT32: OperandDescriptor = bit(5, 6, 32);
const IMM16: OperandDescriptor = hint(16, 0);
const SIMM16: OperandDescriptor = sint(16, 0);
const OFF9: OperandDescriptor = sint(9, 7);
const LSA_SA: OperandDescriptor = bit(2, 6, 1);

const BRANCH: OperandDescriptor = branch(16, 0, 2);
const BRANCH21: OperandDescriptor = branch(21, 0, 2);
const BRANCH26: OperandDescriptor = branch(26, 0, 2);
const JUMP: OperandDescriptor = jump(26, 0, 2);
const JALX_TARGET: OperandDescriptor = jalx(26, 0, 2);
const PCREL19: OperandDescriptor = pcrel(19, 0, true, 2, 2, false, false);
const PCREL18: OperandDescriptor = pcrel(18, 0, true, 3, 3, false, false);

const CODE: OperandDescriptor = hint(10, 16);
const CODE2: OperandDescriptor = hint(10, 6);
const CODE19: OperandDescriptor = hint(19, 6);
const CODE20: OperandDescriptor = hint(20, 6);
const STYPE: OperandDescriptor = hint(5, 6);
const CACHE_OP: OperandDescriptor = hint(5, 16);
const SEL: OperandDescriptor = uint(3, 0);

const FD: OperandDescriptor = reg(5, 6, Fp);
const FS: OperandDescriptor = reg(5, 11, Fp);
const FT: OperandDescriptor = reg(5, 16, Fp);
const FR: OperandDescriptor = reg(5, 21, Fp);
const OPT_FS: OperandDescriptor = opt_reg(5, 11, Fp);
const FCR: OperandDescriptor = reg(5, 11, FpControl);
const COP_RD: OperandDescriptor = reg(5, 11, Cop0);
const HWR: OperandDescriptor = reg(5, 11, Hardware);
const CCC: OperandDescriptor = reg(3, 8, CC);
const BCC: OperandDescriptor = reg(3, 18, CC);

// Bitfield position and size.
const EXT_POS: OperandDescriptor = bit(5, 6, 0);
const DEXT_POS_HI: OperandDescriptor = bit(5, 6, 32);
const EXT_SIZE: OperandDescriptor = msb(5, 11, 1, false, 32);
const DEXT_SIZE: OperandDescriptor = msb(5, 11, 1, false, 64);
const DEXTM_SIZE: OperandDescriptor = msb(5, 11, 33, false, 64);
const INS_SIZE: OperandDescriptor = msb(5, 11, 1, true, 32);
const DINS_SIZE: OperandDescriptor = msb(5, 11, 1, true, 64);
const DINSM_SIZE: OperandDescriptor = msb(5, 11, 33, true, 64);

// rt checked against rs, for the release 6 compact branches.
const RT_GT_PREV: OperandDescriptor = prev_check(5, 16, true, false, false, false);
const RT_NE_PREV: OperandDescriptor = prev_check(5, 16, true, true, false, false);
const RT_LE_PREV: OperandDescriptor = prev_check(5, 16, false, true, true, true);
const RT_EQ_NZ: OperandDescriptor = prev_check(5, 16, false, false, true, false);
// rt checked against rd (release 2 clz/clo).
const RT_EQ_Z: OperandDescriptor = prev_check(5, 16, false, false, true, true);

use InstructionFormat as F;

/// The standard 32-bit MIPS64 encodings.
pub static FORMATS: &[InstructionFormat] = &[
    // SPECIAL
    F::new(Op::Nop, 0x0000_0000, 0xffff_ffff, &[]),
    F::new(Op::Ssnop, 0x0000_0040, 0xffff_ffff, &[]),
    F::new(Op::Ehb, 0x0000_00c0, 0xffff_ffff, &[]),
    F::new(Op::Sll, 0x0000_0000, 0xffe0_003f, &[RD, OPT_RT, SHAMT]),
    F::new(Op::Rotr, 0x0020_0002, 0xffe0_003f, &[RD, OPT_RT, SHAMT]),
    F::new(Op::Srl, 0x0000_0002, 0xffe0_003f, &[RD, OPT_RT, SHAMT]),
    F::new(Op::Sra, 0x0000_0003, 0xffe0_003f, &[RD, OPT_RT, SHAMT]),
    F::new(Op::Sllv, 0x0000_0004, 0xfc00_07ff, &[RD, OPT_RT, RS]),
    F::new(Op::Lsa, 0x0000_0005, 0xfc00_073f, &[RD, RS, RT, LSA_SA]).r6(),
    F::new(Op::Rotrv, 0x0000_0046, 0xfc00_07ff, &[RD, OPT_RT, RS]),
    F::new(Op::Srlv, 0x0000_0006, 0xfc00_07ff, &[RD, OPT_RT, RS]),
    F::new(Op::Srav, 0x0000_0007, 0xfc00_07ff, &[RD, OPT_RT, RS]),
    F::new(Op::Jr, 0x0000_0009, 0xfc1f_ffff, &[RS]).r6(),
    F::new(Op::JrHb, 0x0000_0409, 0xfc1f_ffff, &[RS]).r6(),
    F::new(Op::Jr, 0x0000_0008, 0xfc1f_ffff, &[RS]).r2(),
    F::new(Op::JrHb, 0x0000_0408, 0xfc1f_ffff, &[RS]).r2(),
    F::new(Op::Jalr, 0x0000_f809, 0xfc1f_ffff, &[RS]),
    F::new(Op::JalrHb, 0x0000_fc09, 0xfc1f_ffff, &[RS]),
    F::new(Op::Jalr, 0x0000_0009, 0xfc1f_07ff, &[RD, RS]),
    F::new(Op::JalrHb, 0x0000_0409, 0xfc1f_07ff, &[RD, RS]),
    F::new(Op::Movz, 0x0000_000a, 0xfc00_07ff, &[RD, RS, RT]).r2(),
    F::new(Op::Movn, 0x0000_000b, 0xfc00_07ff, &[RD, RS, RT]).r2(),
    F::new(Op::Syscall, 0x0000_000c, 0xffff_ffff, &[]),
    F::new(Op::Syscall, 0x0000_000c, 0xfc00_003f, &[CODE20]),
    F::new(Op::Break, 0x0000_000d, 0xffff_ffff, &[]),
    F::new(Op::Break, 0x0000_000d, 0xfc00_ffff, &[CODE]),
    F::new(Op::Break, 0x0000_000d, 0xfc00_003f, &[CODE, CODE2]),
    F::new(Op::Sync, 0x0000_000f, 0xffff_ffff, &[]),
    F::new(Op::Sync, 0x0000_000f, 0xffff_f83f, &[STYPE]),
    F::new(Op::Mfhi, 0x0000_0010, 0xffff_07ff, &[RD]).r2(),
    F::new(Op::Mthi, 0x0000_0011, 0xfc1f_ffff, &[RS]).r2(),
    F::new(Op::Mflo, 0x0000_0012, 0xffff_07ff, &[RD]).r2(),
    F::new(Op::Mtlo, 0x0000_0013, 0xfc1f_ffff, &[RS]).r2(),
    F::new(Op::Clz, 0x0000_0050, 0xfc1f_07ff, &[RD, RS]).r6(),
    F::new(Op::Clo, 0x0000_0051, 0xfc1f_07ff, &[RD, RS]).r6(),
    F::new(Op::Dclz, 0x0000_0052, 0xfc1f_07ff, &[RD, RS]).r6(),
    F::new(Op::Dclo, 0x0000_0053, 0xfc1f_07ff, &[RD, RS]).r6(),
    F::new(Op::Dsllv, 0x0000_0014, 0xfc00_07ff, &[RD, OPT_RT, RS]),
    F::new(Op::Dlsa, 0x0000_0015, 0xfc00_073f, &[RD, RS, RT, LSA_SA]).r6(),
    F::new(Op::Drotrv, 0x0000_0056, 0xfc00_07ff, &[RD, OPT_RT, RS]),
    F::new(Op::Dsrlv, 0x0000_0016, 0xfc00_07ff, &[RD, OPT_RT, RS]),
    F::new(Op::Dsrav, 0x0000_0017, 0xfc00_07ff, &[RD, OPT_RT, RS]),
    F::new(Op::Mult, 0x0000_0018, 0xfc00_ffff, &[RS, RT]).r2(),
    F::new(Op::Multu, 0x0000_0019, 0xfc00_ffff, &[RS, RT]).r2(),
    F::new(Op::Div, 0x0000_001a, 0xfc00_ffff, &[ZERO, RS, RT]).r2(),
    F::new(Op::Divu, 0x0000_001b, 0xfc00_ffff, &[ZERO, RS, RT]).r2(),
    F::new(Op::Mul, 0x0000_0098, 0xfc00_07ff, &[RD, RS, RT]).r6(),
    F::new(Op::Muh, 0x0000_00d8, 0xfc00_07ff, &[RD, RS, RT]).r6(),
    F::new(Op::Mulu, 0x0000_0099, 0xfc00_07ff, &[RD, RS, RT]).r6(),
    F::new(Op::Muhu, 0x0000_00d9, 0xfc00_07ff, &[RD, RS, RT]).r6(),
    F::new(Op::Div, 0x0000_009a, 0xfc00_07ff, &[RD, RS, RT]).r6(),
    F::new(Op::Mod, 0x0000_00da, 0xfc00_07ff, &[RD, RS, RT]).r6(),
    F::new(Op::Divu, 0x0000_009b, 0xfc00_07ff, &[RD, RS, RT]).r6(),
    F::new(Op::Modu, 0x0000_00db, 0xfc00_07ff, &[RD, RS, RT]).r6(),
    F::new(Op::Dmul, 0x0000_009c, 0xfc00_07ff, &[RD, RS, RT]).r6(),
    F::new(Op::Dmuh, 0x0000_00dc, 0xfc00_07ff, &[RD, RS, RT]).r6(),
    F::new(Op::Dmulu, 0x0000_009d, 0xfc00_07ff, &[RD, RS, RT]).r6(),
    F::new(Op::Dmuhu, 0x0000_00dd, 0xfc00_07ff, &[RD, RS, RT]).r6(),
    F::new(Op::Ddiv, 0x0000_009e, 0xfc00_07ff, &[RD, RS, RT]).r6(),
    F::new(Op::Dmod, 0x0000_00de, 0xfc00_07ff, &[RD, RS, RT]).r6(),
    F::new(Op::Ddivu, 0x0000_009f, 0xfc00_07ff, &[RD, RS, RT]).r6(),
    F::new(Op::Dmodu, 0x0000_00df, 0xfc00_07ff, &[RD, RS, RT]).r6(),
    F::new(Op::Dmult, 0x0000_001c, 0xfc00_ffff, &[RS, RT]).r2(),
    F::new(Op::Dmultu, 0x0000_001d, 0xfc00_ffff, &[RS, RT]).r2(),
    F::new(Op::Ddiv, 0x0000_001e, 0xfc00_ffff, &[ZERO, RS, RT]).r2(),
    F::new(Op::Ddivu, 0x0000_001f, 0xfc00_ffff, &[ZERO, RS, RT]).r2(),
    F::new(Op::Add, 0x0000_0020, 0xfc00_07ff, &[RD, RS, RT]),
    F::new(Op::Move, 0x0000_0021, 0xfc1f_07ff, &[RD, RS]),
    F::new(Op::Move, 0x0000_0021, 0xffe0_07ff, &[RD, RT]),
    F::new(Op::Addu, 0x0000_0021, 0xfc00_07ff, &[RD, RS, RT]),
    F::new(Op::Neg, 0x0000_0022, 0xffe0_07ff, &[RD, OPT_RT]),
    F::new(Op::Sub, 0x0000_0022, 0xfc00_07ff, &[RD, RS, RT]),
    F::new(Op::Negu, 0x0000_0023, 0xffe0_07ff, &[RD, OPT_RT]),
    F::new(Op::Subu, 0x0000_0023, 0xfc00_07ff, &[RD, RS, RT]),
    F::new(Op::And, 0x0000_0024, 0xfc00_07ff, &[RD, RS, RT]),
    F::new(Op::Move, 0x0000_0025, 0xfc1f_07ff, &[RD, RS]),
    F::new(Op::Move, 0x0000_0025, 0xffe0_07ff, &[RD, RT]),
    F::new(Op::Or, 0x0000_0025, 0xfc00_07ff, &[RD, RS, RT]),
    F::new(Op::Xor, 0x0000_0026, 0xfc00_07ff, &[RD, RS, RT]),
    F::new(Op::Not, 0x0000_0027, 0xfc1f_07ff, &[RD, OPT_RS]),
    F::new(Op::Nor, 0x0000_0027, 0xfc00_07ff, &[RD, RS, RT]),
    F::new(Op::Slt, 0x0000_002a, 0xfc00_07ff, &[RD, RS, RT]),
    F::new(Op::Sltu, 0x0000_002b, 0xfc00_07ff, &[RD, RS, RT]),
    F::new(Op::Dadd, 0x0000_002c, 0xfc00_07ff, &[RD, RS, RT]),
    F::new(Op::Move, 0x0000_002d, 0xfc1f_07ff, &[RD, RS]),
    F::new(Op::Move, 0x0000_002d, 0xffe0_07ff, &[RD, RT]),
    F::new(Op::Daddu, 0x0000_002d, 0xfc00_07ff, &[RD, RS, RT]),
    F::new(Op::Dneg, 0x0000_002e, 0xffe0_07ff, &[RD, OPT_RT]),
    F::new(Op::Dsub, 0x0000_002e, 0xfc00_07ff, &[RD, RS, RT]),
    F::new(Op::Dnegu, 0x0000_002f, 0xffe0_07ff, &[RD, OPT_RT]),
    F::new(Op::Dsubu, 0x0000_002f, 0xfc00_07ff, &[RD, RS, RT]),
    F::new(Op::Tge, 0x0000_0030, 0xfc00_ffff, &[RS, RT]),
    F::new(Op::Tge, 0x0000_0030, 0xfc00_003f, &[RS, RT, CODE2]),
    F::new(Op::Tgeu, 0x0000_0031, 0xfc00_ffff, &[RS, RT]),
    F::new(Op::Tgeu, 0x0000_0031, 0xfc00_003f, &[RS, RT, CODE2]),
    F::new(Op::Tlt, 0x0000_0032, 0xfc00_ffff, &[RS, RT]),
    F::new(Op::Tlt, 0x0000_0032, 0xfc00_003f, &[RS, RT, CODE2]),
    F::new(Op::Tltu, 0x0000_0033, 0xfc00_ffff, &[RS, RT]),
    F::new(Op::Tltu, 0x0000_0033, 0xfc00_003f, &[RS, RT, CODE2]),
    F::new(Op::Teq, 0x0000_0034, 0xfc00_ffff, &[RS, RT]),
    F::new(Op::Teq, 0x0000_0034, 0xfc00_003f, &[RS, RT, CODE2]),
    F::new(Op::Seleqz, 0x0000_0035, 0xfc00_07ff, &[RD, RS, RT]).r6(),
    F::new(Op::Tne, 0x0000_0036, 0xfc00_ffff, &[RS, RT]),
    F::new(Op::Tne, 0x0000_0036, 0xfc00_003f, &[RS, RT, CODE2]),
    F::new(Op::Selnez, 0x0000_0037, 0xfc00_07ff, &[RD, RS, RT]).r6(),
    F::new(Op::Dsll, 0x0000_0038, 0xffe0_003f, &[RD, OPT_RT, SHAMT]),
    F::new(Op::Drotr, 0x0020_003a, 0xffe0_003f, &[RD, OPT_RT, SHAMT]),
    F::new(Op::Dsrl, 0x0000_003a, 0xffe0_003f, &[RD, OPT_RT, SHAMT]),
    F::new(Op::Dsra, 0x0000_003b, 0xffe0_003f, &[RD, OPT_RT, SHAMT]),
    F::new(Op::Dsll32, 0x0000_003c, 0xffe0_003f, &[RD, OPT_RT, SHAMT32]),
    F::new(Op::Drotr32, 0x0020_003e, 0xffe0_003f, &[RD, OPT_RT, SHAMT32]),
    F::new(Op::Dsrl32, 0x0000_003e, 0xffe0_003f, &[RD, OPT_RT, SHAMT32]),
    F::new(Op::Dsra32, 0x0000_003f, 0xffe0_003f, &[RD, OPT_RT, SHAMT32]),
    // REGIMM
    F::new(Op::B, 0x0401_0000, 0xffff_0000, &[BRANCH]),
    F::new(Op::Bal, 0x0411_0000, 0xffff_0000, &[BRANCH]),
    F::new(Op::Nal, 0x0410_0000, 0xffff_ffff, &[]),
    F::new(Op::Bltz, 0x0400_0000, 0xfc1f_0000, &[RS, BRANCH]),
    F::new(Op::Bgez, 0x0401_0000, 0xfc1f_0000, &[RS, BRANCH]),
    F::new(Op::Bltzl, 0x0402_0000, 0xfc1f_0000, &[RS, BRANCH]).r2(),
    F::new(Op::Bgezl, 0x0403_0000, 0xfc1f_0000, &[RS, BRANCH]).r2(),
    F::new(Op::Dahi, 0x0406_0000, 0xfc1f_0000, &[RS, IMM16]).r6(),
    F::new(Op::Tgei, 0x0408_0000, 0xfc1f_0000, &[RS, SIMM16]).r2(),
    F::new(Op::Tgeiu, 0x0409_0000, 0xfc1f_0000, &[RS, SIMM16]).r2(),
    F::new(Op::Tlti, 0x040a_0000, 0xfc1f_0000, &[RS, SIMM16]).r2(),
    F::new(Op::Tltiu, 0x040b_0000, 0xfc1f_0000, &[RS, SIMM16]).r2(),
    F::new(Op::Teqi, 0x040c_0000, 0xfc1f_0000, &[RS, SIMM16]).r2(),
    F::new(Op::Tnei, 0x040e_0000, 0xfc1f_0000, &[RS, SIMM16]).r2(),
    F::new(Op::Bltzal, 0x0410_0000, 0xfc1f_0000, &[RS, BRANCH]).r2(),
    F::new(Op::Bgezal, 0x0411_0000, 0xfc1f_0000, &[RS, BRANCH]).r2(),
    F::new(Op::Bltzall, 0x0412_0000, 0xfc1f_0000, &[RS, BRANCH]).r2(),
    F::new(Op::Bgezall, 0x0413_0000, 0xfc1f_0000, &[RS, BRANCH]).r2(),
    F::new(Op::Dati, 0x041e_0000, 0xfc1f_0000, &[RS, IMM16]).r6(),
    F::new(Op::Synci, 0x041f_0000, 0xfc1f_0000, &[SIMM16, BASE]),
    // Jumps and branches
    F::new(Op::J, 0x0800_0000, 0xfc00_0000, &[JUMP]),
    F::new(Op::Jal, 0x0c00_0000, 0xfc00_0000, &[JUMP]),
    F::new(Op::B, 0x1000_0000, 0xffff_0000, &[BRANCH]),
    F::new(Op::Beqz, 0x1000_0000, 0xfc1f_0000, &[RS, BRANCH]),
    F::new(Op::Beq, 0x1000_0000, 0xfc00_0000, &[RS, RT, BRANCH]),
    F::new(Op::Bnez, 0x1400_0000, 0xfc1f_0000, &[RS, BRANCH]),
    F::new(Op::Bne, 0x1400_0000, 0xfc00_0000, &[RS, RT, BRANCH]),
    F::new(Op::Blez, 0x1800_0000, 0xfc1f_0000, &[RS, BRANCH]),
    F::new(Op::Blezalc, 0x1800_0000, 0xffe0_0000, &[RT, BRANCH]).r6(),
    F::new(Op::Bgezalc, 0x1800_0000, 0xfc00_0000, &[RS, RT_EQ_NZ, BRANCH]).r6(),
    F::new(Op::Bgeuc, 0x1800_0000, 0xfc00_0000, &[RS, RT_NE_PREV, BRANCH]).r6(),
    F::new(Op::Bgtz, 0x1c00_0000, 0xfc1f_0000, &[RS, BRANCH]),
    F::new(Op::Bgtzalc, 0x1c00_0000, 0xffe0_0000, &[RT, BRANCH]).r6(),
    F::new(Op::Bltzalc, 0x1c00_0000, 0xfc00_0000, &[RS, RT_EQ_NZ, BRANCH]).r6(),
    F::new(Op::Bltuc, 0x1c00_0000, 0xfc00_0000, &[RS, RT_NE_PREV, BRANCH]).r6(),
    F::new(Op::Addi, 0x2000_0000, 0xfc00_0000, &[RT, RS, SIMM16]).r2(),
    F::new(Op::Bovc, 0x2000_0000, 0xfc00_0000, &[RS, RT_LE_PREV, BRANCH]).r6(),
    F::new(Op::Beqzalc, 0x2000_0000, 0xffe0_0000, &[RT, BRANCH]).r6(),
    F::new(Op::Beqc, 0x2000_0000, 0xfc00_0000, &[RS, RT_GT_PREV, BRANCH]).r6(),
    // Immediate ALU
    F::new(Op::Li, 0x2400_0000, 0xffe0_0000, &[RT, SIMM16]),
    F::new(Op::Addiu, 0x2400_0000, 0xfc00_0000, &[RT, RS, SIMM16]),
    F::new(Op::Slti, 0x2800_0000, 0xfc00_0000, &[RT, RS, SIMM16]),
    F::new(Op::Sltiu, 0x2c00_0000, 0xfc00_0000, &[RT, RS, SIMM16]),
    F::new(Op::Andi, 0x3000_0000, 0xfc00_0000, &[RT, RS, IMM16]),
    F::new(Op::Li, 0x3400_0000, 0xffe0_0000, &[RT, IMM16]),
    F::new(Op::Ori, 0x3400_0000, 0xfc00_0000, &[RT, RS, IMM16]),
    F::new(Op::Xori, 0x3800_0000, 0xfc00_0000, &[RT, OPT_RS, IMM16]),
    F::new(Op::Lui, 0x3c00_0000, 0xffe0_0000, &[RT, IMM16]),
    F::new(Op::Aui, 0x3c00_0000, 0xfc00_0000, &[RT, RS, IMM16]).r6(),
    // COP0
    F::new(Op::Mfc0, 0x4000_0000, 0xffe0_07ff, &[RT, COP_RD]),
    F::new(Op::Mfc0, 0x4000_0000, 0xffe0_07f8, &[RT, COP_RD, SEL]),
    F::new(Op::Dmfc0, 0x4020_0000, 0xffe0_07ff, &[RT, COP_RD]),
    F::new(Op::Dmfc0, 0x4020_0000, 0xffe0_07f8, &[RT, COP_RD, SEL]),
    F::new(Op::Mtc0, 0x4080_0000, 0xffe0_07ff, &[RT, COP_RD]),
    F::new(Op::Mtc0, 0x4080_0000, 0xffe0_07f8, &[RT, COP_RD, SEL]),
    F::new(Op::Dmtc0, 0x40a0_0000, 0xffe0_07ff, &[RT, COP_RD]),
    F::new(Op::Dmtc0, 0x40a0_0000, 0xffe0_07f8, &[RT, COP_RD, SEL]),
    F::new(Op::Di, 0x4160_6000, 0xffe0_ffff, &[RT]),
    F::new(Op::Ei, 0x4160_6020, 0xffe0_ffff, &[RT]),
    F::new(Op::Tlbr, 0x4200_0001, 0xffff_ffff, &[]),
    F::new(Op::Tlbwi, 0x4200_0002, 0xffff_ffff, &[]),
    F::new(Op::Tlbwr, 0x4200_0006, 0xffff_ffff, &[]),
    F::new(Op::Tlbp, 0x4200_0008, 0xffff_ffff, &[]),
    F::new(Op::Eret, 0x4200_0018, 0xffff_ffff, &[]),
    F::new(Op::Deret, 0x4200_001f, 0xffff_ffff, &[]),
    F::new(Op::Wait, 0x4200_0020, 0xffff_ffff, &[]),
    F::new(Op::Wait, 0x4200_0020, 0xfe00_003f, &[CODE19]),
    // COP1
    F::new(Op::Mfc1, 0x4400_0000, 0xffe0_07ff, &[RT, FS]),
    F::new(Op::Dmfc1, 0x4420_0000, 0xffe0_07ff, &[RT, FS]),
    F::new(Op::Cfc1, 0x4440_0000, 0xffe0_07ff, &[RT, FCR]),
    F::new(Op::Mfhc1, 0x4460_0000, 0xffe0_07ff, &[RT, FS]),
    F::new(Op::Mtc1, 0x4480_0000, 0xffe0_07ff, &[RT, FS]),
    F::new(Op::Dmtc1, 0x44a0_0000, 0xffe0_07ff, &[RT, FS]),
    F::new(Op::Ctc1, 0x44c0_0000, 0xffe0_07ff, &[RT, FCR]),
    F::new(Op::Mthc1, 0x44e0_0000, 0xffe0_07ff, &[RT, FS]),
    F::new(Op::Bc1f, 0x4500_0000, 0xffff_0000, &[BRANCH]).r2(),
    F::new(Op::Bc1f, 0x4500_0000, 0xffe3_0000, &[BCC, BRANCH]).r2(),
    F::new(Op::Bc1t, 0x4501_0000, 0xffff_0000, &[BRANCH]).r2(),
    F::new(Op::Bc1t, 0x4501_0000, 0xffe3_0000, &[BCC, BRANCH]).r2(),
    F::new(Op::Bc1fl, 0x4502_0000, 0xffff_0000, &[BRANCH]).r2(),
    F::new(Op::Bc1fl, 0x4502_0000, 0xffe3_0000, &[BCC, BRANCH]).r2(),
    F::new(Op::Bc1tl, 0x4503_0000, 0xffff_0000, &[BRANCH]).r2(),
    F::new(Op::Bc1tl, 0x4503_0000, 0xffe3_0000, &[BCC, BRANCH]).r2(),
    F::new(Op::Bc1eqz, 0x4520_0000, 0xffe0_0000, &[FT, BRANCH]).r6(),
    F::new(Op::Bc1nez, 0x45a0_0000, 0xffe0_0000, &[FT, BRANCH]).r6(),
    F::new(Op::AddS, 0x4600_0000, 0xffe0_003f, &[FD, OPT_FS, FT]),
    F::new(Op::AddD, 0x4620_0000, 0xffe0_003f, &[FD, OPT_FS, FT]),
    F::new(Op::SubS, 0x4600_0001, 0xffe0_003f, &[FD, OPT_FS, FT]),
    F::new(Op::SubD, 0x4620_0001, 0xffe0_003f, &[FD, OPT_FS, FT]),
    F::new(Op::MulS, 0x4600_0002, 0xffe0_003f, &[FD, OPT_FS, FT]),
    F::new(Op::MulD, 0x4620_0002, 0xffe0_003f, &[FD, OPT_FS, FT]),
    F::new(Op::DivS, 0x4600_0003, 0xffe0_003f, &[FD, OPT_FS, FT]),
    F::new(Op::DivD, 0x4620_0003, 0xffe0_003f, &[FD, OPT_FS, FT]),
    F::new(Op::SqrtS, 0x4600_0004, 0xffff_003f, &[FD, FS]),
    F::new(Op::SqrtD, 0x4620_0004, 0xffff_003f, &[FD, FS]),
    F::new(Op::AbsS, 0x4600_0005, 0xffff_003f, &[FD, FS]),
    F::new(Op::AbsD, 0x4620_0005, 0xffff_003f, &[FD, FS]),
    F::new(Op::MovS, 0x4600_0006, 0xffff_003f, &[FD, FS]),
    F::new(Op::MovD, 0x4620_0006, 0xffff_003f, &[FD, FS]),
    F::new(Op::NegS, 0x4600_0007, 0xffff_003f, &[FD, FS]),
    F::new(Op::NegD, 0x4620_0007, 0xffff_003f, &[FD, FS]),
    F::new(Op::TruncLS, 0x4600_0009, 0xffff_003f, &[FD, FS]),
    F::new(Op::TruncLD, 0x4620_0009, 0xffff_003f, &[FD, FS]),
    F::new(Op::TruncWS, 0x4600_000d, 0xffff_003f, &[FD, FS]),
    F::new(Op::TruncWD, 0x4620_000d, 0xffff_003f, &[FD, FS]),
    F::new(Op::CvtSD, 0x4620_0020, 0xffff_003f, &[FD, FS]),
    F::new(Op::CvtSW, 0x4680_0020, 0xffff_003f, &[FD, FS]),
    F::new(Op::CvtSL, 0x46a0_0020, 0xffff_003f, &[FD, FS]),
    F::new(Op::CvtDS, 0x4600_0021, 0xffff_003f, &[FD, FS]),
    F::new(Op::CvtDW, 0x4680_0021, 0xffff_003f, &[FD, FS]),
    F::new(Op::CvtDL, 0x46a0_0021, 0xffff_003f, &[FD, FS]),
    F::new(Op::CvtWS, 0x4600_0024, 0xffff_003f, &[FD, FS]),
    F::new(Op::CvtWD, 0x4620_0024, 0xffff_003f, &[FD, FS]),
    F::new(Op::CvtLS, 0x4600_0025, 0xffff_003f, &[FD, FS]),
    F::new(Op::CvtLD, 0x4620_0025, 0xffff_003f, &[FD, FS]),
    F::new(Op::CEqS, 0x4600_0032, 0xffe0_07ff, &[FS, FT]).r2(),
    F::new(Op::CEqS, 0x4600_0032, 0xffe0_00ff, &[CCC, FS, FT]).r2(),
    F::new(Op::CEqD, 0x4620_0032, 0xffe0_07ff, &[FS, FT]).r2(),
    F::new(Op::CEqD, 0x4620_0032, 0xffe0_00ff, &[CCC, FS, FT]).r2(),
    F::new(Op::CLtS, 0x4600_003c, 0xffe0_07ff, &[FS, FT]).r2(),
    F::new(Op::CLtS, 0x4600_003c, 0xffe0_00ff, &[CCC, FS, FT]).r2(),
    F::new(Op::CLtD, 0x4620_003c, 0xffe0_07ff, &[FS, FT]).r2(),
    F::new(Op::CLtD, 0x4620_003c, 0xffe0_00ff, &[CCC, FS, FT]).r2(),
    F::new(Op::CLeS, 0x4600_003e, 0xffe0_07ff, &[FS, FT]).r2(),
    F::new(Op::CLeS, 0x4600_003e, 0xffe0_00ff, &[CCC, FS, FT]).r2(),
    F::new(Op::CLeD, 0x4620_003e, 0xffe0_07ff, &[FS, FT]).r2(),
    F::new(Op::CLeD, 0x4620_003e, 0xffe0_00ff, &[CCC, FS, FT]).r2(),
    F::new(Op::CmpUnS, 0x4680_0001, 0xffe0_003f, &[FD, FS, FT]).r6(),
    F::new(Op::CmpEqS, 0x4680_0002, 0xffe0_003f, &[FD, FS, FT]).r6(),
    F::new(Op::CmpLtS, 0x4680_0004, 0xffe0_003f, &[FD, FS, FT]).r6(),
    F::new(Op::CmpLeS, 0x4680_0006, 0xffe0_003f, &[FD, FS, FT]).r6(),
    F::new(Op::CmpUnD, 0x46a0_0001, 0xffe0_003f, &[FD, FS, FT]).r6(),
    F::new(Op::CmpEqD, 0x46a0_0002, 0xffe0_003f, &[FD, FS, FT]).r6(),
    F::new(Op::CmpLtD, 0x46a0_0004, 0xffe0_003f, &[FD, FS, FT]).r6(),
    F::new(Op::CmpLeD, 0x46a0_0006, 0xffe0_003f, &[FD, FS, FT]).r6(),
    // COP1X
    F::new(Op::MaddS, 0x4c00_0020, 0xfc00_003f, &[FD, FR, FS, FT]).r2(),
    F::new(Op::MaddD, 0x4c00_0021, 0xfc00_003f, &[FD, FR, FS, FT]).r2(),
    F::new(Op::MsubS, 0x4c00_0028, 0xfc00_003f, &[FD, FR, FS, FT]).r2(),
    F::new(Op::MsubD, 0x4c00_0029, 0xfc00_003f, &[FD, FR, FS, FT]).r2(),
    // Branch likely (release 2) and the compact branches that replace them
    F::new(Op::Beqzl, 0x5000_0000, 0xfc1f_0000, &[RS, BRANCH]).r2(),
    F::new(Op::Beql, 0x5000_0000, 0xfc00_0000, &[RS, RT, BRANCH]).r2(),
    F::new(Op::Bnezl, 0x5400_0000, 0xfc1f_0000, &[RS, BRANCH]).r2(),
    F::new(Op::Bnel, 0x5400_0000, 0xfc00_0000, &[RS, RT, BRANCH]).r2(),
    F::new(Op::Blezl, 0x5800_0000, 0xfc1f_0000, &[RS, BRANCH]).r2(),
    F::new(Op::Blezc, 0x5800_0000, 0xffe0_0000, &[RT, BRANCH]).r6().when(rt_nonzero),
    F::new(Op::Bgezc, 0x5800_0000, 0xfc00_0000, &[RS, RT_EQ_NZ, BRANCH]).r6(),
    F::new(Op::Bgec, 0x5800_0000, 0xfc00_0000, &[RS, RT_NE_PREV, BRANCH]).r6(),
    F::new(Op::Bgtzl, 0x5c00_0000, 0xfc1f_0000, &[RS, BRANCH]).r2(),
    F::new(Op::Bgtzc, 0x5c00_0000, 0xffe0_0000, &[RT, BRANCH]).r6().when(rt_nonzero),
    F::new(Op::Bltzc, 0x5c00_0000, 0xfc00_0000, &[RS, RT_EQ_NZ, BRANCH]).r6(),
    F::new(Op::Bltc, 0x5c00_0000, 0xfc00_0000, &[RS, RT_NE_PREV, BRANCH]).r6(),
    F::new(Op::Daddi, 0x6000_0000, 0xfc00_0000, &[RT, RS, SIMM16]).r2(),
    F::new(Op::Bnvc, 0x6000_0000, 0xfc00_0000, &[RS, RT_LE_PREV, BRANCH]).r6(),
    F::new(Op::Bnezalc, 0x6000_0000, 0xffe0_0000, &[RT, BRANCH]).r6(),
    F::new(Op::Bnec, 0x6000_0000, 0xfc00_0000, &[RS, RT_GT_PREV, BRANCH]).r6(),
    F::new(Op::Daddiu, 0x6400_0000, 0xfc00_0000, &[RT, RS, SIMM16]),
    F::new(Op::Ldl, 0x6800_0000, 0xfc00_0000, &[RT, SIMM16, BASE]).r2(),
    F::new(Op::Ldr, 0x6c00_0000, 0xfc00_0000, &[RT, SIMM16, BASE]).r2(),
    // SPECIAL2 (release 2)
    F::new(Op::Madd, 0x7000_0000, 0xfc00_ffff, &[RS, RT]).r2(),
    F::new(Op::Maddu, 0x7000_0001, 0xfc00_ffff, &[RS, RT]).r2(),
    F::new(Op::Mul, 0x7000_0002, 0xfc00_07ff, &[RD, RS, RT]).r2(),
    F::new(Op::Msub, 0x7000_0004, 0xfc00_ffff, &[RS, RT]).r2(),
    F::new(Op::Msubu, 0x7000_0005, 0xfc00_ffff, &[RS, RT]).r2(),
    F::new(Op::Clz, 0x7000_0020, 0xfc00_07ff, &[RD, RT_EQ_Z, RS]).r2(),
    F::new(Op::Clo, 0x7000_0021, 0xfc00_07ff, &[RD, RT_EQ_Z, RS]).r2(),
    F::new(Op::Dclz, 0x7000_0024, 0xfc00_07ff, &[RD, RT_EQ_Z, RS]).r2(),
    F::new(Op::Dclo, 0x7000_0025, 0xfc00_07ff, &[RD, RT_EQ_Z, RS]).r2(),
    F::new(Op::Sdbbp, 0x7000_003f, 0xffff_ffff, &[]).r2(),
    F::new(Op::Sdbbp, 0x7000_003f, 0xfc00_003f, &[CODE20]).r2(),
    F::new(Op::Jalx, 0x7400_0000, 0xfc00_0000, &[JALX_TARGET]).r2(),
    F::new(Op::Daui, 0x7400_0000, 0xfc00_0000, &[RT, RS, IMM16]).r6().when(rs_nonzero),
    // SPECIAL3
    F::new(Op::Ext, 0x7c00_0000, 0xfc00_003f, &[RT, RS, EXT_POS, EXT_SIZE]),
    F::new(Op::Dextm, 0x7c00_0001, 0xfc00_003f, &[RT, RS, EXT_POS, DEXTM_SIZE]),
    F::new(Op::Dextu, 0x7c00_0002, 0xfc00_003f, &[RT, RS, DEXT_POS_HI, DEXT_SIZE]),
    F::new(Op::Dext, 0x7c00_0003, 0xfc00_003f, &[RT, RS, EXT_POS, DEXT_SIZE]),
    F::new(Op::Ins, 0x7c00_0004, 0xfc00_003f, &[RT, RS, EXT_POS, INS_SIZE]),
    F::new(Op::Dinsm, 0x7c00_0005, 0xfc00_003f, &[RT, RS, EXT_POS, DINSM_SIZE]),
    F::new(Op::Dinsu, 0x7c00_0006, 0xfc00_003f, &[RT, RS, DEXT_POS_HI, DINSM_SIZE]),
    F::new(Op::Dins, 0x7c00_0007, 0xfc00_003f, &[RT, RS, EXT_POS, DINS_SIZE]),
    F::new(Op::Cache, 0x7c00_0025, 0xfc00_007f, &[CACHE_OP, OFF9, BASE]).r6(),
    F::new(Op::Sc, 0x7c00_0026, 0xfc00_007f, &[RT, OFF9, BASE]).r6(),
    F::new(Op::Scd, 0x7c00_0027, 0xfc00_007f, &[RT, OFF9, BASE]).r6(),
    F::new(Op::Pref, 0x7c00_0035, 0xfc00_007f, &[CACHE_OP, OFF9, BASE]).r6(),
    F::new(Op::Ll, 0x7c00_0036, 0xfc00_007f, &[RT, OFF9, BASE]).r6(),
    F::new(Op::Lld, 0x7c00_0037, 0xfc00_007f, &[RT, OFF9, BASE]).r6(),
    F::new(Op::Wsbh, 0x7c00_00a0, 0xffe0_07ff, &[RD, RT]),
    F::new(Op::Seb, 0x7c00_0420, 0xffe0_07ff, &[RD, RT]),
    F::new(Op::Seh, 0x7c00_0620, 0xffe0_07ff, &[RD, RT]),
    F::new(Op::Dsbh, 0x7c00_00a4, 0xffe0_07ff, &[RD, RT]),
    F::new(Op::Dshd, 0x7c00_0164, 0xffe0_07ff, &[RD, RT]),
    F::new(Op::Rdhwr, 0x7c00_003b, 0xffe0_07ff, &[RT, HWR]),
    // Loads and stores
    F::new(Op::Lb, 0x8000_0000, 0xfc00_0000, &[RT, SIMM16, BASE]),
    F::new(Op::Lh, 0x8400_0000, 0xfc00_0000, &[RT, SIMM16, BASE]),
    F::new(Op::Lwl, 0x8800_0000, 0xfc00_0000, &[RT, SIMM16, BASE]).r2(),
    F::new(Op::Lw, 0x8c00_0000, 0xfc00_0000, &[RT, SIMM16, BASE]),
    F::new(Op::Lbu, 0x9000_0000, 0xfc00_0000, &[RT, SIMM16, BASE]),
    F::new(Op::Lhu, 0x9400_0000, 0xfc00_0000, &[RT, SIMM16, BASE]),
    F::new(Op::Lwr, 0x9800_0000, 0xfc00_0000, &[RT, SIMM16, BASE]).r2(),
    F::new(Op::Lwu, 0x9c00_0000, 0xfc00_0000, &[RT, SIMM16, BASE]),
    F::new(Op::Sb, 0xa000_0000, 0xfc00_0000, &[RT, SIMM16, BASE]),
    F::new(Op::Sh, 0xa400_0000, 0xfc00_0000, &[RT, SIMM16, BASE]),
    F::new(Op::Swl, 0xa800_0000, 0xfc00_0000, &[RT, SIMM16, BASE]).r2(),
    F::new(Op::Sw, 0xac00_0000, 0xfc00_0000, &[RT, SIMM16, BASE]),
    F::new(Op::Sdl, 0xb000_0000, 0xfc00_0000, &[RT, SIMM16, BASE]).r2(),
    F::new(Op::Sdr, 0xb400_0000, 0xfc00_0000, &[RT, SIMM16, BASE]).r2(),
    F::new(Op::Swr, 0xb800_0000, 0xfc00_0000, &[RT, SIMM16, BASE]).r2(),
    F::new(Op::Cache, 0xbc00_0000, 0xfc00_0000, &[CACHE_OP, SIMM16, BASE]).r2(),
    F::new(Op::Ll, 0xc000_0000, 0xfc00_0000, &[RT, SIMM16, BASE]).r2(),
    F::new(Op::Lwc1, 0xc400_0000, 0xfc00_0000, &[FT, SIMM16, BASE]),
    F::new(Op::Bc, 0xc800_0000, 0xfc00_0000, &[BRANCH26]).r6(),
    F::new(Op::Pref, 0xcc00_0000, 0xfc00_0000, &[CACHE_OP, SIMM16, BASE]).r2(),
    F::new(Op::Lld, 0xd000_0000, 0xfc00_0000, &[RT, SIMM16, BASE]).r2(),
    F::new(Op::Ldc1, 0xd400_0000, 0xfc00_0000, &[FT, SIMM16, BASE]),
    F::new(Op::Jic, 0xd800_0000, 0xffe0_0000, &[RT, SIMM16]).r6(),
    F::new(Op::Beqzc, 0xd800_0000, 0xfc00_0000, &[RS, BRANCH21]).r6(),
    F::new(Op::Ld, 0xdc00_0000, 0xfc00_0000, &[RT, SIMM16, BASE]),
    F::new(Op::Sc, 0xe000_0000, 0xfc00_0000, &[RT, SIMM16, BASE]).r2(),
    F::new(Op::Swc1, 0xe400_0000, 0xfc00_0000, &[FT, SIMM16, BASE]),
    F::new(Op::Balc, 0xe800_0000, 0xfc00_0000, &[BRANCH26]).r6(),
    F::new(Op::Addiupc, 0xec00_0000, 0xfc18_0000, &[RS, PCREL19]).r6(),
    F::new(Op::Lwpc, 0xec08_0000, 0xfc18_0000, &[RS, PCREL19]).r6(),
    F::new(Op::Lwupc, 0xec10_0000, 0xfc18_0000, &[RS, PCREL19]).r6(),
    F::new(Op::Ldpc, 0xec18_0000, 0xfc1c_0000, &[RS, PCREL18]).r6(),
    F::new(Op::Auipc, 0xec1e_0000, 0xfc1f_0000, &[RS, IMM16]).r6(),
    F::new(Op::Aluipc, 0xec1f_0000, 0xfc1f_0000, &[RS, IMM16]).r6(),
    F::new(Op::Scd, 0xf000_0000, 0xfc00_0000, &[RT, SIMM16, BASE]).r2(),
    F::new(Op::Sdc1, 0xf400_0000, 0xfc00_0000, &[FT, SIMM16, BASE]),
    F::new(Op::Jialc, 0xf800_0000, 0xffe0_0000, &[RT, SIMM16]).r6(),
    F::new(Op::Bnezc, 0xf800_0000, 0xfc00_0000, &[RS, BRANCH21]).r6(),
    F::new(Op::Sd, 0xfc00_0000, 0xfc00_0000, &[RT, SIMM16, BASE]),
];

/// Checks every row of `table` for the structural mistakes the decoder would
/// otherwise turn into silent misdecodes.
pub fn validate_table(table: &[InstructionFormat]) -> Result<(), TableError> {
    for (row, format) in table.iter().enumerate() {
        let op = format.op.name();
        if format.value & !format.mask != 0 {
            return Err(TableError::ValueOutsideMask {
                row,
                op,
                value: format.value,
                mask: format.mask,
            });
        }

        let mut seen_empty = false;
        let mut last: Option<&OperandDescriptor> = None;
        for (slot, desc) in format.operands.iter().enumerate() {
            let Some(desc) = desc else {
                seen_empty = true;
                continue;
            };
            if seen_empty {
                return Err(TableError::SlotGap { row, op, slot });
            }

            let field = desc.field();
            if !field.fits() {
                return Err(TableError::FieldOutOfRange {
                    row,
                    op,
                    slot,
                    size: field.size,
                    lsb: field.lsb,
                });
            }
            if field.size == 0 && !desc.is_implied() {
                return Err(TableError::EmptyField { row, op, slot });
            }

            match desc {
                OperandDescriptor::Msb(_) if !matches!(last, Some(OperandDescriptor::Int(_))) => {
                    return Err(TableError::MisplacedMsb { row, op, slot });
                }
                OperandDescriptor::CheckPrev(check) => {
                    let after_reg = matches!(
                        last,
                        Some(OperandDescriptor::Reg(_) | OperandDescriptor::OptionalReg(_))
                    );
                    if !after_reg {
                        return Err(TableError::MisplacedCheck { row, op, slot });
                    }
                    if !check.is_satisfiable() {
                        return Err(TableError::UnsupportedCheck { row, op, slot });
                    }
                }
                _ => {}
            }
            last = Some(desc);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_is_valid() {
        assert_eq!(validate_table(FORMATS), Ok(()));
    }

    #[test]
    fn test_value_outside_mask() {
        let table = [F::new(Op::Nop, 0x0000_0001, 0xffff_fff0, &[])];
        assert!(matches!(
            validate_table(&table),
            Err(TableError::ValueOutsideMask { row: 0, .. })
        ));
    }

    #[test]
    fn test_field_overruns_word() {
        let table = [F::new(Op::J, 0x0800_0000, 0xfc00_0000, &[jump(26, 8, 2)])];
        assert!(matches!(
            validate_table(&table),
            Err(TableError::FieldOutOfRange { slot: 0, size: 26, lsb: 8, .. })
        ));
    }

    #[test]
    fn test_zero_width_needs_implied_value() {
        let table = [F::new(Op::Jr, 0x0000_0008, 0xffff_ffff, &[reg(0, 0, General)])];
        assert!(matches!(validate_table(&table), Err(TableError::EmptyField { .. })));
        let implied = [F::new(Op::Jr, 0x0000_0008, 0xffff_ffff, &[ZERO])];
        assert_eq!(validate_table(&implied), Ok(()));
    }

    #[test]
    fn test_dependent_slots_need_predecessor() {
        let msb_first = [F::new(Op::Ext, 0x7c00_0000, 0xfc00_003f, &[RT, EXT_SIZE])];
        assert!(matches!(
            validate_table(&msb_first),
            Err(TableError::MisplacedMsb { slot: 1, .. })
        ));

        let check_first = [F::new(Op::Beqc, 0x2000_0000, 0xfc00_0000, &[RT_GT_PREV, BRANCH])];
        assert!(matches!(
            validate_table(&check_first),
            Err(TableError::MisplacedCheck { slot: 0, .. })
        ));

        let no_relation = prev_check(5, 16, false, false, false, true);
        let unsupported = [F::new(Op::Beqc, 0x2000_0000, 0xfc00_0000, &[RS, no_relation, BRANCH])];
        assert!(matches!(
            validate_table(&unsupported),
            Err(TableError::UnsupportedCheck { slot: 1, .. })
        ));
    }

    #[test]
    fn test_slot_gap() {
        let mut row = F::new(Op::Addiu, 0x2400_0000, 0xfc00_0000, &[RT]);
        row.operands[2] = Some(SIMM16);
        assert!(matches!(validate_table(&[row]), Err(TableError::SlotGap { slot: 2, .. })));
    }

    #[test]
    fn test_predicates() {
        assert!(!rt_nonzero(0x5800_0010));
        assert!(rt_nonzero(0x5805_0010));
        assert!(!rs_nonzero(0x7405_1234));
        assert!(rs_nonzero(0x7485_1234));
    }

    #[test]
    fn test_isa_tags() {
        assert!(Isa::Any.admits(IsaLevel::R6));
        assert!(Isa::R2.admits(IsaLevel::R2));
        assert!(!Isa::R2.admits(IsaLevel::R6));
        assert!(!Isa::R6.admits(IsaLevel::R2));
    }
}
