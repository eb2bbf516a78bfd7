//! MIPS64 mnemonics.

macro_rules! opcodes {
    ($($variant:ident => $gnu:literal, $go:literal;)*) => {
        /// A MIPS64 opcode, including the assembler aliases the decoder
        /// prefers over their base forms (`move`, `nop`, `b`, ...).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum Op {
            $($variant,)*
        }

        impl Op {
            /// Every opcode, in declaration order.
            pub const ALL: &'static [Op] = &[$(Op::$variant,)*];

            /// GNU (binutils) mnemonic.
            pub fn name(self) -> &'static str {
                match self {
                    $(Op::$variant => $gnu,)*
                }
            }

            /// Go assembler mnemonic.
            pub fn go_name(self) -> &'static str {
                match self {
                    $(Op::$variant => $go,)*
                }
            }
        }
    };
}

opcodes! {
    // SPECIAL
    Nop => "nop", "NOOP";
    Ssnop => "ssnop", "SSNOP";
    Ehb => "ehb", "EHB";
    Sll => "sll", "SLL";
    Rotr => "rotr", "ROTR";
    Srl => "srl", "SRL";
    Sra => "sra", "SRA";
    Sllv => "sllv", "SLL";
    Lsa => "lsa", "LSA";
    Rotrv => "rotrv", "ROTR";
    Srlv => "srlv", "SRL";
    Srav => "srav", "SRA";
    Jr => "jr", "JMP";
    JrHb => "jr.hb", "JMP";
    Jalr => "jalr", "JAL";
    JalrHb => "jalr.hb", "JAL";
    Movz => "movz", "CMOVZ";
    Movn => "movn", "CMOVN";
    Seleqz => "seleqz", "SELEQZ";
    Selnez => "selnez", "SELNEZ";
    Syscall => "syscall", "SYSCALL";
    Break => "break", "BREAK";
    Sync => "sync", "SYNC";
    Mfhi => "mfhi", "MOVV";
    Mthi => "mthi", "MOVV";
    Mflo => "mflo", "MOVV";
    Mtlo => "mtlo", "MOVV";
    Clz => "clz", "CLZ";
    Clo => "clo", "CLO";
    Dclz => "dclz", "DCLZ";
    Dclo => "dclo", "DCLO";
    Dsllv => "dsllv", "SLLV";
    Dlsa => "dlsa", "DLSA";
    Drotrv => "drotrv", "ROTRV";
    Dsrlv => "dsrlv", "SRLV";
    Dsrav => "dsrav", "SRAV";
    Mult => "mult", "MUL";
    Multu => "multu", "MULU";
    Div => "div", "DIV";
    Divu => "divu", "DIVU";
    Dmult => "dmult", "MULV";
    Dmultu => "dmultu", "MULVU";
    Ddiv => "ddiv", "DIVV";
    Ddivu => "ddivu", "DIVVU";
    Mul => "mul", "MUL";
    Muh => "muh", "MULH";
    Mulu => "mulu", "MULU";
    Muhu => "muhu", "MULHU";
    Mod => "mod", "REM";
    Modu => "modu", "REMU";
    Dmul => "dmul", "MULV";
    Dmuh => "dmuh", "MULHV";
    Dmulu => "dmulu", "MULVU";
    Dmuhu => "dmuhu", "MULHVU";
    Dmod => "dmod", "REMV";
    Dmodu => "dmodu", "REMVU";
    Add => "add", "ADD";
    Move => "move", "MOVV";
    Addu => "addu", "ADDU";
    Neg => "neg", "NEGW";
    Sub => "sub", "SUB";
    Negu => "negu", "NEGW";
    Subu => "subu", "SUBU";
    And => "and", "AND";
    Or => "or", "OR";
    Xor => "xor", "XOR";
    Not => "not", "NOT";
    Nor => "nor", "NOR";
    Slt => "slt", "SGT";
    Sltu => "sltu", "SGTU";
    Dadd => "dadd", "ADDV";
    Daddu => "daddu", "ADDVU";
    Dneg => "dneg", "NEGV";
    Dsub => "dsub", "SUBV";
    Dnegu => "dnegu", "NEGV";
    Dsubu => "dsubu", "SUBVU";
    Tge => "tge", "TGE";
    Tgeu => "tgeu", "TGEU";
    Tlt => "tlt", "TLT";
    Tltu => "tltu", "TLTU";
    Teq => "teq", "TEQ";
    Tne => "tne", "TNE";
    Dsll => "dsll", "SLLV";
    Drotr => "drotr", "ROTRV";
    Dsrl => "dsrl", "SRLV";
    Dsra => "dsra", "SRAV";
    Dsll32 => "dsll32", "SLLV";
    Drotr32 => "drotr32", "ROTRV";
    Dsrl32 => "dsrl32", "SRLV";
    Dsra32 => "dsra32", "SRAV";

    // REGIMM
    B => "b", "JMP";
    Bal => "bal", "BAL";
    Nal => "nal", "NAL";
    Bltz => "bltz", "BLTZ";
    Bgez => "bgez", "BGEZ";
    Bltzl => "bltzl", "BLTZL";
    Bgezl => "bgezl", "BGEZL";
    Dahi => "dahi", "DAHI";
    Tgei => "tgei", "TGE";
    Tgeiu => "tgeiu", "TGEU";
    Tlti => "tlti", "TLT";
    Tltiu => "tltiu", "TLTU";
    Teqi => "teqi", "TEQ";
    Tnei => "tnei", "TNE";
    Bltzal => "bltzal", "BLTZAL";
    Bgezal => "bgezal", "BGEZAL";
    Bltzall => "bltzall", "BLTZALL";
    Bgezall => "bgezall", "BGEZALL";
    Dati => "dati", "DATI";
    Synci => "synci", "SYNCI";

    // Jumps and I-type
    J => "j", "JMP";
    Jal => "jal", "JAL";
    Jalx => "jalx", "JALX";
    Daui => "daui", "DAUI";
    Beqz => "beqz", "BEQ";
    Beq => "beq", "BEQ";
    Bnez => "bnez", "BNE";
    Bne => "bne", "BNE";
    Blez => "blez", "BLEZ";
    Blezalc => "blezalc", "BLEZALC";
    Bgezalc => "bgezalc", "BGEZALC";
    Bgeuc => "bgeuc", "BGEUC";
    Bgtz => "bgtz", "BGTZ";
    Bgtzalc => "bgtzalc", "BGTZALC";
    Bltzalc => "bltzalc", "BLTZALC";
    Bltuc => "bltuc", "BLTUC";
    Addi => "addi", "ADD";
    Bovc => "bovc", "BOVC";
    Beqzalc => "beqzalc", "BEQZALC";
    Beqc => "beqc", "BEQC";
    Li => "li", "MOVW";
    Addiu => "addiu", "ADDU";
    Slti => "slti", "SGT";
    Sltiu => "sltiu", "SGTU";
    Andi => "andi", "AND";
    Ori => "ori", "OR";
    Xori => "xori", "XOR";
    Lui => "lui", "LUI";
    Aui => "aui", "AUI";
    Beql => "beql", "BEQL";
    Beqzl => "beqzl", "BEQL";
    Bnel => "bnel", "BNEL";
    Bnezl => "bnezl", "BNEL";
    Blezl => "blezl", "BLEZL";
    Bgtzl => "bgtzl", "BGTZL";
    Blezc => "blezc", "BLEZC";
    Bgezc => "bgezc", "BGEZC";
    Bgec => "bgec", "BGEC";
    Bgtzc => "bgtzc", "BGTZC";
    Bltzc => "bltzc", "BLTZC";
    Bltc => "bltc", "BLTC";
    Bnvc => "bnvc", "BNVC";
    Bnezalc => "bnezalc", "BNEZALC";
    Bnec => "bnec", "BNEC";
    Daddi => "daddi", "ADDV";
    Daddiu => "daddiu", "ADDVU";
    Ldl => "ldl", "MOVVL";
    Ldr => "ldr", "MOVVR";

    // COP0
    Mfc0 => "mfc0", "MOVW";
    Dmfc0 => "dmfc0", "MOVV";
    Mtc0 => "mtc0", "MOVW";
    Dmtc0 => "dmtc0", "MOVV";
    Di => "di", "DI";
    Ei => "ei", "EI";
    Tlbr => "tlbr", "TLBR";
    Tlbwi => "tlbwi", "TLBWI";
    Tlbwr => "tlbwr", "TLBWR";
    Tlbp => "tlbp", "TLBP";
    Eret => "eret", "ERET";
    Deret => "deret", "DERET";
    Wait => "wait", "WAIT";

    // COP1
    Mfc1 => "mfc1", "MOVW";
    Dmfc1 => "dmfc1", "MOVV";
    Cfc1 => "cfc1", "MOVW";
    Mfhc1 => "mfhc1", "MFHC1";
    Mtc1 => "mtc1", "MOVW";
    Dmtc1 => "dmtc1", "MOVV";
    Ctc1 => "ctc1", "MOVW";
    Mthc1 => "mthc1", "MTHC1";
    Bc1f => "bc1f", "BFPF";
    Bc1t => "bc1t", "BFPT";
    Bc1fl => "bc1fl", "BFPFL";
    Bc1tl => "bc1tl", "BFPTL";
    Bc1eqz => "bc1eqz", "BC1EQZ";
    Bc1nez => "bc1nez", "BC1NEZ";
    AddS => "add.s", "ADDF";
    AddD => "add.d", "ADDD";
    SubS => "sub.s", "SUBF";
    SubD => "sub.d", "SUBD";
    MulS => "mul.s", "MULF";
    MulD => "mul.d", "MULD";
    DivS => "div.s", "DIVF";
    DivD => "div.d", "DIVD";
    SqrtS => "sqrt.s", "SQRTF";
    SqrtD => "sqrt.d", "SQRTD";
    AbsS => "abs.s", "ABSF";
    AbsD => "abs.d", "ABSD";
    MovS => "mov.s", "MOVF";
    MovD => "mov.d", "MOVD";
    NegS => "neg.s", "NEGF";
    NegD => "neg.d", "NEGD";
    TruncLS => "trunc.l.s", "TRUNCFV";
    TruncLD => "trunc.l.d", "TRUNCDV";
    TruncWS => "trunc.w.s", "TRUNCFW";
    TruncWD => "trunc.w.d", "TRUNCDW";
    CvtSD => "cvt.s.d", "MOVDF";
    CvtSW => "cvt.s.w", "MOVWF";
    CvtSL => "cvt.s.l", "MOVVF";
    CvtDS => "cvt.d.s", "MOVFD";
    CvtDW => "cvt.d.w", "MOVWD";
    CvtDL => "cvt.d.l", "MOVVD";
    CvtWS => "cvt.w.s", "MOVFW";
    CvtWD => "cvt.w.d", "MOVDW";
    CvtLS => "cvt.l.s", "MOVFV";
    CvtLD => "cvt.l.d", "MOVDV";
    CEqS => "c.eq.s", "CMPEQF";
    CEqD => "c.eq.d", "CMPEQD";
    CLtS => "c.lt.s", "CMPGTF";
    CLtD => "c.lt.d", "CMPGTD";
    CLeS => "c.le.s", "CMPGEF";
    CLeD => "c.le.d", "CMPGED";
    CmpUnS => "cmp.un.s", "CMPUNF";
    CmpEqS => "cmp.eq.s", "CMPEQF";
    CmpLtS => "cmp.lt.s", "CMPGTF";
    CmpLeS => "cmp.le.s", "CMPGEF";
    CmpUnD => "cmp.un.d", "CMPUND";
    CmpEqD => "cmp.eq.d", "CMPEQD";
    CmpLtD => "cmp.lt.d", "CMPGTD";
    CmpLeD => "cmp.le.d", "CMPGED";

    // COP1X
    MaddS => "madd.s", "MADDF";
    MaddD => "madd.d", "MADDD";
    MsubS => "msub.s", "MSUBF";
    MsubD => "msub.d", "MSUBD";

    // SPECIAL2
    Madd => "madd", "MADD";
    Maddu => "maddu", "MADDU";
    Msub => "msub", "MSUB";
    Msubu => "msubu", "MSUBU";
    Sdbbp => "sdbbp", "SDBBP";

    // SPECIAL3
    Ext => "ext", "EXT";
    Dextm => "dextm", "DEXTM";
    Dextu => "dextu", "DEXTU";
    Dext => "dext", "DEXT";
    Ins => "ins", "INS";
    Dinsm => "dinsm", "DINSM";
    Dinsu => "dinsu", "DINSU";
    Dins => "dins", "DINS";
    Ll => "ll", "LL";
    Lld => "lld", "LLV";
    Sc => "sc", "SC";
    Scd => "scd", "SCV";
    Cache => "cache", "CACHE";
    Pref => "pref", "PREF";
    Wsbh => "wsbh", "WSBH";
    Seb => "seb", "SEB";
    Seh => "seh", "SEH";
    Dsbh => "dsbh", "DSBH";
    Dshd => "dshd", "DSHD";
    Rdhwr => "rdhwr", "RDHWR";

    // Loads, stores and the release 6 opcodes that reuse COP2 slots
    Lb => "lb", "MOVB";
    Lh => "lh", "MOVH";
    Lwl => "lwl", "MOVWL";
    Lw => "lw", "MOVW";
    Lbu => "lbu", "MOVBU";
    Lhu => "lhu", "MOVHU";
    Lwr => "lwr", "MOVWR";
    Lwu => "lwu", "MOVWU";
    Sb => "sb", "MOVB";
    Sh => "sh", "MOVH";
    Swl => "swl", "MOVWL";
    Sw => "sw", "MOVW";
    Sdl => "sdl", "MOVVL";
    Sdr => "sdr", "MOVVR";
    Swr => "swr", "MOVWR";
    Lwc1 => "lwc1", "MOVF";
    Bc => "bc", "JMP";
    Ldc1 => "ldc1", "MOVD";
    Jic => "jic", "JIC";
    Beqzc => "beqzc", "BEQZC";
    Ld => "ld", "MOVV";
    Swc1 => "swc1", "MOVF";
    Balc => "balc", "JAL";
    Sdc1 => "sdc1", "MOVD";
    Jialc => "jialc", "JIALC";
    Bnezc => "bnezc", "BNEZC";
    Sd => "sd", "MOVV";

    // PC-relative (release 6)
    Addiupc => "addiupc", "ADDIUPC";
    Lwpc => "lwpc", "LWPC";
    Lwupc => "lwupc", "LWUPC";
    Ldpc => "ldpc", "LDPC";
    Auipc => "auipc", "AUIPC";
    Aluipc => "aluipc", "ALUIPC";
}

impl Op {
    /// Returns true for loads, which read `offset(base)`.
    pub fn is_load(self) -> bool {
        matches!(
            self,
            Op::Lb
                | Op::Lh
                | Op::Lwl
                | Op::Lw
                | Op::Lbu
                | Op::Lhu
                | Op::Lwr
                | Op::Lwu
                | Op::Ldl
                | Op::Ldr
                | Op::Ll
                | Op::Lld
                | Op::Lwc1
                | Op::Ldc1
                | Op::Ld
        )
    }

    /// Returns true for stores, which write `offset(base)`.
    pub fn is_store(self) -> bool {
        matches!(
            self,
            Op::Sb
                | Op::Sh
                | Op::Swl
                | Op::Sw
                | Op::Sdl
                | Op::Sdr
                | Op::Swr
                | Op::Sc
                | Op::Scd
                | Op::Swc1
                | Op::Sdc1
                | Op::Sd
        )
    }

    /// Returns true if the last two operands form an `offset(base)` address.
    pub fn has_memory_operand(self) -> bool {
        self.is_load() || self.is_store() || matches!(self, Op::Cache | Op::Pref | Op::Synci)
    }

    /// Returns true for the instructions that write the return address.
    pub fn is_link(self) -> bool {
        matches!(
            self,
            Op::Jal
                | Op::Jalr
                | Op::JalrHb
                | Op::Jalx
                | Op::Bal
                | Op::Bltzal
                | Op::Bgezal
                | Op::Bltzall
                | Op::Bgezall
                | Op::Balc
                | Op::Jialc
                | Op::Beqzalc
                | Op::Bnezalc
                | Op::Blezalc
                | Op::Bgezalc
                | Op::Bgtzalc
                | Op::Bltzalc
        )
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_gnu_names_are_unique() {
        let names: HashSet<_> = Op::ALL.iter().map(|op| op.name()).collect();
        assert_eq!(names.len(), Op::ALL.len());
    }

    #[test]
    fn test_memory_classes() {
        assert!(Op::Ld.is_load() && !Op::Ld.is_store());
        assert!(Op::Sd.is_store() && Op::Sd.has_memory_operand());
        assert!(Op::Pref.has_memory_operand());
        assert!(!Op::Daddiu.has_memory_operand());
        assert!(Op::Jal.is_link() && !Op::J.is_link());
        assert_eq!(Op::JalrHb.to_string(), "jalr.hb");
        assert_eq!(Op::Daddu.go_name(), "ADDVU");
    }
}
