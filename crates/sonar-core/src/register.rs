//! MIPS64 register identifiers and naming.

/// Register class (register bank an identifier indexes into).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegisterClass {
    /// General purpose register ($0-$31)
    General,
    /// Floating point register ($f0-$f31)
    FloatingPoint,
    /// FPU control register (FIR, FCSR, ...)
    FpControl,
    /// Coprocessor 0 (system control) register
    Coprocessor0,
    /// Hardware register read by `rdhwr`
    Hardware,
    /// FPU condition code ($fcc0-$fcc7)
    ConditionCode,
}

impl RegisterClass {
    /// Number of registers in this bank.
    pub const fn count(self) -> u16 {
        match self {
            Self::ConditionCode => 8,
            _ => 32,
        }
    }
}

/// How register names are spelled when rendering GNU syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegisterNaming {
    /// Raw numbers: `$4`, `$f12`.
    Numeric,
    /// n64 ABI names: `a0`, `$f12`.
    #[default]
    Abi,
}

impl RegisterNaming {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "numeric" | "raw" | "32" => Some(Self::Numeric),
            "abi" | "n64" | "64" => Some(Self::Abi),
            _ => None,
        }
    }
}

/// A MIPS64 register: a bank plus an index into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Register {
    /// The bank this register belongs to.
    pub class: RegisterClass,
    /// Index within the bank.
    pub id: u16,
}

impl Register {
    /// Creates a new register.
    pub const fn new(class: RegisterClass, id: u16) -> Self {
        Self { class, id }
    }

    /// General purpose register `$n`.
    pub const fn gpr(id: u16) -> Self {
        Self::new(RegisterClass::General, id)
    }

    /// Floating point register `$fn`.
    pub const fn fpr(id: u16) -> Self {
        Self::new(RegisterClass::FloatingPoint, id)
    }

    /// Returns true for the hardwired zero register.
    pub fn is_zero(&self) -> bool {
        self.class == RegisterClass::General && self.id == mips64::ZERO
    }

    /// Size of the register in bits.
    pub fn size(&self) -> u16 {
        match self.class {
            RegisterClass::FpControl => 32,
            RegisterClass::ConditionCode => 1,
            _ => 64,
        }
    }

    /// Returns the GNU name for this register.
    pub fn name(&self, naming: RegisterNaming) -> &'static str {
        let idx = usize::from(self.id);
        let table: &[&'static str] = match (self.class, naming) {
            (RegisterClass::General, RegisterNaming::Abi) => &GPR_ABI_NAMES,
            (RegisterClass::General, RegisterNaming::Numeric) => &GPR_NUMERIC_NAMES,
            (RegisterClass::FloatingPoint, _) => &FPR_NAMES,
            (RegisterClass::FpControl, _) => &CP1_NAMES,
            (RegisterClass::Coprocessor0, _) => &CP0_NAMES,
            (RegisterClass::Hardware, _) => &HWR_NAMES,
            (RegisterClass::ConditionCode, _) => &FCC_NAMES,
        };
        table.get(idx).copied().unwrap_or("unknown")
    }

    /// Returns the Plan 9 (Go assembler) name for this register.
    pub fn plan9_name(&self) -> &'static str {
        let idx = usize::from(self.id);
        let table: &[&'static str] = match self.class {
            RegisterClass::General => &GPR_PLAN9_NAMES,
            RegisterClass::FloatingPoint => &FPR_PLAN9_NAMES,
            RegisterClass::FpControl => &FCR_PLAN9_NAMES,
            RegisterClass::Coprocessor0 | RegisterClass::Hardware => &GPR_NUMERIC_NAMES,
            RegisterClass::ConditionCode => &FCC_NAMES,
        };
        table.get(idx).copied().unwrap_or("unknown")
    }
}

/// Name of a coprocessor 0 register at a non-zero select, if it has one.
pub fn cp0_select_name(id: u16, sel: u16) -> Option<&'static str> {
    CP0_SELECT_NAMES
        .iter()
        .find(|&&(reg, s, _)| reg == id && s == sel)
        .map(|&(_, _, name)| name)
}

// MIPS64 general purpose register IDs
pub mod mips64 {
    pub const ZERO: u16 = 0;
    pub const AT: u16 = 1;
    pub const V0: u16 = 2;
    pub const V1: u16 = 3;
    pub const A0: u16 = 4;
    pub const A1: u16 = 5;
    pub const A2: u16 = 6;
    pub const A3: u16 = 7;
    pub const A4: u16 = 8;
    pub const A5: u16 = 9;
    pub const A6: u16 = 10;
    pub const A7: u16 = 11;
    pub const T0: u16 = 12;
    pub const T1: u16 = 13;
    pub const T2: u16 = 14;
    pub const T3: u16 = 15;
    pub const S0: u16 = 16;
    pub const S1: u16 = 17;
    pub const S2: u16 = 18;
    pub const S3: u16 = 19;
    pub const S4: u16 = 20;
    pub const S5: u16 = 21;
    pub const S6: u16 = 22;
    pub const S7: u16 = 23;
    pub const T8: u16 = 24;
    pub const T9: u16 = 25;
    pub const K0: u16 = 26;
    pub const K1: u16 = 27;
    pub const GP: u16 = 28; // global pointer
    pub const SP: u16 = 29; // stack pointer
    pub const FP: u16 = 30; // s8 / frame pointer
    pub const RA: u16 = 31; // return address
}

const GPR_ABI_NAMES: [&str; 32] = [
    "zero", "at", "v0", "v1", "a0", "a1", "a2", "a3", "a4", "a5", "a6", "a7", "t0", "t1", "t2", "t3", "s0",
    "s1", "s2", "s3", "s4", "s5", "s6", "s7", "t8", "t9", "k0", "k1", "gp", "sp", "s8", "ra",
];

const GPR_NUMERIC_NAMES: [&str; 32] = [
    "$0", "$1", "$2", "$3", "$4", "$5", "$6", "$7", "$8", "$9", "$10", "$11", "$12", "$13", "$14", "$15",
    "$16", "$17", "$18", "$19", "$20", "$21", "$22", "$23", "$24", "$25", "$26", "$27", "$28", "$29",
    "$30", "$31",
];

const GPR_PLAN9_NAMES: [&str; 32] = [
    "R0", "R1", "R2", "R3", "R4", "R5", "R6", "R7", "R8", "R9", "R10", "R11", "R12", "R13", "R14", "R15",
    "R16", "R17", "R18", "R19", "R20", "R21", "R22", "R23", "R24", "R25", "R26", "R27", "R28", "R29",
    "R30", "R31",
];

const FPR_NAMES: [&str; 32] = [
    "$f0", "$f1", "$f2", "$f3", "$f4", "$f5", "$f6", "$f7", "$f8", "$f9", "$f10", "$f11", "$f12", "$f13",
    "$f14", "$f15", "$f16", "$f17", "$f18", "$f19", "$f20", "$f21", "$f22", "$f23", "$f24", "$f25",
    "$f26", "$f27", "$f28", "$f29", "$f30", "$f31",
];

const FPR_PLAN9_NAMES: [&str; 32] = [
    "F0", "F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9", "F10", "F11", "F12", "F13", "F14", "F15",
    "F16", "F17", "F18", "F19", "F20", "F21", "F22", "F23", "F24", "F25", "F26", "F27", "F28", "F29",
    "F30", "F31",
];

const FCR_PLAN9_NAMES: [&str; 32] = [
    "FCR0", "FCR1", "FCR2", "FCR3", "FCR4", "FCR5", "FCR6", "FCR7", "FCR8", "FCR9", "FCR10", "FCR11",
    "FCR12", "FCR13", "FCR14", "FCR15", "FCR16", "FCR17", "FCR18", "FCR19", "FCR20", "FCR21", "FCR22",
    "FCR23", "FCR24", "FCR25", "FCR26", "FCR27", "FCR28", "FCR29", "FCR30", "FCR31",
];

const CP0_NAMES: [&str; 32] = [
    "c0_index", "c0_random", "c0_entrylo0", "c0_entrylo1", "c0_context", "c0_pagemask", "c0_wired",
    "c0_hwrena", "c0_badvaddr", "c0_count", "c0_entryhi", "c0_compare", "c0_status", "c0_cause",
    "c0_epc", "c0_prid", "c0_config", "c0_lladdr", "c0_watchlo", "c0_watchhi", "c0_xcontext", "$21",
    "$22", "c0_debug", "c0_depc", "c0_perfcnt", "c0_errctl", "c0_cacheerr", "c0_taglo", "c0_taghi",
    "c0_errorepc", "c0_desave",
];

const CP0_SELECT_NAMES: &[(u16, u16, &str)] = &[
    (16, 1, "c0_config1"),
    (16, 2, "c0_config2"),
    (16, 3, "c0_config3"),
    (18, 1, "c0_watchlo,1"),
    (18, 2, "c0_watchlo,2"),
    (18, 3, "c0_watchlo,3"),
    (18, 4, "c0_watchlo,4"),
    (18, 5, "c0_watchlo,5"),
    (18, 6, "c0_watchlo,6"),
    (18, 7, "c0_watchlo,7"),
    (19, 1, "c0_watchhi,1"),
    (19, 2, "c0_watchhi,2"),
    (19, 3, "c0_watchhi,3"),
    (19, 4, "c0_watchhi,4"),
    (19, 5, "c0_watchhi,5"),
    (19, 6, "c0_watchhi,6"),
    (19, 7, "c0_watchhi,7"),
    (25, 1, "c0_perfcnt,1"),
    (25, 2, "c0_perfcnt,2"),
    (25, 3, "c0_perfcnt,3"),
    (25, 4, "c0_perfcnt,4"),
    (25, 5, "c0_perfcnt,5"),
    (25, 6, "c0_perfcnt,6"),
    (25, 7, "c0_perfcnt,7"),
    (27, 1, "c0_cacheerr,1"),
    (27, 2, "c0_cacheerr,2"),
    (27, 3, "c0_cacheerr,3"),
    (28, 1, "c0_datalo"),
    (29, 1, "c0_datahi"),
];

const CP1_NAMES: [&str; 32] = [
    "c1_fir", "c1_ufr", "$2", "$3", "c1_unfr", "$5", "$6", "$7", "$8", "$9", "$10", "$11", "$12", "$13",
    "$14", "$15", "$16", "$17", "$18", "$19", "$20", "$21", "$22", "$23", "$24", "c1_fccr", "c1_fexr",
    "$27", "c1_fenr", "$29", "$30", "c1_fcsr",
];

const HWR_NAMES: [&str; 32] = [
    "hwr_cpunum", "hwr_synci_step", "hwr_cc", "hwr_ccres", "$4", "$5", "$6", "$7", "$8", "$9", "$10",
    "$11", "$12", "$13", "$14", "$15", "$16", "$17", "$18", "$19", "$20", "$21", "$22", "$23", "$24",
    "$25", "$26", "$27", "$28", "$29", "$30", "$31",
];

const FCC_NAMES: [&str; 8] = ["$fcc0", "$fcc1", "$fcc2", "$fcc3", "$fcc4", "$fcc5", "$fcc6", "$fcc7"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpr_names() {
        assert_eq!(Register::gpr(mips64::SP).name(RegisterNaming::Abi), "sp");
        assert_eq!(Register::gpr(mips64::RA).name(RegisterNaming::Abi), "ra");
        assert_eq!(Register::gpr(mips64::A4).name(RegisterNaming::Abi), "a4");
        assert_eq!(Register::gpr(29).name(RegisterNaming::Numeric), "$29");
        assert_eq!(Register::gpr(30).plan9_name(), "R30");
    }

    #[test]
    fn test_special_bank_names() {
        assert_eq!(Register::new(RegisterClass::Coprocessor0, 12).name(RegisterNaming::Abi), "c0_status");
        assert_eq!(Register::new(RegisterClass::FpControl, 31).name(RegisterNaming::Abi), "c1_fcsr");
        assert_eq!(Register::new(RegisterClass::Hardware, 29).name(RegisterNaming::Abi), "$29");
        assert_eq!(Register::new(RegisterClass::ConditionCode, 9).name(RegisterNaming::Abi), "unknown");
        assert_eq!(cp0_select_name(16, 1), Some("c0_config1"));
        assert_eq!(cp0_select_name(12, 1), None);
    }

    #[test]
    fn test_register_properties() {
        assert!(Register::gpr(0).is_zero());
        assert!(!Register::fpr(0).is_zero());
        assert_eq!(Register::new(RegisterClass::FpControl, 31).size(), 32);
        assert_eq!(RegisterClass::ConditionCode.count(), 8);
        assert_eq!(RegisterNaming::parse("N64"), Some(RegisterNaming::Abi));
    }
}
