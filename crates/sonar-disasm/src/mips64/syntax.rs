//! GNU and Go assembly rendering.
//!
//! Rendering is stateless and works from the decoded operands only.

use sonar_core::register::cp0_select_name;
use sonar_core::{RegisterClass, RegisterNaming};

use super::inst::{Arg, Imm, Inst};
use super::opcode::Op;
use super::options::AssemblyFlavour;

/// Resolves an address to a symbol name and the symbol's start address.
pub type SymbolLookup<'a> = &'a dyn Fn(u64) -> Option<(String, u64)>;

impl Inst {
    /// Renders the instruction at `pc` in `flavour`. `names` applies to GNU
    /// output only; Go output always uses Plan 9 names.
    pub fn text(
        &self,
        flavour: AssemblyFlavour,
        names: RegisterNaming,
        pc: u64,
        sym_lookup: Option<SymbolLookup<'_>>,
    ) -> String {
        match flavour {
            AssemblyFlavour::Gnu => gnu_syntax(self, pc, names),
            AssemblyFlavour::Go => go_syntax(self, pc, sym_lookup),
        }
    }
}

/// binutils-style text: `daddiu sp,sp,-16`, `ld ra,8(sp)`.
pub fn gnu_syntax(inst: &Inst, pc: u64, names: RegisterNaming) -> String {
    let op = inst.op();
    let args = inst.visible_args();
    let mut out = String::from(op.name());
    let mut parts: Vec<String> = Vec::with_capacity(args.len());

    let mut idx = 0;
    while idx < args.len() {
        let arg = args[idx];
        let next = args.get(idx + 1).copied();
        match (arg, next) {
            // offset(base)
            (Arg::Imm(imm), Some(Arg::Reg(base))) if op.has_memory_operand() && idx + 2 == args.len() => {
                parts.push(format!("{}({})", gnu_imm(imm), base.name(names)));
                idx += 2;
                continue;
            }
            // Named coprocessor 0 selects replace the register and select pair.
            (Arg::Reg(reg), Some(Arg::Imm(sel))) if reg.class == RegisterClass::Coprocessor0 => {
                let named = u16::try_from(sel.value).ok().and_then(|sel| cp0_select_name(reg.id, sel));
                if let Some(name) = named {
                    parts.push(name.to_string());
                    idx += 2;
                    continue;
                }
                parts.push(reg.name(names).to_string());
            }
            (Arg::Imm(imm), _) if is_shift32(op) => {
                parts.push(gnu_imm(Imm {
                    value: imm.value - 32,
                    ..imm
                }));
            }
            _ => parts.push(gnu_arg(arg, pc, names)),
        }
        idx += 1;
    }

    if !parts.is_empty() {
        out.push(' ');
        out.push_str(&parts.join(","));
    }
    out
}

fn gnu_arg(arg: Arg, pc: u64, names: RegisterNaming) -> String {
    match arg {
        Arg::Reg(reg) => reg.name(names).to_string(),
        Arg::RegPair(first, second) => format!("{},{}", first.name(names), second.name(names)),
        Arg::Imm(imm) => gnu_imm(imm),
        Arg::PcRel(rel) => format!("{:#x}", rel.target(pc)),
    }
}

fn gnu_imm(imm: Imm) -> String {
    match (imm.hex, imm.value < 0) {
        (true, false) => format!("{:#x}", imm.value),
        (true, true) => format!("-{:#x}", imm.value.unsigned_abs()),
        (false, _) => imm.value.to_string(),
    }
}

fn is_shift32(op: Op) -> bool {
    matches!(op, Op::Dsll32 | Op::Dsrl32 | Op::Dsra32 | Op::Drotr32)
}

/// Go assembler text: `ADDVU $-16, R29, R29`, `MOVV 8(R29), R31`.
///
/// Operands are in Plan 9 order (destination last), except stores, whose
/// memory operand is already the destination.
pub fn go_syntax(inst: &Inst, pc: u64, sym_lookup: Option<SymbolLookup<'_>>) -> String {
    let op = inst.op();
    let mut args = inst.visible_args();
    let mut parts: Vec<String> = Vec::with_capacity(args.len());

    let memory = op.has_memory_operand() && args.len() >= 2;
    let mut mem_text = None;
    if memory {
        if let (Some(Arg::Reg(base)), Some(Arg::Imm(off))) = (args.pop(), args.pop()) {
            mem_text = Some(format!("{}({})", off.value, base.plan9_name()));
        }
    }

    let indirect = matches!(op, Op::Jr | Op::JrHb | Op::Jalr | Op::JalrHb);
    let count = args.len();
    for (idx, arg) in args.into_iter().enumerate() {
        let text = match arg {
            Arg::Reg(reg) if indirect && idx + 1 == count => format!("({})", reg.plan9_name()),
            _ => go_arg(arg, pc, sym_lookup),
        };
        parts.push(text);
    }

    let is_branch = inst.pc_rel().is_some();
    if !is_branch && !op.is_store() {
        parts.reverse();
    }
    if let Some(mem) = mem_text {
        if op.is_store() {
            parts.push(mem);
        } else {
            parts.insert(0, mem);
        }
    }

    let mut out = String::from(op.go_name());
    if !parts.is_empty() {
        out.push(' ');
        out.push_str(&parts.join(", "));
    }
    out
}

fn go_arg(arg: Arg, pc: u64, sym_lookup: Option<SymbolLookup<'_>>) -> String {
    match arg {
        Arg::Reg(reg) => reg.plan9_name().to_string(),
        Arg::RegPair(first, second) => format!("({}, {})", first.plan9_name(), second.plan9_name()),
        Arg::Imm(imm) if imm.hex && imm.value >= 0 => format!("${:#x}", imm.value),
        Arg::Imm(imm) => format!("${}", imm.value),
        Arg::PcRel(rel) => {
            let target = rel.target(pc);
            match sym_lookup.and_then(|lookup| lookup(target)) {
                Some((name, base)) if target == base => format!("{name}(SB)"),
                Some((name, base)) => format!("{name}+{}(SB)", target.wrapping_sub(base)),
                None => format!("{target:#x}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mips64::{IsaLevel, Mips64Disassembler, Mips64Options};

    fn gnu(word: u32) -> String {
        let inst = Mips64Disassembler::new().decode_word(word).unwrap();
        gnu_syntax(&inst, 0x1000, RegisterNaming::Abi)
    }

    fn go(word: u32) -> String {
        let inst = Mips64Disassembler::new().decode_word(word).unwrap();
        go_syntax(&inst, 0x1000, None)
    }

    #[test]
    fn test_gnu_basic() {
        assert_eq!(gnu(0x0000_0000), "nop");
        assert_eq!(gnu(0x67bd_fff0), "daddiu sp,sp,-16");
        assert_eq!(gnu(0xffbf_0008), "sd ra,8(sp)");
        assert_eq!(gnu(0xdfbf_0008), "ld ra,8(sp)");
        assert_eq!(gnu(0x03e0_0008), "jr ra");
        assert_eq!(gnu(0x03a0_f02d), "move s8,sp");
        // Either source may be zero.
        assert_eq!(gnu(0x0003_102d), "move v0,v1");
        assert_eq!(gnu(0x0003_1025), "move v0,v1");
        assert_eq!(gnu(0x0000_1025), "move v0,zero");
        assert_eq!(gnu(0x1043_0003), "beq v0,v1,0x1010");
        assert_eq!(gnu(0x0800_0800), "j 0x2000");
        assert_eq!(gnu(0x3c02_1234), "lui v0,0x1234");
    }

    #[test]
    fn test_gnu_optional_and_shift32() {
        // The optional source is dropped when it repeats the destination.
        assert_eq!(gnu(0x0002_1080), "sll v0,0x2");
        assert_eq!(gnu(0x0003_1080), "sll v0,v1,0x2");
        assert_eq!(gnu(0x0003_103c), "dsll32 v0,v1,0x0");
    }

    #[test]
    fn test_gnu_numeric_names_and_cop0() {
        let inst = Mips64Disassembler::new().decode_word(0x67bd_fff0).unwrap();
        assert_eq!(gnu_syntax(&inst, 0, RegisterNaming::Numeric), "daddiu $29,$29,-16");

        assert_eq!(gnu(0x4002_6000), "mfc0 v0,c0_status");
        // config1 is select 1 of register 16
        assert_eq!(gnu(0x4002_8001), "mfc0 v0,c0_config1");
        assert_eq!(gnu(0x4002_6001), "mfc0 v0,c0_status,1");
    }

    #[test]
    fn test_go_order() {
        assert_eq!(go(0x67bd_fff0), "ADDVU $-16, R29, R29");
        assert_eq!(go(0x0064_102d), "ADDVU R4, R3, R2");
        assert_eq!(go(0xdfbf_0008), "MOVV 8(R29), R31");
        assert_eq!(go(0xffbf_0008), "MOVV R31, 8(R29)");
        assert_eq!(go(0x03e0_0008), "JMP (R31)");
        assert_eq!(go(0x0320_f809), "JAL (R25)");
        assert_eq!(go(0x1043_0003), "BEQ R2, R3, 0x1010");
        assert_eq!(go(0x0000_0000), "NOOP");
    }

    #[test]
    fn test_go_symbolised_targets() {
        let lookup = |addr: u64| (0x2000..0x2100).contains(&addr).then(|| ("runtime.morestack".to_string(), 0x2000));
        let lookup: SymbolLookup<'_> = &lookup;
        let jal = Mips64Disassembler::new().decode_word(0x0c00_0800).unwrap();
        assert_eq!(go_syntax(&jal, 0x1000, Some(lookup)), "JAL runtime.morestack(SB)");
        let jal_inner = Mips64Disassembler::new().decode_word(0x0c00_0802).unwrap();
        assert_eq!(go_syntax(&jal_inner, 0x1000, Some(lookup)), "JAL runtime.morestack+8(SB)");
    }

    #[test]
    fn test_text_dispatch() {
        let d6 = Mips64Disassembler::with_options(Mips64Options::new().with_isa(IsaLevel::R6));
        let inst = d6.decode_word(0xc800_0010).unwrap();
        assert_eq!(inst.text(AssemblyFlavour::Gnu, RegisterNaming::Abi, 0x1000, None), "bc 0x1044");
        assert_eq!(inst.text(AssemblyFlavour::Go, RegisterNaming::Abi, 0x1000, None), "JMP 0x1044");

        let daddiu = d6.decode_word(0x67bd_fff0).unwrap();
        assert_eq!(daddiu.text(AssemblyFlavour::Gnu, RegisterNaming::Numeric, 0, None), "daddiu $29,$29,-16");
        assert_eq!(daddiu.text(AssemblyFlavour::Gnu, RegisterNaming::Abi, 0, None), "daddiu sp,sp,-16");
        // Go names do not depend on the naming option.
        assert_eq!(daddiu.text(AssemblyFlavour::Go, RegisterNaming::Numeric, 0, None), "ADDVU $-16, R29, R29");
    }
}
