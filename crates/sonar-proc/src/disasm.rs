//! Instruction classification and control-flow target resolution.

use sonar_core::{LineResolver, Location, RegisterNaming};
use sonar_disasm::mips64::{Arg, AssemblyFlavour, Inst, Op, SymbolLookup, INSN_SIZE};
use sonar_disasm::{DecodeError, Mips64Disassembler};

use crate::registers::Registers;

/// Control-flow class of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InstructionKind {
    Call,
    Return,
    UnconditionalJump,
    Other,
}

/// A decoded instruction placed at its address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmInstruction {
    pub loc: Location,
    /// Resolved destination of a call or jump.
    pub dest_loc: Option<Location>,
    pub bytes: Vec<u8>,
    pub size: usize,
    pub kind: InstructionKind,
    /// The instruction is at the current PC of the inspected thread.
    pub at_pc: bool,
    /// `None` when the bytes did not decode.
    pub inst: Option<Inst>,
    /// Register naming for GNU text, taken from the decoder options.
    pub names: RegisterNaming,
}

impl AsmInstruction {
    pub fn is_call(&self) -> bool {
        self.kind == InstructionKind::Call
    }

    pub fn is_return(&self) -> bool {
        self.kind == InstructionKind::Return
    }

    pub fn is_jump(&self) -> bool {
        self.kind == InstructionKind::UnconditionalJump
    }

    /// Assembly text, or `?` for undecodable bytes.
    pub fn text(&self, flavour: AssemblyFlavour, sym_lookup: Option<SymbolLookup<'_>>) -> String {
        match &self.inst {
            Some(inst) => inst.text(flavour, self.names, self.loc.pc, sym_lookup),
            None => "?".to_string(),
        }
    }

    /// Opcode comparison that is false for undecodable bytes.
    pub fn opcode_equals(&self, op: Op) -> bool {
        self.inst.as_ref().is_some_and(|inst| inst.op() == op)
    }

    fn undecodable(loc: Location, bytes: &[u8], at_pc: bool, names: RegisterNaming) -> Self {
        Self {
            loc,
            dest_loc: None,
            bytes: bytes.to_vec(),
            size: bytes.len(),
            kind: InstructionKind::Other,
            at_pc,
            inst: None,
            names,
        }
    }
}

const RA: u16 = 31;

fn first_reg(inst: &Inst) -> Option<u16> {
    inst.args().find_map(Arg::as_reg).map(|reg| reg.id)
}

/// Classifies `inst` by control flow. Conditional branches are `Other`
/// unless they link.
pub fn classify(inst: &Inst) -> InstructionKind {
    let op = inst.op();
    match op {
        _ if op.is_link() => InstructionKind::Call,
        Op::Eret | Op::Deret => InstructionKind::Return,
        Op::Jr | Op::JrHb | Op::Jic if first_reg(inst) == Some(RA) => InstructionKind::Return,
        Op::Jr | Op::JrHb | Op::Jic | Op::J | Op::B | Op::Bc => InstructionKind::UnconditionalJump,
        _ => InstructionKind::Other,
    }
}

/// Computes the destination of a call or jump at `address`.
///
/// Register targets are only known for the instruction at the inspected
/// thread's PC; otherwise the register may already hold something else.
pub fn resolve_target(
    inst: &Inst,
    address: u64,
    at_pc: bool,
    regs: Option<&dyn Registers>,
    bi: &dyn LineResolver,
) -> Option<Location> {
    if !matches!(classify(inst), InstructionKind::Call | InstructionKind::UnconditionalJump) {
        return None;
    }

    let pc = match inst.pc_rel() {
        Some(rel) => rel.target(address),
        None => {
            let regs = regs.filter(|_| at_pc);
            let Some(regs) = regs else {
                log::debug!("{address:#x}: register target of {} not resolvable here", inst.op());
                return None;
            };
            // jr/jalr jump through their last register; jic/jialc add an offset.
            let reg = inst.args().filter_map(Arg::as_reg).last()?;
            let base = regs.get(usize::from(reg.id)).ok()?;
            let offset = inst.args().find_map(Arg::as_imm).unwrap_or(0);
            base.wrapping_add(offset as u64)
        }
    };

    let loc = Location::resolve(pc, bi);
    if !loc.is_resolved() {
        log::debug!("{address:#x}: target {pc:#x} is outside known functions");
    }
    Some(loc)
}

/// Decodes and classifies the instruction at the start of `mem`.
pub fn decode_one(
    mem: &[u8],
    address: u64,
    regs: Option<&dyn Registers>,
    at_pc: bool,
    bi: &dyn LineResolver,
    decoder: &Mips64Disassembler,
) -> Result<AsmInstruction, DecodeError> {
    let inst = decoder.decode(mem)?;
    let kind = classify(&inst);
    let dest_loc = resolve_target(&inst, address, at_pc, regs, bi);
    Ok(AsmInstruction {
        loc: Location::resolve(address, bi),
        dest_loc,
        bytes: mem[..INSN_SIZE].to_vec(),
        size: INSN_SIZE,
        kind,
        at_pc,
        inst: Some(inst),
        names: decoder.options().names,
    })
}

/// Disassembles all of `mem`, starting at `start`.
///
/// Undecodable words become entries with no instruction; a trailing partial
/// word becomes one short entry.
pub fn disassemble(
    mem: &[u8],
    start: u64,
    regs: Option<&dyn Registers>,
    bi: &dyn LineResolver,
    decoder: &Mips64Disassembler,
) -> Vec<AsmInstruction> {
    let mut out = Vec::with_capacity(mem.len() / INSN_SIZE + 1);
    for (idx, chunk) in mem.chunks(INSN_SIZE).enumerate() {
        let address = start.wrapping_add((idx * INSN_SIZE) as u64);
        let at_pc = regs.is_some_and(|r| r.pc() == address);
        match decode_one(chunk, address, regs, at_pc, bi, decoder) {
            Ok(inst) => out.push(inst),
            Err(err) => {
                log::trace!("{address:#x}: {err}");
                let loc = Location::resolve(address, bi);
                out.push(AsmInstruction::undecodable(loc, chunk, at_pc, decoder.options().names));
            }
        }
    }
    out
}
