//! Function prologue recognition.
//!
//! A prologue is an opcode sequence: loading the goroutine pointer followed
//! by one of the stack-split checks the Go toolchain emits. Matching looks at
//! opcodes only and is a heuristic; a miss just means the entry point is used
//! as is.

use sonar_core::{LineResolver, Location};
use sonar_disasm::mips64::{Op, INSN_SIZE};
use sonar_disasm::Mips64Disassembler;

const GET_G: &[Op] = &[Op::Ld];

const TINY_STACKSPLIT: &[Op] = &[Op::Sltu, Op::Bnez];
const SMALL_STACKSPLIT: &[Op] = &[Op::Daddiu, Op::Sltu, Op::Bnez];
const BIG_STACKSPLIT: &[Op] = &[Op::Sltiu, Op::Bnez, Op::Nop, Op::Daddiu, Op::Sltu, Op::Bnez];

/// Every `get_g` prefix combined with every stack-split check, in order.
pub fn prologues<T: Copy>(get_g: &[&[T]], stacksplits: &[&[T]]) -> Vec<Vec<T>> {
    get_g
        .iter()
        .flat_map(|prefix| {
            stacksplits
                .iter()
                .map(move |split| prefix.iter().chain(split.iter()).copied().collect())
        })
        .collect()
}

/// The MIPS64 templates: tiny, then small, then big.
pub fn mips64_prologues() -> Vec<Vec<Op>> {
    prologues(&[GET_G], &[TINY_STACKSPLIT, SMALL_STACKSPLIT, BIG_STACKSPLIT])
}

/// True if `ops` begins with exactly `template`.
pub fn matches_prologue<T: PartialEq>(ops: &[T], template: &[T]) -> bool {
    ops.starts_with(template)
}

/// The first template `ops` begins with.
pub fn find_prologue<'a, T: PartialEq>(ops: &[T], templates: &'a [Vec<T>]) -> Option<&'a [T]> {
    templates
        .iter()
        .map(Vec::as_slice)
        .find(|template| matches_prologue(ops, template))
}

/// Address of the first instruction after the prologue of the function at
/// `entry`, whose code starts at `text[0]`.
///
/// Returns `entry` when no prologue matches, or when `same_line` is set and
/// the prologue ends on a different source line than `entry`.
pub fn first_pc_after_prologue(
    text: &[u8],
    entry: u64,
    same_line: bool,
    bi: &dyn LineResolver,
    decoder: &Mips64Disassembler,
) -> u64 {
    let templates = mips64_prologues();
    let longest = templates.iter().map(Vec::len).max().unwrap_or(0);
    let ops: Vec<Op> = text
        .chunks_exact(INSN_SIZE)
        .take(longest)
        .map_while(|word| decoder.decode(word).ok().map(|inst| inst.op()))
        .collect();

    let Some(prologue) = find_prologue(&ops, &templates) else {
        log::debug!("{entry:#x}: no prologue recognised");
        return entry;
    };
    let Some(pc) = entry.checked_add((prologue.len() * INSN_SIZE) as u64) else {
        log::debug!("{entry:#x}: prologue runs past the end of the address space");
        return entry;
    };

    if same_line {
        let line = |pc| Location::resolve(pc, bi).line;
        if line(entry) != line(pc) {
            return entry;
        }
    }
    pc
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonar_core::{Function, FunctionTable};

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Arm {
        Ldr,
        Sub,
        Cmp,
        B,
        Mov,
    }

    const ARM_GET_G: &[Arm] = &[Arm::Ldr];
    const ARM_TINY: &[Arm] = &[Arm::Mov, Arm::Cmp, Arm::B];
    const ARM_SMALL: &[Arm] = &[Arm::Sub, Arm::Cmp, Arm::B];

    fn arm_templates() -> Vec<Vec<Arm>> {
        prologues(&[ARM_GET_G], &[ARM_TINY, ARM_SMALL])
    }

    #[test]
    fn test_template_order() {
        let templates = mips64_prologues();
        assert_eq!(templates.len(), 3);
        assert_eq!(templates[0], vec![Op::Ld, Op::Sltu, Op::Bnez]);
        assert_eq!(templates[1], vec![Op::Ld, Op::Daddiu, Op::Sltu, Op::Bnez]);
        assert_eq!(templates[2].len(), 7);
    }

    #[test]
    fn test_generic_matching() {
        use Arm::*;
        let templates = arm_templates();
        let tiny = &templates[0];
        let small = &templates[1];

        assert!(matches_prologue(&[Ldr, Sub, Cmp, B], small));
        assert!(!matches_prologue(&[Ldr, Sub, Cmp, B], tiny));
        assert!(matches_prologue(&[Ldr, Mov, Cmp, B], tiny));
        assert!(!matches_prologue(&[Ldr, Mov, Cmp, B], small));

        assert_eq!(find_prologue(&[Ldr, Sub, Cmp, B, Mov], &templates), Some(small.as_slice()));
        // Anchored at the entry and never partial.
        assert_eq!(find_prologue(&[Mov, Ldr, Sub, Cmp, B], &templates), None);
        assert_eq!(find_prologue(&[Ldr, Sub, Cmp], &templates), None);
    }

    fn words(words: &[u32]) -> Vec<u8> {
        words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    fn table() -> FunctionTable {
        let mut table = FunctionTable::new();
        table
            .insert(Function::new("main.f", 0x1000, 0x1100), "main.go", vec![(0x1000, 10), (0x1008, 11)])
            .unwrap();
        table
    }

    #[test]
    fn test_mips64_small_prologue() {
        let text = words(&[
            0xdfc1_0010, // ld at,16(s8)
            0x67a1_ff00, // daddiu at,sp,-256
            0x03a1_082b, // sltu at,sp,at
            0x1420_0010, // bnez at,...
            0x0000_0000, // nop
        ]);
        let decoder = Mips64Disassembler::new();
        assert_eq!(first_pc_after_prologue(&text, 0x1000, false, &table(), &decoder), 0x1010);
        // The small check spans lines 10 and 11.
        assert_eq!(first_pc_after_prologue(&text, 0x1000, true, &table(), &decoder), 0x1000);
    }

    #[test]
    fn test_mips64_tiny_prologue() {
        let text = words(&[0xdfc1_0010, 0x03a1_082b, 0x1420_0010]);
        let decoder = Mips64Disassembler::new();
        assert_eq!(first_pc_after_prologue(&text, 0x1000, false, &table(), &decoder), 0x100c);
    }

    #[test]
    fn test_prologue_at_top_of_address_space() {
        let text = words(&[0xdfc1_0010, 0x03a1_082b, 0x1420_0010]);
        let decoder = Mips64Disassembler::new();
        let entry = u64::MAX - 4;
        assert_eq!(first_pc_after_prologue(&text, entry, false, &table(), &decoder), entry);
        assert_eq!(first_pc_after_prologue(&text, entry, true, &table(), &decoder), entry);
    }

    #[test]
    fn test_missing_prologue_falls_back_to_entry() {
        let decoder = Mips64Disassembler::new();
        let text = words(&[0x67bd_fff0, 0xffbf_0008]);
        assert_eq!(first_pc_after_prologue(&text, 0x1000, false, &table(), &decoder), 0x1000);
        // Undecodable and short input are misses as well.
        assert_eq!(first_pc_after_prologue(&words(&[0x4800_0000]), 0x1000, false, &table(), &decoder), 0x1000);
        assert_eq!(first_pc_after_prologue(&[0xdf], 0x1000, false, &table(), &decoder), 0x1000);
    }
}
