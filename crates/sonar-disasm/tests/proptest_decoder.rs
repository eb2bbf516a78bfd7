//! Property-based tests for the MIPS64 decoder.
//!
//! These tests verify invariants that should hold for every word:
//! - Decoding never panics on arbitrary input
//! - Every input decodes or fails with one of the two decode errors
//! - Deterministic decoding (same input → same output)
//! - Integer operands round-trip through encode/decode over their range

use proptest::prelude::*;

use sonar_disasm::mips64::operand::{bit, hint, sint, sint_shifted, uint, Field, IntOperand};
use sonar_disasm::mips64::{IsaLevel, Mips64Disassembler, Mips64Options, OperandDescriptor};
use sonar_disasm::traits::Disassembler;
use sonar_disasm::DecodeError;

fn decoders() -> [Mips64Disassembler; 2] {
    [
        Mips64Disassembler::new(),
        Mips64Disassembler::with_options(Mips64Options::new().with_isa(IsaLevel::R6)),
    ]
}

fn int(desc: OperandDescriptor) -> IntOperand {
    match desc {
        OperandDescriptor::Int(op) => op,
        other => panic!("not an integer descriptor: {other:?}"),
    }
}

fn int_descriptors() -> Vec<IntOperand> {
    vec![
        int(uint(5, 6)),
        int(uint(3, 0)),
        int(hint(16, 0)),
        int(sint(16, 0)),
        int(sint(9, 7)),
        int(sint_shifted(19, 0, 2)),
        int(bit(5, 6, 32)),
        int(bit(2, 6, 1)),
        IntOperand {
            field: Field::new(3, 0),
            max_val: 8,
            bias: 0,
            shift: 0,
            print_hex: false,
        },
    ]
}

// =============================================================================
// Decoder Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10000))]

    /// Decoding arbitrary bytes should never panic.
    #[test]
    fn mips64_decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..16)) {
        for disasm in decoders() {
            let _ = disasm.decode_instruction(&bytes, 0x1000);
        }
    }

    /// Every word decodes or reports an unknown encoding of that same word.
    #[test]
    fn mips64_decode_is_total(word in any::<u32>()) {
        for disasm in decoders() {
            match disasm.decode_word(word) {
                Ok(inst) => {
                    prop_assert_eq!(inst.word(), word);
                    prop_assert_eq!(inst.len(), 4);
                }
                Err(DecodeError::UnknownEncoding { word: reported }) => prop_assert_eq!(reported, word),
                Err(other) => prop_assert!(false, "unexpected error {other:?}"),
            }
        }
    }

    /// Fewer than four bytes is always a truncation, never an unknown word.
    #[test]
    fn mips64_short_input_is_truncated(bytes in prop::collection::vec(any::<u8>(), 0..4)) {
        let err = Mips64Disassembler::new().decode(&bytes).unwrap_err();
        prop_assert_eq!(err, DecodeError::Truncated { needed: 4, available: bytes.len() });
    }

    /// Decoding is deterministic: same input always produces same output.
    #[test]
    fn mips64_decode_is_deterministic(word in any::<u32>()) {
        for disasm in decoders() {
            prop_assert_eq!(disasm.decode_with_row(word), disasm.decode_with_row(word));
        }
    }

    /// The winning row really matches the word.
    #[test]
    fn mips64_winning_row_matches(word in any::<u32>()) {
        for disasm in decoders() {
            if let Ok((inst, row)) = disasm.decode_with_row(word) {
                let format = &disasm.table()[row];
                prop_assert!(format.matches(word));
                prop_assert_eq!(format.op, inst.op());
                prop_assert_eq!(inst.args().count(), format.operands().count());
            }
        }
    }

    /// Block disassembly produces one entry per word.
    #[test]
    fn mips64_block_covers_input(words in prop::collection::vec(any::<u32>(), 0..64)) {
        let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        let block = Mips64Disassembler::new().disassemble_block(&bytes, 0x4000);
        prop_assert_eq!(block.len(), words.len());
    }
}

// =============================================================================
// Operand Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// Every raw field value decodes into [min, max] and encodes back to itself.
    #[test]
    fn integer_round_trip(idx in 0usize..9, raw in any::<u32>()) {
        let op = int_descriptors()[idx];
        prop_assert!(op.min() <= op.max());
        let uval = raw & op.field.mask();
        let value = op.decode(uval);
        prop_assert!(value >= op.min() && value <= op.max());
        prop_assert_eq!(op.encode(value), Some(uval));
    }

    /// Values outside [min, max] never encode.
    #[test]
    fn integer_rejects_out_of_range(idx in 0usize..9, excess in 1i64..1000) {
        let op = int_descriptors()[idx];
        prop_assert_eq!(op.encode(op.max() + (excess << op.shift)), None);
        prop_assert_eq!(op.encode(op.min() - (excess << op.shift)), None);
    }

    /// Insert into a cleared field, then extract, gives back the masked value.
    #[test]
    fn field_insert_extract(size in 1u8..=16, lsb in 0u8..=16, value in any::<u32>(), noise in any::<u32>()) {
        let field = Field::new(size, lsb);
        let cleared = noise & !field.bits();
        let word = field.insert(cleared, value);
        prop_assert_eq!(field.extract(word), value & field.mask());
        prop_assert_eq!(word & !field.bits(), cleared);
    }
}
