//! Disassembly error types.

use thiserror::Error;

/// Error type for instruction decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Instruction was truncated (not enough bytes).
    #[error("truncated instruction: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    /// No format row matched the word.
    #[error("unknown instruction {word:#010x}")]
    UnknownEncoding { word: u32 },
}

impl DecodeError {
    /// Creates a new Truncated error.
    pub fn truncated(needed: usize, available: usize) -> Self {
        Self::Truncated { needed, available }
    }

    /// Creates a new UnknownEncoding error.
    pub fn unknown(word: u32) -> Self {
        Self::UnknownEncoding { word }
    }
}

/// A malformed format-table row.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("row {row} ({op}): value {value:#010x} has bits outside mask {mask:#010x}")]
    ValueOutsideMask {
        row: usize,
        op: &'static str,
        value: u32,
        mask: u32,
    },

    #[error("row {row} ({op}) slot {slot}: field of {size} bits at {lsb} overruns the word")]
    FieldOutOfRange {
        row: usize,
        op: &'static str,
        slot: usize,
        size: u8,
        lsb: u8,
    },

    #[error("row {row} ({op}) slot {slot}: zero-width field with no implied value")]
    EmptyField { row: usize, op: &'static str, slot: usize },

    #[error("row {row} ({op}) slot {slot}: bitfield size does not follow an integer operand")]
    MisplacedMsb { row: usize, op: &'static str, slot: usize },

    #[error("row {row} ({op}) slot {slot}: register check does not follow a register operand")]
    MisplacedCheck { row: usize, op: &'static str, slot: usize },

    #[error("row {row} ({op}) slot {slot}: register check permits no relation")]
    UnsupportedCheck { row: usize, op: &'static str, slot: usize },

    #[error("row {row} ({op}) slot {slot}: operand follows an empty slot")]
    SlotGap { row: usize, op: &'static str, slot: usize },
}
