//! MIPS64 instruction decoder implementation.
//!
//! Decoding walks the format table in order. A row is a candidate when its
//! fixed bits and predicate match; it wins when every operand slot decodes.
//! A slot that fails (an out-of-bank register, an empty bitfield, a failed
//! register check) only rejects that row and the search continues.

use crate::{DecodeError, DecodedInstruction, Disassembler, TableError};
use sonar_core::Architecture;

use super::inst::{Inst, INSN_SIZE, MAX_ARGS};
use super::operand::Previous;
use super::options::Mips64Options;
use super::table::{validate_table, InstructionFormat, FORMATS};

/// MIPS64 disassembler.
#[derive(Debug, Clone)]
pub struct Mips64Disassembler {
    options: Mips64Options,
    table: &'static [InstructionFormat],
}

impl Mips64Disassembler {
    /// Creates a release 2, little-endian disassembler.
    pub fn new() -> Self {
        Self::with_options(Mips64Options::default())
    }

    pub fn with_options(options: Mips64Options) -> Self {
        Self {
            options,
            table: FORMATS,
        }
    }

    /// Uses `table` instead of the standard encodings, after validating it.
    pub fn with_table(
        options: Mips64Options,
        table: &'static [InstructionFormat],
    ) -> Result<Self, TableError> {
        validate_table(table)?;
        Ok(Self { options, table })
    }

    pub fn options(&self) -> &Mips64Options {
        &self.options
    }

    /// The rows this decoder searches.
    pub fn table(&self) -> &'static [InstructionFormat] {
        self.table
    }

    /// Decodes the instruction in the first four bytes of `bytes`.
    pub fn decode(&self, bytes: &[u8]) -> Result<Inst, DecodeError> {
        let word = self
            .options
            .endianness
            .read_u32(bytes)
            .ok_or_else(|| DecodeError::truncated(INSN_SIZE, bytes.len()))?;
        self.decode_word(word)
    }

    /// Decodes a raw instruction word.
    pub fn decode_word(&self, word: u32) -> Result<Inst, DecodeError> {
        self.decode_with_row(word).map(|(inst, _)| inst)
    }

    /// Decodes `word` and also returns the index of the row that matched.
    pub fn decode_with_row(&self, word: u32) -> Result<(Inst, usize), DecodeError> {
        let found = self
            .table
            .iter()
            .enumerate()
            .filter(|(_, format)| format.isa.admits(self.options.isa))
            .find_map(|(row, format)| decode_row(format, word).map(|inst| (inst, row)));

        found.ok_or_else(|| {
            log::trace!("no format matches {word:#010x}");
            DecodeError::unknown(word)
        })
    }

    /// Decodes `word`, recording the winning row in `coverage`.
    #[cfg(any(test, feature = "coverage"))]
    pub fn decode_traced(&self, word: u32, coverage: &mut Coverage) -> Result<Inst, DecodeError> {
        let (inst, row) = self.decode_with_row(word)?;
        coverage.record(row);
        Ok(inst)
    }
}

impl Default for Mips64Disassembler {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_row(format: &InstructionFormat, word: u32) -> Option<Inst> {
    if !format.matches(word) {
        return None;
    }

    let mut args = [None; MAX_ARGS];
    let mut elidable = 0u8;
    let mut prev = Previous::default();
    for (slot, desc) in format.operands().enumerate() {
        let (arg, next) = desc.decode(word, prev)?;
        args[slot] = Some(arg);
        if desc.is_elidable() {
            elidable |= 1 << slot;
        }
        prev = next;
    }
    Some(Inst::new(format.op, args, elidable, word))
}

/// Per-row match counts over a series of decodes.
#[cfg(any(test, feature = "coverage"))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coverage {
    hits: Vec<u64>,
}

#[cfg(any(test, feature = "coverage"))]
impl Coverage {
    /// Creates a counter for a table of `rows` rows.
    pub fn new(rows: usize) -> Self {
        Self {
            hits: vec![0; rows],
        }
    }

    pub fn for_decoder(decoder: &Mips64Disassembler) -> Self {
        Self::new(decoder.table().len())
    }

    pub fn record(&mut self, row: usize) {
        if row >= self.hits.len() {
            self.hits.resize(row + 1, 0);
        }
        self.hits[row] += 1;
    }

    /// Number of decodes row `row` won.
    pub fn hits(&self, row: usize) -> u64 {
        self.hits.get(row).copied().unwrap_or(0)
    }

    /// Rows that never won a decode.
    pub fn unreached(&self) -> Vec<usize> {
        self.hits
            .iter()
            .enumerate()
            .filter(|(_, &n)| n == 0)
            .map(|(row, _)| row)
            .collect()
    }
}

impl Disassembler for Mips64Disassembler {
    type Instruction = Inst;

    fn decode_instruction(
        &self,
        bytes: &[u8],
        address: u64,
    ) -> Result<DecodedInstruction<Inst>, DecodeError> {
        let instruction = self.decode(bytes)?;
        Ok(DecodedInstruction {
            instruction,
            address,
            size: INSN_SIZE,
        })
    }

    fn min_instruction_size(&self) -> usize {
        INSN_SIZE
    }

    fn max_instruction_size(&self) -> usize {
        INSN_SIZE
    }

    fn is_fixed_width(&self) -> bool {
        true
    }

    fn architecture(&self) -> Architecture {
        Architecture::Mips64
    }
}
