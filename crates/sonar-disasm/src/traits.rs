//! Disassembler traits.

use crate::DecodeError;
use sonar_core::Architecture;

/// Result of decoding an instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedInstruction<I> {
    /// The decoded instruction.
    pub instruction: I,
    /// Address of the first byte.
    pub address: u64,
    /// Number of bytes consumed.
    pub size: usize,
}

/// Trait for architecture-specific instruction decoders.
pub trait Disassembler {
    /// The instruction type this decoder produces.
    type Instruction;

    /// Decode a single instruction starting at the given address.
    ///
    /// # Arguments
    /// * `bytes` - The raw bytes to decode
    /// * `address` - The virtual address of the first byte
    ///
    /// # Returns
    /// The decoded instruction and the number of bytes consumed.
    fn decode_instruction(
        &self,
        bytes: &[u8],
        address: u64,
    ) -> Result<DecodedInstruction<Self::Instruction>, DecodeError>;

    /// Returns the minimum instruction size for this architecture.
    fn min_instruction_size(&self) -> usize;

    /// Returns the maximum instruction size for this architecture.
    fn max_instruction_size(&self) -> usize;

    /// Returns whether instructions are fixed-width.
    fn is_fixed_width(&self) -> bool;

    /// Returns the target architecture.
    fn architecture(&self) -> Architecture;

    /// Disassemble a block of code into instructions.
    ///
    /// Undecodable bytes produce an error entry and decoding resumes after
    /// the smallest instruction size.
    fn disassemble_block(
        &self,
        bytes: &[u8],
        start_address: u64,
    ) -> Vec<Result<DecodedInstruction<Self::Instruction>, DecodeError>> {
        let mut instructions = Vec::new();
        let mut offset = 0;
        let step = self.min_instruction_size().max(1);

        while offset < bytes.len() {
            let remaining = &bytes[offset..];
            let address = start_address.wrapping_add(offset as u64);

            match self.decode_instruction(remaining, address) {
                Ok(decoded) => {
                    offset += decoded.size.max(1);
                    instructions.push(Ok(decoded));
                }
                Err(e) => {
                    offset += step;
                    instructions.push(Err(e));
                }
            }
        }

        instructions
    }
}
