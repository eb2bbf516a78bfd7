//! Decoder and rendering options.

use sonar_core::{Endianness, RegisterNaming};

/// MIPS64 architecture release the decoder accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IsaLevel {
    /// MIPS64 release 2 (and earlier encodings it keeps).
    #[default]
    R2,
    /// MIPS64 release 6. Branch-likely, HI/LO and unaligned accesses are gone;
    /// their slots hold compact branches and the new multiply forms.
    R6,
}

impl IsaLevel {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "r2" | "mips64r2" | "2" => Some(Self::R2),
            "r6" | "mips64r6" | "6" => Some(Self::R6),
            _ => None,
        }
    }
}

/// Assembly syntax used by [`Inst::text`](super::Inst::text).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AssemblyFlavour {
    /// binutils syntax.
    Gnu,
    /// Go (Plan 9) assembler syntax.
    #[default]
    Go,
}

impl AssemblyFlavour {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "gnu" | "att" | "objdump" => Some(Self::Gnu),
            "go" | "plan9" => Some(Self::Go),
            _ => None,
        }
    }
}

/// Options for [`Mips64Disassembler`](super::Mips64Disassembler).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mips64Options {
    /// Architecture release; rows for other releases are skipped.
    pub isa: IsaLevel,
    /// Byte order of instruction words.
    pub endianness: Endianness,
    /// Register spelling in GNU output.
    pub names: RegisterNaming,
}

impl Mips64Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_isa(mut self, isa: IsaLevel) -> Self {
        self.isa = isa;
        self
    }

    pub fn with_endianness(mut self, endianness: Endianness) -> Self {
        self.endianness = endianness;
        self
    }

    pub fn with_names(mut self, names: RegisterNaming) -> Self {
        self.names = names;
        self
    }
}
