//! Architecture identification and properties.

/// Supported CPU architectures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Architecture {
    /// MIPS64, release 2 through release 6
    Mips64,
    /// Unknown architecture
    Unknown(u16),
}

impl Architecture {
    /// Returns the pointer size in bytes for this architecture.
    pub fn pointer_size(&self) -> usize {
        match self {
            Self::Mips64 => 8,
            Self::Unknown(_) => 8, // Default assumption
        }
    }

    /// Returns whether this is a 64-bit architecture.
    pub fn is_64bit(&self) -> bool {
        matches!(self, Self::Mips64)
    }

    /// Returns the name of this architecture.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mips64 => "mips64",
            Self::Unknown(_) => "unknown",
        }
    }

    /// Returns the bitness of this architecture.
    pub fn bitness(&self) -> Bitness {
        if self.is_64bit() {
            Bitness::Bits64
        } else {
            Bitness::Bits32
        }
    }
}

/// Binary bitness (32-bit or 64-bit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bitness {
    Bits32,
    Bits64,
}

/// Byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Endianness {
    #[default]
    Little,
    Big,
}

impl Endianness {
    /// Parses a byte-order name such as `"little"`, `"le"`, `"big"` or `"be"`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "little" | "le" | "el" => Some(Self::Little),
            "big" | "be" | "eb" => Some(Self::Big),
            _ => None,
        }
    }

    /// Reads a 32-bit word from the start of `bytes`.
    pub fn read_u32(self, bytes: &[u8]) -> Option<u32> {
        let word: [u8; 4] = bytes.get(..4)?.try_into().ok()?;
        Some(match self {
            Self::Little => u32::from_le_bytes(word),
            Self::Big => u32::from_be_bytes(word),
        })
    }

    /// Reads a 64-bit word from the start of `bytes`.
    pub fn read_u64(self, bytes: &[u8]) -> Option<u64> {
        let word: [u8; 8] = bytes.get(..8)?.try_into().ok()?;
        Some(match self {
            Self::Little => u64::from_le_bytes(word),
            Self::Big => u64::from_be_bytes(word),
        })
    }

    /// Returns `value` laid out in this byte order.
    pub fn u64_bytes(self, value: u64) -> [u8; 8] {
        match self {
            Self::Little => value.to_le_bytes(),
            Self::Big => value.to_be_bytes(),
        }
    }

    /// Returns `value` laid out in this byte order.
    pub fn u32_bytes(self, value: u32) -> [u8; 4] {
        match self {
            Self::Little => value.to_le_bytes(),
            Self::Big => value.to_be_bytes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_words() {
        let bytes = [0x78, 0x56, 0x34, 0x12, 0xf0, 0xde, 0xbc, 0x9a];
        assert_eq!(Endianness::Little.read_u32(&bytes), Some(0x1234_5678));
        assert_eq!(Endianness::Big.read_u32(&bytes), Some(0x7856_3412));
        assert_eq!(Endianness::Little.read_u64(&bytes), Some(0x9abc_def0_1234_5678));
        assert_eq!(Endianness::Little.read_u32(&bytes[..3]), None);
        assert_eq!(Endianness::Big.read_u64(&bytes[..7]), None);
    }

    #[test]
    fn test_word_bytes() {
        assert_eq!(Endianness::Big.u32_bytes(0x0c00_0800), [0x0c, 0x00, 0x08, 0x00]);
        let le = Endianness::Little.u64_bytes(0x1122_3344_5566_7788);
        assert_eq!(Endianness::Little.read_u64(&le), Some(0x1122_3344_5566_7788));
    }

    #[test]
    fn test_parse() {
        assert_eq!(Endianness::parse("LE"), Some(Endianness::Little));
        assert_eq!(Endianness::parse("big"), Some(Endianness::Big));
        assert_eq!(Endianness::parse("middle"), None);
        assert_eq!(Architecture::Mips64.pointer_size(), 8);
        assert_eq!(Architecture::Mips64.bitness(), Bitness::Bits64);
    }
}
