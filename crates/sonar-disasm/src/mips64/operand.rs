//! Operand descriptors.
//!
//! Every operand slot of a format row is described by one
//! [`OperandDescriptor`]: a bit-field of the instruction word plus the policy
//! that turns the raw field value into an [`Arg`]. Slots are decoded left to
//! right and each decode gets the [`Previous`] accumulator produced by the slot
//! before it, which is how the "same as previous" and "relative to the
//! previous LSB" operand kinds see their neighbours.

use sonar_core::{Register, RegisterClass};

use super::inst::{Arg, Imm, PcRel};

/// A bit-field of a 32-bit instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field {
    /// Width in bits. Zero for values implied by the opcode.
    pub size: u8,
    /// Position of the least significant bit.
    pub lsb: u8,
}

impl Field {
    pub const fn new(size: u8, lsb: u8) -> Self {
        Self { size, lsb }
    }

    /// Mask of `size` low bits.
    pub const fn mask(self) -> u32 {
        if self.size >= 32 {
            u32::MAX
        } else {
            (1u32 << self.size) - 1
        }
    }

    /// The field's bits in place within the word.
    pub fn bits(self) -> u32 {
        self.mask().checked_shl(u32::from(self.lsb)).unwrap_or(0)
    }

    /// Extracts the raw field value from `word`.
    pub fn extract(self, word: u32) -> u32 {
        if self.size == 0 {
            return 0;
        }
        word.checked_shr(u32::from(self.lsb)).unwrap_or(0) & self.mask()
    }

    /// ORs `value` into the field. Bits already set in the field are kept;
    /// callers clear the field first when overwriting.
    pub fn insert(self, word: u32, value: u32) -> u32 {
        word | (value & self.mask()).checked_shl(u32::from(self.lsb)).unwrap_or(0)
    }

    /// Returns true if the field fits in a 32-bit word.
    pub fn fits(self) -> bool {
        u32::from(self.size) + u32::from(self.lsb) <= 32
    }
}

/// Integer operand: `v` counts cyclically down from `max_val`, then `bias` is
/// added and the result is shifted left by `shift`.
///
/// Unsigned fields use `max_val = 2^size - 1`, signed fields
/// `max_val = 2^(size-1) - 1`; anything else describes a rotated range such as
/// "0 encodes 8".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntOperand {
    pub field: Field,
    pub max_val: u32,
    pub bias: i32,
    pub shift: u8,
    /// Render in hexadecimal.
    pub print_hex: bool,
}

impl IntOperand {
    pub fn decode(&self, uval: u32) -> i64 {
        let mut v = i64::from(uval);
        v |= (i64::from(self.max_val) - v) & (-1i64 << self.field.size);
        v += i64::from(self.bias);
        v << self.shift
    }

    /// Largest decodable value.
    pub fn max(&self) -> i64 {
        (i64::from(self.max_val) + i64::from(self.bias)) << self.shift
    }

    /// Smallest decodable value.
    pub fn min(&self) -> i64 {
        self.max() - (i64::from(self.field.mask()) << self.shift)
    }

    /// Field value that decodes to `value`, if any.
    pub fn encode(&self, value: i64) -> Option<u32> {
        let align = (1i64 << self.shift) - 1;
        if value < self.min() || value > self.max() || value & align != 0 {
            return None;
        }
        let raw = (value >> self.shift) - i64::from(self.bias);
        Some((raw as u32) & self.field.mask())
    }
}

/// Integer operand whose field indexes a lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MappedIntOperand {
    pub field: Field,
    pub map: &'static [i32],
    pub print_hex: bool,
}

impl MappedIntOperand {
    pub fn decode(&self, uval: u32) -> Option<i64> {
        self.map.get(uval as usize).map(|&v| i64::from(v))
    }
}

/// Bitfield size operand of `ext`/`ins` style instructions.
///
/// The field holds either the MSB position (`add_lsb`, the size is then
/// `value + bias - lsb`) or the size directly (`value + bias`). The LSB comes
/// from the preceding integer operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MsbOperand {
    pub field: Field,
    pub bias: i32,
    pub add_lsb: bool,
    /// Width of the operation; `lsb + size` may not exceed it.
    pub opsize: u32,
}

impl MsbOperand {
    /// Returns the bitfield size, or `None` if it would be empty or overrun
    /// the operation width.
    pub fn decode(&self, uval: u32, lsb: i64) -> Option<i64> {
        let mut size = i64::from(uval) + i64::from(self.bias);
        if self.add_lsb {
            size -= lsb;
        }
        if size <= 0 || lsb < 0 || lsb + size > i64::from(self.opsize) {
            return None;
        }
        Some(size)
    }
}

/// Register operand, optionally remapped through a lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegOperand {
    pub field: Field,
    pub class: RegisterClass,
    pub map: Option<&'static [u8]>,
}

impl RegOperand {
    pub fn decode(&self, uval: u32) -> Option<Register> {
        let id = match self.map {
            Some(map) => u16::from(*map.get(uval as usize)?),
            None => u16::try_from(uval).ok()?,
        };
        (id < self.class.count()).then_some(Register::new(self.class, id))
    }
}

/// Register pair addressed by a single field through two remap tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegPairOperand {
    pub field: Field,
    pub class: RegisterClass,
    pub first: &'static [u8],
    pub second: &'static [u8],
}

impl RegPairOperand {
    pub fn decode(&self, uval: u32) -> Option<(Register, Register)> {
        let idx = uval as usize;
        let first = *self.first.get(idx)?;
        let second = *self.second.get(idx)?;
        Some((
            Register::new(self.class, u16::from(first)),
            Register::new(self.class, u16::from(second)),
        ))
    }
}

/// PC-relative operand: an integer offset applied to an aligned base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PcRelOperand {
    pub offset: IntOperand,
    /// Low bits of the base cleared before adding the offset.
    pub align_log2: u8,
    /// Copy the ISA mode bit (bit 0) from the base. Jumps and branches set
    /// this; PC-relative loads do not.
    pub include_isa: bool,
    /// Toggle the ISA mode bit (`jalx`).
    pub flip_isa: bool,
}

impl PcRelOperand {
    pub fn decode(&self, uval: u32) -> PcRel {
        PcRel {
            offset: self.offset.decode(uval),
            align_log2: self.align_log2,
            include_isa: self.include_isa,
            flip_isa: self.flip_isa,
        }
    }

    /// Target address for field value `uval` against `base_pc`.
    pub fn resolve(&self, base_pc: u64, uval: u32) -> u64 {
        self.decode(uval).resolve(base_pc)
    }
}

/// Register operand validated against the register decoded just before it.
///
/// Each flag permits one relation between this field `v` and the previous
/// register `p`; `v` is accepted only if every relation that holds is
/// permitted (`v > p` needs `greater_than`, `v < p` needs `less_than`,
/// `v == p` needs `equal`, and `v == 0` needs `zero`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CheckPrevOperand {
    pub field: Field,
    pub class: RegisterClass,
    pub greater_than: bool,
    pub less_than: bool,
    pub equal: bool,
    pub zero: bool,
}

impl CheckPrevOperand {
    pub fn check(&self, uval: u32, prev: Register) -> bool {
        let p = u32::from(prev.id);
        (uval <= p || self.greater_than)
            && (uval >= p || self.less_than)
            && (uval != p || self.equal)
            && (uval != 0 || self.zero)
    }

    /// A descriptor that permits no relation can never match.
    pub fn is_satisfiable(&self) -> bool {
        self.greater_than || self.less_than || self.equal
    }

    /// Equality-only checks repeat the previous register.
    pub fn repeats_previous(&self) -> bool {
        self.equal && !self.greater_than && !self.less_than
    }

    pub fn decode(&self, uval: u32, prev: Option<Register>) -> Option<Register> {
        let prev = prev?;
        if prev.class != self.class || !self.check(uval, prev) {
            return None;
        }
        let id = u16::try_from(uval).ok()?;
        Some(Register::new(self.class, id))
    }
}

/// What earlier slots of the same row have decoded so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Previous {
    /// Most recent integer operand.
    pub int: Option<i64>,
    /// Most recent register operand.
    pub reg: Option<Register>,
    /// The operand in the immediately preceding slot.
    pub arg: Option<Arg>,
}

impl Previous {
    fn after(self, arg: Arg) -> Self {
        let mut next = Self {
            arg: Some(arg),
            ..self
        };
        match arg {
            Arg::Imm(imm) => next.int = Some(imm.value),
            Arg::Reg(reg) => next.reg = Some(reg),
            Arg::RegPair(_, second) => next.reg = Some(second),
            Arg::PcRel(_) => {}
        }
        next
    }
}

/// How one operand slot is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandDescriptor {
    Int(IntOperand),
    MappedInt(MappedIntOperand),
    Msb(MsbOperand),
    Reg(RegOperand),
    /// Like `Reg`, but omitted from rendered output when it repeats the
    /// preceding register operand.
    OptionalReg(RegOperand),
    RegPair(RegPairOperand),
    PcRel(PcRelOperand),
    CheckPrev(CheckPrevOperand),
}

impl OperandDescriptor {
    /// The bit-field this descriptor reads.
    pub fn field(&self) -> Field {
        match self {
            Self::Int(op) => op.field,
            Self::MappedInt(op) => op.field,
            Self::Msb(op) => op.field,
            Self::Reg(op) | Self::OptionalReg(op) => op.field,
            Self::RegPair(op) => op.field,
            Self::PcRel(op) => op.offset.field,
            Self::CheckPrev(op) => op.field,
        }
    }

    /// Returns true if the value comes from a table rather than the field
    /// itself, which is what makes a zero-width field meaningful.
    pub fn is_implied(&self) -> bool {
        match self {
            Self::MappedInt(op) => !op.map.is_empty(),
            Self::Reg(op) | Self::OptionalReg(op) => op.map.is_some_and(|m| !m.is_empty()),
            Self::RegPair(op) => !op.first.is_empty() && !op.second.is_empty(),
            _ => false,
        }
    }

    /// Returns true if rendering may drop this slot when it repeats the
    /// preceding register.
    pub fn is_elidable(&self) -> bool {
        match self {
            Self::OptionalReg(_) => true,
            Self::CheckPrev(op) => op.repeats_previous(),
            _ => false,
        }
    }

    /// Decodes this slot of `word`. `None` means the row does not match.
    pub fn decode(&self, word: u32, prev: Previous) -> Option<(Arg, Previous)> {
        let uval = self.field().extract(word);
        let arg = match self {
            Self::Int(op) => Arg::Imm(Imm {
                value: op.decode(uval),
                hex: op.print_hex,
            }),
            Self::MappedInt(op) => Arg::Imm(Imm {
                value: op.decode(uval)?,
                hex: op.print_hex,
            }),
            Self::Msb(op) => Arg::Imm(Imm {
                value: op.decode(uval, prev.int?)?,
                hex: true,
            }),
            Self::Reg(op) | Self::OptionalReg(op) => Arg::Reg(op.decode(uval)?),
            Self::RegPair(op) => {
                let (first, second) = op.decode(uval)?;
                Arg::RegPair(first, second)
            }
            Self::PcRel(op) => Arg::PcRel(op.decode(uval)),
            Self::CheckPrev(op) => Arg::Reg(op.decode(uval, prev.reg)?),
        };
        Some((arg, prev.after(arg)))
    }
}

// Descriptor constructors, named after the encodings they describe.

/// Unsigned field printed in decimal.
pub const fn uint(size: u8, lsb: u8) -> OperandDescriptor {
    OperandDescriptor::Int(IntOperand {
        field: Field::new(size, lsb),
        max_val: (1u32 << size) - 1,
        bias: 0,
        shift: 0,
        print_hex: false,
    })
}

/// Unsigned field printed in hex.
pub const fn hint(size: u8, lsb: u8) -> OperandDescriptor {
    OperandDescriptor::Int(IntOperand {
        field: Field::new(size, lsb),
        max_val: (1u32 << size) - 1,
        bias: 0,
        shift: 0,
        print_hex: true,
    })
}

/// Two's-complement field.
pub const fn sint(size: u8, lsb: u8) -> OperandDescriptor {
    OperandDescriptor::Int(IntOperand {
        field: Field::new(size, lsb),
        max_val: (1u32 << (size - 1)) - 1,
        bias: 0,
        shift: 0,
        print_hex: false,
    })
}

/// Two's-complement field scaled by `1 << shift`.
pub const fn sint_shifted(size: u8, lsb: u8, shift: u8) -> OperandDescriptor {
    OperandDescriptor::Int(IntOperand {
        field: Field::new(size, lsb),
        max_val: (1u32 << (size - 1)) - 1,
        bias: 0,
        shift,
        print_hex: false,
    })
}

/// Unsigned bit position with a bias (shift amounts, bitfield LSBs).
pub const fn bit(size: u8, lsb: u8, bias: i32) -> OperandDescriptor {
    OperandDescriptor::Int(IntOperand {
        field: Field::new(size, lsb),
        max_val: (1u32 << size) - 1,
        bias,
        shift: 0,
        print_hex: true,
    })
}

pub const fn mapped_int(size: u8, lsb: u8, map: &'static [i32], print_hex: bool) -> OperandDescriptor {
    OperandDescriptor::MappedInt(MappedIntOperand {
        field: Field::new(size, lsb),
        map,
        print_hex,
    })
}

pub const fn msb(size: u8, lsb: u8, bias: i32, add_lsb: bool, opsize: u32) -> OperandDescriptor {
    OperandDescriptor::Msb(MsbOperand {
        field: Field::new(size, lsb),
        bias,
        add_lsb,
        opsize,
    })
}

pub const fn reg(size: u8, lsb: u8, class: RegisterClass) -> OperandDescriptor {
    OperandDescriptor::Reg(RegOperand {
        field: Field::new(size, lsb),
        class,
        map: None,
    })
}

pub const fn mapped_reg(size: u8, lsb: u8, class: RegisterClass, map: &'static [u8]) -> OperandDescriptor {
    OperandDescriptor::Reg(RegOperand {
        field: Field::new(size, lsb),
        class,
        map: Some(map),
    })
}

pub const fn opt_reg(size: u8, lsb: u8, class: RegisterClass) -> OperandDescriptor {
    OperandDescriptor::OptionalReg(RegOperand {
        field: Field::new(size, lsb),
        class,
        map: None,
    })
}

pub const fn reg_pair(
    size: u8,
    lsb: u8,
    class: RegisterClass,
    first: &'static [u8],
    second: &'static [u8],
) -> OperandDescriptor {
    OperandDescriptor::RegPair(RegPairOperand {
        field: Field::new(size, lsb),
        class,
        first,
        second,
    })
}

pub const fn pcrel(
    size: u8,
    lsb: u8,
    is_signed: bool,
    shift: u8,
    align_log2: u8,
    include_isa: bool,
    flip_isa: bool,
) -> OperandDescriptor {
    let value_bits = if is_signed { size - 1 } else { size };
    OperandDescriptor::PcRel(PcRelOperand {
        offset: IntOperand {
            field: Field::new(size, lsb),
            max_val: (1u32 << value_bits) - 1,
            bias: 0,
            shift,
            print_hex: true,
        },
        align_log2,
        include_isa,
        flip_isa,
    })
}

/// Conditional or compact branch offset, relative to the delay slot.
pub const fn branch(size: u8, lsb: u8, shift: u8) -> OperandDescriptor {
    pcrel(size, lsb, true, shift, 0, true, false)
}

/// Region jump: the field replaces the low `size + shift` bits of the PC.
pub const fn jump(size: u8, lsb: u8, shift: u8) -> OperandDescriptor {
    pcrel(size, lsb, false, shift, size + shift, true, false)
}

/// Region jump that also switches ISA mode.
pub const fn jalx(size: u8, lsb: u8, shift: u8) -> OperandDescriptor {
    pcrel(size, lsb, false, shift, size + shift, true, true)
}

pub const fn prev_check(
    size: u8,
    lsb: u8,
    greater_than: bool,
    less_than: bool,
    equal: bool,
    zero: bool,
) -> OperandDescriptor {
    OperandDescriptor::CheckPrev(CheckPrevOperand {
        field: Field::new(size, lsb),
        class: RegisterClass::General,
        greater_than,
        less_than,
        equal,
        zero,
    })
}
