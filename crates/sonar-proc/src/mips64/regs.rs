//! MIPS64 Linux register blocks.

use std::fmt;

use sonar_core::Endianness;

use crate::error::{RegisterError, TransportError};
use crate::registers::{NamedRegister, Registers};

/// Size of the `NT_PRSTATUS` general-purpose block: 32 GPRs and six specials.
pub const GREGS_SIZE: usize = 38 * 8;

/// Size of the `NT_FPREGSET` block: 32 FPRs, then FCSR and FIR.
pub const FPREGS_SIZE: usize = 33 * 8;

const FPR_BYTES: usize = 32 * 8;

const SPECIAL_NAMES: [&str; 6] = ["Lo", "Hi", "Epc", "Badvaddr", "Status", "Cause"];

const SP: usize = 29;
const FP: usize = 30;
const GP: usize = 28;

fn words(bytes: &[u8], endianness: Endianness) -> Vec<u64> {
    bytes
        .chunks_exact(8)
        .filter_map(|chunk| endianness.read_u64(chunk))
        .collect()
}

/// The general-purpose register block as the kernel lays it out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mips64PtraceRegs {
    pub regs: [u64; 32],
    pub lo: u64,
    pub hi: u64,
    pub epc: u64,
    pub badvaddr: u64,
    pub status: u64,
    pub cause: u64,
}

impl Mips64PtraceRegs {
    /// Parses a raw block of exactly [`GREGS_SIZE`] bytes.
    pub fn from_bytes(bytes: &[u8], endianness: Endianness) -> Result<Self, RegisterError> {
        if bytes.len() != GREGS_SIZE {
            return Err(RegisterError::MalformedBlock {
                expected: GREGS_SIZE,
                actual: bytes.len(),
            });
        }
        let w = words(bytes, endianness);
        let mut regs = [0u64; 32];
        regs.copy_from_slice(&w[..32]);
        Ok(Self {
            regs,
            lo: w[32],
            hi: w[33],
            epc: w[34],
            badvaddr: w[35],
            status: w[36],
            cause: w[37],
        })
    }

    /// Lays the block out for a write back.
    pub fn to_bytes(&self, endianness: Endianness) -> Vec<u8> {
        self.regs
            .iter()
            .chain(self.specials().iter())
            .flat_map(|&w| endianness.u64_bytes(w))
            .collect()
    }

    fn specials(&self) -> [u64; 6] {
        [self.lo, self.hi, self.epc, self.badvaddr, self.status, self.cause]
    }

    fn named(&self) -> Vec<NamedRegister> {
        let gprs = self
            .regs
            .iter()
            .enumerate()
            .map(|(i, &v)| NamedRegister::new(format!("${i}"), v));
        let specials = SPECIAL_NAMES
            .iter()
            .zip(self.specials())
            .map(|(name, v)| NamedRegister::new(*name, v));
        gprs.chain(specials).collect()
    }
}

/// The floating-point register block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mips64FpRegs {
    pub regs: [u64; 32],
    pub fcsr: u32,
    pub fir: u32,
}

impl Mips64FpRegs {
    /// Parses a raw block. Kernels that stop after the FPRs leave the
    /// control registers zero.
    pub fn from_bytes(bytes: &[u8], endianness: Endianness) -> Result<Self, RegisterError> {
        if bytes.len() < FPR_BYTES {
            return Err(RegisterError::MalformedBlock {
                expected: FPREGS_SIZE,
                actual: bytes.len(),
            });
        }
        let mut regs = [0u64; 32];
        regs.copy_from_slice(&words(&bytes[..FPR_BYTES], endianness));
        let control = |at: usize| endianness.read_u32(bytes.get(at..).unwrap_or_default()).unwrap_or(0);
        Ok(Self {
            regs,
            fcsr: control(FPR_BYTES),
            fir: control(FPR_BYTES + 4),
        })
    }

    fn named(&self) -> Vec<NamedRegister> {
        self.regs
            .iter()
            .enumerate()
            .map(|(i, &v)| NamedRegister::new(format!("f{i}"), v))
            .chain([
                NamedRegister::new("fcsr", u64::from(self.fcsr)),
                NamedRegister::new("fir", u64::from(self.fir)),
            ])
            .collect()
    }
}

/// Fetches the raw floating-point block on first use.
pub type FpLoader = Box<dyn FnOnce() -> Result<Vec<u8>, TransportError> + Send>;

/// Floating-point state of a snapshot.
pub enum FpState {
    /// Not fetched yet.
    Pending(FpLoader),
    /// Fetched; `raw` is the block exactly as the transport returned it.
    Loaded { regs: Mips64FpRegs, raw: Vec<u8> },
    /// The target has no floating-point state, or fetching it failed.
    Unavailable,
}

impl fmt::Debug for FpState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending(_) => f.write_str("Pending"),
            Self::Loaded { regs, .. } => f.debug_tuple("Loaded").field(regs).finish(),
            Self::Unavailable => f.write_str("Unavailable"),
        }
    }
}

impl FpState {
    /// Interprets the result of a floating-point block read.
    ///
    /// `NotAvailable` is a state, not an error.
    pub fn from_read(
        read: Result<Vec<u8>, TransportError>,
        endianness: Endianness,
    ) -> Result<Self, RegisterError> {
        match read {
            Ok(raw) => {
                let regs = Mips64FpRegs::from_bytes(&raw, endianness)?;
                Ok(Self::Loaded { regs, raw })
            }
            Err(TransportError::NotAvailable) => Ok(Self::Unavailable),
            Err(err) => Err(err.into()),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Runs a pending loader. The loader is consumed even when it fails.
    fn load(&mut self, endianness: Endianness) -> Result<(), RegisterError> {
        let loader = match std::mem::replace(self, Self::Unavailable) {
            Self::Pending(loader) => loader,
            resolved => {
                *self = resolved;
                return Ok(());
            }
        };
        match Self::from_read(loader(), endianness) {
            Ok(Self::Unavailable) => {
                log::debug!("floating point registers not available");
                Ok(())
            }
            Ok(state) => {
                *self = state;
                Ok(())
            }
            Err(err) => {
                log::warn!("failed to load floating point registers: {err}");
                Err(err)
            }
        }
    }

    /// Deep copy of a resolved state. Pending loaders cannot be shared.
    fn duplicate(&self) -> Self {
        match self {
            Self::Loaded { regs, raw } => Self::Loaded {
                regs: *regs,
                raw: raw.clone(),
            },
            Self::Pending(_) | Self::Unavailable => Self::Unavailable,
        }
    }
}

/// One MIPS64 thread's registers, with lazily loaded floating point.
#[derive(Debug)]
pub struct Mips64Registers {
    pub regs: Mips64PtraceRegs,
    fp: FpState,
    endianness: Endianness,
}

impl Mips64Registers {
    pub fn new(regs: Mips64PtraceRegs, fp: FpState, endianness: Endianness) -> Self {
        Self { regs, fp, endianness }
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    pub fn fp_state(&self) -> &FpState {
        &self.fp
    }

    /// Loaded floating-point registers, if any.
    pub fn fp_registers(&self) -> Option<&Mips64FpRegs> {
        match &self.fp {
            FpState::Loaded { regs, .. } => Some(regs),
            _ => None,
        }
    }

    /// The raw floating-point block, if loaded.
    pub fn fp_bytes(&self) -> Option<&[u8]> {
        match &self.fp {
            FpState::Loaded { raw, .. } => Some(raw),
            _ => None,
        }
    }

    /// Runs the floating-point loader if it has not run yet.
    pub fn load_fp(&mut self) -> Result<(), RegisterError> {
        self.fp.load(self.endianness)
    }

    /// Independent copy. A pending loader is resolved first so the copy
    /// never carries one.
    pub fn snapshot(&mut self) -> Result<Self, RegisterError> {
        self.load_fp()?;
        Ok(Self {
            regs: self.regs,
            fp: self.fp.duplicate(),
            endianness: self.endianness,
        })
    }
}

impl Registers for Mips64Registers {
    fn pc(&self) -> u64 {
        self.regs.epc
    }

    fn sp(&self) -> u64 {
        self.regs.regs[SP]
    }

    fn bp(&self) -> u64 {
        self.regs.regs[FP]
    }

    fn tls(&self) -> u64 {
        0
    }

    fn g_addr(&self) -> Option<u64> {
        Some(self.regs.regs[GP])
    }

    fn get(&self, n: usize) -> Result<u64, RegisterError> {
        self.regs
            .regs
            .get(n)
            .copied()
            .ok_or(RegisterError::UnknownRegister(n))
    }

    fn slice(&mut self, floating_point: bool) -> Result<Vec<NamedRegister>, RegisterError> {
        let mut out = self.regs.named();
        if floating_point {
            self.load_fp()?;
            if let Some(fp) = self.fp_registers() {
                out.extend(fp.named());
            }
        }
        Ok(out)
    }

    fn copy(&mut self) -> Result<Box<dyn Registers>, RegisterError> {
        Ok(Box::new(self.snapshot()?))
    }
}
