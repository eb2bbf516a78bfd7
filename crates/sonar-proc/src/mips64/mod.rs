//! MIPS64 register layout and the native thread wrapper.

mod native;
mod regs;

pub use native::NativeThread;
pub use regs::{FpLoader, FpState, Mips64FpRegs, Mips64PtraceRegs, Mips64Registers, FPREGS_SIZE, GREGS_SIZE};
