//! Register access for a thread of a live MIPS64 process.

use std::sync::Arc;

use sonar_core::Endianness;

use super::regs::{FpLoader, FpState, Mips64PtraceRegs, Mips64Registers};
use crate::error::RegisterError;
use crate::transport::RegisterTransport;

const SP: usize = 29;

/// A stopped thread whose registers are read and written through `T`.
#[derive(Debug)]
pub struct NativeThread<T> {
    transport: Arc<T>,
    tid: u32,
    endianness: Endianness,
}

impl<T: RegisterTransport + 'static> NativeThread<T> {
    /// A little-endian thread.
    pub fn new(transport: Arc<T>, tid: u32) -> Self {
        Self {
            transport,
            tid,
            endianness: Endianness::Little,
        }
    }

    pub fn with_endianness(mut self, endianness: Endianness) -> Self {
        self.endianness = endianness;
        self
    }

    pub fn tid(&self) -> u32 {
        self.tid
    }

    /// Reads the general-purpose block. Floating point is fetched later, on
    /// first request.
    pub fn registers(&self) -> Result<Mips64Registers, RegisterError> {
        let regs = self.read_gregs()?;
        let transport = Arc::clone(&self.transport);
        let tid = self.tid;
        let loader: FpLoader = Box::new(move || transport.read_fpregs(tid));
        Ok(Mips64Registers::new(regs, FpState::Pending(loader), self.endianness))
    }

    /// Reads the floating-point block now.
    pub fn fp_registers(&self) -> Result<FpState, RegisterError> {
        FpState::from_read(self.transport.read_fpregs(self.tid), self.endianness)
    }

    pub fn set_pc(&self, pc: u64) -> Result<(), RegisterError> {
        self.update("pc", pc, |regs| regs.epc = pc)
    }

    pub fn set_sp(&self, sp: u64) -> Result<(), RegisterError> {
        self.update("sp", sp, |regs| regs.regs[SP] = sp)
    }

    /// Sets general-purpose register `n`.
    pub fn set_reg(&self, n: usize, value: u64) -> Result<(), RegisterError> {
        if n >= 32 {
            return Err(RegisterError::UnknownRegister(n));
        }
        self.update("gpr", value, |regs| regs.regs[n] = value)
    }

    /// MIPS64 has no DX register.
    pub fn set_dx(&self, _dx: u64) -> Result<(), RegisterError> {
        Err(RegisterError::Unsupported("set_dx"))
    }

    fn read_gregs(&self) -> Result<Mips64PtraceRegs, RegisterError> {
        let block = self.transport.read_gregs(self.tid)?;
        Mips64PtraceRegs::from_bytes(&block, self.endianness)
    }

    /// Re-reads the block, applies `f` and writes the result back.
    fn update(
        &self,
        what: &str,
        value: u64,
        f: impl FnOnce(&mut Mips64PtraceRegs),
    ) -> Result<(), RegisterError> {
        let mut regs = self.read_gregs()?;
        f(&mut regs);
        log::debug!("thread {}: set {what} = {value:#x}", self.tid);
        self.transport
            .write_gregs(self.tid, &regs.to_bytes(self.endianness))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::registers::Registers;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FakeTransport {
        gregs: Mutex<Vec<u8>>,
        fpregs: Option<Vec<u8>>,
        fp_reads: AtomicUsize,
        writes: AtomicUsize,
        read_only: bool,
    }

    impl FakeTransport {
        fn new(fpregs: Option<Vec<u8>>) -> Arc<Self> {
            Self::build(fpregs, false)
        }

        /// Reads succeed; every write fails with EPERM.
        fn read_only() -> Arc<Self> {
            Self::build(None, true)
        }

        fn build(fpregs: Option<Vec<u8>>, read_only: bool) -> Arc<Self> {
            let mut regs = Mips64PtraceRegs::default();
            regs.epc = 0x0012_0000;
            regs.regs[29] = 0xc000_0fe0;
            Arc::new(Self {
                gregs: Mutex::new(regs.to_bytes(Endianness::Little)),
                fpregs,
                fp_reads: AtomicUsize::new(0),
                writes: AtomicUsize::new(0),
                read_only,
            })
        }
    }

    impl RegisterTransport for FakeTransport {
        fn read_gregs(&self, tid: u32) -> Result<Vec<u8>, TransportError> {
            if tid != 7 {
                return Err(std::io::Error::from_raw_os_error(3).into());
            }
            Ok(self.gregs.lock().unwrap().clone())
        }

        fn write_gregs(&self, _tid: u32, block: &[u8]) -> Result<(), TransportError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if self.read_only {
                return Err(std::io::Error::from_raw_os_error(1).into());
            }
            *self.gregs.lock().unwrap() = block.to_vec();
            Ok(())
        }

        fn read_fpregs(&self, _tid: u32) -> Result<Vec<u8>, TransportError> {
            self.fp_reads.fetch_add(1, Ordering::SeqCst);
            self.fpregs.clone().ok_or(TransportError::NotAvailable)
        }
    }

    #[test]
    fn test_setters_write_back() {
        let transport = FakeTransport::new(None);
        let thread = NativeThread::new(Arc::clone(&transport), 7);

        thread.set_pc(0x0012_0040).unwrap();
        thread.set_sp(0xc000_0f00).unwrap();
        thread.set_reg(4, 42).unwrap();
        assert_eq!(transport.writes.load(Ordering::SeqCst), 3);

        let regs = thread.registers().unwrap();
        assert_eq!(regs.pc(), 0x0012_0040);
        assert_eq!(regs.sp(), 0xc000_0f00);
        assert_eq!(regs.get(4).unwrap(), 42);
    }

    #[test]
    fn test_unsupported_and_unknown() {
        let transport = FakeTransport::new(None);
        let thread = NativeThread::new(Arc::clone(&transport), 7);

        assert!(matches!(thread.set_dx(1), Err(RegisterError::Unsupported(_))));
        assert!(matches!(thread.set_reg(32, 1), Err(RegisterError::UnknownRegister(32))));
        assert_eq!(transport.writes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_transport_errors_propagate() {
        let thread = NativeThread::new(FakeTransport::new(None), 8);
        assert!(matches!(
            thread.registers(),
            Err(RegisterError::Transport(TransportError::Io(_)))
        ));
        assert!(thread.set_pc(0).is_err());
    }

    #[test]
    fn test_write_errors_propagate() {
        let transport = FakeTransport::read_only();
        let thread = NativeThread::new(Arc::clone(&transport), 7);

        assert!(matches!(
            thread.set_pc(0x0012_0040),
            Err(RegisterError::Transport(TransportError::Io(_)))
        ));
        assert!(matches!(
            thread.set_sp(0xc000_0f00),
            Err(RegisterError::Transport(TransportError::Io(_)))
        ));
        assert_eq!(transport.writes.load(Ordering::SeqCst), 2);

        // The failed writes left the thread untouched.
        let regs = thread.registers().unwrap();
        assert_eq!(regs.pc(), 0x0012_0000);
        assert_eq!(regs.sp(), 0xc000_0fe0);
    }

    #[test]
    fn test_fp_fetched_lazily() {
        let fp: Vec<u8> = (0..33u64).flat_map(|i| i.to_le_bytes()).collect();
        let transport = FakeTransport::new(Some(fp));
        let thread = NativeThread::new(Arc::clone(&transport), 7);

        let mut regs = thread.registers().unwrap();
        assert_eq!(transport.fp_reads.load(Ordering::SeqCst), 0);
        let list = regs.slice(true).unwrap();
        assert_eq!(list[38 + 3].value, 3);
        let _ = regs.copy().unwrap();
        assert_eq!(transport.fp_reads.load(Ordering::SeqCst), 1);

        assert!(matches!(thread.fp_registers().unwrap(), FpState::Loaded { .. }));
    }

    #[test]
    fn test_fp_unavailable() {
        let thread = NativeThread::new(FakeTransport::new(None), 7);
        assert!(matches!(thread.fp_registers().unwrap(), FpState::Unavailable));
        let mut regs = thread.registers().unwrap();
        assert_eq!(regs.slice(true).unwrap().len(), 38);
    }
}
