//! Property-based tests for register snapshots.
//!
//! - A copy equals its source at the moment of copying
//! - Later writes to either side never show through to the other
//! - The floating-point loader runs at most once per snapshot

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use proptest::prelude::*;

use sonar_core::Endianness;
use sonar_proc::{FpState, Mips64PtraceRegs, Mips64Registers, Registers, TransportError};

fn snapshot(gprs: [u64; 32], epc: u64, fp: Vec<u8>, calls: &Arc<AtomicUsize>) -> Mips64Registers {
    let regs = Mips64PtraceRegs {
        regs: gprs,
        epc,
        ..Mips64PtraceRegs::default()
    };
    let calls = Arc::clone(calls);
    let loader = FpState::Pending(Box::new(move || {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok::<_, TransportError>(fp)
    }));
    Mips64Registers::new(regs, loader, Endianness::Little)
}

// =============================================================================
// Snapshot Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn copy_is_independent(
        gprs in any::<[u64; 32]>(),
        epc in any::<u64>(),
        fp in prop::collection::vec(any::<u8>(), 264),
        idx in 0usize..32,
        value in any::<u64>(),
    ) {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut live = snapshot(gprs, epc, fp.clone(), &calls);
        let mut copy = live.snapshot().unwrap();

        prop_assert_eq!(copy.regs, live.regs);
        prop_assert_eq!(copy.fp_bytes(), Some(fp.as_slice()));
        prop_assert_eq!(copy.slice(true).unwrap(), live.slice(true).unwrap());

        live.regs.regs[idx] = value;
        live.regs.epc = epc.wrapping_add(4);
        prop_assert_eq!(copy.get(idx).unwrap(), gprs[idx]);
        prop_assert_eq!(copy.pc(), epc);

        copy.regs.regs[idx] = !value;
        prop_assert_eq!(live.get(idx).unwrap(), value);
        prop_assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn fp_loader_runs_at_most_once(requests in prop::collection::vec(any::<bool>(), 0..8)) {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut regs = snapshot([0; 32], 0, vec![0; 264], &calls);
        let mut wanted_fp = false;
        for floating_point in requests {
            wanted_fp |= floating_point;
            regs.slice(floating_point).unwrap();
        }
        prop_assert_eq!(calls.load(Ordering::SeqCst), usize::from(wanted_fp));
    }

    #[test]
    fn gpr_index_bounds(regs in any::<[u64; 32]>(), n in 0usize..64) {
        let r = Mips64Registers::new(
            Mips64PtraceRegs { regs, ..Mips64PtraceRegs::default() },
            FpState::Unavailable,
            Endianness::Little,
        );
        match r.get(n) {
            Ok(value) => prop_assert_eq!(value, regs[n]),
            Err(_) => prop_assert!(n >= 32),
        }
    }
}
