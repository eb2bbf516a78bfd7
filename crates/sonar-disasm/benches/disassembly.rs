//! Benchmarks for disassembly performance.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sonar_core::RegisterNaming;
use sonar_disasm::mips64::{gnu_syntax, go_syntax, IsaLevel, Mips64Options};
use sonar_disasm::{Disassembler, Mips64Disassembler};

/// A small leaf-calling MIPS64 function: prologue, a compare and branch,
/// an indirect call and the epilogue.
const MIPS64_WORDS: &[u32] = &[
    0x67bd_fff0, // daddiu sp,sp,-16
    0xffbf_0008, // sd ra,8(sp)
    0xffbe_0000, // sd s8,0(sp)
    0x03a0_f02d, // move s8,sp
    0x3c02_1234, // lui v0,0x1234
    0x0064_102d, // daddu v0,v1,a0
    0x1043_0003, // beq v0,v1,.L1
    0x0000_0000, // nop
    0x0320_f809, // jalr t9
    0x0000_0000, // nop
    // .L1: epilogue
    0xdfbf_0008, // ld ra,8(sp)
    0xdfbe_0000, // ld s8,0(sp)
    0x03e0_0008, // jr ra
    0x67bd_0010, // daddiu sp,sp,16
];

/// Release 6 compact branches and PC-relative forms.
const MIPS64R6_WORDS: &[u32] = &[
    0xc800_0010, // bc
    0x0320_f809, // jalr t9
    0xec48_0004, // lwpc
    0x03e0_0009, // jr ra
];

fn le_bytes(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}

/// Larger code block for throughput testing (repeated pattern).
fn generate_large_mips64_block(size: usize) -> Vec<u8> {
    let pattern = le_bytes(MIPS64_WORDS);
    let mut result = Vec::with_capacity(size);
    while result.len() < size {
        let remaining = size - result.len();
        let to_copy = remaining.min(pattern.len());
        result.extend_from_slice(&pattern[..to_copy]);
    }
    result
}

fn bench_mips64_disassembly(c: &mut Criterion) {
    let disasm = Mips64Disassembler::new();
    let code = le_bytes(MIPS64_WORDS);

    let mut group = c.benchmark_group("mips64_disassembly");

    group.bench_function("single_instruction", |b| {
        b.iter(|| {
            let _ = disasm.decode_instruction(black_box(&code[..4]), 0x1000);
        })
    });

    // The epilogue sits near the end of the table scan.
    group.bench_function("late_row", |b| {
        b.iter(|| {
            let _ = disasm.decode_word(black_box(0x03e0_0008));
        })
    });

    group.bench_function("small_function", |b| {
        b.iter(|| {
            let _ = disasm.disassemble_block(black_box(&code), 0x1000);
        })
    });

    for size in [1024, 4096, 16384, 65536] {
        let code = generate_large_mips64_block(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("throughput", size), &code, |b, code| {
            b.iter(|| {
                let _ = disasm.disassemble_block(black_box(code), 0x1000);
            })
        });
    }

    group.finish();
}

fn bench_mips64r6_disassembly(c: &mut Criterion) {
    let disasm = Mips64Disassembler::with_options(Mips64Options::new().with_isa(IsaLevel::R6));
    let code = le_bytes(MIPS64R6_WORDS);

    let mut group = c.benchmark_group("mips64r6_disassembly");

    group.bench_function("small_function", |b| {
        b.iter(|| {
            let _ = disasm.disassemble_block(black_box(&code), 0x1000);
        })
    });

    group.finish();
}

fn bench_mips64_rendering(c: &mut Criterion) {
    let disasm = Mips64Disassembler::new();
    let insts: Vec<_> = MIPS64_WORDS
        .iter()
        .filter_map(|&w| disasm.decode_word(w).ok())
        .collect();

    let mut group = c.benchmark_group("mips64_rendering");

    group.bench_function("gnu", |b| {
        b.iter(|| {
            for inst in &insts {
                black_box(gnu_syntax(inst, 0x1000, RegisterNaming::Abi));
            }
        })
    });

    group.bench_function("go", |b| {
        b.iter(|| {
            for inst in &insts {
                black_box(go_syntax(inst, 0x1000, None));
            }
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_mips64_disassembly,
    bench_mips64r6_disassembly,
    bench_mips64_rendering
);
criterion_main!(benches);
