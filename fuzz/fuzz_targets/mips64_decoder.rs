#![no_main]

use libfuzzer_sys::fuzz_target;
use sonar_disasm::mips64::{IsaLevel, Mips64Disassembler, Mips64Options, AssemblyFlavour};
use sonar_disasm::traits::Disassembler;
use sonar_core::Endianness;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    // Both releases, both byte orders
    let decoders = [
        Mips64Disassembler::new(),
        Mips64Disassembler::with_options(Mips64Options::new().with_isa(IsaLevel::R6)),
        Mips64Disassembler::with_options(Mips64Options::new().with_endianness(Endianness::Big)),
    ];

    for disasm in &decoders {
        let _ = disasm.decode_instruction(data, 0x1000);

        let mut offset = 0;
        let mut count = 0;
        while data.len() - offset >= 4 && count < 100 {
            let address = 0x1000 + offset as u64;
            if let Ok(decoded) = disasm.decode_instruction(&data[offset..], address) {
                // MIPS64 instructions are always 4 bytes
                assert_eq!(decoded.size, 4);
                // Rendering must not panic either
                let _ = decoded.instruction.text(AssemblyFlavour::Gnu, disasm.options().names, address, None);
                let _ = decoded.instruction.text(AssemblyFlavour::Go, disasm.options().names, address, None);
            }
            offset += 4;
            count += 1;
        }
    }
});
