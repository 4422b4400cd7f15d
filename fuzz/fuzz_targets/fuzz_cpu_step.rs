//! Fuzz target for CPU step execution.
//!
//! Builds an arbitrary register file and memory neighbourhood, executes one
//! instruction, and checks the step outcome is consistent with the table.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rvm8::{ExecutionError, FlatMemory, MemoryBus, CPU};

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u16,
    status: u8,
}

/// Memory region for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Bytes at the PC location (instruction + operands)
    instruction_bytes: [u8; 3],
    /// Zero page contents
    zero_page: [u8; 256],
    /// Stack page contents
    stack_page: [u8; 256],
    /// Small region of memory at 0x4000 for absolute addressing
    main_memory: [u8; 256],
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: FuzzMemory,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();

    // Reset vector -> 0x8000, BRK vector -> 0x9000
    memory.load(0xFFFC, &[0x00, 0x80, 0x00, 0x90]);
    memory.load(0x8000, &input.memory.instruction_bytes);
    memory.load(0x0000, &input.memory.zero_page);
    memory.load(0x0100, &input.memory.stack_page);
    memory.load(0x4000, &input.memory.main_memory);

    let mut cpu = CPU::new(memory);
    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_status(input.cpu_state.status);

    let opcode = input.memory.instruction_bytes[0];
    let descriptor = *cpu.table().get(opcode);

    match cpu.step() {
        Ok(cycles) => {
            assert!(descriptor.is_legal());
            assert!(cycles >= descriptor.base_cycles);
            assert!(cycles <= descriptor.base_cycles + 2);
            assert_eq!(cpu.cycles(), cycles as u64);
        }
        Err(ExecutionError::IllegalOpcode { opcode: op, address }) => {
            assert!(!descriptor.is_legal());
            assert_eq!(op, opcode);
            assert_eq!(address, 0x8000);
            assert_eq!(cpu.pc(), 0x8001);
            assert_eq!(cpu.cycles(), 0);
        }
        Err(err) => panic!("standard table produced {err}"),
    }
});
