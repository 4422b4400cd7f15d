//! Property-based tests for CPU invariants.
//!
//! These tests use proptest to verify that stepping maintains fundamental
//! invariants across all opcodes and register contents.

use proptest::prelude::*;
use rvm8::{ExecutionError, FlatMemory, InstructionTable, MemoryBus, CPU};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

/// Legal opcodes whose only effect on PC is to step past the instruction.
fn sequential_opcodes() -> Vec<u8> {
    InstructionTable::standard()
        .iter()
        .filter(|d| d.operation.is_some_and(|op| !op.transfers_control()))
        .map(|d| d.opcode)
        .collect()
}

fn illegal_opcodes() -> Vec<u8> {
    InstructionTable::standard()
        .iter()
        .filter(|d| !d.is_legal())
        .map(|d| d.opcode)
        .collect()
}

proptest! {
    /// PC advances by exactly the instruction size for sequential opcodes.
    #[test]
    fn prop_pc_advances_by_instruction_size(
        opcode in prop::sample::select(sequential_opcodes()),
        operand_lo in any::<u8>(),
        operand_hi in any::<u8>(),
        a in any::<u8>(),
        x in any::<u8>(),
        y in any::<u8>(),
    ) {
        let mut cpu = setup_cpu();
        cpu.memory_mut().load(0x8000, &[opcode, operand_lo, operand_hi]);
        cpu.set_a(a);
        cpu.set_x(x);
        cpu.set_y(y);
        let size = cpu.table()[opcode].size_bytes() as u16;

        prop_assert!(cpu.step().is_ok());
        prop_assert_eq!(cpu.pc(), 0x8000 + size);
    }

    /// A step costs its base cycles plus at most the page-cross cycle.
    #[test]
    fn prop_cycles_within_base_plus_penalty(
        opcode in prop::sample::select(sequential_opcodes()),
        operand_lo in any::<u8>(),
        operand_hi in any::<u8>(),
        x in any::<u8>(),
        y in any::<u8>(),
    ) {
        let mut cpu = setup_cpu();
        cpu.memory_mut().load(0x8000, &[opcode, operand_lo, operand_hi]);
        cpu.set_x(x);
        cpu.set_y(y);
        let descriptor = cpu.table()[opcode];

        let cycles = cpu.step().unwrap();

        prop_assert!(cycles >= descriptor.base_cycles);
        let penalty = descriptor.operation.unwrap().pays_page_cross_penalty() as u8;
        prop_assert!(cycles <= descriptor.base_cycles + penalty);
        prop_assert_eq!(cpu.cycles(), cycles as u64);
    }

    /// Illegal opcodes consume one byte, zero cycles, and nothing else.
    #[test]
    fn prop_illegal_opcode_is_a_noop(
        opcode in prop::sample::select(illegal_opcodes()),
        a in any::<u8>(),
        status in any::<u8>(),
        pc in any::<u16>(),
    ) {
        let mut cpu = setup_cpu();
        cpu.set_pc(pc);
        cpu.write(pc, opcode);
        cpu.set_a(a);
        cpu.set_status(status);
        let before = *cpu.state();

        let result = cpu.step();

        prop_assert_eq!(result, Err(ExecutionError::IllegalOpcode { opcode, address: pc }));
        let after = *cpu.state();
        prop_assert_eq!(after.pc, pc.wrapping_add(1));
        prop_assert_eq!(after.a, before.a);
        prop_assert_eq!(after.sp, before.sp);
        prop_assert_eq!(after.status, before.status);
        prop_assert_eq!(after.cycles, before.cycles);
    }

    /// ADC matches a wide-integer reference for result, C and V.
    #[test]
    fn prop_adc_matches_reference(a in any::<u8>(), m in any::<u8>(), carry in any::<bool>()) {
        let mut cpu = setup_cpu();
        cpu.memory_mut().load(0x8000, &[0x69, m]);
        cpu.set_a(a);
        cpu.set_flag_c(carry);

        cpu.step().unwrap();

        let sum = a as u16 + m as u16 + carry as u16;
        let result = sum as u8;
        let signed = a as i8 as i16 + m as i8 as i16 + carry as i16;
        prop_assert_eq!(cpu.a(), result);
        prop_assert_eq!(cpu.flag_c(), sum > 0xFF);
        prop_assert_eq!(cpu.flag_v(), !(-128..=127).contains(&signed));
        prop_assert_eq!(cpu.flag_z(), result == 0);
        prop_assert_eq!(cpu.flag_n(), result & 0x80 != 0);
    }

    /// SBC behaves as ADC of the operand's complement.
    #[test]
    fn prop_sbc_is_adc_of_complement(a in any::<u8>(), m in any::<u8>(), carry in any::<bool>()) {
        let mut sbc = setup_cpu();
        sbc.memory_mut().load(0x8000, &[0xE9, m]);
        sbc.set_a(a);
        sbc.set_flag_c(carry);

        let mut adc = setup_cpu();
        adc.memory_mut().load(0x8000, &[0x69, !m]);
        adc.set_a(a);
        adc.set_flag_c(carry);

        sbc.step().unwrap();
        adc.step().unwrap();

        prop_assert_eq!(sbc.a(), adc.a());
        prop_assert_eq!(sbc.status(), adc.status());
    }

    /// CMP sets C, Z and N from an unsigned compare.
    #[test]
    fn prop_cmp_flags(a in any::<u8>(), m in any::<u8>()) {
        let mut cpu = setup_cpu();
        cpu.memory_mut().load(0x8000, &[0xC9, m]);
        cpu.set_a(a);

        cpu.step().unwrap();

        prop_assert_eq!(cpu.flag_c(), a >= m);
        prop_assert_eq!(cpu.flag_z(), a == m);
        prop_assert_eq!(cpu.flag_n(), a.wrapping_sub(m) & 0x80 != 0);
        prop_assert_eq!(cpu.a(), a);
    }

    /// Loads always reflect the loaded value in Z and N.
    #[test]
    fn prop_lda_sets_zn(value in any::<u8>()) {
        let mut cpu = setup_cpu();
        cpu.memory_mut().load(0x8000, &[0xA9, value]);

        cpu.step().unwrap();

        prop_assert_eq!(cpu.a(), value);
        prop_assert_eq!(cpu.flag_z(), value == 0);
        prop_assert_eq!(cpu.flag_n(), value >= 0x80);
    }

    /// Any byte pushed with PHA comes back with PLA, wherever SP points.
    #[test]
    fn prop_pha_pla_round_trip(value in any::<u8>(), sp in any::<u16>()) {
        let mut cpu = setup_cpu();
        cpu.memory_mut().load(0x8000, &[0x48, 0xA9, 0x00, 0x68]);
        cpu.set_a(value);
        cpu.set_sp(sp);

        for _ in 0..3 {
            cpu.step().unwrap();
        }

        prop_assert_eq!(cpu.a(), value);
        prop_assert_eq!(cpu.sp(), sp);
    }

    /// Reset restores power-on state no matter what ran before.
    #[test]
    fn prop_reset_restores_power_on_state(
        a in any::<u8>(),
        sp in any::<u16>(),
        status in any::<u8>(),
        pc in any::<u16>(),
    ) {
        let mut cpu = setup_cpu();
        cpu.set_a(a);
        cpu.set_sp(sp);
        cpu.set_status(status);
        cpu.set_pc(pc);

        cpu.reset();

        prop_assert_eq!(cpu.pc(), 0x8000);
        prop_assert_eq!(cpu.a(), 0);
        prop_assert_eq!(cpu.sp(), 0xFD);
        prop_assert_eq!(cpu.status(), 0x04);
        prop_assert_eq!(cpu.cycles(), 0);
    }
}
