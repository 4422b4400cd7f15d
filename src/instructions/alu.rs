//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! - ADC, SBC: binary add/subtract with carry (the Decimal flag is ignored)
//! - AND, ORA, EOR: bitwise logic on the accumulator
//! - CMP, CPX, CPY: register/memory comparison
//! - BIT: bit test

use super::Cycles;
use crate::opcodes::InstructionDescriptor;
use crate::state::{ProcessorState, Status};
use crate::{MemoryBus, CPU};

/// Executes the ADC (Add with Carry) instruction.
///
/// `A + M + C` is computed in 16 bits so the ninth bit becomes Carry.
/// Overflow is set when both operands share a sign the result does not.
pub(crate) fn execute_adc<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    let (value, cycles) = cpu.read_operand(instr)?;
    add_with_carry(&mut cpu.state, value);
    Ok(cycles)
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// Subtraction is addition of the one's complement: `A - M - (1 - C)` equals
/// `A + !M + C`, so Carry ends up set when no borrow occurred.
pub(crate) fn execute_sbc<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    let (value, cycles) = cpu.read_operand(instr)?;
    add_with_carry(&mut cpu.state, !value);
    Ok(cycles)
}

fn add_with_carry(state: &mut ProcessorState, value: u8) {
    let a = state.a;
    let carry_in = state.flag(Status::CARRY) as u16;

    let sum = a as u16 + value as u16 + carry_in;
    let result = sum as u8;

    // Same-signed operands producing a differently-signed result
    let overflow = (!(a ^ value) & (a ^ result) & 0x80) != 0;

    state.status.set(Status::CARRY, sum & 0x100 != 0);
    state.status.set(Status::OVERFLOW, overflow);
    state.set_zn(result);
    state.a = result;
}

/// Executes the AND (Logical AND) instruction.
pub(crate) fn execute_and<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    let (value, cycles) = cpu.read_operand(instr)?;
    cpu.state.a &= value;
    cpu.state.set_zn(cpu.state.a);
    Ok(cycles)
}

/// Executes the ORA (Logical Inclusive OR) instruction.
pub(crate) fn execute_ora<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    let (value, cycles) = cpu.read_operand(instr)?;
    cpu.state.a |= value;
    cpu.state.set_zn(cpu.state.a);
    Ok(cycles)
}

/// Executes the EOR (Exclusive OR) instruction.
pub(crate) fn execute_eor<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    let (value, cycles) = cpu.read_operand(instr)?;
    cpu.state.a ^= value;
    cpu.state.set_zn(cpu.state.a);
    Ok(cycles)
}

/// Executes the CMP (Compare Accumulator) instruction.
///
/// # Flag Behavior
///
/// - Carry (C): Set if A >= M
/// - Zero (Z): Set if A = M
/// - Negative (N): Bit 7 of `A - M`
pub(crate) fn execute_cmp<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    let (value, cycles) = cpu.read_operand(instr)?;
    let register = cpu.state.a;
    compare(&mut cpu.state, register, value);
    Ok(cycles)
}

/// Executes the CPX (Compare X Register) instruction.
pub(crate) fn execute_cpx<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    let (value, cycles) = cpu.read_operand(instr)?;
    let register = cpu.state.x;
    compare(&mut cpu.state, register, value);
    Ok(cycles)
}

/// Executes the CPY (Compare Y Register) instruction.
pub(crate) fn execute_cpy<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    let (value, cycles) = cpu.read_operand(instr)?;
    let register = cpu.state.y;
    compare(&mut cpu.state, register, value);
    Ok(cycles)
}

fn compare(state: &mut ProcessorState, register: u8, value: u8) {
    state.status.set(Status::CARRY, register >= value);
    state.set_zn(register.wrapping_sub(value));
}

/// Executes the BIT (Bit Test) instruction.
///
/// Z reflects `A & M`; N and V are copied from bits 7 and 6 of M. A is not
/// modified.
pub(crate) fn execute_bit<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    let (value, cycles) = cpu.read_operand(instr)?;
    let zero = cpu.state.a & value == 0;
    cpu.state.status.set(Status::ZERO, zero);
    cpu.state.status.set(Status::NEGATIVE, value & 0x80 != 0);
    cpu.state.status.set(Status::OVERFLOW, value & 0x40 != 0);
    Ok(cycles)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(a: u8, carry: bool) -> ProcessorState {
        let mut state = ProcessorState::power_on(0);
        state.a = a;
        state.status.set(Status::CARRY, carry);
        state
    }

    #[test]
    fn test_add_with_carry_overflow_table() {
        // (A, M, C_in) -> (result, C, V)
        let cases = [
            (0x50, 0x10, false, 0x60, false, false),
            (0x50, 0x50, false, 0xA0, false, true),
            (0x50, 0x90, false, 0xE0, false, false),
            (0x50, 0xD0, false, 0x20, true, false),
            (0xD0, 0x10, false, 0xE0, false, false),
            (0xD0, 0x50, false, 0x20, true, false),
            (0xD0, 0x90, false, 0x60, true, true),
            (0xD0, 0xD0, false, 0xA0, true, false),
            (0x7F, 0x00, true, 0x80, false, true),
        ];

        for (a, m, c_in, result, c, v) in cases {
            let mut state = state_with(a, c_in);
            add_with_carry(&mut state, m);
            assert_eq!(state.a, result, "{a:02X} + {m:02X} + {c_in}");
            assert_eq!(state.flag(Status::CARRY), c, "carry for {a:02X} + {m:02X}");
            assert_eq!(state.flag(Status::OVERFLOW), v, "overflow for {a:02X} + {m:02X}");
        }
    }

    #[test]
    fn test_compare_sets_carry_on_equal() {
        let mut state = state_with(0, false);
        compare(&mut state, 0x40, 0x40);

        assert!(state.flag(Status::CARRY));
        assert!(state.flag(Status::ZERO));
        assert!(!state.flag(Status::NEGATIVE));
    }

    #[test]
    fn test_compare_less_than_borrows() {
        let mut state = state_with(0, true);
        compare(&mut state, 0x10, 0x20);

        assert!(!state.flag(Status::CARRY));
        assert!(!state.flag(Status::ZERO));
        assert!(state.flag(Status::NEGATIVE)); // 0x10 - 0x20 = 0xF0
    }
}
