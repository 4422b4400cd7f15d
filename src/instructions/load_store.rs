//! # Load and Store Instructions
//!
//! - LDA, LDX, LDY: load a register, update Z and N, pay the page-cross cycle
//! - STA, STX, STY: store a register, no flags, fixed timing

use super::{Cycles, WRITE_MODES};
use crate::opcodes::InstructionDescriptor;
use crate::{MemoryBus, CPU};

/// Executes the LDA (Load Accumulator) instruction.
///
/// # Flag Behavior
///
/// - Zero (Z): Set if A = 0
/// - Negative (N): Set if bit 7 of A is set
/// - Other flags: Not affected
pub(crate) fn execute_lda<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    let (value, cycles) = cpu.read_operand(instr)?;
    cpu.state.a = value;
    cpu.state.set_zn(value);
    Ok(cycles)
}

/// Executes the LDX (Load X Register) instruction.
pub(crate) fn execute_ldx<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    let (value, cycles) = cpu.read_operand(instr)?;
    cpu.state.x = value;
    cpu.state.set_zn(value);
    Ok(cycles)
}

/// Executes the LDY (Load Y Register) instruction.
pub(crate) fn execute_ldy<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    let (value, cycles) = cpu.read_operand(instr)?;
    cpu.state.y = value;
    cpu.state.set_zn(value);
    Ok(cycles)
}

/// Executes the STA (Store Accumulator) instruction.
///
/// Indexed forms always take their full base cost; a page crossing adds
/// nothing.
pub(crate) fn execute_sta<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    let value = cpu.state.a;
    store(cpu, instr, value)
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn execute_stx<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    let value = cpu.state.x;
    store(cpu, instr, value)
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn execute_sty<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    let value = cpu.state.y;
    store(cpu, instr, value)
}

fn store<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor, value: u8) -> Cycles {
    let (addr, _) = cpu.memory_operand(instr, WRITE_MODES)?;
    cpu.memory.write(addr, value);
    Ok(instr.base_cycles)
}
