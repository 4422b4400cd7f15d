//! # Increment and Decrement Instructions
//!
//! - INC, DEC: read-modify-write on memory
//! - INX, INY, DEX, DEY: index registers
//!
//! All wrap modulo 256 and update Z and N.

use super::{Cycles, IMPLIED, WRITE_MODES};
use crate::opcodes::InstructionDescriptor;
use crate::{MemoryBus, CPU};

/// Executes the INC (Increment Memory) instruction.
pub(crate) fn execute_inc<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    step_memory(cpu, instr, 1)
}

/// Executes the DEC (Decrement Memory) instruction.
///
/// Fixed timing: indexed forms never pay a page-cross cycle.
pub(crate) fn execute_dec<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    step_memory(cpu, instr, -1)
}

fn step_memory<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor, delta: i8) -> Cycles {
    let (addr, _) = cpu.memory_operand(instr, WRITE_MODES)?;
    let result = cpu.memory.read(addr).wrapping_add_signed(delta);
    cpu.memory.write(addr, result);
    cpu.state.set_zn(result);
    Ok(instr.base_cycles)
}

pub(crate) fn execute_inx<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    cpu.operand(instr, IMPLIED)?;
    cpu.state.x = cpu.state.x.wrapping_add(1);
    cpu.state.set_zn(cpu.state.x);
    Ok(instr.base_cycles)
}

pub(crate) fn execute_iny<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    cpu.operand(instr, IMPLIED)?;
    cpu.state.y = cpu.state.y.wrapping_add(1);
    cpu.state.set_zn(cpu.state.y);
    Ok(instr.base_cycles)
}

pub(crate) fn execute_dex<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    cpu.operand(instr, IMPLIED)?;
    cpu.state.x = cpu.state.x.wrapping_sub(1);
    cpu.state.set_zn(cpu.state.x);
    Ok(instr.base_cycles)
}

pub(crate) fn execute_dey<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    cpu.operand(instr, IMPLIED)?;
    cpu.state.y = cpu.state.y.wrapping_sub(1);
    cpu.state.set_zn(cpu.state.y);
    Ok(instr.base_cycles)
}
