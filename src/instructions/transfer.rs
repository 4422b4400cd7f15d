//! # Register Transfer Instructions
//!
//! TAX, TAY, TXA, TYA and TSX copy one register into another and update Z
//! and N; TSX takes the low byte of SP. TXS copies X into SP, clearing its
//! high byte, and leaves the flags alone.

use super::{Cycles, IMPLIED};
use crate::opcodes::InstructionDescriptor;
use crate::{MemoryBus, CPU};

pub(crate) fn execute_tax<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    cpu.operand(instr, IMPLIED)?;
    cpu.state.x = cpu.state.a;
    cpu.state.set_zn(cpu.state.x);
    Ok(instr.base_cycles)
}

pub(crate) fn execute_tay<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    cpu.operand(instr, IMPLIED)?;
    cpu.state.y = cpu.state.a;
    cpu.state.set_zn(cpu.state.y);
    Ok(instr.base_cycles)
}

pub(crate) fn execute_txa<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    cpu.operand(instr, IMPLIED)?;
    cpu.state.a = cpu.state.x;
    cpu.state.set_zn(cpu.state.a);
    Ok(instr.base_cycles)
}

pub(crate) fn execute_tya<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    cpu.operand(instr, IMPLIED)?;
    cpu.state.a = cpu.state.y;
    cpu.state.set_zn(cpu.state.a);
    Ok(instr.base_cycles)
}

pub(crate) fn execute_tsx<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    cpu.operand(instr, IMPLIED)?;
    cpu.state.x = cpu.state.sp as u8;
    cpu.state.set_zn(cpu.state.x);
    Ok(instr.base_cycles)
}

/// Executes the TXS (Transfer X to Stack Pointer) instruction. No flags change.
pub(crate) fn execute_txs<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    cpu.operand(instr, IMPLIED)?;
    cpu.state.sp = cpu.state.x as u16;
    Ok(instr.base_cycles)
}
