//! # Control Flow Instructions
//!
//! - JMP: jump (Absolute or Indirect)
//! - JSR / RTS: subroutine call and return
//! - BRK / RTI: software break and return from it
//! - NOP: no operation
//!
//! BRK is the instruction only: it pushes PC+1 and the status byte (with
//! Break and bit 5 set), sets Interrupt-disable and loads PC from
//! $FFFE/$FFFF. There is no hardware interrupt line in this core.

use super::{Cycles, IMPLIED};
use crate::addressing::AddressingMode;
use crate::memory::map;
use crate::opcodes::InstructionDescriptor;
use crate::state::Status;
use crate::{MemoryBus, CPU};

/// Executes the JMP (Jump) instruction.
///
/// The Indirect form reproduces the 6502 pointer quirk: JMP ($10FF) takes
/// its high byte from $1000, not $1100.
pub(crate) fn execute_jmp<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    let (target, _) = cpu.memory_operand(
        instr,
        &[AddressingMode::Absolute, AddressingMode::Indirect],
    )?;
    cpu.state.pc = target;
    Ok(instr.base_cycles)
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes the address of its own last operand byte, high byte first.
pub(crate) fn execute_jsr<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    let (target, _) = cpu.memory_operand(instr, &[AddressingMode::Absolute])?;
    let return_address = cpu.state.pc.wrapping_sub(1);
    cpu.push_word(return_address);
    cpu.state.pc = target;
    Ok(instr.base_cycles)
}

/// Executes the RTS (Return from Subroutine) instruction.
pub(crate) fn execute_rts<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    cpu.operand(instr, IMPLIED)?;
    cpu.state.pc = cpu.pull_word().wrapping_add(1);
    Ok(instr.base_cycles)
}

/// Executes the BRK (Force Break) instruction.
pub(crate) fn execute_brk<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    cpu.operand(instr, IMPLIED)?;

    // Skip the padding byte that follows BRK
    let return_address = cpu.state.pc.wrapping_add(1);
    cpu.push_word(return_address);

    let pushed = cpu.state.status | Status::BREAK | Status::UNUSED;
    cpu.push(pushed.bits());

    cpu.state.status.insert(Status::INTERRUPT_DISABLE);
    cpu.state.pc = cpu.memory.read_word(map::BREAK_VECTOR);
    Ok(instr.base_cycles)
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pulls status then PC. Unlike RTS the pulled PC is used as-is.
pub(crate) fn execute_rti<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    cpu.operand(instr, IMPLIED)?;
    let pulled = cpu.pull();
    cpu.restore_status(pulled);
    cpu.state.pc = cpu.pull_word();
    Ok(instr.base_cycles)
}

/// Executes the NOP (No Operation) instruction.
pub(crate) fn execute_nop<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    cpu.operand(instr, IMPLIED)?;
    Ok(instr.base_cycles)
}
