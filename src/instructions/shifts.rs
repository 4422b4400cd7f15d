//! # Shift and Rotate Instructions
//!
//! ASL, LSR, ROL and ROR operate either on the accumulator or as a
//! read-modify-write on memory. The bit shifted out lands in Carry; Z and N
//! follow the result. Timing is fixed.

use super::{Cycles, MODIFY_MODES};
use crate::addressing::Operand;
use crate::opcodes::InstructionDescriptor;
use crate::state::Status;
use crate::{MemoryBus, CPU};

/// Executes the ASL (Arithmetic Shift Left) instruction.
pub(crate) fn execute_asl<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    modify(cpu, instr, |value, _| (value << 1, value & 0x80 != 0))
}

/// Executes the LSR (Logical Shift Right) instruction.
pub(crate) fn execute_lsr<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    modify(cpu, instr, |value, _| (value >> 1, value & 0x01 != 0))
}

/// Executes the ROL (Rotate Left) instruction. Old Carry enters bit 0.
pub(crate) fn execute_rol<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    modify(cpu, instr, |value, carry| {
        ((value << 1) | carry as u8, value & 0x80 != 0)
    })
}

/// Executes the ROR (Rotate Right) instruction. Old Carry enters bit 7.
pub(crate) fn execute_ror<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    modify(cpu, instr, |value, carry| {
        ((value >> 1) | ((carry as u8) << 7), value & 0x01 != 0)
    })
}

/// Applies `op(value, carry_in) -> (result, carry_out)` to the operand.
fn modify<M, F>(cpu: &mut CPU<M>, instr: &InstructionDescriptor, op: F) -> Cycles
where
    M: MemoryBus,
    F: FnOnce(u8, bool) -> (u8, bool),
{
    let carry_in = cpu.state.flag(Status::CARRY);

    let result = match cpu.operand(instr, MODIFY_MODES)? {
        Operand::Accumulator => {
            let (result, carry_out) = op(cpu.state.a, carry_in);
            cpu.state.a = result;
            cpu.state.status.set(Status::CARRY, carry_out);
            result
        }
        Operand::Memory { addr, .. } => {
            let (result, carry_out) = op(cpu.memory.read(addr), carry_in);
            cpu.memory.write(addr, result);
            cpu.state.status.set(Status::CARRY, carry_out);
            result
        }
        Operand::Implied => return Err(super::UnsupportedMode),
    };

    cpu.state.set_zn(result);
    Ok(instr.base_cycles)
}
