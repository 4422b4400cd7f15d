//! # Branch Instructions
//!
//! All eight conditional branches share one handler. They use Relative
//! addressing with a signed 8-bit offset measured from the address after the
//! instruction.
//!
//! Cycle timing:
//! - base cost (2) if the branch is not taken
//! - +1 if taken
//! - +1 more if the target is on a different page

use super::{Cycles, UnsupportedMode};
use crate::addressing::{AddressingMode, Operand};
use crate::opcodes::{InstructionDescriptor, Operation};
use crate::state::{ProcessorState, Status};
use crate::{MemoryBus, CPU};

pub(crate) fn execute_branch<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operation: Operation,
    instr: &InstructionDescriptor,
) -> Cycles {
    let taken = branch_taken(operation, &cpu.state).ok_or(UnsupportedMode)?;
    let Operand::Memory { addr, page_crossed } = cpu.operand(instr, &[AddressingMode::Relative])?
    else {
        return Err(UnsupportedMode);
    };

    if !taken {
        return Ok(instr.base_cycles);
    }

    cpu.state.pc = addr;
    Ok(instr
        .base_cycles
        .saturating_add(1)
        .saturating_add(page_crossed as u8))
}

/// Evaluates the flag test behind each branch mnemonic.
fn branch_taken(operation: Operation, state: &ProcessorState) -> Option<bool> {
    let taken = match operation {
        Operation::Bcc => !state.flag(Status::CARRY),
        Operation::Bcs => state.flag(Status::CARRY),
        Operation::Bne => !state.flag(Status::ZERO),
        Operation::Beq => state.flag(Status::ZERO),
        Operation::Bpl => !state.flag(Status::NEGATIVE),
        Operation::Bmi => state.flag(Status::NEGATIVE),
        Operation::Bvc => !state.flag(Status::OVERFLOW),
        Operation::Bvs => state.flag(Status::OVERFLOW),
        _ => return None,
    };
    Some(taken)
}
