//! # Status Flag Instructions
//!
//! CLC, SEC, CLI, SEI, CLD, SED and CLV each set or clear a single flag.
//! All use Implied addressing.

use super::{Cycles, UnsupportedMode, IMPLIED};
use crate::opcodes::{InstructionDescriptor, Operation};
use crate::state::Status;
use crate::{MemoryBus, CPU};

pub(crate) fn execute_flag<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operation: Operation,
    instr: &InstructionDescriptor,
) -> Cycles {
    let (flag, value) = match operation {
        Operation::Clc => (Status::CARRY, false),
        Operation::Sec => (Status::CARRY, true),
        Operation::Cli => (Status::INTERRUPT_DISABLE, false),
        Operation::Sei => (Status::INTERRUPT_DISABLE, true),
        Operation::Cld => (Status::DECIMAL, false),
        Operation::Sed => (Status::DECIMAL, true),
        Operation::Clv => (Status::OVERFLOW, false),
        _ => return Err(UnsupportedMode),
    };

    cpu.operand(instr, IMPLIED)?;
    cpu.state.status.set(flag, value);
    Ok(instr.base_cycles)
}
