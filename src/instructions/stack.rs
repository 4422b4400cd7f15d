//! # Stack Operations
//!
//! - PHA / PLA: push and pull the accumulator
//! - PHP / PLP: push and pull the status register
//!
//! The stack lives at 0x0100-0x01FF and grows downward. SP is the offset
//! into that page; it wraps without error in both directions.

use super::{Cycles, IMPLIED};
use crate::opcodes::InstructionDescriptor;
use crate::state::Status;
use crate::{MemoryBus, CPU};

/// Status bits that exist only in pushed copies of the register.
const STACK_ONLY: Status = Status::BREAK.union(Status::UNUSED);

impl<M: MemoryBus> CPU<M> {
    /// Loads a status byte pulled from the stack.
    ///
    /// Break and bit 5 keep their current values.
    pub(crate) fn restore_status(&mut self, pulled: u8) {
        let kept = self.state.status & STACK_ONLY;
        self.state.status = (Status::from_bits_retain(pulled) - STACK_ONLY) | kept;
    }
}

/// Executes the PHA (Push Accumulator) instruction.
///
/// ```
/// use rvm8::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80);
/// memory.write(0x8000, 0x48); // PHA
///
/// let mut cpu = CPU::new(memory);
/// cpu.set_a(0x42);
/// cpu.step().unwrap();
///
/// assert_eq!(cpu.read(0x01FD), 0x42);
/// assert_eq!(cpu.sp(), 0xFC);
/// assert_eq!(cpu.cycles(), 3);
/// ```
pub(crate) fn execute_pha<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    cpu.operand(instr, IMPLIED)?;
    cpu.push(cpu.state.a);
    Ok(instr.base_cycles)
}

/// Executes the PHP (Push Processor Status) instruction.
///
/// The pushed copy always has Break and bit 5 set.
pub(crate) fn execute_php<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    cpu.operand(instr, IMPLIED)?;
    let pushed = cpu.state.status | STACK_ONLY;
    cpu.push(pushed.bits());
    Ok(instr.base_cycles)
}

/// Executes the PLA (Pull Accumulator) instruction. Updates Z and N.
pub(crate) fn execute_pla<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    cpu.operand(instr, IMPLIED)?;
    cpu.state.a = cpu.pull();
    cpu.state.set_zn(cpu.state.a);
    Ok(instr.base_cycles)
}

/// Executes the PLP (Pull Processor Status) instruction.
pub(crate) fn execute_plp<M: MemoryBus>(cpu: &mut CPU<M>, instr: &InstructionDescriptor) -> Cycles {
    cpu.operand(instr, IMPLIED)?;
    let pulled = cpu.pull();
    cpu.restore_status(pulled);
    Ok(instr.base_cycles)
}
