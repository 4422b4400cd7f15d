//! # Processor State
//!
//! Registers, status flags and the cycle counter, plus the power-on/reset
//! rules that seed them.

use crate::memory::map::STACK_PAGE;
use bitflags::bitflags;

bitflags! {
    /// Processor status register (P), laid out as `NV-BDIZC`.
    ///
    /// Bit 5 is unused by the hardware; it only appears in bytes pushed to
    /// the stack.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Status: u8 {
        /// Carry (unsigned overflow/underflow)
        const CARRY = 0b0000_0001;
        /// Zero (result was zero)
        const ZERO = 0b0000_0010;
        /// Interrupt disable
        const INTERRUPT_DISABLE = 0b0000_0100;
        /// Decimal mode (stored only; arithmetic is always binary)
        const DECIMAL = 0b0000_1000;
        /// Break
        const BREAK = 0b0001_0000;
        /// Unused bit 5
        const UNUSED = 0b0010_0000;
        /// Overflow (signed overflow)
        const OVERFLOW = 0b0100_0000;
        /// Negative (bit 7 of result)
        const NEGATIVE = 0b1000_0000;
    }
}

/// Complete register file of one CPU instance.
///
/// All arithmetic on these fields wraps: A/X/Y modulo 256, PC and SP modulo
/// 65536. The stack always lives in page one: pushes and pulls address
/// `0x0100 | (SP & 0x00FF)` and move only the low byte of SP, wrapping
/// within it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessorState {
    /// Accumulator
    pub a: u8,
    /// X index register
    pub x: u8,
    /// Y index register
    pub y: u8,
    /// Program counter (address of next byte to fetch)
    pub pc: u16,
    /// Stack pointer
    pub sp: u16,
    /// Status flags
    pub status: Status,
    /// Total cycles retired since the last initialization or reset
    pub cycles: u64,
}

impl ProcessorState {
    /// Stack pointer value after power-on or reset.
    pub const POWER_ON_SP: u16 = 0x00FD;

    /// Builds the power-on state with PC pointing at `pc`.
    ///
    /// Everything starts zeroed, then SP and the Interrupt-disable flag take
    /// their defaults.
    pub fn power_on(pc: u16) -> Self {
        Self {
            pc,
            sp: Self::POWER_ON_SP,
            status: Status::INTERRUPT_DISABLE,
            ..Self::default()
        }
    }

    /// Sets Zero and Negative from `value`, leaving every other flag alone.
    pub(crate) fn set_zn(&mut self, value: u8) {
        self.status.set(Status::ZERO, value == 0);
        self.status.set(Status::NEGATIVE, value & 0x80 != 0);
    }

    /// Address of the next free stack slot.
    pub(crate) fn stack_address(&self) -> u16 {
        STACK_PAGE | (self.sp & 0x00FF)
    }

    /// Moves the low byte of SP by `delta`, leaving the high byte alone.
    pub(crate) fn move_sp(&mut self, delta: i8) {
        let low = (self.sp as u8).wrapping_add_signed(delta);
        self.sp = (self.sp & 0xFF00) | low as u16;
    }

    pub(crate) fn flag(&self, flag: Status) -> bool {
        self.status.contains(flag)
    }
}
