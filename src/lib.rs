//! # rvm-8 CPU Core
//!
//! The instruction-execution engine of the rvm-8 fantasy computer: an 8-bit
//! 6502-family CPU driven by a 256-entry opcode table, an addressing-mode
//! resolver and bit-exact flag and cycle accounting.
//!
//! ## Quick Start
//!
//! ```rust
//! use rvm8::{CPU, FlatMemory, MemoryBus};
//!
//! let mut memory = FlatMemory::new();
//!
//! // Reset vector points at the program
//! memory.write(0xFFFC, 0x00);
//! memory.write(0xFFFD, 0x80);
//!
//! // LDA #$05 ; ADC #$0A
//! memory.load(0x8000, &[0xA9, 0x05, 0x69, 0x0A]);
//!
//! let mut cpu = CPU::new(memory);
//! cpu.step().unwrap();
//! cpu.step().unwrap();
//!
//! assert_eq!(cpu.a(), 15);
//! assert_eq!(cpu.pc(), 0x8004);
//! assert_eq!(cpu.cycles(), 4);
//! ```
//!
//! ## Architecture
//!
//! - **Memory bus**: the CPU reaches memory only through `MemoryBus`
//! - **Instruction table**: built once, immutable, shareable across threads
//! - **Tagged dispatch**: each opcode maps to an `Operation` variant, matched
//!   to its handler; no function pointers
//! - **Structured diagnostics**: `step()` returns cycles or an
//!   `ExecutionError`, it never prints and never halts on its own
//!
//! Rendering, ROM file formats, assembling, host timing and debugging are
//! collaborators that sit outside this crate and use the public API.
//!
//! ## Modules
//!
//! - `cpu` - dispatcher and host-facing API
//! - `state` - registers, status flags, cycle counter
//! - `memory` - MemoryBus trait, FlatMemory, memory map
//! - `opcodes` - instruction table
//! - `addressing` - addressing modes and the operand resolver
//!
//! ## Logging
//!
//! The crate logs through the `log` facade: every executed instruction at
//! `trace`, illegal opcodes at `debug`, unsupported addressing modes at
//! `error` and resets at `info`. Install any logger to see them.

pub mod addressing;
pub mod cpu;
pub mod memory;
pub mod opcodes;
pub mod state;

// Instruction handlers (not part of public API)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use addressing::AddressingMode;
pub use cpu::CPU;
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{InstructionDescriptor, InstructionTable, Operation, TableBuilder};
pub use state::{ProcessorState, Status};

/// Diagnostics a single `step()` can report.
///
/// Both conditions are recovered locally: the opcode byte has been consumed,
/// no cycles were added, and the next `step()` continues from the following
/// byte. Address wraparound is never reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    /// The fetched byte has no registered handler.
    #[error("Illegal opcode 0x{opcode:02X} at PC 0x{address:04X}")]
    IllegalOpcode {
        /// The opcode byte.
        opcode: u8,
        /// Where it was fetched from.
        address: u16,
    },

    /// The opcode is legal but its handler does not implement the addressing
    /// mode the table assigns to it.
    #[error(
        "{mnemonic} (opcode 0x{opcode:02X} at PC 0x{address:04X}) does not support {mode:?} addressing"
    )]
    UnsupportedMode {
        /// The opcode byte.
        opcode: u8,
        /// Mnemonic from the table.
        mnemonic: &'static str,
        /// Mode the handler was invoked with.
        mode: AddressingMode,
        /// Where the opcode was fetched from.
        address: u16,
    },
}

impl ExecutionError {
    /// Opcode byte involved in the diagnostic.
    pub fn opcode(&self) -> u8 {
        match *self {
            ExecutionError::IllegalOpcode { opcode, .. }
            | ExecutionError::UnsupportedMode { opcode, .. } => opcode,
        }
    }

    /// Address the offending opcode was fetched from.
    pub fn address(&self) -> u16 {
        match *self {
            ExecutionError::IllegalOpcode { address, .. }
            | ExecutionError::UnsupportedMode { address, .. } => address,
        }
    }
}
