//! # Addressing Modes
//!
//! This module defines the 13 addressing modes and the resolver that turns a
//! mode plus the current registers into an effective operand location.
//!
//! The resolver consumes operand bytes at PC (advancing PC past them) and
//! reports whether indexing crossed a page. It never decides what a page
//! crossing costs; that is up to each instruction.

use crate::memory::MemoryBus;
use crate::state::ProcessorState;

/// Addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implied, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address indexed by X, wrapping within zero page.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero page address indexed by Y, wrapping within zero page.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address indexed by X. May cross a page.
    ///
    /// Example: LDA $1234,X
    AbsoluteX,

    /// 16-bit address indexed by Y. May cross a page.
    ///
    /// Example: LDA $1234,Y
    AbsoluteY,

    /// Jump through a 16-bit pointer. Only used by JMP.
    ///
    /// Example: JMP ($FFFC)
    Indirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X)
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y. May cross a page.
    ///
    /// Example: LDA ($40),Y
    IndirectY,

    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implied,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A
    Accumulator,

    /// Signed 8-bit displacement from the address after the instruction.
    ///
    /// Example: BEQ label
    Relative,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

/// Where an instruction's operand lives once its mode has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operand {
    /// No operand.
    Implied,
    /// The accumulator register.
    Accumulator,
    /// A memory location. For Relative mode this is the branch target and
    /// `page_crossed` compares it against the post-instruction PC.
    Memory { addr: u16, page_crossed: bool },
}

/// Resolves `mode` against the current registers, consuming operand bytes.
pub(crate) fn resolve<M: MemoryBus>(
    mode: AddressingMode,
    state: &mut ProcessorState,
    bus: &M,
) -> Operand {
    let (addr, page_crossed) = match mode {
        AddressingMode::Implied => return Operand::Implied,
        AddressingMode::Accumulator => return Operand::Accumulator,
        AddressingMode::Immediate => {
            let addr = state.pc;
            state.pc = state.pc.wrapping_add(1);
            (addr, false)
        }
        AddressingMode::ZeroPage => (fetch_byte(state, bus) as u16, false),
        AddressingMode::ZeroPageX => {
            let base = fetch_byte(state, bus);
            (base.wrapping_add(state.x) as u16, false)
        }
        AddressingMode::ZeroPageY => {
            let base = fetch_byte(state, bus);
            (base.wrapping_add(state.y) as u16, false)
        }
        AddressingMode::Absolute => (fetch_word(state, bus), false),
        AddressingMode::AbsoluteX => {
            let base = fetch_word(state, bus);
            index(base, state.x)
        }
        AddressingMode::AbsoluteY => {
            let base = fetch_word(state, bus);
            index(base, state.y)
        }
        AddressingMode::Indirect => {
            let ptr = fetch_word(state, bus);
            // The high byte never carries out of the pointer's page
            let hi_addr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
            let lo = bus.read(ptr) as u16;
            let hi = bus.read(hi_addr) as u16;
            ((hi << 8) | lo, false)
        }
        AddressingMode::IndirectX => {
            let ptr = fetch_byte(state, bus).wrapping_add(state.x);
            (zero_page_word(bus, ptr), false)
        }
        AddressingMode::IndirectY => {
            let ptr = fetch_byte(state, bus);
            let base = zero_page_word(bus, ptr);
            index(base, state.y)
        }
        AddressingMode::Relative => {
            let offset = fetch_byte(state, bus) as i8;
            let origin = state.pc;
            let target = origin.wrapping_add_signed(offset as i16);
            (target, crosses_page(origin, target))
        }
    };

    Operand::Memory { addr, page_crossed }
}

/// True when `a` and `b` lie on different 256-byte pages.
pub(crate) fn crosses_page(a: u16, b: u16) -> bool {
    (a & 0xFF00) != (b & 0xFF00)
}

fn index(base: u16, offset: u8) -> (u16, bool) {
    let addr = base.wrapping_add(offset as u16);
    (addr, crosses_page(base, addr))
}

fn fetch_byte<M: MemoryBus>(state: &mut ProcessorState, bus: &M) -> u8 {
    let value = bus.read(state.pc);
    state.pc = state.pc.wrapping_add(1);
    value
}

fn fetch_word<M: MemoryBus>(state: &mut ProcessorState, bus: &M) -> u16 {
    let lo = fetch_byte(state, bus) as u16;
    let hi = fetch_byte(state, bus) as u16;
    (hi << 8) | lo
}

/// Reads a pointer stored in zero page; the high byte wraps to 0x00 after 0xFF.
fn zero_page_word<M: MemoryBus>(bus: &M, ptr: u8) -> u16 {
    let lo = bus.read(ptr as u16) as u16;
    let hi = bus.read(ptr.wrapping_add(1) as u16) as u16;
    (hi << 8) | lo
}
