//! # Instruction Table
//!
//! A dense 256-entry table mapping every opcode byte to its
//! [`InstructionDescriptor`]. The table is an ordinary immutable value: build
//! it once with [`InstructionTable::standard`] (or a [`TableBuilder`]) before
//! any stepping begins, then share it, typically behind an `Arc`, with every
//! CPU that needs it. Lookups never mutate it, so concurrent reads from many
//! threads are safe; there is no way to rebuild a table in place.
//!
//! The standard table covers the 151 documented NMOS 6502 opcodes. Every other
//! byte carries the illegal sentinel (`"???"`, no operation, Implied, 0 cycles).

use crate::addressing::AddressingMode;
use std::ops::Index;

use AddressingMode::{
    Absolute as Abs, AbsoluteX as AbsX, AbsoluteY as AbsY, Accumulator as Acc, Immediate as Imm,
    Implied as Imp, Indirect as Ind, IndirectX as IndX, IndirectY as IndY, Relative as Rel,
    ZeroPage as Zp, ZeroPageX as ZpX, ZeroPageY as ZpY,
};
use Operation::*;

/// Instruction mnemonics, one variant per behaviour.
///
/// Dispatch matches on this tag rather than on function pointers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Add with carry
    Adc,
    /// Bitwise AND with accumulator
    And,
    /// Arithmetic shift left
    Asl,
    /// Branch if carry clear
    Bcc,
    /// Branch if carry set
    Bcs,
    /// Branch if equal (Z set)
    Beq,
    /// Bit test
    Bit,
    /// Branch if minus (N set)
    Bmi,
    /// Branch if not equal (Z clear)
    Bne,
    /// Branch if plus (N clear)
    Bpl,
    /// Force break
    Brk,
    /// Branch if overflow clear
    Bvc,
    /// Branch if overflow set
    Bvs,
    /// Clear carry
    Clc,
    /// Clear decimal mode
    Cld,
    /// Clear interrupt disable
    Cli,
    /// Clear overflow
    Clv,
    /// Compare accumulator
    Cmp,
    /// Compare X register
    Cpx,
    /// Compare Y register
    Cpy,
    /// Decrement memory
    Dec,
    /// Decrement X
    Dex,
    /// Decrement Y
    Dey,
    /// Exclusive OR with accumulator
    Eor,
    /// Increment memory
    Inc,
    /// Increment X
    Inx,
    /// Increment Y
    Iny,
    /// Jump
    Jmp,
    /// Jump to subroutine
    Jsr,
    /// Load accumulator
    Lda,
    /// Load X register
    Ldx,
    /// Load Y register
    Ldy,
    /// Logical shift right
    Lsr,
    /// No operation
    Nop,
    /// Bitwise OR with accumulator
    Ora,
    /// Push accumulator
    Pha,
    /// Push processor status
    Php,
    /// Pull accumulator
    Pla,
    /// Pull processor status
    Plp,
    /// Rotate left through carry
    Rol,
    /// Rotate right through carry
    Ror,
    /// Return from interrupt
    Rti,
    /// Return from subroutine
    Rts,
    /// Subtract with borrow
    Sbc,
    /// Set carry
    Sec,
    /// Set decimal mode
    Sed,
    /// Set interrupt disable
    Sei,
    /// Store accumulator
    Sta,
    /// Store X register
    Stx,
    /// Store Y register
    Sty,
    /// Transfer A to X
    Tax,
    /// Transfer A to Y
    Tay,
    /// Transfer stack pointer to X
    Tsx,
    /// Transfer X to A
    Txa,
    /// Transfer X to stack pointer
    Txs,
    /// Transfer Y to A
    Tya,
}

impl Operation {
    /// Three-letter assembler mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        use Operation::*;
        match self {
            Adc => "ADC",
            And => "AND",
            Asl => "ASL",
            Bcc => "BCC",
            Bcs => "BCS",
            Beq => "BEQ",
            Bit => "BIT",
            Bmi => "BMI",
            Bne => "BNE",
            Bpl => "BPL",
            Brk => "BRK",
            Bvc => "BVC",
            Bvs => "BVS",
            Clc => "CLC",
            Cld => "CLD",
            Cli => "CLI",
            Clv => "CLV",
            Cmp => "CMP",
            Cpx => "CPX",
            Cpy => "CPY",
            Dec => "DEC",
            Dex => "DEX",
            Dey => "DEY",
            Eor => "EOR",
            Inc => "INC",
            Inx => "INX",
            Iny => "INY",
            Jmp => "JMP",
            Jsr => "JSR",
            Lda => "LDA",
            Ldx => "LDX",
            Ldy => "LDY",
            Lsr => "LSR",
            Nop => "NOP",
            Ora => "ORA",
            Pha => "PHA",
            Php => "PHP",
            Pla => "PLA",
            Plp => "PLP",
            Rol => "ROL",
            Ror => "ROR",
            Rti => "RTI",
            Rts => "RTS",
            Sbc => "SBC",
            Sec => "SEC",
            Sed => "SED",
            Sei => "SEI",
            Sta => "STA",
            Stx => "STX",
            Sty => "STY",
            Tax => "TAX",
            Tay => "TAY",
            Tsx => "TSX",
            Txa => "TXA",
            Txs => "TXS",
            Tya => "TYA",
        }
    }

    /// Whether an indexed access that crosses a page costs this instruction
    /// one extra cycle.
    ///
    /// Only instructions that merely read their operand pay it. Stores and
    /// read-modify-write instructions always take their fixed cost.
    pub const fn pays_page_cross_penalty(self) -> bool {
        use Operation::*;
        matches!(
            self,
            Adc | And | Cmp | Eor | Lda | Ldx | Ldy | Ora | Sbc
        )
    }

    /// Whether this instruction may load PC with something other than the
    /// address following its operand.
    pub const fn transfers_control(self) -> bool {
        use Operation::*;
        matches!(
            self,
            Bcc | Bcs | Beq | Bmi | Bne | Bpl | Bvc | Bvs | Brk | Jmp | Jsr | Rti | Rts
        )
    }
}

/// Everything the dispatcher needs to know about one opcode.
///
/// # Examples
///
/// ```
/// use rvm8::{AddressingMode, InstructionTable, Operation};
///
/// let table = InstructionTable::standard();
/// let lda_imm = &table[0xA9];
/// assert_eq!(lda_imm.mnemonic, "LDA");
/// assert_eq!(lda_imm.operation, Some(Operation::Lda));
/// assert_eq!(lda_imm.mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.base_cycles, 2);
/// assert_eq!(lda_imm.size_bytes(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionDescriptor {
    /// Opcode byte this descriptor is registered under.
    pub opcode: u8,

    /// Instruction mnemonic, `"???"` for illegal opcodes.
    pub mnemonic: &'static str,

    /// Behaviour to run, `None` for illegal opcodes.
    pub operation: Option<Operation>,

    /// Addressing mode handed to the handler.
    pub mode: AddressingMode,

    /// Cycle cost before any page-crossing or branch penalties.
    pub base_cycles: u8,
}

impl InstructionDescriptor {
    /// Mnemonic carried by unassigned opcodes.
    pub const ILLEGAL_MNEMONIC: &'static str = "???";

    /// The sentinel placed in every unassigned slot.
    pub const fn illegal(opcode: u8) -> Self {
        Self {
            opcode,
            mnemonic: Self::ILLEGAL_MNEMONIC,
            operation: None,
            mode: AddressingMode::Implied,
            base_cycles: 0,
        }
    }

    /// Describes `opcode` as `operation` in `mode`.
    pub const fn new(
        opcode: u8,
        operation: Operation,
        mode: AddressingMode,
        base_cycles: u8,
    ) -> Self {
        Self {
            opcode,
            mnemonic: operation.mnemonic(),
            operation: Some(operation),
            mode,
            base_cycles,
        }
    }

    /// Whether a handler is registered for this opcode.
    pub const fn is_legal(&self) -> bool {
        self.operation.is_some()
    }

    /// Total encoded size: opcode plus operand bytes.
    pub const fn size_bytes(&self) -> u8 {
        1 + self.mode.operand_bytes()
    }
}

impl std::fmt::Display for InstructionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:?}", self.mnemonic, self.mode)
    }
}

/// Immutable opcode lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionTable {
    entries: [InstructionDescriptor; 256],
}

impl InstructionTable {
    /// Builds the table of all documented NMOS 6502 opcodes.
    ///
    /// Building is deterministic: every call yields an identical table.
    ///
    /// ```
    /// use rvm8::InstructionTable;
    ///
    /// let table = InstructionTable::standard();
    /// assert_eq!(table.legal_count(), 151);
    /// assert_eq!(table, InstructionTable::standard());
    /// assert!(!table[0xFF].is_legal());
    /// ```
    pub fn standard() -> Self {
        let mut builder = TableBuilder::new();
        for &(opcode, operation, mode, cycles) in DOCUMENTED_OPCODES.iter() {
            builder.assign(opcode, operation, mode, cycles);
        }
        builder.build()
    }

    /// Starts an empty table where every slot is illegal.
    pub fn builder() -> TableBuilder {
        TableBuilder::new()
    }

    /// Looks up the descriptor for `opcode`.
    pub fn get(&self, opcode: u8) -> &InstructionDescriptor {
        &self.entries[opcode as usize]
    }

    /// Iterates over all 256 descriptors in opcode order.
    pub fn iter(&self) -> impl Iterator<Item = &InstructionDescriptor> {
        self.entries.iter()
    }

    /// Number of opcodes with a registered operation.
    pub fn legal_count(&self) -> usize {
        self.entries.iter().filter(|d| d.is_legal()).count()
    }
}

impl Default for InstructionTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl Index<u8> for InstructionTable {
    type Output = InstructionDescriptor;

    fn index(&self, opcode: u8) -> &Self::Output {
        self.get(opcode)
    }
}

/// Assembles an [`InstructionTable`] one opcode at a time.
///
/// Useful for hosts that want a restricted or extended instruction set.
///
/// ```
/// use rvm8::{AddressingMode, InstructionTable, Operation};
///
/// let table = InstructionTable::builder()
///     .assign(0xA9, Operation::Lda, AddressingMode::Immediate, 2)
///     .assign(0x69, Operation::Adc, AddressingMode::Immediate, 2)
///     .build();
///
/// assert_eq!(table.legal_count(), 2);
/// assert_eq!(table[0xEA].mnemonic, "???");
/// ```
#[derive(Debug, Clone)]
pub struct TableBuilder {
    entries: [InstructionDescriptor; 256],
}

impl TableBuilder {
    /// Creates a builder with every slot set to the illegal sentinel.
    pub fn new() -> Self {
        Self {
            entries: std::array::from_fn(|i| InstructionDescriptor::illegal(i as u8)),
        }
    }

    /// Registers `operation` in `mode` under `opcode`, replacing any previous entry.
    pub fn assign(
        &mut self,
        opcode: u8,
        operation: Operation,
        mode: AddressingMode,
        base_cycles: u8,
    ) -> &mut Self {
        self.entries[opcode as usize] =
            InstructionDescriptor::new(opcode, operation, mode, base_cycles);
        self
    }

    /// Returns `opcode` to the illegal sentinel.
    pub fn clear(&mut self, opcode: u8) -> &mut Self {
        self.entries[opcode as usize] = InstructionDescriptor::illegal(opcode);
        self
    }

    /// Freezes the current entries into a table.
    pub fn build(&self) -> InstructionTable {
        InstructionTable {
            entries: self.entries,
        }
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// (opcode, operation, mode, base cycles) for every documented opcode.
const DOCUMENTED_OPCODES: [(u8, Operation, AddressingMode, u8); 151] = [
    // Loads
    (0xA9, Lda, Imm, 2),
    (0xA5, Lda, Zp, 3),
    (0xB5, Lda, ZpX, 4),
    (0xAD, Lda, Abs, 4),
    (0xBD, Lda, AbsX, 4),
    (0xB9, Lda, AbsY, 4),
    (0xA1, Lda, IndX, 6),
    (0xB1, Lda, IndY, 5),
    (0xA2, Ldx, Imm, 2),
    (0xA6, Ldx, Zp, 3),
    (0xB6, Ldx, ZpY, 4),
    (0xAE, Ldx, Abs, 4),
    (0xBE, Ldx, AbsY, 4),
    (0xA0, Ldy, Imm, 2),
    (0xA4, Ldy, Zp, 3),
    (0xB4, Ldy, ZpX, 4),
    (0xAC, Ldy, Abs, 4),
    (0xBC, Ldy, AbsX, 4),
    // Stores
    (0x85, Sta, Zp, 3),
    (0x95, Sta, ZpX, 4),
    (0x8D, Sta, Abs, 4),
    (0x9D, Sta, AbsX, 5),
    (0x99, Sta, AbsY, 5),
    (0x81, Sta, IndX, 6),
    (0x91, Sta, IndY, 6),
    (0x86, Stx, Zp, 3),
    (0x96, Stx, ZpY, 4),
    (0x8E, Stx, Abs, 4),
    (0x84, Sty, Zp, 3),
    (0x94, Sty, ZpX, 4),
    (0x8C, Sty, Abs, 4),
    // Arithmetic
    (0x69, Adc, Imm, 2),
    (0x65, Adc, Zp, 3),
    (0x75, Adc, ZpX, 4),
    (0x6D, Adc, Abs, 4),
    (0x7D, Adc, AbsX, 4),
    (0x79, Adc, AbsY, 4),
    (0x61, Adc, IndX, 6),
    (0x71, Adc, IndY, 5),
    (0xE9, Sbc, Imm, 2),
    (0xE5, Sbc, Zp, 3),
    (0xF5, Sbc, ZpX, 4),
    (0xED, Sbc, Abs, 4),
    (0xFD, Sbc, AbsX, 4),
    (0xF9, Sbc, AbsY, 4),
    (0xE1, Sbc, IndX, 6),
    (0xF1, Sbc, IndY, 5),
    // Logic
    (0x29, And, Imm, 2),
    (0x25, And, Zp, 3),
    (0x35, And, ZpX, 4),
    (0x2D, And, Abs, 4),
    (0x3D, And, AbsX, 4),
    (0x39, And, AbsY, 4),
    (0x21, And, IndX, 6),
    (0x31, And, IndY, 5),
    (0x09, Ora, Imm, 2),
    (0x05, Ora, Zp, 3),
    (0x15, Ora, ZpX, 4),
    (0x0D, Ora, Abs, 4),
    (0x1D, Ora, AbsX, 4),
    (0x19, Ora, AbsY, 4),
    (0x01, Ora, IndX, 6),
    (0x11, Ora, IndY, 5),
    (0x49, Eor, Imm, 2),
    (0x45, Eor, Zp, 3),
    (0x55, Eor, ZpX, 4),
    (0x4D, Eor, Abs, 4),
    (0x5D, Eor, AbsX, 4),
    (0x59, Eor, AbsY, 4),
    (0x41, Eor, IndX, 6),
    (0x51, Eor, IndY, 5),
    (0x24, Bit, Zp, 3),
    (0x2C, Bit, Abs, 4),
    // Comparisons
    (0xC9, Cmp, Imm, 2),
    (0xC5, Cmp, Zp, 3),
    (0xD5, Cmp, ZpX, 4),
    (0xCD, Cmp, Abs, 4),
    (0xDD, Cmp, AbsX, 4),
    (0xD9, Cmp, AbsY, 4),
    (0xC1, Cmp, IndX, 6),
    (0xD1, Cmp, IndY, 5),
    (0xE0, Cpx, Imm, 2),
    (0xE4, Cpx, Zp, 3),
    (0xEC, Cpx, Abs, 4),
    (0xC0, Cpy, Imm, 2),
    (0xC4, Cpy, Zp, 3),
    (0xCC, Cpy, Abs, 4),
    // Shifts and rotates
    (0x0A, Asl, Acc, 2),
    (0x06, Asl, Zp, 5),
    (0x16, Asl, ZpX, 6),
    (0x0E, Asl, Abs, 6),
    (0x1E, Asl, AbsX, 7),
    (0x4A, Lsr, Acc, 2),
    (0x46, Lsr, Zp, 5),
    (0x56, Lsr, ZpX, 6),
    (0x4E, Lsr, Abs, 6),
    (0x5E, Lsr, AbsX, 7),
    (0x2A, Rol, Acc, 2),
    (0x26, Rol, Zp, 5),
    (0x36, Rol, ZpX, 6),
    (0x2E, Rol, Abs, 6),
    (0x3E, Rol, AbsX, 7),
    (0x6A, Ror, Acc, 2),
    (0x66, Ror, Zp, 5),
    (0x76, Ror, ZpX, 6),
    (0x6E, Ror, Abs, 6),
    (0x7E, Ror, AbsX, 7),
    // Increments and decrements
    (0xE6, Inc, Zp, 5),
    (0xF6, Inc, ZpX, 6),
    (0xEE, Inc, Abs, 6),
    (0xFE, Inc, AbsX, 7),
    (0xC6, Dec, Zp, 5),
    (0xD6, Dec, ZpX, 6),
    (0xCE, Dec, Abs, 6),
    (0xDE, Dec, AbsX, 7),
    (0xE8, Inx, Imp, 2),
    (0xC8, Iny, Imp, 2),
    (0xCA, Dex, Imp, 2),
    (0x88, Dey, Imp, 2),
    // Branches
    (0x90, Bcc, Rel, 2),
    (0xB0, Bcs, Rel, 2),
    (0xF0, Beq, Rel, 2),
    (0xD0, Bne, Rel, 2),
    (0x30, Bmi, Rel, 2),
    (0x10, Bpl, Rel, 2),
    (0x50, Bvc, Rel, 2),
    (0x70, Bvs, Rel, 2),
    // Control flow
    (0x4C, Jmp, Abs, 3),
    (0x6C, Jmp, Ind, 5),
    (0x20, Jsr, Abs, 6),
    (0x60, Rts, Imp, 6),
    (0x40, Rti, Imp, 6),
    (0x00, Brk, Imp, 7),
    (0xEA, Nop, Imp, 2),
    // Stack
    (0x48, Pha, Imp, 3),
    (0x08, Php, Imp, 3),
    (0x68, Pla, Imp, 4),
    (0x28, Plp, Imp, 4),
    // Flags
    (0x18, Clc, Imp, 2),
    (0x38, Sec, Imp, 2),
    (0x58, Cli, Imp, 2),
    (0x78, Sei, Imp, 2),
    (0xD8, Cld, Imp, 2),
    (0xF8, Sed, Imp, 2),
    (0xB8, Clv, Imp, 2),
    // Transfers
    (0xAA, Tax, Imp, 2),
    (0xA8, Tay, Imp, 2),
    (0x8A, Txa, Imp, 2),
    (0x98, Tya, Imp, 2),
    (0xBA, Tsx, Imp, 2),
    (0x9A, Txs, Imp, 2),
];
