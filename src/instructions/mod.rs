//! # Instruction Implementations
//!
//! Handlers are organised by family. Each one validates its addressing mode
//! before touching any state, resolves the operand, applies its effect and
//! returns the cycles it consumed (base cost plus whatever penalties that
//! particular instruction is subject to).
//!
//! ## Families
//!
//! - **load_store**: LDA, LDX, LDY, STA, STX, STY
//! - **alu**: ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT
//! - **shifts**: ASL, LSR, ROL, ROR
//! - **inc_dec**: INC, DEC, INX, INY, DEX, DEY
//! - **branches**: BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS
//! - **control**: JMP, JSR, RTS, RTI, BRK, NOP
//! - **stack**: PHA, PHP, PLA, PLP
//! - **flags**: CLC, SEC, CLI, SEI, CLD, SED, CLV
//! - **transfer**: TAX, TAY, TXA, TYA, TSX, TXS

use crate::addressing::{resolve, AddressingMode, Operand};
use crate::memory::MemoryBus;
use crate::opcodes::{InstructionDescriptor, Operation};
use crate::CPU;

mod alu;
mod branches;
mod control;
mod flags;
mod inc_dec;
mod load_store;
mod shifts;
mod stack;
mod transfer;

/// A handler was invoked with an addressing mode it does not implement.
///
/// The dispatcher turns this into `ExecutionError::UnsupportedMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UnsupportedMode;

pub(crate) type Cycles = Result<u8, UnsupportedMode>;

use AddressingMode::*;

/// Modes through which an instruction can read a byte.
const READ_MODES: &[AddressingMode] = &[
    Immediate, ZeroPage, ZeroPageX, ZeroPageY, Absolute, AbsoluteX, AbsoluteY, IndirectX,
    IndirectY,
];

/// Modes that name a writable memory location.
const WRITE_MODES: &[AddressingMode] = &[
    ZeroPage, ZeroPageX, ZeroPageY, Absolute, AbsoluteX, AbsoluteY, IndirectX, IndirectY,
];

/// Read-modify-write targets: the accumulator or any writable location.
const MODIFY_MODES: &[AddressingMode] = &[
    Accumulator, ZeroPage, ZeroPageX, ZeroPageY, Absolute, AbsoluteX, AbsoluteY, IndirectX,
    IndirectY,
];

const IMPLIED: &[AddressingMode] = &[Implied];

/// Runs the handler for `operation`.
pub(crate) fn execute<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operation: Operation,
    instr: &InstructionDescriptor,
) -> Cycles {
    use Operation::*;
    match operation {
        Lda => load_store::execute_lda(cpu, instr),
        Ldx => load_store::execute_ldx(cpu, instr),
        Ldy => load_store::execute_ldy(cpu, instr),
        Sta => load_store::execute_sta(cpu, instr),
        Stx => load_store::execute_stx(cpu, instr),
        Sty => load_store::execute_sty(cpu, instr),
        Adc => alu::execute_adc(cpu, instr),
        Sbc => alu::execute_sbc(cpu, instr),
        And => alu::execute_and(cpu, instr),
        Ora => alu::execute_ora(cpu, instr),
        Eor => alu::execute_eor(cpu, instr),
        Cmp => alu::execute_cmp(cpu, instr),
        Cpx => alu::execute_cpx(cpu, instr),
        Cpy => alu::execute_cpy(cpu, instr),
        Bit => alu::execute_bit(cpu, instr),
        Asl => shifts::execute_asl(cpu, instr),
        Lsr => shifts::execute_lsr(cpu, instr),
        Rol => shifts::execute_rol(cpu, instr),
        Ror => shifts::execute_ror(cpu, instr),
        Inc => inc_dec::execute_inc(cpu, instr),
        Dec => inc_dec::execute_dec(cpu, instr),
        Inx => inc_dec::execute_inx(cpu, instr),
        Iny => inc_dec::execute_iny(cpu, instr),
        Dex => inc_dec::execute_dex(cpu, instr),
        Dey => inc_dec::execute_dey(cpu, instr),
        Bcc | Bcs | Beq | Bne | Bmi | Bpl | Bvc | Bvs => {
            branches::execute_branch(cpu, operation, instr)
        }
        Jmp => control::execute_jmp(cpu, instr),
        Jsr => control::execute_jsr(cpu, instr),
        Rts => control::execute_rts(cpu, instr),
        Rti => control::execute_rti(cpu, instr),
        Brk => control::execute_brk(cpu, instr),
        Nop => control::execute_nop(cpu, instr),
        Pha => stack::execute_pha(cpu, instr),
        Php => stack::execute_php(cpu, instr),
        Pla => stack::execute_pla(cpu, instr),
        Plp => stack::execute_plp(cpu, instr),
        Clc | Sec | Cli | Sei | Cld | Sed | Clv => flags::execute_flag(cpu, operation, instr),
        Tax => transfer::execute_tax(cpu, instr),
        Tay => transfer::execute_tay(cpu, instr),
        Txa => transfer::execute_txa(cpu, instr),
        Tya => transfer::execute_tya(cpu, instr),
        Tsx => transfer::execute_tsx(cpu, instr),
        Txs => transfer::execute_txs(cpu, instr),
    }
}

/// Base cost plus the page-cross cycle, if this instruction pays it.
pub(crate) fn cycles_for(instr: &InstructionDescriptor, page_crossed: bool) -> u8 {
    let penalty = page_crossed
        && instr
            .operation
            .is_some_and(Operation::pays_page_cross_penalty);
    instr.base_cycles.saturating_add(penalty as u8)
}

impl<M: MemoryBus> CPU<M> {
    /// Resolves the operand if `instr.mode` is one of `modes`.
    ///
    /// The mode check happens before any operand byte is consumed, so a
    /// rejected instruction leaves PC and memory untouched.
    pub(crate) fn operand(
        &mut self,
        instr: &InstructionDescriptor,
        modes: &[AddressingMode],
    ) -> Result<Operand, UnsupportedMode> {
        if !modes.contains(&instr.mode) {
            return Err(UnsupportedMode);
        }
        Ok(resolve(instr.mode, &mut self.state, &self.memory))
    }

    /// Resolves a memory operand, returning its address and page-cross flag.
    pub(crate) fn memory_operand(
        &mut self,
        instr: &InstructionDescriptor,
        modes: &[AddressingMode],
    ) -> Result<(u16, bool), UnsupportedMode> {
        match self.operand(instr, modes)? {
            Operand::Memory { addr, page_crossed } => Ok((addr, page_crossed)),
            Operand::Implied | Operand::Accumulator => Err(UnsupportedMode),
        }
    }

    /// Fetches the byte an instruction reads and the cycles the read costs.
    pub(crate) fn read_operand(
        &mut self,
        instr: &InstructionDescriptor,
    ) -> Result<(u8, u8), UnsupportedMode> {
        let (addr, page_crossed) = self.memory_operand(instr, READ_MODES)?;
        let value = self.memory.read(addr);
        Ok((value, cycles_for(instr, page_crossed)))
    }

    pub(crate) fn push(&mut self, value: u8) {
        self.memory.write(self.state.stack_address(), value);
        self.state.move_sp(-1);
    }

    pub(crate) fn pull(&mut self) -> u8 {
        self.state.move_sp(1);
        self.memory.read(self.state.stack_address())
    }

    pub(crate) fn push_word(&mut self, value: u16) {
        self.push((value >> 8) as u8);
        self.push(value as u8);
    }

    pub(crate) fn pull_word(&mut self) -> u16 {
        let lo = self.pull() as u16;
        let hi = self.pull() as u16;
        (hi << 8) | lo
    }
}
