//! # CPU State and Execution
//!
//! This module contains the `CPU` struct, which binds a processor state, a
//! memory bus and a shared instruction table, and the fetch-decode-execute
//! loop that drives them.
//!
//! ## Execution Model
//!
//! - `step()`: fetch one opcode, look it up, run its handler, retire its cycles
//! - `run_for_cycles()`: step until a cycle budget is met
//!
//! A step is atomic from the caller's point of view and always returns a
//! definite outcome: the cycles consumed, or an [`ExecutionError`] describing
//! why the step was a zero-cycle no-op. The CPU never halts itself; the host
//! decides what to do with a diagnostic.

use crate::instructions::{self, UnsupportedMode};
use crate::memory::map;
use crate::state::{ProcessorState, Status};
use crate::{ExecutionError, InstructionTable, MemoryBus};
use log::{debug, error, info, trace};
use std::sync::Arc;

/// CPU execution context.
///
/// Generic over the memory implementation via the `MemoryBus` trait. The bus
/// is either owned (`CPU<FlatMemory>`) or borrowed from the host
/// (`CPU<&mut FlatMemory>`).
///
/// # Examples
///
/// ```
/// use rvm8::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00); // Low byte
/// memory.write(0xFFFD, 0x80); // High byte (PC = 0x8000)
///
/// let cpu = CPU::new(memory);
///
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFD);
/// assert_eq!(cpu.flag_i(), true);
/// assert_eq!(cpu.cycles(), 0);
/// ```
pub struct CPU<M: MemoryBus> {
    /// Registers, flags and cycle counter
    pub(crate) state: ProcessorState,

    /// Memory bus implementation
    pub(crate) memory: M,

    /// Opcode lookup, shared read-only with any other CPU built from it
    table: Arc<InstructionTable>,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new CPU bound to `memory`, using the standard instruction table.
    ///
    /// The CPU starts in the power-on state:
    /// - PC is loaded from the reset vector at 0xFFFC/0xFFFD (little-endian)
    /// - SP is 0xFD
    /// - Interrupt-disable is the only flag set
    /// - A, X, Y and the cycle counter are zero
    pub fn new(memory: M) -> Self {
        Self::with_table(memory, Arc::new(InstructionTable::standard()))
    }

    /// Creates a new CPU that dispatches through an already-built `table`.
    ///
    /// Build the table once at startup and hand clones of the `Arc` to every
    /// CPU instance; each instance still owns its own state and bus.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use rvm8::{CPU, FlatMemory, InstructionTable};
    ///
    /// let table = Arc::new(InstructionTable::standard());
    /// let first = CPU::with_table(FlatMemory::new(), Arc::clone(&table));
    /// let second = CPU::with_table(FlatMemory::new(), table);
    /// assert_eq!(first.table(), second.table());
    /// ```
    pub fn with_table(memory: M, table: Arc<InstructionTable>) -> Self {
        let pc = memory.read_word(map::RESET_VECTOR);
        Self {
            state: ProcessorState::power_on(pc),
            memory,
            table,
        }
    }

    /// Reapplies the power-on defaults without rebinding memory.
    ///
    /// PC is reloaded from the reset vector as it currently reads on the bus,
    /// and the cycle counter restarts at zero.
    pub fn reset(&mut self) {
        let pc = self.memory.read_word(map::RESET_VECTOR);
        self.state = ProcessorState::power_on(pc);
        info!("CPU reset, PC=0x{:04X}", pc);
    }

    /// Executes one instruction and advances the CPU state.
    ///
    /// 1. Fetch the opcode at PC and advance PC past it
    /// 2. Look up its descriptor
    /// 3. Run the handler, which consumes operand bytes and applies the effect
    /// 4. Add the handler's cycle count to the running total
    ///
    /// # Returns
    ///
    /// - `Ok(cycles)` for the cycles this instruction consumed
    /// - `Err(ExecutionError::IllegalOpcode)` if no handler is registered;
    ///   PC has moved past the opcode byte and nothing else changed
    /// - `Err(ExecutionError::UnsupportedMode)` if the handler does not
    ///   implement the descriptor's addressing mode; same recovery as above,
    ///   or a panic when built with the `strict` feature
    ///
    /// # Examples
    ///
    /// ```
    /// use rvm8::{CPU, FlatMemory, MemoryBus, ExecutionError};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    /// mem.write(0x8000, 0xEA); // NOP
    /// mem.write(0x8001, 0xFF); // unassigned
    ///
    /// let mut cpu = CPU::new(mem);
    ///
    /// assert_eq!(cpu.step(), Ok(2));
    /// assert_eq!(
    ///     cpu.step(),
    ///     Err(ExecutionError::IllegalOpcode { opcode: 0xFF, address: 0x8001 })
    /// );
    /// assert_eq!(cpu.pc(), 0x8002);
    /// ```
    pub fn step(&mut self) -> Result<u8, ExecutionError> {
        let address = self.state.pc;
        let opcode = self.memory.read(address);
        self.state.pc = address.wrapping_add(1);

        let instr = *self.table.get(opcode);
        let Some(operation) = instr.operation else {
            debug!("Illegal opcode 0x{:02X} at PC 0x{:04X}", opcode, address);
            return Err(ExecutionError::IllegalOpcode { opcode, address });
        };

        trace!(
            "{:04X}  {:02X}  {:<16} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            address,
            opcode,
            instr.to_string(),
            self.state.a,
            self.state.x,
            self.state.y,
            self.state.status.bits(),
            self.state.sp,
            self.state.cycles
        );

        match instructions::execute(self, operation, &instr) {
            Ok(cycles) => {
                self.state.cycles += cycles as u64;
                Ok(cycles)
            }
            Err(UnsupportedMode) => {
                let err = ExecutionError::UnsupportedMode {
                    opcode,
                    mnemonic: instr.mnemonic,
                    mode: instr.mode,
                    address,
                };
                error!("{}", err);
                if cfg!(feature = "strict") {
                    panic!("{}", err);
                }
                Err(err)
            }
        }
    }

    /// Runs the CPU for a specified number of cycles.
    ///
    /// Executes instructions until at least `cycle_budget` cycles have been
    /// retired or a step reports a diagnostic. Returns the cycles actually
    /// consumed, which may overshoot the budget by part of one instruction.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvm8::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    /// mem.load(0x8000, &[0xEA; 16]); // NOPs
    ///
    /// let mut cpu = CPU::new(mem);
    /// assert_eq!(cpu.run_for_cycles(10), Ok(10));
    /// assert_eq!(cpu.pc(), 0x8005);
    /// ```
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        let start_cycles = self.state.cycles;
        let target_cycles = start_cycles.saturating_add(cycle_budget);

        while self.state.cycles < target_cycles {
            self.step()?;
        }

        Ok(self.state.cycles - start_cycles)
    }

    // ========== Memory Access ==========

    /// Reads a byte from the bus without side effects on the CPU.
    pub fn read(&self, addr: u16) -> u8 {
        self.memory.read(addr)
    }

    /// Writes a byte to the bus, e.g. when loading a program.
    pub fn write(&mut self, addr: u16, value: u8) {
        self.memory.write(addr, value);
    }

    /// Returns a shared reference to the bound memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to the bound memory bus.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Consumes the CPU, handing its bus back to the host.
    pub fn into_memory(self) -> M {
        self.memory
    }

    /// Returns the instruction table this CPU dispatches through.
    pub fn table(&self) -> &InstructionTable {
        &self.table
    }

    /// Returns a snapshot-able view of all registers.
    pub fn state(&self) -> &ProcessorState {
        &self.state
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.state.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.state.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.state.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    /// Returns the stack pointer value.
    ///
    /// The stack grows downward through page one; the next push goes to
    /// 0x0100 | (SP & 0x00FF).
    pub fn sp(&self) -> u16 {
        self.state.sp
    }

    /// Returns the status register as a packed byte (`NV-BDIZC`).
    ///
    /// ```
    /// use rvm8::{CPU, FlatMemory};
    ///
    /// let cpu = CPU::new(FlatMemory::new());
    /// assert_eq!(cpu.status(), 0b0000_0100); // Only I set
    /// ```
    pub fn status(&self) -> u8 {
        self.state.status.bits()
    }

    /// Returns the total number of cycles retired since initialization or reset.
    pub fn cycles(&self) -> u64 {
        self.state.cycles
    }

    // ========== Register Setters ==========

    /// Sets the accumulator.
    pub fn set_a(&mut self, value: u8) {
        self.state.a = value;
    }

    /// Sets the X index register.
    pub fn set_x(&mut self, value: u8) {
        self.state.x = value;
    }

    /// Sets the Y index register.
    pub fn set_y(&mut self, value: u8) {
        self.state.y = value;
    }

    /// Sets the program counter; the next `step()` fetches from here.
    pub fn set_pc(&mut self, value: u16) {
        self.state.pc = value;
    }

    /// Sets the stack pointer.
    pub fn set_sp(&mut self, value: u16) {
        self.state.sp = value;
    }

    /// Replaces the whole status register.
    pub fn set_status(&mut self, value: u8) {
        self.state.status = Status::from_bits_retain(value);
    }

    // ========== Status Flags ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.state.flag(Status::NEGATIVE)
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.state.flag(Status::OVERFLOW)
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.state.flag(Status::BREAK)
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.state.flag(Status::DECIMAL)
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.state.flag(Status::INTERRUPT_DISABLE)
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.state.flag(Status::ZERO)
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.state.flag(Status::CARRY)
    }

    /// Sets or clears the Negative flag.
    pub fn set_flag_n(&mut self, value: bool) {
        self.state.status.set(Status::NEGATIVE, value);
    }

    /// Sets or clears the Overflow flag.
    pub fn set_flag_v(&mut self, value: bool) {
        self.state.status.set(Status::OVERFLOW, value);
    }

    /// Sets or clears the Break flag.
    pub fn set_flag_b(&mut self, value: bool) {
        self.state.status.set(Status::BREAK, value);
    }

    /// Sets or clears the Decimal mode flag.
    pub fn set_flag_d(&mut self, value: bool) {
        self.state.status.set(Status::DECIMAL, value);
    }

    /// Sets or clears the Interrupt Disable flag.
    pub fn set_flag_i(&mut self, value: bool) {
        self.state.status.set(Status::INTERRUPT_DISABLE, value);
    }

    /// Sets or clears the Zero flag.
    pub fn set_flag_z(&mut self, value: bool) {
        self.state.status.set(Status::ZERO, value);
    }

    /// Sets or clears the Carry flag.
    pub fn set_flag_c(&mut self, value: bool) {
        self.state.status.set(Status::CARRY, value);
    }
}

impl<M: MemoryBus> std::fmt::Debug for CPU<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CPU")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
