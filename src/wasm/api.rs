//! WASM API for the rvm-8 CPU core.
//!
//! Provides JavaScript-callable interfaces for CPU control, state inspection
//! and memory population. Rendering, input and pacing stay on the JavaScript
//! side; they talk to the core through `read_memory`/`write_memory` and the
//! memory map in [`crate::memory::map`].

use crate::{ExecutionError, FlatMemory, MemoryBus, CPU};
use wasm_bindgen::prelude::*;

/// Number of addressable bytes.
const ADDRESS_SPACE: u32 = 0x1_0000;

/// JavaScript-compatible diagnostic wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
    opcode: u8,
    address: u16,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn opcode(&self) -> u8 {
        self.opcode
    }

    #[wasm_bindgen(getter)]
    pub fn address(&self) -> u16 {
        self.address
    }
}

impl From<ExecutionError> for JsError {
    fn from(err: ExecutionError) -> Self {
        JsError {
            message: err.to_string(),
            opcode: err.opcode(),
            address: err.address(),
        }
    }
}

/// Main machine interface for JavaScript
#[wasm_bindgen]
pub struct Machine {
    cpu: CPU<FlatMemory>,
    on_diagnostic: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl Machine {
    /// Create a machine with zeroed 64KB memory.
    ///
    /// `on_diagnostic`, when given, is called with the message of every
    /// illegal-opcode or unsupported-mode diagnostic before it is returned.
    #[wasm_bindgen(constructor)]
    pub fn new(on_diagnostic: Option<js_sys::Function>) -> Self {
        Machine {
            cpu: CPU::new(FlatMemory::new()),
            on_diagnostic,
        }
    }

    /// Execute a single instruction, returning the cycles it consumed
    pub fn step(&mut self) -> Result<u8, JsError> {
        self.cpu.step().map_err(|e| self.report(e))
    }

    /// Execute instructions for a cycle budget and return actual cycles executed
    ///
    /// The result saturates at `u32::MAX`.
    pub fn run_for_cycles(&mut self, cycles: u32) -> Result<u32, JsError> {
        self.cpu
            .run_for_cycles(cycles as u64)
            .map(saturate_cycles)
            .map_err(|e| self.report(e))
    }

    /// Reset the CPU, reloading PC from the reset vector. Memory is kept.
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.cpu.a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.cpu.x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.cpu.y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u16 {
        self.cpu.sp()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.cpu.status()
    }

    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.cpu.cycles() as f64 // Convert u64 to f64 for JavaScript
    }

    /// Set the program counter
    pub fn set_pc(&mut self, addr: u16) {
        self.cpu.set_pc(addr);
    }

    // Memory access methods

    /// Read a single byte from memory
    pub fn read_memory(&self, addr: u16) -> u8 {
        self.cpu.read(addr)
    }

    /// Write a single byte to memory
    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.cpu.write(addr, value);
    }

    /// Copy `len` bytes starting at `start` into a typed array (wrapping at 0xFFFF)
    ///
    /// `len` is clamped to the 64KB address space.
    pub fn memory_range(&self, start: u16, len: u32) -> js_sys::Uint8Array {
        let bytes: Vec<u8> = (0..clamp_len(len))
            .map(|i| self.cpu.memory().read(start.wrapping_add(i as u16)))
            .collect();
        js_sys::Uint8Array::from(&bytes[..])
    }

    /// Load a ROM image at `start_addr` and point the reset vector at it.
    ///
    /// The CPU is reset afterwards so PC starts at `start_addr`.
    pub fn load_program(&mut self, program: &[u8], start_addr: u16) {
        let memory = self.cpu.memory_mut();
        memory.load(start_addr, program);
        memory.load(crate::memory::map::RESET_VECTOR, &start_addr.to_le_bytes());
        self.cpu.reset();
    }
}

impl Machine {
    fn report(&self, err: ExecutionError) -> JsError {
        if let Some(callback) = &self.on_diagnostic {
            let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(&err.to_string()));
        }
        err.into()
    }
}

/// Narrows a cycle count for JavaScript, saturating at `u32::MAX`.
fn saturate_cycles(cycles: u64) -> u32 {
    u32::try_from(cycles).unwrap_or(u32::MAX)
}

/// Limits a requested byte count to one pass over the address space.
fn clamp_len(len: u32) -> u32 {
    len.min(ADDRESS_SPACE)
}
