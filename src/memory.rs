//! # Memory Bus
//!
//! The CPU touches memory only through the `MemoryBus` trait. The core itself
//! treats the whole 64KB space as uniform RAM: every address is readable and
//! writable, and protection or memory-mapped I/O are policies a host layers on
//! top by providing its own bus.
//!
//! Two ownership models are supported:
//!
//! - The CPU owns its bus outright (`CPU<FlatMemory>`).
//! - The CPU borrows a host-owned bus (`CPU<&mut FlatMemory>`), with the borrow
//!   checker enforcing that the host does not touch it while the CPU runs.

/// Memory bus trait for CPU to read/write bytes.
///
/// # Examples
///
/// ```
/// use rvm8::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x1234, 0x42);
/// assert_eq!(mem.read(0x1234), 0x42);
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use rvm8::MemoryBus;
///
/// struct RomRamMemory {
///     ram: [u8; 0x8000],
///     rom: [u8; 0x8000],
/// }
///
/// impl MemoryBus for RomRamMemory {
///     fn read(&self, addr: u16) -> u8 {
///         if addr < 0x8000 {
///             self.ram[addr as usize]
///         } else {
///             self.rom[(addr - 0x8000) as usize]
///         }
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         // Host-level write protection for the upper half
///         if addr < 0x8000 {
///             self.ram[addr as usize] = value;
///         }
///     }
/// }
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    ///
    /// Must never panic: the address type already covers the full space.
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address.
    fn write(&mut self, addr: u16, value: u8);

    /// Reads a little-endian word: low byte at `addr`, high byte at `addr + 1`
    /// (wrapping past 0xFFFF).
    fn read_word(&self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }
}

impl<M: MemoryBus + ?Sized> MemoryBus for &mut M {
    fn read(&self, addr: u16) -> u8 {
        (**self).read(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        (**self).write(addr, value)
    }
}

/// Address conventions of the rvm-8 memory map.
///
/// The core does not enforce any of these; they describe how hosts and the
/// surrounding collaborators populate and consume the bus.
pub mod map {
    use std::ops::RangeInclusive;

    /// General purpose RAM.
    pub const RAM: RangeInclusive<u16> = 0x0000..=0x1FFF;

    /// Stack page used by push/pull instructions.
    pub const STACK_PAGE: u16 = 0x0100;

    /// Video/tile memory, written by programs and read by the renderer.
    pub const VIDEO: RangeInclusive<u16> = 0x2000..=0x23FF;

    /// Device registers, written by the renderer and read by programs.
    pub const DEVICE: RangeInclusive<u16> = 0x2400..=0x24FF;

    /// Input registers, written by the host input layer.
    pub const INPUT: RangeInclusive<u16> = 0x2500..=0x250F;

    /// Program code, populated by the ROM loader.
    pub const PROGRAM: RangeInclusive<u16> = 0xFF00..=0xFFFF;

    /// Reset vector (low byte; high byte at `RESET_VECTOR + 1`).
    pub const RESET_VECTOR: u16 = 0xFFFC;

    /// BRK vector (low byte; high byte at `BREAK_VECTOR + 1`).
    pub const BREAK_VECTOR: u16 = 0xFFFE;
}

/// Flat 64KB RAM with a single owned backing store.
///
/// All addresses (0x0000-0xFFFF) are writable and start at 0x00.
///
/// # Examples
///
/// ```
/// use rvm8::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80);
/// memory.load(0x8000, &[0xA9, 0x05]); // LDA #$05
///
/// let cpu = CPU::new(memory);
/// assert_eq!(cpu.pc(), 0x8000);
/// ```
#[derive(Clone)]
pub struct FlatMemory {
    data: Box<[u8; 65536]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 65536]),
        }
    }

    /// Copies `bytes` into memory starting at `start`.
    ///
    /// Writes wrap from 0xFFFF to 0x0000, so no input is ever rejected.
    pub fn load(&mut self, start: u16, bytes: &[u8]) {
        let mut addr = start;
        for &byte in bytes {
            self.data[addr as usize] = byte;
            addr = addr.wrapping_add(1);
        }
    }

    /// Returns the whole backing store for inspection.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..]
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FlatMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatMemory").finish_non_exhaustive()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }
}
