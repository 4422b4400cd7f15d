//! Memory bus trait tests
//!
//! Verifies FlatMemory, the memory map constants, and that the CPU works
//! against a host-supplied bus implementation.

use rvm8::memory::map;
use rvm8::{FlatMemory, MemoryBus, CPU};

#[test]
fn test_flat_memory_initialization() {
    let memory = FlatMemory::new();

    for addr in [0x0000, 0x1234, 0x8000, 0xFFFF] {
        assert_eq!(
            memory.read(addr),
            0x00,
            "Memory at 0x{:04X} should be initialized to 0",
            addr
        );
    }
}

#[test]
fn test_flat_memory_read_write_round_trip() {
    let mut memory = FlatMemory::new();

    let test_data = [
        (0x0000, 0x01),
        (0x00FF, 0xFF),
        (0x0100, 0x7F),
        (0x2000, 0x20),
        (0x8000, 0xAB),
        (0xFFFF, 0xCD),
    ];

    for &(addr, value) in &test_data {
        memory.write(addr, value);
        assert_eq!(
            memory.read(addr),
            value,
            "Memory at 0x{:04X} should contain 0x{:02X}",
            addr,
            value
        );
    }
}

#[test]
fn test_load_wraps_at_top_of_memory() {
    let mut memory = FlatMemory::new();
    memory.load(0xFFFE, &[0x01, 0x02, 0x03]);

    assert_eq!(memory.read(0xFFFE), 0x01);
    assert_eq!(memory.read(0xFFFF), 0x02);
    assert_eq!(memory.read(0x0000), 0x03);
}

#[test]
fn test_read_word_little_endian_and_wrapping() {
    let mut memory = FlatMemory::new();
    memory.load(0x1000, &[0x34, 0x12]);
    memory.write(0xFFFF, 0xCD);
    memory.write(0x0000, 0xAB);

    assert_eq!(memory.read_word(0x1000), 0x1234);
    assert_eq!(memory.read_word(0xFFFF), 0xABCD);
}

#[test]
fn test_as_slice_covers_full_address_space() {
    let mut memory = FlatMemory::new();
    memory.write(0x2000, 0x41);

    let bytes = memory.as_slice();
    assert_eq!(bytes.len(), 0x10000);
    assert_eq!(bytes[0x2000], 0x41);
}

#[test]
fn test_memory_map_layout() {
    assert_eq!(map::STACK_PAGE, 0x0100);
    assert_eq!(map::RESET_VECTOR, 0xFFFC);
    assert_eq!(map::BREAK_VECTOR, 0xFFFE);
    assert!(map::RAM.contains(&map::STACK_PAGE));
    assert!(map::PROGRAM.contains(&map::RESET_VECTOR));
    assert!(map::VIDEO.end() < map::DEVICE.start());
    assert!(map::DEVICE.end() < map::INPUT.start());
}

#[test]
fn test_cpu_writes_video_region_like_ram() {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    // LDA #$2A; STA $2000; LDX $2000
    memory.load(0x8000, &[0xA9, 0x2A, 0x8D, 0x00, 0x20, 0xAE, 0x00, 0x20]);

    let mut cpu = CPU::new(memory);
    for _ in 0..3 {
        cpu.step().unwrap();
    }

    assert_eq!(cpu.x(), 0x2A);
    assert_eq!(cpu.into_memory().read(0x2000), 0x2A);
}

/// A bus that records every write, standing in for host-side device logic.
struct RecordingBus {
    ram: FlatMemory,
    writes: Vec<(u16, u8)>,
}

impl MemoryBus for RecordingBus {
    fn read(&self, addr: u16) -> u8 {
        self.ram.read(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.writes.push((addr, value));
        self.ram.write(addr, value);
    }
}

#[test]
fn test_custom_bus_sees_cpu_writes() {
    let mut ram = FlatMemory::new();
    ram.write(0xFFFC, 0x00);
    ram.write(0xFFFD, 0x80);
    // LDA #$07; STA $2400; PHA
    ram.load(0x8000, &[0xA9, 0x07, 0x8D, 0x00, 0x24, 0x48]);

    let mut cpu = CPU::new(RecordingBus {
        ram,
        writes: Vec::new(),
    });
    for _ in 0..3 {
        cpu.step().unwrap();
    }

    assert_eq!(cpu.memory().writes, vec![(0x2400, 0x07), (0x01FD, 0x07)]);
}
