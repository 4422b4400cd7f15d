//! Tests for flag instructions and register transfers.

use rvm8::{FlatMemory, MemoryBus, CPU};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

// ========== Flag Instructions ==========

#[test]
fn test_set_and_clear_flags() {
    let mut cpu = setup_cpu();
    // SEC; SED; SEI; CLC; CLD; CLI
    cpu.memory_mut()
        .load(0x8000, &[0x38, 0xF8, 0x78, 0x18, 0xD8, 0x58]);

    cpu.step().unwrap();
    assert!(cpu.flag_c());
    cpu.step().unwrap();
    assert!(cpu.flag_d());
    cpu.step().unwrap();
    assert!(cpu.flag_i());

    cpu.step().unwrap();
    assert!(!cpu.flag_c());
    cpu.step().unwrap();
    assert!(!cpu.flag_d());
    cpu.step().unwrap();
    assert!(!cpu.flag_i());

    assert_eq!(cpu.cycles(), 12);
    assert_eq!(cpu.pc(), 0x8006);
}

#[test]
fn test_clv_clears_only_overflow() {
    let mut cpu = setup_cpu();
    cpu.set_status(0xFF);
    cpu.write(0x8000, 0xB8);

    assert_eq!(cpu.step(), Ok(2));
    assert_eq!(cpu.status(), 0xBF);
}

// ========== Transfers ==========

#[test]
fn test_tax_tay() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x80);
    cpu.memory_mut().load(0x8000, &[0xAA, 0xA8]);

    assert_eq!(cpu.step(), Ok(2));
    assert_eq!(cpu.x(), 0x80);
    assert!(cpu.flag_n());

    cpu.step().unwrap();
    assert_eq!(cpu.y(), 0x80);
}

#[test]
fn test_txa_tya_set_zero() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x42);
    cpu.memory_mut().load(0x8000, &[0x8A, 0x98]);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());

    cpu.set_y(0x01);
    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x01);
    assert!(!cpu.flag_z());
}

#[test]
fn test_tsx_updates_flags() {
    let mut cpu = setup_cpu();
    cpu.write(0x8000, 0xBA);

    cpu.step().unwrap();

    assert_eq!(cpu.x(), 0xFD);
    assert!(cpu.flag_n());
}

#[test]
fn test_txs_leaves_flags() {
    let mut cpu = setup_cpu();
    cpu.set_x(0x00);
    cpu.set_status(0x00);
    cpu.write(0x8000, 0x9A);

    assert_eq!(cpu.step(), Ok(2));

    assert_eq!(cpu.sp(), 0x00);
    assert_eq!(cpu.status(), 0x00, "TXS never touches Z");
}
