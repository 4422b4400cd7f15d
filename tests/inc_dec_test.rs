//! Tests for INC, DEC, INX, INY, DEX and DEY.

use rvm8::{FlatMemory, MemoryBus, CPU};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

#[test]
fn test_inc_zero_page() {
    let mut cpu = setup_cpu();
    cpu.write(0x0010, 0x7F);
    cpu.memory_mut().load(0x8000, &[0xE6, 0x10]);

    assert_eq!(cpu.step(), Ok(5));

    assert_eq!(cpu.read(0x0010), 0x80);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
}

#[test]
fn test_inc_wraps_without_carry() {
    let mut cpu = setup_cpu();
    cpu.write(0x1234, 0xFF);
    cpu.memory_mut().load(0x8000, &[0xEE, 0x34, 0x12]);

    assert_eq!(cpu.step(), Ok(6));

    assert_eq!(cpu.read(0x1234), 0x00);
    assert!(cpu.flag_z());
    assert!(!cpu.flag_c(), "INC never touches carry");
}

#[test]
fn test_inc_absolute_x_fixed_cost() {
    let mut cpu = setup_cpu();
    cpu.set_x(0x10);
    cpu.memory_mut().load(0x8000, &[0xFE, 0xF8, 0x12]);

    assert_eq!(cpu.step(), Ok(7));
    assert_eq!(cpu.read(0x1308), 0x01);
}

#[test]
fn test_dec_zero_page_x() {
    let mut cpu = setup_cpu();
    cpu.set_x(0x05);
    cpu.write(0x0004, 0x00);
    cpu.memory_mut().load(0x8000, &[0xD6, 0xFF]);

    assert_eq!(cpu.step(), Ok(6));

    assert_eq!(cpu.read(0x0004), 0xFF);
    assert!(cpu.flag_n());
}

#[test]
fn test_dec_to_zero() {
    let mut cpu = setup_cpu();
    cpu.write(0x0020, 0x01);
    cpu.memory_mut().load(0x8000, &[0xC6, 0x20]);

    cpu.step().unwrap();

    assert_eq!(cpu.read(0x0020), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn test_inx_iny_wrap() {
    let mut cpu = setup_cpu();
    cpu.set_x(0xFF);
    cpu.set_y(0x7F);
    cpu.memory_mut().load(0x8000, &[0xE8, 0xC8]);

    assert_eq!(cpu.step(), Ok(2));
    assert_eq!(cpu.x(), 0x00);
    assert!(cpu.flag_z());

    assert_eq!(cpu.step(), Ok(2));
    assert_eq!(cpu.y(), 0x80);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
}

#[test]
fn test_dex_dey_wrap() {
    let mut cpu = setup_cpu();
    cpu.set_x(0x00);
    cpu.set_y(0x01);
    cpu.memory_mut().load(0x8000, &[0xCA, 0x88]);

    cpu.step().unwrap();
    assert_eq!(cpu.x(), 0xFF);
    assert!(cpu.flag_n());

    cpu.step().unwrap();
    assert_eq!(cpu.y(), 0x00);
    assert!(cpu.flag_z());
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn test_countdown_loop() {
    let mut cpu = setup_cpu();
    // LDX #$03; loop: DEX; BNE loop
    cpu.memory_mut()
        .load(0x8000, &[0xA2, 0x03, 0xCA, 0xD0, 0xFD]);

    cpu.step().unwrap();
    for _ in 0..3 {
        cpu.step().unwrap();
        cpu.step().unwrap();
    }

    assert_eq!(cpu.x(), 0x00);
    assert_eq!(cpu.pc(), 0x8005);
    // LDX 2 + 3 * DEX 2 + BNE taken 3 + taken 3 + not taken 2
    assert_eq!(cpu.cycles(), 2 + 6 + 3 + 3 + 2);
}
