//! Shared instruction table tests
//!
//! One table, built up front, drives several independent CPUs, including
//! CPUs stepping on different threads.

use rvm8::{FlatMemory, InstructionTable, MemoryBus, CPU};
use std::sync::Arc;
use std::thread;

fn program(start_value: u8) -> FlatMemory {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    // LDA #start; loop: ADC #$01; JMP loop
    memory.load(0x8000, &[0xA9, start_value, 0x69, 0x01, 0x4C, 0x02, 0x80]);
    memory
}

#[test]
fn test_cpus_share_one_table_but_not_state() {
    let table = Arc::new(InstructionTable::standard());
    let mut first = CPU::with_table(program(0x10), Arc::clone(&table));
    let mut second = CPU::with_table(program(0x20), Arc::clone(&table));

    first.step().unwrap();
    first.step().unwrap();
    second.step().unwrap();

    assert_eq!(first.a(), 0x11);
    assert_eq!(second.a(), 0x20);
    assert_eq!(first.cycles(), 4);
    assert_eq!(second.cycles(), 2);
    assert_eq!(Arc::strong_count(&table), 3);
}

#[test]
fn test_table_is_readable_from_many_threads() {
    let table = Arc::new(InstructionTable::standard());

    let handles: Vec<_> = (0..4u8)
        .map(|i| {
            let table = Arc::clone(&table);
            thread::spawn(move || {
                let mut cpu = CPU::with_table(program(i * 0x10), table);
                cpu.run_for_cycles(1_000).unwrap();
                (i, cpu.a(), cpu.table().legal_count())
            })
        })
        .collect();

    for handle in handles {
        let (i, a, legal) = handle.join().unwrap();
        assert_eq!(legal, 151);
        // Every thread ran the same loop from a different seed
        assert_ne!(a, i * 0x10);
    }
}

#[test]
fn test_reference_table_matches_cpu_table() {
    let cpu = CPU::new(FlatMemory::new());
    assert_eq!(*cpu.table(), InstructionTable::standard());
}
