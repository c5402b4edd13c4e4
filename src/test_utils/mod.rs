//! Shared test utilities for building minimal iNES (v1) images and booting a
//! CPU/Bus pair on them.
//!
//! Notes on iNES header fields used here:
//! - bytes[0..4] = b"NES\x1A"
//! - byte 4 = PRG ROM size in 16 KiB units
//! - byte 5 = CHR ROM size in 8 KiB units
//! - byte 6 = Flags 6 (mirroring, battery, trainer, mapper low nibble)
//! - byte 7 = Flags 7 (mapper high nibble)
//! - bytes 8..15 = padding
//!
//! Vectors for a single 16 KiB bank live at PRG offset 0x3FFA..=0x3FFF and
//! end up at $FFFA..=$FFFF once the bus mirrors the bank into $C000.

#![allow(dead_code)]

use crate::bus::Bus;
use crate::cartridge::{Cartridge, HEADER_LEN, PRG_BANK_SIZE};
use crate::cpu::Cpu;

/// Build a minimal iNES (v1) image. PRG is filled with 0xEA (NOP) and CHR
/// with 0xCC.
pub fn build_ines(
    prg_16k: usize,
    chr_8k: usize,
    flags6: u8,
    flags7: u8,
    trainer: Option<&[u8; 512]>,
) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(
        HEADER_LEN + trainer.map_or(0, |_| 512) + prg_16k * PRG_BANK_SIZE + chr_8k * 8 * 1024,
    );

    bytes.extend_from_slice(b"NES\x1A");
    bytes.push(prg_16k as u8);
    bytes.push(chr_8k as u8);
    bytes.push(flags6);
    bytes.push(flags7);
    bytes.extend_from_slice(&[0u8; 8]);

    if let Some(t) = trainer {
        bytes.extend_from_slice(t);
    }

    bytes.resize(bytes.len() + prg_16k * PRG_BANK_SIZE, 0xEA);
    bytes.resize(bytes.len() + chr_8k * 8 * 1024, 0xCC);
    bytes
}

/// Build an NROM image carrying `prg` at the start of a single 16 KiB bank,
/// with (reset, nmi, irq) vectors defaulting to $8000.
pub fn build_nrom_with_prg(prg: &[u8], vectors: Option<(u16, u16, u16)>) -> Vec<u8> {
    assert!(
        prg.len() <= PRG_BANK_SIZE,
        "Program must fit within a 16 KiB PRG bank"
    );

    let mut rom = build_ines(1, 1, 0, 0, None);
    let prg_start = HEADER_LEN;
    rom[prg_start..prg_start + prg.len()].copy_from_slice(prg);

    let (reset, nmi, irq) = vectors.unwrap_or((0x8000, 0x8000, 0x8000));
    set_vectors_in_prg(&mut rom[prg_start..prg_start + PRG_BANK_SIZE], reset, nmi, irq);
    rom
}

/// Write NMI/RESET/IRQ vectors into the last six bytes of a PRG slice.
pub fn set_vectors_in_prg(prg: &mut [u8], reset: u16, nmi: u16, irq: u16) {
    let base = prg.len() - 6;
    prg[base..base + 2].copy_from_slice(&nmi.to_le_bytes());
    prg[base + 2..base + 4].copy_from_slice(&reset.to_le_bytes());
    prg[base + 4..base + 6].copy_from_slice(&irq.to_le_bytes());
}

/// Power on a CPU and a bus with `prg` loaded at $8000 (mirrored at $C000).
pub fn boot(prg: &[u8]) -> (Cpu, Bus) {
    let rom = build_nrom_with_prg(prg, None);
    let cart = Cartridge::from_ines_bytes(&rom).expect("parse");
    let mut bus = Bus::new();
    bus.load_cartridge(&cart);
    (Cpu::new(), bus)
}

/// Power on a CPU with PC at `origin` and `program` written into RAM there.
pub fn boot_in_ram(origin: u16, program: &[u8]) -> (Cpu, Bus) {
    let mut bus = Bus::new();
    for (i, b) in program.iter().enumerate() {
        bus.write(origin + i as u16, *b).expect("ram write");
    }
    let mut cpu = Cpu::new();
    cpu.set_pc(origin);
    (cpu, bus)
}
