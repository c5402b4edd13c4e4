use std::env;
use std::process::ExitCode;

use nescore::cartridge::BoardModel;
use nescore::{Cartridge, EmulatorConfig, Nes};

const DEMO_FRAMES: usize = 3;

/// A 16 KiB NROM program that sets up a palette, writes a row of tiles and
/// then counts in a loop forever.
fn build_demo_cartridge() -> Cartridge {
    let program: &[u8] = &[
        0xA9, 0x3F, // LDA #$3F
        0x8D, 0x06, 0x20, // STA $2006
        0xA9, 0x00, // LDA #$00
        0x8D, 0x06, 0x20, // STA $2006
        0xA9, 0x0F, // LDA #$0F   backdrop
        0x8D, 0x07, 0x20, // STA $2007
        0xA9, 0x21, // LDA #$21   colour 1
        0x8D, 0x07, 0x20, // STA $2007
        0xA9, 0x08, // LDA #$08   show background
        0x8D, 0x01, 0x20, // STA $2001
        0xA9, 0x10, // LDA #$10
        0x69, 0x05, // ADC #$05
        0x8D, 0x00, 0x02, // STA $0200
        0xE8, // INX
        0x8E, 0x01, 0x02, // STX $0201
        0x4C, 0x20, 0x80, // JMP $8020 (the INX)
    ];

    let mut prg = vec![0xEAu8; 16 * 1024];
    prg[..program.len()].copy_from_slice(program);
    // NMI, RESET, IRQ/BRK
    let top = prg.len();
    prg[top - 6..top - 4].copy_from_slice(&0x8000u16.to_le_bytes());
    prg[top - 4..top - 2].copy_from_slice(&0x8000u16.to_le_bytes());
    prg[top - 2..].copy_from_slice(&0x8000u16.to_le_bytes());

    Cartridge::from_parts(prg, vec![0u8; 8 * 1024], BoardModel::Nrom)
}

#[cfg(feature = "screenshot")]
fn save_screenshot(nes: &Nes) {
    match nes.frame().save_png("frame.png") {
        Ok(()) => println!("wrote frame.png"),
        Err(e) => eprintln!("failed to write frame.png: {e}"),
    }
}

#[cfg(not(feature = "screenshot"))]
fn save_screenshot(_: &Nes) {}

fn main() -> ExitCode {
    let cart = match env::args().nth(1) {
        Some(path) => match Cartridge::from_file(&path) {
            Ok(cart) => cart,
            Err(e) => {
                eprintln!("failed to load {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => build_demo_cartridge(),
    };

    let mut nes = Nes::new(EmulatorConfig::default());
    if let Err(e) = nes.insert_and_reset(&cart) {
        eprintln!("reset failed: {e}");
        return ExitCode::FAILURE;
    }

    for _ in 0..DEMO_FRAMES {
        match nes.run_frame() {
            Ok(report) if report.completed => {}
            Ok(report) => {
                println!(
                    "frame not completed after {} instructions",
                    report.instructions
                );
                break;
            }
            Err(e) => {
                println!("halted: {e}");
                break;
            }
        }
    }

    let cpu = nes.cpu();
    println!("A: 0x{:02X}", cpu.a());
    println!("X: 0x{:02X}", cpu.x());
    println!("Y: 0x{:02X}", cpu.y());
    println!("SP: 0x{:02X}", cpu.sp());
    println!("PC: 0x{:04X}", cpu.pc());
    println!("P (flags): 0b{:08b}", cpu.status());
    println!("mem[0x0200]: 0x{:02X}", nes.bus().peek(0x0200));
    println!("frames: {}", nes.ppu().frame_count());
    println!("cycles: {}", cpu.cycles());

    save_screenshot(&nes);

    ExitCode::SUCCESS
}
