#![doc = r#"
nescore library crate.

Emulation core of an NES-class console: a 6502 CPU, the CPU address bus
and the register-level behaviour of the picture processing unit.

Modules:
- bus: flat CPU address space, RAM and PPU-register mirroring, cartridge mapping
- cartridge: iNES v1 image parsing and board identification
- config: video region and frame timing thresholds
- cpu: 6502 CPU core (facade + state + catalog + dispatch families)
- error: error types shared across the crate
- nes: `Nes` aggregate with the driver entry points
- ppu: PPU register latches, vblank timer and frame buffer

In tests, shared iNES builders are available under `crate::test_utils`.
"#]

pub mod bus;
pub mod cartridge;
pub mod config;
pub mod cpu;
pub mod error;
pub mod nes;
pub mod ppu;

pub use bus::Bus;
pub use cartridge::Cartridge;
pub use config::{EmulatorConfig, Region};
pub use cpu::core::Cpu;
pub use error::{CartridgeError, EmuError};
pub use nes::{ExecutionSummary, FrameReport, Nes};
pub use ppu::Ppu;

// Shared test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;
