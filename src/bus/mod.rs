#![doc = r#"
Bus module: CPU-visible address space.

Overview
- `Bus` owns a flat 64 KiB memory array and the `Ppu`. The CPU never touches
  PPU state directly; every access goes through `Bus::read` / `Bus::write`.

Decoding order
1. $0000-$1FFF: internal RAM, reduced modulo 2 KiB into the flat array.
2. $2000-$3FFF: PPU register window, reduced modulo 8 and forwarded to the
   PPU's register entry points.
3. $4014: OAM DMA trigger. Writes are accepted and ignored.
4. Everything else indexes the flat array directly (cartridge PRG, unmapped).

Modules and responsibilities
- ram: RAM window bounds and mirroring.
- ppu_registers: PPU register window decode.
- clock: forwarding elapsed CPU cycles to the PPU frame timer.
"#]

use log::{debug, trace};

use crate::cartridge::{BoardModel, Cartridge, PRG_BANK_SIZE};
use crate::config::Region;
use crate::error::EmuError;
use crate::ppu::{FrameTiming, Ppu};

pub mod clock;
pub mod ppu_registers;
pub mod ram;

pub use ppu_registers::{OAM_DMA, PpuRegister};

/// Size of the flat CPU address space.
pub const MEMORY_SIZE: usize = 0x1_0000;
/// Where cartridge PRG ROM is copied.
pub const PRG_ROM_START: u16 = 0x8000;
/// Where a 16 KiB NROM image is mirrored.
pub const PRG_ROM_MIRROR_START: u16 = 0xC000;

pub struct Bus {
    memory: Box<[u8]>,
    pub ppu: Ppu,
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Bus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bus")
            .field("memory_len", &self.memory.len())
            .field("ppu", &self.ppu)
            .finish()
    }
}

impl Bus {
    /// Create a bus with zeroed memory and an NTSC-timed PPU.
    pub fn new() -> Self {
        Self::with_timing(FrameTiming::from(Region::Ntsc))
    }

    pub fn with_timing(timing: FrameTiming) -> Self {
        Self {
            memory: vec![0u8; MEMORY_SIZE].into_boxed_slice(),
            ppu: Ppu::new(timing),
        }
    }

    /// Zero all memory and return the PPU to its power-on state.
    pub fn reset(&mut self) {
        self.memory.fill(0);
        self.ppu.reset();
    }


    // ---------------------------------------------------------------------
    // CPU-visible access
    // ---------------------------------------------------------------------

    /// Read a byte as the CPU sees it. PPU register reads have side effects.
    pub fn read(&mut self, addr: u16) -> Result<u8, EmuError> {
        if ram::is_ram(addr) {
            return Ok(self.memory[ram::mirror_index(addr)]);
        }
        if ppu_registers::is_ppu_register(addr) {
            return self.ppu.read_register(PpuRegister::from_cpu_address(addr));
        }
        Ok(self.memory[addr as usize])
    }

    /// Write a byte as the CPU sees it.
    pub fn write(&mut self, addr: u16, value: u8) -> Result<(), EmuError> {
        if ram::is_ram(addr) {
            self.memory[ram::mirror_index(addr)] = value;
            return Ok(());
        }
        if ppu_registers::is_ppu_register(addr) {
            return self
                .ppu
                .write_register(PpuRegister::from_cpu_address(addr), value);
        }
        if addr == OAM_DMA {
            // TODO: copy page `value` into OAM and stall the CPU for 513/514 cycles.
            debug!("OAM DMA write of ${:02X} ignored", value);
            return Ok(());
        }
        self.memory[addr as usize] = value;
        Ok(())
    }

    /// Little-endian word at `addr`/`addr+1`.
    pub fn read_word(&mut self, addr: u16) -> Result<u16, EmuError> {
        let lo = self.read(addr)?;
        let hi = self.read(addr.wrapping_add(1))?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    /// Side-effect free view of a CPU address, for debuggers and tests.
    ///
    /// PPU ports that cannot be inspected read back as 0.
    pub fn peek(&self, addr: u16) -> u8 {
        if ram::is_ram(addr) {
            self.memory[ram::mirror_index(addr)]
        } else if ppu_registers::is_ppu_register(addr) {
            self.ppu
                .inspect(PpuRegister::from_cpu_address(addr))
                .unwrap_or(0)
        } else {
            self.memory[addr as usize]
        }
    }

    // ---------------------------------------------------------------------
    // Cartridge
    // ---------------------------------------------------------------------

    /// Copy PRG ROM to $8000. An NROM image of at most 16 KiB is mirrored
    /// again at $C000 so the vectors at $FFFA-$FFFF resolve.
    pub fn load_cartridge(&mut self, cart: &Cartridge) {
        let prg = cart.prg_rom();
        let start = PRG_ROM_START as usize;
        let len = prg.len().min(MEMORY_SIZE - start);
        self.memory[start..start + len].copy_from_slice(&prg[..len]);

        let mirrored = cart.board_model() == BoardModel::Nrom && prg.len() <= PRG_BANK_SIZE;
        if mirrored {
            let mirror = PRG_ROM_MIRROR_START as usize;
            self.memory[mirror..mirror + prg.len()].copy_from_slice(prg);
        }
        debug!(
            "loaded {} bytes of PRG ROM at ${:04X}{}",
            prg.len(),
            PRG_ROM_START,
            if mirrored { " (mirrored at $C000)" } else { "" }
        );
        trace!("board model {:?}", cart.board_model());
    }

    /// PRG ROM window as currently mapped ($8000-$FFFF).
    pub fn prg_rom_window(&self) -> &[u8] {
        &self.memory[PRG_ROM_START as usize..]
    }
}
