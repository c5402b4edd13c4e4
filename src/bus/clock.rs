//! Timing glue between the CPU and the PPU frame timer.
//!
//! The CPU reports how many cycles an instruction took; the bus forwards that
//! count to the PPU, which owns the frame and vblank counters.

use super::Bus;

impl Bus {
    /// Advance the PPU frame timer by `cpu_cycles`.
    ///
    /// Returns true if a frame boundary was crossed during this call.
    pub fn tick(&mut self, cpu_cycles: u32) -> bool {
        let before = self.ppu.frame_count();
        self.ppu.advance(cpu_cycles);
        self.ppu.frame_count() != before
    }
}
