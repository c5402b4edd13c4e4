/*!
PPU register and timing model providing:
- CPU-visible register interface ($2000..$2007) with the scroll and VRAM
  address write latches
- 16 KiB internal RAM written through the data port
- A frame timer driven by CPU cycles: frame boundary, vblank set, vblank
  expiry
- An approximate background render into an RGBA frame buffer at every
  frame boundary

NOTES / LIMITATIONS:
- No per-dot timing, no sprites, no scrolling. The render is a single pass
  over the base nametable.
- No NMI generation; software polls the status register.

STRUCTURE:
- `registers.rs`: port reads/writes and side-effect free inspection.
- `timing.rs`: `FrameTiming` and `Ppu::advance`.
- `frame.rs`: `Frame` buffer, master palette and the background pass.
*/

pub mod frame;
pub(crate) mod registers;
pub mod timing;

pub use frame::{BYTES_PER_PIXEL, Frame, NES_HEIGHT, NES_WIDTH};
pub use timing::FrameTiming;

/// Internal PPU RAM size.
pub const PPU_RAM_SIZE: usize = 0x4000;

/// Power-on status: vblank set.
const STATUS_POWER_ON: u8 = 0x80;

// Control bits
pub const CTRL_NAMETABLE_MASK: u8 = 0b0000_0011;
pub const CTRL_INCREMENT_32: u8 = 0b0000_0100;
pub const CTRL_BG_PATTERN_HIGH: u8 = 0b0001_0000;

// Mask bits
pub const MASK_SHOW_BACKGROUND: u8 = 0b0000_1000;

// Status bits
pub const STATUS_VBLANK: u8 = 0b1000_0000;

pub struct Ppu {
    // CPU-visible registers
    control: u8,
    mask: u8,
    status: u8,
    oam_address: u8,
    oam_data: u8,

    // Two-write latches; `true` means the next write is the first half.
    scroll_latch_clean: bool,
    address_latch_clean: bool,
    scroll_x: u8,
    scroll_y: u8,
    vram_address: u16,
    read_buffer: u8,

    ram: Box<[u8]>,
    oam: [u8; 256],

    // Frame timer
    timing: FrameTiming,
    cycle: u32,
    frame: u64,
    vblank_elapsed: Option<u32>,
    frame_complete: bool,

    frame_buffer: Frame,
}

impl std::fmt::Debug for Ppu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ppu")
            .field("control", &self.control)
            .field("mask", &self.mask)
            .field("status", &self.status)
            .field("oam_address", &self.oam_address)
            .field("vram_address", &self.vram_address)
            .field("cycle", &self.cycle)
            .field("frame", &self.frame)
            .finish_non_exhaustive()
    }
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new(FrameTiming::default())
    }
}

impl Ppu {
    pub fn new(timing: FrameTiming) -> Self {
        Self {
            control: 0,
            mask: 0,
            status: STATUS_POWER_ON,
            oam_address: 0,
            oam_data: 0,
            scroll_latch_clean: true,
            address_latch_clean: true,
            scroll_x: 0,
            scroll_y: 0,
            vram_address: 0,
            read_buffer: 0,
            ram: vec![0u8; PPU_RAM_SIZE].into_boxed_slice(),
            oam: [0; 256],
            timing,
            cycle: 0,
            frame: 0,
            // Power-on vblank expires like any other.
            vblank_elapsed: Some(0),
            frame_complete: false,
            frame_buffer: Frame::new(),
        }
    }

    /// Return to the power-on state, keeping the configured timing.
    pub fn reset(&mut self) {
        *self = Self::new(self.timing);
    }

    // ---------------------------------------------------------------------
    // Register views
    // ---------------------------------------------------------------------
    pub fn control(&self) -> u8 {
        self.control
    }
    pub fn mask(&self) -> u8 {
        self.mask
    }
    pub fn status(&self) -> u8 {
        self.status
    }
    pub fn oam_address(&self) -> u8 {
        self.oam_address
    }
    pub fn oam_data(&self) -> u8 {
        self.oam_data
    }
    pub fn scroll(&self) -> (u8, u8) {
        (self.scroll_x, self.scroll_y)
    }
    pub fn vram_address(&self) -> u16 {
        self.vram_address
    }
    pub fn scroll_latch_clean(&self) -> bool {
        self.scroll_latch_clean
    }
    pub fn address_latch_clean(&self) -> bool {
        self.address_latch_clean
    }

    /// Byte of internal RAM (address reduced to 14 bits).
    pub fn ram_byte(&self, addr: u16) -> u8 {
        self.ram[ram_index(addr)]
    }

    pub fn oam(&self) -> &[u8; 256] {
        &self.oam
    }

    // ---------------------------------------------------------------------
    // Control decoding
    // ---------------------------------------------------------------------

    /// Data-port address step selected by control bit 2.
    #[inline]
    pub fn vram_increment(&self) -> u16 {
        if self.control & CTRL_INCREMENT_32 != 0 {
            32
        } else {
            1
        }
    }

    /// Base nametable selected by control bits 0-1.
    #[inline]
    pub fn base_nametable_address(&self) -> u16 {
        0x2000 + 0x0400 * (self.control & CTRL_NAMETABLE_MASK) as u16
    }

    /// Pattern table used for background tiles (control bit 4).
    #[inline]
    pub fn background_pattern_address(&self) -> u16 {
        if self.control & CTRL_BG_PATTERN_HIGH != 0 {
            0x1000
        } else {
            0x0000
        }
    }

    // ---------------------------------------------------------------------
    // Status
    // ---------------------------------------------------------------------
    #[inline]
    pub fn vblank(&self) -> bool {
        self.status & STATUS_VBLANK != 0
    }

    #[inline]
    pub fn set_vblank(&mut self, on: bool) {
        if on {
            self.status |= STATUS_VBLANK;
        } else {
            self.status &= !STATUS_VBLANK;
        }
    }

    // ---------------------------------------------------------------------
    // Frame output
    // ---------------------------------------------------------------------
    pub fn frame_buffer(&self) -> &Frame {
        &self.frame_buffer
    }

    /// Returns true once per completed frame.
    pub fn take_frame_complete(&mut self) -> bool {
        std::mem::take(&mut self.frame_complete)
    }
}

#[inline]
fn ram_index(addr: u16) -> usize {
    addr as usize % PPU_RAM_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_on_state() {
        let p = Ppu::default();
        assert_eq!(p.status(), 0x80);
        assert_eq!(p.control(), 0);
        assert!(p.scroll_latch_clean());
        assert!(p.address_latch_clean());
        assert_eq!(p.frame_count(), 0);
    }

    #[test]
    fn base_nametable_follows_control_low_bits() {
        let mut p = Ppu::default();
        for (bits, expected) in [(0u8, 0x2000u16), (1, 0x2400), (2, 0x2800), (3, 0x2C00)] {
            p.control = 0b1111_1100 | bits;
            assert_eq!(p.base_nametable_address(), expected);
        }
    }

    #[test]
    fn increment_follows_control_bit_2() {
        let mut p = Ppu::default();
        assert_eq!(p.vram_increment(), 1);
        p.control = CTRL_INCREMENT_32;
        assert_eq!(p.vram_increment(), 32);
    }

    #[test]
    fn reset_keeps_timing() {
        let timing = FrameTiming::from(crate::config::Region::Pal);
        let mut p = Ppu::new(timing);
        p.mask = 0xFF;
        p.reset();
        assert_eq!(p.mask(), 0);
        assert_eq!(p.timing(), timing);
    }
}
