#![doc = r#"
PPU register window decoding

Purpose
- Name the eight CPU-visible PPU ports and reduce any address in the
  0x2000-0x3FFF window to one of them.
- Keep the OAM DMA port address next to them; the bus treats a write there
  as a placeholder.

Notes
- Mirroring: addresses 0x2008..=0x3FFF mirror 0x2000..=0x2007.
"#]

/// First address of the PPU register window.
pub const PPU_WINDOW_START: u16 = 0x2000;
/// Last address of the PPU register window.
pub const PPU_WINDOW_END: u16 = 0x3FFF;
/// OAM DMA trigger port.
pub const OAM_DMA: u16 = 0x4014;

/// One of the eight CPU-visible PPU ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PpuRegister {
    Control,
    Mask,
    Status,
    OamAddress,
    OamData,
    Scroll,
    Address,
    Data,
}

impl PpuRegister {
    /// Decode a CPU address inside the window (mirrors included).
    #[inline]
    pub fn from_cpu_address(addr: u16) -> Self {
        match mirror_ppu_reg(addr) {
            0x2000 => PpuRegister::Control,
            0x2001 => PpuRegister::Mask,
            0x2002 => PpuRegister::Status,
            0x2003 => PpuRegister::OamAddress,
            0x2004 => PpuRegister::OamData,
            0x2005 => PpuRegister::Scroll,
            0x2006 => PpuRegister::Address,
            _ => PpuRegister::Data,
        }
    }

    /// Canonical CPU address of this port.
    #[inline]
    pub fn address(self) -> u16 {
        PPU_WINDOW_START + self as u16
    }
}

/// True if `addr` lies in the PPU register window.
#[inline]
pub fn is_ppu_register(addr: u16) -> bool {
    (PPU_WINDOW_START..=PPU_WINDOW_END).contains(&addr)
}

/// Reduce an address to its canonical port in 0x2000..=0x2007.
#[inline]
pub fn mirror_ppu_reg(addr: u16) -> u16 {
    PPU_WINDOW_START + (addr % 8)
}
