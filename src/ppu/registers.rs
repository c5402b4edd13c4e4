#![doc = r#"
PPU registers module

Purpose
- CPU-visible port semantics: which ports can be read, which can be written,
  and the side effects of each.

Notes
- Readable ports: Status, OAM data, Data. Writable ports: everything except
  Status. Any other direction is an `UnsupportedRegisterAccess`.
- Status read returns the byte and then clears vblank. A control write reads
  status first, so it acknowledges vblank too.
- Scroll and Address share the two-write pattern but keep separate latches.
"#]

use log::{trace, warn};

use super::{Ppu, ram_index};
use crate::bus::PpuRegister;
use crate::error::{EmuError, RegisterAccess};

impl Ppu {
    /// Port read with side effects.
    pub fn read_register(&mut self, reg: PpuRegister) -> Result<u8, EmuError> {
        let value = match reg {
            PpuRegister::Status => self.read_status(),
            PpuRegister::OamData => self.oam_data,
            PpuRegister::Data => self.read_data(),
            _ => return Err(unsupported(reg, RegisterAccess::Read)),
        };
        trace!("PPU read ${:04X} -> {:#010b}", reg.address(), value);
        Ok(value)
    }

    /// Port write with side effects.
    pub fn write_register(&mut self, reg: PpuRegister, value: u8) -> Result<(), EmuError> {
        trace!("PPU write ${:04X} <- {:#010b}", reg.address(), value);
        match reg {
            PpuRegister::Control => {
                self.read_status();
                self.control = value;
            }
            PpuRegister::Mask => self.mask = value,
            PpuRegister::Status => return Err(unsupported(reg, RegisterAccess::Write)),
            PpuRegister::OamAddress => self.oam_address = value,
            PpuRegister::OamData => {
                self.oam[self.oam_address as usize] = value;
                self.oam_data = value;
                self.oam_address = self.oam_address.wrapping_add(1);
            }
            PpuRegister::Scroll => {
                if self.scroll_latch_clean {
                    self.scroll_x = value;
                } else {
                    self.scroll_y = value;
                }
                self.scroll_latch_clean = !self.scroll_latch_clean;
            }
            PpuRegister::Address => {
                if self.address_latch_clean {
                    self.vram_address = (value as u16) << 8;
                } else {
                    self.vram_address = self.vram_address.wrapping_add(value as u16);
                }
                self.address_latch_clean = !self.address_latch_clean;
            }
            PpuRegister::Data => {
                self.ram[ram_index(self.vram_address)] = value;
                self.vram_address = self.vram_address.wrapping_add(self.vram_increment());
            }
        }
        Ok(())
    }

    /// Register value without side effects. Only ports that hold a plain
    /// byte can be inspected.
    pub fn inspect(&self, reg: PpuRegister) -> Result<u8, EmuError> {
        match reg {
            PpuRegister::Control => Ok(self.control),
            PpuRegister::Mask => Ok(self.mask),
            PpuRegister::Status => Ok(self.status),
            PpuRegister::OamAddress => Ok(self.oam_address),
            PpuRegister::OamData => Ok(self.oam_data),
            _ => Err(EmuError::UnsupportedRegisterAccess {
                addr: reg.address(),
                access: RegisterAccess::Read,
            }),
        }
    }

    fn read_status(&mut self) -> u8 {
        let v = self.status;
        self.set_vblank(false);
        v
    }

    // Below $3F00 the port returns the previous buffer and refills it;
    // palette reads come straight through.
    fn read_data(&mut self) -> u8 {
        let addr = self.vram_address;
        let value = self.ram[ram_index(addr)];
        let out = if ram_index(addr) < 0x3F00 {
            std::mem::replace(&mut self.read_buffer, value)
        } else {
            value
        };
        self.vram_address = addr.wrapping_add(self.vram_increment());
        out
    }
}

fn unsupported(reg: PpuRegister, access: RegisterAccess) -> EmuError {
    warn!("unsupported {} of PPU port ${:04X}", access, reg.address());
    EmuError::UnsupportedRegisterAccess {
        addr: reg.address(),
        access,
    }
}
