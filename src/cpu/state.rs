/*!
state.rs - 6502 architectural state (registers + flags) and the stack
primitives that operate on it.

Overview
========
`CpuState` owns every architecturally visible register. It does not decode
or time anything; that lives in the dispatch and core modules.

Power-on state
==============
PC = $8000 (start of the cartridge window), S = $FF, P = $34
(IRQ disable, break, unused), A = X = Y = 0.

6502 Status Register Bit Layout
===============================
Bit: 7 6 5 4 3 2 1 0
     N V 1 B D I Z C
*/

use crate::bus::Bus;
use crate::bus::ram::STACK_BASE;
use crate::error::EmuError;

/// Processor status flag bit masks.
pub const CARRY: u8 = 0b0000_0001;
pub const ZERO: u8 = 0b0000_0010;
pub const IRQ_DISABLE: u8 = 0b0000_0100;
pub const DECIMAL: u8 = 0b0000_1000; // Stored, never acted on.
pub const BREAK: u8 = 0b0001_0000;
pub const UNUSED: u8 = 0b0010_0000;
pub const OVERFLOW: u8 = 0b0100_0000;
pub const NEGATIVE: u8 = 0b1000_0000;

pub const POWER_ON_PC: u16 = 0x8000;
pub const POWER_ON_SP: u8 = 0xFF;
pub const POWER_ON_STATUS: u8 = IRQ_DISABLE | BREAK | UNUSED;

/// Interrupt vectors (little-endian words at the top of the address space).
pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuState {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: u8,
}

impl Default for CpuState {
    fn default() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: POWER_ON_SP,
            pc: POWER_ON_PC,
            status: POWER_ON_STATUS,
        }
    }
}

impl CpuState {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------------
    // Flags
    // ---------------------------------------------------------------------

    #[inline]
    pub fn is_flag_set(&self, mask: u8) -> bool {
        self.status & mask != 0
    }

    #[inline]
    pub fn assign_flag(&mut self, mask: u8, on: bool) {
        if on {
            self.status |= mask;
        } else {
            self.status &= !mask;
        }
    }

    /// Zero = (v == 0), Negative = bit 7. Both are always written.
    #[inline]
    pub fn update_zn(&mut self, v: u8) {
        self.assign_flag(ZERO, v == 0);
        self.assign_flag(NEGATIVE, v & 0x80 != 0);
    }

    // ---------------------------------------------------------------------
    // Stack ($0100 + S)
    // ---------------------------------------------------------------------

    /// Write at the stack pointer, then decrement it.
    #[inline]
    pub fn push(&mut self, bus: &mut Bus, v: u8) -> Result<(), EmuError> {
        bus.write(STACK_BASE | self.sp as u16, v)?;
        self.sp = self.sp.wrapping_sub(1);
        Ok(())
    }

    /// Increment the stack pointer, then read there.
    #[inline]
    pub fn pull(&mut self, bus: &mut Bus) -> Result<u8, EmuError> {
        self.sp = self.sp.wrapping_add(1);
        bus.read(STACK_BASE | self.sp as u16)
    }

    /// Push high byte then low byte.
    pub fn push_word(&mut self, bus: &mut Bus, v: u16) -> Result<(), EmuError> {
        let [lo, hi] = v.to_le_bytes();
        self.push(bus, hi)?;
        self.push(bus, lo)
    }

    /// Pull low byte then high byte.
    pub fn pull_word(&mut self, bus: &mut Bus) -> Result<u16, EmuError> {
        let lo = self.pull(bus)?;
        let hi = self.pull(bus)?;
        Ok(u16::from_le_bytes([lo, hi]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_on_values() {
        let s = CpuState::new();
        assert_eq!(s.pc, 0x8000);
        assert_eq!(s.sp, 0xFF);
        assert_eq!(s.status, 0x34);
        assert_eq!((s.a, s.x, s.y), (0, 0, 0));
    }

    #[test]
    fn update_zn_sets_and_clears() {
        let mut s = CpuState::new();
        s.update_zn(0);
        assert!(s.is_flag_set(ZERO));
        assert!(!s.is_flag_set(NEGATIVE));
        s.update_zn(0x80);
        assert!(!s.is_flag_set(ZERO), "zero left over from previous result");
        assert!(s.is_flag_set(NEGATIVE));
        s.update_zn(0x01);
        assert!(!s.is_flag_set(ZERO));
        assert!(!s.is_flag_set(NEGATIVE));
    }

    #[test]
    fn push_pull_word_round_trip() {
        let mut bus = Bus::new();
        let mut s = CpuState::new();
        s.push_word(&mut bus, 0xBEEF).unwrap();
        assert_eq!(s.sp, 0xFD);
        assert_eq!(bus.peek(0x01FF), 0xBE);
        assert_eq!(bus.peek(0x01FE), 0xEF);
        assert_eq!(s.pull_word(&mut bus).unwrap(), 0xBEEF);
        assert_eq!(s.sp, 0xFF);
    }

    #[test]
    fn stack_pointer_wraps() {
        let mut bus = Bus::new();
        let mut s = CpuState::new();
        s.sp = 0x00;
        s.push(&mut bus, 0x42).unwrap();
        assert_eq!(s.sp, 0xFF);
        assert_eq!(bus.peek(0x0100), 0x42);
        assert_eq!(s.pull(&mut bus).unwrap(), 0x42);
        assert_eq!(s.sp, 0x00);
    }
}
