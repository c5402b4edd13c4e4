/*!
addressing.rs - 6502 addressing modes and operand resolution

Overview
========
- `AddressingMode` and its fixed operand length, shared by the catalog, the
  engine and the disassembler.
- `Operand`: the already-fetched operand bytes of one instruction plus the
  address it was fetched from.
- Effective address resolution for every mode.

Index arithmetic
================
Indexed modes add the index register to the 16-bit base with plain 16-bit
wrap-around. Nothing here wraps within the zero page; whatever the sum
decodes to is up to the bus. The one hardware quirk kept is JMP (indirect)
failing to carry into the high byte of the vector address.
*/

use crate::bus::Bus;
use crate::cpu::state::CpuState;
use crate::error::EmuError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
    Relative,
}

impl AddressingMode {
    /// Operand bytes following the opcode.
    #[inline]
    pub const fn operand_len(self) -> usize {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY
            | AddressingMode::Relative => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }

    /// Total instruction length including the opcode byte.
    #[inline]
    pub const fn instruction_len(self) -> u16 {
        1 + self.operand_len() as u16
    }
}

/// Operand bytes of one decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operand {
    /// Address of the opcode byte.
    pub pc: u16,
    pub mode: AddressingMode,
    /// Base cycle cost from the catalog.
    pub cycles: u8,
    /// Operand bytes in instruction order; unused slots are zero.
    pub bytes: [u8; 2],
}

impl Operand {
    #[inline]
    pub fn byte(&self) -> u8 {
        self.bytes[0]
    }

    #[inline]
    pub fn word(&self) -> u16 {
        u16::from_le_bytes(self.bytes)
    }

    /// Operand bytes actually present for this mode.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.mode.operand_len()]
    }

    /// Address of the instruction that follows this one.
    #[inline]
    pub fn next_pc(&self) -> u16 {
        self.pc.wrapping_add(self.mode.instruction_len())
    }
}

/// Effective address of a memory operand.
///
/// Immediate and Relative resolve to the operand byte itself; Implied and
/// Accumulator have no memory operand and resolve to the opcode address.
pub(crate) fn effective_address(
    cpu: &CpuState,
    bus: &mut Bus,
    op: &Operand,
) -> Result<u16, EmuError> {
    let addr = match op.mode {
        AddressingMode::Implied | AddressingMode::Accumulator => op.pc,
        AddressingMode::Immediate | AddressingMode::Relative => op.pc.wrapping_add(1),
        AddressingMode::ZeroPage => op.byte() as u16,
        AddressingMode::ZeroPageX => (op.byte() as u16).wrapping_add(cpu.x as u16),
        AddressingMode::ZeroPageY => (op.byte() as u16).wrapping_add(cpu.y as u16),
        AddressingMode::Absolute => op.word(),
        AddressingMode::AbsoluteX => op.word().wrapping_add(cpu.x as u16),
        AddressingMode::AbsoluteY => op.word().wrapping_add(cpu.y as u16),
        AddressingMode::Indirect => read_word_indirect_bug(bus, op.word())?,
        AddressingMode::IndirectX => {
            let ptr = (op.byte() as u16).wrapping_add(cpu.x as u16);
            bus.read_word(ptr)?
        }
        AddressingMode::IndirectY => {
            let base = bus.read_word(op.byte() as u16)?;
            base.wrapping_add(cpu.y as u16)
        }
    };
    Ok(addr)
}

/// Value of a read operand: the immediate byte, the accumulator, or the
/// byte at the effective address.
pub(crate) fn read_operand(cpu: &CpuState, bus: &mut Bus, op: &Operand) -> Result<u8, EmuError> {
    match op.mode {
        AddressingMode::Immediate => Ok(op.byte()),
        AddressingMode::Accumulator => Ok(cpu.a),
        _ => {
            let addr = effective_address(cpu, bus, op)?;
            bus.read(addr)
        }
    }
}

/// JMP (indirect): when the vector sits at $xxFF the high byte is fetched
/// from $xx00 rather than the next page.
#[inline]
pub(crate) fn read_word_indirect_bug(bus: &mut Bus, addr: u16) -> Result<u16, EmuError> {
    let lo = bus.read(addr)?;
    let hi_addr = (addr & 0xFF00) | (addr.wrapping_add(1) & 0x00FF);
    let hi = bus.read(hi_addr)?;
    Ok(u16::from_le_bytes([lo, hi]))
}
