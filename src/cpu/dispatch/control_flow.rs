/*!
control_flow.rs - JMP / JSR / RTS / RTI / BRK

Return addresses
================
JSR pushes the address of the instruction that follows it and RTS resumes
exactly at the pulled address; the pair is self-consistent without the
6502's off-by-one adjustment.

BRK pushes the address of the BRK opcode itself, then the status byte with
Break set, and jumps through the IRQ/BRK vector. The interrupt-disable flag
is left as it was.
*/

use crate::bus::Bus;
use crate::cpu::addressing::{Operand, effective_address};
use crate::cpu::execute::base_cycles;
use crate::cpu::state::{BREAK, CpuState, IRQ_VECTOR, UNUSED};
use crate::error::EmuError;

/// Absolute or indirect; the indirect form keeps the page-wrap quirk.
pub(crate) fn jmp(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    cpu.pc = effective_address(cpu, bus, op)?;
    Ok(base_cycles(op))
}

pub(crate) fn jsr(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    cpu.push_word(bus, op.next_pc())?;
    cpu.pc = op.word();
    Ok(base_cycles(op))
}

pub(crate) fn rts(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    cpu.pc = cpu.pull_word(bus)?;
    Ok(base_cycles(op))
}

pub(crate) fn brk(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    cpu.status |= BREAK;
    cpu.push_word(bus, op.pc)?;
    let status = cpu.status;
    cpu.push(bus, status)?;
    cpu.pc = bus.read_word(IRQ_VECTOR)?;
    Ok(base_cycles(op))
}

pub(crate) fn rti(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    let status = cpu.pull(bus)?;
    cpu.status = (status | UNUSED) & !BREAK;
    cpu.pc = cpu.pull_word(bus)?;
    Ok(base_cycles(op))
}
