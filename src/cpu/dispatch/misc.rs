/*!
misc.rs - transfers, stack, flag set/clear, register INC/DEC and NOP

Stack conventions
=================
PHP pushes P with Break and the unused bit forced on. PLP (and RTI) force
the unused bit on and Break off in the restored value.
*/

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::base_cycles;
use crate::cpu::state::{
    BREAK, CARRY, CpuState, DECIMAL, IRQ_DISABLE, OVERFLOW, UNUSED,
};
use crate::error::EmuError;

// ---------------------------------------------------------------------------
// Transfers
// ---------------------------------------------------------------------------

pub(crate) fn tax(cpu: &mut CpuState, _: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    cpu.x = cpu.a;
    cpu.update_zn(cpu.x);
    Ok(base_cycles(op))
}

pub(crate) fn tay(cpu: &mut CpuState, _: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    cpu.y = cpu.a;
    cpu.update_zn(cpu.y);
    Ok(base_cycles(op))
}

pub(crate) fn txa(cpu: &mut CpuState, _: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    cpu.a = cpu.x;
    cpu.update_zn(cpu.a);
    Ok(base_cycles(op))
}

pub(crate) fn tya(cpu: &mut CpuState, _: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    cpu.a = cpu.y;
    cpu.update_zn(cpu.a);
    Ok(base_cycles(op))
}

pub(crate) fn tsx(cpu: &mut CpuState, _: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    cpu.x = cpu.sp;
    cpu.update_zn(cpu.x);
    Ok(base_cycles(op))
}

/// No flags.
pub(crate) fn txs(cpu: &mut CpuState, _: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    cpu.sp = cpu.x;
    Ok(base_cycles(op))
}

// ---------------------------------------------------------------------------
// Stack
// ---------------------------------------------------------------------------

pub(crate) fn pha(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    let a = cpu.a;
    cpu.push(bus, a)?;
    Ok(base_cycles(op))
}

pub(crate) fn php(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    let p = cpu.status | BREAK | UNUSED;
    cpu.push(bus, p)?;
    Ok(base_cycles(op))
}

pub(crate) fn pla(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    cpu.a = cpu.pull(bus)?;
    cpu.update_zn(cpu.a);
    Ok(base_cycles(op))
}

pub(crate) fn plp(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    let p = cpu.pull(bus)?;
    cpu.status = (p | UNUSED) & !BREAK;
    Ok(base_cycles(op))
}

// ---------------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------------

fn set_flag(cpu: &mut CpuState, op: &Operand, mask: u8, on: bool) -> Result<u32, EmuError> {
    cpu.assign_flag(mask, on);
    Ok(base_cycles(op))
}

pub(crate) fn clc(cpu: &mut CpuState, _: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    set_flag(cpu, op, CARRY, false)
}

pub(crate) fn sec(cpu: &mut CpuState, _: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    set_flag(cpu, op, CARRY, true)
}

pub(crate) fn cli(cpu: &mut CpuState, _: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    set_flag(cpu, op, IRQ_DISABLE, false)
}

pub(crate) fn sei(cpu: &mut CpuState, _: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    set_flag(cpu, op, IRQ_DISABLE, true)
}

pub(crate) fn cld(cpu: &mut CpuState, _: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    set_flag(cpu, op, DECIMAL, false)
}

pub(crate) fn sed(cpu: &mut CpuState, _: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    set_flag(cpu, op, DECIMAL, true)
}

pub(crate) fn clv(cpu: &mut CpuState, _: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    set_flag(cpu, op, OVERFLOW, false)
}

// ---------------------------------------------------------------------------
// Register increment / decrement
// ---------------------------------------------------------------------------

pub(crate) fn inx(cpu: &mut CpuState, _: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.update_zn(cpu.x);
    Ok(base_cycles(op))
}

pub(crate) fn iny(cpu: &mut CpuState, _: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.update_zn(cpu.y);
    Ok(base_cycles(op))
}

pub(crate) fn dex(cpu: &mut CpuState, _: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.update_zn(cpu.x);
    Ok(base_cycles(op))
}

pub(crate) fn dey(cpu: &mut CpuState, _: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.update_zn(cpu.y);
    Ok(base_cycles(op))
}

pub(crate) fn nop(_: &mut CpuState, _: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    Ok(base_cycles(op))
}
