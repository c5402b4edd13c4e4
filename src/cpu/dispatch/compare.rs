//! CMP / CPX / CPY for every addressing mode they support.

use crate::bus::Bus;
use crate::cpu::addressing::{Operand, read_operand};
use crate::cpu::execute::{base_cycles, compare};
use crate::cpu::state::CpuState;
use crate::error::EmuError;

pub(crate) fn cmp(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    let v = read_operand(cpu, bus, op)?;
    let reg = cpu.a;
    compare(cpu, reg, v);
    Ok(base_cycles(op))
}

pub(crate) fn cpx(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    let v = read_operand(cpu, bus, op)?;
    let reg = cpu.x;
    compare(cpu, reg, v);
    Ok(base_cycles(op))
}

pub(crate) fn cpy(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    let v = read_operand(cpu, bus, op)?;
    let reg = cpu.y;
    compare(cpu, reg, v);
    Ok(base_cycles(op))
}
