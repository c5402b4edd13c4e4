//! Loads and stores. Loads update Z/N; stores touch no flags.

use crate::bus::Bus;
use crate::cpu::addressing::{Operand, effective_address, read_operand};
use crate::cpu::execute::base_cycles;
use crate::cpu::state::CpuState;
use crate::error::EmuError;

pub(crate) fn lda(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    let v = read_operand(cpu, bus, op)?;
    cpu.a = v;
    cpu.update_zn(v);
    Ok(base_cycles(op))
}

pub(crate) fn ldx(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    let v = read_operand(cpu, bus, op)?;
    cpu.x = v;
    cpu.update_zn(v);
    Ok(base_cycles(op))
}

pub(crate) fn ldy(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    let v = read_operand(cpu, bus, op)?;
    cpu.y = v;
    cpu.update_zn(v);
    Ok(base_cycles(op))
}

fn store(cpu: &CpuState, bus: &mut Bus, op: &Operand, v: u8) -> Result<u32, EmuError> {
    let addr = effective_address(cpu, bus, op)?;
    bus.write(addr, v)?;
    Ok(base_cycles(op))
}

pub(crate) fn sta(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    store(cpu, bus, op, cpu.a)
}

pub(crate) fn stx(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    store(cpu, bus, op, cpu.x)
}

pub(crate) fn sty(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    store(cpu, bus, op, cpu.y)
}
