/*!
rmw.rs - shifts, rotates and memory INC/DEC

Each instruction goes through `execute::modify`, which handles the
accumulator form as well as the memory forms and writes Z/N from the result.
Shifts and rotates additionally move a bit through Carry.
*/

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{base_cycles, modify};
use crate::cpu::state::{CARRY, CpuState};
use crate::error::EmuError;

pub(crate) fn asl(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    modify(cpu, bus, op, |cpu, v| {
        cpu.assign_flag(CARRY, v & 0x80 != 0);
        v << 1
    })?;
    Ok(base_cycles(op))
}

pub(crate) fn lsr(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    modify(cpu, bus, op, |cpu, v| {
        cpu.assign_flag(CARRY, v & 0x01 != 0);
        v >> 1
    })?;
    Ok(base_cycles(op))
}

pub(crate) fn rol(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    modify(cpu, bus, op, |cpu, v| {
        let carry_in = cpu.is_flag_set(CARRY) as u8;
        cpu.assign_flag(CARRY, v & 0x80 != 0);
        (v << 1) | carry_in
    })?;
    Ok(base_cycles(op))
}

pub(crate) fn ror(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    modify(cpu, bus, op, |cpu, v| {
        let carry_in = if cpu.is_flag_set(CARRY) { 0x80 } else { 0 };
        cpu.assign_flag(CARRY, v & 0x01 != 0);
        (v >> 1) | carry_in
    })?;
    Ok(base_cycles(op))
}

pub(crate) fn inc(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    modify(cpu, bus, op, |_, v| v.wrapping_add(1))?;
    Ok(base_cycles(op))
}

pub(crate) fn dec(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    modify(cpu, bus, op, |_, v| v.wrapping_sub(1))?;
    Ok(base_cycles(op))
}
