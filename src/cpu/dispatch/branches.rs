/*!
branches.rs - conditional relative branches

Base cost 2 cycles; a taken branch adds 1. The displacement is relative to
the instruction after the branch.
*/

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::branch;
use crate::cpu::state::{CARRY, CpuState, NEGATIVE, OVERFLOW, ZERO};
use crate::error::EmuError;

pub(crate) fn bpl(cpu: &mut CpuState, _: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    let taken = !cpu.is_flag_set(NEGATIVE);
    Ok(branch(cpu, op, taken))
}

pub(crate) fn bmi(cpu: &mut CpuState, _: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    let taken = cpu.is_flag_set(NEGATIVE);
    Ok(branch(cpu, op, taken))
}

pub(crate) fn bvc(cpu: &mut CpuState, _: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    let taken = !cpu.is_flag_set(OVERFLOW);
    Ok(branch(cpu, op, taken))
}

pub(crate) fn bvs(cpu: &mut CpuState, _: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    let taken = cpu.is_flag_set(OVERFLOW);
    Ok(branch(cpu, op, taken))
}

pub(crate) fn bcc(cpu: &mut CpuState, _: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    let taken = !cpu.is_flag_set(CARRY);
    Ok(branch(cpu, op, taken))
}

pub(crate) fn bcs(cpu: &mut CpuState, _: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    let taken = cpu.is_flag_set(CARRY);
    Ok(branch(cpu, op, taken))
}

pub(crate) fn bne(cpu: &mut CpuState, _: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    let taken = !cpu.is_flag_set(ZERO);
    Ok(branch(cpu, op, taken))
}

pub(crate) fn beq(cpu: &mut CpuState, _: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    let taken = cpu.is_flag_set(ZERO);
    Ok(branch(cpu, op, taken))
}
