//! ADC / SBC (binary mode only).

use crate::bus::Bus;
use crate::cpu::addressing::{Operand, read_operand};
use crate::cpu::execute::{adc as add_with_carry, base_cycles, sbc as sub_with_carry};
use crate::cpu::state::CpuState;
use crate::error::EmuError;

pub(crate) fn adc(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    let v = read_operand(cpu, bus, op)?;
    add_with_carry(cpu, v);
    Ok(base_cycles(op))
}

pub(crate) fn sbc(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    let v = read_operand(cpu, bus, op)?;
    sub_with_carry(cpu, v);
    Ok(base_cycles(op))
}
