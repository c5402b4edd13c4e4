//! AND / ORA / EOR / BIT.

use crate::bus::Bus;
use crate::cpu::addressing::{Operand, read_operand};
use crate::cpu::execute::base_cycles;
use crate::cpu::state::{CpuState, NEGATIVE, OVERFLOW, ZERO};
use crate::error::EmuError;

pub(crate) fn and(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    let v = read_operand(cpu, bus, op)?;
    cpu.a &= v;
    cpu.update_zn(cpu.a);
    Ok(base_cycles(op))
}

pub(crate) fn ora(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    let v = read_operand(cpu, bus, op)?;
    cpu.a |= v;
    cpu.update_zn(cpu.a);
    Ok(base_cycles(op))
}

pub(crate) fn eor(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    let v = read_operand(cpu, bus, op)?;
    cpu.a ^= v;
    cpu.update_zn(cpu.a);
    Ok(base_cycles(op))
}

/// Z from `A & m`; N and V copied from bits 7 and 6 of `m`.
pub(crate) fn bit(cpu: &mut CpuState, bus: &mut Bus, op: &Operand) -> Result<u32, EmuError> {
    let m = read_operand(cpu, bus, op)?;
    cpu.assign_flag(ZERO, cpu.a & m == 0);
    cpu.assign_flag(NEGATIVE, m & 0x80 != 0);
    cpu.assign_flag(OVERFLOW, m & 0x40 != 0);
    Ok(base_cycles(op))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::addressing::AddressingMode;

    #[test]
    fn bit_copies_high_bits_and_tests_mask() {
        let mut bus = Bus::new();
        bus.write(0x0020, 0xC0).unwrap();
        let mut cpu = CpuState::new();
        cpu.a = 0x01;
        let op = Operand {
            pc: 0x0600,
            mode: AddressingMode::ZeroPage,
            cycles: 3,
            bytes: [0x20, 0],
        };
        bit(&mut cpu, &mut bus, &op).unwrap();
        assert!(cpu.is_flag_set(ZERO));
        assert!(cpu.is_flag_set(NEGATIVE));
        assert!(cpu.is_flag_set(OVERFLOW));
        assert_eq!(cpu.a, 0x01);
    }

    #[test]
    fn eor_with_self_clears() {
        let mut bus = Bus::new();
        let mut cpu = CpuState::new();
        cpu.a = 0x9C;
        let op = Operand {
            pc: 0x0600,
            mode: AddressingMode::Immediate,
            cycles: 2,
            bytes: [0x9C, 0],
        };
        eor(&mut cpu, &mut bus, &op).unwrap();
        assert_eq!(cpu.a, 0);
        assert!(cpu.is_flag_set(ZERO));
        assert!(!cpu.is_flag_set(NEGATIVE));
    }
}
