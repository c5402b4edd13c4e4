/*!
execute.rs - 6502 instruction semantic helpers shared by the dispatch families

Scope
-----
```text
compare            CMP/CPX/CPY three-way flag rule
adc                binary add with carry (SBC feeds it the complement)
modify             read-modify-write on memory or the accumulator
branch             relative branch with taken/not-taken timing
base_cycles        catalog cost of the current instruction
```

Design Notes
============
- Helpers take `&mut CpuState` and, where memory is involved, `&mut Bus`.
- PC already points past the instruction when a helper runs; only branch
  and control-flow handlers overwrite it.
*/

use std::cmp::Ordering;

use crate::bus::Bus;
use crate::cpu::addressing::{AddressingMode, Operand, effective_address};
use crate::cpu::state::{CARRY, CpuState, NEGATIVE, OVERFLOW, ZERO};
use crate::error::EmuError;

#[inline]
pub(crate) fn base_cycles(op: &Operand) -> u32 {
    op.cycles as u32
}

// ---------------------------------------------------------------------------
// Compare
// ---------------------------------------------------------------------------

/// `reg - v` as a signed value decides the flags:
/// positive sets Carry only, zero sets Carry and Zero, negative sets Negative
/// only. The other two of {C, Z, N} are cleared.
pub(crate) fn compare(cpu: &mut CpuState, reg: u8, v: u8) {
    let (carry, zero, negative) = match (reg as i16 - v as i16).cmp(&0) {
        Ordering::Greater => (true, false, false),
        Ordering::Equal => (true, true, false),
        Ordering::Less => (false, false, true),
    };
    // All three are assigned so no flag from an earlier instruction survives.
    cpu.assign_flag(CARRY, carry);
    cpu.assign_flag(ZERO, zero);
    cpu.assign_flag(NEGATIVE, negative);
}

// ---------------------------------------------------------------------------
// Arithmetic (binary only; the decimal flag is ignored)
// ---------------------------------------------------------------------------

pub(crate) fn adc(cpu: &mut CpuState, v: u8) {
    let a = cpu.a;
    let carry_in = cpu.is_flag_set(CARRY) as u16;
    let sum = a as u16 + v as u16 + carry_in;
    let result = sum as u8;

    cpu.assign_flag(CARRY, sum > 0xFF);
    cpu.assign_flag(OVERFLOW, (!(a ^ v) & (a ^ result) & 0x80) != 0);
    cpu.a = result;
    cpu.update_zn(result);
}

#[inline]
pub(crate) fn sbc(cpu: &mut CpuState, v: u8) {
    adc(cpu, v ^ 0xFF);
}

// ---------------------------------------------------------------------------
// Read-modify-write
// ---------------------------------------------------------------------------

/// Apply `transform` to the accumulator or to the byte at the effective
/// address, store the result and update Z/N from it.
pub(crate) fn modify<F>(
    cpu: &mut CpuState,
    bus: &mut Bus,
    op: &Operand,
    transform: F,
) -> Result<u8, EmuError>
where
    F: FnOnce(&mut CpuState, u8) -> u8,
{
    let result = if op.mode == AddressingMode::Accumulator {
        let old = cpu.a;
        let new = transform(cpu, old);
        cpu.a = new;
        new
    } else {
        let addr = effective_address(cpu, bus, op)?;
        let old = bus.read(addr)?;
        let new = transform(cpu, old);
        bus.write(addr, new)?;
        new
    };
    cpu.update_zn(result);
    Ok(result)
}

// ---------------------------------------------------------------------------
// Branch
// ---------------------------------------------------------------------------

/// Not taken: PC stays past the instruction, base cost.
/// Taken: PC = next instruction + signed displacement, base cost + 1.
pub(crate) fn branch(cpu: &mut CpuState, op: &Operand, taken: bool) -> u32 {
    let cycles = base_cycles(op);
    if !taken {
        return cycles;
    }
    // TODO: add the extra cycle when the target is on a different page.
    let displacement = op.byte() as i8 as u16;
    cpu.pc = op.next_pc().wrapping_add(displacement);
    cycles + 1
}
