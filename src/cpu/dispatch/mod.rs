/*!
dispatch - per-family instruction handlers

Overview
========
Every handler has the `OpHandler` shape:

```text
fn(&mut CpuState, &mut Bus, &Operand) -> Result<u32, EmuError>
```

and returns the cycles the instruction consumed. `cpu::table` maps each
catalog mnemonic to one of these functions at compile time.

Caller Requirements
===================
- The operand bytes are already fetched into `Operand`.
- `CpuState::pc` already points at the next instruction. Handlers that
  redirect control flow overwrite it.
- Handlers never advance the picture unit; the caller reports cycles.

Families
========
```text
load_store     LDA LDX LDY STA STX STY
arithmetic     ADC SBC
logical        AND ORA EOR BIT
compare        CMP CPX CPY
rmw            ASL LSR ROL ROR INC DEC
branches       BPL BMI BVC BVS BCC BCS BNE BEQ
control_flow   JMP JSR RTS RTI BRK
misc           transfers, stack, flags, register INC/DEC, NOP
```
*/

pub(crate) mod arithmetic;
pub(crate) mod branches;
pub(crate) mod compare;
pub(crate) mod control_flow;
pub(crate) mod load_store;
pub(crate) mod logical;
pub(crate) mod misc;
pub(crate) mod rmw;
