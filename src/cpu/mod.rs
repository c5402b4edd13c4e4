/*!
cpu - 6502 CPU core.

```text
state.rs        - Registers, flag masks, stack primitives.
addressing.rs   - Addressing modes and effective-address resolution.
opcodes.rs      - Static catalog of the 151 documented opcodes.
execute.rs      - Semantic helpers shared by the handler families.
dispatch/       - One handler per mnemonic, grouped by family.
table.rs        - Opcode byte -> handler, built from the catalog.
core/           - `Cpu` facade: stepping, counters, observers.
observer.rs     - Instruction observer trait and the log tracer.
disasm.rs       - Assembler-syntax rendering for tracing.
```

The public surface is the `Cpu` facade plus the catalog and observer types.

Usage:
```
use nescore::bus::Bus;
use nescore::cpu::Cpu;

let mut bus = Bus::new();
bus.write(0x8000, 0xA9).unwrap(); // LDA #$01
bus.write(0x8001, 0x01).unwrap();
let mut cpu = Cpu::new();
assert_eq!(cpu.step(&mut bus).unwrap(), 2);
assert_eq!(cpu.a(), 0x01);
```
*/

pub mod addressing;
pub mod core;
pub mod disasm;
pub(crate) mod dispatch;
pub(crate) mod execute;
pub mod observer;
pub mod opcodes;
pub mod state;
pub(crate) mod table;

pub use crate::cpu::addressing::AddressingMode;
pub use crate::cpu::core::Cpu;
pub use crate::cpu::observer::{CpuObserver, InstructionEvent, LogObserver, ObserverId};
pub use crate::cpu::opcodes::{Mnemonic, OPCODES, Opcode, lookup};
pub use crate::cpu::state::{
    BREAK, CARRY, CpuState, DECIMAL, IRQ_DISABLE, NEGATIVE, OVERFLOW, UNUSED, ZERO,
};
