//! Instruction observers.
//!
//! After every executed instruction the `Cpu` hands each registered
//! observer an [`InstructionEvent`]. Observers see the instruction exactly as
//! fetched; they cannot alter CPU or bus state.
//!
//! Any `FnMut(&InstructionEvent)` closure is an observer, and
//! [`LogObserver`] forwards every event to the `log` facade at `info` level.

use log::info;

use crate::cpu::disasm::format_instruction;
use crate::cpu::opcodes::Opcode;

/// One executed instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionEvent<'a> {
    /// Address the opcode was fetched from.
    pub pc: u16,
    pub opcode: &'static Opcode,
    /// Cycles the instruction consumed, including branch adjustments.
    pub cycles: u32,
    /// Operand bytes following the opcode (0 to 2 of them).
    pub operands: &'a [u8],
}

pub trait CpuObserver {
    fn on_instruction(&mut self, event: &InstructionEvent<'_>);
}

impl<F> CpuObserver for F
where
    F: FnMut(&InstructionEvent<'_>),
{
    fn on_instruction(&mut self, event: &InstructionEvent<'_>) {
        self(event)
    }
}

/// Handle returned by `Cpu::add_observer`, used to remove the observer again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub(crate) u64);

/// Logs one line per instruction: `PPPP: MNE OPERANDS (N cycles)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl CpuObserver for LogObserver {
    fn on_instruction(&mut self, event: &InstructionEvent<'_>) {
        info!("{}", format_instruction(event));
    }
}
