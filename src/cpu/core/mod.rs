/*!
core::Cpu - 6502 CPU facade wrapping `CpuState`.

Design
======
- `Cpu` owns the architectural state, the running cycle/instruction
  counters and the list of instruction observers.
- `step` performs one fetch-decode-execute:
    1. read the opcode byte at PC;
    2. look it up in the catalog and the dispatch table (a miss is
       `EmuError::UnimplementedOpcode`);
    3. fetch the operand bytes the addressing mode calls for;
    4. move PC past the instruction and run the handler;
    5. notify observers in registration order.
- Whatever the error, PC is left on the opcode of the failing instruction
  and the counters are not advanced.
- The bus is borrowed for the duration of a call; the CPU never reaches the
  picture unit other than through `Bus::read` / `Bus::write`.
*/

use std::fmt;

use log::warn;

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::observer::{CpuObserver, InstructionEvent, ObserverId};
use crate::cpu::opcodes::lookup;
use crate::cpu::state::{CpuState, RESET_VECTOR};
use crate::cpu::table;
use crate::error::EmuError;

pub struct Cpu {
    state: CpuState,
    cycles: u64,
    instructions: u64,
    observers: Vec<(ObserverId, Box<dyn CpuObserver>)>,
    next_observer_id: u64,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cpu")
            .field("state", &self.state)
            .field("cycles", &self.cycles)
            .field("instructions", &self.instructions)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Cpu {
    /// Construct a new CPU with power-on register values.
    pub fn new() -> Self {
        Self {
            state: CpuState::new(),
            cycles: 0,
            instructions: 0,
            observers: Vec::new(),
            next_observer_id: 0,
        }
    }

    pub fn state(&self) -> &CpuState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut CpuState {
        &mut self.state
    }

    /// Back to power-on registers and zeroed counters. Observers stay.
    pub fn power_on(&mut self) {
        self.state = CpuState::new();
        self.cycles = 0;
        self.instructions = 0;
    }

    /// Power-on state, then PC from the reset vector at $FFFC.
    pub fn reset(&mut self, bus: &mut Bus) -> Result<(), EmuError> {
        self.power_on();
        self.state.pc = bus.read_word(RESET_VECTOR)?;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Register accessors
    // ---------------------------------------------------------------------
    pub fn a(&self) -> u8 {
        self.state.a
    }
    pub fn x(&self) -> u8 {
        self.state.x
    }
    pub fn y(&self) -> u8 {
        self.state.y
    }
    pub fn sp(&self) -> u8 {
        self.state.sp
    }
    pub fn pc(&self) -> u16 {
        self.state.pc
    }
    pub fn status(&self) -> u8 {
        self.state.status
    }

    pub fn set_a(&mut self, v: u8) {
        self.state.a = v;
    }
    pub fn set_x(&mut self, v: u8) {
        self.state.x = v;
    }
    pub fn set_y(&mut self, v: u8) {
        self.state.y = v;
    }
    pub fn set_sp(&mut self, v: u8) {
        self.state.sp = v;
    }
    pub fn set_pc(&mut self, v: u16) {
        self.state.pc = v;
    }
    pub fn set_status(&mut self, v: u8) {
        self.state.status = v;
    }

    pub fn get_flag(&self, mask: u8) -> bool {
        self.state.is_flag_set(mask)
    }

    pub fn set_flag(&mut self, mask: u8, on: bool) {
        self.state.assign_flag(mask, on);
    }

    /// Total cycles consumed since power-on.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Instructions executed since power-on.
    pub fn instructions(&self) -> u64 {
        self.instructions
    }

    // ---------------------------------------------------------------------
    // Observers
    // ---------------------------------------------------------------------

    pub fn add_observer<O>(&mut self, observer: O) -> ObserverId
    where
        O: CpuObserver + 'static,
    {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if `id` was not registered.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(registered, _)| *registered != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // ---------------------------------------------------------------------
    // Execution
    // ---------------------------------------------------------------------

    /// Execute one instruction and return the cycles it consumed.
    pub fn step(&mut self, bus: &mut Bus) -> Result<u32, EmuError> {
        let pc = self.state.pc;
        let code = bus.read(pc)?;

        let (opcode, handler) = match (lookup(code), table::handler(code)) {
            (Some(opcode), Some(handler)) => (opcode, handler),
            _ => {
                warn!("unimplemented opcode ${:02X} at ${:04X}", code, pc);
                return Err(EmuError::UnimplementedOpcode { opcode: code, pc });
            }
        };

        let mut bytes = [0u8; 2];
        for (i, byte) in bytes.iter_mut().take(opcode.operand_len()).enumerate() {
            *byte = bus.read(pc.wrapping_add(1 + i as u16))?;
        }
        let operand = Operand {
            pc,
            mode: opcode.mode,
            cycles: opcode.cycles,
            bytes,
        };

        self.state.pc = operand.next_pc();
        let cycles = match handler(&mut self.state, bus, &operand) {
            Ok(cycles) => cycles,
            Err(e) => {
                self.state.pc = pc;
                return Err(e);
            }
        };

        self.cycles += cycles as u64;
        self.instructions += 1;

        let event = InstructionEvent {
            pc,
            opcode,
            cycles,
            operands: operand.as_slice(),
        };
        for (_, observer) in self.observers.iter_mut() {
            observer.on_instruction(&event);
        }

        Ok(cycles)
    }

    /// Run up to `max_instructions`, stopping at the first error.
    /// Returns the cycles consumed.
    pub fn run(&mut self, bus: &mut Bus, max_instructions: usize) -> Result<u64, EmuError> {
        let mut total = 0u64;
        for _ in 0..max_instructions {
            total += self.step(bus)? as u64;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::cpu::state::{BREAK, CARRY, NEGATIVE, ZERO};
    use crate::error::RegisterAccess;
    use crate::test_utils::{boot, boot_in_ram};

    #[test]
    fn lda_immediate_at_power_on_pc() {
        let mut bus = Bus::new();
        let mut cpu = Cpu::new();
        bus.write(cpu.pc(), 0xA9).unwrap();
        bus.write(cpu.pc() + 1, 0xFD).unwrap();

        let cycles = cpu.step(&mut bus).unwrap();
        assert_eq!(cycles, 2);
        assert_eq!(cpu.a(), 0xFD);
        assert_eq!(cpu.pc(), 0x8002);
        assert!(cpu.get_flag(NEGATIVE));
        assert!(!cpu.get_flag(ZERO));
    }

    #[test]
    fn brk_through_irq_vector() {
        let mut bus = Bus::new();
        let mut cpu = Cpu::new();
        cpu.set_pc(0x1234);
        cpu.set_flag(CARRY, true);
        bus.write(0x1234, 0x00).unwrap();
        bus.write(0xFFFE, 0xCD).unwrap();
        bus.write(0xFFFF, 0xAB).unwrap();
        let sp = cpu.sp();

        assert_eq!(cpu.step(&mut bus).unwrap(), 7);
        assert_eq!(cpu.pc(), 0xABCD);
        assert!(cpu.get_flag(BREAK));
        assert_eq!(cpu.sp(), sp - 3);
        let pushed_status = bus.peek(0x0100 + sp as u16 - 2);
        assert_ne!(pushed_status & CARRY, 0);
        assert_ne!(pushed_status & BREAK, 0);
        assert_eq!(bus.peek(0x0100 + sp as u16 - 1), 0x34);
        assert_eq!(bus.peek(0x0100 + sp as u16), 0x12);
    }

    #[test]
    fn jsr_from_low_memory() {
        let (mut cpu, mut bus) = boot_in_ram(0x0003, &[0x20, 0xAD, 0xDE]);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.pc(), 0xDEAD);
        assert_eq!(bus.peek(0x01FF), 0x00);
        assert_eq!(bus.peek(0x01FE), 0x06);
    }

    #[test]
    fn unknown_opcode_is_reported_and_pc_stays() {
        let (mut cpu, mut bus) = boot_in_ram(0x0200, &[0x02]);
        let err = cpu.step(&mut bus).unwrap_err();
        assert_eq!(
            err,
            EmuError::UnimplementedOpcode {
                opcode: 0x02,
                pc: 0x0200
            }
        );
        assert_eq!(cpu.pc(), 0x0200);
        assert_eq!(cpu.instructions(), 0);
    }

    #[test]
    fn register_fault_leaves_pc_on_the_instruction() {
        // LDA $2000 (write-only control port)
        let (mut cpu, mut bus) = boot_in_ram(0x0200, &[0xAD, 0x00, 0x20]);
        let err = cpu.step(&mut bus).unwrap_err();
        assert_eq!(
            err,
            EmuError::UnsupportedRegisterAccess {
                addr: 0x2000,
                access: RegisterAccess::Read
            }
        );
        assert_eq!(cpu.pc(), 0x0200);
        assert_eq!(cpu.instructions(), 0);
        assert_eq!(cpu.cycles(), 0);
    }

    #[test]
    fn counters_accumulate() {
        // LDX #$03 ; DEX ; BNE -3 ; NOP
        let (mut cpu, mut bus) = boot_in_ram(0x0300, &[0xA2, 0x03, 0xCA, 0xD0, 0xFD, 0xEA]);
        cpu.run(&mut bus, 8).unwrap();
        // LDX 2 + 3 * DEX 2 + 2 taken BNE 3 + 1 fallthrough BNE 2 + NOP 2
        assert_eq!(cpu.instructions(), 8);
        assert_eq!(cpu.cycles(), 2 + 6 + 6 + 2 + 2);
        assert_eq!(cpu.pc(), 0x0306);
        assert_eq!(cpu.x(), 0);
    }

    #[test]
    fn observers_see_each_instruction_in_order() {
        let (mut cpu, mut bus) = boot_in_ram(0x0200, &[0xA9, 0x01, 0xEA]);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let log = Rc::clone(&seen);
        let first = cpu.add_observer(move |e: &InstructionEvent<'_>| {
            log.borrow_mut()
                .push((1, e.pc, e.opcode.code, e.operands.to_vec(), e.cycles));
        });
        let log = Rc::clone(&seen);
        cpu.add_observer(move |e: &InstructionEvent<'_>| {
            log.borrow_mut().push((2, e.pc, e.opcode.code, Vec::new(), e.cycles));
        });

        cpu.step(&mut bus).unwrap();
        assert!(cpu.remove_observer(first));
        assert!(!cpu.remove_observer(first));
        cpu.step(&mut bus).unwrap();

        let seen = seen.borrow();
        assert_eq!(
            *seen,
            vec![
                (1, 0x0200, 0xA9, vec![0x01], 2),
                (2, 0x0200, 0xA9, Vec::new(), 2),
                (2, 0x0202, 0xEA, Vec::new(), 2),
            ]
        );
    }

    #[test]
    fn reset_loads_vector() {
        let (mut cpu, mut bus) = boot(&[0xEA]);
        cpu.set_a(0x55);
        cpu.reset(&mut bus).unwrap();
        assert_eq!(cpu.a(), 0);
        assert_eq!(cpu.pc(), 0x8000);
    }
}
