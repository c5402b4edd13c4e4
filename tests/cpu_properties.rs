//! Property-based tests for CPU and bus invariants.

use nescore::Bus;
use nescore::cpu::{CARRY, Cpu, CpuState, Mnemonic, NEGATIVE, OPCODES, OVERFLOW, ZERO};
use proptest::prelude::*;

/// Put `program` in RAM at `origin` and point PC at it.
fn cpu_at(origin: u16, program: &[u8]) -> (Cpu, Bus) {
    let mut bus = Bus::new();
    for (i, b) in program.iter().enumerate() {
        bus.write(origin + i as u16, *b).unwrap();
    }
    let mut cpu = Cpu::new();
    cpu.set_pc(origin);
    (cpu, bus)
}

/// Opcodes whose only effect on PC is stepping past themselves.
fn straight_line_opcodes() -> Vec<u8> {
    OPCODES
        .iter()
        .flatten()
        .filter(|op| {
            !matches!(
                op.mnemonic,
                Mnemonic::Bcc
                    | Mnemonic::Bcs
                    | Mnemonic::Beq
                    | Mnemonic::Bmi
                    | Mnemonic::Bne
                    | Mnemonic::Bpl
                    | Mnemonic::Bvc
                    | Mnemonic::Bvs
                    | Mnemonic::Jmp
                    | Mnemonic::Jsr
                    | Mnemonic::Rts
                    | Mnemonic::Rti
                    | Mnemonic::Brk
            )
        })
        .map(|op| op.code)
        .collect()
}

/// (opcode, flag tested, branch taken when flag is set)
const BRANCHES: [(u8, u8, bool); 8] = [
    (0x10, NEGATIVE, false),
    (0x30, NEGATIVE, true),
    (0x50, OVERFLOW, false),
    (0x70, OVERFLOW, true),
    (0x90, CARRY, false),
    (0xB0, CARRY, true),
    (0xD0, ZERO, false),
    (0xF0, ZERO, true),
];

proptest! {
    #[test]
    fn immediate_loads_set_exactly_zero_or_negative(
        v in any::<u8>(),
        opcode in prop::sample::select(vec![0xA9u8, 0xA2, 0xA0]),
        status in any::<u8>(),
    ) {
        let (mut cpu, mut bus) = cpu_at(0x0200, &[opcode, v, opcode, v]);
        cpu.set_status(status);

        cpu.step(&mut bus).unwrap();
        let after_first = cpu.status();
        prop_assert_eq!(cpu.get_flag(ZERO), v == 0);
        prop_assert_eq!(cpu.get_flag(NEGATIVE), v & 0x80 != 0);
        prop_assert!(!(cpu.get_flag(ZERO) && cpu.get_flag(NEGATIVE)));

        cpu.step(&mut bus).unwrap();
        prop_assert_eq!(cpu.status(), after_first);
    }

    #[test]
    fn pc_advances_by_instruction_length(
        opcode in prop::sample::select(straight_line_opcodes()),
        lo in any::<u8>(),
        // keep absolute operands inside internal RAM
        hi in 0u8..0x08,
    ) {
        let origin = 0x0600;
        let (mut cpu, mut bus) = cpu_at(origin, &[opcode, lo, hi]);
        let len = OPCODES[opcode as usize].unwrap().mode.instruction_len();

        let cycles = cpu.step(&mut bus).unwrap();
        prop_assert!(cycles >= 2);
        prop_assert_eq!(cpu.pc(), origin + len);
    }

    #[test]
    fn stack_word_round_trip(value in any::<u16>(), sp in any::<u8>()) {
        let mut bus = Bus::new();
        let mut state = CpuState::new();
        state.sp = sp;
        state.push_word(&mut bus, value).unwrap();
        prop_assert_eq!(state.sp, sp.wrapping_sub(2));
        prop_assert_eq!(state.pull_word(&mut bus).unwrap(), value);
        prop_assert_eq!(state.sp, sp);
    }

    #[test]
    fn branch_timing(
        index in 0usize..BRANCHES.len(),
        offset in any::<i8>(),
        status in any::<u8>(),
    ) {
        let (opcode, flag, when_set) = BRANCHES[index];
        let origin = 0x0400;
        let (mut cpu, mut bus) = cpu_at(origin, &[opcode, offset as u8]);
        cpu.set_status(status);
        let taken = cpu.get_flag(flag) == when_set;

        let cycles = cpu.step(&mut bus).unwrap();
        if taken {
            prop_assert_eq!(cycles, 3);
            prop_assert_eq!(cpu.pc(), (origin + 2).wrapping_add(offset as u16));
        } else {
            prop_assert_eq!(cycles, 2);
            prop_assert_eq!(cpu.pc(), origin + 2);
        }
        prop_assert_eq!(cpu.status(), status);
    }

    #[test]
    fn ram_is_mirrored_every_2k(addr in 0u16..0x0800, value in any::<u8>(), mirror in 0u16..4) {
        let mut bus = Bus::new();
        bus.write(addr + mirror * 0x0800, value).unwrap();
        for k in 0..4u16 {
            prop_assert_eq!(bus.read(addr + k * 0x0800).unwrap(), value);
        }
    }

    #[test]
    fn ppu_window_is_mirrored_every_8_bytes(slot in 0u16..0x0400, value in any::<u8>()) {
        // $2001 (mask) in mirror `slot`
        let addr = 0x2000 + slot * 8 + 1;
        let mut bus = Bus::new();
        bus.write(addr, value).unwrap();
        prop_assert_eq!(bus.ppu.mask(), value);
        prop_assert_eq!(bus.peek(0x2001), value);
        prop_assert_eq!(bus.peek(addr), bus.peek(0x2000 + (addr % 8)));
    }
}
