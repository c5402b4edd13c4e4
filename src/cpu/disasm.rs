/*!
disasm.rs - 6502 assembler-syntax rendering of decoded instructions

```text
Implied        (nothing)
Accumulator    A
Immediate      #$NN
ZeroPage       $NN        $NN,X      $NN,Y
Absolute       $NNNN      $NNNN,X    $NNNN,Y
Indirect       ($NNNN)    ($NN,X)    ($NN),Y
Relative       $TTTT      (resolved branch target)
```

Missing operand bytes render as zero.
*/

use crate::cpu::addressing::AddressingMode;
use crate::cpu::observer::InstructionEvent;

/// Render the operand field of an instruction fetched at `pc`.
pub fn format_operands(mode: AddressingMode, operands: &[u8], pc: u16) -> String {
    let b0 = operands.first().copied().unwrap_or(0);
    let b1 = operands.get(1).copied().unwrap_or(0);
    let word = u16::from_le_bytes([b0, b1]);

    match mode {
        AddressingMode::Implied => String::new(),
        AddressingMode::Accumulator => "A".to_string(),
        AddressingMode::Immediate => format!("#${b0:02X}"),
        AddressingMode::ZeroPage => format!("${b0:02X}"),
        AddressingMode::ZeroPageX => format!("${b0:02X},X"),
        AddressingMode::ZeroPageY => format!("${b0:02X},Y"),
        AddressingMode::Absolute => format!("${word:04X}"),
        AddressingMode::AbsoluteX => format!("${word:04X},X"),
        AddressingMode::AbsoluteY => format!("${word:04X},Y"),
        AddressingMode::Indirect => format!("(${word:04X})"),
        AddressingMode::IndirectX => format!("(${b0:02X},X)"),
        AddressingMode::IndirectY => format!("(${b0:02X}),Y"),
        AddressingMode::Relative => {
            let target = pc
                .wrapping_add(mode.instruction_len())
                .wrapping_add(b0 as i8 as u16);
            format!("${target:04X}")
        }
    }
}

/// `PPPP: MNE OPERANDS (N cycles)`; the operand field and its separating
/// space are omitted for implied instructions.
pub fn format_instruction(event: &InstructionEvent<'_>) -> String {
    let operands = format_operands(event.opcode.mode, event.operands, event.pc);
    if operands.is_empty() {
        format!(
            "{:04X}: {} ({} cycles)",
            event.pc, event.opcode.mnemonic, event.cycles
        )
    } else {
        format!(
            "{:04X}: {} {} ({} cycles)",
            event.pc, event.opcode.mnemonic, operands, event.cycles
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::opcodes::lookup;

    #[test]
    fn operand_syntax_per_mode() {
        use AddressingMode::*;
        assert_eq!(format_operands(Implied, &[], 0), "");
        assert_eq!(format_operands(Accumulator, &[], 0), "A");
        assert_eq!(format_operands(Immediate, &[0xFD], 0), "#$FD");
        assert_eq!(format_operands(ZeroPageX, &[0x10], 0), "$10,X");
        assert_eq!(format_operands(AbsoluteY, &[0x34, 0x12], 0), "$1234,Y");
        assert_eq!(format_operands(Indirect, &[0xFC, 0xFF], 0), "($FFFC)");
        assert_eq!(format_operands(IndirectX, &[0x20], 0), "($20,X)");
        assert_eq!(format_operands(IndirectY, &[0x20], 0), "($20),Y");
    }

    #[test]
    fn relative_operand_shows_target() {
        assert_eq!(
            format_operands(AddressingMode::Relative, &[0x05], 0x8000),
            "$8007"
        );
        assert_eq!(
            format_operands(AddressingMode::Relative, &[0xFE], 0x8000),
            "$8000"
        );
    }

    #[test]
    fn instruction_line() {
        let lda = lookup(0xA9).unwrap();
        let event = InstructionEvent {
            pc: 0x8000,
            opcode: lda,
            cycles: 2,
            operands: &[0xFD],
        };
        assert_eq!(format_instruction(&event), "8000: LDA #$FD (2 cycles)");

        let nop = lookup(0xEA).unwrap();
        let event = InstructionEvent {
            pc: 0x8002,
            opcode: nop,
            cycles: 2,
            operands: &[],
        };
        assert_eq!(format_instruction(&event), "8002: NOP (2 cycles)");
    }
}
