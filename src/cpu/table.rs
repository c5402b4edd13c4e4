/*!
table.rs - function-pointer dispatch table

Design
------
- `OpHandler = fn(&mut CpuState, &mut Bus, &Operand) -> Result<u32, EmuError>`.
- `EXEC_TABLE: [Option<OpHandler>; 256]` is built at compile time from the
  opcode catalog: every catalog entry gets the handler for its mnemonic,
  every other byte stays `None`.
- The catalog and this table therefore cover exactly the same bytes.
*/

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::dispatch::{
    arithmetic, branches, compare, control_flow, load_store, logical, misc, rmw,
};
use crate::cpu::opcodes::{CATALOG, Mnemonic};
use crate::cpu::state::CpuState;
use crate::error::EmuError;

pub(crate) type OpHandler = fn(&mut CpuState, &mut Bus, &Operand) -> Result<u32, EmuError>;

const fn handler_for(mnemonic: Mnemonic) -> OpHandler {
    match mnemonic {
        Mnemonic::Lda => load_store::lda,
        Mnemonic::Ldx => load_store::ldx,
        Mnemonic::Ldy => load_store::ldy,
        Mnemonic::Sta => load_store::sta,
        Mnemonic::Stx => load_store::stx,
        Mnemonic::Sty => load_store::sty,

        Mnemonic::Adc => arithmetic::adc,
        Mnemonic::Sbc => arithmetic::sbc,

        Mnemonic::And => logical::and,
        Mnemonic::Ora => logical::ora,
        Mnemonic::Eor => logical::eor,
        Mnemonic::Bit => logical::bit,

        Mnemonic::Cmp => compare::cmp,
        Mnemonic::Cpx => compare::cpx,
        Mnemonic::Cpy => compare::cpy,

        Mnemonic::Asl => rmw::asl,
        Mnemonic::Lsr => rmw::lsr,
        Mnemonic::Rol => rmw::rol,
        Mnemonic::Ror => rmw::ror,
        Mnemonic::Inc => rmw::inc,
        Mnemonic::Dec => rmw::dec,

        Mnemonic::Bpl => branches::bpl,
        Mnemonic::Bmi => branches::bmi,
        Mnemonic::Bvc => branches::bvc,
        Mnemonic::Bvs => branches::bvs,
        Mnemonic::Bcc => branches::bcc,
        Mnemonic::Bcs => branches::bcs,
        Mnemonic::Bne => branches::bne,
        Mnemonic::Beq => branches::beq,

        Mnemonic::Jmp => control_flow::jmp,
        Mnemonic::Jsr => control_flow::jsr,
        Mnemonic::Rts => control_flow::rts,
        Mnemonic::Rti => control_flow::rti,
        Mnemonic::Brk => control_flow::brk,

        Mnemonic::Tax => misc::tax,
        Mnemonic::Tay => misc::tay,
        Mnemonic::Txa => misc::txa,
        Mnemonic::Tya => misc::tya,
        Mnemonic::Tsx => misc::tsx,
        Mnemonic::Txs => misc::txs,
        Mnemonic::Pha => misc::pha,
        Mnemonic::Php => misc::php,
        Mnemonic::Pla => misc::pla,
        Mnemonic::Plp => misc::plp,
        Mnemonic::Clc => misc::clc,
        Mnemonic::Sec => misc::sec,
        Mnemonic::Cli => misc::cli,
        Mnemonic::Sei => misc::sei,
        Mnemonic::Cld => misc::cld,
        Mnemonic::Sed => misc::sed,
        Mnemonic::Clv => misc::clv,
        Mnemonic::Inx => misc::inx,
        Mnemonic::Iny => misc::iny,
        Mnemonic::Dex => misc::dex,
        Mnemonic::Dey => misc::dey,
        Mnemonic::Nop => misc::nop,
    }
}

pub(crate) static EXEC_TABLE: [Option<OpHandler>; 256] = {
    let mut t: [Option<OpHandler>; 256] = [None; 256];
    let mut i = 0;
    while i < 256 {
        if let Some(op) = CATALOG[i] {
            t[i] = Some(handler_for(op.mnemonic));
        }
        i += 1;
    }
    t
};

#[inline]
pub(crate) fn handler(code: u8) -> Option<OpHandler> {
    EXEC_TABLE[code as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_and_catalog_cover_the_same_bytes() {
        for code in 0..=255u8 {
            assert_eq!(
                handler(code).is_some(),
                CATALOG[code as usize].is_some(),
                "mismatch at ${code:02X}"
            );
        }
    }
}
