/*!
Error types for the emulator core.

Two categories are fatal at runtime and surface through `EmuError`:
- an opcode with no catalog entry (`UnimplementedOpcode`)
- a picture register port accessed in a direction it does not support
  (`UnsupportedRegisterAccess`)

Image parsing has its own `CartridgeError` because it is the only part of
the crate that touches I/O.
*/

use std::fmt;

use thiserror::Error;

/// Direction of a register-port access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterAccess {
    Read,
    Write,
}

impl fmt::Display for RegisterAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterAccess::Read => f.write_str("read"),
            RegisterAccess::Write => f.write_str("write"),
        }
    }
}

/// Fatal conditions raised while stepping the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EmuError {
    #[error("unimplemented opcode ${opcode:02X} at ${pc:04X}")]
    UnimplementedOpcode { opcode: u8, pc: u16 },

    #[error("unsupported {access} of picture register ${addr:04X}")]
    UnsupportedRegisterAccess { addr: u16, access: RegisterAccess },
}

/// Failures while parsing an iNES image.
#[derive(Debug, Error)]
pub enum CartridgeError {
    #[error("invalid iNES header magic (expected NES<1A>)")]
    BadMagic,

    #[error("image truncated in {section}: need {expected} bytes, have {actual}")]
    Truncated {
        section: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
