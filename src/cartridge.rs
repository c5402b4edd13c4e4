/*!
Cartridge image loader (iNES v1).

Features:
- Parse the 16-byte iNES header from bytes or a file path
- Skip the optional 512-byte trainer
- Extract PRG ROM and CHR ROM
- Derive the mapper number and the board model from flags 6/7

Notes:
- Only the board model matters to the core: a `BoardModel::Nrom` image of at
  most 16 KiB PRG gets mirrored into both halves of $8000-$FFFF by the bus.
- CHR ROM is carried along for tooling; the core never maps it.
*/

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::CartridgeError;

/// Size of the iNES header.
pub const HEADER_LEN: usize = 16;
/// Size of the optional trainer block.
pub const TRAINER_LEN: usize = 512;
/// One PRG ROM unit.
pub const PRG_BANK_SIZE: usize = 16 * 1024;
/// One CHR ROM unit.
pub const CHR_BANK_SIZE: usize = 8 * 1024;

const MAGIC: &[u8; 4] = b"NES\x1A";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    FourScreen,
}

/// Flags 6 bit 4: clear for the fixed-mapping board.
const FLAGS6_BOARD_SELECT: u8 = 0b0001_0000;

/// Fixed wiring of a cartridge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BoardModel {
    /// PRG wired straight into $8000-$FFFF.
    Nrom,
    /// Any banked board, tagged with its iNES mapper number.
    Other(u8),
}

impl BoardModel {
    /// Only flags 6 bit 4 picks the board; `mapper` just tags a banked one.
    pub fn from_header(flags6: u8, mapper: u8) -> Self {
        if flags6 & FLAGS6_BOARD_SELECT == 0 {
            BoardModel::Nrom
        } else {
            BoardModel::Other(mapper)
        }
    }
}

#[derive(Clone, Debug)]
pub struct Cartridge {
    prg_rom: Vec<u8>,
    chr_rom: Vec<u8>,
    mapper: u8,
    board: BoardModel,
    mirroring: Mirroring,
    has_trainer: bool,
}

impl Cartridge {
    /// Parse an iNES image held in memory.
    pub fn from_ines_bytes(data: &[u8]) -> Result<Self, CartridgeError> {
        if data.len() < HEADER_LEN {
            return Err(CartridgeError::Truncated {
                section: "header",
                expected: HEADER_LEN,
                actual: data.len(),
            });
        }
        if &data[0..4] != MAGIC {
            return Err(CartridgeError::BadMagic);
        }

        let prg_len = data[4] as usize * PRG_BANK_SIZE;
        let chr_len = data[5] as usize * CHR_BANK_SIZE;
        let flags6 = data[6];
        let flags7 = data[7];

        // Mapper number: low nibble from flags 6, high nibble from flags 7
        let mapper = (flags7 & 0xF0) | (flags6 >> 4);

        let mirroring = if flags6 & 0b0000_1000 != 0 {
            Mirroring::FourScreen
        } else if flags6 & 0b0000_0001 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };
        let has_trainer = flags6 & 0b0000_0100 != 0;

        let mut offset = HEADER_LEN;
        if has_trainer {
            offset += TRAINER_LEN;
        }

        let prg_rom = slice_section(data, "PRG ROM", offset, prg_len)?.to_vec();
        offset += prg_len;
        let chr_rom = slice_section(data, "CHR ROM", offset, chr_len)?.to_vec();

        let board = BoardModel::from_header(flags6, mapper);
        debug!(
            "parsed iNES image: prg={} bytes chr={} bytes mapper={} board={:?}",
            prg_rom.len(),
            chr_rom.len(),
            mapper,
            board
        );

        Ok(Self {
            prg_rom,
            chr_rom,
            mapper,
            board,
            mirroring,
            has_trainer,
        })
    }

    /// Read and parse an iNES image from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CartridgeError> {
        let bytes = fs::read(path)?;
        Self::from_ines_bytes(&bytes)
    }

    /// Build a cartridge from raw banks, bypassing the header.
    pub fn from_parts(prg_rom: Vec<u8>, chr_rom: Vec<u8>, board: BoardModel) -> Self {
        let mapper = match board {
            BoardModel::Nrom => 0,
            BoardModel::Other(n) => n,
        };
        Self {
            prg_rom,
            chr_rom,
            mapper,
            board,
            mirroring: Mirroring::Horizontal,
            has_trainer: false,
        }
    }

    pub fn prg_rom(&self) -> &[u8] {
        &self.prg_rom
    }

    pub fn chr_rom(&self) -> &[u8] {
        &self.chr_rom
    }

    pub fn mapper(&self) -> u8 {
        self.mapper
    }

    pub fn board_model(&self) -> BoardModel {
        self.board
    }

    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    pub fn has_trainer(&self) -> bool {
        self.has_trainer
    }
}

fn slice_section<'a>(
    data: &'a [u8],
    section: &'static str,
    offset: usize,
    len: usize,
) -> Result<&'a [u8], CartridgeError> {
    data.get(offset..offset + len)
        .ok_or(CartridgeError::Truncated {
            section,
            expected: offset + len,
            actual: data.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::build_ines;

    #[test]
    fn parses_sizes_and_board() {
        let rom = build_ines(2, 1, 0, 0, None);
        let cart = Cartridge::from_ines_bytes(&rom).expect("parse");
        assert_eq!(cart.prg_rom().len(), 32 * 1024);
        assert_eq!(cart.chr_rom().len(), 8 * 1024);
        assert_eq!(cart.board_model(), BoardModel::Nrom);
        assert_eq!(cart.mirroring(), Mirroring::Horizontal);
    }

    #[test]
    fn chr_follows_prg() {
        let mut rom = build_ines(1, 1, 0, 0, None);
        rom[HEADER_LEN] = 0x11;
        rom[HEADER_LEN + PRG_BANK_SIZE] = 0x22;
        let cart = Cartridge::from_ines_bytes(&rom).expect("parse");
        assert_eq!(cart.prg_rom()[0], 0x11);
        assert_eq!(cart.chr_rom()[0], 0x22);
    }

    #[test]
    fn mapper_bits_select_board() {
        // flags6 bit 4 set => mapper 1
        let rom = build_ines(1, 0, 0x10, 0, None);
        let cart = Cartridge::from_ines_bytes(&rom).expect("parse");
        assert_eq!(cart.mapper(), 1);
        assert_eq!(cart.board_model(), BoardModel::Other(1));

        // high nibble comes from flags7
        let rom = build_ines(1, 0, 0x40, 0x10, None);
        let cart = Cartridge::from_ines_bytes(&rom).expect("parse");
        assert_eq!(cart.mapper(), 0x14);
    }

    #[test]
    fn board_ignores_mapper_bits_other_than_bit_4() {
        let rom = build_ines(1, 0, 0x20, 0, None);
        let cart = Cartridge::from_ines_bytes(&rom).expect("parse");
        assert_eq!(cart.mapper(), 2);
        assert_eq!(cart.board_model(), BoardModel::Nrom);

        let rom = build_ines(1, 0, 0x00, 0xF0, None);
        let cart = Cartridge::from_ines_bytes(&rom).expect("parse");
        assert_eq!(cart.mapper(), 0xF0);
        assert_eq!(cart.board_model(), BoardModel::Nrom);
    }

    #[test]
    fn trainer_is_skipped() {
        let trainer = [0x77u8; TRAINER_LEN];
        let mut rom = build_ines(1, 0, 0b0000_0100, 0, Some(&trainer));
        rom[HEADER_LEN + TRAINER_LEN] = 0x4C;
        let cart = Cartridge::from_ines_bytes(&rom).expect("parse");
        assert!(cart.has_trainer());
        assert_eq!(cart.prg_rom()[0], 0x4C);
    }

    #[test]
    fn rejects_bad_magic() {
        let mut rom = build_ines(1, 0, 0, 0, None);
        rom[3] = 0x00;
        assert!(matches!(
            Cartridge::from_ines_bytes(&rom),
            Err(CartridgeError::BadMagic)
        ));
    }

    #[test]
    fn rejects_truncated_prg() {
        let rom = build_ines(2, 0, 0, 0, None);
        let short = &rom[..HEADER_LEN + PRG_BANK_SIZE];
        match Cartridge::from_ines_bytes(short) {
            Err(CartridgeError::Truncated { section, .. }) => assert_eq!(section, "PRG ROM"),
            other => panic!("expected truncation error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_short_header() {
        assert!(matches!(
            Cartridge::from_ines_bytes(b"NES"),
            Err(CartridgeError::Truncated {
                section: "header",
                ..
            })
        ));
    }
}
