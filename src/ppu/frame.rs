#![doc = r#"
Frame buffer and background pass

Responsibilities
- `Frame`: 256x240 RGBA pixel store handed to whatever presents it.
- `Ppu::render`: one pass over the base nametable, resolving each tile row
  through the background pattern table and the palette RAM at $3F00.

Notes
- Pattern data is whatever software wrote into PPU RAM through the data
  port; cartridge CHR is never mapped.
- With background rendering disabled in the mask register the frame is
  filled with the universal background colour.
"#]

use super::{MASK_SHOW_BACKGROUND, Ppu};

/// Screen width in pixels.
pub const NES_WIDTH: usize = 256;
/// Screen height in pixels.
pub const NES_HEIGHT: usize = 240;
/// RGBA bytes per pixel.
pub const BYTES_PER_PIXEL: usize = 4;

const PALETTE_RAM: u16 = 0x3F00;
const ATTRIBUTE_OFFSET: u16 = 0x03C0;

/// Canonical (approximate) NES master palette.
const NES_PALETTE: [[u8; 3]; 64] = [
    [0x75, 0x75, 0x75],
    [0x27, 0x1B, 0x8F],
    [0x00, 0x00, 0xAB],
    [0x47, 0x00, 0x9F],
    [0x8F, 0x00, 0x77],
    [0xAB, 0x00, 0x13],
    [0xA7, 0x00, 0x00],
    [0x7F, 0x0B, 0x00],
    [0x43, 0x2F, 0x00],
    [0x00, 0x47, 0x00],
    [0x00, 0x51, 0x00],
    [0x00, 0x3F, 0x17],
    [0x1B, 0x3F, 0x5F],
    [0x00, 0x00, 0x00],
    [0x00, 0x00, 0x00],
    [0x00, 0x00, 0x00],
    [0xBC, 0xBC, 0xBC],
    [0x00, 0x73, 0xEF],
    [0x23, 0x3B, 0xEF],
    [0x83, 0x00, 0xF3],
    [0xBF, 0x00, 0xBF],
    [0xE7, 0x00, 0x5B],
    [0xDB, 0x2B, 0x00],
    [0xCB, 0x4F, 0x0F],
    [0x8B, 0x73, 0x00],
    [0x00, 0x97, 0x00],
    [0x00, 0xAB, 0x00],
    [0x00, 0x93, 0x3B],
    [0x00, 0x83, 0x8B],
    [0x00, 0x00, 0x00],
    [0x00, 0x00, 0x00],
    [0x00, 0x00, 0x00],
    [0xFF, 0xFF, 0xFF],
    [0x3F, 0xBF, 0xFF],
    [0x5F, 0x97, 0xFF],
    [0xA7, 0x8B, 0xFD],
    [0xF7, 0x7B, 0xFF],
    [0xFF, 0x77, 0xB7],
    [0xFF, 0x77, 0x63],
    [0xFF, 0x9B, 0x3B],
    [0xF3, 0xBF, 0x3F],
    [0x83, 0xD3, 0x13],
    [0x4F, 0xDF, 0x4B],
    [0x58, 0xF8, 0x98],
    [0x00, 0xEB, 0xDB],
    [0x00, 0x00, 0x00],
    [0x00, 0x00, 0x00],
    [0x00, 0x00, 0x00],
    [0xFF, 0xFF, 0xFF],
    [0xAB, 0xE7, 0xFF],
    [0xC7, 0xD7, 0xFF],
    [0xD7, 0xCB, 0xFF],
    [0xFF, 0xC7, 0xFF],
    [0xFF, 0xC7, 0xDB],
    [0xFF, 0xBF, 0xB3],
    [0xFF, 0xDB, 0xAB],
    [0xFF, 0xE7, 0xA3],
    [0xE3, 0xFF, 0xA3],
    [0xAB, 0xF3, 0xBF],
    [0xB3, 0xFF, 0xCF],
    [0x9F, 0xFF, 0xF3],
    [0x00, 0x00, 0x00],
    [0x00, 0x00, 0x00],
    [0x00, 0x00, 0x00],
];

/// RGBA colour for a 6-bit palette entry.
#[inline]
pub fn palette_rgba(entry: u8) -> [u8; 4] {
    let [r, g, b] = NES_PALETTE[(entry & 0x3F) as usize];
    [r, g, b, 0xFF]
}

/// RGBA frame buffer, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    pixels: Vec<u8>,
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Frame({}x{})", NES_WIDTH, NES_HEIGHT)
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame {
    /// A black, fully opaque frame.
    pub fn new() -> Self {
        let mut pixels = vec![0u8; NES_WIDTH * NES_HEIGHT * BYTES_PER_PIXEL];
        for px in pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            px[3] = 0xFF;
        }
        Self { pixels }
    }

    pub fn width(&self) -> usize {
        NES_WIDTH
    }

    pub fn height(&self) -> usize {
        NES_HEIGHT
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA at (x, y). Panics if out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * NES_WIDTH + x) * BYTES_PER_PIXEL;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    #[inline]
    fn put(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        let i = (y * NES_WIDTH + x) * BYTES_PER_PIXEL;
        self.pixels[i..i + BYTES_PER_PIXEL].copy_from_slice(&rgba);
    }

    fn fill(&mut self, rgba: [u8; 4]) {
        for px in self.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Write the frame as a PNG file.
    #[cfg(feature = "screenshot")]
    pub fn save_png<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), image::ImageError> {
        image::save_buffer(
            path,
            &self.pixels,
            NES_WIDTH as u32,
            NES_HEIGHT as u32,
            image::ExtendedColorType::Rgba8,
        )
    }
}

impl Ppu {
    /// Produce a new frame buffer from the current PPU RAM contents.
    pub(crate) fn render(&mut self) {
        let backdrop = palette_rgba(self.ram_byte(PALETTE_RAM));
        if self.mask & MASK_SHOW_BACKGROUND == 0 {
            self.frame_buffer.fill(backdrop);
            return;
        }

        let nametable = self.base_nametable_address();
        let pattern_base = self.background_pattern_address();
        let mut frame = std::mem::take(&mut self.frame_buffer);

        for tile_y in 0..NES_HEIGHT / 8 {
            for tile_x in 0..NES_WIDTH / 8 {
                let tile_id = self.ram_byte(nametable + (tile_y * 32 + tile_x) as u16);

                let attr_addr = nametable + ATTRIBUTE_OFFSET + ((tile_y / 4) * 8 + tile_x / 4) as u16;
                let quadrant = ((tile_y % 4) / 2) * 2 + (tile_x % 4) / 2;
                let palette_group = (self.ram_byte(attr_addr) >> (quadrant * 2)) & 0x03;

                for row in 0..8 {
                    let pattern = pattern_base + tile_id as u16 * 16 + row as u16;
                    let low = self.ram_byte(pattern);
                    let high = self.ram_byte(pattern + 8);

                    for bit in 0..8 {
                        let shift = 7 - bit;
                        let ci = (((high >> shift) & 1) << 1) | ((low >> shift) & 1);
                        let rgba = if ci == 0 {
                            backdrop
                        } else {
                            let pal = PALETTE_RAM + palette_group as u16 * 4 + ci as u16;
                            palette_rgba(self.ram_byte(pal))
                        };
                        frame.put(tile_x * 8 + bit, tile_y * 8 + row, rgba);
                    }
                }
            }
        }

        self.frame_buffer = frame;
    }
}
