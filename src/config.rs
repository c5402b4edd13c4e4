//! Emulator configuration.

/// Video region. Determines how many CPU cycles make up a frame and how long
/// the vertical blank lasts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// NTSC: 262 scanlines, 3 PPU dots per CPU cycle.
    #[default]
    Ntsc,
    /// PAL: 312 scanlines, 3.2 PPU dots per CPU cycle.
    Pal,
}

/// PPU dots per scanline, identical in both regions.
pub const DOTS_PER_SCANLINE: u32 = 341;

impl Region {
    /// Total scanlines per frame (visible, post-render, vblank, pre-render).
    #[must_use]
    pub const fn scanlines_per_frame(self) -> u32 {
        match self {
            Self::Ntsc => 262,
            Self::Pal => 312,
        }
    }

    /// Scanlines spent in vertical blank.
    #[must_use]
    pub const fn vblank_scanlines(self) -> u32 {
        match self {
            Self::Ntsc => 20,
            Self::Pal => 70,
        }
    }

    /// CPU cycles per frame, rounded up.
    ///
    /// NTSC is 341 * 262 / 3, PAL is 341 * 312 / 3.2.
    #[must_use]
    pub const fn cpu_cycles_per_frame(self) -> u32 {
        let dots = DOTS_PER_SCANLINE * self.scanlines_per_frame();
        match self {
            Self::Ntsc => dots.div_ceil(3),
            // 16 dots per 5 CPU cycles
            Self::Pal => (dots * 5).div_ceil(16),
        }
    }

    /// CPU cycles between vblank start and vblank end, rounded down.
    #[must_use]
    pub const fn vblank_cpu_cycles(self) -> u32 {
        let dots = DOTS_PER_SCANLINE * self.vblank_scanlines();
        match self {
            Self::Ntsc => dots / 3,
            Self::Pal => dots * 5 / 16,
        }
    }
}

/// Top-level configuration for an emulator instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmulatorConfig {
    /// Video region. Defaults to NTSC.
    pub region: Region,
    /// Upper bound on instructions `Nes::run_frame` executes before giving
    /// up on a frame boundary.
    pub instructions_per_frame_limit: usize,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            region: Region::Ntsc,
            instructions_per_frame_limit: 100_000,
        }
    }
}

impl EmulatorConfig {
    #[must_use]
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }
}
