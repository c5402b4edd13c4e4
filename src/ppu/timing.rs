#![doc = r#"
PPU frame timer

Responsibilities
- Accumulate CPU cycles reported by the driver.
- At each frame boundary: render, bump the frame counter, raise vblank and
  start the vblank countdown.
- Drop vblank once the countdown expires, whether or not software already
  acknowledged it through the status port.
"#]

use log::debug;

use super::Ppu;
use crate::config::Region;

/// Frame-level thresholds in CPU cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTiming {
    pub cycles_per_frame: u32,
    pub vblank_cycles: u32,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::from(Region::default())
    }
}

impl From<Region> for FrameTiming {
    fn from(region: Region) -> Self {
        Self {
            cycles_per_frame: region.cpu_cycles_per_frame(),
            vblank_cycles: region.vblank_cpu_cycles(),
        }
    }
}

impl Ppu {
    /// Advance the frame timer by `cpu_cycles`.
    ///
    /// The frame counter restarts at zero on the boundary; cycles past it are
    /// dropped. At most one frame completes per call.
    pub fn advance(&mut self, cpu_cycles: u32) {
        if let Some(elapsed) = self.vblank_elapsed.as_mut() {
            *elapsed = elapsed.saturating_add(cpu_cycles);
            if *elapsed >= self.timing.vblank_cycles {
                self.vblank_elapsed = None;
                self.set_vblank(false);
            }
        }

        self.cycle = self.cycle.saturating_add(cpu_cycles);
        if self.cycle >= self.timing.cycles_per_frame {
            self.cycle = 0;
            self.render();
            self.frame += 1;
            self.frame_complete = true;
            self.set_vblank(true);
            self.vblank_elapsed = Some(0);
            debug!("frame {} complete, entering vblank", self.frame);
        }
    }

    pub fn timing(&self) -> FrameTiming {
        self.timing
    }

    /// CPU cycles into the current frame.
    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    /// Number of completed frames.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::PpuRegister;

    fn small() -> Ppu {
        Ppu::new(FrameTiming {
            cycles_per_frame: 100,
            vblank_cycles: 20,
        })
    }

    #[test]
    fn frame_boundary_sets_vblank_and_counts() {
        let mut p = small();
        p.advance(20); // power-on vblank expires
        assert!(!p.vblank());
        p.advance(79);
        assert_eq!(p.frame_count(), 0);
        assert!(!p.vblank());

        p.advance(1);
        assert_eq!(p.frame_count(), 1);
        assert_eq!(p.cycle(), 0);
        assert!(p.vblank());
        assert!(p.take_frame_complete());
        assert!(!p.take_frame_complete());
    }

    #[test]
    fn overshoot_restarts_frame_at_zero() {
        let mut p = small();
        p.advance(99);
        p.advance(7);
        assert_eq!(p.frame_count(), 1);
        assert_eq!(p.cycle(), 0);

        // the next frame needs a full period again
        p.advance(99);
        assert_eq!(p.frame_count(), 1);
        p.advance(1);
        assert_eq!(p.frame_count(), 2);
    }

    #[test]
    fn vblank_expires_after_duration() {
        let mut p = small();
        p.advance(100);
        assert!(p.vblank());
        p.advance(19);
        assert!(p.vblank());
        p.advance(1);
        assert!(!p.vblank());
    }

    #[test]
    fn vblank_expiry_is_independent_of_status_reads() {
        let mut p = small();
        p.advance(100);
        p.read_register(PpuRegister::Status).unwrap();
        assert!(!p.vblank());
        p.advance(25);
        assert!(!p.vblank());
        // next frame raises it again
        p.advance(75);
        assert_eq!(p.frame_count(), 2);
        assert!(p.vblank());
    }

    #[test]
    fn region_thresholds() {
        let t = FrameTiming::from(Region::Ntsc);
        assert_eq!(t.cycles_per_frame, 29_781);
        assert_eq!(t.vblank_cycles, 2_273);
        assert_eq!(FrameTiming::default(), t);
    }
}
