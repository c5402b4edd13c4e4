#![doc = r#"
Console aggregate and driver entry points.

`Nes` owns the CPU and the bus (which in turn owns the PPU). All state is
reachable from one value; several instances can run side by side.

Driver loop
- `step_one_instruction` runs one CPU instruction and returns its cycles.
- `advance_graphics_timer` feeds those cycles to the PPU frame timer.
- `step` does both; `run_frame` repeats `step` until a frame completes;
  `execute` repeats `step` until the first error.
"#]

use log::debug;

use crate::bus::Bus;
use crate::cartridge::Cartridge;
use crate::config::EmulatorConfig;
use crate::cpu::{Cpu, CpuObserver, ObserverId};
use crate::error::EmuError;
use crate::ppu::{Frame, FrameTiming, Ppu};

/// Outcome of `Nes::run_frame`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub instructions: u64,
    pub cycles: u64,
    /// False if the instruction limit was reached before the frame ended.
    pub completed: bool,
}

/// Outcome of `Nes::execute`: what ran before the error that stopped it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionSummary {
    pub instructions: u64,
    pub cycles: u64,
    pub error: EmuError,
}

#[derive(Debug)]
pub struct Nes {
    cpu: Cpu,
    bus: Bus,
    config: EmulatorConfig,
}

impl Default for Nes {
    fn default() -> Self {
        Self::new(EmulatorConfig::default())
    }
}

impl Nes {
    /// A powered-on console with zeroed memory.
    pub fn new(config: EmulatorConfig) -> Self {
        Self {
            cpu: Cpu::new(),
            bus: Bus::with_timing(FrameTiming::from(config.region)),
            config,
        }
    }

    /// Return every component to power-on state: registers, memory, PPU
    /// latches and timers. Observers stay registered.
    pub fn initialize_hardware(&mut self) {
        self.bus.reset();
        self.cpu.power_on();
        debug!("hardware initialized ({:?})", self.config.region);
    }

    /// Map the cartridge's PRG ROM into the address space. Registers are not
    /// touched; PC stays at its power-on value.
    pub fn load_cartridge(&mut self, cart: &Cartridge) {
        self.bus.load_cartridge(cart);
    }

    /// Map the cartridge and start from its reset vector.
    pub fn insert_and_reset(&mut self, cart: &Cartridge) -> Result<(), EmuError> {
        self.load_cartridge(cart);
        self.cpu.reset(&mut self.bus)
    }

    pub fn step_one_instruction(&mut self) -> Result<u32, EmuError> {
        self.cpu.step(&mut self.bus)
    }

    /// Returns true if a frame completed.
    pub fn advance_graphics_timer(&mut self, cycles: u32) -> bool {
        self.bus.tick(cycles)
    }

    /// One instruction followed by the matching PPU advance.
    pub fn step(&mut self) -> Result<u32, EmuError> {
        let cycles = self.step_one_instruction()?;
        self.advance_graphics_timer(cycles);
        Ok(cycles)
    }

    /// Step until the PPU finishes a frame or the configured instruction
    /// limit is reached.
    pub fn run_frame(&mut self) -> Result<FrameReport, EmuError> {
        let mut report = FrameReport {
            instructions: 0,
            cycles: 0,
            completed: false,
        };
        while report.instructions < self.config.instructions_per_frame_limit as u64 {
            let cycles = self.step_one_instruction()?;
            report.instructions += 1;
            report.cycles += cycles as u64;
            if self.advance_graphics_timer(cycles) {
                report.completed = true;
                break;
            }
        }
        Ok(report)
    }

    /// Step until an instruction fails.
    pub fn execute(&mut self) -> ExecutionSummary {
        let mut instructions = 0u64;
        let mut cycles = 0u64;
        loop {
            match self.step() {
                Ok(c) => {
                    instructions += 1;
                    cycles += c as u64;
                }
                Err(error) => {
                    debug!("execution stopped after {instructions} instructions: {error}");
                    return ExecutionSummary {
                        instructions,
                        cycles,
                        error,
                    };
                }
            }
        }
    }

    // ---------------------------------------------------------------------
    // Observers
    // ---------------------------------------------------------------------

    pub fn add_observer<O>(&mut self, observer: O) -> ObserverId
    where
        O: CpuObserver + 'static,
    {
        self.cpu.add_observer(observer)
    }

    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.cpu.remove_observer(id)
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    pub fn ppu(&self) -> &Ppu {
        &self.bus.ppu
    }

    pub fn frame(&self) -> &Frame {
        self.bus.ppu.frame_buffer()
    }

    pub fn config(&self) -> &EmulatorConfig {
        &self.config
    }
}
