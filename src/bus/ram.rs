/*!
Internal RAM address reduction.

CPU address map for internal RAM:
- $0000-$07FF: 2 KiB internal RAM
- $0800-$1FFF: Mirrors of $0000-$07FF (reduce modulo 2048)

The bytes themselves live in the bus's flat memory array; this module only
knows which addresses belong to RAM and where each one lands.
*/

/// Size of CPU internal RAM (in bytes).
pub const CPU_RAM_SIZE: usize = 0x0800;

/// Last CPU address that decodes to internal RAM.
pub const CPU_RAM_END: u16 = 0x1FFF;

/// Stack page base ($0100-$01FF).
pub const STACK_BASE: u16 = 0x0100;

/// True if `addr` falls in the mirrored RAM window.
#[inline]
pub fn is_ram(addr: u16) -> bool {
    addr <= CPU_RAM_END
}

/// Physical RAM index for a CPU address using 2 KiB mirroring.
#[inline]
pub fn mirror_index(addr: u16) -> usize {
    addr as usize % CPU_RAM_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_bounds() {
        assert!(is_ram(0x0000));
        assert!(is_ram(0x1FFF));
        assert!(!is_ram(0x2000));
    }

    #[test]
    fn mirrors_reduce_to_the_same_index() {
        for base in [0x0000u16, 0x0001, 0x0173, 0x07FF] {
            let idx = mirror_index(base);
            assert_eq!(mirror_index(base + 0x0800), idx);
            assert_eq!(mirror_index(base + 0x1000), idx);
            assert_eq!(mirror_index(base + 0x1800), idx);
        }
    }
}
