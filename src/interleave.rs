//! Morton-order bit interleaving and 7-bit lane packing.
//!
//! Everything here is fixed-width 64-bit integer arithmetic. Intermediate
//! system-address values reach past 2^42, so no step may round-trip through
//! a narrower type.

/// Spread the low 32 bits of `v` so that bit `i` lands at bit `2i`.
#[inline]
fn spread(v: u32) -> u64 {
    let mut x = v as u64;
    x = (x | (x << 16)) & 0x0000_ffff_0000_ffff;
    x = (x | (x << 8)) & 0x00ff_00ff_00ff_00ff;
    x = (x | (x << 4)) & 0x0f0f_0f0f_0f0f_0f0f;
    x = (x | (x << 2)) & 0x3333_3333_3333_3333;
    x = (x | (x << 1)) & 0x5555_5555_5555_5555;
    x
}

/// Inverse of [`spread`]: collect every second bit back into 32 bits.
#[inline]
fn compact(v: u64) -> u32 {
    let mut x = v & 0x5555_5555_5555_5555;
    x = (x | (x >> 1)) & 0x3333_3333_3333_3333;
    x = (x | (x >> 2)) & 0x0f0f_0f0f_0f0f_0f0f;
    x = (x | (x >> 4)) & 0x00ff_00ff_00ff_00ff;
    x = (x | (x >> 8)) & 0x0000_ffff_0000_ffff;
    x = (x | (x >> 16)) & 0x0000_0000_ffff_ffff;
    x as u32
}

/// Interleave two values: bit `i` of `a` at position `2i`, bit `i` of `b`
/// at position `2i + 1`.
#[inline]
pub fn interleave2(a: u32, b: u32) -> u64 {
    spread(a) | (spread(b) << 1)
}

/// Exact inverse of [`interleave2`].
#[inline]
pub fn deinterleave2(v: u64) -> (u32, u32) {
    (compact(v), compact(v >> 1))
}

/// Pack three 7-bit lanes: `x | y<<7 | z<<14`.
#[inline]
pub fn pack7(x: u32, y: u32, z: u32) -> u32 {
    (x & 0x7f) | (y & 0x7f) << 7 | (z & 0x7f) << 14
}

/// Split a packed value back into its three 7-bit lanes.
#[inline]
pub fn unpack7(v: u32) -> (u32, u32, u32) {
    (v & 0x7f, (v >> 7) & 0x7f, (v >> 14) & 0x7f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleave2_known_values() {
        assert_eq!(interleave2(0, 0), 0);
        assert_eq!(interleave2(1, 0), 0b01);
        assert_eq!(interleave2(0, 1), 0b10);
        assert_eq!(interleave2(0b11, 0b11), 0b1111);
        assert_eq!(interleave2(0b101, 0b010), 0b011001);
        assert_eq!(interleave2(u32::MAX, 0), 0x5555_5555_5555_5555);
    }

    #[test]
    fn interleave2_round_trip() {
        for &(a, b) in &[
            (0u32, 0u32),
            (1, 2),
            (0x7ff, 0x3ff),
            (12345, 54321),
            (u32::MAX, u32::MAX),
            (0xdead_beef, 0x1234_5678),
        ] {
            assert_eq!(deinterleave2(interleave2(a, b)), (a, b));
        }
    }

    #[test]
    fn deinterleave2_splits_21_bit_offsets() {
        // A 21-bit offset splits into an 11-bit even half and a 10-bit odd half.
        let (a, b) = deinterleave2((1 << 21) - 1);
        assert_eq!(a, (1 << 11) - 1);
        assert_eq!(b, (1 << 10) - 1);
    }

    #[test]
    fn pack7_round_trip() {
        for &(x, y, z) in &[(0u32, 0u32, 0u32), (39, 30, 20), (127, 127, 127)] {
            assert_eq!(unpack7(pack7(x, y, z)), (x, y, z));
        }
        assert_eq!(pack7(39, 30, 20), 331_559);
    }

    #[test]
    fn wide_intermediate_values_survive() {
        // Interleaving two 21-bit values exercises bits past the 2^32 line.
        let v = interleave2((1 << 21) - 1, (1 << 21) - 1);
        assert_eq!(v, (1u64 << 42) - 1);
        assert_eq!(deinterleave2(v), ((1 << 21) - 1, (1 << 21) - 1));
    }
}
