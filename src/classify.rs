//! Sector grammar classifier.
//!
//! A 32-bit avalanche mix over the sector's linear offset decides which of
//! the two naming grammars applies. The constants are load-bearing: change
//! one bit and every name past the divergence point changes with it.

/// Bob Jenkins' 32-bit integer hash (six add/xor-shift rounds).
///
/// All arithmetic wraps mod 2^32.
#[inline]
pub(crate) fn mix32(v: u32) -> u32 {
    let mut h = v;
    h = h.wrapping_add(0x7ed5_5d16).wrapping_add(h << 12);
    h = (h ^ 0xc761_c23c) ^ (h >> 19);
    h = h.wrapping_add(0x1656_67b1).wrapping_add(h << 5);
    h = h.wrapping_add(0xd3a2_646c) ^ (h << 9);
    h = h.wrapping_add(0xfd70_46c5).wrapping_add(h << 3);
    h = (h ^ 0xb55a_4f09) ^ (h >> 16);
    h
}

/// True if the sector at `offset` uses the C1 grammar (single fused word),
/// false for C2 (two prefix+suffix word pairs).
#[inline]
pub fn is_c1(offset: u32) -> bool {
    mix32(offset) & 1 == 0
}
