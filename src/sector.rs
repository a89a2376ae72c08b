//! `SectorId` — one cell of the 128×128×128 galactic sector grid.
//!
//! Canonical linear offset: `x + y·128 + z·16384` (21 bits).

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Number of sectors along each grid axis.
pub const GRID_SIZE: u32 = 128;

/// Bit width of one coordinate component.
pub const COMPONENT_BITS: u32 = 7;

/// Total number of sector cells (2^21).
pub const SECTOR_COUNT: u32 = 1 << (3 * COMPONENT_BITS);

/// A sector-grid coordinate. Each component is in `0..128`.
///
/// Ordering and equality follow the canonical linear offset, so sectors
/// sort x-fastest, then y, then z.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectorId {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl SectorId {
    /// Create a sector id, rejecting components outside the grid.
    pub fn new(x: u8, y: u8, z: u8) -> Result<Self> {
        if x >= GRID_SIZE as u8 || y >= GRID_SIZE as u8 || z >= GRID_SIZE as u8 {
            return Err(Error::OutOfRange {
                field: "sector component",
            });
        }
        Ok(SectorId { x, y, z })
    }

    /// Recover a sector from a linear offset. Only the low 21 bits are used.
    pub fn from_offset(offset: u32) -> Self {
        SectorId {
            x: (offset & 0x7f) as u8,
            y: ((offset >> 7) & 0x7f) as u8,
            z: ((offset >> 14) & 0x7f) as u8,
        }
    }

    /// Canonical linear offset: `x + y·128 + z·16384`.
    pub fn offset(&self) -> u32 {
        self.x as u32 | (self.y as u32) << 7 | (self.z as u32) << 14
    }
}

impl PartialOrd for SectorId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SectorId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.offset().cmp(&other.offset())
    }
}
