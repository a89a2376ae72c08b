//! # pgnames
//!
//! Deterministic bidirectional codec between 3D sector-grid coordinates,
//! procedurally generated names, and packed 64-bit system addresses.
//!
//! ## Quick Start
//! ```rust,ignore
//! use pgnames::{name_for, sector_for, AddressLayout, PgSystem, SectorId};
//!
//! // Sector coordinates to a name and back
//! let sector = SectorId::new(39, 30, 20)?;
//! let name = name_for(sector);                    // Some("hypuanaei")
//! let back = sector_for("Hypuanaei");             // Some(sector)
//!
//! // Full system names carry a boxel descriptor and serial
//! let sys = PgSystem::parse("Hypuanaei KC-C d0")?;
//! let addr = sys.to_address(AddressLayout::Legacy)?;
//! let again = PgSystem::from_address(addr, AddressLayout::Legacy)?;
//! assert_eq!(again.to_string(), "Hypuanaei KC-C d0");
//! ```
//!
//! ## Architecture
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          PGNAMES                             │
//! ├──────────────────────────────────────────────────────────────┤
//! │  sector     128³ grid, 21-bit linear offsets                 │
//! │  classify   integer hash picking one of two name grammars    │
//! │  vocab      fragment lists + run tables (shared, lazy-built) │
//! │  fragment   longest-first backtracking segmenter             │
//! │  names      offset <-> name codec with per-direction caches  │
//! │  system     system names, descriptors, packed 64-bit layouts │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod classify;
pub mod fragment;
pub mod interleave;
pub mod names;
pub mod sector;
pub mod system;
pub mod vocab;

pub use names::SectorNames;
pub use sector::{SectorId, GRID_SIZE, SECTOR_COUNT};
pub use system::{AddressLayout, PgSystem, MID_LIMIT};
pub use vocab::Vocabulary;

// === Error types ===

/// Crate-level error type
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("not a procedural system name: {0:?}")]
    NotSystemName(String),

    #[error("no sector decodes from region name {0:?}")]
    UnknownRegion(String),

    #[error("sector offset {0} has no procedural name")]
    UnnamedSector(u32),

    #[error("{field} out of range")]
    OutOfRange { field: &'static str },

    #[error("bad address: {0}")]
    BadAddress(String),
}

pub type Result<T> = std::result::Result<T, Error>;

// === Constants ===

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// === Crate-level helpers on the shared codec ===

/// Procedural name for a sector, or `None` for the unnamed tail.
pub fn name_for(sector: SectorId) -> Option<String> {
    SectorNames::shared().name_for(sector)
}

/// Sector for a procedural name. Case-insensitive, spacing strict.
pub fn sector_for(name: &str) -> Option<SectorId> {
    SectorNames::shared().sector_for(name)
}

/// Canonical rendering of a procedural name, system or bare sector: the
/// region title-cased, descriptor letters upper-cased, size letter
/// lower-cased. `None` unless the input is a system name whose region
/// decodes to a sector, or a sector name on its own.
pub fn canonical_name(name: &str) -> Option<String> {
    if let Ok(sys) = PgSystem::parse(name) {
        sector_for(&sys.region)?;
        return Some(sys.to_string());
    }
    let sector = sector_for(name)?;
    name_for(sector).map(|n| system::title_case(&n))
}

/// Whether `name` is a procedurally generated name. Strict mode demands a
/// full system name with a decodable region; lenient mode also accepts a
/// bare sector name or a system name whose region is unknown.
pub fn is_valid_name(name: &str, strict: bool) -> bool {
    if strict {
        PgSystem::parse(name)
            .is_ok_and(|sys| sector_for(&sys.region).is_some())
    } else {
        PgSystem::parse(name).is_ok() || sector_for(name).is_some()
    }
}

/// Render a packed address the way API payloads carry it: decimal text.
pub fn format_address(addr: u64) -> String {
    addr.to_string()
}

/// Parse a decimal address payload back to the packed integer.
pub fn parse_address(text: &str) -> Result<u64> {
    text.parse().map_err(|_| Error::BadAddress(text.to_owned()))
}

/// Canonical system name for a packed address.
pub fn system_name_for_address(addr: u64, layout: AddressLayout) -> Result<String> {
    Ok(PgSystem::from_address(addr, layout)?.to_string())
}

/// Pack a system name into a 64-bit address.
pub fn address_for_name(name: &str, layout: AddressLayout) -> Result<u64> {
    PgSystem::parse(name)?.to_address(layout)
}
