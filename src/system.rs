//! Procedural system names and their packed 64-bit addresses.
//!
//! A system name extends a sector name with a boxel descriptor and a serial
//! number, e.g. `Hypuanaei KC-C d0` or `Tha Tha AB-C b4-23`:
//!
//! | part        | example | meaning                                   |
//! |-------------|---------|-------------------------------------------|
//! | region      | `Tha Tha` | sector name                             |
//! | `L1L2-L3`   | `AB-C`  | low three base-26 digits of the mid code  |
//! | size letter | `b`     | size class 0-7, rendered `a`-`h`          |
//! | `mid3-seq`  | `4-23`  | top mid digit and serial; `mid3` omitted when zero |
//!
//! The mid code packs the boxel coordinates; a boxel component must fit in
//! `7 - size_class` bits. Two packed address layouts exist and both are
//! supported here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::interleave::{pack7, unpack7};
use crate::names::SectorNames;
use crate::sector::SectorId;
use crate::{Error, Result};

/// Mid codes are 21-bit values, one bit triple per boxel axis.
pub const MID_LIMIT: u32 = 1 << 21;

/// Serial width in the modern layout; the legacy layout widens with size.
const MOD_SEQUENCE_BITS: u32 = 19;

/// Packed address bit layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressLayout {
    /// Lane-based layout: size class, then per-axis lanes fusing sector and
    /// boxel coordinates, then a serial whose width grows with size class.
    Legacy,
    /// Fixed-field layout: size class, sector coordinates, boxel
    /// coordinates, then a 19-bit serial.
    Mod,
}

/// A parsed procedural system name.
///
/// `region` is held lowercased; [`fmt::Display`] renders the canonical form
/// with the region title-cased and the descriptor letters upper-cased.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PgSystem {
    pub region: String,
    pub mid1a: u8,
    pub mid1b: u8,
    pub mid2: u8,
    pub size_class: u8,
    pub mid3: u32,
    pub sequence: u64,
}

impl PgSystem {
    /// Strict parse of a system name. The tail is scanned right to left:
    /// serial digits, an optional `-` plus mid3 digits, the size letter,
    /// then the ` L1L2-L3 ` descriptor; everything before that is the
    /// region. No surrounding whitespace is tolerated.
    pub fn parse(input: &str) -> Result<Self> {
        let bytes = input.as_bytes();
        let bad = || Error::NotSystemName(input.to_owned());

        let (sequence, mut i) = take_number(bytes, bytes.len()).ok_or_else(bad)?;
        let mut mid3 = 0u64;
        if i >= 2 && bytes[i - 1] == b'-' && bytes[i - 2].is_ascii_digit() {
            let (n, j) = take_number(bytes, i - 1).ok_or_else(bad)?;
            mid3 = n;
            i = j;
        }

        if i < 7 {
            return Err(bad());
        }
        i -= 1;
        let size = bytes[i].to_ascii_lowercase();
        if !(b'a'..=b'h').contains(&size) {
            return Err(bad());
        }
        let (l1, l2, l3) = (bytes[i - 5], bytes[i - 4], bytes[i - 2]);
        if bytes[i - 1] != b' '
            || bytes[i - 3] != b'-'
            || bytes[i - 6] != b' '
            || !l1.is_ascii_alphabetic()
            || !l2.is_ascii_alphabetic()
            || !l3.is_ascii_alphabetic()
        {
            return Err(bad());
        }
        let region = &input[..i - 6];
        if region.is_empty() || region.starts_with(' ') || region.ends_with(' ') {
            return Err(bad());
        }

        let system = PgSystem {
            region: region.to_ascii_lowercase(),
            mid1a: l1.to_ascii_lowercase() - b'a',
            mid1b: l2.to_ascii_lowercase() - b'a',
            mid2: l3.to_ascii_lowercase() - b'a',
            size_class: size - b'a',
            mid3: u32::try_from(mid3).map_err(|_| Error::OutOfRange { field: "mid3" })?,
            sequence,
        };
        if system.mid_checked().is_none() {
            return Err(Error::OutOfRange { field: "mid3" });
        }
        Ok(system)
    }

    /// The packed 21-bit mid code: four base-26 digits, low digit first.
    pub fn mid(&self) -> u32 {
        ((self.mid3 * 26 + u32::from(self.mid2)) * 26 + u32::from(self.mid1b)) * 26
            + u32::from(self.mid1a)
    }

    fn mid_checked(&self) -> Option<u32> {
        let mid = u64::from(self.mid3)
            .checked_mul(26)?
            .checked_add(u64::from(self.mid2))?
            .checked_mul(26)?
            .checked_add(u64::from(self.mid1b))?
            .checked_mul(26)?
            .checked_add(u64::from(self.mid1a))?;
        (mid < u64::from(MID_LIMIT)).then_some(mid as u32)
    }

    /// Boxel coordinates within the sector, one 7-bit field per axis.
    pub fn boxel(&self) -> (u32, u32, u32) {
        unpack7(self.mid())
    }

    /// Pack into a 64-bit address under the given layout. Fails when the
    /// region does not parse back to a sector or a field exceeds its width.
    pub fn to_address(&self, layout: AddressLayout) -> Result<u64> {
        let sector = SectorNames::shared()
            .sector_for(&self.region)
            .ok_or_else(|| Error::UnknownRegion(self.region.clone()))?;
        if self.size_class > 7 {
            return Err(Error::OutOfRange { field: "size_class" });
        }
        for (field, digit) in [
            ("mid1a", self.mid1a),
            ("mid1b", self.mid1b),
            ("mid2", self.mid2),
        ] {
            if digit > 25 {
                return Err(Error::OutOfRange { field });
            }
        }
        let mid = self
            .mid_checked()
            .ok_or(Error::OutOfRange { field: "mid3" })?;
        let c = u32::from(self.size_class);
        let (bx, by, bz) = unpack7(mid);
        let limit = 1u32 << (7 - c);
        if bx >= limit || by >= limit || bz >= limit {
            return Err(Error::OutOfRange { field: "boxel" });
        }
        match layout {
            AddressLayout::Legacy => {
                let bits = 19 + 3 * c;
                if self.sequence >> bits != 0 {
                    return Err(Error::OutOfRange { field: "sequence" });
                }
                let w = 14 - c;
                let lx = (u64::from(sector.x) << (7 - c)) | u64::from(bx);
                let ly = (u64::from(sector.y) << (7 - c)) | u64::from(by);
                let lz = (u64::from(sector.z) << (7 - c)) | u64::from(bz);
                Ok(u64::from(c)
                    | lz << 3
                    | ly << (3 + w)
                    | lx << (3 + 2 * w)
                    | self.sequence << (3 + 3 * w))
            }
            AddressLayout::Mod => {
                if self.sequence >> MOD_SEQUENCE_BITS != 0 {
                    return Err(Error::OutOfRange { field: "sequence" });
                }
                Ok(u64::from(c)
                    | u64::from(sector.x) << 3
                    | u64::from(sector.y) << 10
                    | u64::from(sector.z) << 17
                    | u64::from(bx) << 24
                    | u64::from(by) << 31
                    | u64::from(bz) << 38
                    | self.sequence << 45)
            }
        }
    }

    /// Unpack a 64-bit address under the given layout.
    pub fn from_address(addr: u64, layout: AddressLayout) -> Result<Self> {
        let c = (addr & 7) as u32;
        let (sector, bx, by, bz, sequence) = match layout {
            AddressLayout::Legacy => {
                let w = 14 - c;
                let lane = (1u64 << w) - 1;
                let lz = (addr >> 3) & lane;
                let ly = (addr >> (3 + w)) & lane;
                let lx = (addr >> (3 + 2 * w)) & lane;
                let sequence = addr >> (3 + 3 * w);
                let split = 7 - c;
                let bmask = (1u64 << split) - 1;
                let sector = SectorId::new(
                    (lx >> split) as u8,
                    (ly >> split) as u8,
                    (lz >> split) as u8,
                )?;
                (
                    sector,
                    (lx & bmask) as u32,
                    (ly & bmask) as u32,
                    (lz & bmask) as u32,
                    sequence,
                )
            }
            AddressLayout::Mod => {
                let field = |shift: u32, bits: u32| (addr >> shift) & ((1u64 << bits) - 1);
                let sector = SectorId::new(
                    field(3, 7) as u8,
                    field(10, 7) as u8,
                    field(17, 7) as u8,
                )?;
                let (bx, by, bz) = (
                    field(24, 7) as u32,
                    field(31, 7) as u32,
                    field(38, 7) as u32,
                );
                let limit = 1u32 << (7 - c);
                if bx >= limit || by >= limit || bz >= limit {
                    return Err(Error::BadAddress(format!(
                        "boxel exceeds size class {c} in {addr:#x}"
                    )));
                }
                (sector, bx, by, bz, addr >> 45)
            }
        };
        let region = SectorNames::shared()
            .name_for(sector)
            .ok_or_else(|| Error::UnnamedSector(sector.offset()))?;
        let mid = pack7(bx, by, bz);
        let mid1a = (mid % 26) as u8;
        let rest = mid / 26;
        let mid1b = (rest % 26) as u8;
        let rest = rest / 26;
        Ok(PgSystem {
            region,
            mid1a,
            mid1b,
            mid2: (rest % 26) as u8,
            size_class: c as u8,
            mid3: rest / 26,
            sequence,
        })
    }
}

impl FromStr for PgSystem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PgSystem::parse(s)
    }
}

/// Title-case each space-separated word of a lowercased procedural name.
pub(crate) fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, word) in name.split(' ').enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let mut chars = word.chars();
        if let Some(head) = chars.next() {
            out.push(head.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

impl fmt::Display for PgSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&title_case(&self.region))?;
        write!(
            f,
            " {}{}-{} {}",
            (b'A' + self.mid1a) as char,
            (b'A' + self.mid1b) as char,
            (b'A' + self.mid2) as char,
            (b'a' + self.size_class) as char,
        )?;
        if self.mid3 == 0 {
            write!(f, "{}", self.sequence)
        } else {
            write!(f, "{}-{}", self.mid3, self.sequence)
        }
    }
}

/// Longest run of trailing digits ending at `end`, at most ten of them.
/// Returns the value and the index of the first digit.
fn take_number(bytes: &[u8], end: usize) -> Option<(u64, usize)> {
    let mut start = end;
    while start > 0 && bytes[start - 1].is_ascii_digit() {
        start -= 1;
    }
    if start == end || end - start > 10 {
        return None;
    }
    let mut value = 0u64;
    for &b in &bytes[start..end] {
        value = value * 10 + u64::from(b - b'0');
    }
    Some((value, start))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sys(name: &str) -> PgSystem {
        PgSystem::parse(name).unwrap()
    }

    #[test]
    fn parses_short_tail() {
        let s = sys("Hypuanaei KC-C d0");
        assert_eq!(s.region, "hypuanaei");
        assert_eq!((s.mid1a, s.mid1b, s.mid2), (10, 2, 2));
        assert_eq!(s.size_class, 3);
        assert_eq!(s.mid3, 0);
        assert_eq!(s.sequence, 0);
        assert_eq!(s.mid(), 1414);
        assert_eq!(s.boxel(), (6, 11, 0));
    }

    #[test]
    fn parses_long_tail() {
        let s = sys("Tha Tha AB-C b4-23");
        assert_eq!(s.region, "tha tha");
        assert_eq!((s.mid1a, s.mid1b, s.mid2), (0, 1, 2));
        assert_eq!(s.size_class, 1);
        assert_eq!(s.mid3, 4);
        assert_eq!(s.sequence, 23);
        assert_eq!(s.mid(), 71_682);
        assert_eq!(s.boxel(), (2, 48, 4));
    }

    #[test]
    fn display_is_canonical() {
        assert_eq!(sys("hypuanaei kc-c D0").to_string(), "Hypuanaei KC-C d0");
        assert_eq!(sys("THA THA ab-c B4-23").to_string(), "Tha Tha AB-C b4-23");
    }

    #[test]
    fn rejects_malformed_names() {
        for bad in [
            "",
            "Hypuanaei",
            "Hypuanaei KC-C",
            "Hypuanaei KC-C i0",
            "Hypuanaei KCC d0",
            "Hypuanaei KC-C d",
            " Hypuanaei KC-C d0",
            "Hypuanaei KC-C d0 ",
            "KC-C d0",
        ] {
            assert!(
                matches!(PgSystem::parse(bad), Err(Error::NotSystemName(_))),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn rejects_oversized_mid3() {
        assert!(matches!(
            PgSystem::parse("Hypuanaei KC-C d120-0"),
            Err(Error::OutOfRange { field: "mid3" })
        ));
    }

    #[test]
    fn packs_legacy_addresses() {
        assert_eq!(
            sys("Hypuanaei KC-C d0")
                .to_address(AddressLayout::Legacy)
                .unwrap(),
            21_147_339_267
        );
        assert_eq!(
            sys("Tha Tha AB-C b4-23")
                .to_address(AddressLayout::Legacy)
                .unwrap(),
            101_156_146_642_977
        );
    }

    #[test]
    fn packs_mod_addresses() {
        assert_eq!(
            sys("Hypuanaei KC-C d0")
                .to_address(AddressLayout::Mod)
                .unwrap(),
            23_725_635_899
        );
        assert_eq!(
            sys("Tha Tha AB-C b4-23")
                .to_address(AddressLayout::Mod)
                .unwrap(),
            810_443_182_440_449
        );
    }

    #[test]
    fn unpacks_both_layouts() {
        let legacy = PgSystem::from_address(21_147_339_267, AddressLayout::Legacy).unwrap();
        assert_eq!(legacy.to_string(), "Hypuanaei KC-C d0");
        let modern = PgSystem::from_address(810_443_182_440_449, AddressLayout::Mod).unwrap();
        assert_eq!(modern.to_string(), "Tha Tha AB-C b4-23");
    }

    #[test]
    fn address_round_trips() {
        for name in ["Hypuanaei KC-C d0", "Tha Tha AB-C b4-23", "Plab AA-A a0"] {
            let s = sys(name);
            for layout in [AddressLayout::Legacy, AddressLayout::Mod] {
                let addr = s.to_address(layout).unwrap();
                let back = PgSystem::from_address(addr, layout).unwrap();
                assert_eq!(back, s, "{name} via {layout:?}");
            }
        }
    }

    #[test]
    fn boxel_must_fit_size_class() {
        // mid 25 -> boxel x 25, too wide once the size class needs 4 spare bits.
        let mut s = sys("Hypuanaei AA-A d0");
        s.mid1a = 25;
        assert!(matches!(
            s.to_address(AddressLayout::Mod),
            Err(Error::OutOfRange { field: "boxel" })
        ));
    }

    #[test]
    fn unknown_region_is_reported() {
        let s = sys("Blah Blah AB-C b0");
        assert!(matches!(
            s.to_address(AddressLayout::Mod),
            Err(Error::UnknownRegion(_))
        ));
    }

    #[test]
    fn sequence_width_depends_on_layout() {
        let mut s = sys("Hypuanaei KC-C d0");
        s.sequence = 1 << 20;
        assert!(s.to_address(AddressLayout::Legacy).is_ok());
        assert!(matches!(
            s.to_address(AddressLayout::Mod),
            Err(Error::OutOfRange { field: "sequence" })
        ));
    }
}
