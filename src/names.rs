//! Sector name codec.
//!
//! Forward direction turns a sector offset into a procedural name; reverse
//! direction parses a name back to the unique offset that produced it. The
//! classifier hash picks one of two grammars per offset:
//!
//! | class | shape                          | example      |
//! |-------|--------------------------------|--------------|
//! | C1    | one fused word, 3-4 fragments  | `hypuanaei`  |
//! | C2    | two words, prefix + suffix each| `thoi eults` |
//!
//! Both grammars alternate letter classes at every fragment boundary, which
//! is what makes the reverse parse unambiguous. A small tail of offsets falls
//! past the end of the last suffix list and has no name at all; callers get
//! `None` for those.

use std::collections::HashMap;

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use tracing::trace;

use crate::classify::is_c1;
use crate::fragment::Fragment;
use crate::interleave::{deinterleave2, interleave2};
use crate::sector::{SectorId, SECTOR_COUNT};
use crate::vocab::Vocabulary;

/// Bidirectional name codec with per-direction caches.
///
/// The forward cache remembers both outcomes, named and unnamed, keyed by
/// offset. The reverse cache is keyed by the lowercased input and only
/// remembers successful parses, so arbitrary garbage lookups cannot grow it.
pub struct SectorNames {
    vocab: &'static Vocabulary,
    forward: RwLock<HashMap<u32, Option<String>>>,
    reverse: RwLock<HashMap<String, SectorId>>,
}

impl SectorNames {
    pub fn new() -> Self {
        SectorNames {
            vocab: Vocabulary::shared(),
            forward: RwLock::new(HashMap::new()),
            reverse: RwLock::new(HashMap::new()),
        }
    }

    /// Process-wide codec instance backing the crate-level helpers.
    pub fn shared() -> &'static SectorNames {
        static SHARED: OnceCell<SectorNames> = OnceCell::new();
        SHARED.get_or_init(SectorNames::new)
    }

    /// Name for a sector, or `None` when the offset lands past the end of
    /// its grammar's capacity.
    pub fn name_for(&self, sector: SectorId) -> Option<String> {
        let offset = sector.offset();
        if let Some(hit) = self.forward.read().get(&offset) {
            return hit.clone();
        }
        trace!(offset, "forward miss, generating");
        let name = self.generate(offset);
        self.forward.write().insert(offset, name.clone());
        name
    }

    /// Parse a name back to its sector. Case-insensitive; spacing is strict.
    pub fn sector_for(&self, name: &str) -> Option<SectorId> {
        let key = name.to_ascii_lowercase();
        if let Some(&hit) = self.reverse.read().get(&key) {
            return Some(hit);
        }
        trace!(name = %key, "reverse miss, parsing");
        let offset = self.decode(&key)?;
        let sector = SectorId::from_offset(offset);
        self.reverse.write().insert(key, sector);
        Some(sector)
    }

    fn generate(&self, offset: u32) -> Option<String> {
        if is_c1(offset) {
            encode_c1(self.vocab, offset)
        } else {
            encode_c2(self.vocab, offset)
        }
    }

    fn decode(&self, name: &str) -> Option<u32> {
        let vocab = self.vocab;
        vocab.index.segment(name, &mut |words: &[Vec<Fragment>]| match words {
            [word] => decode_c1_word(vocab, word),
            [first, second] => decode_c2_words(vocab, first, second),
            _ => None,
        })
    }
}

impl Default for SectorNames {
    fn default() -> Self {
        SectorNames::new()
    }
}

fn encode_c1(vocab: &Vocabulary, offset: u32) -> Option<String> {
    let pt = &vocab.prefixes;
    let pslot = offset % pt.total();
    let rest = offset / pt.total();
    let pspan = pt.span_for_slot(pslot)?;
    let rp = pslot - pspan.start;
    let f1 = vocab.first_infix_family(pspan.text);
    let t1 = vocab.infixes(f1);
    let w = rest * pspan.run + rp;
    let islot = w % t1.total();
    let w2 = w / t1.total();
    let ispan = t1.span_for_slot(islot)?;
    let r1 = islot - ispan.start;
    let v = w2 * ispan.run + r1;

    let short = vocab.suffixes(vocab.c1_suffix_family(f1));
    if (v as usize) < short.len() {
        return Some(format!("{}{}{}", pspan.text, ispan.text, short[v as usize]));
    }

    // Spill into the four-fragment form: a second infix of the opposite
    // family absorbs the remainder.
    let vp = v - short.len() as u32;
    let f2 = f1.other();
    let t2 = vocab.infixes(f2);
    let jslot = vp % t2.total();
    let u = vp / t2.total();
    let jspan = t2.span_for_slot(jslot)?;
    let r2 = jslot - jspan.start;
    let s = u * jspan.run + r2;
    let long = vocab.suffixes(vocab.c1_suffix_family(f2));
    if (s as usize) < long.len() {
        Some(format!(
            "{}{}{}{}",
            pspan.text, ispan.text, jspan.text, long[s as usize]
        ))
    } else {
        None
    }
}

fn encode_c2(vocab: &Vocabulary, offset: u32) -> Option<String> {
    let (a, b) = deinterleave2(u64::from(offset));
    let first = c2_word(vocab, a)?;
    let second = c2_word(vocab, b)?;
    Some(format!("{first} {second}"))
}

/// One two-fragment word from an 11-bit sub-index.
fn c2_word(vocab: &Vocabulary, v: u32) -> Option<String> {
    let pspan = vocab.prefixes.span_for_slot(v)?;
    let q = (v - pspan.start) as usize;
    let list = vocab.suffixes(vocab.c2_suffix_family(pspan.text));
    if q < list.len() {
        Some(format!("{}{}", pspan.text, list[q]))
    } else {
        None
    }
}

fn decode_c1_word(vocab: &Vocabulary, frags: &[Fragment]) -> Option<u32> {
    let (p, i1, i2, sfx) = match frags {
        [p, i1, sfx] => (p, i1, None, sfx),
        [p, i1, i2, sfx] => (p, i1, Some(i2), sfx),
        _ => return None,
    };
    let pidx = p.prefix?;
    let (f1, i1idx) = i1.infix?;
    let (sf, sidx) = sfx.suffix?;
    if f1 != vocab.first_infix_family(p.text) {
        return None;
    }

    let v = match i2 {
        None => {
            if sf != vocab.c1_suffix_family(f1) {
                return None;
            }
            u32::from(sidx)
        }
        Some(i2) => {
            let (f2, i2idx) = i2.infix?;
            if f2 != f1.other() {
                return None;
            }
            if sf != vocab.c1_suffix_family(f2) {
                return None;
            }
            let t2 = vocab.infixes(f2);
            let jspan = t2.span(i2idx as usize);
            let r2 = u32::from(sidx) % jspan.run;
            let u = u32::from(sidx) / jspan.run;
            let jslot = jspan.start + r2;
            let vp = u * t2.total() + jslot;
            vp + vocab.suffixes(vocab.c1_suffix_family(f1)).len() as u32
        }
    };

    let t1 = vocab.infixes(f1);
    let ispan = t1.span(i1idx as usize);
    let r1 = v % ispan.run;
    let w2 = v / ispan.run;
    let islot = ispan.start + r1;
    let w = w2 * t1.total() + islot;

    let pspan = vocab.prefixes.span(pidx as usize);
    let rp = w % pspan.run;
    let rest = w / pspan.run;
    let pslot = pspan.start + rp;
    let offset = rest * vocab.prefixes.total() + pslot;
    if offset >= SECTOR_COUNT || !is_c1(offset) {
        return None;
    }
    Some(offset)
}

fn decode_c2_words(vocab: &Vocabulary, first: &[Fragment], second: &[Fragment]) -> Option<u32> {
    let (&[pa, sa], &[pb, sb]) = (first, second) else {
        return None;
    };
    let va = c2_subindex(vocab, pa, sa)?;
    let vb = c2_subindex(vocab, pb, sb)?;
    let offset = interleave2(va, vb);
    if offset >= u64::from(SECTOR_COUNT) {
        return None;
    }
    let offset = offset as u32;
    if is_c1(offset) {
        return None;
    }
    Some(offset)
}

fn c2_subindex(vocab: &Vocabulary, p: Fragment, sfx: Fragment) -> Option<u32> {
    let pidx = p.prefix?;
    let (family, idx) = sfx.suffix?;
    if family != vocab.c2_suffix_family(p.text) {
        return None;
    }
    let pspan = vocab.prefixes.span(pidx as usize);
    Some(pspan.start + u32::from(idx))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> SectorNames {
        SectorNames::new()
    }

    fn name_at(codec: &SectorNames, offset: u32) -> Option<String> {
        codec.name_for(SectorId::from_offset(offset))
    }

    #[test]
    fn known_names() {
        let c = codec();
        assert_eq!(name_at(&c, 0).as_deref(), Some("tha tha"));
        assert_eq!(name_at(&c, 1).as_deref(), Some("thobs"));
        assert_eq!(name_at(&c, 2).as_deref(), Some("thoc"));
        assert_eq!(name_at(&c, 42).as_deref(), Some("thed"));
        assert_eq!(name_at(&c, 1000).as_deref(), Some("plab"));
        assert_eq!(name_at(&c, 42_527).as_deref(), Some("thoi eults"));
        assert_eq!(name_at(&c, 331_559).as_deref(), Some("hypuanaei"));
        assert_eq!(name_at(&c, 1_048_576).as_deref(), Some("thofu"));
    }

    #[test]
    fn unnamed_offsets() {
        let c = codec();
        assert_eq!(name_at(&c, 2_097_151), None);
        assert_eq!(name_at(&c, 1_640_710), None);
        assert_eq!(name_at(&c, 1_640_727), None);
        assert_eq!(name_at(&c, 1_640_728), None);
    }

    #[test]
    fn known_decodes() {
        let c = codec();
        assert_eq!(c.sector_for("aimbogs"), Some(SectorId::from_offset(107_549)));
        assert_eq!(c.sector_for("aimbuu"), Some(SectorId::from_offset(64_356)));
        assert_eq!(
            c.sector_for("hypuanaei"),
            Some(SectorId::from_offset(331_559))
        );
        assert_eq!(c.sector_for("tha tha"), Some(SectorId::from_offset(0)));
    }

    #[test]
    fn decode_is_case_insensitive() {
        let c = codec();
        assert_eq!(c.sector_for("Tha Tha"), Some(SectorId::from_offset(0)));
        assert_eq!(c.sector_for("THOBS"), Some(SectorId::from_offset(1)));
        assert_eq!(c.sector_for("Hypuanaei"), Some(SectorId::from_offset(331_559)));
    }

    #[test]
    fn decode_rejects_garbage() {
        let c = codec();
        assert_eq!(c.sector_for(""), None);
        assert_eq!(c.sector_for("xyzzy"), None);
        assert_eq!(c.sector_for("tha  tha"), None);
        assert_eq!(c.sector_for(" tha tha"), None);
        assert_eq!(c.sector_for("tha tha "), None);
        assert_eq!(c.sector_for("tha tha tha"), None);
    }

    #[test]
    fn round_trip_low_range() {
        let c = codec();
        for offset in 0..20_000u32 {
            if let Some(name) = name_at(&c, offset) {
                let back = c.sector_for(&name);
                assert_eq!(back, Some(SectorId::from_offset(offset)), "{name}");
            }
        }
    }

    #[test]
    fn round_trip_scattered_high_range() {
        let c = codec();
        let mut offset = 20_000u32;
        while offset < SECTOR_COUNT {
            if let Some(name) = name_at(&c, offset) {
                let back = c.sector_for(&name);
                assert_eq!(back, Some(SectorId::from_offset(offset)), "{name}");
            }
            offset += 977;
        }
    }

    #[test]
    fn caches_are_stable() {
        let c = codec();
        let first = name_at(&c, 331_559);
        let second = name_at(&c, 331_559);
        assert_eq!(first, second);
        assert_eq!(c.sector_for("thobs"), c.sector_for("thobs"));
    }
}
