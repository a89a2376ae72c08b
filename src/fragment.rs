//! Fragment descriptors and the parse index.
//!
//! One text can play several roles at once ("ae" is a prefix, an infix, and
//! a suffix), so the index is built by aggregating role flags per text and
//! finalizing once into read-only descriptors. The finished index is sorted
//! longest-text-first so greedy matching never takes a short fragment when a
//! longer one fits.

use std::collections::HashMap;

use crate::vocab::{tables, InfixFamily, SuffixFamily};

/// A deduplicated vocabulary entry with all of its role memberships.
#[derive(Clone, Copy, Debug)]
pub struct Fragment {
    pub text: &'static str,
    /// Index into the prefix list.
    pub prefix: Option<u16>,
    /// Infix family and index within that family's list.
    pub infix: Option<(InfixFamily, u16)>,
    /// Suffix family and index within that family's list.
    pub suffix: Option<(SuffixFamily, u16)>,
}

impl Fragment {
    fn new(text: &'static str) -> Self {
        Fragment {
            text,
            prefix: None,
            infix: None,
            suffix: None,
        }
    }
}

/// Longest-match parse index over every vocabulary fragment.
#[derive(Debug)]
pub struct FragmentIndex {
    frags: Vec<Fragment>,
}

/// Inputs longer than this are never names; cuts off degenerate searches.
const MAX_INPUT: usize = 64;

/// Backtracking budget for the segmentation search.
const MAX_STEPS: u32 = 4096;

/// A name never holds more than four fragments per word, two words.
const MAX_FRAGMENTS: usize = 8;

impl FragmentIndex {
    /// Aggregate role flags across all five lists, then finalize.
    pub fn build() -> Self {
        fn entry<'m>(
            map: &'m mut HashMap<&'static str, Fragment>,
            text: &'static str,
        ) -> &'m mut Fragment {
            map.entry(text).or_insert_with(|| Fragment::new(text))
        }

        let mut by_text: HashMap<&'static str, Fragment> = HashMap::new();
        for (i, &t) in tables::PREFIXES.iter().enumerate() {
            entry(&mut by_text, t).prefix = Some(i as u16);
        }
        for (i, &t) in tables::INFIXES_VOWEL.iter().enumerate() {
            let f = entry(&mut by_text, t);
            debug_assert!(f.infix.is_none());
            f.infix = Some((InfixFamily::Vowel, i as u16));
        }
        for (i, &t) in tables::INFIXES_CONSONANT.iter().enumerate() {
            let f = entry(&mut by_text, t);
            debug_assert!(f.infix.is_none());
            f.infix = Some((InfixFamily::Consonant, i as u16));
        }
        for (i, &t) in tables::SUFFIXES_1.iter().enumerate() {
            let f = entry(&mut by_text, t);
            debug_assert!(f.suffix.is_none());
            f.suffix = Some((SuffixFamily::One, i as u16));
        }
        for (i, &t) in tables::SUFFIXES_2.iter().enumerate() {
            let f = entry(&mut by_text, t);
            debug_assert!(f.suffix.is_none());
            f.suffix = Some((SuffixFamily::Two, i as u16));
        }
        let mut frags: Vec<Fragment> = by_text.into_values().collect();
        frags.sort_by(|a, b| b.text.len().cmp(&a.text.len()).then(a.text.cmp(b.text)));
        FragmentIndex { frags }
    }

    pub fn len(&self) -> usize {
        self.frags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frags.is_empty()
    }

    /// Segment `input` into words of fragments and hand each complete
    /// segmentation to `classify`, longest fragments first, until one is
    /// accepted. Word-initial positions only match prefix-role fragments;
    /// word-internal positions only infix/suffix roles.
    pub fn segment<T>(
        &self,
        input: &str,
        classify: &mut dyn FnMut(&[Vec<Fragment>]) -> Option<T>,
    ) -> Option<T> {
        let lower = input.to_ascii_lowercase();
        let bytes = lower.as_bytes();
        if bytes.is_empty() || bytes.len() > MAX_INPUT {
            return None;
        }
        let mut words: Vec<Vec<Fragment>> = vec![Vec::new()];
        let mut steps = 0u32;
        self.walk(bytes, 0, &mut words, &mut steps, classify)
    }

    fn walk<T>(
        &self,
        s: &[u8],
        pos: usize,
        words: &mut Vec<Vec<Fragment>>,
        steps: &mut u32,
        classify: &mut dyn FnMut(&[Vec<Fragment>]) -> Option<T>,
    ) -> Option<T> {
        if *steps >= MAX_STEPS {
            return None;
        }
        if pos == s.len() {
            return classify(words);
        }
        if s[pos] == b' ' {
            // No leading, trailing, or doubled spaces.
            if words.last().map_or(true, Vec::is_empty) || pos + 1 == s.len() {
                return None;
            }
            words.push(Vec::new());
            let got = self.walk(s, pos + 1, words, steps, classify);
            if got.is_some() {
                return got;
            }
            words.pop();
            return None;
        }
        if words.iter().map(Vec::len).sum::<usize>() >= MAX_FRAGMENTS {
            return None;
        }
        let word_start = words.last().map_or(true, Vec::is_empty);
        for frag in &self.frags {
            if !s[pos..].starts_with(frag.text.as_bytes()) {
                continue;
            }
            if word_start && frag.prefix.is_none() {
                continue;
            }
            if !word_start && frag.infix.is_none() && frag.suffix.is_none() {
                continue;
            }
            *steps += 1;
            if let Some(word) = words.last_mut() {
                word.push(*frag);
            }
            let got = self.walk(s, pos + frag.text.len(), words, steps, classify);
            if got.is_some() {
                return got;
            }
            if let Some(word) = words.last_mut() {
                word.pop();
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> FragmentIndex {
        FragmentIndex::build()
    }

    #[test]
    fn multi_role_fragments_keep_all_roles() {
        let ix = index();
        let ae = ix.frags.iter().find(|f| f.text == "ae").unwrap();
        assert!(ae.prefix.is_some());
        assert_eq!(ae.infix.map(|(f, _)| f), Some(InfixFamily::Vowel));
        assert_eq!(ae.suffix.map(|(f, _)| f), Some(SuffixFamily::One));
        let th = ix.frags.iter().find(|f| f.text == "th").unwrap();
        assert!(th.prefix.is_some());
        assert_eq!(th.infix.map(|(f, _)| f), Some(InfixFamily::Consonant));
        assert_eq!(th.suffix.map(|(f, _)| f), Some(SuffixFamily::Two));
    }

    #[test]
    fn sorted_longest_first() {
        let ix = index();
        for pair in ix.frags.windows(2) {
            assert!(pair[0].text.len() >= pair[1].text.len());
            if pair[0].text.len() == pair[1].text.len() {
                assert!(pair[0].text < pair[1].text);
            }
        }
    }

    #[test]
    fn segments_a_fused_word() {
        let ix = index();
        let got = ix.segment("thobs", &mut |words: &[Vec<Fragment>]| {
            if words.len() == 1 && words[0].len() == 3 {
                Some(words[0].iter().map(|f| f.text).collect::<Vec<_>>())
            } else {
                None
            }
        });
        assert_eq!(got, Some(vec!["th", "o", "bs"]));
    }

    #[test]
    fn segments_word_pairs() {
        let ix = index();
        let got = ix.segment("tha tha", &mut |words: &[Vec<Fragment>]| {
            if words.len() == 2 {
                Some(words.iter().map(|w| w.len()).collect::<Vec<_>>())
            } else {
                None
            }
        });
        assert_eq!(got, Some(vec![2, 2]));
    }

    #[test]
    fn rejects_stray_spaces() {
        let ix = index();
        assert_eq!(ix.segment(" tha", &mut |_| Some(())), None);
        assert_eq!(ix.segment("tha ", &mut |_| Some(())), None);
        assert_eq!(ix.segment("tha  tha", &mut |_| Some(())), None);
    }

    #[test]
    fn rejects_unmatchable_text() {
        let ix = index();
        assert_eq!(ix.segment("qqqq1", &mut |_| Some(())), None);
        assert_eq!(ix.segment("", &mut |_| Some(())), None);
    }
}
