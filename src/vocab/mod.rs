//! The immutable vocabulary value: fragment lists, run-length offset
//! tables, and the parse index, built exactly once per process.

pub mod tables;

use std::collections::HashSet;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::fragment::FragmentIndex;

/// Which infix list a fragment belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InfixFamily {
    Vowel,
    Consonant,
}

impl InfixFamily {
    pub fn other(self) -> Self {
        match self {
            InfixFamily::Vowel => InfixFamily::Consonant,
            InfixFamily::Consonant => InfixFamily::Vowel,
        }
    }
}

/// Which suffix list a fragment belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SuffixFamily {
    One,
    Two,
}

/// One fragment's slice of a family's combined numbering space.
#[derive(Clone, Copy, Debug)]
pub struct RunSpan {
    pub text: &'static str,
    /// Consecutive numbering slots this fragment occupies.
    pub run: u32,
    /// Cumulative offset of the first slot.
    pub start: u32,
}

/// Run-length offset table for one numbering family.
#[derive(Debug)]
pub struct RunTable {
    spans: Vec<RunSpan>,
    total: u32,
}

impl RunTable {
    fn build(frags: &[&'static str], default: u32, overrides: &[(&str, u32)]) -> Self {
        let mut spans = Vec::with_capacity(frags.len());
        let mut start = 0u32;
        for &text in frags {
            let run = overrides
                .iter()
                .find(|(t, _)| *t == text)
                .map(|&(_, r)| r)
                .unwrap_or(default);
            spans.push(RunSpan { text, run, start });
            start += run;
        }
        RunTable {
            spans,
            total: start,
        }
    }

    /// Sum of all run lengths in this family.
    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// The span at a list index.
    pub fn span(&self, index: usize) -> &RunSpan {
        &self.spans[index]
    }

    /// The span whose run contains `slot`, or `None` past the family total.
    pub fn span_for_slot(&self, slot: u32) -> Option<&RunSpan> {
        if slot >= self.total {
            return None;
        }
        let idx = self.spans.partition_point(|s| s.start <= slot);
        Some(&self.spans[idx - 1])
    }
}

/// The complete, immutable vocabulary. Built once; every codec operation
/// borrows it.
#[derive(Debug)]
pub struct Vocabulary {
    pub prefixes: RunTable,
    pub infixes_vowel: RunTable,
    pub infixes_consonant: RunTable,
    pub suffixes_1: &'static [&'static str],
    pub suffixes_2: &'static [&'static str],
    alt_infix: HashSet<&'static str>,
    alt_suffix: HashSet<&'static str>,
    pub index: FragmentIndex,
}

static SHARED: OnceCell<Vocabulary> = OnceCell::new();

impl Vocabulary {
    /// Build an owned vocabulary from the compiled-in tables.
    pub fn build() -> Self {
        let prefixes = RunTable::build(
            tables::PREFIXES,
            tables::PREFIX_RUN_DEFAULT,
            tables::PREFIX_RUN_OVERRIDES,
        );
        let infixes_vowel = RunTable::build(
            tables::INFIXES_VOWEL,
            tables::INFIX_VOWEL_RUN_DEFAULT,
            tables::INFIX_RUN_OVERRIDES,
        );
        let infixes_consonant = RunTable::build(
            tables::INFIXES_CONSONANT,
            tables::INFIX_CONSONANT_RUN_DEFAULT,
            tables::INFIX_RUN_OVERRIDES,
        );
        let index = FragmentIndex::build();
        debug!(
            prefixes = prefixes.len(),
            prefix_total = prefixes.total(),
            infix_vowel_total = infixes_vowel.total(),
            infix_consonant_total = infixes_consonant.total(),
            fragments = index.len(),
            "vocabulary built"
        );
        Vocabulary {
            prefixes,
            infixes_vowel,
            infixes_consonant,
            suffixes_1: tables::SUFFIXES_1,
            suffixes_2: tables::SUFFIXES_2,
            alt_infix: tables::ALT_INFIX_PREFIXES.iter().copied().collect(),
            alt_suffix: tables::ALT_SUFFIX_PREFIXES.iter().copied().collect(),
            index,
        }
    }

    /// The process-wide vocabulary, built on first use. Initialization
    /// completes fully before any caller proceeds.
    pub fn shared() -> &'static Vocabulary {
        SHARED.get_or_init(Vocabulary::build)
    }

    /// Infix table for a family.
    pub fn infixes(&self, family: InfixFamily) -> &RunTable {
        match family {
            InfixFamily::Vowel => &self.infixes_vowel,
            InfixFamily::Consonant => &self.infixes_consonant,
        }
    }

    /// Suffix list for a family.
    pub fn suffixes(&self, family: SuffixFamily) -> &'static [&'static str] {
        match family {
            SuffixFamily::One => self.suffixes_1,
            SuffixFamily::Two => self.suffixes_2,
        }
    }

    /// First-infix family for a prefix in the C1 grammar.
    pub fn first_infix_family(&self, prefix: &str) -> InfixFamily {
        if self.alt_infix.contains(prefix) {
            InfixFamily::Consonant
        } else {
            InfixFamily::Vowel
        }
    }

    /// Suffix family a prefix pairs with in the C2 grammar.
    pub fn c2_suffix_family(&self, prefix: &str) -> SuffixFamily {
        if self.alt_suffix.contains(prefix) {
            SuffixFamily::Two
        } else {
            SuffixFamily::One
        }
    }

    /// Suffix family following a final infix in the C1 grammar: always the
    /// opposite letter class of the infix.
    pub fn c1_suffix_family(&self, last_infix: InfixFamily) -> SuffixFamily {
        match last_infix {
            InfixFamily::Vowel => SuffixFamily::Two,
            InfixFamily::Consonant => SuffixFamily::One,
        }
    }
}
