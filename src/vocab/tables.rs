//! Compiled-in vocabulary: the fragment lists and exception tables that
//! define the entire naming space.
//!
//! Every fragment is a pure letter class ("y" counts as a consonant):
//! prefixes and infixes are either all-vowel or all-consonant, suffix
//! family 1 is all-vowel, suffix family 2 all-consonant. The grammars
//! alternate classes between adjacent fragments, so fragment boundaries in
//! a finished name are exactly the vowel/consonant transitions. That
//! property is what makes parsing unambiguous; edits here must preserve it.
//!
//! List order is load-bearing: run-length offsets derive from it.

/// Default run length for prefixes without an override.
pub const PREFIX_RUN_DEFAULT: u32 = 38;

/// Default run length for vowel-family infixes.
pub const INFIX_VOWEL_RUN_DEFAULT: u32 = 17;

/// Default run length for consonant-family infixes.
pub const INFIX_CONSONANT_RUN_DEFAULT: u32 = 13;

pub static PREFIXES: &[&str] = &[
    "th", "eo", "oo", "eu", "tr", "sly", "dry", "ou", "tz",
    "phl", "ae", "sch", "hyp", "syst", "ai", "kyl", "phr", "eae",
    "ph", "fl", "ao", "scr", "shr", "fly", "pl", "fr", "au",
    "pry", "pr", "hyph", "py", "chr", "phyl", "tyr", "bl", "cry",
    "gl", "br", "gr", "by", "aae", "myc", "gyr", "ly", "myl",
    "lych", "myn", "ch", "myr", "cl", "rh", "wh", "pyth", "gry",
];

pub static PREFIX_RUN_OVERRIDES: &[(&str, u32)] = &[
    ("tz", 4), ("pyth", 4), ("sly", 9), ("eae", 9), ("aae", 9),
    ("lych", 9), ("syst", 17), ("hyph", 17), ("th", 61), ("eo", 61),
    ("oo", 61), ("eu", 61), ("ou", 61), ("ae", 61), ("ai", 61), ("ao", 61),
    ("au", 61), ("ch", 61)
];

pub static INFIXES_VOWEL: &[&str] = &[
    "o", "a", "e", "u", "i", "ai", "ea", "ie", "oo", "ee", "oa", "au",
    "ae", "oe", "ue", "oi", "ia", "ua", "ei", "io", "aa", "ao", "eia", "eou",
];

pub static INFIXES_CONSONANT: &[&str] = &[
    "ll", "ss", "b", "c", "d", "f", "dg", "g", "ng", "h", "j", "k",
    "l", "m", "n", "mb", "p", "q", "gn", "th", "r", "s", "t", "ch",
    "tch", "w", "wh", "ck", "x", "y", "z", "ph", "sh", "ct", "wr", "st",
];

pub static INFIX_RUN_OVERRIDES: &[(&str, u32)] = &[
    ("oe", 9), ("ue", 9), ("eia", 4), ("eou", 4), ("q", 4), ("wr", 4),
    ("tch", 4), ("dg", 9), ("gn", 9)
];

pub static SUFFIXES_1: &[&str] = &[
    "a", "aa", "aae", "ae", "aea", "aei", "ai", "aia", "ao", "aoe",
    "au", "aua", "e", "ea", "eae", "ee", "ei", "eia", "eo", "eoe",
    "eou", "eu", "eua", "euo", "i", "ia", "iae", "ie", "io", "ioe",
    "iou", "iu", "iua", "iue", "o", "oa", "oae", "oea", "oe", "oi",
    "oia", "oo", "ooe", "ou", "oua", "oue", "u", "ua", "uae", "ue",
    "uea", "ui", "uia", "uo", "uu", "uui", "aao", "aeo", "aie", "aio",
    "auo", "eao", "eea", "eio", "eoa", "eui", "iao", "iea", "ioa", "oao",
    "oei", "oeu", "oio", "uai", "uei", "uoa",
];

pub static SUFFIXES_2: &[&str] = &[
    "b", "bs", "c", "ck", "cks", "cs", "ct", "cts", "d", "ds", "dst",
    "f", "fs", "g", "gn", "gns", "gs", "h", "hn", "hs", "j", "k",
    "ks", "l", "ll", "lls", "ls", "lt", "lts", "m", "mb", "mbs", "ms",
    "n", "nd", "nds", "ng", "ngs", "ns", "nt", "nts", "p", "ph", "phs",
    "ps", "q", "qs", "r", "rb", "rbs", "rd", "rds", "rk", "rks", "rl",
    "rls", "rm", "rms", "rn", "rns", "rs", "rt", "rts", "s", "sc", "scs",
    "sh", "shs", "sks", "ss", "st", "sts", "t", "tch", "th", "ths", "ts",
    "tts", "v", "vs", "w", "wh", "ws", "wsy", "x", "xs", "y", "ys",
    "z", "zs",
];

pub static ALT_INFIX_PREFIXES: &[&str] = &[
    "eo", "oo", "eu", "ou", "ae", "ai", "eae", "ao", "au", "aae",
];

pub static ALT_SUFFIX_PREFIXES: &[&str] = &[
    "eo", "oo", "eu", "ou", "ae", "ai", "eae", "ao", "au", "aae",
];
