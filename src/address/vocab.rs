use std::collections::HashSet;
use std::sync::LazyLock;

/// Road-type tokens, in tie-break order.
pub static STREET_SUFFIXES: LazyLock<Vocabulary> = LazyLock::new(|| Vocabulary::new(&[
    "street", "st", "road", "rd", "avenue", "ave", "boulevard", "blvd",
    "lane", "ln", "drive", "dr", "court", "ct", "place", "pl", "terrace", "ter",
    "way", "wy", "highway", "hwy", "circle", "cir", "parkway", "pkwy",
    "square", "sq", "loop", "lp", "trail", "trl", "crescent", "cres",
    "park", "pke", "expressway", "expy", "mount", "mt", "point", "pt",
    "station", "sta", "view", "vw", "fort", "ft", "east", "west", "north", "south", "row",
]));

/// Sub-unit designators, in tie-break order.
///
/// `#` and `apt.` can never match: punctuation is gone before designators are looked up.
pub static UNIT_DESIGNATORS: LazyLock<Vocabulary> = LazyLock::new(|| Vocabulary::new(&[
    "apt", "apartment", "unit", "ste", "suite", "floor", "fl",
    "rm", "room", "#", "no", "number", "apt.", "ap", "appt",
]));

/// A fixed, ordered set of lowercase tokens
#[derive(Debug)]
pub struct Vocabulary {
    ordered: &'static [&'static str],
    members: HashSet<&'static str>,
}

impl Vocabulary {
    fn new(ordered: &'static [&'static str]) -> Self {
        Self {
            ordered,
            members: ordered.iter().copied().collect(),
        }
    }

    /// look up a token, returning the vocabulary's own entry
    pub fn get(&self, token: &str) -> Option<&'static str> {
        self.members.get(token).copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.members.contains(token)
    }

    /// entries in declared order, which is the tie-break order
    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.ordered.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
