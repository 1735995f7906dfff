//! Candy skin catalog
//!
//! Pattern ids are opaque to the simulation; the page maps them to artwork.

/// A named collection of candy skins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandySet {
    pub name: &'static str,
    pub patterns: &'static [&'static str],
}

impl CandySet {
    /// Owned pattern list handed to a round
    pub fn pattern_ids(&self) -> Vec<String> {
        self.patterns.iter().map(|p| (*p).to_string()).collect()
    }
}

pub const CANDY_SETS: &[CandySet] = &[
    CandySet {
        name: "Classic",
        patterns: &[
            "classic/smile",
            "classic/star",
            "classic/swirl",
            "classic/ring",
            "classic/drop",
        ],
    },
    CandySet {
        name: "Fruit",
        patterns: &["fruit/strawberry", "fruit/orange", "fruit/kiwi"],
    },
    CandySet {
        name: "Animal",
        patterns: &["animal/panda", "animal/cat", "animal/dog"],
    },
];

/// Look up a set by index, falling back to the first set
pub fn candy_set(index: usize) -> &'static CandySet {
    CANDY_SETS.get(index).unwrap_or(&CANDY_SETS[0])
}
