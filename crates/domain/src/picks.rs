// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pick parsing.
//!
//! Participants send their picks as a chat message, one player per line.
//! Parsing only answers "which names are in this message"; whether the
//! message is a valid submission (exactly four names) is decided by the
//! caller.

use std::collections::HashMap;

/// Number of picks in a valid submission.
pub const PICKS_PER_SUBMISSION: usize = 4;

/// Built-in corrections for commonly misspelled player names.
const BUILT_IN_CORRECTIONS: &[(&str, &str)] = &[
    ("halland", "Haaland"),
    ("richalison", "Richarlison"),
    ("morgan rogers", "Rogers"),
    ("calvert-lewin", "DCL"),
    ("mbuemo", "Mbeumo"),
    ("enzo fernandez", "E. Fernandez"),
    ("enzo", "E. Fernandez"),
    ("bruno fernandes", "B. Fernandes"),
];

/// Static spelling-correction table keyed by lower-cased misspelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCorrections {
    entries: HashMap<String, String>,
}

impl Default for PlayerCorrections {
    fn default() -> Self {
        let mut corrections: Self = Self::empty();
        for (misspelling, canonical) in BUILT_IN_CORRECTIONS {
            corrections.insert(misspelling, canonical);
        }
        corrections
    }
}

impl PlayerCorrections {
    /// Creates a table with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Adds or replaces a correction.
    pub fn insert(&mut self, misspelling: &str, canonical: &str) {
        self.entries.insert(
            misspelling.trim().to_lowercase(),
            canonical.trim().to_string(),
        );
    }

    /// Looks up the canonical display name for `name`, ignoring case.
    #[must_use]
    pub fn correct(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Number of entries in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Extracts player names from a message body.
///
/// Lines are trimmed; empty lines and lines made only of ASCII digits (list
/// numbering echoed back by chat clients) are dropped. Each remaining line is
/// replaced by its correction when the table knows it, otherwise kept as
/// typed. Order is preserved and nothing is deduplicated.
#[must_use]
pub fn parse_picks(text: &str, corrections: &PlayerCorrections) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.bytes().all(|b| b.is_ascii_digit()))
        .map(|line| {
            corrections
                .correct(line)
                .map_or_else(|| line.to_string(), ToString::to_string)
        })
        .collect()
}
