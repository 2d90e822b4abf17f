// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Canonical player-name keys.
//!
//! Admin commands and participant picks are free-form text. Every place that
//! writes or reads a scoring record goes through [`canonical_player_name`] so
//! that `"HAALAND"`, `"haaland "` and `"Haaland"` always meet on the same key.

/// Returns the canonical lookup key for a player name.
///
/// Leading and trailing whitespace is removed, inner runs of whitespace are
/// collapsed to a single space and every run of letters is title-cased: the
/// first letter of the run is upper-cased, the rest lower-cased. Non-letters
/// (digits, apostrophes, hyphens, dots) start a new run.
///
/// ```text
/// "  calvert-lewin " -> "Calvert-Lewin"
/// "E.  FERNANDEZ"    -> "E. Fernandez"
/// "o'neil"           -> "O'Neil"
/// ```
#[must_use]
pub fn canonical_player_name(raw: &str) -> String {
    let collapsed: String = raw.split_whitespace().collect::<Vec<&str>>().join(" ");

    let mut canonical: String = String::with_capacity(collapsed.len());
    let mut previous_is_letter: bool = false;

    for ch in collapsed.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                canonical.push(single_char_case(ch, ch.to_lowercase()));
            } else {
                canonical.push(single_char_case(ch, ch.to_uppercase()));
            }
            previous_is_letter = true;
        } else {
            canonical.push(ch);
            previous_is_letter = false;
        }
    }

    canonical
}

/// Case mappings that expand (`ß` to `SS`) would not survive a second pass,
/// so those characters are kept as written.
fn single_char_case(ch: char, mut mapped: impl Iterator<Item = char>) -> char {
    match (mapped.next(), mapped.next()) {
        (Some(single), None) => single,
        _ => ch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_player_name_title_cases_words() {
        assert_eq!(canonical_player_name("haaland"), "Haaland");
        assert_eq!(canonical_player_name("MOHAMED SALAH"), "Mohamed Salah");
    }

    #[test]
    fn test_canonical_player_name_collapses_whitespace() {
        assert_eq!(canonical_player_name("  bukayo    saka \t"), "Bukayo Saka");
    }

    #[test]
    fn test_canonical_player_name_handles_punctuation() {
        assert_eq!(canonical_player_name("calvert-lewin"), "Calvert-Lewin");
        assert_eq!(canonical_player_name("e. fernandez"), "E. Fernandez");
        assert_eq!(canonical_player_name("o'neil"), "O'Neil");
    }

    #[test]
    fn test_canonical_player_name_is_idempotent() {
        let once: String = canonical_player_name("de BRUYNE");
        assert_eq!(canonical_player_name(&once), once);
    }

    #[test]
    fn test_canonical_player_name_handles_non_ascii_letters() {
        assert_eq!(canonical_player_name("ødegaard"), "Ødegaard");
        assert_eq!(canonical_player_name("GVARDIOL"), "Gvardiol");
    }

    #[test]
    fn test_canonical_player_name_keeps_expanding_case_mappings() {
        assert_eq!(canonical_player_name("ßa"), "ßa");
        assert_eq!(canonical_player_name("STRAßE"), "Straße");
        assert_eq!(canonical_player_name("İLKAY gündoğan"), "İlkay Gündoğan");
    }

    #[test]
    fn test_canonical_player_name_is_idempotent_for_expanding_letters() {
        for raw in ["ßa", "STRAßE", "İlkay", "ŉa"] {
            let once: String = canonical_player_name(raw);
            assert_eq!(canonical_player_name(&once), once, "{raw}");
        }
    }
}
