//! Name normalization - canonical matching fingerprints for material names.
//!
//! Supplier invoices spell the same material a dozen ways: with or without
//! volume ("Muurverf Extra Mat 10L" vs "Muurverf Extra Mat 2,5L"), with
//! color codes ("RAL 9010"), or with qualifier words ("wit", "lichte").
//! [`normalize`] strips all of that and compacts what remains into a
//! separator-free `[a-z0-9]` fingerprint, so cosmetic variants of one
//! material collapse onto the same string.

/// Volume and weight unit tokens stripped when preceded by a number.
const UNIT_TOKENS: &[&str] = &["l", "liter", "lt", "kg", "ml", "g", "m", "cm", "mm"];

/// Color-system prefixes stripped together with their numeric code.
const COLOR_SYSTEMS: &[&str] = &["ral", "ncs", "pantone"];

/// Color and qualifier words that never distinguish one material from another.
const NOISE_WORDS: &[&str] = &[
    "sf", "op", "lichte", "donkere", "kleur", "wit", "zwart", "grijs", "basis",
];

/// Produces the canonical matching fingerprint for a material name.
///
/// Lowercases the input, strips volume/weight tokens, color-system codes,
/// and qualifier words, then drops every character outside `[a-z0-9]`.
/// Total and deterministic; the empty string is a valid result. The strip
/// pass repeats until nothing changes, so the function is idempotent for
/// every input, including degenerate ones whose first pass glues a number
/// onto a unit.
#[must_use]
pub fn normalize(name: &str) -> String {
    let mut current = strip_pass(&name.to_lowercase());
    loop {
        let next = strip_pass(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

/// One pass of the token strip over an already-lowercased string.
fn strip_pass(lowered: &str) -> String {
    let words: Vec<&str> = lowered.split_whitespace().collect();
    let mut kept: Vec<&str> = Vec::with_capacity(words.len());
    let mut i = 0;

    while i < words.len() {
        // Punctuation glued to a word ("wit," / "(10l)") must not hide it
        let word = words[i].trim_matches(|c: char| !c.is_ascii_alphanumeric());
        let next = words
            .get(i + 1)
            .map(|w| w.trim_matches(|c: char| !c.is_ascii_alphanumeric()));

        // Fused volume token: "10l", "2,5kg"
        if is_volume_token(word) {
            i += 1;
            continue;
        }
        // Split volume token: "10 l"
        if is_number(word) && next.is_some_and(|w| UNIT_TOKENS.contains(&w)) {
            i += 2;
            continue;
        }
        // Fused color code: "ral9010"
        if is_color_code(word) {
            i += 1;
            continue;
        }
        // Split color code: "ral 9010"
        if COLOR_SYSTEMS.contains(&word) && next.is_some_and(is_digits) {
            i += 2;
            continue;
        }
        if NOISE_WORDS.contains(&word) {
            i += 1;
            continue;
        }

        kept.push(word);
        i += 1;
    }

    kept.concat()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// A number with at most one decimal comma or point: "10", "2,5", "0.75".
fn is_number(word: &str) -> bool {
    let mut seen_digit = false;
    let mut seen_separator = false;
    for c in word.chars() {
        if c.is_ascii_digit() {
            seen_digit = true;
        } else if (c == ',' || c == '.') && !seen_separator {
            seen_separator = true;
        } else {
            return false;
        }
    }
    seen_digit
}

fn is_digits(word: &str) -> bool {
    !word.is_empty() && word.bytes().all(|b| b.is_ascii_digit())
}

/// A number immediately followed by a unit token, as one word.
fn is_volume_token(word: &str) -> bool {
    let unit_start = word
        .find(|c: char| !(c.is_ascii_digit() || c == ',' || c == '.'))
        .unwrap_or(word.len());
    let (number, unit) = word.split_at(unit_start);
    number.chars().any(|c| c.is_ascii_digit()) && UNIT_TOKENS.contains(&unit)
}

/// A color-system prefix immediately followed by digits, as one word.
fn is_color_code(word: &str) -> bool {
    COLOR_SYSTEMS.iter().any(|system| {
        word.strip_prefix(system).is_some_and(is_digits)
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_volume_invariance() {
        assert_eq!(
            normalize("Muurverf Extra Mat 10L"),
            normalize("Muurverf Extra Mat 2,5L")
        );
        assert_eq!(normalize("Muurverf Extra Mat 10L"), "muurverfextramat");
    }

    #[test]
    fn test_split_volume_token() {
        assert_eq!(normalize("Grondverf 5 kg"), "grondverf");
        assert_eq!(normalize("Grondverf 0.75 liter"), "grondverf");
    }

    #[test]
    fn test_color_codes_stripped() {
        assert_eq!(normalize("Lakverf RAL 9010"), "lakverf");
        assert_eq!(normalize("Lakverf RAL9010"), "lakverf");
        assert_eq!(normalize("Lakverf NCS 0500"), "lakverf");
        assert_eq!(normalize("Lakverf Pantone 485"), "lakverf");
    }

    #[test]
    fn test_noise_words_stripped_whole_word_only() {
        assert_eq!(normalize("Primer Wit"), "primer");
        assert_eq!(normalize("Lichte Kleur Basis OP"), "");
        // "wit" inside a word is part of the name, not a qualifier
        assert_eq!(normalize("muurverfwit"), "muurverfwit");
    }

    #[test]
    fn test_punctuation_and_casing() {
        assert_eq!(normalize("Anti-Roest Primer (Grijs)"), "antiroestprimer");
        assert_eq!(normalize("  MUURVERF   extra  "), "muurverfextra");
    }

    #[test]
    fn test_idempotent() {
        for input in [
            "Muurverf Extra Mat 10L",
            "Lakverf RAL 9010 zijdeglans",
            "Primer Wit 10L",
            "muurverfwit",
            "",
            "10L",
            // Degenerate: the first pass glues "10" onto "l"
            "10-l",
            "2,5 L Extra",
        ] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_bare_number_survives() {
        // A number not followed by a unit is part of the name
        assert_eq!(normalize("Vulmiddel 2000"), "vulmiddel2000");
    }

    #[test]
    fn test_empty_and_noise_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("10L RAL 9010 wit"), "");
    }
}
