//! Fuzzy matching of caste names against a fixed gazetteer.
//!
//! Lookup order: exact (case-insensitive) → longest gazetteer entry contained
//! in the value → best Jaro similarity above a threshold. Anything else keeps
//! the upper-cased input.

/// Accepted caste names. Upper-case, no duplicates.
pub const CASTE_GAZETTEER: &[&str] = &[
    "MEITEI",
    "MEETEI",
    "MEITEI PANGAL",
    "LOIS",
    "GANGTE",
    "KABUI",
    "RONGMEI",
    "TANGKHUL",
    "MAO",
    "THADOU",
    "LIANGMAI",
    "POUMAI",
    "KOM",
    "MATE",
    "VAIPHEI",
    "MARING",
    "ANAL",
    "CHOUBE",
    "AIMOL",
    "KUKI",
    "HMAR",
    "PAITE",
    "DIMOL",
    "ROUMAI NAGA",
    "KHARAM",
];

/// How a gazetteer match was found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchKind {
    Exact,
    Contained,
    Similar(f64),
    /// No acceptable match; the normalized input is returned.
    Unmatched(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CasteMatch {
    pub value: String,
    pub kind: MatchKind,
}

/// Jaro similarity in [0, 1], compared case-insensitively.
pub fn jaro_similarity(a: &str, b: &str) -> f64 {
    let s1: Vec<char> = a.to_uppercase().chars().collect();
    let s2: Vec<char> = b.to_uppercase().chars().collect();

    if s1 == s2 {
        return 1.0;
    }
    if s1.is_empty() || s2.is_empty() {
        return 0.0;
    }

    let window = (s1.len().max(s2.len()) / 2).saturating_sub(1);
    let mut s1_matched = vec![false; s1.len()];
    let mut s2_matched = vec![false; s2.len()];
    let mut matches = 0usize;

    for (i, &c) in s1.iter().enumerate() {
        let start = i.saturating_sub(window);
        let end = (i + window + 1).min(s2.len());
        for j in start..end {
            if !s2_matched[j] && s2[j] == c {
                s1_matched[i] = true;
                s2_matched[j] = true;
                matches += 1;
                break;
            }
        }
    }

    if matches == 0 {
        return 0.0;
    }

    // Matched characters of s2 in order, compared with matched characters of s1.
    let s2_in_order = s2
        .iter()
        .zip(&s2_matched)
        .filter(|&(_, &m)| m)
        .map(|(c, _)| *c);
    let half_transpositions = s1
        .iter()
        .zip(&s1_matched)
        .filter(|&(_, &m)| m)
        .map(|(c, _)| *c)
        .zip(s2_in_order)
        .filter(|(x, y)| x != y)
        .count();
    let transpositions = half_transpositions / 2;

    let m = matches as f64;
    (m / s1.len() as f64 + m / s2.len() as f64 + (m - transpositions as f64) / m) / 3.0
}

/// Longest gazetteer entry found inside `input` (already upper-case).
///
/// An entry qualifies when it occurs as a substring and has at least as many
/// words as the input words it shares. Falls back to any input word that is
/// itself an entry.
fn find_contained(input: &str) -> Option<&'static str> {
    let input_words: Vec<&str> = input.split_whitespace().collect();

    let best = CASTE_GAZETTEER
        .iter()
        .filter(|name| input.contains(*name))
        .filter(|name| {
            let entry_words: Vec<&str> = name.split_whitespace().collect();
            let shared = input_words
                .iter()
                .filter(|w| entry_words.contains(*w))
                .count();
            entry_words.len() >= shared
        })
        .fold(None::<&'static str>, |best, &name| match best {
            Some(b) if b.len() >= name.len() => Some(b),
            _ => Some(name),
        });

    best.or_else(|| {
        input_words
            .iter()
            .find_map(|w| CASTE_GAZETTEER.iter().find(|name| *name == w).copied())
    })
}

/// Best Jaro match over the gazetteer. Ties keep the earlier entry.
fn most_similar(input: &str) -> (&'static str, f64) {
    let mut best = ("", 0.0);
    for &name in CASTE_GAZETTEER {
        let score = jaro_similarity(input, name);
        if score > best.1 {
            best = (name, score);
        }
    }
    best
}

/// Standardize a caste name against the gazetteer.
pub fn match_caste_name(raw: &str, threshold: f64) -> CasteMatch {
    let input = raw.trim().to_uppercase();
    if input.is_empty() {
        return CasteMatch { value: input, kind: MatchKind::Unmatched(0.0) };
    }

    if let Some(name) = CASTE_GAZETTEER.iter().find(|name| **name == input) {
        return CasteMatch { value: name.to_string(), kind: MatchKind::Exact };
    }

    if let Some(name) = find_contained(&input) {
        tracing::debug!(matched = name, "Caste name contains gazetteer entry");
        return CasteMatch { value: name.to_string(), kind: MatchKind::Contained };
    }

    let (name, score) = most_similar(&input);
    if score >= threshold {
        tracing::debug!(matched = name, score, "Caste name similarity match");
        CasteMatch { value: name.to_string(), kind: MatchKind::Similar(score) }
    } else {
        CasteMatch { value: input, kind: MatchKind::Unmatched(score) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn jaro_identical_and_empty() {
        assert_eq!(jaro_similarity("KOM", "kom"), 1.0);
        assert_eq!(jaro_similarity("", "KOM"), 0.0);
        assert_eq!(jaro_similarity("KOM", ""), 0.0);
        assert_eq!(jaro_similarity("", ""), 1.0);
    }

    #[test]
    fn jaro_reference_values() {
        assert!(approx(jaro_similarity("MARTHA", "MARHTA"), 0.944));
        assert!(approx(jaro_similarity("DIXON", "DICKSONX"), 0.767));
        assert!(approx(jaro_similarity("JELLYFISH", "SMELLYFISH"), 0.896));
    }

    #[test]
    fn jaro_no_common_characters() {
        assert_eq!(jaro_similarity("ABC", "XYZ"), 0.0);
    }

    #[test]
    fn gazetteer_is_upper_case_and_unique() {
        for (i, name) in CASTE_GAZETTEER.iter().enumerate() {
            assert_eq!(*name, name.to_uppercase());
            assert!(!CASTE_GAZETTEER[i + 1..].contains(name), "duplicate {name}");
        }
    }

    #[test]
    fn exact_match_is_case_insensitive() {
        let m = match_caste_name("  meetei ", 0.7);
        assert_eq!(m.value, "MEETEI");
        assert_eq!(m.kind, MatchKind::Exact);
        assert_eq!(match_caste_name("Liangmai", 0.7).value, "LIANGMAI");
    }

    #[test]
    fn longest_contained_entry_wins() {
        let m = match_caste_name("MEITEI PANGAL (MUSLIM)", 0.7);
        assert_eq!(m.value, "MEITEI PANGAL");
        assert_eq!(m.kind, MatchKind::Contained);
        assert_eq!(match_caste_name("TANGKHUL NAGA", 0.7).value, "TANGKHUL");
    }

    #[test]
    fn similar_name_is_corrected() {
        let m = match_caste_name("TANGKUL", 0.7);
        assert_eq!(m.value, "TANGKHUL");
        assert!(matches!(m.kind, MatchKind::Similar(s) if s >= 0.7));
    }

    #[test]
    fn unmatched_keeps_upper_cased_input() {
        let m = match_caste_name(" brahmin ", 0.7);
        assert_eq!(m.value, "BRAHMIN");
        assert!(matches!(m.kind, MatchKind::Unmatched(_)));
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(match_caste_name("   ", 0.7).value, "");
    }
}
