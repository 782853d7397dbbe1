//! Frequency analysis
//!
//! Ranks the letters of a ciphertext by how often they occur and lines them
//! up against the usual English frequency order to guess a monoalphabetic
//! substitution key.

use std::collections::BTreeMap;

/// English letters from most to least frequent
pub const ENGLISH_ORDER: &str = "etaoinshrdlcumwfgypbvkjxqz";

/// Substitution key: ciphertext letter to plaintext letter
pub type SubstitutionKey = BTreeMap<char, char>;

/// Letters of `text` (lowercased, spaces ignored) from most to least frequent.
/// Letters with equal counts keep the order of their first appearance.
pub fn letter_frequency(text: &str) -> Vec<char> {
    let mut counts: Vec<(char, usize)> = Vec::new();
    for c in text.chars().filter(|&c| c != ' ').flat_map(char::to_lowercase) {
        match counts.iter_mut().find(|(letter, _)| *letter == c) {
            Some((_, count)) => *count += 1,
            None => counts.push((c, 1)),
        }
    }
    // stable sort keeps first-appearance order for ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().map(|(c, _)| c).collect()
}

/// Pair each ranked ciphertext letter with the letter of the same rank in
/// `reference_order`
pub fn substitution_guess(ranked: &[char], reference_order: &str) -> SubstitutionKey {
    ranked
        .iter()
        .copied()
        .zip(reference_order.chars())
        .collect()
}

/// Apply a substitution key. Spaces are kept and letters missing from the key
/// become `_`.
pub fn decode_with_key(text: &str, key: &SubstitutionKey) -> String {
    text.chars()
        .map(|c| {
            if c == ' ' {
                ' '
            } else {
                key.get(&c).copied().unwrap_or('_')
            }
        })
        .collect()
}

/// Letters where `guess` disagrees with `correct`, as `(guessed, correct)`.
/// A letter absent from the guess is reported as `_`.
pub fn compare_keys(
    guess: &SubstitutionKey,
    correct: &SubstitutionKey,
) -> BTreeMap<char, (char, char)> {
    correct
        .iter()
        .filter_map(|(letter, &right)| {
            let guessed = guess.get(letter).copied().unwrap_or('_');
            (guessed != right).then_some((*letter, (guessed, right)))
        })
        .collect()
}
