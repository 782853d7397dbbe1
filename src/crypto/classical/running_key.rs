//! Running-key polyalphabetic ciphers
//!
//! Both ciphers uppercase the text and strip spaces, then add a key stream
//! letter by letter (`c = p + k mod 26`). They differ only in how the key
//! stream is produced:
//! - Vigenère repeats the keyword cyclically
//! - Autokey appends the plaintext itself after the keyword

use crate::error::CipherError;

use super::{letter, normalize_letters};

fn keyword_values(key: &str) -> Result<Vec<u8>, CipherError> {
    if key.is_empty() {
        return Err(CipherError::DegenerateInput(
            "running-key cipher needs a non-empty keyword".to_string(),
        ));
    }
    let values = normalize_letters(key)?;
    if values.is_empty() {
        return Err(CipherError::DegenerateInput(
            "keyword has no letters".to_string(),
        ));
    }
    Ok(values)
}

fn add(p: u8, k: u8) -> u8 {
    (p + k) % 26
}

fn sub(c: u8, k: u8) -> u8 {
    (c + 26 - k) % 26
}

/// Vigenère cipher: the keyword repeats to the length of the text
pub fn vigenere(text: &str, key: &str) -> Result<String, CipherError> {
    let key = keyword_values(key)?;
    let text = normalize_letters(text)?;
    Ok(text
        .iter()
        .zip(key.iter().cycle())
        .map(|(&p, &k)| letter(add(p, k)))
        .collect())
}

/// Undo [`vigenere`]
pub fn vigenere_decrypt(text: &str, key: &str) -> Result<String, CipherError> {
    let key = keyword_values(key)?;
    let text = normalize_letters(text)?;
    Ok(text
        .iter()
        .zip(key.iter().cycle())
        .map(|(&c, &k)| letter(sub(c, k)))
        .collect())
}

/// Autokey cipher: the key stream is the keyword followed by the plaintext,
/// truncated to the length of the text
pub fn autokey(text: &str, key: &str) -> Result<String, CipherError> {
    let key = keyword_values(key)?;
    let text = normalize_letters(text)?;
    Ok(text
        .iter()
        .zip(key.iter().chain(text.iter()))
        .map(|(&p, &k)| letter(add(p, k)))
        .collect())
}

/// Undo [`autokey`]. Once the keyword is used up, the key stream continues
/// with the plaintext recovered so far.
pub fn autokey_decrypt(text: &str, key: &str) -> Result<String, CipherError> {
    let key = keyword_values(key)?;
    let text = normalize_letters(text)?;

    let mut plain: Vec<u8> = Vec::with_capacity(text.len());
    for (i, &c) in text.iter().enumerate() {
        let k = if i < key.len() {
            key[i]
        } else {
            plain[i - key.len()]
        };
        plain.push(sub(c, k));
    }
    Ok(plain.into_iter().map(letter).collect())
}
