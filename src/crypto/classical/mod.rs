//! Classical ciphers
//!
//! Substitution and transposition ciphers over the 26-letter Latin alphabet:
//! - `alphabet` - shift (Caesar/Additive), multiplicative and affine
//! - `running_key` - Autokey and Vigenère
//! - `transposition` - Rail Fence and keyed columnar transposition
//! - `hill` - 2x2 Hill matrix cipher
//! - `playfair` - Playfair digraph cipher
//!
//! Every function is a pure transform of its inputs.

pub mod alphabet;
pub mod hill;
pub mod playfair;
pub mod running_key;
pub mod transposition;

use crate::error::CipherError;

/// Filler used to pad incomplete blocks and split doubled Playfair letters
pub const PAD: u8 = b'X';

/// Remove the space characters from the text
pub(crate) fn strip_spaces(text: &str) -> String {
    text.chars().filter(|&c| c != ' ').collect()
}

/// Uppercase and strip spaces, rejecting anything that is not an ASCII letter.
///
/// Returns the zero-based letter values (`A = 0`).
pub(crate) fn normalize_letters(text: &str) -> Result<Vec<u8>, CipherError> {
    text.chars()
        .filter(|&c| c != ' ')
        .map(letter_value)
        .collect()
}

/// Zero-based value of an ASCII letter, regardless of case
pub(crate) fn letter_value(c: char) -> Result<u8, CipherError> {
    if c.is_ascii_alphabetic() {
        Ok(c.to_ascii_uppercase() as u8 - b'A')
    } else {
        Err(CipherError::NonAlphabetic(c))
    }
}

/// Uppercase letter for a value in `[0, 26)`
#[inline]
pub(crate) fn letter(value: u8) -> char {
    (b'A' + value) as char
}
