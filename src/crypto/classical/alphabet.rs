//! Single-letter substitution ciphers
//!
//! Shift (a.k.a. Caesar or Additive), multiplicative and affine ciphers. All
//! of them preserve case and leave non-letters untouched, so the output has
//! exactly the layout of the input.

use crate::crypto::modular::{is_coprime_to_alphabet, mod_inverse, reduce, ALPHABET_LEN};
use crate::error::CipherError;

/// Apply `f` to the zero-based value of every ASCII letter, keeping its case
fn map_letters<F>(text: &str, f: F) -> String
where
    F: Fn(i64) -> i64,
{
    text.chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                let base = if c.is_ascii_uppercase() { b'A' } else { b'a' };
                let value = (c as u8 - base) as i64;
                (base + reduce(f(value)) as u8) as char
            } else {
                c
            }
        })
        .collect()
}

fn check_key(key: i64) -> Result<(), CipherError> {
    if is_coprime_to_alphabet(key) {
        Ok(())
    } else {
        Err(CipherError::InvalidKey { key })
    }
}

fn inverse_key(key: i64) -> Result<i64, CipherError> {
    mod_inverse(reduce(key), ALPHABET_LEN).ok_or(CipherError::InvalidKey { key })
}

/// Shift every letter forward by `key` positions: `c' = (c + k) mod 26`
pub fn shift(text: &str, key: i64) -> String {
    let key = reduce(key);
    map_letters(text, |p| p + key)
}

/// Undo [`shift`]: equivalent to shifting by `26 - k`
pub fn unshift(text: &str, key: i64) -> String {
    shift(text, ALPHABET_LEN - reduce(key))
}

/// Multiplicative cipher: `c' = c * k mod 26`, `k` coprime to 26
pub fn multiplicative(text: &str, key: i64) -> Result<String, CipherError> {
    check_key(key)?;
    let key = reduce(key);
    Ok(map_letters(text, |p| p * key))
}

/// Undo [`multiplicative`] by multiplying with `k^-1 mod 26`
pub fn multiplicative_decrypt(text: &str, key: i64) -> Result<String, CipherError> {
    let inverse = inverse_key(key)?;
    Ok(map_letters(text, |c| c * inverse))
}

/// Affine cipher: `c' = (a * c + b) mod 26`, `a` coprime to 26
pub fn affine(text: &str, a: i64, b: i64) -> Result<String, CipherError> {
    check_key(a)?;
    let (a, b) = (reduce(a), reduce(b));
    Ok(map_letters(text, |p| a * p + b))
}

/// Undo [`affine`]: `p = a^-1 * (c - b) mod 26`
pub fn affine_decrypt(text: &str, a: i64, b: i64) -> Result<String, CipherError> {
    let inverse = inverse_key(a)?;
    let b = reduce(b);
    Ok(map_letters(text, |c| inverse * (c - b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_shift_preserves_layout() {
        assert_eq!(shift("Hello, World!", 3), "Khoor, Zruog!");
        assert_eq!(shift("xyz XYZ", 3), "abc ABC");
        assert_eq!(shift("abc", -1), "zab");
        assert_eq!(shift("abc", 29), "def");
    }

    #[test]
    fn test_shift_round_trip() {
        let text = "TheQuickBrownFoxJumpsOverTheLazyDog";
        for k in 0..26 {
            assert_eq!(shift(&shift(text, k), 26 - k), text);
            assert_eq!(unshift(&shift(text, k), k), text);
        }
    }

    #[test]
    fn test_non_ascii_passes_through() {
        assert_eq!(shift("é1 ß", 5), "é1 ß");
    }

    #[test]
    fn test_multiplicative() {
        // h=7 -> 21=v, e=4 -> 12=m, l=11 -> 33%26=7=h, o=14 -> 42%26=16=q
        assert_eq!(multiplicative("hello", 3).unwrap(), "vmhhq");
        assert_eq!(multiplicative("HELLO", 3).unwrap(), "VMHHQ");
    }

    #[test]
    fn test_multiplicative_rejects_non_coprime() {
        assert_eq!(
            multiplicative("hello", 13),
            Err(CipherError::InvalidKey { key: 13 })
        );
        assert!(multiplicative("hello", 2).is_err());
        assert!(multiplicative_decrypt("hello", 26).is_err());
    }

    #[test]
    fn test_multiplicative_round_trip() {
        let text = "Attack at Dawn";
        for k in (1..26).filter(|&k| is_coprime_to_alphabet(k)) {
            let inv = mod_inverse(k, 26).unwrap();
            let encrypted = multiplicative(text, k).unwrap();
            assert_eq!(multiplicative(&encrypted, inv).unwrap(), text);
            assert_eq!(multiplicative_decrypt(&encrypted, k).unwrap(), text);
        }
    }

    #[test]
    fn test_affine() {
        // a=5, b=8: A=0 -> 8=I, F=5 -> 33%26=7=H
        assert_eq!(affine("AFFINE", 5, 8).unwrap(), "IHHWVC");
        assert!(affine("AFFINE", 4, 8).is_err());
    }

    #[test]
    fn test_affine_round_trip() {
        let text = "Affine cipher, 2 keys!";
        for a in (1..26).filter(|&a| is_coprime_to_alphabet(a)) {
            for b in [0, 1, 8, 25, -3] {
                let encrypted = affine(text, a, b).unwrap();
                let inv = mod_inverse(a, 26).unwrap();
                let inv_b = reduce(-inv * b);
                assert_eq!(affine(&encrypted, inv, inv_b).unwrap(), text);
                assert_eq!(affine_decrypt(&encrypted, a, b).unwrap(), text);
            }
        }
    }
}
