//! Hill cipher with a 2x2 key matrix
//!
//! Letters are processed in pairs as row vectors: `[c1, c2] = [p1, p2] * K`
//! (mod 26). The key must be invertible mod 26, which is checked when the
//! [`HillKey`] is built so that every ciphertext can be decrypted again.

use std::fmt;

use tracing::trace;

use crate::crypto::modular::{gcd, mod_inverse, reduce, ALPHABET_LEN};
use crate::error::CipherError;

use super::{letter, normalize_letters, PAD};

/// The lab's fixed key matrix
pub const DEFAULT_MATRIX: [[i64; 2]; 2] = [[3, 3], [2, 5]];

/// A 2x2 key matrix that is invertible mod 26
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct HillKey {
    matrix: [[i64; 2]; 2],
}

impl HillKey {
    /// Build a key, reducing the entries mod 26 and checking that
    /// `gcd(det K, 26) = 1`
    pub fn new(matrix: [[i64; 2]; 2]) -> Result<Self, CipherError> {
        let matrix = matrix.map(|row| row.map(reduce));
        let determinant = determinant(&matrix);
        if gcd(determinant, ALPHABET_LEN) != 1 {
            return Err(CipherError::NonInvertibleMatrix { determinant });
        }
        Ok(Self { matrix })
    }

    /// The reduced key matrix
    pub fn matrix(&self) -> [[i64; 2]; 2] {
        self.matrix
    }

    /// Determinant of the key, in `[0, 26)`
    pub fn determinant(&self) -> i64 {
        determinant(&self.matrix)
    }

    /// `K^-1 mod 26 = det^-1 * adj(K)`
    pub fn inverse(&self) -> Self {
        let [[a, b], [c, d]] = self.matrix;
        // Checked coprime in `new`
        let det_inv = mod_inverse(self.determinant(), ALPHABET_LEN).unwrap_or(1);
        let adjugate = [[d, -b], [-c, a]];
        Self {
            matrix: adjugate.map(|row| row.map(|v| reduce(v * det_inv))),
        }
    }

    fn apply(&self, p1: u8, p2: u8) -> (u8, u8) {
        let (p1, p2) = (p1 as i64, p2 as i64);
        let k = &self.matrix;
        let c1 = reduce(p1 * k[0][0] + p2 * k[1][0]);
        let c2 = reduce(p1 * k[0][1] + p2 * k[1][1]);
        (c1 as u8, c2 as u8)
    }
}

impl Default for HillKey {
    fn default() -> Self {
        Self {
            matrix: DEFAULT_MATRIX,
        }
    }
}

impl fmt::Debug for HillKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HillKey")
            .field("matrix", &self.matrix)
            .field("determinant", &self.determinant())
            .finish()
    }
}

fn determinant(m: &[[i64; 2]; 2]) -> i64 {
    reduce(m[0][0] * m[1][1] - m[0][1] * m[1][0])
}

fn transform_pairs(values: &[u8], key: &HillKey) -> String {
    let mut out = String::with_capacity(values.len());
    for pair in values.chunks_exact(2) {
        let (c1, c2) = key.apply(pair[0], pair[1]);
        trace!(p1 = pair[0], p2 = pair[1], c1, c2, "Hill block");
        out.push(letter(c1));
        out.push(letter(c2));
    }
    out
}

/// Encrypt with the Hill cipher. The text is uppercased, stripped of spaces
/// and padded with `X` to an even length.
pub fn hill(text: &str, key: &HillKey) -> Result<String, CipherError> {
    let mut values = normalize_letters(text)?;
    if values.len() % 2 != 0 {
        values.push(PAD - b'A');
    }
    Ok(transform_pairs(&values, key))
}

/// Undo [`hill`] by multiplying each pair with the inverse key
pub fn hill_decrypt(text: &str, key: &HillKey) -> Result<String, CipherError> {
    let values = normalize_letters(text)?;
    if values.len() % 2 != 0 {
        return Err(CipherError::DegenerateInput(format!(
            "Hill ciphertext must have an even number of letters, got {}",
            values.len()
        )));
    }
    Ok(transform_pairs(&values, &key.inverse()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_key_is_valid() {
        let key = HillKey::new(DEFAULT_MATRIX).unwrap();
        assert_eq!(key, HillKey::default());
        assert_eq!(key.determinant(), 9);
    }

    #[test]
    fn test_hill_known_vector() {
        // H=7, I=8: c1 = (7*3 + 8*2) % 26 = 37 % 26 = 11 = L
        //           c2 = (7*3 + 8*5) % 26 = 61 % 26 = 9 = J
        let key = HillKey::default();
        assert_eq!(hill("HI", &key).unwrap(), "LJ");
        assert_eq!(hill("hi", &key).unwrap(), "LJ");
    }

    #[test]
    fn test_hill_pads_odd_length() {
        let key = HillKey::default();
        let padded = hill("HELLO", &key).unwrap();
        assert_eq!(padded.len(), 6);
        assert_eq!(padded, hill("HELLOX", &key).unwrap());
    }

    #[test]
    fn test_inverse_matrix() {
        let key = HillKey::default();
        let inverse = key.inverse();
        // det = 9, 9^-1 mod 26 = 3; adj = [[5, -3], [-2, 3]]
        assert_eq!(inverse.matrix(), [[15, 17], [20, 9]]);
    }

    #[test]
    fn test_hill_round_trip() {
        let key = HillKey::new([[5, 17], [8, 3]]).unwrap();
        let encrypted = hill("meet me at the usual place", &key).unwrap();
        assert_eq!(
            hill_decrypt(&encrypted, &key).unwrap(),
            "MEETMEATTHEUSUALPLACEX"
        );
    }

    #[test]
    fn test_non_invertible_key_rejected() {
        assert_eq!(
            HillKey::new([[2, 4], [1, 3]]),
            Err(CipherError::NonInvertibleMatrix { determinant: 2 })
        );
        assert!(HillKey::new([[1, 2], [2, 4]]).is_err());
    }

    #[test]
    fn test_hill_decrypt_odd_length_rejected() {
        let key = HillKey::default();
        assert!(matches!(
            hill_decrypt("ABC", &key),
            Err(CipherError::DegenerateInput(_))
        ));
    }
}
