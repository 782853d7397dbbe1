//! Modular arithmetic helpers
//!
//! Greatest common divisor, the recursive extended Euclidean algorithm and
//! modular inverses. The functions are generic over [`num_traits::Num`] so the
//! same code serves the mod-26 classical ciphers (`i64`) and RSA key
//! derivation (`BigInt`).
//!
//! All inputs are expected to be non-negative; callers reduce negative keys
//! with `rem_euclid` first.

use num_traits::Num;

/// Size of the Latin alphabet all classical ciphers work over
pub const ALPHABET_LEN: i64 = 26;

/// Extended Euclidean algorithm.
///
/// Returns `(g, x, y)` such that `a * x + b * y = g = gcd(a, b)`.
pub fn egcd<T>(a: T, b: T) -> (T, T, T)
where
    T: Num + Clone,
{
    if b.is_zero() {
        return (a, T::one(), T::zero());
    }

    let quotient = a.clone() / b.clone();
    let remainder = a % b.clone();
    let (g, x1, y1) = egcd(b, remainder);
    let y = x1 - quotient * y1.clone();
    (g, y1, y)
}

/// Greatest common divisor
pub fn gcd<T>(a: T, b: T) -> T
where
    T: Num + Clone,
{
    egcd(a, b).0
}

/// Modular inverse of `a` modulo `m`, normalized into `[0, m)`.
///
/// Returns `None` when `gcd(a, m) != 1`.
pub fn mod_inverse<T>(a: T, m: T) -> Option<T>
where
    T: Num + Clone,
{
    let (g, x, _) = egcd(a, m.clone());
    if !g.is_one() {
        return None;
    }
    Some(((x % m.clone()) + m.clone()) % m)
}

/// Reduce any integer into `[0, 26)`
#[inline]
pub fn reduce(value: i64) -> i64 {
    value.rem_euclid(ALPHABET_LEN)
}

/// Whether `k` has a multiplicative inverse mod 26
pub fn is_coprime_to_alphabet(k: i64) -> bool {
    gcd(reduce(k), ALPHABET_LEN) == 1
}
